// Tron Battle core types
// Coordinates, directions and the per-tick records delivered by the judge

use serde::{Deserialize, Serialize};

/// Identifier the judge assigns to each player (0..N-1)
pub type PlayerId = usize;

/// 2D coordinate on the arena, y grows downward
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// The judge reports eliminated players with negative coordinates
    pub fn is_dead_sentinel(&self) -> bool {
        self.x < 0 || self.y < 0
    }
}

/// The four moves a light cycle can make
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns all directions in canonical order
    pub fn all() -> [Direction; 4] {
        [Direction::Left, Direction::Right, Direction::Up, Direction::Down]
    }

    /// Calculates the neighbouring coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
            Direction::Up => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y + 1 },
        }
    }

    /// Derives the direction of travel between two positions
    ///
    /// Only a move along exactly one axis yields a direction; no movement or a
    /// diagonal jump returns `None`.
    pub fn from_delta(from: &Coord, to: &Coord) -> Option<Direction> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;

        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, 1) => Some(Direction::Down),
            (0, -1) => Some(Direction::Up),
            _ => None,
        }
    }
}

/// Fixed-size rectangular coordinate space
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Grid { width, height }
    }

    /// Checks whether a coordinate lies inside [0, width) x [0, height)
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }
}

/// Per-tick game header: total player count and our own id
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameHeader {
    pub player_count: usize,
    pub self_id: PlayerId,
}

/// One player's positions for a tick, as reported by the judge
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRecord {
    pub previous: Coord,
    pub current: Coord,
}

impl TickRecord {
    pub fn new(previous: Coord, current: Coord) -> Self {
        TickRecord { previous, current }
    }

    /// Record the judge sends for an eliminated player
    pub fn dead() -> Self {
        TickRecord {
            previous: Coord::new(-1, -1),
            current: Coord::new(-1, -1),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current.is_dead_sentinel()
    }
}
