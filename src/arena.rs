// Arena state model
//
// Tracks every player's trail across ticks. The active roster (who is still
// deciding moves) and the obstacle set (every cell any cycle ever occupied)
// are kept apart: eliminating a player shrinks the roster, never the obstacles.

use log::{info, warn};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use crate::config::ArenaConfig;
use crate::types::{Coord, Direction, GameHeader, Grid, PlayerId, TickRecord};

/// Errors raised by arena queries
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    /// The player has no record: eliminated, or never observed
    #[error("player {0} not found in arena")]
    NotFound(PlayerId),
}

/// One light cycle and the cells it has occupied, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub direction: Direction,
    pub alive: bool,
    trail: Vec<Coord>,
    head: Coord,
}

impl PlayerRecord {
    fn spawn(id: PlayerId, at: Coord) -> Self {
        PlayerRecord {
            id,
            direction: Direction::default(),
            alive: true,
            trail: vec![at],
            head: at,
        }
    }

    /// Current position (most recent trail entry)
    pub fn head(&self) -> Coord {
        self.head
    }

    /// Every cell this cycle has occupied, oldest first
    pub fn trail(&self) -> &[Coord] {
        &self.trail
    }

    fn advance(&mut self, to: Coord) {
        if self.head != to {
            self.trail.push(to);
            self.head = to;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Arena {
    grid: Grid,
    players: BTreeMap<PlayerId, PlayerRecord>,
    obstacles: HashSet<Coord>,
    retired: HashSet<PlayerId>,
    self_id: PlayerId,
    player_count: usize,
    tick: u32,
}

impl Arena {
    pub fn new(config: &ArenaConfig) -> Self {
        Self::with_grid(config.grid())
    }

    pub fn with_grid(grid: Grid) -> Self {
        Arena {
            grid,
            players: BTreeMap::new(),
            obstacles: HashSet::with_capacity(grid.cell_count()),
            retired: HashSet::new(),
            self_id: 0,
            player_count: 0,
            tick: 0,
        }
    }

    /// Starts a new tick from the judge's header line
    pub fn begin_tick(&mut self, header: &GameHeader) {
        self.tick += 1;
        self.player_count = header.player_count;
        self.self_id = header.self_id;
    }

    /// Applies one player's reported positions for the current tick
    pub fn ingest_tick(&mut self, player_id: PlayerId, record: &TickRecord) {
        if self.player_count > 0 && player_id >= self.player_count {
            warn!(
                "Tick {}: ignoring player {} (only {} players in game)",
                self.tick, player_id, self.player_count
            );
            return;
        }

        if record.is_dead() {
            if let Some(mut removed) = self.players.remove(&player_id) {
                removed.alive = false;
                self.retired.insert(player_id);
                info!(
                    "Tick {}: player {} eliminated after {} cells",
                    self.tick,
                    player_id,
                    removed.trail.len()
                );
            }
            return;
        }

        let current = record.current;
        if !self.grid.contains(&current) {
            warn!(
                "Tick {}: player {} reported off-grid position ({}, {})",
                self.tick, player_id, current.x, current.y
            );
            return;
        }

        if self.retired.contains(&player_id) {
            warn!(
                "Tick {}: player {} was eliminated and cannot return",
                self.tick, player_id
            );
            return;
        }

        self.obstacles.insert(current);

        match self.players.get_mut(&player_id) {
            None => {
                self.players
                    .insert(player_id, PlayerRecord::spawn(player_id, current));
            }
            Some(player) => {
                player.advance(current);
                if let Some(direction) = Direction::from_delta(&record.previous, &current) {
                    player.direction = direction;
                }
            }
        }
    }

    /// True if the cell is off the grid or any cycle has ever been there
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        let coord = Coord::new(x, y);
        !self.grid.contains(&coord) || self.obstacles.contains(&coord)
    }

    pub fn is_obstacle_at(&self, coord: &Coord) -> bool {
        self.is_obstacle(coord.x, coord.y)
    }

    /// True if a live player's head is at the cell
    pub fn is_occupied_by_head(&self, x: i32, y: i32) -> bool {
        let coord = Coord::new(x, y);
        self.players.values().any(|p| p.head() == coord)
    }

    /// Record of the controlled player
    pub fn get_self(&self) -> Result<&PlayerRecord, ArenaError> {
        self.player(self.self_id)
    }

    pub fn player(&self, id: PlayerId) -> Result<&PlayerRecord, ArenaError> {
        self.players.get(&id).ok_or(ArenaError::NotFound(id))
    }

    /// Live players in ascending id order
    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.values()
    }

    pub fn alive_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_retired(&self, id: PlayerId) -> bool {
        self.retired.contains(&id)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Text snapshot for diagnostics: `.` free, `X` trail, `@` live head
    pub fn render(&self) -> String {
        let rows = self.grid.height.max(0) as usize;
        let mut out = String::with_capacity(self.grid.cell_count() + rows);

        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                let cell = if self.is_occupied_by_head(x, y) {
                    '@'
                } else if self.is_obstacle(x, y) {
                    'X'
                } else {
                    '.'
                };
                out.push(cell);
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_with_players(count: usize, self_id: PlayerId) -> Arena {
        let mut arena = Arena::with_grid(Grid::new(30, 20));
        arena.begin_tick(&GameHeader {
            player_count: count,
            self_id,
        });
        arena
    }

    fn step(from: (i32, i32), to: (i32, i32)) -> TickRecord {
        TickRecord::new(Coord::new(from.0, from.1), Coord::new(to.0, to.1))
    }

    #[test]
    fn test_first_observation_seeds_single_cell_trail() {
        let mut arena = arena_with_players(2, 0);
        arena.ingest_tick(0, &step((5, 5), (5, 5)));

        let me = arena.get_self().unwrap();
        assert_eq!(me.head(), Coord::new(5, 5));
        assert_eq!(me.trail().to_vec(), vec![Coord::new(5, 5)]);
        assert_eq!(me.direction, Direction::Left);
        assert!(me.alive);
    }

    #[test]
    fn test_repeated_position_does_not_duplicate_trail() {
        let mut arena = arena_with_players(2, 0);
        arena.ingest_tick(0, &step((5, 5), (5, 5)));
        arena.ingest_tick(0, &step((5, 5), (5, 5)));

        let me = arena.get_self().unwrap();
        assert_eq!(me.trail().len(), 1);
        assert_eq!(me.trail().last(), Some(&me.head()));
    }

    #[test]
    fn test_head_follows_trail_end() {
        let mut arena = arena_with_players(1, 0);
        arena.ingest_tick(0, &step((2, 2), (2, 2)));
        arena.ingest_tick(0, &step((2, 2), (2, 3)));
        arena.ingest_tick(0, &step((2, 3), (3, 3)));

        let me = arena.get_self().unwrap();
        assert_eq!(me.head(), Coord::new(3, 3));
        assert_eq!(me.trail().last(), Some(&Coord::new(3, 3)));
        assert_eq!(me.trail().len(), 3);
    }

    #[test]
    fn test_unknown_dead_player_is_ignored() {
        let mut arena = arena_with_players(2, 0);
        arena.ingest_tick(1, &TickRecord::dead());

        assert_eq!(arena.alive_count(), 0);
        assert!(!arena.is_retired(1));
        assert_eq!(arena.obstacle_count(), 0);
    }

    #[test]
    fn test_retired_player_cannot_reappear() {
        let mut arena = arena_with_players(2, 0);
        arena.ingest_tick(1, &step((3, 3), (3, 3)));
        arena.ingest_tick(1, &TickRecord::dead());
        arena.ingest_tick(1, &step((8, 8), (8, 8)));

        assert_eq!(arena.player(1), Err(ArenaError::NotFound(1)));
        assert!(!arena.is_obstacle(8, 8));
        assert!(arena.is_obstacle(3, 3));
    }

    #[test]
    fn test_player_id_beyond_header_count_is_ignored() {
        let mut arena = arena_with_players(2, 0);
        arena.ingest_tick(3, &step((1, 1), (1, 1)));

        assert_eq!(arena.alive_count(), 0);
        assert!(!arena.is_obstacle(1, 1));
    }

    #[test]
    fn test_diagonal_report_keeps_direction() {
        let mut arena = arena_with_players(2, 0);
        arena.ingest_tick(0, &step((5, 5), (5, 5)));
        arena.ingest_tick(0, &step((5, 5), (5, 4)));
        assert_eq!(arena.get_self().unwrap().direction, Direction::Up);

        arena.ingest_tick(0, &step((4, 3), (5, 4)));
        assert_eq!(arena.get_self().unwrap().direction, Direction::Up);
    }

    #[test]
    fn test_get_self_before_first_tick_is_not_found() {
        let arena = arena_with_players(2, 1);
        assert_eq!(arena.get_self(), Err(ArenaError::NotFound(1)));
    }

    #[test]
    fn test_render_marks_heads_and_trails() {
        let mut arena = Arena::with_grid(Grid::new(4, 2));
        arena.begin_tick(&GameHeader {
            player_count: 1,
            self_id: 0,
        });
        arena.ingest_tick(0, &step((0, 0), (0, 0)));
        arena.ingest_tick(0, &step((0, 0), (1, 0)));

        assert_eq!(arena.render(), "X@..\n....\n");
    }

    #[test]
    fn test_render_degenerate_grid_is_empty() {
        let arena = Arena::with_grid(Grid::new(5, -1));
        assert_eq!(arena.render(), "");
        assert!(arena.is_obstacle(0, 0));
    }
}
