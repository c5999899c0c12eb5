// Local match simulation
//
// Plays complete games between bots without the judge. Every bot keeps its
// own arena and only learns about the board through the same tick records the
// judge would send. All cycles move simultaneously; a cycle dies when it moves
// off the grid, into any trail, or into the same cell as another cycle.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

use crate::arena::Arena;
use crate::bot::Bot;
use crate::config::Config;
use crate::types::{Coord, Direction, GameHeader, Grid, PlayerId, TickRecord};

/// Parameters for one simulated game
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub player_count: usize,
    pub max_ticks: u32,
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            player_count: 2,
            max_ticks: 600,
            seed: 0,
        }
    }
}

/// A player leaving the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elimination {
    pub player: PlayerId,
    pub tick: u32,
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Last cycle standing; `None` for a draw or when the tick limit ran out
    pub winner: Option<PlayerId>,
    pub ticks: u32,
    pub eliminations: Vec<Elimination>,
}

struct Seat {
    arena: Arena,
    bot: Bot<StdRng>,
    previous: Coord,
    position: Option<Coord>,
}

pub struct Match {
    grid: Grid,
    seats: Vec<Seat>,
    occupied: HashSet<Coord>,
    max_ticks: u32,
}

impl Match {
    /// Sets up a game with random distinct starting cells
    pub fn new(config: &Config, match_config: &MatchConfig) -> Result<Self, String> {
        let grid = config.arena.grid();
        let player_count = match_config.player_count;

        if !(2..=4).contains(&player_count) {
            return Err(format!("Player count must be 2 to 4, got {}", player_count));
        }
        if grid.cell_count() < player_count {
            return Err(format!(
                "Arena {}x{} is too small for {} players",
                grid.width, grid.height, player_count
            ));
        }

        let mut rng = StdRng::seed_from_u64(match_config.seed);
        let mut starts: Vec<Coord> = Vec::with_capacity(player_count);
        while starts.len() < player_count {
            let candidate = Coord::new(
                rng.random_range(0..grid.width),
                rng.random_range(0..grid.height),
            );
            if !starts.contains(&candidate) {
                starts.push(candidate);
            }
        }

        Ok(Self::with_starts(config, &starts, match_config.max_ticks, rng.random()))
    }

    /// Sets up a game with fixed starting cells, one per player
    pub fn with_starts(config: &Config, starts: &[Coord], max_ticks: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let seats = starts
            .iter()
            .map(|&start| Seat {
                arena: Arena::new(&config.arena),
                bot: Bot::with_rng(config.clone(), StdRng::seed_from_u64(rng.random())),
                previous: start,
                position: Some(start),
            })
            .collect();

        Match {
            grid: config.arena.grid(),
            seats,
            occupied: starts.iter().copied().collect(),
            max_ticks,
        }
    }

    pub fn alive_count(&self) -> usize {
        self.seats.iter().filter(|s| s.position.is_some()).count()
    }

    /// Plays until at most one cycle is left or the tick limit is reached
    pub fn run(&mut self) -> MatchResult {
        let mut eliminations = Vec::new();
        let mut tick = 0;

        while tick < self.max_ticks && self.alive_count() > 1 {
            tick += 1;
            let moves = self.collect_moves();
            eliminations.extend(self.resolve_moves(tick, &moves));
        }

        let survivors: Vec<PlayerId> = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.position.is_some())
            .map(|(id, _)| id)
            .collect();

        let winner = match survivors.as_slice() {
            [only] => Some(*only),
            _ => None,
        };

        info!(
            "Match finished after {} ticks, winner: {:?}",
            tick, winner
        );

        MatchResult {
            winner,
            ticks: tick,
            eliminations,
        }
    }

    /// Judge input for the current tick, in player id order
    fn tick_records(&self) -> Vec<TickRecord> {
        self.seats
            .iter()
            .map(|seat| match seat.position {
                Some(position) => TickRecord::new(seat.previous, position),
                None => TickRecord::dead(),
            })
            .collect()
    }

    /// Every live bot ingests the tick and decides
    fn collect_moves(&mut self) -> HashMap<PlayerId, Option<Direction>> {
        let records = self.tick_records();
        let player_count = self.seats.len();
        let mut moves = HashMap::new();

        for (id, seat) in self.seats.iter_mut().enumerate() {
            if seat.position.is_none() {
                continue;
            }

            seat.arena.begin_tick(&GameHeader {
                player_count,
                self_id: id,
            });
            for (other, record) in records.iter().enumerate() {
                seat.arena.ingest_tick(other, record);
            }

            let chosen = match seat.bot.get_move(&seat.arena) {
                Ok(direction) => Some(direction),
                Err(e) => {
                    warn!("Player {} could not decide: {}", id, e);
                    None
                }
            };
            moves.insert(id, chosen);
        }

        moves
    }

    /// Moves all cycles at once and returns who died this tick
    fn resolve_moves(
        &mut self,
        tick: u32,
        moves: &HashMap<PlayerId, Option<Direction>>,
    ) -> Vec<Elimination> {
        let mut targets: HashMap<PlayerId, Option<Coord>> = HashMap::new();
        let mut claims: HashMap<Coord, usize> = HashMap::new();

        for (&id, chosen) in moves {
            let target = match (chosen, self.seats[id].position) {
                (Some(direction), Some(position)) => {
                    let next = direction.apply(&position);
                    if self.grid.contains(&next) && !self.occupied.contains(&next) {
                        Some(next)
                    } else {
                        None
                    }
                }
                _ => None,
            };
            if let Some(cell) = target {
                *claims.entry(cell).or_insert(0) += 1;
            }
            targets.insert(id, target);
        }

        let mut eliminated = Vec::new();
        let mut ids: Vec<PlayerId> = targets.keys().copied().collect();
        ids.sort_unstable();

        for id in ids {
            let seat = &mut self.seats[id];
            match targets[&id] {
                Some(cell) if claims[&cell] == 1 => {
                    if let Some(position) = seat.position {
                        seat.previous = position;
                    }
                    seat.position = Some(cell);
                    self.occupied.insert(cell);
                    debug!("Tick {}: player {} moved to ({}, {})", tick, id, cell.x, cell.y);
                }
                _ => {
                    seat.position = None;
                    info!("Tick {}: player {} crashed", tick, id);
                    eliminated.push(Elimination { player: id, tick });
                }
            }
        }

        eliminated
    }
}
