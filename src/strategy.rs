// Move selection strategies
//
// A strategy turns the current arena and the player's legal moves into one
// direction. The selector decides which strategy runs each tick.

use log::debug;
use rand::Rng;
use serde::Deserialize;

use crate::arena::Arena;
use crate::types::Direction;

/// Strategies that can be named in Tron.toml
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    UniformRandom,
}

/// Picks uniformly among the legal moves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformRandomStrategy;

impl UniformRandomStrategy {
    /// Chooses a legal move at random, or any direction when every move is lethal
    pub fn choose_direction<R: Rng>(
        &self,
        _arena: &Arena,
        legal_moves: &[Direction],
        rng: &mut R,
    ) -> Direction {
        if legal_moves.is_empty() {
            let all = Direction::all();
            return all[rng.random_range(0..all.len())];
        }

        legal_moves[rng.random_range(0..legal_moves.len())]
    }
}

/// A runnable strategy, tagged by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    UniformRandom(UniformRandomStrategy),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::UniformRandom(_) => StrategyKind::UniformRandom,
        }
    }

    /// Chooses a direction given the moves that do not immediately collide
    pub fn choose_direction<R: Rng>(
        &self,
        arena: &Arena,
        legal_moves: &[Direction],
        rng: &mut R,
    ) -> Direction {
        match self {
            Strategy::UniformRandom(strategy) => strategy.choose_direction(arena, legal_moves, rng),
        }
    }
}

/// Decides which strategy to run for the current tick
#[derive(Debug, Clone)]
pub struct StrategySelector {
    preferred: StrategyKind,
}

impl StrategySelector {
    pub fn new(preferred: StrategyKind) -> Self {
        StrategySelector { preferred }
    }

    /// Picks a strategy for this tick
    ///
    /// The arena is available so that future strategies can be chosen by board
    /// density, remaining players or tick number.
    pub fn select(&self, arena: &Arena) -> Strategy {
        let strategy = match self.preferred {
            StrategyKind::UniformRandom => Strategy::UniformRandom(UniformRandomStrategy),
        };

        debug!(
            "Tick {}: selected {:?} (alive={}, occupied={}/{})",
            arena.tick(),
            strategy.kind(),
            arena.alive_count(),
            arena.obstacle_count(),
            arena.grid().cell_count()
        );

        strategy
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        StrategySelector::new(StrategyKind::UniformRandom)
    }
}
