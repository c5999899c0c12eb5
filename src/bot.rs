// Decision side of the Tron Battle bot
//
// The arena is fully updated for the tick before anything here runs. The bot
// looks up our own cycle, asks the selector for a strategy and lets it pick a
// direction using the bot's own random generator.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arena::{Arena, ArenaError, PlayerRecord};
use crate::config::Config;
use crate::strategy::StrategySelector;
use crate::types::Direction;

/// Computes the moves that do not immediately collide
///
/// Directions are returned in canonical order (Left, Right, Up, Down) so that
/// seeded strategies behave reproducibly.
pub fn compute_legal_moves(arena: &Arena, player: &PlayerRecord) -> Vec<Direction> {
    let head = player.head();

    Direction::all()
        .iter()
        .filter(|dir| !arena.is_obstacle_at(&dir.apply(&head)))
        .copied()
        .collect()
}

/// Outcome of one decide phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    /// Moves that were legal when the direction was chosen
    pub legal_moves: Vec<Direction>,
}

/// Tron Battle bot with OOP-style API
/// Takes static configuration plus the random generator it decides with
pub struct Bot<R: Rng = StdRng> {
    selector: StrategySelector,
    rng: R,
}

impl Bot<StdRng> {
    /// Creates a bot seeded from the configuration, or from the OS when no seed is set
    pub fn new(config: Config) -> Self {
        let rng = match config.strategy.rng_seed {
            Some(seed) => {
                info!("Using fixed RNG seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Bot::with_rng(config, rng)
    }
}

impl<R: Rng> Bot<R> {
    /// Creates a bot with an injected random generator
    pub fn with_rng(config: Config, rng: R) -> Self {
        Bot {
            selector: StrategySelector::new(config.strategy.preferred),
            rng,
        }
    }

    /// Chooses the direction for our own cycle this tick
    ///
    /// Fails only when the arena has no record of us, which means the judge
    /// never reported our position or already eliminated us.
    pub fn get_move(&mut self, arena: &Arena) -> Result<Direction, ArenaError> {
        self.decide(arena).map(|decision| decision.direction)
    }

    /// Like `get_move`, but also hands back the legal set the choice was made from
    pub fn decide(&mut self, arena: &Arena) -> Result<Decision, ArenaError> {
        let me = arena.get_self()?;

        let legal_moves = compute_legal_moves(arena, me);
        debug!(
            "Tick {}: head ({}, {}), legal moves {:?}",
            arena.tick(),
            me.head().x,
            me.head().y,
            legal_moves
        );

        if legal_moves.is_empty() {
            info!("Tick {}: no legal moves available", arena.tick());
        }

        let strategy = self.selector.select(arena);
        let chosen = strategy.choose_direction(arena, &legal_moves, &mut self.rng);

        info!(
            "Tick {}: chose {:?} ({} legal, {} alive)",
            arena.tick(),
            chosen,
            legal_moves.len(),
            arena.alive_count()
        );

        Ok(Decision {
            direction: chosen,
            legal_moves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, GameHeader, Grid, TickRecord};

    fn arena_with(positions: &[(i32, i32)], self_id: usize) -> Arena {
        let mut arena = Arena::with_grid(Grid::new(30, 20));
        arena.begin_tick(&GameHeader {
            player_count: positions.len(),
            self_id,
        });
        for (id, &(x, y)) in positions.iter().enumerate() {
            let at = Coord::new(x, y);
            arena.ingest_tick(id, &TickRecord::new(at, at));
        }
        arena
    }

    #[test]
    fn test_open_cell_has_all_four_moves_in_order() {
        let arena = arena_with(&[(10, 10)], 0);
        let me = arena.get_self().unwrap();
        assert_eq!(
            compute_legal_moves(&arena, me),
            vec![Direction::Left, Direction::Right, Direction::Up, Direction::Down]
        );
    }

    #[test]
    fn test_corner_excludes_walls() {
        let arena = arena_with(&[(29, 19)], 0);
        let me = arena.get_self().unwrap();
        assert_eq!(
            compute_legal_moves(&arena, me),
            vec![Direction::Left, Direction::Up]
        );
    }

    #[test]
    fn test_neighbour_trail_is_excluded() {
        let arena = arena_with(&[(10, 10), (11, 10)], 0);
        let me = arena.get_self().unwrap();
        assert!(!compute_legal_moves(&arena, me).contains(&Direction::Right));
    }

    #[test]
    fn test_get_move_without_self_record_fails() {
        let arena = arena_with(&[(10, 10)], 1);
        let mut bot = Bot::with_rng(Config::default_hardcoded(), StdRng::seed_from_u64(3));
        assert_eq!(bot.get_move(&arena), Err(ArenaError::NotFound(1)));
    }

    #[test]
    fn test_get_move_picks_a_legal_move() {
        let arena = arena_with(&[(0, 5), (1, 5)], 0);
        let mut bot = Bot::with_rng(Config::default_hardcoded(), StdRng::seed_from_u64(11));

        for _ in 0..10 {
            let chosen = bot.get_move(&arena).unwrap();
            assert!(chosen == Direction::Up || chosen == Direction::Down);
        }
    }

    #[test]
    fn test_decision_carries_the_legal_set_it_chose_from() {
        let arena = arena_with(&[(29, 0), (28, 0)], 0);
        let mut bot = Bot::with_rng(Config::default_hardcoded(), StdRng::seed_from_u64(5));

        let decision = bot.decide(&arena).unwrap();
        let me = arena.get_self().unwrap();
        assert_eq!(decision.legal_moves, compute_legal_moves(&arena, me));
        assert_eq!(decision.legal_moves, vec![Direction::Down]);
        assert_eq!(decision.direction, Direction::Down);
    }
}
