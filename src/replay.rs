// Replay module for analyzing recorded games and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Rebuild the arena tick by tick from the logged judge input
// 3. Check every logged decision against the recomputed legal moves
// 4. Generate analysis reports

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::arena::Arena;
use crate::bot::compute_legal_moves;
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::protocol::direction_token;
use crate::types::Direction;

/// Result of replaying a single tick
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub tick: u32,
    pub chosen_move: Direction,
    pub logged_legal_moves: Vec<Direction>,
    pub replayed_legal_moves: Vec<Direction>,
    /// The logged legal set equals the recomputed one
    pub matches: bool,
    /// The choice was legal, or nothing was legal
    pub choice_acceptable: bool,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_ticks: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub illegal_choices: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DebugLogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        Self::parse_log(BufReader::new(file))
    }

    /// Parses JSONL log entries from any buffered reader
    pub fn parse_log<R: BufRead>(reader: R) -> Result<Vec<DebugLogEntry>, String> {
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DebugLogEntry = serde_json::from_str(&line).map_err(|e| {
                format!("Failed to parse JSON on line {}: {}", line_num + 1, e)
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Ingests one logged tick into the arena and checks the logged decision
    pub fn replay_entry(&self, arena: &mut Arena, entry: &DebugLogEntry) -> Result<ReplayResult, String> {
        arena.begin_tick(&entry.header);
        for (id, record) in entry.records.iter().enumerate() {
            arena.ingest_tick(id, record);
        }

        let me = arena
            .get_self()
            .map_err(|e| format!("Tick {}: {}", entry.tick, e))?;
        let replayed_legal_moves = compute_legal_moves(arena, me);

        let matches = replayed_legal_moves == entry.legal_moves;
        let choice_acceptable =
            replayed_legal_moves.is_empty() || replayed_legal_moves.contains(&entry.chosen_move);

        let result = ReplayResult {
            tick: entry.tick,
            chosen_move: entry.chosen_move,
            logged_legal_moves: entry.legal_moves.clone(),
            replayed_legal_moves,
            matches,
            choice_acceptable,
        };

        if self.verbose {
            if matches && choice_acceptable {
                info!(
                    "Tick {}: ✓ {} (legal: {:?})",
                    entry.tick,
                    direction_token(entry.chosen_move),
                    result.replayed_legal_moves
                );
            } else {
                warn!(
                    "Tick {}: ✗ {} (logged legal: {:?}, replayed legal: {:?})",
                    entry.tick,
                    direction_token(entry.chosen_move),
                    result.logged_legal_moves,
                    result.replayed_legal_moves
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DebugLogEntry]) -> Result<Vec<ReplayResult>, String> {
        let all_ticks: Vec<u32> = entries.iter().map(|e| e.tick).collect();
        self.replay_ticks(entries, &all_ticks)
    }

    /// Replays specific ticks from a log file
    ///
    /// Earlier ticks are still ingested so the arena matches what the bot saw.
    pub fn replay_ticks(
        &self,
        entries: &[DebugLogEntry],
        tick_numbers: &[u32],
    ) -> Result<Vec<ReplayResult>, String> {
        for tick in tick_numbers {
            if !entries.iter().any(|e| e.tick == *tick) {
                return Err(format!("Tick {} not found in log file", tick));
            }
        }

        let mut arena = Arena::new(&self.config.arena);
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(&mut arena, entry) {
                Ok(result) => {
                    if tick_numbers.contains(&entry.tick) {
                        results.push(result);
                    }
                }
                Err(e) => {
                    warn!("Failed to replay tick {}: {}", entry.tick, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_ticks = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_ticks - matches;
        let illegal_choices = results.iter().filter(|r| !r.choice_acceptable).count();
        let match_rate = if total_ticks > 0 {
            (matches as f64 / total_ticks as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_ticks,
            matches,
            mismatches,
            illegal_choices,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Ticks:      {}", stats.total_ticks);
        println!("Matches:          {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:       {}", stats.mismatches);
        println!("Illegal Choices:  {}", stats.illegal_choices);
        println!("═══════════════════════════════════════════════════════════\n");

        let flagged: Vec<_> = results
            .iter()
            .filter(|r| !r.matches || !r.choice_acceptable)
            .collect();
        if !flagged.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                   FLAGGED TICKS");
            println!("═══════════════════════════════════════════════════════════");

            for result in flagged {
                println!(
                    "Tick {}: chose {} (logged legal: {:?}, replayed legal: {:?})",
                    result.tick,
                    direction_token(result.chosen_move),
                    result.logged_legal_moves,
                    result.replayed_legal_moves
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[DebugLogEntry],
        expected_moves: &[(u32, Vec<Direction>)], // (tick, acceptable_moves)
    ) -> Result<(), String> {
        for (tick, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log", tick))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Tick {}: Expected one of {:?}, but got {}",
                    tick,
                    acceptable
                        .iter()
                        .map(|d| direction_token(*d))
                        .collect::<Vec<_>>(),
                    direction_token(entry.chosen_move)
                ));
            }
        }

        Ok(())
    }
}
