// Debug logging module for per-tick game state logging
//
// Each tick's input, legal moves and chosen direction are appended to a JSONL
// file. The file can be fed back into the replay tool.

use log::error;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;

use crate::types::{Direction, GameHeader, TickRecord};

/// Represents a single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DebugLogEntry {
    pub tick: u32,
    pub header: GameHeader,
    pub records: Vec<TickRecord>,
    pub legal_moves: Vec<Direction>,
    pub chosen_move: Direction,
    pub timestamp: String,
}

/// Writes debug entries for every tick, or nothing when disabled
pub struct DebugLogger {
    file: Option<File>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger { file: Some(file) }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Logs one tick's input and decision
    pub fn log_tick(
        &mut self,
        tick: u32,
        header: GameHeader,
        records: &[TickRecord],
        legal_moves: &[Direction],
        chosen_move: Direction,
    ) {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return,
        };

        let entry = DebugLogEntry {
            tick,
            header,
            records: records.to_vec(),
            legal_moves: legal_moves.to_vec(),
            chosen_move,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                if let Err(e) = writeln!(file, "{}", json_line) {
                    error!("Failed to write debug log entry: {}", e);
                } else if let Err(e) = file.flush() {
                    error!("Failed to flush debug log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}
