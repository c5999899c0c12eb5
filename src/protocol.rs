// Judge protocol
//
// Reads the per-tick header and player records from the judge and maps a
// chosen direction to the token the judge expects on stdout.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::types::{Coord, Direction, GameHeader, TickRecord};

/// Output token for a direction
pub fn direction_token(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "LEFT",
        Direction::Right => "RIGHT",
        Direction::Up => "UP",
        Direction::Down => "DOWN",
    }
}

/// Parses an output token back into a direction (case-insensitive)
pub fn parse_direction(s: &str) -> Result<Direction, String> {
    match s.trim().to_uppercase().as_str() {
        "LEFT" => Ok(Direction::Left),
        "RIGHT" => Ok(Direction::Right),
        "UP" => Ok(Direction::Up),
        "DOWN" => Ok(Direction::Down),
        _ => Err(format!("Invalid direction: {}", s)),
    }
}

/// Whitespace-token reader over the judge's input stream
pub struct TickReader<R: BufRead> {
    input: R,
    tokens: VecDeque<String>,
    line_number: usize,
}

impl<R: BufRead> TickReader<R> {
    pub fn new(input: R) -> Self {
        TickReader {
            input,
            tokens: VecDeque::new(),
            line_number: 0,
        }
    }

    /// Reads the `N P` header line
    ///
    /// Returns `Ok(None)` when the input ends cleanly between ticks.
    pub fn read_header(&mut self) -> Result<Option<GameHeader>, String> {
        let player_count = match self.next_token()? {
            Some(token) => self.parse_usize(&token, "player count")?,
            None => return Ok(None),
        };
        let self_id = self.expect_usize("own player id")?;

        if self_id >= player_count {
            return Err(format!(
                "Line {}: own id {} out of range for {} players",
                self.line_number, self_id, player_count
            ));
        }

        Ok(Some(GameHeader {
            player_count,
            self_id,
        }))
    }

    /// Reads one `previousX previousY currentX currentY` record
    pub fn read_record(&mut self) -> Result<TickRecord, String> {
        let previous_x = self.expect_i32("previous x")?;
        let previous_y = self.expect_i32("previous y")?;
        let current_x = self.expect_i32("current x")?;
        let current_y = self.expect_i32("current y")?;

        Ok(TickRecord::new(
            Coord::new(previous_x, previous_y),
            Coord::new(current_x, current_y),
        ))
    }

    /// Reads a header and all of its player records
    pub fn read_tick(&mut self) -> Result<Option<(GameHeader, Vec<TickRecord>)>, String> {
        let header = match self.read_header()? {
            Some(header) => header,
            None => return Ok(None),
        };

        let records = (0..header.player_count)
            .map(|_| self.read_record())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some((header, records)))
    }

    fn next_token(&mut self) -> Result<Option<String>, String> {
        while self.tokens.is_empty() {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| format!("Failed to read line {}: {}", self.line_number + 1, e))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            self.tokens
                .extend(line.split_whitespace().map(str::to_string));
        }

        Ok(self.tokens.pop_front())
    }

    fn expect_token(&mut self, what: &str) -> Result<String, String> {
        self.next_token()?
            .ok_or_else(|| format!("Unexpected end of input while reading {}", what))
    }

    fn expect_i32(&mut self, what: &str) -> Result<i32, String> {
        let token = self.expect_token(what)?;
        token
            .parse::<i32>()
            .map_err(|e| format!("Line {}: invalid {} '{}': {}", self.line_number, what, token, e))
    }

    fn expect_usize(&mut self, what: &str) -> Result<usize, String> {
        let token = self.expect_token(what)?;
        self.parse_usize(&token, what)
    }

    fn parse_usize(&self, token: &str, what: &str) -> Result<usize, String> {
        token
            .parse::<usize>()
            .map_err(|e| format!("Line {}: invalid {} '{}': {}", self.line_number, what, token, e))
    }
}
