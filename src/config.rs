// Configuration module for reading Tron.toml
// This module provides OOP-style configuration management for the Tron Battle bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::strategy::StrategyKind;
use crate::types::Grid;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub arena: ArenaConfig,
    pub strategy: StrategyConfig,
    pub debug: DebugConfig,
}

/// Arena dimensions
#[derive(Debug, Deserialize, Clone)]
pub struct ArenaConfig {
    pub width: i32,
    pub height: i32,
}

impl ArenaConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }
}

/// Strategy selection constants
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    pub preferred: StrategyKind,
    /// Fixed seed for reproducible games; drawn from the OS when absent
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
    pub render_grid: bool,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Tron.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        if config.arena.width <= 0 || config.arena.height <= 0 {
            return Err(format!(
                "Arena dimensions must be positive, got {}x{}",
                config.arena.width, config.arena.height
            ));
        }

        Ok(config)
    }

    /// Loads default configuration from Tron.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Tron.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Tron.toml
    pub fn default_hardcoded() -> Self {
        Config {
            arena: ArenaConfig {
                width: 30,
                height: 20,
            },
            strategy: StrategyConfig {
                preferred: StrategyKind::UniformRandom,
                rng_seed: None,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "tron_debug.jsonl".to_string(),
                render_grid: false,
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Tron.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
