// Library exports for the Tron Battle bot
// This allows the replay tool, the self-play runner and tests to use the core bot logic

pub mod arena;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod protocol;
pub mod replay;
pub mod simulation;
pub mod strategy;
pub mod types;
