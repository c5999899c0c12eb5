// Self-play runner: pits bots against each other on a local arena
//
// Usage:
//   cargo run --bin selfplay -- [options]
//
// Options:
//   --players <n>     Players per game, 2 to 4 (default: 2)
//   --games <n>       Number of games to play (default: 100)
//   --seed <n>        Seed of the first game (default: 0)
//   --config <path>   Path to Tron.toml (default: Tron.toml)

use std::env;
use std::process;

use tron_battle_bot::config::Config;
use tron_battle_bot::simulation::{Match, MatchConfig};

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T
where
    T::Err: std::fmt::Display,
{
    let raw = match args.get(i + 1) {
        Some(raw) => raw,
        None => {
            eprintln!("Error: {} requires an argument", flag);
            process::exit(1);
        }
    };

    raw.parse::<T>().unwrap_or_else(|e| {
        eprintln!("Error: invalid value '{}' for {}: {}", raw, flag, e);
        process::exit(1);
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut match_config = MatchConfig::default();
    let mut games: u64 = 100;
    let mut config_path = "Tron.toml".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--players" => {
                match_config.player_count = parse_number(&args, i, "--players");
                i += 1;
            }
            "--games" => {
                games = parse_number(&args, i, "--games");
                i += 1;
            }
            "--seed" => {
                match_config.seed = parse_number(&args, i, "--seed");
                i += 1;
            }
            "--config" => {
                config_path = parse_number(&args, i, "--config");
                i += 1;
            }
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        Config::default_hardcoded()
    });

    let mut wins = vec![0u64; match_config.player_count];
    let mut draws = 0u64;
    let mut total_ticks = 0u64;
    let first_seed = match_config.seed;

    for game in 0..games {
        match_config.seed = first_seed.wrapping_add(game);
        let mut arena_match = match Match::new(&config, &match_config) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };

        let result = arena_match.run();
        total_ticks += u64::from(result.ticks);
        match result.winner {
            Some(winner) => wins[winner] += 1,
            None => draws += 1,
        }
    }

    println!("\n═══════════════════════════════════════════════════════════");
    println!("                   SELF-PLAY REPORT");
    println!("═══════════════════════════════════════════════════════════");
    println!("Games:          {}", games);
    println!("Players:        {}", match_config.player_count);
    for (player, count) in wins.iter().enumerate() {
        println!("Player {} wins: {}", player, count);
    }
    println!("Draws:          {}", draws);
    if games > 0 {
        println!("Average ticks:  {:.1}", total_ticks as f64 / games as f64);
    }
    println!("═══════════════════════════════════════════════════════════\n");
}
