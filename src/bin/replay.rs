// Standalone replay tool for analyzing Tron Battle debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all ticks
//   --ticks <t1,t2>        Replay specific ticks (comma-separated)
//   --validate             Run validation mode with expected moves
//   --verbose              Show detailed output for each tick
//   --config <path>        Path to Tron.toml (default: Tron.toml)

use std::env;
use std::process;

use tron_battle_bot::config::Config;
use tron_battle_bot::protocol::parse_direction;
use tron_battle_bot::replay::ReplayEngine;
use tron_battle_bot::types::Direction;

fn print_usage() {
    eprintln!("Tron Battle Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all ticks in the log");
    eprintln!("  --ticks <T1,T2,...>     Replay specific ticks (comma-separated)");
    eprintln!("  --validate <T:M,...>    Validate expected moves (format: tick:move,...)");
    eprintln!("  --verbose               Show detailed output for each tick");
    eprintln!("  --config <path>         Path to Tron.toml (default: Tron.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Replay all ticks");
    eprintln!("  replay tron_debug.jsonl --all");
    eprintln!();
    eprintln!("  # Replay specific ticks");
    eprintln!("  replay tron_debug.jsonl --ticks 5,10,15");
    eprintln!();
    eprintln!("  # Validate expected moves");
    eprintln!("  replay tron_debug.jsonl --validate 5:UP,10:LEFT|RIGHT");
}

fn parse_ticks(s: &str) -> Result<Vec<u32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<u32>()
                .map_err(|e| format!("Invalid tick number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(u32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'tick:move'", pair));
            }

            let tick = parts[0]
                .parse::<u32>()
                .map_err(|e| format!("Invalid tick number '{}': {}", parts[0], e))?;

            // Support multiple acceptable moves separated by '|'
            let moves = parts[1]
                .split('|')
                .map(parse_direction)
                .collect::<Result<Vec<Direction>, String>>()?;

            Ok((tick, moves))
        })
        .collect()
}

enum Mode {
    All,
    Ticks(String),
    Validate(String),
}

fn option_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires an argument", flag);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(if args.iter().any(|a| a == "--help") { 0 } else { 1 });
    }

    let log_file = &args[1];
    let mut config_path = "Tron.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    // Parse arguments
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => {
                mode = Some(Mode::All);
            }
            "--ticks" => {
                mode = Some(Mode::Ticks(option_value(&args, i, "--ticks")));
                i += 1;
            }
            "--validate" => {
                mode = Some(Mode::Validate(option_value(&args, i, "--validate")));
                i += 1;
            }
            "--config" => {
                config_path = option_value(&args, i, "--config");
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mode = match mode {
        Some(mode) => mode,
        None => {
            eprintln!("Error: Must specify --all, --ticks, or --validate");
            print_usage();
            process::exit(1);
        }
    };

    // Load configuration
    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    let outcome = match mode {
        Mode::All => {
            println!("Replaying all {} ticks...\n", entries.len());
            engine
                .replay_all(&entries)
                .map(|results| engine.print_report(&results))
        }
        Mode::Ticks(arg) => parse_ticks(&arg).and_then(|ticks| {
            println!("Replaying {} specific tick(s)...\n", ticks.len());
            engine
                .replay_ticks(&entries, &ticks)
                .map(|results| engine.print_report(&results))
        }),
        Mode::Validate(arg) => parse_expected_moves(&arg).and_then(|expected| {
            println!("Validating {} expected move(s)...\n", expected.len());
            engine
                .validate_expected_moves(&entries, &expected)
                .map(|()| println!("✓ All expected moves validated successfully!"))
        }),
    };

    if let Err(e) = outcome {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}
