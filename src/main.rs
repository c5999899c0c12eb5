use log::{error, info};
use std::env;
use std::io::{self, Write};
use std::process;

use tron_battle_bot::arena::Arena;
use tron_battle_bot::bot::Bot;
use tron_battle_bot::config::Config;
use tron_battle_bot::debug_logger::DebugLogger;
use tron_battle_bot::protocol::{direction_token, TickReader};

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead. env_logger writes to stderr, so stdout stays clean for moves.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Tron Battle bot...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let mut arena = Arena::new(&config.arena);
    let mut logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);
    let render_grid = config.debug.render_grid;
    let mut bot = Bot::new(config);

    let stdin = io::stdin();
    let mut reader = TickReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        let (header, records) = match reader.read_tick() {
            Ok(Some(tick)) => tick,
            Ok(None) => {
                info!("Input closed after {} ticks", arena.tick());
                break;
            }
            Err(e) => {
                error!("Failed to read tick input: {}", e);
                process::exit(1);
            }
        };

        // Ingest every player before deciding
        arena.begin_tick(&header);
        for (id, record) in records.iter().enumerate() {
            arena.ingest_tick(id, record);
        }

        if render_grid {
            info!("Arena at tick {}:\n{}", arena.tick(), arena.render());
        }

        let decision = match bot.decide(&arena) {
            Ok(decision) => decision,
            Err(e) => {
                error!("Cannot decide at tick {}: {}", arena.tick(), e);
                process::exit(1);
            }
        };

        if let Err(e) = writeln!(out, "{}", direction_token(decision.direction)).and_then(|_| out.flush()) {
            error!("Failed to write move: {}", e);
            process::exit(1);
        }

        if logger.is_enabled() {
            logger.log_tick(
                arena.tick(),
                header,
                &records,
                &decision.legal_moves,
                decision.direction,
            );
        }
    }
}
