mod arena;
mod chain;
mod config;
mod error;
mod game;
mod item;
mod snake;
mod term;

use std::fs::File;
use std::process::exit;
use std::sync::Mutex;

use anyhow::Context;
use tracing::Level;

use config::GameConfig;
use error::{GameError, GameResult};
use game::{Outcome, SnakeGame};
use term::TermManager;

/// `(row, col)` on the arena.
pub type Coords = (i16, i16);
/// `(drow, dcol)` step applied each tick.
pub type Heading = (i16, i16);

fn main() {
    let config = GameConfig::default();

    let term = match startup(|| TermManager::new(&config), std::env::args().nth(1)) {
        Ok(term) => term,
        Err(e) => {
            match e.downcast_ref::<GameError>() {
                // The only place the game writes plain text to stdout
                Some(unsupported @ GameError::EnvironmentUnsupported(_)) => println!("{}", unsupported),
                _ => eprintln!("{:#}", e),
            }
            exit(1);
        }
    };

    if let Err(e) = play(term, config) {
        tracing::error!(error = %e, "game aborted");
        eprintln!("{}", e);
        exit(1);
    }
}

fn play(mut term: TermManager, config: GameConfig) -> GameResult<()> {
    let mut game = SnakeGame::new(config, term.size(), rand::thread_rng());

    let res = term.setup().and_then(|()| game.run(&mut term));
    term.restore()?;

    match res? {
        Outcome::Died(cause) => tracing::info!(?cause, length = game.snake().length(), "game over"),
        Outcome::Filled => tracing::info!(length = game.snake().length(), "board filled"),
        Outcome::Quit => {},
    }

    game.finish();
    Ok(())
}

/// The terminal is checked before anything else is set up, logging
/// included, so an unsupported terminal leaves no trace behind.
fn startup<T>(check_terminal: impl FnOnce() -> GameResult<T>, log_path: Option<String>) -> anyhow::Result<T> {
    let ready = check_terminal()?;
    init_logging(log_path)?;
    Ok(ready)
}

/// Logs go to the file named by the first argument, never to the terminal
/// the game draws on. Without an argument nothing is logged.
fn init_logging(log_path: Option<String>) -> anyhow::Result<()> {
    let Some(path) = log_path else {
        return Ok(());
    };

    let file = File::create(&path).with_context(|| format!("cannot open log file {}", path))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .init();

    Ok(())
}
