use std::thread::sleep;

use rand::Rng;

use crate::arena::Arena;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::item::Item;
use crate::snake::{Crash, Direction, Snake, TickResult};

/// A single player intent, read once per tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Died(Crash),
    Filled,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Init,
    Running,
    Terminated(Outcome),
}

/// Whatever the game reads keys from and shows frames on.
pub trait Frontend {
    /// Returns immediately; `None` means no input this tick.
    fn poll_command(&mut self) -> GameResult<Option<Command>>;

    fn present(&mut self, arena: &Arena) -> GameResult<()>;

    /// Blocks until any key is pressed.
    fn wait_for_key(&mut self) -> GameResult<()>;
}

pub struct SnakeGame<R: Rng> {
    config: GameConfig,
    arena: Arena,
    snake: Snake,
    item: Item,
    rng: R,
    phase: Phase,
}

impl<R: Rng> SnakeGame<R> {
    /// Builds the session. The item gets its first position here.
    pub fn new(config: GameConfig, size: (i16, i16), mut rng: R) -> Self {
        let (height, width) = size;
        let arena = Arena::new(height, width, config.glyphs.clone());
        let snake = Snake::new(config.start_pos, config.start_heading, config.glyphs.snake);
        let mut item = Item::new(config.glyphs.item);
        if item.respawn(&arena, &snake, &mut rng).is_none() {
            tracing::warn!(height, width, "no free cell for the first item");
        }

        SnakeGame { config, arena, snake, item, rng, phase: Phase::Init }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Runs the session to its end: draws the first frame, then ticks at the
    /// configured interval until the snake dies, the board fills, or the
    /// player quits.
    pub fn run<F: Frontend>(&mut self, frontend: &mut F) -> GameResult<Outcome> {
        self.start();
        frontend.present(&self.arena)?;

        let outcome = loop {
            let command = frontend.poll_command()?;
            let ended = self.step(command)?;

            // A dead snake is not drawn again
            if self.snake.is_alive() && ended != Some(Outcome::Quit) {
                frontend.present(&self.arena)?;
            }

            match ended {
                Some(outcome) => break outcome,
                None => sleep(self.config.frame_interval),
            }
        };

        // Quitting skips the final key press
        if outcome != Outcome::Quit {
            frontend.wait_for_key()?;
        }

        Ok(outcome)
    }

    /// Tears down the snake once the session is over.
    pub fn finish(self) -> usize {
        self.snake.release()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn start(&mut self) {
        debug_assert_eq!(self.phase, Phase::Init, "a session runs once");
        self.arena.draw(&self.snake, &self.item);
        self.phase = Phase::Running;

        let (row, col) = self.snake.head_pos();
        let (height, width) = self.arena.bounds();
        tracing::info!(height, width, row, col, heading = ?self.snake.heading(), "game started");
    }

    /// One tick of the running phase. Returns the outcome once the session
    /// is over, `None` while it keeps going.
    fn step(&mut self, command: Option<Command>) -> GameResult<Option<Outcome>> {
        match command {
            Some(Command::Quit) => {
                tracing::info!(length = self.snake.length(), "player quit");
                return Ok(self.end(Outcome::Quit));
            },
            Some(Command::Turn(dir)) => self.snake.set_heading(dir),
            None => {},
        }

        self.arena.clear_trail(&self.snake);
        let ticked = self.snake.tick(&self.arena, &mut self.item, &mut self.rng)?;

        if let Some(cause) = self.snake.death_cause() {
            return Ok(self.end(Outcome::Died(cause)));
        }

        self.arena.draw(&self.snake, &self.item);

        if ticked == TickResult::Filled {
            return Ok(self.end(Outcome::Filled));
        }

        Ok(None)
    }

    fn end(&mut self, outcome: Outcome) -> Option<Outcome> {
        self.phase = Phase::Terminated(outcome);
        Some(outcome)
    }
}
