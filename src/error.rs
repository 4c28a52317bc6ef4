use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The terminal cannot host the game. Checked once, before any setup.
    #[error("terminal not supported: {0}")]
    EnvironmentUnsupported(String),

    #[error("could not allocate a new snake segment")]
    AllocationFailure,

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
