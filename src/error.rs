use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Invalid board notation: {0}")]
    InvalidBoardNotation(String),

    #[error("Invalid hand: {0}")]
    InvalidHand(String),

    #[error("Need at least {need} cards, got {got}")]
    NotEnoughCards { need: usize, got: usize },

    #[error("Cannot draw {requested} cards, only {available} remaining")]
    InsufficientCards { requested: usize, available: usize },

    #[error("No legal action available")]
    NoLegalAction,

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Time budget exhausted before any trial completed")]
    TimeBudgetExhausted,

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BotResult<T> = Result<T, BotError>;
