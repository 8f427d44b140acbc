// src/error.rs
use crate::types::Color;
use std::io;

/// Invariant violations inside the engine. Illegal moves are never errors,
/// they are reported through `MoveOutcome`.
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),

    #[error("{0} is in check but it is not their turn")]
    OpponentInCheck(Color),
}

/// Errors from translating raw adapter input into squares and commands.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid square '{0}'. Use a file a-h followed by a rank 1-8, e.g. 'e2'.")]
    InvalidSquare(String),

    #[error("invalid move '{0}'. Use two squares, e.g. 'e2e4' or 'e2 e4'.")]
    InvalidMove(String),

    #[error("unknown command: '{0}'. Type 'help' for commands.")]
    UnknownCommand(String),

    #[error("missing argument for command: '{0}'")]
    MissingArgument(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error with config file '{0}': {1}")]
    Io(String, #[source] io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
