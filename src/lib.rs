// src/lib.rs
//! Two-player chess rule engine: board model, per-piece movement rules,
//! check/checkmate detection and castling, with thin helpers for
//! console and pointer-driven front ends.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod moves;
pub mod rules;
pub mod selection;
pub mod status;
pub mod types;
pub mod zobrist;

pub use board::{Board, CastlingRights, GameState, RuleOptions};
pub use config::ConsoleConfig;
pub use error::{ChessError, ConfigError, InputError};
pub use game::{BoardView, Game, MoveRecord, Snapshot};
pub use moves::{attempt_move, has_legal_move, legal_destinations, legal_moves, MoveOutcome};
pub use rules::CastleSide;
pub use selection::{SelectionEvent, SelectionState};
pub use status::{evaluate, is_checkmate, is_in_check, is_stalemate, GameStatus};
pub use types::{Color, Piece, PieceType, Square, BOARD_SIZE};
