// src/status.rs
use crate::board::{Board, GameState};
use crate::error::ChessError;
use crate::moves;
use crate::rules;
use crate::types::{Color, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the side to move is facing. The engine never ends a game on its own;
/// callers decide what to do with `Checkmate` and `Stalemate`.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
#[serde(tag = "status")]
pub enum GameStatus {
    Ongoing,
    Check { side: Color },
    Checkmate { winner: Color, loser: Color },
    Stalemate { side: Color },
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate { .. })
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "In progress"),
            GameStatus::Check { side } => write!(f, "{} is in check", side),
            GameStatus::Checkmate { winner, loser } => write!(f, "Checkmate! {} wins, {} is mated", winner, loser),
            GameStatus::Stalemate { side } => write!(f, "Stalemate: {} has no legal move", side),
        }
    }
}

/// Whether any piece of `attacker` hits `target`. Pawns count only their
/// capturing diagonals, so this also works for empty squares.
pub fn is_square_attacked(board: &Board, target: Square, attacker: Color) -> bool {
    board.pieces_of(attacker).any(|(from, piece)| rules::attacks(board, from, piece, target))
}

/// A side is in check iff some opposing piece could legally move onto its King.
pub fn is_in_check(state: &GameState, color: Color) -> Result<bool, ChessError> {
    let king = state.king_square(color)?;
    let enemy = color.opponent();
    Ok(state.board.pieces_of(enemy).any(|(from, _)| rules::is_pseudo_legal(state, from, king, enemy)))
}

/// In check, and every move of `color` still leaves its King in check.
pub fn is_checkmate(state: &GameState, color: Color) -> Result<bool, ChessError> {
    Ok(is_in_check(state, color)? && !moves::has_legal_move(state, color)?)
}

/// Not in check, but no legal move either.
pub fn is_stalemate(state: &GameState, color: Color) -> Result<bool, ChessError> {
    Ok(!is_in_check(state, color)? && !moves::has_legal_move(state, color)?)
}

/// Status for the side to move.
pub fn evaluate(state: &GameState) -> Result<GameStatus, ChessError> {
    let side = state.side_to_move;
    let in_check = is_in_check(state, side)?;
    let can_move = moves::has_legal_move(state, side)?;
    Ok(match (in_check, can_move) {
        (true, false) => GameStatus::Checkmate { winner: side.opponent(), loser: side },
        (true, true) => GameStatus::Check { side },
        (false, false) => GameStatus::Stalemate { side },
        (false, true) => GameStatus::Ongoing,
    })
}
