// src/moves.rs
//! Move orchestrator: validation, tentative application with an undo record,
//! self-check rejection, and the single committing mutation per accepted move.

use crate::board::{Board, GameState};
use crate::error::ChessError;
use crate::rules::{self, CastleSide};
use crate::status;
use crate::types::{Color, Piece, PieceType, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Accepted,
    RejectedIllegalGeometry,
    RejectedSelfCheck,
    RejectedOutOfTurn,
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        *self == MoveOutcome::Accepted
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Accepted => write!(f, "Move accepted."),
            MoveOutcome::RejectedIllegalGeometry => write!(f, "Illegal move pattern for that piece."),
            MoveOutcome::RejectedSelfCheck => write!(f, "Illegal move: leaves your king in check."),
            MoveOutcome::RejectedOutOfTurn => write!(f, "No piece of the side to move on that square."),
        }
    }
}

/// Everything touched by a tentative move, so it can be reversed exactly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    pub from: Square,
    pub to: Square,
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub rook_move: Option<(Square, Square)>,
}

/// Details of an accepted move, for history and display.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub castle: Option<CastleSide>,
    pub promoted: bool,
}

enum Trial {
    Applied(UndoRecord, Option<CastleSide>),
    Rejected(MoveOutcome),
}

// --- Tentative application and rollback ---

/// Moves the piece on `from` to `to`, plus the castling Rook if `castle` is set.
/// Returns `None` without touching the board if `from` is empty.
fn apply_tentative(board: &mut Board, from: Square, to: Square, castle: Option<CastleSide>) -> Option<UndoRecord> {
    let moved = board.get(from)?;
    board.set(from, None);
    let captured = board.set(to, Some(moved));

    let rook_move = castle.map(|side| {
        let (rook_from, rook_to) = (side.rook_origin(moved.color), side.rook_destination(moved.color));
        let rook = board.set(rook_from, None);
        board.set(rook_to, rook);
        (rook_from, rook_to)
    });

    Some(UndoRecord { from, to, moved, captured, rook_move })
}

/// Exact inverse of `apply_tentative`, replayed in reverse order.
fn undo(board: &mut Board, record: &UndoRecord) {
    if let Some((rook_from, rook_to)) = record.rook_move {
        let rook = board.set(rook_to, None);
        board.set(rook_from, rook);
    }
    board.set(record.to, record.captured);
    board.set(record.from, Some(record.moved));
}

/// Validates `from -> to` for `color` and leaves it on the board if it survives
/// the self-check test. On every other path the state is unchanged.
fn try_apply(state: &mut GameState, from: Square, to: Square, color: Color) -> Result<Trial, ChessError> {
    let piece = match state.board.get(from) {
        Some(piece) if piece.color == color => piece,
        _ => return Ok(Trial::Rejected(MoveOutcome::RejectedOutOfTurn)),
    };
    if !rules::is_pseudo_legal(state, from, to, color) {
        return Ok(Trial::Rejected(MoveOutcome::RejectedIllegalGeometry));
    }

    let castle = if piece.kind == PieceType::King { rules::castling_move(state, from, to, color) } else { None };
    let record = match apply_tentative(&mut state.board, from, to, castle) {
        Some(record) => record,
        None => return Ok(Trial::Rejected(MoveOutcome::RejectedOutOfTurn)),
    };

    match status::is_in_check(state, color) {
        Ok(false) => Ok(Trial::Applied(record, castle)),
        Ok(true) => {
            undo(&mut state.board, &record);
            Ok(Trial::Rejected(MoveOutcome::RejectedSelfCheck))
        }
        Err(e) => {
            undo(&mut state.board, &record);
            Err(e)
        }
    }
}

/// Flags, promotion and turn change for a move that survived the self-check test.
fn commit(state: &mut GameState, record: &UndoRecord, castle: Option<CastleSide>) -> AppliedMove {
    let color = record.moved.color;
    match record.moved.kind {
        PieceType::King => state.castling.mark_king_moved(color),
        PieceType::Rook => state.castling.mark_rook_vacated(color, record.from),
        _ => {}
    }
    if let Some(captured) = record.captured {
        if captured.kind == PieceType::Rook {
            state.castling.mark_rook_vacated(captured.color, record.to);
        }
    }

    let promoted = record.moved.kind == PieceType::Pawn && record.to.row() == color.promotion_row();
    if promoted {
        state.board.set(record.to, Some(Piece::new(PieceType::Queen, color)));
    }

    state.side_to_move = color.opponent();

    AppliedMove {
        from: record.from,
        to: record.to,
        piece: record.moved,
        captured: record.captured,
        castle,
        promoted,
    }
}

// --- Public operations ---

/// Validates and, if legal, plays `from -> to` for the side to move.
/// The state is mutated iff the outcome is `Accepted`.
pub fn attempt_move(state: &mut GameState, from: Square, to: Square) -> Result<MoveOutcome, ChessError> {
    attempt_move_detailed(state, from, to).map(|(outcome, _)| outcome)
}

/// Like `attempt_move`, also describing the accepted move.
pub fn attempt_move_detailed(
    state: &mut GameState,
    from: Square,
    to: Square,
) -> Result<(MoveOutcome, Option<AppliedMove>), ChessError> {
    let color = state.side_to_move;
    match try_apply(state, from, to, color)? {
        Trial::Rejected(outcome) => Ok((outcome, None)),
        Trial::Applied(record, castle) => {
            let applied = commit(state, &record, castle);
            Ok((MoveOutcome::Accepted, Some(applied)))
        }
    }
}

fn destinations_for(scratch: &mut GameState, from: Square, color: Color) -> Result<BTreeSet<Square>, ChessError> {
    let mut destinations = BTreeSet::new();
    for to in Square::all() {
        if let Trial::Applied(record, _) = try_apply(scratch, from, to, color)? {
            undo(&mut scratch.board, &record);
            destinations.insert(to);
        }
    }
    Ok(destinations)
}

/// Every square `from` could legally move to for the side to move.
/// Runs the full validation for each of the 64 squares on a scratch copy.
pub fn legal_destinations(state: &GameState, from: Square) -> Result<BTreeSet<Square>, ChessError> {
    let mut scratch = state.clone();
    destinations_for(&mut scratch, from, state.side_to_move)
}

/// All legal (from, to) pairs for the side to move.
pub fn legal_moves(state: &GameState) -> Result<Vec<(Square, Square)>, ChessError> {
    let color = state.side_to_move;
    let mut scratch = state.clone();
    let mut moves = Vec::new();
    let origins: Vec<Square> = state.board.pieces_of(color).map(|(sq, _)| sq).collect();
    for from in origins {
        for to in destinations_for(&mut scratch, from, color)? {
            moves.push((from, to));
        }
    }
    Ok(moves)
}

/// Whether `color` has at least one move that does not leave its King in check.
pub fn has_legal_move(state: &GameState, color: Color) -> Result<bool, ChessError> {
    let mut scratch = state.clone();
    let origins: Vec<Square> = state.board.pieces_of(color).map(|(sq, _)| sq).collect();
    for from in origins {
        for to in Square::all() {
            if let Trial::Applied(record, _) = try_apply(&mut scratch, from, to, color)? {
                undo(&mut scratch.board, &record);
                return Ok(true);
            }
        }
    }
    Ok(false)
}
