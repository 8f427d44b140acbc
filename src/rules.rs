// src/rules.rs
//! Per-piece movement rules.
//!
//! Every predicate answers "may this piece make this move on this board",
//! ignoring whether the mover's own King is left in check. That last test
//! belongs to the move orchestrator in `moves`.

use crate::board::{
    Board, GameState, KINGSIDE_KING_DEST_COL, KINGSIDE_ROOK_COL, KINGSIDE_ROOK_DEST_COL,
    KING_HOME_COL, QUEENSIDE_KING_DEST_COL, QUEENSIDE_ROOK_COL, QUEENSIDE_ROOK_DEST_COL,
};
use crate::status;
use crate::types::{Color, Piece, PieceType, Square};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastleSide { Kingside, Queenside }

impl CastleSide {
    pub fn king_destination(&self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::fixed(color.back_row(), KINGSIDE_KING_DEST_COL),
            CastleSide::Queenside => Square::fixed(color.back_row(), QUEENSIDE_KING_DEST_COL),
        }
    }
    pub fn rook_origin(&self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::fixed(color.back_row(), KINGSIDE_ROOK_COL),
            CastleSide::Queenside => Square::fixed(color.back_row(), QUEENSIDE_ROOK_COL),
        }
    }
    /// Square next to the King's destination, on the side castled toward.
    pub fn rook_destination(&self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::fixed(color.back_row(), KINGSIDE_ROOK_DEST_COL),
            CastleSide::Queenside => Square::fixed(color.back_row(), QUEENSIDE_ROOK_DEST_COL),
        }
    }
    pub fn notation(&self) -> &'static str {
        match self { CastleSide::Kingside => "O-O", CastleSide::Queenside => "O-O-O" }
    }
}

// --- Shared helpers ---

#[inline]
fn delta(from: Square, to: Square) -> (i8, i8) {
    (to.row() as i8 - from.row() as i8, to.col() as i8 - from.col() as i8)
}

/// Empty, or held by the opponent of `color`.
#[inline]
fn destination_ok(board: &Board, to: Square, color: Color) -> bool {
    board.get(to).map_or(true, |piece| piece.color != color)
}

/// True if every square strictly between `from` and `to` is empty.
/// Only meaningful for squares sharing a row, column or diagonal.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut current = from.offset(step_r, step_c);
    while let Some(sq) = current {
        if sq == to { return true; }
        if !board.is_empty(sq) { return false; }
        current = sq.offset(step_r, step_c);
    }
    false
}

fn is_knight_jump(dr: i8, dc: i8) -> bool {
    matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2))
}

/// Whether `piece` standing on `from` hits `target`, whatever occupies `target`.
/// Pawns only hit their two forward diagonals; castling never attacks.
pub fn attacks(board: &Board, from: Square, piece: Piece, target: Square) -> bool {
    if from == target { return false; }
    let (dr, dc) = delta(from, target);
    let straight = dr == 0 || dc == 0;
    let diagonal = dr.abs() == dc.abs();
    match piece.kind {
        PieceType::Pawn => dr == piece.color.pawn_direction() && dc.abs() == 1,
        PieceType::Knight => is_knight_jump(dr, dc),
        PieceType::Bishop => diagonal && path_clear(board, from, target),
        PieceType::Rook => straight && path_clear(board, from, target),
        PieceType::Queen => (straight || diagonal) && path_clear(board, from, target),
        PieceType::King => dr.abs() <= 1 && dc.abs() <= 1,
    }
}

// --- Piece Movement Rules ---

pub fn pawn_move(state: &GameState, from: Square, to: Square, color: Color) -> bool {
    let board = &state.board;
    let direction = color.pawn_direction();
    let (dr, dc) = delta(from, to);

    if dc == 0 {
        if !board.is_empty(to) { return false; }
        if dr == direction { return true; }
        // Double step: start row only, both squares empty
        return dr == 2 * direction
            && from.row() == color.pawn_start_row()
            && from.offset(direction, 0).map_or(false, |mid| board.is_empty(mid));
    }

    // Diagonal step is a capture or nothing (no en passant)
    dc.abs() == 1 && dr == direction && board.get(to).map_or(false, |p| p.color != color)
}

pub fn rook_move(state: &GameState, from: Square, to: Square, color: Color) -> bool {
    let rook = Piece::new(PieceType::Rook, color);
    attacks(&state.board, from, rook, to) && destination_ok(&state.board, to, color)
}

pub fn bishop_move(state: &GameState, from: Square, to: Square, color: Color) -> bool {
    let bishop = Piece::new(PieceType::Bishop, color);
    attacks(&state.board, from, bishop, to) && destination_ok(&state.board, to, color)
}

pub fn knight_move(state: &GameState, from: Square, to: Square, color: Color) -> bool {
    let (dr, dc) = delta(from, to);
    is_knight_jump(dr, dc) && destination_ok(&state.board, to, color)
}

pub fn queen_move(state: &GameState, from: Square, to: Square, color: Color) -> bool {
    rook_move(state, from, to, color) || bishop_move(state, from, to, color)
}

pub fn king_move(state: &GameState, from: Square, to: Square, color: Color) -> bool {
    if castling_move(state, from, to, color).is_some() { return true; }
    let (dr, dc) = delta(from, to);
    dr.abs() <= 1 && dc.abs() <= 1 && destination_ok(&state.board, to, color)
}

/// Returns the side being castled toward if `from -> to` is an eligible castling move.
pub fn castling_move(state: &GameState, from: Square, to: Square, color: Color) -> Option<CastleSide> {
    let row = color.back_row();
    if from.row() != row || from.col() != KING_HOME_COL || to.row() != row { return None; }
    let side = match to.col() {
        KINGSIDE_KING_DEST_COL => CastleSide::Kingside,
        QUEENSIDE_KING_DEST_COL => CastleSide::Queenside,
        _ => return None,
    };

    let board = &state.board;
    if board.get(from) != Some(Piece::new(PieceType::King, color)) { return None; }
    if !state.castling.can_castle(color, side == CastleSide::Kingside) { return None; }

    let rook_square = side.rook_origin(color);
    if board.get(rook_square) != Some(Piece::new(PieceType::Rook, color)) { return None; }
    if !path_clear(board, from, rook_square) { return None; }

    if state.options.strict_castling {
        // The King passes over the square its Rook lands on
        let enemy = color.opponent();
        if status::is_square_attacked(board, from, enemy)
            || status::is_square_attacked(board, side.rook_destination(color), enemy)
        {
            return None;
        }
    }

    Some(side)
}

/// Geometric and capture legality for whatever piece of `color` stands on `from`.
pub fn is_pseudo_legal(state: &GameState, from: Square, to: Square, color: Color) -> bool {
    if from == to { return false; }
    let piece = match state.board.get(from) {
        Some(piece) if piece.color == color => piece,
        _ => return false,
    };
    match piece.kind {
        PieceType::Pawn => pawn_move(state, from, to, color),
        PieceType::Rook => rook_move(state, from, to, color),
        PieceType::Knight => knight_move(state, from, to, color),
        PieceType::Bishop => bishop_move(state, from, to, color),
        PieceType::Queen => queen_move(state, from, to, color),
        PieceType::King => king_move(state, from, to, color),
    }
}
