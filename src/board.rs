// src/board.rs
use crate::error::ChessError;
use crate::status;
use crate::types::{Color, Piece, PieceType, Square, BOARD_SIZE};
use crate::zobrist::ZOBRIST;
use serde::{Deserialize, Serialize};
use std::fmt;

// Castling geometry (columns on the back row)
pub const KING_HOME_COL: u8 = 4;
pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;
pub const KINGSIDE_KING_DEST_COL: u8 = 6;
pub const QUEENSIDE_KING_DEST_COL: u8 = 2;
pub const KINGSIDE_ROOK_DEST_COL: u8 = 5;
pub const QUEENSIDE_ROOK_DEST_COL: u8 = 3;

const BACK_ROW_ORDER: [PieceType; BOARD_SIZE] = [
    PieceType::Rook, PieceType::Knight, PieceType::Bishop, PieceType::Queen,
    PieceType::King, PieceType::Bishop, PieceType::Knight, PieceType::Rook,
];

pub const STANDARD_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

// --- Castling Rights ---

/// "Has moved" flags. Every flag starts false and can only ever become true.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    king_moved: [bool; 2],
    kingside_rook_moved: [bool; 2],
    queenside_rook_moved: [bool; 2],
}

impl CastlingRights {
    pub fn king_moved(&self, color: Color) -> bool { self.king_moved[color.index()] }
    pub fn kingside_rook_moved(&self, color: Color) -> bool { self.kingside_rook_moved[color.index()] }
    pub fn queenside_rook_moved(&self, color: Color) -> bool { self.queenside_rook_moved[color.index()] }

    pub(crate) fn mark_king_moved(&mut self, color: Color) {
        self.king_moved[color.index()] = true;
    }

    /// A `color` Rook left `square` (moved away or captured there). Only its
    /// two home corners matter.
    pub(crate) fn mark_rook_vacated(&mut self, color: Color, square: Square) {
        if square.row() != color.back_row() { return; }
        match square.col() {
            KINGSIDE_ROOK_COL => self.kingside_rook_moved[color.index()] = true,
            QUEENSIDE_ROOK_COL => self.queenside_rook_moved[color.index()] = true,
            _ => {}
        }
    }

    /// True while castling toward `kingside` is still possible as far as the flags go.
    pub fn can_castle(&self, color: Color, kingside: bool) -> bool {
        if self.king_moved(color) { return false; }
        if kingside { !self.kingside_rook_moved(color) } else { !self.queenside_rook_moved(color) }
    }
}

// --- Rule Options ---

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct RuleOptions {
    /// Also forbid castling out of check or across an attacked square.
    pub strict_castling: bool,
}

// --- Board ---

/// The 8x8 grid. Every square always holds exactly one `Option<Piece>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE * BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Board { squares: [None; BOARD_SIZE * BOARD_SIZE] }
    }

    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            for (col, kind) in BACK_ROW_ORDER.iter().enumerate() {
                board.put(color.back_row(), col as u8, Piece::new(*kind, color));
                board.put(color.pawn_start_row(), col as u8, Piece::new(PieceType::Pawn, color));
            }
        }
        board
    }

    fn put(&mut self, row: u8, col: u8, piece: Piece) {
        if let Some(square) = Square::new(row, col) {
            self.squares[square.index()] = Some(piece);
        }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Writes `piece` to `square`, returning whatever was there before.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[square.index()], piece)
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Occupied squares with their pieces, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.pieces_of(color).filter(|(_, p)| p.kind == PieceType::King).count()
    }

    /// FEN piece placement field, row 0 (rank 8) first.
    pub fn to_placement(&self) -> String {
        let mut out = String::new();
        for row in 0..BOARD_SIZE as u8 {
            let mut empty_run = 0;
            for col in 0..BOARD_SIZE as u8 {
                match Square::new(row, col).and_then(|sq| self.get(sq)) {
                    Some(piece) => {
                        if empty_run > 0 { out.push_str(&empty_run.to_string()); empty_run = 0; }
                        out.push(piece.to_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 { out.push_str(&empty_run.to_string()); }
            if row + 1 < BOARD_SIZE as u8 { out.push('/'); }
        }
        out
    }

    pub fn from_placement(placement: &str) -> Result<Self, ChessError> {
        let rows: Vec<&str> = placement.trim().split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(ChessError::InvalidPlacement(format!("expected 8 ranks, found {}", rows.len())));
        }
        let mut board = Board::empty();
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            for c in text.chars() {
                if let Some(run) = c.to_digit(10) {
                    if run == 0 || run as usize > BOARD_SIZE {
                        return Err(ChessError::InvalidPlacement(format!("bad empty-square count '{}'", c)));
                    }
                    col += run as usize;
                } else {
                    let piece = Piece::from_char(c)
                        .ok_or_else(|| ChessError::InvalidPlacement(format!("unknown piece letter '{}'", c)))?;
                    if col >= BOARD_SIZE {
                        return Err(ChessError::InvalidPlacement(format!("rank '{}' is longer than 8 squares", text)));
                    }
                    board.put(row as u8, col as u8, piece);
                    col += 1;
                }
                if col > BOARD_SIZE {
                    return Err(ChessError::InvalidPlacement(format!("rank '{}' is longer than 8 squares", text)));
                }
            }
            if col != BOARD_SIZE {
                return Err(ChessError::InvalidPlacement(format!("rank '{}' covers {} squares, expected 8", text, col)));
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                match Square::new(row, col).and_then(|sq| self.get(sq)) {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// --- Game State ---

/// Board, side to move and castling flags. Mutated only by the move orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) options: RuleOptions,
}

impl Default for GameState {
    fn default() -> Self { GameState::new() }
}

impl GameState {
    /// Standard initial position, White to move.
    pub fn new() -> Self {
        GameState {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            options: RuleOptions::default(),
        }
    }

    /// Builds a position from a FEN-style placement field. Kings and corner Rooks
    /// that are off their home squares are recorded as having moved.
    pub fn from_placement(placement: &str, side_to_move: Color) -> Result<Self, ChessError> {
        let board = Board::from_placement(placement)?;
        for color in [Color::White, Color::Black] {
            let count = board.count_kings(color);
            if count != 1 {
                return Err(ChessError::KingCount { color, count });
            }
        }

        let mut castling = CastlingRights::default();
        for color in [Color::White, Color::Black] {
            let row = color.back_row();
            let home = |col: u8, kind: PieceType| {
                Square::new(row, col).and_then(|sq| board.get(sq)) == Some(Piece::new(kind, color))
            };
            if !home(KING_HOME_COL, PieceType::King) { castling.mark_king_moved(color); }
            if !home(KINGSIDE_ROOK_COL, PieceType::Rook) { castling.kingside_rook_moved[color.index()] = true; }
            if !home(QUEENSIDE_ROOK_COL, PieceType::Rook) { castling.queenside_rook_moved[color.index()] = true; }
        }

        let state = GameState { board, side_to_move, castling, options: RuleOptions::default() };
        let waiting = side_to_move.opponent();
        if status::is_in_check(&state, waiting)? {
            return Err(ChessError::OpponentInCheck(waiting));
        }
        Ok(state)
    }

    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn side_to_move(&self) -> Color { self.side_to_move }
    pub fn castling_rights(&self) -> &CastlingRights { &self.castling }
    pub fn options(&self) -> RuleOptions { self.options }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    pub fn to_placement(&self) -> String {
        self.board.to_placement()
    }

    /// Locates the unique King of `color`.
    pub fn king_square(&self, color: Color) -> Result<Square, ChessError> {
        let king = Piece::new(PieceType::King, color);
        self.board.pieces()
            .find(|(_, piece)| *piece == king)
            .map(|(sq, _)| sq)
            .ok_or(ChessError::MissingKing(color))
    }

    /// Calculates the Zobrist hash key for the current state from scratch.
    pub fn zobrist_key(&self) -> u64 {
        let zob = &*ZOBRIST; // Avoid repeated lazy_static deref
        let mut key = 0u64;
        for (square, piece) in self.board.pieces() {
            key ^= zob.piece(piece, square.index());
        }
        key ^= zob.castling(&self.castling);
        key ^= zob.side_to_move(self.side_to_move);
        key
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "Turn: {}", self.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn standard_layout() {
        let state = GameState::new();
        assert_eq!(state.side_to_move(), Color::White);
        assert_eq!(state.piece_at(sq("e1")), Some(Piece::new(PieceType::King, Color::White)));
        assert_eq!(state.piece_at(sq("d8")), Some(Piece::new(PieceType::Queen, Color::Black)));
        assert_eq!(state.piece_at(sq("b1")), Some(Piece::new(PieceType::Knight, Color::White)));
        assert_eq!(state.piece_at(sq("h7")), Some(Piece::new(PieceType::Pawn, Color::Black)));
        assert_eq!(state.board().pieces().count(), 32);
        for row in 2..6 {
            for col in 0..8 {
                assert!(state.board().is_empty(Square::new(row, col).unwrap()));
            }
        }
        assert_eq!(state.to_placement(), STANDARD_PLACEMENT);
    }

    #[test]
    fn placement_round_trips_through_standard_board() {
        let board = Board::from_placement(STANDARD_PLACEMENT).unwrap();
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn malformed_placements_are_rejected() {
        assert!(matches!(Board::from_placement("8/8/8"), Err(ChessError::InvalidPlacement(_))));
        assert!(matches!(Board::from_placement("9/8/8/8/8/8/8/8"), Err(ChessError::InvalidPlacement(_))));
        assert!(matches!(Board::from_placement("ppppppppp/8/8/8/8/8/8/8"), Err(ChessError::InvalidPlacement(_))));
        assert!(matches!(Board::from_placement("7x/8/8/8/8/8/8/8"), Err(ChessError::InvalidPlacement(_))));
    }

    #[test]
    fn custom_positions_need_one_king_each() {
        let err = GameState::from_placement("8/8/8/8/8/8/8/4K3", Color::White).unwrap_err();
        assert!(matches!(err, ChessError::KingCount { color: Color::Black, count: 0 }));
        let err = GameState::from_placement("k6k/8/8/8/8/8/8/4K3", Color::White).unwrap_err();
        assert!(matches!(err, ChessError::KingCount { color: Color::Black, count: 2 }));
    }

    #[test]
    fn side_not_to_move_may_not_be_in_check() {
        // Black king on e8 attacked by the rook on e1 while White is to move
        let err = GameState::from_placement("4k3/8/8/8/8/8/8/K3R3", Color::White).unwrap_err();
        assert!(matches!(err, ChessError::OpponentInCheck(Color::Black)));
    }

    #[test]
    fn castling_flags_derived_from_home_squares() {
        let state = GameState::from_placement("4k3/8/8/8/8/8/8/R3K3", Color::White).unwrap();
        let rights = state.castling_rights();
        assert!(rights.can_castle(Color::White, false));
        assert!(!rights.can_castle(Color::White, true));
        assert!(!rights.can_castle(Color::Black, true));
        assert!(!rights.king_moved(Color::Black));
    }

    #[test]
    fn corner_flags_are_per_color() {
        let mut rights = CastlingRights::default();
        rights.mark_rook_vacated(Color::Black, sq("h8"));
        assert!(rights.kingside_rook_moved(Color::Black));
        assert!(!rights.kingside_rook_moved(Color::White));
        // A black rook leaving a white corner changes nothing
        rights.mark_rook_vacated(Color::Black, sq("a1"));
        assert!(!rights.queenside_rook_moved(Color::White));
        assert!(!rights.queenside_rook_moved(Color::Black));
    }

    #[test]
    fn missing_king_is_an_error_not_a_sentinel() {
        let mut state = GameState::new();
        state.board.set(sq("e8"), None);
        assert!(matches!(state.king_square(Color::Black), Err(ChessError::MissingKing(Color::Black))));
        assert_eq!(state.king_square(Color::White).unwrap(), sq("e1"));
    }

    #[test]
    fn hash_tracks_side_and_pieces() {
        let state = GameState::new();
        let mut flipped = state.clone();
        flipped.side_to_move = Color::Black;
        assert_ne!(state.zobrist_key(), flipped.zobrist_key());
        assert_eq!(state.zobrist_key(), GameState::new().zobrist_key());
    }
}
