// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Constants ---
pub const BOARD_SIZE: usize = 8;

// --- Enums and Basic Structs ---
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color { White, Black }

impl Color {
    pub fn opponent(&self) -> Color {
        match self { Color::White => Color::Black, Color::Black => Color::White }
    }
    pub fn index(&self) -> usize { // Helper for Zobrist and castling flag indexing
        match self { Color::White => 0, Color::Black => 1 }
    }
    /// Row delta of a single pawn step. White advances toward row 0.
    pub fn pawn_direction(&self) -> i8 {
        match self { Color::White => -1, Color::Black => 1 }
    }
    /// Row holding this color's pawns at the start of the game.
    pub fn pawn_start_row(&self) -> u8 {
        match self { Color::White => 6, Color::Black => 1 }
    }
    /// Row holding this color's King and Rooks at the start of the game.
    pub fn back_row(&self) -> u8 {
        match self { Color::White => 7, Color::Black => 0 }
    }
    /// Row on which this color's pawns promote.
    pub fn promotion_row(&self) -> u8 {
        self.opponent().back_row()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceType { Pawn, Knight, Bishop, Rook, Queen, King }

impl PieceType {
    pub fn index(&self) -> usize { // Helper for Zobrist indexing
        match self {
            PieceType::Pawn => 0, PieceType::Knight => 1, PieceType::Bishop => 2,
            PieceType::Rook => 3, PieceType::Queen => 4, PieceType::King => 5,
        }
    }

    /// Rough material value, only used to sort captured pieces for display.
    pub fn value(&self) -> u32 {
        match self {
            PieceType::Pawn => 1, PieceType::Knight => 3, PieceType::Bishop => 3,
            PieceType::Rook => 5, PieceType::Queen => 9, PieceType::King => 0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Self { Piece { kind, color } }

    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn, 'n' => PieceType::Knight, 'b' => PieceType::Bishop,
            'r' => PieceType::Rook, 'q' => PieceType::Queen, 'k' => PieceType::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }

    /// FEN-style letter: uppercase for White, lowercase for Black.
    pub fn to_char(&self) -> char {
        let symbol = match self.kind {
            PieceType::Pawn => 'p', PieceType::Knight => 'n', PieceType::Bishop => 'b',
            PieceType::Rook => 'r', PieceType::Queen => 'q', PieceType::King => 'k',
        };
        match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        }
    }

    pub fn to_unicode(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceType::King) => '♔', (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::Rook) => '♖', (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Knight) => '♘', (Color::White, PieceType::Pawn) => '♙',
            (Color::Black, PieceType::King) => '♚', (Color::Black, PieceType::Queen) => '♛',
            (Color::Black, PieceType::Rook) => '♜', (Color::Black, PieceType::Bishop) => '♝',
            (Color::Black, PieceType::Knight) => '♞', (Color::Black, PieceType::Pawn) => '♟',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

// --- Square ---

/// A board coordinate. Row 0 is Black's back rank, row 7 is White's.
/// Both components are always in `0..8`; the only constructors check bounds.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Constructor for compile-time board geometry; components wrap into `0..8`.
    pub(crate) const fn fixed(row: u8, col: u8) -> Self {
        Square { row: row % BOARD_SIZE as u8, col: col % BOARD_SIZE as u8 }
    }

    /// Signed-coordinate constructor, used when walking rays off the edge of the board.
    pub fn from_signed(row: i8, col: i8) -> Option<Self> {
        if row < 0 || col < 0 { return None; }
        Square::new(row as u8, col as u8)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= BOARD_SIZE * BOARD_SIZE { return None; }
        Square::new((index / BOARD_SIZE) as u8, (index % BOARD_SIZE) as u8)
    }

    pub fn row(&self) -> u8 { self.row }
    pub fn col(&self) -> u8 { self.col }

    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        Square::from_signed(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// All 64 squares, row by row starting from row 0.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE * BOARD_SIZE).filter_map(Square::from_index)
    }

    /// Parses "e2"-style coordinates. Rank '1' is White's back rank (row 7).
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file_char = chars.next()?.to_ascii_lowercase();
        let rank_char = chars.next()?;
        if chars.next().is_some() { return None; }
        let file = match file_char { 'a'..='h' => file_char as u8 - b'a', _ => return None };
        let rank = match rank_char { '1'..='8' => rank_char as u8 - b'1', _ => return None };
        Square::new(7 - rank, file)
    }

    pub fn to_algebraic(&self) -> String {
        let file_char = (b'a' + self.col) as char;
        let rank_char = (b'1' + (7 - self.row)) as char;
        format!("{}{}", file_char, rank_char)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
