// src/zobrist.rs
use crate::board::CastlingRights;
use crate::types::{Color, Piece, BOARD_SIZE};
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

lazy_static! {
    pub static ref ZOBRIST: ZobristTable = ZobristTable::new();
}

// --- Zobrist Hashing ---
#[derive(Debug, Clone)]
pub struct ZobristTable {
    // piece[color][piece_type][square]
    piece_keys: [[[u64; BOARD_SIZE * BOARD_SIZE]; 6]; 2],
    // One key per "has moved" flag: king, kingside rook, queenside rook, per color
    king_moved_keys: [u64; 2],
    kingside_rook_moved_keys: [u64; 2],
    queenside_rook_moved_keys: [u64; 2],
    black_to_move_key: u64,
}

impl ZobristTable {
    fn new() -> Self {
        // Fixed seed so hashes are stable across runs
        let mut rng = StdRng::seed_from_u64(0xDEADBEEFCAFEBABE);
        let mut table = ZobristTable {
            piece_keys: [[[0; BOARD_SIZE * BOARD_SIZE]; 6]; 2],
            king_moved_keys: [0; 2],
            kingside_rook_moved_keys: [0; 2],
            queenside_rook_moved_keys: [0; 2],
            black_to_move_key: rng.next_u64(),
        };

        for color in 0..2 {
            for piece_type in 0..6 {
                for square in 0..BOARD_SIZE * BOARD_SIZE {
                    table.piece_keys[color][piece_type][square] = rng.next_u64();
                }
            }
        }

        for color in 0..2 {
            table.king_moved_keys[color] = rng.next_u64();
            table.kingside_rook_moved_keys[color] = rng.next_u64();
            table.queenside_rook_moved_keys[color] = rng.next_u64();
        }

        table
    }

    pub fn piece(&self, piece: Piece, square_index: usize) -> u64 {
        self.piece_keys[piece.color.index()][piece.kind.index()][square_index]
    }

    pub fn castling(&self, rights: &CastlingRights) -> u64 {
        let mut key = 0;
        for color in [Color::White, Color::Black] {
            let i = color.index();
            if rights.king_moved(color) { key ^= self.king_moved_keys[i]; }
            if rights.kingside_rook_moved(color) { key ^= self.kingside_rook_moved_keys[i]; }
            if rights.queenside_rook_moved(color) { key ^= self.queenside_rook_moved_keys[i]; }
        }
        key
    }

    pub fn side_to_move(&self, color: Color) -> u64 {
        if color == Color::Black { self.black_to_move_key } else { 0 }
    }
}
