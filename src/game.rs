// src/game.rs
use crate::board::{GameState, RuleOptions};
use crate::error::ChessError;
use crate::moves::{self, AppliedMove, MoveOutcome};
use crate::status::{self, GameStatus};
use crate::types::{Color, Piece, Square, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// --- Move History ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveRecord {
    pub mover: Color,
    pub applied: AppliedMove,
    pub gives_check: bool,
    pub gives_checkmate: bool,
}

impl MoveRecord {
    /// Coordinate notation: "e2e4", "O-O", "a7a8=Q", with "+" / "#" suffixes.
    pub fn notation(&self) -> String {
        let mut text = match self.applied.castle {
            Some(side) => side.notation().to_string(),
            None => format!("{}{}", self.applied.from, self.applied.to),
        };
        if self.applied.promoted { text.push_str("=Q"); }
        if self.gives_checkmate { text.push('#'); } else if self.gives_check { text.push('+'); }
        text
    }
}

// --- Snapshot ---

/// Everything a renderer needs, in one serializable value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub placement: String,
    pub side_to_move: Color,
    pub castling: CastlingSummary,
    pub status: GameStatus,
    pub hash: String,
    pub history: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastlingSummary {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

// --- Rendering options ---

#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub highlights: BTreeSet<Square>,
    pub selected: Option<Square>,
    pub cursor: Option<Square>,
    pub unicode: bool,
    pub coordinates: bool,
}

// --- Game ---

/// One game session: the engine state plus what a player wants to see around it.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    history: Vec<MoveRecord>,
    captured_white: Vec<Piece>, // White pieces captured by Black
    captured_black: Vec<Piece>, // Black pieces captured by White
}

impl Default for Game {
    fn default() -> Self { Game::new() }
}

impl Game {
    pub fn new() -> Self {
        Game::from_state(GameState::new())
    }

    pub fn from_state(state: GameState) -> Self {
        Game {
            state,
            history: Vec::new(),
            captured_white: Vec::new(),
            captured_black: Vec::new(),
        }
    }

    pub fn with_options(options: RuleOptions) -> Self {
        Game::from_state(GameState::new().with_options(options))
    }

    pub fn state(&self) -> &GameState { &self.state }
    pub fn side_to_move(&self) -> Color { self.state.side_to_move() }
    pub fn history(&self) -> &[MoveRecord] { &self.history }

    /// Pieces of `color` that have been captured so far.
    pub fn captured(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.captured_white,
            Color::Black => &self.captured_black,
        }
    }

    /// Plays a move for the side to move and records it if accepted.
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveOutcome, ChessError> {
        let mover = self.state.side_to_move();
        let (outcome, applied) = moves::attempt_move_detailed(&mut self.state, from, to)?;
        let Some(applied) = applied else { return Ok(outcome); };

        if let Some(captured) = applied.captured {
            match captured.color {
                Color::White => self.captured_white.push(captured),
                Color::Black => self.captured_black.push(captured),
            }
        }

        // Check / checkmate against the opponent, who is now to move
        let opponent = self.state.side_to_move();
        let gives_check = status::is_in_check(&self.state, opponent)?;
        let gives_checkmate = gives_check && !moves::has_legal_move(&self.state, opponent)?;
        self.history.push(MoveRecord { mover, applied, gives_check, gives_checkmate });
        Ok(outcome)
    }

    pub fn status(&self) -> Result<GameStatus, ChessError> {
        status::evaluate(&self.state)
    }

    pub fn legal_destinations(&self, from: Square) -> Result<BTreeSet<Square>, ChessError> {
        moves::legal_destinations(&self.state, from)
    }

    pub fn snapshot(&self) -> Result<Snapshot, ChessError> {
        let rights = self.state.castling_rights();
        Ok(Snapshot {
            placement: self.state.to_placement(),
            side_to_move: self.state.side_to_move(),
            castling: CastlingSummary {
                white_kingside: rights.can_castle(Color::White, true),
                white_queenside: rights.can_castle(Color::White, false),
                black_kingside: rights.can_castle(Color::Black, true),
                black_queenside: rights.can_castle(Color::Black, false),
            },
            status: self.status()?,
            hash: format!("{:016x}", self.state.zobrist_key()),
            history: self.history.iter().map(MoveRecord::notation).collect(),
        })
    }

    /// Renders the board for a terminal, rank 8 at the top.
    pub fn render(&self, view: &BoardView) -> String {
        let mut out = String::new();
        let border = if view.coordinates { "  +-----------------+\n" } else { "+-----------------+\n" };
        out.push_str(border);
        for row in 0..BOARD_SIZE as u8 {
            if view.coordinates { out.push_str(&format!("{} ", BOARD_SIZE as u8 - row)); }
            out.push_str("| ");
            for col in 0..BOARD_SIZE as u8 {
                let Some(square) = Square::new(row, col) else { continue };
                let glyph = match self.state.piece_at(square) {
                    Some(piece) if view.unicode => piece.to_unicode(),
                    Some(piece) => piece.to_char(),
                    None if view.highlights.contains(&square) => '*',
                    None => '.',
                };
                let (open, close) = if view.cursor == Some(square) {
                    ('[', ']')
                } else if view.selected == Some(square) {
                    ('(', ')')
                } else if view.highlights.contains(&square) {
                    ('>', ' ')
                } else {
                    (' ', ' ')
                };
                // Markers overwrite the separating spaces so columns stay aligned
                if open != ' ' { out.pop(); out.push(open); }
                out.push(glyph);
                out.push(close);
            }
            out.push_str("|\n");
        }
        out.push_str(border);
        if view.coordinates { out.push_str("    a b c d e f g h\n"); }
        out
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // --- Captured Pieces ---
        write!(f, "Captured by White: ")?;
        let mut sorted_capt_w = self.captured_black.clone();
        sorted_capt_w.sort_by_key(|p| p.kind.value());
        for piece in sorted_capt_w { write!(f, "{} ", piece)?; }
        writeln!(f)?;

        write!(f, "Captured by Black: ")?;
        let mut sorted_capt_b = self.captured_white.clone();
        sorted_capt_b.sort_by_key(|p| p.kind.value());
        for piece in sorted_capt_b { write!(f, "{} ", piece)?; }
        writeln!(f)?;
        writeln!(f, "---------------------")?;

        // --- Board ---
        let view = BoardView { coordinates: true, ..BoardView::default() };
        write!(f, "{}", self.render(&view))?;

        // --- Game State Info ---
        let rights = self.state.castling_rights();
        writeln!(f, "Turn: {}", self.state.side_to_move())?;
        writeln!(f, "Castling: W:{}{}, B:{}{}",
            if rights.can_castle(Color::White, true) { "K" } else { "-" },
            if rights.can_castle(Color::White, false) { "Q" } else { "-" },
            if rights.can_castle(Color::Black, true) { "k" } else { "-" },
            if rights.can_castle(Color::Black, false) { "q" } else { "-" }
        )?;

        // --- Annotated Move History Display ---
        if !self.history.is_empty() {
            writeln!(f, "Move History:")?;
            let mut move_num = 1;
            let mut pending_white: Option<String> = None;
            for record in &self.history {
                match record.mover {
                    Color::White => {
                        if let Some(white) = pending_white.take() {
                            writeln!(f, "{}. {}", move_num, white)?;
                            move_num += 1;
                        }
                        pending_white = Some(record.notation());
                    }
                    Color::Black => {
                        match pending_white.take() {
                            Some(white) => writeln!(f, "{}. {} {}", move_num, white, record.notation())?,
                            None => writeln!(f, "{}. ... {}", move_num, record.notation())?,
                        }
                        move_num += 1;
                    }
                }
            }
            if let Some(white) = pending_white {
                writeln!(f, "{}. {}", move_num, white)?;
            }
        }
        Ok(())
    }
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
