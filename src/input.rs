// src/input.rs
//! Translation from raw adapter input (typed text, mouse pixels, arrow keys)
//! into board squares. Nothing here knows about legality.

use crate::error::InputError;
use crate::rules::CastleSide;
use crate::types::{Color, Square, BOARD_SIZE};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SQUARE_RE: Regex = Regex::new(r"^(?i)([a-h][1-8])$").unwrap();
    // "e2e4", "e2 e4", "e2-e4", "e2xe4"
    static ref MOVE_RE: Regex = Regex::new(r"^(?i)([a-h][1-8])\s*[-x]?\s*([a-h][1-8])$").unwrap();
}

pub fn parse_square(input: &str) -> Result<Square, InputError> {
    let trimmed = input.trim();
    SQUARE_RE.captures(trimmed)
        .and_then(|caps| Square::from_algebraic(&caps[1]))
        .ok_or_else(|| InputError::InvalidSquare(trimmed.to_string()))
}

pub fn parse_move(input: &str) -> Result<(Square, Square), InputError> {
    let trimmed = input.trim();
    let caps = MOVE_RE.captures(trimmed)
        .ok_or_else(|| InputError::InvalidMove(trimmed.to_string()))?;
    let from = Square::from_algebraic(&caps[1]).ok_or_else(|| InputError::InvalidSquare(caps[1].to_string()))?;
    let to = Square::from_algebraic(&caps[2]).ok_or_else(|| InputError::InvalidSquare(caps[2].to_string()))?;
    Ok((from, to))
}

/// Window pixel to square, for a board drawn with row 0 at the top.
pub fn square_from_pixels(x: u32, y: u32, tile_size: u32) -> Option<Square> {
    if tile_size == 0 { return None; }
    let (col, row) = (x / tile_size, y / tile_size);
    if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE { return None; }
    Square::new(row as u8, col as u8)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction { Up, Down, Left, Right }

impl Direction {
    /// Accepts arrow-key words and WASD.
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "up" | "w" => Some(Direction::Up),
            "down" | "s" => Some(Direction::Down),
            "left" | "a" => Some(Direction::Left),
            "right" | "d" => Some(Direction::Right),
            _ => None,
        }
    }

    fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Grid cursor for arrow-key driven adapters. Stops at the board edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cursor {
    square: Square,
}

impl Default for Cursor {
    fn default() -> Self {
        // e2, in front of White's king
        Cursor { square: Square::fixed(6, 4) }
    }
}

impl Cursor {
    pub fn at(square: Square) -> Self { Cursor { square } }

    pub fn square(&self) -> Square { self.square }

    pub fn step(&mut self, direction: Direction) -> Square {
        let (dr, dc) = direction.delta();
        if let Some(next) = self.square.offset(dr, dc) {
            self.square = next;
        }
        self.square
    }
}

// --- Console Input ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    ToggleHints,
    Status,
    History,
    Snapshot(Option<String>),
    Setup { placement: String, side: Color },
    NewGame,
    Cancel,
    Cursor(Direction),
    Confirm,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Move(Square, Square),
    Castle(CastleSide),
    /// A lone square goes through the select/confirm flow.
    Square(Square),
    Command(Command),
}

/// Parses one console line into a move, a square or a command.
pub fn parse_user_input(input: &str) -> Result<UserInput, InputError> {
    let trimmed_input = input.trim();
    let lower_input = trimmed_input.to_lowercase();

    match lower_input.as_str() {
        "o-o" | "0-0" => return Ok(UserInput::Castle(CastleSide::Kingside)),
        "o-o-o" | "0-0-0" => return Ok(UserInput::Castle(CastleSide::Queenside)),
        _ => {}
    }

    if let Some(direction) = Direction::parse(&lower_input) {
        return Ok(UserInput::Command(Command::Cursor(direction)));
    }

    let mut parts = trimmed_input.splitn(2, char::is_whitespace);
    let command_word = parts.next().unwrap_or("").to_lowercase();
    let argument = parts.next().unwrap_or("").trim();

    let command = match command_word.as_str() {
        "help" | "?" => Some(Command::Help),
        "hints" => Some(Command::ToggleHints),
        "status" => Some(Command::Status),
        "history" => Some(Command::History),
        "snapshot" => Some(Command::Snapshot((!argument.is_empty()).then(|| argument.to_string()))),
        "setup" => Some(parse_setup(argument)?),
        "new" => Some(Command::NewGame),
        "cancel" => Some(Command::Cancel),
        "enter" | "." => Some(Command::Confirm),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    };
    if let Some(command) = command {
        return Ok(UserInput::Command(command));
    }

    if SQUARE_RE.is_match(trimmed_input) {
        return parse_square(trimmed_input).map(UserInput::Square);
    }
    if MOVE_RE.is_match(trimmed_input) {
        let (from, to) = parse_move(trimmed_input)?;
        return Ok(UserInput::Move(from, to));
    }
    Err(InputError::UnknownCommand(trimmed_input.to_string()))
}

fn parse_setup(argument: &str) -> Result<Command, InputError> {
    let mut fields = argument.split_whitespace();
    let placement = fields.next().ok_or_else(|| InputError::MissingArgument("setup".to_string()))?;
    let side = match fields.next().map(str::to_lowercase).as_deref() {
        None | Some("w") | Some("white") => Color::White,
        Some("b") | Some("black") => Color::Black,
        Some(other) => return Err(InputError::UnknownCommand(format!("setup ... {}", other))),
    };
    Ok(Command::Setup { placement: placement.to_string(), side })
}
