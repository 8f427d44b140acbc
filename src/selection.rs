// src/selection.rs
use crate::error::ChessError;
use crate::game::Game;
use crate::moves::MoveOutcome;
use crate::types::Square;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// An own piece was picked up; its legal destinations are now highlighted.
    Selected { square: Square, destinations: usize },
    /// First confirm on an empty square or an opponent piece.
    Ignored,
    /// Second confirm: the move was attempted and the selection cleared.
    Moved { from: Square, to: Square, outcome: MoveOutcome },
}

/// Click-twice (or confirm-twice) move entry with move hints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<Square>,
    destinations: BTreeSet<Square>,
}

impl SelectionState {
    pub fn new() -> Self { SelectionState::default() }

    pub fn selected(&self) -> Option<Square> { self.selected }
    pub fn destinations(&self) -> &BTreeSet<Square> { &self.destinations }

    pub fn clear(&mut self) {
        self.selected = None;
        self.destinations.clear();
    }

    pub fn confirm(&mut self, game: &mut Game, square: Square) -> Result<SelectionEvent, ChessError> {
        if let Some(from) = self.selected {
            // Consumed whatever the move's fate
            self.clear();
            let outcome = game.play(from, square)?;
            return Ok(SelectionEvent::Moved { from, to: square, outcome });
        }

        match game.state().piece_at(square) {
            Some(piece) if piece.color == game.side_to_move() => {
                let destinations = game.legal_destinations(square)?;
                let count = destinations.len();
                self.selected = Some(square);
                self.destinations = destinations;
                Ok(SelectionEvent::Selected { square, destinations: count })
            }
            _ => Ok(SelectionEvent::Ignored),
        }
    }
}
