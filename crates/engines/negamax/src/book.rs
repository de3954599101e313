//! Opening book
//!
//! A JSON object mapping position fingerprints (as decimal strings) to the
//! moves known to be playable there. Each record carries enough to pick the
//! matching move out of the live position's legal moves.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ply_core::{Color, Game, Move, MoveType, PieceKind, Square};

use crate::error::BookError;

/// A captured piece as stored in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceDescriptor {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMove {
    pub origin: Square,
    pub destination: Square,
    #[serde(default)]
    pub promote_type: Option<PieceKind>,
    pub move_type: MoveType,
    #[serde(default)]
    pub captured_piece: Option<PieceDescriptor>,
    #[serde(default)]
    pub score_guess: i32,
    #[serde(default)]
    pub move_string: String,
}

impl BookMove {
    pub fn from_move(mv: &Move, move_string: &str) -> Self {
        Self {
            origin: mv.from,
            destination: mv.to,
            promote_type: mv.promotion,
            move_type: mv.move_type(),
            captured_piece: mv.captured.map(|cap| PieceDescriptor {
                color: cap.color,
                kind: cap.kind,
                square: cap.square,
            }),
            score_guess: mv.score_guess,
            move_string: move_string.to_string(),
        }
    }

    /// The legal move this record describes, if it is still on the board.
    pub fn resolve<'m>(&self, legal: &'m [Move]) -> Option<&'m Move> {
        legal.iter().find(|mv| self.describes(mv))
    }

    fn describes(&self, mv: &Move) -> bool {
        mv.from == self.origin
            && mv.to == self.destination
            && mv.promotion == self.promote_type
            && mv.captured.map(|cap| cap.square) == self.captured_piece.map(|cap| cap.square)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningBook {
    positions: BTreeMap<u64, Vec<BookMove>>,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, BookError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, BookError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a book from a JSON file
    pub fn load(path: &Path) -> Result<Self, BookError> {
        let contents = std::fs::read_to_string(path)?;
        let book = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), positions = book.len(), "opening book loaded");
        Ok(book)
    }

    /// Save the book to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), BookError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Adds `mv` as a known move in the position with `fingerprint`.
    /// Returns false if the move was already recorded there.
    pub fn record(&mut self, fingerprint: u64, mv: &Move, move_string: &str) -> bool {
        let entry = BookMove::from_move(mv, move_string);
        let moves = self.positions.entry(fingerprint).or_default();
        if moves.iter().any(|known| known.describes(mv)) {
            return false;
        }
        moves.push(entry);
        true
    }

    pub fn candidates(&self, fingerprint: u64) -> &[BookMove] {
        self.positions
            .get(&fingerprint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replays `moves` (coordinate or algebraic) from the start position and
    /// records every move against the position it was played in. Returns the
    /// number of new records.
    pub fn add_line(&mut self, moves: &[&str]) -> Result<usize, BookError> {
        let mut game = Game::startpos();
        let mut added = 0;
        for (index, text) in moves.iter().enumerate() {
            let mv = game.find_move(text).map_err(|source| BookError::Replay {
                index,
                text: text.to_string(),
                source,
            })?;
            if self.record(game.fingerprint(), &mv, text) {
                added += 1;
            }
            game.make_move(mv);
        }
        Ok(added)
    }

    /// Number of positions with at least one recorded move
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
