//! Transposition table
//!
//! Search results keyed by position fingerprint. Colliding stores overwrite
//! the previous entry unconditionally, and the table is never pruned.

use std::collections::HashMap;

use ply_core::Move;

/// How a stored score relates to the true value of the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// Search failed high: the true value is at least the score.
    Lower,
    /// Search failed low: the true value is at most the score.
    Upper,
}

#[derive(Clone, Debug)]
pub struct TranspositionEntry {
    pub fingerprint: u64,
    /// Remaining depth the score was searched to.
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TranspositionEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(
        &mut self,
        fingerprint: u64,
        depth: u8,
        score: i32,
        bound: Bound,
        best_move: Option<Move>,
    ) {
        self.entries.insert(
            fingerprint,
            TranspositionEntry {
                fingerprint,
                depth,
                score,
                bound,
                best_move,
            },
        );
    }

    /// Entry usable as a search result for `depth` and window `(alpha, beta)`.
    pub fn lookup(
        &self,
        fingerprint: u64,
        depth: u8,
        alpha: i32,
        beta: i32,
    ) -> Option<&TranspositionEntry> {
        let entry = self.entries.get(&fingerprint)?;
        if entry.depth < depth {
            return None;
        }
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Upper => entry.score <= alpha,
            Bound::Lower => entry.score >= beta,
        };
        usable.then_some(entry)
    }

    /// Raw entry regardless of depth and bound, for move ordering.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_key(&self, fingerprint: u64) -> Option<&TranspositionEntry> {
        self.entries.get(&fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
