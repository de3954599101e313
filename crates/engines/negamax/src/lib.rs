//! Negamax Chess Engine
//!
//! Fixed-depth alpha-beta search over the `ply_core` game model with:
//! - Quiescence search over captures at the horizon
//! - A transposition table that persists across moves of one game
//! - An opening book consulted before any search

pub mod book;
pub mod config;
pub mod error;
pub mod search;
pub mod tt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use ply_core::{Engine, Game, Move, SearchResult};

pub use book::{BookMove, OpeningBook, PieceDescriptor};
pub use config::EngineConfig;
pub use error::{BookError, ConfigError};
pub use search::{SearchStats, Searcher, INFINITY, MATE_SCORE};
pub use tt::{Bound, TranspositionEntry, TranspositionTable};

/// Negamax engine with a transposition table and an optional opening book.
#[derive(Debug)]
pub struct NegamaxEngine {
    depth: u8,
    tt: TranspositionTable,
    book: Option<OpeningBook>,
    rng: StdRng,
    stats: SearchStats,
}

impl NegamaxEngine {
    pub fn new(depth: u8) -> Self {
        Self::with_rng(depth, StdRng::from_entropy())
    }

    /// Engine whose book choices are reproducible.
    pub fn with_seed(depth: u8, seed: u64) -> Self {
        Self::with_rng(depth, StdRng::seed_from_u64(seed))
    }

    fn with_rng(depth: u8, rng: StdRng) -> Self {
        Self {
            depth: depth.max(1),
            tt: TranspositionTable::new(),
            book: None,
            rng,
            stats: SearchStats::default(),
        }
    }

    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = Some(book);
        self
    }

    pub fn set_book(&mut self, book: Option<OpeningBook>) {
        self.book = book;
    }

    pub fn book(&self) -> Option<&OpeningBook> {
        self.book.as_ref()
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.depth = depth.max(1);
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Counters of the last search
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Move for the side to move at the configured depth, or `None` when the
    /// game is already over.
    pub fn best_move(&mut self, game: &mut Game) -> Option<Move> {
        let depth = self.depth;
        self.think(game, depth).best_move
    }

    fn think(&mut self, game: &mut Game, depth: u8) -> SearchResult {
        self.stats = SearchStats::default();
        let color = game.side_to_move();
        let legal = game.generate_all_legal_moves(color);

        if legal.is_empty() {
            let score = if game.in_check(color) { -MATE_SCORE } else { 0 };
            return SearchResult {
                best_move: None,
                score,
                depth,
                nodes: 0,
                from_book: false,
            };
        }

        if let Some(mv) = self.book_move(game, &legal) {
            return SearchResult {
                best_move: Some(mv),
                score: 0,
                depth,
                nodes: 0,
                from_book: true,
            };
        }

        let (found, score) = Searcher {
            tt: &mut self.tt,
            stats: &mut self.stats,
        }
        .search(game, color, depth, -INFINITY, INFINITY);

        // Entries found through a transposition may name pieces by another
        // path's ids, so the move is matched by squares.
        let resolved = found.and_then(|mv| {
            legal
                .iter()
                .find(|m| m.from == mv.from && m.to == mv.to && m.promotion == mv.promotion)
                .cloned()
        });
        let best = match resolved {
            Some(mv) => mv,
            None => {
                warn!(
                    fen = %game.to_fen(),
                    depth,
                    "search returned no move, falling back to the first legal move"
                );
                legal[0].clone()
            }
        };

        info!(
            depth,
            score,
            nodes = self.stats.nodes,
            tt_hits = self.stats.tt_hits,
            best = %best,
            "search finished"
        );

        SearchResult {
            best_move: Some(best),
            score,
            depth,
            nodes: self.stats.nodes,
            from_book: false,
        }
    }

    fn book_move(&mut self, game: &Game, legal: &[Move]) -> Option<Move> {
        let book = self.book.as_ref()?;
        let candidates = book.candidates(game.fingerprint());
        if candidates.is_empty() {
            return None;
        }

        let mut playable = Vec::with_capacity(candidates.len());
        for record in candidates {
            match record.resolve(legal) {
                Some(mv) => playable.push(mv),
                None => warn!(
                    fingerprint = game.fingerprint(),
                    origin = %record.origin,
                    destination = %record.destination,
                    "book move is not legal here, ignoring it"
                ),
            }
        }

        let chosen = playable.choose(&mut self.rng)?;
        debug!(mv = %chosen, candidates = candidates.len(), "book move chosen");
        Some((*chosen).clone())
    }
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default().search_depth)
    }
}

impl Engine for NegamaxEngine {
    fn search(&mut self, game: &mut Game, depth: u8) -> SearchResult {
        self.think(game, depth.max(1))
    }

    fn name(&self) -> &str {
        "Negamax v1.0"
    }

    fn new_game(&mut self) {
        self.tt.clear();
        self.stats = SearchStats::default();
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
