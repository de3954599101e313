//! Negamax search with alpha-beta pruning
//!
//! Scores are from the point of view of the side to move at each node. The
//! game is mutated by apply/unapply along the current path only, so the
//! position is back where it started whenever a call returns.

use ply_core::{Color, Game, GenOptions, Move};

use crate::tt::{Bound, TranspositionTable};

/// Bound of the root window. No reachable score gets this far.
pub const INFINITY: i32 = 1_000_000;

/// Base score of a checkmate. The remaining depth is added so faster mates
/// score higher, and the total stays well inside the root window.
pub const MATE_SCORE: i32 = 100_000;

/// Counters for a single `best_move` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, quiescence included
    pub nodes: u64,
    /// Transposition-table lookups that ended a subtree
    pub tt_hits: u64,
}

/// State shared by every node of one search.
pub struct Searcher<'a> {
    pub tt: &'a mut TranspositionTable,
    pub stats: &'a mut SearchStats,
}

impl Searcher<'_> {
    /// Negamax over `color`'s moves to `depth` plies, returning the best
    /// move found and its score within `(alpha, beta)`.
    ///
    /// On a beta cutoff no move is returned and the score is `beta`.
    pub fn search(
        &mut self,
        game: &mut Game,
        color: Color,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> (Option<Move>, i32) {
        self.stats.nodes += 1;
        let fingerprint = game.fingerprint();

        if let Some(entry) = self.tt.lookup(fingerprint, depth, alpha, beta) {
            self.stats.tt_hits += 1;
            return (entry.best_move.clone(), entry.score);
        }

        if depth == 0 {
            return self.quiesce(game, color, alpha, beta);
        }

        let preferred = self
            .tt
            .from_key(fingerprint)
            .and_then(|entry| entry.best_move.clone());
        let moves =
            game.generate_all_legal_moves_with(color, GenOptions::LEGAL, preferred.as_ref());

        if moves.is_empty() {
            if game.in_check(color) {
                return (None, -(MATE_SCORE + depth as i32));
            }
            return (None, 0);
        }

        let mut best: Option<Move> = None;
        for mut mv in moves {
            mv.apply(game);
            let (_, reply) = self.search(game, color.other(), depth - 1, -beta, -alpha);
            let score = -reply;
            mv.unapply(game);

            if score >= beta {
                self.tt.store(fingerprint, depth, beta, Bound::Lower, Some(mv));
                return (None, beta);
            }
            if score > alpha {
                alpha = score;
                best = Some(mv);
            }
        }

        let bound = if best.is_some() {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.tt.store(fingerprint, depth, alpha, bound, best.clone());
        (best, alpha)
    }

    /// Captures-only search past the horizon, starting from a stand-pat
    /// static evaluation.
    pub fn quiesce(
        &mut self,
        game: &mut Game,
        color: Color,
        mut alpha: i32,
        beta: i32,
    ) -> (Option<Move>, i32) {
        self.stats.nodes += 1;

        let stand_pat = color.perspective() * game.evaluation();
        if stand_pat >= beta {
            return (None, beta);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let captures = game.generate_all_legal_moves_with(color, GenOptions::CAPTURES, None);
        let mut best: Option<Move> = None;
        for mut mv in captures {
            mv.apply(game);
            let (_, reply) = self.quiesce(game, color.other(), -beta, -alpha);
            let score = -reply;
            mv.unapply(game);

            if score >= beta {
                return (None, beta);
            }
            if score > alpha {
                alpha = score;
                best = Some(mv);
            }
        }
        (best, alpha)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
