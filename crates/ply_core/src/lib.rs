pub mod attacks;
pub mod board;
pub mod bonuses;
pub mod error;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod notation;
pub mod perft;
pub mod player;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use attacks::AttackBoard;
pub use board::Board;
pub use bonuses::SquareBonuses;
pub use error::{BonusError, FenError, MoveError};
pub use game::{Game, START_FEN};
pub use movegen::GenOptions;
pub use moves::{Captured, Move, MoveType, PREFERRED_MOVE_BONUS};
pub use perft::{divide, perft};
pub use player::PlayerState;
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait, implemented by every search engine built on this core
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Score in centipawns from the side to move's perspective
    pub score: i32,
    /// Search depth requested
    pub depth: u8,
    /// Number of nodes searched, quiescence included
    pub nodes: u64,
    /// The move came from an opening book instead of a search
    pub from_book: bool,
}

/// Trait that all chess engines must implement.
pub trait Engine: Send {
    /// Search the position to `depth` plies.
    ///
    /// The game is borrowed mutably for apply/unapply during the search and
    /// is returned to the position it was given in.
    fn search(&mut self, game: &mut Game, depth: u8) -> SearchResult;

    /// Returns the engine's name
    fn name(&self) -> &str;

    /// Returns the engine's author
    fn author(&self) -> &str {
        "ply"
    }

    /// Reset internal state for a new game (clear hash tables, statistics, etc.)
    fn new_game(&mut self) {}
}
