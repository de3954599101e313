//! Error types for the chess core
//!
//! Only input arriving from outside the engine can fail: starting-position
//! strings, square-bonus files and move text. Queries against a live game
//! (generation, check status, apply/unapply) never fail.

use thiserror::Error;

use crate::types::Color;

/// Errors raised while parsing a FEN starting-position string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("Invalid FEN: expected at least 4 fields, found {0}")]
    MissingFields(usize),

    #[error("Invalid FEN board section: expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("Invalid FEN rank {rank}: expected 8 files, found {files}")]
    RankWidth { rank: usize, files: i8 },

    #[error("Invalid piece char in FEN: {0}")]
    InvalidPiece(char),

    #[error("Invalid side to move in FEN: {0}")]
    SideToMove(String),

    #[error("Invalid castling char in FEN: {0}")]
    CastlingChar(char),

    #[error("Castling right {right} needs an unmoved {color} king and rook on the back rank")]
    CastlingPieces { right: char, color: Color },

    #[error("Invalid en passant square in FEN: {0}")]
    EnPassant(String),

    #[error("Invalid move counter in FEN: {0}")]
    Counter(String),

    #[error("Position is missing the {0} king")]
    MissingKing(Color),
}

/// Errors raised while reading a square-bonus table file.
#[derive(Error, Debug)]
pub enum BonusError {
    #[error("failed to read square bonus file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: unknown piece token {token:?}")]
    UnknownPiece { line: usize, token: String },

    #[error("line {line}: bonus values appear before any piece token")]
    MissingPiece { line: usize },

    #[error("line {line}: invalid bonus value {value:?}")]
    InvalidValue { line: usize, value: String },

    #[error("line {line}: expected 8 bonus values, found {found}")]
    RankWidth { line: usize, found: usize },

    #[error("table for {piece} has {found} ranks, expected 8")]
    RankCount { piece: char, found: usize },
}

/// Errors raised when external move text cannot be resolved to a legal move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("invalid move string: {0}")]
    InvalidNotation(String),

    #[error("can't find valid move for move string: {0}")]
    NotFound(String),

    #[error("move string {0} matches more than one legal move")]
    Ambiguous(String),
}
