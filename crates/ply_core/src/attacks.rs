//! Per-player attack maps.
//!
//! An attack board marks every square a player's pieces attack, whatever
//! stands there, and separately the squares attacked by that player's pawns.
//! Check detection reads the first grid, move ordering reads the second.
//! Boards are rebuilt from scratch after every apply and unapply.

use crate::board::Board;
use crate::types::{Piece, PieceKind, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttackBoard {
    full: [[bool; 8]; 8],
    pawns: [[bool; 8]; 8],
}

impl AttackBoard {
    /// Builds the attack map of `pieces` on `board`.
    pub fn build<'a>(board: &Board, pieces: impl IntoIterator<Item = &'a Piece>) -> Self {
        let mut attacks = AttackBoard::default();
        for piece in pieces {
            attacks.mark_piece(board, piece);
        }
        attacks
    }

    #[inline]
    pub fn is_attacked(&self, sq: Square) -> bool {
        self.full[sq.rank as usize][sq.file as usize]
    }

    #[inline]
    pub fn is_pawn_attacked(&self, sq: Square) -> bool {
        self.pawns[sq.rank as usize][sq.file as usize]
    }

    /// Number of attacked squares.
    pub fn count(&self) -> usize {
        self.full.iter().flatten().filter(|&&a| a).count()
    }

    fn mark(&mut self, sq: Square) {
        self.full[sq.rank as usize][sq.file as usize] = true;
    }

    fn mark_piece(&mut self, board: &Board, piece: &Piece) {
        let from = piece.square;
        match piece.kind {
            PieceKind::Pawn => {
                let dir = piece.color.pawn_direction();
                for df in [1, -1] {
                    if let Some(sq) = from.offset(dir, df) {
                        self.mark(sq);
                        self.pawns[sq.rank as usize][sq.file as usize] = true;
                    }
                }
            }
            PieceKind::Knight => self.mark_steps(from, &KNIGHT_OFFSETS),
            PieceKind::Bishop => self.mark_rays(board, from, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.mark_rays(board, from, &ROOK_DIRECTIONS),
            PieceKind::Queen => {
                self.mark_rays(board, from, &ROOK_DIRECTIONS);
                self.mark_rays(board, from, &BISHOP_DIRECTIONS);
            }
            PieceKind::King => self.mark_steps(from, &KING_OFFSETS),
        }
    }

    fn mark_steps(&mut self, from: Square, offsets: &[(i8, i8)]) {
        for &(dr, df) in offsets {
            if let Some(sq) = from.offset(dr, df) {
                self.mark(sq);
            }
        }
    }

    fn mark_rays(&mut self, board: &Board, from: Square, directions: &[(i8, i8)]) {
        for &(dr, df) in directions {
            let mut cur = from;
            while let Some(sq) = cur.offset(dr, df) {
                self.mark(sq);
                if board.get(sq).is_some() {
                    break;
                }
                cur = sq;
            }
        }
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
