use std::collections::BTreeSet;

use crate::attacks::AttackBoard;
use crate::board::Board;
use crate::moves::Move;
use crate::types::{Color, PieceId, PieceKind};

/// One side of the game: its live pieces grouped by type, its attack map
/// and the legal moves cached for its next turn.
#[derive(Clone, Debug)]
pub struct PlayerState {
    color: Color,
    pieces: [BTreeSet<PieceId>; 6],
    attack_board: AttackBoard,
    pub(crate) legal_moves: Vec<Move>,
}

impl PlayerState {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pieces: Default::default(),
            attack_board: AttackBoard::default(),
            legal_moves: Vec::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn attack_board(&self) -> &AttackBoard {
        &self.attack_board
    }

    /// Legal moves as of the last time this side became active.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub(crate) fn add(&mut self, id: PieceId, kind: PieceKind) {
        let inserted = self.pieces[kind.idx()].insert(id);
        debug_assert!(inserted, "piece {id:?} already in {kind:?} set");
    }

    pub(crate) fn remove(&mut self, id: PieceId, kind: PieceKind) {
        let removed = self.pieces[kind.idx()].remove(&id);
        debug_assert!(removed, "piece {id:?} missing from {kind:?} set");
    }

    /// Moves a piece between type sets, e.g. on promotion.
    pub(crate) fn retype(&mut self, id: PieceId, from: PieceKind, to: PieceKind) {
        self.remove(id, from);
        self.add(id, to);
    }

    pub fn find(&self, kind: PieceKind) -> Option<PieceId> {
        self.pieces[kind.idx()].iter().next().copied()
    }

    pub fn find_all(&self, kind: PieceKind) -> impl Iterator<Item = PieceId> + '_ {
        self.pieces[kind.idx()].iter().copied()
    }

    /// Every live piece, grouped by type in `PieceKind::ALL` order.
    pub fn all_pieces(&self) -> Vec<PieceId> {
        self.pieces.iter().flatten().copied().collect()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.iter().map(BTreeSet::len).sum()
    }

    pub(crate) fn refresh_attack_board(&mut self, board: &Board) {
        self.attack_board = AttackBoard::build(
            board,
            self.pieces.iter().flatten().map(|&id| board.piece(id)),
        );
    }
}
