//! Board and piece store.
//!
//! The board owns every piece of the game in an append-only store and maps
//! squares to piece ids. A captured piece stays in the store (its id must
//! survive for unapply) but no square points at it.
//!
//! The board also carries the two running values every move updates:
//! the material + positional evaluation (centipawns, White positive) and
//! the position fingerprint.

use crate::bonuses::SquareBonuses;
use crate::moves::Move;
use crate::types::{Color, Piece, PieceId, PieceKind, Square};
use crate::zobrist::ZOBRIST;

#[derive(Clone, Debug)]
pub struct Board {
    squares: [Option<PieceId>; 64],
    pieces: Vec<Piece>,
    bonuses: Option<SquareBonuses>,
    evaluation: i32,
    fingerprint: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Board {
    pub fn new(bonuses: Option<SquareBonuses>) -> Self {
        Self {
            squares: [None; 64],
            pieces: Vec::with_capacity(32),
            bonuses,
            evaluation: 0,
            fingerprint: 0,
        }
    }

    #[inline]
    pub fn in_bounds(rank: i8, file: i8) -> bool {
        Square::in_bounds(rank, file)
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<PieceId> {
        self.squares[sq.idx()]
    }

    #[inline]
    pub(crate) fn set(&mut self, sq: Square, id: Option<PieceId>) {
        self.squares[sq.idx()] = id;
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.get(sq).map(|id| self.piece(id))
    }

    /// Places a new piece on its square and returns its id.
    pub(crate) fn add_piece(&mut self, piece: Piece) -> PieceId {
        debug_assert!(self.pieces.len() < u8::MAX as usize);
        let id = PieceId(self.pieces.len() as u8);
        self.squares[piece.square.idx()] = Some(id);
        self.pieces.push(piece);
        id
    }

    /// Pieces currently standing on the board.
    pub fn live_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten().map(|&id| self.piece(id))
    }

    pub fn bonuses(&self) -> Option<&SquareBonuses> {
        self.bonuses.as_ref()
    }

    pub(crate) fn set_bonuses(&mut self, bonuses: Option<SquareBonuses>) {
        self.bonuses = bonuses;
        self.evaluation = self.full_evaluation();
    }

    pub fn lookup_bonus(&self, kind: PieceKind, color: Color, sq: Square) -> i32 {
        match &self.bonuses {
            Some(bonuses) => bonuses.lookup(kind, color, sq),
            None => 0,
        }
    }

    /// Signed contribution of a (hypothetical) piece to the evaluation.
    pub fn piecewise_evaluation(&self, kind: PieceKind, color: Color, sq: Square) -> i32 {
        let perspective = color.perspective();
        perspective * kind.material() + perspective * self.lookup_bonus(kind, color, sq)
    }

    pub fn piece_evaluation(&self, piece: &Piece) -> i32 {
        self.piecewise_evaluation(piece.kind, piece.color, piece.square)
    }

    /// Evaluation recomputed from scratch, O(pieces).
    pub fn full_evaluation(&self) -> i32 {
        self.live_pieces().map(|p| self.piece_evaluation(p)).sum()
    }

    /// Change in evaluation `mv` causes, not counting a castling rook.
    ///
    /// A promoting piece is still a pawn on its origin square.
    pub fn evaluate(&self, mv: &Move) -> i32 {
        let after = self.piecewise_evaluation(mv.kind_after(), mv.color, mv.to);
        let before = self.piecewise_evaluation(mv.kind, mv.color, mv.from);
        let captured = mv
            .captured
            .as_ref()
            .map_or(0, |cap| self.piecewise_evaluation(cap.kind, cap.color, cap.square));
        after - before - captured
    }

    /// Running evaluation in centipawns, positive favours White.
    #[inline]
    pub fn evaluation(&self) -> i32 {
        self.evaluation
    }

    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub(crate) fn reset_tracking(&mut self, fingerprint: u64) {
        self.fingerprint = fingerprint;
        self.evaluation = self.full_evaluation();
    }

    /// Folds a move into the fingerprint and evaluation.
    pub(crate) fn track(&mut self, mv: &Move, unapply: bool) {
        self.fingerprint = ZOBRIST.update(self.fingerprint, mv);
        let delta = mv.evaluation + mv.castling_rook_move.as_ref().map_or(0, |r| r.evaluation);
        self.evaluation += if unapply { -delta } else { delta };
    }
}
