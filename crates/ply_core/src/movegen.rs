//! Move generation.
//!
//! Moves are generated per piece from its movement rules, then optionally
//! filtered for legality by applying each one and asking whether the mover's
//! king is attacked. Generation borrows the game mutably for that trial
//! apply/unapply but leaves it exactly as it found it.

use crate::attacks::{BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};
use crate::board::Board;
use crate::game::Game;
use crate::moves::{Move, MoveType, PREFERRED_MOVE_BONUS};
use crate::types::{Color, Piece, PieceId, PieceKind, Square};

/// Which moves a generator call returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenOptions {
    /// Drop moves that leave the mover's own king attacked. Castling out of
    /// or through check is only ruled out when this is set.
    pub filter_checks: bool,
    /// Only moves that remove an enemy piece, en passant included.
    pub captures_only: bool,
}

impl GenOptions {
    pub const LEGAL: GenOptions = GenOptions {
        filter_checks: true,
        captures_only: false,
    };

    pub const CAPTURES: GenOptions = GenOptions {
        filter_checks: true,
        captures_only: true,
    };

    pub const PSEUDO_LEGAL: GenOptions = GenOptions {
        filter_checks: false,
        captures_only: false,
    };
}

impl Default for GenOptions {
    fn default() -> Self {
        Self::LEGAL
    }
}

impl Game {
    /// What a `color` piece would find at `(rank, file)`.
    pub fn classify(&self, color: Color, rank: i8, file: i8) -> MoveType {
        if !Board::in_bounds(rank, file) {
            return MoveType::OutOfBounds;
        }
        match self.board.piece_at(Square::new(rank, file)) {
            Some(p) if p.color == color => MoveType::SelfOccupied,
            Some(_) => MoveType::Capture,
            None => MoveType::OpenSquare,
        }
    }

    /// A pawn reaching `rank` promotes.
    pub fn is_promotion_rank(piece: &Piece, rank: i8) -> bool {
        piece.kind == PieceKind::Pawn && rank == piece.color.other().back_rank()
    }

    /// Moves of a single piece.
    pub fn generate_legal_moves(&mut self, piece: PieceId, options: GenOptions) -> Vec<Move> {
        debug_assert_eq!(
            self.board.get(self.board.piece(piece).square),
            Some(piece),
            "generating for a captured piece"
        );
        let pseudo = self.pseudo_moves(piece, options);
        if !options.filter_checks {
            return pseudo;
        }
        let color = self.board.piece(piece).color;
        let mut legal = Vec::with_capacity(pseudo.len());
        for mut mv in pseudo {
            mv.apply(self);
            let exposed = self.in_check(color);
            mv.unapply(self);
            if !exposed {
                legal.push(mv);
            }
        }
        legal
    }

    /// Legal moves of every `color` piece, best guess first.
    pub fn generate_all_legal_moves(&mut self, color: Color) -> Vec<Move> {
        self.generate_all_legal_moves_with(color, GenOptions::LEGAL, None)
    }

    /// Moves of every `color` piece sorted by descending `score_guess`.
    ///
    /// A move equal to `preferred` (typically the transposition-table move)
    /// gets `PREFERRED_MOVE_BONUS` so it is searched first.
    pub fn generate_all_legal_moves_with(
        &mut self,
        color: Color,
        options: GenOptions,
        preferred: Option<&Move>,
    ) -> Vec<Move> {
        let ids = self.players[color.idx()].all_pieces();
        let mut moves = Vec::with_capacity(48);
        for id in ids {
            moves.extend(self.generate_legal_moves(id, options));
        }
        if let Some(preferred) = preferred {
            for mv in moves.iter_mut() {
                if *mv == *preferred {
                    mv.score_guess += PREFERRED_MOVE_BONUS;
                }
            }
        }
        // stable ascending sort reversed: equal guesses come out in reverse
        // generation order
        moves.sort_by_key(|mv| mv.score_guess);
        moves.reverse();
        moves
    }

    fn pseudo_moves(&mut self, id: PieceId, options: GenOptions) -> Vec<Move> {
        let mut out = Vec::new();
        let captures_only = options.captures_only;
        match self.board.piece(id).kind {
            PieceKind::Pawn => self.pawn_moves(id, captures_only, &mut out),
            PieceKind::Knight => self.step_moves(id, &KNIGHT_OFFSETS, captures_only, &mut out),
            PieceKind::Bishop => self.slide_moves(id, &BISHOP_DIRECTIONS, captures_only, &mut out),
            PieceKind::Rook => self.slide_moves(id, &ROOK_DIRECTIONS, captures_only, &mut out),
            PieceKind::Queen => {
                self.slide_moves(id, &ROOK_DIRECTIONS, captures_only, &mut out);
                self.slide_moves(id, &BISHOP_DIRECTIONS, captures_only, &mut out);
            }
            PieceKind::King => {
                self.step_moves(id, &KING_OFFSETS, captures_only, &mut out);
                if !captures_only {
                    self.castling_moves(id, options.filter_checks, &mut out);
                }
            }
        }
        out
    }

    fn pawn_moves(&self, id: PieceId, captures_only: bool, out: &mut Vec<Move>) {
        let pawn = *self.board.piece(id);
        let dir = pawn.color.pawn_direction();

        for df in [1, -1] {
            let Some(to) = pawn.square.offset(dir, df) else {
                continue;
            };
            match self.classify(pawn.color, to.rank, to.file) {
                MoveType::Capture => self.push_pawn_move(id, &pawn, to, out),
                MoveType::OpenSquare if self.en_passant == Some(to) => {
                    let beside = Square::new(pawn.square.rank, to.file);
                    if let Some(victim) = self.board.get(beside) {
                        let v = self.board.piece(victim);
                        if v.color != pawn.color && v.kind == PieceKind::Pawn {
                            out.push(Move::en_passant(self, id, to, victim));
                        }
                    }
                }
                _ => {}
            }
        }

        if captures_only {
            return;
        }
        let Some(one) = pawn.square.offset(dir, 0) else {
            return;
        };
        if self.board.get(one).is_some() {
            return;
        }
        self.push_pawn_move(id, &pawn, one, out);
        if pawn.square.rank == pawn.color.back_rank() + dir
            && let Some(two) = one.offset(dir, 0)
            && self.board.get(two).is_none()
        {
            out.push(Move::new(self, id, two, None));
        }
    }

    fn push_pawn_move(&self, id: PieceId, pawn: &Piece, to: Square, out: &mut Vec<Move>) {
        if Self::is_promotion_rank(pawn, to.rank) {
            for promo in PieceKind::PROMOTIONS {
                out.push(Move::new(self, id, to, Some(promo)));
            }
        } else {
            out.push(Move::new(self, id, to, None));
        }
    }

    fn step_moves(
        &self,
        id: PieceId,
        offsets: &[(i8, i8)],
        captures_only: bool,
        out: &mut Vec<Move>,
    ) {
        let piece = *self.board.piece(id);
        for &(dr, df) in offsets {
            let (rank, file) = (piece.square.rank + dr, piece.square.file + df);
            match self.classify(piece.color, rank, file) {
                MoveType::Capture => out.push(Move::new(self, id, Square::new(rank, file), None)),
                MoveType::OpenSquare if !captures_only => {
                    out.push(Move::new(self, id, Square::new(rank, file), None))
                }
                _ => {}
            }
        }
    }

    fn slide_moves(
        &self,
        id: PieceId,
        directions: &[(i8, i8)],
        captures_only: bool,
        out: &mut Vec<Move>,
    ) {
        let piece = *self.board.piece(id);
        for &(dr, df) in directions {
            let (mut rank, mut file) = (piece.square.rank + dr, piece.square.file + df);
            loop {
                match self.classify(piece.color, rank, file) {
                    MoveType::OutOfBounds | MoveType::SelfOccupied => break,
                    MoveType::Capture => {
                        out.push(Move::new(self, id, Square::new(rank, file), None));
                        break;
                    }
                    MoveType::OpenSquare => {
                        if !captures_only {
                            out.push(Move::new(self, id, Square::new(rank, file), None));
                        }
                    }
                }
                rank += dr;
                file += df;
            }
        }
    }

    /// Castling for an unmoved king: an unmoved corner rook on its rank and
    /// an empty path between them. With `filter_checks` the king must also be
    /// out of check and not pass through an attacked square. Landing in check
    /// is left to the regular legality filter.
    fn castling_moves(&mut self, king_id: PieceId, filter_checks: bool, out: &mut Vec<Move>) {
        let king = *self.board.piece(king_id);
        if king.times_moved != 0 || (filter_checks && self.in_check(king.color)) {
            return;
        }
        let rooks: Vec<PieceId> = self.players[king.color.idx()]
            .find_all(PieceKind::Rook)
            .collect();
        for rook_id in rooks {
            let rook = *self.board.piece(rook_id);
            if rook.times_moved != 0
                || rook.square.rank != king.square.rank
                || !(rook.square.file == 0 || rook.square.file == 7)
            {
                continue;
            }
            let step: i8 = if rook.square.file > king.square.file { 1 } else { -1 };
            let (lo, hi) = if step > 0 {
                (king.square.file, rook.square.file)
            } else {
                (rook.square.file, king.square.file)
            };
            let rank = king.square.rank;
            if (lo + 1..hi).any(|file| self.board.get(Square::new(rank, file)).is_some()) {
                continue;
            }
            let (Some(through), Some(dest)) =
                (king.square.offset(0, step), king.square.offset(0, 2 * step))
            else {
                continue;
            };
            if self.board.get(dest).is_some() {
                continue;
            }

            if filter_checks {
                let mut passing = Move::new(self, king_id, through, None);
                passing.apply(self);
                let crossed_attack = self.in_check(king.color);
                passing.unapply(self);
                if crossed_attack {
                    continue;
                }
            }

            out.push(Move::new(self, king_id, dest, None));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
