//! A single ply and the only code that mutates game state.
//!
//! `apply` and `unapply` must nest like a stack: a move is unapplied exactly
//! once, after its own apply, with every later move already unapplied. The
//! generator and the search both follow that discipline.

use std::cell::OnceCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::types::{CastlingRights, Color, PieceId, PieceKind, Square};

/// Ordering bonus for the move a previous search found best in this position.
pub const PREFERRED_MOVE_BONUS: i32 = 10_000;

/// What a piece would find on a destination square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    OutOfBounds,
    SelfOccupied,
    Capture,
    OpenSquare,
}

/// Snapshot of a captured piece, enough to put it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Captured {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceKind,
    /// Where the piece stood. Differs from the destination for en passant.
    pub square: Square,
}

#[derive(Clone, Debug)]
pub struct Move {
    pub piece: PieceId,
    pub color: Color,
    /// Type of the moving piece before the move (a pawn, when promoting).
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub captured: Option<Captured>,
    /// Ordering heuristic, higher is searched first.
    pub score_guess: i32,
    /// Square a double pawn step passes over.
    pub en_passant_target: Option<Square>,
    pub(crate) castling_rook_move: Option<Box<Move>>,
    pub(crate) castling_before: CastlingRights,
    pub(crate) castling_after: CastlingRights,
    pub(crate) prev_en_passant: Option<Square>,
    /// Evaluation delta of this move alone, excluding a castling rook.
    pub(crate) evaluation: i32,
    notation: OnceCell<String>,
}

impl Move {
    /// Move of `piece` to `to`, capturing the enemy piece standing there if any.
    pub(crate) fn new(
        game: &Game,
        piece: PieceId,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Move {
        let board = game.board();
        let color = board.piece(piece).color;
        let captured = board.get(to).map(|id| {
            let victim = board.piece(id);
            debug_assert_ne!(victim.color, color, "move onto own piece");
            Captured {
                id,
                color: victim.color,
                kind: victim.kind,
                square: victim.square,
            }
        });
        Self::build(game, piece, to, promotion, captured)
    }

    /// Pawn capture onto the en-passant square; the victim stands beside the mover.
    pub(crate) fn en_passant(game: &Game, piece: PieceId, to: Square, victim: PieceId) -> Move {
        let v = game.board().piece(victim);
        let captured = Captured {
            id: victim,
            color: v.color,
            kind: v.kind,
            square: v.square,
        };
        Self::build(game, piece, to, None, Some(captured))
    }

    fn build(
        game: &Game,
        piece: PieceId,
        to: Square,
        promotion: Option<PieceKind>,
        captured: Option<Captured>,
    ) -> Move {
        let p = *game.board().piece(piece);
        let en_passant_target = (p.kind == PieceKind::Pawn && (to.rank - p.square.rank).abs() == 2)
            .then(|| Square::new((to.rank + p.square.rank) / 2, p.square.file));
        let rights = game.castling_rights();
        let mut mv = Move {
            piece,
            color: p.color,
            kind: p.kind,
            from: p.square,
            to,
            promotion,
            captured,
            score_guess: 0,
            en_passant_target,
            castling_rook_move: None,
            castling_before: rights,
            castling_after: rights,
            prev_en_passant: game.en_passant(),
            evaluation: 0,
            notation: OnceCell::new(),
        };
        mv.evaluation = game.board().evaluate(&mv);
        mv.score_guess = mv.guess_score(game);
        mv
    }

    /// Plain relocation used for the rook half of castling.
    fn relocation(game: &Game, piece: PieceId, to: Square) -> Move {
        let p = *game.board().piece(piece);
        let mut mv = Move {
            piece,
            color: p.color,
            kind: p.kind,
            from: p.square,
            to,
            promotion: None,
            captured: None,
            score_guess: 0,
            en_passant_target: None,
            castling_rook_move: None,
            castling_before: CastlingRights::NONE,
            castling_after: CastlingRights::NONE,
            prev_en_passant: None,
            evaluation: 0,
            notation: OnceCell::new(),
        };
        mv.evaluation = game.board().evaluate(&mv);
        mv
    }

    fn guess_score(&self, game: &Game) -> i32 {
        let mut score = 0;
        if let Some(cap) = &self.captured {
            score += 10 * cap.kind.material() - self.kind.material();
        }
        if let Some(promo) = self.promotion {
            score += promo.material();
        }
        if game
            .player(self.color.other())
            .attack_board()
            .is_pawn_attacked(self.to)
        {
            score -= self.kind.material();
        }
        score
    }

    #[inline]
    pub fn kind_after(&self) -> PieceKind {
        self.promotion.unwrap_or(self.kind)
    }

    pub fn move_type(&self) -> MoveType {
        if self.captured.is_some() {
            MoveType::Capture
        } else {
            MoveType::OpenSquare
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castling(&self) -> bool {
        self.kind == PieceKind::King && (self.to.file - self.from.file).abs() == 2
    }

    pub fn is_en_passant(&self) -> bool {
        self.captured.is_some_and(|cap| cap.square != self.to)
    }

    /// The rook relocation of a castling move, present only while applied.
    pub fn castling_rook_move(&self) -> Option<&Move> {
        self.castling_rook_move.as_deref()
    }

    pub fn castling_before(&self) -> CastlingRights {
        self.castling_before
    }

    pub fn castling_after(&self) -> CastlingRights {
        self.castling_after
    }

    pub fn apply(&mut self, game: &mut Game) {
        debug_assert_eq!(game.board.get(self.from), Some(self.piece), "stale move {self:?}");
        self.castling_before = game.castling_rights();
        self.prev_en_passant = game.en_passant;

        if let Some(cap) = self.captured {
            game.players[cap.color.idx()].remove(cap.id, cap.kind);
            game.board.set(cap.square, None);
        }

        game.en_passant = self.en_passant_target;

        self.relocate(game);

        if self.is_castling() {
            let king_side = self.to.file > self.from.file;
            let rook_from = Square::new(self.from.rank, if king_side { 7 } else { 0 });
            let rook_to = Square::new(
                self.to.rank,
                if king_side { self.to.file - 1 } else { self.to.file + 1 },
            );
            if let Some(rook) = game.board.get(rook_from) {
                let rook_move = Move::relocation(game, rook, rook_to);
                rook_move.relocate(game);
                self.castling_rook_move = Some(Box::new(rook_move));
            }
        }

        self.castling_after = game.castling_rights();
        game.side_to_move = game.side_to_move.other();
        game.refresh_attack_boards();
        game.board.track(self, false);
    }

    pub fn unapply(&mut self, game: &mut Game) {
        debug_assert_eq!(game.board.get(self.to), Some(self.piece), "unapply without apply");
        if let Some(rook) = &self.castling_rook_move {
            rook.unrelocate(game);
        }

        self.unrelocate(game);

        if let Some(cap) = self.captured {
            game.board.set(cap.square, Some(cap.id));
            game.players[cap.color.idx()].add(cap.id, cap.kind);
        }

        game.en_passant = self.prev_en_passant;
        game.side_to_move = game.side_to_move.other();
        game.refresh_attack_boards();
        game.board.track(self, true);
        self.castling_rook_move = None;
    }

    fn relocate(&self, game: &mut Game) {
        game.board.set(self.from, None);
        game.board.set(self.to, Some(self.piece));
        if let Some(promo) = self.promotion {
            game.players[self.color.idx()].retype(self.piece, self.kind, promo);
        }
        let piece = game.board.piece_mut(self.piece);
        piece.square = self.to;
        piece.kind = self.kind_after();
        piece.times_moved += 1;
    }

    fn unrelocate(&self, game: &mut Game) {
        game.board.set(self.to, None);
        game.board.set(self.from, Some(self.piece));
        if let Some(promo) = self.promotion {
            game.players[self.color.idx()].retype(self.piece, promo, self.kind);
        }
        let piece = game.board.piece_mut(self.piece);
        piece.square = self.from;
        piece.kind = self.kind;
        piece.times_moved -= 1;
    }

    /// Short algebraic notation without disambiguation or check marks,
    /// e.g. `Nf3`, `exd6`, `e8=Q`, `O-O-O`.
    pub fn notation(&self) -> &str {
        self.notation.get_or_init(|| {
            if self.is_castling() {
                return if self.to.file > self.from.file {
                    "O-O".to_string()
                } else {
                    "O-O-O".to_string()
                };
            }
            let mut s = String::with_capacity(6);
            match self.kind {
                PieceKind::Pawn => {
                    if self.is_capture() {
                        s.push(self.from.file_char());
                        s.push('x');
                    }
                }
                kind => {
                    s.push(kind.symbol().to_ascii_uppercase());
                    if self.is_capture() {
                        s.push('x');
                    }
                }
            }
            s.push_str(&self.to.to_string());
            if let Some(promo) = self.promotion {
                s.push('=');
                s.push(promo.symbol().to_ascii_uppercase());
            }
            s
        })
    }

    /// Coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn uci(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(promo) = self.promotion {
            s.push(promo.symbol());
        }
        s
    }
}

/// Same piece, same destination, same promotion. Capture and origin are
/// deliberately not compared.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece && self.to == other.to && self.promotion == other.promotion
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod moves_tests;
