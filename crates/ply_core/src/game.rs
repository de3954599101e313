//! The game aggregate.
//!
//! `Game` owns the board, both players and the per-position state that is
//! not a piece: side to move, en-passant target and move history. Pieces
//! carry only plain data; everything else is looked up through the game.

use tracing::debug;

use crate::board::Board;
use crate::bonuses::SquareBonuses;
use crate::moves::Move;
use crate::player::PlayerState;
use crate::types::{CastlingRights, Color, Piece, PieceId, PieceKind, Square};
use crate::zobrist::ZOBRIST;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug)]
struct HistoryEntry {
    mv: Move,
    halfmove_clock: u32,
    fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) players: [PlayerState; 2],
    pub(crate) side_to_move: Color,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    history: Vec<HistoryEntry>,
}

impl Default for Game {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Game {
    pub fn startpos() -> Self {
        Self::from_fen(START_FEN).expect("start position FEN is valid")
    }

    /// Start position evaluated with `bonuses`.
    pub fn with_bonuses(bonuses: SquareBonuses) -> Self {
        let mut game = Self::startpos();
        game.set_bonuses(Some(bonuses));
        game
    }

    pub(crate) fn empty(bonuses: Option<SquareBonuses>) -> Self {
        Self {
            board: Board::new(bonuses),
            players: [PlayerState::new(Color::White), PlayerState::new(Color::Black)],
            side_to_move: Color::White,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    pub(crate) fn place(&mut self, piece: Piece) -> PieceId {
        let id = self.board.add_piece(piece);
        self.players[piece.color.idx()].add(id, piece.kind);
        id
    }

    /// Derives attack maps, fingerprint, evaluation and the active player's
    /// legal moves once every piece is placed.
    pub(crate) fn finish_setup(&mut self) {
        self.refresh_attack_boards();
        let key = self.recomputed_fingerprint();
        self.board.reset_tracking(key);
        self.refresh_legal_moves();
    }

    /// Fingerprint hashed from scratch. Matches `fingerprint()` as long as
    /// every move went through apply/unapply.
    pub fn recomputed_fingerprint(&self) -> u64 {
        ZOBRIST.position_key(
            &self.board,
            self.side_to_move,
            self.castling_rights(),
            self.en_passant,
        )
    }

    /// Replaces the square-bonus tables and recomputes the evaluation.
    pub fn set_bonuses(&mut self, bonuses: Option<SquareBonuses>) {
        self.board.set_bonuses(bonuses);
        self.refresh_legal_moves();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self, color: Color) -> &PlayerState {
        &self.players[color.idx()]
    }

    pub fn active_player(&self) -> &PlayerState {
        self.player(self.side_to_move)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.board.fingerprint()
    }

    /// Running evaluation in centipawns, positive favours White.
    #[inline]
    pub fn evaluation(&self) -> i32 {
        self.board.evaluation()
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        self.board.piece(id)
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.board.piece_at(sq)
    }

    pub fn piece_id_at(&self, sq: Square) -> Option<PieceId> {
        self.board.get(sq)
    }

    /// Castling availability implied by the times-moved counters: an unmoved
    /// king and an unmoved rook on its rank.
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::NONE;
        for color in Color::ALL {
            let player = &self.players[color.idx()];
            let Some(king_id) = player.find(PieceKind::King) else {
                continue;
            };
            let king = self.board.piece(king_id);
            if king.times_moved != 0 {
                continue;
            }
            for rook_id in player.find_all(PieceKind::Rook) {
                let rook = self.board.piece(rook_id);
                if rook.times_moved == 0 && rook.square.rank == king.square.rank {
                    rights.set(color, rook.square.file > king.square.file);
                }
            }
        }
        rights
    }

    pub fn in_check(&self, color: Color) -> bool {
        let Some(king) = self.players[color.idx()].find(PieceKind::King) else {
            return false;
        };
        self.players[color.other().idx()]
            .attack_board()
            .is_attacked(self.board.piece(king).square)
    }

    /// Side to move has no legal move and its king is attacked.
    pub fn is_checkmate(&mut self) -> bool {
        let color = self.side_to_move;
        self.in_check(color) && self.generate_all_legal_moves(color).is_empty()
    }

    /// Side to move has no legal move and its king is not attacked.
    pub fn is_stalemate(&mut self) -> bool {
        let color = self.side_to_move;
        !self.in_check(color) && self.generate_all_legal_moves(color).is_empty()
    }

    pub(crate) fn refresh_attack_boards(&mut self) {
        let board = &self.board;
        for player in self.players.iter_mut() {
            player.refresh_attack_board(board);
        }
    }

    /// Regenerates the cached legal moves of the side to move.
    pub fn refresh_legal_moves(&mut self) {
        let color = self.side_to_move;
        let moves = self.generate_all_legal_moves(color);
        self.players[color.idx()].legal_moves = moves;
    }

    /// Plays `mv` for good: applies it, records it in the history and
    /// refreshes the new side's legal moves.
    pub fn make_move(&mut self, mut mv: Move) {
        debug_assert_eq!(mv.color, self.side_to_move, "move played out of turn");
        let entry_halfmove = self.halfmove_clock;
        let entry_fullmove = self.fullmove_number;
        let resets_clock = mv.kind == PieceKind::Pawn || mv.is_capture();

        mv.apply(self);

        self.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        if mv.color == Color::Black {
            self.fullmove_number += 1;
        }
        debug!(
            mv = %mv,
            fen = %self.to_fen(),
            fingerprint = self.fingerprint(),
            "move committed"
        );
        self.history.push(HistoryEntry {
            mv,
            halfmove_clock: entry_halfmove,
            fullmove_number: entry_fullmove,
        });
        self.refresh_legal_moves();
    }

    /// Takes back the last committed move.
    pub fn undo_last_move(&mut self) -> Option<Move> {
        let HistoryEntry {
            mut mv,
            halfmove_clock,
            fullmove_number,
        } = self.history.pop()?;
        mv.unapply(self);
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
        debug!(
            mv = %mv,
            fingerprint = self.fingerprint(),
            "move taken back"
        );
        self.refresh_legal_moves();
        Some(mv)
    }

    /// Committed moves, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Move> + '_ {
        self.history.iter().map(|entry| &entry.mv)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
