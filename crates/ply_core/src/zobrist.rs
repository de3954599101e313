//! Zobrist hashing for chess positions.
//!
//! The fingerprint is updated incrementally by every applied move, so two
//! move orders that reach the same placement, side to move, castling rights
//! and en-passant file end on the same key. It is the key of the
//! transposition table and of the opening book.
//!
//! The hash is computed by XOR-ing together random values for:
//! - Each piece on each square (2 colors × 6 kinds × 64 squares)
//! - Black to move (1 value)
//! - Castling rights, one value per KQkq combination (16 values)
//! - En passant file, plus one value for "no en passant square" (9 values)

use crate::board::Board;
use crate::moves::Move;
use crate::types::{CastlingRights, Color, PieceKind, Square};

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Random values for each piece on each square.
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// Random value for black to move (XOR when black's turn)
    pub black_to_move: u64,
    /// Random values indexed by `CastlingRights::index()`
    pub castling: [u64; 16],
    /// Random values for en passant file (0-7), index 8 means none
    pub en_passant: [u64; 9],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate Zobrist keys using a simple PRNG with fixed seed.
    /// Uses xorshift64 for fast, reproducible random numbers.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x2361_9120_0bad_cafeu64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut piece = 0;
            while piece < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][piece][sq] = state;
                    sq += 1;
                }
                piece += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let black_to_move = state;

        let mut castling = [0u64; 16];
        let mut i = 0;
        while i < 16 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 9];
        let mut i = 0;
        while i < 9 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    /// Get the Zobrist key for a piece on a square.
    #[inline(always)]
    pub fn piece_key(&self, color: Color, kind: PieceKind, sq: Square) -> u64 {
        self.pieces[color.idx()][kind.idx()][sq.idx()]
    }

    #[inline(always)]
    pub fn castling_key(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.index()]
    }

    /// Get the Zobrist key for the en passant target's file, or for its absence.
    #[inline(always)]
    pub fn ep_key(&self, target: Option<Square>) -> u64 {
        match target {
            Some(sq) => self.en_passant[sq.file as usize],
            None => self.en_passant[8],
        }
    }

    /// Hash a position from scratch. Used once when a game is set up and by
    /// tests that cross-check the incremental key.
    pub fn position_key(
        &self,
        board: &Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> u64 {
        let mut key = 0;
        for piece in board.live_pieces() {
            key ^= self.piece_key(piece.color, piece.kind, piece.square);
        }
        if side_to_move == Color::Black {
            key ^= self.black_to_move;
        }
        key ^ self.castling_key(castling) ^ self.ep_key(en_passant)
    }

    /// Fold one move into `key`.
    ///
    /// XOR is self-inverse, so applying and unapplying a move both call this
    /// with the same move.
    pub fn update(&self, key: u64, mv: &Move) -> u64 {
        let mut key = key;
        key ^= self.piece_key(mv.color, mv.kind, mv.from);
        if let Some(cap) = &mv.captured {
            // en passant: the captured pawn is not on the destination square
            key ^= self.piece_key(cap.color, cap.kind, cap.square);
        }
        key ^= self.piece_key(mv.color, mv.kind_after(), mv.to);
        if let Some(rook) = &mv.castling_rook_move {
            key ^= self.piece_key(rook.color, rook.kind, rook.from);
            key ^= self.piece_key(rook.color, rook.kind, rook.to);
        }
        key ^= self.black_to_move;
        key ^= self.ep_key(mv.prev_en_passant) ^ self.ep_key(mv.en_passant_target);
        key ^= self.castling_key(mv.castling_before) ^ self.castling_key(mv.castling_after);
        key
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
