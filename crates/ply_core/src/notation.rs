//! FEN setup and move text.
//!
//! FEN castling fields are translated into times-moved counters: every king
//! and rook starts as "moved" and the pieces named by the castling field are
//! reset to unmoved. Move text is resolved against the current legal moves,
//! so the returned move always carries correct capture and castling data.

use crate::bonuses::SquareBonuses;
use crate::error::{FenError, MoveError};
use crate::game::Game;
use crate::moves::Move;
use crate::types::{Color, Piece, PieceKind, Square};

impl Game {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_with_bonuses(fen, None)
    }

    pub fn from_fen_with_bonuses(
        fen: &str,
        bonuses: Option<SquareBonuses>,
    ) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut game = Game::empty(bonuses);

        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(FenError::RankWidth {
                            rank: 8 - rank_idx,
                            files: file + 1,
                        });
                    }
                    game.place(Piece::new(color, kind, Square::new(rank, file)));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth {
                        rank: 8 - rank_idx,
                        files: file,
                    });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth {
                    rank: 8 - rank_idx,
                    files: file,
                });
            }
        }

        for color in Color::ALL {
            if game.players[color.idx()].find(PieceKind::King).is_none() {
                return Err(FenError::MissingKing(color));
            }
        }

        game.side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::SideToMove(stm_part.to_string())),
        };

        game.apply_castling_field(castle_part)?;

        game.en_passant = if ep_part == "-" {
            None
        } else {
            Some(
                ep_part
                    .parse::<Square>()
                    .map_err(|_| FenError::EnPassant(ep_part.to_string()))?,
            )
        };

        game.halfmove_clock = halfmove_part
            .parse()
            .map_err(|_| FenError::Counter(halfmove_part.to_string()))?;
        game.fullmove_number = fullmove_part
            .parse()
            .map_err(|_| FenError::Counter(fullmove_part.to_string()))?;

        game.finish_setup();
        Ok(game)
    }

    fn apply_castling_field(&mut self, field: &str) -> Result<(), FenError> {
        for color in Color::ALL {
            let player = &self.players[color.idx()];
            let ids: Vec<_> = player
                .find_all(PieceKind::King)
                .chain(player.find_all(PieceKind::Rook))
                .collect();
            for id in ids {
                self.board.piece_mut(id).times_moved = 1;
            }
        }
        if field == "-" {
            return Ok(());
        }

        for right in field.chars() {
            let (color, king_side) = match right {
                'K' => (Color::White, true),
                'Q' => (Color::White, false),
                'k' => (Color::Black, true),
                'q' => (Color::Black, false),
                _ => return Err(FenError::CastlingChar(right)),
            };
            let missing = FenError::CastlingPieces { right, color };
            let rank = color.back_rank();
            let king = self.players[color.idx()]
                .find(PieceKind::King)
                .filter(|&id| self.board.piece(id).square.rank == rank)
                .ok_or_else(|| missing.clone())?;
            let corner = Square::new(rank, if king_side { 7 } else { 0 });
            let rook = self
                .board
                .get(corner)
                .filter(|&id| {
                    let p = self.board.piece(id);
                    p.color == color && p.kind == PieceKind::Rook
                })
                .ok_or(missing)?;
            self.board.piece_mut(king).times_moved = 0;
            self.board.piece_mut(rook).times_moved = 0;
        }
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::with_capacity(64);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board.piece_at(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        format!(
            "{} {} {} {} {} {}",
            placement,
            self.side_to_move.abbr(),
            self.castling_rights(),
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Resolves coordinate (`e2e4`, `e7e8q`) or algebraic (`Nf3`, `exd5`,
    /// `e8=Q`, `O-O`) move text against the side to move's legal moves.
    ///
    /// A promotion without a piece letter means a queen.
    pub fn find_move(&mut self, text: &str) -> Result<Move, MoveError> {
        let text = text.trim();
        if text.is_empty() || !text.is_ascii() {
            return Err(MoveError::InvalidNotation(text.to_string()));
        }
        let legal = self.generate_all_legal_moves(self.side_to_move);

        let candidates: Vec<Move> = if let Some((from, to, promo)) = parse_coordinate(text) {
            legal
                .into_iter()
                .filter(|mv| mv.from == from && mv.to == to && promotion_matches(mv, promo))
                .collect()
        } else {
            let query = parse_algebraic(text)?;
            legal.into_iter().filter(|mv| query.matches(mv)).collect()
        };

        let mut candidates = candidates;
        match candidates.len() {
            0 => Err(MoveError::NotFound(text.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => Err(MoveError::Ambiguous(text.to_string())),
        }
    }
}

fn promotion_matches(mv: &Move, wanted: Option<PieceKind>) -> bool {
    match (mv.promotion, wanted) {
        (None, None) => true,
        (Some(promo), None) => promo == PieceKind::Queen,
        (promo, wanted) => promo == wanted,
    }
}

fn parse_promotion(c: char) -> Option<PieceKind> {
    PieceKind::from_char(c).filter(|kind| !matches!(kind, PieceKind::Pawn | PieceKind::King))
}

fn parse_coordinate(text: &str) -> Option<(Square, Square, Option<PieceKind>)> {
    if !(text.len() == 4 || text.len() == 5) {
        return None;
    }
    let from = text[0..2].parse::<Square>().ok()?;
    let to = text[2..4].parse::<Square>().ok()?;
    let promo = match text[4..].chars().next() {
        Some(c) => Some(parse_promotion(c)?),
        None => None,
    };
    Some((from, to, promo))
}

#[derive(Debug)]
enum AlgebraicQuery {
    Castle { king_side: bool },
    Piece {
        kind: PieceKind,
        to: Square,
        from_file: Option<i8>,
        from_rank: Option<i8>,
        promotion: Option<PieceKind>,
    },
}

impl AlgebraicQuery {
    fn matches(&self, mv: &Move) -> bool {
        match *self {
            AlgebraicQuery::Castle { king_side } => {
                mv.is_castling() && (mv.to.file > mv.from.file) == king_side
            }
            AlgebraicQuery::Piece {
                kind,
                to,
                from_file,
                from_rank,
                promotion,
            } => {
                mv.kind == kind
                    && mv.to == to
                    && from_file.is_none_or(|f| mv.from.file == f)
                    && from_rank.is_none_or(|r| mv.from.rank == r)
                    && promotion_matches(mv, promotion)
            }
        }
    }
}

fn parse_algebraic(text: &str) -> Result<AlgebraicQuery, MoveError> {
    let invalid = || MoveError::InvalidNotation(text.to_string());
    let san = text.trim_end_matches(['+', '#', '!', '?']);

    match san {
        "O-O" | "0-0" => return Ok(AlgebraicQuery::Castle { king_side: true }),
        "O-O-O" | "0-0-0" => return Ok(AlgebraicQuery::Castle { king_side: false }),
        _ => {}
    }

    let mut chars: Vec<char> = san.chars().collect();

    let mut promotion = None;
    if let Some(eq) = chars.iter().position(|&c| c == '=') {
        if eq + 2 != chars.len() {
            return Err(invalid());
        }
        promotion = Some(parse_promotion(chars[eq + 1]).ok_or_else(invalid)?);
        chars.truncate(eq);
    } else if chars.len() > 2
        && let Some(&last) = chars.last()
        && last.is_ascii_uppercase()
    {
        promotion = Some(parse_promotion(last).ok_or_else(invalid)?);
        chars.pop();
    }

    let kind = match chars.first() {
        Some(&c) if "NBRQK".contains(c) => {
            chars.remove(0);
            PieceKind::from_char(c).ok_or_else(invalid)?
        }
        _ => PieceKind::Pawn,
    };

    if chars.len() < 2 {
        return Err(invalid());
    }
    let dest: String = chars[chars.len() - 2..].iter().collect();
    let to = dest.parse::<Square>().map_err(|_| invalid())?;

    let mut from_file = None;
    let mut from_rank = None;
    for &c in chars[..chars.len() - 2].iter().filter(|&&c| c != 'x') {
        match c {
            'a'..='h' if from_file.is_none() => from_file = Some((c as u8 - b'a') as i8),
            '1'..='8' if from_rank.is_none() => from_rank = Some((c as u8 - b'1') as i8),
            _ => return Err(invalid()),
        }
    }

    Ok(AlgebraicQuery::Piece {
        kind,
        to,
        from_file,
        from_rank,
        promotion,
    })
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
