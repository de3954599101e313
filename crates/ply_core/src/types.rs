use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// +1 for White, -1 for Black. Scores are kept from White's point of view.
    pub fn perspective(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this side's king and rooks at the start of a game.
    pub fn back_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn abbr(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion candidates, in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Bishop,
    ];

    pub fn idx(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value in centipawns.
    #[inline]
    pub fn material(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 320,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    /// Lowercase FEN letter.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parses a piece letter in either case.
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A board coordinate. `(0, 0)` is a1, `(7, 7)` is h8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub rank: i8,
    pub file: i8,
}

impl Square {
    pub const fn new(rank: i8, file: i8) -> Self {
        Self { rank, file }
    }

    /// Pure range check used before any square access.
    #[inline]
    pub fn in_bounds(rank: i8, file: i8) -> bool {
        (0..8).contains(&rank) && (0..8).contains(&file)
    }

    /// Square reached by stepping `(dr, df)`, if it stays on the board.
    #[inline]
    pub fn offset(self, dr: i8, df: i8) -> Option<Square> {
        let (rank, file) = (self.rank + dr, self.file + df);
        Square::in_bounds(rank, file).then_some(Square { rank, file })
    }

    /// 0..63, a1 = 0, h8 = 63.
    #[inline]
    pub fn idx(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file as u8) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank as u8) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 {
            return Err(());
        }
        let (f, r) = (b[0], b[1]);
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return Err(());
        }
        Ok(Square::new((r - b'1') as i8, (f - b'a') as i8))
    }
}

/// Stable handle of a piece inside the board's piece store.
///
/// A piece keeps its id for the whole game, including across promotion, so
/// moves can refer to it without holding references into the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
    pub times_moved: u32,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Self {
            color,
            kind,
            square,
            times_moved: 0,
        }
    }

    /// FEN letter: uppercase for White.
    pub fn fen_char(&self) -> char {
        match self.color {
            Color::White => self.kind.symbol().to_ascii_uppercase(),
            Color::Black => self.kind.symbol(),
        }
    }
}

/// Which castling moves are still available, derived from the times-moved
/// counters of kings and rooks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    /// 0..15, one bit per right (K=1, Q=2, k=4, q=8).
    pub fn index(self) -> usize {
        (self.wk as usize)
            | (self.wq as usize) << 1
            | (self.bk as usize) << 2
            | (self.bq as usize) << 3
    }

    pub fn set(&mut self, color: Color, king_side: bool) {
        match (color, king_side) {
            (Color::White, true) => self.wk = true,
            (Color::White, false) => self.wq = true,
            (Color::Black, true) => self.bk = true,
            (Color::Black, false) => self.bq = true,
        }
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == CastlingRights::NONE {
            return f.write_str("-");
        }
        for (on, c) in [(self.wk, 'K'), (self.wq, 'Q'), (self.bk, 'k'), (self.bq, 'q')] {
            if on {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
