//! Piece-square bonus tables.
//!
//! The text format is line oriented: a line holding a single piece letter
//! (`p`, `n`, `b`, `r`, `q`, `k`) followed by eight lines of eight
//! comma-separated integers. Lines are ranks 1..8 as seen from Black's side;
//! White uses the same table flipped vertically. Blank lines are ignored and
//! piece types without a table score zero everywhere.

use std::fs;
use std::path::Path;

use crate::error::BonusError;
use crate::types::{Color, PieceKind, Square};

const STANDARD_TABLES: &str = include_str!("../resources/piece_square_bonuses.txt");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquareBonuses {
    /// Black's perspective, indexed by [piece_kind][rank][file]
    tables: [[[i32; 8]; 8]; 6],
}

impl SquareBonuses {
    /// The tables shipped with the engine.
    pub fn standard() -> Self {
        Self::parse(STANDARD_TABLES).expect("bundled square bonus table is well formed")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BonusError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, BonusError> {
        let mut tables = [[[0i32; 8]; 8]; 6];
        let mut filled = [0usize; 6];
        let mut current: Option<PieceKind> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if text.chars().all(|c| c.is_ascii_alphabetic()) {
                let kind = single_char(text)
                    .and_then(PieceKind::from_char)
                    .ok_or_else(|| BonusError::UnknownPiece {
                        line: line_no,
                        token: text.to_string(),
                    })?;
                if let Some(prev) = current {
                    check_complete(prev, filled[prev.idx()])?;
                }
                current = Some(kind);
                filled[kind.idx()] = 0;
                continue;
            }

            let kind = current.ok_or(BonusError::MissingPiece { line: line_no })?;
            let values = text
                .split(',')
                .map(|v| {
                    let v = v.trim();
                    v.parse::<i32>().map_err(|_| BonusError::InvalidValue {
                        line: line_no,
                        value: v.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if values.len() != 8 {
                return Err(BonusError::RankWidth {
                    line: line_no,
                    found: values.len(),
                });
            }
            let rank = filled[kind.idx()];
            if rank >= 8 {
                return Err(BonusError::RankCount {
                    piece: kind.symbol(),
                    found: rank + 1,
                });
            }
            tables[kind.idx()][rank].copy_from_slice(&values);
            filled[kind.idx()] += 1;
        }

        if let Some(kind) = current {
            check_complete(kind, filled[kind.idx()])?;
        }
        Ok(Self { tables })
    }

    /// Positional bonus in centipawns for `kind` of `color` standing on `sq`.
    #[inline]
    pub fn lookup(&self, kind: PieceKind, color: Color, sq: Square) -> i32 {
        let rank = match color {
            Color::Black => sq.rank,
            Color::White => 7 - sq.rank,
        };
        self.tables[kind.idx()][rank as usize][sq.file as usize]
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn check_complete(kind: PieceKind, found: usize) -> Result<(), BonusError> {
    if found == 8 {
        Ok(())
    } else {
        Err(BonusError::RankCount {
            piece: kind.symbol(),
            found,
        })
    }
}

#[cfg(test)]
#[path = "bonuses_tests.rs"]
mod bonuses_tests;
