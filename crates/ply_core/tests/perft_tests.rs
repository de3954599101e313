//! Perft against the reference node counts in `standard.epd`
//!
//! Each case is counted through `divide`, so a mismatch reports the root
//! moves alongside the total. Deep counts are skipped unless `FULL_PERFT`
//! is set.

use rayon::prelude::*;

use ply_core::{divide, perft, Game, SquareBonuses};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 10_000;

struct PerftCase {
    line: usize,
    fen: String,
    /// `(depth, nodes)`, shallowest first
    counts: Vec<(u8, u64)>,
}

impl PerftCase {
    /// `<fen> ;D1 20 ;D2 400 ...`
    fn parse(line: usize, text: &str) -> Option<PerftCase> {
        let mut fields = text.split(';');
        let fen = fields.next()?.trim();
        if fen.is_empty() {
            return None;
        }
        let mut counts: Vec<(u8, u64)> = fields
            .filter_map(|field| {
                let (key, nodes) = field.trim().split_once(' ')?;
                let depth = key.strip_prefix('D')?.parse().ok()?;
                Some((depth, nodes.trim().parse().ok()?))
            })
            .collect();
        counts.sort_unstable();
        Some(PerftCase {
            line,
            fen: fen.to_string(),
            counts,
        })
    }

    fn root_moves(&self) -> Option<u64> {
        self.counts
            .iter()
            .find(|(depth, _)| *depth == 1)
            .map(|(_, nodes)| *nodes)
    }
}

fn standard_cases() -> Vec<PerftCase> {
    include_str!("standard.epd")
        .lines()
        .enumerate()
        .filter_map(|(idx, text)| PerftCase::parse(idx + 1, text))
        .collect()
}

#[test]
fn every_case_carries_counts() {
    let cases = standard_cases();
    assert_eq!(cases.len(), 6);
    for case in &cases {
        assert!(case.root_moves().is_some(), "line {} has no D1", case.line);
    }
}

#[test]
fn standard_positions_match_reference_counts() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();

    standard_cases().par_iter().for_each(|case| {
        let mut game = Game::from_fen_with_bonuses(&case.fen, Some(SquareBonuses::standard()))
            .unwrap_or_else(|e| panic!("line {}: {e}", case.line));
        let fen = game.to_fen();
        let fingerprint = game.fingerprint();
        let evaluation = game.evaluation();

        for &(depth, expected) in &case.counts {
            if !full && expected > NODE_LIMIT {
                continue;
            }
            let split = divide(&mut game, depth);
            let total: u64 = split.iter().map(|(_, nodes)| nodes).sum();
            assert_eq!(total, expected, "line {} depth {depth}: {split:?}", case.line);
            assert_eq!(split.len() as u64, case.root_moves().unwrap_or_default());

            assert_eq!(game.to_fen(), fen);
            assert_eq!(game.fingerprint(), fingerprint);
            assert_eq!(game.evaluation(), evaluation);
        }
    });
}

#[test]
fn divide_entries_replay_through_move_lookup() {
    let cases = standard_cases();
    let case = &cases[1];
    let mut game = Game::from_fen(&case.fen).unwrap();
    let before = game.to_fen();

    for (uci, nodes) in divide(&mut game, 2) {
        let mv = game.find_move(&uci).unwrap_or_else(|e| panic!("{uci}: {e}"));
        game.make_move(mv);
        assert_eq!(perft(&mut game, 1), nodes, "below {uci}");
        game.undo_last_move();
    }
    assert_eq!(game.to_fen(), before);
}

#[test]
fn divide_sums_to_perft() {
    let mut game = Game::startpos();
    let split = divide(&mut game, 2);
    assert_eq!(split.len(), 20);
    assert!(split.iter().all(|(_, nodes)| *nodes == 20));
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), perft(&mut game, 2));
}

#[test]
fn terminal_and_zero_depth_counts() {
    let fools_mate = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let mut mated = Game::from_fen(fools_mate).unwrap();
    assert_eq!(perft(&mut mated, 0), 1);
    assert_eq!(perft(&mut mated, 1), 0);
    assert_eq!(perft(&mut mated, 3), 0);
    assert!(divide(&mut mated, 2).is_empty());
}
