//! Perft timing over the positions of `tests/standard.epd`.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p ply_core -- [depth] [fen]
//!
//! With no FEN every EPD position is counted at `depth` (default 3) and the
//! total is checked against the reference count when the EPD line has one.
//! Works under `cargo flamegraph --example perft_bench` as well.

use std::env;
use std::time::{Duration, Instant};

use ply_core::{perft, Game, SquareBonuses};

const POSITIONS: &str = include_str!("../tests/standard.epd");

struct Sample {
    nodes: u64,
    elapsed: Duration,
}

impl Sample {
    fn take(game: &mut Game, depth: u8) -> Sample {
        let start = Instant::now();
        let nodes = perft(game, depth);
        Sample {
            nodes,
            elapsed: start.elapsed(),
        }
    }

    fn nps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 { self.nodes as f64 / secs } else { 0.0 }
    }
}

/// FEN and, when listed, the reference count at `depth`.
fn epd_positions(depth: u8) -> Vec<(&'static str, Option<u64>)> {
    let key = format!("D{depth}");
    POSITIONS
        .lines()
        .filter_map(|line| {
            let mut fields = line.split(';');
            let fen = fields.next()?.trim();
            if fen.is_empty() {
                return None;
            }
            let expected = fields.find_map(|field| {
                let (k, nodes) = field.trim().split_once(' ')?;
                (k == key).then(|| nodes.trim().parse().ok()).flatten()
            });
            Some((fen, expected))
        })
        .collect()
}

fn load(fen: &str) -> Option<Game> {
    // bonuses on, so the evaluation bookkeeping is part of the profile
    match Game::from_fen_with_bonuses(fen, Some(SquareBonuses::standard())) {
        Ok(game) => Some(game),
        Err(e) => {
            eprintln!("skipping {fen}: {e}");
            None
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    let positions = match args.get(2) {
        Some(fen) => vec![(fen.as_str(), None)],
        None => epd_positions(depth),
    };

    println!("perft depth {depth}, {} position(s)", positions.len());
    let mut nodes = 0u64;
    let mut elapsed = Duration::ZERO;
    let mut mismatches = 0;

    for (fen, expected) in positions {
        let Some(mut game) = load(fen) else {
            continue;
        };
        let sample = Sample::take(&mut game, depth);
        let verdict = match expected {
            Some(n) if n == sample.nodes => "ok",
            Some(_) => {
                mismatches += 1;
                "MISMATCH"
            }
            None => "-",
        };
        println!(
            "{:>12} nodes {:>9.3?} {:>11.0} nps  {verdict:<8} {fen}",
            sample.nodes,
            sample.elapsed,
            sample.nps()
        );
        nodes += sample.nodes;
        elapsed += sample.elapsed;
    }

    let total = Sample { nodes, elapsed };
    println!("total {} nodes in {:.3?} ({:.0} nps)", total.nodes, total.elapsed, total.nps());
    if mismatches > 0 {
        eprintln!("{mismatches} count(s) differ from the reference");
        std::process::exit(1);
    }
}
