//! End-to-end engine behaviour
//!
//! These tests drive `NegamaxEngine` through the `Engine` trait against real
//! positions: forced mates, colour-mirrored positions, table soundness and
//! short self-play games.

use negamax_engine::{
    Bound, EngineConfig, NegamaxEngine, OpeningBook, Searcher, SearchStats, TranspositionTable,
    INFINITY, MATE_SCORE,
};
use ply_core::{Color, Engine, Game, SquareBonuses};

/// The same position with ranks flipped and colours swapped.
fn mirror_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let swap = |s: &str| -> String {
        s.chars()
            .map(|c| {
                if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect()
    };
    let placement: Vec<String> = fields[0].split('/').rev().map(swap).collect();
    let side = if fields[1] == "w" { "b" } else { "w" };
    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let mut rights: Vec<char> = swap(fields[2]).chars().collect();
        rights.sort_by_key(|c| (c.is_ascii_lowercase(), *c != 'K' && *c != 'k'));
        rights.into_iter().collect()
    };
    let ep = match fields[3] {
        "-" => "-".to_string(),
        sq => {
            let file = &sq[..1];
            let rank = if &sq[1..] == "3" { "6" } else { "3" };
            format!("{file}{rank}")
        }
    };
    format!("{} {} {} {} 0 1", placement.join("/"), side, castling, ep)
}

fn game_with_bonuses(fen: &str) -> Game {
    Game::from_fen_with_bonuses(fen, Some(SquareBonuses::standard())).unwrap()
}

#[test]
fn mirror_helper_round_trips() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 0 1";
    assert_eq!(mirror_fen(&mirror_fen(fen)), fen);
    let mirrored = game_with_bonuses(&mirror_fen(fen));
    assert_eq!(mirrored.evaluation(), -game_with_bonuses(fen).evaluation());
}

#[test]
fn finds_back_rank_mate() {
    let mut engine = NegamaxEngine::with_seed(2, 0);
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1").unwrap();
    let result = engine.search(&mut game, 2);
    let mv = result.best_move.expect("mating move");
    assert_eq!(mv.uci(), "e1e8");
    assert_eq!(result.score, MATE_SCORE + 1);

    game.make_move(mv);
    assert!(game.is_checkmate());
}

#[test]
fn prefers_faster_mate() {
    // Qe8 mates at once; deeper searches must still pick it
    let mut engine = NegamaxEngine::with_seed(3, 0);
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    let result = engine.search(&mut game, 3);
    assert_eq!(result.best_move.unwrap().uci(), "e1e8");
    assert_eq!(result.score, MATE_SCORE + 2);
}

#[test]
fn avoids_losing_the_queen() {
    // the queen on d4 is attacked by the pawn on e5
    let mut engine = NegamaxEngine::with_seed(2, 0);
    let mut game = game_with_bonuses("4k3/8/8/4p3/3Q4/8/8/4K3 w - - 0 1");
    let result = engine.search(&mut game, 2);
    let mv = result.best_move.unwrap();
    assert_eq!(mv.kind, ply_core::PieceKind::Queen);
    assert!(result.score > 500);
}

#[test]
fn negamax_is_colour_symmetric() {
    for fen in [
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ] {
        let mut game = game_with_bonuses(fen);
        let mut mirrored = game_with_bonuses(&mirror_fen(fen));

        let a = NegamaxEngine::with_seed(2, 0).search(&mut game, 2);
        let b = NegamaxEngine::with_seed(2, 0).search(&mut mirrored, 2);
        assert_eq!(a.score, b.score, "asymmetric score for {fen}");
    }
}

#[test]
fn exact_entries_match_fresh_searches() {
    let mut game =
        game_with_bonuses("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 0 1");
    let mut tt = TranspositionTable::new();
    let mut stats = SearchStats::default();
    let color = game.side_to_move();
    let (_, root_score) = Searcher {
        tt: &mut tt,
        stats: &mut stats,
    }
    .search(&mut game, color, 2, -INFINITY, INFINITY);

    let fresh = |game: &mut Game, depth: u8| {
        let mut tt = TranspositionTable::new();
        let mut stats = SearchStats::default();
        let color = game.side_to_move();
        Searcher {
            tt: &mut tt,
            stats: &mut stats,
        }
        .search(game, color, depth, -INFINITY, INFINITY)
        .1
    };

    let root = tt.from_key(game.fingerprint()).unwrap();
    assert_eq!(root.bound, Bound::Exact);
    assert_eq!(root.score, root_score);
    assert_eq!(fresh(&mut game, 2), root_score);

    let mut checked = 0;
    for mut mv in game.generate_all_legal_moves(color) {
        mv.apply(&mut game);
        if let Some(entry) = tt.from_key(game.fingerprint()) {
            if entry.bound == Bound::Exact {
                assert_eq!(fresh(&mut game, entry.depth), entry.score, "after {}", mv.uci());
                checked += 1;
            }
        }
        mv.unapply(&mut game);
    }
    assert!(checked > 0);
}

#[test]
fn self_play_keeps_state_consistent() {
    let mut white = NegamaxEngine::with_seed(1, 11);
    let mut black = NegamaxEngine::with_seed(2, 12);
    let mut game = Game::with_bonuses(SquareBonuses::standard());

    for _ in 0..16 {
        let engine = match game.side_to_move() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let Some(mv) = engine.best_move(&mut game) else {
            break;
        };
        game.make_move(mv);
        assert_eq!(game.fingerprint(), game.recomputed_fingerprint());
        assert_eq!(game.evaluation(), game.board().full_evaluation());
    }
    assert!(game.history().count() > 0);
}

#[test]
fn engine_built_from_config_uses_book() {
    let dir = std::env::temp_dir();
    let book_path = dir.join(format!("negamax_engine_book_{}.json", std::process::id()));
    let mut book = OpeningBook::new();
    book.add_line(&["e4", "c5", "Nf3"]).unwrap();
    book.save(&book_path).unwrap();

    let config = EngineConfig {
        search_depth: 2,
        book_file: Some(book_path.clone()),
        rng_seed: Some(42),
        ..EngineConfig::default()
    };
    let mut game = config.build_game().unwrap();
    let mut engine = config.build_engine().unwrap();
    std::fs::remove_file(&book_path).ok();

    for expected in ["e4", "c5", "Nf3"] {
        let result = engine.search(&mut game, config.search_depth);
        assert!(result.from_book);
        let mv = result.best_move.unwrap();
        assert_eq!(mv.notation(), expected);
        game.make_move(mv);
    }

    // out of book: the engine searches
    let result = engine.search(&mut game, config.search_depth);
    assert!(!result.from_book);
    assert!(result.nodes > 0);
}
