use super::*;

#[test]
fn test_best_move_from_start() {
    let mut engine = NegamaxEngine::with_seed(2, 1);
    let mut game = Game::startpos();
    let fen = game.to_fen();
    let mv = engine.best_move(&mut game).expect("a move");
    assert_eq!(mv.color, ply_core::Color::White);
    assert!(engine.stats().nodes > 0);
    assert_eq!(game.to_fen(), fen);
    assert!(!engine.tt().is_empty());
}

#[test]
fn test_no_move_when_game_is_over() {
    let mut engine = NegamaxEngine::new(2);
    let mut game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let result = engine.search(&mut game, 2);
    assert!(result.best_move.is_none());
    assert_eq!(result.score, 0);
}

#[test]
fn test_book_short_circuits_search() {
    let mut book = OpeningBook::new();
    book.add_line(&["e4", "e5"]).unwrap();
    book.add_line(&["d4", "d5"]).unwrap();

    let mut engine = NegamaxEngine::with_seed(4, 99).with_book(book);
    let mut game = Game::startpos();
    for _ in 0..10 {
        let result = engine.search(&mut game, 4);
        assert!(result.from_book);
        assert_eq!(result.nodes, 0);
        let mv = result.best_move.unwrap();
        assert!(["e4", "d4"].contains(&mv.notation()));
    }
    assert!(engine.tt().is_empty());
}

#[test]
fn test_seeded_book_choice_is_reproducible() {
    let mut book = OpeningBook::new();
    for first in ["e4", "d4", "c4", "Nf3"] {
        book.add_line(&[first]).unwrap();
    }
    let picks = |seed| {
        let mut engine = NegamaxEngine::with_seed(1, seed).with_book(book.clone());
        let mut game = Game::startpos();
        (0..5)
            .map(|_| engine.best_move(&mut game).unwrap().uci())
            .collect::<Vec<_>>()
    };
    assert_eq!(picks(3), picks(3));
}

#[test]
fn test_unplayable_book_move_falls_back_to_search() {
    let fp = Game::startpos().fingerprint();
    // e2 to e5 is not a legal move
    let json = format!(
        r#"{{"{fp}": [{{"origin": {{"rank": 1, "file": 4}}, "destination": {{"rank": 4, "file": 4}}, "move_type": "open_square"}}]}}"#
    );
    let book = OpeningBook::from_json_str(&json).unwrap();
    let mut engine = NegamaxEngine::with_seed(1, 5).with_book(book);
    let mut game = Game::startpos();
    let result = engine.search(&mut game, 1);
    assert!(!result.from_book);
    assert!(result.best_move.is_some());
    assert!(result.nodes > 0);
}

#[test]
fn test_new_game_clears_table() {
    let mut engine = NegamaxEngine::new(2);
    let mut game = Game::startpos();
    engine.search(&mut game, 2);
    assert!(!engine.tt().is_empty());
    engine.new_game();
    assert!(engine.tt().is_empty());
    assert_eq!(engine.stats(), SearchStats::default());
}

#[test]
fn test_engine_identity() {
    let engine = NegamaxEngine::default();
    assert_eq!(engine.name(), "Negamax v1.0");
    assert_eq!(engine.author(), "ply");
    assert_eq!(engine.depth(), 3);
}

#[test]
fn test_depth_is_at_least_one() {
    let mut engine = NegamaxEngine::new(0);
    assert_eq!(engine.depth(), 1);
    engine.set_depth(0);
    assert_eq!(engine.depth(), 1);
}
