use super::*;

fn play(game: &mut Game, moves: &[&str]) {
    for text in moves {
        let mv = game.find_move(text).unwrap();
        game.make_move(mv);
    }
}

#[test]
fn test_startpos_state() {
    let game = Game::startpos();
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.player(Color::White).piece_count(), 16);
    assert_eq!(game.player(Color::Black).piece_count(), 16);
    assert_eq!(game.active_player().legal_moves().len(), 20);
    assert_eq!(game.evaluation(), 0);
    let rights = game.castling_rights();
    assert!(rights.wk && rights.wq && rights.bk && rights.bq);
}

#[test]
fn test_make_and_undo_track_clocks() {
    let mut game = Game::startpos();
    play(&mut game, &["Nf3", "Nf6", "Ng1"]);
    assert_eq!(game.halfmove_clock(), 3);
    assert_eq!(game.fullmove_number(), 2);
    assert_eq!(game.history().count(), 3);

    play(&mut game, &["e5"]);
    assert_eq!(game.halfmove_clock(), 0);
    assert_eq!(game.fullmove_number(), 3);

    let undone = game.undo_last_move().unwrap();
    assert_eq!(undone.to_string(), "e5");
    assert_eq!(game.halfmove_clock(), 3);
    assert_eq!(game.fullmove_number(), 2);
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
fn test_undo_everything_restores_startpos() {
    let mut game = Game::startpos();
    let fen = game.to_fen();
    let fp = game.fingerprint();
    play(&mut game, &["e4", "d5", "exd5", "Qxd5", "Nc3", "Qa5"]);
    while game.undo_last_move().is_some() {}
    assert_eq!(game.to_fen(), fen);
    assert_eq!(game.fingerprint(), fp);
    assert_eq!(game.evaluation(), 0);
    assert!(game.undo_last_move().is_none());
}

#[test]
fn test_moved_king_loses_castling() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut game, &["Kf1", "Kd8", "Ke1", "Ke8"]);
    let rights = game.castling_rights();
    assert!(!rights.wk && !rights.wq && !rights.bk && !rights.bq);
    assert_eq!(game.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w - - 4 3");
}

#[test]
fn test_legal_move_cache_follows_side_to_move() {
    let mut game = Game::startpos();
    play(&mut game, &["e4"]);
    let cached = game.active_player().legal_moves();
    assert_eq!(cached.len(), 20);
    assert!(cached.iter().all(|mv| mv.color == Color::Black));
}

#[test]
fn test_in_check() {
    let mut game = Game::startpos();
    play(&mut game, &["e4", "f5", "Qh5"]);
    assert!(game.in_check(Color::Black));
    assert!(!game.in_check(Color::White));
    assert!(!game.is_checkmate());
}

#[test]
fn test_fools_mate_is_checkmate() {
    let mut game = Game::startpos();
    play(&mut game, &["f3", "e5", "g4", "Qh4"]);
    assert!(game.in_check(Color::White));
    assert!(game.is_checkmate());
    assert!(!game.is_stalemate());
    assert!(game.active_player().legal_moves().is_empty());
}

#[test]
fn test_stalemate() {
    let mut game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(!game.in_check(Color::Black));
    assert!(game.is_stalemate());
    assert!(!game.is_checkmate());
}

#[test]
fn test_set_bonuses_changes_evaluation() {
    let mut game = Game::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(game.evaluation(), 300);
    game.set_bonuses(Some(SquareBonuses::standard()));
    assert_ne!(game.evaluation(), 300);
    assert_eq!(game.evaluation(), game.board().full_evaluation());
}

#[test]
fn test_standard_bonuses_keep_startpos_balanced() {
    let game = Game::with_bonuses(SquareBonuses::standard());
    assert_eq!(game.evaluation(), 0);
}
