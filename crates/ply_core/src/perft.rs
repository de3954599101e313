use crate::game::Game;
use crate::movegen::GenOptions;

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(game: &mut Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let color = game.side_to_move();
    let moves = game.generate_all_legal_moves_with(color, GenOptions::LEGAL, None);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mut mv in moves {
        mv.apply(game);
        nodes += perft(game, depth - 1);
        mv.unapply(game);
    }
    nodes
}

/// Node counts below each root move, in coordinate notation.
pub fn divide(game: &mut Game, depth: u8) -> Vec<(String, u64)> {
    let color = game.side_to_move();
    let moves = game.generate_all_legal_moves(color);
    let mut out = Vec::with_capacity(moves.len());
    for mut mv in moves {
        mv.apply(game);
        let nodes = perft(game, depth.saturating_sub(1));
        mv.unapply(game);
        out.push((mv.uci(), nodes));
    }
    out
}
