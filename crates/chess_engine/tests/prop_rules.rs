//! Property-based tests for the rules engine.
//!
//! Random playouts pick a legal move at each ply by index, so every generated game is legal
//! by construction.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use chess_engine::{legal_moves, replay, validate, Color, Move, Piece, PieceKind, Position, Square};

/// Play up to `choices.len()` plies, each choosing among the current legal moves.
fn playout(choices: &[u16]) -> (Position, Vec<Move>) {
    let mut position = Position::standard();
    let mut played = Vec::new();
    for &choice in choices {
        let moves = legal_moves(&position.board, &position.rights, position.side_to_move);
        if moves.is_empty() {
            break;
        }
        let mv = moves[choice as usize % moves.len()];
        position = position.play(mv).unwrap().0;
        played.push(mv);
    }
    (position, played)
}

fn any_square() -> impl Strategy<Value = Square> {
    (0u8..64).prop_map(|i| Square::from_index(i).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Each side keeps exactly one king through any legal playout.
    #[test]
    fn prop_one_king_per_side(choices in prop::collection::vec(any::<u16>(), 0..80)) {
        let mut position = Position::standard();
        for choice in choices {
            let moves = legal_moves(&position.board, &position.rights, position.side_to_move);
            if moves.is_empty() {
                break;
            }
            position = position.play(moves[choice as usize % moves.len()]).unwrap().0;
            for color in Color::ALL {
                prop_assert_eq!(position.board.count(Piece::new(color, PieceKind::King)), 1);
            }
        }
    }

    /// Replaying the recorded move list reproduces the final position.
    #[test]
    fn prop_replay_reproduces_playout(choices in prop::collection::vec(any::<u16>(), 0..80)) {
        let (position, played) = playout(&choices);
        prop_assert_eq!(replay(&played).unwrap(), position);
    }

    /// Identical inputs always yield the identical verdict, legal or not.
    #[test]
    fn prop_validate_is_deterministic(
        choices in prop::collection::vec(any::<u16>(), 0..40),
        from in any_square(),
        to in any_square(),
    ) {
        let (position, _) = playout(&choices);
        let mv = Move::new(from, to);
        let first = validate(&position.board, &position.rights, position.side_to_move, mv);
        let second = validate(&position.board, &position.rights, position.side_to_move, mv);
        prop_assert_eq!(first, second);
    }

    /// A move is in the legal list exactly when validate accepts it.
    #[test]
    fn prop_legal_moves_agree_with_validate(
        choices in prop::collection::vec(any::<u16>(), 0..40),
        from in any_square(),
        to in any_square(),
    ) {
        let (position, _) = playout(&choices);
        let side = position.side_to_move;
        let listed = legal_moves(&position.board, &position.rights, side);
        let mv = Move::new(from, to);
        let accepted = validate(&position.board, &position.rights, side, mv).is_ok();
        prop_assert_eq!(listed.contains(&mv), accepted);
    }
}
