//! Attack detection and square checking
//!
//! Critical for legality: check detection, "moving into check", and the castling rule that
//! the king may not pass through an attacked square.
//!
//! ## Algorithm
//!
//! To check if a square is attacked, iterate through the attacking side's pieces and ask each
//! one whether it attacks the target ([`crate::types::PieceKind::attacks_square`]). Pawns count
//! only their capture diagonals; kings count only adjacent squares.

use crate::board::Board;
use crate::types::{Color, Square};

/// Check if a square is under attack by pieces of `by_color`
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|(from, piece)| piece.kind.attacks_square(board, from, by_color, square))
}

/// Check if the king of `color` is in check. A board without that king is never "in check".
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opponent()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::types::Piece;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn board_with(pieces: &[(&str, i8)]) -> Board {
        let mut board = Board::empty();
        for &(name, code) in pieces {
            board.set(sq(name), Piece::from_code(code));
        }
        board
    }

    #[test]
    fn test_rook_gives_check_along_file() {
        let board = board_with(&[("e1", W_KING), ("e8", B_ROOK), ("a8", B_KING)]);
        assert!(is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn test_interposed_piece_blocks_check() {
        let board = board_with(&[("e1", W_KING), ("e4", W_BISHOP), ("e8", B_ROOK), ("a8", B_KING)]);
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn test_pawn_attacks_diagonally_not_forward() {
        let board = board_with(&[("e4", W_KING), ("d5", B_PAWN), ("a8", B_KING)]);
        assert!(is_in_check(&board, Color::White));

        let board = board_with(&[("e4", W_KING), ("e5", B_PAWN), ("a8", B_KING)]);
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn test_knight_and_king_attacks() {
        let board = board_with(&[("e1", W_KING), ("f3", B_KNIGHT), ("h8", B_KING)]);
        assert!(is_in_check(&board, Color::White));
        assert!(is_square_attacked(&board, sq("d2"), Color::White));
        assert!(!is_square_attacked(&board, sq("e3"), Color::White));
    }

    #[test]
    fn test_starting_position_middle_ranks() {
        let board = Board::standard();
        assert!(is_square_attacked(&board, sq("e3"), Color::White));
        assert!(!is_square_attacked(&board, sq("e4"), Color::White));
        assert!(is_square_attacked(&board, sq("f6"), Color::Black));
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn test_missing_king_is_not_in_check() {
        assert!(!is_in_check(&Board::empty(), Color::Black));
    }
}
