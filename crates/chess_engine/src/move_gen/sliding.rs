//! Sliding piece move generation
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//!
//! ## Algorithm
//!
//! Walk outward along each direction one square at a time:
//! 1. Empty square: valid destination, keep walking
//! 2. Opponent piece: valid capture, stop this direction
//! 3. Own piece: not a destination, stop this direction
//! 4. Board edge: stop this direction

use crate::board::Board;
use crate::constants::Delta;
use crate::types::{Color, Square};

pub(super) fn generate_sliding_moves(
    board: &Board,
    from: Square,
    color: Color,
    dirs: &[Delta],
    moves: &mut Vec<Square>,
) {
    for &dir in dirs {
        let mut current = from.offset(dir);
        while let Some(to) = current {
            match board.piece_at(to) {
                None => moves.push(to),
                Some(piece) => {
                    if piece.color != color {
                        moves.push(to);
                    }
                    break;
                }
            }
            current = to.offset(dir);
        }
    }
}

/// Whether a slider on `from` reaches `target` along one of `dirs` with every square
/// strictly between them empty. The target itself may be occupied.
pub(super) fn can_slide_to(board: &Board, from: Square, dirs: &[Delta], target: Square) -> bool {
    for &dir in dirs {
        let mut current = from.offset(dir);
        while let Some(sq) = current {
            if sq == target {
                return true;
            }
            if !board.is_empty(sq) {
                break;
            }
            current = sq.offset(dir);
        }
    }
    false
}

/// Same as [`can_slide_to`] on an empty board.
pub(super) fn on_open_ray(from: Square, dirs: &[Delta], target: Square) -> bool {
    can_slide_to(&Board::empty(), from, dirs, target)
}
