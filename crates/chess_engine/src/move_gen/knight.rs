//! Knight move generation
//!
//! Knights jump in an L-shape (2+1 or 1+2 squares), so nothing between origin and
//! destination matters. Only the destination square is inspected.

use crate::board::Board;
use crate::constants::KNIGHT_DIRS;
use crate::types::{Color, Square};

pub(super) fn generate_knight_moves(
    board: &Board,
    from: Square,
    color: Color,
    moves: &mut Vec<Square>,
) {
    for &dir in &KNIGHT_DIRS {
        if let Some(to) = from.offset(dir) {
            // Valid if destination is empty or contains opponent piece
            if !board.belongs_to(to, color) {
                moves.push(to);
            }
        }
    }
}

pub(super) fn can_knight_attack(from: Square, to: Square) -> bool {
    let col_diff = (to.file() - from.file()).abs();
    let row_diff = (to.rank() - from.rank()).abs();
    (col_diff == 2 && row_diff == 1) || (col_diff == 1 && row_diff == 2)
}
