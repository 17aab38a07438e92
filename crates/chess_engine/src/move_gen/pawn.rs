//! Pawn move generation
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: one square toward the opponent, onto an empty square only
//! - **Double push**: from the starting rank, when both squares ahead are empty. This is the
//!   move that opens an en-passant right for exactly one reply
//! - **Captures**: one square diagonally forward onto an opponent piece, or onto the live
//!   en-passant target
//! - **Promotion**: reaching the last rank requires a promotion choice; that check belongs to
//!   the legality engine because it concerns the move's shape, not reachability

use crate::board::Board;
use crate::types::{Color, Square};

/// Append the squares a pawn on `from` can reach.
pub(super) fn generate_pawn_moves(
    board: &Board,
    from: Square,
    color: Color,
    en_passant: Option<Square>,
    moves: &mut Vec<Square>,
) {
    let forward = color.forward();

    if let Some(one) = from.offset((0, forward)).filter(|&s| board.is_empty(s)) {
        moves.push(one);
        if from.rank() == color.pawn_start_rank() {
            if let Some(two) = one.offset((0, forward)).filter(|&s| board.is_empty(s)) {
                moves.push(two);
            }
        }
    }

    for side in [-1, 1] {
        if let Some(target) = from.offset((side, forward)) {
            if board.belongs_to(target, color.opponent()) || en_passant == Some(target) {
                moves.push(target);
            }
        }
    }
}

/// Pawns attack the two forward diagonals, regardless of what stands there.
pub(super) fn can_pawn_attack(from: Square, color: Color, target: Square) -> bool {
    target.rank() - from.rank() == color.forward() && (target.file() - from.file()).abs() == 1
}

/// Forward one, forward two from the start rank, or one diagonal step forward.
pub(super) fn reaches_on_empty_board(from: Square, to: Square, color: Color) -> bool {
    let dr = to.rank() - from.rank();
    let df = (to.file() - from.file()).abs();
    match df {
        0 => {
            dr == color.forward()
                || (dr == 2 * color.forward() && from.rank() == color.pawn_start_rank())
        }
        1 => dr == color.forward(),
        _ => false,
    }
}
