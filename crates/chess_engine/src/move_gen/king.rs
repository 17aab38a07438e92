//! King move generation
//!
//! ## King Movement Rules
//!
//! - One square in any direction onto an empty or opponent-occupied square
//! - Castling, as a compound king + rook move, when:
//!   - the side still holds the castling right for that rook (neither piece has moved)
//!   - the king stands on its start square and the rook on its corner
//!   - every square between them is empty
//!
//! Castling's attack conditions (not in check, path not attacked) are enforced in
//! [`crate::api::validate`], since they concern legality rather than the movement pattern.

use crate::board::Board;
use crate::constants::{KING_DIRS, KING_START_FILE};
use crate::types::{CastleSide, Color, Piece, PieceKind, Rights, Square};

pub(super) fn generate_king_moves(
    board: &Board,
    from: Square,
    color: Color,
    rights: &Rights,
    moves: &mut Vec<Square>,
) {
    for &dir in &KING_DIRS {
        if let Some(to) = from.offset(dir) {
            if !board.belongs_to(to, color) {
                moves.push(to);
            }
        }
    }

    for side in [CastleSide::KingSide, CastleSide::QueenSide] {
        if from == king_start(color) && castling_prerequisites(board, rights, color, side) {
            moves.push(Square::at(side.king_target_file(), color.back_rank()));
        }
    }
}

pub(super) fn can_king_attack(from: Square, to: Square) -> bool {
    from != to && (to.file() - from.file()).abs() <= 1 && (to.rank() - from.rank()).abs() <= 1
}

fn king_start(color: Color) -> Square {
    Square::at(KING_START_FILE, color.back_rank())
}

/// Which castling move `from -> to` denotes for a king of `color`, if any.
pub(crate) fn castle_side_for(color: Color, from: Square, to: Square) -> Option<CastleSide> {
    if from != king_start(color) || to.rank() != color.back_rank() {
        return None;
    }
    [CastleSide::KingSide, CastleSide::QueenSide]
        .into_iter()
        .find(|side| to.file() == side.king_target_file())
}

/// Right still held, king and rook on their start squares, squares between them empty.
pub(crate) fn castling_prerequisites(
    board: &Board,
    rights: &Rights,
    color: Color,
    side: CastleSide,
) -> bool {
    if !rights.castling.has(color, side) {
        return false;
    }
    let rank = color.back_rank();
    let king_home =
        board.piece_at(king_start(color)) == Some(Piece::new(color, PieceKind::King));
    let rook_home = board.piece_at(Square::at(side.rook_file(), rank))
        == Some(Piece::new(color, PieceKind::Rook));
    if !king_home || !rook_home {
        return false;
    }

    let (lo, hi) = if side.rook_file() < KING_START_FILE {
        (side.rook_file() + 1, KING_START_FILE)
    } else {
        (KING_START_FILE + 1, side.rook_file())
    };
    (lo..hi).all(|file| board.is_empty(Square::at(file, rank)))
}
