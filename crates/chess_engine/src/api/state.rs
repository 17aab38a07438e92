//! Whole-position queries: legal move lists and game-ending status

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::move_gen::{generate_pseudo_legal_moves, is_in_check};
use crate::types::{Color, Move, Rights};

use super::moves::check_and_apply;

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

/// Every move `side` may legally play, promotions expanded to one entry per choice.
pub fn legal_moves(board: &Board, rights: &Rights, side: Color) -> Vec<Move> {
    generate_pseudo_legal_moves(board, rights, side)
        .into_iter()
        .filter(|&mv| check_and_apply(board, rights, side, mv).is_ok())
        .collect()
}

/// Whether `side` has at least one legal move. Stops at the first one found.
pub fn has_any_legal_move(board: &Board, rights: &Rights, side: Color) -> bool {
    generate_pseudo_legal_moves(board, rights, side)
        .into_iter()
        .any(|mv| check_and_apply(board, rights, side, mv).is_ok())
}

pub fn position_status(board: &Board, rights: &Rights, side: Color) -> PositionStatus {
    if has_any_legal_move(board, rights, side) {
        PositionStatus::Ongoing
    } else if is_in_check(board, side) {
        PositionStatus::Checkmate
    } else {
        PositionStatus::Stalemate
    }
}
