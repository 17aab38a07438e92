//! Pseudo-legal move generation and attack detection
//!
//! Each [`PieceKind`] exposes the same two capabilities, implemented by matching on the
//! closed enum rather than through trait objects:
//!
//! - [`PieceKind::pseudo_legal_destinations`] - squares the piece could move to, ignoring
//!   whether its own king would be left in check
//! - [`PieceKind::attacks_square`] - whether the piece attacks a target square (pawns use their
//!   capture diagonals, kings never "attack" through castling)
//!
//! Per-kind rules live in the submodules. Whole-side helpers build on top of these.

mod attack;
mod king;
mod knight;
mod pawn;
mod sliding;

pub use attack::{is_in_check, is_square_attacked};
pub(crate) use king::{castle_side_for, castling_prerequisites};

use crate::board::Board;
use crate::constants::*;
use crate::types::{Color, Move, PieceKind, Promotion, Rights, Square};

impl PieceKind {
    /// Squares a piece of this kind standing on `from` could move to.
    ///
    /// Includes en-passant targets for pawns and castling destinations for kings whose
    /// castling prerequisites (rights, rook in place, empty squares between) hold. Attack
    /// conditions on castling and "own king left in check" are the legality engine's job.
    pub fn pseudo_legal_destinations(
        self,
        board: &Board,
        from: Square,
        color: Color,
        rights: &Rights,
    ) -> Vec<Square> {
        let mut out = Vec::with_capacity(28);
        match self {
            PieceKind::Pawn => {
                pawn::generate_pawn_moves(board, from, color, rights.en_passant, &mut out)
            }
            PieceKind::Knight => knight::generate_knight_moves(board, from, color, &mut out),
            PieceKind::Bishop => {
                sliding::generate_sliding_moves(board, from, color, &BISHOP_DIRS, &mut out)
            }
            PieceKind::Rook => {
                sliding::generate_sliding_moves(board, from, color, &ROOK_DIRS, &mut out)
            }
            PieceKind::Queen => {
                sliding::generate_sliding_moves(board, from, color, &BISHOP_DIRS, &mut out);
                sliding::generate_sliding_moves(board, from, color, &ROOK_DIRS, &mut out);
            }
            PieceKind::King => king::generate_king_moves(board, from, color, rights, &mut out),
        }
        out
    }

    /// Whether a piece of this kind on `from` attacks `target`.
    pub fn attacks_square(self, board: &Board, from: Square, color: Color, target: Square) -> bool {
        match self {
            PieceKind::Pawn => pawn::can_pawn_attack(from, color, target),
            PieceKind::Knight => knight::can_knight_attack(from, target),
            PieceKind::Bishop => sliding::can_slide_to(board, from, &BISHOP_DIRS, target),
            PieceKind::Rook => sliding::can_slide_to(board, from, &ROOK_DIRS, target),
            PieceKind::Queen => {
                sliding::can_slide_to(board, from, &BISHOP_DIRS, target)
                    || sliding::can_slide_to(board, from, &ROOK_DIRS, target)
            }
            PieceKind::King => king::can_king_attack(from, target),
        }
    }

    /// Whether `to` lies on this piece's movement pattern from `from` on an empty board.
    /// Used to tell a blocked path apart from a destination the piece can never reach.
    pub(crate) fn reaches_on_empty_board(self, from: Square, to: Square, color: Color) -> bool {
        match self {
            PieceKind::Pawn => pawn::reaches_on_empty_board(from, to, color),
            PieceKind::Knight => knight::can_knight_attack(from, to),
            PieceKind::Bishop => sliding::on_open_ray(from, &BISHOP_DIRS, to),
            PieceKind::Rook => sliding::on_open_ray(from, &ROOK_DIRS, to),
            PieceKind::Queen => {
                sliding::on_open_ray(from, &BISHOP_DIRS, to)
                    || sliding::on_open_ray(from, &ROOK_DIRS, to)
            }
            PieceKind::King => king::can_king_attack(from, to),
        }
    }
}

/// Generate all pseudo-legal moves for a color
///
/// Pawn moves onto the last rank are expanded into one move per promotion choice.
pub fn generate_pseudo_legal_moves(board: &Board, rights: &Rights, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);

    for (from, piece) in board.pieces_of(color) {
        for to in piece.kind.pseudo_legal_destinations(board, from, color, rights) {
            if piece.kind == PieceKind::Pawn && to.rank() == color.promotion_rank() {
                moves.extend(
                    Promotion::ALL
                        .iter()
                        .map(|&p| Move::with_promotion(from, to, p)),
                );
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }

    moves
}
