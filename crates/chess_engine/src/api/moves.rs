//! Move validation and application
//!
//! [`validate`] is the referee's single rules oracle. It runs, in order:
//!
//! 1. the origin holds a piece of the side to move
//! 2. the promotion choice matches the move's shape (present iff a pawn reaches the last rank)
//! 3. castling: right held, king and rook home, squares between empty, king not in check, and
//!    no square the king crosses or lands on attacked
//! 4. en passant: the destination is the live en-passant target and an opponent pawn stands
//!    beside the capturing pawn
//! 5. otherwise the destination must be in the piece's pseudo-legal set
//! 6. the move is simulated on a copy of the board and refused if the mover's king is left
//!    in check
//!
//! On success the result carries the new board and rights plus derived facts: what was
//! captured, whether the opponent is now in check, checkmated, or stalemated.

use tracing::trace;

use crate::board::Board;
use crate::constants::KING_START_FILE;
use crate::error::{IllegalMove, IllegalMoveReason};
use crate::move_gen::{castle_side_for, castling_prerequisites, is_in_check, is_square_attacked};
use crate::types::{CastleSide, Color, Move, MoveKind, Piece, PieceKind, Position, Rights, Square};

use super::state::has_any_legal_move;

/// A validated move and everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMove {
    pub mv: Move,
    /// The piece as it stood on the origin square (a pawn for promotions).
    pub piece: Piece,
    /// Captured piece, including an en-passant victim.
    pub captured: Option<Piece>,
    pub kind: MoveKind,
    pub board: Board,
    pub rights: Rights,
    /// Opponent's king is attacked after the move.
    pub check: bool,
    /// Opponent is in check with no legal reply.
    pub checkmate: bool,
    /// Opponent is not in check and has no legal reply.
    pub stalemate: bool,
}

impl LegalMove {
    /// Captures and pawn moves reset the fifty-move count.
    pub fn is_progress(&self) -> bool {
        self.captured.is_some() || self.piece.kind == PieceKind::Pawn
    }
}

/// Board and rights after a move that passed every legality check.
pub(crate) struct Applied {
    pub board: Board,
    pub rights: Rights,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
}

/// Validate `mv` for `side` against `board` and `rights`.
///
/// # Errors
///
/// [`IllegalMove`] with the first failed condition. The inputs are never modified.
pub fn validate(
    board: &Board,
    rights: &Rights,
    side: Color,
    mv: Move,
) -> Result<LegalMove, IllegalMove> {
    let applied = check_and_apply(board, rights, side, mv).map_err(|reason| {
        trace!(%mv, %side, ?reason, "move refused");
        IllegalMove { mv, reason }
    })?;

    let opponent = side.opponent();
    let check = is_in_check(&applied.board, opponent);
    let can_reply = has_any_legal_move(&applied.board, &applied.rights, opponent);
    trace!(%mv, %side, check, can_reply, "move accepted");

    Ok(LegalMove {
        mv,
        piece: applied.piece,
        captured: applied.captured,
        kind: applied.kind,
        board: applied.board,
        rights: applied.rights,
        check,
        checkmate: check && !can_reply,
        stalemate: !check && !can_reply,
    })
}

/// Steps 1-6 of [`validate`] without the opponent-reply analysis.
pub(crate) fn check_and_apply(
    board: &Board,
    rights: &Rights,
    side: Color,
    mv: Move,
) -> Result<Applied, IllegalMoveReason> {
    let piece = board
        .piece_at(mv.from)
        .filter(|p| p.color == side)
        .ok_or(IllegalMoveReason::NoPieceOfMover)?;

    if mv.from == mv.to {
        return Err(IllegalMoveReason::SameSquare);
    }

    // A pawn aimed at the last rank from off its pattern is unreachable, not malformed.
    let last_rank = piece.kind == PieceKind::Pawn && mv.to.rank() == side.promotion_rank();
    match (last_rank, mv.promotion) {
        (true, None) if piece.kind.reaches_on_empty_board(mv.from, mv.to, side) => {
            return Err(IllegalMoveReason::MissingPromotion)
        }
        (false, Some(_)) => return Err(IllegalMoveReason::SpuriousPromotion),
        _ => {}
    }

    if piece.kind == PieceKind::King {
        if let Some(castle) = castle_side_for(side, mv.from, mv.to) {
            return castle_move(board, rights, side, castle);
        }
    }

    let pawn_diagonal_to_empty =
        piece.kind == PieceKind::Pawn && is_pawn_diagonal(mv, side) && board.is_empty(mv.to);
    let en_passant_victim = if pawn_diagonal_to_empty {
        Some(en_passant_victim(board, rights, side, mv)?)
    } else {
        None
    };

    if en_passant_victim.is_none() {
        let reachable = piece.kind.pseudo_legal_destinations(board, mv.from, side, rights);
        if !reachable.contains(&mv.to) {
            return Err(unreachable_reason(board, piece, mv));
        }
    }

    let mut next = *board;
    next.take(mv.from);
    let mut captured = next.take(mv.to);
    if let Some(victim) = en_passant_victim {
        captured = next.take(victim);
    }
    let placed = match mv.promotion {
        Some(promotion) => Piece::new(side, promotion.kind()),
        None => piece,
    };
    next.set(mv.to, Some(placed));

    if is_in_check(&next, side) {
        return Err(IllegalMoveReason::LeavesKingInCheck);
    }

    let kind = match (mv.promotion, en_passant_victim, captured) {
        (Some(promotion), _, captured) => MoveKind::Promotion {
            piece: promotion.kind(),
            capture: captured.is_some(),
        },
        (None, Some(_), _) => MoveKind::EnPassant,
        (None, None, Some(_)) => MoveKind::Capture,
        (None, None, None)
            if piece.kind == PieceKind::Pawn && (mv.to.rank() - mv.from.rank()).abs() == 2 =>
        {
            MoveKind::DoublePawnPush
        }
        (None, None, None) => MoveKind::Quiet,
    };

    Ok(Applied {
        board: next,
        rights: updated_rights(rights, side, piece, mv, kind),
        piece,
        captured,
        kind,
    })
}

fn is_pawn_diagonal(mv: Move, side: Color) -> bool {
    (mv.to.file() - mv.from.file()).abs() == 1 && mv.to.rank() - mv.from.rank() == side.forward()
}

/// A pawn stepping diagonally onto an empty square: only legal as an en-passant capture.
fn en_passant_victim(
    board: &Board,
    rights: &Rights,
    side: Color,
    mv: Move,
) -> Result<Square, IllegalMoveReason> {
    if rights.en_passant != Some(mv.to) {
        return Err(IllegalMoveReason::InvalidEnPassant);
    }
    let victim = Square::at(mv.to.file(), mv.from.rank());
    if board.piece_at(victim) != Some(Piece::new(side.opponent(), PieceKind::Pawn)) {
        return Err(IllegalMoveReason::InvalidEnPassant);
    }
    Ok(victim)
}

fn unreachable_reason(board: &Board, piece: Piece, mv: Move) -> IllegalMoveReason {
    if !piece.kind.reaches_on_empty_board(mv.from, mv.to, piece.color) {
        IllegalMoveReason::UnreachableDestination
    } else if board.belongs_to(mv.to, piece.color) {
        IllegalMoveReason::OccupiedByOwnPiece
    } else {
        IllegalMoveReason::BlockedPath
    }
}

fn castle_move(
    board: &Board,
    rights: &Rights,
    side: Color,
    castle: CastleSide,
) -> Result<Applied, IllegalMoveReason> {
    if !castling_prerequisites(board, rights, side, castle) {
        return Err(IllegalMoveReason::InvalidCastling);
    }
    if is_in_check(board, side) {
        return Err(IllegalMoveReason::InvalidCastling);
    }

    let rank = side.back_rank();
    let king_from = Square::at(KING_START_FILE, rank);
    let king_to = Square::at(castle.king_target_file(), rank);
    let step = if castle.king_target_file() > KING_START_FILE { 1 } else { -1 };

    let mut file = KING_START_FILE;
    while file != castle.king_target_file() {
        file += step;
        if is_square_attacked(board, Square::at(file, rank), side.opponent()) {
            return Err(IllegalMoveReason::InvalidCastling);
        }
    }

    let mut next = *board;
    let king = next.take(king_from);
    let rook = next.take(Square::at(castle.rook_file(), rank));
    next.set(king_to, king);
    next.set(Square::at(castle.rook_target_file(), rank), rook);

    let mut castling = rights.castling;
    castling.clear_color(side);

    let kind = match castle {
        CastleSide::KingSide => MoveKind::CastleKingSide,
        CastleSide::QueenSide => MoveKind::CastleQueenSide,
    };
    Ok(Applied {
        board: next,
        rights: Rights {
            castling,
            en_passant: None,
        },
        piece: Piece::new(side, PieceKind::King),
        captured: None,
        kind,
    })
}

/// Castling rights lost and en-passant target opened by a non-castling move.
fn updated_rights(rights: &Rights, side: Color, piece: Piece, mv: Move, kind: MoveKind) -> Rights {
    let mut castling = rights.castling;
    if piece.kind == PieceKind::King {
        castling.clear_color(side);
    }
    for color in Color::ALL {
        for castle in [CastleSide::KingSide, CastleSide::QueenSide] {
            let corner = Square::at(castle.rook_file(), color.back_rank());
            if mv.from == corner || mv.to == corner {
                castling.clear(color, castle);
            }
        }
    }

    let en_passant = match kind {
        MoveKind::DoublePawnPush => mv.from.offset((0, side.forward())),
        _ => None,
    };

    Rights { castling, en_passant }
}

impl Position {
    /// Validate and apply `mv` for the side to move, advancing the move counters.
    ///
    /// # Errors
    ///
    /// [`IllegalMove`] when [`validate`] refuses the move; `self` is unchanged.
    pub fn play(&self, mv: Move) -> Result<(Position, LegalMove), IllegalMove> {
        let legal = validate(&self.board, &self.rights, self.side_to_move, mv)?;
        let next = Position {
            board: legal.board,
            rights: legal.rights,
            side_to_move: self.side_to_move.opponent(),
            halfmove_clock: if legal.is_progress() {
                0
            } else {
                self.halfmove_clock.saturating_add(1)
            },
            fullmove_number: match self.side_to_move {
                Color::White => self.fullmove_number,
                Color::Black => self.fullmove_number.saturating_add(1),
            },
        };
        Ok((next, legal))
    }
}

#[cfg(test)]
mod tests;
