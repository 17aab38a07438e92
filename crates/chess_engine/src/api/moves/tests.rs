//! Test suite for the legality engine
//!
//! Positions are built from FEN so each case reads as a diagram.
//!
//! # Test Organization
//!
//! - `test_reason_*` - each refusal reason, in the order the engine checks them
//! - `test_castling_*` - castling rights, path and attack conditions
//! - `test_en_passant_*` - target lifetime and victim removal
//! - `test_promotion_*` - promotion shape and result
//! - `test_rights_*` - castling/en-passant maintenance after ordinary moves
//! - `test_flags_*` - check, checkmate and stalemate flags
//! - `test_play_*` - move counters on [`Position::play`]

use super::*;
use crate::types::{CastlingRights, Promotion};

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn mv(uci: &str) -> Move {
    uci.parse().unwrap()
}

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn check(position: &Position, uci: &str) -> Result<LegalMove, IllegalMove> {
    validate(&position.board, &position.rights, position.side_to_move, mv(uci))
}

fn reason(position: &Position, uci: &str) -> IllegalMoveReason {
    check(position, uci).unwrap_err().reason
}

fn after(position: &Position, moves: &[&str]) -> Position {
    moves
        .iter()
        .fold(position.clone(), |p, m| p.play(mv(m)).unwrap().0)
}

// ============================================================================
// Refusal Reasons
// ============================================================================

#[test]
fn test_reason_no_piece_of_mover() {
    let start = Position::standard();
    assert_eq!(reason(&start, "e4e5"), IllegalMoveReason::NoPieceOfMover);
    assert_eq!(reason(&start, "e7e5"), IllegalMoveReason::NoPieceOfMover);
}

#[test]
fn test_reason_same_square() {
    assert_eq!(reason(&Position::standard(), "g1g1"), IllegalMoveReason::SameSquare);
}

#[test]
fn test_reason_unreachable_destination() {
    let start = Position::standard();
    assert_eq!(reason(&start, "g1g3"), IllegalMoveReason::UnreachableDestination);
    assert_eq!(reason(&start, "e2e5"), IllegalMoveReason::UnreachableDestination);
    assert_eq!(reason(&start, "b1b3"), IllegalMoveReason::UnreachableDestination);
}

#[test]
fn test_reason_blocked_path() {
    //! Sliding pieces stop at the first occupied square.
    let start = Position::standard();
    assert_eq!(reason(&start, "a1a5"), IllegalMoveReason::BlockedPath);
    assert_eq!(reason(&start, "c1h6"), IllegalMoveReason::BlockedPath);

    let blocked_pawn = pos("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
    assert_eq!(reason(&blocked_pawn, "e2e4"), IllegalMoveReason::BlockedPath);
    assert_eq!(reason(&blocked_pawn, "e2e3"), IllegalMoveReason::BlockedPath);
}

#[test]
fn test_reason_occupied_by_own_piece() {
    let start = Position::standard();
    assert_eq!(reason(&start, "a1a2"), IllegalMoveReason::OccupiedByOwnPiece);
    assert_eq!(reason(&start, "g1e2"), IllegalMoveReason::OccupiedByOwnPiece);
}

#[test]
fn test_reason_leaves_king_in_check() {
    //! Pinned pieces may not leave the line, and the king may not step into an attack.
    let pinned = pos("4rrk1/8/8/8/8/8/4B3/4K3 w - - 0 1");
    assert_eq!(reason(&pinned, "e2d3"), IllegalMoveReason::LeavesKingInCheck);
    assert_eq!(reason(&pinned, "e1f1"), IllegalMoveReason::LeavesKingInCheck);
    assert_eq!(reason(&pinned, "e1f2"), IllegalMoveReason::LeavesKingInCheck);
    assert!(check(&pinned, "e1d1").is_ok());
}

#[test]
fn test_refusal_leaves_inputs_untouched() {
    let start = Position::standard();
    let snapshot = start.clone();
    let _ = check(&start, "e1e2");
    let _ = check(&start, "a1a5");
    assert_eq!(start, snapshot);
}

// ============================================================================
// Castling
// ============================================================================

const CASTLE_READY: &str = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";

#[test]
fn test_castling_king_side_moves_both_pieces() {
    let legal = check(&pos(CASTLE_READY), "e1g1").unwrap();
    assert_eq!(legal.kind, MoveKind::CastleKingSide);
    assert_eq!(legal.board.piece_at(sq("g1")), Some(Piece::new(Color::White, PieceKind::King)));
    assert_eq!(legal.board.piece_at(sq("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert!(legal.board.is_empty(sq("h1")));
    assert!(legal.board.is_empty(sq("e1")));
    assert!(!legal.rights.castling.white_king_side);
    assert!(!legal.rights.castling.white_queen_side);
    assert!(legal.rights.castling.black_king_side);
}

#[test]
fn test_castling_queen_side_moves_both_pieces() {
    let position = after(&pos(CASTLE_READY), &["e1g1"]);
    let legal = check(&position, "e8c8").unwrap();
    assert_eq!(legal.kind, MoveKind::CastleQueenSide);
    assert_eq!(legal.board.piece_at(sq("c8")), Some(Piece::new(Color::Black, PieceKind::King)));
    assert_eq!(legal.board.piece_at(sq("d8")), Some(Piece::new(Color::Black, PieceKind::Rook)));
    assert!(legal.board.is_empty(sq("a8")));
}

#[test]
fn test_castling_refused_while_in_check() {
    //! King and rook unmoved, squares between empty, but the king is attacked.
    let position = pos("4k3/8/8/8/4r3/8/8/4K2R w K - 0 1");
    assert_eq!(reason(&position, "e1g1"), IllegalMoveReason::InvalidCastling);
}

#[test]
fn test_castling_refused_through_attacked_square() {
    let through_f1 = pos("4kr2/8/8/8/8/8/8/4K2R w K - 0 1");
    assert_eq!(reason(&through_f1, "e1g1"), IllegalMoveReason::InvalidCastling);

    let onto_g1 = pos("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1");
    assert_eq!(reason(&onto_g1, "e1g1"), IllegalMoveReason::InvalidCastling);
}

#[test]
fn test_castling_queen_side_b_file_may_be_attacked() {
    //! The b-square must be empty but the king never crosses it.
    let position = pos("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
    assert_eq!(check(&position, "e1c1").unwrap().kind, MoveKind::CastleQueenSide);
}

#[test]
fn test_castling_refused_without_right_or_with_pieces_between() {
    let no_right = pos("4k3/8/8/8/8/8/8/4K2R w - - 0 1");
    assert_eq!(reason(&no_right, "e1g1"), IllegalMoveReason::InvalidCastling);

    assert_eq!(reason(&Position::standard(), "e1g1"), IllegalMoveReason::InvalidCastling);
}

#[test]
fn test_castling_right_lost_after_king_returns() {
    let position = after(&pos(CASTLE_READY), &["e1f1", "e8f8", "f1e1", "f8e8"]);
    assert_eq!(position.rights.castling, CastlingRights::none());
    assert_eq!(reason(&position, "e1g1"), IllegalMoveReason::InvalidCastling);
}

// ============================================================================
// En Passant
// ============================================================================

#[test]
fn test_en_passant_capture_removes_victim() {
    let position = after(&Position::standard(), &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(position.rights.en_passant, Some(sq("d6")));

    let legal = check(&position, "e5d6").unwrap();
    assert_eq!(legal.kind, MoveKind::EnPassant);
    assert_eq!(legal.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
    assert!(legal.board.is_empty(sq("d5")));
    assert_eq!(legal.board.piece_at(sq("d6")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert_eq!(legal.rights.en_passant, None);
}

#[test]
fn test_en_passant_expires_after_one_reply() {
    //! The target lives for exactly one half-move.
    let position = after(
        &Position::standard(),
        &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"],
    );
    assert_eq!(position.rights.en_passant, None);
    assert_eq!(reason(&position, "e5d6"), IllegalMoveReason::InvalidEnPassant);
}

#[test]
fn test_en_passant_diagonal_onto_empty_square_without_target() {
    assert_eq!(reason(&Position::standard(), "e2d3"), IllegalMoveReason::InvalidEnPassant);
}

#[test]
fn test_en_passant_needs_adjacent_pawn() {
    // Target f6 is live but the capturing pawn stands on d5, not beside f5.
    let position = pos("4k3/8/8/3P1p2/8/8/8/4K3 w - f6 0 1");
    assert_eq!(reason(&position, "d5e6"), IllegalMoveReason::InvalidEnPassant);
}

#[test]
fn test_en_passant_refused_when_it_exposes_king() {
    //! Removing both pawns from the fifth rank opens the rook onto the king.
    let position = pos("8/8/8/K2Pp2r/8/8/8/7k w - e6 0 1");
    assert_eq!(reason(&position, "d5e6"), IllegalMoveReason::LeavesKingInCheck);
}

// ============================================================================
// Promotion
// ============================================================================

const PROMOTE: &str = "3r3k/4P3/8/8/8/8/8/K7 w - - 0 1";

#[test]
fn test_promotion_places_chosen_piece() {
    let position = pos(PROMOTE);
    let legal = validate(
        &position.board,
        &position.rights,
        Color::White,
        Move::with_promotion(sq("e7"), sq("e8"), Promotion::Knight),
    )
    .unwrap();
    assert_eq!(
        legal.kind,
        MoveKind::Promotion {
            piece: PieceKind::Knight,
            capture: false
        }
    );
    assert_eq!(legal.piece.kind, PieceKind::Pawn);
    assert_eq!(legal.board.piece_at(sq("e8")), Some(Piece::new(Color::White, PieceKind::Knight)));
}

#[test]
fn test_promotion_with_capture() {
    let legal = check(&pos(PROMOTE), "e7d8q").unwrap();
    assert_eq!(
        legal.kind,
        MoveKind::Promotion {
            piece: PieceKind::Queen,
            capture: true
        }
    );
    assert_eq!(legal.captured, Some(Piece::new(Color::Black, PieceKind::Rook)));
    assert!(legal.check);
}

#[test]
fn test_promotion_choice_is_part_of_the_move_shape() {
    let position = pos(PROMOTE);
    assert_eq!(reason(&position, "e7e8"), IllegalMoveReason::MissingPromotion);
    assert!(IllegalMoveReason::MissingPromotion.is_malformed());

    assert_eq!(reason(&Position::standard(), "e2e4q"), IllegalMoveReason::SpuriousPromotion);
    assert_eq!(reason(&position, "a1a2q"), IllegalMoveReason::SpuriousPromotion);
    assert!(!IllegalMoveReason::BlockedPath.is_malformed());
}

#[test]
fn test_promotion_rank_out_of_pawn_reach_is_unreachable() {
    let start = Position::standard();
    assert_eq!(reason(&start, "e2e8"), IllegalMoveReason::UnreachableDestination);
    assert_eq!(reason(&start, "e2e8q"), IllegalMoveReason::UnreachableDestination);
    assert!(!reason(&start, "e2e8").is_malformed());
}

// ============================================================================
// Rights Maintenance
// ============================================================================

#[test]
fn test_rights_double_push_sets_target_other_moves_clear_it() {
    let (position, legal) = Position::standard().play(mv("e2e4")).unwrap();
    assert_eq!(legal.kind, MoveKind::DoublePawnPush);
    assert_eq!(position.rights.en_passant, Some(sq("e3")));

    let (position, _) = position.play(mv("g8f6")).unwrap();
    assert_eq!(position.rights.en_passant, None);
}

#[test]
fn test_rights_rook_move_and_rook_capture_clear_corners() {
    let position = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let (position, _) = position.play(mv("h1h8")).unwrap();
    assert!(!position.rights.castling.white_king_side);
    assert!(!position.rights.castling.black_king_side);
    assert!(position.rights.castling.white_queen_side);
    assert!(position.rights.castling.black_queen_side);
}

// ============================================================================
// Check / Checkmate / Stalemate Flags
// ============================================================================

#[test]
fn test_flags_fools_mate() {
    let position = after(&Position::standard(), &["f2f3", "e7e5", "g2g4"]);
    let legal = check(&position, "d8h4").unwrap();
    assert!(legal.check);
    assert!(legal.checkmate);
    assert!(!legal.stalemate);
}

#[test]
fn test_flags_stalemate() {
    let position = pos("k7/8/8/2Q5/8/8/8/7K w - - 0 1");
    let legal = check(&position, "c5b6").unwrap();
    assert!(!legal.check);
    assert!(legal.stalemate);
    assert!(!legal.checkmate);
}

#[test]
fn test_flags_plain_check() {
    let legal = check(&pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1"), "a1a8").unwrap();
    assert!(legal.check);
    assert!(!legal.checkmate);
    assert_eq!(legal.kind, MoveKind::Quiet);
}

// ============================================================================
// Position::play
// ============================================================================

#[test]
fn test_play_counters() {
    let start = Position::standard();
    let (p1, _) = start.play(mv("g1f3")).unwrap();
    assert_eq!((p1.halfmove_clock, p1.fullmove_number), (1, 1));
    assert_eq!(p1.side_to_move, Color::Black);
    let (p2, _) = p1.play(mv("e7e5")).unwrap();
    assert_eq!((p2.halfmove_clock, p2.fullmove_number), (0, 2));
    assert_eq!(p2.side_to_move, Color::White);
}

#[test]
fn test_play_refusal_keeps_position() {
    let start = Position::standard();
    let err = start.play(mv("e1e2")).unwrap_err();
    assert_eq!(err.reason, IllegalMoveReason::OccupiedByOwnPiece);
    assert_eq!(err.mv, mv("e1e2"));
    assert_eq!(start, Position::standard());
}

#[test]
fn test_play_counters_saturate_at_max() {
    let (next, _) = pos("k7/8/8/8/8/8/8/K6R w - - 4294967295 1").play(mv("h1h2")).unwrap();
    assert_eq!(next.halfmove_clock, u32::MAX);

    let (next, _) = pos("k7/8/8/8/8/8/8/K6R b - - 0 4294967295").play(mv("a8b8")).unwrap();
    assert_eq!(next.fullmove_number, u32::MAX);
}
