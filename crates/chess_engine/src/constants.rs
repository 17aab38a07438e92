//! # Referee Constants - Piece Codes, Direction Vectors & Draw Thresholds
//!
//! ## Piece Codes
//!
//! Squares hold signed 8-bit piece codes:
//! - Positive values (1-6) are White pieces
//! - Negative values (-1 to -6) are Black pieces
//! - Zero is an empty square
//!
//! The absolute value is the piece id (1=pawn, 2=knight, 3=bishop, 4=rook, 5=queen, 6=king),
//! so `code.signum()` gives the colour and `code.abs()` gives the kind.
//!
//! ## Direction Vectors
//!
//! Movement is expressed as `(file, rank)` deltas rather than linear index offsets. Linear
//! offsets wrap around the board edge (h1 + 1 = a2), which forces every generator to re-check
//! for wrapping. Deltas applied through [`crate::types::Square::offset`] simply fall off the
//! board instead.
//!
//! Rank 0 is White's back rank, so "north" (+1 rank) is White's forward direction.

pub const VOID_ID: i8 = 0;
pub const PAWN_ID: i8 = 1;
pub const KNIGHT_ID: i8 = 2;
pub const BISHOP_ID: i8 = 3;
pub const ROOK_ID: i8 = 4;
pub const QUEEN_ID: i8 = 5;
pub const KING_ID: i8 = 6;

pub const W_PAWN: i8 = PAWN_ID;
pub const W_KNIGHT: i8 = KNIGHT_ID;
pub const W_BISHOP: i8 = BISHOP_ID;
pub const W_ROOK: i8 = ROOK_ID;
pub const W_QUEEN: i8 = QUEEN_ID;
pub const W_KING: i8 = KING_ID;

pub const B_PAWN: i8 = -PAWN_ID;
pub const B_KNIGHT: i8 = -KNIGHT_ID;
pub const B_BISHOP: i8 = -BISHOP_ID;
pub const B_ROOK: i8 = -ROOK_ID;
pub const B_QUEEN: i8 = -QUEEN_ID;
pub const B_KING: i8 = -KING_ID;

/// `(file, rank)` step for one square in each compass direction.
pub type Delta = (i8, i8);

pub const N: Delta = (0, 1);
pub const S: Delta = (0, -1);
pub const O: Delta = (1, 0);
pub const W: Delta = (-1, 0);
pub const NO: Delta = (1, 1);
pub const NW: Delta = (-1, 1);
pub const SO: Delta = (1, -1);
pub const SW: Delta = (-1, -1);

pub const BISHOP_DIRS: [Delta; 4] = [NO, SO, NW, SW];
pub const ROOK_DIRS: [Delta; 4] = [N, O, S, W];
pub const KING_DIRS: [Delta; 8] = [N, O, S, W, NO, SO, NW, SW];
pub const KNIGHT_DIRS: [Delta; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Standard starting position, indexed `rank * 8 + file` from a1.
#[rustfmt::skip]
pub const SETUP: [i8; 64] = [
    W_ROOK, W_KNIGHT, W_BISHOP, W_QUEEN, W_KING, W_BISHOP, W_KNIGHT, W_ROOK,
    W_PAWN, W_PAWN,   W_PAWN,   W_PAWN,  W_PAWN, W_PAWN,   W_PAWN,   W_PAWN,
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    B_PAWN, B_PAWN,   B_PAWN,   B_PAWN,  B_PAWN, B_PAWN,   B_PAWN,   B_PAWN,
    B_ROOK, B_KNIGHT, B_BISHOP, B_QUEEN, B_KING, B_BISHOP, B_KNIGHT, B_ROOK,
];

/// File of both kings in the standard setup.
pub const KING_START_FILE: i8 = 4;
/// File the king lands on when castling king-side.
pub const KING_SIDE_CASTLE_FILE: i8 = 6;
/// File the king lands on when castling queen-side.
pub const QUEEN_SIDE_CASTLE_FILE: i8 = 2;

/// Occurrences of the same canonical position needed for a repetition claim.
pub const REPETITION_THRESHOLD: u32 = 3;
/// Half-moves without capture or pawn move needed for a fifty-move claim.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Marker byte for "no en-passant target" in canonical keys.
pub const NO_EN_PASSANT: u8 = 0xFF;
