//! Error types for the rules engine
//!
//! Two families live here:
//! - [`IllegalMoveReason`] - why [`crate::api::validate`] refused a move. These are verdicts,
//!   not failures: the engine always answers.
//! - [`ChessEngineError`] - malformed caller input (coordinates, notation, FEN) and replay
//!   failures.

use thiserror::Error;

use crate::types::Move;

/// Why a proposed move was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IllegalMoveReason {
    /// Origin is empty or holds an opponent piece
    #[error("origin square does not hold a piece of the side to move")]
    NoPieceOfMover,

    #[error("origin and destination are the same square")]
    SameSquare,

    /// Destination is outside the piece's movement pattern
    #[error("piece cannot reach the destination")]
    UnreachableDestination,

    /// Destination is on the piece's line but an intervening square is occupied
    #[error("path to the destination is blocked")]
    BlockedPath,

    #[error("destination is occupied by a piece of the same side")]
    OccupiedByOwnPiece,

    #[error("move leaves the mover's king in check")]
    LeavesKingInCheck,

    #[error("castling conditions are not met")]
    InvalidCastling,

    #[error("no en-passant capture is available on that square")]
    InvalidEnPassant,

    #[error("pawn reaches the last rank without a promotion choice")]
    MissingPromotion,

    #[error("promotion choice given for a move that does not promote")]
    SpuriousPromotion,
}

impl IllegalMoveReason {
    /// Malformed input rather than a rules violation: the promotion choice is part of the
    /// move's shape, so a missing or spurious one never counts as an attempted move.
    pub fn is_malformed(self) -> bool {
        matches!(
            self,
            IllegalMoveReason::MissingPromotion | IllegalMoveReason::SpuriousPromotion
        )
    }
}

/// A refused move together with its reason.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("illegal move {mv}: {reason}")]
pub struct IllegalMove {
    pub mv: Move,
    pub reason: IllegalMoveReason,
}

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Caller-supplied coordinate outside 0-7
    #[error("Invalid coordinates: file {file}, rank {rank} (must be 0-7)")]
    InvalidCoordinates { file: u8, rank: u8 },

    #[error("Invalid square name: {name:?}")]
    InvalidSquareName { name: String },

    #[error("Invalid move notation: {notation:?}")]
    InvalidMoveNotation { notation: String },

    #[error("Invalid FEN: {0}")]
    Fen(#[from] FenError),

    /// A recorded move sequence contains an illegal move
    #[error("Replay failed at ply {ply}: {source}")]
    Replay {
        ply: usize,
        #[source]
        source: IllegalMove,
    },
}

/// FEN parsing failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 fields, found {found}")]
    MissingFields { found: usize },

    #[error("bad piece placement: {0}")]
    Placement(String),

    #[error("bad side to move: {0:?}")]
    SideToMove(String),

    #[error("bad castling field: {0:?}")]
    Castling(String),

    #[error("bad en-passant field: {0:?}")]
    EnPassant(String),

    #[error("bad move counter: {0:?}")]
    Counter(String),

    #[error("each side needs exactly one king")]
    KingCount,

    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
