//! Error types for game module
//!
//! Every rejected action leaves the game exactly as it was. The one mutating outcome of a bad
//! move (the tournament forfeit) is reported as a successful [`MoveOutcome`](super::MoveOutcome),
//! not through this type.

use chess_engine::IllegalMove;

use super::settlement::CollaboratorError;
use super::types::{GameId, ParticipantId, Stake};
use crate::config::ConfigError;

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Caller coordinate outside 0-7
    #[error("Invalid coordinates: file {file}, rank {rank} (must be 0-7)")]
    InvalidCoordinates { file: u8, rank: u8 },

    #[error("{participant} is not a participant of this game")]
    NotAParticipant { participant: ParticipantId },

    /// The creator tried to join their own game
    #[error("the creator cannot join their own game")]
    CreatorCannotJoin,

    #[error("it is not {participant}'s turn")]
    WrongTurn { participant: ParticipantId },

    #[error("game is not active (status: {status})")]
    GameNotActive { status: String },

    #[error(transparent)]
    IllegalMove(#[from] IllegalMove),

    #[error("draw condition not met: {condition}")]
    DrawConditionNotMet { condition: &'static str },

    #[error("opponent's clock has not run out ({remaining_secs}s left)")]
    TimeoutNotYetElapsed { remaining_secs: u64 },

    #[error("game is already settled")]
    AlreadySettled,

    #[error("stake mismatch: expected {expected}, offered {offered}")]
    StakeMismatch { expected: Stake, offered: Stake },

    #[error("unknown game {0}")]
    UnknownGame(GameId),

    /// The mover's budget ran out before the move arrived
    #[error("clock expired: move arrived {overdue_secs}s after the budget ran out")]
    ClockExpired { overdue_secs: u64 },

    #[error("no pending draw offer from the opponent")]
    NoPendingDrawOffer,

    #[error("only the creator may cancel the game")]
    NotCreator,

    #[error("game has not reached a terminal state (status: {status})")]
    GameNotTerminal { status: String },

    #[error("challenge window open until {closes_at}")]
    ChallengeWindowOpen { closes_at: u64 },

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
