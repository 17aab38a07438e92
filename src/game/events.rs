//! Observable game events
//!
//! Each action appends its events to the game's log in order. Collaborators (dispute,
//! media, indexers) drain the log; nothing in the lifecycle reads it back.

use chess_engine::{Color, MoveKind, PieceKind, Square};
use serde::{Deserialize, Serialize};

use super::settlement::Payout;
use super::status::{EndReason, MatchResult};
use super::types::{GameId, GameMode, ParticipantId, Stake, TimeControl};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    GameCreated {
        game: GameId,
        creator: ParticipantId,
        stake: Stake,
        mode: GameMode,
        time_control: TimeControl,
    },
    PlayerJoined {
        game: GameId,
        participant: ParticipantId,
    },
    MoveMade {
        ply: usize,
        color: Color,
        from: Square,
        to: Square,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        captured: Option<PieceKind>,
        kind: MoveKind,
        check: bool,
        checkmate: bool,
    },
    DrawOffered {
        by: Color,
    },
    DrawAccepted {
        by: Color,
    },
    /// The side an offer was made to moved instead of accepting.
    DrawDeclined {
        by: Color,
    },
    GameEnded {
        reason: EndReason,
        result: MatchResult,
    },
    OutcomeOverridden {
        from: MatchResult,
        to: MatchResult,
    },
    GameCancelled {
        game: GameId,
    },
    PrizeClaimed {
        payouts: Vec<Payout>,
    },
}
