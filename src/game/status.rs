//! Game status, end reasons and outcomes
//!
//! # State Transitions
//!
//! ```text
//! Created → Active → Checkmate / StalemateDraw / AgreedDraw / RepetitionDraw /
//!                    FiftyMoveDraw / Resigned / TimedOut → Settled
//! Created → Cancelled → Settled
//! ```
//!
//! Every state after `Active` is terminal: no move or claim is accepted again. `Settled` is
//! the only state reachable from the terminal ones.

use std::fmt;

use chess_engine::{Color, IllegalMoveReason};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Waiting for the second participant
    Created,
    Active,
    Checkmate,
    StalemateDraw,
    AgreedDraw,
    RepetitionDraw,
    FiftyMoveDraw,
    /// Resignation, or a tournament-mode illegal move
    Resigned,
    TimedOut,
    /// Withdrawn by the creator before anyone joined
    Cancelled,
    Settled,
}

impl GameStatus {
    /// Ended but not yet settled.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Created | GameStatus::Active | GameStatus::Settled)
    }

    /// Ended, settled or not.
    pub fn is_finished(self) -> bool {
        self.is_terminal() || self == GameStatus::Settled
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameStatus::Created => "created",
            GameStatus::Active => "active",
            GameStatus::Checkmate => "checkmate",
            GameStatus::StalemateDraw => "stalemate_draw",
            GameStatus::AgreedDraw => "agreed_draw",
            GameStatus::RepetitionDraw => "repetition_draw",
            GameStatus::FiftyMoveDraw => "fifty_move_draw",
            GameStatus::Resigned => "resigned",
            GameStatus::TimedOut => "timed_out",
            GameStatus::Cancelled => "cancelled",
            GameStatus::Settled => "settled",
        };
        f.write_str(name)
    }
}

/// Winner, or a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    White,
    Black,
    Draw,
}

impl MatchResult {
    pub fn win_for(color: Color) -> MatchResult {
        match color {
            Color::White => MatchResult::White,
            Color::Black => MatchResult::Black,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            MatchResult::White => Some(Color::White),
            MatchResult::Black => Some(Color::Black),
            MatchResult::Draw => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum EndReason {
    Checkmate,
    Stalemate,
    Agreement,
    Repetition,
    FiftyMoveRule,
    Resignation,
    IllegalMoveForfeit(IllegalMoveReason),
    Timeout,
    Cancelled,
}

impl EndReason {
    /// Status the game enters when it ends for this reason.
    pub fn status(self) -> GameStatus {
        match self {
            EndReason::Checkmate => GameStatus::Checkmate,
            EndReason::Stalemate => GameStatus::StalemateDraw,
            EndReason::Agreement => GameStatus::AgreedDraw,
            EndReason::Repetition => GameStatus::RepetitionDraw,
            EndReason::FiftyMoveRule => GameStatus::FiftyMoveDraw,
            EndReason::Resignation | EndReason::IllegalMoveForfeit(_) => GameStatus::Resigned,
            EndReason::Timeout => GameStatus::TimedOut,
            EndReason::Cancelled => GameStatus::Cancelled,
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub result: MatchResult,
    pub reason: EndReason,
    /// Caller timestamp of the ending action.
    pub ended_at: u64,
    /// Result as decided on the board, when a dispute verdict has replaced it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridden_from: Option<MatchResult>,
}

impl Outcome {
    pub fn new(result: MatchResult, reason: EndReason, ended_at: u64) -> Self {
        Outcome {
            result,
            reason,
            ended_at,
            overridden_from: None,
        }
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden_from.is_some()
    }
}
