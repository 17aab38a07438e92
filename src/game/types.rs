//! Type definitions for the game lifecycle
//!
//! Newtypes for identities and handles, plus the small closed enums that configure a game.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Amount each side escrows to play.
pub type Stake = u64;

/// Handle of a game in the [`GameRegistry`](super::GameRegistry): a dense index, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl GameId {
    pub(crate) fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque identity of a player, as supplied by the surrounding environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        ParticipantId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        ParticipantId::new(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an illegal move is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// An illegal move loses the game on the spot.
    Tournament,
    /// An illegal move is refused and the mover may try again.
    Friendly,
}

/// Named clock-budget tier.
///
/// Resolved to seconds through [`RefereeConfig`](crate::config::RefereeConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeControl {
    Short,
    Medium,
    Long,
}

impl fmt::Display for TimeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeControl::Short => f.write_str("short"),
            TimeControl::Medium => f.write_str("medium"),
            TimeControl::Long => f.write_str("long"),
        }
    }
}
