//! Serializable read-only snapshot of a game
//!
//! Handed to the media/rendering collaborator and printed by the CLI. Building a view never
//! mutates the game.

use chess_engine::{Color, PositionDigest};
use serde::{Deserialize, Serialize};

use super::lifecycle::Game;
use super::status::{GameStatus, Outcome};
use super::types::{GameId, GameMode, ParticipantId, Stake, TimeControl};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockView {
    pub white: u64,
    pub black: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub id: GameId,
    pub status: GameStatus,
    pub mode: GameMode,
    pub time_control: TimeControl,
    pub stake: Stake,
    pub white: ParticipantId,
    pub black: Option<ParticipantId>,
    pub fen: String,
    pub side_to_move: Color,
    pub clocks: ClockView,
    /// Moves in UCI notation.
    pub moves: Vec<String>,
    pub draw_offer: Option<Color>,
    pub outcome: Option<Outcome>,
    pub digest: PositionDigest,
}

impl Game {
    /// Snapshot with clocks evaluated at `now`.
    pub fn view(&self, now: u64) -> GameView {
        GameView {
            id: self.id(),
            status: self.status(),
            mode: self.mode(),
            time_control: self.time_control(),
            stake: self.stake(),
            white: self.creator().clone(),
            black: self.opponent().cloned(),
            fen: self.fen(),
            side_to_move: self.side_to_move(),
            clocks: ClockView {
                white: self.remaining_time(Color::White, now),
                black: self.remaining_time(Color::Black, now),
            },
            moves: self.history().uci(),
            draw_offer: self.draw_offer(),
            outcome: self.outcome().copied(),
            digest: self.position_digest(),
        }
    }
}
