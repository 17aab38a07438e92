//! Game lifecycle - the referee's per-game state machine
//!
//! Wraps the pure rules engine (`chess_engine`) with everything a wagered game needs:
//! participants and stakes, clocks, draw offers and claims, terminal outcomes and the
//! settlement hand-off to external collaborators.
//!
//! # Module Organization
//!
//! - `lifecycle` - [`Game`], the state machine itself
//! - `registry` - [`GameRegistry`], arena of games addressed by [`GameId`]
//! - `status` - [`GameStatus`], [`EndReason`], [`Outcome`]
//! - `clock` - lazily decremented [`Clocks`] and [`ClockBudget`]
//! - `history` - [`MoveHistory`] of accepted moves
//! - `events` - [`GameEvent`] log entries
//! - `settlement` - collaborator traits ([`Escrow`], [`RatingService`]) and in-memory versions
//! - `view` - serializable [`GameView`] snapshot
//! - `error` - [`GameError`] and [`GameResult`]
//!
//! # Concurrency
//!
//! Actions on one game are applied one at a time by the caller (`&mut Game`); games share no
//! state, so no locking happens here.

pub mod clock;
pub mod error;
pub mod events;
pub mod history;
pub mod lifecycle;
pub mod registry;
pub mod settlement;
pub mod status;
pub mod types;
pub mod view;

pub use clock::{ClockBudget, Clocks};
pub use error::{GameError, GameResult};
pub use events::GameEvent;
pub use history::{MoveHistory, MoveRecord};
pub use lifecycle::{Game, MoveOutcome};
pub use registry::GameRegistry;
pub use settlement::{
    CollaboratorError, Escrow, LedgerEscrow, Payout, RatingService, RecordingRatings,
    SettlementReport,
};
pub use status::{EndReason, GameStatus, MatchResult, Outcome};
pub use types::{GameId, GameMode, ParticipantId, Stake, TimeControl};
pub use view::{ClockView, GameView};
