//! Public API of the rules engine
//!
//! Every function here is a pure function of its arguments: no clocks, no randomness, no
//! shared state. Identical inputs always produce identical verdicts.
//!
//! ## Module Organization
//!
//! - `moves` - Move validation and application ([`validate`],
//!   [`Position::play`](crate::types::Position::play))
//! - `state` - Whole-position queries ([`legal_moves`], [`position_status`])
//! - `replay` - Re-running a recorded move list ([`replay`], [`replay_from`])

mod moves;
mod replay;
mod state;

pub use moves::{validate, LegalMove};
pub use replay::{replay, replay_from};
pub use state::{has_any_legal_move, legal_moves, position_status, PositionStatus};
