//! Verifiable chess referee
//!
//! The rules live in the `chess_engine` crate; this crate wraps them in the per-game state
//! machine a wagered match needs (participants, clocks, draws, outcomes and settlement) plus
//! configuration, logging setup and a JSON replay runner used by the `verichess` binary.
//!
//! ```
//! use verichess::config::RefereeConfig;
//! use verichess::game::{GameMode, GameRegistry, GameStatus, LedgerEscrow, TimeControl};
//!
//! let mut escrow = LedgerEscrow::new();
//! escrow.deposit(&"alice".into(), 10);
//! escrow.deposit(&"bob".into(), 10);
//!
//! let mut registry = GameRegistry::new(RefereeConfig::default());
//! let id = registry
//!     .create("alice".into(), 10, TimeControl::Short, GameMode::Friendly, 0, &mut escrow)
//!     .unwrap();
//! registry.join(id, "bob".into(), 10, 0, &mut escrow).unwrap();
//!
//! let game = registry.game_mut(id).unwrap();
//! game.submit_move(&"alice".into(), "e2e4".parse().unwrap(), 3).unwrap();
//! assert_eq!(game.status(), GameStatus::Active);
//! ```

pub mod config;
pub mod game;
pub mod logging;
pub mod script;

pub use config::{ConfigError, RefereeConfig};
pub use game::{Game, GameError, GameId, GameRegistry, GameResult, GameStatus};
pub use script::{run_script, Script, ScriptAction, ScriptError, ScriptReport};
