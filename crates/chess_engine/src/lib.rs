//! # Chess Rules Engine
//!
//! A pure, deterministic rules oracle: given a position, its rights, the side to move and a
//! proposed move, it answers legal (with the resulting position and derived flags) or illegal
//! (with a reason). No I/O, no clocks, no randomness.
//!
//! ## Module Organization
//!
//! - [`types`] / [`board`] / [`constants`] - board and piece model
//! - [`move_gen`] - per-piece pseudo-legal destinations and attack detection
//! - [`api`] - legality engine ([`validate`]), legal move lists, status, replay
//! - [`hash`] / [`draw`] - canonical repetition keys and the draw-condition tracker
//! - [`fen`] - FEN import/export for [`Position`]
//!
//! ## Example
//!
//! ```
//! use chess_engine::{validate, Color, Move, Position};
//!
//! let start = Position::standard();
//! let mv: Move = "e2e4".parse().unwrap();
//! let legal = validate(&start.board, &start.rights, Color::White, mv).unwrap();
//! assert_eq!(legal.rights.en_passant.map(|sq| sq.to_string()), Some("e3".into()));
//! ```

pub mod api;
pub mod board;
pub mod constants;
pub mod draw;
pub mod error;
pub mod fen;
pub mod hash;
pub mod move_gen;
pub mod types;

pub use api::{
    has_any_legal_move, legal_moves, position_status, replay, replay_from, validate, LegalMove,
    PositionStatus,
};
pub use board::Board;
pub use draw::DrawTracker;
pub use error::{ChessEngineError, ChessEngineResult, FenError, IllegalMove, IllegalMoveReason};
pub use hash::{PositionDigest, RepetitionKey};
pub use types::{
    CastleSide, CastlingRights, Color, Move, MoveKind, Piece, PieceKind, Position, Promotion,
    Rights, Square,
};
