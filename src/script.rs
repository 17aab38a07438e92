//! Replay scripts: a whole game described as JSON and driven through a fresh registry
//!
//! A script names the two participants, the mode and the time-control preset, then lists
//! timestamped actions. Moves are attributed to whichever side is to move; every other action
//! names its colour explicitly. Stakes are deposited into a [`LedgerEscrow`] up front so the
//! run exercises the same collaborator path as a live referee.
//!
//! ```json
//! {
//!   "mode": "tournament",
//!   "preset": "short",
//!   "stake": 10,
//!   "actions": [
//!     { "action": "move", "at": 3, "uci": "e2e4" },
//!     { "action": "resign", "at": 9, "by": "black" },
//!     { "action": "settle", "at": 90000 }
//!   ]
//! }
//! ```

use std::path::Path;

use chess_engine::{ChessEngineError, Color, Move};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::RefereeConfig;
use crate::game::{
    Game, GameError, GameEvent, GameId, GameMode, GameRegistry, GameStatus, GameView, LedgerEscrow,
    MatchResult, MoveHistory, MoveOutcome, Outcome, ParticipantId, RecordingRatings,
    SettlementReport, Stake, TimeControl,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_mode")]
    pub mode: GameMode,
    #[serde(default = "default_preset")]
    pub preset: TimeControl,
    #[serde(default)]
    pub stake: Stake,
    #[serde(default = "default_white")]
    pub white: ParticipantId,
    #[serde(default = "default_black")]
    pub black: ParticipantId,
    /// Creation and join time.
    #[serde(default)]
    pub start_time: u64,
    pub actions: Vec<ScriptAction>,
}

fn default_mode() -> GameMode {
    GameMode::Friendly
}

fn default_preset() -> TimeControl {
    TimeControl::Long
}

fn default_white() -> ParticipantId {
    ParticipantId::from("white")
}

fn default_black() -> ParticipantId {
    ParticipantId::from("black")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    /// Move for the side to move, in UCI notation (`e7e8q`).
    Move { at: u64, uci: String },
    Resign { at: u64, by: Color },
    OfferDraw { at: u64, by: Color },
    AcceptDraw { at: u64, by: Color },
    ClaimRepetition { at: u64, by: Color },
    ClaimFiftyMove { at: u64, by: Color },
    ClaimTimeout { at: u64, by: Color },
    /// Dispute verdict replacing the result of a finished game.
    Override { result: MatchResult },
    Settle { at: u64 },
}

impl ScriptAction {
    fn at(&self) -> Option<u64> {
        match *self {
            ScriptAction::Move { at, .. }
            | ScriptAction::Resign { at, .. }
            | ScriptAction::OfferDraw { at, .. }
            | ScriptAction::AcceptDraw { at, .. }
            | ScriptAction::ClaimRepetition { at, .. }
            | ScriptAction::ClaimFiftyMove { at, .. }
            | ScriptAction::ClaimTimeout { at, .. }
            | ScriptAction::Settle { at } => Some(at),
            ScriptAction::Override { .. } => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Action {step}: {source}")]
    Notation {
        step: usize,
        #[source]
        source: ChessEngineError,
    },

    #[error("Action {step}: {source}")]
    Action {
        step: usize,
        #[source]
        source: GameError,
    },

    /// Creating or joining the game failed before any action ran
    #[error("Setup failed: {0}")]
    Setup(#[source] GameError),
}

/// Final state of a scripted game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptReport {
    pub fen: String,
    pub status: GameStatus,
    pub outcome: Option<Outcome>,
    pub history: MoveHistory,
    pub view: GameView,
    pub events: Vec<GameEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement: Option<SettlementReport>,
    /// Illegal tournament move that ended the game, in UCI notation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forfeited_by: Option<String>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Script, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Script, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Script::from_json(&json)
    }

    fn participant(&self, color: Color) -> &ParticipantId {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

/// Run `script` to completion. The first rejected action aborts the run.
pub fn run_script(script: &Script, config: &RefereeConfig) -> Result<ScriptReport, ScriptError> {
    let mut registry = GameRegistry::new(config.clone());
    let mut escrow = LedgerEscrow::new();
    let mut ratings = RecordingRatings::new();
    escrow.deposit(&script.white, script.stake);
    escrow.deposit(&script.black, script.stake);

    let id = registry
        .create(
            script.white.clone(),
            script.stake,
            script.preset,
            script.mode,
            script.start_time,
            &mut escrow,
        )
        .map_err(ScriptError::Setup)?;
    registry
        .join(id, script.black.clone(), script.stake, script.start_time, &mut escrow)
        .map_err(ScriptError::Setup)?;

    let mut now = script.start_time;
    let mut settlement = None;
    let mut forfeited_by = None;
    for (step, action) in script.actions.iter().enumerate() {
        now = now.max(action.at().unwrap_or(now));
        let at_step = |source| ScriptError::Action { step, source };
        debug!("[GAME] script action {}: {:?}", step, action);

        match action {
            ScriptAction::Settle { at } => {
                let report = registry
                    .settle(id, *at, &mut escrow, &mut ratings)
                    .map_err(at_step)?;
                settlement = Some(report);
            }
            ScriptAction::Move { at, uci } => {
                let mv: Move = uci
                    .parse()
                    .map_err(|source| ScriptError::Notation { step, source })?;
                let game = game_mut(&mut registry, id)?;
                let mover = script.participant(game.side_to_move());
                let outcome = game.submit_move(mover, mv, *at).map_err(at_step)?;
                if let MoveOutcome::Forfeited(_) = outcome {
                    forfeited_by = Some(uci.clone());
                }
            }
            ScriptAction::Resign { at, by } => {
                game_mut(&mut registry, id)?
                    .resign(script.participant(*by), *at)
                    .map_err(at_step)?;
            }
            ScriptAction::OfferDraw { at, by } => {
                game_mut(&mut registry, id)?
                    .offer_draw(script.participant(*by), *at)
                    .map_err(at_step)?;
            }
            ScriptAction::AcceptDraw { at, by } => {
                game_mut(&mut registry, id)?
                    .accept_draw(script.participant(*by), *at)
                    .map_err(at_step)?;
            }
            ScriptAction::ClaimRepetition { at, by } => {
                game_mut(&mut registry, id)?
                    .claim_repetition(script.participant(*by), *at)
                    .map_err(at_step)?;
            }
            ScriptAction::ClaimFiftyMove { at, by } => {
                game_mut(&mut registry, id)?
                    .claim_fifty_move(script.participant(*by), *at)
                    .map_err(at_step)?;
            }
            ScriptAction::ClaimTimeout { at, by } => {
                game_mut(&mut registry, id)?
                    .claim_timeout(script.participant(*by), *at)
                    .map_err(at_step)?;
            }
            ScriptAction::Override { result } => {
                game_mut(&mut registry, id)?
                    .override_outcome(*result)
                    .map_err(at_step)?;
            }
        }
    }

    let game = registry.game(id).map_err(ScriptError::Setup)?;
    info!(
        "[GAME] script finished after {} actions: {}",
        script.actions.len(),
        game.status()
    );
    Ok(report_for(game, now, settlement, forfeited_by))
}

fn game_mut(registry: &mut GameRegistry, id: GameId) -> Result<&mut Game, ScriptError> {
    registry.game_mut(id).map_err(ScriptError::Setup)
}

fn report_for(
    game: &Game,
    now: u64,
    settlement: Option<SettlementReport>,
    forfeited_by: Option<String>,
) -> ScriptReport {
    ScriptReport {
        fen: game.fen(),
        status: game.status(),
        outcome: game.outcome().copied(),
        history: game.history().clone(),
        view: game.view(now),
        events: game.events().to_vec(),
        settlement,
        forfeited_by,
    }
}
