//! Settlement hand-off and collaborator seams
//!
//! The referee never moves funds or computes ratings. It produces a [`SettlementReport`]
//! and passes it to the collaborators the caller supplies. Collaborators are passed per call
//! and never owned by a game.
//!
//! ## Retry contract
//!
//! `settle` calls [`Escrow::release`] and then [`RatingService::record_result`], and marks the
//! game settled only when both succeed. A failed call can therefore be retried, which means
//! a collaborator may see the same report more than once: implementations must treat a
//! repeated report for the same game as a no-op.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::status::{EndReason, MatchResult, Outcome};
use super::types::{GameId, ParticipantId, Stake};

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{collaborator} failed: {message}")]
pub struct CollaboratorError {
    pub collaborator: &'static str,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(collaborator: &'static str, message: impl Into<String>) -> Self {
        CollaboratorError {
            collaborator,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub participant: ParticipantId,
    pub amount: Stake,
}

/// Everything collaborators need to act on a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    pub game: GameId,
    pub white: ParticipantId,
    pub black: Option<ParticipantId>,
    pub stake: Stake,
    pub outcome: Outcome,
    pub payouts: Vec<Payout>,
}

impl SettlementReport {
    pub(crate) fn new(
        game: GameId,
        white: ParticipantId,
        black: Option<ParticipantId>,
        stake: Stake,
        outcome: Outcome,
    ) -> Self {
        let payouts = payouts_for(&white, black.as_ref(), stake, &outcome);
        SettlementReport {
            game,
            white,
            black,
            stake,
            outcome,
            payouts,
        }
    }

    /// Both participants, when the game was actually played.
    pub fn players(&self) -> Option<(&ParticipantId, &ParticipantId)> {
        self.black.as_ref().map(|black| (&self.white, black))
    }
}

/// Winner takes both stakes; a draw refunds each side; a cancelled game refunds the creator.
fn payouts_for(
    white: &ParticipantId,
    black: Option<&ParticipantId>,
    stake: Stake,
    outcome: &Outcome,
) -> Vec<Payout> {
    let payout = |participant: &ParticipantId, amount| Payout {
        participant: participant.clone(),
        amount,
    };
    let Some(black) = black else {
        return vec![payout(white, stake)];
    };
    if outcome.reason == EndReason::Cancelled {
        return vec![payout(white, stake)];
    }
    match outcome.result {
        MatchResult::White => vec![payout(white, stake.saturating_mul(2))],
        MatchResult::Black => vec![payout(black, stake.saturating_mul(2))],
        MatchResult::Draw => vec![payout(white, stake), payout(black, stake)],
    }
}

/// Stake custody.
pub trait Escrow {
    /// Take `amount` from `participant` into custody for `game`.
    fn lock_stake(
        &mut self,
        game: GameId,
        participant: &ParticipantId,
        amount: Stake,
    ) -> Result<(), CollaboratorError>;

    /// Pay out a finished game. Repeated calls for the same game must have no further effect.
    fn release(&mut self, report: &SettlementReport) -> Result<(), CollaboratorError>;
}

/// Receives results of settled games that were actually played.
pub trait RatingService {
    /// Repeated calls for the same game must have no further effect.
    fn record_result(&mut self, report: &SettlementReport) -> Result<(), CollaboratorError>;
}

/// In-memory escrow: per-participant balances plus per-game custody.
#[derive(Debug, Clone, Default)]
pub struct LedgerEscrow {
    balances: BTreeMap<ParticipantId, Stake>,
    held: BTreeMap<GameId, Stake>,
    released: HashSet<GameId>,
    fail_next: Option<String>,
}

impl LedgerEscrow {
    pub fn new() -> Self {
        LedgerEscrow::default()
    }

    /// Credit `participant`; balances saturate at [`Stake::MAX`].
    pub fn deposit(&mut self, participant: &ParticipantId, amount: Stake) {
        let balance = self.balances.entry(participant.clone()).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    pub fn balance(&self, participant: &ParticipantId) -> Stake {
        self.balances.get(participant).copied().unwrap_or(0)
    }

    /// Funds currently in custody for `game`.
    pub fn held(&self, game: GameId) -> Stake {
        self.held.get(&game).copied().unwrap_or(0)
    }

    /// Make the next call fail once with `message`.
    pub fn fail_next(&mut self, message: impl Into<String>) {
        self.fail_next = Some(message.into());
    }

    fn injected_failure(&mut self) -> Result<(), CollaboratorError> {
        match self.fail_next.take() {
            Some(message) => Err(CollaboratorError::new("escrow", message)),
            None => Ok(()),
        }
    }
}

impl Escrow for LedgerEscrow {
    fn lock_stake(
        &mut self,
        game: GameId,
        participant: &ParticipantId,
        amount: Stake,
    ) -> Result<(), CollaboratorError> {
        self.injected_failure()?;
        let balance = self.balance(participant);
        if balance < amount {
            return Err(CollaboratorError::new(
                "escrow",
                format!("{participant} has {balance}, needs {amount}"),
            ));
        }
        let held = self.held(game).checked_add(amount).ok_or_else(|| {
            CollaboratorError::new(
                "escrow",
                format!("custody for game {game} would overflow adding {amount}"),
            )
        })?;
        self.balances.insert(participant.clone(), balance - amount);
        self.held.insert(game, held);
        Ok(())
    }

    fn release(&mut self, report: &SettlementReport) -> Result<(), CollaboratorError> {
        self.injected_failure()?;
        if self.released.contains(&report.game) {
            return Ok(());
        }
        let total = report
            .payouts
            .iter()
            .try_fold(0, |sum: Stake, p| sum.checked_add(p.amount))
            .ok_or_else(|| {
                let detail = format!("payouts overflow for game {}", report.game);
                CollaboratorError::new("escrow", detail)
            })?;
        let held = self.held(report.game);
        if total > held {
            return Err(CollaboratorError::new(
                "escrow",
                format!("payouts {total} exceed custody {held} for game {}", report.game),
            ));
        }
        for payout in &report.payouts {
            self.deposit(&payout.participant, payout.amount);
        }
        self.held.insert(report.game, held - total);
        self.released.insert(report.game);
        Ok(())
    }
}

/// In-memory rating sink that records each game's report once.
#[derive(Debug, Clone, Default)]
pub struct RecordingRatings {
    results: Vec<SettlementReport>,
    fail_next: Option<String>,
}

impl RecordingRatings {
    pub fn new() -> Self {
        RecordingRatings::default()
    }

    pub fn results(&self) -> &[SettlementReport] {
        &self.results
    }

    pub fn fail_next(&mut self, message: impl Into<String>) {
        self.fail_next = Some(message.into());
    }
}

impl RatingService for RecordingRatings {
    fn record_result(&mut self, report: &SettlementReport) -> Result<(), CollaboratorError> {
        if let Some(message) = self.fail_next.take() {
            return Err(CollaboratorError::new("rating", message));
        }
        if self.results.iter().all(|r| r.game != report.game) {
            self.results.push(report.clone());
        }
        Ok(())
    }
}
