//! Game lifecycle state machine
//!
//! A [`Game`] owns its position, rights, clocks, draw tracker, history and event log. Every
//! action follows the same shape:
//!
//! 1. run every check against the current state, returning an error on the first failure
//! 2. only then mutate, append events and log the transition
//!
//! so a rejected action leaves the game exactly as it was. The tournament-mode forfeit is the
//! one defined mutating outcome of a bad move; it is reported as [`MoveOutcome::Forfeited`].
//!
//! The creator plays White and the joiner plays Black. All timestamps are caller-supplied
//! seconds; the game never reads a clock of its own.

use chess_engine::{
    Color, DrawTracker, IllegalMove, Move, Position, PositionDigest, Promotion, Square,
};
use tracing::{debug, info, warn};

use super::clock::{ClockBudget, Clocks};
use super::error::{GameError, GameResult};
use super::events::GameEvent;
use super::history::{MoveHistory, MoveRecord};
use super::settlement::{Escrow, RatingService, SettlementReport};
use super::status::{EndReason, GameStatus, MatchResult, Outcome};
use super::types::{GameId, GameMode, ParticipantId, Stake, TimeControl};

/// What an accepted move submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was legal and is now part of the history.
    Played(MoveRecord),
    /// Tournament mode: the move was illegal and the mover has lost.
    Forfeited(IllegalMove),
}

#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    creator: ParticipantId,
    opponent: Option<ParticipantId>,
    stake: Stake,
    mode: GameMode,
    time_control: TimeControl,
    budget: ClockBudget,
    clocks: Clocks,
    status: GameStatus,
    position: Position,
    tracker: DrawTracker,
    history: MoveHistory,
    /// Colour that made the pending draw offer.
    draw_offer: Option<Color>,
    outcome: Option<Outcome>,
    events: Vec<GameEvent>,
}

impl Game {
    /// Instantiate a game waiting for its second participant.
    pub fn new(
        id: GameId,
        creator: ParticipantId,
        stake: Stake,
        mode: GameMode,
        time_control: TimeControl,
        budget: ClockBudget,
        now: u64,
    ) -> Self {
        let position = Position::standard();
        let tracker = DrawTracker::new(&position);
        let events = vec![GameEvent::GameCreated {
            game: id,
            creator: creator.clone(),
            stake,
            mode,
            time_control,
        }];
        info!(
            "[GAME] {} created by {} (stake {}, {:?}, {})",
            id, creator, stake, mode, time_control
        );
        Game {
            id,
            creator,
            opponent: None,
            stake,
            mode,
            time_control,
            budget,
            clocks: Clocks::start(budget, now),
            status: GameStatus::Created,
            position,
            tracker,
            history: MoveHistory::default(),
            draw_offer: None,
            outcome: None,
            events,
        }
    }

    // ========================================================================
    // Joining and cancelling
    // ========================================================================

    /// Every join precondition, without mutating. The registry runs this before asking the
    /// escrow to lock the joiner's stake.
    pub fn check_join(&self, participant: &ParticipantId, stake: Stake) -> GameResult<()> {
        if self.status != GameStatus::Created {
            return Err(self.not_active());
        }
        if *participant == self.creator {
            return Err(GameError::CreatorCannotJoin);
        }
        if stake != self.stake {
            return Err(GameError::StakeMismatch {
                expected: self.stake,
                offered: stake,
            });
        }
        Ok(())
    }

    /// Second participant joins as Black; both clocks start at `now`.
    pub fn join(&mut self, participant: ParticipantId, stake: Stake, now: u64) -> GameResult<()> {
        self.check_join(&participant, stake).inspect_err(|e| {
            warn!("[GAME] {} join by {} rejected: {}", self.id, participant, e);
        })?;

        self.clocks = Clocks::start(self.budget, now);
        self.status = GameStatus::Active;
        self.events.push(GameEvent::PlayerJoined {
            game: self.id,
            participant: participant.clone(),
        });
        info!("[GAME] {} joined by {}, now active", self.id, participant);
        self.opponent = Some(participant);
        Ok(())
    }

    /// The creator withdraws before anyone joins.
    pub fn cancel(&mut self, participant: &ParticipantId, now: u64) -> GameResult<()> {
        if self.status != GameStatus::Created {
            return Err(self.not_active());
        }
        if *participant != self.creator {
            return Err(GameError::NotCreator);
        }
        self.events.push(GameEvent::GameCancelled { game: self.id });
        self.finish(MatchResult::Draw, EndReason::Cancelled, now);
        Ok(())
    }

    // ========================================================================
    // Moves
    // ========================================================================

    /// Submit a move from raw caller coordinates (file, rank, each 0-7).
    pub fn submit_coords(
        &mut self,
        participant: &ParticipantId,
        from: (u8, u8),
        to: (u8, u8),
        promotion: Option<Promotion>,
        now: u64,
    ) -> GameResult<MoveOutcome> {
        let square = |(file, rank): (u8, u8)| {
            Square::from_coords(file, rank)
                .map_err(|_| GameError::InvalidCoordinates { file, rank })
        };
        let mv = Move {
            from: square(from)?,
            to: square(to)?,
            promotion,
        };
        self.submit_move(participant, mv, now)
    }

    /// Submit a move for the participant's colour.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameNotActive`], [`GameError::NotAParticipant`], [`GameError::WrongTurn`]
    /// - [`GameError::ClockExpired`] when the mover's budget ran out at or before `now`
    /// - [`GameError::IllegalMove`] in friendly mode, and in both modes for a missing or
    ///   spurious promotion choice
    pub fn submit_move(
        &mut self,
        participant: &ParticipantId,
        mv: Move,
        now: u64,
    ) -> GameResult<MoveOutcome> {
        let color = self.active_color_of(participant)?;
        if color != self.position.side_to_move {
            return Err(GameError::WrongTurn {
                participant: participant.clone(),
            });
        }
        if let Some(overdue_secs) = self.clocks.overrun(color, now) {
            warn!("[CLOCK] {} {} moved {}s after its budget ran out", self.id, color, overdue_secs);
            return Err(GameError::ClockExpired { overdue_secs });
        }

        let (next, legal) = match self.position.play(mv) {
            Ok(played) => played,
            Err(illegal) => return self.reject_illegal(color, illegal, now),
        };

        self.clocks.charge_move(color, now);
        self.tracker.record(&next, legal.is_progress());
        self.position = next;

        let record = MoveRecord::new(self.history.len(), color, &legal, now);
        self.history.push(record.clone());

        if self.draw_offer == Some(color.opponent()) {
            self.draw_offer = None;
            self.events.push(GameEvent::DrawDeclined { by: color });
            debug!("[GAME] {} draw offer declined by {}", self.id, color);
        }

        self.events.push(GameEvent::MoveMade {
            ply: record.ply,
            color,
            from: mv.from,
            to: mv.to,
            captured: record.captured,
            kind: record.kind,
            check: record.check,
            checkmate: record.checkmate,
        });
        debug!(
            "[GAME] {} ply {}: {} played {} ({:?}){}",
            self.id,
            record.ply,
            color,
            mv,
            record.kind,
            if record.check { " check" } else { "" }
        );

        if legal.checkmate {
            self.finish(MatchResult::win_for(color), EndReason::Checkmate, now);
        } else if legal.stalemate {
            self.finish(MatchResult::Draw, EndReason::Stalemate, now);
        }

        Ok(MoveOutcome::Played(record))
    }

    fn reject_illegal(
        &mut self,
        color: Color,
        illegal: IllegalMove,
        now: u64,
    ) -> GameResult<MoveOutcome> {
        if self.mode == GameMode::Friendly || illegal.reason.is_malformed() {
            warn!("[GAME] {} {} refused: {}", self.id, color, illegal);
            return Err(GameError::IllegalMove(illegal));
        }
        warn!("[GAME] {} {} forfeits: {}", self.id, color, illegal);
        self.finish(
            MatchResult::win_for(color.opponent()),
            EndReason::IllegalMoveForfeit(illegal.reason),
            now,
        );
        Ok(MoveOutcome::Forfeited(illegal))
    }

    // ========================================================================
    // Resignation, draws, timeouts
    // ========================================================================

    pub fn resign(&mut self, participant: &ParticipantId, now: u64) -> GameResult<()> {
        let color = self.active_color_of(participant)?;
        self.finish(MatchResult::win_for(color.opponent()), EndReason::Resignation, now);
        Ok(())
    }

    /// Offer a draw. If the opponent's offer is already pending, the offers meet and the game
    /// is drawn by agreement.
    pub fn offer_draw(&mut self, participant: &ParticipantId, now: u64) -> GameResult<()> {
        let color = self.active_color_of(participant)?;
        if self.draw_offer == Some(color.opponent()) {
            return self.accept_draw(participant, now);
        }
        self.draw_offer = Some(color);
        self.events.push(GameEvent::DrawOffered { by: color });
        info!("[GAME] {} draw offered by {}", self.id, color);
        Ok(())
    }

    pub fn accept_draw(&mut self, participant: &ParticipantId, now: u64) -> GameResult<()> {
        let color = self.active_color_of(participant)?;
        if self.draw_offer != Some(color.opponent()) {
            return Err(GameError::NoPendingDrawOffer);
        }
        self.events.push(GameEvent::DrawAccepted { by: color });
        self.finish(MatchResult::Draw, EndReason::Agreement, now);
        Ok(())
    }

    pub fn claim_repetition(&mut self, participant: &ParticipantId, now: u64) -> GameResult<()> {
        self.active_color_of(participant)?;
        if !self.tracker.can_claim_repetition() {
            return Err(GameError::DrawConditionNotMet {
                condition: "threefold repetition",
            });
        }
        self.finish(MatchResult::Draw, EndReason::Repetition, now);
        Ok(())
    }

    pub fn claim_fifty_move(&mut self, participant: &ParticipantId, now: u64) -> GameResult<()> {
        self.active_color_of(participant)?;
        if !self.tracker.can_claim_fifty_move() {
            return Err(GameError::DrawConditionNotMet {
                condition: "fifty-move rule",
            });
        }
        self.finish(MatchResult::Draw, EndReason::FiftyMoveRule, now);
        Ok(())
    }

    /// Claim a win on time: only on the opponent's turn, once the opponent's budget has run
    /// out since their clock started.
    pub fn claim_timeout(&mut self, participant: &ParticipantId, now: u64) -> GameResult<()> {
        let color = self.active_color_of(participant)?;
        let opponent = color.opponent();
        let flagged = self.position.side_to_move == opponent
            && self.clocks.overrun(opponent, now).is_some();
        if !flagged {
            let remaining_secs =
                self.clocks.remaining_at(opponent, self.position.side_to_move, now);
            return Err(GameError::TimeoutNotYetElapsed { remaining_secs });
        }
        self.clocks.flag(opponent, now);
        info!("[CLOCK] {} {} flagged at {}", self.id, opponent, now);
        self.finish(MatchResult::win_for(color), EndReason::Timeout, now);
        Ok(())
    }

    // ========================================================================
    // Dispute override and settlement
    // ========================================================================

    /// Replace the result with a dispute verdict. Accepted only once the game has ended;
    /// never re-opens play.
    pub fn override_outcome(&mut self, result: MatchResult) -> GameResult<()> {
        let outcome = match (&mut self.outcome, self.status.is_finished()) {
            (Some(outcome), true) => outcome,
            _ => {
                return Err(GameError::GameNotTerminal {
                    status: self.status.to_string(),
                })
            }
        };
        let from = outcome.result;
        outcome.overridden_from.get_or_insert(from);
        outcome.result = result;
        self.events.push(GameEvent::OutcomeOverridden { from, to: result });
        info!("[GAME] {} outcome overridden: {:?} -> {:?}", self.id, from, result);
        Ok(())
    }

    /// Hand a finished game to the collaborators and mark it settled.
    ///
    /// Escrow is released first, then the rating is recorded (played games only). The game is
    /// marked settled only after both succeed, so a collaborator failure leaves it untouched
    /// and the call can be retried.
    pub fn settle(
        &mut self,
        now: u64,
        challenge_window_secs: u64,
        escrow: &mut dyn Escrow,
        ratings: &mut dyn RatingService,
    ) -> GameResult<SettlementReport> {
        if self.status == GameStatus::Settled {
            return Err(GameError::AlreadySettled);
        }
        let report = self.settlement_report().ok_or_else(|| GameError::GameNotTerminal {
            status: self.status.to_string(),
        })?;
        let closes_at = report.outcome.ended_at.saturating_add(challenge_window_secs);
        if now < closes_at {
            return Err(GameError::ChallengeWindowOpen { closes_at });
        }

        escrow.release(&report).inspect_err(|e| {
            warn!("[SETTLE] {} escrow release failed: {}", self.id, e);
        })?;
        if report.players().is_some() {
            ratings.record_result(&report).inspect_err(|e| {
                warn!("[SETTLE] {} rating update failed: {}", self.id, e);
            })?;
        }

        self.status = GameStatus::Settled;
        self.events.push(GameEvent::PrizeClaimed {
            payouts: report.payouts.clone(),
        });
        info!("[SETTLE] {} settled: {:?}", self.id, report.payouts);
        Ok(report)
    }

    /// Report of a finished game, reflecting any override.
    pub fn settlement_report(&self) -> Option<SettlementReport> {
        let outcome = self.outcome.filter(|_| self.status.is_finished())?;
        Some(SettlementReport::new(
            self.id,
            self.creator.clone(),
            self.opponent.clone(),
            self.stake,
            outcome,
        ))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Colour of `participant` in an active game.
    fn active_color_of(&self, participant: &ParticipantId) -> GameResult<Color> {
        if self.status != GameStatus::Active {
            return Err(self.not_active());
        }
        self.color_of(participant).ok_or_else(|| GameError::NotAParticipant {
            participant: participant.clone(),
        })
    }

    fn not_active(&self) -> GameError {
        GameError::GameNotActive {
            status: self.status.to_string(),
        }
    }

    fn finish(&mut self, result: MatchResult, reason: EndReason, now: u64) {
        self.status = reason.status();
        self.draw_offer = None;
        self.outcome = Some(Outcome::new(result, reason, now));
        self.events.push(GameEvent::GameEnded { reason, result });
        info!("[GAME] {} ended: {:?} ({:?})", self.id, result, reason);
    }

    // ========================================================================
    // Read-only queries
    // ========================================================================

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn creator(&self) -> &ParticipantId {
        &self.creator
    }

    pub fn opponent(&self) -> Option<&ParticipantId> {
        self.opponent.as_ref()
    }

    pub fn participant(&self, color: Color) -> Option<&ParticipantId> {
        match color {
            Color::White => Some(&self.creator),
            Color::Black => self.opponent.as_ref(),
        }
    }

    pub fn color_of(&self, participant: &ParticipantId) -> Option<Color> {
        if *participant == self.creator {
            Some(Color::White)
        } else if self.opponent.as_ref() == Some(participant) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn stake(&self) -> Stake {
        self.stake
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn time_control(&self) -> TimeControl {
        self.time_control
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn fen(&self) -> String {
        self.position.to_fen()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn draw_offer(&self) -> Option<Color> {
        self.draw_offer
    }

    pub fn draw_tracker(&self) -> &DrawTracker {
        &self.tracker
    }

    pub fn position_digest(&self) -> PositionDigest {
        self.tracker.digest()
    }

    /// Remaining budget of `color` at `now`. Clocks are frozen once the game is not active.
    pub fn remaining_time(&self, color: Color, now: u64) -> u64 {
        if self.status == GameStatus::Active {
            self.clocks.remaining_at(color, self.position.side_to_move, now)
        } else {
            self.clocks.recorded(color)
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every event logged since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
