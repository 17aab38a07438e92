//! Game registry: an arena of games addressed by [`GameId`]
//!
//! Games are appended, never removed, and ids are never reused. Other components hold only
//! ids; every action resolves the id here and touches exactly one game.

use tracing::{info, warn};

use super::error::{GameError, GameResult};
use super::lifecycle::Game;
use super::settlement::{Escrow, RatingService, SettlementReport};
use super::types::{GameId, GameMode, ParticipantId, Stake, TimeControl};
use crate::config::RefereeConfig;

#[derive(Debug, Clone, Default)]
pub struct GameRegistry {
    config: RefereeConfig,
    games: Vec<Game>,
}

impl GameRegistry {
    pub fn new(config: RefereeConfig) -> Self {
        GameRegistry {
            config,
            games: Vec::new(),
        }
    }

    pub fn config(&self) -> &RefereeConfig {
        &self.config
    }

    /// Lock the creator's stake, then instantiate the game.
    pub fn create(
        &mut self,
        creator: ParticipantId,
        stake: Stake,
        time_control: TimeControl,
        mode: GameMode,
        now: u64,
        escrow: &mut dyn Escrow,
    ) -> GameResult<GameId> {
        let id = GameId(self.games.len() as u64);
        escrow.lock_stake(id, &creator, stake).inspect_err(|e| {
            warn!("[REGISTRY] stake lock for {} by {} failed: {}", id, creator, e);
        })?;

        let budget = self.config.time_controls.budget(time_control);
        self.games
            .push(Game::new(id, creator, stake, mode, time_control, budget, now));
        info!("[REGISTRY] registered game {} ({} total)", id, self.games.len());
        Ok(id)
    }

    /// Check the join, lock the joiner's stake, then activate the game.
    pub fn join(
        &mut self,
        id: GameId,
        participant: ParticipantId,
        stake: Stake,
        now: u64,
        escrow: &mut dyn Escrow,
    ) -> GameResult<()> {
        self.game(id)?.check_join(&participant, stake)?;
        escrow.lock_stake(id, &participant, stake).inspect_err(|e| {
            warn!("[REGISTRY] stake lock for {} by {} failed: {}", id, participant, e);
        })?;
        self.game_mut(id)?.join(participant, stake, now)
    }

    /// Settle with the configured challenge window.
    pub fn settle(
        &mut self,
        id: GameId,
        now: u64,
        escrow: &mut dyn Escrow,
        ratings: &mut dyn RatingService,
    ) -> GameResult<SettlementReport> {
        let window = self.config.challenge_window_secs;
        self.game_mut(id)?.settle(now, window, escrow, ratings)
    }

    pub fn game(&self, id: GameId) -> GameResult<&Game> {
        id.index()
            .and_then(|i| self.games.get(i))
            .ok_or(GameError::UnknownGame(id))
    }

    pub fn game_mut(&mut self, id: GameId) -> GameResult<&mut Game> {
        id.index()
            .and_then(|i| self.games.get_mut(i))
            .ok_or(GameError::UnknownGame(id))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::settlement::LedgerEscrow;
    use crate::game::GameStatus;

    fn funded(names: &[&str]) -> LedgerEscrow {
        let mut escrow = LedgerEscrow::new();
        for name in names {
            escrow.deposit(&ParticipantId::from(*name), 100);
        }
        escrow
    }

    #[test]
    fn test_ids_are_dense_and_lookups_checked() {
        let mut escrow = funded(&["alice", "carol"]);
        let mut registry = GameRegistry::default();
        let a = registry
            .create("alice".into(), 10, TimeControl::Short, GameMode::Friendly, 0, &mut escrow)
            .unwrap();
        let b = registry
            .create("carol".into(), 10, TimeControl::Long, GameMode::Tournament, 0, &mut escrow)
            .unwrap();
        assert_eq!((a, b), (GameId(0), GameId(1)));
        assert_eq!(registry.len(), 2);
        assert!(matches!(registry.game(GameId(7)), Err(GameError::UnknownGame(GameId(7)))));
    }

    #[test]
    fn test_failed_stake_lock_creates_nothing() {
        let mut escrow = LedgerEscrow::new();
        let mut registry = GameRegistry::default();
        let err = registry
            .create("alice".into(), 10, TimeControl::Short, GameMode::Friendly, 0, &mut escrow)
            .unwrap_err();
        assert!(matches!(err, GameError::Collaborator(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_join_checks_stake_before_escrow() {
        let mut escrow = funded(&["alice", "bob"]);
        let mut registry = GameRegistry::default();
        let id = registry
            .create("alice".into(), 10, TimeControl::Short, GameMode::Friendly, 0, &mut escrow)
            .unwrap();

        let err = registry.join(id, "bob".into(), 5, 1, &mut escrow).unwrap_err();
        assert!(matches!(err, GameError::StakeMismatch { expected: 10, offered: 5 }));
        assert_eq!(escrow.balance(&"bob".into()), 100);

        registry.join(id, "bob".into(), 10, 1, &mut escrow).unwrap();
        assert_eq!(escrow.balance(&"bob".into()), 90);
        assert_eq!(escrow.held(id), 20);
        assert_eq!(registry.game(id).unwrap().status(), GameStatus::Active);
    }

    #[test]
    fn test_games_are_independent() {
        let mut escrow = funded(&["alice", "bob", "carol", "dave"]);
        let mut registry = GameRegistry::default();
        let first = registry
            .create("alice".into(), 1, TimeControl::Short, GameMode::Friendly, 0, &mut escrow)
            .unwrap();
        let second = registry
            .create("carol".into(), 1, TimeControl::Short, GameMode::Friendly, 0, &mut escrow)
            .unwrap();
        registry.join(first, "bob".into(), 1, 0, &mut escrow).unwrap();
        registry.join(second, "dave".into(), 1, 0, &mut escrow).unwrap();

        registry
            .game_mut(first)
            .unwrap()
            .submit_move(&"alice".into(), "e2e4".parse().unwrap(), 1)
            .unwrap();
        assert_eq!(registry.game(first).unwrap().history().len(), 1);
        assert!(registry.game(second).unwrap().history().is_empty());
        assert_eq!(
            registry.game(second).unwrap().fen(),
            chess_engine::Position::standard().to_fen()
        );
    }
}
