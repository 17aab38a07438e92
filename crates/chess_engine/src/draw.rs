//! Draw-condition tracking: repetition counts and the fifty-move counter
//!
//! The tracker only answers whether a claim would currently succeed. Stalemate is not tracked
//! here; [`crate::api::validate`] reports it directly.

use std::collections::HashMap;

use crate::constants::{FIFTY_MOVE_HALFMOVES, REPETITION_THRESHOLD};
use crate::hash::{PositionDigest, RepetitionKey};
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawTracker {
    occurrences: HashMap<RepetitionKey, u32>,
    current: RepetitionKey,
    halfmove_clock: u32,
}

impl DrawTracker {
    /// Start tracking from `start`, which counts as its first occurrence. The half-move clock
    /// is taken from the position so FEN-loaded games keep their counter.
    pub fn new(start: &Position) -> Self {
        let current = RepetitionKey::of(start);
        DrawTracker {
            occurrences: HashMap::from([(current, 1)]),
            current,
            halfmove_clock: start.halfmove_clock,
        }
    }

    /// Record the position reached by a move. `progress` is true for captures and pawn moves.
    pub fn record(&mut self, position: &Position, progress: bool) {
        self.current = RepetitionKey::of(position);
        let count = self.occurrences.entry(self.current).or_insert(0);
        *count = count.saturating_add(1);
        self.halfmove_clock = if progress {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
    }

    /// Occurrences of the current position, including this one.
    pub fn repetition_count(&self) -> u32 {
        self.occurrences.get(&self.current).copied().unwrap_or(0)
    }

    pub fn can_claim_repetition(&self) -> bool {
        self.repetition_count() >= REPETITION_THRESHOLD
    }

    /// Half-moves since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn can_claim_fifty_move(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    pub fn current_key(&self) -> RepetitionKey {
        self.current
    }

    pub fn digest(&self) -> PositionDigest {
        self.current.digest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move;

    fn play(position: &Position, tracker: &mut DrawTracker, uci: &str) -> Position {
        let mv: Move = uci.parse().unwrap();
        let (next, legal) = position.play(mv).unwrap();
        tracker.record(&next, legal.is_progress());
        next
    }

    #[test]
    fn test_knight_shuffle_reaches_threefold() {
        let mut position = Position::standard();
        let mut tracker = DrawTracker::new(&position);
        assert_eq!(tracker.repetition_count(), 1);

        for round in 0..2 {
            for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                position = play(&position, &mut tracker, uci);
            }
            assert_eq!(tracker.repetition_count(), round + 2);
        }
        assert!(tracker.can_claim_repetition());
        assert_eq!(tracker.halfmove_clock(), 8);
    }

    #[test]
    fn test_two_occurrences_are_not_enough() {
        let mut position = Position::standard();
        let mut tracker = DrawTracker::new(&position);
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            position = play(&position, &mut tracker, uci);
        }
        assert_eq!(tracker.repetition_count(), 2);
        assert!(!tracker.can_claim_repetition());
    }

    #[test]
    fn test_en_passant_target_separates_positions() {
        // After 1.e4 the target e3 is live; the same placement reached later without a target
        // is a different key.
        let mut position = Position::standard();
        let mut tracker = DrawTracker::new(&position);
        position = play(&position, &mut tracker, "e2e4");
        let after_e4 = position.clone();
        let with_target = tracker.current_key();
        for uci in ["g8f6", "g1f3", "f6g8", "f3g1"] {
            position = play(&position, &mut tracker, uci);
        }
        assert_eq!(position.board, after_e4.board);
        assert_eq!(position.side_to_move, after_e4.side_to_move);
        assert_ne!(tracker.current_key(), with_target);
        assert_eq!(tracker.repetition_count(), 1);
    }

    #[test]
    fn test_pawn_move_resets_fifty_move_counter() {
        let mut position = Position::standard();
        let mut tracker = DrawTracker::new(&position);
        position = play(&position, &mut tracker, "g1f3");
        assert_eq!(tracker.halfmove_clock(), 1);
        play(&position, &mut tracker, "e7e5");
        assert_eq!(tracker.halfmove_clock(), 0);
        assert!(!tracker.can_claim_fifty_move());
    }

    #[test]
    fn test_fifty_move_threshold_from_fen_counter() {
        let position = Position::from_fen("7k/8/8/8/8/8/8/K6R w - - 99 80").unwrap();
        let mut tracker = DrawTracker::new(&position);
        assert!(!tracker.can_claim_fifty_move());
        play(&position, &mut tracker, "h1h2");
        assert_eq!(tracker.halfmove_clock(), 100);
        assert!(tracker.can_claim_fifty_move());
    }

    #[test]
    fn test_halfmove_clock_saturates_at_max() {
        let position = Position::from_fen("k7/8/8/8/8/8/8/K6R w - - 4294967295 1").unwrap();
        let mut tracker = DrawTracker::new(&position);
        play(&position, &mut tracker, "h1h2");
        assert_eq!(tracker.halfmove_clock(), u32::MAX);
        assert!(tracker.can_claim_fifty_move());
    }
}
