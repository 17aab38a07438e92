//! Replaying a recorded move list
//!
//! Anyone holding a game's move list can recompute its final position and compare it with
//! the referee's recorded one.

use tracing::trace;

use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::{Move, Position};

/// Replay `moves` from the standard initial position.
///
/// # Errors
///
/// [`ChessEngineError::Replay`] naming the first refused ply (0-based).
pub fn replay(moves: &[Move]) -> ChessEngineResult<Position> {
    replay_from(Position::standard(), moves)
}

/// Replay `moves` from an arbitrary starting position.
///
/// # Errors
///
/// [`ChessEngineError::Replay`] naming the first refused ply (0-based).
pub fn replay_from(start: Position, moves: &[Move]) -> ChessEngineResult<Position> {
    let mut position = start;
    for (ply, &mv) in moves.iter().enumerate() {
        let (next, _) = position
            .play(mv)
            .map_err(|source| ChessEngineError::Replay { ply, source })?;
        position = next;
    }
    trace!(plies = moves.len(), "replay complete");
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IllegalMoveReason;
    use crate::types::Color;

    fn moves(list: &[&str]) -> Vec<Move> {
        list.iter().map(|m| m.parse().unwrap()).collect()
    }

    #[test]
    fn test_replay_of_empty_list_is_initial_position() {
        assert_eq!(replay(&[]).unwrap(), Position::standard());
    }

    #[test]
    fn test_replay_tracks_side_and_counters() {
        let position = replay(&moves(&["g1f3", "g8f6", "f3g1", "f6g8"])).unwrap();
        assert_eq!(position.board, Position::standard().board);
        assert_eq!(position.side_to_move, Color::White);
        assert_eq!(position.halfmove_clock, 4);
        assert_eq!(position.fullmove_number, 3);
    }

    #[test]
    fn test_replay_reports_first_illegal_ply() {
        let err = replay(&moves(&["e2e4", "e7e5", "e1e3"])).unwrap_err();
        match err {
            ChessEngineError::Replay { ply, source } => {
                assert_eq!(ply, 2);
                assert_eq!(source.reason, IllegalMoveReason::UnreachableDestination);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
