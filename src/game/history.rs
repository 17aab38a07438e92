//! Move history
//!
//! The ordered record of accepted moves. Only the caller-supplied [`Move`] is needed to
//! replay the game; the remaining fields are the engine's derived facts, kept for display
//! and audit.

use chess_engine::{
    replay, ChessEngineResult, Color, LegalMove, Move, MoveKind, PieceKind, Position,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 0-based half-move index.
    pub ply: usize,
    pub color: Color,
    pub mv: Move,
    pub piece: PieceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<PieceKind>,
    pub kind: MoveKind,
    pub check: bool,
    pub checkmate: bool,
    /// Caller timestamp at which the move was accepted.
    pub at: u64,
}

impl MoveRecord {
    pub(crate) fn new(ply: usize, color: Color, legal: &LegalMove, at: u64) -> Self {
        MoveRecord {
            ply,
            color,
            mv: legal.mv,
            piece: legal.piece.kind,
            captured: legal.captured.map(|p| p.kind),
            kind: legal.kind,
            check: legal.check,
            checkmate: legal.checkmate,
            at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    /// The moves as submitted, in order.
    pub fn moves(&self) -> Vec<Move> {
        self.records.iter().map(|r| r.mv).collect()
    }

    /// UCI strings, e.g. for display or a replay script.
    pub fn uci(&self) -> Vec<String> {
        self.records.iter().map(|r| r.mv.to_string()).collect()
    }

    /// Recompute the final position from the standard start.
    pub fn replay(&self) -> ChessEngineResult<Position> {
        replay(&self.moves())
    }
}
