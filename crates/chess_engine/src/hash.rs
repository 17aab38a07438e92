//! Canonical position keys for repetition counting
//!
//! A [`RepetitionKey`] is the 67-byte encoding of everything that makes two positions "the
//! same" for the repetition rule: placement, side to move, castling rights and the
//! en-passant target. Positions that differ only in rights never share a key.
//!
//! [`RepetitionKey::digest`] commits to a key with SHA-256 so outside observers can refer to a
//! position without reading the board.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::board::Board;
use crate::constants::NO_EN_PASSANT;
use crate::types::{Color, Position, Rights};

pub const KEY_LEN: usize = 67;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepetitionKey([u8; KEY_LEN]);

impl RepetitionKey {
    pub fn new(board: &Board, rights: &Rights, side_to_move: Color) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        for (slot, &code) in bytes.iter_mut().zip(board.codes().iter()) {
            *slot = code as u8;
        }
        bytes[64] = side_to_move.index() as u8;
        bytes[65] = rights.castling.bits();
        bytes[66] = rights.en_passant.map_or(NO_EN_PASSANT, |sq| sq.as_u8());
        RepetitionKey(bytes)
    }

    pub fn of(position: &Position) -> Self {
        RepetitionKey::new(&position.board, &position.rights, position.side_to_move)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// SHA-256 of the key bytes, lowercase hex.
    pub fn digest(&self) -> PositionDigest {
        PositionDigest(hex::encode(Sha256::digest(self.0)))
    }
}

impl fmt::Display for RepetitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for RepetitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RepetitionKey({self})")
    }
}

/// Hex-encoded SHA-256 commitment to a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionDigest(String);

impl PositionDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
