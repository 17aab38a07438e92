//! Board representation and helper queries
//!
//! The board is 64 signed piece codes indexed `rank * 8 + file` (see [`crate::constants`]).
//! It is `Copy`, so the legality engine simulates moves on a scratch copy and the caller's
//! board is never touched by a rejected move.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::{Color, Piece, PieceKind, Square};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "squares_serde")]
    squares: [i8; 64],
}

impl Board {
    /// Initialize a board to the standard starting position
    pub fn standard() -> Self {
        Board { squares: SETUP }
    }

    pub fn empty() -> Self {
        Board { squares: [0; 64] }
    }

    /// Build from raw codes. Codes outside -6..=6 are kept as-is and read back as empty
    /// by [`Board::piece_at`].
    pub fn from_codes(squares: [i8; 64]) -> Self {
        Board { squares }
    }

    pub fn codes(&self) -> &[i8; 64] {
        &self.squares
    }

    #[inline]
    pub fn code_at(&self, square: Square) -> i8 {
        self.squares[square.index()]
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        Piece::from_code(self.code_at(square))
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Check if the square holds a piece of `color`
    #[inline]
    pub fn belongs_to(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color == color)
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece.map_or(VOID_ID, Piece::code);
    }

    /// Remove and return whatever stood on `square`.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square);
        self.squares[square.index()] = VOID_ID;
        piece
    }

    /// Occupied squares with their pieces, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Find the king position for a color
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        self.pieces().find(|(_, p)| *p == king).map(|(sq, _)| sq)
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|(_, p)| *p == piece).count()
    }

    /// Exactly one king per side.
    pub fn has_valid_kings(&self) -> bool {
        Color::ALL
            .iter()
            .all(|&c| self.count(Piece::new(c, PieceKind::King)) == 1)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

/// Eight ranks, top (rank 8) first, one FEN letter or `.` per square.
impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            let row: String = (0..8)
                .filter_map(|file| Square::new(file, rank))
                .map(|sq| self.piece_at(sq).map_or('.', Piece::fen_char))
                .collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

mod squares_serde {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(squares: &[i8; 64], serializer: S) -> Result<S::Ok, S::Error> {
        squares.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[i8; 64], D::Error> {
        let codes = Vec::<i8>::deserialize(deserializer)?;
        let len = codes.len();
        codes
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"64 square codes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_standard_board_layout() {
        let board = Board::standard();
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert!(board.is_empty(sq("e4")));
        assert_eq!(board.pieces().count(), 32);
        assert!(board.has_valid_kings());
    }

    #[test]
    fn test_king_square_lookup() {
        let board = Board::standard();
        assert_eq!(board.king_square(Color::White), Some(sq("e1")));
        assert_eq!(board.king_square(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn test_take_empties_the_square() {
        let mut board = Board::standard();
        let taken = board.take(sq("a2"));
        assert_eq!(taken, Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert!(board.is_empty(sq("a2")));
        assert_eq!(board.take(sq("a2")), None);
    }

    #[test]
    fn test_board_serde_round_trip() {
        let board = Board::standard();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
        assert!(serde_json::from_str::<Board>(r#"{"squares":[0,1]}"#).is_err());
    }
}
