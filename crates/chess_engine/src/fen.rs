//! FEN import and export for [`Position`]
//!
//! Used as the fixture format in tests and as the read-only rendering hand-off. Import
//! rejects positions the referee could never reach: a king count other than one per side,
//! or the side not to move already in check.

use crate::board::Board;
use crate::error::FenError;
use crate::move_gen::is_in_check;
use crate::types::{CastleSide, CastlingRights, Color, Piece, Position, Rights, Square};

impl Position {
    /// Parse a FEN string. The two move counters may be omitted (defaults 0 and 1).
    ///
    /// # Errors
    ///
    /// [`FenError`] naming the first malformed field.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 || fields.len() > 6 {
            return Err(FenError::MissingFields { found: fields.len() });
        }

        let board = parse_placement(fields[0])?;
        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };
        let castling = parse_castling(fields[2])?;
        let en_passant = parse_en_passant(fields[3], side_to_move)?;
        let halfmove_clock = parse_counter(fields.get(4).copied(), 0)?;
        let fullmove_number = parse_counter(fields.get(5).copied(), 1)?;

        if !board.has_valid_kings() {
            return Err(FenError::KingCount);
        }
        if is_in_check(&board, side_to_move.opponent()) {
            return Err(FenError::OpponentInCheck);
        }

        Ok(Position {
            board,
            rights: Rights { castling, en_passant },
            side_to_move,
            halfmove_clock,
            fullmove_number,
        })
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board.piece_at(Square::at(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        placement.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };

        let mut castling = String::new();
        for (color, castle, letter) in [
            (Color::White, CastleSide::KingSide, 'K'),
            (Color::White, CastleSide::QueenSide, 'Q'),
            (Color::Black, CastleSide::KingSide, 'k'),
            (Color::Black, CastleSide::QueenSide, 'q'),
        ] {
            if self.rights.castling.has(color, castle) {
                castling.push(letter);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .rights
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{placement} {side} {castling} {en_passant} {} {}",
            self.halfmove_clock, self.fullmove_number
        )
    }
}

fn parse_placement(field: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::Placement(format!("expected 8 ranks, found {}", ranks.len())));
    }

    let mut board = Board::empty();
    for (row, text) in ranks.iter().enumerate() {
        let rank = 7 - row as i8;
        let mut file: i8 = 0;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as i8;
            } else {
                let piece = Piece::from_fen_char(c)
                    .ok_or_else(|| FenError::Placement(format!("unknown piece letter {c:?}")))?;
                let square = Square::new(file, rank)
                    .ok_or_else(|| FenError::Placement(format!("rank {} overflows", rank + 1)))?;
                board.set(square, Some(piece));
                file += 1;
            }
            if file > 8 {
                return Err(FenError::Placement(format!("rank {} overflows", rank + 1)));
            }
        }
        if file != 8 {
            return Err(FenError::Placement(format!("rank {} has {file} files", rank + 1)));
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' if !rights.white_king_side => rights.white_king_side = true,
            'Q' if !rights.white_queen_side => rights.white_queen_side = true,
            'k' if !rights.black_king_side => rights.black_king_side = true,
            'q' if !rights.black_queen_side => rights.black_queen_side = true,
            _ => return Err(FenError::Castling(field.to_string())),
        }
    }
    Ok(rights)
}

/// The target must sit on the rank a pawn of the side not to move just skipped.
fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let square: Square = field
        .parse()
        .map_err(|_| FenError::EnPassant(field.to_string()))?;
    let mover = side_to_move.opponent();
    let skipped_rank = mover.pawn_start_rank() + mover.forward();
    if square.rank() != skipped_rank {
        return Err(FenError::EnPassant(field.to_string()));
    }
    Ok(Some(square))
}

fn parse_counter(field: Option<&str>, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| FenError::Counter(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_standard_position_round_trip() {
        assert_eq!(Position::standard().to_fen(), START);
        assert_eq!(Position::from_fen(START).unwrap(), Position::standard());
    }

    #[test]
    fn test_fen_after_double_push_carries_target() {
        let mv: Move = "e2e4".parse().unwrap();
        let (after, _) = Position::standard().play(mv).unwrap();
        assert_eq!(
            after.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(Position::from_fen(&after.to_fen()).unwrap(), after);
    }

    #[test]
    fn test_counters_default_when_omitted() {
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w -"),
            Err(FenError::MissingFields { found: 3 })
        );

        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(position.halfmove_clock, 0);
        assert_eq!(position.fullmove_number, 1);
        assert_eq!(position.rights.castling, CastlingRights::none());
    }

    #[test]
    fn test_rejects_bad_king_counts() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::KingCount)
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(FenError::KingCount)
        );
    }

    #[test]
    fn test_rejects_side_not_to_move_in_check() {
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4KR2 w - - 0 1").is_ok());
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1"),
            Err(FenError::OpponentInCheck)
        );
    }

    #[test]
    fn test_rejects_malformed_fields() {
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::SideToMove(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w KK - 0 1"),
            Err(FenError::Castling(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - e4 0 1"),
            Err(FenError::EnPassant(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(FenError::Counter(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/9/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::Placement(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::Placement(_))
        ));
    }
}
