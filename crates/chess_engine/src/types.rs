//! # Referee Core Types
//!
//! Value types shared by every part of the rules engine:
//!
//! - [`Color`] and [`PieceKind`] / [`Piece`] - views over the signed `i8` piece codes stored on
//!   the [`Board`]
//! - [`Square`] - a checked board index (`rank * 8 + file`, a1 = 0, h8 = 63)
//! - [`Move`] - caller-proposed origin, destination and optional promotion choice
//! - [`MoveKind`] - the derived classification of a validated move
//! - [`CastlingRights`] and [`Rights`] - everything beyond piece placement that decides legality
//! - [`Position`] - board, rights, side to move and move counters bundled together
//!
//! Nothing in here is trusted from the caller except the three fields of [`Move`]; all other
//! move facts are computed by [`crate::api::validate`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::*;
use crate::error::{ChessEngineError, ChessEngineResult};

/// Side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colours, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Sign applied to piece ids on the board.
    pub fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank delta of a single pawn step.
    pub fn forward(self) -> i8 {
        self.sign()
    }

    pub fn back_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_start_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(self) -> i8 {
        self.opponent().back_rank()
    }

    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Closed set of piece types. Movement and attack rules dispatch on this enum
/// (see [`crate::move_gen`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn from_id(id: i8) -> Option<PieceKind> {
        match id {
            PAWN_ID => Some(PieceKind::Pawn),
            KNIGHT_ID => Some(PieceKind::Knight),
            BISHOP_ID => Some(PieceKind::Bishop),
            ROOK_ID => Some(PieceKind::Rook),
            QUEEN_ID => Some(PieceKind::Queen),
            KING_ID => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn id(self) -> i8 {
        match self {
            PieceKind::Pawn => PAWN_ID,
            PieceKind::Knight => KNIGHT_ID,
            PieceKind::Bishop => BISHOP_ID,
            PieceKind::Rook => ROOK_ID,
            PieceKind::Queen => QUEEN_ID,
            PieceKind::King => KING_ID,
        }
    }

    /// Lowercase FEN letter.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A coloured piece, decoded from a non-zero board code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Decode a signed board code; `0` and out-of-range magnitudes yield `None`.
    pub fn from_code(code: i8) -> Option<Piece> {
        let kind = PieceKind::from_id(code.checked_abs()?)?;
        let color = if code > 0 { Color::White } else { Color::Black };
        Some(Piece { color, kind })
    }

    pub fn code(self) -> i8 {
        self.kind.id() * self.color.sign()
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { color, kind })
    }
}

/// A square on the board. Only constructible through checked constructors, so every
/// `Square` in circulation is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square(u8);

impl Square {
    /// Build from signed file/rank; `None` when off the board.
    pub fn new(file: i8, rank: i8) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Build from caller-supplied coordinates.
    ///
    /// # Errors
    ///
    /// [`ChessEngineError::InvalidCoordinates`] when either coordinate is outside 0-7.
    pub fn from_coords(file: u8, rank: u8) -> ChessEngineResult<Square> {
        if file < 8 && rank < 8 {
            Ok(Square(rank * 8 + file))
        } else {
            Err(ChessEngineError::InvalidCoordinates { file, rank })
        }
    }

    /// Build from file/rank known to be on the board (engine-internal constants).
    pub(crate) fn at(file: i8, rank: i8) -> Square {
        debug_assert!((0..8).contains(&file) && (0..8).contains(&rank));
        Square(((rank & 7) * 8 + (file & 7)) as u8)
    }

    pub fn from_index(index: u8) -> Option<Square> {
        (index < 64).then_some(Square(index))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn file(self) -> i8 {
        (self.0 % 8) as i8
    }

    pub fn rank(self) -> i8 {
        (self.0 / 8) as i8
    }

    /// Step by a `(file, rank)` delta; `None` when the step leaves the board.
    pub fn offset(self, (df, dr): Delta) -> Option<Square> {
        Square::new(self.file() + df, self.rank() + dr)
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file() as u8) as char;
        let rank = (b'1' + self.rank() as u8) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let invalid = || ChessEngineError::InvalidSquareName {
            name: s.to_string(),
        };
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::from_coords(file, rank).map_err(|_| invalid())
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = ChessEngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Piece a pawn may become on the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    pub fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }

    pub fn from_letter(letter: char) -> Option<Promotion> {
        match letter.to_ascii_lowercase() {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }
}

/// A proposed move exactly as a player submits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: Promotion) -> Self {
        Move {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

/// Long algebraic (UCI) notation, e.g. `e2e4`, `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.kind().letter())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessEngineError::InvalidMoveNotation {
            notation: s.to_string(),
        };
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }
        let from: Square = s[0..2].parse().map_err(|_| invalid())?;
        let to: Square = s[2..4].parse().map_err(|_| invalid())?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(Promotion::from_letter(c).ok_or_else(invalid)?),
            None => None,
        };
        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

/// Classification of a validated move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MoveKind {
    Quiet,
    Capture,
    DoublePawnPush,
    EnPassant,
    CastleKingSide,
    CastleQueenSide,
    Promotion { piece: PieceKind, capture: bool },
}

impl MoveKind {
    pub fn is_capture(self) -> bool {
        matches!(
            self,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::Promotion { capture: true, .. }
        )
    }

    pub fn is_castle(self) -> bool {
        matches!(self, MoveKind::CastleKingSide | MoveKind::CastleQueenSide)
    }
}

/// Which rook a castling move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub fn rook_file(self) -> i8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    pub fn king_target_file(self) -> i8 {
        match self {
            CastleSide::KingSide => KING_SIDE_CASTLE_FILE,
            CastleSide::QueenSide => QUEEN_SIDE_CASTLE_FILE,
        }
    }

    /// File the rook lands on.
    pub fn rook_target_file(self) -> i8 {
        match self {
            CastleSide::KingSide => KING_SIDE_CASTLE_FILE - 1,
            CastleSide::QueenSide => QUEEN_SIDE_CASTLE_FILE + 1,
        }
    }
}

/// Castling availability: `true` while neither the king nor that rook has moved
/// (or been captured).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        CastlingRights {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    pub fn none() -> Self {
        CastlingRights {
            white_king_side: false,
            white_queen_side: false,
            black_king_side: false,
            black_queen_side: false,
        }
    }

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_king_side,
            (Color::White, CastleSide::QueenSide) => self.white_queen_side,
            (Color::Black, CastleSide::KingSide) => self.black_king_side,
            (Color::Black, CastleSide::QueenSide) => self.black_queen_side,
        }
    }

    pub fn clear(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_king_side = false,
            (Color::White, CastleSide::QueenSide) => self.white_queen_side = false,
            (Color::Black, CastleSide::KingSide) => self.black_king_side = false,
            (Color::Black, CastleSide::QueenSide) => self.black_queen_side = false,
        }
    }

    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, CastleSide::KingSide);
        self.clear(color, CastleSide::QueenSide);
    }

    /// Compact encoding used by the repetition key: bit 0 = K, 1 = Q, 2 = k, 3 = q.
    pub fn bits(&self) -> u8 {
        (self.white_king_side as u8)
            | (self.white_queen_side as u8) << 1
            | (self.black_king_side as u8) << 2
            | (self.black_queen_side as u8) << 3
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::all()
    }
}

/// Non-placement state that affects legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rights {
    pub castling: CastlingRights,
    /// Square a pawn skipped on the previous half-move; live for exactly one reply.
    pub en_passant: Option<Square>,
}

impl Rights {
    pub fn initial() -> Self {
        Rights::default()
    }
}

/// Board, rights and move counters: the full state the engine needs and FEN can express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub rights: Rights,
    pub side_to_move: Color,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Position {
    /// Standard initial position, White to move.
    pub fn standard() -> Self {
        Position {
            board: Board::standard(),
            rights: Rights::initial(),
            side_to_move: Color::White,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::standard()
    }
}
