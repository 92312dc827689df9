use crate::{bitboard::BitBoard, constants::NUM_SQUARES};

/// Row-major from the top of the board: row 0 is rank 8, column 0 is the a-file.
/// The discriminant is `row * 8 + col`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[rustfmt::skip]
pub enum Square {
  A8 = 0, B8, C8, D8, E8, F8, G8, H8,
  A7, B7, C7, D7, E7, F7, G7, H7,
  A6, B6, C6, D6, E6, F6, G6, H6,
  A5, B5, C5, D5, E5, F5, G5, H5,
  A4, B4, C4, D4, E4, F4, G4, H4,
  A3, B3, C3, D3, E3, F3, G3, H3,
  A2, B2, C2, D2, E2, F2, G2, H2,
  A1, B1, C1, D1, E1, F1, G1, H1,
}

/// From white's viewpoint. Used for ray walking.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    N = 0,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White = 0,
    Black = 1,
}

/// The content of an occupied board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColoredPiece {
    pub side: Side,
    pub piece: Piece,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// Castle permissions as bit flags.
///
/// 0001 white kingside
/// 0010 white queenside
/// 0100 black kingside
/// 1000 black queenside
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(pub u8);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promote: Option<Piece>,
    pub en_passant: bool,
    pub castle: Option<CastleSide>,
}

/// A move as typed by a user, before it is matched against the legal moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveData {
    pub from: Square,
    pub to: Square,
    pub promote: Option<Piece>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    None,
    Single(Square),
    Double,
}

/// Everything the move generator needs to know about the opponent's pieces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AttackMap {
    pub king_danger: BitBoard, // Squares the side to move's king may not step on
    pub check: CheckState,
    pub pinned: BitBoard,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Checkmate(Side), // Winner
    Stalemate,
    DrawByFiftyMoveRule,
    DrawByInsufficientMaterial,
}

pub type Grid = [Option<ColoredPiece>; NUM_SQUARES];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub value: Grid,
}
