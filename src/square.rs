use std::fmt;

use crate::{
    constants::{NUM_FILES, NUM_SQUARES},
    types::{Direction, Square},
};

impl Square {
    #[rustfmt::skip]
    pub const ALL: [Square; NUM_SQUARES] = [
        Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
        Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
        Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
        Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
        Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
        Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
        Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
        Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
    ];

    /// Row-major scan, top row first.
    pub fn iter() -> impl Iterator<Item = Square> {
        Square::ALL.into_iter()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn as_bit(self) -> u64 {
        1u64 << (self as u64)
    }

    /// 0-indexed (0-7), 0 is rank 8
    pub fn row(self) -> i8 {
        (self as u8 / NUM_FILES as u8) as i8
    }

    /// 0-indexed (0-7), 0 is the a-file
    pub fn col(self) -> i8 {
        (self as u8 % NUM_FILES as u8) as i8
    }

    /// The rank as printed on a board (1-8)
    pub fn rank_number(self) -> u8 {
        8 - self.row() as u8
    }

    pub fn from_row_col(row: i8, col: i8) -> Option<Square> {
        if !(0..8).contains(&row) || !(0..8).contains(&col) {
            return None;
        }

        Some(Square::ALL[(row * 8 + col) as usize])
    }

    /// The square `rows` down and `cols` right, if it is still on the board
    pub fn offset(self, rows: i8, cols: i8) -> Option<Square> {
        Square::from_row_col(self.row() + rows, self.col() + cols)
    }

    pub fn step(self, direction: Direction) -> Option<Square> {
        let (rows, cols) = direction.delta();
        self.offset(rows, cols)
    }

    /// Algebraic name (e.g. "e4")
    pub fn name(self) -> String {
        format!(
            "{}{}",
            (b'a' + self.col() as u8) as char,
            self.rank_number()
        )
    }

    /// Parses an algebraic square name (e.g. "e4")
    pub fn parse(name: &str) -> Option<Square> {
        let mut chars = name.chars();

        let file = chars.next()?;
        let rank = chars.next()?;

        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }

        let col = (file as u8 - b'a') as i8;
        let row = 8 - (rank as u8 - b'0') as i8;

        Square::from_row_col(row, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    pub const DIAGONAL: [Direction; 4] = [Direction::NE, Direction::SE, Direction::SW, Direction::NW];

    /// (row, column) delta. North is toward rank 8, i.e. row - 1.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::N => (-1, 0),
            Direction::NE => (-1, 1),
            Direction::E => (0, 1),
            Direction::SE => (1, 1),
            Direction::S => (1, 0),
            Direction::SW => (1, -1),
            Direction::W => (0, -1),
            Direction::NW => (-1, -1),
        }
    }

    /// The direction leading from `from` to `to` along a rank, file or diagonal
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        let rows = to.row() - from.row();
        let cols = to.col() - from.col();

        if from == to || (rows != 0 && cols != 0 && rows.abs() != cols.abs()) {
            return None;
        }

        let delta = (rows.signum(), cols.signum());

        Direction::ALL.into_iter().find(|direction| direction.delta() == delta)
    }
}
