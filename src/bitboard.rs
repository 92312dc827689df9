use crate::types::{Direction, Square};

/// Set of squares. Bit `n` is the square with index `n`, so A8 is the lowest bit.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BitBoard(pub u64);

impl BitBoard {
    pub const EMPTY: BitBoard = BitBoard(0);

    pub fn set_bit(&mut self, square: Square) {
        self.0 |= square.as_bit();
    }

    pub fn is_bit_set(&self, square: Square) -> bool {
        (self.0 & square.as_bit()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count_bits(&self) -> u32 {
        self.0.count_ones()
    }

    /// Removes and returns the lowest square in the set
    pub fn next_bit(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }

        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;

        Some(Square::ALL[index])
    }

    /// Squares strictly between two squares on a shared rank, file or diagonal.
    /// Empty when the squares are not aligned or adjacent.
    pub fn between(from: Square, to: Square) -> BitBoard {
        let mut between = BitBoard::EMPTY;

        let Some(direction) = Direction::between(from, to) else {
            return between;
        };

        let mut current = from;

        while let Some(next) = current.step(direction) {
            if next == to {
                break;
            }

            between.set_bit(next);
            current = next;
        }

        between
    }
}

impl Iterator for BitBoard {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        self.next_bit()
    }
}

impl FromIterator<Square> for BitBoard {
    fn from_iter<I: IntoIterator<Item = Square>>(squares: I) -> Self {
        let mut bitboard = BitBoard::EMPTY;

        for square in squares {
            bitboard.set_bit(square);
        }

        bitboard
    }
}
