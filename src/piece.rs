use crate::types::{ColoredPiece, Piece, Side};

impl Piece {
    /// Material value in centipawns
    pub const fn value(self) -> i32 {
        match self {
            Piece::Pawn => 100,
            Piece::Knight => 300,
            Piece::Bishop => 310,
            Piece::Rook => 500,
            Piece::Queen => 900,
            Piece::King => 0, // King is invaluable; it never leaves the board
        }
    }

    /// Bishops, rooks and queens attack along rays and can pin
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }

    /// Lowercase FEN letter
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    /// Case-insensitive FEN letter
    pub fn from_char(letter: char) -> Option<Piece> {
        match letter.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// +1 for white, -1 for black. Scores are kept from white's viewpoint.
    pub const fn sign(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Row delta of a pawn advance. White moves toward row 0.
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Row the side's pawns start on (and may double-advance from)
    pub const fn pawn_start_row(self) -> i8 {
        match self {
            Side::White => 6,
            Side::Black => 1,
        }
    }

    /// Row where the side's pawns promote
    pub const fn promotion_row(self) -> i8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// Row of the side's king and rooks at the start of the game
    pub const fn back_row(self) -> i8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    pub fn iter() -> impl Iterator<Item = Side> {
        [Side::White, Side::Black].into_iter()
    }
}

impl ColoredPiece {
    pub const fn new(side: Side, piece: Piece) -> Self {
        Self { side, piece }
    }

    /// FEN letter: uppercase for white, lowercase for black
    pub fn to_char(self) -> char {
        match self.side {
            Side::White => self.piece.to_char().to_ascii_uppercase(),
            Side::Black => self.piece.to_char(),
        }
    }

    pub fn from_char(letter: char) -> Option<ColoredPiece> {
        let piece = Piece::from_char(letter)?;
        let side = if letter.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };

        Some(ColoredPiece { side, piece })
    }

    /// Material plus a small bonus for how far up the board the piece stands,
    /// signed from white's viewpoint.
    pub fn material_score(self, row: i8) -> i32 {
        if self.piece == Piece::King {
            return 0;
        }

        let advancement = match self.side {
            Side::White => 8 - row as i32,
            Side::Black => row as i32 + 1,
        };

        self.side.sign() * (self.piece.value() + advancement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip() {
        for letter in "PNBRQKpnbrqk".chars() {
            let piece = ColoredPiece::from_char(letter).unwrap();
            assert_eq!(piece.to_char(), letter);
        }

        assert_eq!(ColoredPiece::from_char('x'), None);
    }

    #[test]
    fn material_score_is_signed_and_rank_aware() {
        let white_pawn = ColoredPiece::new(Side::White, Piece::Pawn);
        let black_pawn = ColoredPiece::new(Side::Black, Piece::Pawn);

        // Home ranks mirror each other
        assert_eq!(white_pawn.material_score(6), 102);
        assert_eq!(black_pawn.material_score(1), -102);

        assert_eq!(ColoredPiece::new(Side::White, Piece::King).material_score(7), 0);
    }
}
