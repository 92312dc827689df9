use std::fmt;

use crate::{
    error::NotationError,
    types::{CastleSide, Move, MoveData, Piece, Square},
};

/// Coordinate text, as used by UCI (e.g. "e2e4", "e7e8q")
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;

        if let Some(piece) = self.promote {
            write!(f, "{}", piece.to_char())?;
        }

        Ok(())
    }
}

impl Move {
    /// Human-readable text: "e2-e4", "O-O", "O-O-O", "e7-e8=Q", "e5-d6 ep"
    pub fn describe(&self) -> String {
        match self.castle {
            Some(CastleSide::KingSide) => return "O-O".to_string(),
            Some(CastleSide::QueenSide) => return "O-O-O".to_string(),
            None => {}
        }

        let mut text = format!("{}-{}", self.from, self.to);

        if let Some(piece) = self.promote {
            text.push('=');
            text.push(piece.to_char().to_ascii_uppercase());
        }

        if self.en_passant {
            text.push_str(" ep");
        }

        text
    }
}

/// Parses coordinate text (e.g. "e2e4", "e7e8q") without checking legality
pub fn parse_coordinate_move(text: &str) -> Result<MoveData, NotationError> {
    let text = text.trim();

    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(NotationError::InvalidFormat(text.to_string()));
    }

    let from = Square::parse(&text[0..2]);
    let to = Square::parse(&text[2..4]);

    let (Some(from), Some(to)) = (from, to) else {
        return Err(NotationError::InvalidFormat(text.to_string()));
    };

    let promote = match text[4..].chars().next() {
        None => None,
        Some(letter) => match Piece::from_char(letter) {
            Some(piece @ (Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)) => {
                Some(piece)
            }
            _ => return Err(NotationError::InvalidPromotion(letter)),
        },
    };

    Ok(MoveData { from, to, promote })
}

/// Space-separated coordinate text, e.g. for a principal variation
pub fn format_line(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
