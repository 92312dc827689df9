//! Forsyth-Edwards Notation reading and writing.
//!
//! Parsing is strict about syntax and hands the assembled parts to
//! `Position::from_parts`, which enforces the board invariants.

use crate::{
    constants::NUM_FILES,
    error::FenError,
    position::Position,
    types::{Board, CastleSide, CastlingRights, ColoredPiece, Side, Square},
};

impl CastlingRights {
    pub fn from_fen(field: &str) -> Result<Self, FenError> {
        if field == "-" {
            return Ok(Self::NONE);
        }

        let invalid = || FenError::InvalidCastlingRights(field.to_string());

        if field.is_empty() {
            return Err(invalid());
        }

        let mut rights = Self::NONE;

        for letter in field.chars() {
            let flag = match letter {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => return Err(invalid()),
            };

            if rights.0 & flag != 0 {
                return Err(invalid());
            }

            rights.0 |= flag;
        }

        Ok(rights)
    }

    pub fn to_fen(self) -> String {
        let mut field = String::with_capacity(4);

        for side in Side::iter() {
            for castle_side in CastleSide::iter() {
                if self.has(side, castle_side) {
                    field.push(CastlingRights::letter(side, castle_side));
                }
            }
        }

        if field.is_empty() {
            field.push('-');
        }

        field
    }
}

fn parse_placement(field: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();

    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount(ranks.len()));
    }

    let mut board = Board::empty();

    // FEN lists rank 8 first, which is row 0
    for (row, rank) in ranks.iter().enumerate() {
        let rank_number = 8 - row as u8;
        let mut col: usize = 0;

        for letter in rank.chars() {
            if let Some(skip) = letter.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidPiece(letter));
                }
                col += skip as usize;
                continue;
            }

            let piece = ColoredPiece::from_char(letter).ok_or(FenError::InvalidPiece(letter))?;

            if col >= NUM_FILES {
                return Err(FenError::BadRankLength {
                    rank: rank_number,
                    length: col + 1,
                });
            }

            if let Some(square) = Square::from_row_col(row as i8, col as i8) {
                board.add_piece(piece.side, piece.piece, square);
            }
            col += 1;
        }

        if col != NUM_FILES {
            return Err(FenError::BadRankLength {
                rank: rank_number,
                length: col,
            });
        }
    }

    Ok(board)
}

fn placement_to_fen(board: &Board) -> String {
    let mut field = String::new();

    for row in 0..8 {
        let mut empty = 0;

        for col in 0..8 {
            let piece = Square::from_row_col(row, col).and_then(|square| board.piece_at(square));

            match piece {
                None => empty += 1,
                Some(piece) => {
                    if empty > 0 {
                        field.push_str(&empty.to_string());
                        empty = 0;
                    }
                    field.push(piece.to_char());
                }
            }
        }

        if empty > 0 {
            field.push_str(&empty.to_string());
        }

        if row < 7 {
            field.push('/');
        }
    }

    field
}

impl Position {
    /// Parses a FEN string. The halfmove clock and fullmove number may be
    /// omitted and default to 0 and 1.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount(fields.len()));
        }

        let board = parse_placement(fields[0])?;

        let side = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        let castle = CastlingRights::from_fen(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            name => Some(
                Square::parse(name).ok_or_else(|| FenError::InvalidEnPassant(name.to_string()))?,
            ),
        };

        let halfmove_clock = match fields.get(4) {
            Some(text) => text
                .parse::<u16>()
                .map_err(|_| FenError::InvalidHalfmoveClock(text.to_string()))?,
            None => 0,
        };

        let fullmove_number = match fields.get(5) {
            Some(text) => match text.parse::<u16>() {
                Ok(number) if number > 0 => number,
                _ => return Err(FenError::InvalidFullmoveNumber(text.to_string())),
            },
            None => 1,
        };

        Ok(Position::from_parts(
            board,
            side,
            castle,
            en_passant,
            halfmove_clock,
            fullmove_number,
        )?)
    }

    pub fn to_fen(&self) -> String {
        let side = match self.side() {
            Side::White => "w",
            Side::Black => "b",
        };

        let en_passant = self
            .en_passant()
            .map_or_else(|| "-".to_string(), |square| square.name());

        format!(
            "{} {} {} {} {} {}",
            placement_to_fen(self.board()),
            side,
            self.castling_rights().to_fen(),
            en_passant,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }
}
