use crate::{
    bitboard::BitBoard,
    constants::{NUM_FILES, NUM_SQUARES},
    types::{Board, ColoredPiece, Piece, Side, Square},
};

const BACK_RANK: [Piece; NUM_FILES] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    /// Standard starting layout
    pub fn new() -> Self {
        let mut board = Self::empty();

        for side in Side::iter() {
            let back_row = side.back_row();
            let pawn_row = side.pawn_start_row();

            for (col, piece) in BACK_RANK.iter().enumerate() {
                let col = col as i8;

                if let Some(square) = Square::from_row_col(back_row, col) {
                    board.add_piece(side, *piece, square);
                }
                if let Some(square) = Square::from_row_col(pawn_row, col) {
                    board.add_piece(side, Piece::Pawn, square);
                }
            }
        }

        board
    }

    pub fn empty() -> Self {
        Self {
            value: [None; NUM_SQUARES],
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<ColoredPiece> {
        self.value[square.index()]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.value[square.index()].is_none()
    }

    /// True if `square` holds `piece` of `side`
    pub fn has(&self, square: Square, side: Side, piece: Piece) -> bool {
        self.piece_at(square) == Some(ColoredPiece::new(side, piece))
    }

    pub fn add_piece(&mut self, side: Side, piece: Piece, square: Square) {
        self.value[square.index()] = Some(ColoredPiece::new(side, piece));
    }

    pub fn remove_piece(&mut self, square: Square) -> Option<ColoredPiece> {
        self.value[square.index()].take()
    }

    /// Moves whatever stands on `from` to `to`, replacing anything there
    pub fn update_piece(&mut self, from: Square, to: Square) {
        let moving = self.value[from.index()].take();
        self.value[to.index()] = moving;
    }

    /// Occupied squares with their pieces, in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn squares_of(&self, side: Side, piece: Piece) -> BitBoard {
        self.pieces()
            .filter(|(_, found)| *found == ColoredPiece::new(side, piece))
            .map(|(square, _)| square)
            .collect()
    }

    /// Console diagram with rank labels, `-` for empty squares
    pub fn diagram(&self, flip: bool) -> String {
        let mut out = String::from("\n  -------------------\n");

        let rows: Vec<i8> = if flip {
            (0..8).rev().collect()
        } else {
            (0..8).collect()
        };
        let cols: Vec<i8> = if flip {
            (0..8).rev().collect()
        } else {
            (0..8).collect()
        };

        for &row in &rows {
            out.push_str(&format!("{} | ", 8 - row));

            for &col in &cols {
                let cell = Square::from_row_col(row, col)
                    .and_then(|square| self.piece_at(square))
                    .map_or('-', |piece| piece.to_char());

                out.push(cell);
                out.push(' ');
            }

            out.push_str("|\n");
        }

        out.push_str("  -------------------\n    ");
        let files: String = cols
            .iter()
            .map(|&col| format!("{} ", (b'a' + col as u8) as char))
            .collect();
        out.push_str(files.trim_end());
        out.push('\n');

        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
