use crate::{
    attacks,
    constants::{CASTLE_MASK, FIFTY_MOVE_RULE_PLIES, NUM_SIDES},
    error::{NotationError, PositionError},
    movegen,
    types::{
        Board, CastleSide, CastlingRights, CheckState, ColoredPiece, Direction, GameResult, Move,
        MoveData, Piece, Side, Square,
    },
};

/// A complete game state. Never mutated once built: `make_move` returns a new
/// position and leaves `self` untouched, so sibling branches of a search own
/// independent values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side: Side,
    castle: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16, // Moves since last pawn move or capture
    fullmove_number: u16,
    kings: [Square; NUM_SIDES],
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    pub const fn flag(side: Side, castle: CastleSide) -> u8 {
        match (side, castle) {
            (Side::White, CastleSide::KingSide) => Self::WHITE_KINGSIDE,
            (Side::White, CastleSide::QueenSide) => Self::WHITE_QUEENSIDE,
            (Side::Black, CastleSide::KingSide) => Self::BLACK_KINGSIDE,
            (Side::Black, CastleSide::QueenSide) => Self::BLACK_QUEENSIDE,
        }
    }

    pub fn has(self, side: Side, castle: CastleSide) -> bool {
        self.0 & Self::flag(side, castle) != 0
    }

    /// FEN letter for a single right
    pub const fn letter(side: Side, castle: CastleSide) -> char {
        match (side, castle) {
            (Side::White, CastleSide::KingSide) => 'K',
            (Side::White, CastleSide::QueenSide) => 'Q',
            (Side::Black, CastleSide::KingSide) => 'k',
            (Side::Black, CastleSide::QueenSide) => 'q',
        }
    }
}

impl CastleSide {
    pub fn iter() -> impl Iterator<Item = CastleSide> {
        [CastleSide::KingSide, CastleSide::QueenSide].into_iter()
    }

    /// Column of the rook this castle moves, before and after
    pub const fn rook_cols(self) -> (i8, i8) {
        match self {
            CastleSide::KingSide => (7, 5),
            CastleSide::QueenSide => (0, 3),
        }
    }

    /// Column the king lands on
    pub const fn king_destination_col(self) -> i8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }
}

pub const KING_HOME_COL: i8 = 4;

impl Position {
    /// The standard starting position
    pub fn starting() -> Self {
        Self {
            board: Board::new(),
            side: Side::White,
            castle: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            kings: [Square::E1, Square::E8],
        }
    }

    /// Builds a position from already-parsed parts, rejecting anything the move
    /// generator cannot work with.
    pub fn from_parts(
        board: Board,
        side: Side,
        castle: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Result<Self, PositionError> {
        let mut kings = [Square::E1, Square::E8];

        for side in Side::iter() {
            let mut king_squares = board.squares_of(side, Piece::King);
            let count = king_squares.count_bits();

            match (count, king_squares.next_bit()) {
                (1, Some(square)) => kings[side as usize] = square,
                _ => return Err(PositionError::KingCount { side, count }),
            }
        }

        if let Some((square, _)) = board
            .pieces()
            .find(|(square, piece)| piece.piece == Piece::Pawn && [0, 7].contains(&square.row()))
        {
            return Err(PositionError::PawnOnBackRank(square));
        }

        for side in Side::iter() {
            for castle_side in CastleSide::iter() {
                if !castle.has(side, castle_side) {
                    continue;
                }

                let row = side.back_row();
                let (rook_col, _) = castle_side.rook_cols();

                let king_home = Square::from_row_col(row, KING_HOME_COL);
                let rook_home = Square::from_row_col(row, rook_col);

                let in_place = match (king_home, rook_home) {
                    (Some(king), Some(rook)) => {
                        board.has(king, side, Piece::King) && board.has(rook, side, Piece::Rook)
                    }
                    _ => false,
                };

                if !in_place {
                    return Err(PositionError::InconsistentCastlingRights(
                        CastlingRights::letter(side, castle_side),
                    ));
                }
            }
        }

        if let Some(target) = en_passant {
            // The pawn that just double-advanced belongs to the side not to move
            let expected_row = match side {
                Side::White => 2,
                Side::Black => 5,
            };

            // Target empty, with the pawn that skipped it standing just beyond
            let mover = side.opponent();
            let pushed_pawn_in_place = target
                .offset(mover.pawn_direction(), 0)
                .is_some_and(|square| board.has(square, mover, Piece::Pawn));

            if target.row() != expected_row || !board.is_empty(target) || !pushed_pawn_in_place {
                return Err(PositionError::InvalidEnPassantTarget(target));
            }
        }

        let position = Self {
            board,
            side,
            castle,
            en_passant,
            halfmove_clock,
            fullmove_number,
            kings,
        };

        // The side that just moved cannot have left its king attacked
        let opponent = side.opponent();
        if position.is_square_attacked_by_side(side, position.king_square(opponent)) {
            return Err(PositionError::OpponentInCheck(opponent));
        }

        Ok(position)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castle
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn piece_at(&self, square: Square) -> Option<ColoredPiece> {
        self.board.piece_at(square)
    }

    pub fn king_square(&self, side: Side) -> Square {
        self.kings[side as usize]
    }

    /// Copy with the other side to move and no castling or en passant rights.
    /// Used to count the opponent's mobility.
    pub fn flipped(&self) -> Self {
        Self {
            side: self.side.opponent(),
            castle: CastlingRights::NONE,
            en_passant: None,
            ..*self
        }
    }

    pub fn is_square_attacked_by_side(&self, side: Side, square: Square) -> bool {
        let board = &self.board;

        // A pawn of `side` attacks `square` from one row behind it
        let pawn_row = -side.pawn_direction();
        for col in [-1, 1] {
            if let Some(from) = square.offset(pawn_row, col) {
                if board.has(from, side, Piece::Pawn) {
                    return true;
                }
            }
        }

        if attacks::knight_targets(square).any(|from| board.has(from, side, Piece::Knight)) {
            return true;
        }

        if attacks::king_targets(square).any(|from| board.has(from, side, Piece::King)) {
            return true;
        }

        for direction in Direction::ALL {
            let diagonal = Direction::DIAGONAL.contains(&direction);
            let mut current = square;

            while let Some(next) = current.step(direction) {
                if let Some(found) = board.piece_at(next) {
                    let attacks_along = match found.piece {
                        Piece::Queen => true,
                        Piece::Bishop => diagonal,
                        Piece::Rook => !diagonal,
                        _ => false,
                    };

                    if found.side == side && attacks_along {
                        return true;
                    }

                    break;
                }

                current = next;
            }
        }

        false
    }

    pub fn is_in_check(&self) -> bool {
        self.is_square_attacked_by_side(self.side.opponent(), self.king_square(self.side))
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(self)
    }

    /// Applies a move produced by the move generator for this position and
    /// returns the resulting position.
    pub fn make_move(&self, mv: Move) -> Self {
        let mut next = *self;

        let moving = next.board.remove_piece(mv.from);
        let mut captured = next.board.remove_piece(mv.to);

        if mv.en_passant {
            if let Some(victim) = Square::from_row_col(mv.from.row(), mv.to.col()) {
                captured = next.board.remove_piece(victim);
            }
        }

        if let Some(castle_side) = mv.castle {
            let row = mv.from.row();
            let (rook_from, rook_to) = castle_side.rook_cols();

            if let (Some(rook_from), Some(rook_to)) = (
                Square::from_row_col(row, rook_from),
                Square::from_row_col(row, rook_to),
            ) {
                next.board.update_piece(rook_from, rook_to);
            }
        }

        let moved_piece = moving.map(|piece| piece.piece);

        if let Some(moving) = moving {
            let placed = mv.promote.unwrap_or(moving.piece);
            next.board.add_piece(moving.side, placed, mv.to);

            if moving.piece == Piece::King {
                next.kings[moving.side as usize] = mv.to;
            }
        }

        // Update the castle permissions
        next.castle.0 &= CASTLE_MASK[mv.from.index()] & CASTLE_MASK[mv.to.index()];

        let is_pawn_move = moved_piece == Some(Piece::Pawn);

        next.en_passant = match is_pawn_move && (mv.to.row() - mv.from.row()).abs() == 2 {
            true => Square::from_row_col((mv.from.row() + mv.to.row()) / 2, mv.from.col()),
            false => None,
        };

        next.halfmove_clock = match is_pawn_move || captured.is_some() {
            true => 0,
            false => self.halfmove_clock.saturating_add(1),
        };

        if self.side == Side::Black {
            next.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        next.side = self.side.opponent();

        next
    }

    /// Finds the legal move matching typed coordinates. A promotion without a
    /// piece letter means a queen.
    pub fn find_move(&self, data: MoveData) -> Option<Move> {
        let wanted = match data.promote {
            Some(piece) => Some(piece),
            None => {
                let promoting = self.board.piece_at(data.from).is_some_and(|found| {
                    found.piece == Piece::Pawn && data.to.row() == found.side.promotion_row()
                });
                promoting.then_some(Piece::Queen)
            }
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from == data.from && mv.to == data.to && mv.promote == wanted)
    }

    /// Applies `mv` only if it is legal here
    pub fn play(&self, mv: Move) -> Result<Self, NotationError> {
        if !self.legal_moves().contains(&mv) {
            return Err(NotationError::IllegalMove(mv.describe()));
        }

        Ok(self.make_move(mv))
    }

    pub fn game_result(&self) -> GameResult {
        let attack_map = attacks::attack_map(self);

        if movegen::generate_legal_moves(self, &attack_map).is_empty() {
            return match attack_map.check {
                CheckState::None => GameResult::Stalemate,
                _ => GameResult::Checkmate(self.side.opponent()),
            };
        }

        if self.halfmove_clock >= FIFTY_MOVE_RULE_PLIES {
            return GameResult::DrawByFiftyMoveRule;
        }

        if self.has_insufficient_material() {
            return GameResult::DrawByInsufficientMaterial;
        }

        GameResult::InProgress
    }

    /// Bare kings, or kings plus a single bishop or knight
    fn has_insufficient_material(&self) -> bool {
        let mut minor_pieces = 0;

        for (_, found) in self.board.pieces() {
            match found.piece {
                Piece::King => {}
                Piece::Bishop | Piece::Knight => minor_pieces += 1,
                _ => return false,
            }
        }

        minor_pieces <= 1
    }

    pub fn diagram(&self, flip: bool) -> String {
        self.board.diagram(flip)
    }

    pub fn display_board(&self, flip: bool) {
        print!("{}", self.diagram(flip));
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_state() {
        let position = Position::starting();

        assert_eq!(position.side(), Side::White);
        assert_eq!(position.castling_rights(), CastlingRights::ALL);
        assert_eq!(position.en_passant(), None);
        assert_eq!(position.king_square(Side::White), Square::E1);
        assert_eq!(position.king_square(Side::Black), Square::E8);
        assert!(!position.is_in_check());
    }

    #[test]
    fn from_parts_rejects_missing_king() {
        let mut board = Board::new();
        board.remove_piece(Square::E8);

        let result = Position::from_parts(board, Side::White, CastlingRights::NONE, None, 0, 1);

        assert_eq!(
            result,
            Err(PositionError::KingCount {
                side: Side::Black,
                count: 0
            })
        );
    }

    #[test]
    fn from_parts_rejects_castling_without_rook() {
        let mut board = Board::new();
        board.remove_piece(Square::H1);

        let result = Position::from_parts(board, Side::White, CastlingRights::ALL, None, 0, 1);

        assert_eq!(result, Err(PositionError::InconsistentCastlingRights('K')));
    }

    #[test]
    fn from_parts_rejects_attacked_king_of_side_not_to_move() {
        let mut board = Board::empty();
        board.add_piece(Side::White, Piece::King, Square::G1);
        board.add_piece(Side::White, Piece::Rook, Square::E1);
        board.add_piece(Side::Black, Piece::King, Square::E8);

        let result = Position::from_parts(board, Side::White, CastlingRights::NONE, None, 0, 1);
        assert_eq!(result, Err(PositionError::OpponentInCheck(Side::Black)));

        let result = Position::from_parts(board, Side::Black, CastlingRights::NONE, None, 0, 1);
        assert!(result.is_ok_and(|position| position.is_in_check()));
    }

    #[test]
    fn from_parts_rejects_en_passant_target_without_pawn() {
        let mut board = Board::empty();
        board.add_piece(Side::White, Piece::King, Square::E1);
        board.add_piece(Side::Black, Piece::King, Square::E8);
        board.add_piece(Side::White, Piece::Pawn, Square::D5);

        let result =
            Position::from_parts(board, Side::White, CastlingRights::NONE, Some(Square::E6), 0, 1);
        assert_eq!(result, Err(PositionError::InvalidEnPassantTarget(Square::E6)));

        board.add_piece(Side::Black, Piece::Pawn, Square::E5);
        let position =
            Position::from_parts(board, Side::White, CastlingRights::NONE, Some(Square::E6), 0, 1)
                .unwrap();
        assert!(position.legal_moves().iter().any(|mv| mv.en_passant));
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let position = Position::starting();
        let next = position.make_move(Move::new(Square::E2, Square::E4));

        assert_eq!(next.en_passant(), Some(Square::E3));
        assert_eq!(next.side(), Side::Black);
        assert_eq!(next.halfmove_clock(), 0);
        assert_eq!(next.fullmove_number(), 1);

        // The parent position is untouched
        assert!(position.board().has(Square::E2, Side::White, Piece::Pawn));

        let after_reply = next.make_move(Move::new(Square::G8, Square::F6));
        assert_eq!(after_reply.en_passant(), None);
        assert_eq!(after_reply.halfmove_clock(), 1);
        assert_eq!(after_reply.fullmove_number(), 2);
    }

    #[test]
    fn king_move_clears_both_castling_rights() {
        let mut board = Board::new();
        board.remove_piece(Square::F1);
        board.remove_piece(Square::G1);

        let position =
            Position::from_parts(board, Side::White, CastlingRights::ALL, None, 0, 1).unwrap();
        let next = position.make_move(Move::castle(Square::E1, Square::G1, CastleSide::KingSide));

        assert!(next.board().has(Square::G1, Side::White, Piece::King));
        assert!(next.board().has(Square::F1, Side::White, Piece::Rook));
        assert!(next.board().is_empty(Square::H1));
        assert_eq!(next.king_square(Side::White), Square::G1);
        assert!(!next.castling_rights().has(Side::White, CastleSide::KingSide));
        assert!(!next.castling_rights().has(Side::White, CastleSide::QueenSide));
        assert!(next.castling_rights().has(Side::Black, CastleSide::KingSide));
    }
}
