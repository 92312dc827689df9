use tracing::{debug, trace};

use crate::{
    attacks::{self, king_targets, knight_targets, pawn_targets, slider_directions},
    bitboard::BitBoard,
    constants::PROMOTION_PIECES,
    position::{KING_HOME_COL, Position},
    types::{AttackMap, CastleSide, CheckState, Move, Piece, Square},
};

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promote: None,
            en_passant: false,
            castle: None,
        }
    }

    pub const fn promotion(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            from,
            to,
            promote: Some(piece),
            en_passant: false,
            castle: None,
        }
    }

    pub const fn en_passant_capture(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promote: None,
            en_passant: true,
            castle: None,
        }
    }

    pub const fn castle(from: Square, to: Square, castle: CastleSide) -> Self {
        Self {
            from,
            to,
            promote: None,
            en_passant: false,
            castle: Some(castle),
        }
    }

    /// Square of the pawn an en passant capture removes
    pub fn en_passant_victim(&self) -> Option<Square> {
        match self.en_passant {
            true => Square::from_row_col(self.from.row(), self.to.col()),
            false => None,
        }
    }
}

/// All legal moves for the side to move: king moves, then the other pieces in
/// board order, then castling.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let attack_map = attacks::attack_map(position);
    generate_legal_moves(position, &attack_map)
}

pub fn generate_legal_moves(position: &Position, attack_map: &AttackMap) -> Vec<Move> {
    let side = position.side();
    let board = position.board();
    let king = position.king_square(side);

    let mut moves: Vec<Move> = king_targets(king)
        .filter(|&to| {
            let friendly = board.piece_at(to).is_some_and(|found| found.side == side);
            !friendly && !attack_map.king_danger.is_bit_set(to)
        })
        .map(|to| Move::new(king, to))
        .collect();

    if attack_map.check == CheckState::Double {
        return moves;
    }

    let mut candidates = Vec::with_capacity(48);

    for (from, found) in board.pieces() {
        if found.side != side || found.piece == Piece::King {
            continue;
        }

        let pinned = attack_map.pinned.is_bit_set(from);

        // A pinned knight can never stay on the pin line
        if pinned && found.piece == Piece::Knight {
            continue;
        }

        let start = candidates.len();
        generate_piece_moves(position, from, found.piece, &mut candidates);

        if pinned {
            let mut index = start;
            while index < candidates.len() {
                if is_collinear(king, from, candidates[index].to) {
                    index += 1;
                } else {
                    candidates.remove(index);
                }
            }
        }
    }

    if let CheckState::Single(attacker) = attack_map.check {
        let blocks = match board.piece_at(attacker) {
            Some(found) if found.piece.is_slider() => BitBoard::between(king, attacker),
            _ => BitBoard::EMPTY,
        };

        candidates.retain(|mv| {
            mv.to == attacker
                || blocks.is_bit_set(mv.to)
                || mv.en_passant_victim() == Some(attacker)
        });
    }

    // Both pawns leave the rank, which the pin scan cannot see
    candidates.retain(|mv| !mv.en_passant || leaves_king_safe(position, *mv));

    moves.extend(candidates);

    if attack_map.check == CheckState::None {
        generate_castling_moves(position, attack_map, &mut moves);
    }

    moves
}

/// True if `c` lies on the line through `a` and `b`
fn is_collinear(a: Square, b: Square, c: Square) -> bool {
    let (ab_rows, ab_cols) = (b.row() - a.row(), b.col() - a.col());
    let (ac_rows, ac_cols) = (c.row() - a.row(), c.col() - a.col());

    ab_rows as i32 * ac_cols as i32 == ab_cols as i32 * ac_rows as i32
}

fn generate_piece_moves(position: &Position, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    match piece {
        Piece::Pawn => generate_pawn_moves(position, from, moves),
        Piece::Knight => {
            let side = position.side();

            for to in knight_targets(from) {
                if position.piece_at(to).is_none_or(|found| found.side != side) {
                    moves.push(Move::new(from, to));
                }
            }
        }
        _ => generate_slider_moves(position, from, piece, moves),
    }
}

fn generate_slider_moves(position: &Position, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let side = position.side();

    for &direction in slider_directions(piece) {
        let mut current = from;

        while let Some(to) = current.step(direction) {
            match position.piece_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(found) => {
                    if found.side != side {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }

            current = to;
        }
    }
}

fn generate_pawn_moves(position: &Position, from: Square, moves: &mut Vec<Move>) {
    let side = position.side();
    let forward = side.pawn_direction();

    let push = |moves: &mut Vec<Move>, to: Square| {
        if to.row() == side.promotion_row() {
            for piece in PROMOTION_PIECES {
                moves.push(Move::promotion(from, to, piece));
            }
        } else {
            moves.push(Move::new(from, to));
        }
    };

    if let Some(one_step) = from.offset(forward, 0) {
        if position.piece_at(one_step).is_none() {
            push(moves, one_step);

            if from.row() == side.pawn_start_row() {
                if let Some(two_steps) = one_step.offset(forward, 0) {
                    if position.piece_at(two_steps).is_none() {
                        moves.push(Move::new(from, two_steps));
                    }
                }
            }
        }
    }

    for to in pawn_targets(from, side) {
        match position.piece_at(to) {
            Some(found) if found.side != side => push(moves, to),
            None if position.en_passant() == Some(to) => {
                moves.push(Move::en_passant_capture(from, to))
            }
            _ => {}
        }
    }
}

fn generate_castling_moves(position: &Position, attack_map: &AttackMap, moves: &mut Vec<Move>) {
    let side = position.side();
    let board = position.board();
    let row = side.back_row();

    let Some(king_home) = Square::from_row_col(row, KING_HOME_COL) else {
        return;
    };

    if !board.has(king_home, side, Piece::King) {
        return;
    }

    for castle_side in CastleSide::iter() {
        if !position.castling_rights().has(side, castle_side) {
            continue;
        }

        let (rook_col, _) = castle_side.rook_cols();
        let rook_in_place = Square::from_row_col(row, rook_col)
            .is_some_and(|rook| board.has(rook, side, Piece::Rook));

        if !rook_in_place {
            continue;
        }

        // Squares the king crosses, then the extra b-file square the rook crosses
        let (king_path, rook_path): (&[i8], &[i8]) = match castle_side {
            CastleSide::KingSide => (&[5, 6], &[]),
            CastleSide::QueenSide => (&[3, 2], &[1]),
        };

        let king_path_clear = king_path.iter().all(|&col| {
            Square::from_row_col(row, col).is_some_and(|square| {
                board.is_empty(square) && !attack_map.king_danger.is_bit_set(square)
            })
        });

        let rook_path_clear = rook_path.iter().all(|&col| {
            Square::from_row_col(row, col).is_some_and(|square| board.is_empty(square))
        });

        if !(king_path_clear && rook_path_clear) {
            continue;
        }

        if let Some(to) = Square::from_row_col(row, castle_side.king_destination_col()) {
            moves.push(Move::castle(king_home, to, castle_side));
        }
    }
}

/// Number of leaf nodes of the legal move tree `depth` plies deep
pub fn perft(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| perft(&position.make_move(mv), depth - 1))
        .sum()
}

/// Perft count below each root move, in generation order
pub fn perft_divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let divided: Vec<(Move, u64)> = legal_moves(position)
        .into_iter()
        .map(|mv| {
            let nodes = perft(&position.make_move(mv), depth - 1);
            trace!("{}: {}", mv, nodes);
            (mv, nodes)
        })
        .collect();

    debug!(
        depth,
        moves = divided.len(),
        nodes = divided.iter().map(|(_, nodes)| nodes).sum::<u64>(),
        "perft divide complete"
    );

    divided
}

/// True if playing `mv` leaves the mover's king unattacked
pub fn leaves_king_safe(position: &Position, mv: Move) -> bool {
    let side = position.side();
    let next = position.make_move(mv);

    !next.is_square_attacked_by_side(side.opponent(), next.king_square(side))
}
