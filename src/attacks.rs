//! Attack map for the side to move: squares its king must avoid, the check
//! state, and which of its pieces are pinned.

use crate::{
    bitboard::BitBoard,
    constants::KNIGHT_OFFSETS,
    position::Position,
    types::{AttackMap, CheckState, Direction, Piece, Side, Square},
};

pub fn knight_targets(square: Square) -> impl Iterator<Item = Square> {
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |(rows, cols)| square.offset(rows, cols))
}

pub fn king_targets(square: Square) -> impl Iterator<Item = Square> {
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| square.step(direction))
}

/// Diagonal capture squares of a pawn of `side` standing on `square`
pub fn pawn_targets(square: Square, side: Side) -> impl Iterator<Item = Square> {
    let forward = side.pawn_direction();

    [-1, 1]
        .into_iter()
        .filter_map(move |cols| square.offset(forward, cols))
}

/// Ray directions of a sliding piece, empty for everything else
pub fn slider_directions(piece: Piece) -> &'static [Direction] {
    match piece {
        Piece::Bishop => &Direction::DIAGONAL,
        Piece::Rook => &Direction::ORTHOGONAL,
        Piece::Queen => &Direction::ALL,
        _ => &[],
    }
}

impl CheckState {
    fn add_attacker(self, attacker: Square) -> CheckState {
        match self {
            CheckState::None => CheckState::Single(attacker),
            _ => CheckState::Double,
        }
    }

    pub fn is_check(self) -> bool {
        self != CheckState::None
    }
}

impl AttackMap {
    pub fn compute(position: &Position) -> AttackMap {
        let mover = position.side();
        let enemy = mover.opponent();
        let king = position.king_square(mover);
        let board = position.board();

        let mut map = AttackMap {
            king_danger: BitBoard::EMPTY,
            check: CheckState::None,
            pinned: BitBoard::EMPTY,
        };

        for (from, attacker) in board.pieces().filter(|(_, found)| found.side == enemy) {
            if attacker.piece.is_slider() {
                for &direction in slider_directions(attacker.piece) {
                    map.walk_ray(position, from, direction);
                }
                continue;
            }

            let targets: Vec<Square> = match attacker.piece {
                Piece::Pawn => pawn_targets(from, enemy).collect(),
                Piece::Knight => knight_targets(from).collect(),
                _ => king_targets(from).collect(),
            };

            for target in targets {
                if target == king {
                    map.check = map.check.add_attacker(from);
                } else {
                    map.king_danger.set_bit(target);
                }
            }
        }

        map
    }

    fn walk_ray(&mut self, position: &Position, from: Square, direction: Direction) {
        let mover = position.side();
        let king = position.king_square(mover);
        let board = position.board();

        let mut pin_candidate: Option<Square> = None;
        let mut current = from;

        while let Some(next) = current.step(direction) {
            current = next;

            let occupant = board.piece_at(next);

            if let Some(candidate) = pin_candidate {
                match occupant {
                    None => continue,
                    Some(_) => {
                        if next == king {
                            self.pinned.set_bit(candidate);
                        }
                        return;
                    }
                }
            }

            match occupant {
                None => self.king_danger.set_bit(next),
                Some(_) if next == king => {
                    self.check = self.check.add_attacker(from);

                    // The king cannot step back along the ray it is checked on
                    if let Some(beyond) = next.step(direction) {
                        self.king_danger.set_bit(beyond);
                    }
                    return;
                }
                Some(found) if found.side != mover => {
                    self.king_danger.set_bit(next);
                    return;
                }
                Some(_) => pin_candidate = Some(next),
            }
        }
    }
}

pub fn attack_map(position: &Position) -> AttackMap {
    AttackMap::compute(position)
}
