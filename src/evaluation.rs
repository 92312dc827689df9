use crate::{
    attacks, constants::CHECK_PENALTY, movegen, position::Position, types::CheckState,
};

/// Scores a position in centipawns from white's viewpoint
pub trait Evaluator {
    fn evaluate(&self, position: &Position) -> i32;
}

/// Material with a rank bonus, plus mobility and a check term
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEvaluator;

impl Evaluator for StandardEvaluator {
    fn evaluate(&self, position: &Position) -> i32 {
        material(position) + mobility(position)
    }
}

/// Sum of every piece's value and rank bonus, black pieces negative
pub fn material(position: &Position) -> i32 {
    position
        .board()
        .pieces()
        .map(|(square, piece)| piece.material_score(square.row()))
        .sum()
}

/// Legal move count of the side to move minus the other side's, signed toward
/// the side to move. The other side is counted on a flipped copy with no
/// castling or en passant rights.
pub fn mobility(position: &Position) -> i32 {
    let sign = position.side().sign();

    let own = movegen::legal_moves(position).len() as i32;

    let flipped = position.flipped();
    let flipped_attacks = attacks::attack_map(&flipped);
    let theirs = movegen::generate_legal_moves(&flipped, &flipped_attacks).len() as i32;

    let mut score = (own - theirs) * sign;

    if flipped_attacks.check != CheckState::None {
        score -= sign * CHECK_PENALTY;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_level() {
        let position = Position::starting();

        assert_eq!(material(&position), 0);
        assert_eq!(mobility(&position), 0);
        assert_eq!(StandardEvaluator.evaluate(&position), 0);
    }
}
