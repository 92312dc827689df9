
use chess_engine::{
    constants::MATE_SCORE,
    engine::{Engine, SearchSettings, think},
    evaluation::Evaluator,
    movegen::legal_moves,
    position::Position,
    types::{Move, Square},
};
use test_utils::*;

/// Scores every position the same, so only move order decides
struct FlatEvaluator;

impl Evaluator for FlatEvaluator {
    fn evaluate(&self, _position: &Position) -> i32 {
        0
    }
}

/// Counts pieces in whole pawns only, white positive
struct PieceCount;

impl Evaluator for PieceCount {
    fn evaluate(&self, position: &Position) -> i32 {
        position
            .board()
            .pieces()
            .map(|(_, piece)| piece.side.sign() * (piece.piece.value() / 100))
            .sum()
    }
}

mod terminal_positions {
    use super::*;

    #[test]
    fn test_white_checkmated_scores_negative_mate() {
        // Fool's mate
        let result = search_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            3,
        );

        assert_eq!(result.evaluation, -MATE_SCORE);
        assert_eq!(result.best_move, None);
        assert!(result.principal_variation.is_empty());
    }

    #[test]
    fn test_black_checkmated_scores_positive_mate() {
        let result = search_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 2);

        assert_eq!(result.evaluation, MATE_SCORE);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_stalemate_scores_zero() {
        let result = search_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3);

        assert_eq!(result.evaluation, 0);
        assert_eq!(result.best_move, None);
    }
}

mod mate_detection {
    use super::*;

    #[test]
    fn test_white_finds_mate_in_one() {
        let result = search_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
            2,
        );

        assert_eq!(result.best_move, Some(Move::new(Square::H5, Square::F7)));
        assert_eq!(result.evaluation, MATE_SCORE);
    }

    #[test]
    fn test_black_finds_back_rank_mate() {
        let result = search_fen("r5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1", 2);

        assert_eq!(result.best_move, Some(Move::new(Square::A8, Square::A1)));
        assert_eq!(result.evaluation, -MATE_SCORE);
    }

    #[test]
    fn test_mate_stops_searching_remaining_moves() {
        let position = position_from_fen("r5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1");
        let engine = Engine::new(Some(2), None);

        let mut searched = 0;
        engine.think_with_progress(
            &position,
            Some(|_: &chess_engine::engine::RootProgress| searched += 1),
        );

        let total = legal_moves(&position).len();
        assert!(
            searched < total,
            "Search should stop at the mate, searched {} of {}",
            searched,
            total
        );
    }
}

mod move_selection {
    use super::*;

    #[test]
    fn test_ties_keep_the_first_move() {
        let position = Position::starting();
        let engine = Engine::with_evaluator(
            SearchSettings {
                depth: 2,
                ..SearchSettings::default()
            },
            FlatEvaluator,
        );

        let result = engine.think(&position);

        assert_eq!(result.evaluation, 0);
        assert_eq!(result.best_move, legal_moves(&position).first().copied());
    }

    #[test]
    fn test_white_takes_hanging_queen() {
        let engine = Engine::with_evaluator(
            SearchSettings {
                depth: 1,
                ..SearchSettings::default()
            },
            PieceCount,
        );

        let result = engine.think(&position_from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1"));

        assert_eq!(result.best_move, Some(Move::new(Square::D1, Square::D5)));
        assert_eq!(result.evaluation, 5);
    }

    #[test]
    fn test_black_minimizes() {
        let engine = Engine::with_evaluator(
            SearchSettings {
                depth: 1,
                ..SearchSettings::default()
            },
            PieceCount,
        );

        let result = engine.think(&position_from_fen("3rk3/8/8/3Q4/8/8/8/4K3 b - - 0 1"));

        assert_eq!(result.best_move, Some(Move::new(Square::D8, Square::D5)));
        assert_eq!(result.evaluation, -5);
    }

    #[test]
    fn test_defended_piece_is_not_taken_at_depth_two() {
        // Rxd5 loses the rook to exd5
        let engine = Engine::with_evaluator(
            SearchSettings {
                depth: 2,
                ..SearchSettings::default()
            },
            PieceCount,
        );

        let result = engine.think(&position_from_fen("4k3/8/4p3/3n4/8/8/8/3RK3 w - - 0 1"));

        assert_ne!(result.best_move, Some(Move::new(Square::D1, Square::D5)));
        assert_eq!(result.evaluation, 5 - 4);
    }

    #[test]
    fn test_best_move_is_legal() {
        let position = position_from_fen(KIWIPETE_FEN);
        let result = think(&position, 2);

        let best_move = result.best_move.expect("Kiwipete has legal moves");
        assert!(legal_moves(&position).contains(&best_move));
    }
}

mod draw_threshold {
    use super::*;

    #[test]
    fn test_halfmove_clock_at_threshold_scores_zero() {
        // White is a queen up, but the clock says draw
        let result = search_fen("4k3/8/8/8/8/8/8/3QK3 w - - 50 60", 3);

        assert_eq!(result.evaluation, 0);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let position = position_from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 50 60");

        let lenient = Engine::new(Some(1), Some(100)).think(&position);
        assert!(lenient.evaluation > 0);
        assert!(lenient.best_move.is_some());

        let strict = Engine::new(Some(1), Some(10)).think(&Position::starting());
        assert_ne!(strict.best_move, None, "A fresh clock is below any threshold");
    }
}
