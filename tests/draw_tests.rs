use test_utils::*;

use chess_engine::{
    engine::Engine,
    position::Position,
    types::{GameResult, Side},
};

mod mate_and_stalemate {
    use super::*;

    #[test]
    fn test_starting_position_in_progress() {
        assert_eq!(Position::starting().game_result(), GameResult::InProgress);
    }

    #[test]
    fn test_fools_mate() {
        let position = play_moves(&Position::starting(), &["f2f3", "e7e5", "g2g4", "d8h4"]);

        assert_eq!(position.game_result(), GameResult::Checkmate(Side::Black));
    }

    #[test]
    fn test_back_rank_mate_for_white() {
        let position = position_from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");

        assert_eq!(position.game_result(), GameResult::Checkmate(Side::White));
    }

    #[test]
    fn test_stalemate() {
        let position = position_from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");

        assert!(!position.is_in_check());
        assert_eq!(position.game_result(), GameResult::Stalemate);
    }

    #[test]
    fn test_checkmate_takes_precedence_over_clock() {
        let position = position_from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 100 3",
        );

        assert_eq!(position.game_result(), GameResult::Checkmate(Side::Black));
    }
}

mod fifty_move_rule {
    use super::*;

    #[test]
    fn test_fifty_move_rule_draw() {
        let position = position_from_fen("k7/n7/8/8/8/8/N6N/N6K w - - 99 1");
        assert_eq!(position.halfmove_clock(), 99, "Should start with the clock at 99");
        assert_eq!(position.game_result(), GameResult::InProgress);

        let position = play_moves(&position, &["a2b4"]);

        assert_eq!(
            position.halfmove_clock(),
            100,
            "After one more quiet move the clock should be 100, got {}",
            position.halfmove_clock()
        );
        assert_eq!(position.game_result(), GameResult::DrawByFiftyMoveRule);
    }

    #[test]
    fn test_fifty_move_rule_at_limit() {
        let position = position_from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 99 1");
        assert_eq!(position.game_result(), GameResult::InProgress);

        let result = play_moves(&position, &["a1a2"]).game_result();
        assert_eq!(
            result,
            GameResult::DrawByFiftyMoveRule,
            "Should be a draw at 100 halfmoves, got {:?}",
            result
        );
    }

    #[test]
    fn test_clock_beats_insufficient_material() {
        let position = position_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 100 80");

        assert_eq!(position.game_result(), GameResult::DrawByFiftyMoveRule);
    }

    #[test]
    fn test_search_draw_threshold_is_earlier_than_game_result() {
        let position = position_from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 50 40");

        assert_eq!(position.game_result(), GameResult::InProgress);

        let result = Engine::new(Some(2), None).think(&position);
        assert_eq!(result.evaluation, 0);
        assert_eq!(result.best_move, None);
    }
}

mod halfmove_clock {
    use super::*;

    #[test]
    fn test_resets_on_pawn_move() {
        let position = position_from_fen("4k3/4p3/8/8/8/8/4P3/3K4 w - - 40 1");
        assert_eq!(position.halfmove_clock(), 40, "Should start at 40");

        let position = play_moves(&position, &["e2e4"]);

        assert_eq!(position.halfmove_clock(), 0, "Pawn move should reset the clock");
        assert_eq!(position.game_result(), GameResult::InProgress);
    }

    #[test]
    fn test_resets_on_capture() {
        let position = position_from_fen("3k4/8/8/4r3/4R3/8/8/3K4 w - - 98 1");

        let position = play_moves(&position, &["e4e5"]);

        assert_eq!(position.halfmove_clock(), 0, "Capture should reset the clock");
        assert_eq!(position.game_result(), GameResult::InProgress);
    }

    #[test]
    fn test_quiet_moves_increment_clock() {
        let position = play_moves(&Position::starting(), &["g1f3", "b8c6", "f3g1"]);

        assert_eq!(position.halfmove_clock(), 3);
    }

    #[test]
    fn test_fullmove_number_advances_after_black() {
        let position = Position::starting();

        let after_white = play_moves(&position, &["e2e4"]);
        assert_eq!(after_white.fullmove_number(), 1);

        let after_black = play_moves(&after_white, &["e7e5"]);
        assert_eq!(after_black.fullmove_number(), 2);
    }
}

mod insufficient_material {
    use super::*;

    fn result_of(fen: &str) -> GameResult {
        position_from_fen(fen).game_result()
    }

    #[test]
    fn test_bare_kings() {
        assert_eq!(
            result_of("4k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            GameResult::DrawByInsufficientMaterial
        );
    }

    #[test]
    fn test_single_minor_piece() {
        for fen in [
            "4k3/8/8/8/8/8/8/4KN2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4KB2 w - - 0 1",
            "4kn2/8/8/8/8/8/8/4K3 b - - 0 1",
        ] {
            assert_eq!(
                result_of(fen),
                GameResult::DrawByInsufficientMaterial,
                "{} should be a draw",
                fen
            );
        }
    }

    #[test]
    fn test_enough_material_to_play_on() {
        for fen in [
            "4k3/8/8/8/8/8/8/4K2R w - - 0 1",
            "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/3NKN2 w - - 0 1",
            "4kb2/8/8/8/8/8/8/4KB2 w - - 0 1",
            "3qk3/8/8/8/8/8/8/4K3 w - - 0 1",
        ] {
            assert_eq!(
                result_of(fen),
                GameResult::InProgress,
                "{} should still be in progress",
                fen
            );
        }
    }
}
