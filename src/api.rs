#[cfg(feature = "api")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    engine::Engine,
    error::FenError,
    movegen,
    position::Position,
    types::GameResult,
};

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub fen: String,
    pub depth: Option<u16>,
}

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnalyzeResponse {
    pub best_move: String,      // The best move in coordinate format (e.g., e2e4)
    pub description: String,    // The best move in human-readable form (e.g., e2-e4, O-O)
    pub evaluation: i32,        // Position evaluation in centipawns, white positive
    pub depth: u16,             // Search depth in plies
    pub nodes: usize,           // Total nodes searched
    pub pv: Vec<String>,        // Principal variation (best line of play)
    pub time_ms: u64,           // Time spent searching in milliseconds
    pub fen_after_move: String, // FEN string after applying best move
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] FenError),

    #[error("no legal moves in position ({0:?})")]
    NoLegalMoves(GameResult),

    #[error("search returned no move (depth 0 or a fifty-move draw)")]
    NoMoveSearched,

    #[cfg(feature = "api")]
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main entry point for API consumers
/// Analyzes a chess position and returns the best move
pub fn analyze_position(request: AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
    let engine = Engine::new(request.depth, None);
    let position = Position::from_fen(&request.fen)?;

    if movegen::legal_moves(&position).is_empty() {
        return Err(ApiError::NoLegalMoves(position.game_result()));
    }

    let result = engine.think(&position);

    // Depth 0 and forced draws search no moves
    let Some(best_move) = result.best_move else {
        return Err(ApiError::NoMoveSearched);
    };

    let fen_after_move = position.make_move(best_move).to_fen();

    Ok(AnalyzeResponse {
        best_move: best_move.to_string(),
        description: best_move.describe(),
        evaluation: result.evaluation,
        depth: result.depth,
        nodes: result.nodes,
        pv: result
            .principal_variation
            .iter()
            .map(|mv| mv.to_string())
            .collect(),
        time_ms: result.time_ms,
        fen_after_move,
    })
}

/// Simpler interface with just FEN and depth
pub fn get_best_move(fen: &str, depth: u16) -> Result<AnalyzeResponse, ApiError> {
    analyze_position(AnalyzeRequest {
        fen: fen.to_string(),
        depth: Some(depth),
    })
}

/// JSON in, JSON out
#[cfg(feature = "api")]
pub fn analyze_position_json(request: &str) -> Result<String, ApiError> {
    let request: AnalyzeRequest = serde_json::from_str(request)?;
    let response = analyze_position(request)?;

    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STARTING_FEN;

    #[test]
    fn test_analyze_starting_position() {
        let request = AnalyzeRequest {
            fen: STARTING_FEN.to_string(),
            depth: Some(2),
        };

        let response = analyze_position(request).unwrap();
        assert_eq!(response.best_move.len(), 4);
        assert_eq!(response.depth, 2);
        assert_eq!(response.pv.len(), 2);
        assert_eq!(response.pv[0], response.best_move);
        assert!(response.nodes > 400);
    }

    #[test]
    fn test_fen_after_move() {
        let response = get_best_move(STARTING_FEN, 1).unwrap();

        // The resulting FEN should be different from the starting position
        assert_ne!(response.fen_after_move, STARTING_FEN);
        assert!(response.fen_after_move.contains(" b "));
    }

    #[test]
    fn test_invalid_fen() {
        let result = get_best_move("invalid fen string", 2);
        assert!(matches!(result, Err(ApiError::InvalidFen(_))));
    }

    #[test]
    fn test_checkmated_position_has_no_moves() {
        // Fool's mate
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let result = get_best_move(fen, 2);

        assert!(matches!(
            result,
            Err(ApiError::NoLegalMoves(GameResult::Checkmate(_)))
        ));
    }

    #[test]
    fn test_mate_in_one_is_found() {
        // Scholar's mate setup: Qxf7#
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        let response = get_best_move(fen, 2).unwrap();

        assert_eq!(response.best_move, "h5f7");
        assert_eq!(response.evaluation, crate::constants::MATE_SCORE);
        assert_eq!(response.description, "h5-f7");
    }

    #[cfg(feature = "api")]
    #[test]
    fn test_json_round_trip() {
        let json = format!(r#"{{"fen":"{}","depth":1}}"#, STARTING_FEN);
        let response = analyze_position_json(&json).unwrap();

        assert!(response.contains("\"best_move\""));
        assert!(matches!(
            analyze_position_json("{not json"),
            Err(ApiError::Json(_))
        ));
    }
}
