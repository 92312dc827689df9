pub mod api;
pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod constants;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod fen;
pub mod movegen;
pub mod notation;
pub mod piece;
pub mod position;
pub mod square;
pub mod types;

pub use engine::{Engine, SearchResult, SearchSettings, think};
pub use error::{FenError, NotationError, PositionError};
pub use evaluation::{Evaluator, StandardEvaluator};
pub use movegen::{legal_moves, perft};
pub use position::Position;
pub use types::{GameResult, Move, Side, Square};
