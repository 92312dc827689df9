//! Error types for building positions and reading user input.
//!
//! The move generator and search never fail: they work on positions that
//! passed these checks, and report mate, stalemate and draws through scores.

use thiserror::Error;

use crate::types::{Side, Square};

/// A board description that breaks an invariant the move generator relies on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("{side:?} must have exactly one king, found {count}")]
    KingCount { side: Side, count: u32 },

    #[error("pawn on {0}, pawns can never stand on the first or last rank")]
    PawnOnBackRank(Square),

    #[error("castling right '{0}' without king and rook on their home squares")]
    InconsistentCastlingRights(char),

    #[error("en passant target {0} does not follow a double pawn push")]
    InvalidEnPassantTarget(Square),

    #[error("{0:?} is in check but it is not their move")]
    OpponentInCheck(Side),
}

/// Malformed FEN text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 4 to 6 space-separated fields, found {0}")]
    WrongFieldCount(usize),

    #[error("expected 8 ranks in the piece placement, found {0}")]
    WrongRankCount(usize),

    #[error("rank {rank} describes {length} files instead of 8")]
    BadRankLength { rank: u8, length: usize },

    #[error("unknown piece letter '{0}'")]
    InvalidPiece(char),

    #[error("side to move must be 'w' or 'b', found '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling field '{0}'")]
    InvalidCastlingRights(String),

    #[error("invalid en passant field '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid halfmove clock '{0}'")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number '{0}'")]
    InvalidFullmoveNumber(String),

    #[error(transparent)]
    Position(#[from] PositionError),
}

/// Problems turning typed move text into a legal move
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid move format '{0}', expected e.g. e2e4 or e7e8q")]
    InvalidFormat(String),

    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),

    #[error("{0} is not a legal move in this position")]
    IllegalMove(String),
}
