// NOTE: 1 ply = one move by a single player

use crate::types::Piece;

pub const NUM_SQUARES: usize = 64;
pub const NUM_SIDES: usize = 2;
pub const NUM_FILES: usize = 8;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Search depth (in ply) used when the caller does not pick one.
pub const DEFAULT_DEPTH: u16 = 3;

/// The search scores a position as a forced draw once the halfmove clock reaches this.
pub const FIFTY_MOVE_THRESHOLD: u16 = 50;

/// Halfmoves without a pawn move or capture after which the game itself is drawn.
pub const FIFTY_MOVE_RULE_PLIES: u16 = 100;

/// Score of a checkmate, from white's viewpoint. No mate distance is encoded.
pub const MATE_SCORE: i32 = 99_900;

/// Applied against the side to move when the other side is found in check at a leaf.
pub const CHECK_PENALTY: i32 = 30;

/// Knight jumps as (row, column) deltas.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Promotion choices, in the order they are generated.
pub const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// Castling rights kept when a move touches a square: the rights are ANDed
/// with the entries of both the origin and the destination. King and rook home
/// squares clear the matching bits, every other square keeps all of them.
#[rustfmt::skip]
pub const CASTLE_MASK: [u8; NUM_SQUARES] = [
     7, 15, 15, 15,  3, 15, 15, 11,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    13, 15, 15, 15, 12, 15, 15, 14,
];
