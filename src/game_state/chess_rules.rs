//! Canonical chess-rule constants.
//!
//! Static rule literals: the standard starting position and the castling
//! geometry used by move generation and move application.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const E1: Square = 4;
pub const E8: Square = 60;

/// Castling rights that survive a move touching each square.
///
/// Applied to both origin and destination: moving a king or rook off its home
/// square, or capturing a rook on its home square, drops the matching rights.
pub const CASTLING_RIGHTS_SURVIVING: [CastlingRights; 64] = build_surviving_rights();

const fn build_surviving_rights() -> [CastlingRights; 64] {
    let mut table = [CASTLE_ALL; 64];
    table[0] = CASTLE_ALL & !CASTLE_WHITE_QUEENSIDE;
    table[4] = CASTLE_ALL & !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE);
    table[7] = CASTLE_ALL & !CASTLE_WHITE_KINGSIDE;
    table[56] = CASTLE_ALL & !CASTLE_BLACK_QUEENSIDE;
    table[60] = CASTLE_ALL & !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    table[63] = CASTLE_ALL & !CASTLE_BLACK_KINGSIDE;
    table
}

/// One castling option: which right it needs, where the king and rook go, and
/// which squares must be empty or unattacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook.
    pub empty_mask: u64,
    /// King origin, transit and destination.
    pub king_path: [Square; 3],
}

pub const CASTLING_LANES: [[CastlingLane; 2]; 2] = [
    [
        CastlingLane {
            right: CASTLE_WHITE_KINGSIDE,
            king_from: 4,
            king_to: 6,
            rook_from: 7,
            rook_to: 5,
            empty_mask: (1u64 << 5) | (1u64 << 6),
            king_path: [4, 5, 6],
        },
        CastlingLane {
            right: CASTLE_WHITE_QUEENSIDE,
            king_from: 4,
            king_to: 2,
            rook_from: 0,
            rook_to: 3,
            empty_mask: (1u64 << 1) | (1u64 << 2) | (1u64 << 3),
            king_path: [4, 3, 2],
        },
    ],
    [
        CastlingLane {
            right: CASTLE_BLACK_KINGSIDE,
            king_from: 60,
            king_to: 62,
            rook_from: 63,
            rook_to: 61,
            empty_mask: (1u64 << 61) | (1u64 << 62),
            king_path: [60, 61, 62],
        },
        CastlingLane {
            right: CASTLE_BLACK_QUEENSIDE,
            king_from: 60,
            king_to: 58,
            rook_from: 56,
            rook_to: 59,
            empty_mask: (1u64 << 57) | (1u64 << 58) | (1u64 << 59),
            king_path: [60, 59, 58],
        },
    ],
];

/// Castling lane whose king destination is `king_to`.
#[inline]
pub fn castling_lane_for(color: Color, king_to: Square) -> Option<&'static CastlingLane> {
    CASTLING_LANES[color.index()]
        .iter()
        .find(|lane| lane.king_to == king_to)
}
