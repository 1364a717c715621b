//! Pawn push, double-push and capture masks per side.

use crate::game_state::chess_types::Color;
use crate::moves::bit_primitives::square_bb;
use crate::moves::knight_moves::{NOT_FILE_A, NOT_FILE_H};

const RANK_1: u64 = 0x0000_0000_0000_00FF;
const RANK_2: u64 = 0x0000_0000_0000_FF00;
const RANK_7: u64 = 0x00FF_0000_0000_0000;
const RANK_8: u64 = 0xFF00_0000_0000_0000;

/// One square forward. Empty for pawns on the last rank.
pub const fn pawn_single_push_mask(color: Color, square: u8) -> u64 {
    let bb = square_bb(square);
    match color {
        Color::White => (bb & !RANK_8) << 8,
        Color::Black => (bb & !RANK_1) >> 8,
    }
}

/// Two squares forward, only from the side's starting rank.
pub const fn pawn_double_push_mask(color: Color, square: u8) -> u64 {
    let bb = square_bb(square);
    match color {
        Color::White => (bb & RANK_2) << 16,
        Color::Black => (bb & RANK_7) >> 16,
    }
}

/// Diagonal capture targets.
pub const fn pawn_capture_mask(color: Color, square: u8) -> u64 {
    let bb = square_bb(square);
    match color {
        Color::White => {
            let bb = bb & !RANK_8;
            ((bb << 7) & NOT_FILE_H) | ((bb << 9) & NOT_FILE_A)
        }
        Color::Black => {
            let bb = bb & !RANK_1;
            ((bb >> 9) & NOT_FILE_H) | ((bb >> 7) & NOT_FILE_A)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;

    #[test]
    fn white_pawn_masks_from_e2() {
        let e2 = 12u8;
        assert_eq!(pawn_single_push_mask(Color::White, e2), 1u64 << 20);
        assert_eq!(pawn_double_push_mask(Color::White, e2), 1u64 << 28);
        assert_eq!(pawn_capture_mask(Color::White, e2), (1u64 << 19) | (1u64 << 21));
    }

    #[test]
    fn black_pawn_masks_from_a7() {
        let a7 = 48u8;
        assert_eq!(pawn_single_push_mask(Color::Black, a7), 1u64 << 40);
        assert_eq!(pawn_double_push_mask(Color::Black, a7), 1u64 << 32);
        assert_eq!(pawn_capture_mask(Color::Black, a7), 1u64 << 41);
    }

    #[test]
    fn double_push_only_from_start_rank() {
        assert_eq!(pawn_double_push_mask(Color::White, 20), 0);
        assert_eq!(pawn_double_push_mask(Color::Black, 40), 0);
    }
}
