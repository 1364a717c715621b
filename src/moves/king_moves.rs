//! King step masks.

use crate::moves::bit_primitives::square_bb;
use crate::moves::knight_moves::{NOT_FILE_A, NOT_FILE_H};

/// King mask for `square`: the eight neighbouring squares that stay on the board.
pub const fn king_mask(square: u8) -> u64 {
    let bb = square_bb(square);
    let mut attacks = 0u64;

    attacks |= bb << 8;
    attacks |= bb >> 8;
    attacks |= (bb << 1) & NOT_FILE_A;
    attacks |= (bb << 9) & NOT_FILE_A;
    attacks |= (bb >> 7) & NOT_FILE_A;
    attacks |= (bb >> 1) & NOT_FILE_H;
    attacks |= (bb << 7) & NOT_FILE_H;
    attacks |= (bb >> 9) & NOT_FILE_H;

    attacks
}

#[cfg(test)]
mod tests {
    use super::king_mask;

    #[test]
    fn king_from_a1_has_three_targets() {
        assert_eq!(king_mask(0), (1u64 << 1) | (1u64 << 8) | (1u64 << 9));
    }

    #[test]
    fn king_in_centre_has_eight_targets() {
        assert_eq!(king_mask(36).count_ones(), 8);
        assert_eq!(king_mask(7).count_ones(), 3);
    }
}
