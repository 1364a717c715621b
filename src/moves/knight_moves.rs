//! Knight jump masks.

use crate::moves::bit_primitives::square_bb;

pub const NOT_FILE_A: u64 = 0xFEFE_FEFE_FEFE_FEFE;
pub const NOT_FILE_H: u64 = 0x7F7F_7F7F_7F7F_7F7F;
pub const NOT_FILE_AB: u64 = 0xFCFC_FCFC_FCFC_FCFC;
pub const NOT_FILE_GH: u64 = 0x3F3F_3F3F_3F3F_3F3F;

/// Knight mask for `square`, built by shifting the single-bit board in all
/// eight directions and discarding targets that wrapped across the a/h edge.
pub const fn knight_mask(square: u8) -> u64 {
    let bb = square_bb(square);
    let mut attacks = 0u64;

    attacks |= (bb << 17) & NOT_FILE_A;
    attacks |= (bb << 15) & NOT_FILE_H;
    attacks |= (bb << 10) & NOT_FILE_AB;
    attacks |= (bb << 6) & NOT_FILE_GH;
    attacks |= (bb >> 17) & NOT_FILE_H;
    attacks |= (bb >> 15) & NOT_FILE_A;
    attacks |= (bb >> 10) & NOT_FILE_GH;
    attacks |= (bb >> 6) & NOT_FILE_AB;

    attacks
}

#[cfg(test)]
mod tests {
    use super::knight_mask;

    #[test]
    fn knight_from_d4_has_eight_targets() {
        assert_eq!(knight_mask(27).count_ones(), 8);
    }

    #[test]
    fn knight_in_corner_does_not_wrap() {
        // a1 -> b3, c2
        assert_eq!(knight_mask(0), (1u64 << 17) | (1u64 << 10));
        // h8 -> g6, f7
        assert_eq!(knight_mask(63), (1u64 << 46) | (1u64 << 53));
    }
}
