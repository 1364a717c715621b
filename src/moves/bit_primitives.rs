//! Single-square bitboard primitives.

use crate::game_state::chess_types::Square;

#[inline]
pub const fn square_bb(square: Square) -> u64 {
    1u64 << square
}

#[inline]
pub const fn is_bit_set(bitboard: u64, square: Square) -> bool {
    (bitboard & square_bb(square)) != 0
}

#[inline]
pub fn set_bit(bitboard: &mut u64, square: Square) {
    *bitboard |= square_bb(square);
}

#[inline]
pub fn clear_bit(bitboard: &mut u64, square: Square) {
    *bitboard &= !square_bb(square);
}

/// Remove the lowest set bit and return its square. Caller guarantees `bitboard != 0`.
#[inline]
pub fn pop_lsb(bitboard: &mut u64) -> Square {
    let square = bitboard.trailing_zeros() as Square;
    *bitboard &= *bitboard - 1;
    square
}

/// Iterator over the set squares of a bitboard, lowest first.
#[derive(Debug, Clone, Copy)]
pub struct Squares(pub u64);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(pop_lsb(&mut self.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_test_clear_cycle() {
        let mut bb = 0u64;
        set_bit(&mut bb, 28);
        assert!(is_bit_set(bb, 28));
        assert!(!is_bit_set(bb, 27));
        clear_bit(&mut bb, 28);
        assert_eq!(bb, 0);
    }

    #[test]
    fn pop_lsb_walks_low_to_high() {
        let mut bb = square_bb(3) | square_bb(17) | square_bb(63);
        assert_eq!(pop_lsb(&mut bb), 3);
        assert_eq!(pop_lsb(&mut bb), 17);
        assert_eq!(pop_lsb(&mut bb), 63);
        assert_eq!(bb, 0);
    }

    #[test]
    fn squares_iterator_matches_popcount() {
        let bb = 0x8100_0000_0000_0081u64;
        let squares: Vec<Square> = Squares(bb).collect();
        assert_eq!(squares, vec![0, 7, 56, 63]);
    }
}
