//! Bishop rays: brute-force attack tracing and the relevant-occupancy mask.

use crate::moves::rook_moves::trace_ray;

const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub fn bishop_attacks_slow(square: u8, occupancy: u64) -> u64 {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(file_step, rank_step)| {
            acc | trace_ray(square as i32, file_step, rank_step, occupancy)
        })
}

pub fn bishop_relevant_mask(square: u8) -> u64 {
    let file = (square % 8) as i32;
    let rank = (square / 8) as i32;
    let mut mask = 0u64;

    for &(file_step, rank_step) in &BISHOP_DIRECTIONS {
        let mut f = file + file_step;
        let mut r = rank + rank_step;
        while (1..7).contains(&f) && (1..7).contains(&r) {
            mask |= 1u64 << (r * 8 + f);
            f += file_step;
            r += rank_step;
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::{bishop_attacks_slow, bishop_relevant_mask};

    #[test]
    fn bishop_relevant_bits_match_known_counts() {
        assert_eq!(bishop_relevant_mask(0).count_ones(), 6);
        assert_eq!(bishop_relevant_mask(1).count_ones(), 5);
        assert_eq!(bishop_relevant_mask(27).count_ones(), 9);
    }

    #[test]
    fn bishop_stops_on_blocker() {
        // c1 bishop, blocker on e3
        let attacks = bishop_attacks_slow(2, 1u64 << 20);
        assert_ne!(attacks & (1u64 << 20), 0);
        assert_eq!(attacks & (1u64 << 29), 0);
        assert_ne!(attacks & (1u64 << 9), 0);
    }
}
