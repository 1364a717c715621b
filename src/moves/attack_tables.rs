//! Precomputed attack tables for every piece kind.
//!
//! Built once, then read-only. Leaper masks are plain per-square arrays;
//! slider attacks go through the magic tables, and queen attacks are the
//! union of both sliders.

use crate::game_state::chess_types::{Color, Square};
use crate::moves::king_moves::king_mask;
use crate::moves::knight_moves::knight_mask;
use crate::moves::magic::{MagicTable, Slider};
use crate::moves::pawn_moves::{pawn_capture_mask, pawn_double_push_mask, pawn_single_push_mask};

#[derive(Debug, Clone)]
pub struct AttackTables {
    king: [u64; 64],
    knight: [u64; 64],
    pawn_single_push: [[u64; 64]; 2],
    pawn_double_push: [[u64; 64]; 2],
    pawn_capture: [[u64; 64]; 2],
    rook: MagicTable,
    bishop: MagicTable,
}

impl AttackTables {
    pub fn build() -> Self {
        let mut king = [0u64; 64];
        let mut knight = [0u64; 64];
        let mut pawn_single_push = [[0u64; 64]; 2];
        let mut pawn_double_push = [[0u64; 64]; 2];
        let mut pawn_capture = [[0u64; 64]; 2];

        for square in 0..64u8 {
            let sq = square as usize;
            king[sq] = king_mask(square);
            knight[sq] = knight_mask(square);
            for color in [Color::White, Color::Black] {
                pawn_single_push[color.index()][sq] = pawn_single_push_mask(color, square);
                pawn_double_push[color.index()][sq] = pawn_double_push_mask(color, square);
                pawn_capture[color.index()][sq] = pawn_capture_mask(color, square);
            }
        }

        Self {
            king,
            knight,
            pawn_single_push,
            pawn_double_push,
            pawn_capture,
            rook: MagicTable::build(Slider::Rook),
            bishop: MagicTable::build(Slider::Bishop),
        }
    }

    #[inline]
    pub fn king(&self, square: Square) -> u64 {
        self.king[square as usize]
    }

    #[inline]
    pub fn knight(&self, square: Square) -> u64 {
        self.knight[square as usize]
    }

    #[inline]
    pub fn pawn_single_push(&self, color: Color, square: Square) -> u64 {
        self.pawn_single_push[color.index()][square as usize]
    }

    #[inline]
    pub fn pawn_double_push(&self, color: Color, square: Square) -> u64 {
        self.pawn_double_push[color.index()][square as usize]
    }

    #[inline]
    pub fn pawn_captures(&self, color: Color, square: Square) -> u64 {
        self.pawn_capture[color.index()][square as usize]
    }

    #[inline]
    pub fn rook(&self, square: Square, occupancy: u64) -> u64 {
        self.rook.attacks(square, occupancy)
    }

    #[inline]
    pub fn bishop(&self, square: Square, occupancy: u64) -> u64 {
        self.bishop.attacks(square, occupancy)
    }

    #[inline]
    pub fn queen(&self, square: Square, occupancy: u64) -> u64 {
        self.rook(square, occupancy) | self.bishop(square, occupancy)
    }
}
