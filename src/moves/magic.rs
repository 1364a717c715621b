//! Magic-bitboard sliding attack tables.
//!
//! For every square the relevant occupancy (the slider's rays minus board
//! edges) is hashed with `(occupancy * magic) >> (64 - relevant_bits)` into a
//! per-square slice of the attack table. The magic constants below are fixed
//! and collision-free for the relevant masks built by `rook_relevant_mask` and
//! `bishop_relevant_mask` (two occupancies may share a slot only when they
//! produce the same attack set).

use crate::moves::bishop_moves::{bishop_attacks_slow, bishop_relevant_mask};
use crate::moves::rook_moves::{rook_attacks_slow, rook_relevant_mask};

pub const ROOK_MAGICS: [u64; 64] = [
    0x8a80_1040_0080_0020, 0x0140_0020_0010_0040, 0x0280_1880_a001_7001, 0x0100_0810_0100_0420,
    0x0200_0200_1008_0420, 0x0300_1c00_0201_0008, 0x8480_0080_0200_0100, 0x2080_0880_0440_2900,
    0x0000_8000_9820_4000, 0x2024_4010_0020_0040, 0x0100_8020_0080_1000, 0x0120_8008_0080_1000,
    0x0208_8080_8800_0400, 0x0002_8022_0080_0400, 0x2200_8001_0002_0080, 0x0801_0000_6082_1100,
    0x0080_0440_0642_2000, 0x0100_8080_2000_4000, 0x1210_8a00_1020_4200, 0x0140_8480_1000_0802,
    0x0481_8280_1400_2800, 0x8094_0040_0200_4100, 0x4010_0400_1001_0802, 0x0000_0200_0880_6104,
    0x0100_4000_8020_8000, 0x2040_0021_2008_1000, 0x0021_2006_8010_0081, 0x0020_1000_8008_0080,
    0x0002_000a_0020_0410, 0x0000_0200_8080_0400, 0x0080_0884_0010_0102, 0x0080_0046_0004_2881,
    0x4040_0080_4080_0020, 0x0440_0030_0020_0801, 0x0004_2000_1100_4500, 0x0188_0200_1010_0100,
    0x0014_8004_0180_2800, 0x2080_0400_8080_0200, 0x0124_0802_0400_1001, 0x0200_0465_0200_0484,
    0x0480_4000_8008_8020, 0x1000_4220_1003_4000, 0x0030_2001_0011_0040, 0x0000_1000_2101_0009,
    0x2002_0801_0011_0004, 0x0202_0080_0400_8002, 0x0020_0200_0401_0100, 0x2048_4400_4082_0001,
    0x0101_0022_0040_8200, 0x0040_8020_0040_1080, 0x4008_1420_0441_0100, 0x0206_0820_c012_0200,
    0x0001_0010_0408_0100, 0x020c_0200_8004_0080, 0x2935_6108_3002_2400, 0x0044_4400_4100_9200,
    0x0280_0010_4080_2101, 0x2100_1900_4000_2085, 0x80c0_0841_0010_2001, 0x4024_0810_0100_0421,
    0x0002_0030_a024_4872, 0x0012_0010_0841_4402, 0x0200_6104_900a_0804, 0x0001_0040_8100_2402,
];

pub const BISHOP_MAGICS: [u64; 64] = [
    0x0040_0408_4440_4084, 0x0020_0420_8a00_4208, 0x0010_1900_4108_0202, 0x0108_0608_4504_2010,
    0x0581_1041_8080_0210, 0x2112_0804_4620_0010, 0x1080_8208_2006_0210, 0x03c0_8084_1022_0200,
    0x0004_0504_0444_0404, 0x0000_0210_0142_0088, 0x24d0_0808_0108_2102, 0x0001_020a_0a02_0400,
    0x0000_0403_0820_0402, 0x0004_0110_0210_0800, 0x0401_4841_0410_4005, 0x0801_0104_0202_0200,
    0x0040_0210_c388_0100, 0x0404_0220_2410_8200, 0x0810_0182_0020_4102, 0x0004_0028_01a0_2003,
    0x0085_0408_2008_0400, 0x8101_02c8_0888_0400, 0x000e_9004_1088_4800, 0x8002_0204_8084_0102,
    0x0220_2008_6509_0201, 0x2010_100a_0202_1202, 0x0152_0484_0802_2401, 0x0020_0800_0208_1110,
    0x4001_0010_2100_4000, 0x8000_4040_0a01_1002, 0x00e4_0040_8101_1002, 0x001c_0040_0101_2080,
    0x8004_2009_62a0_0220, 0x8422_1002_0850_0202, 0x2000_4022_0030_0c08, 0x8646_0200_8008_0080,
    0x8002_0a02_0010_0808, 0x2010_0048_8011_1000, 0x6230_00a0_8001_1400, 0x4200_8c03_4020_9202,
    0x0209_1882_4000_1000, 0x4004_08a8_8400_1800, 0x0011_0400_a608_0400, 0x1840_060a_4402_0800,
    0x0090_0801_0400_0041, 0x0201_0110_0080_8101, 0x1a22_0808_0504_f080, 0x8012_0206_0021_1212,
    0x0500_8610_1124_0000, 0x0180_8061_0820_0800, 0x4000_020e_0104_0044, 0x3000_0026_1044_000a,
    0x0802_2411_0202_0002, 0x0020_9060_6121_0001, 0x5a84_8410_0401_0310, 0x0004_0108_0101_1c04,
    0x000a_0101_0950_2200, 0x0000_004a_0201_2000, 0x5002_0101_0098_b028, 0x8040_0028_1104_0900,
    0x0028_0000_1002_0204, 0x0600_0020_202d_0240, 0x8918_8448_4208_2200, 0x4010_0110_2902_0020,
];
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Rook,
    Bishop,
}

#[derive(Debug, Clone, Copy, Default)]
struct MagicEntry {
    mask: u64,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl MagicEntry {
    #[inline]
    fn index(&self, occupancy: u64) -> usize {
        self.offset + ((occupancy & self.mask).wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// Attack lookup for one slider kind across all 64 squares.
#[derive(Debug, Clone)]
pub struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<u64>,
}

impl MagicTable {
    pub fn build(slider: Slider) -> Self {
        let (magics, relevant_mask, slow_attacks): (&[u64; 64], fn(u8) -> u64, fn(u8, u64) -> u64) =
            match slider {
                Slider::Rook => (&ROOK_MAGICS, rook_relevant_mask, rook_attacks_slow),
                Slider::Bishop => (&BISHOP_MAGICS, bishop_relevant_mask, bishop_attacks_slow),
            };

        let mut entries = [MagicEntry::default(); 64];
        let mut attacks = Vec::new();

        for square in 0..64u8 {
            let mask = relevant_mask(square);
            let relevant_bits = mask.count_ones();
            let entry = MagicEntry {
                mask,
                magic: magics[square as usize],
                shift: 64 - relevant_bits,
                offset: attacks.len(),
            };
            attacks.resize(attacks.len() + (1usize << relevant_bits), 0);

            // Carry-rippler walk over every subset of the mask, empty set included.
            let mut occupancy = 0u64;
            loop {
                attacks[entry.index(occupancy)] = slow_attacks(square, occupancy);
                occupancy = occupancy.wrapping_sub(mask) & mask;
                if occupancy == 0 {
                    break;
                }
            }

            entries[square as usize] = entry;
        }

        Self { entries, attacks }
    }

    #[inline]
    pub fn attacks(&self, square: u8, occupancy: u64) -> u64 {
        self.attacks[self.entries[square as usize].index(occupancy)]
    }

    #[inline]
    pub fn relevant_mask(&self, square: u8) -> u64 {
        self.entries[square as usize].mask
    }

    /// Total number of stored attack sets.
    #[inline]
    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}
