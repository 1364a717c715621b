//! Zobrist hashing keys.
//!
//! Keys are drawn from a seeded `StdRng`, so hashes are deterministic across
//! runs, which keeps transposition-table behavior reproducible in tests. A
//! `ZobristKeys` instance is owned by the `ChessContext` and never mutated
//! after construction.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::bit_primitives::Squares;

pub const DEFAULT_ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone)]
pub struct ZobristKeys {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::with_seed(DEFAULT_ZOBRIST_SEED)
    }
}

impl ZobristKeys {
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut piece_square = [[[0u64; 64]; 6]; 2];
        for color in &mut piece_square {
            for piece in color {
                for key in piece {
                    *key = rng.next_u64();
                }
            }
        }

        let side_to_move = rng.next_u64();

        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = rng.next_u64();
        }

        let mut en_passant_file = [0u64; 8];
        for key in &mut en_passant_file {
            *key = rng.next_u64();
        }

        Self {
            piece_square,
            side_to_move,
            castling,
            en_passant_file,
        }
    }

    /// Key for a `(color, piece, square)` occupancy term.
    #[inline]
    pub fn piece_square(&self, color: Color, piece: PieceKind, square: Square) -> u64 {
        self.piece_square[color.index()][piece.index()][square as usize]
    }

    /// Key for a castling-rights mask (`0..=15`).
    #[inline]
    pub fn castling(&self, castling_rights: CastlingRights) -> u64 {
        self.castling[(castling_rights & CASTLE_ALL) as usize]
    }

    #[inline]
    pub fn en_passant_file(&self, file: u8) -> u64 {
        self.en_passant_file[(file & 7) as usize]
    }

    /// Toggle key, present in the hash when Black is to move.
    #[inline]
    pub fn side_to_move(&self) -> u64 {
        self.side_to_move
    }

    /// Full hash of a position, computed from scratch.
    pub fn compute(&self, game_state: &GameState) -> u64 {
        let mut key = 0u64;

        for color in [Color::White, Color::Black] {
            for piece in ALL_PIECE_KINDS {
                for square in Squares(game_state.pieces[color.index()][piece.index()]) {
                    key ^= self.piece_square(color, piece, square);
                }
            }
        }

        if game_state.side_to_move == Color::Black {
            key ^= self.side_to_move();
        }

        key ^= self.castling(game_state.castling_rights);

        if let Some(ep_square) = game_state.en_passant_square {
            key ^= self.en_passant_file(file_of(ep_square));
        }

        key
    }
}
