//! Static evaluation: material plus piece-square tables.
//!
//! `evaluate` scores from White's perspective. Search talks to the
//! `BoardScorer` trait, which scores from the side to move, so alternate
//! heuristics can be swapped without altering search code.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bit_primitives::Squares;

pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 10000,
    }
}

// Indexed by square from White's side (a1 = 0); Black reads `square ^ 56`.
#[rustfmt::skip]
const PIECE_SQUARE_TABLES: [[i32; 64]; 6] = [
    // Pawn
    [
          0,   0,   0,   0,   0,   0,   0,   0,
          5,  10,  10, -20, -20,  10,  10,   5,
          5,  -5, -10,   0,   0, -10,  -5,   5,
          0,   0,   0,  20,  20,   0,   0,   0,
          5,   5,  10,  25,  25,  10,   5,   5,
         10,  10,  20,  30,  30,  20,  10,  10,
         50,  50,  50,  50,  50,  50,  50,  50,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Knight
    [
        -50, -40, -30, -30, -30, -30, -40, -50,
        -40, -20,   0,   5,   5,   0, -20, -40,
        -30,   5,  10,  15,  15,  10,   5, -30,
        -30,   0,  15,  20,  20,  15,   0, -30,
        -30,   5,  15,  20,  20,  15,   5, -30,
        -30,   0,  10,  15,  15,  10,   0, -30,
        -40, -20,   0,   0,   0,   0, -20, -40,
        -50, -40, -30, -30, -30, -30, -40, -50,
    ],
    // Bishop
    [
        -20, -10, -10, -10, -10, -10, -10, -20,
        -10,   5,   0,   0,   0,   0,   5, -10,
        -10,  10,  10,  10,  10,  10,  10, -10,
        -10,   0,  10,  10,  10,  10,   0, -10,
        -10,   5,   5,  10,  10,   5,   5, -10,
        -10,   0,   5,  10,  10,   5,   0, -10,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -20, -10, -10, -10, -10, -10, -10, -20,
    ],
    // Rook
    [
          0,   0,   0,   5,   5,   0,   0,   0,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
          5,  10,  10,  10,  10,  10,  10,   5,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Queen
    [
        -20, -10, -10,  -5,  -5, -10, -10, -20,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -10,   5,   5,   5,   5,   5,   0, -10,
          0,   0,   5,   5,   5,   5,   0,  -5,
         -5,   0,   5,   5,   5,   5,   0,  -5,
        -10,   0,   5,   5,   5,   5,   0, -10,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -20, -10, -10,  -5,  -5, -10, -10, -20,
    ],
    // King (centralizing; endgame-flavored)
    [
        -50, -40, -30, -20, -20, -30, -40, -50,
        -30, -20, -10,   0,   0, -10, -20, -30,
        -30, -10,  20,  30,  30,  20, -10, -30,
        -30, -10,  30,  40,  40,  30, -10, -30,
        -30, -10,  30,  40,  40,  30, -10, -30,
        -30, -10,  20,  30,  30,  20, -10, -30,
        -30, -30,   0,   0,   0,   0, -30, -30,
        -50, -30, -30, -30, -30, -30, -30, -50,
    ],
];

#[inline]
pub fn piece_square_value(color: Color, piece: PieceKind, square: Square) -> i32 {
    let index = match color {
        Color::White => square,
        Color::Black => square ^ 56,
    };
    PIECE_SQUARE_TABLES[piece.index()][index as usize]
}

/// White-minus-Black material and placement score.
pub fn evaluate(game_state: &GameState) -> i32 {
    let mut score = 0i32;

    for (color, sign) in [(Color::White, 1), (Color::Black, -1)] {
        for piece in ALL_PIECE_KINDS {
            for square in Squares(game_state.pieces[color.index()][piece.index()]) {
                score += sign * (piece_value(piece) + piece_square_value(color, piece, square));
            }
        }
    }

    score
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl BoardScorer for PieceSquareScorer {
    #[inline]
    fn score(&self, game_state: &GameState) -> i32 {
        let white_minus_black = evaluate(game_state);
        match game_state.side_to_move {
            Color::White => white_minus_black,
            Color::Black => -white_minus_black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_context::ChessContext;

    #[test]
    fn start_position_is_balanced() {
        let game_state = GameState::new_game(ChessContext::shared());
        assert_eq!(evaluate(&game_state), 0);
        assert_eq!(PieceSquareScorer.score(&game_state), 0);
    }

    #[test]
    fn mirrored_positions_score_opposite() {
        let ctx = ChessContext::shared();
        let white_up = GameState::from_fen(ctx, "4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let black_up = GameState::from_fen(ctx, "4k3/8/8/3n4/8/8/8/4K3 b - - 0 1").expect("FEN should parse");

        assert!(evaluate(&white_up) > 0);
        assert_eq!(evaluate(&white_up), -evaluate(&black_up));
        assert_eq!(PieceSquareScorer.score(&white_up), PieceSquareScorer.score(&black_up));
    }

    #[test]
    fn central_knight_beats_rim_knight() {
        assert!(
            piece_square_value(Color::White, PieceKind::Knight, 27)
                > piece_square_value(Color::White, PieceKind::Knight, 24)
        );
        assert_eq!(
            piece_square_value(Color::White, PieceKind::Pawn, 12),
            piece_square_value(Color::Black, PieceKind::Pawn, 52)
        );
    }
}
