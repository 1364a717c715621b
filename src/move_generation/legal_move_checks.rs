use crate::game_state::chess_context::ChessContext;
use crate::game_state::{chess_types::*, game_state::GameState};

#[inline]
pub fn is_king_in_check(ctx: &ChessContext, game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = game_state.king_square(color) else {
        return false;
    };
    is_square_attacked(ctx, game_state, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` attacks `square` on the current board.
///
/// Looks outward from the target: a pawn of the other color standing on
/// `square` would capture exactly the squares from which attacker pawns hit it.
pub fn is_square_attacked(
    ctx: &ChessContext,
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
) -> bool {
    let attacks = &ctx.attacks;
    let theirs = &game_state.pieces[attacker_color.index()];
    let occupancy = game_state.occupancy_all;

    if attacks.pawn_captures(attacker_color.opposite(), square) & theirs[PieceKind::Pawn.index()] != 0 {
        return true;
    }

    if attacks.knight(square) & theirs[PieceKind::Knight.index()] != 0 {
        return true;
    }

    if attacks.king(square) & theirs[PieceKind::King.index()] != 0 {
        return true;
    }

    let bishops_queens = theirs[PieceKind::Bishop.index()] | theirs[PieceKind::Queen.index()];
    if attacks.bishop(square, occupancy) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = theirs[PieceKind::Rook.index()] | theirs[PieceKind::Queen.index()];
    attacks.rook(square, occupancy) & rooks_queens != 0
}
