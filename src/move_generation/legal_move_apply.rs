//! Copy-make move application with the legality check folded in.
//!
//! `make_move` never touches its input: it returns the successor position, or
//! `None` when the move would leave the mover's king attacked, castles out of
//! or through check, or does not fit the board at all.

use crate::game_state::chess_context::ChessContext;
use crate::game_state::chess_rules::{castling_lane_for, CASTLING_RIGHTS_SURVIVING};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::moves::bit_primitives::is_bit_set;
use crate::moves::move_descriptions::Move;

pub fn make_move(ctx: &ChessContext, game_state: &GameState, mv: Move) -> Option<GameState> {
    let keys = &ctx.zobrist;
    let us = game_state.side_to_move;
    let them = us.opposite();
    let from = mv.from();
    let to = mv.to();
    let moved_piece = mv.moved_piece();

    if !is_bit_set(game_state.pieces[us.index()][moved_piece.index()], from) {
        return None;
    }
    if is_bit_set(game_state.occupancy_by_color[us.index()], to) {
        return None;
    }

    // Castling legality is decided on the pre-move board.
    let castling_lane = if mv.is_castling() {
        let lane = castling_lane_for(us, to)?;
        if lane
            .king_path
            .iter()
            .any(|&square| is_square_attacked(ctx, game_state, square, them))
        {
            return None;
        }
        Some(lane)
    } else {
        None
    };

    let mut next = *game_state;

    if let Some(ep_square) = next.en_passant_square {
        next.zobrist_key ^= keys.en_passant_file(file_of(ep_square));
    }
    next.zobrist_key ^= keys.castling(next.castling_rights);

    next.toggle_piece(keys, us, moved_piece, from);

    if mv.is_en_passant() {
        let capture_square = match us {
            Color::White => to.wrapping_sub(8),
            Color::Black => to.wrapping_add(8),
        };
        if capture_square > 63
            || !is_bit_set(next.pieces[them.index()][PieceKind::Pawn.index()], capture_square)
        {
            return None;
        }
        next.toggle_piece(keys, them, PieceKind::Pawn, capture_square);
    } else if let Some(captured) = mv.captured_piece() {
        if !is_bit_set(next.pieces[them.index()][captured.index()], to) {
            return None;
        }
        next.toggle_piece(keys, them, captured, to);
    } else if is_bit_set(next.occupancy_all, to) {
        return None;
    }

    let placed_piece = mv.promotion_piece().unwrap_or(moved_piece);
    next.toggle_piece(keys, us, placed_piece, to);

    if let Some(lane) = castling_lane {
        next.toggle_piece(keys, us, PieceKind::Rook, lane.rook_from);
        next.toggle_piece(keys, us, PieceKind::Rook, lane.rook_to);
    }

    next.castling_rights &=
        CASTLING_RIGHTS_SURVIVING[from as usize] & CASTLING_RIGHTS_SURVIVING[to as usize];
    next.zobrist_key ^= keys.castling(next.castling_rights);

    next.en_passant_square = if mv.is_double_pawn_push() {
        Some((from + to) / 2)
    } else {
        None
    };
    if let Some(ep_square) = next.en_passant_square {
        next.zobrist_key ^= keys.en_passant_file(file_of(ep_square));
    }

    if moved_piece == PieceKind::Pawn || mv.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if us == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = them;
    next.zobrist_key ^= keys.side_to_move();

    next.recalc_occupancy();

    if is_king_in_check(ctx, &next, us) {
        return None;
    }

    Some(next)
}
