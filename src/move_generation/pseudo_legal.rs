//! Pseudo-legal move generation.
//!
//! Moves are emitted without any king-safety filtering; `make_move` rejects
//! the illegal ones. The captured piece kind is looked up only for
//! destinations already known to hold an enemy piece.

use crate::game_state::chess_context::ChessContext;
use crate::game_state::chess_rules::CASTLING_LANES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_list::MoveList;
use crate::moves::bit_primitives::{is_bit_set, square_bb, Squares};
use crate::moves::move_descriptions::{Move, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenMode {
    All,
    Captures,
}

/// Every pseudo-legal move for the side to move, appended to `out`.
pub fn generate_moves(ctx: &ChessContext, game_state: &GameState, out: &mut MoveList) {
    generate(ctx, game_state, out, GenMode::All);
}

/// Captures only (including en passant and capture-promotions).
pub fn generate_captures(ctx: &ChessContext, game_state: &GameState, out: &mut MoveList) {
    generate(ctx, game_state, out, GenMode::Captures);
}

fn generate(ctx: &ChessContext, game_state: &GameState, out: &mut MoveList, mode: GenMode) {
    let us = game_state.side_to_move;
    let them = us.opposite();
    let own = game_state.occupancy_by_color[us.index()];
    let enemy = game_state.occupancy_by_color[them.index()];
    let target_mask = match mode {
        GenMode::All => !own,
        GenMode::Captures => enemy,
    };
    let attacks = &ctx.attacks;
    let occupancy = game_state.occupancy_all;
    let pieces = &game_state.pieces[us.index()];

    generate_pawn_moves(ctx, game_state, out, mode);

    for from in Squares(pieces[PieceKind::Knight.index()]) {
        push_targets(game_state, out, from, PieceKind::Knight, attacks.knight(from) & target_mask);
    }
    for from in Squares(pieces[PieceKind::Bishop.index()]) {
        let targets = attacks.bishop(from, occupancy) & target_mask;
        push_targets(game_state, out, from, PieceKind::Bishop, targets);
    }
    for from in Squares(pieces[PieceKind::Rook.index()]) {
        let targets = attacks.rook(from, occupancy) & target_mask;
        push_targets(game_state, out, from, PieceKind::Rook, targets);
    }
    for from in Squares(pieces[PieceKind::Queen.index()]) {
        let targets = attacks.queen(from, occupancy) & target_mask;
        push_targets(game_state, out, from, PieceKind::Queen, targets);
    }
    for from in Squares(pieces[PieceKind::King.index()]) {
        push_targets(game_state, out, from, PieceKind::King, attacks.king(from) & target_mask);
    }

    if mode == GenMode::All {
        generate_castling_moves(game_state, out);
    }
}

fn push_targets(game_state: &GameState, out: &mut MoveList, from: Square, piece: PieceKind, targets: u64) {
    let them = game_state.side_to_move.opposite();
    let enemy = game_state.occupancy_by_color[them.index()];

    for to in Squares(targets) {
        let captured = if is_bit_set(enemy, to) {
            game_state.piece_kind_on(them, to)
        } else {
            None
        };
        out.push(Move::new(from, to, piece, captured, None, 0));
    }
}

fn generate_pawn_moves(ctx: &ChessContext, game_state: &GameState, out: &mut MoveList, mode: GenMode) {
    let us = game_state.side_to_move;
    let them = us.opposite();
    let attacks = &ctx.attacks;
    let empty = !game_state.occupancy_all;
    let enemy = game_state.occupancy_by_color[them.index()];
    let promotion_rank = match us {
        Color::White => 7,
        Color::Black => 0,
    };

    for from in Squares(game_state.pieces[us.index()][PieceKind::Pawn.index()]) {
        if mode == GenMode::All {
            let single = attacks.pawn_single_push(us, from) & empty;
            if single != 0 {
                let to = single.trailing_zeros() as Square;
                push_pawn_move(out, from, to, None, rank_of(to) == promotion_rank);

                let double = attacks.pawn_double_push(us, from) & empty;
                if double != 0 {
                    let to = double.trailing_zeros() as Square;
                    out.push(Move::new(from, to, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH));
                }
            }
        }

        let captures = attacks.pawn_captures(us, from);
        for to in Squares(captures & enemy) {
            let captured = game_state.piece_kind_on(them, to);
            push_pawn_move(out, from, to, captured, rank_of(to) == promotion_rank);
        }

        if let Some(ep_square) = game_state.en_passant_square {
            if captures & square_bb(ep_square) != 0 {
                out.push(Move::new(
                    from,
                    ep_square,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

fn push_pawn_move(out: &mut MoveList, from: Square, to: Square, captured: Option<PieceKind>, promotes: bool) {
    if promotes {
        for promotion in PROMOTION_PIECES {
            out.push(Move::new(from, to, PieceKind::Pawn, captured, Some(promotion), 0));
        }
    } else {
        out.push(Move::new(from, to, PieceKind::Pawn, captured, None, 0));
    }
}

/// Gated on rights, piece placement and empty squares only. Attacked-path
/// checks happen in `make_move`.
fn generate_castling_moves(game_state: &GameState, out: &mut MoveList) {
    let us = game_state.side_to_move;
    let pieces = &game_state.pieces[us.index()];

    for lane in &CASTLING_LANES[us.index()] {
        if game_state.castling_rights & lane.right == 0 {
            continue;
        }
        if !is_bit_set(pieces[PieceKind::King.index()], lane.king_from)
            || !is_bit_set(pieces[PieceKind::Rook.index()], lane.rook_from)
        {
            continue;
        }
        if game_state.occupancy_all & lane.empty_mask != 0 {
            continue;
        }
        out.push(Move::new(lane.king_from, lane.king_to, PieceKind::King, None, None, FLAG_CASTLING));
    }
}
