//! Perft: exhaustive move-tree node counting for move-generation validation.

use std::thread;

use crate::game_state::chess_context::ChessContext;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_list::MoveList;
use crate::move_generation::pseudo_legal::generate_moves;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

/// Leaf-node count at `depth`.
pub fn perft(ctx: &ChessContext, game_state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    generate_moves(ctx, game_state, &mut moves);

    let mut nodes = 0u64;
    for &mv in &moves {
        let Some(next) = make_move(ctx, game_state, mv) else {
            continue;
        };
        nodes += if depth == 1 { 1 } else { perft(ctx, &next, depth - 1) };
    }
    nodes
}

/// Leaf count plus per-leaf move statistics (captures, castles, checks...).
pub fn perft_counts(ctx: &ChessContext, game_state: &GameState, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }
    count_recurse(ctx, game_state, depth, &mut total);
    total
}

fn count_recurse(ctx: &ChessContext, game_state: &GameState, depth: u8, counts: &mut PerftCounts) {
    let mut moves = MoveList::new();
    generate_moves(ctx, game_state, &mut moves);

    for &mv in &moves {
        let Some(next) = make_move(ctx, game_state, mv) else {
            continue;
        };

        if depth > 1 {
            count_recurse(ctx, &next, depth - 1, counts);
            continue;
        }

        counts.nodes += 1;
        counts.captures += u64::from(mv.is_capture());
        counts.en_passant += u64::from(mv.is_en_passant());
        counts.castles += u64::from(mv.is_castling());
        counts.promotions += u64::from(mv.is_promotion());
        counts.checks += u64::from(is_king_in_check(ctx, &next, next.side_to_move));
    }
}

/// Per-root-move leaf counts, in generation order.
pub fn perft_divide(ctx: &ChessContext, game_state: &GameState, depth: u8) -> Vec<(Move, u64)> {
    let mut moves = MoveList::new();
    generate_moves(ctx, game_state, &mut moves);

    moves
        .iter()
        .filter_map(|&mv| {
            let next = make_move(ctx, game_state, mv)?;
            Some((mv, perft(ctx, &next, depth.saturating_sub(1))))
        })
        .collect()
}

/// Perft with the legal root moves split across `threads` scoped workers.
pub fn perft_parallel(ctx: &ChessContext, game_state: &GameState, depth: u8, threads: usize) -> u64 {
    if depth <= 1 || threads <= 1 {
        return perft(ctx, game_state, depth);
    }

    let mut moves = MoveList::new();
    generate_moves(ctx, game_state, &mut moves);
    let children: Vec<GameState> = moves
        .iter()
        .filter_map(|&mv| make_move(ctx, game_state, mv))
        .collect();
    if children.is_empty() {
        return 0;
    }

    let chunk_size = children.len().div_ceil(threads);
    thread::scope(|scope| {
        let handles: Vec<_> = children
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|child| perft(ctx, child, depth - 1))
                        .sum::<u64>()
                })
            })
            .collect();

        // A panicking worker has already printed its message; count it as zero.
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(0))
            .sum()
    })
}
