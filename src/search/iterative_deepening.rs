//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Per node: deadline check, check extension, transposition probe, then a
//! principal variation search over ordered moves (TT move, MVV-LVA captures,
//! quiet moves). The horizon enters a capture-only quiescence search (all
//! evasions when in check). Scores are fail-soft and side-relative.
//!
//! The root move list is split into contiguous chunks, one per worker. Each
//! worker searches its chunk on its own board copy with its own window; the
//! shared transposition table is the only mutable state they have in common.
//! Only fully completed depths are reported, except that a depth-1 iteration
//! cut short by the deadline still reports whatever its workers finished.

use std::thread;
use std::time::{Duration, Instant};

use crate::game_state::chess_context::ChessContext;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_list::{MoveList, MAX_MOVES};
use crate::move_generation::pseudo_legal::{generate_captures, generate_moves};
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{piece_value, BoardScorer, PieceSquareScorer, MATE_SCORE};
use crate::search::threading::{root_chunks, SharedSearchState, SharedTranspositionTable};
use crate::search::transposition_table::{
    score_from_tt, score_to_tt, Bound, TTEntry, TTStats, MATE_THRESHOLD,
};

pub const MAX_PLY: usize = 64;
const INFINITY: i32 = MATE_SCORE + 1;

/// What to search: the arguments of a `go` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u8,
    pub movetime_ms: Option<u64>,
    pub threads: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: 6,
            movetime_ms: None,
            threads: 1,
        }
    }
}

/// How to search: engine options that persist between searches. Table
/// capacity belongs to whoever owns the `SharedTranspositionTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// When off, depth 0 returns the static evaluation.
    pub use_quiescence: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { use_quiescence: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Head of `pv`; `None` when the root has no legal move.
    pub best_move: Option<Move>,
    /// Side-to-move relative, centipawns or mate distance.
    pub score: i32,
    /// Last completed depth.
    pub depth: u8,
    pub pv: Vec<Move>,
    pub nodes: u64,
    pub elapsed: Duration,
    /// Transposition table traffic during this search only.
    pub tt: TTStats,
}

impl SearchResult {
    /// Moves to mate (positive: side to move mates), if the score is a mate score.
    pub fn mate_in(&self) -> Option<i32> {
        if self.score >= MATE_THRESHOLD {
            Some((MATE_SCORE - self.score + 1) / 2)
        } else if self.score <= -MATE_THRESHOLD {
            Some(-(MATE_SCORE + self.score) / 2)
        } else {
            None
        }
    }
}

/// Search with the default piece-square evaluation.
pub fn search(
    ctx: &ChessContext,
    tt: &SharedTranspositionTable,
    game_state: &GameState,
    limits: SearchLimits,
    config: SearchConfig,
) -> SearchResult {
    search_with_progress(ctx, tt, game_state, limits, config, &PieceSquareScorer, |_| {})
}

/// Iterative deepening driver. `on_depth` sees every completed iteration.
pub fn search_with_progress<S, F>(
    ctx: &ChessContext,
    tt: &SharedTranspositionTable,
    game_state: &GameState,
    limits: SearchLimits,
    config: SearchConfig,
    scorer: &S,
    mut on_depth: F,
) -> SearchResult
where
    S: BoardScorer,
    F: FnMut(&SearchResult),
{
    let started_at = Instant::now();
    let deadline = limits
        .movetime_ms
        .map(|ms| started_at + Duration::from_millis(ms));
    let shared = SharedSearchState::new(deadline);
    let max_depth = limits.max_depth.min(MAX_PLY as u8);
    let threads = limits.threads.max(1);
    let tt_before = tt.stats();

    log::info!(
        "search start: fen {} depth {} movetime {:?} threads {}",
        game_state.to_fen(),
        max_depth,
        limits.movetime_ms,
        threads
    );

    let mut result = SearchResult::default();

    if max_depth == 0 {
        let mut searcher = Searcher::new(ctx, tt, &shared, scorer, config);
        result.score = searcher.horizon(game_state, -INFINITY, INFINITY, 0);
        shared.add_nodes(searcher.nodes);
    } else {
        let mut root_moves = MoveList::new();
        generate_moves(ctx, game_state, &mut root_moves);

        let mut previous_best = Move::NULL;
        for depth in 1..=max_depth {
            order_moves(&mut root_moves, previous_best);

            let outcome = search_root(
                ctx,
                tt,
                &shared,
                scorer,
                config,
                game_state,
                root_moves.as_slice(),
                depth,
                threads,
            );
            let stopped = shared.should_stop();

            let Some(line) = outcome else {
                if stopped {
                    // Cut off before any root move finished: still answer with a legal move.
                    if result.best_move.is_none() {
                        result.best_move = root_moves
                            .iter()
                            .copied()
                            .find(|&mv| make_move(ctx, game_state, mv).is_some());
                        result.pv = result.best_move.into_iter().collect();
                    }
                } else {
                    // No legal root move: mate or stalemate.
                    result.score = if is_king_in_check(ctx, game_state, game_state.side_to_move) {
                        -MATE_SCORE
                    } else {
                        0
                    };
                }
                break;
            };

            if stopped {
                if result.best_move.is_none() {
                    result.best_move = Some(line.best_move);
                    result.score = line.score;
                    result.pv = line.pv;
                }
                log::debug!("depth {depth} aborted by deadline");
                break;
            }

            previous_best = line.best_move;
            tt.store(TTEntry {
                key: game_state.zobrist_key,
                depth,
                score: line.score,
                bound: Bound::Exact,
                best_move: line.best_move,
            });

            result.best_move = Some(line.best_move);
            result.score = line.score;
            result.depth = depth;
            result.pv = line.pv;
            result.nodes = shared.nodes();
            result.elapsed = started_at.elapsed();

            log::debug!(
                "depth {} score {} nodes {} pv {}",
                depth,
                result.score,
                result.nodes,
                format_pv(&result.pv)
            );
            on_depth(&result);
        }
    }

    result.nodes = shared.nodes();
    result.elapsed = started_at.elapsed();
    result.tt = tt.stats().since(tt_before);

    log::info!(
        "search end: depth {} score {} best {} nodes {} in {} ms, tt probes {} hits {} stores {}",
        result.depth,
        result.score,
        result.best_move.map(|mv| mv.to_uci()).unwrap_or_else(|| "none".to_owned()),
        result.nodes,
        result.elapsed.as_millis(),
        result.tt.probes,
        result.tt.hits,
        result.tt.stores
    );

    result
}

pub fn format_pv(pv: &[Move]) -> String {
    pv.iter().map(|mv| mv.to_uci()).collect::<Vec<_>>().join(" ")
}

/// Best line found by one root worker.
#[derive(Debug, Clone)]
struct RootLine {
    best_move: Move,
    score: i32,
    pv: Vec<Move>,
}

#[allow(clippy::too_many_arguments)]
fn search_root<S: BoardScorer>(
    ctx: &ChessContext,
    tt: &SharedTranspositionTable,
    shared: &SharedSearchState,
    scorer: &S,
    config: SearchConfig,
    game_state: &GameState,
    root_moves: &[Move],
    depth: u8,
    threads: usize,
) -> Option<RootLine> {
    let workers = threads.min(root_moves.len()).max(1);
    let chunks = root_chunks(root_moves.len(), workers);

    let lines: Vec<Option<RootLine>> = if chunks.len() == 1 {
        let mut searcher = Searcher::new(ctx, tt, shared, scorer, config);
        let line = searcher.search_root_chunk(game_state, root_moves, depth);
        shared.add_nodes(searcher.nodes);
        vec![line]
    } else {
        thread::scope(|scope| {
            let handles: Vec<_> = chunks
                .iter()
                .enumerate()
                .map(|(worker_id, range)| {
                    let moves = &root_moves[range.clone()];
                    scope.spawn(move || {
                        log::debug!("worker {worker_id} starting, searching {} moves", moves.len());
                        let mut searcher = Searcher::new(ctx, tt, shared, scorer, config);
                        let line = searcher.search_root_chunk(game_state, moves, depth);
                        shared.add_nodes(searcher.nodes);
                        log::debug!("worker {worker_id} finished after {} nodes", searcher.nodes);
                        line
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().ok().flatten())
                .collect()
        })
    };

    // Earlier chunks win ties, matching the serial move order.
    lines.into_iter().flatten().fold(None, |best: Option<RootLine>, line| match best {
        Some(current) if current.score >= line.score => Some(current),
        _ => Some(line),
    })
}

/// Triangular principal-variation buffer.
#[derive(Clone, Copy)]
struct PvLine {
    moves: [Move; MAX_PLY],
    len: usize,
}

impl PvLine {
    fn new() -> Self {
        Self {
            moves: [Move::NULL; MAX_PLY],
            len: 0,
        }
    }

    #[inline]
    fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    fn update(&mut self, mv: Move, child: &PvLine) {
        let tail = child.len.min(MAX_PLY - 1);
        self.moves[0] = mv;
        self.moves[1..=tail].copy_from_slice(&child.moves[..tail]);
        self.len = tail + 1;
    }

    fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }
}

struct Searcher<'a, S: BoardScorer> {
    ctx: &'a ChessContext,
    tt: &'a SharedTranspositionTable,
    shared: &'a SharedSearchState,
    scorer: &'a S,
    use_quiescence: bool,
    nodes: u64,
}

impl<'a, S: BoardScorer> Searcher<'a, S> {
    fn new(
        ctx: &'a ChessContext,
        tt: &'a SharedTranspositionTable,
        shared: &'a SharedSearchState,
        scorer: &'a S,
        config: SearchConfig,
    ) -> Self {
        Self {
            ctx,
            tt,
            shared,
            scorer,
            use_quiescence: config.use_quiescence,
            nodes: 0,
        }
    }

    /// Full-window search of one root chunk. `None` if no move in it is legal.
    fn search_root_chunk(&mut self, game_state: &GameState, moves: &[Move], depth: u8) -> Option<RootLine> {
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best: Option<RootLine> = None;
        let mut child_pv = PvLine::new();
        let mut legal = 0usize;

        for &mv in moves {
            let Some(next) = make_move(self.ctx, game_state, mv) else {
                continue;
            };
            legal += 1;

            let score = self.search_child(&next, depth - 1, alpha, beta, 1, legal == 1, &mut child_pv);
            if self.shared.should_stop() {
                break;
            }

            if best.as_ref().is_none_or(|line| score > line.score) {
                let mut pv = Vec::with_capacity(child_pv.len + 1);
                pv.push(mv);
                pv.extend_from_slice(child_pv.as_slice());
                best = Some(RootLine {
                    best_move: mv,
                    score,
                    pv,
                });
            }
            alpha = alpha.max(score);
        }

        best
    }

    /// PVS step shared by root and interior nodes: full window for the first
    /// legal move, scout window plus re-search for the rest.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn search_child(
        &mut self,
        next: &GameState,
        depth: u8,
        alpha: i32,
        beta: i32,
        ply: usize,
        first: bool,
        child_pv: &mut PvLine,
    ) -> i32 {
        if first {
            return -self.negamax(next, depth, -beta, -alpha, ply, child_pv);
        }

        let score = -self.negamax(next, depth, -alpha - 1, -alpha, ply, child_pv);
        if score > alpha && score < beta {
            -self.negamax(next, depth, -beta, -alpha, ply, child_pv)
        } else {
            score
        }
    }

    fn negamax(
        &mut self,
        game_state: &GameState,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        pv: &mut PvLine,
    ) -> i32 {
        pv.clear();
        self.nodes += 1;

        if self.shared.check_deadline() || ply >= MAX_PLY {
            return self.scorer.score(game_state);
        }

        let in_check = is_king_in_check(self.ctx, game_state, game_state.side_to_move);
        let depth = if in_check { depth.saturating_add(1) } else { depth };

        if depth == 0 {
            return self.horizon(game_state, alpha, beta, ply);
        }

        let alpha_orig = alpha;
        let key = game_state.zobrist_key;
        let mut tt_move = Move::NULL;
        if let Some(entry) = self.tt.probe(key) {
            tt_move = entry.best_move;
            let entry = TTEntry {
                score: score_from_tt(entry.score, ply),
                ..entry
            };
            if let Some(score) = entry.cutoff_score(depth, alpha, beta) {
                return score;
            }
        }

        let mut moves = MoveList::new();
        generate_moves(self.ctx, game_state, &mut moves);
        let mut order = OrderScores::new(&moves, tt_move);

        let mut best = -INFINITY;
        let mut best_move = Move::NULL;
        let mut legal = 0usize;
        let mut child_pv = PvLine::new();

        for index in 0..moves.len() {
            let mv = order.pick(&mut moves, index);
            let Some(next) = make_move(self.ctx, game_state, mv) else {
                continue;
            };
            legal += 1;

            let score = self.search_child(&next, depth - 1, alpha, beta, ply + 1, legal == 1, &mut child_pv);
            if self.shared.should_stop() {
                return self.scorer.score(game_state);
            }

            if score > best {
                best = score;
                best_move = mv;
                if score > alpha {
                    alpha = score;
                    pv.update(mv, &child_pv);
                }
            }
            if alpha >= beta {
                break;
            }
        }

        if legal == 0 {
            return if in_check {
                -(MATE_SCORE - ply as i32)
            } else {
                0
            };
        }

        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(TTEntry {
            key,
            depth,
            score: score_to_tt(best, ply),
            bound,
            best_move,
        });

        best
    }

    /// Depth-0 score: quiescence, or the static evaluation when it is disabled.
    fn horizon(&mut self, game_state: &GameState, alpha: i32, beta: i32, ply: usize) -> i32 {
        if self.use_quiescence {
            self.quiescence(game_state, alpha, beta, ply)
        } else {
            self.scorer.score(game_state)
        }
    }

    fn quiescence(&mut self, game_state: &GameState, mut alpha: i32, beta: i32, ply: usize) -> i32 {
        self.nodes += 1;

        if self.shared.check_deadline() || ply >= MAX_PLY {
            return self.scorer.score(game_state);
        }

        let in_check = is_king_in_check(self.ctx, game_state, game_state.side_to_move);
        let mut moves = MoveList::new();
        let mut best;

        if in_check {
            best = -INFINITY;
            generate_moves(self.ctx, game_state, &mut moves);
        } else {
            let stand_pat = self.scorer.score(game_state);
            if stand_pat >= beta {
                return stand_pat;
            }
            alpha = alpha.max(stand_pat);
            best = stand_pat;
            generate_captures(self.ctx, game_state, &mut moves);
        }

        let mut order = OrderScores::new(&moves, Move::NULL);
        let mut legal = 0usize;

        for index in 0..moves.len() {
            let mv = order.pick(&mut moves, index);
            let Some(next) = make_move(self.ctx, game_state, mv) else {
                continue;
            };
            legal += 1;

            let score = -self.quiescence(&next, -beta, -alpha, ply + 1);
            if self.shared.should_stop() {
                return self.scorer.score(game_state);
            }

            if score > best {
                best = score;
                alpha = alpha.max(score);
            }
            if alpha >= beta {
                break;
            }
        }

        if in_check && legal == 0 {
            return -(MATE_SCORE - ply as i32);
        }

        best
    }
}

/// Ordering keys for a move list, consumed by lazy selection sort.
struct OrderScores {
    scores: [i32; MAX_MOVES],
}

impl OrderScores {
    fn new(moves: &MoveList, tt_move: Move) -> Self {
        let mut scores = [0i32; MAX_MOVES];
        for (slot, &mv) in scores.iter_mut().zip(moves.iter()) {
            *slot = move_order_score(mv, tt_move);
        }
        Self { scores }
    }

    /// Swap the best remaining move into `index` and return it.
    fn pick(&mut self, moves: &mut MoveList, index: usize) -> Move {
        let mut best = index;
        for candidate in index + 1..moves.len() {
            if self.scores[candidate] > self.scores[best] {
                best = candidate;
            }
        }
        moves.swap(index, best);
        self.scores.swap(index, best);
        moves.get(index).unwrap_or(Move::NULL)
    }
}

fn move_order_score(mv: Move, tt_move: Move) -> i32 {
    if !tt_move.is_null() && mv == tt_move {
        return 1_000_000;
    }

    let promotion_bonus = mv.promotion_piece().map_or(0, piece_value);
    match mv.captured_piece() {
        // MVV-LVA
        Some(victim) => 100_000 + 10 * piece_value(victim) - piece_value(mv.moved_piece()) + promotion_bonus,
        None if promotion_bonus > 0 => 50_000 + promotion_bonus,
        None => 0,
    }
}

/// Stable reorder for the root: previous best first, then by ordering score.
fn order_moves(moves: &mut MoveList, previous_best: Move) {
    moves
        .as_mut_slice()
        .sort_by_key(|&mv| std::cmp::Reverse(move_order_score(mv, previous_best)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::make_move;
    use crate::utils::long_algebraic::parse_move;

    const BACK_RANK_MATE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

    fn fresh_tt() -> SharedTranspositionTable {
        SharedTranspositionTable::new(1 << 16, 8)
    }

    fn limits(max_depth: u8, threads: usize) -> SearchLimits {
        SearchLimits {
            max_depth,
            movetime_ms: None,
            threads,
        }
    }

    #[test]
    fn finds_back_rank_mate_with_one_and_two_threads() {
        let ctx = ChessContext::shared();
        let game = GameState::from_fen(ctx, BACK_RANK_MATE).expect("FEN should parse");

        for threads in [1, 2] {
            for depth in [1, 3] {
                let result = search(ctx, &fresh_tt(), &game, limits(depth, threads), SearchConfig::default());
                let best = result.best_move.expect("a move should be found");

                assert_eq!(best.to_uci(), "a1a8", "threads {threads} depth {depth}");
                assert!(result.score >= MATE_SCORE - 10, "score {}", result.score);
                assert_eq!(result.mate_in(), Some(1));
                assert_eq!(result.depth, depth);
                assert_eq!(result.pv.first(), Some(&best));
            }
        }
    }

    #[test]
    fn mated_and_stalemated_roots_have_no_move() {
        let ctx = ChessContext::shared();
        let mated = GameState::from_fen(ctx, "R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").expect("FEN should parse");
        let stalemated = GameState::from_fen(ctx, "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");

        let result = search(ctx, &fresh_tt(), &mated, limits(3, 1), SearchConfig::default());
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE_SCORE);

        let result = search(ctx, &fresh_tt(), &stalemated, limits(3, 2), SearchConfig::default());
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn quiet_position_scores_same_with_and_without_quiescence() {
        let ctx = ChessContext::shared();
        // No captures for either side, nobody in check.
        let quiet = GameState::from_fen(ctx, "4k3/pppp4/8/8/8/8/4PPPP/4K3 w - - 0 1").expect("FEN should parse");

        let with_q = search(ctx, &fresh_tt(), &quiet, limits(0, 1), SearchConfig::default());
        let without_q = search(
            ctx,
            &fresh_tt(),
            &quiet,
            limits(0, 1),
            SearchConfig { use_quiescence: false },
        );

        assert_eq!(with_q.score, without_q.score);
        assert_eq!(with_q.score, PieceSquareScorer.score(&quiet));
    }

    #[test]
    fn quiescence_sees_hanging_queen() {
        let ctx = ChessContext::shared();
        // White to move can take the undefended queen on d5.
        let game = GameState::from_fen(ctx, "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");

        let with_q = search(ctx, &fresh_tt(), &game, limits(0, 1), SearchConfig::default());
        let static_only = PieceSquareScorer.score(&game);
        assert!(with_q.score > static_only + 500);
    }

    #[test]
    fn wins_material_when_available() {
        let ctx = ChessContext::shared();
        let game = GameState::from_fen(ctx, "4k3/8/q7/8/8/8/8/4KQ2 w - - 0 1").expect("FEN should parse");
        let result = search(ctx, &fresh_tt(), &game, limits(3, 2), SearchConfig::default());
        assert_eq!(result.best_move.map(|mv| mv.to_uci()).as_deref(), Some("f1a6"));
    }

    #[test]
    fn deadline_stops_deep_search() {
        let ctx = ChessContext::shared();
        let game = GameState::new_game(ctx);
        let started = Instant::now();
        let result = search(
            ctx,
            &fresh_tt(),
            &game,
            SearchLimits {
                max_depth: MAX_PLY as u8,
                movetime_ms: Some(100),
                threads: 2,
            },
            SearchConfig::default(),
        );

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(result.depth < MAX_PLY as u8);
        let best = result.best_move.expect("some depth should complete");
        assert!(make_move(ctx, &game, best).is_some());
    }

    #[test]
    fn principal_variation_is_playable() {
        let ctx = ChessContext::shared();
        let game = GameState::from_fen(
            ctx,
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        )
        .expect("FEN should parse");

        let mut reported = Vec::new();
        let result = search_with_progress(
            ctx,
            &fresh_tt(),
            &game,
            limits(4, 3),
            SearchConfig::default(),
            &PieceSquareScorer,
            |progress| reported.push(progress.depth),
        );

        assert_eq!(reported, vec![1, 2, 3, 4]);
        let mut position = game;
        for mv in &result.pv {
            let text = mv.to_uci();
            let parsed = parse_move(ctx, &position, &text).expect("pv move should be legal");
            position = make_move(ctx, &position, parsed).expect("pv move should apply");
        }
    }

    #[test]
    fn reports_table_traffic_per_search() {
        let ctx = ChessContext::shared();
        let game = GameState::new_game(ctx);
        let tt = fresh_tt();

        let first = search(ctx, &tt, &game, limits(4, 1), SearchConfig::default());
        assert!(first.tt.probes > 0);
        assert!(first.tt.stores > 0);
        assert!(first.tt.hits <= first.tt.probes);

        // Counts cover one search, not the lifetime of the table.
        let second = search(ctx, &tt, &game, limits(1, 1), SearchConfig::default());
        assert!(second.tt.probes < first.tt.probes);
        assert!(tt.stats().probes >= first.tt.probes + second.tt.probes);
    }

    #[test]
    fn root_ordering_puts_previous_best_first() {
        let ctx = ChessContext::shared();
        let game = GameState::from_fen(ctx, "4k3/8/8/3q4/4P3/8/8/4K2R w K - 0 1").expect("FEN should parse");
        let mut moves = MoveList::new();
        generate_moves(ctx, &game, &mut moves);

        let quiet = parse_move(ctx, &game, "h1h5").expect("h1h5 should be legal");
        order_moves(&mut moves, quiet);
        assert_eq!(moves.get(0), Some(quiet));
        assert_eq!(moves.get(1).map(|mv| mv.to_uci()).as_deref(), Some("e4d5"));
    }
}
