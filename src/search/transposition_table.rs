//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct-mapped by `key % capacity`, and every store overwrites its slot
//! regardless of the incumbent. The full key is kept in each entry, so a slot
//! holding another position reads as a miss.

use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::MATE_SCORE;

/// Default capacity: 2^20 entries.
pub const DEFAULT_TT_ENTRIES: usize = 1 << 20;

/// Scores this close to `MATE_SCORE` encode a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// Fail-high: the true score is at least `score`.
    Lower,
    /// Fail-low: the true score is at most `score`.
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Move,
}

impl TTEntry {
    /// Stored score if it settles a node searched with `(alpha, beta)` at
    /// `depth`, else `None`. `score` must already be ply-adjusted.
    #[inline]
    pub fn cutoff_score(&self, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Lower if self.score >= beta => Some(self.score),
            Bound::Upper if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

impl TTStats {
    /// Traffic since the `earlier` snapshot. A table cleared in between
    /// counts from zero.
    pub fn since(self, earlier: TTStats) -> TTStats {
        TTStats {
            probes: self.probes.saturating_sub(earlier.probes),
            hits: self.hits.saturating_sub(earlier.hits),
            stores: self.stores.saturating_sub(earlier.stores),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    stats: TTStats,
}

impl TranspositionTable {
    pub fn with_entries(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity.max(1)],
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    pub fn probe(&mut self, key: u64) -> Option<TTEntry> {
        let idx = self.idx(key);
        self.probe_at(idx, key)
    }

    pub fn store(&mut self, entry: TTEntry) {
        let idx = self.idx(entry.key);
        self.store_at(idx, entry);
    }

    /// Probe a slot chosen by the caller (used by the sharded table).
    pub(crate) fn probe_at(&mut self, idx: usize, key: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries.get(idx).copied().flatten().filter(|e| e.key == key);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub(crate) fn store_at(&mut self, idx: usize, entry: TTEntry) {
        if let Some(slot) = self.entries.get_mut(idx) {
            self.stats.stores += 1;
            *slot = Some(entry);
        }
    }
}

/// Convert a root-relative mate score into the node-relative form that is stored.
#[inline]
pub fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Inverse of `score_to_tt` for the probing node's ply.
#[inline]
pub fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: u64, depth: u8, score: i32, bound: Bound) -> TTEntry {
        TTEntry {
            key,
            depth,
            score,
            bound,
            best_move: Move::NULL,
        }
    }

    #[test]
    fn stored_entry_is_found_again() {
        let mut tt = TranspositionTable::with_entries(1024);
        let stored = entry(123, 5, 42, Bound::Exact);
        tt.store(stored);
        assert_eq!(tt.probe(123), Some(stored));
        assert_eq!(tt.stats().hits, 1);
    }

    #[test]
    fn stats_difference_between_snapshots() {
        let mut tt = TranspositionTable::with_entries(64);
        tt.store(entry(7, 1, 0, Bound::Exact));
        let before = tt.stats();

        tt.probe(7);
        tt.probe(8);
        let delta = tt.stats().since(before);
        assert_eq!(delta, TTStats { probes: 2, hits: 1, stores: 0 });
        assert_eq!(TTStats::default().since(delta), TTStats::default());
    }

    #[test]
    fn always_overwrites_even_deeper_entries() {
        let mut tt = TranspositionTable::with_entries(1024);
        tt.store(entry(555, 9, 1, Bound::Exact));
        tt.store(entry(555, 1, 9, Bound::Upper));
        let got = tt.probe(555).expect("entry should exist");
        assert_eq!((got.depth, got.score), (1, 9));
    }

    #[test]
    fn colliding_key_reads_as_miss() {
        let mut tt = TranspositionTable::with_entries(16);
        tt.store(entry(3, 4, 10, Bound::Exact));
        assert_eq!(tt.probe(3 + 16), None);

        tt.store(entry(3 + 16, 2, 20, Bound::Lower));
        assert_eq!(tt.probe(3), None);
    }

    #[test]
    fn cutoff_respects_depth_and_bound() {
        let exact = entry(1, 4, 50, Bound::Exact);
        assert_eq!(exact.cutoff_score(4, -100, 100), Some(50));
        assert_eq!(exact.cutoff_score(5, -100, 100), None);

        let lower = entry(1, 4, 120, Bound::Lower);
        assert_eq!(lower.cutoff_score(3, -100, 100), Some(120));
        assert_eq!(lower.cutoff_score(3, -100, 200), None);

        let upper = entry(1, 4, -150, Bound::Upper);
        assert_eq!(upper.cutoff_score(3, -100, 100), Some(-150));
        assert_eq!(upper.cutoff_score(3, -200, 100), None);
    }

    #[test]
    fn mate_scores_are_ply_adjusted() {
        // Mate delivered at ply 9, seen from a node at ply 5.
        let root_relative = MATE_SCORE - 9;
        let stored = score_to_tt(root_relative, 5);
        assert_eq!(stored, MATE_SCORE - 4);
        assert_eq!(score_from_tt(stored, 5), root_relative);
        // Same node reached at ply 7: the mate is two plies further from the root.
        assert_eq!(score_from_tt(stored, 7), MATE_SCORE - 11);
        assert_eq!(score_to_tt(-root_relative, 5), -(MATE_SCORE - 4));
        assert_eq!(score_to_tt(120, 9), 120);
    }
}
