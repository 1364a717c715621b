//! Shared state for parallel root search.
//!
//! Workers own their boards. The only state they share is the cancellation
//! flag and node counter in `SharedSearchState`, plus the transposition table.

use std::ops::Range;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Mutex,
};
use std::time::Instant;

use crate::search::transposition_table::{TTEntry, TTStats, TranspositionTable, DEFAULT_TT_ENTRIES};

/// Default number of mutex shards in the shared transposition table.
pub const DEFAULT_TT_SHARDS: usize = 64;

/// Cancellation and accounting shared by every worker of one search.
#[derive(Debug)]
pub struct SharedSearchState {
    stop: AtomicBool,
    nodes_visited: AtomicU64,
    deadline: Option<Instant>,
}

impl SharedSearchState {
    pub fn new(deadline: Option<Instant>) -> Self {
        Self {
            stop: AtomicBool::new(false),
            nodes_visited: AtomicU64::new(0),
            deadline,
        }
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Stop flag, raised first if the deadline has passed. Called on node entry.
    #[inline]
    pub fn check_deadline(&self) -> bool {
        if self.should_stop() {
            return true;
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.request_stop();
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn add_nodes(&self, n: u64) {
        self.nodes_visited.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes_visited.load(Ordering::Relaxed)
    }
}

/// Direct-mapped, always-overwrite table split into mutex-guarded shards.
///
/// A global slot `key % capacity` lives in shard `slot % shards` at local index
/// `slot / shards`. Entries are copied in and out under the shard lock, so a
/// reader never sees a half-written entry. A poisoned shard reads as a miss
/// and drops stores.
#[derive(Debug)]
pub struct SharedTranspositionTable {
    shards: Vec<Mutex<TranspositionTable>>,
    capacity: usize,
}

impl Default for SharedTranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TT_ENTRIES, DEFAULT_TT_SHARDS)
    }
}

impl SharedTranspositionTable {
    pub fn new(capacity: usize, shard_count: usize) -> Self {
        let capacity = capacity.max(1);
        let shard_count = shard_count.clamp(1, capacity);
        let per_shard = capacity.div_ceil(shard_count);
        let shards = (0..shard_count)
            .map(|_| Mutex::new(TranspositionTable::with_entries(per_shard)))
            .collect();
        Self { shards, capacity }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn locate(&self, key: u64) -> (usize, usize) {
        let slot = (key % self.capacity as u64) as usize;
        (slot % self.shards.len(), slot / self.shards.len())
    }

    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        let (shard, idx) = self.locate(key);
        let Ok(mut guard) = self.shards[shard].lock() else {
            return None;
        };
        guard.probe_at(idx, key)
    }

    pub fn store(&self, entry: TTEntry) {
        let (shard, idx) = self.locate(entry.key);
        if let Ok(mut guard) = self.shards[shard].lock() {
            guard.store_at(idx, entry);
        }
    }

    pub fn clear(&self) {
        for shard in &self.shards {
            if let Ok(mut guard) = shard.lock() {
                guard.clear();
            }
        }
    }

    pub fn stats(&self) -> TTStats {
        let mut merged = TTStats::default();
        for shard in &self.shards {
            if let Ok(guard) = shard.lock() {
                let s = guard.stats();
                merged.probes += s.probes;
                merged.hits += s.hits;
                merged.stores += s.stores;
            }
        }
        merged
    }
}

/// Split `count` root moves into `workers` contiguous ranges of `count / workers`
/// moves each, with the remainder folded into the last range.
pub fn root_chunks(count: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.clamp(1, count.max(1));
    let size = count / workers;

    (0..workers)
        .map(|worker| {
            let start = worker * size;
            let end = if worker + 1 == workers { count } else { start + size };
            start..end
        })
        .collect()
}
