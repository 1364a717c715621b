//! Immutable, once-built engine context: attack tables and Zobrist keys.
//!
//! Move generation, move application and search all take a `&ChessContext`
//! instead of reaching for globals. `shared()` hands out a process-wide
//! instance built on first use; `new()` builds an independent one.

use std::sync::OnceLock;
use std::time::Instant;

use crate::moves::attack_tables::AttackTables;
use crate::search::zobrist::ZobristKeys;

#[derive(Debug, Clone)]
pub struct ChessContext {
    pub attacks: AttackTables,
    pub zobrist: ZobristKeys,
}

static SHARED_CONTEXT: OnceLock<ChessContext> = OnceLock::new();

impl ChessContext {
    pub fn new() -> Self {
        let started = Instant::now();
        let ctx = Self {
            attacks: AttackTables::build(),
            zobrist: ZobristKeys::default(),
        };
        log::info!(
            "attack tables and zobrist keys initialized in {:.1} ms",
            started.elapsed().as_secs_f64() * 1000.0
        );
        ctx
    }

    /// Process-wide context. Idempotent: every call returns the same instance.
    pub fn shared() -> &'static ChessContext {
        SHARED_CONTEXT.get_or_init(Self::new)
    }
}

impl Default for ChessContext {
    fn default() -> Self {
        Self::new()
    }
}
