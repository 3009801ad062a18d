//! Transposition cache for the minimax search.
//!
//! Entries are keyed by board snapshot together with the side to move and
//! the perspective color, since the same stones score differently depending
//! on who is evaluating and who plays next. Each entry remembers the depth
//! it was searched to and whether its score is exact or a bound from an
//! alpha-beta cutoff.

use std::collections::HashMap;

use crate::board::{Color, Snapshot};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub snapshot: Snapshot,
    pub to_move: Color,
    pub perspective: Color,
}

/// How a stored score relates to the true minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Fully searched inside the window.
    Exact,
    /// True value is at least the score (beta cutoff).
    Lower,
    /// True value is at most the score (no move reached alpha).
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct CacheEntry {
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
}

/// Size-capped map from search positions to scores.
pub struct TranspositionTable {
    table: HashMap<CacheKey, CacheEntry>,
    max_size: usize,
    hits: u64,
    misses: u64,
}

impl TranspositionTable {
    /// Create a table holding at most `max_size` entries.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            table: HashMap::with_capacity(max_size.min(100_000)),
            max_size,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a score usable at `depth` within the `(alpha, beta)` window.
    ///
    /// Entries searched shallower than `depth` never answer. Bounds only
    /// answer when they already decide the window.
    pub fn probe(&mut self, key: &CacheKey, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        let hit = self.table.get(key).and_then(|entry| {
            if entry.depth < depth {
                return None;
            }
            match entry.bound {
                Bound::Exact => Some(entry.score),
                Bound::Lower if entry.score >= beta => Some(entry.score),
                Bound::Upper if entry.score <= alpha => Some(entry.score),
                _ => None,
            }
        });
        match hit {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        hit
    }

    /// Store a search result.
    ///
    /// When the table is full only existing keys are updated, and only by a
    /// result at least as deep or more exact than the one held.
    pub fn store(&mut self, key: CacheKey, entry: CacheEntry) {
        if let Some(existing) = self.table.get(&key) {
            let replace = entry.depth >= existing.depth
                || (entry.bound == Bound::Exact && existing.bound != Bound::Exact);
            if !replace {
                return;
            }
        } else if self.table.len() >= self.max_size {
            return;
        }
        log::trace!(
            "cache store depth={} score={} bound={:?}",
            entry.depth,
            entry.score,
            entry.bound
        );
        self.table.insert(key, entry);
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Fraction of probes since the last clear that returned a score.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
