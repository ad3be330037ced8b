//! Per-frame candidate-pair deduplication.
//!
//! Two implementations share one contract: `check_and_set(a, b)` returns `true` the first
//! time a given unordered pair is seen and `false` on every subsequent call. A flat bit
//! matrix is O(n^2) in memory but branch-free per check; above [`DENSE_THRESHOLD`] segments
//! a hash set trades that for sub-quadratic memory. Callers never need to know which one
//! backs a given frame.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Segment counts at or below this use the dense bit matrix; above it, the hash set.
const DENSE_THRESHOLD: usize = 4096;

enum Backing {
    Dense { n: usize, seen: Vec<bool> },
    Sparse(HashSet<(usize, usize)>),
}

/// Single-threaded dedup structure used by the serial candidate-enumeration path.
pub struct PairDedup {
    backing: Backing,
}

impl PairDedup {
    pub fn new(n: usize) -> Self {
        let backing = if n <= DENSE_THRESHOLD {
            Backing::Dense {
                n,
                seen: vec![false; n * n],
            }
        } else {
            Backing::Sparse(HashSet::new())
        };
        Self { backing }
    }

    /// Returns `true` the first time `(a, b)` is seen this frame.
    ///
    /// Callers always pass the canonical pair from `Quadtree::canonical_pair`, i.e. `a` and
    /// `b` are ordered by segment geometry (`compare`), not by numeric index, so `a > b` is
    /// routine and not itself a bug.
    pub fn check_and_set(&mut self, a: usize, b: usize) -> bool {
        debug_assert!(a != b);
        match &mut self.backing {
            Backing::Dense { n, seen } => {
                let idx = a * *n + b;
                if seen[idx] {
                    false
                } else {
                    seen[idx] = true;
                    true
                }
            }
            Backing::Sparse(set) => set.insert((a, b)),
        }
    }
}

enum ConcurrentBacking {
    Dense { n: usize, seen: Vec<AtomicBool> },
    Sparse(Mutex<HashSet<(usize, usize)>>),
}

/// Thread-safe dedup structure for the `rayon`-parallel candidate-enumeration path. Each
/// pair key is won by exactly one writer via atomic check-and-set.
pub struct ConcurrentPairDedup {
    backing: ConcurrentBacking,
}

impl ConcurrentPairDedup {
    pub fn new(n: usize) -> Self {
        let backing = if n <= DENSE_THRESHOLD {
            let mut seen = Vec::with_capacity(n * n);
            seen.resize_with(n * n, || AtomicBool::new(false));
            ConcurrentBacking::Dense { n, seen }
        } else {
            ConcurrentBacking::Sparse(Mutex::new(HashSet::new()))
        };
        Self { backing }
    }

    /// See [`PairDedup::check_and_set`]: `a`/`b` are ordered by segment geometry, not by
    /// numeric index, so `a > b` is routine.
    pub fn check_and_set(&self, a: usize, b: usize) -> bool {
        debug_assert!(a != b);
        match &self.backing {
            ConcurrentBacking::Dense { n, seen } => {
                let idx = a * *n + b;
                !seen[idx].swap(true, Ordering::AcqRel)
            }
            ConcurrentBacking::Sparse(set) => set.lock().unwrap().insert((a, b)),
        }
    }
}
