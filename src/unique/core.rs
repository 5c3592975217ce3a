use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Default cap on distinct tokens.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// The distinct-token table is full and a genuinely new token arrived.
/// Any count taken after this point would be a lower bound, so the run
/// reports the condition instead of truncating silently.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unique word table full ({capacity} distinct words); count would be a lower bound")]
pub struct TableOverflow {
    pub capacity: usize,
}

/// Shared table of distinct tokens and their occurrence counts, mutated
/// concurrently by all workers in unique-word mode.
///
/// The whole check-then-act sequence in [`record`](Self::record) runs
/// under one lock acquisition. Guarding only the increment would let two
/// workers both miss the membership probe and insert the same token
/// twice, breaking the one-entry-per-distinct-token invariant.
pub struct UniqueWordTable {
    entries: Mutex<HashMap<Box<[u8]>, u64>>,
    capacity: usize,
}

impl Default for UniqueWordTable {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl UniqueWordTable {
    /// A table holding at most `capacity` distinct tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        UniqueWordTable {
            entries: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    /// Record one occurrence of `token`: increment its count if present,
    /// insert it with count 1 otherwise. Membership probe and mutation
    /// form a single critical section.
    ///
    /// Fails with [`TableOverflow`] only when `token` is new and the table
    /// already holds `capacity` distinct tokens; occurrences of existing
    /// tokens always succeed.
    pub fn record(&self, token: &[u8]) -> Result<(), TableOverflow> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(count) = entries.get_mut(token) {
            *count += 1;
            return Ok(());
        }
        if entries.len() >= self.capacity {
            return Err(TableOverflow {
                capacity: self.capacity,
            });
        }
        entries.insert(token.to_vec().into_boxed_slice(), 1);
        Ok(())
    }

    /// Number of distinct tokens recorded so far. After all workers have
    /// joined, this is the unique-word-count result.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Occurrence count for `token`, if recorded.
    pub fn occurrences(&self, token: &[u8]) -> Option<u64> {
        self.entries.lock().unwrap().get(token).copied()
    }
}
