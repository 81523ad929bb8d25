//! Load-generation tokens for "last navigation wins" cancellation.
//!
//! Issuing a new token bumps the shared generation, which makes every token
//! issued before it stale. Tokens are cheap to clone and can be checked from
//! any thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct LoadGeneration {
    current: Arc<AtomicU64>,
}

impl LoadGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate the previous token and return a fresh live one.
    pub fn issue(&self) -> LoadToken {
        let generation = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        LoadToken {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Invalidate the live token without issuing a new one.
    pub fn cancel_all(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }
}

#[derive(Clone, Debug)]
pub struct LoadToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LoadToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_live(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }
}

impl PartialEq for LoadToken {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && Arc::ptr_eq(&self.current, &other.current)
    }
}

impl Eq for LoadToken {}
