//! Bookkeeping for uniqueness-enforcing mutators.

use std::collections::HashSet;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::trace;

/// Set of values already handed out by one mutator.
///
/// Each uniqueness mutator owns its own set, so two mutators of the same
/// kind never interfere with each other and nothing outlives the test that
/// created them.
#[derive(Debug)]
pub struct SeenSet<K> {
    values: Mutex<HashSet<K>>,
}

impl<K: Eq + Hash + Clone> SeenSet<K> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashSet::new()),
        }
    }

    /// Records `value`, returning false if it was already present.
    pub fn insert(&self, value: K) -> bool {
        self.values.lock().insert(value)
    }

    /// Returns true if `value` has been recorded.
    pub fn contains(&self, value: &K) -> bool {
        self.values.lock().contains(value)
    }

    /// Returns the number of recorded values.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    /// Records and returns the first of `candidate`, `redraw()`, `redraw()`, ...
    /// that has not been seen before.
    ///
    /// Loops until a fresh value turns up; `redraw` must be able to reach one.
    pub fn claim(&self, candidate: K, mut redraw: impl FnMut() -> K) -> K {
        let mut value = candidate;
        let mut attempts = 0u32;
        loop {
            if self.insert(value.clone()) {
                if attempts > 0 {
                    trace!(attempts, "resolved unique value collision");
                }
                return value;
            }
            attempts += 1;
            value = redraw();
        }
    }
}

impl<K: Eq + Hash + Clone> Default for SeenSet<K> {
    fn default() -> Self {
        Self::new()
    }
}
