//! Recursion-aware memoization.
//!
//! [`Memo`] wraps a body `(recur, key) -> value`. The body receives a handle
//! to the memoized function itself, so recursive calls share the cache:
//!
//! ```
//! use fpipe_core::memo;
//!
//! let fib = memo(|recur: &dyn Fn(u64) -> u64, n: u64| {
//!     if n < 2 { n } else { recur(n - 1) + recur(n - 2) }
//! });
//! assert_eq!(fib.get(90), 2_880_067_194_370_816_120);
//! ```
//!
//! Keys are compared by value (`Eq + Hash`); compound keys are ordinary
//! tuples. Entries are never evicted. The cache lives in a `RefCell`, so a
//! `Memo` is confined to one thread at a time.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::trace;

/// Memoized wrapper around a recursive body.
pub struct Memo<K, V, F> {
    cache: RefCell<HashMap<K, V>>,
    body: F,
}

impl<K, V, F> Memo<K, V, F>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
    F: Fn(&dyn Fn(K) -> V, K) -> V,
{
    /// Wrap `body`; nothing is computed until the first [`get`](Self::get).
    pub fn new(body: F) -> Self {
        Self {
            cache: RefCell::new(HashMap::new()),
            body,
        }
    }

    /// Value for `key`, computing it (and any keys it recurses into) on a miss.
    ///
    /// The body runs at most once per key unless it recursively requests the
    /// key it is currently computing.
    pub fn get(&self, key: K) -> V {
        let hit = self.cache.borrow().get(&key).cloned();
        if let Some(v) = hit {
            return v;
        }
        trace!(key = ?key, "memo miss");
        let v = (self.body)(&|k| self.get(k), key.clone());
        self.cache.borrow_mut().entry(key).or_insert(v).clone()
    }

    /// Whether `key` has already been computed.
    pub fn contains(&self, key: &K) -> bool {
        self.cache.borrow().contains_key(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// `true` before the first successful computation.
    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

impl<K, V, F> fmt::Debug for Memo<K, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.cache.try_borrow().map(|c| c.len()).ok();
        f.debug_struct("Memo").field("entries", &entries).finish_non_exhaustive()
    }
}

/// Free-function spelling of [`Memo::new`].
pub fn memo<K, V, F>(body: F) -> Memo<K, V, F>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
    F: Fn(&dyn Fn(K) -> V, K) -> V,
{
    Memo::new(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn body_runs_once_per_key() {
        let calls = Cell::new(0u32);
        let fib = memo(|recur: &dyn Fn(u32) -> u64, n: u32| {
            calls.set(calls.get() + 1);
            if n < 2 {
                u64::from(n)
            } else {
                recur(n - 1) + recur(n - 2)
            }
        });
        assert_eq!(fib.get(30), 832_040);
        assert_eq!(calls.get(), 31);
        assert_eq!(fib.len(), 31);
        assert_eq!(fib.get(25), 75_025);
        assert_eq!(calls.get(), 31);
    }

    #[test]
    fn compound_keys_compare_by_value() {
        let m = memo(|_: &dyn Fn((usize, String)) -> usize, (n, s): (usize, String)| n + s.len());
        assert!(m.is_empty());
        assert_eq!(m.get((2, "abc".to_owned())), 5);
        assert!(m.contains(&(2, "abc".to_owned())));
        assert!(!m.contains(&(2, "ab".to_owned())));
    }
}
