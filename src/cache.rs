//! Fixed-capacity position memo
//!
//! Several providers answer repeated queries for the handful of instants an
//! event search is currently straddling. [`RingCache`] keeps the last `N`
//! results in insertion order, overwriting the oldest on overflow. Lookup is
//! a linear scan; `N` is small by construction.

/// A tiny ring-buffer cache keyed by exact match.
#[derive(Debug, Clone)]
pub struct RingCache<K, V, const N: usize> {
    entries: [Option<(K, V)>; N],
    next: usize,
}

impl<K: PartialEq + Copy, V: Clone, const N: usize> RingCache<K, V, N> {
    pub fn new() -> Self {
        RingCache {
            entries: [const { None }; N],
            next: 0,
        }
    }

    /// Look up a value by exact key match.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries
            .iter()
            .flatten()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Insert a value, evicting the oldest entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries[self.next] = Some((key, value));
        self.next = (self.next + 1) % N;
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries = [const { None }; N];
        self.next = 0;
    }
}

impl<K: PartialEq + Copy, V: Clone, const N: usize> Default for RingCache<K, V, N> {
    fn default() -> Self {
        Self::new()
    }
}
