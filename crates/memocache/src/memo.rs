//! Backend-agnostic memoization contract

/// A cache a computation can memoize through.
///
/// `lookup` may reorganize the backend (LRU promotion, splaying) but never
/// changes stored values. A miss is `None`, never a sentinel value.
pub trait Memoize<K, V> {
    /// Fetch a previously stored value
    fn lookup(&mut self, key: &K) -> Option<&V>;

    /// Store a value, possibly displacing another entry
    fn store(&mut self, key: K, value: V);

    /// Number of stored entries
    fn len(&self) -> usize;

    /// Check if nothing is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
