//! LRU (Least Recently Used) cache implementation
//!
//! Entries live in a slot arena threaded by a doubly-linked recency list,
//! so promotion and eviction are O(1).

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

use crate::error::{Error, Result};
use crate::memo::Memoize;

/// Upper bound on slots reserved up front; larger caches grow on demand
const MAX_PREALLOC: usize = 4096;

/// Node in the LRU doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Bounded cache evicting the least recently used entry on overflow.
///
/// Both `get` and `put` hits move the key to the most-recently-used end.
/// The head of the list is the MRU entry, the tail is the eviction victim.
pub struct LruCache<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        // One extra slot: `push` inserts before it evicts
        let reserve = capacity.saturating_add(1).min(MAX_PREALLOC);

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            nodes: Vec::with_capacity(reserve),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        })
    }

    /// Get a value from the cache, promoting it to most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Get a value without touching recency
    pub fn peek(&self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Check for a key without touching recency
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert or overwrite a key-value pair, evicting the LRU entry on overflow
    pub fn put(&mut self, key: K, value: V) {
        self.push(key, value);
    }

    /// Same as [`put`](Self::put), but hands back the evicted entry, if any
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = &mut self.nodes[idx] {
                node.value = value;
            }
            self.move_to_front(idx);
            return None;
        }

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.map.insert(key, idx);

        if self.map.len() > self.capacity {
            self.evict()
        } else {
            None
        }
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        self.free_node(idx);
        self.nodes[idx].take().map(|node| node.value)
    }

    /// Keys ordered from most to least recently used
    pub fn keys_by_recency(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.map.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            match &self.nodes[idx] {
                Some(node) => {
                    keys.push(&node.key);
                    cursor = node.next;
                }
                None => break,
            }
        }
        keys
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.nodes[idx] {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let tail_idx = self.tail?;
        // Unlink while the slot is still occupied, unlink reads its neighbours.
        self.unlink(tail_idx);
        let node = self.nodes[tail_idx].take()?;
        self.map.remove(&node.key);
        self.free_node(tail_idx);
        Some((node.key, node.value))
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}

impl<K, V> Memoize<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn lookup(&mut self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn store(&mut self, key: K, value: V) {
        self.put(key, value);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_basic() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_zero_capacity_rejected() {
        let result: Result<LruCache<u32, u32>> = LruCache::new(0);
        assert!(matches!(result, Err(Error::InvalidCapacity(0))));
    }

    #[test]
    fn test_lru_huge_capacity() {
        let mut cache: LruCache<u32, u32> = LruCache::new(usize::MAX).unwrap();

        assert_eq!(cache.capacity(), usize::MAX);
        assert!(cache.nodes.capacity() <= MAX_PREALLOC);

        for i in 0..10_000 {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), 10_000);
        assert_eq!(cache.get(&0), Some(&0));
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put(('a',), 1);
        cache.put(('b',), 2);
        cache.put(('c',), 3); // Should evict ('a',)

        assert_eq!(cache.get(&('a',)), None);
        assert_eq!(cache.get(&('b',)), Some(&2));
        assert_eq!(cache.get(&('c',)), Some(&3));
    }

    #[test]
    fn test_lru_get_promotes() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.get(&"a"); // a is now MRU, b is LRU
        cache.put("m", 4);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert!(cache.contains(&"m"));
    }

    #[test]
    fn test_lru_put_promotes_existing() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(1, "z"); // 2 becomes LRU
        cache.put(3, "c");

        assert_eq!(cache.get(&1), Some(&"z"));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_push_returns_victim() {
        let mut cache = LruCache::new(1).unwrap();

        assert_eq!(cache.push(1, 10), None);
        assert_eq!(cache.push(1, 11), None);
        assert_eq!(cache.push(2, 20), Some((1, 11)));
        assert_eq!(cache.keys_by_recency(), vec![&2]);
    }

    #[test]
    fn test_lru_capacity_never_exceeded() {
        let mut cache = LruCache::new(7).unwrap();

        for i in 0..1_000u32 {
            cache.put(i, i * 2);
            assert!(cache.len() <= cache.capacity());
        }
        assert_eq!(cache.len(), 7);

        // Survivors are the seven most recent puts
        for i in 993..1_000u32 {
            assert_eq!(cache.peek(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn test_lru_peek_does_not_promote() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.peek(&1), Some(&"a"));
        cache.put(3, "c");

        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_lru_recency_order() {
        let mut cache = LruCache::new(4).unwrap();

        cache.put(1, ());
        cache.put(2, ());
        cache.put(3, ());
        cache.get(&1);
        cache.put(2, ());

        assert_eq!(cache.keys_by_recency(), vec![&2, &1, &3]);
    }

    #[test]
    fn test_lru_round_trip_mixed_contents() {
        let mut cache = LruCache::new(16).unwrap();

        for i in 0..10i64 {
            cache.put((i, i + 1), -i);
        }
        cache.put((42, 43), 0);

        assert_eq!(cache.get(&(42, 43)), Some(&0));
        assert_eq!(cache.get(&(3, 4)), Some(&-3));
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");

        assert_eq!(cache.remove(&2), Some("b"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.keys_by_recency(), vec![&3, &1]);
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put(1, "a");
        cache.put(2, "b");
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);

        cache.put(3, "c");
        assert_eq!(cache.get(&3), Some(&"c"));
    }

    #[test]
    fn test_lru_slot_reuse_after_eviction() {
        let mut cache = LruCache::new(2).unwrap();

        for i in 0..100 {
            cache.put(i, i);
        }
        assert!(cache.nodes.len() <= 3);
        assert_eq!(cache.keys_by_recency(), vec![&99, &98]);
    }
}
