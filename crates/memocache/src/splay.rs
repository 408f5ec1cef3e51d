//! Splay-tree cache
//!
//! A self-adjusting binary search tree. Every successful access rotates the
//! touched node to the root with bottom-up zig / zig-zig / zig-zag steps, so
//! hot keys stay near the top. Nodes sit in an arena and link to each other by
//! slot index; a rotation only rewires indices, keys and values never move.
//!
//! A failed `find` does not splay: the tree is left exactly as it was.

use std::cmp::Ordering;

use crate::memo::Memoize;

/// Node in the splay tree arena
struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Unbounded cache ordered by key, reorganized on every hit
pub struct SplayCache<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<usize>,
}

impl<K: Ord, V> Default for SplayCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> SplayCache<K, V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Look up `key`, splaying it to the root on a hit
    pub fn find(&mut self, key: &K) -> Option<&V> {
        let idx = self.search(key)?;
        self.splay(idx);
        Some(&self.nodes[idx].value)
    }

    /// Insert or overwrite `key`, then splay it to the root
    pub fn insert(&mut self, key: K, value: V) {
        let Some(mut cur) = self.root else {
            self.root = Some(self.alloc(key, value, None));
            return;
        };

        let idx = loop {
            match key.cmp(&self.nodes[cur].key) {
                Ordering::Less => match self.nodes[cur].left {
                    Some(left) => cur = left,
                    None => {
                        let idx = self.alloc(key, value, Some(cur));
                        self.nodes[cur].left = Some(idx);
                        break idx;
                    }
                },
                Ordering::Greater => match self.nodes[cur].right {
                    Some(right) => cur = right,
                    None => {
                        let idx = self.alloc(key, value, Some(cur));
                        self.nodes[cur].right = Some(idx);
                        break idx;
                    }
                },
                Ordering::Equal => {
                    self.nodes[cur].value = value;
                    break cur;
                }
            }
        };

        self.splay(idx);
    }

    /// Check for a key without reorganizing the tree
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Key currently at the root
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|idx| &self.nodes[idx].key)
    }

    /// Keys in ascending order (in-order traversal)
    pub fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cursor = self.root;

        while cursor.is_some() || !stack.is_empty() {
            while let Some(idx) = cursor {
                stack.push(idx);
                cursor = self.nodes[idx].left;
            }
            if let Some(idx) = stack.pop() {
                keys.push(&self.nodes[idx].key);
                cursor = self.nodes[idx].right;
            }
        }
        keys
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|idx| (idx, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn search(&self, key: &K) -> Option<usize> {
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            cursor = match key.cmp(&self.nodes[idx].key) {
                Ordering::Less => self.nodes[idx].left,
                Ordering::Greater => self.nodes[idx].right,
                Ordering::Equal => return Some(idx),
            };
        }
        None
    }

    fn alloc(&mut self, key: K, value: V, parent: Option<usize>) -> usize {
        self.nodes.push(Node {
            key,
            value,
            parent,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }

    fn splay(&mut self, x: usize) {
        while let Some(p) = self.nodes[x].parent {
            match self.nodes[p].parent {
                // zig
                None => self.rotate(x),
                Some(g) => {
                    let x_is_left = self.nodes[p].left == Some(x);
                    let p_is_left = self.nodes[g].left == Some(p);
                    if x_is_left == p_is_left {
                        // zig-zig
                        self.rotate(p);
                        self.rotate(x);
                    } else {
                        // zig-zag
                        self.rotate(x);
                        self.rotate(x);
                    }
                }
            }
        }
    }

    /// Single rotation of `x` over its parent
    fn rotate(&mut self, x: usize) {
        let Some(p) = self.nodes[x].parent else {
            return;
        };
        let g = self.nodes[p].parent;

        if self.nodes[p].left == Some(x) {
            let inner = self.nodes[x].right;
            self.nodes[p].left = inner;
            if let Some(inner) = inner {
                self.nodes[inner].parent = Some(p);
            }
            self.nodes[x].right = Some(p);
        } else {
            let inner = self.nodes[x].left;
            self.nodes[p].right = inner;
            if let Some(inner) = inner {
                self.nodes[inner].parent = Some(p);
            }
            self.nodes[x].left = Some(p);
        }

        self.nodes[p].parent = Some(x);
        self.nodes[x].parent = g;

        match g {
            Some(g) => {
                if self.nodes[g].left == Some(p) {
                    self.nodes[g].left = Some(x);
                } else {
                    self.nodes[g].right = Some(x);
                }
            }
            None => self.root = Some(x),
        }
    }
}

impl<K: Ord, V> Memoize<K, V> for SplayCache<K, V> {
    fn lookup(&mut self, key: &K) -> Option<&V> {
        self.find(key)
    }

    fn store(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
