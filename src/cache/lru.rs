//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

// == Node Handle ==
/// Stable handle to a tracked key, valid until the key is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in a slab-backed doubly linked list where:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Touch, remove and evict are O(1) given the key's `NodeId`.
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Node slots, `None` when vacant
    nodes: Vec<Option<Node<K>>>,
    /// Vacant slot indices available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push ==
    /// Tracks a new key as the most recently used.
    pub fn push_front(&mut self, key: K) -> NodeId {
        let node = Node {
            key,
            prev: None,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.node_mut(old_head).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Touch ==
    /// Marks a tracked key as recently used (moves to head).
    pub fn touch(&mut self, id: NodeId) {
        if self.head == Some(id.0) || self.get(id.0).is_none() {
            return;
        }
        self.unlink(id.0);
        let old_head = self.head;
        {
            let node = self.node_mut(id.0);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(id.0),
            None => self.tail = Some(id.0),
        }
        self.head = Some(id.0);
    }

    // == Remove ==
    /// Stops tracking a key and returns it.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        self.get(id.0)?;
        self.unlink(id.0);
        let node = self.nodes[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let tail = self.tail?;
        self.remove(NodeId(tail))
    }

    /// Handle of the least recently used key.
    pub fn oldest_id(&self) -> Option<NodeId> {
        self.tail.map(NodeId)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates keys from least to most recently used.
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = &K> + '_ {
        let mut cursor = self.tail;
        std::iter::from_fn(move || {
            let node = self.get(cursor?)?;
            cursor = node.prev;
            Some(&node.key)
        })
    }

    fn get(&self, idx: usize) -> Option<&Node<K>> {
        self.nodes.get(idx).and_then(|slot| slot.as_ref())
    }

    // Callers guarantee `idx` is occupied.
    fn node_mut(&mut self, idx: usize) -> &mut Node<K> {
        match self.nodes[idx].as_mut() {
            Some(node) => node,
            None => unreachable!("linked index {} points at a vacant slot", idx),
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node_mut(idx);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
