//! Priority-ordered singly-linked chain over a [`NodePool`].
//!
//! The chain only stores the head slot and its length. Nodes and their
//! successor links live in the pool. Order is descending priority, and
//! nodes of equal priority stay in insertion (id) order:
//!
//! ```text
//! head -> [p=8 id=1] -> [p=8 id=2] -> [p=5 id=0] -> NONE
//! ```
//!
//! # Storage Invariant
//!
//! A chain must always be used with the same pool. Passing a different
//! pool corrupts both.
//!
//! # Example
//!
//! ```
//! use nexus_prio::{Node, NodePool, OrderedChain};
//!
//! let mut pool: NodePool<u8, 10> = NodePool::new();
//! let mut chain: OrderedChain<u8> = OrderedChain::new();
//!
//! chain.insert(&mut pool, Node::new(10, 5, 0)).unwrap();
//! chain.insert(&mut pool, Node::new(20, 8, 1)).unwrap();
//! chain.insert(&mut pool, Node::new(30, 8, 2)).unwrap();
//!
//! assert_eq!(chain.pop_front(&mut pool).map(|e| e.payload), Some(20));
//! assert_eq!(chain.pop_front(&mut pool).map(|e| e.payload), Some(30));
//! assert_eq!(chain.pop_front(&mut pool).map(|e| e.payload), Some(10));
//! assert!(chain.is_empty());
//! ```

use crate::{Full, Index, Node, NodePool};

/// A copy of a queued node's data, detached from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
    /// Item payload.
    pub payload: i32,
    /// Item priority; higher is more urgent.
    pub priority: i32,
    /// Creation sequence number.
    pub id: u64,
}

impl<Idx: Index> From<&Node<Idx>> for Entry {
    #[inline]
    fn from(node: &Node<Idx>) -> Self {
        Self {
            payload: node.payload,
            priority: node.priority,
            id: node.id,
        }
    }
}

impl<Idx: Index> From<Node<Idx>> for Entry {
    #[inline]
    fn from(node: Node<Idx>) -> Self {
        Entry::from(&node)
    }
}

/// Singly-linked chain ordered by descending priority, FIFO among ties.
#[derive(Debug, Clone)]
pub struct OrderedChain<Idx: Index> {
    head: Idx,
    len: usize,
}

impl<Idx: Index> Default for OrderedChain<Idx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Idx: Index> OrderedChain<Idx> {
    /// Creates an empty chain.
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: Idx::NONE,
            len: 0,
        }
    }

    /// Returns the number of nodes in the chain.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the chain has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the head slot, or `Idx::NONE` if empty.
    #[inline]
    pub const fn head(&self) -> Idx {
        self.head
    }

    /// Stores `node` in the pool and links it at its ordered position.
    ///
    /// The node goes after every queued node with a higher or equal
    /// priority, so equal priorities pop in insertion order. Returns the
    /// node's slot, or `Err(Full(node))` if the pool has no vacant slot.
    pub fn insert<const N: usize>(
        &mut self,
        pool: &mut NodePool<Idx, N>,
        node: Node<Idx>,
    ) -> Result<Idx, Full<Node<Idx>>> {
        let priority = node.priority;
        let key = pool.acquire(node)?;

        if self.head.is_none() {
            self.head = key;
        } else if Self::node(pool, self.head).priority < priority {
            Self::node_mut(pool, key).next = self.head;
            self.head = key;
        } else {
            // Skip strictly higher priorities, then the run of equal ones
            let mut at = self.head;
            loop {
                let next = Self::node(pool, at).next;
                if next.is_none() || Self::node(pool, next).priority < priority {
                    break;
                }
                at = next;
            }

            let next = Self::node(pool, at).next;
            Self::node_mut(pool, key).next = next;
            Self::node_mut(pool, at).next = key;
        }

        self.len += 1;
        Ok(key)
    }

    /// Returns the head node without removing it.
    #[inline]
    pub fn front<'a, const N: usize>(&self, pool: &'a NodePool<Idx, N>) -> Option<&'a Node<Idx>> {
        if self.head.is_none() {
            return None;
        }
        pool.get(self.head)
    }

    /// Unlinks the head node, vacates its slot and returns its data.
    ///
    /// Returns `None` if the chain is empty.
    pub fn pop_front<const N: usize>(&mut self, pool: &mut NodePool<Idx, N>) -> Option<Entry> {
        if self.head.is_none() {
            return None;
        }

        let key = self.head;
        let node = pool.release(key).expect("chain head not in pool");
        self.head = node.next;
        self.len -= 1;
        Some(Entry::from(node))
    }

    /// Releases every node in the chain back to the pool.
    ///
    /// Returns the number of nodes released.
    pub fn clear<const N: usize>(&mut self, pool: &mut NodePool<Idx, N>) -> usize {
        let mut released = 0;
        let mut at = self.head;
        while at.is_some() {
            let node = pool.release(at).expect("chain node not in pool");
            at = node.next;
            released += 1;
        }

        self.head = Idx::NONE;
        self.len = 0;
        released
    }

    /// Returns an iterator over the nodes in pop order.
    pub fn iter<'a, const N: usize>(&self, pool: &'a NodePool<Idx, N>) -> Iter<'a, Idx, N> {
        Iter {
            pool,
            at: self.head,
            remaining: self.len,
        }
    }

    #[inline]
    fn node<const N: usize>(pool: &NodePool<Idx, N>, key: Idx) -> &Node<Idx> {
        pool.get(key).expect("chain link to vacant slot")
    }

    #[inline]
    fn node_mut<const N: usize>(pool: &mut NodePool<Idx, N>, key: Idx) -> &mut Node<Idx> {
        pool.get_mut(key).expect("chain link to vacant slot")
    }
}

/// Iterator over a chain's nodes, highest priority first.
pub struct Iter<'a, Idx: Index, const N: usize> {
    pool: &'a NodePool<Idx, N>,
    at: Idx,
    remaining: usize,
}

impl<'a, Idx: Index, const N: usize> Iterator for Iter<'a, Idx, N> {
    type Item = &'a Node<Idx>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at.is_none() {
            return None;
        }
        let node = self.pool.get(self.at)?;
        self.at = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<Idx: Index, const N: usize> ExactSizeIterator for Iter<'_, Idx, N> {}
