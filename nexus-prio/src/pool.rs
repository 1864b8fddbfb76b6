//! Fixed-capacity node storage.
//!
//! The pool is an arena of `N` inline slots. Slots are handed out by a bump
//! cursor until every slot has been used once, after which released slots
//! are recycled through an intrusive free list threaded through the vacant
//! slots themselves. Both paths are O(1) and never touch the allocator.
//!
//! ```text
//! slots:  [Occ][Vac]->[Vac]->NONE [Occ][ .. never used .. ]
//!                ^free_head             ^bump_cursor
//! ```
//!
//! A pool is usually owned by a [`PriorityQueue`](crate::PriorityQueue),
//! but it can be used directly together with an
//! [`OrderedChain`](crate::OrderedChain).
//!
//! # Example
//!
//! ```
//! use nexus_prio::{Node, NodePool};
//!
//! let mut pool: NodePool<u8, 4> = NodePool::new();
//!
//! let idx = pool.acquire(Node::new(42, 1, 0)).unwrap();
//! assert_eq!(pool.get(idx).map(|n| n.payload()), Some(42));
//! assert_eq!(pool.free_slots(), 3);
//!
//! let node = pool.release(idx).unwrap();
//! assert_eq!(node.payload(), 42);
//! assert_eq!(pool.free_slots(), 4);
//! ```

use crate::{Full, Index};

/// A queued item: payload, priority, creation id and successor link.
///
/// The link is only meaningful while the node sits in an
/// [`OrderedChain`](crate::OrderedChain).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node<Idx: Index> {
    pub(crate) payload: i32,
    pub(crate) priority: i32,
    pub(crate) id: u64,
    pub(crate) next: Idx,
}

impl<Idx: Index> Node<Idx> {
    /// Creates an unlinked node.
    #[inline]
    pub const fn new(payload: i32, priority: i32, id: u64) -> Self {
        Self {
            payload,
            priority,
            id,
            next: Idx::NONE,
        }
    }

    /// Returns the payload.
    #[inline]
    pub const fn payload(&self) -> i32 {
        self.payload
    }

    /// Returns the priority. Higher is more urgent.
    #[inline]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the creation sequence number.
    #[inline]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the successor's slot, or `Idx::NONE` if this node is last.
    #[inline]
    pub const fn next(&self) -> Idx {
        self.next
    }
}

/// A slot in the pool - either vacant or occupied.
#[derive(Debug, Clone, Copy)]
enum Slot<Idx: Index> {
    /// Free. `next_free` links the recycled-slot stack.
    Vacant { next_free: Idx },
    /// Holds a live node.
    Occupied(Node<Idx>),
}

/// Fixed-capacity arena of queue nodes.
///
/// # Type Parameters
///
/// - `Idx`: slot index type; `N` must fit below its sentinel
/// - `N`: number of slots, fixed at compile time
///
/// Capacities that do not fit the index type fail to compile:
///
/// ```compile_fail
/// use nexus_prio::NodePool;
/// let pool: NodePool<u8, 300> = NodePool::new(); // ERROR: 300 slots don't fit u8
/// ```
#[derive(Debug, Clone)]
pub struct NodePool<Idx: Index, const N: usize> {
    slots: [Slot<Idx>; N],
    /// High-water mark. Slots at or past it have never been handed out.
    bump_cursor: usize,
    /// Top of the recycled-slot stack, or `Idx::NONE`.
    free_head: Idx,
    /// Number of occupied slots.
    occupied: usize,
}

impl<Idx: Index, const N: usize> Default for NodePool<Idx, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Idx: Index, const N: usize> NodePool<Idx, N> {
    /// Compile-time check that every slot is addressable.
    const _ASSERT_CAPACITY: () = assert!(
        N > 0 && N <= Idx::MAX_SLOTS,
        "N must be non-zero and fit the index type"
    );

    /// Creates a pool with every slot vacant.
    ///
    /// `const` so a pool (or a queue embedding one) can live in a `static`.
    pub const fn new() -> Self {
        // Force the compile-time assertion to be evaluated
        let () = Self::_ASSERT_CAPACITY;

        Self {
            slots: [Slot::Vacant {
                next_free: Idx::NONE,
            }; N],
            bump_cursor: 0,
            free_head: Idx::NONE,
            occupied: 0,
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.occupied
    }

    /// Returns `true` if no slot is occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.occupied == N
    }

    /// Returns the number of vacant slots.
    #[inline]
    pub const fn free_slots(&self) -> usize {
        N - self.occupied
    }

    /// Stores `node` in a vacant slot and returns the slot's index.
    ///
    /// Recycled slots are reused first (LIFO); otherwise the bump cursor
    /// advances. Returns `Err(Full(node))` if no slot is vacant.
    pub fn acquire(&mut self, node: Node<Idx>) -> Result<Idx, Full<Node<Idx>>> {
        let idx = if self.free_head.is_some() {
            let idx = self.free_head;
            match self.slots[idx.as_usize()] {
                Slot::Vacant { next_free } => self.free_head = next_free,
                Slot::Occupied(_) => unreachable!("occupied slot on free list"),
            }
            idx
        } else if self.bump_cursor < N {
            let idx = Idx::from_usize(self.bump_cursor);
            self.bump_cursor += 1;
            idx
        } else {
            return Err(Full(node));
        };

        self.slots[idx.as_usize()] = Slot::Occupied(Node {
            next: Idx::NONE,
            ..node
        });
        self.occupied += 1;
        Ok(idx)
    }

    /// Vacates the slot at `idx` and returns the node it held.
    ///
    /// The slot is pushed onto the free list. Returns `None` if `idx` is out
    /// of range or already vacant.
    pub fn release(&mut self, idx: Idx) -> Option<Node<Idx>> {
        let slot = self.slots.get_mut(idx.as_usize())?;
        let node = match *slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => return None,
        };

        *slot = Slot::Vacant {
            next_free: self.free_head,
        };
        self.free_head = idx;
        self.occupied -= 1;
        Some(node)
    }

    /// Returns the node at `idx`, if occupied.
    #[inline]
    pub fn get(&self, idx: Idx) -> Option<&Node<Idx>> {
        match self.slots.get(idx.as_usize())? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    /// Returns the node at `idx` mutably, if occupied.
    #[inline]
    pub fn get_mut(&mut self, idx: Idx) -> Option<&mut Node<Idx>> {
        match self.slots.get_mut(idx.as_usize())? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    /// Returns `true` if the slot at `idx` holds a node.
    #[inline]
    pub fn is_occupied(&self, idx: Idx) -> bool {
        self.get(idx).is_some()
    }
}
