//! Lock-guarded priority queue with an explicit lifecycle.
//!
//! [`PriorityQueue`] bundles a [`NodePool`], an [`OrderedChain`], the
//! lifecycle [`Phase`] and the id counter behind one `parking_lot` mutex.
//! Every operation, reads included, runs inside a single scoped lock
//! acquisition, and the guard releases the lock on every exit path.
//!
//! # Example
//!
//! ```
//! use nexus_prio::{Error, PriorityQueue};
//!
//! static QUEUE: PriorityQueue = PriorityQueue::new();
//!
//! QUEUE.create().unwrap();
//!
//! QUEUE.push(10, 5).unwrap();
//! QUEUE.push(20, 8).unwrap();
//! QUEUE.push(30, 8).unwrap();
//!
//! assert_eq!(QUEUE.pop(), Ok(20));
//! assert_eq!(QUEUE.pop(), Ok(30));
//! assert_eq!(QUEUE.pop(), Ok(10));
//! assert_eq!(QUEUE.pop(), Err(Error::EmptyQueue));
//!
//! QUEUE.destroy().unwrap();
//! assert_eq!(QUEUE.push(1, 1), Err(Error::InvalidState));
//! ```
//!
//! # Blocking
//!
//! The plain operations wait for the lock without bound. The `_timeout`
//! variants give up after the given duration with [`Error::LockFailure`].
//! There is no priority inheritance.
//!
//! The lock is not reentrant. Calling back into the same queue while one of
//! its operations is running on the same thread deadlocks.

use core::fmt;
use std::time::Duration;

use crossbeam_utils::CachePadded;
use parking_lot::{Mutex, MutexGuard, const_mutex};

use crate::{
    DEFAULT_CAPACITY, Entry, Error, Full, LockRegistry, Node, NodePool, OrderedChain, Phase,
};

/// Lock name used by [`PriorityQueue::new`].
pub const DEFAULT_LOCK_NAME: &str = "nexus-prio";

/// Slot index type used by [`PriorityQueue`].
type SlotIdx = u16;

/// Everything the lock protects.
#[derive(Debug)]
struct State<const N: usize> {
    phase: Phase,
    pool: NodePool<SlotIdx, N>,
    chain: OrderedChain<SlotIdx>,
    /// Id for the next created node. Survives destroy/create.
    next_id: u64,
}

impl<const N: usize> State<N> {
    const fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            pool: NodePool::new(),
            chain: OrderedChain::new(),
            next_id: 0,
        }
    }

    fn push(&mut self, payload: i32, priority: i32) -> Result<u64, Error> {
        self.phase.ensure_ready()?;

        let id = self.next_id;
        match self
            .chain
            .insert(&mut self.pool, Node::new(payload, priority, id))
        {
            Ok(_) => {
                self.next_id += 1;
                Ok(id)
            }
            Err(Full(_)) => Err(Error::CapacityExceeded),
        }
    }

    fn pop(&mut self) -> Result<Entry, Error> {
        self.phase.ensure_ready()?;
        self.chain
            .pop_front(&mut self.pool)
            .ok_or(Error::EmptyQueue)
    }

    fn peek(&self) -> Result<Entry, Error> {
        self.phase.ensure_ready()?;
        self.chain
            .front(&self.pool)
            .map(Entry::from)
            .ok_or(Error::EmptyQueue)
    }

    fn destroy(&mut self) -> Result<usize, Error> {
        self.phase.ensure_ready()?;
        let drained = self.chain.clear(&mut self.pool);
        self.phase.end()?;
        Ok(drained)
    }
}

/// Fixed-capacity priority queue shared between threads.
///
/// Items are `(payload, priority)` integer pairs. Higher priority pops
/// first; equal priorities pop in push order. All storage is inline, so a
/// queue can be a `static` and never allocates.
///
/// # Type Parameters
///
/// - `N`: capacity, fixed at compile time (default [`DEFAULT_CAPACITY`])
///
/// # Lifecycle
///
/// A new queue is Uninitialized. [`create`](Self::create) makes it Ready,
/// [`destroy`](Self::destroy) drains it and makes it Uninitialized again.
/// push/pop/peek on an Uninitialized queue fail with
/// [`Error::InvalidState`]; creating a Ready queue fails with
/// [`Error::AlreadyInitialized`].
///
/// # Example
///
/// ```
/// use nexus_prio::{Error, PriorityQueue};
///
/// let queue: PriorityQueue<2> = PriorityQueue::new();
/// queue.create().unwrap();
///
/// queue.push(1, 0).unwrap();
/// queue.push(2, 0).unwrap();
/// assert_eq!(queue.push(3, 9), Err(Error::CapacityExceeded));
///
/// assert_eq!(queue.pop(), Ok(1));
/// assert!(queue.push(3, 9).is_ok());
/// assert_eq!(queue.peek(), Ok(3));
/// ```
pub struct PriorityQueue<const N: usize = DEFAULT_CAPACITY> {
    state: CachePadded<Mutex<State<N>>>,
    name: &'static str,
}

impl<const N: usize> Default for PriorityQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PriorityQueue<N> {
    /// Creates an Uninitialized queue named [`DEFAULT_LOCK_NAME`].
    pub const fn new() -> Self {
        Self::named(DEFAULT_LOCK_NAME)
    }

    /// Creates an Uninitialized queue whose lock is registered as `name`.
    ///
    /// ```
    /// use nexus_prio::PriorityQueue;
    ///
    /// static SENSORS: PriorityQueue<32> = PriorityQueue::named("sensor-events");
    /// assert_eq!(SENSORS.name(), "sensor-events");
    /// ```
    pub const fn named(name: &'static str) -> Self {
        Self {
            state: CachePadded::new(const_mutex(State::new())),
            name,
        }
    }

    /// Returns the lock name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the maximum number of queued items.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Makes the queue Ready.
    ///
    /// Returns [`Error::AlreadyInitialized`] if it already is.
    pub fn create(&self) -> Result<(), Error> {
        self.state.lock().phase.begin()?;
        tracing::debug!(lock = self.name, capacity = N, "queue created");
        Ok(())
    }

    /// Makes the queue Ready and registers its lock name with `registry`.
    ///
    /// Registration failure is logged and otherwise ignored.
    ///
    /// ```
    /// use nexus_prio::{PriorityQueue, TracingRegistry};
    ///
    /// let queue: PriorityQueue = PriorityQueue::named("work");
    /// queue.create_registered(&TracingRegistry).unwrap();
    /// assert!(queue.is_ready());
    /// ```
    pub fn create_registered<R: LockRegistry + ?Sized>(&self, registry: &R) -> Result<(), Error> {
        self.create()?;
        if let Err(err) = registry.register(self.name) {
            tracing::warn!(lock = self.name, %err, "lock registration failed");
        }
        Ok(())
    }

    /// Releases every queued item and makes the queue Uninitialized.
    ///
    /// Returns the number of items that were still queued, or
    /// [`Error::InvalidState`] if the queue was not Ready. Node ids keep
    /// increasing after a later [`create`](Self::create).
    pub fn destroy(&self) -> Result<usize, Error> {
        let drained = self.state.lock().destroy()?;
        tracing::debug!(lock = self.name, drained, "queue destroyed");
        Ok(drained)
    }

    /// Returns `true` if the queue is Ready.
    pub fn is_ready(&self) -> bool {
        self.state.lock().phase == Phase::Ready
    }

    // ========================================================================
    // Blocking operations
    // ========================================================================

    /// Queues `payload` at `priority` and returns the node's id.
    ///
    /// Fails with [`Error::CapacityExceeded`] if all `N` slots are taken.
    pub fn push(&self, payload: i32, priority: i32) -> Result<u64, Error> {
        let mut state = self.state.lock();
        self.push_locked(&mut state, payload, priority)
    }

    /// Removes the highest-priority item and returns its payload.
    ///
    /// Among equal priorities the earliest push wins. Fails with
    /// [`Error::EmptyQueue`] and changes nothing if the queue is empty.
    pub fn pop(&self) -> Result<i32, Error> {
        self.pop_entry().map(|entry| entry.payload)
    }

    /// Like [`pop`](Self::pop), but returns the full [`Entry`].
    pub fn pop_entry(&self) -> Result<Entry, Error> {
        let mut state = self.state.lock();
        self.pop_locked(&mut state)
    }

    /// Returns the payload [`pop`](Self::pop) would return, without removing it.
    pub fn peek(&self) -> Result<i32, Error> {
        self.peek_entry().map(|entry| entry.payload)
    }

    /// Like [`peek`](Self::peek), but returns the full [`Entry`].
    pub fn peek_entry(&self) -> Result<Entry, Error> {
        self.state.lock().peek()
    }

    /// Returns `true` if nothing is queued.
    ///
    /// An Uninitialized queue is empty.
    pub fn is_empty(&self) -> bool {
        self.state.lock().chain.is_empty()
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.state.lock().chain.len()
    }

    /// Returns the number of vacant slots.
    pub fn free_slots(&self) -> usize {
        self.state.lock().pool.free_slots()
    }

    /// Copies the queued items into `out` in pop order.
    ///
    /// Writes at most `out.len()` entries and returns how many were written.
    ///
    /// ```
    /// use nexus_prio::{Entry, PriorityQueue};
    ///
    /// let queue: PriorityQueue = PriorityQueue::new();
    /// queue.create().unwrap();
    /// queue.push(1, 1).unwrap();
    /// queue.push(2, 7).unwrap();
    ///
    /// let mut buf = [Entry { payload: 0, priority: 0, id: 0 }; 4];
    /// let n = queue.snapshot(&mut buf).unwrap();
    /// assert_eq!(n, 2);
    /// assert_eq!(buf[0].payload, 2);
    /// assert_eq!(buf[1].payload, 1);
    /// ```
    pub fn snapshot(&self, out: &mut [Entry]) -> Result<usize, Error> {
        let state = self.state.lock();
        state.phase.ensure_ready()?;

        let mut written = 0;
        for (slot, node) in out.iter_mut().zip(state.chain.iter(&state.pool)) {
            *slot = Entry::from(node);
            written += 1;
        }
        Ok(written)
    }

    // ========================================================================
    // Bounded-wait operations
    // ========================================================================

    /// Like [`push`](Self::push), but waits at most `timeout` for the lock.
    pub fn push_timeout(
        &self,
        payload: i32,
        priority: i32,
        timeout: Duration,
    ) -> Result<u64, Error> {
        let mut state = self.lock_for(timeout)?;
        self.push_locked(&mut state, payload, priority)
    }

    /// Like [`pop`](Self::pop), but waits at most `timeout` for the lock.
    pub fn pop_timeout(&self, timeout: Duration) -> Result<i32, Error> {
        let mut state = self.lock_for(timeout)?;
        self.pop_locked(&mut state).map(|entry| entry.payload)
    }

    /// Like [`peek`](Self::peek), but waits at most `timeout` for the lock.
    pub fn peek_timeout(&self, timeout: Duration) -> Result<i32, Error> {
        self.lock_for(timeout)?.peek().map(|entry| entry.payload)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn lock_for(&self, timeout: Duration) -> Result<MutexGuard<'_, State<N>>, Error> {
        self.state.try_lock_for(timeout).ok_or_else(|| {
            tracing::warn!(lock = self.name, ?timeout, "timed out waiting for queue lock");
            Error::LockFailure
        })
    }

    fn push_locked(&self, state: &mut State<N>, payload: i32, priority: i32) -> Result<u64, Error> {
        match state.push(payload, priority) {
            Ok(id) => {
                tracing::info!(lock = self.name, priority, id, "node created");
                Ok(id)
            }
            Err(err) => {
                tracing::debug!(lock = self.name, priority, %err, "push rejected");
                Err(err)
            }
        }
    }

    fn pop_locked(&self, state: &mut State<N>) -> Result<Entry, Error> {
        let entry = state.pop()?;
        tracing::info!(
            lock = self.name,
            priority = entry.priority,
            id = entry.id,
            "node removed"
        );
        Ok(entry)
    }
}

impl<const N: usize> fmt::Debug for PriorityQueue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("PriorityQueue");
        s.field("name", &self.name).field("capacity", &N);
        match self.state.try_lock() {
            Some(state) => s
                .field("phase", &state.phase)
                .field("len", &state.chain.len()),
            None => s.field("state", &format_args!("<locked>")),
        };
        s.finish_non_exhaustive()
    }
}
