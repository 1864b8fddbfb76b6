//! Fixed-capacity priority queue for deterministic, real-time systems.
//!
//! Work items are `(payload, priority)` integer pairs. The highest priority
//! pops first, and items of equal priority pop in the order they were
//! pushed. Storage is reserved at compile time: nothing on any path touches
//! the allocator, and a queue can live in a `static`.
//!
//! # Design
//!
//! The crate separates storage from structure, in layers:
//!
//! ```text
//! PriorityQueue  - parking_lot mutex, lifecycle phase, id counter
//!     │
//!     ├── OrderedChain  - head index + length, ordering logic
//!     │
//!     └── NodePool      - N inline slots, bump cursor + free list
//! ```
//!
//! Nodes link to each other by slot index (see [`Index`]) rather than by
//! pointer, so a node's lifetime is simply "its slot is occupied".
//!
//! # Quick Start
//!
//! ```
//! use nexus_prio::{Error, PriorityQueue};
//!
//! // Ten slots, lock named for introspection tooling
//! static WORK: PriorityQueue = PriorityQueue::named("work");
//!
//! WORK.create().unwrap();
//!
//! WORK.push(10, 5).unwrap();
//! WORK.push(20, 8).unwrap();
//! WORK.push(30, 8).unwrap();
//!
//! // Priority 8 beats 5; among the 8s, 20 arrived first
//! assert_eq!(WORK.pop(), Ok(20));
//! assert_eq!(WORK.pop(), Ok(30));
//! assert_eq!(WORK.pop(), Ok(10));
//! assert_eq!(WORK.pop(), Err(Error::EmptyQueue));
//! ```
//!
//! # Lifecycle
//!
//! A queue starts Uninitialized. [`PriorityQueue::create`] makes it Ready;
//! [`PriorityQueue::destroy`] drains it and returns it to Uninitialized.
//! Using an Uninitialized queue, or creating a Ready one, is a typed error
//! rather than a silent no-op.
//!
//! # Concurrency
//!
//! Every operation, including `peek` and `is_empty`, runs under one
//! `parking_lot` mutex. Plain operations block until the lock is free; the
//! `_timeout` variants return [`Error::LockFailure`] once their wait
//! expires. The mutex is not reentrant and does no priority inheritance.
//!
//! # Logging
//!
//! Node creation and removal are reported as `tracing` `info` events with
//! `priority` and `id` fields; lifecycle transitions at `debug`. Without a
//! subscriber installed the events cost a branch.
//!
//! # Capacity
//!
//! | Parameter | Where | Default |
//! |-----------|-------|---------|
//! | Capacity | `PriorityQueue<N>` | [`DEFAULT_CAPACITY`] (10) |
//! | Lock name | [`PriorityQueue::named`] | [`DEFAULT_LOCK_NAME`] |

#![warn(missing_docs)]

pub mod chain;
pub mod error;
pub mod index;
pub mod lifecycle;
pub mod pool;
pub mod queue;

pub use chain::{Entry, OrderedChain};
pub use error::{Error, Full, RegistryError};
pub use index::Index;
pub use lifecycle::{LockRegistry, Phase, TracingRegistry};
pub use pool::{Node, NodePool};
pub use queue::{DEFAULT_LOCK_NAME, PriorityQueue};

/// Default number of slots in a [`PriorityQueue`].
pub const DEFAULT_CAPACITY: usize = 10;
