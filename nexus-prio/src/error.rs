//! Error types for queue and pool operations.

use core::fmt;

/// Error returned when the node pool has no free slot.
///
/// Carries back the value that could not be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node pool is full")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

/// Error returned by [`PriorityQueue`](crate::PriorityQueue) operations.
///
/// Every variant is recoverable. A failed operation leaves the queue
/// exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// Push on a queue whose pool has no free slot.
    ///
    /// The caller may retry later or drop the item.
    CapacityExceeded,

    /// Pop or peek on a queue with no queued items.
    EmptyQueue,

    /// `create` on a queue that is already Ready.
    AlreadyInitialized,

    /// Operation on a queue that was never created or has been destroyed.
    InvalidState,

    /// The lock could not be acquired within the allowed wait.
    LockFailure,
}

impl Error {
    /// Returns `true` if this error is the `CapacityExceeded` variant.
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Error::CapacityExceeded)
    }

    /// Returns `true` if this error is the `EmptyQueue` variant.
    pub fn is_empty_queue(&self) -> bool {
        matches!(self, Error::EmptyQueue)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded => write!(f, "queue capacity exceeded"),
            Error::EmptyQueue => write!(f, "queue is empty"),
            Error::AlreadyInitialized => write!(f, "queue already initialized"),
            Error::InvalidState => write!(f, "queue is not initialized"),
            Error::LockFailure => write!(f, "failed to acquire queue lock"),
        }
    }
}

impl std::error::Error for Error {}

impl<T> From<Full<T>> for Error {
    fn from(_: Full<T>) -> Self {
        Error::CapacityExceeded
    }
}

/// Error reported by a [`LockRegistry`](crate::LockRegistry).
///
/// Registration is diagnostic only, so this never reaches queue callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryError {
    /// Name that could not be registered.
    pub name: &'static str,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to register lock '{}'", self.name)
    }
}

impl std::error::Error for RegistryError {}
