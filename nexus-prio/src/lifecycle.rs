//! Create/destroy state tracking and lock registration.
//!
//! A queue moves through two phases:
//!
//! ```text
//!            create()               destroy()
//! Uninitialized ──────────► Ready ──────────► Uninitialized
//!       ▲                     │
//!       └── push/pop/peek: InvalidState
//!                  create(): AlreadyInitialized
//! ```
//!
//! The phase lives inside the queue's locked state, so the check and the
//! operation it gates are one critical section.

use crate::{Error, RegistryError};

/// Lifecycle phase of a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Never created, or destroyed.
    #[default]
    Uninitialized,
    /// Created; push/pop/peek are allowed.
    Ready,
}

impl Phase {
    /// Returns `Ok(())` if Ready, `Err(InvalidState)` otherwise.
    #[inline]
    pub fn ensure_ready(self) -> Result<(), Error> {
        match self {
            Phase::Ready => Ok(()),
            Phase::Uninitialized => Err(Error::InvalidState),
        }
    }

    /// Moves to Ready. Fails with `AlreadyInitialized` if already there.
    #[inline]
    pub fn begin(&mut self) -> Result<(), Error> {
        match self {
            Phase::Ready => Err(Error::AlreadyInitialized),
            Phase::Uninitialized => {
                *self = Phase::Ready;
                Ok(())
            }
        }
    }

    /// Moves to Uninitialized. Fails with `InvalidState` if not Ready.
    #[inline]
    pub fn end(&mut self) -> Result<(), Error> {
        self.ensure_ready()?;
        *self = Phase::Uninitialized;
        Ok(())
    }
}

/// Host hook that names a queue's lock for introspection tooling.
///
/// Registration is observability only: a failing registry never fails
/// [`create_registered`](crate::PriorityQueue::create_registered).
///
/// # Example
///
/// ```
/// use nexus_prio::{LockRegistry, RegistryError};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Names(Mutex<Vec<&'static str>>);
///
/// impl LockRegistry for Names {
///     fn register(&self, name: &'static str) -> Result<(), RegistryError> {
///         self.0.lock().map_err(|_| RegistryError { name })?.push(name);
///         Ok(())
///     }
/// }
/// ```
pub trait LockRegistry {
    /// Records `name` as the label of a queue lock.
    fn register(&self, name: &'static str) -> Result<(), RegistryError>;
}

impl<R: LockRegistry + ?Sized> LockRegistry for &R {
    fn register(&self, name: &'static str) -> Result<(), RegistryError> {
        (**self).register(name)
    }
}

/// Registry that records lock names as `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRegistry;

impl LockRegistry for TracingRegistry {
    fn register(&self, name: &'static str) -> Result<(), RegistryError> {
        tracing::debug!(lock = name, "registered queue lock");
        Ok(())
    }
}
