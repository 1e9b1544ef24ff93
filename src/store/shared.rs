//! Shared handle for concurrent callers
//!
//! One `RwLock` per store: any number of readers, or exactly one mutation.
//! Readers observe the state before or after a mutation, never a part of
//! one.

use std::sync::{Arc, PoisonError, RwLock};

use super::store::Store;

/// Cloneable, thread-safe handle to a [`Store`].
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Runs `f` under the read lock.
    ///
    /// A poisoned lock is recovered: a store only writes a record after
    /// every check has passed, so a panic inside a caller-supplied closure
    /// cannot leave a half-applied record behind.
    pub fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Runs `f` under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Returns the store if this is the last handle.
    pub fn try_into_inner(self) -> Result<Store, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => Ok(lock.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl From<Store> for SharedStore {
    fn from(store: Store) -> Self {
        Self::new(store)
    }
}
