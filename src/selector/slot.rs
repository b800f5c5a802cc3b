//! Lazily filled, resettable shared slot

use parking_lot::Mutex;
use std::sync::Arc;

/// Holds at most one shared value, built under a lock on first use
pub struct SharedSlot<T> {
    inner: Mutex<Option<Arc<T>>>,
}

impl<T> SharedSlot<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Return the stored value, building it with `init` if the slot is empty.
    ///
    /// Concurrent first callers block until the single `init` completes.
    pub fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        let mut guard = self.inner.lock();
        if let Some(value) = guard.as_ref() {
            return Arc::clone(value);
        }

        let value = Arc::new(init());
        *guard = Some(Arc::clone(&value));
        value
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.inner.lock().clone()
    }

    /// Empty the slot, handing back what it held
    pub fn take(&self) -> Option<Arc<T>> {
        self.inner.lock().take()
    }
}

impl<T> Default for SharedSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
