//! Thread-safe handle to a recorder
//!
//! The promote-or-insert-then-trim sequence runs under one lock, so
//! concurrent event sources can never observe or produce a duplicate or an
//! over-capacity list.

use crate::recorder::HistoryTokenRecorder;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, lock-protected [`HistoryTokenRecorder`]
pub struct SharedRecorder<T> {
    inner: Arc<Mutex<HistoryTokenRecorder<T>>>,
}

impl<T> Clone for SharedRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: PartialEq> SharedRecorder<T> {
    pub fn new(recorder: HistoryTokenRecorder<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(recorder)),
        }
    }

    pub fn on_event(&self, token: T) -> bool {
        self.inner.lock().on_event(token)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Run `f` against the recorder while holding the lock
    pub fn with<R>(&self, f: impl FnOnce(&HistoryTokenRecorder<T>) -> R) -> R {
        let guard = self.inner.lock();
        f(&*guard)
    }
}

impl<T: PartialEq + Clone> SharedRecorder<T> {
    /// Snapshot of the retained tokens, most recent first
    pub fn items(&self) -> Vec<T> {
        self.inner.lock().items().to_vec()
    }
}

impl<T: PartialEq> From<HistoryTokenRecorder<T>> for SharedRecorder<T> {
    fn from(recorder: HistoryTokenRecorder<T>) -> Self {
        Self::new(recorder)
    }
}
