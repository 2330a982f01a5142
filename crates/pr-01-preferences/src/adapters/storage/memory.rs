use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::domain::errors::BackendError;
use crate::domain::value::PreferenceMap;
use crate::ports::outbound::PreferenceBackend;

/// In-memory backend for unit tests.
///
/// Can be switched into a failing mode to exercise I/O fault handling.
#[derive(Default)]
pub struct InMemoryBackend {
    persisted: Mutex<PreferenceMap>,
    fail_writes: AtomicBool,
    persist_count: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds `entries`, as if written by an earlier run.
    pub fn with_entries(entries: PreferenceMap) -> Self {
        Self {
            persisted: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// Make subsequent `persist` calls fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// What the last successful `persist` wrote.
    pub fn persisted(&self) -> PreferenceMap {
        self.persisted.lock().clone()
    }

    /// Number of successful `persist` calls.
    pub fn persist_count(&self) -> usize {
        self.persist_count.load(Ordering::SeqCst)
    }
}

impl PreferenceBackend for InMemoryBackend {
    fn load(&self) -> Result<PreferenceMap, BackendError> {
        Ok(self.persisted.lock().clone())
    }

    fn persist(&self, entries: &PreferenceMap) -> Result<(), BackendError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::Io {
                message: "simulated storage failure".to_string(),
            });
        }
        *self.persisted.lock() = entries.clone();
        self.persist_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn destroy(&self) -> Result<(), BackendError> {
        self.persisted.lock().clear();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
