//! # Data Bus
//!
//! The in-memory store behind the page handoff pattern.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::{FromPayload, Payload};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::key::BusKey;

/// Process-wide key/value store for handing values between pages.
///
/// All operations take `&self`; share the bus as `Arc<DataBus>`.
/// Mutations are mutually exclusive with each other and with reads.
/// Stored values are shared by reference: `get` hands out the same
/// `Arc<Payload>` that was stored, never a copy.
pub struct DataBus {
    /// Instance identifier, reported in log fields.
    id: Uuid,

    /// Key -> most recently written value.
    entries: RwLock<HashMap<String, Arc<Payload>>>,

    /// Operation counters.
    counters: BusCounters,
}

#[derive(Default)]
struct BusCounters {
    writes: AtomicU64,
    overwrites: AtomicU64,
    reads: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    removals: AtomicU64,
}

/// Snapshot of bus operation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusStats {
    /// Total `set` calls.
    pub writes: u64,
    /// Writes that replaced an existing entry.
    pub overwrites: u64,
    /// Total `get`/`take` calls.
    pub reads: u64,
    /// Reads that found a value.
    pub hits: u64,
    /// Reads that found nothing.
    pub misses: u64,
    /// Entries actually deleted by `remove`/`take`/`clear`.
    pub removals: u64,
}

impl DataBus {
    /// Create an empty bus.
    ///
    /// The composition root creates one of these and injects it into every
    /// page that needs it.
    #[must_use]
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        debug!(bus = %id, "Data bus created");
        Self {
            id,
            entries: RwLock::new(HashMap::new()),
            counters: BusCounters::default(),
        }
    }

    /// Instance identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Store `value` under `key`, replacing any existing entry.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Payload>) {
        self.replace(key, value);
    }

    /// Store `value` under `key` and return the entry it replaced.
    ///
    /// The lookup and the write happen under one lock.
    pub fn replace(&self, key: impl Into<String>, value: impl Into<Payload>) -> Option<Arc<Payload>> {
        self.set_shared(key, Arc::new(value.into()))
    }

    /// Store an already shared value. The caller keeps its own handle.
    ///
    /// Returns the entry that was replaced, if any.
    pub fn set_shared(&self, key: impl Into<String>, value: Arc<Payload>) -> Option<Arc<Payload>> {
        let key = key.into();
        let kind = value.kind();

        let previous = self.entries.write().insert(key.clone(), value);

        self.counters.writes.fetch_add(1, Ordering::Relaxed);
        if previous.is_some() {
            self.counters.overwrites.fetch_add(1, Ordering::Relaxed);
        }

        debug!(
            bus = %self.id,
            key = %key,
            kind = %kind,
            overwritten = previous.is_some(),
            "Bus entry written"
        );
        previous
    }

    /// Look up the value stored under `key`.
    ///
    /// Returns `None` if nothing was ever stored or the entry was removed.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<Payload>> {
        let value = self.entries.read().get(key).cloned();
        self.record_read(key, value.is_some());
        value
    }

    /// Read and remove the value under `key` in a single step.
    pub fn take(&self, key: &str) -> Option<Arc<Payload>> {
        let value = self.entries.write().remove(key);
        self.record_read(key, value.is_some());
        if value.is_some() {
            self.counters.removals.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    /// Delete the entry under `key`. No-op if absent.
    pub fn remove(&self, key: &str) {
        let removed = self.entries.write().remove(key).is_some();
        if removed {
            self.counters.removals.fetch_add(1, Ordering::Relaxed);
        }
        debug!(bus = %self.id, key = %key, removed, "Bus entry removed");
    }

    /// Whether an entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of the live keys, in no particular order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let dropped = {
            let mut entries = self.entries.write();
            let count = entries.len();
            entries.clear();
            count
        };
        self.counters
            .removals
            .fetch_add(dropped as u64, Ordering::Relaxed);
        debug!(bus = %self.id, dropped, "Bus cleared");
    }

    /// Store a value under a typed key.
    pub fn set_typed<T>(&self, key: &BusKey<T>, value: T)
    where
        T: FromPayload + Into<Payload>,
    {
        self.set(key.name(), value);
    }

    /// Read a value under a typed key.
    ///
    /// An entry holding a different payload variant reads as absent.
    #[must_use]
    pub fn get_typed<T>(&self, key: &BusKey<T>) -> Option<T>
    where
        T: FromPayload + Into<Payload>,
    {
        let payload = self.get(key.name())?;
        self.extract(key, &payload)
    }

    /// Read and remove a value under a typed key.
    ///
    /// A mismatched entry is still removed.
    pub fn take_typed<T>(&self, key: &BusKey<T>) -> Option<T>
    where
        T: FromPayload + Into<Payload>,
    {
        let payload = self.take(key.name())?;
        self.extract(key, &payload)
    }

    /// Current counter values.
    #[must_use]
    pub fn stats(&self) -> BusStats {
        BusStats {
            writes: self.counters.writes.load(Ordering::Relaxed),
            overwrites: self.counters.overwrites.load(Ordering::Relaxed),
            reads: self.counters.reads.load(Ordering::Relaxed),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            removals: self.counters.removals.load(Ordering::Relaxed),
        }
    }

    fn extract<T: FromPayload>(&self, key: &BusKey<T>, payload: &Payload) -> Option<T> {
        match T::from_payload(payload) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(bus = %self.id, key = key.name(), error = %e, "Typed bus read mismatch");
                None
            }
        }
    }

    fn record_read(&self, key: &str, hit: bool) {
        self.counters.reads.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
        }
        debug!(bus = %self.id, key = %key, hit, "Bus entry read");
    }
}

impl Default for DataBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DataBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataBus")
            .field("id", &self.id)
            .field("entries", &self.len())
            .finish()
    }
}
