//! # Process-Wide Instance
//!
//! Lazily created shared bus for code that cannot receive one by injection.
//! Prefer passing the `Arc<DataBus>` owned by the composition root.

use std::sync::Arc;

use lazy_static::lazy_static;
use tracing::info;

use crate::bus::DataBus;

lazy_static! {
    /// Created on first dereference, lives until process exit.
    static ref GLOBAL_BUS: Arc<DataBus> = {
        let bus = Arc::new(DataBus::new());
        info!(bus = %bus.id(), "Process-wide data bus initialized");
        bus
    };
}

impl DataBus {
    /// Return the process-wide bus, creating it on the first call.
    ///
    /// Every call returns a handle to the same instance.
    #[must_use]
    pub fn get_instance() -> Arc<DataBus> {
        Arc::clone(&GLOBAL_BUS)
    }
}
