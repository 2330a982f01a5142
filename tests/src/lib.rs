//! # Page-Relay Test Suite
//!
//! Unified test crate for behavior that spans more than one crate.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # Profile → detail handoff over every channel
//!     └── concurrency.rs  # Shared bus under many threads and tasks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pr-tests
//!
//! # Benchmarks
//! cargo bench -p pr-tests
//! ```

pub mod integration;
