//! Storage Adapters
//!
//! Implementations of the `PreferenceBackend` trait.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::InMemoryBackend;
