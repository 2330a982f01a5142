//! # Ports
//!
//! - `inbound`: the API the application drives
//! - `outbound`: the storage backend the service drives

pub mod inbound;
pub mod outbound;
