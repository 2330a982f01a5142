//! # Page Handoff
//!
//! One facade over the three ways a page can hand data to the next one.

pub mod facade;
pub mod policy;

pub use facade::{Handoff, HandoffError};
pub use policy::{Channel, ChannelPolicy, PayloadProfile};
