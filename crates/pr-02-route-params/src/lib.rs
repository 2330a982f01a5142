//! # Route Parameters (pr-02)
//!
//! Carries values between pages inside the target page's URL.
//!
//! ## Wire Format
//!
//! ```text
//! pages/Detail?user=%7B%22name%22%3A%22John%20Doe%22%2C%22age%22%3A28%7D&tab=%22posts%22
//!              └─┬┘ └──────────────────────┬──────────────────────────┘
//!              name        percent-encoded JSON of the value
//! ```
//!
//! ## Rules
//!
//! - **Symmetric**: every value is JSON-serialized then percent-encoded on
//!   write, and percent-decoded then JSON-parsed on read.
//! - **Bounded**: the navigation layer truncates URLs beyond its limit
//!   (default 100 KiB). Writers reject oversize URLs up front.
//! - **Readers never fail**: `read_param` turns every parse or decode fault,
//!   including truncation damage, into `None`.

pub mod codec;
pub mod errors;
pub mod url;

pub use codec::{RouteParamCodec, RouteUrlBuilder, DEFAULT_MAX_URL_BYTES};
pub use errors::ParamError;
pub use url::{truncate_to_limit, RouteQuery, RouteUrl};
