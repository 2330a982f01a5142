//! # Typed Bus Keys
//!
//! A `BusKey<T>` pairs a string key with the Rust type stored under it, so
//! writer and reader agree on the shape at compile time.

use std::fmt;
use std::marker::PhantomData;

use shared_types::{FromPayload, Payload};

/// A string key bound to the type of value stored under it.
///
/// ```ignore
/// const USER_INFO: BusKey<UserInfo> = BusKey::new("userInfo");
/// bus.set_typed(&USER_INFO, UserInfo::new("John Doe", 28));
/// let user: Option<UserInfo> = bus.get_typed(&USER_INFO);
/// ```
pub struct BusKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> BusKey<T>
where
    T: FromPayload + Into<Payload>,
{
    /// Create a typed key.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }
}

impl<T> BusKey<T> {
    /// The underlying string key.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for BusKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BusKey<T> {}

impl<T> fmt::Debug for BusKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BusKey").field(&self.name).finish()
    }
}
