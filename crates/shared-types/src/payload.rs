//! # Payload
//!
//! The tagged set of value shapes that can be handed between pages.
//!
//! Values are serialized with an adjacent tag so string-only channels can
//! recover the exact variant:
//!
//! ```text
//! {"kind":"user_info","data":{"name":"John Doe","age":28}}
//! ```

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::entities::UserInfo;
use crate::errors::PayloadMismatch;

/// A value stored on the data bus or carried by another handoff channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    /// Free-form text.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Floating point number. NaN and infinities have no JSON form and
    /// fail to serialize.
    #[serde(serialize_with = "serialize_finite")]
    Float(f64),
    /// Boolean flag.
    Flag(bool),
    /// Signed-in user profile.
    UserInfo(UserInfo),
    /// Arbitrary structured document.
    Json(serde_json::Value),
    /// Opaque binary blob.
    Bytes(Vec<u8>),
}

fn serialize_finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(serde::ser::Error::custom(format!(
            "non-finite float {value} cannot be serialized"
        )));
    }
    serializer.serialize_f64(*value)
}

/// Fieldless discriminant of [`Payload`], used in logs and channel policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Text,
    Integer,
    Float,
    Flag,
    UserInfo,
    Json,
    Bytes,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Text => "text",
            PayloadKind::Integer => "integer",
            PayloadKind::Float => "float",
            PayloadKind::Flag => "flag",
            PayloadKind::UserInfo => "user_info",
            PayloadKind::Json => "json",
            PayloadKind::Bytes => "bytes",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Payload {
    /// The variant of this payload.
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Text(_) => PayloadKind::Text,
            Payload::Integer(_) => PayloadKind::Integer,
            Payload::Float(_) => PayloadKind::Float,
            Payload::Flag(_) => PayloadKind::Flag,
            Payload::UserInfo(_) => PayloadKind::UserInfo,
            Payload::Json(_) => PayloadKind::Json,
            Payload::Bytes(_) => PayloadKind::Bytes,
        }
    }

    /// Length in bytes of the tagged JSON encoding.
    ///
    /// This is what a string-only channel has to carry before any
    /// percent-encoding is applied. A payload with no JSON form reports
    /// `usize::MAX` so no size-limited channel accepts it.
    #[must_use]
    pub fn estimated_size(&self) -> usize {
        serde_json::to_vec(self)
            .map(|bytes| bytes.len())
            .unwrap_or(usize::MAX)
    }

    /// Convert to a concrete type, failing if the variant does not match.
    pub fn extract<T: FromPayload>(&self) -> Result<T, PayloadMismatch> {
        T::from_payload(self)
    }
}

/// Types that can be read back out of a [`Payload`].
pub trait FromPayload: Sized {
    /// The variant this type is stored as.
    const KIND: PayloadKind;

    fn from_payload(payload: &Payload) -> Result<Self, PayloadMismatch>;
}

macro_rules! payload_variant {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Payload {
            fn from(value: $ty) -> Self {
                Payload::$variant(value)
            }
        }

        impl FromPayload for $ty {
            const KIND: PayloadKind = PayloadKind::$variant;

            fn from_payload(payload: &Payload) -> Result<Self, PayloadMismatch> {
                match payload {
                    Payload::$variant(value) => Ok(value.clone()),
                    other => Err(PayloadMismatch {
                        expected: PayloadKind::$variant,
                        actual: other.kind(),
                    }),
                }
            }
        }
    };
}

payload_variant!(String, Text);
payload_variant!(i64, Integer);
payload_variant!(f64, Float);
payload_variant!(bool, Flag);
payload_variant!(UserInfo, UserInfo);
payload_variant!(serde_json::Value, Json);
payload_variant!(Vec<u8>, Bytes);

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Payload::Integer(i64::from(value))
    }
}

impl From<u32> for Payload {
    fn from(value: u32) -> Self {
        Payload::Integer(i64::from(value))
    }
}
