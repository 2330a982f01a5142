//! # Route Parameter Codec
//!
//! JSON + percent-encoding for values carried in a route URL, with the
//! navigation size limit enforced on the writer side.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::ParamError;
use crate::url::{RouteQuery, RouteUrl};

/// Navigation URL limit (100 KiB).
pub const DEFAULT_MAX_URL_BYTES: usize = 100 * 1024;

/// Encodes and decodes route parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteParamCodec {
    max_url_bytes: usize,
}

impl Default for RouteParamCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_URL_BYTES)
    }
}

impl RouteParamCodec {
    pub fn new(max_url_bytes: usize) -> Self {
        Self { max_url_bytes }
    }

    /// Largest URL, in bytes, the navigation layer carries intact.
    pub fn max_url_bytes(&self) -> usize {
        self.max_url_bytes
    }

    /// Serialize `value` to JSON and percent-encode it.
    ///
    /// # Errors
    ///
    /// - `Serialize`: the value has no JSON form
    /// - `TooLarge`: the encoded value alone exceeds the URL limit
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, ParamError> {
        let json = serde_json::to_string(value).map_err(|e| ParamError::Serialize {
            message: e.to_string(),
        })?;
        let encoded = urlencoding::encode(&json).into_owned();
        if encoded.len() > self.max_url_bytes {
            return Err(ParamError::TooLarge {
                size: encoded.len(),
                max: self.max_url_bytes,
            });
        }
        Ok(encoded)
    }

    /// Percent-decode `encoded` and parse it as JSON into `T`.
    ///
    /// `name` only labels the error.
    pub fn decode<T: DeserializeOwned>(&self, name: &str, encoded: &str) -> Result<T, ParamError> {
        let json = urlencoding::decode(encoded).map_err(|e| ParamError::Decode {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&json).map_err(|e| ParamError::Decode {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Start building a URL for `path`.
    pub fn url(&self, path: impl Into<String>) -> RouteUrlBuilder {
        RouteUrlBuilder {
            codec: *self,
            path: path.into(),
            query: RouteQuery::new(),
        }
    }

    /// Decode parameter `name` from a parsed route.
    ///
    /// # Errors
    ///
    /// - `Missing`: no such parameter
    /// - `Decode`: the value is not a valid encoding of `T`
    pub fn param<T: DeserializeOwned>(&self, url: &RouteUrl, name: &str) -> Result<T, ParamError> {
        let raw = url.query().get_raw(name).ok_or_else(|| ParamError::Missing {
            name: name.to_string(),
        })?;
        self.decode(name, raw)
    }

    /// Read parameter `name` from a raw route string.
    ///
    /// Every failure (malformed URL, missing parameter, truncated or corrupt
    /// value) degrades to `None`.
    pub fn read_param<T: DeserializeOwned>(&self, raw_url: &str, name: &str) -> Option<T> {
        let url = match RouteUrl::parse(raw_url) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "[pr-02] Route URL unreadable, treating as no data");
                return None;
            }
        };
        match self.param(&url, name) {
            Ok(value) => Some(value),
            Err(ParamError::Missing { .. }) => {
                debug!(path = url.path(), name, "[pr-02] Route parameter absent");
                None
            }
            Err(e) => {
                warn!(path = url.path(), error = %e, "[pr-02] Route parameter unreadable, treating as no data");
                None
            }
        }
    }

    /// Like [`read_param`](Self::read_param), falling back to `T::default()`.
    pub fn read_param_or_default<T: DeserializeOwned + Default>(&self, raw_url: &str, name: &str) -> T {
        self.read_param(raw_url, name).unwrap_or_default()
    }
}

/// Accumulates encoded parameters for one route.
#[derive(Debug, Clone)]
pub struct RouteUrlBuilder {
    codec: RouteParamCodec,
    path: String,
    query: RouteQuery,
}

impl RouteUrlBuilder {
    /// Encode and append a parameter.
    pub fn param<T: Serialize + ?Sized>(mut self, name: &str, value: &T) -> Result<Self, ParamError> {
        let encoded = self.codec.encode(value)?;
        self.query.push(name, encoded);
        Ok(self)
    }

    /// Finish the URL.
    ///
    /// # Errors
    ///
    /// Returns `TooLarge` if the complete URL exceeds the limit, since the
    /// navigation layer would truncate it.
    pub fn build(self) -> Result<RouteUrl, ParamError> {
        let url = RouteUrl::new(self.path, self.query);
        let size = url.to_string().len();
        if size > self.codec.max_url_bytes {
            return Err(ParamError::TooLarge {
                size,
                max: self.codec.max_url_bytes,
            });
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::truncate_to_limit;
    use shared_types::{Payload, UserInfo};

    #[test]
    fn test_user_info_round_trip() {
        let codec = RouteParamCodec::default();
        let user = UserInfo::new("John Doe", 28);

        let url = codec
            .url("pages/Detail")
            .param("user", &user)
            .unwrap()
            .build()
            .unwrap()
            .to_string();

        assert!(url.starts_with("pages/Detail?user="));
        assert!(!url.contains(' '));
        assert_eq!(codec.read_param::<UserInfo>(&url, "user"), Some(user));
    }

    #[test]
    fn test_payload_round_trip() {
        let codec = RouteParamCodec::default();
        let payload = Payload::Text("a&b=c?d %".to_string());

        let encoded = codec.encode(&payload).unwrap();
        let decoded: Payload = codec.decode("p", &encoded).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_oversize_rejected_on_write() {
        let codec = RouteParamCodec::new(64);
        let big = "x".repeat(100);

        assert!(matches!(
            codec.encode(&big),
            Err(ParamError::TooLarge { max: 64, .. })
        ));

        // Each value fits, the whole URL does not.
        let result = codec
            .url("pages/Detail")
            .param("a", "x".repeat(25).as_str())
            .and_then(|b| b.param("b", "y".repeat(25).as_str()))
            .and_then(RouteUrlBuilder::build);
        assert!(matches!(result, Err(ParamError::TooLarge { .. })));
    }

    #[test]
    fn test_truncated_url_degrades_to_default() {
        let codec = RouteParamCodec::default();
        let user = UserInfo::new("John Doe", 28);
        let url = codec
            .url("pages/Detail")
            .param("user", &user)
            .unwrap()
            .build()
            .unwrap()
            .to_string();

        let truncated = truncate_to_limit(&url, url.len() - 5);
        assert_eq!(codec.read_param::<UserInfo>(truncated, "user"), None);
        assert_eq!(
            codec.read_param_or_default::<UserInfo>(truncated, "user"),
            UserInfo::default()
        );
    }

    #[test]
    fn test_malformed_values_degrade_to_none() {
        let codec = RouteParamCodec::default();

        // Not JSON.
        assert_eq!(codec.read_param::<u32>("p?n=abc", "n"), None);
        // Invalid UTF-8 after percent-decoding.
        assert_eq!(codec.read_param::<String>("p?s=%FF%FE", "s"), None);
        // Wrong type.
        assert_eq!(codec.read_param::<u32>("p?n=%22text%22", "n"), None);
        // Malformed URL.
        assert_eq!(codec.read_param::<u32>("?n=1", "n"), None);
        // Missing.
        assert_eq!(codec.read_param::<u32>("p?m=1", "n"), None);
    }

    #[test]
    fn test_param_reports_missing() {
        let codec = RouteParamCodec::default();
        let url = RouteUrl::parse("p?a=1").unwrap();

        assert_eq!(codec.param::<u32>(&url, "a"), Ok(1));
        assert_eq!(
            codec.param::<u32>(&url, "b"),
            Err(ParamError::Missing { name: "b".into() })
        );
    }
}
