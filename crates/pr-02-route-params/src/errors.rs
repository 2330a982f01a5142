//! Route parameter errors.

use thiserror::Error;

/// Errors from encoding, parsing or decoding route parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// The value could not be serialized to JSON.
    #[error("Failed to serialize route parameter: {message}")]
    Serialize { message: String },

    /// The parameter text is not a valid encoding of the expected type.
    #[error("Failed to decode route parameter '{name}': {message}")]
    Decode { name: String, message: String },

    /// The URL itself is malformed.
    #[error("Malformed route URL: {message}")]
    Parse { message: String },

    /// The URL exceeds the navigation size limit.
    #[error("Route URL too large: {size} bytes, max {max} bytes")]
    TooLarge { size: usize, max: usize },

    /// The parameter is not present in the URL.
    #[error("Route parameter '{name}' not present")]
    Missing { name: String },
}
