//! Change notifications broadcast to store subscribers.

/// A mutation applied to the in-memory view of a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceChange {
    /// A key was inserted or overwritten.
    Put { key: String },
    /// A key was removed.
    Deleted { key: String },
    /// Every key was removed.
    Cleared,
}

impl PreferenceChange {
    /// The affected key, if the change concerns a single key.
    pub fn key(&self) -> Option<&str> {
        match self {
            PreferenceChange::Put { key } | PreferenceChange::Deleted { key } => Some(key),
            PreferenceChange::Cleared => None,
        }
    }
}
