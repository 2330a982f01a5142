//! # Channel Policy
//!
//! Picks a handoff channel from what the payload needs.
//!
//! | Channel      | Survives restart | Typed values | Size limit          |
//! |--------------|------------------|--------------|---------------------|
//! | Bus          | no               | yes          | none                |
//! | Preferences  | yes              | text only    | store value limit   |
//! | RouteParams  | no               | text only    | navigation URL limit|

use std::fmt;

use pr_01_preferences::PreferencesConfig;
use pr_02_route_params::DEFAULT_MAX_URL_BYTES;
use shared_types::Payload;

/// A way of handing data from one page to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Process-wide data bus.
    Bus,
    /// Persistent preferences store.
    Preferences,
    /// Query parameters of the destination route.
    RouteParams,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Bus, Channel::Preferences, Channel::RouteParams];

    /// Metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Bus => "bus",
            Channel::Preferences => "preferences",
            Channel::RouteParams => "route_params",
        }
    }

    pub fn survives_restart(&self) -> bool {
        matches!(self, Channel::Preferences)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a handoff needs from its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PayloadProfile {
    /// Bytes the value occupies once encoded for the channel.
    pub estimated_size: usize,
    /// The receiving page may run after a restart.
    pub must_survive_restart: bool,
    /// The destination should be reachable from a copied link.
    pub shareable_link: bool,
}

impl PayloadProfile {
    /// Profile `payload` by the size of its JSON form.
    pub fn of(payload: &Payload) -> Self {
        Self {
            estimated_size: payload.estimated_size(),
            ..Self::default()
        }
    }

    pub fn persistent(mut self) -> Self {
        self.must_survive_restart = true;
        self
    }

    pub fn shareable(mut self) -> Self {
        self.shareable_link = true;
        self
    }
}

/// Chooses a channel for a [`PayloadProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPolicy {
    max_url_bytes: usize,
    max_value_len: usize,
}

impl Default for ChannelPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_URL_BYTES, PreferencesConfig::default().max_value_len)
    }
}

impl ChannelPolicy {
    /// `max_value_len` is the preferences store's value limit.
    pub fn new(max_url_bytes: usize, max_value_len: usize) -> Self {
        Self {
            max_url_bytes,
            max_value_len,
        }
    }

    /// Persistence wins, then a shareable link if the value is sure to fit
    /// in the URL, otherwise the bus.
    ///
    /// Returns `None` when the payload must survive a restart but is too
    /// large for the preferences store, since no channel can carry it.
    pub fn recommend(&self, profile: &PayloadProfile) -> Option<Channel> {
        if profile.must_survive_restart {
            self.fits_in_preferences(profile.estimated_size)
                .then_some(Channel::Preferences)
        } else if profile.shareable_link && self.fits_in_route(profile.estimated_size) {
            Some(Channel::RouteParams)
        } else {
            Some(Channel::Bus)
        }
    }

    /// Whether `json_len` bytes of JSON fit the URL after percent-encoding,
    /// which at worst triples every byte.
    pub fn fits_in_route(&self, json_len: usize) -> bool {
        json_len.saturating_mul(3) <= self.max_url_bytes
    }

    /// Whether `json_len` bytes of JSON fit one preference value.
    pub fn fits_in_preferences(&self, json_len: usize) -> bool {
        json_len <= self.max_value_len
    }
}
