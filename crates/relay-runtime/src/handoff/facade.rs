//! # Handoff Facade
//!
//! Sending pages call [`Handoff::send`] before navigating; receiving pages
//! call [`Handoff::receive`] once they are visible.
//!
//! ## Channel semantics
//!
//! - **Bus**: the value is stored in the shared [`DataBus`] and removed on
//!   receive, so a stale value never leaks into a later visit.
//! - **Preferences**: the value is stored as JSON text and flushed, so it is
//!   still there after a restart. Receiving does not remove it.
//! - **RouteParams**: the value is staged and attached to the next route
//!   opened with [`Handoff::navigate`]. Receiving reads the visible route.
//!
//! Receiving never fails: a missing, truncated or corrupt value reads as
//! `None` and the page falls back to its defaults.

use std::sync::Arc;

use parking_lot::Mutex;
use pr_01_preferences::{PrefValue, PreferencesApi, PreferencesConfig, PreferencesError};
use pr_02_route_params::{ParamError, RouteParamCodec, RouteQuery, RouteUrl};
use relay_telemetry::{BUS_READS, BUS_WRITES, HANDOFFS, PREFERENCE_FLUSHES, ROUTE_PARAM_FAILURES};
use shared_bus::DataBus;
use shared_types::Payload;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::adapters::{Navigation, Navigator};
use crate::handoff::policy::{Channel, ChannelPolicy, PayloadProfile};

/// Errors on the sending side.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("Payload has no text form: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Preferences(#[from] PreferencesError),

    #[error(transparent)]
    RouteParams(#[from] ParamError),

    #[error("No channel can carry a {size}-byte payload that must survive a restart")]
    NoChannel { size: usize },
}

/// Moves payloads between pages over a chosen [`Channel`].
pub struct Handoff {
    bus: Arc<DataBus>,
    preferences: Arc<dyn PreferencesApi>,
    codec: RouteParamCodec,
    navigator: Arc<Navigator>,
    policy: ChannelPolicy,
    /// Encoded params waiting for the next `navigate`.
    staged: Mutex<RouteQuery>,
}

impl Handoff {
    pub fn new(
        bus: Arc<DataBus>,
        preferences: Arc<dyn PreferencesApi>,
        codec: RouteParamCodec,
        navigator: Arc<Navigator>,
    ) -> Self {
        Self {
            bus,
            preferences,
            policy: ChannelPolicy::new(
                codec.max_url_bytes(),
                PreferencesConfig::default().max_value_len,
            ),
            codec,
            navigator,
            staged: Mutex::new(RouteQuery::new()),
        }
    }

    /// Replace the channel policy, e.g. to match a store's value limit.
    pub fn with_policy(mut self, policy: ChannelPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ChannelPolicy {
        &self.policy
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    /// Hand `payload` to the next page under `key`.
    ///
    /// # Errors
    ///
    /// - `Encode`: the payload cannot be written as JSON text
    /// - `Preferences`: the store rejected the key or value, or the flush failed
    /// - `RouteParams`: the encoded value exceeds the URL limit
    pub async fn send(&self, key: &str, payload: Payload, channel: Channel) -> Result<(), HandoffError> {
        match channel {
            Channel::Bus => {
                let outcome = match self.bus.replace(key, payload) {
                    Some(_) => "overwritten",
                    None => "inserted",
                };
                BUS_WRITES.with_label_values(&[outcome]).inc();
            }
            Channel::Preferences => {
                let text = serde_json::to_string(&payload)?;
                self.preferences.put(key, PrefValue::Text(text)).await?;
                self.flush_preferences().await?;
            }
            Channel::RouteParams => {
                let encoded = self
                    .codec
                    .encode(&payload)
                    .inspect_err(|_| ROUTE_PARAM_FAILURES.with_label_values(&["encode"]).inc())?;
                let mut staged = self.staged.lock();
                staged.remove(key);
                staged.push(key, encoded);
            }
        }
        HANDOFFS.with_label_values(&[channel.as_str(), "send"]).inc();
        debug!(key, %channel, "Payload handed off");
        Ok(())
    }

    /// Send over whichever channel the policy picks for `profile`.
    ///
    /// # Errors
    ///
    /// Returns `NoChannel` when the payload must survive a restart but is
    /// over the store's value limit; otherwise as [`send`](Self::send).
    pub async fn send_auto(
        &self,
        key: &str,
        payload: Payload,
        profile: PayloadProfile,
    ) -> Result<Channel, HandoffError> {
        let channel = self.policy.recommend(&profile).ok_or(HandoffError::NoChannel {
            size: profile.estimated_size,
        })?;
        self.send(key, payload, channel).await?;
        Ok(channel)
    }

    /// Open `path` with every staged route param attached.
    ///
    /// # Errors
    ///
    /// Returns `TooLarge` when the staged params together overflow the URL
    /// limit. The staged params are dropped either way.
    pub fn navigate(&self, path: &str) -> Result<Navigation, HandoffError> {
        let query = std::mem::take(&mut *self.staged.lock());
        let url = RouteUrl::new(path, query).to_string();
        if url.len() > self.codec.max_url_bytes() {
            ROUTE_PARAM_FAILURES.with_label_values(&["encode"]).inc();
            return Err(ParamError::TooLarge {
                size: url.len(),
                max: self.codec.max_url_bytes(),
            }
            .into());
        }
        Ok(self.navigator.push(&url))
    }

    /// Read what the previous page handed over under `key`.
    pub async fn receive(&self, key: &str, channel: Channel) -> Option<Payload> {
        let payload = match channel {
            Channel::Bus => self.receive_from_bus(key),
            Channel::Preferences => self.receive_from_preferences(key).await,
            Channel::RouteParams => self.receive_from_route(key),
        };
        if payload.is_some() {
            HANDOFFS.with_label_values(&[channel.as_str(), "receive"]).inc();
        }
        payload
    }

    /// Drop whatever is stored under `key` without reading it.
    pub async fn discard(&self, key: &str, channel: Channel) -> Result<(), HandoffError> {
        match channel {
            Channel::Bus => self.bus.remove(key),
            Channel::Preferences => {
                if self.preferences.delete(key).await {
                    self.flush_preferences().await?;
                }
            }
            Channel::RouteParams => {
                self.staged.lock().remove(key);
            }
        }
        Ok(())
    }

    fn receive_from_bus(&self, key: &str) -> Option<Payload> {
        let taken = self.bus.take(key);
        let outcome = if taken.is_some() { "hit" } else { "miss" };
        BUS_READS.with_label_values(&[outcome]).inc();
        taken.map(Arc::unwrap_or_clone)
    }

    async fn receive_from_preferences(&self, key: &str) -> Option<Payload> {
        if !self.preferences.has(key).await {
            return None;
        }
        let value = self.preferences.get(key, PrefValue::Text(String::new())).await;
        let Some(text) = value.as_text() else {
            warn!(key, "Stored preference is not text, treating as no data");
            return None;
        };
        match serde_json::from_str(text) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(key, error = %e, "Stored preference unreadable, treating as no data");
                None
            }
        }
    }

    fn receive_from_route(&self, key: &str) -> Option<Payload> {
        let raw = self.navigator.current()?;
        let url = match RouteUrl::parse(&raw) {
            Ok(url) => url,
            Err(e) => {
                ROUTE_PARAM_FAILURES.with_label_values(&["decode"]).inc();
                warn!(error = %e, "Route unreadable, treating as no data");
                return None;
            }
        };
        match self.codec.param(&url, key) {
            Ok(payload) => Some(payload),
            Err(ParamError::Missing { .. }) => None,
            Err(e) => {
                ROUTE_PARAM_FAILURES.with_label_values(&["decode"]).inc();
                warn!(path = url.path(), error = %e, "Route parameter unreadable, treating as no data");
                None
            }
        }
    }

    async fn flush_preferences(&self) -> Result<(), PreferencesError> {
        match self.preferences.flush().await {
            Ok(()) => {
                PREFERENCE_FLUSHES.with_label_values(&["ok"]).inc();
                Ok(())
            }
            Err(e) => {
                PREFERENCE_FLUSHES.with_label_values(&["error"]).inc();
                Err(e)
            }
        }
    }

    /// Flush pending preference writes before shutdown.
    pub async fn shutdown(&self) -> Result<(), PreferencesError> {
        self.flush_preferences().await?;
        info!(bus_entries = self.bus.len(), "Handoff channels closed");
        Ok(())
    }
}
