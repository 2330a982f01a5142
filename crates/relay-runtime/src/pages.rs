//! # Demo Pages
//!
//! A profile page that opens a detail page for a user, and the detail page
//! that shows whoever it was handed. Both only see the [`Handoff`] facade.

use std::sync::Arc;

use shared_bus::USER_INFO;
use shared_types::{Payload, UserInfo};
use tracing::{info, warn};

use crate::adapters::Navigation;
use crate::handoff::{Channel, Handoff, HandoffError};

/// Route of the detail page.
pub const DETAIL_ROUTE: &str = "pages/Detail";

/// Sending side.
pub struct ProfilePage {
    handoff: Arc<Handoff>,
}

impl ProfilePage {
    pub fn new(handoff: Arc<Handoff>) -> Self {
        Self { handoff }
    }

    /// Hand `user` over `channel` and open the detail page.
    pub async fn open_detail(&self, user: &UserInfo, channel: Channel) -> Result<Navigation, HandoffError> {
        self.handoff
            .send(USER_INFO.name(), Payload::from(user.clone()), channel)
            .await?;
        let navigation = self.handoff.navigate(DETAIL_ROUTE)?;
        info!(user = %user.name, %channel, "Opened detail page");
        Ok(navigation)
    }
}

/// Receiving side.
pub struct DetailPage {
    handoff: Arc<Handoff>,
}

impl DetailPage {
    pub fn new(handoff: Arc<Handoff>) -> Self {
        Self { handoff }
    }

    /// User to display; a blank profile if nothing usable was handed over.
    pub async fn on_show(&self, channel: Channel) -> UserInfo {
        let Some(payload) = self.handoff.receive(USER_INFO.name(), channel).await else {
            info!(%channel, "No user handed over, showing defaults");
            return UserInfo::default();
        };
        payload.extract::<UserInfo>().unwrap_or_else(|e| {
            warn!(%channel, error = %e, "Handed-over value is not a user");
            UserInfo::default()
        })
    }
}
