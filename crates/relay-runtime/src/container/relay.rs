//! # Container Wiring

use std::sync::Arc;

use pr_01_preferences::{PreferencesApi, PreferencesError, PreferencesRegistry};
use pr_02_route_params::RouteParamCodec;
use shared_bus::DataBus;
use tracing::{info, instrument};

use crate::adapters::Navigator;
use crate::container::config::RelayConfig;
use crate::handoff::{ChannelPolicy, Handoff};
use crate::pages::{DetailPage, ProfilePage};

/// Holds every shared component of a running relay.
pub struct RelayContainer {
    /// The one bus shared by all pages.
    pub bus: Arc<DataBus>,

    /// Stores opened under the configured data directory.
    pub registry: Arc<PreferencesRegistry>,

    /// Store used for persisted handoffs.
    pub preferences: Arc<dyn PreferencesApi>,

    pub codec: RouteParamCodec,

    pub navigator: Arc<Navigator>,

    pub handoff: Arc<Handoff>,

    /// Configuration (immutable after initialization).
    pub config: RelayConfig,
}

impl RelayContainer {
    /// Wire the container from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the default preferences store cannot be opened, for example
    /// because another process holds its lock.
    #[instrument(name = "relay_init", skip(config))]
    pub async fn new(config: RelayConfig) -> Result<Self, PreferencesError> {
        info!("Initializing Page-Relay container");

        let bus = Arc::new(DataBus::new());
        info!(bus = %bus.id(), "Data bus created");

        let registry = Arc::new(PreferencesRegistry::new(
            config.storage.data_dir.clone(),
            config.storage.preferences.clone(),
        ));
        let preferences: Arc<dyn PreferencesApi> =
            registry.get_or_open(&config.storage.store_name).await?;
        info!(
            store = %config.storage.store_name,
            dir = %config.storage.data_dir.display(),
            "Preferences store opened"
        );

        let codec = RouteParamCodec::new(config.params.max_url_bytes);
        let navigator = Arc::new(Navigator::new(config.params.max_url_bytes));
        let handoff = Arc::new(Handoff::new(
            Arc::clone(&bus),
            Arc::clone(&preferences),
            codec,
            Arc::clone(&navigator),
        )
        .with_policy(ChannelPolicy::new(
            config.params.max_url_bytes,
            config.storage.preferences.max_value_len,
        )));

        info!("Page-Relay container ready");
        Ok(Self {
            bus,
            registry,
            preferences,
            codec,
            navigator,
            handoff,
            config,
        })
    }

    pub fn profile_page(&self) -> ProfilePage {
        ProfilePage::new(Arc::clone(&self.handoff))
    }

    pub fn detail_page(&self) -> DetailPage {
        DetailPage::new(Arc::clone(&self.handoff))
    }

    /// Flush preferences and release the store.
    pub async fn shutdown(&self) -> Result<(), PreferencesError> {
        self.handoff.shutdown().await?;
        self.registry.evict(&self.config.storage.store_name).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handoff::Channel;
    use shared_types::UserInfo;

    fn config_in(dir: &std::path::Path) -> RelayConfig {
        let mut config = RelayConfig::default();
        config.storage.data_dir = dir.to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_pages_share_one_bus() {
        let dir = tempfile::tempdir().unwrap();
        let container = RelayContainer::new(config_in(dir.path())).await.unwrap();

        let user = UserInfo::new("John Doe", 28);
        container
            .profile_page()
            .open_detail(&user, Channel::Bus)
            .await
            .unwrap();

        assert!(container.bus.contains("userInfo"));
        assert_eq!(container.detail_page().on_show(Channel::Bus).await, user);
        assert!(container.bus.is_empty());
    }

    #[tokio::test]
    async fn test_containers_do_not_share_buses() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let first = RelayContainer::new(config_in(a.path())).await.unwrap();
        let second = RelayContainer::new(config_in(b.path())).await.unwrap();

        first.bus.set("k", "v");
        assert!(!Arc::ptr_eq(&first.bus, &second.bus));
        assert!(!second.bus.contains("k"));
    }

    #[tokio::test]
    async fn test_preferences_survive_container_restart() {
        let dir = tempfile::tempdir().unwrap();
        let user = UserInfo::new("John Doe", 28);
        {
            let container = RelayContainer::new(config_in(dir.path())).await.unwrap();
            container
                .profile_page()
                .open_detail(&user, Channel::Preferences)
                .await
                .unwrap();
            container.shutdown().await.unwrap();
        }

        let restarted = RelayContainer::new(config_in(dir.path())).await.unwrap();
        assert_eq!(restarted.detail_page().on_show(Channel::Preferences).await, user);
    }

    #[tokio::test]
    async fn test_second_container_on_same_dir_is_locked_out() {
        let dir = tempfile::tempdir().unwrap();
        let _first = RelayContainer::new(config_in(dir.path())).await.unwrap();

        let second = RelayContainer::new(config_in(dir.path())).await;
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn test_missing_user_shows_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let container = RelayContainer::new(config_in(dir.path())).await.unwrap();
        container.navigator.push("pages/Detail");

        for channel in Channel::ALL {
            assert_eq!(container.detail_page().on_show(channel).await, UserInfo::default());
        }
    }

    #[tokio::test]
    async fn test_policy_follows_configured_value_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.storage.preferences = config.storage.preferences.with_max_value_len(64);
        let container = RelayContainer::new(config).await.unwrap();

        assert!(container.handoff.policy().fits_in_preferences(64));
        assert!(!container.handoff.policy().fits_in_preferences(65));
    }
}
