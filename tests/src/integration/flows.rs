//! # Handoff Flows
//!
//! A profile page hands a user to a detail page, over each channel, through
//! the same wiring the runtime binary uses.
//!
//! ## Flows Tested
//!
//! 1. **Global bus**: `get_instance` handles in two pages see one store
//! 2. **Container**: every channel delivers the user, absent data shows defaults
//! 3. **Restart**: only the preferences channel survives a new container
//! 4. **Shared link**: a route copied into another process still decodes
//! 5. **Truncation**: a route cut by the router degrades to defaults

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use pr_02_route_params::RouteParamCodec;
    use relay_runtime::{Channel, RelayConfig, RelayContainer};
    use relay_telemetry::HANDOFFS;
    use shared_bus::{DataBus, USER_INFO};
    use shared_types::{Payload, UserInfo};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn john() -> UserInfo {
        UserInfo::new("John Doe", 28)
    }

    fn config_in(dir: &Path) -> RelayConfig {
        let mut config = RelayConfig::default();
        config.storage.data_dir = dir.to_path_buf();
        config
    }

    // =============================================================================
    // GLOBAL BUS
    // =============================================================================

    #[test]
    fn test_user_info_between_pages_via_global_bus() {
        // Page A
        let sender = DataBus::get_instance();
        sender.set("flows.userInfo", UserInfo::new("John Doe", 28));

        // Page B, obtaining its own handle
        let receiver = DataBus::get_instance();
        assert!(Arc::ptr_eq(&sender, &receiver));

        let value = receiver.get("flows.userInfo").unwrap();
        let user: UserInfo = value.extract().unwrap();
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.age, 28);

        receiver.remove("flows.userInfo");
        assert!(sender.get("flows.userInfo").is_none());
    }

    #[test]
    fn test_never_set_key_is_absent_on_global_bus() {
        let bus = DataBus::get_instance();
        assert!(bus.get("flows.neverSet").is_none());
        bus.remove("flows.neverSet");
        assert!(bus.get("flows.neverSet").is_none());
    }

    // =============================================================================
    // CONTAINER FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_every_channel_delivers_user() {
        let dir = tempfile::tempdir().unwrap();
        let container = RelayContainer::new(config_in(dir.path())).await.unwrap();
        let profile = container.profile_page();
        let detail = container.detail_page();

        for channel in Channel::ALL {
            profile.open_detail(&john(), channel).await.unwrap();
            assert_eq!(detail.on_show(channel).await, john(), "channel {channel}");
            container.navigator.back();
        }
        assert_eq!(container.navigator.depth(), 0);
    }

    #[tokio::test]
    async fn test_handoffs_are_counted_per_channel() {
        let dir = tempfile::tempdir().unwrap();
        let container = RelayContainer::new(config_in(dir.path())).await.unwrap();
        let before = HANDOFFS.with_label_values(&["route_params", "receive"]).get();

        container
            .profile_page()
            .open_detail(&john(), Channel::RouteParams)
            .await
            .unwrap();
        container.detail_page().on_show(Channel::RouteParams).await;

        let after = HANDOFFS.with_label_values(&["route_params", "receive"]).get();
        assert!(after >= before + 1.0);
    }

    #[tokio::test]
    async fn test_wrong_type_on_bus_shows_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let container = RelayContainer::new(config_in(dir.path())).await.unwrap();

        container.bus.set(USER_INFO.name(), Payload::Integer(28));
        assert_eq!(container.detail_page().on_show(Channel::Bus).await, UserInfo::default());
        // The mismatched value was still consumed.
        assert!(!container.bus.contains(USER_INFO.name()));
    }

    // =============================================================================
    // RESTART
    // =============================================================================

    #[tokio::test]
    async fn test_only_preferences_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let container = RelayContainer::new(config_in(dir.path())).await.unwrap();
            let profile = container.profile_page();
            profile.open_detail(&john(), Channel::Bus).await.unwrap();
            profile.open_detail(&john(), Channel::Preferences).await.unwrap();
            container.shutdown().await.unwrap();
        }

        let restarted = RelayContainer::new(config_in(dir.path())).await.unwrap();
        let detail = restarted.detail_page();
        assert_eq!(detail.on_show(Channel::Bus).await, UserInfo::default());
        assert_eq!(detail.on_show(Channel::Preferences).await, john());
    }

    // =============================================================================
    // ROUTES
    // =============================================================================

    #[tokio::test]
    async fn test_shared_link_opens_in_another_container() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();

        let sender = RelayContainer::new(config_in(a.path())).await.unwrap();
        let link = sender
            .profile_page()
            .open_detail(&john(), Channel::RouteParams)
            .await
            .unwrap()
            .url;

        let receiver = RelayContainer::new(config_in(b.path())).await.unwrap();
        receiver.navigator.push(&link);
        assert_eq!(receiver.detail_page().on_show(Channel::RouteParams).await, john());
    }

    #[tokio::test]
    async fn test_truncated_route_shows_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.params.max_url_bytes = 48;
        let container = RelayContainer::new(config).await.unwrap();

        // Built against a laxer limit than this router applies.
        let url = RouteParamCodec::default()
            .url("pages/Detail")
            .param(USER_INFO.name(), &Payload::from(john()))
            .unwrap()
            .build()
            .unwrap()
            .to_string();
        let navigation = container.navigator.push(&url);

        assert!(navigation.truncated);
        assert_eq!(
            container.detail_page().on_show(Channel::RouteParams).await,
            UserInfo::default()
        );
    }

    #[tokio::test]
    async fn test_oversize_route_handoff_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.params.max_url_bytes = 48;
        let container = RelayContainer::new(config).await.unwrap();

        let result = container
            .profile_page()
            .open_detail(&john(), Channel::RouteParams)
            .await;
        assert!(result.is_err());
        assert_eq!(container.navigator.current(), None);
    }
}
