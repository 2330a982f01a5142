//! # Page-Relay Runtime
//!
//! Runs the profile → detail handoff once over every channel.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging and metrics
//! 3. Build the container (one data bus, the preferences store, the router)
//! 4. Run the demo flow
//! 5. Flush preferences and exit

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use relay_runtime::{load_config, Channel, RelayConfig, RelayContainer};
use shared_types::UserInfo;

/// Drives the demo pages over a wired container.
pub struct RelayRuntime {
    container: Arc<RelayContainer>,
}

impl RelayRuntime {
    pub async fn new(config: RelayConfig) -> Result<Self> {
        let container = RelayContainer::new(config)
            .await
            .context("Failed to open preferences store")?;
        Ok(Self {
            container: Arc::new(container),
        })
    }

    /// Hand one user to the detail page over each channel.
    pub async fn run(&self) -> Result<()> {
        info!("===========================================");
        info!("  Page-Relay Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let user = UserInfo::new("John Doe", 28);
        let profile = self.container.profile_page();
        let detail = self.container.detail_page();

        for channel in Channel::ALL {
            profile
                .open_detail(&user, channel)
                .await
                .with_context(|| format!("Failed to hand off over {channel}"))?;
            let shown = detail.on_show(channel).await;
            if shown == user {
                info!(%channel, name = %shown.name, age = shown.age, "Detail page received user");
            } else {
                warn!(%channel, "Detail page fell back to defaults");
            }
            self.container.navigator.back();
        }

        let stats = self.container.bus.stats();
        info!(
            writes = stats.writes,
            reads = stats.reads,
            hits = stats.hits,
            misses = stats.misses,
            "Bus activity"
        );
        Ok(())
    }

    /// Flush preferences and release the store lock.
    pub async fn shutdown(&self) -> Result<()> {
        info!("Initiating graceful shutdown...");
        self.container
            .shutdown()
            .await
            .context("Failed to flush preferences")?;
        info!("Shutdown complete");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config();
    config.validate().context("Invalid configuration")?;

    let _telemetry =
        relay_telemetry::init_telemetry(&config.telemetry).context("Failed to initialize telemetry")?;

    let runtime = RelayRuntime::new(config).await?;
    runtime.run().await?;
    runtime.shutdown().await?;

    match relay_telemetry::encode_metrics() {
        Ok(text) => debug!(metrics = %text, "Final metrics"),
        Err(e) => warn!(error = %e, "Failed to encode metrics"),
    }
    Ok(())
}
