//! Server state management for the portal server

use crate::portal::config::PortalConfig;
use crate::portal::store::Store;
use anyhow::Context;

/// Everything a request handler may touch: the database and the settings
pub struct PortalState {
    pub store: Store,
    pub config: PortalConfig,
}

impl PortalState {
    pub fn new(store: Store, config: PortalConfig) -> Self {
        Self { store, config }
    }

    /// Open the database named by the config
    pub fn open(config: PortalConfig) -> anyhow::Result<Self> {
        let store = Store::open(&config.database_path)
            .with_context(|| format!("failed to open database {}", config.database_path.display()))?;
        Ok(Self::new(store, config))
    }

    pub fn in_memory(config: PortalConfig) -> anyhow::Result<Self> {
        let store = Store::open_in_memory().context("failed to open in-memory database")?;
        Ok(Self::new(store, config))
    }
}
