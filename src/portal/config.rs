//! Server configuration
//!
//! Loaded from an optional JSON file; every field has a default so an empty
//! object (or no file at all) yields a working configuration.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortalConfig {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Page size used when a listing request does not name one
    pub default_page_size: u32,
    /// Upper bound for requested page sizes
    pub max_page_size: u32,
    /// Prefix of map links, followed by `lat,lon`
    pub map_link_base: String,
    /// Decimal places in geo-tag display strings and map links
    pub coordinate_precision: usize,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("works_portal.db"),
            default_page_size: 20,
            max_page_size: 100,
            map_link_base: "https://www.google.com/maps?q=".to_string(),
            coordinate_precision: 6,
        }
    }
}

impl PortalConfig {
    /// Read a config file, or return the defaults when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Self::from_json(&text)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.max_page_size >= 1, "max_page_size must be at least 1");
        anyhow::ensure!(
            (1..=self.max_page_size).contains(&self.default_page_size),
            "default_page_size must be between 1 and max_page_size ({})",
            self.max_page_size
        );
        anyhow::ensure!(self.coordinate_precision <= 15, "coordinate_precision must be at most 15");
        Ok(())
    }

    /// Clamp a requested page size into `1..=max_page_size`
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size)
    }
}
