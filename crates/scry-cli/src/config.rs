//! Configuration file for the scry CLI

use anyhow::{Context, Result};
use scry_core::{OffsetTable, ScreenSize, load_offsets};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Offset table file; the built-in table is used when unset
    pub offsets: Option<PathBuf>,

    pub screen: ScreenSize,
}

impl Config {
    /// Load configuration, falling back to defaults when the file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        width: Option<u32>,
        height: Option<u32>,
        offsets: Option<PathBuf>,
    ) -> Self {
        if let Some(width) = width {
            self.screen.width = width;
        }
        if let Some(height) = height {
            self.screen.height = height;
        }
        if offsets.is_some() {
            self.offsets = offsets;
        }
        self
    }

    pub fn offset_table(&self) -> Result<OffsetTable> {
        match &self.offsets {
            Some(path) => load_offsets(path)
                .with_context(|| format!("Failed to load offsets from {}", path.display())),
            None => Ok(OffsetTable::default()),
        }
    }
}
