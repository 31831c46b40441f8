//! CLI command implementations.
//!
//! Every command reads from a [`MemorySnapshot`] file; nothing here attaches
//! to a live process.

pub mod bone;
pub mod camera;
pub mod dump;
pub mod hex_utils;
pub mod hexdump;
pub mod init_config;
pub mod offsets;
pub mod player;
pub mod project;
pub mod scan;
pub mod visibility;

use anyhow::{Context, Result};
use scry_core::MemorySnapshot;
use std::path::Path;

/// Load the snapshot named by `--snapshot`
pub fn open_snapshot(path: Option<&Path>) -> Result<MemorySnapshot> {
    let path = path.context("No snapshot given (use --snapshot or SCRY_SNAPSHOT)")?;
    MemorySnapshot::load(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))
}
