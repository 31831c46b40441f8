//! Offsets command implementation.

use anyhow::{Context, Result};
use scry_core::{OffsetTable, save_offsets};
use std::path::Path;

/// Run the offsets command
pub fn run(offsets: &OffsetTable, output: &Path) -> Result<()> {
    save_offsets(output, offsets)
        .with_context(|| format!("Failed to write offsets to {}", output.display()))?;
    println!(
        "Offsets (version {}) written to: {}",
        offsets.version,
        output.display()
    );
    Ok(())
}
