//! Visibility command implementation.
//!
//! Feeds each snapshot to one tracker in order, the way a live overlay would
//! query once per frame.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use scry_core::{MemorySnapshot, OffsetTable, RemoteAddress, VisibilityTracker};
use std::path::PathBuf;
use tracing::warn;

/// Run the visibility command
pub fn run(offsets: &OffsetTable, meshes: &[RemoteAddress], frames: &[PathBuf]) -> Result<()> {
    let mut tracker = VisibilityTracker::new();

    for (frame, path) in frames.iter().enumerate() {
        let snapshot = MemorySnapshot::load(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

        println!("{}", format!("Frame {} ({})", frame, path.display()).bold());
        for mesh in meshes {
            match tracker.is_visible(&snapshot, offsets, *mesh) {
                Ok(true) => println!("  {} {}", mesh, "visible".green()),
                Ok(false) => println!("  {} {}", mesh, "hidden".dimmed()),
                Err(e) => warn!("Mesh {} in frame {}: {}", mesh, frame, e),
            }
        }
    }

    println!();
    for record in tracker.records() {
        println!(
            "{} last submit time {:.3}",
            record.mesh, record.last_submit_time
        );
    }

    Ok(())
}
