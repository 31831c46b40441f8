//! Scan command implementation.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use scry_core::{
    EntityScanner, FrameContext, MemorySnapshot, OffsetTable, RemoteAddress, ScreenSize,
};

/// Run the scan command
pub fn run(
    snapshot: &MemorySnapshot,
    offsets: &OffsetTable,
    local_players: RemoteAddress,
    screen: ScreenSize,
    meshes: &[RemoteAddress],
    bone: u32,
    json: bool,
) -> Result<()> {
    let frame = FrameContext::capture(snapshot, offsets, local_players, screen)
        .context("Failed to decode camera")?;
    let samples = EntityScanner::new(snapshot, offsets, &frame).scan(meshes, bone);

    if json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("=== {} of {} meshes resolved ===", samples.len(), meshes.len()).bold()
    );
    for sample in &samples {
        let marker = if sample.projection.is_on_screen(screen) {
            "*".green().to_string()
        } else {
            "-".dimmed().to_string()
        };
        println!(
            "{} [{}] {} world=({:.1}, {:.1}, {:.1}) screen=({:.1}, {:.1}) depth={:.1}",
            marker,
            sample.index,
            sample.mesh,
            sample.world.x,
            sample.world.y,
            sample.world.z,
            sample.projection.screen.x,
            sample.projection.screen.y,
            sample.projection.depth
        );
    }

    Ok(())
}
