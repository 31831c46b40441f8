//! Camera command implementation.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use scry_core::{CameraExtractor, CameraModel, MemorySnapshot, OffsetTable, RemoteAddress};

pub fn print_camera(camera: &CameraModel) {
    println!(
        "Location: ({:.2}, {:.2}, {:.2})",
        camera.location.x, camera.location.y, camera.location.z
    );
    println!(
        "Rotation: pitch={:.3} yaw={:.3} roll={:.3}",
        camera.rotation.x, camera.rotation.y, camera.rotation.z
    );
    println!("FOV:      {:.3}", camera.fov);
}

/// Run the camera command
pub fn run(
    snapshot: &MemorySnapshot,
    offsets: &OffsetTable,
    local_players: RemoteAddress,
) -> Result<()> {
    let extractor = CameraExtractor::new(snapshot, offsets);
    let view_state = extractor
        .view_state(local_players)
        .with_context(|| format!("Failed to locate view state from {}", local_players))?;
    let camera = extractor
        .extract(local_players)
        .context("Failed to decode camera")?;

    println!("{}", "=== Camera ===".bold());
    println!("View state: {}", view_state.cyan());
    print_camera(&camera);

    Ok(())
}
