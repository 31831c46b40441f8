//! Project command implementation.

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use scry_core::{FrameContext, MemorySnapshot, OffsetTable, RemoteAddress, ScreenSize, Vector3};

use super::camera::print_camera;

/// Run the project command
pub fn run(
    snapshot: &MemorySnapshot,
    offsets: &OffsetTable,
    local_players: RemoteAddress,
    screen: ScreenSize,
    point: Vector3,
    half: bool,
) -> Result<()> {
    let frame = FrameContext::capture(snapshot, offsets, local_players, screen)
        .context("Failed to decode camera")?;

    print_camera(frame.camera());
    println!("Screen:   {}x{}", screen.width, screen.height);
    println!();

    if half {
        let p = frame.project_half(point);
        if !p.is_valid() {
            bail!("Projection of ({}, {}, {}) is not finite", point.x, point.y, point.z);
        }
        println!("Half-resolution: ({:.2}, {:.2})", p.x, p.y);
        return Ok(());
    }

    let p = frame.project_with_depth(point);
    if !p.is_valid() {
        bail!("Projection of ({}, {}, {}) is not finite", point.x, point.y, point.z);
    }
    let status = if p.is_on_screen(screen) {
        "on screen".green().to_string()
    } else if p.is_in_front() {
        "off screen".yellow().to_string()
    } else {
        "behind camera".red().to_string()
    };
    println!(
        "Screen: ({:.2}, {:.2}) depth={:.2} [{}]",
        p.screen.x, p.screen.y, p.depth, status
    );

    Ok(())
}
