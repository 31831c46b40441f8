//! Player command implementation.

use anyhow::{Context, Result};
use scry_core::{IdentityReader, MemorySnapshot, OffsetTable, RemoteAddress};

/// Run the player command
pub fn run(
    snapshot: &MemorySnapshot,
    offsets: &OffsetTable,
    player_state: RemoteAddress,
) -> Result<()> {
    let identity = IdentityReader::new(snapshot, offsets);
    let name = identity
        .read_player_name(player_state)
        .context("Failed to read player name")?;
    let platform = identity
        .read_platform(player_state)
        .context("Failed to read platform")?;

    println!("Name:     {}", name);
    println!("Platform: {} ({})", platform.display_name(), platform);

    Ok(())
}
