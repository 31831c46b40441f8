//! Dump command implementation.

use anyhow::Result;
use scry_core::{FrameDump, MemorySnapshot, OffsetTable, RemoteAddress};
use std::path::Path;

/// Run the dump command
pub fn run(
    snapshot: &MemorySnapshot,
    offsets: &OffsetTable,
    local_players: RemoteAddress,
    output: Option<&Path>,
) -> Result<()> {
    let dump = FrameDump::capture(snapshot, offsets, local_players);

    if let Some(path) = output {
        dump.save(path)?;
        println!("Dump saved to: {}", path.display());
    } else {
        println!("{}", serde_json::to_string_pretty(&dump)?);
    }

    Ok(())
}
