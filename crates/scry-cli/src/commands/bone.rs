//! Bone command implementation.

use anyhow::{Context, Result};
use scry_core::{BoneResolver, MemorySnapshot, OffsetTable, RemoteAddress};

/// Run the bone command
pub fn run(
    snapshot: &MemorySnapshot,
    offsets: &OffsetTable,
    mesh: RemoteAddress,
    bones: &[u32],
) -> Result<()> {
    let resolver = BoneResolver::new(snapshot, offsets);
    let array = resolver
        .bone_array(mesh)
        .with_context(|| format!("Failed to locate bone array for mesh {}", mesh))?;
    let positions = resolver
        .resolve_bones(mesh, bones)
        .context("Failed to resolve bones")?;

    println!("Mesh {} (bones at {})", mesh, array);
    for (index, position) in bones.iter().zip(&positions) {
        println!(
            "  [{:>3}] ({:.2}, {:.2}, {:.2})",
            index, position.x, position.y, position.z
        );
    }

    Ok(())
}
