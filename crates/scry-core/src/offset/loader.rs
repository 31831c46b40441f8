use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::offset::OffsetTable;

/// Load an offset table from a JSON file.
///
/// A table that fails validation is still returned; zero offsets are reported
/// so a stale file is visible in the logs rather than silently reading address 0.
pub fn load_offsets<P: AsRef<Path>>(path: P) -> Result<OffsetTable> {
    let content = fs::read_to_string(&path)?;
    let table: OffsetTable = serde_json::from_str(&content)?;
    if let Err(e) = table.validate() {
        warn!("Offsets in {}: {}", path.as_ref().display(), e);
    }
    debug!(
        "Loaded offsets version {} from {}",
        table.version,
        path.as_ref().display()
    );
    Ok(table)
}

pub fn save_offsets<P: AsRef<Path>>(path: P, table: &OffsetTable) -> Result<()> {
    let content = serde_json::to_string_pretty(table)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_and_load_offsets() {
        let temp_file = NamedTempFile::new().unwrap();

        let table = OffsetTable {
            version: "++Fortnite+Release-31.10".to_string(),
            bone_array: 0x5A8,
            ..Default::default()
        };
        save_offsets(temp_file.path(), &table).unwrap();

        let loaded = load_offsets(temp_file.path()).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_offsets("/nonexistent/offsets.json").unwrap_err();
        assert!(err.is_not_found());
    }
}
