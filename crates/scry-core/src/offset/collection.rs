use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::memory::layout::{mesh, player, view};

/// Byte offsets of every foreign field the engine reads.
///
/// Missing fields in a loaded file fall back to the built-in layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetTable {
    pub version: String,

    // LocalPlayers / ViewState
    pub view_state_array: u64,
    pub view_projection: u64,
    pub field_of_view: u64,

    // Skeletal mesh
    pub bone_array: u64,
    pub bone_array_cache: u64,
    pub component_to_world: u64,
    pub last_submit_time_on_screen: u64,

    // PlayerState
    pub player_name: u64,
    pub name_data: u64,
    pub name_length: u64,
    pub platform: u64,
}

impl Default for OffsetTable {
    fn default() -> Self {
        Self {
            version: "builtin".to_string(),
            view_state_array: view::VIEW_STATE_ARRAY,
            view_projection: view::VIEW_PROJECTION,
            field_of_view: view::FIELD_OF_VIEW,
            bone_array: mesh::BONE_ARRAY,
            bone_array_cache: mesh::BONE_ARRAY_CACHE,
            component_to_world: mesh::COMPONENT_TO_WORLD,
            last_submit_time_on_screen: mesh::LAST_SUBMIT_TIME_ON_SCREEN,
            player_name: player::NAME,
            name_data: player::NAME_DATA,
            name_length: player::NAME_LENGTH,
            platform: player::PLATFORM,
        }
    }
}

impl OffsetTable {
    fn fields(&self) -> [(&'static str, u64); 11] {
        [
            ("view_state_array", self.view_state_array),
            ("view_projection", self.view_projection),
            ("field_of_view", self.field_of_view),
            ("bone_array", self.bone_array),
            ("bone_array_cache", self.bone_array_cache),
            ("component_to_world", self.component_to_world),
            ("last_submit_time_on_screen", self.last_submit_time_on_screen),
            ("player_name", self.player_name),
            ("name_data", self.name_data),
            ("name_length", self.name_length),
            ("platform", self.platform),
        ]
    }

    pub fn is_valid(&self) -> bool {
        !self.version.is_empty() && self.fields().iter().all(|(_, v)| *v != 0)
    }

    /// Like [`is_valid`](Self::is_valid) but names the first bad field
    pub fn validate(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(Error::InvalidOffset("version is empty".to_string()));
        }
        match self.fields().iter().find(|(_, v)| *v == 0) {
            Some((name, _)) => Err(Error::InvalidOffset(format!("{} is zero", name))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let table = OffsetTable::default();
        assert!(table.is_valid());
        assert!(table.validate().is_ok());
        assert_eq!(table.view_state_array, 0xD0);
        assert_eq!(table.view_projection, 0x900);
        assert_eq!(table.field_of_view, 0x700);
    }

    #[test]
    fn test_zero_field_is_invalid() {
        let table = OffsetTable {
            component_to_world: 0,
            ..Default::default()
        };
        assert!(!table.is_valid());
        match table.validate() {
            Err(Error::InvalidOffset(msg)) => assert!(msg.contains("component_to_world")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let table: OffsetTable =
            serde_json::from_str(r#"{"version":"v31.10","bone_array":1500}"#).unwrap();
        assert_eq!(table.version, "v31.10");
        assert_eq!(table.bone_array, 1500);
        assert_eq!(table.player_name, player::NAME);
    }
}
