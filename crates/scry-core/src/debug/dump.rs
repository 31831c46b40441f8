use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::memory::{ReadMemory, RemoteAddress};
use crate::offset::OffsetTable;
use crate::view::{CameraExtractor, CameraModel};

/// Bytes read at one address, hex formatted
#[derive(Debug, Clone, Serialize)]
pub struct MemorySample {
    pub label: String,
    pub address: String,
    pub bytes: String,
}

/// Camera chain dump for diagnosing stale offsets
#[derive(Debug, Clone, Serialize)]
pub struct FrameDump {
    pub version: String,
    pub local_players: String,
    pub view_state: Option<String>,
    pub camera: Option<CameraModel>,
    pub errors: Vec<String>,
    pub samples: Vec<MemorySample>,
}

impl FrameDump {
    const SAMPLE_SIZE: usize = 32;

    /// Walk the camera chain as far as it goes, recording failures instead of stopping
    pub fn capture<R: ReadMemory>(
        reader: &R,
        offsets: &OffsetTable,
        local_players: RemoteAddress,
    ) -> Self {
        let extractor = CameraExtractor::new(reader, offsets);
        let mut errors = Vec::new();
        let mut samples = vec![Self::sample(
            reader,
            "view_state_array",
            local_players.offset(offsets.view_state_array),
        )];

        let view_state = match extractor.view_state(local_players) {
            Ok(address) => Some(address),
            Err(e) => {
                errors.push(format!("view state: {}", e));
                None
            }
        };

        let camera = view_state.and_then(|view_state| {
            samples.push(Self::sample(
                reader,
                "view_projection",
                view_state.offset(offsets.view_projection),
            ));
            samples.push(Self::sample(
                reader,
                "field_of_view",
                view_state.offset(offsets.field_of_view),
            ));
            match extractor.extract(local_players) {
                Ok(camera) => Some(camera),
                Err(e) => {
                    errors.push(format!("camera: {}", e));
                    None
                }
            }
        });

        Self {
            version: offsets.version.clone(),
            local_players: local_players.to_string(),
            view_state: view_state.map(|a| a.to_string()),
            camera,
            errors,
            samples,
        }
    }

    fn sample<R: ReadMemory>(reader: &R, label: &str, address: RemoteAddress) -> MemorySample {
        let bytes = if address.is_null() {
            "(address is 0)".to_string()
        } else {
            match reader.read_bytes(address.raw(), Self::SAMPLE_SIZE) {
                Ok(bytes) => bytes
                    .iter()
                    .map(|b| format!("{:02X}", b))
                    .collect::<Vec<_>>()
                    .join(" "),
                Err(_) => "(read failed)".to_string(),
            }
        };
        MemorySample {
            label: label.to_string(),
            address: address.to_string(),
            bytes,
        }
    }

    /// Save dump to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
