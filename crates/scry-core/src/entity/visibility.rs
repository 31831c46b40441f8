use std::collections::HashMap;

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::memory::{ReadMemory, RemoteAddress};
use crate::offset::OffsetTable;

/// Last render time seen for one mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibilityRecord {
    pub mesh: RemoteAddress,
    pub last_submit_time: f32,
}

/// Infers visibility from the engine's "last submitted for rendering" stamp.
///
/// A mesh counts as visible when its stamp advanced since the previous query.
/// The first query for a mesh only records the stamp and reports not visible.
/// Records are never evicted.
#[derive(Debug, Default)]
pub struct VisibilityTracker {
    records: HashMap<RemoteAddress, f32>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a timestamp already read for `mesh`
    pub fn observe(&mut self, mesh: RemoteAddress, timestamp: f32) -> bool {
        match self.records.get_mut(&mesh) {
            None => {
                self.records.insert(mesh, timestamp);
                false
            }
            Some(last) => {
                if timestamp != 0.0 && timestamp > *last {
                    *last = timestamp;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn is_visible<R: ReadMemory>(
        &mut self,
        reader: &R,
        offsets: &OffsetTable,
        mesh: RemoteAddress,
    ) -> Result<bool> {
        if mesh.is_null() {
            return Err(Error::NullPointer { what: "mesh" });
        }
        let timestamp = reader.read_f32(mesh.offset(offsets.last_submit_time_on_screen).raw())?;
        if !timestamp.is_finite() {
            return Err(Error::NonFiniteValue {
                what: "render timestamp",
            });
        }

        let visible = self.observe(mesh, timestamp);
        trace!("mesh {} stamp={} visible={}", mesh, timestamp, visible);
        Ok(visible)
    }

    pub fn last_timestamp(&self, mesh: RemoteAddress) -> Option<f32> {
        self.records.get(&mesh).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of every tracked mesh, ordered by address
    pub fn records(&self) -> Vec<VisibilityRecord> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .map(|(&mesh, &last_submit_time)| VisibilityRecord {
                mesh,
                last_submit_time,
            })
            .collect();
        records.sort_by_key(|r| r.mesh.raw());
        records
    }
}
