use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::math::Vector3;
use crate::memory::{ReadMemory, RemoteAddress};
use crate::offset::OffsetTable;
use crate::view::{FrameContext, Projection};

use super::BoneResolver;

/// One resolved and projected entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntitySample {
    /// Position in the input mesh list
    pub index: usize,
    pub mesh: RemoteAddress,
    pub world: Vector3,
    pub projection: Projection,
}

/// Resolves one bone per mesh and projects it with a frame's camera
pub struct EntityScanner<'a, R: ReadMemory> {
    bones: BoneResolver<'a, R>,
    frame: &'a FrameContext,
}

impl<'a, R: ReadMemory> EntityScanner<'a, R> {
    pub fn new(reader: &'a R, offsets: &'a OffsetTable, frame: &'a FrameContext) -> Self {
        Self {
            bones: BoneResolver::new(reader, offsets),
            frame,
        }
    }

    pub fn sample(&self, index: usize, mesh: RemoteAddress, bone: u32) -> Result<EntitySample> {
        let world = self.bones.resolve_bone_world_position(mesh, bone)?;
        let projection = self.frame.project_with_depth(world);
        if !projection.is_valid() {
            return Err(Error::NonFiniteValue { what: "projection" });
        }
        Ok(EntitySample {
            index,
            mesh,
            world,
            projection,
        })
    }

    /// Sample every mesh, skipping those whose reads fail
    pub fn scan(&self, meshes: &[RemoteAddress], bone: u32) -> Vec<EntitySample> {
        let samples: Vec<_> = meshes
            .iter()
            .enumerate()
            .filter_map(|(index, &mesh)| match self.sample(index, mesh, bone) {
                Ok(sample) => Some(sample),
                Err(e) => {
                    debug!("Skipping mesh {} ({}): {}", index, mesh, e);
                    None
                }
            })
            .collect();

        debug!("Scanned {}/{} meshes", samples.len(), meshes.len());
        samples
    }
}
