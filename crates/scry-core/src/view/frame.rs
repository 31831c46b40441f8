use crate::error::Result;
use crate::math::{Vector2, Vector3};
use crate::memory::{ReadMemory, RemoteAddress};
use crate::offset::OffsetTable;

use super::{CameraExtractor, CameraModel, Projection, Projector, ScreenSize};

/// Camera and projector captured once for a single rendered frame.
///
/// Every projection made through one context uses the same camera, so the
/// caller decides when a new frame begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    camera: CameraModel,
    projector: Projector,
}

impl FrameContext {
    pub fn new(camera: CameraModel, screen: ScreenSize) -> Self {
        Self {
            camera,
            projector: Projector::new(screen),
        }
    }

    pub fn capture<R: ReadMemory>(
        reader: &R,
        offsets: &OffsetTable,
        local_players: RemoteAddress,
        screen: ScreenSize,
    ) -> Result<Self> {
        let camera = CameraExtractor::new(reader, offsets).extract(local_players)?;
        Ok(Self::new(camera, screen))
    }

    pub fn camera(&self) -> &CameraModel {
        &self.camera
    }

    pub fn screen(&self) -> ScreenSize {
        self.projector.screen()
    }

    pub fn project(&self, point: Vector3) -> Vector2 {
        self.projector.project(&self.camera, point)
    }

    pub fn project_with_depth(&self, point: Vector3) -> Projection {
        self.projector.project_with_depth(&self.camera, point)
    }

    pub fn project_half(&self, point: Vector3) -> Vector3 {
        self.projector.project_half(&self.camera, point)
    }
}
