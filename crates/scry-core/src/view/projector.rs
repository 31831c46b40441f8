use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::{Matrix4, Vector2, Vector3};
use crate::memory::{ReadMemory, RemoteAddress};
use crate::offset::OffsetTable;

use super::{CameraExtractor, CameraModel};

/// Closest view-space depth used as the projection divisor
pub const MIN_DEPTH: f64 = 1.0;

/// Output surface size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= f64::from(self.width)
            && point.y <= f64::from(self.height)
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// A projected point with its view-space depth.
///
/// Points behind the camera still get finite coordinates (depth is clamped to
/// [`MIN_DEPTH`]); check [`is_in_front`](Self::is_in_front) before drawing.
/// A non-finite input or result is never in front and never on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub screen: Vector2,
    /// Depth after clamping; never below [`MIN_DEPTH`]
    pub depth: f64,
    in_front: bool,
    valid: bool,
}

impl Projection {
    /// Finite screen coordinates and depth
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_in_front(&self) -> bool {
        self.valid && self.in_front
    }

    /// In front of the camera and inside the screen rectangle
    pub fn is_on_screen(&self, screen: ScreenSize) -> bool {
        self.is_in_front() && screen.contains(self.screen)
    }
}

/// Camera-relative coordinates: x right, y up, z forward (unclamped)
fn view_space(camera: &CameraModel, point: Vector3) -> Vector3 {
    let basis = Matrix4::from_rotation(camera.rotation, Vector3::ZERO);
    let (axis_x, axis_y, axis_z) = basis.axes();
    let delta = point - camera.location;
    Vector3::new(delta.dot(axis_y), delta.dot(axis_z), delta.dot(axis_x))
}

fn fov_tan(camera: &CameraModel) -> f64 {
    (camera.fov * std::f64::consts::PI / 360.0).tan()
}

/// World-to-screen projection for a fixed output size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    screen: ScreenSize,
}

impl Projector {
    pub fn new(screen: ScreenSize) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Full-resolution projection keeping the clamped depth
    pub fn project_with_depth(&self, camera: &CameraModel, point: Vector3) -> Projection {
        let view = view_space(camera, point);
        let depth = view.z.max(MIN_DEPTH);

        let center = self.screen.center();
        let fov_factor = center.x / fov_tan(camera);
        let screen = Vector2::new(
            center.x + view.x * fov_factor / depth,
            center.y - view.y * fov_factor / depth,
        );

        Projection {
            screen,
            depth,
            in_front: view.z >= MIN_DEPTH,
            valid: point.is_valid() && screen.is_valid() && depth.is_finite(),
        }
    }

    /// Full-resolution pixel coordinates; may be non-finite for a degenerate
    /// camera or point, use [`project_with_depth`](Self::project_with_depth)
    /// to check
    pub fn project(&self, camera: &CameraModel, point: Vector3) -> Vector2 {
        self.project_with_depth(camera, point).screen
    }

    /// Half-resolution convention for the secondary overlay: centred on
    /// (width/4, height/4), each axis scaled by its own quarter extent.
    /// `z` is always 0.
    pub fn project_half(&self, camera: &CameraModel, point: Vector3) -> Vector3 {
        let view = view_space(camera, point);
        let depth = view.z.max(MIN_DEPTH);

        let quarter_w = f64::from(self.screen.width) / 4.0;
        let quarter_h = f64::from(self.screen.height) / 4.0;
        let tan = fov_tan(camera);

        Vector3::new(
            quarter_w + view.x * (quarter_w / tan) / depth,
            quarter_h - view.y * (quarter_h / tan) / depth,
            0.0,
        )
    }

    /// Extract a fresh camera and project with it in one call.
    ///
    /// Nothing is cached between calls, so concurrent callers never observe
    /// each other's camera. A projection that is not finite is an error.
    pub fn project_live<R: ReadMemory>(
        &self,
        reader: &R,
        offsets: &OffsetTable,
        local_players: RemoteAddress,
        point: Vector3,
    ) -> Result<Projection> {
        let camera = CameraExtractor::new(reader, offsets).extract(local_players)?;
        let projection = self.project_with_depth(&camera, point);
        if !projection.is_valid() {
            return Err(Error::NonFiniteValue { what: "projection" });
        }
        Ok(projection)
    }

    pub fn project_half_live<R: ReadMemory>(
        &self,
        reader: &R,
        offsets: &OffsetTable,
        local_players: RemoteAddress,
        point: Vector3,
    ) -> Result<Vector3> {
        let camera = CameraExtractor::new(reader, offsets).extract(local_players)?;
        let projected = self.project_half(&camera, point);
        if !point.is_valid() || !projected.is_valid() {
            return Err(Error::NonFiniteValue { what: "projection" });
        }
        Ok(projected)
    }
}
