use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::math::{Matrix4, Vector3};
use crate::memory::layout::view::ACTIVE_VIEW_STATE_INDEX;
use crate::memory::{ByteBuffer, ReadMemory, RemoteAddress, RemoteArray, RemoteValue};
use crate::offset::OffsetTable;

/// `FPlane`: a vector plus `w`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3,
    pub w: f64,
}

impl Plane {
    pub const MEMORY_SIZE: usize = 0x20;
}

impl RemoteValue for Plane {
    const MEMORY_SIZE: usize = Plane::MEMORY_SIZE;

    fn decode(buf: &ByteBuffer<'_>) -> Result<Self> {
        Ok(Plane {
            normal: Vector3::decode(&buf.slice(0, Vector3::MEMORY_SIZE)?)?,
            w: buf.read_f64_at(Vector3::MEMORY_SIZE)?,
        })
    }
}

/// View-state block the camera is decoded from.
///
/// ```text
/// 0x00  matrix   4x4 f64       row 3 holds the camera location
/// 0x80  planes   4 × Plane     X/Y/Z plane `w` terms encode pitch and yaw
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewProjection {
    pub matrix: Matrix4,
    pub planes: [Plane; 4],
}

impl ViewProjection {
    pub const PLANES_OFFSET: usize = 0x80;
    pub const MEMORY_SIZE: usize = 0x100;

    pub fn x_plane(&self) -> &Plane {
        &self.planes[0]
    }

    pub fn y_plane(&self) -> &Plane {
        &self.planes[1]
    }

    pub fn z_plane(&self) -> &Plane {
        &self.planes[2]
    }
}

impl RemoteValue for ViewProjection {
    const MEMORY_SIZE: usize = ViewProjection::MEMORY_SIZE;

    fn decode(buf: &ByteBuffer<'_>) -> Result<Self> {
        let matrix = Matrix4::decode(&buf.slice(0, Matrix4::MEMORY_SIZE)?)?;
        let mut planes = [Plane::default(); 4];
        for (i, plane) in planes.iter_mut().enumerate() {
            let offset = Self::PLANES_OFFSET + i * Plane::MEMORY_SIZE;
            *plane = Plane::decode(&buf.slice(offset, Plane::MEMORY_SIZE)?)?;
        }
        Ok(ViewProjection { matrix, planes })
    }
}

/// Camera location, rotation (pitch, yaw, roll in degrees) and horizontal FOV in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraModel {
    pub location: Vector3,
    pub rotation: Vector3,
    pub fov: f64,
}

impl CameraModel {
    /// Decode a camera from the view block and the projection term stored
    /// next to it (`1 / tan(fov / 2)`).
    ///
    /// Roll cannot be recovered from this block and is always 0. The decoded
    /// field of view must lie strictly inside (0, 180) degrees.
    pub fn from_view(view: &ViewProjection, projection_term: f64) -> Result<Self> {
        let pitch = view.z_plane().w.asin().to_degrees();
        let yaw = view.y_plane().w.atan2(view.x_plane().w).to_degrees();
        let fov = ((1.0 / projection_term).atan() * 2.0).to_degrees();

        let camera = CameraModel {
            location: view.matrix.translation(),
            rotation: Vector3::new(pitch, yaw, 0.0),
            fov,
        };
        if !(camera.location.is_valid() && camera.rotation.is_valid() && fov.is_finite()) {
            return Err(Error::NonFiniteValue { what: "camera" });
        }
        if !camera.has_usable_fov() {
            return Err(Error::InvalidFieldOfView(fov));
        }
        Ok(camera)
    }

    fn has_usable_fov(&self) -> bool {
        self.fov > 0.0 && self.fov < 180.0
    }

    /// Finite location and rotation with a field of view the projector can use
    pub fn is_valid(&self) -> bool {
        self.location.is_valid() && self.rotation.is_valid() && self.has_usable_fov()
    }
}

/// Reads the active camera out of the local player's view state
pub struct CameraExtractor<'a, R: ReadMemory> {
    reader: &'a R,
    offsets: &'a OffsetTable,
}

impl<'a, R: ReadMemory> CameraExtractor<'a, R> {
    pub fn new(reader: &'a R, offsets: &'a OffsetTable) -> Self {
        Self { reader, offsets }
    }

    /// Active view state: element 1 of the view-state array under `local_players`
    pub fn view_state(&self, local_players: RemoteAddress) -> Result<RemoteAddress> {
        if local_players.is_null() {
            return Err(Error::NullPointer {
                what: "local players",
            });
        }
        let header = local_players.offset(self.offsets.view_state_array);
        let states: RemoteArray<RemoteAddress> = self.reader.read_value(header.raw())?;
        let states = states.validated(header.raw())?;

        states
            .read(self.reader, ACTIVE_VIEW_STATE_INDEX)?
            .and_then(RemoteAddress::non_null)
            .ok_or(Error::NullPointer { what: "view state" })
    }

    pub fn read_view(&self, view_state: RemoteAddress) -> Result<ViewProjection> {
        self.reader
            .read_value(view_state.offset(self.offsets.view_projection).raw())
    }

    pub fn extract(&self, local_players: RemoteAddress) -> Result<CameraModel> {
        let view_state = self.view_state(local_players)?;
        let view = self.read_view(view_state)?;
        let projection_term = self
            .reader
            .read_f64(view_state.offset(self.offsets.field_of_view).raw())?;

        let camera = CameraModel::from_view(&view, projection_term)?;
        trace!(
            "camera at ({:.1}, {:.1}, {:.1}) pitch={:.2} yaw={:.2} fov={:.2}",
            camera.location.x,
            camera.location.y,
            camera.location.z,
            camera.rotation.x,
            camera.rotation.y,
            camera.fov
        );
        Ok(camera)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::memory::MockMemoryBuilder;

    pub const LOCAL_PLAYERS: u64 = 0x1_0000;
    pub const VIEW_STATES: u64 = 0x2_0000;
    pub const VIEW_STATE: u64 = 0x3_0000;

    /// Encode a camera the way the engine lays it out in the view state
    pub fn view_for(location: Vector3, pitch: f64, yaw: f64) -> ViewProjection {
        let mut view = ViewProjection::default();
        view.matrix.m[3] = [location.x, location.y, location.z, 1.0];
        view.planes[0].w = yaw.to_radians().cos();
        view.planes[1].w = yaw.to_radians().sin();
        view.planes[2].w = pitch.to_radians().sin();
        view
    }

    pub fn write_view(
        builder: MockMemoryBuilder,
        address: u64,
        view: &ViewProjection,
    ) -> MockMemoryBuilder {
        let mut builder = builder.write_matrix(address, &view.matrix);
        for (i, plane) in view.planes.iter().enumerate() {
            let base =
                address + (ViewProjection::PLANES_OFFSET + i * Plane::MEMORY_SIZE) as u64;
            builder = builder
                .write_vector3(base, plane.normal)
                .write_f64(base + 24, plane.w);
        }
        builder
    }

    /// Local players -> view-state array (2 entries) -> view state with the given camera
    pub fn camera_memory(
        offsets: &OffsetTable,
        location: Vector3,
        pitch: f64,
        yaw: f64,
        fov: f64,
    ) -> MockMemoryBuilder {
        let header = LOCAL_PLAYERS + offsets.view_state_array;
        let builder = MockMemoryBuilder::new()
            .write_u64(header, VIEW_STATES)
            .write_bytes(header + 8, &2u32.to_le_bytes())
            .write_bytes(header + 12, &2u32.to_le_bytes())
            .write_u64(VIEW_STATES, 0xDEAD_0000)
            .write_u64(VIEW_STATES + 8, VIEW_STATE)
            .write_f64(
                VIEW_STATE + offsets.field_of_view,
                1.0 / (fov / 2.0).to_radians().tan(),
            );
        write_view(
            builder,
            VIEW_STATE + offsets.view_projection,
            &view_for(location, pitch, yaw),
        )
    }
}
