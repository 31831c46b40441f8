use serde::{Deserialize, Serialize};

use super::{Matrix4, Vector3};

/// Rotation quaternion as stored by the engine.
///
/// Never normalized here; the foreign process is trusted to store a unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const MEMORY_SIZE: usize = 32;

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

/// Engine transform (`FTransform`): rotation, translation, scale.
///
/// Foreign layout, 0x60 bytes:
///
/// ```text
/// 0x00  rotation     Quaternion (4 × f64)
/// 0x20  translation  Vector3    (3 × f64) + 8 bytes padding
/// 0x40  scale        Vector3    (3 × f64) + 8 bytes padding
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub rotation: Quaternion,
    pub translation: Vector3,
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            rotation: Quaternion::IDENTITY,
            translation: Vector3::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub const ROTATION_OFFSET: usize = 0x00;
    pub const TRANSLATION_OFFSET: usize = 0x20;
    pub const SCALE_OFFSET: usize = 0x40;
    pub const MEMORY_SIZE: usize = 0x60;

    /// Affine matrix with scale baked into each axis and translation in row 3
    pub fn to_matrix(&self) -> Matrix4 {
        let q = self.rotation;
        let s = self.scale;

        let x2 = q.x + q.x;
        let y2 = q.y + q.y;
        let z2 = q.z + q.z;
        let xx2 = q.x * x2;
        let yy2 = q.y * y2;
        let zz2 = q.z * z2;
        let yz2 = q.y * z2;
        let wx2 = q.w * x2;
        let xy2 = q.x * y2;
        let wz2 = q.w * z2;
        let xz2 = q.x * z2;
        let wy2 = q.w * y2;

        let mut m = [[0.0; 4]; 4];

        m[0][0] = (1.0 - (yy2 + zz2)) * s.x;
        m[1][1] = (1.0 - (xx2 + zz2)) * s.y;
        m[2][2] = (1.0 - (xx2 + yy2)) * s.z;

        m[2][1] = (yz2 - wx2) * s.z;
        m[1][2] = (yz2 + wx2) * s.y;

        m[1][0] = (xy2 - wz2) * s.y;
        m[0][1] = (xy2 + wz2) * s.x;

        m[2][0] = (xz2 + wy2) * s.z;
        m[0][2] = (xz2 - wy2) * s.x;

        m[3] = [self.translation.x, self.translation.y, self.translation.z, 1.0];

        Matrix4::new(m)
    }

    pub fn is_valid(&self) -> bool {
        let q = self.rotation;
        [q.x, q.y, q.z, q.w].iter().all(|v| v.is_finite())
            && self.translation.is_valid()
            && self.scale.is_valid()
    }
}
