use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::Vector3;

/// Row-major 4x4 matrix. Translation lives in row 3 (`m[3][0..3]`),
/// i.e. the `_41/_42/_43` elements in D3D naming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    pub m: [[f64; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    /// Size in the foreign layout (16 × f64)
    pub const MEMORY_SIZE: usize = 128;

    pub const fn new(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    pub const fn identity() -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation + translation matrix from pitch/yaw/roll in degrees.
    ///
    /// Rows 0..2 are the forward, right and up axes of the rotated frame;
    /// row 3 carries `origin`.
    pub fn from_rotation(rotation: Vector3, origin: Vector3) -> Self {
        let (sp, cp) = rotation.x.to_radians().sin_cos();
        let (sy, cy) = rotation.y.to_radians().sin_cos();
        let (sr, cr) = rotation.z.to_radians().sin_cos();

        Self::new([
            [cp * cy, cp * sy, sp, 0.0],
            [sr * sp * cy - cr * sy, sr * sp * sy + cr * cy, -sr * cp, 0.0],
            [-(cr * sp * cy + sr * sy), cy * sr - cr * sp * sy, cr * cp, 0.0],
            [origin.x, origin.y, origin.z, 1.0],
        ])
    }

    /// First three components of a row
    pub fn row(&self, index: usize) -> Vector3 {
        let r = &self.m[index];
        Vector3::new(r[0], r[1], r[2])
    }

    /// Rows 0, 1, 2 as (x, y, z) axes
    pub fn axes(&self) -> (Vector3, Vector3, Vector3) {
        (self.row(0), self.row(1), self.row(2))
    }

    /// Translation (`_41`, `_42`, `_43`)
    pub fn translation(&self) -> Vector3 {
        self.row(3)
    }

    pub fn is_valid(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        let mut out = [[0.0; 4]; 4];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[row][k] * rhs.m[k][col]).sum();
            }
        }
        Matrix4::new(out)
    }
}
