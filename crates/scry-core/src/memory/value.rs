//! Decoding of fixed-size foreign structures.

use crate::error::Result;
use crate::math::{Matrix4, Quaternion, Transform, Vector3};

use super::{ByteBuffer, RemoteAddress};

/// A value with a fixed foreign layout that can be decoded from raw bytes.
///
/// `MEMORY_SIZE` is the number of bytes [`ReadMemory::read_value`](super::ReadMemory::read_value)
/// copies out of the foreign process before calling `decode`.
pub trait RemoteValue: Sized {
    const MEMORY_SIZE: usize;

    fn decode(buf: &ByteBuffer<'_>) -> Result<Self>;
}

macro_rules! impl_primitive {
    ($ty:ty, $read:ident) => {
        impl RemoteValue for $ty {
            const MEMORY_SIZE: usize = std::mem::size_of::<$ty>();

            fn decode(buf: &ByteBuffer<'_>) -> Result<Self> {
                buf.$read(0)
            }
        }
    };
}

impl_primitive!(i32, read_i32_at);
impl_primitive!(u32, read_u32_at);
impl_primitive!(u64, read_u64_at);
impl_primitive!(f32, read_f32_at);
impl_primitive!(f64, read_f64_at);

impl RemoteValue for RemoteAddress {
    const MEMORY_SIZE: usize = 8;

    fn decode(buf: &ByteBuffer<'_>) -> Result<Self> {
        Ok(RemoteAddress::new(buf.read_u64_at(0)?))
    }
}

impl RemoteValue for Vector3 {
    const MEMORY_SIZE: usize = Vector3::MEMORY_SIZE;

    fn decode(buf: &ByteBuffer<'_>) -> Result<Self> {
        Ok(Vector3::new(
            buf.read_f64_at(0)?,
            buf.read_f64_at(8)?,
            buf.read_f64_at(16)?,
        ))
    }
}

impl RemoteValue for Quaternion {
    const MEMORY_SIZE: usize = Quaternion::MEMORY_SIZE;

    fn decode(buf: &ByteBuffer<'_>) -> Result<Self> {
        Ok(Quaternion::new(
            buf.read_f64_at(0)?,
            buf.read_f64_at(8)?,
            buf.read_f64_at(16)?,
            buf.read_f64_at(24)?,
        ))
    }
}

impl RemoteValue for Transform {
    const MEMORY_SIZE: usize = Transform::MEMORY_SIZE;

    fn decode(buf: &ByteBuffer<'_>) -> Result<Self> {
        Ok(Transform {
            rotation: Quaternion::decode(
                &buf.slice(Transform::ROTATION_OFFSET, Quaternion::MEMORY_SIZE)?,
            )?,
            translation: Vector3::decode(
                &buf.slice(Transform::TRANSLATION_OFFSET, Vector3::MEMORY_SIZE)?,
            )?,
            scale: Vector3::decode(&buf.slice(Transform::SCALE_OFFSET, Vector3::MEMORY_SIZE)?)?,
        })
    }
}

impl RemoteValue for Matrix4 {
    const MEMORY_SIZE: usize = Matrix4::MEMORY_SIZE;

    fn decode(buf: &ByteBuffer<'_>) -> Result<Self> {
        let mut m = [[0.0; 4]; 4];
        for (row, cells) in m.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = buf.read_f64_at((row * 4 + col) * 8)?;
            }
        }
        Ok(Matrix4::new(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_bytes(values: &[f64]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_decode_transform_skips_padding() {
        let mut bytes = f64_bytes(&[0.0, 0.0, 0.0, 1.0]);
        bytes.extend(f64_bytes(&[1.0, 2.0, 3.0]));
        bytes.extend([0xAA; 8]);
        bytes.extend(f64_bytes(&[4.0, 5.0, 6.0]));
        bytes.extend([0xBB; 8]);
        assert_eq!(bytes.len(), Transform::MEMORY_SIZE);

        let t = Transform::decode(&ByteBuffer::new(0x100, &bytes)).unwrap();
        assert_eq!(t.rotation, Quaternion::IDENTITY);
        assert_eq!(t.translation, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale, Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_decode_matrix_row_major() {
        let values: Vec<f64> = (0..16).map(|v| v as f64).collect();
        let bytes = f64_bytes(&values);
        let m = Matrix4::decode(&ByteBuffer::new(0, &bytes)).unwrap();
        assert_eq!(m.m[0], [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(m.m[3], [12.0, 13.0, 14.0, 15.0]);
    }

    #[test]
    fn test_decode_short_buffer_fails() {
        let bytes = f64_bytes(&[1.0, 2.0]);
        assert!(Vector3::decode(&ByteBuffer::new(0, &bytes)).is_err());
    }
}
