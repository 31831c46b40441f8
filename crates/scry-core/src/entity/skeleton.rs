use tracing::debug;

use crate::error::{Error, Result};
use crate::math::{Transform, Vector3};
use crate::memory::layout::mesh::BONE_STRIDE;
use crate::memory::{ReadMemory, RemoteAddress};
use crate::offset::OffsetTable;

/// World position of a bone given its local transform and the mesh's
/// component-to-world transform.
pub fn bone_world_position(bone: &Transform, component_to_world: &Transform) -> Vector3 {
    (bone.to_matrix() * component_to_world.to_matrix()).translation()
}

/// Resolves skeletal bone positions for mesh components
pub struct BoneResolver<'a, R: ReadMemory> {
    reader: &'a R,
    offsets: &'a OffsetTable,
}

impl<'a, R: ReadMemory> BoneResolver<'a, R> {
    pub fn new(reader: &'a R, offsets: &'a OffsetTable) -> Self {
        Self { reader, offsets }
    }

    /// Bone transform buffer, falling back to the cached buffer while the
    /// primary one is null.
    pub fn bone_array(&self, mesh: RemoteAddress) -> Result<RemoteAddress> {
        if mesh.is_null() {
            return Err(Error::NullPointer { what: "mesh" });
        }

        let primary = self
            .reader
            .read_address(mesh.offset(self.offsets.bone_array).raw())?;
        if let Some(array) = primary.non_null() {
            return Ok(array);
        }

        debug!("Primary bone array of mesh {} is null, using cache", mesh);
        self.reader
            .read_address(mesh.offset(self.offsets.bone_array_cache).raw())?
            .non_null()
            .ok_or(Error::NullPointer { what: "bone array" })
    }

    pub fn bone_transform(&self, bone_array: RemoteAddress, index: u32) -> Result<Transform> {
        let address = bone_array.offset(u64::from(index) * BONE_STRIDE);
        self.reader.read_value(address.raw())
    }

    pub fn component_to_world(&self, mesh: RemoteAddress) -> Result<Transform> {
        if mesh.is_null() {
            return Err(Error::NullPointer { what: "mesh" });
        }
        self.reader
            .read_value(mesh.offset(self.offsets.component_to_world).raw())
    }

    pub fn resolve_bone_world_position(&self, mesh: RemoteAddress, index: u32) -> Result<Vector3> {
        let bones = self.bone_array(mesh)?;
        let bone = self.bone_transform(bones, index)?;
        let component_to_world = self.component_to_world(mesh)?;
        checked(bone_world_position(&bone, &component_to_world))
    }

    /// Resolve several bones of one mesh with a single component-to-world read
    pub fn resolve_bones(&self, mesh: RemoteAddress, indices: &[u32]) -> Result<Vec<Vector3>> {
        let bones = self.bone_array(mesh)?;
        let component_to_world = self.component_to_world(mesh)?;

        indices
            .iter()
            .map(|&index| {
                let bone = self.bone_transform(bones, index)?;
                checked(bone_world_position(&bone, &component_to_world))
            })
            .collect()
    }
}

fn checked(position: Vector3) -> Result<Vector3> {
    if position.is_valid() {
        Ok(position)
    } else {
        Err(Error::NonFiniteValue {
            what: "bone position",
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::math::Quaternion;
    use crate::memory::MockMemoryBuilder;

    pub const MESH: u64 = 0x5_0000;
    pub const BONES: u64 = 0x6_0000;

    /// Mesh with an identity-rotated component at `origin` and bones whose
    /// local translations are `bones`
    pub fn mesh_memory(
        builder: MockMemoryBuilder,
        offsets: &OffsetTable,
        mesh: u64,
        bone_array: u64,
        origin: Vector3,
        bones: &[Vector3],
    ) -> MockMemoryBuilder {
        let ctw = Transform {
            rotation: Quaternion::IDENTITY,
            translation: origin,
            scale: Vector3::new(1.0, 1.0, 1.0),
        };
        let mut builder = builder
            .write_u64(mesh + offsets.bone_array, bone_array)
            .write_u64(mesh + offsets.bone_array_cache, 0)
            .write_transform(mesh + offsets.component_to_world, &ctw);
        for (i, translation) in bones.iter().enumerate() {
            let bone = Transform {
                translation: *translation,
                ..Default::default()
            };
            builder = builder.write_transform(bone_array + i as u64 * BONE_STRIDE, &bone);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::math::Quaternion;
    use crate::memory::MockMemoryBuilder;

    #[test]
    fn test_resolve_with_identity_component() {
        let offsets = OffsetTable::default();
        let reader = mesh_memory(
            MockMemoryBuilder::new(),
            &offsets,
            MESH,
            BONES,
            Vector3::new(1000.0, 2000.0, 0.0),
            &[Vector3::ZERO, Vector3::new(0.0, 0.0, 180.0)],
        )
        .build();

        let resolver = BoneResolver::new(&reader, &offsets);
        let head = resolver
            .resolve_bone_world_position(RemoteAddress::new(MESH), 1)
            .unwrap();
        assert_eq!(head, Vector3::new(1000.0, 2000.0, 180.0));
    }

    #[test]
    fn test_falls_back_to_cached_bone_array() {
        let offsets = OffsetTable::default();
        let cache = 0x7_0000;
        let reader = mesh_memory(
            MockMemoryBuilder::new(),
            &offsets,
            MESH,
            cache,
            Vector3::ZERO,
            &[Vector3::new(5.0, 6.0, 7.0)],
        )
        .write_u64(MESH + offsets.bone_array, 0)
        .write_u64(MESH + offsets.bone_array_cache, cache)
        .build();

        let resolver = BoneResolver::new(&reader, &offsets);
        assert_eq!(
            resolver.bone_array(RemoteAddress::new(MESH)).unwrap(),
            RemoteAddress::new(cache)
        );
        assert_eq!(
            resolver
                .resolve_bone_world_position(RemoteAddress::new(MESH), 0)
                .unwrap(),
            Vector3::new(5.0, 6.0, 7.0)
        );
    }

    #[test]
    fn test_both_bone_arrays_null_fails() {
        let offsets = OffsetTable::default();
        let reader = mesh_memory(
            MockMemoryBuilder::new(),
            &offsets,
            MESH,
            BONES,
            Vector3::ZERO,
            &[Vector3::ZERO],
        )
        .write_u64(MESH + offsets.bone_array, 0)
        .build();

        let result = BoneResolver::new(&reader, &offsets)
            .resolve_bone_world_position(RemoteAddress::new(MESH), 0);
        assert!(matches!(
            result,
            Err(Error::NullPointer { what: "bone array" })
        ));
    }

    #[test]
    fn test_null_mesh_fails() {
        let offsets = OffsetTable::default();
        let reader = MockMemoryBuilder::new().build();
        let result = BoneResolver::new(&reader, &offsets)
            .resolve_bone_world_position(RemoteAddress::NULL, 0);
        assert!(matches!(result, Err(Error::NullPointer { what: "mesh" })));
    }

    #[test]
    fn test_unmapped_bone_is_read_failure() {
        let offsets = OffsetTable::default();
        let reader = mesh_memory(
            MockMemoryBuilder::new(),
            &offsets,
            MESH,
            BONES,
            Vector3::ZERO,
            &[Vector3::ZERO],
        )
        .build();

        let result = BoneResolver::new(&reader, &offsets)
            .resolve_bone_world_position(RemoteAddress::new(MESH), 40);
        assert!(matches!(result, Err(Error::MemoryReadFailed { .. })));
    }

    #[test]
    fn test_non_finite_position_is_rejected() {
        let offsets = OffsetTable::default();
        let reader = mesh_memory(
            MockMemoryBuilder::new(),
            &offsets,
            MESH,
            BONES,
            Vector3::ZERO,
            &[Vector3::new(f64::NAN, 0.0, 0.0)],
        )
        .build();

        let result = BoneResolver::new(&reader, &offsets)
            .resolve_bone_world_position(RemoteAddress::new(MESH), 0);
        assert!(matches!(result, Err(Error::NonFiniteValue { .. })));
    }

    #[test]
    fn test_resolve_bones_in_one_pass() {
        let offsets = OffsetTable::default();
        let reader = mesh_memory(
            MockMemoryBuilder::new(),
            &offsets,
            MESH,
            BONES,
            Vector3::new(10.0, 0.0, 0.0),
            &[
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.0, 0.0, 100.0),
                Vector3::new(0.0, 0.0, 160.0),
            ],
        )
        .build();

        let positions = BoneResolver::new(&reader, &offsets)
            .resolve_bones(RemoteAddress::new(MESH), &[2, 0])
            .unwrap();
        assert_eq!(
            positions,
            vec![Vector3::new(10.0, 0.0, 160.0), Vector3::new(10.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_rotated_component_moves_bone() {
        // Component yawed 90 degrees about Z: local +X becomes world +Y
        let half = std::f64::consts::FRAC_PI_4;
        let ctw = Transform {
            rotation: Quaternion {
                x: 0.0,
                y: 0.0,
                z: half.sin(),
                w: half.cos(),
            },
            translation: Vector3::new(100.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        };
        let bone = Transform {
            translation: Vector3::new(50.0, 0.0, 0.0),
            ..Default::default()
        };
        let world = bone_world_position(&bone, &ctw);
        assert!((world.x - 100.0).abs() < 1e-9);
        assert!((world.y - 50.0).abs() < 1e-9);
        assert!(world.z.abs() < 1e-9);
    }
}
