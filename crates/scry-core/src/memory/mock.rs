//! In-memory reader for unit tests.
//!
//! Byte-granular: reads succeed only if every requested byte was written, so
//! tests exercise the same "unmapped address" failures a live process produces.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::math::{Matrix4, Transform, Vector3};

use super::ReadMemory;

#[derive(Debug, Clone, Default)]
pub struct MockMemoryReader {
    bytes: BTreeMap<u64, u8>,
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        (0..size as u64)
            .map(|i| {
                let addr = address.wrapping_add(i);
                self.bytes
                    .get(&addr)
                    .copied()
                    .ok_or_else(|| Error::read_failed(addr, "unmapped in mock"))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockMemoryBuilder {
    reader: MockMemoryReader,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bytes(mut self, address: u64, bytes: &[u8]) -> Self {
        for (i, b) in bytes.iter().enumerate() {
            self.reader.bytes.insert(address + i as u64, *b);
        }
        self
    }

    pub fn write_i32(self, address: u64, value: i32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_f32(self, address: u64, value: f32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u64(self, address: u64, value: u64) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_f64(self, address: u64, value: f64) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_f64s(self, address: u64, values: &[f64]) -> Self {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.write_bytes(address, &bytes)
    }

    pub fn write_vector3(self, address: u64, v: Vector3) -> Self {
        self.write_f64s(address, &[v.x, v.y, v.z])
    }

    /// Writes the full 0x60-byte layout, padding included
    pub fn write_transform(self, address: u64, t: &Transform) -> Self {
        let q = t.rotation;
        self.write_bytes(address, &[0u8; Transform::MEMORY_SIZE])
            .write_f64s(address, &[q.x, q.y, q.z, q.w])
            .write_vector3(address + Transform::TRANSLATION_OFFSET as u64, t.translation)
            .write_vector3(address + Transform::SCALE_OFFSET as u64, t.scale)
    }

    pub fn write_matrix(self, address: u64, m: &Matrix4) -> Self {
        let values: Vec<f64> = m.m.iter().flatten().copied().collect();
        self.write_f64s(address, &values)
    }

    /// UTF-16LE, no terminator
    pub fn write_utf16(self, address: u64, text: &str) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.write_utf16_units(address, &units)
    }

    pub fn write_utf16_units(self, address: u64, units: &[u16]) -> Self {
        let bytes: Vec<u8> = units.iter().flat_map(|u| u.to_le_bytes()).collect();
        self.write_bytes(address, &bytes)
    }

    pub fn build(self) -> MockMemoryReader {
        self.reader
    }
}
