use encoding_rs::UTF_16LE;

use crate::error::{Error, Result};

/// Little-endian view over bytes copied out of the foreign process.
///
/// Keeps the address the bytes were read from so that decode errors point at
/// the remote field rather than at a local buffer index.
#[derive(Debug, Clone, Copy)]
pub struct ByteBuffer<'a> {
    address: u64,
    bytes: &'a [u8],
}

impl<'a> ByteBuffer<'a> {
    pub fn new(address: u64, bytes: &'a [u8]) -> Self {
        Self { address, bytes }
    }

    pub fn address(&self) -> u64 {
        self.address
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// Sub-buffer starting `offset` bytes in, `len` bytes long
    pub fn slice(&self, offset: usize, len: usize) -> Result<ByteBuffer<'a>> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| self.out_of_range(offset, len))?;
        Ok(ByteBuffer {
            address: self.address + offset as u64,
            bytes: &self.bytes[offset..end],
        })
    }

    fn array_at<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        self.bytes
            .get(offset..offset + N)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| self.out_of_range(offset, N))
    }

    pub fn read_i32_at(&self, offset: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.array_at(offset)?))
    }

    pub fn read_u32_at(&self, offset: usize) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array_at(offset)?))
    }

    pub fn read_u64_at(&self, offset: usize) -> Result<u64> {
        Ok(u64::from_le_bytes(self.array_at(offset)?))
    }

    pub fn read_f32_at(&self, offset: usize) -> Result<f32> {
        Ok(f32::from_le_bytes(self.array_at(offset)?))
    }

    pub fn read_f64_at(&self, offset: usize) -> Result<f64> {
        Ok(f64::from_le_bytes(self.array_at(offset)?))
    }

    /// Interpret the whole buffer as UTF-16LE code units (odd trailing byte dropped)
    pub fn to_utf16_units(&self) -> Vec<u16> {
        self.bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }

    fn out_of_range(&self, offset: usize, len: usize) -> Error {
        Error::read_failed(
            self.address.wrapping_add(offset as u64),
            format!(
                "field of {} bytes at +{:#x} exceeds {}-byte buffer",
                len,
                offset,
                self.bytes.len()
            ),
        )
    }
}

/// Decode UTF-16LE bytes up to the first NUL code unit
pub fn decode_utf16le(bytes: &[u8]) -> String {
    let end = bytes
        .chunks_exact(2)
        .position(|pair| pair[0] == 0 && pair[1] == 0)
        .map(|units| units * 2)
        .unwrap_or(bytes.len() & !1);
    let (decoded, _) = UTF_16LE.decode_without_bom_handling(&bytes[..end]);
    decoded.into_owned()
}

/// Decode UTF-16 code units up to the first NUL
pub fn decode_utf16_units(units: &[u16]) -> String {
    let bytes: Vec<u8> = units.iter().flat_map(|u| u.to_le_bytes()).collect();
    decode_utf16le(&bytes)
}
