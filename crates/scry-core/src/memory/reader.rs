use tracing::trace;

use crate::error::{Error, Result};

use super::{ByteBuffer, RemoteAddress, RemoteValue};

/// Read access to a foreign process's memory.
///
/// Implementors supply [`read_bytes`](ReadMemory::read_bytes); every typed read
/// is layered on top of it. A failed or short read is always an
/// [`Error::MemoryReadFailed`], never zero-filled data.
pub trait ReadMemory {
    /// Copy `size` bytes starting at `address`
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Read and decode a fixed-layout value
    fn read_value<T: RemoteValue>(&self, address: u64) -> Result<T>
    where
        Self: Sized,
    {
        let bytes = self.read_bytes(address, T::MEMORY_SIZE)?;
        if bytes.len() < T::MEMORY_SIZE {
            return Err(Error::read_failed(
                address,
                format!("short read: {} of {} bytes", bytes.len(), T::MEMORY_SIZE),
            ));
        }
        trace!(
            "read {} bytes at 0x{:X} as {}",
            T::MEMORY_SIZE,
            address,
            std::any::type_name::<T>()
        );
        T::decode(&ByteBuffer::new(address, &bytes))
    }

    fn read_i32(&self, address: u64) -> Result<i32>
    where
        Self: Sized,
    {
        self.read_value(address)
    }

    fn read_u32(&self, address: u64) -> Result<u32>
    where
        Self: Sized,
    {
        self.read_value(address)
    }

    fn read_u64(&self, address: u64) -> Result<u64>
    where
        Self: Sized,
    {
        self.read_value(address)
    }

    fn read_f32(&self, address: u64) -> Result<f32>
    where
        Self: Sized,
    {
        self.read_value(address)
    }

    fn read_f64(&self, address: u64) -> Result<f64>
    where
        Self: Sized,
    {
        self.read_value(address)
    }

    /// Read a pointer-sized field; a null result is returned as-is
    fn read_address(&self, address: u64) -> Result<RemoteAddress>
    where
        Self: Sized,
    {
        self.read_value(address)
    }

    /// Read a pointer-sized field that must not be null
    fn read_pointer(&self, address: u64, what: &'static str) -> Result<RemoteAddress>
    where
        Self: Sized,
    {
        self.read_address(address)?
            .non_null()
            .ok_or(Error::NullPointer { what })
    }

    /// Read `count` UTF-16 code units
    fn read_utf16(&self, address: u64, count: usize) -> Result<Vec<u16>>
    where
        Self: Sized,
    {
        let size = count * 2;
        let bytes = self.read_bytes(address, size)?;
        if bytes.len() < size {
            return Err(Error::read_failed(
                address,
                format!("short read: {} of {} bytes", bytes.len(), size),
            ));
        }
        Ok(ByteBuffer::new(address, &bytes).to_utf16_units())
    }
}

impl<R: ReadMemory + ?Sized> ReadMemory for &R {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(address, size)
    }
}
