use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};

use super::layout::array::{HEADER_SIZE, MAX_CAPACITY};
use super::{ByteBuffer, ReadMemory, RemoteAddress, RemoteValue};

/// Bounded view over a remote dynamic array (`{ data, count, max_count }`).
///
/// The view is index-based and never copies the elements: the backing memory
/// belongs to the foreign process and may change between reads. Element
/// addresses are computed with `T::MEMORY_SIZE` as stride.
pub struct RemoteArray<T> {
    data: RemoteAddress,
    count: u32,
    max_count: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for RemoteArray<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RemoteArray<T> {}

impl<T> fmt::Debug for RemoteArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteArray")
            .field("data", &self.data)
            .field("count", &self.count)
            .field("max_count", &self.max_count)
            .finish()
    }
}

impl<T> PartialEq for RemoteArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.count == other.count && self.max_count == other.max_count
    }
}

impl<T: RemoteValue> RemoteArray<T> {
    pub fn new(data: RemoteAddress, count: u32, max_count: u32) -> Self {
        Self {
            data,
            count,
            max_count,
            _marker: PhantomData,
        }
    }

    pub fn data(&self) -> RemoteAddress {
        self.data
    }

    pub fn len(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> u32 {
        self.max_count
    }

    /// Non-null data pointer and `count <= max_count <= 1_000_000`
    pub fn is_valid(&self) -> bool {
        !self.data.is_null() && self.count <= self.max_count && self.max_count <= MAX_CAPACITY
    }

    /// Turn an invalid view into [`Error::MalformedArray`]
    pub fn validated(self, header: u64) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(Error::MalformedArray {
                address: header,
                count: self.count,
                max_count: self.max_count,
            })
        }
    }

    /// Address of element `index`, or `None` when out of range or the view is invalid
    pub fn get(&self, index: u32) -> Option<RemoteAddress> {
        if !self.is_valid() || index >= self.count {
            return None;
        }
        Some(self.data.offset(u64::from(index) * T::MEMORY_SIZE as u64))
    }

    /// Read element `index` through `reader`; `Ok(None)` when [`get`](Self::get) is `None`
    pub fn read<R: ReadMemory>(&self, reader: &R, index: u32) -> Result<Option<T>> {
        self.get(index)
            .map(|address| reader.read_value(address.raw()))
            .transpose()
    }

    /// Element addresses in index order; empty for an invalid view
    pub fn addresses(&self) -> impl Iterator<Item = RemoteAddress> + '_ {
        let count = if self.is_valid() { self.count } else { 0 };
        (0..count).filter_map(move |i| self.get(i))
    }
}

impl<T: RemoteValue> RemoteValue for RemoteArray<T> {
    const MEMORY_SIZE: usize = HEADER_SIZE;

    fn decode(buf: &ByteBuffer<'_>) -> Result<Self> {
        Ok(Self::new(
            RemoteAddress::new(buf.read_u64_at(0)?),
            buf.read_u32_at(8)?,
            buf.read_u32_at(12)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Transform;
    use crate::memory::MockMemoryBuilder;

    fn view(count: u32, max_count: u32) -> RemoteArray<RemoteAddress> {
        RemoteArray::new(RemoteAddress::new(0x1000), count, max_count)
    }

    #[test]
    fn test_validity_rules() {
        assert!(view(2, 4).is_valid());
        assert!(view(0, 0).is_valid());
        assert!(view(MAX_CAPACITY, MAX_CAPACITY).is_valid());
        assert!(!view(5, 4).is_valid());
        assert!(!view(0, MAX_CAPACITY + 1).is_valid());
        assert!(!RemoteArray::<RemoteAddress>::new(RemoteAddress::NULL, 1, 1).is_valid());
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let v = view(3, 8);
        assert_eq!(v.get(0), Some(RemoteAddress::new(0x1000)));
        assert_eq!(v.get(2), Some(RemoteAddress::new(0x1010)));
        for index in [3, 4, 100, u32::MAX] {
            assert_eq!(v.get(index), None);
        }
    }

    #[test]
    fn test_get_on_invalid_view_is_none() {
        let v = view(5, 4);
        assert_eq!(v.get(0), None);
        assert_eq!(v.addresses().count(), 0);
        assert!(matches!(
            v.validated(0x500),
            Err(Error::MalformedArray {
                address: 0x500,
                count: 5,
                max_count: 4
            })
        ));
    }

    #[test]
    fn test_stride_follows_element_size() {
        let bones = RemoteArray::<Transform>::new(RemoteAddress::new(0x2000), 4, 4);
        assert_eq!(bones.get(3), Some(RemoteAddress::new(0x2000 + 3 * 0x60)));
    }

    #[test]
    fn test_read_header_and_elements() {
        let reader = MockMemoryBuilder::new()
            .write_u64(0x100, 0x1000)
            .write_bytes(0x108, &2u32.to_le_bytes())
            .write_bytes(0x10C, &2u32.to_le_bytes())
            .write_u64(0x1000, 0xAAAA)
            .write_u64(0x1008, 0xBBBB)
            .build();

        let array: RemoteArray<RemoteAddress> = reader.read_value(0x100).unwrap();
        assert_eq!(array, view(2, 2));
        assert_eq!(
            array.read(&reader, 1).unwrap(),
            Some(RemoteAddress::new(0xBBBB))
        );
        assert_eq!(array.read(&reader, 2).unwrap(), None);
        assert_eq!(
            array.addresses().collect::<Vec<_>>(),
            vec![RemoteAddress::new(0x1000), RemoteAddress::new(0x1008)]
        );
    }
}
