mod address;
mod array;
mod bytes;
pub mod layout;
mod reader;
mod snapshot;
mod value;

#[cfg(test)]
pub mod mock;

pub use address::RemoteAddress;
pub use array::RemoteArray;
pub use bytes::{ByteBuffer, decode_utf16_units, decode_utf16le};
pub use reader::ReadMemory;
pub use snapshot::{MemoryRegion, MemorySnapshot};
pub use value::RemoteValue;

#[cfg(test)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
