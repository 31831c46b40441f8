use std::fmt;

use serde::{Deserialize, Serialize};

/// Location inside the foreign process's address space.
///
/// Never dereferenced locally; every access goes through [`ReadMemory`](super::ReadMemory).
/// Only meaningful while the foreign process and the addressed object exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteAddress(u64);

impl RemoteAddress {
    pub const NULL: Self = Self(0);

    pub const fn new(address: u64) -> Self {
        Self(address)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Address of a field `offset` bytes into the structure at `self`
    pub const fn offset(self, offset: u64) -> Self {
        Self(self.0.wrapping_add(offset))
    }

    /// `None` for the null address
    pub fn non_null(self) -> Option<Self> {
        if self.is_null() { None } else { Some(self) }
    }
}

impl From<u64> for RemoteAddress {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<RemoteAddress> for u64 {
    fn from(value: RemoteAddress) -> Self {
        value.0
    }
}

impl fmt::Display for RemoteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl fmt::LowerHex for RemoteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_display() {
        let base = RemoteAddress::new(0x1000);
        assert_eq!(base.offset(0xD0).raw(), 0x10D0);
        assert_eq!(base.to_string(), "0x1000");
        assert_eq!(format!("{:#x}", base), "0x1000");
    }

    #[test]
    fn test_null() {
        assert!(RemoteAddress::NULL.is_null());
        assert!(RemoteAddress::NULL.non_null().is_none());
        assert_eq!(RemoteAddress::new(8).non_null(), Some(RemoteAddress::new(8)));
    }
}
