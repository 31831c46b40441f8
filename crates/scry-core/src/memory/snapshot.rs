//! Captured memory regions that can be replayed offline.
//!
//! A snapshot is a set of non-overlapping byte ranges copied from a foreign
//! process at one instant. It implements [`ReadMemory`], so every part of the
//! engine runs unchanged against a saved frame.
//!
//! # File format
//!
//! ```json
//! {
//!   "captured_at": "2026-10-19T12:00:00Z",
//!   "regions": [
//!     { "address": "0x7FF600001000", "bytes": "00A0F03C..." }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::ReadMemory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRegion {
    #[serde(with = "hex_address")]
    pub address: u64,
    #[serde(with = "hex_bytes")]
    pub bytes: Vec<u8>,
}

impl MemoryRegion {
    /// Address of the final byte; `None` for an empty region or one that
    /// runs past the end of the address space
    pub fn last(&self) -> Option<u64> {
        let len = self.bytes.len().checked_sub(1)?;
        self.address.checked_add(len as u64)
    }

    fn contains(&self, address: u64, size: usize) -> bool {
        match self.last() {
            Some(last) if address >= self.address && address <= last => {
                (size as u64).saturating_sub(1) <= last - address
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    regions: Vec<MemoryRegion>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the given `(address, size)` ranges out of a live reader.
    ///
    /// Ranges that fail to read are skipped with a warning so one stale
    /// pointer does not lose the rest of the frame.
    pub fn capture<R: ReadMemory>(reader: &R, ranges: &[(u64, usize)]) -> Result<Self> {
        let mut snapshot = Self {
            captured_at: Some(Utc::now()),
            regions: Vec::new(),
        };
        for &(address, size) in ranges.iter().filter(|(_, size)| *size > 0) {
            match reader.read_bytes(address, size) {
                Ok(bytes) => snapshot.insert(address, bytes)?,
                Err(e) => warn!("Skipping region 0x{:X}+{}: {}", address, size, e),
            }
        }
        Ok(snapshot)
    }

    /// Add a region.
    ///
    /// Empty regions, regions running past `u64::MAX` and regions overlapping
    /// an existing one are errors.
    pub fn insert(&mut self, address: u64, bytes: Vec<u8>) -> Result<()> {
        let len = bytes.len();
        let region = MemoryRegion { address, bytes };
        let Some(last) = region.last() else {
            return Err(Error::Snapshot(format!(
                "region 0x{:X}+{} is empty or exceeds the address space",
                address, len
            )));
        };
        let overlapping = self
            .regions
            .iter()
            .filter_map(|r| r.last().map(|other_last| (r.address, other_last)))
            .find(|&(other_start, other_last)| address <= other_last && other_start <= last);
        if let Some((other_start, other_last)) = overlapping {
            return Err(Error::Snapshot(format!(
                "region 0x{:X}..=0x{:X} overlaps 0x{:X}..=0x{:X}",
                address, last, other_start, other_last
            )));
        }
        let pos = self
            .regions
            .partition_point(|r| r.address < region.address);
        self.regions.insert(pos, region);
        Ok(())
    }

    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Load a snapshot from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let raw: MemorySnapshot = serde_json::from_str(&content)?;

        // Re-insert to sort and reject overlaps in hand-edited files
        let mut snapshot = MemorySnapshot {
            captured_at: raw.captured_at,
            regions: Vec::with_capacity(raw.regions.len()),
        };
        for region in raw.regions {
            snapshot.insert(region.address, region.bytes)?;
        }
        debug!(
            "Loaded snapshot from {} ({} regions)",
            path.as_ref().display(),
            snapshot.regions.len()
        );
        Ok(snapshot)
    }

    /// Save the snapshot as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl ReadMemory for MemorySnapshot {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let idx = self.regions.partition_point(|r| r.address <= address);
        let region = idx
            .checked_sub(1)
            .map(|i| &self.regions[i])
            .filter(|r| r.contains(address, size))
            .ok_or_else(|| {
                Error::read_failed(address, format!("{} bytes not captured in snapshot", size))
            })?;
        let start = (address - region.address) as usize;
        Ok(region.bytes[start..start + size].to_vec())
    }
}

mod hex_address {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(address: &u64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{:X}", address))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        let s = String::deserialize(d)?;
        let digits = s.trim_start_matches("0x").trim_start_matches("0X");
        u64::from_str_radix(digits, 16).map_err(D::Error::custom)
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<T: AsRef<[u8]>, S: Serializer>(bytes: T, s: S) -> Result<S::Ok, S::Error> {
        let hex: String = bytes.as_ref().iter().map(|b| format!("{:02X}", b)).collect();
        s.serialize_str(&hex)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        let digits: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
        if digits.len() % 2 != 0 {
            return Err(D::Error::custom("odd number of hex digits"));
        }
        digits
            .chunks_exact(2)
            .map(|pair| {
                std::str::from_utf8(pair)
                    .ok()
                    .and_then(|p| u8::from_str_radix(p, 16).ok())
                    .ok_or_else(|| D::Error::custom("invalid hex digit"))
            })
            .collect()
    }
}
