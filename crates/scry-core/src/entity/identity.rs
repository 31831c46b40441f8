//! Player name and platform decoding.
//!
//! Names are stored as UTF-16 with a position-dependent additive mask;
//! [`decode_name`] removes it in place. Platform tags are short plain
//! UTF-16 strings such as `"PSN"`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::debug;

use crate::error::{Error, Result};
use crate::memory::layout::player::{MAX_NAME_LENGTH, PLATFORM_BUFFER_UNITS};
use crate::memory::{ReadMemory, RemoteAddress, decode_utf16_units};
use crate::offset::OffsetTable;

/// Reported for players whose name length is out of range (bots)
pub const UNKNOWN_PLAYER_NAME: &str = "BOT";

/// `(index, mask)` pairs for a name of `len` units
fn name_mask(len: usize) -> impl Iterator<Item = (usize, u16)> {
    let mut key = len.wrapping_sub(1) & 3;
    (0..len.saturating_sub(1)).map(move |k| {
        key += 3;
        (k, (key & 7) as u16)
    })
}

/// Remove the name mask in place. The final unit is never masked.
pub fn decode_name(units: &mut [u16]) {
    for (k, mask) in name_mask(units.len()) {
        units[k] = units[k].wrapping_add(mask);
    }
}

/// Apply the name mask in place; inverse of [`decode_name`]
pub fn encode_name(units: &mut [u16]) {
    for (k, mask) in name_mask(units.len()) {
        units[k] = units[k].wrapping_sub(mask);
    }
}

/// Platform a player is connected from
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
pub enum Platform {
    #[strum(serialize = "XBL")]
    XboxOne,
    #[strum(serialize = "PSN")]
    PlayStation4,
    #[strum(serialize = "PS5")]
    PlayStation5,
    #[strum(serialize = "XSX")]
    XboxSeries,
    #[strum(serialize = "SWT")]
    Switch,
    #[strum(serialize = "WIN")]
    Windows,
    #[default]
    #[strum(serialize = "NPC")]
    Unknown,
}

impl Platform {
    /// Unrecognized tags map to [`Platform::Unknown`]
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }

    pub fn tag(&self) -> &'static str {
        self.into()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::XboxOne => "XBOX ONE",
            Self::PlayStation4 => "PLAYSTATION 4",
            Self::PlayStation5 => "PLAYSTATION 5",
            Self::XboxSeries => "XBOX SERIES S/X",
            Self::Switch => "NINTENDO",
            Self::Windows => "WINDOWS",
            Self::Unknown => "NPC",
        }
    }
}

/// Reads display identity from a player state
pub struct IdentityReader<'a, R: ReadMemory> {
    reader: &'a R,
    offsets: &'a OffsetTable,
}

impl<'a, R: ReadMemory> IdentityReader<'a, R> {
    pub fn new(reader: &'a R, offsets: &'a OffsetTable) -> Self {
        Self { reader, offsets }
    }

    pub fn read_player_name(&self, player_state: RemoteAddress) -> Result<String> {
        if player_state.is_null() {
            return Err(Error::NullPointer {
                what: "player state",
            });
        }
        let name = self.reader.read_pointer(
            player_state.offset(self.offsets.player_name).raw(),
            "player name",
        )?;

        let length = self
            .reader
            .read_i32(name.offset(self.offsets.name_length).raw())?;
        if length <= 0 || length > MAX_NAME_LENGTH {
            debug!("Name length {} at {} out of range", length, name);
            return Ok(UNKNOWN_PLAYER_NAME.to_string());
        }

        let data = self
            .reader
            .read_pointer(name.offset(self.offsets.name_data).raw(), "name data")?;
        let mut units = self.reader.read_utf16(data.raw(), length as usize)?;
        decode_name(&mut units);
        Ok(decode_utf16_units(&units))
    }

    pub fn read_platform(&self, player_state: RemoteAddress) -> Result<Platform> {
        if player_state.is_null() {
            return Err(Error::NullPointer {
                what: "player state",
            });
        }
        let tag = self.reader.read_pointer(
            player_state.offset(self.offsets.platform).raw(),
            "platform",
        )?;
        let units = self.reader.read_utf16(tag.raw(), PLATFORM_BUFFER_UNITS)?;
        Ok(Platform::from_tag(&decode_utf16_units(&units)))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::memory::MockMemoryBuilder;

    pub const PLAYER_STATE: u64 = 0x8_0000;
    pub const NAME: u64 = 0x9_0000;
    pub const NAME_BUFFER: u64 = 0xA_0000;
    pub const PLATFORM_BUFFER: u64 = 0xB_0000;

    /// Player state with an encoded name and a platform tag
    pub fn player_memory(
        builder: MockMemoryBuilder,
        offsets: &OffsetTable,
        name: &str,
        platform: &str,
    ) -> MockMemoryBuilder {
        let mut units: Vec<u16> = name.encode_utf16().collect();
        encode_name(&mut units);

        let mut tag: Vec<u16> = platform.encode_utf16().collect();
        tag.resize(PLATFORM_BUFFER_UNITS, 0);

        builder
            .write_u64(PLAYER_STATE + offsets.player_name, NAME)
            .write_u64(NAME + offsets.name_data, NAME_BUFFER)
            .write_i32(NAME + offsets.name_length, units.len() as i32)
            .write_utf16_units(NAME_BUFFER, &units)
            .write_u64(PLAYER_STATE + offsets.platform, PLATFORM_BUFFER)
            .write_utf16_units(PLATFORM_BUFFER, &tag)
    }
}
