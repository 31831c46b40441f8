//! Memory layout constants for the engine structures the reader walks.
//!
//! These are the built-in defaults for [`OffsetTable`](crate::offset::OffsetTable).
//! Game updates move fields around; ship a new offsets file rather than
//! editing these when that happens.
//!
//! # Structure Overview
//!
//! ```text
//! LocalPlayers + 0xD0    ViewState array  { ptr, u32 count, u32 max }  -> [1] = active view state
//! ViewState    + 0x700   f64 projection term (1 / tan(fov / 2))
//! ViewState    + 0x900   ViewProjection block (matrix + planes, 0x100 bytes)
//! Mesh         + ...     bone arrays, component-to-world, last render time
//! PlayerState  + 0xA98   name struct -> { +0x8 UTF-16 data ptr, +0x10 i32 length }
//! ```

/// Local player / view state
pub mod view {
    /// Offset from the local players root to the view-state array
    pub const VIEW_STATE_ARRAY: u64 = 0xD0;

    /// Index of the active view state within that array
    pub const ACTIVE_VIEW_STATE_INDEX: u32 = 1;

    /// ViewProjection block inside the view state
    pub const VIEW_PROJECTION: u64 = 0x900;

    /// Projection term used to recover the field of view
    pub const FIELD_OF_VIEW: u64 = 0x700;
}

/// Skeletal mesh component
pub mod mesh {
    pub const BONE_ARRAY: u64 = 0x5B0;

    /// Secondary bone buffer used while the primary one is being swapped
    pub const BONE_ARRAY_CACHE: u64 = 0x5C0;

    pub const COMPONENT_TO_WORLD: u64 = 0x1C0;

    /// `f32` engine time the mesh was last submitted for rendering
    pub const LAST_SUBMIT_TIME_ON_SCREEN: u64 = 0x2E8;

    /// Stride between bone transforms in the bone array
    pub const BONE_STRIDE: u64 = 0x60;
}

/// Player state
pub mod player {
    pub const NAME: u64 = 0xA98;
    pub const PLATFORM: u64 = 0x438;

    /// Offsets inside the name struct
    pub const NAME_DATA: u64 = 0x8;
    pub const NAME_LENGTH: u64 = 0x10;

    /// Longest name accepted; anything longer is treated as corrupt
    pub const MAX_NAME_LENGTH: i32 = 255;

    /// UTF-16 units read for a platform tag
    pub const PLATFORM_BUFFER_UNITS: usize = 64;
}

/// Remote dynamic arrays
pub mod array {
    /// Size of `{ ptr, u32 count, u32 max }`
    pub const HEADER_SIZE: usize = 16;

    /// Sanity ceiling on declared capacity
    pub const MAX_CAPACITY: u32 = 1_000_000;
}
