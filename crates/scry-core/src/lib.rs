//! # scry-core
//!
//! Reconstructs engine structures from another process's memory and projects
//! world positions to screen space.
//!
//! This crate provides:
//! - Typed remote reads over any [`ReadMemory`] source, with bounded array views
//! - Vector, quaternion, transform and matrix math in the engine's conventions
//! - Camera extraction and world-to-screen projection
//! - Bone resolution, render-based visibility and player identity decoding
//! - Version-specific offset tables loaded from JSON
//!
//! Attaching to a process is left to the caller; [`MemorySnapshot`] provides an
//! offline source captured from any reader.
//!
//! ## Feature Flags
//!
//! - `debug-tools`: Enables dump utilities for checking offsets against a memory source.

#[cfg(feature = "debug-tools")]
pub mod debug;
pub mod entity;
pub mod error;
pub mod math;
pub mod memory;
pub mod offset;
pub mod view;

pub use entity::{
    BoneResolver, EntitySample, EntityScanner, IdentityReader, Platform, UNKNOWN_PLAYER_NAME,
    VisibilityRecord, VisibilityTracker, bone_world_position, decode_name, encode_name,
};
pub use error::{Error, Result};
pub use math::{Matrix4, Quaternion, Transform, Vector2, Vector3};
pub use memory::{
    ByteBuffer, MemoryRegion, MemorySnapshot, ReadMemory, RemoteAddress, RemoteArray,
    RemoteValue, decode_utf16_units, decode_utf16le,
};
pub use offset::{OffsetTable, load_offsets, save_offsets};
pub use view::{
    CameraExtractor, CameraModel, FrameContext, MIN_DEPTH, Plane, Projection, Projector,
    ScreenSize, ViewProjection,
};

// Debug utilities (requires debug-tools feature)
#[cfg(feature = "debug-tools")]
pub use debug::{FrameDump, MemorySample};
