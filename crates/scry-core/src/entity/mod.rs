//! Per-entity readers: bone positions, render-based visibility and identity.

mod identity;
mod scan;
pub(crate) mod skeleton;
mod visibility;

pub use identity::{IdentityReader, Platform, UNKNOWN_PLAYER_NAME, decode_name, encode_name};
pub use scan::{EntitySample, EntityScanner};
pub use skeleton::{BoneResolver, bone_world_position};
pub use visibility::{VisibilityRecord, VisibilityTracker};
