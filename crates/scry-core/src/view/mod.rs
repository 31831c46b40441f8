//! Camera extraction and world-to-screen projection.
//!
//! [`CameraExtractor`] decodes the active camera from the view state,
//! [`Projector`] maps world points to pixels for a given camera, and
//! [`FrameContext`] pairs the two for one frame's worth of projections.

pub(crate) mod camera;
mod frame;
mod projector;

pub use camera::{CameraExtractor, CameraModel, Plane, ViewProjection};
pub use frame::FrameContext;
pub use projector::{MIN_DEPTH, Projection, Projector, ScreenSize};
