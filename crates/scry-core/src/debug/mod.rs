//! Debug utilities for inspecting engine structures in a memory source
//!
//! - Dumping the camera chain with raw byte samples (`FrameDump`)

mod dump;

pub use dump::{FrameDump, MemorySample};
