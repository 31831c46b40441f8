//! Spatial math: vectors, quaternions, 4x4 matrices.
//!
//! Pure value computations in the engine's left-handed, degrees-based
//! convention. Anything using another convention converts at the boundary.

mod matrix;
mod transform;
mod vector;

pub use matrix::*;
pub use transform::*;
pub use vector::*;
