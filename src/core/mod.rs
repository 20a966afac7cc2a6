// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod vector;
pub mod density;
pub mod frame;

// Re-export public types for convenient access via `blochq::core::TypeName`
pub use error::{BlochError, Result};
pub use vector::{BlochVector, ease_in_out_cubic, geodesic, lerp, rotate_around_axis, slerp};
pub use density::{DensityMatrix, Matrix2, density_from_bloch};
pub use frame::Frame;

pub mod constants;
pub use constants::{GROUND_STATE, NORM_EPSILON, SLERP_EPSILON};
