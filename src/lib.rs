//! Pinhole projection of 3D primitives into vector paths.
//!
//! A [`Camera`](camera::Camera) projects circles, sphere silhouettes and
//! arbitrary parametric curves onto its image plane; smooth curves are then
//! fitted with chains of quadratic Bezier segments by
//! [`approximate`](approximation::approximate).

pub mod approximation;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod math;
pub mod primitive;
pub mod transform;

pub use error::{MinimError, Result};
