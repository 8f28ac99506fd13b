#![warn(missing_docs)]

//! Math types for the tricast ray casting kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! octree and intersection geometry: points, vectors, directions.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;
