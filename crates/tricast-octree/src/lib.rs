#![warn(missing_docs)]

//! Octree-accelerated ray casting against triangle meshes.
//!
//! Builds an octree once from a static [`TriangleMesh`](tricast_mesh::TriangleMesh)
//! and answers nearest-hit ray queries by pruning whole subtrees whose boxes
//! the ray misses or enters beyond the best hit found so far.
//!
//! # Architecture
//!
//! - [`Ray`] / [`RayHit`] - ray representation and hit records
//! - [`intersect`] - pure ray-box and ray-triangle tests
//! - [`Aabb3`] - axis-aligned bounding boxes
//! - [`tree`] - octree construction, trimming and query traversal
//!
//! # Example
//!
//! ```
//! use tricast_math::{Point3, Vec3};
//! use tricast_mesh::TriangleMesh;
//! use tricast_octree::Octree;
//!
//! let mesh = TriangleMesh::soup(vec![
//!     0.0, 0.0, 0.0,
//!     1.0, 0.0, 0.0,
//!     0.0, 1.0, 0.0,
//! ]);
//! let tree = Octree::build(&mesh)?;
//!
//! let hit = tree.test_ray(
//!     &Point3::new(0.25, 0.25, 1.0),
//!     &Vec3::new(0.0, 0.0, -1.0),
//!     None,
//!     None,
//! )?;
//! assert!(hit.is_some());
//! # Ok::<(), tricast_octree::OctreeError>(())
//! ```

mod aabb;
mod error;
mod ray;
pub mod intersect;
pub mod tree;

pub use aabb::Aabb3;
pub use error::{OctreeError, Result};
pub use ray::{Ray, RayHit};
pub use tree::{BuildParams, Node, Octree, QueryStats, Triangle};
