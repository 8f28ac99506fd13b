//! Error types for octree construction and queries.

use thiserror::Error;
use tricast_mesh::MeshError;

/// Errors that can occur building or querying an octree.
#[derive(Error, Debug)]
pub enum OctreeError {
    /// Query issued against a tree that was never built.
    #[error("octree has not been built")]
    NotBuilt,

    /// The mesh buffers are inconsistent.
    #[error("malformed mesh: {0}")]
    MalformedMesh(#[from] MeshError),
}

/// Result type for octree operations.
pub type Result<T> = std::result::Result<T, OctreeError>;
