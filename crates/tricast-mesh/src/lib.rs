#![warn(missing_docs)]

//! Triangle mesh collaborator for the tricast kernel.
//!
//! A mesh is a flat `f32` vertex position buffer plus an optional flat
//! `u32` triangle index buffer. Without indices, consecutive vertex
//! triples are themselves the triangles.

use thiserror::Error;
use tricast_math::Point3;

/// Errors produced by mesh validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Vertex buffer is empty.
    #[error("vertex buffer is empty")]
    EmptyVertices,

    /// Vertex buffer length is not a whole number of positions.
    #[error("vertex buffer length {0} is not a multiple of 3")]
    RaggedVertices(usize),

    /// Unindexed vertex buffer does not decompose into whole triangles.
    #[error("vertex buffer length {0} does not form whole triangles")]
    RaggedSoup(usize),

    /// Index buffer length is not a whole number of triangles.
    #[error("index buffer length {0} is not a multiple of 3")]
    RaggedIndices(usize),

    /// An index refers past the end of the vertex buffer.
    #[error("index {index} out of range for {vertices} vertices")]
    IndexOutOfRange {
        /// The offending index value.
        index: u32,
        /// Number of vertex positions in the buffer.
        vertices: usize,
    },

    /// The buffers decode to zero triangles.
    #[error("mesh has no triangles")]
    NoTriangles,
}

/// A triangle mesh as seen by the octree builder.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Flat vertex positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub vertices: Vec<f32>,
    /// Optional flat triangle indices: `[i0, i1, i2, ...]`.
    pub indices: Option<Vec<u32>>,
}

impl TriangleMesh {
    /// Create an unindexed mesh: consecutive vertex triples are triangles.
    pub fn soup(vertices: Vec<f32>) -> Self {
        Self {
            vertices,
            indices: None,
        }
    }

    /// Create an indexed mesh.
    pub fn indexed(vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices: Some(indices),
        }
    }

    /// Number of vertex positions.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles the buffers decode to.
    pub fn num_triangles(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertices.len() / 9,
        }
    }

    /// Decode triangle `i` as three points, widening to `f64`.
    ///
    /// Panics when `i` is out of range or the buffers are malformed; call
    /// [`validate`](Self::validate) first.
    pub fn triangle(&self, i: usize) -> [Point3; 3] {
        match &self.indices {
            Some(indices) => {
                let tri = &indices[i * 3..i * 3 + 3];
                [
                    self.position(tri[0] as usize),
                    self.position(tri[1] as usize),
                    self.position(tri[2] as usize),
                ]
            }
            None => [
                self.position(i * 3),
                self.position(i * 3 + 1),
                self.position(i * 3 + 2),
            ],
        }
    }

    fn position(&self, v: usize) -> Point3 {
        Point3::new(
            self.vertices[v * 3] as f64,
            self.vertices[v * 3 + 1] as f64,
            self.vertices[v * 3 + 2] as f64,
        )
    }

    /// Check buffer consistency.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.vertices.is_empty() {
            return Err(MeshError::EmptyVertices);
        }
        if self.vertices.len() % 3 != 0 {
            return Err(MeshError::RaggedVertices(self.vertices.len()));
        }
        match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(MeshError::RaggedIndices(indices.len()));
                }
                let vertices = self.num_vertices();
                for &index in indices {
                    if index as usize >= vertices {
                        return Err(MeshError::IndexOutOfRange { index, vertices });
                    }
                }
            }
            None => {
                if self.vertices.len() % 9 != 0 {
                    return Err(MeshError::RaggedSoup(self.vertices.len()));
                }
            }
        }
        if self.num_triangles() == 0 {
            return Err(MeshError::NoTriangles);
        }
        Ok(())
    }
}
