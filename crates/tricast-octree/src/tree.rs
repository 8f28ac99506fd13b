//! Octree construction and nearest-hit ray queries.
//!
//! The tree is built once from a static mesh and is immutable afterwards.
//! Triangles are copied by value out of the mesh buffers, so the tree stays
//! valid regardless of what happens to the source mesh.

use tricast_math::{Point3, Vec3};
use tricast_mesh::{MeshError, TriangleMesh};

use crate::aabb::Aabb3;
use crate::error::{OctreeError, Result};
use crate::intersect::{hit_box, hit_triangle};
use crate::ray::{Ray, RayHit};

/// A triangle held by value in the tree.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex.
    pub a: Point3,
    /// Second vertex.
    pub b: Point3,
    /// Third vertex.
    pub c: Point3,
}

impl Triangle {
    /// Bounding box of the three vertices.
    pub fn aabb(&self) -> Aabb3 {
        Aabb3::from_points([&self.a, &self.b, &self.c])
    }

    /// True when the vertices span zero area.
    pub fn is_degenerate(&self) -> bool {
        (self.b - self.a).cross(&(self.c - self.a)).norm_squared() == 0.0
    }
}

/// Child corner selector per octant: low (0) or high (1) half along x, y, z.
const OCTANT_TABLE: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
];

/// Parameters controlling octree construction.
#[derive(Debug, Clone, Copy)]
pub struct BuildParams {
    /// Fraction of the mesh's triangle count a node may hold before it splits.
    pub max_node_triangles_ratio: f64,
    /// Maximum split depth below the root.
    pub max_depth: u32,
    /// Root box margin as a fraction of its extent, per axis.
    pub margin_ratio: f64,
    /// Lower bound on the root box margin, per axis.
    pub min_margin: f64,
    /// Drop zero-area triangles at build time instead of carrying them.
    pub reject_degenerate: bool,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            max_node_triangles_ratio: 0.1,
            max_depth: 8,
            margin_ratio: 0.01,
            min_margin: 0.1,
            reject_degenerate: false,
        }
    }
}

/// A single octree node: a box, the triangles stored at this level, and the
/// surviving children if the node ever split.
#[derive(Debug, Clone)]
pub struct Node {
    /// This node's box.
    pub aabb: Aabb3,
    /// Triangles stored directly at this node. For an internal node these
    /// are the straddlers that fit inside no single child.
    pub faces: Vec<Triangle>,
    /// `None` until the node splits; after trimming, only children with a
    /// nonzero `inside` count remain.
    pub children: Option<Vec<Node>>,
    /// Number of triangles whose insertion passed through this node,
    /// including those pushed further down.
    pub inside: usize,
}

impl Node {
    fn new(aabb: Aabb3) -> Self {
        Self {
            aabb,
            faces: Vec::new(),
            children: None,
            inside: 0,
        }
    }
}

/// Per-query intersection counters.
///
/// Accumulated per call rather than process-wide, so concurrent queries on
/// a shared tree stay independent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueryStats {
    /// Nodes whose contents were searched.
    pub boxes_tested: usize,
    /// Triangles run through the triangle test.
    pub triangles_tested: usize,
}

/// Octree over a triangle mesh for accelerated nearest-hit ray queries.
#[derive(Debug, Clone, Default)]
pub struct Octree {
    root: Option<Node>,
    total_depth: u32,
    total_nodes: usize,
    total_triangles: usize,
    max_node_triangles: f64,
}

struct BuildCtx {
    max_node_triangles: f64,
    max_depth: u32,
    total_depth: u32,
}

impl Octree {
    /// Create an empty, unbuilt tree.
    ///
    /// Queries fail with [`OctreeError::NotBuilt`] until a tree produced by
    /// [`build`](Self::build) takes its place.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an octree from a mesh with default parameters.
    pub fn build(mesh: &TriangleMesh) -> Result<Self> {
        Self::build_with(mesh, &BuildParams::default())
    }

    /// Build an octree from a mesh.
    pub fn build_with(mesh: &TriangleMesh, params: &BuildParams) -> Result<Self> {
        mesh.validate()?;

        let mut triangles = Vec::with_capacity(mesh.num_triangles());
        for i in 0..mesh.num_triangles() {
            let [a, b, c] = mesh.triangle(i);
            let tri = Triangle { a, b, c };
            if params.reject_degenerate && tri.is_degenerate() {
                continue;
            }
            triangles.push(tri);
        }
        if triangles.is_empty() {
            return Err(OctreeError::MalformedMesh(MeshError::NoTriangles));
        }

        let mut aabb = Aabb3::empty();
        for tri in &triangles {
            aabb.include_point(&tri.a);
            aabb.include_point(&tri.b);
            aabb.include_point(&tri.c);
        }
        // Triangles sitting exactly on the computed bounds would be
        // ambiguous for the containment test; pad the root box.
        let margin = (aabb.size() * params.margin_ratio).sup(&Vec3::repeat(params.min_margin));
        aabb.expand(&margin);

        let total_triangles = triangles.len();
        let mut ctx = BuildCtx {
            max_node_triangles: total_triangles as f64 * params.max_node_triangles_ratio,
            max_depth: params.max_depth,
            total_depth: 0,
        };

        let mut root = Node::new(aabb);
        for tri in triangles {
            insert(&mut root, tri, 0, &mut ctx);
        }

        let total_nodes = trim(&mut root);

        Ok(Self {
            root: Some(root),
            total_depth: ctx.total_depth,
            total_nodes,
            total_triangles,
            max_node_triangles: ctx.max_node_triangles,
        })
    }

    /// Root node, if the tree has been built.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Deepest split level reached during construction.
    pub fn total_depth(&self) -> u32 {
        self.total_depth
    }

    /// Node count after trimming.
    pub fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    /// Number of triangles the tree owns.
    pub fn total_triangles(&self) -> usize {
        self.total_triangles
    }

    /// Split threshold: triangles a node may hold before it splits.
    pub fn max_node_triangles(&self) -> f64 {
        self.max_node_triangles
    }

    /// Nearest hit of a ray against the mesh, or `None` for a miss.
    ///
    /// `t_min`/`t_max` optionally restrict the accepted ray-parameter range.
    /// Fails with [`OctreeError::NotBuilt`] on an unbuilt tree.
    pub fn test_ray(
        &self,
        origin: &Point3,
        direction: &Vec3,
        t_min: Option<f64>,
        t_max: Option<f64>,
    ) -> Result<Option<RayHit>> {
        let mut stats = QueryStats::default();
        self.test_ray_with_stats(origin, direction, t_min, t_max, &mut stats)
    }

    /// Like [`test_ray`](Self::test_ray), also accumulating per-query
    /// counters into `stats`.
    pub fn test_ray_with_stats(
        &self,
        origin: &Point3,
        direction: &Vec3,
        t_min: Option<f64>,
        t_max: Option<f64>,
        stats: &mut QueryStats,
    ) -> Result<Option<RayHit>> {
        let root = self.root.as_ref().ok_or(OctreeError::NotBuilt)?;
        let ray = Ray::new(*origin, *direction);

        // Mesh bounding box missed entirely: done without descending.
        if hit_box(&ray, &root.aabb).is_none() {
            return Ok(None);
        }

        let Some(mut hit) = search(root, &ray, stats) else {
            return Ok(None);
        };
        if t_min.is_some_and(|lo| hit.t < lo) || t_max.is_some_and(|hi| hit.t > hi) {
            return Ok(None);
        }
        hit.point = ray.at(hit.t);
        Ok(Some(hit))
    }
}

fn insert(node: &mut Node, face: Triangle, depth: u32, ctx: &mut BuildCtx) {
    node.inside += 1;

    // Already split: route to the unique fully-containing child, or keep
    // the straddler here.
    if let Some(mut children) = node.children.take() {
        let face_aabb = face.aabb();
        match children.iter().position(|c| c.aabb.contains(&face_aabb)) {
            Some(i) => insert(&mut children[i], face, depth + 1, ctx),
            None => node.faces.push(face),
        }
        node.children = Some(children);
        return;
    }

    node.faces.push(face);

    if node.faces.len() as f64 > ctx.max_node_triangles && depth < ctx.max_depth {
        let mut children = split_octants(&node.aabb);
        if ctx.total_depth < depth + 1 {
            ctx.total_depth = depth + 1;
        }

        // Redistribute everything this node held; straddlers stay.
        let faces = std::mem::take(&mut node.faces);
        for face in faces {
            let face_aabb = face.aabb();
            match children.iter().position(|c| c.aabb.contains(&face_aabb)) {
                Some(i) => insert(&mut children[i], face, depth + 1, ctx),
                None => node.faces.push(face),
            }
        }
        node.children = Some(children);
    }
}

/// Create the eight child nodes of a box, one per entry of `OCTANT_TABLE`.
fn split_octants(aabb: &Aabb3) -> Vec<Node> {
    OCTANT_TABLE
        .iter()
        .map(|corner| Node::new(aabb.octant(corner)))
        .collect()
}

/// Drop children no triangle ever reached; returns the surviving node count.
fn trim(node: &mut Node) -> usize {
    let Some(children) = node.children.take() else {
        return 1;
    };
    let mut kept: Vec<Node> = children.into_iter().filter(|c| c.inside > 0).collect();
    let mut count = 1;
    for child in &mut kept {
        count += trim(child);
    }
    node.children = Some(kept);
    count
}

/// Recursive nearest-hit search below `node`.
fn search(node: &Node, ray: &Ray, stats: &mut QueryStats) -> Option<RayHit> {
    stats.boxes_tested += 1;

    let mut best: Option<RayHit> = None;

    // This node's own faces, straddlers included.
    for tri in &node.faces {
        stats.triangles_tested += 1;
        if let Some(hit) = hit_triangle(ray, &tri.a, &tri.b, &tri.c) {
            merge(&mut best, hit);
        }
    }

    if let Some(children) = &node.children {
        for child in children {
            let Some(probe) = hit_box(ray, &child.aabb) else {
                continue;
            };
            // Child box entered beyond the best hit so far: nothing inside
            // it can be nearer. An inside-the-box probe has t = 0 and is
            // never pruned.
            if best.as_ref().is_some_and(|b| probe.t > b.t) {
                continue;
            }
            if let Some(hit) = search(child, ray, stats) {
                merge(&mut best, hit);
            }
        }
    }

    best
}

fn merge(best: &mut Option<RayHit>, candidate: RayHit) {
    match best {
        Some(current) => current.merge(candidate),
        None => *best = Some(candidate),
    }
}
