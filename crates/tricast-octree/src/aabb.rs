//! Axis-aligned bounding boxes.

use tricast_math::{Point3, Vec3};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Minimal AABB containing every point of `points`.
    ///
    /// The result is the inverted empty box when `points` yields nothing.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include_point(p);
        }
        aabb
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Test if `other` lies entirely within this box, boundaries inclusive.
    ///
    /// Full containment on every axis for both corners, not mere overlap.
    pub fn contains(&self, other: &Aabb3) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.min.z >= self.min.z
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
            && other.max.z <= self.max.z
    }

    /// Grow the box by a per-axis margin in both directions.
    pub fn expand(&mut self, margin: &Vec3) {
        self.min.x -= margin.x;
        self.min.y -= margin.y;
        self.min.z -= margin.z;
        self.max.x += margin.x;
        self.max.y += margin.y;
        self.max.z += margin.z;
    }

    /// The child box selected by a low/high corner choice per axis
    /// (0.0 = low half, 1.0 = high half).
    pub fn octant(&self, corner: &[f64; 3]) -> Self {
        let half = self.size() * 0.5;
        let min = Point3::new(
            self.min.x + half.x * corner[0],
            self.min.y + half.y * corner[1],
            self.min.z + half.z * corner[2],
        );
        Self { min, max: min + half }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let points = [
            Point3::new(1.0, -2.0, 3.0),
            Point3::new(-1.0, 2.0, 0.0),
            Point3::new(0.5, 0.0, 5.0),
        ];
        let aabb = Aabb3::from_points(&points);
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_contains_is_full_containment() {
        let outer = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0));
        let inner = Aabb3::new(Point3::new(2.0, 2.0, 2.0), Point3::new(8.0, 8.0, 8.0));
        let overlapping = Aabb3::new(Point3::new(5.0, 5.0, 5.0), Point3::new(15.0, 5.0, 5.0));

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        // Overlap is not containment
        assert!(!outer.contains(&overlapping));
        // A box contains itself (boundaries inclusive)
        assert!(outer.contains(&outer));
    }

    #[test]
    fn test_expand() {
        let mut aabb = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        aabb.expand(&Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(aabb.min, Point3::new(-0.1, -0.2, -0.3));
        assert_eq!(aabb.max, Point3::new(1.1, 1.2, 1.3));
    }

    #[test]
    fn test_octant_halves_parent() {
        let parent = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0));

        let low = parent.octant(&[0.0, 0.0, 0.0]);
        assert_eq!(low.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(low.max, Point3::new(1.0, 2.0, 3.0));

        let high = parent.octant(&[1.0, 1.0, 1.0]);
        assert_eq!(high.min, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(high.max, Point3::new(2.0, 4.0, 6.0));

        let mixed = parent.octant(&[1.0, 0.0, 1.0]);
        assert_eq!(mixed.min, Point3::new(1.0, 0.0, 3.0));
        assert_eq!(mixed.max, Point3::new(2.0, 2.0, 6.0));

        assert!(parent.contains(&low));
        assert!(parent.contains(&high));
        assert!(parent.contains(&mixed));
    }
}
