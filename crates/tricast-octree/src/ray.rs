//! Ray representation and hit records.

use tricast_math::{Point3, Vec3};

/// A ray in 3D space defined by origin and direction.
///
/// The direction is used as given, not normalized: `t` values are in units
/// of the direction's length. Zero components are legal; the slab test
/// relies on their IEEE-754 division behavior.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}

/// Result of a ray intersection test.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Parameter along the ray where the intersection occurs.
    pub t: f64,
    /// 3D intersection point.
    pub point: Point3,
    /// Triangle tests return the unit face normal. Box tests return a
    /// signed per-axis exit indicator (`+1`/`-1`/`0`), or the ray direction
    /// when the origin already lies inside the box; treat those as opaque.
    pub normal: Vec3,
}

impl RayHit {
    /// Create a new ray hit.
    pub fn new(t: f64, point: Point3, normal: Vec3) -> Self {
        Self { t, point, normal }
    }

    /// Keep the nearer of two hits: `other` wins only when `0 < other.t < self.t`.
    ///
    /// A NaN `t` fails both comparisons and never replaces a valid hit.
    pub fn merge(&mut self, other: RayHit) {
        if other.t > 0.0 && other.t < self.t {
            *self = other;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -2.0));
        let p = ray.at(0.5);
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
        assert!((p.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_merge_keeps_nearer() {
        let mut hit = RayHit::new(2.0, Point3::new(0.0, 0.0, 2.0), Vec3::z());
        hit.merge(RayHit::new(1.0, Point3::new(0.0, 0.0, 1.0), Vec3::z()));
        assert!((hit.t - 1.0).abs() < 1e-12);

        hit.merge(RayHit::new(3.0, Point3::new(0.0, 0.0, 3.0), Vec3::z()));
        assert!((hit.t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_merge_rejects_nonpositive_and_nan() {
        let mut hit = RayHit::new(2.0, Point3::new(0.0, 0.0, 2.0), Vec3::z());

        hit.merge(RayHit::new(0.0, Point3::origin(), Vec3::z()));
        assert!((hit.t - 2.0).abs() < 1e-12);

        hit.merge(RayHit::new(-1.0, Point3::origin(), Vec3::z()));
        assert!((hit.t - 2.0).abs() < 1e-12);

        hit.merge(RayHit::new(f64::NAN, Point3::origin(), Vec3::z()));
        assert!((hit.t - 2.0).abs() < 1e-12);
    }
}
