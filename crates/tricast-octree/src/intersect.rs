//! Pure ray-box and ray-triangle intersection tests.
//!
//! These functions know nothing about the octree; the query traversal
//! composes them.

use tricast_math::{Point3, Vec3};

use crate::aabb::Aabb3;
use crate::ray::{Ray, RayHit};

/// Slab test of a ray against an AABB.
///
/// An origin strictly inside the box short-circuits to a `t = 0` hit at the
/// origin, with the ray direction standing in for the normal. Otherwise the
/// hit is at the entry parameter `t_near` and the returned `normal` is a
/// per-axis exit-side indicator (`+1`/`-1`/`0`), not a geometric normal.
///
/// Zero direction components divide to IEEE infinities and the slab
/// comparisons rely on that, so there are no explicit parallel-axis guards.
pub fn hit_box(ray: &Ray, aabb: &Aabb3) -> Option<RayHit> {
    let to_min = aabb.min - ray.origin;
    let to_max = aabb.max - ray.origin;

    // Origin strictly inside on every axis.
    if to_min.max() < 0.0 && to_max.min() > 0.0 {
        return Some(RayHit::new(0.0, ray.origin, ray.direction));
    }

    let t_lo = to_min.component_div(&ray.direction);
    let t_hi = to_max.component_div(&ray.direction);
    let t1 = t_lo.inf(&t_hi);
    let t2 = t_lo.sup(&t_hi);
    let t_near = t1.max();
    let t_far = t2.min();

    if t_near > 0.0 && t_near < t_far {
        let point = ray.at(t_near);
        // Hit point compared directly against the bounds, no epsilon.
        let normal = Vec3::new(
            exit_side(point.x, aabb.min.x, aabb.max.x),
            exit_side(point.y, aabb.min.y, aabb.max.y),
            exit_side(point.z, aabb.min.z, aabb.max.z),
        );
        Some(RayHit::new(t_near, point, normal))
    } else {
        None
    }
}

/// Side of `[lo, hi]` that `v` falls on: `+1` above, `-1` below, `0` within.
fn exit_side(v: f64, lo: f64, hi: f64) -> f64 {
    ((v > hi) as i8 - (v < lo) as i8) as f64
}

/// Ray-triangle intersection via a plane hit plus barycentric containment.
///
/// Back faces are culled: a ray whose direction has positive dot product
/// with the face normal never hits. Triangle edges are inclusive. A
/// zero-area triangle yields NaN in the solve, which fails every acceptance
/// comparison and reports no hit.
pub fn hit_triangle(ray: &Ray, a: &Point3, b: &Point3, c: &Point3) -> Option<RayHit> {
    let ab = b - a;
    let ac = c - a;
    let normal = ab.cross(&ac).normalize();
    if normal.dot(&ray.direction) > 0.0 {
        return None;
    }

    let t = normal.dot(&(a - ray.origin)) / normal.dot(&ray.direction);
    // Written so a NaN t (parallel ray, degenerate triangle) is rejected too.
    if !(t > 0.0) {
        return None;
    }

    let point = ray.at(t);
    let to_hit = point - a;
    let dot00 = ac.dot(&ac);
    let dot01 = ac.dot(&ab);
    let dot02 = ac.dot(&to_hit);
    let dot11 = ab.dot(&ab);
    let dot12 = ab.dot(&to_hit);
    let denom = dot00 * dot11 - dot01 * dot01;
    let u = (dot11 * dot02 - dot01 * dot12) / denom;
    let v = (dot00 * dot12 - dot01 * dot02) / denom;

    if u >= 0.0 && v >= 0.0 && u + v <= 1.0 {
        Some(RayHit::new(t, point, normal))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb3 {
        Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_box_hit_analytic() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
        let hit = hit_box(&ray, &unit_box()).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-12);
        assert!((hit.point.x - 0.0).abs() < 1e-12);
        assert!((hit.point.y - 0.5).abs() < 1e-12);
        // Entry point sits exactly on the x face, inside the bounds on every
        // axis, so the unadjusted indicator is all zeros.
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_box_miss_parallel_axis() {
        // Direction has zero y/z components; the slab math runs on infinities.
        let ray = Ray::new(Point3::new(-5.0, 5.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(hit_box(&ray, &unit_box()).is_none());
    }

    #[test]
    fn test_box_hit_diagonal() {
        let ray = Ray::new(Point3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let hit = hit_box(&ray, &unit_box()).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_box_origin_inside() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vec3::new(0.0, 1.0, 0.0));
        let hit = hit_box(&ray, &unit_box()).unwrap();
        assert_eq!(hit.t, 0.0);
        assert_eq!(hit.point, ray.origin);
        assert_eq!(hit.normal, ray.direction);
    }

    #[test]
    fn test_box_behind_origin() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0));
        assert!(hit_box(&ray, &unit_box()).is_none());
    }

    #[test]
    fn test_triangle_hit() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = hit_triangle(&ray, &a, &b, &c).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!((hit.point.x - 0.25).abs() < 1e-12);
        assert!((hit.point.y - 0.25).abs() < 1e-12);
        assert!(hit.point.z.abs() < 1e-12);
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_triangle_backface_culled() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        // Same line as a front-face hit, approaching from behind the normal
        let ray = Ray::new(Point3::new(0.25, 0.25, -1.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(hit_triangle(&ray, &a, &b, &c).is_none());
    }

    #[test]
    fn test_triangle_edge_inclusive() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        // (0.5, 0.5) lies on the hypotenuse: u + v == 1
        let ray = Ray::new(Point3::new(0.5, 0.5, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_triangle(&ray, &a, &b, &c).is_some());
        // A vertex counts as well
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_triangle(&ray, &a, &b, &c).is_some());
    }

    #[test]
    fn test_triangle_outside_barycentric() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(Point3::new(0.75, 0.75, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_triangle(&ray, &a, &b, &c).is_none());
    }

    #[test]
    fn test_triangle_behind_origin() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        // Plane is behind the origin along this direction: t < 0
        let ray = Ray::new(Point3::new(0.25, 0.25, -1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_triangle(&ray, &a, &b, &c).is_none());
    }

    #[test]
    fn test_triangle_degenerate_reports_none() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(0.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(Point3::new(0.0, 0.5, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_triangle(&ray, &a, &b, &c).is_none());
    }
}
