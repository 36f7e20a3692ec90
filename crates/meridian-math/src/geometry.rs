// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ray and primitive intersection queries, plus the [`Aabb`] bounding volume.
//!
//! Every query is a pure function over vectors. A miss is reported as `None`;
//! degenerate input (a ray parallel to a plane, a zero-area triangle) is a miss
//! rather than an error.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::scalar::{clamp, maximum, minimum, EPSILON};
use crate::vector::Vec3;

/// Stand-in for a zero direction component in the slab test.
const SLAB_DIR_EPSILON: f32 = 1e-8;

/// Intersects a ray with an infinite plane.
///
/// Returns the ray parameter `t` of the hit (`origin + dir * t`). `t` is
/// negative when the plane lies behind the origin. Returns `None` only when
/// the ray is exactly parallel to the plane.
pub fn ray_plane_intersection(
    origin: Vec3,
    dir: Vec3,
    plane_point: Vec3,
    normal: Vec3,
) -> Option<f32> {
    let d = dir.dot(normal);
    if d == 0.0 {
        return None;
    }
    Some((plane_point - origin).dot(normal) / d)
}

/// Intersects a ray with a sphere.
///
/// `dir` must be unit length. Returns the distance to the nearest intersection
/// in front of the origin; from inside the sphere that is the exit point. When
/// the whole sphere lies behind the origin the returned distance is negative.
pub fn ray_sphere_intersection(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    debug_assert!(
        dir.length() < 1.01 && dir.length() > 0.99,
        "ray direction must be normalized"
    );
    let l = center - origin;
    let tca = l.dot(dir);
    let d2 = l.dot(l) - tca * tca;
    let r2 = radius * radius;
    if d2 > r2 {
        return None;
    }
    let thc = (r2 - d2).sqrt();
    let t = tca - thc;
    Some(if t >= 0.0 { t } else { tca + thc })
}

/// Intersects a ray with the axis-aligned box spanning `min` to `min + size`.
///
/// Returns the entry point, or `origin` itself when the ray starts inside the box.
pub fn ray_aabb_intersection(origin: Vec3, dir: Vec3, min: Vec3, size: Vec3) -> Option<Vec3> {
    let safe = |d: f32| if d == 0.0 { SLAB_DIR_EPSILON } else { d };
    let dirfrac = Vec3::new(1.0 / safe(dir.x), 1.0 / safe(dir.y), 1.0 / safe(dir.z));

    let max = min + size;
    let t1 = (min.x - origin.x) * dirfrac.x;
    let t2 = (max.x - origin.x) * dirfrac.x;
    let t3 = (min.y - origin.y) * dirfrac.y;
    let t4 = (max.y - origin.y) * dirfrac.y;
    let t5 = (min.z - origin.z) * dirfrac.z;
    let t6 = (max.z - origin.z) * dirfrac.z;

    let tmin = maximum(
        maximum(minimum(t1, t2), minimum(t3, t4)),
        minimum(t5, t6),
    );
    let tmax = minimum(
        minimum(maximum(t1, t2), maximum(t3, t4)),
        maximum(t5, t6),
    );

    if tmax < 0.0 || tmin > tmax {
        return None;
    }
    Some(if tmin < 0.0 { origin } else { origin + dir * tmin })
}

/// Shortest distance between a ray (`origin`, unit `dir`) and the segment `a`-`b`.
///
/// Used to pick gizmo axes and other thin segments with the mouse ray.
pub fn line_segment_distance(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3) -> f32 {
    let a_origin = origin - a;
    let ab = b - a;

    let dot1 = ab.dot(a_origin);
    let dot2 = ab.dot(dir);
    let dot3 = dir.dot(a_origin);
    let dot4 = ab.dot(ab);
    let dot5 = dir.dot(dir);

    let denom = dot4 * dot5 - dot2 * dot2;
    if denom.abs() < EPSILON {
        let x = origin + dir * (b - origin).dot(dir);
        return (b - x).length();
    }

    let numer = dot1 * dot2 - dot3 * dot4;
    let param_a = numer / denom;
    let param_b = (dot1 + dot2 * param_a) / dot4;

    if !(0.0..=1.0).contains(&param_b) {
        let closest = a + ab * clamp(param_b, 0.0, 1.0);
        let x = origin + dir * (closest - origin).dot(dir);
        return (closest - x).length();
    }

    ((origin + dir * param_a) - (a + ab * param_b)).length()
}

/// Intersects a ray with the triangle `p0`, `p1`, `p2`. Both faces are hit.
///
/// Returns the ray parameter of the hit. Hits behind the origin, rays parallel
/// to the triangle and zero-area triangles are misses.
pub fn ray_triangle_intersection(
    origin: Vec3,
    dir: Vec3,
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
) -> Option<f32> {
    let normal = (p1 - p0).cross(p2 - p0);
    let q = normal.dot(dir);
    if q == 0.0 {
        return None;
    }

    let d = -normal.dot(p0);
    let t = -(normal.dot(origin) + d) / q;
    if t < 0.0 {
        return None;
    }

    let hit_point = origin + dir * t;
    let edges = [(p0, p1), (p1, p2), (p2, p0)];
    for (from, to) in edges {
        if normal.dot((to - from).cross(hit_point - from)) < 0.0 {
            return None;
        }
    }

    Some(t)
}

/// Tests a sphere against the triangle `v0`, `v1`, `v2`.
///
/// This is a cheap approximation: the sphere must be within `radius` of the
/// triangle's plane and must contain at least one vertex. A sphere touching
/// only the interior or an edge of a large triangle is not detected.
pub fn sphere_triangle_intersection(
    center: Vec3,
    radius: f32,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> bool {
    let normal = (v0 - v1).cross(v2 - v1).normalize();
    let dist = center.dot(normal) - v0.dot(normal);
    if dist.abs() > radius {
        return false;
    }

    let squared_radius = radius * radius;
    [v0, v1, v2]
        .iter()
        .any(|v| (*v - center).length_squared() < squared_radius)
}

/// Represents an Axis-Aligned Bounding Box (AABB).
///
/// An AABB is a rectangular prism aligned with the coordinate axes, defined by its
/// minimum and maximum corner points. It is a simple but highly efficient volume
/// for broad-phase collision detection and visibility culling.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Aabb {
    /// The corner of the box with the smallest coordinates on all axes.
    pub min: Vec3,
    /// The corner of the box with the largest coordinates on all axes.
    pub max: Vec3,
}

impl Aabb {
    /// An empty box: merging anything into it yields that thing.
    pub const INVALID: Self = Self {
        min: Vec3::MAX,
        max: Vec3::MIN,
    };

    /// Creates a new `Aabb` from two corner points, given in any order.
    #[inline]
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates a box from its minimum corner and its extent on each axis.
    #[inline]
    pub fn from_min_size(min: Vec3, size: Vec3) -> Self {
        Self::from_min_max(min, min + size)
    }

    /// Creates an `Aabb` that tightly encloses a given set of points.
    ///
    /// Returns `None` if the input slice is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(
            rest.iter()
                .fold(Self::from_min_max(*first, *first), |acc, p| {
                    acc.merge(&Self::from_min_max(*p, *p))
                }),
        )
    }

    /// Calculates the center point of the `Aabb`.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Calculates the full size (width, height, depth) of the `Aabb`.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Checks if a point is contained within or on the boundary of the `Aabb`.
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Checks if this `Aabb` overlaps another. Touching boxes intersect.
    #[inline]
    pub fn intersects_aabb(&self, other: &Aabb) -> bool {
        (self.min.x <= other.max.x && self.max.x >= other.min.x)
            && (self.min.y <= other.max.y && self.max.y >= other.min.y)
            && (self.min.z <= other.max.z && self.max.z >= other.min.z)
    }

    /// Creates a new `Aabb` that encompasses both this `Aabb` and another one.
    #[inline]
    pub fn merge(&self, other: &Aabb) -> Self {
        Self {
            min: Vec3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Vec3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Casts a ray against the box. See [`ray_aabb_intersection`].
    #[inline]
    pub fn ray_intersection(&self, origin: Vec3, dir: Vec3) -> Option<Vec3> {
        ray_aabb_intersection(origin, dir, self.min, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb {
        Aabb::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_ray_plane() {
        let t = ray_plane_intersection(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::ZERO,
            Vec3::Z,
        );
        assert_relative_eq!(t.unwrap(), 5.0);
    }

    #[test]
    fn test_ray_plane_behind_and_parallel() {
        let behind = ray_plane_intersection(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::ZERO, Vec3::Z);
        assert_relative_eq!(behind.unwrap(), -5.0);
        assert_eq!(
            ray_plane_intersection(Vec3::new(0.0, 0.0, 5.0), Vec3::X, Vec3::ZERO, Vec3::Z),
            None
        );
    }

    #[test]
    fn test_ray_sphere() {
        let hit = ray_sphere_intersection(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec3::ZERO, 1.0);
        assert_relative_eq!(hit.unwrap(), 4.0);

        // From inside, the exit point is reported.
        let inside = ray_sphere_intersection(Vec3::ZERO, Vec3::Z, Vec3::ZERO, 1.0);
        assert_relative_eq!(inside.unwrap(), 1.0);

        let miss = ray_sphere_intersection(Vec3::new(0.0, 2.0, -5.0), Vec3::Z, Vec3::ZERO, 1.0);
        assert_eq!(miss, None);
    }

    #[test]
    fn test_ray_sphere_behind_origin_is_negative() {
        let t = ray_sphere_intersection(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::ZERO, 1.0);
        assert_relative_eq!(t.unwrap(), -4.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "ray direction must be normalized")]
    fn test_ray_sphere_requires_unit_direction() {
        let _ = ray_sphere_intersection(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, 1.0);
    }

    #[test]
    fn test_ray_aabb() {
        let hit = ray_aabb_intersection(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, Vec3::splat(-1.0), Vec3::splat(2.0));
        assert_eq!(hit, Some(Vec3::new(-1.0, 0.0, 0.0)));

        let miss = ray_aabb_intersection(Vec3::new(-5.0, 3.0, 0.0), Vec3::X, Vec3::splat(-1.0), Vec3::splat(2.0));
        assert_eq!(miss, None);

        let behind = ray_aabb_intersection(Vec3::new(5.0, 0.0, 0.0), Vec3::X, Vec3::splat(-1.0), Vec3::splat(2.0));
        assert_eq!(behind, None);
    }

    #[test]
    fn test_ray_aabb_from_inside_returns_origin() {
        let origin = Vec3::new(0.25, -0.5, 0.0);
        let hit = ray_aabb_intersection(origin, Vec3::new(0.0, 1.0, 0.0), Vec3::splat(-1.0), Vec3::splat(2.0));
        assert_eq!(hit, Some(origin));
    }

    #[test]
    fn test_line_segment_distance() {
        // Segment crosses above the ray.
        let d = line_segment_distance(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));
        assert_relative_eq!(d, 1.0, epsilon = 1e-5);

        // Parallel segment.
        let d = line_segment_distance(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 2.0, 0.0), Vec3::new(5.0, 2.0, 0.0));
        assert_relative_eq!(d, 2.0, epsilon = 1e-5);

        // Closest point clamped to the segment end.
        let d = line_segment_distance(Vec3::ZERO, Vec3::X, Vec3::new(3.0, 1.0, 0.0), Vec3::new(3.0, 5.0, 0.0));
        assert_relative_eq!(d, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_line_segment_distance_measures_from_clamped_start() {
        // The closest segment point clamps to `a`; the far end `b` must not be
        // used for the projection.
        let a = Vec3::new(0.0, 1.0, 0.0);
        let b = Vec3::new(6.0, 4.0, 3.0);
        let d = line_segment_distance(Vec3::ZERO, Vec3::X, a, b);
        assert_relative_eq!(d, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_triangle() {
        let (p0, p1, p2) = (Vec3::ZERO, Vec3::X, Vec3::Y);
        let down = Vec3::new(0.0, 0.0, -1.0);

        let t = ray_triangle_intersection(Vec3::new(0.2, 0.2, 1.0), down, p0, p1, p2);
        assert_relative_eq!(t.unwrap(), 1.0);

        // Back face is hit too.
        let t = ray_triangle_intersection(Vec3::new(0.2, 0.2, -1.0), Vec3::Z, p0, p1, p2);
        assert_relative_eq!(t.unwrap(), 1.0);

        assert_eq!(ray_triangle_intersection(Vec3::new(2.0, 2.0, 1.0), down, p0, p1, p2), None);
        assert_eq!(ray_triangle_intersection(Vec3::new(0.2, 0.2, 1.0), Vec3::Z, p0, p1, p2), None);
        assert_eq!(ray_triangle_intersection(Vec3::new(0.2, 0.2, 1.0), Vec3::X, p0, p1, p2), None);
    }

    #[test]
    fn test_ray_degenerate_triangle() {
        let t = ray_triangle_intersection(
            Vec3::new(0.5, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(2.0, 0.0, 0.0),
        );
        assert_eq!(t, None);
    }

    #[test]
    fn test_sphere_triangle() {
        let (v0, v1, v2) = (Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(sphere_triangle_intersection(Vec3::new(0.1, 0.0, 0.05), 0.5, v0, v1, v2));
        assert!(!sphere_triangle_intersection(Vec3::new(0.0, 0.0, 2.0), 0.5, v0, v1, v2));
    }

    #[test]
    fn test_sphere_triangle_interior_contact_is_missed() {
        let (v0, v1, v2) = (Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), Vec3::new(0.0, 100.0, 0.0));
        assert!(!sphere_triangle_intersection(Vec3::new(30.0, 30.0, 0.1), 1.0, v0, v1, v2));
    }

    #[test]
    fn test_aabb_construction() {
        let b = Aabb::from_min_max(Vec3::new(1.0, -1.0, 2.0), Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(b.min, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(b.center(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(b.size(), Vec3::splat(2.0));
        assert_eq!(Aabb::from_min_size(b.min, b.size()), b);

        let pts = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(-2.0, 3.0, 1.0), Vec3::ZERO];
        let fit = Aabb::from_points(&pts).unwrap();
        assert_eq!(fit.min, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(fit.max, Vec3::new(1.0, 3.0, 1.0));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_aabb_queries() {
        let b = unit_box();
        assert!(b.contains_point(Vec3::ZERO));
        assert!(b.contains_point(Vec3::ONE));
        assert!(!b.contains_point(Vec3::new(1.1, 0.0, 0.0)));

        let touching = Aabb::from_min_max(Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 1.0));
        let apart = Aabb::from_min_max(Vec3::splat(5.0), Vec3::splat(6.0));
        assert!(b.intersects_aabb(&touching));
        assert!(!b.intersects_aabb(&apart));

        let merged = b.merge(&apart);
        assert_eq!(merged.min, Vec3::splat(-1.0));
        assert_eq!(merged.max, Vec3::splat(6.0));
        assert_eq!(Aabb::INVALID.merge(&b), b);
    }

    #[test]
    fn test_aabb_ray_intersection() {
        let b = unit_box();
        assert_eq!(
            b.ray_intersection(Vec3::new(0.0, 0.0, -4.0), Vec3::Z),
            Some(Vec3::new(0.0, 0.0, -1.0))
        );
        assert_eq!(b.ray_intersection(Vec3::ZERO, Vec3::Z), Some(Vec3::ZERO));
    }
}
