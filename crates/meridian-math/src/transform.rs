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

//! Position + rotation (+ scale) composites used to place objects in a hierarchy.
//!
//! Three variants exist, differing in precision and in whether they carry a
//! scale:
//!
//! | type                    | position | scale |
//! |-------------------------|----------|-------|
//! | [`Transform`]           | `DVec3`  | `f32` |
//! | [`RigidTransform`]      | `DVec3`  | none  |
//! | [`LocalRigidTransform`] | `Vec3`   | none  |
//!
//! Composition reads parent first: `parent * child` takes a transform expressed
//! in the parent's frame and returns it in the parent's own space.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

use crate::dvec::DVec3;
use crate::matrix::Matrix;
use crate::quaternion::{nlerp, Quat};
use crate::vector::Vec3;

/// World-space placement with a double-precision position and a uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Transform {
    /// The position in world space.
    pub pos: DVec3,
    /// The orientation.
    pub rot: Quat,
    /// The uniform scale factor.
    pub scale: f32,
}

/// A [`Transform`] without scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct RigidTransform {
    /// The position in world space.
    pub pos: DVec3,
    /// The orientation.
    pub rot: Quat,
}

/// A parent-relative placement, small enough for single precision.
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
pub struct LocalRigidTransform {
    /// The position relative to the parent.
    pub pos: Vec3,
    /// The orientation relative to the parent.
    pub rot: Quat,
}

impl Transform {
    /// The identity transform, which results in no change.
    pub const IDENTITY: Self = Self {
        pos: DVec3::ZERO,
        rot: Quat::IDENTITY,
        scale: 1.0,
    };

    /// Creates a new transform.
    #[inline]
    pub const fn new(pos: DVec3, rot: Quat, scale: f32) -> Self {
        Self { pos, rot, scale }
    }

    /// Returns the inverse transform.
    ///
    /// `scale` must be non-zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use meridian_math::{DVec3, Quat, Transform, Vec3};
    ///
    /// let t = Transform::new(DVec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, 2.0);
    /// let back = t.inverted().transform_dvec3(t.transform(Vec3::ONE));
    /// assert!((back - DVec3::new(1.0, 1.0, 1.0)).length() < 1e-6);
    /// ```
    pub fn inverted(&self) -> Self {
        let rot = self.rot.conjugated();
        Self {
            pos: rot.rotate_dvec3(-self.pos / f64::from(self.scale)),
            rot,
            scale: 1.0 / self.scale,
        }
    }

    /// Transforms a local point into world space: scale, rotate, translate.
    #[inline]
    pub fn transform(&self, value: Vec3) -> DVec3 {
        self.pos + self.rot.rotate(value) * self.scale
    }

    /// Transforms a double-precision point into world space.
    #[inline]
    pub fn transform_dvec3(&self, value: DVec3) -> DVec3 {
        self.pos + self.rot.rotate_dvec3(value) * f64::from(self.scale)
    }

    /// Drops the scale.
    #[inline]
    pub fn rigid_part(&self) -> RigidTransform {
        RigidTransform::new(self.pos, self.rot)
    }

    /// Builds the equivalent matrix. The position is narrowed to `f32`, so
    /// callers rendering far from the origin should make it camera-relative first.
    pub fn to_matrix(&self) -> Matrix {
        let mut m = Matrix::from_translation_rotation(self.pos.as_vec3(), self.rot);
        m.multiply_3x3(self.scale);
        m
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;
    /// Places the child transform `rhs` in this transform's space. The child's
    /// position is scaled by the parent's scale before rotation.
    #[inline]
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            pos: self.rot.rotate_dvec3(rhs.pos * f64::from(self.scale)) + self.pos,
            rot: self.rot * rhs.rot,
            scale: self.scale * rhs.scale,
        }
    }
}

impl Mul<LocalRigidTransform> for Transform {
    type Output = Transform;
    /// Places a local child in this transform's space. The result keeps the
    /// parent's scale.
    #[inline]
    fn mul(self, rhs: LocalRigidTransform) -> Transform {
        Transform {
            pos: self.pos + self.rot.rotate(rhs.pos * self.scale),
            rot: self.rot * rhs.rot,
            scale: self.scale,
        }
    }
}

impl RigidTransform {
    /// The identity transform, which results in no change.
    pub const IDENTITY: Self = Self {
        pos: DVec3::ZERO,
        rot: Quat::IDENTITY,
    };

    /// Creates a new rigid transform.
    #[inline]
    pub const fn new(pos: DVec3, rot: Quat) -> Self {
        Self { pos, rot }
    }

    /// Returns the inverse transform.
    pub fn inverted(&self) -> Self {
        let rot = self.rot.conjugated();
        Self {
            pos: rot.rotate_dvec3(-self.pos),
            rot,
        }
    }

    /// Transforms a point: rotate, then translate.
    #[inline]
    pub fn transform(&self, value: DVec3) -> DVec3 {
        self.pos + self.rot.rotate_dvec3(value)
    }

    /// Adds a uniform scale.
    #[inline]
    pub fn with_scale(&self, scale: f32) -> Transform {
        Transform::new(self.pos, self.rot, scale)
    }

    /// Builds the equivalent matrix, narrowing the position to `f32`.
    #[inline]
    pub fn to_matrix(&self) -> Matrix {
        Matrix::from_translation_rotation(self.pos.as_vec3(), self.rot)
    }
}

impl Default for RigidTransform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<RigidTransform> for RigidTransform {
    type Output = RigidTransform;
    #[inline]
    fn mul(self, rhs: RigidTransform) -> RigidTransform {
        RigidTransform {
            pos: self.rot.rotate_dvec3(rhs.pos) + self.pos,
            rot: self.rot * rhs.rot,
        }
    }
}

impl Mul<LocalRigidTransform> for RigidTransform {
    type Output = RigidTransform;
    /// The local offset is rotated in single precision and widened only when
    /// added to the world position.
    #[inline]
    fn mul(self, rhs: LocalRigidTransform) -> RigidTransform {
        RigidTransform {
            pos: DVec3::from(self.rot.rotate(rhs.pos)) + self.pos,
            rot: self.rot * rhs.rot,
        }
    }
}

impl LocalRigidTransform {
    /// The identity transform, which results in no change.
    pub const IDENTITY: Self = Self {
        pos: Vec3::ZERO,
        rot: Quat::IDENTITY,
    };

    /// Creates a new local transform.
    #[inline]
    pub const fn new(pos: Vec3, rot: Quat) -> Self {
        Self { pos, rot }
    }

    /// Returns the inverse transform.
    pub fn inverted(&self) -> Self {
        let rot = self.rot.conjugated();
        Self {
            pos: rot.rotate(-self.pos),
            rot,
        }
    }

    /// Blends towards `rhs`: position by lerp, rotation by [`nlerp`].
    ///
    /// Used to blend animation keyframes. `t` is not clamped.
    pub fn interpolate(&self, rhs: &LocalRigidTransform, t: f32) -> Self {
        Self {
            pos: Vec3::lerp(self.pos, rhs.pos, t),
            rot: nlerp(self.rot, rhs.rot, t),
        }
    }

    /// Transforms a point: rotate, then translate.
    #[inline]
    pub fn transform(&self, value: Vec3) -> Vec3 {
        self.pos + self.rot.rotate(value)
    }

    /// Builds the equivalent matrix.
    #[inline]
    pub fn to_matrix(&self) -> Matrix {
        Matrix::from_translation_rotation(self.pos, self.rot)
    }
}

impl Default for LocalRigidTransform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<LocalRigidTransform> for LocalRigidTransform {
    type Output = LocalRigidTransform;
    #[inline]
    fn mul(self, rhs: LocalRigidTransform) -> LocalRigidTransform {
        LocalRigidTransform {
            pos: self.rot.rotate(rhs.pos) + self.pos,
            rot: self.rot * rhs.rot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::FRAC_PI_2;
    use approx::assert_abs_diff_eq;

    fn assert_dvec3_eq(a: DVec3, b: DVec3, eps: f64) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = eps);
        assert_abs_diff_eq!(a.y, b.y, epsilon = eps);
        assert_abs_diff_eq!(a.z, b.z, epsilon = eps);
    }

    fn assert_same_rotation(a: Quat, b: Quat) {
        assert_abs_diff_eq!(a.dot(b).abs(), 1.0, epsilon = 1e-5);
    }

    fn parent() -> Transform {
        Transform::new(
            DVec3::new(10.0, 0.0, -4.0),
            Quat::from_axis_angle(Vec3::Y, FRAC_PI_2),
            2.0,
        )
    }

    #[test]
    fn test_transform_point() {
        // Scale, then rotate +X onto -Z, then translate.
        let p = parent().transform(Vec3::X);
        assert_dvec3_eq(p, DVec3::new(10.0, 0.0, -6.0), 1e-5);
        let q = parent().transform_dvec3(DVec3::new(1.0, 0.0, 0.0));
        assert_dvec3_eq(q, p, 1e-5);
    }

    #[test]
    fn test_composition_matches_sequential_transform() {
        let child = Transform::new(
            DVec3::new(1.0, 2.0, 3.0),
            Quat::from_axis_angle(Vec3::X, 0.4),
            0.5,
        );
        let world = parent() * child;
        let v = Vec3::new(-1.0, 0.5, 2.0);
        let expected = parent().transform_dvec3(child.transform(v));
        assert_dvec3_eq(world.transform(v), expected, 1e-4);
        assert_eq!(world.scale, 1.0);
    }

    #[test]
    fn test_transform_times_local() {
        let local = LocalRigidTransform::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY);
        let world = parent() * local;
        assert_dvec3_eq(world.pos, DVec3::new(10.0, 0.0, -6.0), 1e-5);
        assert_eq!(world.scale, 2.0);
    }

    #[test]
    fn test_inverse_undoes_transform() {
        let t = parent();
        let id = t * t.inverted();
        assert_dvec3_eq(id.pos, DVec3::ZERO, 1e-5);
        assert_abs_diff_eq!(id.scale, 1.0);
        assert_same_rotation(id.rot, Quat::IDENTITY);

        let p = DVec3::new(3.0, -7.0, 1.5);
        assert_dvec3_eq(t.inverted().transform_dvec3(t.transform_dvec3(p)), p, 1e-5);
    }

    #[test]
    fn test_to_matrix_agrees_with_transform() {
        let t = parent();
        let v = Vec3::new(0.5, 1.0, -2.0);
        let from_matrix = DVec3::from(t.to_matrix().transform_point(v));
        assert_dvec3_eq(from_matrix, t.transform(v), 1e-4);
    }

    #[test]
    fn test_rigid_part_and_with_scale() {
        let t = parent();
        let rigid = t.rigid_part();
        assert_eq!(rigid.pos, t.pos);
        assert_eq!(rigid.rot, t.rot);
        assert_eq!(rigid.with_scale(2.0), t);
        assert_eq!(Transform::default(), Transform::IDENTITY);
    }

    #[test]
    fn test_rigid_composition_and_inverse() {
        let a = RigidTransform::new(DVec3::new(1.0, 2.0, 3.0), Quat::from_axis_angle(Vec3::Z, 0.3));
        let b = RigidTransform::new(DVec3::new(-4.0, 0.0, 1.0), Quat::from_axis_angle(Vec3::X, 1.0));
        let p = DVec3::new(0.5, 0.5, 0.5);
        assert_dvec3_eq((a * b).transform(p), a.transform(b.transform(p)), 1e-5);
        assert_dvec3_eq(a.inverted().transform(a.transform(p)), p, 1e-5);
        assert_dvec3_eq(
            DVec3::from(a.to_matrix().transform_point(p.as_vec3())),
            a.transform(p),
            1e-5,
        );
    }

    #[test]
    fn test_mixed_precision_keeps_world_resolution() {
        let far = RigidTransform::new(DVec3::new(1.0e9, 0.0, 0.0), Quat::IDENTITY);
        let local = LocalRigidTransform::new(Vec3::new(0.25, 0.0, 0.0), Quat::IDENTITY);
        let world = far * local;
        assert_eq!(world.pos.x - 1.0e9, 0.25);
    }

    #[test]
    fn test_local_transforms() {
        let a = LocalRigidTransform::new(Vec3::new(0.0, 1.0, 0.0), Quat::from_axis_angle(Vec3::Y, 0.5));
        let b = LocalRigidTransform::new(Vec3::new(2.0, 0.0, 0.0), Quat::from_axis_angle(Vec3::Z, 0.2));
        let v = Vec3::new(1.0, 1.0, 1.0);

        let ab = (a * b).transform(v);
        let seq = a.transform(b.transform(v));
        assert_abs_diff_eq!(ab.x, seq.x, epsilon = 1e-5);
        assert_abs_diff_eq!(ab.z, seq.z, epsilon = 1e-5);

        let back = a.inverted().transform(a.transform(v));
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-5);

        let m = a.to_matrix().transform_point(v);
        assert_abs_diff_eq!(m.x, a.transform(v).x, epsilon = 1e-5);
    }

    #[test]
    fn test_interpolate() {
        let a = LocalRigidTransform::new(Vec3::ZERO, Quat::IDENTITY);
        let b = LocalRigidTransform::new(Vec3::new(2.0, 0.0, 0.0), Quat::from_axis_angle(Vec3::Y, 1.0));
        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid.pos, Vec3::new(1.0, 0.0, 0.0));
        assert_same_rotation(mid.rot, Quat::from_axis_angle(Vec3::Y, 0.5));
        assert_eq!(a.interpolate(&b, 0.0).pos, a.pos);
    }

    #[test]
    fn test_local_is_gpu_uploadable() {
        let t = LocalRigidTransform::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&t));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0]);
    }
}
