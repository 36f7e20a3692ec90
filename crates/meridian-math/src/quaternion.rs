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

//! Provides a quaternion type for representing 3D rotations.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, MulAssign};

use crate::dvec::DVec3;
use crate::error::{check_len, MathError};
use crate::matrix::Matrix;
use crate::scalar::{FRAC_PI_2, PI};
use crate::vector::{Vec3, Vec4};

/// Represents a rotation in 3D space.
///
/// A quaternion is stored as `(x, y, z, w)`, where `[x, y, z]` is the vector
/// part and `w` is the scalar part. Every constructor in this module yields a
/// unit quaternion; only raw field assignment or [`Quat::new`] can produce
/// one that is not, and [`Quat::normalize`] brings it back after accumulated
/// drift from long chains of composition.
///
/// # Conjugation
///
/// [`conjugated`](Quat::conjugated) negates the scalar part only. For a unit
/// quaternion `(v, -w)` is the same rotation as `(-v, w)`, so the result is
/// the inverse rotation; it is not an inverse for non-unit values.
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
pub struct Quat {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quat {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quat = Quat::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new quaternion from its raw components.
    ///
    /// This does not guarantee a unit quaternion. For creating rotations,
    /// prefer `from_axis_angle` or the other rotation constructors.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion rotating by `angle` radians around `axis`.
    ///
    /// `axis` must already be unit length; it is not normalized here.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half_angle = angle * 0.5;
        let s = half_angle.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half_angle.cos(),
        }
    }

    /// Creates a quaternion from Euler angles stored as `(pitch, yaw, roll)`
    /// in the `x`, `y` and `z` components.
    ///
    /// The rotation is yaw around Y, then pitch around X, then roll around Z,
    /// all intrinsic. `pitch` must lie in `[-π/2, π/2]`.
    pub fn from_euler(euler: Vec3) -> Self {
        debug_assert!(
            (-FRAC_PI_2..=FRAC_PI_2).contains(&euler.x),
            "pitch out of range: {}",
            euler.x
        );
        let (sin_x, cos_x) = (euler.x * 0.5).sin_cos();
        let (sin_y, cos_y) = (euler.y * 0.5).sin_cos();
        let (sin_z, cos_z) = (euler.z * 0.5).sin_cos();

        Self {
            x: cos_y * sin_x * cos_z + sin_y * cos_x * sin_z,
            y: sin_y * cos_x * cos_z - cos_y * sin_x * sin_z,
            z: cos_y * cos_x * sin_z - sin_y * sin_x * cos_z,
            w: cos_y * cos_x * cos_z + sin_y * sin_x * sin_z,
        }
    }

    /// Creates the shortest rotation that turns direction `from` into direction `to`.
    ///
    /// Both inputs are normalized first. When they point in nearly opposite
    /// directions the half-vector is unstable, so a half turn around an
    /// arbitrary perpendicular axis is returned instead.
    pub fn from_rotation_arc(from: Vec3, to: Vec3) -> Self {
        let from = from.normalize();
        let to = to.normalize();

        let cos_angle = from.dot(to);
        if cos_angle > -1.0005 && cos_angle < -0.9995 {
            let mut n = Vec3::new(0.0, from.z, -from.y);
            if n.length_squared() < 0.01 {
                n = Vec3::new(from.y, -from.x, 0.0);
            }
            return Self::from_axis_angle(n.normalize(), PI);
        }

        let half = (from + to).normalize();
        let v = from.cross(half);
        Self::new(v.x, v.y, v.z, from.dot(half))
    }

    /// Recovers `(pitch, yaw, roll)` angles, the inverse of [`Quat::from_euler`].
    ///
    /// Near pitch ±90° yaw and roll become indistinguishable; yaw is then
    /// reported as zero and the whole heading goes into roll.
    pub fn to_euler(&self) -> Vec3 {
        let Self { x, y, z, w } = *self;
        let check = 2.0 * (w * x - y * z);

        if check < -0.999999 {
            return Vec3::new(
                -FRAC_PI_2,
                0.0,
                -(2.0 * (x * z - w * y)).atan2(1.0 - 2.0 * (y * y + z * z)),
            );
        }
        if check > 0.999999 {
            return Vec3::new(
                FRAC_PI_2,
                0.0,
                (2.0 * (x * z - w * y)).atan2(1.0 - 2.0 * (y * y + z * z)),
            );
        }

        Vec3::new(
            check.asin(),
            (2.0 * (x * z + w * y)).atan2(1.0 - 2.0 * (x * x + y * y)),
            (2.0 * (x * y + w * z)).atan2(1.0 - 2.0 * (x * x + z * z)),
        )
    }

    /// Builds the equivalent 4x4 rotation matrix.
    pub fn to_matrix(&self) -> Matrix {
        let fx = self.x + self.x;
        let fy = self.y + self.y;
        let fz = self.z + self.z;
        let fwx = fx * self.w;
        let fwy = fy * self.w;
        let fwz = fz * self.w;
        let fxx = fx * self.x;
        let fxy = fy * self.x;
        let fxz = fz * self.x;
        let fyy = fy * self.y;
        let fyz = fz * self.y;
        let fzz = fz * self.z;

        Matrix::from_columns(
            Vec4::new(1.0 - (fyy + fzz), fxy + fwz, fxz - fwy, 0.0),
            Vec4::new(fxy - fwz, 1.0 - (fxx + fzz), fyz + fwx, 0.0),
            Vec4::new(fxz + fwy, fyz - fwx, 1.0 - (fxx + fyy), 0.0),
            Vec4::W,
        )
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn length(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Rescales the quaternion to unit length in place.
    /// A zero quaternion has no direction and turns into NaN.
    #[inline]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Returns the quaternion rescaled to unit length.
    #[inline]
    pub fn normalized(&self) -> Self {
        *self * (1.0 / self.length())
    }

    /// Negates the scalar part in place.
    #[inline]
    pub fn conjugate(&mut self) {
        self.w = -self.w;
    }

    /// Returns the quaternion with its scalar part negated, the inverse rotation
    /// for a unit quaternion.
    #[inline]
    pub fn conjugated(&self) -> Self {
        Self::new(self.x, self.y, self.z, -self.w)
    }

    /// Rotates a single-precision vector.
    #[inline]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let qvec = Vec3::new(self.x, self.y, self.z);
        let uv = qvec.cross(v);
        let uuv = qvec.cross(uv);
        v + uv * (2.0 * self.w) + uuv * 2.0
    }

    /// Rotates a double-precision vector, keeping the arithmetic in `f64`.
    #[inline]
    pub fn rotate_dvec3(&self, v: DVec3) -> DVec3 {
        let qvec = DVec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z));
        let uv = qvec.cross(v);
        let uuv = qvec.cross(uv);
        v + uv * (2.0 * f64::from(self.w)) + uuv * 2.0
    }
}

/// Normalized linear interpolation between two rotations.
///
/// Cheaper than a true slerp and good enough for blending animation poses. The
/// blend follows the shorter arc: when the inputs lie in opposite hemispheres
/// the weight of `q2` is negated. `t` is not clamped.
pub fn nlerp(q1: Quat, q2: Quat, t: f32) -> Quat {
    let inv = 1.0 - t;
    let t = if q1.dot(q2) < 0.0 { -t } else { t };
    (q1 * inv + q2 * t).normalized()
}

// --- Operator Overloads ---

impl Default for Quat {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quat> for Quat {
    type Output = Self;
    /// Combines two rotations using the Hamilton product.
    /// `a * b` rotates by `b` first, then by `a`.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + rhs.w * self.x + self.y * rhs.z - rhs.y * self.z,
            y: self.w * rhs.y + rhs.w * self.y + self.z * rhs.x - rhs.z * self.x,
            z: self.w * rhs.z + rhs.w * self.z + self.x * rhs.y - rhs.x * self.y,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl MulAssign<Quat> for Quat {
    /// Applies this rotation after `rhs`'s.
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;
    /// Rotates a `Vec3` by this quaternion.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate(rhs)
    }
}

impl Mul<DVec3> for Quat {
    type Output = DVec3;
    /// Rotates a `DVec3` by this quaternion.
    #[inline]
    fn mul(self, rhs: DVec3) -> Self::Output {
        self.rotate_dvec3(rhs)
    }
}

impl Mul<f32> for Quat {
    type Output = Self;
    /// Scales all four components. Not a rotation operation.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Add<Quat> for Quat {
    type Output = Self;
    /// Adds two quaternions component-wise. Not a rotation operation.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl TryFrom<&[f32]> for Quat {
    type Error = MathError;

    /// Reads `[x, y, z, w]`.
    fn try_from(value: &[f32]) -> Result<Self, Self::Error> {
        check_len(value, 4)?;
        Ok(Self::new(value[0], value[1], value[2], value[3]))
    }
}
