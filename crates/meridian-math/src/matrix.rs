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

//! The 4x4 column-major matrix used for world, view and projection transforms.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, MulAssign};

use crate::error::{check_len, MathError};
use crate::quaternion::Quat;
use crate::simd::{Lanes, F32x4};
use crate::vector::{Vec3, Vec4};

/// A 4x4 matrix, stored in column-major order.
///
/// Column 3 holds the translation in its `x`, `y` and `z` components, columns
/// 0 to 2 the rotation/scale basis, and the `w` components form the projective
/// row, `(0, 0, 0, 1)` for affine transforms. The layout matches what GPU
/// APIs expect, so a `Matrix` can be uploaded as-is through [`bytemuck`].
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
pub struct Matrix {
    /// The columns of the matrix. `columns[0]` is the first column, and so on.
    pub columns: [Vec4; 4],
}

impl Matrix {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self::from_columns(Vec4::X, Vec4::Y, Vec4::Z, Vec4::W);

    /// A 4x4 matrix with all elements set to 0.
    pub const ZERO: Self = Self::from_columns(Vec4::ZERO, Vec4::ZERO, Vec4::ZERO, Vec4::ZERO);

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub const fn from_columns(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            columns: [c0, c1, c2, c3],
        }
    }

    /// Creates a rigid transform matrix: rotate by `rot`, then translate by `pos`.
    #[inline]
    pub fn from_translation_rotation(pos: Vec3, rot: Quat) -> Self {
        let mut m = rot.to_matrix();
        m.set_translation(pos);
        m
    }

    /// Creates a rotation matrix from yaw (around Y), pitch (around X) and roll
    /// (around Z), applied roll first, then pitch, then yaw.
    pub fn from_euler(yaw: f32, pitch: f32, roll: f32) -> Self {
        let (sroll, croll) = roll.sin_cos();
        let (spitch, cpitch) = pitch.sin_cos();
        let (syaw, cyaw) = yaw.sin_cos();

        Self::from_columns(
            Vec4::new(
                sroll * spitch * syaw + croll * cyaw,
                sroll * cpitch,
                sroll * spitch * cyaw - croll * syaw,
                0.0,
            ),
            Vec4::new(
                croll * spitch * syaw - sroll * cyaw,
                croll * cpitch,
                croll * spitch * cyaw + sroll * syaw,
                0.0,
            ),
            Vec4::new(cpitch * syaw, -spitch, cpitch * cyaw, 0.0),
            Vec4::W,
        )
    }

    /// Creates a matrix for a rotation around the X-axis.
    #[inline]
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::IDENTITY;
        m.columns[1].y = c;
        m.columns[2].z = c;
        m.columns[2].y = -s;
        m.columns[1].z = s;
        m
    }

    /// Creates a matrix for a rotation around the Y-axis.
    #[inline]
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::IDENTITY;
        m.columns[0].x = c;
        m.columns[2].z = c;
        m.columns[2].x = s;
        m.columns[0].z = -s;
        m
    }

    /// Creates a matrix for a rotation around the Z-axis.
    #[inline]
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::IDENTITY;
        m.columns[0].x = c;
        m.columns[1].y = c;
        m.columns[1].x = -s;
        m.columns[0].y = s;
        m
    }

    /// Creates a right-handed view matrix for a camera at `eye` looking at `at`.
    ///
    /// The camera looks down its local -Z axis. `up` must not be parallel to
    /// the viewing direction.
    pub fn look_at(eye: Vec3, at: Vec3, up: Vec3) -> Self {
        let f = (eye - at).normalize();
        let r = up.cross(f).normalize();
        let u = f.cross(r);

        Self::from_columns(
            Vec4::new(r.x, u.x, f.x, 0.0),
            Vec4::new(r.y, u.y, f.y, 0.0),
            Vec4::new(r.z, u.z, f.z, 0.0),
            Vec4::new(-r.dot(eye), -u.dot(eye), -f.dot(eye), 1.0),
        )
    }

    /// Creates an orthographic projection matrix.
    ///
    /// Depth maps to `[0, 1]`; with `reversed_z` the near plane lands on 1
    /// and the far plane on 0.
    #[allow(clippy::too_many_arguments)]
    pub fn ortho(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
        reversed_z: bool,
    ) -> Self {
        let mut m = Self::IDENTITY;
        m.columns[0].x = 2.0 / (right - left);
        m.columns[1].y = 2.0 / (top - bottom);
        m.columns[3].x = (right + left) / (left - right);
        m.columns[3].y = (top + bottom) / (bottom - top);
        if reversed_z {
            m.columns[2].z = 1.0 / (z_far - z_near);
            m.columns[3].z = z_far / (z_far - z_near);
        } else {
            m.columns[2].z = -1.0 / (z_far - z_near);
            m.columns[3].z = z_near / (z_near - z_far);
        }
        m
    }

    /// Creates a perspective projection matrix with an infinite far plane.
    ///
    /// `fov` is the vertical field of view in radians and `ratio` the
    /// width/height aspect ratio. `_z_far` is accepted for symmetry with
    /// [`Matrix::ortho`] and does not affect the result. With `reversed_z`
    /// the near plane maps to depth 1 and infinity to 0; otherwise near maps
    /// to 0 and infinity to 1.
    pub fn perspective(fov: f32, ratio: f32, z_near: f32, _z_far: f32, reversed_z: bool) -> Self {
        let f = 1.0 / (fov * 0.5).tan();
        let mut m = Self::IDENTITY;
        m.columns[0].x = f / ratio;
        m.columns[1].y = f;
        m.columns[3].w = 0.0;
        m.columns[2].w = -1.0;
        if reversed_z {
            m.columns[2].z = 0.0;
            m.columns[3].z = z_near;
        } else {
            m.columns[2].z = -1.0;
            m.columns[3].z = -z_near;
        }
        m
    }

    /// Returns a row of the matrix as a `Vec4`.
    ///
    /// # Panics
    /// Panics if `index` is greater than 3.
    #[inline]
    pub fn row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.columns[0][index],
            self.columns[1][index],
            self.columns[2][index],
            self.columns[3][index],
        )
    }

    /// Returns the translation part (column 3).
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.columns[3].xyz()
    }

    /// Overwrites the translation part, leaving the rest untouched.
    #[inline]
    pub fn set_translation(&mut self, t: Vec3) {
        self.columns[3].x = t.x;
        self.columns[3].y = t.y;
        self.columns[3].z = t.z;
    }

    /// Adds `t` to the translation part.
    #[inline]
    pub fn translate(&mut self, t: Vec3) {
        self.columns[3].x += t.x;
        self.columns[3].y += t.y;
        self.columns[3].z += t.z;
    }

    /// The first basis vector (local X axis in parent space).
    #[inline]
    pub fn x_vector(&self) -> Vec3 {
        self.columns[0].xyz()
    }

    /// The second basis vector (local Y axis in parent space).
    #[inline]
    pub fn y_vector(&self) -> Vec3 {
        self.columns[1].xyz()
    }

    /// The third basis vector (local Z axis in parent space).
    #[inline]
    pub fn z_vector(&self) -> Vec3 {
        self.columns[2].xyz()
    }

    /// Overwrites the first basis vector, leaving `w` untouched.
    #[inline]
    pub fn set_x_vector(&mut self, v: Vec3) {
        let w = self.columns[0].w;
        self.columns[0] = Vec4::from_vec3(v, w);
    }

    /// Overwrites the second basis vector, leaving `w` untouched.
    #[inline]
    pub fn set_y_vector(&mut self, v: Vec3) {
        let w = self.columns[1].w;
        self.columns[1] = Vec4::from_vec3(v, w);
    }

    /// Overwrites the third basis vector, leaving `w` untouched.
    #[inline]
    pub fn set_z_vector(&mut self, v: Vec3) {
        let w = self.columns[2].w;
        self.columns[2] = Vec4::from_vec3(v, w);
    }

    /// Scales the upper-left 3x3 block by `scale`.
    #[inline]
    pub fn multiply_3x3(&mut self, scale: f32) {
        for col in &mut self.columns[..3] {
            col.x *= scale;
            col.y *= scale;
            col.z *= scale;
        }
    }

    /// Copies the upper-left 3x3 block of `other` into this matrix.
    #[inline]
    pub fn copy_3x3(&mut self, other: &Matrix) {
        for (dst, src) in self.columns[..3].iter_mut().zip(&other.columns[..3]) {
            dst.x = src.x;
            dst.y = src.y;
            dst.z = src.z;
        }
    }

    /// Rescales each row of the 3x3 block to unit length.
    ///
    /// For a matrix built as `rotation * scale` this removes the scale.
    pub fn normalize_scale(&mut self) {
        let scale = Vec3::new(
            1.0 / self.row(0).xyz().length(),
            1.0 / self.row(1).xyz().length(),
            1.0 / self.row(2).xyz().length(),
        );
        for col in &mut self.columns[..3] {
            col.x *= scale.x;
            col.y *= scale.y;
            col.z *= scale.z;
        }
    }

    /// Transforms a point: applies the 3x3 block and the translation.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.transform_vector(p) + self.translation()
    }

    /// Transforms a direction: applies the 3x3 block only.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.x_vector() * v.x + self.y_vector() * v.y + self.z_vector() * v.z
    }

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    #[inline]
    pub fn transposed(&self) -> Self {
        Self::from_columns(self.row(0), self.row(1), self.row(2), self.row(3))
    }

    /// Transposes the matrix in place.
    #[inline]
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    /// Computes the determinant of the matrix.
    pub fn determinant(&self) -> f32 {
        let [c0, c1, c2, c3] = self.columns;

        let m00 = c1.y * (c2.z * c3.w - c3.z * c2.w) - c2.y * (c1.z * c3.w - c3.z * c1.w)
            + c3.y * (c1.z * c2.w - c2.z * c1.w);
        let m01 = c0.y * (c2.z * c3.w - c3.z * c2.w) - c2.y * (c0.z * c3.w - c3.z * c0.w)
            + c3.y * (c0.z * c2.w - c2.z * c0.w);
        let m02 = c0.y * (c1.z * c3.w - c3.z * c1.w) - c1.y * (c0.z * c3.w - c3.z * c0.w)
            + c3.y * (c0.z * c1.w - c1.z * c0.w);
        let m03 = c0.y * (c1.z * c2.w - c2.z * c1.w) - c1.y * (c0.z * c2.w - c2.z * c0.w)
            + c2.y * (c0.z * c1.w - c1.z * c0.w);

        c0.x * m00 - c1.x * m01 + c2.x * m02 - c3.x * m03
    }

    /// Computes the general inverse by cofactor expansion.
    ///
    /// A singular matrix (determinant exactly zero) is returned unchanged;
    /// callers that need to tell the cases apart check [`Matrix::determinant`].
    pub fn inverted(&self) -> Self {
        let [c0, c1, c2, c3] = self.columns;

        // Cofactors, `aJI` belonging to the element in column J, row I.
        let a00 = c1.y * (c2.z * c3.w - c3.z * c2.w) - c2.y * (c1.z * c3.w - c3.z * c1.w)
            + c3.y * (c1.z * c2.w - c2.z * c1.w);
        let a01 = -(c1.x * (c2.z * c3.w - c3.z * c2.w) - c2.x * (c1.z * c3.w - c3.z * c1.w)
            + c3.x * (c1.z * c2.w - c2.z * c1.w));
        let a02 = c1.x * (c2.y * c3.w - c3.y * c2.w) - c2.x * (c1.y * c3.w - c3.y * c1.w)
            + c3.x * (c1.y * c2.w - c2.y * c1.w);
        let a03 = -(c1.x * (c2.y * c3.z - c3.y * c2.z) - c2.x * (c1.y * c3.z - c3.y * c1.z)
            + c3.x * (c1.y * c2.z - c2.y * c1.z));

        let a10 = -(c0.y * (c2.z * c3.w - c3.z * c2.w) - c2.y * (c0.z * c3.w - c3.z * c0.w)
            + c3.y * (c0.z * c2.w - c2.z * c0.w));
        let a11 = c0.x * (c2.z * c3.w - c3.z * c2.w) - c2.x * (c0.z * c3.w - c3.z * c0.w)
            + c3.x * (c0.z * c2.w - c2.z * c0.w);
        let a12 = -(c0.x * (c2.y * c3.w - c3.y * c2.w) - c2.x * (c0.y * c3.w - c3.y * c0.w)
            + c3.x * (c0.y * c2.w - c2.y * c0.w));
        let a13 = c0.x * (c2.y * c3.z - c3.y * c2.z) - c2.x * (c0.y * c3.z - c3.y * c0.z)
            + c3.x * (c0.y * c2.z - c2.y * c0.z);

        let a20 = c0.y * (c1.z * c3.w - c3.z * c1.w) - c1.y * (c0.z * c3.w - c3.z * c0.w)
            + c3.y * (c0.z * c1.w - c1.z * c0.w);
        let a21 = -(c0.x * (c1.z * c3.w - c3.z * c1.w) - c1.x * (c0.z * c3.w - c3.z * c0.w)
            + c3.x * (c0.z * c1.w - c1.z * c0.w));
        let a22 = c0.x * (c1.y * c3.w - c3.y * c1.w) - c1.x * (c0.y * c3.w - c3.y * c0.w)
            + c3.x * (c0.y * c1.w - c1.y * c0.w);
        let a23 = -(c0.x * (c1.y * c3.z - c3.y * c1.z) - c1.x * (c0.y * c3.z - c3.y * c0.z)
            + c3.x * (c0.y * c1.z - c1.y * c0.z));

        let a30 = -(c0.y * (c1.z * c2.w - c2.z * c1.w) - c1.y * (c0.z * c2.w - c2.z * c0.w)
            + c2.y * (c0.z * c1.w - c1.z * c0.w));
        let a31 = c0.x * (c1.z * c2.w - c2.z * c1.w) - c1.x * (c0.z * c2.w - c2.z * c0.w)
            + c2.x * (c0.z * c1.w - c1.z * c0.w);
        let a32 = -(c0.x * (c1.y * c2.w - c2.y * c1.w) - c1.x * (c0.y * c2.w - c2.y * c0.w)
            + c2.x * (c0.y * c1.w - c1.y * c0.w));
        let a33 = c0.x * (c1.y * c2.z - c2.y * c1.z) - c1.x * (c0.y * c2.z - c2.y * c0.z)
            + c2.x * (c0.y * c1.z - c1.y * c0.z);

        let det = c0.x * a00 + c1.x * a10 + c2.x * a20 + c3.x * a30;
        if det == 0.0 {
            log::trace!("Inverting a singular matrix, returning it unchanged");
            return *self;
        }
        let inv_det = 1.0 / det;

        Self::from_columns(
            Vec4::new(a00, a10, a20, a30) * inv_det,
            Vec4::new(a01, a11, a21, a31) * inv_det,
            Vec4::new(a02, a12, a22, a32) * inv_det,
            Vec4::new(a03, a13, a23, a33) * inv_det,
        )
    }

    /// Inverts a rigid matrix (rotation and translation only) by transposing
    /// the rotation block and back-projecting the translation.
    ///
    /// The input is not checked: scale, shear or a projective row silently
    /// produce a wrong result. Use [`Matrix::inverted`] for those.
    pub fn fast_inverted(&self) -> Self {
        let [c0, c1, c2, c3] = self.columns;
        let r0 = Vec3::new(c0.x, c1.x, c2.x);
        let r1 = Vec3::new(c0.y, c1.y, c2.y);
        let r2 = Vec3::new(c0.z, c1.z, c2.z);
        let t = -c3.xyz();

        Self::from_columns(
            r0.extend(0.0),
            r1.extend(0.0),
            r2.extend(0.0),
            (r0 * t.x + r1 * t.y + r2 * t.z).extend(1.0),
        )
    }

    /// Splits an affine matrix into `(translation, rotation, scale)`.
    ///
    /// Scale is assumed uniform and read from the length of the first basis
    /// vector. Non-uniform scale yields an approximate rotation.
    pub fn decompose(&self) -> (Vec3, Quat, f32) {
        let position = self.translation();
        let scale = self.x_vector().length();
        let mut unscaled = *self;
        unscaled.multiply_3x3(1.0 / scale);
        (position, unscaled.rotation(), scale)
    }

    /// Extracts the rotation of an orthonormal 3x3 block.
    ///
    /// The formula is picked by the largest of the trace and the diagonal
    /// elements, so no branch divides by a value near zero.
    pub fn rotation(&self) -> Quat {
        let [c0, c1, c2, _] = self.columns;
        let tr = c0.x + c1.y + c2.z;

        if tr > 0.0 {
            let t = tr + 1.0;
            let s = 0.5 / t.sqrt();
            Quat::new((c1.z - c2.y) * s, (c2.x - c0.z) * s, (c0.y - c1.x) * s, s * t)
        } else if c0.x > c1.y && c0.x > c2.z {
            let t = 1.0 + c0.x - c1.y - c2.z;
            let s = 0.5 / t.sqrt();
            Quat::new(s * t, (c0.y + c1.x) * s, (c0.z + c2.x) * s, (c1.z - c2.y) * s)
        } else if c1.y > c2.z {
            let t = 1.0 + c1.y - c0.x - c2.z;
            let s = 0.5 / t.sqrt();
            Quat::new((c0.y + c1.x) * s, s * t, (c1.z + c2.y) * s, (c2.x - c0.z) * s)
        } else {
            let t = 1.0 + c2.z - c0.x - c1.y;
            let s = 0.5 / t.sqrt();
            Quat::new((c2.x + c0.z) * s, (c2.y + c1.z) * s, s * t, (c0.y - c1.x) * s)
        }
    }

    /// Views the matrix as 16 floats in column-major order.
    #[inline]
    pub fn as_floats(&self) -> &[f32; 16] {
        bytemuck::cast_ref(self)
    }

    /// Multiplies two matrices column by column using the lanes `L`.
    ///
    /// Result column `j` is `Σ_k self.columns[k] * rhs.columns[j][k]`, four
    /// rows at a time. The `*` operator uses [`crate::simd::F32x4`].
    #[inline]
    pub fn mul_with<L: Lanes>(&self, rhs: &Matrix) -> Matrix {
        let a = L::load(&self.columns[0]);
        let b = L::load(&self.columns[1]);
        let c = L::load(&self.columns[2]);
        let d = L::load(&self.columns[3]);

        let mut out = Matrix::ZERO;
        for (dst, col) in out.columns.iter_mut().zip(&rhs.columns) {
            let sum = a * L::splat(col.x)
                + b * L::splat(col.y)
                + c * L::splat(col.z)
                + d * L::splat(col.w);
            *dst = sum.store();
        }
        out
    }
}

// --- Operators Overloading ---

impl Default for Matrix {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Self;
    /// Composes two transforms: `a * b` applies `b` first, then `a`.
    #[inline]
    fn mul(self, rhs: Matrix) -> Self::Output {
        self.mul_with::<F32x4>(&rhs)
    }
}

impl MulAssign<Matrix> for Matrix {
    #[inline]
    fn mul_assign(&mut self, rhs: Matrix) {
        *self = *self * rhs;
    }
}

impl Mul<Vec4> for Matrix {
    type Output = Vec4;
    /// Transforms a `Vec4` by this matrix.
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.columns[0] * rhs.x
            + self.columns[1] * rhs.y
            + self.columns[2] * rhs.z
            + self.columns[3] * rhs.w
    }
}

impl Mul<f32> for Matrix {
    type Output = Self;
    /// Scales every element, including the projective row.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            columns: self.columns.map(|c| c * rhs),
        }
    }
}

impl Add<Matrix> for Matrix {
    type Output = Self;
    /// Adds two matrices element-wise.
    #[inline]
    fn add(self, rhs: Matrix) -> Self::Output {
        Self::from_columns(
            self.columns[0] + rhs.columns[0],
            self.columns[1] + rhs.columns[1],
            self.columns[2] + rhs.columns[2],
            self.columns[3] + rhs.columns[3],
        )
    }
}

impl TryFrom<&[f32]> for Matrix {
    type Error = MathError;

    /// Reads 16 floats in column-major order.
    fn try_from(value: &[f32]) -> Result<Self, Self::Error> {
        check_len(value, 16)?;
        let mut m = Matrix::ZERO;
        bytemuck::cast_slice_mut::<Vec4, f32>(&mut m.columns).copy_from_slice(value);
        Ok(m)
    }
}

// --- Tests ---
