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

//! Single-precision 2D, 3D and 4D vectors.
//!
//! Equality is exact component comparison; use the [`approx`] traits
//! implemented in [`crate::approx_impls`] when a tolerance is needed.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::error::{check_len, MathError};
use crate::scalar::{clamp, DEG_TO_RAD, EPSILON, RAD_TO_DEG};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Implements the compound assignment operators on top of the binary ones.
macro_rules! impl_assign_ops {
    ($ty:ty) => {
        impl AddAssign for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $ty {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<f32> for $ty {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                *self = *self * rhs;
            }
        }

        impl DivAssign<f32> for $ty {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                *self = *self / rhs;
            }
        }
    };
}

// --- Vec2 ---

/// A 2-dimensional vector with `f32` components.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Vec2 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Vec2 {
    /// All zeros.
    pub const ZERO: Self = Self::splat(0.0);
    /// All ones.
    pub const ONE: Self = Self::splat(1.0);
    /// A vector with all components set to the largest finite `f32`.
    pub const MAX: Self = Self::splat(f32::MAX);
    /// A vector with all components set to the most negative finite `f32`.
    pub const MIN: Self = Self::splat(-f32::MAX);
    /// Unit X axis.
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    /// Unit Y axis.
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    /// Creates a new `Vec2` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a vector with all components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Component-wise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Squared Euclidean length.
    /// Skips the square root, so prefer it for comparisons.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the vector scaled to a length of 1.
    ///
    /// The input must not be zero-length: no guard is applied and the
    /// components of the result are NaN in that case. See
    /// [`normalize_or_zero`](Self::normalize_or_zero).
    #[inline]
    pub fn normalize(&self) -> Self {
        *self * (1.0 / self.length())
    }

    /// Returns a normalized version of the vector, or `Vec2::ZERO` if its length is near zero.
    #[inline]
    pub fn normalize_or_zero(&self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > EPSILON * EPSILON {
            *self * (1.0 / len_sq.sqrt())
        } else {
            Self::ZERO
        }
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Performs a linear interpolation between two vectors. `t` is not clamped.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let inv_t = 1.0 - t;
        Self {
            x: start.x * inv_t + end.x * t,
            y: start.y * inv_t + end.y * t,
        }
    }

    /// Creates a `Vec3` from this vector and a `z` component.
    #[inline]
    pub const fn extend(self, z: f32) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }

    /// Converts each component from degrees to radians.
    #[inline]
    pub fn to_radians(self) -> Self {
        self * DEG_TO_RAD
    }

    /// Converts each component from radians to degrees.
    #[inline]
    pub fn to_degrees(self) -> Self {
        self * RAD_TO_DEG
    }
}

// --- Operator Overloads ---

impl Add for Vec2 {
    type Output = Self;
    /// Component-wise sum.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    /// Component-wise difference.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    /// Scales every component by `rhs`.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    /// Scales every component of `rhs`.
    #[inline]
    fn mul(self, rhs: Vec2) -> Self::Output {
        rhs * self
    }
}

impl Mul<Vec2> for Vec2 {
    type Output = Self;
    /// Component-wise product.
    #[inline]
    fn mul(self, rhs: Vec2) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
        }
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    /// Divides the vector by a scalar. Division by zero follows IEEE-754.
    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        let inv_rhs = 1.0 / rhs;
        Self {
            x: self.x * inv_rhs,
            y: self.y * inv_rhs,
        }
    }
}

impl Div<Vec2> for Vec2 {
    type Output = Self;
    /// Divides two vectors component-wise.
    #[inline]
    fn div(self, rhs: Vec2) -> Self::Output {
        Self {
            x: self.x / rhs.x,
            y: self.y / rhs.y,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    /// Negates the vector.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl_assign_ops!(Vec2);

impl Index<usize> for Vec2 {
    type Output = f32;
    /// Component access by position.
    ///
    /// # Panics
    /// Panics if `index` is not 0 or 1.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Index out of bounds for Vec2"),
        }
    }
}

impl IndexMut<usize> for Vec2 {
    /// Mutable component access by position.
    ///
    /// # Panics
    /// Panics if `index` is not 0 or 1.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Index out of bounds for Vec2"),
        }
    }
}

impl TryFrom<&[f32]> for Vec2 {
    type Error = MathError;

    fn try_from(value: &[f32]) -> Result<Self, Self::Error> {
        check_len(value, 2)?;
        Ok(Self::new(value[0], value[1]))
    }
}

// --- Vector3D ---

/// A 3-dimensional vector with `f32` components.
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
pub struct Vec3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Vec3 {
    /// All zeros.
    pub const ZERO: Self = Self::splat(0.0);
    /// All ones.
    pub const ONE: Self = Self::splat(1.0);
    /// A vector with all components set to the largest finite `f32`.
    pub const MAX: Self = Self::splat(f32::MAX);
    /// A vector with all components set to the most negative finite `f32`.
    pub const MIN: Self = Self::splat(-f32::MAX);
    /// Unit X axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit Y axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit Z axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new `Vec3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Component-wise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }

    /// Squared Euclidean length.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the vector scaled to a length of 1.
    ///
    /// The input must not be zero-length: no guard is applied and the
    /// components of the result are NaN in that case.
    #[inline]
    pub fn normalize(&self) -> Self {
        *self * (1.0 / self.length())
    }

    /// Returns a normalized version of the vector, or `Vec3::ZERO` if its length is near zero.
    #[inline]
    pub fn normalize_or_zero(&self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > EPSILON * EPSILON {
            *self * (1.0 / len_sq.sqrt())
        } else {
            Self::ZERO
        }
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Calculates the squared distance between this vector and another.
    #[inline]
    pub fn distance_squared(&self, other: Self) -> f32 {
        (*self - other).length_squared()
    }

    /// Calculates the distance between this vector and another.
    #[inline]
    pub fn distance(&self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Performs a linear interpolation between two vectors. `t` is not clamped.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let inv_t = 1.0 - t;
        Self {
            x: start.x * inv_t + end.x * t,
            y: start.y * inv_t + end.y * t,
            z: start.z * inv_t + end.z * t,
        }
    }

    /// Rotates the unit direction `start` towards the unit direction `end` along
    /// the great circle joining them.
    ///
    /// The dot product is clamped to `[-1, 1]` before `acos`, so slightly
    /// denormalized inputs do not produce NaN. Antiparallel inputs have no
    /// unique arc and shrink towards the origin instead of rotating.
    pub fn slerp(start: Self, end: Self, t: f32) -> Self {
        let d = clamp(start.dot(end), -1.0, 1.0);
        let s = d.acos() * t;
        let r = (end - start * d).normalize_or_zero();
        start * s.cos() + r * s.sin()
    }

    /// Returns the `x` and `z` components, the ground plane of a Y-up world.
    #[inline]
    pub const fn xz(self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    /// Creates a `Vec4` from this vector and a `w` component.
    #[inline]
    pub const fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    /// Converts each component from degrees to radians.
    #[inline]
    pub fn to_radians(self) -> Self {
        self * DEG_TO_RAD
    }

    /// Converts each component from radians to degrees.
    #[inline]
    pub fn to_degrees(self) -> Self {
        self * RAD_TO_DEG
    }
}

// --- Operator Overloads ---

impl Default for Vec3 {
    /// Returns `Vec3::ZERO`.
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Vec3 {
    type Output = Self;
    /// Component-wise sum.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    /// Component-wise difference.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    /// Scales every component by `rhs`.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    /// Scales every component of `rhs`.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

impl Mul<Vec3> for Vec3 {
    type Output = Self;
    /// Component-wise product.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
        }
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    /// Divides the vector by a scalar. Division by zero follows IEEE-754.
    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        let inv_rhs = 1.0 / rhs;
        Self {
            x: self.x * inv_rhs,
            y: self.y * inv_rhs,
            z: self.z * inv_rhs,
        }
    }
}

impl Div<Vec3> for Vec3 {
    type Output = Self;
    /// Divides two vectors component-wise.
    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x / rhs.x,
            y: self.y / rhs.y,
            z: self.z / rhs.z,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    /// Negates the vector.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl_assign_ops!(Vec3);

impl Index<usize> for Vec3 {
    type Output = f32;
    /// Component access by position.
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index out of bounds for Vec3"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    /// Mutable component access by position.
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Index out of bounds for Vec3"),
        }
    }
}

impl TryFrom<&[f32]> for Vec3 {
    type Error = MathError;

    fn try_from(value: &[f32]) -> Result<Self, Self::Error> {
        check_len(value, 3)?;
        Ok(Self::new(value[0], value[1], value[2]))
    }
}

// --- Vector4D ---

/// A 4-dimensional vector with `f32` components, often used for homogeneous coordinates.
///
/// `Vec4` is also the column type of [`Matrix`](crate::Matrix), which is why its
/// layout is a plain `#[repr(C)]` run of four floats: a column can be loaded
/// straight into a 4-wide SIMD register.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Vec4 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
    /// The w component, used for homogeneous coordinates.
    pub w: f32,
}

impl Vec4 {
    /// All zeros.
    pub const ZERO: Self = Self::splat(0.0);
    /// All ones.
    pub const ONE: Self = Self::splat(1.0);
    /// A vector with all components set to the largest finite `f32`.
    pub const MAX: Self = Self::splat(f32::MAX);
    /// A vector with all components set to the most negative finite `f32`.
    pub const MIN: Self = Self::splat(-f32::MAX);
    /// Unit X axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// Unit Y axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// Unit Z axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// The unit vector pointing along the positive W-axis.
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new `Vec4` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a vector with all components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self {
            x: v,
            y: v,
            z: v,
            w: v,
        }
    }

    /// Component-wise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
            w: self.w.abs(),
        }
    }

    /// Creates a `Vec4` from a `Vec3` and a `w` component.
    #[inline]
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Creates a `Vec4` from two `Vec2`s, `(a.x, a.y, b.x, b.y)`.
    #[inline]
    pub const fn from_vec2s(a: Vec2, b: Vec2) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Returns the `[x, y, z]` components of the vector as a `Vec3`, discarding `w`.
    #[inline]
    pub const fn xyz(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Returns the `[x, y]` components.
    #[inline]
    pub const fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns the `[x, z]` components.
    #[inline]
    pub const fn xz(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    /// Returns the `[y, z]` components.
    #[inline]
    pub const fn yz(&self) -> Vec2 {
        Vec2::new(self.y, self.z)
    }

    /// Returns the color channels of an RGBA value stored in a `Vec4`.
    #[inline]
    pub const fn rgb(&self) -> Vec3 {
        self.xyz()
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Squared Euclidean length.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the vector scaled to a length of 1. The input must not be zero-length.
    #[inline]
    pub fn normalize(&self) -> Self {
        *self * (1.0 / self.length())
    }

    /// Performs a linear interpolation between two vectors. `t` is not clamped.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        start * (1.0 - t) + end * t
    }
}

// --- Operator Overloads ---

impl Add for Vec4 {
    type Output = Self;
    /// Component-wise sum.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl Sub for Vec4 {
    type Output = Self;
    /// Component-wise difference.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: self.w - rhs.w,
        }
    }
}

impl Mul<f32> for Vec4 {
    type Output = Self;
    /// Scales every component by `rhs`.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            w: self.w * rhs,
        }
    }
}

impl Mul<Vec4> for f32 {
    type Output = Vec4;
    /// Scales every component of `rhs`.
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        rhs * self
    }
}

impl Mul<Vec4> for Vec4 {
    type Output = Self;
    /// Component-wise product.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
            w: self.w * rhs.w,
        }
    }
}

impl Div<f32> for Vec4 {
    type Output = Self;
    /// Divides the vector by a scalar. Division by zero follows IEEE-754.
    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        let inv_rhs = 1.0 / rhs;
        Self {
            x: self.x * inv_rhs,
            y: self.y * inv_rhs,
            z: self.z * inv_rhs,
            w: self.w * inv_rhs,
        }
    }
}

impl Neg for Vec4 {
    type Output = Self;
    /// Negates the vector.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

impl_assign_ops!(Vec4);

impl Index<usize> for Vec4 {
    type Output = f32;
    /// Component access by position.
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Index out of bounds for Vec4"),
        }
    }
}

impl IndexMut<usize> for Vec4 {
    /// Mutable component access by position.
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Index out of bounds for Vec4"),
        }
    }
}

impl TryFrom<&[f32]> for Vec4 {
    type Error = MathError;

    fn try_from(value: &[f32]) -> Result<Self, Self::Error> {
        check_len(value, 4)?;
        Ok(Self::new(value[0], value[1], value[2], value[3]))
    }
}
