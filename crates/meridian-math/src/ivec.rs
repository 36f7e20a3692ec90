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

//! Integer vectors, used for grid cells, texel coordinates and chunk indices.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use crate::dvec::DVec3;
use crate::vector::{Vec2, Vec3};

/// A 2-dimensional vector with `i32` components.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct IVec2 {
    /// The x component of the vector.
    pub x: i32,
    /// The y component of the vector.
    pub y: i32,
}

/// A 3-dimensional vector with `i32` components.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct IVec3 {
    /// The x component of the vector.
    pub x: i32,
    /// The y component of the vector.
    pub y: i32,
    /// The z component of the vector.
    pub z: i32,
}

impl IVec2 {
    /// A vector with all components set to `0`.
    pub const ZERO: Self = Self::new(0, 0);
    /// A vector with all components set to `i32::MAX`.
    pub const MAX: Self = Self::new(i32::MAX, i32::MAX);
    /// A vector with all components set to `i32::MIN`.
    pub const MIN: Self = Self::new(i32::MIN, i32::MIN);

    /// Creates a new `IVec2` with the specified components.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to a float vector.
    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl IVec3 {
    /// A vector with all components set to `0`.
    pub const ZERO: Self = Self::new(0, 0, 0);
    /// A vector with all components set to `i32::MAX`.
    pub const MAX: Self = Self::new(i32::MAX, i32::MAX, i32::MAX);
    /// A vector with all components set to `i32::MIN`.
    pub const MIN: Self = Self::new(i32::MIN, i32::MIN, i32::MIN);

    /// Creates a new `IVec3` with the specified components.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Converts to a float vector.
    #[inline]
    pub fn as_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl Vec2 {
    /// Converts to an integer vector, truncating each component toward zero.
    /// Out-of-range components saturate at the `i32` bounds.
    #[inline]
    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x as i32, self.y as i32)
    }
}

impl Vec3 {
    /// Converts to an integer vector, truncating each component toward zero.
    /// Out-of-range components saturate at the `i32` bounds.
    #[inline]
    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x as i32, self.y as i32, self.z as i32)
    }
}

impl Add for IVec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for IVec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for IVec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for IVec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Add for IVec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for IVec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for IVec3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<f64> for IVec3 {
    type Output = DVec3;
    /// Scales a grid coordinate into a double-precision world position,
    /// e.g. `cell * CELL_SIZE`.
    #[inline]
    fn mul(self, rhs: f64) -> DVec3 {
        DVec3::new(
            f64::from(self.x) * rhs,
            f64::from(self.y) * rhs,
            f64::from(self.z) * rhs,
        )
    }
}

impl Div<Vec2> for IVec2 {
    type Output = Vec2;
    /// Component-wise division in single precision.
    #[inline]
    fn div(self, rhs: Vec2) -> Vec2 {
        self.as_vec2() / rhs
    }
}

impl Mul<IVec3> for Vec3 {
    type Output = Vec3;
    /// Scales each axis by the matching integer factor.
    #[inline]
    fn mul(self, rhs: IVec3) -> Vec3 {
        self * rhs.as_vec3()
    }
}

impl Div<IVec3> for Vec3 {
    type Output = Vec3;
    /// Divides each axis by the matching integer, e.g. a size by a cell count.
    #[inline]
    fn div(self, rhs: IVec3) -> Vec3 {
        self / rhs.as_vec3()
    }
}

impl Neg for IVec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Index<usize> for IVec2 {
    type Output = i32;
    /// # Panics
    /// Panics if `index` is not 0 or 1.
    #[inline]
    fn index(&self, index: usize) -> &i32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Index out of bounds for IVec2"),
        }
    }
}

impl IndexMut<usize> for IVec2 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut i32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Index out of bounds for IVec2"),
        }
    }
}

impl Index<usize> for IVec3 {
    type Output = i32;
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    fn index(&self, index: usize) -> &i32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index out of bounds for IVec3"),
        }
    }
}

impl IndexMut<usize> for IVec3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut i32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Index out of bounds for IVec3"),
        }
    }
}
