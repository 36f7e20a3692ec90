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

//! Compact affine matrices with the constant projective row dropped.
//!
//! [`Matrix4x3`] keeps the column-major layout of [`Matrix`] with 3-component
//! columns. [`Matrix3x4`] stores the same data as three rows of four, which is
//! the layout skinning shaders read bone matrices in (48 bytes, each row a
//! 16-byte aligned `vec4`).

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;
use crate::vector::{Vec3, Vec4};

/// An affine transform as four 3-component columns.
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
pub struct Matrix4x3 {
    /// The basis columns followed by the translation.
    pub columns: [Vec3; 4],
}

/// An affine transform as three rows of four, translation in `w`.
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
pub struct Matrix3x4 {
    /// The first three rows of the equivalent [`Matrix`].
    pub rows: [Vec4; 3],
}

impl Matrix4x3 {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        columns: [Vec3::X, Vec3::Y, Vec3::Z, Vec3::ZERO],
    };

    /// Expands back to a 4x4 matrix with a `(0, 0, 0, 1)` projective row.
    #[inline]
    pub fn to_matrix(&self) -> Matrix {
        let [c0, c1, c2, c3] = self.columns;
        Matrix::from_columns(c0.extend(0.0), c1.extend(0.0), c2.extend(0.0), c3.extend(1.0))
    }

    /// Converts to the row-major compact layout.
    pub fn transposed(&self) -> Matrix3x4 {
        let [c0, c1, c2, c3] = self.columns;
        Matrix3x4 {
            rows: [
                Vec4::new(c0.x, c1.x, c2.x, c3.x),
                Vec4::new(c0.y, c1.y, c2.y, c3.y),
                Vec4::new(c0.z, c1.z, c2.z, c3.z),
            ],
        }
    }
}

impl From<&Matrix> for Matrix4x3 {
    /// Drops the projective row. Lossless for affine matrices.
    fn from(m: &Matrix) -> Self {
        Self {
            columns: m.columns.map(|c| c.xyz()),
        }
    }
}

impl Matrix3x4 {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rows: [Vec4::X, Vec4::Y, Vec4::Z],
    };

    /// Expands back to a 4x4 matrix with a `(0, 0, 0, 1)` projective row.
    #[inline]
    pub fn to_matrix(&self) -> Matrix {
        let [r0, r1, r2] = self.rows;
        Matrix::from_columns(r0, r1, r2, Vec4::W).transposed()
    }
}

impl From<&Matrix> for Matrix3x4 {
    /// Keeps rows 0 to 2. Lossless for affine matrices.
    fn from(m: &Matrix) -> Self {
        Self {
            rows: [m.row(0), m.row(1), m.row(2)],
        }
    }
}
