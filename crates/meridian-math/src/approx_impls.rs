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

//! [`approx`] trait implementations so the math types work with
//! `assert_abs_diff_eq!`, `assert_relative_eq!` and friends.

use approx::{AbsDiffEq, RelativeEq};

use crate::dvec::DVec3;
use crate::matrix::Matrix;
use crate::quaternion::Quat;
use crate::vector::{Vec2, Vec3, Vec4};

/// Component-wise tolerance comparison for plain structs of floats.
macro_rules! impl_approx {
    ($ty:ty, $scalar:ty, $($field:ident),+) => {
        impl AbsDiffEq for $ty {
            type Epsilon = $scalar;

            #[inline]
            fn default_epsilon() -> Self::Epsilon {
                <$scalar>::EPSILON
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                $(self.$field.abs_diff_eq(&other.$field, epsilon))&&+
            }
        }

        impl RelativeEq for $ty {
            #[inline]
            fn default_max_relative() -> Self::Epsilon {
                <$scalar>::EPSILON
            }

            #[inline]
            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                $(self.$field.relative_eq(&other.$field, epsilon, max_relative))&&+
            }
        }
    };
}

impl_approx!(Vec2, f32, x, y);
impl_approx!(Vec3, f32, x, y, z);
impl_approx!(Vec4, f32, x, y, z, w);
impl_approx!(Quat, f32, x, y, z, w);
impl_approx!(DVec3, f64, x, y, z);

impl AbsDiffEq for Matrix {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.columns
            .iter()
            .zip(other.columns.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.columns
            .iter()
            .zip(other.columns.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq};

    #[test]
    fn test_vectors_within_tolerance() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(1.0, 2.0, 3.000_001);
        assert_abs_diff_eq!(a, b, epsilon = 1e-5);
        assert_abs_diff_ne!(a, Vec3::new(1.0, 2.1, 3.0), epsilon = 1e-5);
        assert_relative_eq!(Vec2::new(0.1, 0.2) * 10.0, Vec2::new(1.0, 2.0), epsilon = 1e-6);
        assert_relative_eq!(Vec4::ONE * 0.5, Vec4::splat(0.5));
    }

    #[test]
    fn test_dvec3_uses_double_precision() {
        let a = DVec3::new(1e9, 0.0, 0.0);
        let b = DVec3::new(1e9 + 1e-3, 0.0, 0.0);
        assert_abs_diff_ne!(a, b, epsilon = 1e-6);
        assert_abs_diff_eq!(a, b, epsilon = 1e-2);
    }

    #[test]
    fn test_matrix_and_quat() {
        let m = Matrix::rotation_y(0.3) * Matrix::rotation_y(-0.3);
        assert_abs_diff_eq!(m, Matrix::IDENTITY, epsilon = 1e-6);
        assert_abs_diff_ne!(Matrix::rotation_y(0.3), Matrix::IDENTITY, epsilon = 1e-6);
        assert_abs_diff_eq!(Quat::IDENTITY, Quat::new(0.0, 0.0, 0.0, 1.0));
    }
}
