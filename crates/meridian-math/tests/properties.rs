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

//! Property tests for the "for all inputs" guarantees of the math types.

use approx::{abs_diff_eq, assert_abs_diff_eq};
use meridian_math::simd;
use meridian_math::{nlerp, DVec3, Matrix, Quat, Vec3, PI};
use proptest::prelude::*;

fn component() -> impl Strategy<Value = f32> {
    -100.0_f32..100.0
}

fn any_vec3() -> impl Strategy<Value = Vec3> {
    (component(), component(), component()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn nonzero_vec3() -> impl Strategy<Value = Vec3> {
    any_vec3().prop_filter("vector too short to normalize", |v| v.length() > 1e-2)
}

fn unit_vec3() -> impl Strategy<Value = Vec3> {
    nonzero_vec3().prop_map(|v| v.normalize())
}

fn unit_quat() -> impl Strategy<Value = Quat> {
    (unit_vec3(), -PI..PI).prop_map(|(axis, angle)| Quat::from_axis_angle(axis, angle))
}

fn translation() -> impl Strategy<Value = Vec3> {
    (-10.0_f32..10.0, -10.0_f32..10.0, -10.0_f32..10.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn affine_matrix() -> impl Strategy<Value = Matrix> {
    (translation(), unit_quat(), 0.5_f32..4.0).prop_map(|(pos, rot, scale)| {
        let mut m = Matrix::from_translation_rotation(pos, rot);
        m.multiply_3x3(scale);
        m
    })
}

proptest! {
    #[test]
    fn normalized_vectors_have_unit_length(v in nonzero_vec3()) {
        prop_assert!((v.normalize().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn normalizing_a_unit_vector_is_a_no_op(v in unit_vec3()) {
        prop_assert!(abs_diff_eq!(v.normalize(), v, epsilon = 1e-6));
    }

    #[test]
    fn axis_angle_quaternions_are_unit(q in unit_quat()) {
        prop_assert!((q.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rotation_preserves_length(q in unit_quat(), v in any_vec3()) {
        let len = v.length();
        prop_assert!((q.rotate(v).length() - len).abs() <= 1e-5 * len.max(1.0) * 10.0);
    }

    #[test]
    fn quat_times_conjugate_is_identity_rotation(q in unit_quat(), v in any_vec3()) {
        let r = q * q.conjugated();
        prop_assert!((r.w.abs() - 1.0).abs() < 1e-5);
        prop_assert!(abs_diff_eq!(r.rotate(v), v, epsilon = 1e-3));
    }

    #[test]
    fn identity_is_neutral(m in affine_matrix()) {
        prop_assert_eq!(Matrix::IDENTITY * m, m);
        prop_assert_eq!(m * Matrix::IDENTITY, m);
    }

    #[test]
    fn inverse_undoes_matrix(m in affine_matrix()) {
        prop_assert!(abs_diff_eq!(m.inverted() * m, Matrix::IDENTITY, epsilon = 1e-3));
    }

    #[test]
    fn decompose_round_trips_uniform_scale(m in affine_matrix()) {
        let (pos, rot, scale) = m.decompose();
        let mut rebuilt = Matrix::from_translation_rotation(pos, rot);
        rebuilt.multiply_3x3(scale);
        prop_assert!(abs_diff_eq!(rebuilt, m, epsilon = 1e-4));
    }

    #[test]
    fn nlerp_of_identical_rotations_returns_input(q in unit_quat(), t in 0.0_f32..=1.0) {
        prop_assert!(abs_diff_eq!(nlerp(q, q, t), q, epsilon = 1e-5));
    }

    #[test]
    fn simd_product_matches_scalar_lanes(a in affine_matrix(), b in affine_matrix()) {
        let portable = a.mul_with::<simd::scalar::F32x4>(&b);
        prop_assert!(abs_diff_eq!(a * b, portable, epsilon = 1e-3));
    }

    #[test]
    fn narrowing_error_is_bounded_by_magnitude(
        x in -1.0e12_f64..1.0e12,
        y in -1.0e12_f64..1.0e12,
        z in -1.0e12_f64..1.0e12,
    ) {
        let d = DVec3::new(x, y, z);
        let back = DVec3::from(d.as_vec3());
        for i in 0..3 {
            prop_assert!((back[i] - d[i]).abs() <= d[i].abs() * f64::from(f32::EPSILON));
        }
    }
}

#[test]
fn conjugate_undoes_rotation_for_a_fixed_case() {
    let q = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), 0.8);
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert_abs_diff_eq!(q.conjugated().rotate(q.rotate(v)), v, epsilon = 1e-5);
}
