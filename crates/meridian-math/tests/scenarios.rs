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

//! End-to-end checks of the documented behaviors, through the public API only.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use meridian_math::simd;
use meridian_math::{
    nlerp, ray_aabb_intersection, ray_plane_intersection, DVec3, LocalRigidTransform, MathError,
    Matrix, Matrix3x4, ProjectionSettings, Quat, RigidTransform, Vec3, Vec4, FRAC_PI_2,
};

fn sample_matrix() -> Matrix {
    let mut m = Matrix::from_translation_rotation(
        Vec3::new(4.0, -2.0, 7.5),
        Quat::from_axis_angle(Vec3::new(0.0, 0.6, 0.8), 1.1),
    );
    m.multiply_3x3(1.5);
    m
}

#[test]
fn quarter_turn_about_y_follows_right_hand_rule() {
    let q = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
    assert_abs_diff_eq!(q.rotate(Vec3::X), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    assert_abs_diff_eq!(q * Vec3::X, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
}

#[test]
fn ray_hits_plane_below_it() {
    let t = ray_plane_intersection(
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, 1.0),
    )
    .expect("ray is not parallel to the plane");
    assert_relative_eq!(t, 5.0);
}

#[test]
fn ray_starting_inside_box_reports_its_origin() {
    let origin = Vec3::new(0.5, 0.5, 0.5);
    let hit = ray_aabb_intersection(origin, Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, Vec3::ONE);
    assert_eq!(hit, Some(origin));
}

#[test]
fn nlerp_between_identical_rotations_is_a_no_op() {
    let q = Quat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), 0.7);
    for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
        assert_abs_diff_eq!(nlerp(q, q, t), q, epsilon = 1e-6);
    }
}

#[test]
fn identity_is_neutral_for_matrix_product() {
    let m = sample_matrix();
    assert_eq!(Matrix::IDENTITY * m, m);
    assert_eq!(m * Matrix::IDENTITY, m);
}

#[test]
fn inverse_times_matrix_is_identity() {
    let m = sample_matrix();
    assert_abs_diff_eq!(m.inverted() * m, Matrix::IDENTITY, epsilon = 1e-5);
    assert_abs_diff_eq!(m * m.inverted(), Matrix::IDENTITY, epsilon = 1e-5);
}

#[test]
fn singular_matrix_inverts_to_itself() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut flat = Matrix::IDENTITY;
    flat.set_y_vector(Vec3::ZERO);
    assert_eq!(flat.determinant(), 0.0);
    assert_eq!(flat.inverted(), flat);
}

#[test]
fn decompose_then_rebuild_reproduces_matrix() {
    let m = sample_matrix();
    let (pos, rot, scale) = m.decompose();
    assert_relative_eq!(scale, 1.5, epsilon = 1e-5);

    let mut rebuilt = Matrix::from_translation_rotation(pos, rot);
    rebuilt.multiply_3x3(scale);
    assert_abs_diff_eq!(rebuilt, m, epsilon = 1e-5);
}

#[test]
fn simd_and_scalar_products_agree() {
    let a = sample_matrix();
    let b = Matrix::perspective(1.0, 16.0 / 9.0, 0.1, 100.0, true) * Matrix::rotation_x(0.3);
    let fast = a * b;
    let portable = a.mul_with::<simd::scalar::F32x4>(&b);
    assert_abs_diff_eq!(fast, portable, epsilon = 1e-5);
}

#[test]
fn narrowing_world_positions_loses_precision_far_from_origin() {
    let near = DVec3::new(12.25, -3.5, 100.0);
    assert_eq!(DVec3::from(near.as_vec3()), near);

    let far = DVec3::new(1.0e9 + 0.3, 0.0, 0.0);
    let narrowed = DVec3::from(far.as_vec3());
    assert_ne!(narrowed, far);
    assert!((narrowed - far).length() <= far.length() * f64::from(f32::EPSILON));
}

#[test]
fn hierarchy_keeps_double_precision_across_local_boundary() {
    let parent = RigidTransform::new(DVec3::new(1.0e9, 0.0, 0.0), Quat::IDENTITY);
    let child = LocalRigidTransform::new(Vec3::new(0.125, 0.0, 0.0), Quat::IDENTITY);
    let world = parent * child;
    assert_eq!(world.pos, DVec3::new(1.0e9 + 0.125, 0.0, 0.0));
}

#[test]
fn projection_settings_drive_depth_convention() {
    let standard = ProjectionSettings::from_json(r#"{ "reversed_z": false }"#).unwrap();
    let reversed = ProjectionSettings::default();
    assert!(reversed.reversed_z);

    let near_point = Vec4::new(0.0, 0.0, -0.1, 1.0);
    let clip_std = standard.perspective(1.0, 1.0, 0.1, 100.0) * near_point;
    let clip_rev = reversed.perspective(1.0, 1.0, 0.1, 100.0) * near_point;
    assert_ne!(clip_std.z / clip_std.w, clip_rev.z / clip_rev.w);

    assert!(matches!(
        ProjectionSettings::from_json("not json"),
        Err(MathError::InvalidSettings { .. })
    ));
}

#[test]
fn compact_matrices_round_trip_affine_input() {
    let m = sample_matrix();
    let rows = Matrix3x4::from(&m);
    assert_eq!(rows.to_matrix(), m);
}

#[test]
fn short_slices_are_rejected() {
    let err = Vec3::try_from(&[1.0_f32, 2.0][..]).unwrap_err();
    assert_eq!(err, MathError::SliceLength { expected: 3, actual: 2 });
    assert!(Matrix::try_from(&[0.0_f32; 15][..]).is_err());
}
