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

//! # Meridian Math
//!
//! Spatial math for a real-time 3D engine: vectors, quaternions, matrices and
//! the transform composites used to place objects in the world.
//!
//! Two precisions live side by side. Per-frame math runs on single-precision
//! types ([`Vec3`], [`Quat`], [`Matrix`]), while world-space positions use the
//! double-precision [`DVec3`] so that objects far from the origin keep their
//! accuracy. Conversions between the two are always explicit: widening goes
//! through `From`, narrowing through `as_vec3`.
//!
//! All angular functions operate in **radians** unless stated otherwise.
//!
//! Composition is consistent across types: `a * b` applies `b` in the frame of
//! `a`, i.e. `b` first, then `a`.

#![warn(missing_docs)]

pub mod approx_impls;
pub mod compact_matrix;
pub mod dvec;
pub mod error;
pub mod geometry;
pub mod ivec;
pub mod matrix;
pub mod quaternion;
pub mod random;
pub mod scalar;
pub mod settings;
pub mod simd;
pub mod transform;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::compact_matrix::{Matrix3x4, Matrix4x3};
pub use self::dvec::{DVec2, DVec3};
pub use self::error::MathError;
pub use self::geometry::{
    line_segment_distance, ray_aabb_intersection, ray_plane_intersection,
    ray_sphere_intersection, ray_triangle_intersection, sphere_triangle_intersection, Aabb,
};
pub use self::ivec::{IVec2, IVec3};
pub use self::matrix::Matrix;
pub use self::quaternion::{nlerp, Quat};
pub use self::random::{GuidGenerator, RandomGenerator};
pub use self::scalar::*;
pub use self::settings::ProjectionSettings;
pub use self::transform::{LocalRigidTransform, RigidTransform, Transform};
pub use self::vector::{Vec2, Vec3, Vec4};
