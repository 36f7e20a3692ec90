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

//! Four-wide float lanes used by the matrix product.
//!
//! [`Lanes`] is the small portable surface the matrix code is written
//! against. [`scalar::F32x4`] is always available; [`sse::F32x4`] maps the same
//! operations onto SSE registers on x86 targets. [`F32x4`] names the fastest
//! implementation for the current target.

use std::ops::{Add, Mul};

use crate::vector::Vec4;

pub mod scalar;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse"))]
pub mod sse;

/// Four `f32` lanes supporting broadcast, load, store and lane-wise arithmetic.
pub trait Lanes: Copy + Add<Output = Self> + Mul<Output = Self> {
    /// Sets every lane to `v`.
    fn splat(v: f32) -> Self;
    /// Loads the four components of `v`, `x` into lane 0.
    fn load(v: &Vec4) -> Self;
    /// Writes the lanes back out, lane 0 into `x`.
    fn store(self) -> Vec4;
}

/// The fastest lane implementation available on this target.
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse"))]
pub type F32x4 = sse::F32x4;

/// The fastest lane implementation available on this target.
#[cfg(not(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse")))]
pub type F32x4 = scalar::F32x4;
