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

//! SSE lane implementation for x86 and x86_64.

use std::fmt::{self, Debug, Formatter};
use std::ops::{Add, Mul};

#[cfg(target_arch = "x86")]
use std::arch::x86::{self as arch, __m128};
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::{self as arch, __m128};

use super::Lanes;
use crate::vector::Vec4;

/// Four `f32` lanes held in an SSE register.
#[derive(Clone, Copy)]
pub struct F32x4(pub __m128);

impl Lanes for F32x4 {
    #[inline]
    fn splat(v: f32) -> Self {
        // SAFETY: this module is only compiled when SSE is enabled.
        unsafe { F32x4(arch::_mm_set1_ps(v)) }
    }

    #[inline]
    fn load(v: &Vec4) -> Self {
        let lanes: &[f32; 4] = bytemuck::cast_ref(v);
        // SAFETY: `lanes` points at four contiguous floats; the load is unaligned.
        unsafe { F32x4(arch::_mm_loadu_ps(lanes.as_ptr())) }
    }

    #[inline]
    fn store(self) -> Vec4 {
        let mut out = [0.0f32; 4];
        // SAFETY: `out` has room for four floats; the store is unaligned.
        unsafe { arch::_mm_storeu_ps(out.as_mut_ptr(), self.0) }
        bytemuck::cast(out)
    }
}

impl Debug for F32x4 {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let v = self.store();
        write!(f, "<{}, {}, {}, {}>", v.x, v.y, v.z, v.w)
    }
}

impl Add<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn add(self, other: F32x4) -> F32x4 {
        // SAFETY: this module is only compiled when SSE is enabled.
        unsafe { F32x4(arch::_mm_add_ps(self.0, other.0)) }
    }
}

impl Mul<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn mul(self, other: F32x4) -> F32x4 {
        // SAFETY: this module is only compiled when SSE is enabled.
        unsafe { F32x4(arch::_mm_mul_ps(self.0, other.0)) }
    }
}
