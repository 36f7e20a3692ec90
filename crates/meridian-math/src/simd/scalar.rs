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

//! Portable lane implementation in plain Rust.

use std::ops::{Add, Mul};

use super::Lanes;
use crate::vector::Vec4;

/// Four `f32` lanes held in an array.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct F32x4(pub [f32; 4]);

impl Lanes for F32x4 {
    #[inline]
    fn splat(v: f32) -> Self {
        F32x4([v; 4])
    }

    #[inline]
    fn load(v: &Vec4) -> Self {
        F32x4(bytemuck::cast(*v))
    }

    #[inline]
    fn store(self) -> Vec4 {
        bytemuck::cast(self.0)
    }
}

impl Add<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn add(self, other: F32x4) -> F32x4 {
        let [a, b, c, d] = self.0;
        let [e, f, g, h] = other.0;
        F32x4([a + e, b + f, c + g, d + h])
    }
}

impl Mul<F32x4> for F32x4 {
    type Output = F32x4;
    #[inline]
    fn mul(self, other: F32x4) -> F32x4 {
        let [a, b, c, d] = self.0;
        let [e, f, g, h] = other.0;
        F32x4([a * e, b * f, c * g, d * h])
    }
}
