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

//! Scalar helpers shared by every other module: angle conversion, clamping,
//! easing and a few integer bit tricks.

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

// Re-export standard mathematical constants for convenience.
pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// Half of [`PI`], the limit of the pitch angle accepted by Euler constructors.
pub const HALF_PI: f32 = FRAC_PI_2;

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f32 = 180.0 / PI;

// --- Angles ---

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use meridian_math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Converts an angle from degrees to radians in double precision.
#[inline]
pub fn degrees_to_radians_f64(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Converts an angle from radians to degrees.
///
/// # Examples
///
/// ```
/// use meridian_math::{radians_to_degrees, PI};
/// assert_eq!(radians_to_degrees(PI), 180.0);
/// ```
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

/// Returns the signed difference `a - b` wrapped into `[-PI, PI]`.
///
/// Useful for turning towards a target heading along the shorter way.
pub fn angle_diff(a: f32, b: f32) -> f32 {
    let delta = (a - b) % TAU;
    if delta > PI {
        delta - TAU
    } else if delta < -PI {
        delta + TAU
    } else {
        delta
    }
}

// --- Ranges ---

/// Clamps a value to a specified minimum and maximum range.
///
/// # Examples
///
/// ```
/// use meridian_math::clamp;
/// assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
/// assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
/// assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
/// ```
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min_val: T, max_val: T) -> T {
    if value < min_val {
        min_val
    } else if value > max_val {
        max_val
    } else {
        value
    }
}

/// Returns the smaller of two values. If they compare equal (or are unordered), `b` wins.
#[inline]
pub fn minimum<T: PartialOrd>(a: T, b: T) -> T {
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the larger of two values. If they compare equal (or are unordered), `b` wins.
#[inline]
pub fn maximum<T: PartialOrd>(a: T, b: T) -> T {
    if a > b {
        a
    } else {
        b
    }
}

/// Linearly interpolates between `a` and `b`. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Quadratic ease-in/ease-out curve mapping `[0, 1]` onto `[0, 1]`.
///
/// # Examples
///
/// ```
/// use meridian_math::ease_in_out;
/// assert_eq!(ease_in_out(0.0), 0.0);
/// assert_eq!(ease_in_out(0.5), 0.5);
/// assert_eq!(ease_in_out(1.0), 1.0);
/// ```
pub fn ease_in_out(t: f32) -> f32 {
    let scaled_t = t * 2.0;
    if scaled_t < 1.0 {
        return 0.5 * scaled_t * scaled_t;
    }
    let scaled_t = scaled_t - 1.0;
    -0.5 * (scaled_t * (scaled_t - 2.0) - 1.0)
}

/// Performs an approximate equality comparison between two floats with a custom tolerance.
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Performs an approximate equality comparison using the module's default [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}

// --- Bit tricks ---

/// Rounds `v` up to the next power of two. Powers of two map to themselves.
///
/// `0` wraps around to `0`, and values above `2^31` overflow to `0`.
///
/// # Examples
///
/// ```
/// use meridian_math::next_pow2;
/// assert_eq!(next_pow2(5), 8);
/// assert_eq!(next_pow2(64), 64);
/// ```
pub fn next_pow2(v: u32) -> u32 {
    let mut v = v.wrapping_sub(1);
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v.wrapping_add(1)
}

/// Floor of the base-2 logarithm of `v`. Returns `0` for `v == 0`.
///
/// # Examples
///
/// ```
/// use meridian_math::log2;
/// assert_eq!(log2(1), 0);
/// assert_eq!(log2(1024), 10);
/// assert_eq!(log2(1025), 10);
/// ```
pub fn log2(v: u32) -> u32 {
    let mut v = v;
    let mut r = u32::from(v > 0xffff) << 4;
    v >>= r;
    let mut shift = u32::from(v > 0xff) << 3;
    v >>= shift;
    r |= shift;
    shift = u32::from(v > 0xf) << 2;
    v >>= shift;
    r |= shift;
    shift = u32::from(v > 0x3) << 1;
    v >>= shift;
    r |= shift;
    r | (v >> 1)
}
