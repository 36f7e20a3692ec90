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

//! Error types for the marshaling and configuration boundary.
//!
//! The numeric core itself never fails: degenerate inputs resolve to documented
//! fallback values. Errors only arise when raw data coming from outside (script
//! bindings, settings files) does not have the expected shape.

use std::fmt;

/// An error raised while converting external data into math types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// A flat float slice did not contain the number of components the target type needs.
    SliceLength {
        /// The number of floats the target type is built from.
        expected: usize,
        /// The number of floats that were provided.
        actual: usize,
    },
    /// Projection settings could not be parsed.
    InvalidSettings {
        /// A description of what went wrong.
        reason: String,
    },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::SliceLength { expected, actual } => {
                write!(f, "Expected {expected} components, got {actual}")
            }
            MathError::InvalidSettings { reason } => {
                write!(f, "Invalid projection settings: {reason}")
            }
        }
    }
}

impl std::error::Error for MathError {}

/// Checks that `slice` holds exactly `expected` floats.
pub(crate) fn check_len(slice: &[f32], expected: usize) -> Result<(), MathError> {
    if slice.len() == expected {
        Ok(())
    } else {
        Err(MathError::SliceLength {
            expected,
            actual: slice.len(),
        })
    }
}
