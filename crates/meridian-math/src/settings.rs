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

//! Projection settings shared with the renderer.

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::matrix::Matrix;

/// Settings that control how projection matrices are built.
///
/// The depth convention must match the depth buffer setup of the renderer that
/// consumes the matrices: a mismatch silently inverts depth testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// If `true`, the near plane maps to depth 1.0 and the far plane to 0.0.
    pub reversed_z: bool,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self { reversed_z: true }
    }
}

impl ProjectionSettings {
    /// Parses settings from a JSON document such as `{"reversed_z": false}`.
    ///
    /// Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, MathError> {
        serde_json::from_str(json).map_err(|e| {
            log::error!("Failed to parse projection settings: {e}");
            MathError::InvalidSettings {
                reason: e.to_string(),
            }
        })
    }

    /// Builds a perspective projection with the configured depth convention.
    /// See [`Matrix::perspective`].
    #[inline]
    pub fn perspective(&self, fov: f32, ratio: f32, near: f32, far: f32) -> Matrix {
        Matrix::perspective(fov, ratio, near, far, self.reversed_z)
    }

    /// Builds an orthographic projection with the configured depth convention.
    /// See [`Matrix::ortho`].
    #[inline]
    pub fn ortho(
        &self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix {
        Matrix::ortho(left, right, bottom, top, near, far, self.reversed_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reversed_z() {
        assert!(ProjectionSettings::default().reversed_z);
    }

    #[test]
    fn test_from_json() {
        let s = ProjectionSettings::from_json(r#"{"reversed_z": false}"#).unwrap();
        assert!(!s.reversed_z);
        let s = ProjectionSettings::from_json("{}").unwrap();
        assert!(s.reversed_z);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = ProjectionSettings::from_json(r#"{"reversed_z": 3}"#).unwrap_err();
        assert!(matches!(err, MathError::InvalidSettings { .. }));
        assert!(err.to_string().starts_with("Invalid projection settings"));
    }

    #[test]
    fn test_flag_is_threaded_into_matrices() {
        let standard = ProjectionSettings { reversed_z: false };
        let reversed = ProjectionSettings::default();
        assert_eq!(
            standard.perspective(1.0, 1.5, 0.1, 100.0),
            Matrix::perspective(1.0, 1.5, 0.1, 100.0, false)
        );
        assert_eq!(
            reversed.ortho(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0),
            Matrix::ortho(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0, true)
        );
    }
}
