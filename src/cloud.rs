// Copyright 2025 bigpear0201

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The fixed-schema point cloud the codec reads into and writes out of.
//!
//! Unlike a dynamic-schema column store, a `PointCloud` has exactly five
//! named sequences. Each optional sequence is either empty or the same
//! length as `positions`; `covariances` is carried for API parity with
//! the wider geometry type this codec is a serialization layer for, but
//! no PCD field maps to it.

/// A point cloud as the codec reads and writes it: positions plus four
/// optional per-point attributes.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub positions: Vec<[f64; 3]>,
    pub intensities: Vec<f64>,
    pub normals: Vec<[f64; 3]>,
    pub colors: Vec<[f64; 3]>,
    pub covariances: Vec<[[f64; 3]; 3]>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Empty every sequence. Called on any read failure so a caller never
    /// observes a partially-populated cloud.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.intensities.clear();
        self.normals.clear();
        self.colors.clear();
        self.covariances.clear();
    }

    /// `true` iff `intensities` is present and matches `positions` in
    /// length. Deliberately does *not* replicate the reference
    /// implementation's `intensitys_.size() == intensitys_.size()`
    /// self-comparison, which is always true regardless of actual length.
    pub fn has_intensities(&self) -> bool {
        !self.positions.is_empty() && self.intensities.len() == self.positions.len()
    }

    pub fn has_normals(&self) -> bool {
        !self.positions.is_empty() && self.normals.len() == self.positions.len()
    }

    pub fn has_colors(&self) -> bool {
        !self.positions.is_empty() && self.colors.len() == self.positions.len()
    }

    pub fn has_covariances(&self) -> bool {
        !self.positions.is_empty() && self.covariances.len() == self.positions.len()
    }

    /// Remove points with a NaN (`remove_nan`) or infinite
    /// (`remove_infinite`) coordinate, compacting every present optional
    /// sequence in lockstep. Does not recompute any attribute afterward.
    pub fn retain_finite(&mut self, remove_nan: bool, remove_infinite: bool) {
        let has_intensity = self.has_intensities();
        let has_normal = self.has_normals();
        let has_color = self.has_colors();
        let has_covariance = self.has_covariances();

        let mut k = 0usize;
        let n = self.positions.len();
        for i in 0..n {
            let p = self.positions[i];
            let is_nan = remove_nan && (p[0].is_nan() || p[1].is_nan() || p[2].is_nan());
            let is_infinite =
                remove_infinite && (p[0].is_infinite() || p[1].is_infinite() || p[2].is_infinite());
            if !is_nan && !is_infinite {
                self.positions[k] = self.positions[i];
                if has_intensity {
                    self.intensities[k] = self.intensities[i];
                }
                if has_normal {
                    self.normals[k] = self.normals[i];
                }
                if has_color {
                    self.colors[k] = self.colors[i];
                }
                if has_covariance {
                    self.covariances[k] = self.covariances[i];
                }
                k += 1;
            }
        }

        self.positions.truncate(k);
        if has_intensity {
            self.intensities.truncate(k);
        }
        if has_normal {
            self.normals.truncate(k);
        }
        if has_color {
            self.colors.truncate(k);
        }
        if has_covariance {
            self.covariances.truncate(k);
        }

        log::debug!("retain_finite removed {} points", n - k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_finite_drops_nan_and_compacts_attributes() {
        let mut cloud = PointCloud {
            positions: vec![[0.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0], [1.0, 1.0, 1.0]],
            intensities: vec![1.0, 2.0, 3.0],
            normals: vec![],
            colors: vec![],
            covariances: vec![],
        };
        cloud.retain_finite(true, true);
        assert_eq!(cloud.positions.len(), 2);
        assert_eq!(cloud.intensities, vec![1.0, 3.0]);
    }

    #[test]
    fn retain_finite_drops_infinite_only_when_requested() {
        let mut cloud = PointCloud {
            positions: vec![[0.0, 0.0, 0.0], [f64::INFINITY, 0.0, 0.0]],
            ..Default::default()
        };
        cloud.retain_finite(true, false);
        assert_eq!(cloud.positions.len(), 2);
        cloud.retain_finite(false, true);
        assert_eq!(cloud.positions.len(), 1);
    }

    #[test]
    fn has_intensities_is_not_a_tautology() {
        let cloud = PointCloud {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            intensities: vec![1.0],
            ..Default::default()
        };
        assert!(!cloud.has_intensities());
    }
}
