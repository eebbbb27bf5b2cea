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

pub mod ascii;
pub mod binary;
pub mod compressed;

use crate::cloud::PointCloud;
use crate::layout::Destination;

/// Resize every optional sequence to `points` if the presence flag for it
/// is set, otherwise leave it empty.
pub fn preallocate(
    cloud: &mut PointCloud,
    points: usize,
    has_intensity: bool,
    has_normals: bool,
    has_colors: bool,
) {
    cloud.positions = vec![[0.0; 3]; points];
    cloud.intensities = if has_intensity { vec![0.0; points] } else { Vec::new() };
    cloud.normals = if has_normals { vec![[0.0; 3]; points] } else { Vec::new() };
    cloud.colors = if has_colors { vec![[0.0; 3]; points] } else { Vec::new() };
    cloud.covariances = Vec::new();
}

/// Write a decoded scalar into its planned destination slot for point
/// `i`. `Destination::Color` and `Destination::Unknown` are not handled
/// here; the color slot takes a 3-vector and unknown fields are dropped.
pub fn store_scalar(cloud: &mut PointCloud, destination: Destination, i: usize, value: f64) {
    match destination {
        Destination::X => cloud.positions[i][0] = value,
        Destination::Y => cloud.positions[i][1] = value,
        Destination::Z => cloud.positions[i][2] = value,
        Destination::Intensity => cloud.intensities[i] = value,
        Destination::NormalX => cloud.normals[i][0] = value,
        Destination::NormalY => cloud.normals[i][1] = value,
        Destination::NormalZ => cloud.normals[i][2] = value,
        Destination::Color | Destination::Unknown => {}
    }
}
