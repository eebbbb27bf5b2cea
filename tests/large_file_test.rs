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

use pcd_cloud::io::read_pcd_with_limits;
use pcd_cloud::{read_pcd, Limits, PointCloud};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn reads_a_large_binary_point_cloud() {
    let points = 100_000usize;
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "VERSION 0.7").unwrap();
    writeln!(file, "FIELDS x y z").unwrap();
    writeln!(file, "SIZE 4 4 4").unwrap();
    writeln!(file, "TYPE F F F").unwrap();
    writeln!(file, "COUNT 1 1 1").unwrap();
    writeln!(file, "WIDTH {}", points).unwrap();
    writeln!(file, "HEIGHT 1").unwrap();
    writeln!(file, "POINTS {}", points).unwrap();
    writeln!(file, "DATA binary").unwrap();

    let mut data = Vec::with_capacity(points * 12);
    for i in 0..points {
        let val = i as f32;
        data.extend_from_slice(&val.to_le_bytes());
        data.extend_from_slice(&(val * 2.0).to_le_bytes());
        data.extend_from_slice(&(val * 3.0).to_le_bytes());
    }
    file.write_all(&data).unwrap();

    let mut cloud = PointCloud::new();
    read_pcd(file.path(), &mut cloud).expect("reads");

    assert_eq!(cloud.len(), points);
    assert_eq!(cloud.positions[123][0], 123.0);
    assert_eq!(cloud.positions[points - 1][0], (points - 1) as f32 as f64);
}

#[test]
fn rejects_a_header_declaring_more_points_than_the_configured_ceiling() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "VERSION 0.7").unwrap();
    writeln!(file, "FIELDS x y z").unwrap();
    writeln!(file, "SIZE 4 4 4").unwrap();
    writeln!(file, "TYPE F F F").unwrap();
    writeln!(file, "COUNT 1 1 1").unwrap();
    writeln!(file, "WIDTH 999999999").unwrap();
    writeln!(file, "HEIGHT 1").unwrap();
    writeln!(file, "POINTS 999999999").unwrap();
    writeln!(file, "DATA binary").unwrap();

    let limits = Limits {
        max_points: 1_000,
        ..Limits::default()
    };
    let mut cloud = PointCloud::new();
    let result = read_pcd_with_limits(file.path(), &mut cloud, &limits);
    assert!(result.is_err());
    assert!(cloud.is_empty());
}
