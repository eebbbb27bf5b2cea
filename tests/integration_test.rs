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

use pcd_cloud::{read_pcd, read_pcd_with_options, write_pcd, PointCloud, ReadOptions, WriteOptions};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// S1: ASCII file declaring only x y z, one NaN value among the points.
#[test]
fn s1_ascii_xyz_only_with_nan() {
    let file = write_temp(
        "VERSION 0.7\nFIELDS x y z\nSIZE 4 4 4\nTYPE F F F\nCOUNT 1 1 1\n\
WIDTH 3\nHEIGHT 1\nPOINTS 3\nDATA ascii\n0 0 0\n1 2 3\n-4.5 6e1 NaN\n",
    );

    let mut cloud = PointCloud::new();
    read_pcd(file.path(), &mut cloud).expect("reads");

    assert_eq!(cloud.len(), 3);
    assert!(cloud.intensities.is_empty());
    assert!(cloud.normals.is_empty());
    assert!(cloud.colors.is_empty());
    assert_eq!(cloud.positions[1], [1.0, 2.0, 3.0]);
    assert!(cloud.positions[2][2].is_nan());
}

/// S2: binary x y z intensity, two records of little-endian f32.
#[test]
fn s2_binary_with_intensity() {
    let mut file = NamedTempFile::new().unwrap();
    let header = "VERSION 0.7\nFIELDS x y z intensity\nSIZE 4 4 4 4\nTYPE F F F F\n\
COUNT 1 1 1 1\nWIDTH 2\nHEIGHT 1\nPOINTS 2\nDATA binary\n";
    file.write_all(header.as_bytes()).unwrap();

    let record1 = [1.0f32, 2.0, 3.0, 0.5];
    let record2 = [4.0f32, 5.0, 6.0, 0.9];
    for v in record1.iter().chain(record2.iter()) {
        file.write_all(&v.to_le_bytes()).unwrap();
    }

    let mut cloud = PointCloud::new();
    read_pcd(file.path(), &mut cloud).expect("reads");

    assert_eq!(cloud.len(), 2);
    assert_eq!(cloud.positions[0], [1.0, 2.0, 3.0]);
    assert_eq!(cloud.intensities, vec![0.5, 0.9]);
}

/// S3: binary_compressed header, a single point.
#[test]
fn s3_binary_compressed_single_point() {
    let mut uncompressed = Vec::new();
    for v in [1.0f32, 2.0, 3.0] {
        uncompressed.extend_from_slice(&v.to_le_bytes());
    }
    let mut compressed = vec![0u8; pcd_cloud::lzf::max_compressed_size(uncompressed.len())];
    let n = pcd_cloud::lzf::compress(&uncompressed, &mut compressed);
    compressed.truncate(n);

    let mut file = NamedTempFile::new().unwrap();
    let header = "VERSION 0.7\nFIELDS x y z\nSIZE 4 4 4\nTYPE F F F\nCOUNT 1 1 1\n\
WIDTH 1\nHEIGHT 1\nPOINTS 1\nDATA binary_compressed\n";
    file.write_all(header.as_bytes()).unwrap();
    file.write_all(&(n as u32).to_le_bytes()).unwrap();
    file.write_all(&(uncompressed.len() as u32).to_le_bytes()).unwrap();
    file.write_all(&compressed).unwrap();

    let mut cloud = PointCloud::new();
    read_pcd(file.path(), &mut cloud).expect("reads");

    assert_eq!(cloud.len(), 1);
    assert_eq!(cloud.positions[0], [1.0, 2.0, 3.0]);
}

/// S5: a 32-bit float token whose bit pattern is a BGR-packed color.
#[test]
fn s5_ascii_color_bit_pattern() {
    let file = write_temp(
        "VERSION 0.7\nFIELDS x y z rgb\nSIZE 4 4 4 4\nTYPE F F F F\nCOUNT 1 1 1 1\n\
WIDTH 1\nHEIGHT 1\nPOINTS 1\nDATA ascii\n0 0 0 4.6006931e-10\n",
    );

    let mut cloud = PointCloud::new();
    read_pcd(file.path(), &mut cloud).expect("reads");

    let color = cloud.colors[0];
    assert!((color[0] - 1.0).abs() < 1e-6);
    assert!((color[1] - 64.0 / 255.0).abs() < 1e-6);
    assert!((color[2] - 0.0).abs() < 1e-6);
}

/// S6: SIZE has fewer entries than FIELDS — a malformed header, read
/// must fail and leave the cloud empty.
#[test]
fn s6_malformed_size_count_fails_and_clears() {
    let file = write_temp(
        "VERSION 0.7\nFIELDS x y z\nSIZE 4 4\nTYPE F F F\nCOUNT 1 1 1\n\
WIDTH 1\nHEIGHT 1\nPOINTS 1\nDATA ascii\n0 0 0\n",
    );

    let mut cloud = PointCloud::new();
    cloud.positions.push([9.0, 9.0, 9.0]);
    let result = read_pcd(file.path(), &mut cloud);

    assert!(result.is_err());
    assert!(cloud.is_empty());
}

/// Property 1: round trip through uncompressed binary.
#[test]
fn round_trips_binary_with_normals_colors_intensity() {
    let cloud = sample_cloud();

    let file = NamedTempFile::new().unwrap();
    let mut options = WriteOptions::default();
    write_pcd(file.path(), &cloud, &mut options).expect("writes");

    let mut read_back = PointCloud::new();
    read_pcd(file.path(), &mut read_back).expect("reads");

    assert_eq!(read_back.len(), cloud.len());
    for i in 0..cloud.len() {
        assert_eq!(read_back.positions[i], cloud.positions[i]);
        assert_eq!(read_back.normals[i], cloud.normals[i]);
        assert_eq!(read_back.intensities[i], cloud.intensities[i]);
        for c in 0..3 {
            assert!((read_back.colors[i][c] - cloud.colors[i][c]).abs() < 1.0 / 255.0);
        }
    }
}

/// Property 2: round trip through LZF-compressed binary.
#[test]
fn round_trips_binary_compressed() {
    let cloud = sample_cloud();

    let file = NamedTempFile::new().unwrap();
    let mut options = WriteOptions {
        compressed: true,
        ..WriteOptions::default()
    };
    write_pcd(file.path(), &cloud, &mut options).expect("writes");

    let mut read_back = PointCloud::new();
    read_pcd(file.path(), &mut read_back).expect("reads");

    assert_eq!(read_back.positions, cloud.positions);
}

/// Property 3: ASCII round trip within 1e-6 relative tolerance.
#[test]
fn round_trips_ascii_positions() {
    let cloud = PointCloud {
        positions: vec![[1.5, -2.25, 3.0], [0.001, 100.0, -7.75]],
        ..Default::default()
    };

    let file = NamedTempFile::new().unwrap();
    let mut options = WriteOptions {
        write_ascii: true,
        ..WriteOptions::default()
    };
    write_pcd(file.path(), &cloud, &mut options).expect("writes");

    let mut read_back = PointCloud::new();
    read_pcd(file.path(), &mut read_back).expect("reads");

    for i in 0..cloud.len() {
        for axis in 0..3 {
            let expected = cloud.positions[i][axis];
            let actual = read_back.positions[i][axis];
            assert!((actual - expected).abs() <= expected.abs() * 1e-6 + 1e-9);
        }
    }
}

/// `read_pcd_with_options` with `remove_nan_points` set drops the NaN
/// point S1 leaves in and compacts the remaining attributes.
#[test]
fn read_with_options_removes_nan_points() {
    let file = write_temp(
        "VERSION 0.7\nFIELDS x y z intensity\nSIZE 4 4 4 4\nTYPE F F F F\nCOUNT 1 1 1 1\n\
WIDTH 3\nHEIGHT 1\nPOINTS 3\nDATA ascii\n0 0 0 0.1\n1 2 3 0.2\nNaN 6 7 0.3\n",
    );

    let mut cloud = PointCloud::new();
    let mut options = ReadOptions {
        remove_nan_points: true,
        ..ReadOptions::default()
    };
    read_pcd_with_options(file.path(), &mut cloud, &mut options).expect("reads");

    assert_eq!(cloud.len(), 2);
    assert_eq!(cloud.positions[1], [1.0, 2.0, 3.0]);
    assert_eq!(cloud.intensities, vec![0.1, 0.2]);
}

/// Property 7: field-order independence in the header.
#[test]
fn field_order_independent_headers_read_equivalent_clouds() {
    let a = write_temp(
        "VERSION 0.7\nFIELDS x y z intensity\nSIZE 4 4 4 4\nTYPE F F F F\nCOUNT 1 1 1 1\n\
WIDTH 1\nHEIGHT 1\nPOINTS 1\nDATA ascii\n1 2 3 0.5\n",
    );
    let b = write_temp(
        "VERSION 0.7\nFIELDS intensity x y z\nSIZE 4 4 4 4\nTYPE F F F F\nCOUNT 1 1 1 1\n\
WIDTH 1\nHEIGHT 1\nPOINTS 1\nDATA ascii\n0.5 1 2 3\n",
    );

    let mut cloud_a = PointCloud::new();
    let mut cloud_b = PointCloud::new();
    read_pcd(a.path(), &mut cloud_a).expect("reads");
    read_pcd(b.path(), &mut cloud_b).expect("reads");

    assert_eq!(cloud_a.positions, cloud_b.positions);
    assert_eq!(cloud_a.intensities, cloud_b.intensities);
}

fn sample_cloud() -> PointCloud {
    PointCloud {
        positions: vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [-1.0, -2.0, -3.0]],
        intensities: vec![0.1, 0.2, 0.3],
        normals: vec![[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
        colors: vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        covariances: vec![],
    }
}
