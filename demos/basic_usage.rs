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

//! # pcd-cloud Example: Basic Usage
//!
//! Demonstrates:
//! 1. Building a synthetic `PointCloud` in memory.
//! 2. Writing it to disk in each of the three encodings.
//! 3. Reading each variant back and checking they agree.
//!
//! Run with `cargo run --example basic_usage`.

use anyhow::Result;
use pcd_cloud::{read_pcd_with_options, write_pcd, PointCloud, ReadOptions, WriteOptions};
use rand::Rng;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let cloud = synthetic_cloud(100_000);
    println!("Generated {} points.", cloud.len());

    run_round_trip("example_binary.pcd", &cloud, WriteOptions::default())?;
    run_round_trip(
        "example_compressed.pcd",
        &cloud,
        WriteOptions {
            compressed: true,
            ..WriteOptions::default()
        },
    )?;
    run_round_trip(
        "example_ascii.pcd",
        &cloud,
        WriteOptions {
            write_ascii: true,
            ..WriteOptions::default()
        },
    )?;

    Ok(())
}

fn run_round_trip(path: &str, cloud: &PointCloud, mut options: WriteOptions) -> Result<()> {
    let start_write = Instant::now();
    write_pcd(path, cloud, &mut options).map_err(|e| anyhow::anyhow!(e))?;
    println!("{}: wrote in {:?}", path, start_write.elapsed());

    let start_read = Instant::now();
    let mut read_back = PointCloud::new();
    let mut read_options = ReadOptions {
        remove_nan_points: true,
        remove_infinite_points: true,
        ..ReadOptions::default()
    };
    read_pcd_with_options(path, &mut read_back, &mut read_options).map_err(|e| anyhow::anyhow!(e))?;
    println!("{}: read back {} points in {:?}", path, read_back.len(), start_read.elapsed());

    Ok(())
}

fn synthetic_cloud(points: usize) -> PointCloud {
    let mut rng = rand::rng();
    let mut cloud = PointCloud {
        positions: Vec::with_capacity(points),
        intensities: Vec::with_capacity(points),
        normals: Vec::with_capacity(points),
        colors: Vec::with_capacity(points),
        covariances: Vec::new(),
    };

    for _ in 0..points {
        cloud.positions.push([
            rng.random_range(-100.0..100.0),
            rng.random_range(-100.0..100.0),
            rng.random_range(-20.0..30.0),
        ]);
        cloud.intensities.push(rng.random_range(0.0..1.0));
        cloud.normals.push([0.0, 0.0, 1.0]);
        cloud.colors.push([rng.random(), rng.random(), rng.random()]);
    }
    cloud
}
