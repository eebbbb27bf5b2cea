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

use crate::cloud::PointCloud;
use crate::decoder;
use crate::decoder::ascii::AsciiReader;
use crate::decoder::binary::BinaryReader;
use crate::decoder::compressed::CompressedReader;
use crate::error::Result;
use crate::header::{parse_header, DataFormat};
use crate::layout::build_plan;
use crate::limits::Limits;
use crate::options::ReadOptions;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Opens `path` in binary mode, parses the header, and dispatches to the
/// matching data-section reader. On any failure `out_cloud` is cleared
/// and the error is returned.
pub fn read_pcd<P: AsRef<Path>>(path: P, out_cloud: &mut PointCloud) -> Result<()> {
    read_pcd_with_limits(path, out_cloud, &Limits::default())
}

pub fn read_pcd_with_limits<P: AsRef<Path>>(
    path: P,
    out_cloud: &mut PointCloud,
    limits: &Limits,
) -> Result<()> {
    match read_pcd_inner(path, out_cloud, limits) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::warn!("read_pcd failed: {e}");
            out_cloud.clear();
            Err(e)
        }
    }
}

/// Reads `path` into `out_cloud` the same way `read_pcd` does, then applies
/// `options`: `remove_nan_points`/`remove_infinite_points` drive a
/// `PointCloud::retain_finite` pass, and `update_progress` (if present) is
/// polled once on completion. The codec itself never filters; this is the
/// caller-facing convenience the `ReadOptions` contract documents.
pub fn read_pcd_with_options<P: AsRef<Path>>(
    path: P,
    out_cloud: &mut PointCloud,
    options: &mut ReadOptions,
) -> Result<()> {
    read_pcd_with_limits(path, out_cloud, &Limits::default())?;

    if options.remove_nan_points || options.remove_infinite_points {
        out_cloud.retain_finite(options.remove_nan_points, options.remove_infinite_points);
    }
    if let Some(cb) = &mut options.update_progress {
        cb(1.0);
    }
    Ok(())
}

fn read_pcd_inner<P: AsRef<Path>>(
    path: P,
    out_cloud: &mut PointCloud,
    limits: &Limits,
) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let header = parse_header(&mut reader)?;
    limits.check(&header)?;

    let plan = build_plan(&header.fields);
    decoder::preallocate(
        out_cloud,
        header.points,
        header.has_intensity,
        header.has_normals,
        header.has_colors,
    );

    match header.data {
        DataFormat::Ascii => {
            let mut decoder = AsciiReader::new(&mut reader, &plan, header.element_count, header.points);
            decoder.decode(out_cloud)?;
        }
        DataFormat::Binary => {
            let mut decoder = BinaryReader::new(&mut reader, &plan, header.point_stride_bytes, header.points);
            decoder.decode(out_cloud)?;
        }
        DataFormat::BinaryCompressed => {
            let mut decoder = CompressedReader::new(&mut reader, &plan, header.points);
            decoder.decode(out_cloud)?;
        }
    }

    log::debug!(
        "read {} points ({} fields, {})",
        header.points,
        header.fields.len(),
        header.data.as_str()
    );
    Ok(())
}
