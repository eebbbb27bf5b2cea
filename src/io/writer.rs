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
use crate::error::{PcdError, Result};
use crate::header::{build_fields, write_header, DataFormat, PcdHeader};
use crate::lzf;
use crate::options::WriteOptions;
use crate::primitive::pack_color;
use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Builds the header for a cloud at write time. Field composition is
/// fixed by the cloud's own presence flags, in order: `x,y,z` always;
/// normals if present; `rgb` if present; `intensity` if present. Every
/// field is `type='F', size=4, count=1`.
fn build_header(cloud: &PointCloud, options: &WriteOptions) -> Result<PcdHeader> {
    let has_normals = cloud.has_normals();
    let has_colors = cloud.has_colors();
    let has_intensity = cloud.has_intensities();

    let mut names = vec!["x".to_string(), "y".to_string(), "z".to_string()];
    if has_normals {
        names.push("normal_x".to_string());
        names.push("normal_y".to_string());
        names.push("normal_z".to_string());
    }
    if has_colors {
        names.push("rgb".to_string());
    }
    if has_intensity {
        names.push("intensity".to_string());
    }

    let n = names.len();
    let sizes = vec![4usize; n];
    let types = vec!['F'; n];
    let counts = vec![1usize; n];

    let mut header = PcdHeader::default();
    header.fields = build_fields(&names, &sizes, &types, &counts)?;
    header.points = cloud.len();
    header.width = cloud.len() as u32;
    header.height = 1;
    header.data = if options.write_ascii {
        DataFormat::Ascii
    } else if options.compressed {
        DataFormat::BinaryCompressed
    } else {
        DataFormat::Binary
    };
    header.refresh_derived();
    header.validate()?;
    Ok(header)
}

/// Formats `value` as C's `%.*g` would: up to `sig_digits` significant
/// digits, switching to exponential notation outside that range, with
/// trailing zeros trimmed.
fn format_g(value: f64, sig_digits: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= sig_digits {
        let mantissa_digits = (sig_digits - 1).max(0) as usize;
        let sci = format!("{:.*e}", mantissa_digits, value);
        if let Some(epos) = sci.find('e') {
            let mantissa = trim_trailing_zeros(&sci[..epos]);
            let exp_num: i32 = sci[epos + 1..].parse().unwrap_or(0);
            format!("{}e{}{:02}", mantissa, if exp_num >= 0 { "+" } else { "-" }, exp_num.abs())
        } else {
            sci
        }
    } else {
        let decimals = (sig_digits - 1 - exponent).max(0) as usize;
        trim_trailing_zeros(&format!("{:.*}", decimals, value))
    }
}

fn trim_trailing_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Validates that `cloud` has positions, builds its header, opens
/// `path` in binary mode, and emits header then data. Returns an error
/// on any step's failure.
pub fn write_pcd<P: AsRef<Path>>(
    path: P,
    cloud: &PointCloud,
    options: &mut WriteOptions,
) -> Result<()> {
    match write_pcd_inner(path, cloud, options) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::warn!("write_pcd failed: {e}");
            Err(e)
        }
    }
}

fn write_pcd_inner<P: AsRef<Path>>(
    path: P,
    cloud: &PointCloud,
    options: &mut WriteOptions,
) -> Result<()> {
    if cloud.is_empty() {
        return Err(PcdError::HeaderSemantics(
            "cloud has no positions to write".to_string(),
        ));
    }

    let header = build_header(cloud, options)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_header(&mut writer, &header)?;

    match header.data {
        DataFormat::Ascii => write_ascii(&mut writer, cloud, options)?,
        DataFormat::Binary => write_binary(&mut writer, cloud, options)?,
        DataFormat::BinaryCompressed => write_compressed(&mut writer, cloud, options)?,
    }

    writer.flush()?;
    log::debug!("wrote {} points ({})", cloud.len(), header.data.as_str());
    Ok(())
}

fn write_ascii<W: Write>(writer: &mut W, cloud: &PointCloud, options: &mut WriteOptions) -> Result<()> {
    let has_normals = cloud.has_normals();
    let has_colors = cloud.has_colors();
    let has_intensity = cloud.has_intensities();
    let n = cloud.len();

    for i in 0..n {
        let p = cloud.positions[i];
        let mut tokens = vec![format_g(p[0], 10), format_g(p[1], 10), format_g(p[2], 10)];
        if has_normals {
            let v = cloud.normals[i];
            tokens.push(format_g(v[0], 10));
            tokens.push(format_g(v[1], 10));
            tokens.push(format_g(v[2], 10));
        }
        if has_colors {
            let packed = pack_color(cloud.colors[i]) as f64;
            tokens.push(format_g(packed, 10));
        }
        if has_intensity {
            tokens.push(format!("{:.1}", cloud.intensities[i]));
        }
        writeln!(writer, "{}", tokens.join(" "))?;

        if !options.tick((i + 1) as f64 / n as f64) {
            return Err(PcdError::Cancelled);
        }
    }
    Ok(())
}

fn write_binary<W: Write>(writer: &mut W, cloud: &PointCloud, options: &mut WriteOptions) -> Result<()> {
    let has_normals = cloud.has_normals();
    let has_colors = cloud.has_colors();
    let has_intensity = cloud.has_intensities();
    let n = cloud.len();

    for i in 0..n {
        let p = cloud.positions[i];
        writer.write_f32::<LittleEndian>(p[0] as f32)?;
        writer.write_f32::<LittleEndian>(p[1] as f32)?;
        writer.write_f32::<LittleEndian>(p[2] as f32)?;
        if has_normals {
            let v = cloud.normals[i];
            writer.write_f32::<LittleEndian>(v[0] as f32)?;
            writer.write_f32::<LittleEndian>(v[1] as f32)?;
            writer.write_f32::<LittleEndian>(v[2] as f32)?;
        }
        if has_colors {
            writer.write_f32::<LittleEndian>(pack_color(cloud.colors[i]))?;
        }
        if has_intensity {
            writer.write_f32::<LittleEndian>(cloud.intensities[i] as f32)?;
        }

        if !options.tick((i + 1) as f64 / n as f64) {
            return Err(PcdError::Cancelled);
        }
    }
    Ok(())
}

fn write_compressed<W: Write>(writer: &mut W, cloud: &PointCloud, options: &mut WriteOptions) -> Result<()> {
    let has_normals = cloud.has_normals();
    let has_colors = cloud.has_colors();
    let has_intensity = cloud.has_intensities();
    let n = cloud.len();

    let mut uncompressed: Vec<u8> = Vec::new();
    for axis in 0..3 {
        for i in 0..n {
            uncompressed.write_f32::<LittleEndian>(cloud.positions[i][axis] as f32)?;
        }
    }
    if has_normals {
        for axis in 0..3 {
            for i in 0..n {
                uncompressed.write_f32::<LittleEndian>(cloud.normals[i][axis] as f32)?;
            }
        }
    }
    if has_colors {
        for i in 0..n {
            uncompressed.write_f32::<LittleEndian>(pack_color(cloud.colors[i]))?;
        }
    }
    if has_intensity {
        for i in 0..n {
            uncompressed.write_f32::<LittleEndian>(cloud.intensities[i] as f32)?;
        }
    }
    if !options.tick(1.0 / 3.0) {
        return Err(PcdError::Cancelled);
    }

    let mut compressed = vec![0u8; lzf::max_compressed_size(uncompressed.len())];
    let compressed_size = lzf::compress(&uncompressed, &mut compressed);
    if compressed_size == 0 {
        return Err(PcdError::CompressFailed(
            "LZF compression overflowed its scratch buffer".to_string(),
        ));
    }
    compressed.truncate(compressed_size);
    if !options.tick(2.0 / 3.0) {
        return Err(PcdError::Cancelled);
    }

    writer.write_u32::<LittleEndian>(compressed_size as u32)?;
    writer.write_u32::<LittleEndian>(uncompressed.len() as u32)?;
    writer.write_all(&compressed)?;
    if !options.tick(1.0) {
        return Err(PcdError::Cancelled);
    }
    Ok(())
}
