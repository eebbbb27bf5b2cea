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

//! Type- and width-tagged scalar decoding, one field at a time.
//!
//! An unrecognized type/size combination silently degrades to `0.0`
//! rather than erroring out: this is deliberate backward compatibility
//! with the reference implementation, not an oversight.

use crate::header::PrimitiveKind;
use byteorder::{ByteOrder, LittleEndian};

/// Read one scalar of `size` bytes at `data` as `kind`, host-native
/// (little-endian) byte order.
pub fn unpack_binary(data: &[u8], kind: PrimitiveKind, size: usize) -> f64 {
    match (kind, size) {
        (PrimitiveKind::Signed, 1) => data[0] as i8 as f64,
        (PrimitiveKind::Signed, 2) => LittleEndian::read_i16(data) as f64,
        (PrimitiveKind::Signed, 4) => LittleEndian::read_i32(data) as f64,
        (PrimitiveKind::Unsigned, 1) => data[0] as f64,
        (PrimitiveKind::Unsigned, 2) => LittleEndian::read_u16(data) as f64,
        (PrimitiveKind::Unsigned, 4) => LittleEndian::read_u32(data) as f64,
        (PrimitiveKind::Float, 4) => LittleEndian::read_f32(data) as f64,
        _ => 0.0,
    }
}

/// Parse a whitespace-delimited text token as `kind`. Parse failure
/// yields `0.0`, matching `strtol`/`strtoul`/`strtod`'s behavior on a
/// non-numeric prefix.
pub fn unpack_ascii(token: &str, kind: PrimitiveKind) -> f64 {
    match kind {
        PrimitiveKind::Signed => token.trim().parse::<i64>().unwrap_or(0) as f64,
        PrimitiveKind::Unsigned => token.trim().parse::<u64>().unwrap_or(0) as f64,
        PrimitiveKind::Float => token.trim().parse::<f64>().unwrap_or(0.0),
    }
}

/// Unpack a 4-byte binary color field as `[r, g, b]` in `[0, 1]`. The
/// four bytes are interpreted in BGR-A order; anything other than
/// `size == 4` yields the zero color.
pub fn unpack_binary_color(data: &[u8], size: usize) -> [f64; 3] {
    if size != 4 {
        return [0.0, 0.0, 0.0];
    }
    let (b, g, r) = (data[0], data[1], data[2]);
    [r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0]
}

/// Unpack a color field written as ASCII: the token is first parsed as a
/// 32-bit value of `kind`, then those four bytes are reinterpreted in
/// BGR order exactly as `unpack_binary_color` does.
pub fn unpack_ascii_color(token: &str, kind: PrimitiveKind, size: usize) -> [f64; 3] {
    if size != 4 {
        return [0.0, 0.0, 0.0];
    }
    let bytes: [u8; 4] = match kind {
        PrimitiveKind::Signed => (token.trim().parse::<i32>().unwrap_or(0)).to_le_bytes(),
        PrimitiveKind::Unsigned => (token.trim().parse::<u32>().unwrap_or(0)).to_le_bytes(),
        PrimitiveKind::Float => (token.trim().parse::<f32>().unwrap_or(0.0)).to_le_bytes(),
    };
    unpack_binary_color(&bytes, 4)
}

/// Inverse of `unpack_binary_color`/`unpack_ascii_color`: clamp each
/// channel to `[0, 1]`, scale to a byte, pack `[b, g, r, 0]`, and
/// reinterpret those four bytes as a little-endian `f32`.
pub fn pack_color(rgb: [f64; 3]) -> f32 {
    let to_byte = |c: f64| -> u8 { (c.clamp(0.0, 1.0) * 255.0).round() as u8 };
    let bytes = [to_byte(rgb[2]), to_byte(rgb[1]), to_byte(rgb[0]), 0u8];
    LittleEndian::read_f32(&bytes)
}
