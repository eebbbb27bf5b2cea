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

use super::store_scalar;
use crate::cloud::PointCloud;
use crate::error::{PcdError, Result};
use crate::layout::{Destination, PlannedField};
use crate::lzf;
use crate::primitive::{unpack_binary, unpack_binary_color};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

pub struct CompressedReader<'a, R: Read> {
    reader: &'a mut R,
    plan: &'a [PlannedField],
    points_to_read: usize,
}

impl<'a, R: Read> CompressedReader<'a, R> {
    pub fn new(reader: &'a mut R, plan: &'a [PlannedField], points_to_read: usize) -> Self {
        Self {
            reader,
            plan,
            points_to_read,
        }
    }

    /// The decompressed buffer is column-major: field `f`'s region is
    /// `points * w_f` bytes starting at `byte_offset_f * points`, not
    /// `w_f * points` scaled by a running element index. This is a
    /// reference-layout quirk, preserved verbatim rather than "fixed".
    pub fn decode(&mut self, output: &mut PointCloud) -> Result<()> {
        let compressed_size = self.reader.read_u32::<LittleEndian>()? as usize;
        let uncompressed_size = self.reader.read_u32::<LittleEndian>()? as usize;

        let mut compressed = vec![0u8; compressed_size];
        self.reader.read_exact(&mut compressed)?;

        let mut decompressed = vec![0u8; uncompressed_size];
        let produced = lzf::decompress(&compressed, &mut decompressed)?;
        if produced != uncompressed_size {
            return Err(PcdError::DecompressFailed(format!(
                "expected {} decompressed bytes, got {}",
                uncompressed_size, produced
            )));
        }

        for planned in self.plan {
            let field = &planned.field;
            let width = field.size * field.count;
            let base = field.byte_offset * self.points_to_read;
            let region_len = width * self.points_to_read;
            if base + region_len > decompressed.len() {
                return Err(PcdError::DataTruncated(format!(
                    "field '{}' region exceeds decompressed buffer",
                    field.name
                )));
            }

            for i in 0..self.points_to_read {
                let start = base + i * width;
                let data = &decompressed[start..start + field.size];

                if planned.destination == Destination::Color {
                    output.colors[i] = unpack_binary_color(data, field.size);
                } else {
                    let value = unpack_binary(data, field.kind, field.size);
                    store_scalar(output, planned.destination, i, value);
                }
            }
        }
        Ok(())
    }
}
