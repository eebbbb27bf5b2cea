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
use crate::error::Result;
use crate::layout::{Destination, PlannedField};
use crate::primitive::{unpack_binary, unpack_binary_color};
use std::io::Read;

pub struct BinaryReader<'a, R: Read> {
    reader: &'a mut R,
    plan: &'a [PlannedField],
    point_stride_bytes: usize,
    points_to_read: usize,
}

impl<'a, R: Read> BinaryReader<'a, R> {
    pub fn new(
        reader: &'a mut R,
        plan: &'a [PlannedField],
        point_stride_bytes: usize,
        points_to_read: usize,
    ) -> Self {
        Self {
            reader,
            plan,
            point_stride_bytes,
            points_to_read,
        }
    }

    /// Reads one point record of `point_stride_bytes` at a time. A short
    /// read fails the whole operation.
    pub fn decode(&mut self, output: &mut PointCloud) -> Result<()> {
        let mut record = vec![0u8; self.point_stride_bytes];

        for i in 0..self.points_to_read {
            self.reader.read_exact(&mut record)?;

            for planned in self.plan {
                let field = &planned.field;
                let start = field.byte_offset;
                let end = start + field.size;
                let data = &record[start..end];

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
