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
use crate::layout::{Destination, PlannedField};
use crate::primitive::{unpack_ascii, unpack_ascii_color};
use std::io::BufRead;

pub struct AsciiReader<'a, R: BufRead> {
    reader: &'a mut R,
    plan: &'a [PlannedField],
    element_count: usize,
    points_to_read: usize,
}

impl<'a, R: BufRead> AsciiReader<'a, R> {
    pub fn new(
        reader: &'a mut R,
        plan: &'a [PlannedField],
        element_count: usize,
        points_to_read: usize,
    ) -> Self {
        Self {
            reader,
            plan,
            element_count,
            points_to_read,
        }
    }

    /// Lines with fewer than `element_count` whitespace-separated tokens
    /// are skipped rather than failing the read, matching the reference
    /// reader's tolerance for short trailing lines.
    pub fn decode(&mut self, output: &mut PointCloud) -> crate::error::Result<()> {
        let mut line = String::new();
        let mut i = 0usize;

        while i < self.points_to_read {
            line.clear();
            let bytes_read = self.reader.read_line(&mut line)?;
            if bytes_read == 0 {
                break;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < self.element_count {
                continue;
            }

            for planned in self.plan {
                let start = planned.field.element_offset;
                if planned.destination == Destination::Color {
                    let color = unpack_ascii_color(tokens[start], planned.field.kind, planned.field.size);
                    output.colors[i] = color;
                } else {
                    let value = unpack_ascii(tokens[start], planned.field.kind);
                    store_scalar(output, planned.destination, i, value);
                }
            }
            i += 1;
        }

        if i < self.points_to_read {
            return Err(crate::error::PcdError::DataTruncated(format!(
                "expected {} ASCII points, found {}",
                self.points_to_read, i
            )));
        }
        Ok(())
    }
}
