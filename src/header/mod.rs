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

use crate::error::{PcdError, Result};
use std::str::FromStr;

pub mod emitter;
pub mod fields;
mod parser;

pub use emitter::write_header;
pub use fields::{build_fields, FieldDescriptor, PrimitiveKind};
pub use parser::parse_header;

/// Data-section encoding, as named in the `DATA` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    #[default]
    Ascii,
    Binary,
    BinaryCompressed,
}

impl FromStr for DataFormat {
    type Err = PcdError;

    fn from_str(s: &str) -> Result<Self> {
        // `binary_compressed` must be tested before `binary`: both match
        // the directive's prefix-matching rule, and the longer one wins.
        if s.starts_with("binary_compressed") {
            Ok(DataFormat::BinaryCompressed)
        } else if s.starts_with("binary") {
            Ok(DataFormat::Binary)
        } else if s.starts_with("ascii") {
            Ok(DataFormat::Ascii)
        } else {
            Err(PcdError::HeaderSyntax {
                line: 0,
                msg: format!("unknown DATA tag '{s}'"),
            })
        }
    }
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Ascii => "ascii",
            DataFormat::Binary => "binary",
            DataFormat::BinaryCompressed => "binary_compressed",
        }
    }
}

/// A normalized PCD header: everything needed to decode or encode the
/// data section that follows it.
#[derive(Debug, Clone)]
pub struct PcdHeader {
    pub version: String,
    pub fields: Vec<FieldDescriptor>,
    pub width: u32,
    pub height: u32,
    pub points: usize,
    /// Opaque; the reference implementation only ever stores the first
    /// token and always re-emits the fixed identity viewpoint on write.
    pub viewpoint: String,
    pub data: DataFormat,
    pub element_count: usize,
    pub point_stride_bytes: usize,
    pub has_xyz: bool,
    pub has_intensity: bool,
    pub has_normals: bool,
    pub has_colors: bool,
}

impl Default for PcdHeader {
    fn default() -> Self {
        PcdHeader {
            version: "0.7".to_string(),
            fields: Vec::new(),
            width: 0,
            height: 1,
            points: 0,
            viewpoint: "0 0 0 1 0 0 0".to_string(),
            data: DataFormat::default(),
            element_count: 0,
            point_stride_bytes: 0,
            has_xyz: false,
            has_intensity: false,
            has_normals: false,
            has_colors: false,
        }
    }
}

impl PcdHeader {
    /// Recompute `element_count`, `point_stride_bytes`, and the four
    /// presence flags from `self.fields`. Called after every directive
    /// that can change field layout (`SIZE`, `COUNT`) and once more after
    /// the full header is parsed.
    pub fn refresh_derived(&mut self) {
        self.element_count = self.fields.iter().map(|f| f.count).sum();
        self.point_stride_bytes = self.fields.iter().map(|f| f.width_bytes()).sum();
        self.has_xyz = fields::has_all(&self.fields, &["x", "y", "z"]);
        self.has_intensity = fields::lookup(&self.fields, "intensity").is_some();
        self.has_normals = fields::has_all(&self.fields, &["normal_x", "normal_y", "normal_z"]);
        self.has_colors = fields::has_any(&self.fields, &["rgb", "rgba"]);
    }

    /// Validate against the invariants in the data model: positions
    /// present, non-zero points/stride/field-count.
    pub fn validate(&self) -> Result<()> {
        if !self.has_xyz {
            return Err(PcdError::HeaderSemantics(
                "fields x, y, z are not all present".to_string(),
            ));
        }
        if self.points == 0 {
            return Err(PcdError::HeaderSemantics("zero points".to_string()));
        }
        if self.point_stride_bytes == 0 {
            return Err(PcdError::HeaderSemantics("zero point stride".to_string()));
        }
        if self.fields.is_empty() {
            return Err(PcdError::HeaderSemantics("no fields declared".to_string()));
        }
        Ok(())
    }
}
