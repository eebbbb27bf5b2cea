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

//! Resource ceilings checked against header-declared sizes before any
//! allocation, so a hostile or corrupt header cannot make the reader try
//! to allocate an unreasonable amount of memory.

use crate::error::{PcdError, Result};
use crate::header::PcdHeader;

/// Allocation ceilings enforced before sizing reader buffers from a parsed
/// header. Defaults are generous for real LiDAR/RGB-D captures but reject
/// headers that declare clearly bogus sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_points: usize,
    pub max_fields: usize,
    pub max_field_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_points: 500_000_000,
            max_fields: 256,
            max_field_size: 8,
        }
    }
}

impl Limits {
    pub fn check(&self, header: &PcdHeader) -> Result<()> {
        if header.points > self.max_points {
            return Err(PcdError::LimitExceeded {
                what: "points",
                got: header.points,
                limit: self.max_points,
            });
        }
        if header.fields.len() > self.max_fields {
            return Err(PcdError::LimitExceeded {
                what: "fields",
                got: header.fields.len(),
                limit: self.max_fields,
            });
        }
        for field in &header.fields {
            if field.size > self.max_field_size {
                return Err(PcdError::LimitExceeded {
                    what: "field size",
                    got: field.size,
                    limit: self.max_field_size,
                });
            }
        }
        Ok(())
    }
}
