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

//! Field descriptor construction: parallel `(names, sizes, types, counts)`
//! arrays in, a list of fully-offset `FieldDescriptor`s out.

use crate::error::{PcdError, Result};

/// The three primitive kinds a PCD field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Signed,
    Unsigned,
    Float,
}

impl PrimitiveKind {
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'I' => Ok(PrimitiveKind::Signed),
            'U' => Ok(PrimitiveKind::Unsigned),
            'F' => Ok(PrimitiveKind::Float),
            other => Err(PcdError::HeaderSemantics(format!(
                "unrecognized TYPE character '{other}'"
            ))),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            PrimitiveKind::Signed => 'I',
            PrimitiveKind::Unsigned => 'U',
            PrimitiveKind::Float => 'F',
        }
    }
}

/// A named, typed channel contributing `count` scalar values per point.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: PrimitiveKind,
    pub size: usize,
    pub count: usize,
    /// Index among flattened scalar elements of a point.
    pub element_offset: usize,
    /// Byte position within a packed point record.
    pub byte_offset: usize,
}

impl FieldDescriptor {
    /// Total bytes this field occupies within one point record.
    pub fn width_bytes(&self) -> usize {
        self.size * self.count
    }
}

/// Build a descriptor list from parallel arrays, recomputing
/// `element_offset`/`byte_offset` as the running sum of the preceding
/// fields' `count`/`count*size`. Rejects mismatched array lengths.
pub fn build_fields(
    names: &[String],
    sizes: &[usize],
    types: &[char],
    counts: &[usize],
) -> Result<Vec<FieldDescriptor>> {
    let n = names.len();
    if sizes.len() != n {
        return Err(PcdError::HeaderSyntax {
            line: 0,
            msg: format!("SIZE has {} entries, expected {}", sizes.len(), n),
        });
    }
    if types.len() != n {
        return Err(PcdError::HeaderSyntax {
            line: 0,
            msg: format!("TYPE has {} entries, expected {}", types.len(), n),
        });
    }
    if counts.len() != n {
        return Err(PcdError::HeaderSyntax {
            line: 0,
            msg: format!("COUNT has {} entries, expected {}", counts.len(), n),
        });
    }

    let mut fields = Vec::with_capacity(n);
    let mut element_offset = 0;
    let mut byte_offset = 0;
    for i in 0..n {
        let kind = PrimitiveKind::from_char(types[i])?;
        let size = sizes[i];
        let count = counts[i];
        fields.push(FieldDescriptor {
            name: names[i].clone(),
            kind,
            size,
            count,
            element_offset,
            byte_offset,
        });
        element_offset += count;
        byte_offset += count * size;
    }
    Ok(fields)
}

pub fn lookup<'a>(fields: &'a [FieldDescriptor], name: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find(|f| f.name == name)
}

pub fn has_all(fields: &[FieldDescriptor], names: &[&str]) -> bool {
    names.iter().all(|n| lookup(fields, n).is_some())
}

pub fn has_any(fields: &[FieldDescriptor], names: &[&str]) -> bool {
    names.iter().any(|n| lookup(fields, n).is_some())
}
