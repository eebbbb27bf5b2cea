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

//! Precomputes, once per header, where each field's decoded scalar lands
//! in a `PointCloud`. Built once in the reader before the point loop so
//! the per-point hot path is a table lookup rather than a name compare.

use crate::header::FieldDescriptor;

/// Where a field's decoded value(s) land in a `PointCloud`, or that they
/// are read and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    X,
    Y,
    Z,
    Intensity,
    NormalX,
    NormalY,
    NormalZ,
    Color,
    Unknown,
}

fn destination_of(name: &str) -> Destination {
    match name {
        "x" => Destination::X,
        "y" => Destination::Y,
        "z" => Destination::Z,
        "intensity" => Destination::Intensity,
        "normal_x" => Destination::NormalX,
        "normal_y" => Destination::NormalY,
        "normal_z" => Destination::NormalZ,
        "rgb" | "rgba" => Destination::Color,
        _ => Destination::Unknown,
    }
}

/// A field descriptor paired with its resolved destination slot.
#[derive(Debug, Clone)]
pub struct PlannedField {
    pub field: FieldDescriptor,
    pub destination: Destination,
}

/// Build the dispatch plan for an entire field list, in header order.
pub fn build_plan(fields: &[FieldDescriptor]) -> Vec<PlannedField> {
    fields
        .iter()
        .map(|f| PlannedField {
            field: f.clone(),
            destination: destination_of(&f.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{build_fields, PrimitiveKind};

    #[test]
    fn plans_known_fields_and_discards_unknown() {
        let names = vec!["x".into(), "y".into(), "z".into(), "fpfh".into()];
        let sizes = vec![4, 4, 4, 4];
        let types = vec!['F', 'F', 'F', 'F'];
        let counts = vec![1, 1, 1, 33];
        let fields = build_fields(&names, &sizes, &types, &counts).unwrap();
        let plan = build_plan(&fields);

        assert_eq!(plan[0].destination, Destination::X);
        assert_eq!(plan[3].destination, Destination::Unknown);
        assert_eq!(plan[3].field.kind, PrimitiveKind::Float);
    }
}
