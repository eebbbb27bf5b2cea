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

use super::PcdHeader;
use crate::error::Result;
use std::io::Write;

/// Write the textual header in the fixed directive order, each line
/// terminated by `\n`. `VIEWPOINT` is always emitted as the identity
/// transform regardless of what `header.viewpoint` holds, matching the
/// reference writer.
pub fn write_header<W: Write>(writer: &mut W, header: &PcdHeader) -> Result<()> {
    writeln!(
        writer,
        "# .PCD v{} - Point Cloud Data file format",
        header.version
    )?;
    writeln!(writer, "VERSION {}", header.version)?;

    let names: Vec<&str> = header.fields.iter().map(|f| f.name.as_str()).collect();
    writeln!(writer, "FIELDS {}", names.join(" "))?;

    let sizes: Vec<String> = header.fields.iter().map(|f| f.size.to_string()).collect();
    writeln!(writer, "SIZE {}", sizes.join(" "))?;

    let types: Vec<String> = header
        .fields
        .iter()
        .map(|f| f.kind.as_char().to_string())
        .collect();
    writeln!(writer, "TYPE {}", types.join(" "))?;

    let counts: Vec<String> = header.fields.iter().map(|f| f.count.to_string()).collect();
    writeln!(writer, "COUNT {}", counts.join(" "))?;

    writeln!(writer, "WIDTH {}", header.width)?;
    writeln!(writer, "HEIGHT {}", header.height)?;
    writeln!(writer, "VIEWPOINT 0 0 0 1 0 0 0")?;
    writeln!(writer, "POINTS {}", header.points)?;
    writeln!(writer, "DATA {}", header.data.as_str())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::parse_header;
    use std::io::Cursor;

    #[test]
    fn emits_directives_in_fixed_order_and_roundtrips_through_the_parser() {
        let text = "\
VERSION 0.7
FIELDS x y z intensity
SIZE 4 4 4 4
TYPE F F F F
COUNT 1 1 1 1
WIDTH 2
HEIGHT 1
VIEWPOINT 1 2 3 4 5 6 7
POINTS 2
DATA binary
";
        let mut cursor = Cursor::new(text.as_bytes());
        let header = parse_header(&mut cursor).unwrap();

        let mut out = Vec::new();
        write_header(&mut out, &header).unwrap();
        let rendered = String::from_utf8(out).unwrap();

        assert!(rendered.starts_with("# .PCD v0.7"));
        assert!(rendered.contains("VIEWPOINT 0 0 0 1 0 0 0"));
        assert!(!rendered.contains("1 2 3 4 5 6 7"));

        let mut reread = Cursor::new(rendered.as_bytes());
        let header2 = parse_header(&mut reread).unwrap();
        assert_eq!(header2.points, header.points);
        assert_eq!(header2.fields.len(), header.fields.len());
    }
}
