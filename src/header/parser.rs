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

use super::{build_fields, PcdHeader};
use crate::error::{PcdError, Result};
use std::io::BufRead;

/// Directive keywords matched by a fixed-length prefix of the line's
/// first token, mirroring the reference parser's `substr(0, N)` checks.
/// `COLUMNS` is a synonym for `FIELDS`.
fn directive_of(token: &str) -> Option<&'static str> {
    const DIRECTIVES: &[(&str, usize)] = &[
        ("VERSION", 7),
        ("COLUMNS", 7),
        ("FIELDS", 6),
        ("SIZE", 4),
        ("TYPE", 4),
        ("COUNT", 5),
        ("WIDTH", 5),
        ("HEIGHT", 6),
        ("VIEWPOINT", 9),
        ("POINTS", 6),
        ("DATA", 4),
    ];
    for &(name, prefix_len) in DIRECTIVES {
        if token.len() >= prefix_len && token[..prefix_len] == name[..prefix_len] {
            return Some(if name == "COLUMNS" { "FIELDS" } else { name });
        }
    }
    None
}

/// Parse a PCD header from `reader`, consuming lines up to and including
/// the `DATA` directive. Comment lines (`#`-prefixed) and blank lines are
/// skipped. Returns a fully-validated `PcdHeader`.
pub fn parse_header<R: BufRead>(reader: &mut R) -> Result<PcdHeader> {
    let mut header = PcdHeader::default();

    let mut names: Vec<String> = Vec::new();
    let mut sizes: Vec<usize> = Vec::new();
    let mut types: Vec<char> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();

    let mut line_num = 0usize;
    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Err(PcdError::HeaderSyntax {
                line: line_num,
                msg: "unexpected EOF before DATA directive".to_string(),
            });
        }
        line_num += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        let Some(directive) = directive_of(parts[0]) else {
            continue;
        };
        let rest = &parts[1..];

        match directive {
            "VERSION" => {
                header.version = rest.first().map(|s| s.to_string()).unwrap_or_default();
            }
            "FIELDS" => {
                if rest.is_empty() {
                    return Err(PcdError::HeaderSyntax {
                        line: line_num,
                        msg: "FIELDS requires at least one name".to_string(),
                    });
                }
                names = rest.iter().map(|s| s.to_string()).collect();
                sizes = vec![4; names.len()];
                types = vec!['F'; names.len()];
                counts = vec![1; names.len()];
            }
            "SIZE" => {
                if rest.len() != names.len() {
                    return Err(PcdError::HeaderSyntax {
                        line: line_num,
                        msg: format!(
                            "SIZE has {} entries, expected {}",
                            rest.len(),
                            names.len()
                        ),
                    });
                }
                sizes = parse_each(rest, line_num, "SIZE")?;
            }
            "TYPE" => {
                if rest.len() != names.len() {
                    return Err(PcdError::HeaderSyntax {
                        line: line_num,
                        msg: format!(
                            "TYPE has {} entries, expected {}",
                            rest.len(),
                            names.len()
                        ),
                    });
                }
                types = rest
                    .iter()
                    .map(|s| {
                        s.chars().next().ok_or_else(|| PcdError::HeaderSyntax {
                            line: line_num,
                            msg: "empty TYPE token".to_string(),
                        })
                    })
                    .collect::<Result<Vec<char>>>()?;
            }
            "COUNT" => {
                if rest.len() != names.len() {
                    return Err(PcdError::HeaderSyntax {
                        line: line_num,
                        msg: format!(
                            "COUNT has {} entries, expected {}",
                            rest.len(),
                            names.len()
                        ),
                    });
                }
                counts = parse_each(rest, line_num, "COUNT")?;
            }
            "WIDTH" => {
                header.width = parse_one(rest.first(), line_num, "WIDTH")?;
            }
            "HEIGHT" => {
                header.height = parse_one(rest.first(), line_num, "HEIGHT")?;
                header.points = header.width as usize * header.height as usize;
            }
            "VIEWPOINT" => {
                header.viewpoint = rest.first().map(|s| s.to_string()).unwrap_or_default();
            }
            "POINTS" => {
                header.points = parse_one(rest.first(), line_num, "POINTS")?;
            }
            "DATA" => {
                let tag = rest.first().ok_or_else(|| PcdError::HeaderSyntax {
                    line: line_num,
                    msg: "DATA requires a format tag".to_string(),
                })?;
                header.data = tag.parse()?;
                header.fields = build_fields(&names, &sizes, &types, &counts)?;
                header.refresh_derived();
                header.validate()?;
                return Ok(header);
            }
            _ => unreachable!("directive_of only returns recognized names"),
        }
    }
}

fn parse_each<T: std::str::FromStr>(
    tokens: &[&str],
    line: usize,
    directive: &str,
) -> Result<Vec<T>> {
    tokens
        .iter()
        .map(|s| {
            s.parse::<T>().map_err(|_| PcdError::HeaderSyntax {
                line,
                msg: format!("invalid {directive} value '{s}'"),
            })
        })
        .collect()
}

fn parse_one<T: std::str::FromStr>(
    token: Option<&&str>,
    line: usize,
    directive: &str,
) -> Result<T> {
    match token {
        Some(s) => s.parse::<T>().map_err(|_| PcdError::HeaderSyntax {
            line,
            msg: format!("invalid {directive} value '{s}'"),
        }),
        None => Err(PcdError::HeaderSyntax {
            line,
            msg: format!("{directive} requires a value"),
        }),
    }
}
