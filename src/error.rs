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

use thiserror::Error;

/// Errors reported by the PCD codec.
///
/// `UnsupportedPrimitive` is deliberately absent: an unrecognized
/// type/size combination degrades to `0.0` at the unpack layer instead
/// of surfacing as an error, matching the reference behavior.
#[derive(Error, Debug)]
pub enum PcdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("header syntax error at line {line}: {msg}")]
    HeaderSyntax { line: usize, msg: String },

    #[error("header semantics error: {0}")]
    HeaderSemantics(String),

    #[error("data truncated: {0}")]
    DataTruncated(String),

    #[error("decompression failed: {0}")]
    DecompressFailed(String),

    #[error("compression failed: {0}")]
    CompressFailed(String),

    #[error("{what} of {got} exceeds configured limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        got: usize,
        limit: usize,
    },

    #[error("write cancelled by progress callback")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PcdError>;
