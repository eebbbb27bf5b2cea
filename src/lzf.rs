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

//! Marc Lehmann's LZF, a byte-oriented LZ77 compressor with no entropy
//! coding: literal runs and back-references only. Self-contained, no
//! external compression crate.

use crate::error::{PcdError, Result};

const HASH_LOG: u32 = 14;
const HASH_SIZE: usize = 1 << HASH_LOG;
const MAX_LITERAL: usize = 1 << 5;
const MAX_OFF: usize = 1 << 13;
const MAX_REF_LEN: usize = (1 << 8) + (1 << 3);

#[inline]
fn hash(p: &[u8]) -> usize {
    let v = (p[0] as u32) << 16 | (p[1] as u32) << 8 | p[2] as u32;
    (((v >> (24 - HASH_LOG)) as usize).wrapping_sub(v as usize * 5)) & (HASH_SIZE - 1)
}

/// Compress `src` into `dst`, returning the number of bytes written.
/// Returns `0` if `dst` is not large enough to hold the result; in that
/// case `dst`'s contents are not meaningful.
pub fn compress(src: &[u8], dst: &mut [u8]) -> usize {
    if src.is_empty() {
        return 0;
    }
    let mut htab = vec![0usize; HASH_SIZE];
    let mut seen = vec![false; HASH_SIZE];

    let mut ip = 0usize;
    let mut op = 0usize;
    let in_len = src.len();
    let out_len = dst.len();

    let mut lit_start = 0usize;
    let mut lit_len = 0usize;

    macro_rules! flush_literals {
        () => {
            while lit_len > 0 {
                let chunk = lit_len.min(MAX_LITERAL);
                if op + 1 + chunk > out_len {
                    return 0;
                }
                dst[op] = (chunk - 1) as u8;
                op += 1;
                dst[op..op + chunk].copy_from_slice(&src[lit_start..lit_start + chunk]);
                op += chunk;
                lit_start += chunk;
                lit_len -= chunk;
            }
        };
    }

    while ip + 2 < in_len {
        let h = hash(&src[ip..ip + 3]);
        let candidate = if seen[h] { Some(htab[h]) } else { None };
        htab[h] = ip;
        seen[h] = true;

        let mut match_len = 0usize;
        let mut offset = 0usize;
        if let Some(cand) = candidate {
            if cand < ip {
                offset = ip - cand - 1;
                if offset < MAX_OFF {
                    let max_possible = (in_len - ip).min(MAX_REF_LEN);
                    while match_len < max_possible && src[cand + match_len] == src[ip + match_len] {
                        match_len += 1;
                    }
                    if match_len < 3 {
                        match_len = 0;
                    }
                }
            }
        }

        if match_len >= 3 {
            flush_literals!();

            let len = match_len - 2;
            if len < 7 {
                if op + 2 > out_len {
                    return 0;
                }
                dst[op] = ((len << 5) as u8) | ((offset >> 8) as u8);
                op += 1;
            } else {
                if op + 3 > out_len {
                    return 0;
                }
                dst[op] = (7 << 5) | ((offset >> 8) as u8);
                op += 1;
                dst[op] = (len - 7) as u8;
                op += 1;
            }
            dst[op] = (offset & 0xff) as u8;
            op += 1;

            ip += 1;
            let end = ip + match_len - 1;
            while ip < end && ip + 2 < in_len {
                let h = hash(&src[ip..ip + 3]);
                htab[h] = ip;
                seen[h] = true;
                ip += 1;
            }
            ip = end;
            lit_start = ip;
        } else {
            lit_len += 1;
            ip += 1;
            if lit_len == MAX_LITERAL {
                flush_literals!();
            }
        }
    }

    lit_len += in_len - ip;
    flush_literals!();

    op
}

/// Decompress `src` (produced by [`compress`]) into `dst`, returning the
/// number of bytes written. Returns an error if `src` is malformed or
/// `dst` is too small for the decompressed result.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    let mut ip = 0usize;
    let mut op = 0usize;
    let in_len = src.len();
    let out_len = dst.len();

    while ip < in_len {
        let ctl = src[ip] as usize;
        ip += 1;

        if ctl < 32 {
            let run = ctl + 1;
            if ip + run > in_len {
                return Err(PcdError::DecompressFailed(
                    "literal run crosses end of input".to_string(),
                ));
            }
            if op + run > out_len {
                return Err(PcdError::DecompressFailed(
                    "literal run overflows output buffer".to_string(),
                ));
            }
            dst[op..op + run].copy_from_slice(&src[ip..ip + run]);
            ip += run;
            op += run;
        } else {
            let mut len = ctl >> 5;
            if len == 7 {
                if ip >= in_len {
                    return Err(PcdError::DecompressFailed(
                        "truncated extended length byte".to_string(),
                    ));
                }
                len += src[ip] as usize;
                ip += 1;
            }
            len += 2;

            if ip >= in_len {
                return Err(PcdError::DecompressFailed(
                    "truncated offset byte".to_string(),
                ));
            }
            let offset = ((ctl & 0x1f) << 8) | src[ip] as usize;
            ip += 1;

            if offset + 1 > op {
                return Err(PcdError::DecompressFailed(
                    "back-reference precedes start of output".to_string(),
                ));
            }
            if op + len > out_len {
                return Err(PcdError::DecompressFailed(
                    "back-reference overflows output buffer".to_string(),
                ));
            }

            let mut src_pos = op - offset - 1;
            for _ in 0..len {
                dst[op] = dst[src_pos];
                op += 1;
                src_pos += 1;
            }
        }
    }

    Ok(op)
}

/// Upper bound on the compressed size of `input_len` bytes of input,
/// safe to allocate before calling [`compress`].
pub fn max_compressed_size(input_len: usize) -> usize {
    input_len + input_len / 20 + 16
}
