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

//! Options passed to the codec façade functions, `read_pcd`/`write_pcd`.

/// Controls how `write_pcd` serializes a cloud. `write_ascii` overrides
/// `compressed`: the reference writer only considers compression when
/// emitting binary data.
pub struct WriteOptions {
    pub write_ascii: bool,
    pub compressed: bool,
    pub print_progress: bool,
    /// Polled at component-defined checkpoints; returning `false` aborts
    /// the write with `PcdError::Cancelled`.
    pub update_progress: Option<Box<dyn FnMut(f64) -> bool>>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            write_ascii: false,
            compressed: false,
            print_progress: false,
            update_progress: None,
        }
    }
}

impl WriteOptions {
    /// Poll the progress callback, if any. Returns `true` to continue.
    pub fn tick(&mut self, fraction: f64) -> bool {
        if self.print_progress {
            log::debug!("write progress: {:.1}%", fraction * 100.0);
        }
        match &mut self.update_progress {
            Some(cb) => cb(fraction),
            None => true,
        }
    }
}

/// Options accepted by `read_pcd`. The codec itself never filters
/// non-finite points; `remove_nan_points`/`remove_infinite_points` are
/// read back by the caller to decide whether to invoke
/// `PointCloud::retain_finite` after a successful read.
pub struct ReadOptions {
    pub format: String,
    pub remove_nan_points: bool,
    pub remove_infinite_points: bool,
    pub update_progress: Option<Box<dyn FnMut(f64) -> bool>>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            format: "auto".to_string(),
            remove_nan_points: false,
            remove_infinite_points: false,
            update_progress: None,
        }
    }
}
