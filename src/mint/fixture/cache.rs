// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use dashmap::DashMap;

/// CRC32 (IEEE) of every data file read so far, keyed by data file name.
///
/// Entries are populated at most once. [`ChecksumCache::get_or_try_insert_with`]
/// runs the computation while holding the entry's shard lock, so concurrent
/// first reads of one name compute the value exactly once and later calls
/// never overwrite it. Other names hashing to the same shard wait for the
/// computation to finish.
#[derive(Debug, Default)]
pub struct ChecksumCache {
    entries: DashMap<String, u32>,
}

impl ChecksumCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.get(name).map(|v| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached value for `name`, computing it with `f` if absent.
    ///
    /// A failed computation leaves the entry vacant.
    pub fn get_or_try_insert_with<E, F>(&self, name: &str, f: F) -> Result<u32, E>
    where
        F: FnOnce() -> Result<u32, E>,
    {
        if let Some(v) = self.get(name) {
            return Ok(v);
        }
        self.entries
            .entry(name.to_string())
            .or_try_insert_with(f)
            .map(|v| *v)
    }
}
