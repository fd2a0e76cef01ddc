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

//! Static table of data files known to the harness.

use crate::mint::error::{Error, Result};

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;

/// Every data file name with its size in bytes.
pub const DATA_FILES: [(&str, u64); 13] = [
    ("datafile-0-b", 0),
    ("datafile-1-b", 1),
    ("datafile-1-kB", KIB),
    ("datafile-10-kB", 10 * KIB),
    ("datafile-33-kB", 33 * KIB),
    ("datafile-100-kB", 100 * KIB),
    ("datafile-1.03-MB", 1056 * KIB),
    ("datafile-1-MB", MIB),
    ("datafile-5-MB", 5 * MIB),
    ("datafile-6-MB", 6 * MIB),
    ("datafile-11-MB", 11 * MIB),
    ("datafile-65-MB", 65 * MIB),
    ("datafile-129-MB", 129 * MIB),
];

/// Returns the declared size of data file `name`.
pub fn fixture_size(name: &str) -> Result<u64> {
    DATA_FILES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, size)| *size)
        .ok_or_else(|| Error::FixtureNotFound(name.to_string()))
}

/// Returns the names of all data files no larger than `max_size`.
pub fn fixtures_up_to(max_size: u64) -> impl Iterator<Item = &'static str> {
    DATA_FILES
        .iter()
        .filter(move |(_, size)| *size <= max_size)
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sizes() {
        assert_eq!(fixture_size("datafile-0-b").unwrap(), 0);
        assert_eq!(fixture_size("datafile-10-kB").unwrap(), 10 * 1024);
        assert_eq!(fixture_size("datafile-1.03-MB").unwrap(), 1056 * 1024);
        assert_eq!(fixture_size("datafile-129-MB").unwrap(), 129 * 1024 * 1024);
    }

    #[test]
    fn unknown_name() {
        assert!(matches!(
            fixture_size("datafile-2-kB"),
            Err(Error::FixtureNotFound(n)) if n == "datafile-2-kB"
        ));
    }

    #[test]
    fn small_fixtures() {
        let names: Vec<_> = fixtures_up_to(KIB).collect();
        assert_eq!(names, ["datafile-0-b", "datafile-1-b", "datafile-1-kB"]);
    }
}
