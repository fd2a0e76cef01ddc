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

use crate::mint::checksum::Crc32Ieee;
use crate::mint::error::{Error, Result};
use crate::mint::fixture::cache::ChecksumCache;
use crate::mint::fixture::reader::FixtureReader;
use crate::mint::fixture::registry::fixture_size;
use bytes::Bytes;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where data file content comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FixtureSource {
    /// Pseudo-random bytes seeded by the data file size.
    #[default]
    Generated,
    /// Files named after the data file inside this directory.
    External(PathBuf),
}

impl FixtureSource {
    pub fn from_data_dir(data_dir: Option<&Path>) -> Self {
        match data_dir {
            Some(dir) => FixtureSource::External(dir.to_path_buf()),
            None => FixtureSource::Generated,
        }
    }
}

/// Hands out data file readers and remembers their CRC32 (IEEE).
///
/// A generator is meant to live for the whole run and be shared; the cache
/// inside it is safe for concurrent use.
#[derive(Debug, Default)]
pub struct FixtureGenerator {
    source: FixtureSource,
    cache: ChecksumCache,
}

impl FixtureGenerator {
    pub fn new(source: FixtureSource) -> Self {
        Self {
            source,
            cache: ChecksumCache::new(),
        }
    }

    pub fn source(&self) -> &FixtureSource {
        &self.source
    }

    /// Opens data file `name`.
    ///
    /// The first open of a name reads the whole content once to record its
    /// CRC32; the returned reader is always positioned at the start.
    pub fn open(&self, name: &str) -> Result<FixtureReader> {
        let size = fixture_size(name)?;
        self.cache.get_or_try_insert_with(name, || {
            log::debug!("computing CRC32 of data file {name}");
            let reader = self.reader(name, size)?;
            crc32_of(reader).map_err(|source| Error::FixtureRead {
                name: name.to_string(),
                source,
            })
        })?;
        self.reader(name, size)
    }

    /// Opens data file `name` and reads it into memory.
    pub fn read_all(&self, name: &str) -> Result<Bytes> {
        let mut reader = self.open(name)?;
        let mut buf = Vec::with_capacity(reader.size() as usize);
        reader
            .read_to_end(&mut buf)
            .map_err(|source| Error::FixtureRead {
                name: name.to_string(),
                source,
            })?;
        Ok(Bytes::from(buf))
    }

    /// CRC32 recorded for `name`, if it has been opened before.
    pub fn cached_crc32(&self, name: &str) -> Option<u32> {
        self.cache.get(name)
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.contains(name)
    }

    /// Consumes `reader` and checks it against the CRC32 recorded for `name`.
    pub fn checksum_matches_fixture<R: Read>(&self, reader: R, name: &str) -> Result<()> {
        let expected = self
            .cache
            .get(name)
            .ok_or_else(|| Error::ChecksumNotCached(name.to_string()))?;
        checksum_matches(reader, expected)
    }

    /// Checks in-memory `data` against the CRC32 recorded for `name`.
    pub fn bytes_match_fixture(&self, data: &[u8], name: &str) -> Result<()> {
        self.checksum_matches_fixture(data, name)
    }

    fn reader(&self, name: &str, size: u64) -> Result<FixtureReader> {
        match &self.source {
            FixtureSource::Generated => Ok(FixtureReader::generated(name, size)),
            FixtureSource::External(dir) => {
                let path = dir.join(name);
                let map_err = |source| Error::FixtureRead {
                    name: name.to_string(),
                    source,
                };
                let file = File::open(&path).map_err(map_err)?;
                let len = file.metadata().map_err(map_err)?.len();
                Ok(FixtureReader::file(name, len, file))
            }
        }
    }
}

fn crc32_of<R: Read>(mut reader: R) -> io::Result<u32> {
    let mut crc = Crc32Ieee::new();
    let mut buf = vec![0; 32 * 1024];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(crc.finalize()),
            Ok(n) => crc.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Consumes `reader` and checks its CRC32 (IEEE) against `expected`.
pub fn checksum_matches<R: Read>(reader: R, expected: u32) -> Result<()> {
    let actual = crc32_of(reader)?;
    if actual != expected {
        return Err(Error::ChecksumMismatch { expected, actual });
    }
    Ok(())
}
