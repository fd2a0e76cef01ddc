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

//! Checksum algorithms used by the harness.
//!
//! Two CRC32 variants live here and are never interchangeable:
//!
//! - [`crc32_ieee`] (IEEE polynomial) guards fixture integrity.
//! - [`crc32c`] (Castagnoli polynomial) is what S3 reports in
//!   `x-amz-checksum-crc32c`.
//!
//! [`ChecksumAlgorithm::CRC32`] is the S3 header flavour of the IEEE CRC and
//! is computed through [`ChecksumHasher`], not through the fixture helper.

use crate::mint::error::Error;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use crc_fast::{CrcAlgorithm, Digest as CrcFastDigest};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Encodes data using base64 algorithm
pub fn b64_encode<T: AsRef<[u8]>>(input: T) -> String {
    BASE64.encode(input)
}

/// Decodes base64 data, returning `None` on malformed input.
pub fn b64_decode<T: AsRef<[u8]>>(input: T) -> Option<Vec<u8>> {
    BASE64.decode(input).ok()
}

/// Gets base64 encoded MD5 hash of given data
pub fn md5sum_hash(data: &[u8]) -> String {
    b64_encode(md5::compute(data).as_slice())
}

/// Computes the IEEE CRC32 used for fixture integrity checks.
pub fn crc32_ieee(data: &[u8]) -> u32 {
    let mut digest = CrcFastDigest::new(CrcAlgorithm::Crc32IsoHdlc);
    digest.update(data);
    digest.finalize() as u32
}

/// Computes the Castagnoli CRC32 reported by S3 as `CRC32C`.
pub fn crc32c(data: &[u8]) -> u32 {
    let mut digest = CrcFastDigest::new(CrcAlgorithm::Crc32Iscsi);
    digest.update(data);
    digest.finalize() as u32
}

/// Incremental IEEE CRC32 over a byte stream.
pub struct Crc32Ieee(CrcFastDigest);

impl Crc32Ieee {
    pub fn new() -> Self {
        Self(CrcFastDigest::new(CrcAlgorithm::Crc32IsoHdlc))
    }

    pub fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    pub fn finalize(self) -> u32 {
        self.0.finalize() as u32
    }
}

impl Default for Crc32Ieee {
    fn default() -> Self {
        Self::new()
    }
}

/// Checksum algorithms supported by S3 `x-amz-checksum-*` headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    CRC32,
    CRC32C,
    CRC64NVME,
    SHA1,
    SHA256,
}

impl ChecksumAlgorithm {
    pub const ALL: [ChecksumAlgorithm; 5] = [
        ChecksumAlgorithm::CRC32,
        ChecksumAlgorithm::CRC32C,
        ChecksumAlgorithm::CRC64NVME,
        ChecksumAlgorithm::SHA1,
        ChecksumAlgorithm::SHA256,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::CRC32 => "CRC32",
            ChecksumAlgorithm::CRC32C => "CRC32C",
            ChecksumAlgorithm::CRC64NVME => "CRC64NVME",
            ChecksumAlgorithm::SHA1 => "SHA1",
            ChecksumAlgorithm::SHA256 => "SHA256",
        }
    }

    /// Response/request header carrying the checksum value.
    pub fn header_name(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::CRC32 => "x-amz-checksum-crc32",
            ChecksumAlgorithm::CRC32C => "x-amz-checksum-crc32c",
            ChecksumAlgorithm::CRC64NVME => "x-amz-checksum-crc64nvme",
            ChecksumAlgorithm::SHA1 => "x-amz-checksum-sha1",
            ChecksumAlgorithm::SHA256 => "x-amz-checksum-sha256",
        }
    }

    /// Raw digest length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            ChecksumAlgorithm::CRC32 | ChecksumAlgorithm::CRC32C => 4,
            ChecksumAlgorithm::CRC64NVME => 8,
            ChecksumAlgorithm::SHA1 => 20,
            ChecksumAlgorithm::SHA256 => 32,
        }
    }

    /// Whether S3 accepts a full-object checksum for multipart uploads with this algorithm.
    pub fn supports_full_object(&self) -> bool {
        matches!(
            self,
            ChecksumAlgorithm::CRC32 | ChecksumAlgorithm::CRC32C | ChecksumAlgorithm::CRC64NVME
        )
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CRC32" => Ok(ChecksumAlgorithm::CRC32),
            "CRC32C" => Ok(ChecksumAlgorithm::CRC32C),
            "CRC64NVME" => Ok(ChecksumAlgorithm::CRC64NVME),
            "SHA1" => Ok(ChecksumAlgorithm::SHA1),
            "SHA256" => Ok(ChecksumAlgorithm::SHA256),
            _ => Err(Error::InvalidComposerInput(format!(
                "unknown checksum algorithm '{s}'"
            ))),
        }
    }
}

/// How a multipart object's checksum is composed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChecksumType {
    /// Hash of the concatenated per-part digests, suffixed with the part count.
    #[default]
    Composite,
    /// Single hash over the whole object, regardless of part boundaries.
    FullObject,
}

impl ChecksumType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumType::Composite => "COMPOSITE",
            ChecksumType::FullObject => "FULL_OBJECT",
        }
    }
}

impl fmt::Display for ChecksumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incremental checksum hasher.
///
/// Hashers are cheap to build and must not be shared between concurrent
/// computations; create one per part.
pub enum ChecksumHasher {
    Crc32(CrcFastDigest),
    Crc32c(CrcFastDigest),
    Crc64nvme(CrcFastDigest),
    Sha1(Sha1),
    Sha256(Sha256),
}

impl ChecksumHasher {
    pub fn new(algorithm: ChecksumAlgorithm) -> Self {
        match algorithm {
            ChecksumAlgorithm::CRC32 => {
                ChecksumHasher::Crc32(CrcFastDigest::new(CrcAlgorithm::Crc32IsoHdlc))
            }
            ChecksumAlgorithm::CRC32C => {
                ChecksumHasher::Crc32c(CrcFastDigest::new(CrcAlgorithm::Crc32Iscsi))
            }
            ChecksumAlgorithm::CRC64NVME => {
                ChecksumHasher::Crc64nvme(CrcFastDigest::new(CrcAlgorithm::Crc64Nvme))
            }
            ChecksumAlgorithm::SHA1 => ChecksumHasher::Sha1(Sha1::new()),
            ChecksumAlgorithm::SHA256 => ChecksumHasher::Sha256(Sha256::new()),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            ChecksumHasher::Crc32(d) => d.update(data),
            ChecksumHasher::Crc32c(d) => d.update(data),
            ChecksumHasher::Crc64nvme(d) => d.update(data),
            ChecksumHasher::Sha1(h) => h.update(data),
            ChecksumHasher::Sha256(h) => h.update(data),
        }
    }

    /// Returns the raw digest bytes; CRCs are big-endian as S3 encodes them.
    pub fn finalize_raw(self) -> Vec<u8> {
        match self {
            // crc-fast returns u64; CRC32 variants need cast to u32
            ChecksumHasher::Crc32(d) => (d.finalize() as u32).to_be_bytes().to_vec(),
            ChecksumHasher::Crc32c(d) => (d.finalize() as u32).to_be_bytes().to_vec(),
            ChecksumHasher::Crc64nvme(d) => d.finalize().to_be_bytes().to_vec(),
            ChecksumHasher::Sha1(h) => h.finalize().to_vec(),
            ChecksumHasher::Sha256(h) => h.finalize().to_vec(),
        }
    }

    /// Returns the base64 encoded digest.
    pub fn finalize(self) -> String {
        b64_encode(self.finalize_raw())
    }
}

/// Computes the raw digest of `data`.
pub fn compute_digest(algorithm: ChecksumAlgorithm, data: &[u8]) -> Vec<u8> {
    let mut hasher = ChecksumHasher::new(algorithm);
    hasher.update(data);
    hasher.finalize_raw()
}

/// Computes the base64 encoded checksum of `data`, as sent in `x-amz-checksum-*` headers.
pub fn compute_checksum(algorithm: ChecksumAlgorithm, data: &[u8]) -> String {
    b64_encode(compute_digest(algorithm, data))
}
