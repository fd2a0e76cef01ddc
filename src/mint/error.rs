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

//! Error definitions for the harness core and the storage contract

use crate::mint::checksum::ChecksumAlgorithm;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by an [`ObjectStorage`](crate::mint::storage::ObjectStorage) implementation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("the specified bucket does not exist: {0}")]
    NoSuchBucket(String),

    #[error("the specified key does not exist: {0}")]
    NoSuchKey(String),

    #[error("the specified multipart upload does not exist: {0}")]
    NoSuchUpload(String),

    #[error("one or more of the specified parts could not be found: part {0}")]
    InvalidPart(u16),

    #[error("the list of parts was not in ascending order")]
    InvalidPartOrder,

    #[error("part {0} is smaller than the minimum allowed size")]
    EntityTooSmall(u16),

    /// Content did not match the checksum sent with it.
    #[error("bad digest: {0}")]
    BadDigest(String),

    #[error("the requested range is not satisfiable")]
    InvalidRange,

    #[error("bucket already exists: {0}")]
    BucketAlreadyExists(String),

    #[error("bucket is not empty: {0}")]
    BucketNotEmpty(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The server under test does not implement the requested functionality.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Error definitions
#[derive(Debug, Error)]
pub enum Error {
    /// Requested fixture is not part of the static registry. This is a caller bug.
    #[error("unknown data file {0}")]
    FixtureNotFound(String),

    #[error("unable to read data file {name}: {source}")]
    FixtureRead {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("CRC32 mismatch; expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Verification against a fixture name that has never been opened.
    #[error("no CRC32 recorded for data file {0}")]
    ChecksumNotCached(String),

    #[error("invalid composer input: {0}")]
    InvalidComposerInput(String),

    #[error("{algorithm} checksum mismatch; expected {expected}, got {actual}")]
    DigestMismatch {
        algorithm: ChecksumAlgorithm,
        expected: String,
        actual: String,
    },

    #[error("content mismatch: {0}")]
    ContentMismatch(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Returns the storage error carried by this error, if any.
    pub fn storage_error(&self) -> Option<&StorageError> {
        match self {
            Error::Storage(e) => Some(e),
            _ => None,
        }
    }
}
