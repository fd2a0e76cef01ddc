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

//! # MinIO Mint (`minio-mint`)
//!
//! Building blocks of a functional test harness for MinIO and other Amazon
//! S3 compatible object storage servers.
//!
//! - [`mint::fixture`] hands out deterministic data files by name and
//!   remembers their CRC32, so downloads can be checked without keeping the
//!   uploaded bytes around.
//! - [`mint::multipart`] computes the checksum a server must report for an
//!   object uploaded in parts, in composite (`base64-N`) or full object form.
//! - [`mint::names`] generates bucket and object names.
//! - [`mint::scenarios`] and [`mint::runner`] drive any
//!   [`mint::storage::ObjectStorage`] and report each result as a JSON line.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use minio_mint::mint::fixture::FixtureGenerator;
//! use minio_mint::mint::checksum::{ChecksumAlgorithm, ChecksumType};
//! use minio_mint::mint::multipart::compute_multipart_digest;
//!
//! let fixtures = FixtureGenerator::default();
//! let data = fixtures.read_all("datafile-11-MB").unwrap();
//! let expected = compute_multipart_digest(
//!     &data,
//!     5 * 1024 * 1024,
//!     ChecksumAlgorithm::CRC32C,
//!     ChecksumType::Composite,
//! )
//! .unwrap();
//! assert!(expected.ends_with("-3"));
//! fixtures.bytes_match_fixture(&data, "datafile-11-MB").unwrap();
//! ```

#![allow(clippy::result_large_err)]
pub mod mint;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;
