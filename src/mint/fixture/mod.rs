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

//! Deterministic test data.
//!
//! Data files are identified by name (see [`registry::DATA_FILES`]) and are
//! either generated from a seed equal to their size or read from an external
//! directory. Reading the same name twice yields identical bytes.

pub mod cache;
pub mod generator;
pub mod reader;
pub mod registry;

pub use cache::ChecksumCache;
pub use generator::{FixtureGenerator, FixtureSource, checksum_matches};
pub use reader::FixtureReader;
pub use registry::{DATA_FILES, fixture_size};
