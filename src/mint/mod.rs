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

//! Functional test harness for S3 compatible object storage

pub mod checksum;
pub mod config;
pub mod error;
pub mod fixture;
pub mod multimap;
pub mod multipart;
pub mod names;
pub mod reporter;
pub mod runner;
pub mod scenarios;
pub mod sse;
pub mod storage;
pub mod types;
pub mod upload;
