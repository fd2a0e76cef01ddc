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

use bytes::Bytes;
use futures_util::StreamExt;
use minio_mint::mint::storage::ByteStream;
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub use minio_mint::mint::names::{rand_bucket_name, rand_object_name};
use minio_mint::mint::names::{NAME_LENGTH, rand_name};

/// Name generator seeded from `seed`, for tests that need repeatable names.
pub fn seeded_names(seed: u64, count: usize, prefix: &str) -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| rand_name(NAME_LENGTH, &mut rng, prefix))
        .collect()
}

/// Splits `data` into a stream of `chunk_size` pieces.
pub fn chunked_stream(data: Bytes, chunk_size: usize) -> ByteStream {
    let chunks: Vec<std::io::Result<Bytes>> = (0..data.len())
        .step_by(chunk_size.max(1))
        .map(|start| Ok(data.slice(start..(start + chunk_size).min(data.len()))))
        .collect();
    futures_util::stream::iter(chunks).boxed()
}
