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

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use minio_mint::mint::checksum::{ChecksumAlgorithm, ChecksumType};
use minio_mint::mint::fixture::FixtureGenerator;
use minio_mint::mint::multipart::compute_multipart_digest;
use std::hint::black_box;

const PART_SIZE: usize = 5 * 1024 * 1024;

fn bench_multipart_checksum(c: &mut Criterion) {
    let fixtures = FixtureGenerator::default();
    let data = fixtures.read_all("datafile-11-MB").unwrap();

    let mut group = c.benchmark_group("multipart_checksum_11MB");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for algorithm in ChecksumAlgorithm::ALL {
        group.bench_with_input(
            BenchmarkId::new("composite", algorithm),
            &algorithm,
            |b, &algorithm| {
                b.iter(|| {
                    compute_multipart_digest(
                        black_box(&data),
                        PART_SIZE,
                        algorithm,
                        ChecksumType::Composite,
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_fixture_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixture_generation");
    for name in ["datafile-1-MB", "datafile-11-MB"] {
        let fixtures = FixtureGenerator::default();
        let size = fixtures.open(name).unwrap().size();
        group.throughput(Throughput::Bytes(size));
        group.bench_function(name, |b| b.iter(|| fixtures.read_all(black_box(name)).unwrap()));
    }
    group.finish();
}

criterion_group!(benches, bench_multipart_checksum, bench_fixture_generation);
criterion_main!(benches);
