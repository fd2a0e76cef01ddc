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

use minio_mint::mint::checksum::{ChecksumAlgorithm, ChecksumType, crc32_ieee};
use minio_mint::mint::error::Error;
use minio_mint::mint::fixture::registry::{KIB, MIB, fixtures_up_to};
use minio_mint::mint::fixture::{FixtureGenerator, checksum_matches, fixture_size};
use minio_mint::mint::multipart::compute_multipart_digest;
use std::io::Read;
use std::sync::Arc;

#[test]
fn open_twice_is_identical_and_cached() {
    let fixtures = FixtureGenerator::default();
    for name in fixtures_up_to(MIB) {
        assert!(!fixtures.is_cached(name));
        let first = fixtures.read_all(name).unwrap();
        let crc = fixtures.cached_crc32(name).unwrap();

        let second = fixtures.read_all(name).unwrap();
        assert_eq!(first, second, "{name}");
        assert_eq!(first.len() as u64, fixture_size(name).unwrap());
        assert_eq!(fixtures.cached_crc32(name), Some(crc));
        assert_eq!(crc32_ieee(&first), crc);
    }
}

#[test]
fn independent_generators_agree() {
    let a = FixtureGenerator::default().read_all("datafile-100-kB").unwrap();
    let b = FixtureGenerator::default().read_all("datafile-100-kB").unwrap();
    assert_eq!(a, b);
}

#[test]
fn small_reads_match_bulk_read() {
    let fixtures = FixtureGenerator::default();
    let bulk = fixtures.read_all("datafile-33-kB").unwrap();

    let mut reader = fixtures.open("datafile-33-kB").unwrap();
    let mut pieced = Vec::new();
    let mut buf = [0u8; 1000];
    loop {
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        pieced.extend_from_slice(&buf[..n]);
    }
    assert_eq!(bulk.as_ref(), pieced.as_slice());
}

#[test]
fn checksum_round_trip_and_corruption() {
    let fixtures = FixtureGenerator::default();
    for name in [
        "datafile-0-b",
        "datafile-1-b",
        "datafile-1-kB",
        "datafile-33-kB",
        "datafile-1-MB",
    ] {
        let data = fixtures.read_all(name).unwrap();
        checksum_matches(fixtures.open(name).unwrap(), crc32_ieee(&data)).unwrap();
        fixtures.checksum_matches_fixture(&data[..], name).unwrap();

        if data.is_empty() {
            continue;
        }
        let mut corrupt = data.to_vec();
        let mid = corrupt.len() / 2;
        corrupt[mid] ^= 0x01;
        assert!(matches!(
            fixtures.bytes_match_fixture(&corrupt, name),
            Err(Error::ChecksumMismatch { .. })
        ));
    }
}

#[test]
fn unknown_and_unopened_names() {
    let fixtures = FixtureGenerator::default();
    assert!(matches!(
        fixtures.open("datafile-7-MB"),
        Err(Error::FixtureNotFound(_))
    ));
    assert!(matches!(
        fixtures.bytes_match_fixture(b"", "datafile-0-b"),
        Err(Error::ChecksumNotCached(_))
    ));
}

#[test]
fn concurrent_first_opens() {
    let fixtures = Arc::new(FixtureGenerator::default());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let fixtures = fixtures.clone();
            std::thread::spawn(move || {
                fixtures.open("datafile-1.03-MB").unwrap();
                fixtures.cached_crc32("datafile-1.03-MB").unwrap()
            })
        })
        .collect();
    let crcs: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(crcs.windows(2).all(|w| w[0] == w[1]));
    let data = fixtures.read_all("datafile-1.03-MB").unwrap();
    assert_eq!(data.len() as u64, 1056 * KIB);
    assert_eq!(crc32_ieee(&data), crcs[0]);
}

#[test]
fn ten_kib_fixture_in_two_parts() {
    let fixtures = FixtureGenerator::default();
    let name = "datafile-10-kB";
    let data = fixtures.read_all(name).unwrap();
    assert_eq!(data.len(), 10 * 1024);
    fixtures.bytes_match_fixture(&data, name).unwrap();

    let digest = compute_multipart_digest(
        &data,
        5 * 1024,
        ChecksumAlgorithm::CRC32C,
        ChecksumType::Composite,
    )
    .unwrap();
    let (b64, count) = digest.rsplit_once('-').unwrap();
    assert_eq!(count, "2");
    assert!(b64.len() == 8 && b64.ends_with("=="), "{digest}");
}
