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
use mint_common::memory_store::MemoryStore;
use mint_common::test_context::TestContext;
use mint_common::utils::{chunked_stream, rand_object_name};
use minio_mint::mint::checksum::{ChecksumAlgorithm, ChecksumType, compute_checksum};
use minio_mint::mint::error::{Error, StorageError};
use minio_mint::mint::multipart::{MAX_PART_NUMBER, MultipartChecksum, compute_multipart_digest};
use minio_mint::mint::storage::ObjectStorage;
use minio_mint::mint::types::{ByteRange, PutObjectArgs, PutObjectContentArgs};
use minio_mint::mint::upload::{MultipartUpload, ObjectVerifier, verify_object_checksum};

const PART_SIZE: usize = 5 * 1024 * 1024;

#[mint_macros::test]
async fn composite_checksum_for_every_algorithm(ctx: TestContext, bucket_name: String) {
    let data = ctx.fixtures.read_all("datafile-11-MB").unwrap();
    for algorithm in ChecksumAlgorithm::ALL {
        let object_name = rand_object_name();
        let outcome = MultipartUpload::builder()
            .bucket(&bucket_name)
            .object(&object_name)
            .part_size(PART_SIZE)
            .checksum_algorithm(algorithm)
            .build()
            .run(ctx.store.as_ref(), &data)
            .await
            .unwrap();

        let expected = outcome.expected_checksum.unwrap();
        assert!(expected.ends_with("-3"), "{algorithm}: {expected}");
        verify_object_checksum(&outcome.info, algorithm, &expected).unwrap();
        assert_eq!(outcome.parts.len(), 3);
        assert_eq!(outcome.info.parts_count, Some(3));

        let verifier = ObjectVerifier::new(ctx.store.as_ref(), &bucket_name, &object_name);
        verifier.checksum(algorithm, &expected).await.unwrap();
        verifier
            .fixture(&ctx.fixtures, "datafile-11-MB")
            .await
            .unwrap();
    }
}

#[mint_macros::test]
async fn full_object_checksum_has_no_suffix(ctx: TestContext, bucket_name: String) {
    let data = ctx.fixtures.read_all("datafile-6-MB").unwrap();
    let object_name = rand_object_name();
    let outcome = MultipartUpload::builder()
        .bucket(&bucket_name)
        .object(&object_name)
        .part_size(PART_SIZE)
        .checksum_algorithm(ChecksumAlgorithm::CRC64NVME)
        .checksum_type(ChecksumType::FullObject)
        .build()
        .run(ctx.store.as_ref(), &data)
        .await
        .unwrap();

    let expected = compute_checksum(ChecksumAlgorithm::CRC64NVME, &data);
    assert_eq!(outcome.expected_checksum.as_deref(), Some(expected.as_str()));
    let checksum = outcome.info.checksum.unwrap();
    assert_eq!(checksum.value, expected);
    assert_eq!(checksum.checksum_type, ChecksumType::FullObject);
}

#[mint_macros::test]
async fn every_part_reports_its_checksum(ctx: TestContext, bucket_name: String) {
    let data = ctx.fixtures.read_all("datafile-11-MB").unwrap();
    let object_name = rand_object_name();
    let algorithm = ChecksumAlgorithm::CRC32;
    let outcome = MultipartUpload::builder()
        .bucket(&bucket_name)
        .object(&object_name)
        .part_size(PART_SIZE)
        .checksum_algorithm(algorithm)
        .build()
        .run(ctx.store.as_ref(), &data)
        .await
        .unwrap();

    let composed =
        MultipartChecksum::compute(&data, PART_SIZE, algorithm, ChecksumType::Composite).unwrap();
    let verifier = ObjectVerifier::new(ctx.store.as_ref(), &bucket_name, &object_name);
    for part in &outcome.parts {
        assert_eq!(
            part.checksum,
            composed.part_base64(part.part_number as usize)
        );
        verifier
            .part(&data, PART_SIZE, part.part_number, algorithm)
            .await
            .unwrap();
    }

    let size = data.len() as u64;
    for range in [
        ByteRange::new(0, 10),
        ByteRange::new(PART_SIZE as u64 - 5, 10),
        ByteRange::from_offset(size - 1),
    ] {
        verifier.range(&data, range).await.unwrap();
    }
}

#[mint_macros::test(no_bucket)]
async fn completion_rules(_ctx: TestContext) {
    let store = MemoryStore::new();
    store.make_bucket("tiny").await.unwrap();
    let data = Bytes::from(vec![7u8; 100]);

    // Undersized parts are accepted; completing the upload is refused and
    // the upload stays open.
    let result = MultipartUpload::builder()
        .bucket("tiny")
        .object("tiny-parts")
        .part_size(10)
        .build()
        .run(&store, &data)
        .await;
    assert!(matches!(
        result,
        Err(Error::Storage(StorageError::EntityTooSmall(1)))
    ));
    assert_eq!(store.pending_uploads().await, 1);

    let result = MultipartUpload::builder()
        .bucket("no-such-bucket")
        .object("o")
        .part_size(PART_SIZE)
        .build()
        .run(&store, &data)
        .await;
    assert!(matches!(
        result,
        Err(Error::Storage(StorageError::NoSuchBucket(_)))
    ));
}

#[mint_macros::test(no_bucket)]
async fn too_many_parts_are_refused_up_front(_ctx: TestContext) {
    let store = MemoryStore::new().with_min_part_size(0);
    store.make_bucket("many-parts").await.unwrap();
    let data = Bytes::from(vec![1u8; MAX_PART_NUMBER as usize + 1]);

    let result = MultipartUpload::builder()
        .bucket("many-parts")
        .object("o")
        .part_size(1)
        .build()
        .run(&store, &data)
        .await;
    assert!(matches!(result, Err(Error::InvalidComposerInput(_))));
    assert_eq!(store.pending_uploads().await, 0);

    let data = data.slice(1..);
    let outcome = MultipartUpload::builder()
        .bucket("many-parts")
        .object("o")
        .part_size(1)
        .build()
        .run(&store, &data)
        .await
        .unwrap();
    assert_eq!(outcome.parts.len(), MAX_PART_NUMBER as usize);
    assert_eq!(
        outcome.parts.last().map(|p| p.part_number),
        Some(MAX_PART_NUMBER)
    );
}

#[mint_macros::test]
async fn empty_range_is_an_error(ctx: TestContext, bucket_name: String) {
    let object_name = rand_object_name();
    ctx.store
        .put_object(
            PutObjectArgs::builder()
                .bucket(&bucket_name)
                .object(&object_name)
                .data(Bytes::from_static(b"abc"))
                .build(),
        )
        .await
        .unwrap();

    let verifier = ObjectVerifier::new(ctx.store.as_ref(), &bucket_name, &object_name);
    assert!(matches!(
        verifier.range(b"abc", ByteRange::new(0, 0)).await,
        Err(Error::InvalidComposerInput(m)) if m.contains("bytes=0-0/0")
    ));
    assert!(verifier.range(b"abc", ByteRange::new(3, 1)).await.is_err());
}

#[mint_macros::test]
async fn streaming_upload_splits_parts(ctx: TestContext, bucket_name: String) {
    let data = ctx.fixtures.read_all("datafile-11-MB").unwrap();
    let object_name = rand_object_name();
    let info = ctx
        .store
        .put_object_content(
            PutObjectContentArgs::builder()
                .bucket(&bucket_name)
                .object(&object_name)
                .part_size(PART_SIZE as u64)
                .checksum_algorithm(ChecksumAlgorithm::SHA1)
                .build(),
            chunked_stream(data.clone(), 64 * 1024),
        )
        .await
        .unwrap();

    assert_eq!(info.size, data.len() as u64);
    let expected =
        compute_multipart_digest(&data, PART_SIZE, ChecksumAlgorithm::SHA1, ChecksumType::Composite)
            .unwrap();
    verify_object_checksum(&info, ChecksumAlgorithm::SHA1, &expected).unwrap();
}

#[mint_macros::test]
async fn single_part_upload_equals_plain_digest(ctx: TestContext, bucket_name: String) {
    let data = ctx.fixtures.read_all("datafile-1-MB").unwrap();
    let object_name = rand_object_name();
    let outcome = MultipartUpload::builder()
        .bucket(&bucket_name)
        .object(&object_name)
        .part_size(PART_SIZE)
        .checksum_algorithm(ChecksumAlgorithm::CRC32C)
        .build()
        .run(ctx.store.as_ref(), &data)
        .await
        .unwrap();

    let plain = compute_checksum(ChecksumAlgorithm::CRC32C, &data);
    assert_eq!(outcome.expected_checksum.as_deref(), Some(plain.as_str()));
    verify_object_checksum(&outcome.info, ChecksumAlgorithm::CRC32C, &plain).unwrap();
}

#[mint_macros::test(bucket_name = "mint-fixed-bucket")]
async fn fixed_bucket_name(ctx: TestContext, bucket_name: String) {
    assert_eq!(bucket_name, "mint-fixed-bucket");
    assert!(ctx.store.list_objects(&bucket_name, None).await.unwrap().is_empty());
}
