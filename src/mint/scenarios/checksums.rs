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

use super::{MIN_PART_SIZE, Outcome, ScenarioArgs, ScenarioContext, ScenarioFuture, record};
use crate::mint::checksum::{ChecksumAlgorithm, ChecksumType};
use crate::mint::error::{Error, Result};
use crate::mint::fixture::registry::MIB;
use crate::mint::multipart::compute_multipart_digest;
use crate::mint::names::rand_object_name;
use crate::mint::types::PutObjectContentArgs;
use crate::mint::upload::{MultipartUpload, ObjectVerifier, verify_object_checksum};
use futures_util::{FutureExt, StreamExt};

async fn upload_and_verify(
    ctx: &ScenarioContext,
    args: &mut ScenarioArgs,
    name: &str,
    part_size: usize,
    algorithm: ChecksumAlgorithm,
    checksum_type: ChecksumType,
) -> Result<()> {
    let object = rand_object_name();
    record(args, "objectName", object.as_str());
    record(args, "fileName", name);
    record(args, "partSize", part_size);
    record(args, "checksumAlgorithm", algorithm.as_str());
    record(args, "checksumType", checksum_type.as_str());

    let data = ctx.fixtures.read_all(name)?;
    let outcome = MultipartUpload::builder()
        .bucket(&ctx.bucket)
        .object(&object)
        .part_size(part_size)
        .checksum_algorithm(algorithm)
        .checksum_type(checksum_type)
        .build()
        .run(ctx.store.as_ref(), &data)
        .await?;

    let expected = outcome
        .expected_checksum
        .ok_or_else(|| Error::InvalidComposerInput("no checksum computed".into()))?;
    log::debug!("{object}: expecting {algorithm} {expected}");
    verify_object_checksum(&outcome.info, algorithm, &expected)?;

    let verifier = ObjectVerifier::new(ctx.store.as_ref(), &ctx.bucket, &object);
    verifier.checksum(algorithm, &expected).await?;
    verifier.fixture(&ctx.fixtures, name).await?;
    ctx.store.delete_object(&ctx.bucket, &object).await?;
    Ok(())
}

/// Multipart upload with a composite checksum for every algorithm.
pub fn multipart_composite_checksums<'a>(
    ctx: &'a ScenarioContext,
    args: &'a mut ScenarioArgs,
) -> ScenarioFuture<'a> {
    async move {
        record(args, "bucketName", ctx.bucket.as_str());
        for algorithm in ChecksumAlgorithm::ALL {
            upload_and_verify(
                ctx,
                args,
                "datafile-6-MB",
                MIN_PART_SIZE,
                algorithm,
                ChecksumType::Composite,
            )
            .await?;
        }
        Ok(Outcome::Pass)
    }
    .boxed()
}

/// Multipart upload with a full object checksum for the CRC family.
pub fn multipart_full_object_checksum<'a>(
    ctx: &'a ScenarioContext,
    args: &'a mut ScenarioArgs,
) -> ScenarioFuture<'a> {
    async move {
        record(args, "bucketName", ctx.bucket.as_str());
        for algorithm in ChecksumAlgorithm::ALL
            .into_iter()
            .filter(ChecksumAlgorithm::supports_full_object)
        {
            upload_and_verify(
                ctx,
                args,
                "datafile-11-MB",
                MIN_PART_SIZE,
                algorithm,
                ChecksumType::FullObject,
            )
            .await?;
        }
        Ok(Outcome::Pass)
    }
    .boxed()
}

/// Uploads a data file straight from its reader, leaving the part split to
/// the client.
pub fn streaming_upload<'a>(ctx: &'a ScenarioContext, args: &'a mut ScenarioArgs) -> ScenarioFuture<'a> {
    async move {
        let name = "datafile-11-MB";
        let object = rand_object_name();
        let algorithm = ChecksumAlgorithm::CRC32C;
        record(args, "bucketName", ctx.bucket.as_str());
        record(args, "objectName", object.as_str());
        record(args, "fileName", name);
        record(args, "partSize", MIN_PART_SIZE);
        record(args, "checksumAlgorithm", algorithm.as_str());

        let reader = ctx.fixtures.open(name)?;
        let size = reader.size();
        let info = ctx
            .store
            .put_object_content(
                PutObjectContentArgs::builder()
                    .bucket(&ctx.bucket)
                    .object(&object)
                    .part_size(MIN_PART_SIZE as u64)
                    .checksum_algorithm(algorithm)
                    .build(),
                reader.boxed(),
            )
            .await?;
        if info.size != size {
            return Err(Error::ContentMismatch(format!(
                "stored {} bytes, streamed {size}",
                info.size
            )));
        }

        let data = ctx.fixtures.read_all(name)?;
        let expected =
            compute_multipart_digest(&data, MIN_PART_SIZE, algorithm, ChecksumType::Composite)?;
        verify_object_checksum(&info, algorithm, &expected)?;
        ObjectVerifier::new(ctx.store.as_ref(), &ctx.bucket, &object)
            .fixture(&ctx.fixtures, name)
            .await?;
        Ok(Outcome::Pass)
    }
    .boxed()
}

/// Reads back every part of a multipart object with checksum mode.
pub fn part_checksum_reads<'a>(
    ctx: &'a ScenarioContext,
    args: &'a mut ScenarioArgs,
) -> ScenarioFuture<'a> {
    async move {
        let name = "datafile-11-MB";
        let object = rand_object_name();
        let algorithm = ChecksumAlgorithm::SHA256;
        record(args, "bucketName", ctx.bucket.as_str());
        record(args, "objectName", object.as_str());
        record(args, "fileName", name);
        record(args, "checksumAlgorithm", algorithm.as_str());

        let data = ctx.fixtures.read_all(name)?;
        let outcome = MultipartUpload::builder()
            .bucket(&ctx.bucket)
            .object(&object)
            .part_size(MIN_PART_SIZE)
            .checksum_algorithm(algorithm)
            .build()
            .run(ctx.store.as_ref(), &data)
            .await?;

        let verifier = ObjectVerifier::new(ctx.store.as_ref(), &ctx.bucket, &object);
        for part in &outcome.parts {
            record(args, "partNumber", part.part_number);
            verifier
                .part(&data, MIN_PART_SIZE, part.part_number, algorithm)
                .await?;
        }
        Ok(Outcome::Pass)
    }
    .boxed()
}

pub fn large_fixture_multipart<'a>(
    ctx: &'a ScenarioContext,
    args: &'a mut ScenarioArgs,
) -> ScenarioFuture<'a> {
    async move {
        record(args, "bucketName", ctx.bucket.as_str());
        upload_and_verify(
            ctx,
            args,
            "datafile-65-MB",
            16 * MIB as usize,
            ChecksumAlgorithm::CRC32C,
            ChecksumType::Composite,
        )
        .await?;
        Ok(Outcome::Pass)
    }
    .boxed()
}
