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

use super::{Outcome, ScenarioArgs, ScenarioContext, ScenarioFuture, record};
use crate::mint::error::{Error, Result};
use crate::mint::fixture::registry::{MIB, fixtures_up_to};
use crate::mint::names::rand_object_name;
use crate::mint::sse::{Sse, SseKind, SseKms};
use crate::mint::types::{ByteRange, PutObjectArgs};
use crate::mint::upload::ObjectVerifier;
use futures_util::FutureExt;
use std::sync::Arc;

/// Uploads every data file up to 1 MiB and checks the download against the
/// recorded CRC32 of the data file.
pub fn put_get_fixture<'a>(ctx: &'a ScenarioContext, args: &'a mut ScenarioArgs) -> ScenarioFuture<'a> {
    async move {
        record(args, "bucketName", ctx.bucket.as_str());
        for name in fixtures_up_to(MIB) {
            let object = rand_object_name();
            record(args, "objectName", object.as_str());
            record(args, "fileName", name);

            let data = ctx.fixtures.read_all(name)?;
            let info = ctx
                .store
                .put_object(
                    PutObjectArgs::builder()
                        .bucket(&ctx.bucket)
                        .object(&object)
                        .data(data.clone())
                        .build(),
                )
                .await?;
            if info.size != data.len() as u64 {
                return Err(Error::ContentMismatch(format!(
                    "{name}: stored {} bytes, uploaded {}",
                    info.size,
                    data.len()
                )));
            }

            ObjectVerifier::new(ctx.store.as_ref(), &ctx.bucket, &object)
                .fixture(&ctx.fixtures, name)
                .await?;
            ctx.store.delete_object(&ctx.bucket, &object).await?;
        }
        Ok(Outcome::Pass)
    }
    .boxed()
}

pub fn range_reads<'a>(ctx: &'a ScenarioContext, args: &'a mut ScenarioArgs) -> ScenarioFuture<'a> {
    async move {
        let name = "datafile-33-kB";
        let object = rand_object_name();
        record(args, "bucketName", ctx.bucket.as_str());
        record(args, "objectName", object.as_str());
        record(args, "fileName", name);

        let data = ctx.fixtures.read_all(name)?;
        ctx.store
            .put_object(
                PutObjectArgs::builder()
                    .bucket(&ctx.bucket)
                    .object(&object)
                    .data(data.clone())
                    .build(),
            )
            .await?;

        let size = data.len() as u64;
        let verifier = ObjectVerifier::new(ctx.store.as_ref(), &ctx.bucket, &object);
        for range in [
            ByteRange::new(0, 1),
            ByteRange::new(1000, 5000),
            ByteRange::new(size - 1, 1),
            ByteRange::new(size - 100, 1000),
            ByteRange::from_offset(30 * 1024),
        ] {
            record(args, "range", range.to_string());
            verifier.range(&data, range).await?;
        }
        args.remove("range");
        Ok(Outcome::Pass)
    }
    .boxed()
}

/// Put and get with SSE-KMS; not applicable unless KMS is enabled.
pub fn kms_put_get<'a>(ctx: &'a ScenarioContext, args: &'a mut ScenarioArgs) -> ScenarioFuture<'a> {
    async move {
        if !ctx.config.enable_kms {
            return Ok(Outcome::NotApplicable("KMS is not enabled".into()));
        }
        let name = "datafile-1-MB";
        let object = rand_object_name();
        let key_id = "my-minio-key";
        record(args, "bucketName", ctx.bucket.as_str());
        record(args, "objectName", object.as_str());
        record(args, "fileName", name);
        record(args, "keyId", key_id);

        let sse: Arc<dyn Sse> = Arc::new(SseKms::new(key_id, None));
        let data = ctx.fixtures.read_all(name)?;
        let info = ctx
            .store
            .put_object(
                PutObjectArgs::builder()
                    .bucket(&ctx.bucket)
                    .object(&object)
                    .data(data.clone())
                    .sse(Some(sse))
                    .build(),
            )
            .await?;
        expect_sse(
            &info.sse,
            &SseKind::Kms {
                key_id: key_id.into(),
            },
        )?;

        let info = ObjectVerifier::new(ctx.store.as_ref(), &ctx.bucket, &object)
            .content(&data)
            .await?;
        expect_sse(
            &info.sse,
            &SseKind::Kms {
                key_id: key_id.into(),
            },
        )?;
        Ok(Outcome::Pass)
    }
    .boxed()
}

pub(super) fn expect_sse(actual: &SseKind, expected: &SseKind) -> Result<()> {
    if actual != expected {
        return Err(Error::ContentMismatch(format!(
            "expected encryption {expected:?}, server reported {actual:?}"
        )));
    }
    Ok(())
}
