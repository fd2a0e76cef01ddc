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

use super::objects::expect_sse;
use super::{Outcome, ScenarioArgs, ScenarioContext, ScenarioFuture, record};
use crate::mint::error::{Error, Result, StorageError};
use crate::mint::fixture::registry::KIB;
use crate::mint::names::rand_object_name;
use crate::mint::sse::{Sse, SseCustomerKey, SseKind};
use crate::mint::storage::StorageResult;
use crate::mint::types::{
    ByteRange, ComposeObjectArgs, CopyObjectArgs, CopySource, GetObjectArgs, PutObjectArgs,
};
use crate::mint::upload::ObjectVerifier;
use bytes::{Bytes, BytesMut};
use futures_util::FutureExt;
use std::sync::Arc;

const KEY_A: &str = "32byteslongsecretkeymustbegiven1";
const KEY_B: &str = "32byteslongsecretkeymustbegiven2";
const KEY_C: &str = "32byteslongsecretkeymustbegiven3";

const TLS_REQUIRED: &str = "SSE-C requires HTTPS";

fn customer_key(key: &str) -> (Arc<dyn Sse>, SseKind) {
    let key = SseCustomerKey::new(key);
    let kind = SseKind::Customer {
        key_md5: key.key_md5().to_string(),
    };
    (Arc::new(key), kind)
}

async fn put_encrypted(
    ctx: &ScenarioContext,
    object: &str,
    data: Bytes,
    sse: &Arc<dyn Sse>,
) -> Result<()> {
    ctx.store
        .put_object(
            PutObjectArgs::builder()
                .bucket(&ctx.bucket)
                .object(object)
                .data(data)
                .sse(Some(sse.clone()))
                .build(),
        )
        .await?;
    Ok(())
}

/// Fails unless `result` was refused for a wrong or missing key.
fn expect_access_denied<T>(result: StorageResult<T>, what: &str) -> Result<()> {
    match result {
        Err(StorageError::AccessDenied(_)) => Ok(()),
        Err(e) => Err(e.into()),
        Ok(_) => Err(Error::ContentMismatch(format!(
            "{what} succeeded with the wrong key"
        ))),
    }
}

async fn stat_with(
    ctx: &ScenarioContext,
    object: &str,
    sse: Option<Arc<dyn Sse>>,
) -> StorageResult<SseKind> {
    ctx.store
        .stat_object(
            GetObjectArgs::builder()
                .bucket(&ctx.bucket)
                .object(object)
                .sse(sse)
                .build(),
        )
        .await
        .map(|info| info.sse)
}

/// Copies an SSE-C object to a new key, then re-encrypts it in place.
pub fn sse_c_copy_key_rotation<'a>(
    ctx: &'a ScenarioContext,
    args: &'a mut ScenarioArgs,
) -> ScenarioFuture<'a> {
    async move {
        if !ctx.config.secure {
            return Ok(Outcome::NotApplicable(TLS_REQUIRED.into()));
        }
        let name = "datafile-1-MB";
        let src = rand_object_name();
        let dst = rand_object_name();
        record(args, "bucketName", ctx.bucket.as_str());
        record(args, "objectName", src.as_str());
        record(args, "destObjectName", dst.as_str());
        record(args, "fileName", name);

        let (key_a, kind_a) = customer_key(KEY_A);
        let (key_b, kind_b) = customer_key(KEY_B);
        let data = ctx.fixtures.read_all(name)?;
        put_encrypted(ctx, &src, data.clone(), &key_a).await?;

        let info = ctx
            .store
            .copy_object(
                CopyObjectArgs::builder()
                    .bucket(&ctx.bucket)
                    .object(&dst)
                    .source(
                        CopySource::builder()
                            .bucket(&ctx.bucket)
                            .object(&src)
                            .sse(Some(key_a.clone()))
                            .build(),
                    )
                    .sse(Some(key_b.clone()))
                    .build(),
            )
            .await?;
        expect_sse(&info.sse, &kind_b)?;
        ObjectVerifier::new(ctx.store.as_ref(), &ctx.bucket, &dst)
            .with_sse(Some(key_b.clone()))
            .content(&data)
            .await?;
        expect_access_denied(stat_with(ctx, &dst, Some(key_a.clone())).await, "read with old key")?;
        expect_access_denied(stat_with(ctx, &dst, None).await, "read without key")?;

        // Source is untouched by the copy.
        expect_sse(&stat_with(ctx, &src, Some(key_a.clone())).await?, &kind_a)?;

        // In-place rotation.
        ctx.store
            .copy_object(
                CopyObjectArgs::builder()
                    .bucket(&ctx.bucket)
                    .object(&src)
                    .source(
                        CopySource::builder()
                            .bucket(&ctx.bucket)
                            .object(&src)
                            .sse(Some(key_a.clone()))
                            .build(),
                    )
                    .sse(Some(key_b.clone()))
                    .build(),
            )
            .await?;
        expect_access_denied(stat_with(ctx, &src, Some(key_a)).await, "read with rotated key")?;
        ObjectVerifier::new(ctx.store.as_ref(), &ctx.bucket, &src)
            .with_sse(Some(key_b))
            .fixture(&ctx.fixtures, name)
            .await?;
        Ok(Outcome::Pass)
    }
    .boxed()
}

/// Composes sources encrypted with different keys into an object under a third key.
pub fn sse_c_compose_key_rotation<'a>(
    ctx: &'a ScenarioContext,
    args: &'a mut ScenarioArgs,
) -> ScenarioFuture<'a> {
    async move {
        if !ctx.config.secure {
            return Ok(Outcome::NotApplicable(TLS_REQUIRED.into()));
        }
        let first = rand_object_name();
        let second = rand_object_name();
        let dst = rand_object_name();
        record(args, "bucketName", ctx.bucket.as_str());
        record(args, "sourceObjectNames", vec![first.clone(), second.clone()]);
        record(args, "destObjectName", dst.as_str());

        let (key_a, _) = customer_key(KEY_A);
        let (key_b, _) = customer_key(KEY_B);
        let (key_c, kind_c) = customer_key(KEY_C);

        let first_data = ctx.fixtures.read_all("datafile-5-MB")?;
        let second_data = ctx.fixtures.read_all("datafile-1-MB")?;
        put_encrypted(ctx, &first, first_data.clone(), &key_a).await?;
        put_encrypted(ctx, &second, second_data.clone(), &key_b).await?;

        let second_range = ByteRange::new(0, 512 * KIB);
        record(args, "range", second_range.to_string());
        let info = ctx
            .store
            .compose_object(
                ComposeObjectArgs::builder()
                    .bucket(&ctx.bucket)
                    .object(&dst)
                    .sources(vec![
                        CopySource::builder()
                            .bucket(&ctx.bucket)
                            .object(&first)
                            .sse(Some(key_a.clone()))
                            .build(),
                        CopySource::builder()
                            .bucket(&ctx.bucket)
                            .object(&second)
                            .range(second_range)
                            .sse(Some(key_b.clone()))
                            .build(),
                    ])
                    .sse(Some(key_c.clone()))
                    .build(),
            )
            .await?;
        expect_sse(&info.sse, &kind_c)?;

        let mut expected = BytesMut::with_capacity(first_data.len() + 512 * KIB as usize);
        expected.extend_from_slice(&first_data);
        expected.extend_from_slice(&second_data[..512 * KIB as usize]);
        ObjectVerifier::new(ctx.store.as_ref(), &ctx.bucket, &dst)
            .with_sse(Some(key_c))
            .content(&expected)
            .await?;
        expect_access_denied(stat_with(ctx, &dst, Some(key_a)).await, "read with source key")?;
        expect_access_denied(stat_with(ctx, &dst, None).await, "read without key")?;
        Ok(Outcome::Pass)
    }
    .boxed()
}
