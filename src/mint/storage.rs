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

//! The object storage client consumed by scenarios.
//!
//! The harness does not speak S3 itself. Anything able to perform these
//! operations against the server under test (an SDK client, or the
//! in-memory store of `mint-common`) implements [`ObjectStorage`].
//!
//! Checksums follow S3 semantics:
//!
//! - `checksum` of an [`ObjectInfo`](crate::mint::types::ObjectInfo) is only
//!   populated for whole-object reads with `checksum_mode` set, and for the
//!   results of put, copy, compose and complete.
//! - A read of one part (`part_number`) with `checksum_mode` reports the
//!   checksum of that part.

use crate::mint::error::StorageError;
use crate::mint::types::{
    ComposeObjectArgs, CopyObjectArgs, CreateMultipartUploadArgs, GetObjectArgs, ObjectInfo,
    PartInfo, PutObjectArgs, PutObjectContentArgs, UploadPartArgs,
};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use std::fmt::Debug;
use std::io;

pub type StorageResult<T> = Result<T, StorageError>;

/// Stream of object content chunks.
pub type ByteStream = BoxStream<'static, io::Result<Bytes>>;

#[async_trait]
pub trait ObjectStorage: Send + Sync + Debug {
    async fn make_bucket(&self, bucket: &str) -> StorageResult<()>;

    /// Removes `bucket`; it must be empty.
    async fn remove_bucket(&self, bucket: &str) -> StorageResult<()>;

    async fn list_objects(&self, bucket: &str, prefix: Option<&str>)
    -> StorageResult<Vec<ObjectInfo>>;

    async fn put_object(&self, args: PutObjectArgs) -> StorageResult<ObjectInfo>;

    /// Uploads `content`, as a multipart upload when it exceeds one part.
    async fn put_object_content(
        &self,
        args: PutObjectContentArgs,
        content: ByteStream,
    ) -> StorageResult<ObjectInfo>;

    async fn get_object(&self, args: GetObjectArgs) -> StorageResult<(Bytes, ObjectInfo)>;

    async fn stat_object(&self, args: GetObjectArgs) -> StorageResult<ObjectInfo>;

    async fn delete_object(&self, bucket: &str, object: &str) -> StorageResult<()>;

    /// Returns the upload id.
    async fn create_multipart_upload(
        &self,
        args: CreateMultipartUploadArgs,
    ) -> StorageResult<String>;

    async fn upload_part(&self, args: UploadPartArgs) -> StorageResult<PartInfo>;

    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &str,
        parts: Vec<PartInfo>,
    ) -> StorageResult<ObjectInfo>;

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &str,
    ) -> StorageResult<()>;

    async fn copy_object(&self, args: CopyObjectArgs) -> StorageResult<ObjectInfo>;

    async fn compose_object(&self, args: ComposeObjectArgs) -> StorageResult<ObjectInfo>;

    /// Deletes every object in `bucket`, then the bucket.
    async fn delete_and_purge_bucket(&self, bucket: &str) -> StorageResult<()> {
        for info in self.list_objects(bucket, None).await? {
            self.delete_object(bucket, &info.object).await?;
        }
        self.remove_bucket(bucket).await
    }
}
