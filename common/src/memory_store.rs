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

//! In-memory [`ObjectStorage`] with S3 checksum, multipart and SSE semantics.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use minio_mint::mint::checksum::{
    ChecksumAlgorithm, ChecksumHasher, ChecksumType, b64_decode, b64_encode, compute_checksum,
};
use minio_mint::mint::error::StorageError;
use minio_mint::mint::multipart::MAX_PART_NUMBER;
use minio_mint::mint::sse::SseKind;
use minio_mint::mint::storage::{ByteStream, ObjectStorage, StorageResult};
use minio_mint::mint::types::{
    ComposeObjectArgs, CopyObjectArgs, CopySource, CreateMultipartUploadArgs, GetObjectArgs,
    ObjectChecksum, ObjectInfo, PartInfo, PutObjectArgs, PutObjectContentArgs, UploadPartArgs,
    UtcTime,
};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// Minimum size of every part but the last, as enforced by S3.
pub const MIN_PART_SIZE: u64 = 5 * 1024 * 1024;


#[derive(Clone, Debug)]
struct StoredPart {
    size: u64,
    checksum: Option<String>,
}

#[derive(Clone, Debug)]
struct StoredObject {
    data: Bytes,
    etag: String,
    last_modified: UtcTime,
    checksum: Option<ObjectChecksum>,
    /// Empty for objects not created by a multipart upload.
    parts: Vec<StoredPart>,
    sse: SseKind,
    user_metadata: HashMap<String, String>,
}

impl StoredObject {
    fn info(&self, bucket: &str, object: &str) -> ObjectInfo {
        ObjectInfo {
            bucket: bucket.to_string(),
            object: object.to_string(),
            size: self.data.len() as u64,
            etag: self.etag.clone(),
            last_modified: self.last_modified,
            checksum: None,
            parts_count: (!self.parts.is_empty()).then_some(self.parts.len() as u16),
            sse: self.sse.clone(),
            user_metadata: self.user_metadata.clone(),
        }
    }
}

#[derive(Debug)]
struct Upload {
    bucket: String,
    object: String,
    checksum_algorithm: Option<ChecksumAlgorithm>,
    checksum_type: ChecksumType,
    sse: SseKind,
    parts: BTreeMap<u16, (Bytes, PartInfo)>,
}

/// Object store kept entirely in memory.
///
/// Buckets, objects and in-progress multipart uploads live behind async
/// read/write locks; the store can be shared between tasks through an `Arc`.
#[derive(Debug)]
pub struct MemoryStore {
    buckets: RwLock<HashMap<String, BTreeMap<String, StoredObject>>>,
    uploads: RwLock<HashMap<String, Upload>>,
    kms_enabled: bool,
    min_part_size: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
            uploads: RwLock::new(HashMap::new()),
            kms_enabled: false,
            min_part_size: MIN_PART_SIZE,
        }
    }

    /// Accept SSE-KMS requests; without it they fail as not implemented.
    pub fn with_kms(mut self, enabled: bool) -> Self {
        self.kms_enabled = enabled;
        self
    }

    pub fn with_min_part_size(mut self, size: u64) -> Self {
        self.min_part_size = size;
        self
    }

    /// Number of multipart uploads neither completed nor aborted.
    pub async fn pending_uploads(&self) -> usize {
        self.uploads.read().await.len()
    }

    fn check_sse(&self, kind: &SseKind) -> StorageResult<()> {
        match kind {
            SseKind::Kms { .. } if !self.kms_enabled => {
                Err(StorageError::NotImplemented("SSE-KMS".into()))
            }
            _ => Ok(()),
        }
    }

    async fn insert(&self, bucket: &str, object: &str, stored: StoredObject) -> StorageResult<()> {
        let mut buckets = self.buckets.write().await;
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| StorageError::NoSuchBucket(bucket.to_string()))?;
        objects.insert(object.to_string(), stored);
        Ok(())
    }

    async fn lookup(&self, bucket: &str, object: &str) -> StorageResult<StoredObject> {
        let buckets = self.buckets.read().await;
        buckets
            .get(bucket)
            .ok_or_else(|| StorageError::NoSuchBucket(bucket.to_string()))?
            .get(object)
            .cloned()
            .ok_or_else(|| StorageError::NoSuchKey(format!("{bucket}/{object}")))
    }

    /// Returns the bytes of `source`, presenting its copy-source key.
    async fn read_source(&self, source: &CopySource) -> StorageResult<(Bytes, StoredObject)> {
        let stored = self.lookup(&source.bucket, &source.object).await?;
        check_customer_key(&stored.sse, &SseKind::of_copy_source(source.sse.as_deref()))?;
        let data = match source.range {
            Some(range) => {
                let r = range
                    .resolve(stored.data.len() as u64)
                    .ok_or(StorageError::InvalidRange)?;
                stored.data.slice(r)
            }
            None => stored.data.clone(),
        };
        Ok((data, stored))
    }

    async fn read(&self, args: &GetObjectArgs) -> StorageResult<(Bytes, ObjectInfo)> {
        let stored = self.lookup(&args.bucket, &args.object).await?;
        check_customer_key(&stored.sse, &SseKind::of(args.sse.as_deref()))?;
        let mut info = stored.info(&args.bucket, &args.object);

        match (args.part_number, args.range) {
            (Some(_), Some(_)) => Err(StorageError::InvalidRange),
            (Some(n), None) => {
                let (range, checksum) = part_window(&stored, n)?;
                if args.checksum_mode {
                    info.checksum = match (&stored.checksum, checksum) {
                        (Some(c), Some(value)) => Some(ObjectChecksum {
                            algorithm: c.algorithm,
                            value,
                            checksum_type: c.checksum_type,
                        }),
                        _ => None,
                    };
                }
                Ok((stored.data.slice(range), info))
            }
            (None, Some(range)) => {
                let r = range
                    .resolve(stored.data.len() as u64)
                    .ok_or(StorageError::InvalidRange)?;
                Ok((stored.data.slice(r), info))
            }
            (None, None) => {
                if args.checksum_mode {
                    info.checksum = stored.checksum.clone();
                }
                Ok((stored.data.clone(), info))
            }
        }
    }
}

/// Refuses access unless the presented key matches the object's customer key.
fn check_customer_key(stored: &SseKind, presented: &SseKind) -> StorageResult<()> {
    match (stored, presented) {
        (SseKind::Customer { key_md5 }, SseKind::Customer { key_md5: given }) if key_md5 == given => {
            Ok(())
        }
        (SseKind::Customer { .. }, SseKind::Customer { .. }) => Err(StorageError::AccessDenied(
            "the provided customer key does not match the object's key".into(),
        )),
        (SseKind::Customer { .. }, _) => Err(StorageError::AccessDenied(
            "the object was stored with a customer key".into(),
        )),
        (_, SseKind::Customer { .. }) => Err(StorageError::AccessDenied(
            "the object was not stored with a customer key".into(),
        )),
        _ => Ok(()),
    }
}

/// Byte window and checksum of 1-based part `n`.
fn part_window(
    stored: &StoredObject,
    n: u16,
) -> StorageResult<(std::ops::Range<usize>, Option<String>)> {
    if stored.parts.is_empty() {
        // A single-part object answers for part 1.
        return match n {
            1 => Ok((
                0..stored.data.len(),
                stored.checksum.as_ref().map(|c| c.value.clone()),
            )),
            _ => Err(StorageError::InvalidPart(n)),
        };
    }
    let index = usize::from(n)
        .checked_sub(1)
        .filter(|i| *i < stored.parts.len())
        .ok_or(StorageError::InvalidPart(n))?;
    let start: u64 = stored.parts[..index].iter().map(|p| p.size).sum();
    let end = start + stored.parts[index].size;
    Ok((
        start as usize..end as usize,
        stored.parts[index].checksum.clone(),
    ))
}

fn etag_of(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

/// ETag of a multipart object: MD5 of the concatenated part MD5s, suffixed with the part count.
fn multipart_etag<'a>(parts: impl Iterator<Item = &'a [u8]>) -> String {
    let mut digests = Vec::new();
    let mut count = 0;
    for part in parts {
        digests.extend_from_slice(md5::compute(part).as_slice());
        count += 1;
    }
    format!("{:x}-{count}", md5::compute(&digests))
}

fn now() -> UtcTime {
    chrono::Utc::now()
}

#[async_trait]
impl ObjectStorage for MemoryStore {
    async fn make_bucket(&self, bucket: &str) -> StorageResult<()> {
        let mut buckets = self.buckets.write().await;
        if buckets.contains_key(bucket) {
            return Err(StorageError::BucketAlreadyExists(bucket.to_string()));
        }
        buckets.insert(bucket.to_string(), BTreeMap::new());
        log::debug!("created bucket {bucket}");
        Ok(())
    }

    async fn remove_bucket(&self, bucket: &str) -> StorageResult<()> {
        let mut buckets = self.buckets.write().await;
        match buckets.get(bucket) {
            None => Err(StorageError::NoSuchBucket(bucket.to_string())),
            Some(objects) if !objects.is_empty() => {
                Err(StorageError::BucketNotEmpty(bucket.to_string()))
            }
            Some(_) => {
                buckets.remove(bucket);
                log::debug!("removed bucket {bucket}");
                Ok(())
            }
        }
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> StorageResult<Vec<ObjectInfo>> {
        let buckets = self.buckets.read().await;
        let objects = buckets
            .get(bucket)
            .ok_or_else(|| StorageError::NoSuchBucket(bucket.to_string()))?;
        Ok(objects
            .iter()
            .filter(|(name, _)| prefix.is_none_or(|p| name.starts_with(p)))
            .map(|(name, stored)| stored.info(bucket, name))
            .collect())
    }

    async fn put_object(&self, args: PutObjectArgs) -> StorageResult<ObjectInfo> {
        let sse = SseKind::of(args.sse.as_deref());
        self.check_sse(&sse)?;
        let checksum = args.checksum_algorithm.map(|algorithm| ObjectChecksum {
            algorithm,
            value: compute_checksum(algorithm, &args.data),
            checksum_type: ChecksumType::FullObject,
        });
        let stored = StoredObject {
            etag: etag_of(&args.data),
            data: args.data,
            last_modified: now(),
            checksum: checksum.clone(),
            parts: Vec::new(),
            sse,
            user_metadata: args.user_metadata,
        };
        let mut info = stored.info(&args.bucket, &args.object);
        info.checksum = checksum;
        self.insert(&args.bucket, &args.object, stored).await?;
        Ok(info)
    }

    async fn put_object_content(
        &self,
        args: PutObjectContentArgs,
        mut content: ByteStream,
    ) -> StorageResult<ObjectInfo> {
        if args.part_size == 0 {
            return Err(StorageError::Internal("part size must be positive".into()));
        }
        let mut buf = BytesMut::new();
        while let Some(chunk) = content.next().await {
            let chunk = chunk.map_err(|e| StorageError::Internal(e.to_string()))?;
            buf.extend_from_slice(&chunk);
        }
        let data = buf.freeze();

        if data.len() as u64 <= args.part_size {
            return self
                .put_object(
                    PutObjectArgs::builder()
                        .bucket(args.bucket)
                        .object(args.object)
                        .data(data)
                        .checksum_algorithm(args.checksum_algorithm)
                        .sse(args.sse)
                        .build(),
                )
                .await;
        }
        let part_count = data.len().div_ceil(args.part_size as usize);
        if part_count > MAX_PART_NUMBER as usize {
            return Err(StorageError::Internal(format!(
                "{part_count} parts exceed the limit of {MAX_PART_NUMBER}"
            )));
        }

        let upload_id = self
            .create_multipart_upload(
                CreateMultipartUploadArgs::builder()
                    .bucket(&args.bucket)
                    .object(&args.object)
                    .checksum_algorithm(args.checksum_algorithm)
                    .checksum_type(args.checksum_type)
                    .sse(args.sse.clone())
                    .build(),
            )
            .await?;
        let mut parts = Vec::new();
        for (i, chunk) in data.chunks(args.part_size as usize).enumerate() {
            let chunk = data.slice_ref(chunk);
            let part_number =
                u16::try_from(i + 1).map_err(|_| StorageError::InvalidPart(u16::MAX))?;
            let part = self
                .upload_part(
                    UploadPartArgs::builder()
                        .bucket(&args.bucket)
                        .object(&args.object)
                        .upload_id(&upload_id)
                        .part_number(part_number)
                        .checksum(args.checksum_algorithm.map(|a| compute_checksum(a, &chunk)))
                        .data(chunk)
                        .sse(args.sse.clone())
                        .build(),
                )
                .await?;
            parts.push(part);
        }
        self.complete_multipart_upload(&args.bucket, &args.object, &upload_id, parts)
            .await
    }

    async fn get_object(&self, args: GetObjectArgs) -> StorageResult<(Bytes, ObjectInfo)> {
        self.read(&args).await
    }

    async fn stat_object(&self, args: GetObjectArgs) -> StorageResult<ObjectInfo> {
        self.read(&args).await.map(|(_, info)| info)
    }

    async fn delete_object(&self, bucket: &str, object: &str) -> StorageResult<()> {
        let mut buckets = self.buckets.write().await;
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| StorageError::NoSuchBucket(bucket.to_string()))?;
        // Deleting a missing key succeeds, as in S3.
        objects.remove(object);
        Ok(())
    }

    async fn create_multipart_upload(
        &self,
        args: CreateMultipartUploadArgs,
    ) -> StorageResult<String> {
        if !self.buckets.read().await.contains_key(&args.bucket) {
            return Err(StorageError::NoSuchBucket(args.bucket));
        }
        let sse = SseKind::of(args.sse.as_deref());
        self.check_sse(&sse)?;
        if let Some(algorithm) = args.checksum_algorithm {
            if args.checksum_type == ChecksumType::FullObject && !algorithm.supports_full_object() {
                return Err(StorageError::Internal(format!(
                    "{algorithm} does not support checksum type {}",
                    args.checksum_type
                )));
            }
        }

        let upload_id = uuid::Uuid::new_v4().to_string();
        self.uploads.write().await.insert(
            upload_id.clone(),
            Upload {
                bucket: args.bucket,
                object: args.object,
                checksum_algorithm: args.checksum_algorithm,
                checksum_type: args.checksum_type,
                sse,
                parts: BTreeMap::new(),
            },
        );
        Ok(upload_id)
    }

    async fn upload_part(&self, args: UploadPartArgs) -> StorageResult<PartInfo> {
        if args.part_number == 0 || args.part_number > MAX_PART_NUMBER {
            return Err(StorageError::InvalidPart(args.part_number));
        }
        let mut uploads = self.uploads.write().await;
        let upload = uploads
            .get_mut(&args.upload_id)
            .filter(|u| u.bucket == args.bucket && u.object == args.object)
            .ok_or_else(|| StorageError::NoSuchUpload(args.upload_id.clone()))?;
        check_customer_key(&upload.sse, &SseKind::of(args.sse.as_deref()))?;

        let checksum = upload
            .checksum_algorithm
            .map(|a| compute_checksum(a, &args.data));
        if let (Some(sent), Some(computed)) = (&args.checksum, &checksum) {
            if sent != computed {
                return Err(StorageError::BadDigest(format!(
                    "part {}: sent {sent}, computed {computed}",
                    args.part_number
                )));
            }
        }

        let part = PartInfo {
            part_number: args.part_number,
            etag: etag_of(&args.data),
            size: args.data.len() as u64,
            checksum,
        };
        upload
            .parts
            .insert(args.part_number, (args.data, part.clone()));
        Ok(part)
    }

    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &str,
        parts: Vec<PartInfo>,
    ) -> StorageResult<ObjectInfo> {
        let upload = {
            let mut uploads = self.uploads.write().await;
            let upload = uploads
                .get(upload_id)
                .filter(|u| u.bucket == bucket && u.object == object)
                .ok_or_else(|| StorageError::NoSuchUpload(upload_id.to_string()))?;

            let Some(last) = parts.last() else {
                return Err(StorageError::InvalidPart(0));
            };
            if parts
                .windows(2)
                .any(|w| w[0].part_number >= w[1].part_number)
            {
                return Err(StorageError::InvalidPartOrder);
            }
            for part in &parts {
                match upload.parts.get(&part.part_number) {
                    Some((_, uploaded)) if uploaded.etag == part.etag => {}
                    _ => return Err(StorageError::InvalidPart(part.part_number)),
                }
                if part.part_number != last.part_number && part.size < self.min_part_size {
                    return Err(StorageError::EntityTooSmall(part.part_number));
                }
            }
            uploads
                .remove(upload_id)
                .ok_or_else(|| StorageError::NoSuchUpload(upload_id.to_string()))?
        };

        let chosen: Vec<&(Bytes, PartInfo)> = parts
            .iter()
            .filter_map(|p| upload.parts.get(&p.part_number))
            .collect();
        let mut data = BytesMut::new();
        for (bytes, _) in &chosen {
            data.extend_from_slice(bytes);
        }
        let data = data.freeze();

        let checksum = match upload.checksum_algorithm {
            Some(algorithm) => Some(ObjectChecksum {
                algorithm,
                value: object_checksum(algorithm, upload.checksum_type, &chosen, &data)?,
                checksum_type: upload.checksum_type,
            }),
            None => None,
        };
        let stored = StoredObject {
            etag: multipart_etag(chosen.iter().map(|(b, _)| b.as_ref())),
            last_modified: now(),
            checksum: checksum.clone(),
            parts: chosen
                .iter()
                .map(|(_, p)| StoredPart {
                    size: p.size,
                    checksum: p.checksum.clone(),
                })
                .collect(),
            sse: upload.sse,
            user_metadata: HashMap::new(),
            data,
        };
        let mut info = stored.info(bucket, object);
        info.checksum = checksum;
        self.insert(bucket, object, stored).await?;
        log::debug!(
            "completed upload {upload_id} of {bucket}/{object} with {} parts",
            parts.len()
        );
        Ok(info)
    }

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &str,
    ) -> StorageResult<()> {
        let mut uploads = self.uploads.write().await;
        match uploads.get(upload_id) {
            Some(u) if u.bucket == bucket && u.object == object => {
                uploads.remove(upload_id);
                Ok(())
            }
            _ => Err(StorageError::NoSuchUpload(upload_id.to_string())),
        }
    }

    async fn copy_object(&self, args: CopyObjectArgs) -> StorageResult<ObjectInfo> {
        let sse = SseKind::of(args.sse.as_deref());
        self.check_sse(&sse)?;
        let (data, source) = self.read_source(&args.source).await?;
        let checksum = source.checksum.map(|c| ObjectChecksum {
            algorithm: c.algorithm,
            value: compute_checksum(c.algorithm, &data),
            checksum_type: ChecksumType::FullObject,
        });
        let stored = StoredObject {
            etag: etag_of(&data),
            data,
            last_modified: now(),
            checksum: checksum.clone(),
            parts: Vec::new(),
            sse,
            user_metadata: source.user_metadata,
        };
        let mut info = stored.info(&args.bucket, &args.object);
        info.checksum = checksum;
        self.insert(&args.bucket, &args.object, stored).await?;
        Ok(info)
    }

    async fn compose_object(&self, args: ComposeObjectArgs) -> StorageResult<ObjectInfo> {
        let sse = SseKind::of(args.sse.as_deref());
        self.check_sse(&sse)?;
        if args.sources.is_empty() {
            return Err(StorageError::InvalidPart(0));
        }
        if args.sources.len() > MAX_PART_NUMBER as usize {
            return Err(StorageError::Internal(format!(
                "{} sources exceed the limit of {MAX_PART_NUMBER}",
                args.sources.len()
            )));
        }
        let mut pieces = Vec::with_capacity(args.sources.len());
        for (i, source) in args.sources.iter().enumerate() {
            let (data, _) = self.read_source(source).await?;
            if i + 1 < args.sources.len() && (data.len() as u64) < self.min_part_size {
                return Err(StorageError::EntityTooSmall((i + 1) as u16));
            }
            pieces.push(data);
        }

        let mut data = BytesMut::new();
        for piece in &pieces {
            data.extend_from_slice(piece);
        }
        let stored = StoredObject {
            etag: multipart_etag(pieces.iter().map(|p| p.as_ref())),
            data: data.freeze(),
            last_modified: now(),
            checksum: None,
            parts: pieces
                .iter()
                .map(|p| StoredPart {
                    size: p.len() as u64,
                    checksum: None,
                })
                .collect(),
            sse,
            user_metadata: HashMap::new(),
        };
        let info = stored.info(&args.bucket, &args.object);
        self.insert(&args.bucket, &args.object, stored).await?;
        Ok(info)
    }
}

/// Checksum of a completed multipart object, from the checksums of its parts.
fn object_checksum(
    algorithm: ChecksumAlgorithm,
    checksum_type: ChecksumType,
    parts: &[&(Bytes, PartInfo)],
    data: &[u8],
) -> StorageResult<String> {
    if checksum_type == ChecksumType::FullObject {
        return Ok(compute_checksum(algorithm, data));
    }
    let mut hasher = ChecksumHasher::new(algorithm);
    let mut single = None;
    for (_, part) in parts {
        let value = part
            .checksum
            .as_deref()
            .ok_or_else(|| StorageError::Internal(format!("part {} has no checksum", part.part_number)))?;
        let digest = b64_decode(value)
            .ok_or_else(|| StorageError::Internal(format!("malformed checksum {value}")))?;
        hasher.update(&digest);
        single = Some(digest);
    }
    match (parts.len(), single) {
        (1, Some(digest)) => Ok(b64_encode(digest)),
        (n, _) => Ok(format!("{}-{n}", hasher.finalize())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minio_mint::mint::multipart::compute_multipart_digest;
    use minio_mint::mint::sse::{Sse, SseCustomerKey, SseKms};
    use minio_mint::mint::types::ByteRange;
    use std::sync::Arc;

    const BUCKET: &str = "bucket";

    async fn store() -> MemoryStore {
        let store = MemoryStore::new().with_min_part_size(4);
        store.make_bucket(BUCKET).await.unwrap();
        store
    }

    fn get(object: &str) -> GetObjectArgs {
        GetObjectArgs::builder().bucket(BUCKET).object(object).build()
    }

    #[tokio::test]
    async fn put_get_range() {
        let store = store().await;
        store
            .put_object(
                PutObjectArgs::builder()
                    .bucket(BUCKET)
                    .object("o")
                    .data(Bytes::from_static(b"hello world"))
                    .build(),
            )
            .await
            .unwrap();

        let mut args = get("o");
        args.range = Some(ByteRange::new(6, 5));
        let (data, _) = store.get_object(args).await.unwrap();
        assert_eq!(data.as_ref(), b"world");

        let mut args = get("o");
        args.range = Some(ByteRange::from_offset(11));
        assert_eq!(
            store.get_object(args).await.unwrap_err(),
            StorageError::InvalidRange
        );
        assert!(matches!(
            store.get_object(get("missing")).await,
            Err(StorageError::NoSuchKey(_))
        ));
    }

    #[tokio::test]
    async fn bucket_lifecycle() {
        let store = store().await;
        assert!(matches!(
            store.make_bucket(BUCKET).await,
            Err(StorageError::BucketAlreadyExists(_))
        ));
        store
            .put_object(
                PutObjectArgs::builder()
                    .bucket(BUCKET)
                    .object("a/b")
                    .data(Bytes::new())
                    .build(),
            )
            .await
            .unwrap();
        assert!(matches!(
            store.remove_bucket(BUCKET).await,
            Err(StorageError::BucketNotEmpty(_))
        ));
        assert_eq!(store.list_objects(BUCKET, Some("a/")).await.unwrap().len(), 1);
        assert!(store.list_objects(BUCKET, Some("b")).await.unwrap().is_empty());
        store.delete_and_purge_bucket(BUCKET).await.unwrap();
        assert!(matches!(
            store.list_objects(BUCKET, None).await,
            Err(StorageError::NoSuchBucket(_))
        ));
    }

    async fn multipart(store: &MemoryStore, algorithm: ChecksumAlgorithm, data: &Bytes) -> ObjectInfo {
        let upload_id = store
            .create_multipart_upload(
                CreateMultipartUploadArgs::builder()
                    .bucket(BUCKET)
                    .object("mp")
                    .checksum_algorithm(algorithm)
                    .build(),
            )
            .await
            .unwrap();
        let mut parts = Vec::new();
        for (i, chunk) in data.chunks(4).enumerate() {
            parts.push(
                store
                    .upload_part(
                        UploadPartArgs::builder()
                            .bucket(BUCKET)
                            .object("mp")
                            .upload_id(&upload_id)
                            .part_number((i + 1) as u16)
                            .data(data.slice_ref(chunk))
                            .build(),
                    )
                    .await
                    .unwrap(),
            );
        }
        store
            .complete_multipart_upload(BUCKET, "mp", &upload_id, parts)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn composite_checksum_matches_composer() {
        let store = store().await;
        let data = Bytes::from_static(b"0123456789");
        for algorithm in ChecksumAlgorithm::ALL {
            let info = multipart(&store, algorithm, &data).await;
            let expected =
                compute_multipart_digest(&data, 4, algorithm, ChecksumType::Composite).unwrap();
            assert_eq!(info.checksum.unwrap().value, expected);
            assert_eq!(info.parts_count, Some(3));
            assert!(info.etag.ends_with("-3"));
        }

        // Part reads report the checksum of the part.
        let mut args = get("mp");
        args.part_number = Some(3);
        args.checksum_mode = true;
        let (part, info) = store.get_object(args).await.unwrap();
        assert_eq!(part.as_ref(), b"89");
        assert_eq!(
            info.checksum.unwrap().value,
            compute_checksum(ChecksumAlgorithm::SHA256, b"89")
        );

        // Whole reads only carry a checksum in checksum mode.
        assert!(store.stat_object(get("mp")).await.unwrap().checksum.is_none());
    }

    #[tokio::test]
    async fn complete_validation() {
        let store = store().await;
        let upload_id = store
            .create_multipart_upload(
                CreateMultipartUploadArgs::builder()
                    .bucket(BUCKET)
                    .object("mp")
                    .build(),
            )
            .await
            .unwrap();
        let mut parts = Vec::new();
        for (n, data) in [(1u16, &b"ab"[..]), (2, b"cdef")] {
            parts.push(
                store
                    .upload_part(
                        UploadPartArgs::builder()
                            .bucket(BUCKET)
                            .object("mp")
                            .upload_id(&upload_id)
                            .part_number(n)
                            .data(Bytes::copy_from_slice(data))
                            .build(),
                    )
                    .await
                    .unwrap(),
            );
        }
        let reversed: Vec<PartInfo> = parts.iter().rev().cloned().collect();
        assert_eq!(
            store
                .complete_multipart_upload(BUCKET, "mp", &upload_id, reversed)
                .await
                .unwrap_err(),
            StorageError::InvalidPartOrder
        );
        assert_eq!(
            store
                .complete_multipart_upload(BUCKET, "mp", &upload_id, parts.clone())
                .await
                .unwrap_err(),
            StorageError::EntityTooSmall(1)
        );
        store
            .abort_multipart_upload(BUCKET, "mp", &upload_id)
            .await
            .unwrap();
        assert_eq!(store.pending_uploads().await, 0);
        assert!(matches!(
            store
                .complete_multipart_upload(BUCKET, "mp", &upload_id, parts)
                .await,
            Err(StorageError::NoSuchUpload(_))
        ));
    }

    #[tokio::test]
    async fn bad_part_digest() {
        let store = store().await;
        let upload_id = store
            .create_multipart_upload(
                CreateMultipartUploadArgs::builder()
                    .bucket(BUCKET)
                    .object("mp")
                    .checksum_algorithm(ChecksumAlgorithm::CRC32C)
                    .build(),
            )
            .await
            .unwrap();
        let result = store
            .upload_part(
                UploadPartArgs::builder()
                    .bucket(BUCKET)
                    .object("mp")
                    .upload_id(&upload_id)
                    .part_number(1)
                    .data(Bytes::from_static(b"abc"))
                    .checksum(compute_checksum(ChecksumAlgorithm::CRC32C, b"abd"))
                    .build(),
            )
            .await;
        assert!(matches!(result, Err(StorageError::BadDigest(_))));
    }

    #[tokio::test]
    async fn customer_key_required() {
        let store = store().await;
        let key: Arc<dyn Sse> = Arc::new(SseCustomerKey::new("32byteslongsecretkeymustbegiven1"));
        let other: Arc<dyn Sse> = Arc::new(SseCustomerKey::new("32byteslongsecretkeymustbegiven2"));
        store
            .put_object(
                PutObjectArgs::builder()
                    .bucket(BUCKET)
                    .object("enc")
                    .data(Bytes::from_static(b"secret"))
                    .sse(Some(key.clone()))
                    .build(),
            )
            .await
            .unwrap();

        assert!(matches!(
            store.get_object(get("enc")).await,
            Err(StorageError::AccessDenied(_))
        ));
        let mut args = get("enc");
        args.sse = Some(other);
        assert!(matches!(
            store.get_object(args).await,
            Err(StorageError::AccessDenied(_))
        ));
        let mut args = get("enc");
        args.sse = Some(key);
        let (data, info) = store.get_object(args).await.unwrap();
        assert_eq!(data.as_ref(), b"secret");
        assert!(matches!(info.sse, SseKind::Customer { .. }));
    }

    #[tokio::test]
    async fn kms_disabled() {
        let store = store().await;
        let result = store
            .put_object(
                PutObjectArgs::builder()
                    .bucket(BUCKET)
                    .object("kms")
                    .data(Bytes::new())
                    .sse(Some(Arc::new(SseKms::new("key", None)) as Arc<dyn Sse>))
                    .build(),
            )
            .await;
        assert!(matches!(result, Err(StorageError::NotImplemented(_))));
    }
}
