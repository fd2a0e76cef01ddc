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

//! Upload objects in parts and verify what the server stored.

use crate::mint::checksum::{ChecksumAlgorithm, ChecksumType, compute_checksum};
use crate::mint::error::{Error, Result};
use crate::mint::fixture::FixtureGenerator;
use crate::mint::multipart::{MAX_PART_NUMBER, compute_multipart_digest, part_checksum};
use crate::mint::sse::Sse;
use crate::mint::storage::ObjectStorage;
use crate::mint::types::{
    ByteRange, CreateMultipartUploadArgs, GetObjectArgs, ObjectInfo, PartInfo, UploadPartArgs,
};
use bytes::Bytes;
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// A multipart upload of an in-memory buffer in fixed-size parts.
#[derive(Clone, Debug, TypedBuilder)]
pub struct MultipartUpload {
    #[builder(setter(into))]
    bucket: String,
    #[builder(setter(into))]
    object: String,
    part_size: usize,
    #[builder(default, setter(into))]
    checksum_algorithm: Option<ChecksumAlgorithm>,
    #[builder(default)]
    checksum_type: ChecksumType,
    #[builder(default, setter(into))]
    sse: Option<Arc<dyn Sse>>,
}

/// Result of [`MultipartUpload::run`].
#[derive(Clone, Debug)]
pub struct UploadOutcome {
    /// Object as reported by the completing request.
    pub info: ObjectInfo,
    pub parts: Vec<PartInfo>,
    /// Checksum the server should report, when an algorithm was requested.
    pub expected_checksum: Option<String>,
}

impl MultipartUpload {
    /// Uploads `data` as parts 1..N of `part_size` bytes and completes the upload.
    ///
    /// The upload is aborted if any part fails. An empty buffer is uploaded as
    /// a single empty part.
    pub async fn run(&self, store: &dyn ObjectStorage, data: &Bytes) -> Result<UploadOutcome> {
        if self.part_size == 0 {
            return Err(Error::InvalidComposerInput(
                "part size must be positive".into(),
            ));
        }
        let part_count = data.len().div_ceil(self.part_size).max(1);
        if part_count > MAX_PART_NUMBER as usize {
            return Err(Error::InvalidComposerInput(format!(
                "{} bytes in parts of {} need {part_count} parts, more than {MAX_PART_NUMBER}",
                data.len(),
                self.part_size
            )));
        }
        let expected_checksum = self
            .checksum_algorithm
            .map(|a| compute_multipart_digest(data, self.part_size, a, self.checksum_type))
            .transpose()?;

        let upload_id = store
            .create_multipart_upload(
                CreateMultipartUploadArgs::builder()
                    .bucket(&self.bucket)
                    .object(&self.object)
                    .checksum_algorithm(self.checksum_algorithm)
                    .checksum_type(self.checksum_type)
                    .sse(self.sse.clone())
                    .build(),
            )
            .await?;
        log::debug!(
            "started multipart upload {upload_id} of {}/{} ({} bytes, part size {})",
            self.bucket,
            self.object,
            data.len(),
            self.part_size
        );

        let parts = match self.upload_parts(store, &upload_id, data).await {
            Ok(parts) => parts,
            Err(e) => {
                if let Err(abort_err) = store
                    .abort_multipart_upload(&self.bucket, &self.object, &upload_id)
                    .await
                {
                    log::warn!("unable to abort upload {upload_id}: {abort_err}");
                }
                return Err(e);
            }
        };

        let info = store
            .complete_multipart_upload(&self.bucket, &self.object, &upload_id, parts.clone())
            .await?;
        Ok(UploadOutcome {
            info,
            parts,
            expected_checksum,
        })
    }

    async fn upload_parts(
        &self,
        store: &dyn ObjectStorage,
        upload_id: &str,
        data: &Bytes,
    ) -> Result<Vec<PartInfo>> {
        let part_count = data.len().div_ceil(self.part_size).max(1);
        let mut parts = Vec::with_capacity(part_count);
        for i in 0..part_count {
            let start = i * self.part_size;
            let end = (start + self.part_size).min(data.len());
            let chunk = data.slice(start..end);
            let checksum = self.checksum_algorithm.map(|a| compute_checksum(a, &chunk));
            let part_number = u16::try_from(i + 1).map_err(|_| {
                Error::InvalidComposerInput(format!("part number {} out of range", i + 1))
            })?;
            let part = store
                .upload_part(
                    UploadPartArgs::builder()
                        .bucket(&self.bucket)
                        .object(&self.object)
                        .upload_id(upload_id)
                        .part_number(part_number)
                        .data(chunk)
                        .checksum(checksum)
                        .sse(self.sse.clone())
                        .build(),
                )
                .await?;
            parts.push(part);
        }
        Ok(parts)
    }
}

/// Checks that `info` carries the `expected` checksum for `algorithm`.
pub fn verify_object_checksum(
    info: &ObjectInfo,
    algorithm: ChecksumAlgorithm,
    expected: &str,
) -> Result<()> {
    match &info.checksum {
        Some(c) if c.algorithm == algorithm && c.value == expected => Ok(()),
        other => Err(Error::DigestMismatch {
            algorithm,
            expected: expected.to_string(),
            actual: other
                .as_ref()
                .map(|c| format!("{}:{}", c.algorithm, c.value))
                .unwrap_or_else(|| "<none>".to_string()),
        }),
    }
}

/// Compares downloaded bytes against what was uploaded.
pub fn verify_content(expected: &[u8], actual: &[u8]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(Error::ContentMismatch(format!(
            "expected {} bytes, got {}",
            expected.len(),
            actual.len()
        )));
    }
    match expected.iter().zip(actual).position(|(a, b)| a != b) {
        Some(offset) => Err(Error::ContentMismatch(format!(
            "first difference at offset {offset}"
        ))),
        None => Ok(()),
    }
}

/// Reads one stored object back in various ways and compares the results
/// with the original content.
pub struct ObjectVerifier<'a> {
    store: &'a dyn ObjectStorage,
    bucket: &'a str,
    object: &'a str,
    sse: Option<Arc<dyn Sse>>,
}

impl<'a> ObjectVerifier<'a> {
    pub fn new(store: &'a dyn ObjectStorage, bucket: &'a str, object: &'a str) -> Self {
        Self {
            store,
            bucket,
            object,
            sse: None,
        }
    }

    /// Key to present on reads of an SSE-C object.
    pub fn with_sse(mut self, sse: Option<Arc<dyn Sse>>) -> Self {
        self.sse = sse;
        self
    }

    fn get_args(&self) -> GetObjectArgs {
        GetObjectArgs::builder()
            .bucket(self.bucket)
            .object(self.object)
            .sse(self.sse.clone())
            .build()
    }

    /// Downloads the whole object and compares it with `expected`.
    pub async fn content(&self, expected: &[u8]) -> Result<ObjectInfo> {
        let (data, info) = self.store.get_object(self.get_args()).await?;
        verify_content(expected, &data)?;
        Ok(info)
    }

    /// Downloads the whole object and checks it against the CRC32 of data file `name`.
    pub async fn fixture(&self, fixtures: &FixtureGenerator, name: &str) -> Result<()> {
        let (data, _) = self.store.get_object(self.get_args()).await?;
        fixtures.bytes_match_fixture(&data, name)
    }

    /// Stats the object with checksum mode and compares the reported checksum.
    pub async fn checksum(&self, algorithm: ChecksumAlgorithm, expected: &str) -> Result<()> {
        let mut args = self.get_args();
        args.checksum_mode = true;
        let info = self.store.stat_object(args).await?;
        verify_object_checksum(&info, algorithm, expected)
    }

    /// Reads `range` and compares it with the same range of `original`.
    pub async fn range(&self, original: &[u8], range: ByteRange) -> Result<()> {
        let expected = range
            .resolve(original.len() as u64)
            .map(|r| &original[r])
            .ok_or_else(|| {
                Error::InvalidComposerInput(format!(
                    "range {range} outside of {} bytes",
                    original.len()
                ))
            })?;
        let mut args = self.get_args();
        args.range = Some(range);
        let (data, _) = self.store.get_object(args).await?;
        verify_content(expected, &data)
    }

    /// Reads part `part_number` with checksum mode; compares its bytes and its
    /// reported checksum with a recomputation from `original`.
    pub async fn part(
        &self,
        original: &[u8],
        part_size: usize,
        part_number: u16,
        algorithm: ChecksumAlgorithm,
    ) -> Result<()> {
        let expected = part_checksum(original, part_size, part_number as usize, algorithm)?;
        let mut args = self.get_args();
        args.part_number = Some(part_number);
        args.checksum_mode = true;
        let (data, info) = self.store.get_object(args).await?;

        let start = (part_number as usize - 1) * part_size;
        let end = (start + part_size).min(original.len());
        verify_content(&original[start..end], &data)?;
        verify_object_checksum(&info, algorithm, &expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mint::sse::SseKind;
    use crate::mint::types::ObjectChecksum;
    use std::collections::HashMap;

    fn info(checksum: Option<ObjectChecksum>) -> ObjectInfo {
        ObjectInfo {
            bucket: "b".into(),
            object: "o".into(),
            size: 0,
            etag: String::new(),
            last_modified: chrono::Utc::now(),
            checksum,
            parts_count: None,
            sse: SseKind::None,
            user_metadata: HashMap::new(),
        }
    }

    #[test]
    fn checksum_verification() {
        let ok = info(Some(ObjectChecksum {
            algorithm: ChecksumAlgorithm::CRC32C,
            value: "abc=-2".into(),
            checksum_type: ChecksumType::Composite,
        }));
        verify_object_checksum(&ok, ChecksumAlgorithm::CRC32C, "abc=-2").unwrap();
        assert!(matches!(
            verify_object_checksum(&ok, ChecksumAlgorithm::CRC32, "abc=-2"),
            Err(Error::DigestMismatch { .. })
        ));
        assert!(matches!(
            verify_object_checksum(&info(None), ChecksumAlgorithm::CRC32C, "abc=-2"),
            Err(Error::DigestMismatch { actual, .. }) if actual == "<none>"
        ));
    }

    #[test]
    fn content_verification() {
        verify_content(b"abc", b"abc").unwrap();
        assert!(matches!(
            verify_content(b"abc", b"abd"),
            Err(Error::ContentMismatch(m)) if m.contains("offset 2")
        ));
        assert!(verify_content(b"abc", b"ab").is_err());
    }
}
