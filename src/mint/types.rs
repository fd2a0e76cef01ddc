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

//! Request arguments and response values of the storage contract

use crate::mint::checksum::{ChecksumAlgorithm, ChecksumType};
use crate::mint::sse::{Sse, SseKind};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use typed_builder::TypedBuilder;

pub type UtcTime = DateTime<Utc>;

/// Byte range of an object; `length` of `None` reads to the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteRange {
    pub offset: u64,
    pub length: Option<u64>,
}

impl ByteRange {
    pub fn new(offset: u64, length: u64) -> Self {
        Self {
            offset,
            length: Some(length),
        }
    }

    pub fn from_offset(offset: u64) -> Self {
        Self {
            offset,
            length: None,
        }
    }

    /// Resolves the range against an object of `size` bytes.
    ///
    /// Returns `None` when the range is not satisfiable; a length running past
    /// the end is clipped.
    pub fn resolve(&self, size: u64) -> Option<Range<usize>> {
        if self.offset >= size || self.length == Some(0) {
            return None;
        }
        let end = match self.length {
            Some(len) => self.offset.saturating_add(len).min(size),
            None => size,
        };
        Some(self.offset as usize..end as usize)
    }
}

impl fmt::Display for ByteRange {
    /// HTTP `Range` header value. A zero-length range has no header form and
    /// is shown as `bytes=<offset>-<offset>/0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length {
            Some(0) => write!(f, "bytes={}-{}/0", self.offset, self.offset),
            Some(len) => write!(
                f,
                "bytes={}-{}",
                self.offset,
                self.offset.saturating_add(len - 1)
            ),
            None => write!(f, "bytes={}-", self.offset),
        }
    }
}

/// Checksum the server reports for an object or a part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectChecksum {
    pub algorithm: ChecksumAlgorithm,
    /// `base64` or `base64-N` as sent in `x-amz-checksum-<algorithm>`
    pub value: String,
    pub checksum_type: ChecksumType,
}

/// Object metadata as returned by put, stat, copy and compose.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectInfo {
    pub bucket: String,
    pub object: String,
    pub size: u64,
    pub etag: String,
    pub last_modified: UtcTime,
    pub checksum: Option<ObjectChecksum>,
    /// Number of parts of a multipart object.
    pub parts_count: Option<u16>,
    pub sse: SseKind,
    pub user_metadata: HashMap<String, String>,
}

/// Uploaded part, as handed back to `complete_multipart_upload`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartInfo {
    pub part_number: u16,
    pub etag: String,
    pub size: u64,
    pub checksum: Option<String>,
}

#[derive(Clone, Debug, TypedBuilder)]
pub struct PutObjectArgs {
    #[builder(setter(into))]
    pub bucket: String,
    #[builder(setter(into))]
    pub object: String,
    #[builder(setter(into))]
    pub data: Bytes,
    #[builder(default, setter(into))]
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    #[builder(default, setter(into))]
    pub sse: Option<Arc<dyn Sse>>,
    #[builder(default)]
    pub user_metadata: HashMap<String, String>,
}

/// Streaming upload; the client splits the stream into `part_size` parts.
#[derive(Clone, Debug, TypedBuilder)]
pub struct PutObjectContentArgs {
    #[builder(setter(into))]
    pub bucket: String,
    #[builder(setter(into))]
    pub object: String,
    pub part_size: u64,
    #[builder(default, setter(into))]
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    #[builder(default)]
    pub checksum_type: ChecksumType,
    #[builder(default, setter(into))]
    pub sse: Option<Arc<dyn Sse>>,
}

#[derive(Clone, Debug, TypedBuilder)]
pub struct GetObjectArgs {
    #[builder(setter(into))]
    pub bucket: String,
    #[builder(setter(into))]
    pub object: String,
    #[builder(default, setter(into))]
    pub range: Option<ByteRange>,
    /// Reads a single part of a multipart object.
    #[builder(default, setter(into))]
    pub part_number: Option<u16>,
    #[builder(default, setter(into))]
    pub sse: Option<Arc<dyn Sse>>,
    /// Asks the server for `x-amz-checksum-*` response headers.
    #[builder(default)]
    pub checksum_mode: bool,
}

#[derive(Clone, Debug, TypedBuilder)]
pub struct CreateMultipartUploadArgs {
    #[builder(setter(into))]
    pub bucket: String,
    #[builder(setter(into))]
    pub object: String,
    #[builder(default, setter(into))]
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    #[builder(default)]
    pub checksum_type: ChecksumType,
    #[builder(default, setter(into))]
    pub sse: Option<Arc<dyn Sse>>,
}

#[derive(Clone, Debug, TypedBuilder)]
pub struct UploadPartArgs {
    #[builder(setter(into))]
    pub bucket: String,
    #[builder(setter(into))]
    pub object: String,
    #[builder(setter(into))]
    pub upload_id: String,
    pub part_number: u16,
    #[builder(setter(into))]
    pub data: Bytes,
    /// Client computed checksum of this part, verified by the server.
    #[builder(default, setter(into))]
    pub checksum: Option<String>,
    #[builder(default, setter(into))]
    pub sse: Option<Arc<dyn Sse>>,
}

/// Source object of a copy or one source of a compose.
#[derive(Clone, Debug, TypedBuilder)]
pub struct CopySource {
    #[builder(setter(into))]
    pub bucket: String,
    #[builder(setter(into))]
    pub object: String,
    #[builder(default, setter(into))]
    pub range: Option<ByteRange>,
    /// Key the source was encrypted with.
    #[builder(default, setter(into))]
    pub sse: Option<Arc<dyn Sse>>,
}

#[derive(Clone, Debug, TypedBuilder)]
pub struct CopyObjectArgs {
    #[builder(setter(into))]
    pub bucket: String,
    #[builder(setter(into))]
    pub object: String,
    pub source: CopySource,
    #[builder(default, setter(into))]
    pub sse: Option<Arc<dyn Sse>>,
}

#[derive(Clone, Debug, TypedBuilder)]
pub struct ComposeObjectArgs {
    #[builder(setter(into))]
    pub bucket: String,
    #[builder(setter(into))]
    pub object: String,
    pub sources: Vec<CopySource>,
    #[builder(default, setter(into))]
    pub sse: Option<Arc<dyn Sse>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_ranges() {
        assert_eq!(ByteRange::new(0, 10).resolve(100), Some(0..10));
        assert_eq!(ByteRange::new(95, 10).resolve(100), Some(95..100));
        assert_eq!(ByteRange::from_offset(40).resolve(100), Some(40..100));
        assert_eq!(ByteRange::new(100, 1).resolve(100), None);
        assert_eq!(ByteRange::new(5, 0).resolve(100), None);
        assert_eq!(ByteRange::from_offset(0).resolve(0), None);
    }

    #[test]
    fn range_header() {
        assert_eq!(ByteRange::new(10, 5).to_string(), "bytes=10-14");
        assert_eq!(ByteRange::from_offset(7).to_string(), "bytes=7-");
        assert_eq!(ByteRange::new(0, 0).to_string(), "bytes=0-0/0");
        assert_eq!(
            ByteRange::new(u64::MAX, 2).to_string(),
            format!("bytes={}-{}", u64::MAX, u64::MAX)
        );
    }
}
