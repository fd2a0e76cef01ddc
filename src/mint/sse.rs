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

//! Server side encryption definitions

use crate::mint::checksum::{b64_encode, md5sum_hash};
use crate::mint::multimap::{Multimap, MultimapExt};

pub const SSE_HEADER: &str = "X-Amz-Server-Side-Encryption";
pub const SSE_KMS_KEY_ID_HEADER: &str = "X-Amz-Server-Side-Encryption-Aws-Kms-Key-Id";
pub const SSE_CONTEXT_HEADER: &str = "X-Amz-Server-Side-Encryption-Context";
pub const SSEC_ALGORITHM_HEADER: &str = "X-Amz-Server-Side-Encryption-Customer-Algorithm";
pub const SSEC_KEY_HEADER: &str = "X-Amz-Server-Side-Encryption-Customer-Key";
pub const SSEC_KEY_MD5_HEADER: &str = "X-Amz-Server-Side-Encryption-Customer-Key-MD5";
pub const SSEC_COPY_ALGORITHM_HEADER: &str =
    "X-Amz-Copy-Source-Server-Side-Encryption-Customer-Algorithm";
pub const SSEC_COPY_KEY_HEADER: &str = "X-Amz-Copy-Source-Server-Side-Encryption-Customer-Key";
pub const SSEC_COPY_KEY_MD5_HEADER: &str =
    "X-Amz-Copy-Source-Server-Side-Encryption-Customer-Key-MD5";

/// Base server side encryption
pub trait Sse: std::fmt::Debug + Send + Sync {
    /// Regular headers
    fn headers(&self) -> Multimap;
    /// Headers for copy operation
    fn copy_headers(&self) -> Multimap;
    fn tls_required(&self) -> bool;
}

#[derive(Clone, Debug)]
/// Server side encryption customer key type
pub struct SseCustomerKey {
    headers: Multimap,
    copy_headers: Multimap,
    key_md5: String,
}

impl SseCustomerKey {
    pub fn new(key: &str) -> Self {
        let b64key: String = b64_encode(key);
        let md5key: String = md5sum_hash(key.as_bytes());

        let mut headers = Multimap::with_capacity(3);
        headers.add(SSEC_ALGORITHM_HEADER, "AES256");
        headers.add(SSEC_KEY_HEADER, b64key.clone());
        headers.add(SSEC_KEY_MD5_HEADER, md5key.clone());

        let mut copy_headers = Multimap::with_capacity(3);
        copy_headers.add(SSEC_COPY_ALGORITHM_HEADER, "AES256");
        copy_headers.add(SSEC_COPY_KEY_HEADER, b64key);
        copy_headers.add(SSEC_COPY_KEY_MD5_HEADER, md5key.clone());

        Self {
            headers,
            copy_headers,
            key_md5: md5key,
        }
    }

    /// Base64 MD5 of the key, which identifies the key to the server.
    pub fn key_md5(&self) -> &str {
        &self.key_md5
    }
}

impl Sse for SseCustomerKey {
    fn headers(&self) -> Multimap {
        self.headers.clone()
    }

    fn copy_headers(&self) -> Multimap {
        self.copy_headers.clone()
    }

    fn tls_required(&self) -> bool {
        true
    }
}

#[derive(Clone, Debug)]
/// Server side encryption KMS type
pub struct SseKms {
    headers: Multimap,
}

impl SseKms {
    pub fn new(key: &str, context: Option<&str>) -> SseKms {
        let mut headers = Multimap::with_capacity(3);

        headers.add(SSE_KMS_KEY_ID_HEADER, key);
        headers.add(SSE_HEADER, "aws:kms");
        if let Some(v) = context {
            headers.add(SSE_CONTEXT_HEADER, b64_encode(v));
        }

        SseKms { headers }
    }
}

impl Sse for SseKms {
    fn headers(&self) -> Multimap {
        self.headers.clone()
    }

    fn copy_headers(&self) -> Multimap {
        Multimap::with_capacity(0)
    }

    fn tls_required(&self) -> bool {
        true
    }
}

#[derive(Clone, Debug)]
/// Server side encryption S3 type
pub struct SseS3 {
    headers: Multimap,
}

impl SseS3 {
    pub fn new() -> Self {
        let mut headers = Multimap::new();
        headers.add(SSE_HEADER, "AES256");

        Self { headers }
    }
}

impl Default for SseS3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sse for SseS3 {
    fn headers(&self) -> Multimap {
        self.headers.clone()
    }

    fn copy_headers(&self) -> Multimap {
        Multimap::with_capacity(0)
    }

    fn tls_required(&self) -> bool {
        false
    }
}

/// Encryption applied to a stored object, as derived from request headers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SseKind {
    #[default]
    None,
    S3,
    Kms { key_id: String },
    /// Customer key, identified by its base64 MD5.
    Customer { key_md5: String },
}

impl SseKind {
    /// Classifies request headers produced by [`Sse::headers`].
    pub fn from_headers(headers: &Multimap) -> Self {
        if let Some(md5) = headers.get_ignore_case(SSEC_KEY_MD5_HEADER) {
            return SseKind::Customer {
                key_md5: md5.to_string(),
            };
        }
        match headers.get_ignore_case(SSE_HEADER) {
            Some("aws:kms") => SseKind::Kms {
                key_id: headers
                    .get_ignore_case(SSE_KMS_KEY_ID_HEADER)
                    .unwrap_or_default()
                    .to_string(),
            },
            Some(_) => SseKind::S3,
            None => SseKind::None,
        }
    }

    /// Classifies copy-source headers produced by [`Sse::copy_headers`].
    pub fn from_copy_headers(headers: &Multimap) -> Self {
        match headers.get_ignore_case(SSEC_COPY_KEY_MD5_HEADER) {
            Some(md5) => SseKind::Customer {
                key_md5: md5.to_string(),
            },
            None => SseKind::None,
        }
    }

    pub fn of(sse: Option<&dyn Sse>) -> Self {
        sse.map(|s| SseKind::from_headers(&s.headers()))
            .unwrap_or_default()
    }

    pub fn of_copy_source(sse: Option<&dyn Sse>) -> Self {
        sse.map(|s| SseKind::from_copy_headers(&s.copy_headers()))
            .unwrap_or_default()
    }
}
