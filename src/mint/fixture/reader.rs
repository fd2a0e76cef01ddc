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
use futures_io::AsyncRead;
use futures_util::Stream;
use rand::prelude::SmallRng;
use rand::{RngCore, SeedableRng};
use std::fs::File;
use std::io::{self, Read};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Random bytes are produced in whole blocks of this size, so the generated
/// sequence does not depend on how callers size their reads.
const BLOCK_SIZE: usize = 8 * 1024;

/// Deterministic pseudo-random bytes seeded by the data file size.
pub struct GeneratedSrc {
    rng: SmallRng,
    remaining: u64,
    block: Box<[u8; BLOCK_SIZE]>,
    pos: usize,
    filled: usize,
}

impl GeneratedSrc {
    pub fn new(size: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(size),
            remaining: size,
            block: Box::new([0; BLOCK_SIZE]),
            pos: 0,
            filled: 0,
        }
    }
}

impl Read for GeneratedSrc {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        if self.pos == self.filled {
            self.rng.fill_bytes(&mut self.block[..]);
            self.filled = self.remaining.min(BLOCK_SIZE as u64) as usize;
            self.pos = 0;
        }
        let n = buf.len().min(self.filled - self.pos);
        buf[..n].copy_from_slice(&self.block[self.pos..self.pos + n]);
        self.pos += n;
        self.remaining -= n as u64;
        Ok(n)
    }
}

enum Inner {
    Generated(GeneratedSrc),
    File(File),
}

/// Byte source of one data file.
///
/// Usable as a blocking [`Read`], as an [`AsyncRead`] and as a [`Stream`] of
/// chunks of at most 8 KiB. File backed readers perform blocking reads in all
/// three forms.
pub struct FixtureReader {
    name: String,
    size: u64,
    inner: Inner,
}

impl FixtureReader {
    pub(crate) fn generated(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
            inner: Inner::Generated(GeneratedSrc::new(size)),
        }
    }

    pub(crate) fn file(name: &str, size: u64, file: File) -> Self {
        Self {
            name: name.to_string(),
            size,
            inner: Inner::File(file),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the data; for external files this is the size on disk.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Read for FixtureReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Generated(src) => src.read(buf),
            Inner::File(f) => f.read(buf),
        }
    }
}

impl AsyncRead for FixtureReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(self.as_mut().get_mut().read(buf))
    }
}

impl Stream for FixtureReader {
    type Item = Result<Bytes, io::Error>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let mut buf = vec![0; BLOCK_SIZE];
        match this.read(&mut buf) {
            Ok(0) => Poll::Ready(None),
            Ok(n) => {
                buf.truncate(n);
                Poll::Ready(Some(Ok(Bytes::from(buf))))
            }
            Err(e) => Poll::Ready(Some(Err(e))),
        }
    }
}
