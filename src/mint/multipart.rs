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

//! Expected values of multipart object checksums.
//!
//! S3 composes the checksum of a multipart object by hashing every part on
//! its own, concatenating the raw per-part digests in part order and hashing
//! that concatenation once more. The textual form is
//! `base64(hash(d1 || d2 || ... || dN))-N`.
//!
//! A single-part result, and every full-object checksum, is the plain
//! base64 digest without a part-count suffix.

use crate::mint::checksum::{
    ChecksumAlgorithm, ChecksumHasher, ChecksumType, b64_encode, compute_checksum, compute_digest,
};
use crate::mint::error::{Error, Result};

/// Highest part number S3 accepts, and so the most parts an upload can have.
pub const MAX_PART_NUMBER: u16 = 10_000;

/// Result of a multipart checksum computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultipartChecksum {
    pub algorithm: ChecksumAlgorithm,
    /// Raw digest of every part, in part order 1..N.
    pub per_part_digests: Vec<Vec<u8>>,
    /// Raw digest of the whole computation: the single part digest when there
    /// is one part, the digest of the concatenated part digests otherwise.
    pub composite_digest: Vec<u8>,
}

impl MultipartChecksum {
    /// Computes the checksum of `buffer` as uploaded in `part_size` windows.
    ///
    /// [`ChecksumType::FullObject`] ignores `part_size` and treats the whole
    /// buffer as one part.
    pub fn compute(
        buffer: &[u8],
        part_size: usize,
        algorithm: ChecksumAlgorithm,
        checksum_type: ChecksumType,
    ) -> Result<Self> {
        let part_size = match checksum_type {
            ChecksumType::FullObject => buffer.len(),
            ChecksumType::Composite => part_size,
        };
        if part_size == 0 && !buffer.is_empty() {
            return Err(Error::InvalidComposerInput(format!(
                "part size must be positive for a {} byte buffer",
                buffer.len()
            )));
        }

        let per_part_digests: Vec<Vec<u8>> = if buffer.is_empty() {
            // An empty object is still one (empty) part.
            vec![compute_digest(algorithm, &[])]
        } else {
            buffer
                .chunks(part_size)
                .map(|part| compute_digest(algorithm, part))
                .collect()
        };

        let composite_digest = if per_part_digests.len() == 1 {
            per_part_digests[0].clone()
        } else {
            let mut hasher = ChecksumHasher::new(algorithm);
            for digest in &per_part_digests {
                hasher.update(digest);
            }
            hasher.finalize_raw()
        };

        Ok(Self {
            algorithm,
            per_part_digests,
            composite_digest,
        })
    }

    pub fn part_count(&self) -> usize {
        self.per_part_digests.len()
    }

    /// Base64 form of the composite digest, without any suffix.
    pub fn composite_base64(&self) -> String {
        b64_encode(&self.composite_digest)
    }

    /// The value S3 reports in `x-amz-checksum-<algorithm>`.
    pub fn display_form(&self) -> String {
        match self.part_count() {
            1 => self.composite_base64(),
            n => format!("{}-{}", self.composite_base64(), n),
        }
    }

    /// Base64 digest of the 1-based `part_number`, if such a part exists.
    pub fn part_base64(&self, part_number: usize) -> Option<String> {
        part_number
            .checked_sub(1)
            .and_then(|i| self.per_part_digests.get(i))
            .map(b64_encode)
    }
}

/// Computes the display form of a multipart object checksum.
///
/// See [`MultipartChecksum::compute`] for the algorithm.
pub fn compute_multipart_digest(
    buffer: &[u8],
    part_size: usize,
    algorithm: ChecksumAlgorithm,
    checksum_type: ChecksumType,
) -> Result<String> {
    MultipartChecksum::compute(buffer, part_size, algorithm, checksum_type)
        .map(|c| c.display_form())
}

/// Expected checksum of one uploaded part, `part_number` being 1-based.
///
/// The final part is clipped at the end of the buffer.
pub fn part_checksum(
    buffer: &[u8],
    part_size: usize,
    part_number: usize,
    algorithm: ChecksumAlgorithm,
) -> Result<String> {
    if part_size == 0 {
        return Err(Error::InvalidComposerInput(
            "part size must be positive".into(),
        ));
    }
    let part_count = buffer.len().div_ceil(part_size).max(1);
    if part_number == 0 || part_number > part_count {
        return Err(Error::InvalidComposerInput(format!(
            "part {part_number} out of range 1..={part_count}"
        )));
    }
    let start = (part_number - 1) * part_size;
    let end = (start + part_size).min(buffer.len());
    Ok(compute_checksum(algorithm, &buffer[start..end]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    fn buffer(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 % 251) as u8).collect()
    }

    #[test]
    fn two_parts_compose_by_hand() {
        let part_size = 5 * 1024;
        let data = buffer(2 * part_size);
        for algorithm in [ChecksumAlgorithm::CRC32C, ChecksumAlgorithm::SHA256] {
            let mut concat = compute_digest(algorithm, &data[..part_size]);
            concat.extend(compute_digest(algorithm, &data[part_size..]));
            let expected = format!("{}-2", compute_checksum(algorithm, &concat));
            let got =
                compute_multipart_digest(&data, part_size, algorithm, ChecksumType::Composite)
                    .unwrap();
            assert_eq!(got, expected, "{algorithm}");
        }
    }

    #[test]
    fn short_last_part() {
        let data = buffer(11);
        let c = MultipartChecksum::compute(&data, 5, ChecksumAlgorithm::SHA1, ChecksumType::Composite)
            .unwrap();
        assert_eq!(c.part_count(), 3);
        assert_eq!(
            c.part_base64(3).unwrap(),
            compute_checksum(ChecksumAlgorithm::SHA1, &data[10..])
        );
        assert!(c.display_form().ends_with("-3"));
    }

    #[test]
    fn empty_buffer_is_one_empty_part() {
        for algorithm in ChecksumAlgorithm::ALL {
            let c = MultipartChecksum::compute(&[], 1024, algorithm, ChecksumType::Composite)
                .unwrap();
            assert_eq!(c.part_count(), 1);
            assert_eq!(c.display_form(), compute_checksum(algorithm, &[]));
        }
        // zero part size is acceptable for an empty buffer
        assert!(compute_multipart_digest(&[], 0, ChecksumAlgorithm::CRC32, ChecksumType::Composite).is_ok());
    }

    #[test]
    fn zero_part_size_rejected() {
        let res = compute_multipart_digest(
            b"abc",
            0,
            ChecksumAlgorithm::CRC32,
            ChecksumType::Composite,
        );
        assert!(matches!(res, Err(Error::InvalidComposerInput(_))));
    }

    #[test]
    fn full_object_ignores_part_size() {
        let data = buffer(10_000);
        let got = compute_multipart_digest(
            &data,
            1000,
            ChecksumAlgorithm::CRC64NVME,
            ChecksumType::FullObject,
        )
        .unwrap();
        assert_eq!(got, compute_checksum(ChecksumAlgorithm::CRC64NVME, &data));
    }

    #[test]
    fn part_checksum_lookup() {
        let data = buffer(12);
        assert_eq!(
            part_checksum(&data, 5, 2, ChecksumAlgorithm::CRC32).unwrap(),
            compute_checksum(ChecksumAlgorithm::CRC32, &data[5..10])
        );
        assert_eq!(
            part_checksum(&data, 5, 3, ChecksumAlgorithm::CRC32).unwrap(),
            compute_checksum(ChecksumAlgorithm::CRC32, &data[10..])
        );
        assert!(part_checksum(&data, 5, 4, ChecksumAlgorithm::CRC32).is_err());
        assert!(part_checksum(&data, 5, 0, ChecksumAlgorithm::CRC32).is_err());
    }

    quickcheck! {
        fn single_part_equals_plain_hash(data: Vec<u8>, extra: u8) -> bool {
            let part_size = data.len().max(1) + extra as usize;
            ChecksumAlgorithm::ALL.iter().all(|&algorithm| {
                compute_multipart_digest(&data, part_size, algorithm, ChecksumType::Composite)
                    .unwrap()
                    == compute_checksum(algorithm, &data)
            })
        }

        fn composer_is_deterministic(data: Vec<u8>, part_size: u8) -> TestResult {
            if part_size == 0 {
                return TestResult::discard();
            }
            let part_size = part_size as usize;
            TestResult::from_bool(ChecksumAlgorithm::ALL.iter().all(|&algorithm| {
                let a = compute_multipart_digest(&data, part_size, algorithm, ChecksumType::Composite);
                let b = compute_multipart_digest(&data, part_size, algorithm, ChecksumType::Composite);
                a.unwrap() == b.unwrap()
            }))
        }
    }
}
