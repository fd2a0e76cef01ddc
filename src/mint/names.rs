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

//! Random bucket and object names drawn from a caller supplied RNG.

use rand::RngCore;

/// Length of every generated bucket and object name.
pub const NAME_LENGTH: usize = 60;

/// Prefix shared by all names generated by the harness.
pub const NAME_PREFIX: &str = "minio-mint-";

/// Lowercase letters and decimal digits.
pub const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Alphabet of older harness versions; lacks the digits 7 and 8.
pub const LEGACY_ALPHABET: &[u8; 34] = b"abcdefghijklmnopqrstuvwxyz01234569";

const INDEX_BITS: u32 = 6;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;
// 6-bit indices available in one 63-bit draw
const INDICES_PER_DRAW: u32 = 63 / INDEX_BITS;

/// Returns `prefix` followed by random symbols of [`ALPHABET`], `total_length` bytes in all.
///
/// # Panics
///
/// If `prefix` is longer than `total_length`.
pub fn rand_name<R: RngCore + ?Sized>(total_length: usize, rng: &mut R, prefix: &str) -> String {
    rand_name_with_alphabet(total_length, rng, prefix, ALPHABET)
}

/// Like [`rand_name`], drawing symbols from `alphabet` (at most 64 ASCII symbols).
pub fn rand_name_with_alphabet<R: RngCore + ?Sized>(
    total_length: usize,
    rng: &mut R,
    prefix: &str,
    alphabet: &[u8],
) -> String {
    assert!(
        prefix.len() <= total_length,
        "prefix '{prefix}' longer than {total_length}"
    );
    assert!(!alphabet.is_empty() && alphabet.len() as u64 <= INDEX_MASK + 1);

    let wanted = total_length - prefix.len();
    let mut name = String::with_capacity(total_length);
    name.push_str(prefix);

    let mut produced = 0;
    let mut cache = 0u64;
    let mut remain = 0;
    while produced < wanted {
        if remain == 0 {
            cache = rng.next_u64() >> 1;
            remain = INDICES_PER_DRAW;
        }
        let idx = (cache & INDEX_MASK) as usize;
        if idx < alphabet.len() {
            name.push(alphabet[idx] as char);
            produced += 1;
        }
        cache >>= INDEX_BITS;
        remain -= 1;
    }
    name
}

/// Random bucket name, valid as an S3 bucket name.
pub fn rand_bucket_name() -> String {
    rand_name(NAME_LENGTH, &mut rand::rng(), NAME_PREFIX)
}

/// Random object name.
pub fn rand_object_name() -> String {
    rand_name(NAME_LENGTH, &mut rand::rng(), "")
}
