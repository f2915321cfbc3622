// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use super::StringHasher;

// 32-bit FNV-1a parameters.
const OFFSET_BASIS: u32 = 2166136261;
const PRIME: u32 = 16777619;

/// Computes the 32-bit FNV-1a hash of `s`, one Unicode scalar value at a time.
///
/// Each character's code point is XORed into the state, which is then multiplied by the FNV
/// prime modulo 2^32. For ASCII input this is identical to byte-wise FNV-1a.
///
/// # Examples
///
/// ```
/// use bloomset::hash::fnv1a_32;
///
/// assert_eq!(fnv1a_32(""), 0x811c9dc5);
/// assert_eq!(fnv1a_32("foobar"), 0xbf9cf968);
/// ```
pub const fn fnv1a_32(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut hash = OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        let (code_point, width) = decode_utf8(bytes, i);
        hash ^= code_point;
        hash = hash.wrapping_mul(PRIME);
        i += width;
    }
    hash
}

/// Decodes the scalar value starting at `bytes[i]`, returning it with its encoded width.
///
/// `bytes` always comes from a `&str`, so the sequence is well-formed UTF-8.
const fn decode_utf8(bytes: &[u8], i: usize) -> (u32, usize) {
    let b0 = bytes[i] as u32;
    if b0 < 0x80 {
        (b0, 1)
    } else if b0 < 0xE0 {
        (((b0 & 0x1F) << 6) | (bytes[i + 1] as u32 & 0x3F), 2)
    } else if b0 < 0xF0 {
        (
            ((b0 & 0x0F) << 12)
                | ((bytes[i + 1] as u32 & 0x3F) << 6)
                | (bytes[i + 2] as u32 & 0x3F),
            3,
        )
    } else {
        (
            ((b0 & 0x07) << 18)
                | ((bytes[i + 1] as u32 & 0x3F) << 12)
                | ((bytes[i + 2] as u32 & 0x3F) << 6)
                | (bytes[i + 3] as u32 & 0x3F),
            4,
        )
    }
}

/// The default hash strategy: 32-bit FNV-1a over code points.
///
/// FNV-1a is unseeded, so hashes are stable across processes and platforms.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fnv1a32;

impl StringHasher for Fnv1a32 {
    #[inline]
    fn hash_str(&self, s: &str) -> u32 {
        fnv1a_32(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The shift-and-add form of the FNV prime multiplication.
    fn fnv1a_32_shift_add(s: &str) -> u32 {
        let mut hash = OFFSET_BASIS;
        for c in s.chars() {
            hash ^= c as u32;
            hash = hash
                .wrapping_add(hash << 1)
                .wrapping_add(hash << 4)
                .wrapping_add(hash << 7)
                .wrapping_add(hash << 8)
                .wrapping_add(hash << 24);
        }
        hash
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(fnv1a_32(""), 0x811c9dc5);
        assert_eq!(fnv1a_32("a"), 0xe40c292c);
        assert_eq!(fnv1a_32("foobar"), 0xbf9cf968);
        assert_eq!(fnv1a_32("abcdefgh"), 0x76daaa8d);
        assert_eq!(fnv1a_32("abcdefgh0"), 0xd73ac787);
    }

    #[test]
    fn test_multiply_matches_shift_and_add() {
        for s in ["", "a", "hello world", "abcdefgh3", "naïve", "日本語", "🦀 crab"] {
            assert_eq!(fnv1a_32(s), fnv1a_32_shift_add(s), "mismatch for {s:?}");
        }
    }

    #[test]
    fn test_hashes_code_points_not_bytes() {
        // 'é' is U+00E9: one XOR of 0xE9, not two of its UTF-8 bytes.
        let expected = (OFFSET_BASIS ^ 0xE9).wrapping_mul(PRIME);
        assert_eq!(fnv1a_32("é"), expected);
    }

    #[test]
    fn test_const_evaluation() {
        const HASH: u32 = fnv1a_32("a");
        assert_eq!(HASH, 0xe40c292c);
    }

    #[test]
    fn test_strategy_delegates_to_function() {
        assert_eq!(Fnv1a32.hash_str("bloom"), fnv1a_32("bloom"));
    }
}
