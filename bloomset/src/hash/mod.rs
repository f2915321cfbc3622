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

//! String hash functions used to derive Bloom filter bit indices.
//!
//! A [`BloomFilter`](crate::bloom::BloomFilter) only asks its hash strategy for one thing: map a
//! string to a `u32`, deterministically and without side effects. The default strategy is
//! [`Fnv1a32`]; any `Fn(&str) -> u32` closure or function item can be plugged in instead.
//!
//! The false-positive guarantees of a filter depend on the uniformity of the supplied function.
//! That is the caller's responsibility; the filter never inspects the hash values beyond
//! reducing them modulo its capacity.

mod fnv;

pub use self::fnv::Fnv1a32;
pub use self::fnv::fnv1a_32;

/// A deterministic, pure function from a string to an unsigned 32-bit hash.
///
/// # Examples
///
/// ```
/// use bloomset::hash::Fnv1a32;
/// use bloomset::hash::StringHasher;
///
/// assert_eq!(Fnv1a32.hash_str("a"), 0xe40c292c);
///
/// // Closures implement the trait as well.
/// let len = |s: &str| s.len() as u32;
/// assert_eq!(len.hash_str("abc"), 3);
/// ```
pub trait StringHasher {
    /// Hashes `s` to a 32-bit value.
    fn hash_str(&self, s: &str) -> u32;
}

impl<F> StringHasher for F
where
    F: Fn(&str) -> u32,
{
    #[inline]
    fn hash_str(&self, s: &str) -> u32 {
        self(s)
    }
}
