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

use std::fmt::Display;

use super::BloomFilterBuilder;
use super::DEFAULT_CAPACITY;
use super::DEFAULT_NUM_HASHES;
use crate::error::Error;
use crate::hash::Fnv1a32;
use crate::hash::StringHasher;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (added values always return `true`)
/// - False positives bounded by the configured sizing
/// - Constant space usage
///
/// Each value is rendered through its [`Display`] implementation, and the k bit positions are
/// derived by hashing that text with the decimal round number appended (`"value0"`, `"value1"`,
/// ...). The filter is never resized, merged, or cleared.
///
/// Use [`BloomFilterBuilder`] to size a filter from expected cardinality and accuracy.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter<H = Fnv1a32> {
    /// String hash strategy shared by all k rounds
    pub(super) hasher: H,
    /// Number of hash rounds per value (k)
    pub(super) num_hashes: u32,
    /// Total number of bits in the filter (m)
    pub(super) capacity_bits: u64,
    /// Count of bits set to 1 (for statistics)
    pub(super) num_bits_set: u64,
    /// Bit array packed into u64 words
    /// Length = ceil(capacity_bits / 64)
    pub(super) bit_array: Box<[u64]>,
}

impl BloomFilter {
    /// Creates a filter with exactly `capacity` bits and `num_hashes` rounds, hashed with FNV-1a.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter) if
    /// either argument is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomset::bloom::BloomFilter;
    ///
    /// let filter = BloomFilter::new(1024, 3).unwrap();
    /// assert_eq!(filter.capacity(), 1024);
    /// assert_eq!(filter.num_hashes(), 3);
    ///
    /// assert!(BloomFilter::new(0, 3).is_err());
    /// ```
    pub fn new(capacity: u64, num_hashes: u32) -> Result<Self, Error> {
        BloomFilterBuilder::with_size(capacity, num_hashes).build()
    }

    /// Returns a builder for creating a Bloom filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomset::bloom::BloomFilter;
    ///
    /// // By accuracy
    /// let filter = BloomFilter::builder()
    ///     .max_capacity(1000)
    ///     .false_positive_rate(0.01)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.capacity(), 9586);
    ///
    /// // By size
    /// let filter = BloomFilter::builder().size(10_000).num_hashes(7).build().unwrap();
    /// assert_eq!(filter.num_hashes(), 7);
    /// ```
    pub fn builder() -> BloomFilterBuilder {
        BloomFilterBuilder::default()
    }
}

impl Default for BloomFilter {
    /// A filter of [`DEFAULT_CAPACITY`] bits and [`DEFAULT_NUM_HASHES`] rounds.
    fn default() -> Self {
        let num_words = DEFAULT_CAPACITY.div_ceil(64) as usize;
        BloomFilter {
            hasher: Fnv1a32,
            num_hashes: DEFAULT_NUM_HASHES,
            capacity_bits: DEFAULT_CAPACITY,
            num_bits_set: 0,
            bit_array: vec![0u64; num_words].into_boxed_slice(),
        }
    }
}

impl<H: StringHasher> BloomFilter<H> {
    /// Allocates an empty filter from already validated parameters.
    ///
    /// Fails instead of aborting when the bit array cannot be addressed or allocated.
    pub(super) fn with_parts(
        capacity_bits: u64,
        num_hashes: u32,
        hasher: H,
    ) -> Result<Self, Error> {
        debug_assert!(capacity_bits >= 1 && num_hashes >= 1);
        Ok(BloomFilter {
            hasher,
            num_hashes,
            capacity_bits,
            num_bits_set: 0,
            bit_array: allocate_bit_array(capacity_bits)?,
        })
    }

    // ========================================================================
    // Query Operations
    // ========================================================================

    /// Tests whether a value is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Value was **possibly** added (or false positive)
    /// - `false`: Value was **definitely not** added
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(10_000, 4).unwrap();
    /// filter.add("abcdefgh");
    ///
    /// assert!(filter.check("abcdefgh"));
    /// assert!(!filter.check("12345678"));
    /// ```
    pub fn check<T: Display + ?Sized>(&self, value: &T) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut key = SaltedKey::new(value);
        for round in 0..self.num_hashes {
            let bit_index = self.bit_index(key.salted(round));
            if !self.get_bit(bit_index) {
                return false;
            }
        }
        true
    }

    /// Tests and adds a value in a single operation.
    ///
    /// Returns whether the value was possibly already in the set before it was added.
    /// This renders and hashes the value once instead of twice.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::default();
    ///
    /// assert!(!filter.check_and_add("apple")); // First insertion
    /// assert!(filter.check_and_add("apple")); // Now it's in the set
    /// ```
    pub fn check_and_add<T: Display + ?Sized>(&mut self, value: &T) -> bool {
        let mut key = SaltedKey::new(value);
        let mut was_present = true;
        for round in 0..self.num_hashes {
            let bit_index = self.bit_index(key.salted(round));
            was_present &= !self.set_bit(bit_index);
        }
        was_present
    }

    // ========================================================================
    // Update Operations
    // ========================================================================

    /// Adds a value to the filter.
    ///
    /// After adding, `check(value)` will always return `true`. Adding the same value again
    /// changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::default();
    ///
    /// filter.add("apple");
    /// filter.add(&42_u64);
    /// filter.add(&'x');
    ///
    /// assert!(filter.check("apple"));
    /// assert!(filter.check("42")); // values are compared by their text
    /// ```
    pub fn add<T: Display + ?Sized>(&mut self, value: &T) {
        let mut key = SaltedKey::new(value);
        for round in 0..self.num_hashes {
            let bit_index = self.bit_index(key.salted(round));
            self.set_bit(bit_index);
        }
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns whether the filter is empty (no values added).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    ///
    /// Useful for monitoring filter saturation.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the total number of bits in the filter (m).
    pub fn capacity(&self) -> u64 {
        self.capacity_bits
    }

    /// Returns the number of hash rounds per value (k).
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Returns the hash strategy.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// Values near 0.5 indicate the filter is approaching saturation.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.capacity_bits as f64
    }

    /// Estimates the current false positive probability.
    ///
    /// Based on the formula: `load^k`, the chance that k independent, uniformly placed
    /// positions all land on set bits. The salted hashing scheme does not give independent
    /// positions, so with the default hash the observed rate can be higher.
    pub fn estimated_fpp(&self) -> f64 {
        let k = self.num_hashes as f64;
        self.load_factor().powf(k)
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Maps a salted key onto a bit position in `[0, capacity)`.
    fn bit_index(&self, salted: &str) -> u64 {
        u64::from(self.hasher.hash_str(salted)) % self.capacity_bits
    }

    /// Gets the value of a single bit.
    fn get_bit(&self, bit_index: u64) -> bool {
        let word_index = (bit_index / 64) as usize;
        let bit_offset = bit_index % 64;
        let mask = 1u64 << bit_offset;
        (self.bit_array[word_index] & mask) != 0
    }

    /// Sets a single bit and updates the count. Returns whether the bit was newly set.
    fn set_bit(&mut self, bit_index: u64) -> bool {
        let word_index = (bit_index / 64) as usize;
        let bit_offset = bit_index % 64;
        let mask = 1u64 << bit_offset;

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
            true
        } else {
            false
        }
    }
}

/// Allocates a zeroed bit array of `capacity_bits` bits, rounded up to whole words.
fn allocate_bit_array(capacity_bits: u64) -> Result<Box<[u64]>, Error> {
    let too_large = |reason: String| {
        Error::invalid_parameter("size", capacity_bits, "is too large to allocate")
            .with_context("reason", reason)
    };

    let num_words =
        usize::try_from(capacity_bits.div_ceil(64)).map_err(|err| too_large(err.to_string()))?;
    let mut words = Vec::new();
    words
        .try_reserve_exact(num_words)
        .map_err(|err| too_large(err.to_string()))?;
    words.resize(num_words, 0u64);
    Ok(words.into_boxed_slice())
}

/// Appends the decimal digits of `n` to `buf`.
fn push_decimal(buf: &mut String, mut n: u32) {
    let mut digits = [0u8; 10];
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    buf.extend(digits[start..].iter().map(|&d| char::from(d)));
}

/// The text of a value plus a reusable tail for the decimal round suffix.
struct SaltedKey {
    buf: String,
    base_len: usize,
}

impl SaltedKey {
    fn new<T: Display + ?Sized>(value: &T) -> Self {
        let buf = value.to_string();
        let base_len = buf.len();
        SaltedKey { buf, base_len }
    }

    /// Returns the value text with `round` appended in decimal.
    fn salted(&mut self, round: u32) -> &str {
        self.buf.truncate(self.base_len);
        push_decimal(&mut self.buf, round);
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::fnv1a_32;

    fn set_positions<H: StringHasher>(filter: &BloomFilter<H>) -> Vec<u64> {
        (0..filter.capacity())
            .filter(|&i| filter.get_bit(i))
            .collect()
    }

    #[test]
    fn test_salted_key_appends_round() {
        let mut key = SaltedKey::new("abc");
        assert_eq!(key.salted(0), "abc0");
        assert_eq!(key.salted(7), "abc7");
        assert_eq!(key.salted(12), "abc12");
        assert_eq!(key.salted(3), "abc3");
        assert_eq!(key.salted(u32::MAX), "abc4294967295");
        assert_eq!(key.salted(1_000_000), "abc1000000");
    }

    #[test]
    fn test_push_decimal_matches_to_string() {
        for n in [0, 9, 10, 99, 100, 4_096, 65_535, 999_999_999, 1_000_000_000, u32::MAX] {
            let mut buf = String::from("x");
            push_decimal(&mut buf, n);
            assert_eq!(buf, format!("x{n}"));
        }
    }

    #[test]
    fn test_oversized_bit_array_is_an_error() {
        let err = allocate_bit_array(u64::MAX).unwrap_err();
        assert_eq!(err.context("parameter"), Some("size"));
        assert_eq!(err.context("value"), Some("18446744073709551615"));
        assert!(err.context("reason").is_some());

        assert_eq!(allocate_bit_array(1).unwrap().len(), 1);
        assert_eq!(allocate_bit_array(64).unwrap().len(), 1);
        assert_eq!(allocate_bit_array(65).unwrap().len(), 2);
    }

    #[test]
    fn test_add_sets_salted_fnv_positions() {
        let mut filter = BloomFilter::new(10_000, 4).unwrap();
        filter.add("abcdefgh");

        let expected: Vec<u64> = (0..4)
            .map(|i| u64::from(fnv1a_32(&format!("abcdefgh{i}"))) % 10_000)
            .collect();
        let mut sorted = expected.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1226, 3607, 5988, 8845]);
        assert_eq!(set_positions(&filter), sorted);
        assert_eq!(filter.bits_used(), 4);
    }

    #[test]
    fn test_capacity_not_multiple_of_64() {
        let mut filter = BloomFilter::new(100, 3).unwrap();
        assert_eq!(filter.bit_array.len(), 2);
        for i in 0..200 {
            filter.add(&i);
        }
        assert!(set_positions(&filter).iter().all(|&i| i < 100));
        for i in 0..200 {
            assert!(filter.check(&i));
        }
    }

    #[test]
    fn test_single_bit_filter() {
        let mut filter = BloomFilter::new(1, 1).unwrap();
        assert!(!filter.check("anything"));
        filter.add("x");
        assert!(filter.check("x"));
        assert!(filter.check("anything"));
        assert_eq!(filter.load_factor(), 1.0);
    }

    #[test]
    fn test_bits_are_monotone() {
        let mut filter = BloomFilter::new(512, 5).unwrap();
        let mut before = filter.bit_array.clone();
        for i in 0..300 {
            filter.add(&format!("value-{i}"));
            for (old, new) in before.iter().zip(filter.bit_array.iter()) {
                assert_eq!(old & !new, 0, "a bit was cleared");
            }
            before = filter.bit_array.clone();
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut filter = BloomFilter::default();
        filter.add("apple");
        let snapshot = filter.clone();
        filter.add("apple");
        assert_eq!(filter, snapshot);
    }

    #[test]
    fn test_check_and_add() {
        let mut filter = BloomFilter::default();
        assert!(!filter.check_and_add(&42_u64));
        assert!(filter.check_and_add(&42_u64));
        assert!(filter.check(&42_u64));
    }

    #[test]
    fn test_num_bits_set_matches_popcount() {
        let mut filter = BloomFilter::new(777, 6).unwrap();
        for i in 0..100 {
            filter.add(&i);
        }
        let popcount: u64 = filter
            .bit_array
            .iter()
            .map(|word| u64::from(word.count_ones()))
            .sum();
        assert_eq!(filter.bits_used(), popcount);
    }

    #[test]
    fn test_statistics() {
        let mut filter = BloomFilter::new(1000, 5).unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter.bits_used(), 0);
        assert_eq!(filter.load_factor(), 0.0);
        assert_eq!(filter.estimated_fpp(), 0.0);

        filter.add("test");
        assert!(!filter.is_empty());
        assert!(filter.bits_used() > 0);
        assert!(filter.load_factor() > 0.0);
        assert!(filter.estimated_fpp() > 0.0);
        assert_eq!(filter.estimated_fpp(), filter.load_factor().powf(5.0));
    }
}
