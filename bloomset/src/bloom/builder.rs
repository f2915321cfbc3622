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

use std::f64::consts::LN_2;

use super::BloomFilter;
use super::DEFAULT_CAPACITY;
use super::DEFAULT_NUM_HASHES;
use crate::error::Error;
use crate::hash::Fnv1a32;
use crate::hash::StringHasher;

/// Builder for creating [`BloomFilter`] instances.
///
/// Every setting is optional. On [`build()`](Self::build) the settings are validated, then the
/// filter's capacity (m) and hash count (k) are resolved by the first rule that applies:
///
/// 1. `size` and `num_hashes` are both set: they are used as given.
/// 2. `size` and `max_capacity` are set: m = `size`, k is the optimal count for m bits and
///    `max_capacity` values.
/// 3. `max_capacity` and `false_positive_rate` are set: m and k are both derived.
/// 4. Otherwise m = `size` or [`DEFAULT_CAPACITY`], and k = `num_hashes` or
///    [`DEFAULT_NUM_HASHES`].
///
/// Settings that the winning rule does not use are still validated, then ignored.
///
/// # Examples
///
/// ```
/// use bloomset::bloom::BloomFilterBuilder;
///
/// let filter = BloomFilterBuilder::new()
///     .max_capacity(10_000)
///     .false_positive_rate(0.05)
///     .build()
///     .unwrap();
/// assert_eq!(filter.capacity(), 62_353);
/// assert_eq!(filter.num_hashes(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder<H = Fnv1a32> {
    size: Option<u64>,
    num_hashes: Option<u32>,
    max_capacity: Option<u64>,
    false_positive_rate: Option<f64>,
    hasher: H,
}

impl Default for BloomFilterBuilder {
    fn default() -> Self {
        BloomFilterBuilder {
            size: None,
            num_hashes: None,
            max_capacity: None,
            false_positive_rate: None,
            hasher: Fnv1a32,
        }
    }
}

impl BloomFilterBuilder {
    /// Creates a builder with nothing set; building it yields the default sizing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder that sizes the filter for a target accuracy.
    ///
    /// # Arguments
    ///
    /// - `max_capacity`: Maximum expected number of distinct values (n)
    /// - `false_positive_rate`: Target false positive probability (e.g., 0.01 for 1%)
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilterBuilder;
    /// // Optimal for 1,000 values with 1% FPP
    /// let filter = BloomFilterBuilder::with_accuracy(1_000, 0.01).build().unwrap();
    /// assert_eq!(filter.capacity(), 9586);
    /// assert_eq!(filter.num_hashes(), 7);
    /// ```
    pub fn with_accuracy(max_capacity: u64, false_positive_rate: f64) -> Self {
        Self::new()
            .max_capacity(max_capacity)
            .false_positive_rate(false_positive_rate)
    }

    /// Creates a builder with manual size specification.
    ///
    /// # Arguments
    ///
    /// - `size`: Total number of bits in the filter (m)
    /// - `num_hashes`: Number of hash rounds per value (k)
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(10_000, 7).build().unwrap();
    /// assert_eq!(filter.capacity(), 10_000);
    /// ```
    pub fn with_size(size: u64, num_hashes: u32) -> Self {
        Self::new().size(size).num_hashes(num_hashes)
    }

    /// Suggests the optimal number of bits given max values and target FPP.
    ///
    /// Formula: `m = ceil(-n * ln(p) / (ln(2)^2))`
    /// where n = max_capacity, p = false_positive_rate
    ///
    /// The result is at least 1, so `p = 1` yields a single-bit filter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilterBuilder;
    /// assert_eq!(BloomFilterBuilder::optimal_num_bits(10_000, 0.05), 62_353);
    /// assert_eq!(BloomFilterBuilder::optimal_num_bits(1_000, 0.01), 9_586);
    /// ```
    pub fn optimal_num_bits(max_capacity: u64, false_positive_rate: f64) -> u64 {
        let n = max_capacity as f64;
        let p = false_positive_rate;
        let ln2_squared = LN_2 * LN_2;

        let bits = (-n * p.ln() / ln2_squared).ceil();

        (bits as u64).max(1)
    }

    /// Suggests the optimal number of hash rounds given bit count and max values.
    ///
    /// Formula: `k = round((m / n) * ln(2))`
    /// where m = num_bits, n = max_capacity
    ///
    /// The result is at least 1.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilterBuilder;
    /// assert_eq!(BloomFilterBuilder::optimal_num_hashes(100_000, 10_000), 7); // k ≈ 6.93
    /// assert_eq!(BloomFilterBuilder::optimal_num_hashes(62_353, 10_000), 4); // k ≈ 4.32
    /// ```
    pub fn optimal_num_hashes(num_bits: u64, max_capacity: u64) -> u32 {
        let m = num_bits as f64;
        let n = max_capacity as f64;

        let k = (m / n * LN_2).round();

        (k as u32).max(1)
    }
}

impl<H> BloomFilterBuilder<H> {
    /// Sets the number of bits in the filter (m).
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the number of hash rounds per value (k).
    pub fn num_hashes(mut self, num_hashes: u32) -> Self {
        self.num_hashes = Some(num_hashes);
        self
    }

    /// Sets the expected maximum number of distinct values (n).
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Sets the target false positive probability (p), in `(0, 1]`.
    pub fn false_positive_rate(mut self, false_positive_rate: f64) -> Self {
        self.false_positive_rate = Some(false_positive_rate);
        self
    }

    /// Replaces the hash strategy (default: [`Fnv1a32`]).
    ///
    /// Any `Fn(&str) -> u32` works. The filter's accuracy depends on how uniformly the
    /// function spreads its output.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(64, 2)
    ///     .hash_function(|s: &str| s.bytes().map(u32::from).sum::<u32>())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.num_hashes(), 2);
    /// ```
    pub fn hash_function<H2: StringHasher>(self, hasher: H2) -> BloomFilterBuilder<H2> {
        BloomFilterBuilder {
            size: self.size,
            num_hashes: self.num_hashes,
            max_capacity: self.max_capacity,
            false_positive_rate: self.false_positive_rate,
            hasher,
        }
    }

    /// Validates the settings, resolves m and k, and allocates the filter.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter),
    /// naming the offending field in the `parameter` context, on the first of these checks to
    /// fail:
    /// - `size` is 0
    /// - `num_hashes` is 0
    /// - `max_capacity` is 0
    /// - `false_positive_rate` is not in `(0, 1]`
    ///
    /// The same kind, naming `size`, is returned when the resolved bit array cannot be
    /// allocated.
    pub fn build(self) -> Result<BloomFilter<H>, Error>
    where
        H: StringHasher,
    {
        self.validate()?;

        let (capacity, num_hashes) = self.resolve();
        BloomFilter::with_parts(capacity, num_hashes, self.hasher).inspect_err(|err| {
            tracing::debug!(error = %err, "failed to allocate bloom filter");
        })
    }

    fn validate(&self) -> Result<(), Error> {
        const POSITIVE: &str = "must be greater than 0";

        let error = if self.size == Some(0) {
            Some(Error::invalid_parameter("size", 0, POSITIVE))
        } else if self.num_hashes == Some(0) {
            Some(Error::invalid_parameter("num_hashes", 0, POSITIVE))
        } else if self.max_capacity == Some(0) {
            Some(Error::invalid_parameter("max_capacity", 0, POSITIVE))
        } else {
            match self.false_positive_rate {
                // NaN fails both comparisons.
                Some(p) if !(p > 0.0 && p <= 1.0) => Some(Error::invalid_parameter(
                    "false_positive_rate",
                    p,
                    "must be in (0, 1]",
                )),
                _ => None,
            }
        };

        match error {
            Some(err) => {
                tracing::debug!(error = %err, "rejected bloom filter parameters");
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Applies the resolution rules to validated settings.
    fn resolve(&self) -> (u64, u32) {
        let (rule, capacity, num_hashes) = match (
            self.size,
            self.num_hashes,
            self.max_capacity,
            self.false_positive_rate,
        ) {
            (Some(size), Some(num_hashes), _, _) => ("explicit", size, num_hashes),
            (Some(size), None, Some(n), _) => (
                "size_and_max_capacity",
                size,
                BloomFilterBuilder::optimal_num_hashes(size, n),
            ),
            (_, _, Some(n), Some(p)) => {
                let capacity = BloomFilterBuilder::optimal_num_bits(n, p);
                (
                    "accuracy",
                    capacity,
                    BloomFilterBuilder::optimal_num_hashes(capacity, n),
                )
            }
            (size, num_hashes, _, _) => (
                "defaults",
                size.unwrap_or(DEFAULT_CAPACITY),
                num_hashes.unwrap_or(DEFAULT_NUM_HASHES),
            ),
        };

        tracing::debug!(rule, capacity, num_hashes, "resolved bloom filter parameters");
        (capacity, num_hashes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn resolved<H: StringHasher>(builder: BloomFilterBuilder<H>) -> (u64, u32) {
        let filter = builder.build().unwrap();
        (filter.capacity(), filter.num_hashes())
    }

    #[test]
    fn test_explicit_size_and_hashes_win() {
        let builder = BloomFilterBuilder::new()
            .size(100_000)
            .num_hashes(4)
            .max_capacity(10_000)
            .false_positive_rate(0.05);
        assert_eq!(resolved(builder), (100_000, 4));
    }

    #[test]
    fn test_size_and_max_capacity() {
        let builder = BloomFilterBuilder::new().max_capacity(10_000).size(100_000);
        assert_eq!(resolved(builder), (100_000, 7));

        // The rate is ignored once size and max_capacity are known.
        let builder = BloomFilterBuilder::new()
            .max_capacity(10_000)
            .size(100_000)
            .false_positive_rate(0.5);
        assert_eq!(resolved(builder), (100_000, 7));
    }

    #[test]
    fn test_accuracy() {
        let builder = BloomFilterBuilder::with_accuracy(10_000, 0.05);
        assert_eq!(resolved(builder), (62_353, 4));

        // num_hashes alone does not override the derived count.
        let builder = BloomFilterBuilder::with_accuracy(10_000, 0.05).num_hashes(9);
        assert_eq!(resolved(builder), (62_353, 4));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(resolved(BloomFilterBuilder::new()), (10_000, 4));
        assert_eq!(resolved(BloomFilterBuilder::new().size(100_000)), (100_000, 4));
        assert_eq!(resolved(BloomFilterBuilder::new().num_hashes(4)), (10_000, 4));
        assert_eq!(resolved(BloomFilterBuilder::new().num_hashes(9)), (10_000, 9));

        // A lone max_capacity or rate is not enough to derive anything.
        assert_eq!(resolved(BloomFilterBuilder::new().max_capacity(5)), (10_000, 4));
        assert_eq!(
            resolved(BloomFilterBuilder::new().false_positive_rate(0.01)),
            (10_000, 4)
        );
    }

    #[test]
    fn test_derived_values_are_at_least_one() {
        assert_eq!(resolved(BloomFilterBuilder::with_accuracy(10_000, 1.0)), (1, 1));
        assert_eq!(
            resolved(BloomFilterBuilder::new().size(1).max_capacity(10_000)),
            (1, 1)
        );
    }

    #[test]
    fn test_validation_order() {
        let err = BloomFilterBuilder::new()
            .size(0)
            .num_hashes(0)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(err.context("parameter"), Some("size"));

        let err = BloomFilterBuilder::new()
            .num_hashes(0)
            .max_capacity(0)
            .build()
            .unwrap_err();
        assert_eq!(err.context("parameter"), Some("num_hashes"));

        let err = BloomFilterBuilder::with_accuracy(0, 2.0).build().unwrap_err();
        assert_eq!(err.context("parameter"), Some("max_capacity"));
    }

    #[test]
    fn test_unused_settings_are_still_validated() {
        let err = BloomFilterBuilder::with_size(100, 3)
            .false_positive_rate(0.0)
            .build()
            .unwrap_err();
        assert_eq!(err.context("parameter"), Some("false_positive_rate"));
    }

    #[test]
    fn test_nan_rate_rejected() {
        let err = BloomFilterBuilder::with_accuracy(100, f64::NAN)
            .build()
            .unwrap_err();
        assert_eq!(err.context("parameter"), Some("false_positive_rate"));
    }

    #[test]
    fn test_custom_hash_function_is_used() {
        let mut filter = BloomFilterBuilder::with_size(64, 3)
            .hash_function(|_: &str| 5_u32)
            .build()
            .unwrap();
        filter.add("anything");
        assert_eq!(filter.bits_used(), 1);
        assert!(filter.check("something else"));
    }
}
