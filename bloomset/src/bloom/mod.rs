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

//! Bloom filter for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! a value is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If a value was added, `check()` will always return `true`
//! - **Possible false positives**: `check()` may return `true` for values never added
//! - **Fixed size**: the filter is never resized, merged, or cleared
//! - **Text keys**: values are identified by their [`Display`](std::fmt::Display) output
//!
//! # Usage
//!
//! ```rust
//! use bloomset::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::builder()
//!     .size(10_000)
//!     .num_hashes(4)
//!     .build()
//!     .unwrap();
//!
//! filter.add("abcdefgh");
//!
//! assert!(filter.check("abcdefgh")); // true - definitely added
//! assert!(!filter.check("12345678")); // false - never added
//!
//! println!("Capacity: {} bits", filter.capacity());
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//! ```
//!
//! # Creating Filters
//!
//! ## By Accuracy
//!
//! Derives the bit count and hash count from the expected number of values and the target
//! false positive rate:
//!
//! ```rust
//! # use bloomset::bloom::BloomFilterBuilder;
//! let filter = BloomFilterBuilder::with_accuracy(
//!     10_000, // Expected max values
//!     0.05,   // Target false positive probability (5%)
//! )
//! .build()
//! .unwrap();
//! assert_eq!(filter.capacity(), 62_353);
//! assert_eq!(filter.num_hashes(), 4);
//! ```
//!
//! ## By Size
//!
//! ```rust
//! # use bloomset::bloom::BloomFilter;
//! let filter = BloomFilter::new(95_851, 7).unwrap();
//! ```
//!
//! ## Defaults
//!
//! [`BloomFilter::default()`] has [`DEFAULT_CAPACITY`] bits and [`DEFAULT_NUM_HASHES`] rounds.
//!
//! # Implementation Details
//!
//! - Hashes with 32-bit FNV-1a by default; see [`crate::hash`] for plugging in another function
//! - Derives the k positions by hashing the value's text with the decimal round number
//!   appended (`"v0"`, `"v1"`, ...), each reduced modulo the bit count
//! - Bits packed in `u64` words
//!
//! The round-suffix scheme is kept for compatibility with existing bit layouts. Its positions
//! are far from independent: the suffixes differ only in the final characters, so measured
//! false positive rates can sit well above the figure the sizing formulas target.
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"

mod builder;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::sketch::BloomFilter;

/// Bit count used when neither a size nor an accuracy target is given.
pub const DEFAULT_CAPACITY: u64 = 10_000;

/// Hash count used when neither a hash count nor an accuracy target is given.
pub const DEFAULT_NUM_HASHES: u32 = 4;
