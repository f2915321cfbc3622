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

//! Example demonstrating basic Bloom filter usage

use bloomset::bloom::BloomFilter;
use bloomset::bloom::BloomFilterBuilder;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Bloom Filter Example ===\n");

    // Example 1: Explicit size
    println!("1. Explicit size and hash count:");
    let mut filter = BloomFilter::builder().size(10_000).num_hashes(4).build()?;
    filter.add("abcdefgh");
    println!("   check(\"abcdefgh\"): {}", filter.check("abcdefgh"));
    println!("   check(\"12345678\"): {}", filter.check("12345678"));
    println!("   Bits used: {}", filter.bits_used());
    println!();

    // Example 2: Sized for accuracy
    println!("2. Sized for 10,000 values at 5% false positives:");
    let mut filter = BloomFilterBuilder::with_accuracy(10_000, 0.05).build()?;
    println!("   Capacity: {} bits", filter.capacity());
    println!("   Hashes: {}", filter.num_hashes());

    for i in 0..10_000 {
        filter.add(&format!("user:{i}"));
    }
    let false_positives = (0..10_000)
        .filter(|i| filter.check(&format!("guest:{i}")))
        .count();
    println!("   Load factor: {:.4}", filter.load_factor());
    println!("   Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
    println!(
        "   Observed FPP: {:.4}%",
        false_positives as f64 / 10_000.0 * 100.0
    );
    println!();

    // Example 3: Rejected parameters
    println!("3. Invalid parameters are rejected:");
    match BloomFilterBuilder::with_accuracy(10_000, 2.0).build() {
        Ok(_) => println!("   unexpectedly accepted"),
        Err(err) => println!("   {err}"),
    }

    Ok(())
}
