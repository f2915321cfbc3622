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

//! Prints the bit and hash counts the builder derives for a range of accuracy targets.

use bloomset::bloom::BloomFilterBuilder;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{:>12} {:>8} {:>12} {:>8} {:>12}", "max values", "fpp", "bits", "hashes", "bytes");
    for max_capacity in [1_000, 10_000, 100_000, 1_000_000] {
        for fpp in [0.1, 0.05, 0.01, 0.001] {
            let filter = BloomFilterBuilder::with_accuracy(max_capacity, fpp).build()?;
            println!(
                "{:>12} {:>8} {:>12} {:>8} {:>12}",
                max_capacity,
                fpp,
                filter.capacity(),
                filter.num_hashes(),
                filter.capacity().div_ceil(8)
            );
        }
    }

    Ok(())
}
