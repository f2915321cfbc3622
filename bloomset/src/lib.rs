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

//! # bloomset
//!
//! A Bloom filter that answers "might this value have been added?" in constant space. It never
//! reports a false negative, and its false positive rate is bounded by the sizing chosen at
//! construction.
//!
//! The crate is divided into:
//!
//! - [`bloom`]: the filter itself and the builder that resolves its size and hash count
//! - [`hash`]: the string hash functions used to place values in the filter
//! - [`error`]: the error returned when construction parameters are out of range
//!
//! Parameter resolution is logged through [`tracing`] at `debug` level.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bloom;
pub mod error;
pub mod hash;
