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

//! Fixed-capacity approximate histogram for streams of `f64` observations.
//!
//! The sketch keeps at most `K` centroids, each a `(value, count)` pair, in
//! ascending value order. Every new observation is inserted as a singleton
//! centroid; whenever that pushes the sketch over capacity, the two adjacent
//! centroids with the smallest gap between their values are merged into their
//! count-weighted mean (the leftmost pair wins a tie). Merging two sketches
//! concatenates their centroids and collapses closest pairs the same way.
//!
//! Queries use trapezoidal interpolation: between two neighbouring centroids
//! the density is assumed to vary linearly from one count to the other.
//! [`HistoSketch::sum`] integrates that density up to a threshold and
//! [`HistoSketch::quantile`] inverts it by solving a quadratic.
//!
//! When a finite sample is known up front, [`HistoSketch::from_sample`] builds
//! the decomposition into `K` contiguous clusters with minimal total squared
//! error by dynamic programming.
//!
//! A sketch is a plain value with no interior mutability: share it across
//! threads behind a lock if it must be mutated concurrently.
//!
//! # References
//!
//! - Yael Ben-Haim, Elad Tom-Tov, "A Streaming Parallel Decision Tree
//!   Algorithm", JMLR 11 (2010).
//!
//! # Usage
//!
//! ```rust
//! # use histosketch::histogram::HistoSketch;
//! let mut sketch = HistoSketch::new(2);
//! sketch.add(1.0);
//! sketch.add(2.0);
//! sketch.add(3.0);
//! assert_eq!(sketch.iter().collect::<Vec<_>>(), vec![(1.5, 2), (3.0, 1)]);
//! assert_eq!(sketch.sum(3.0), 3.0);
//! assert_eq!(sketch.quantile(1.0), Some(3.0));
//! ```

mod centroid;
mod iter;
mod optimal;
mod query;
mod serialization;
mod sketch;

pub use self::centroid::Centroid;
pub use self::iter::IntoIter;
pub use self::iter::Iter;
pub use self::sketch::HistoSketch;
