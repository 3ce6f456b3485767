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

use std::fmt;

use crate::error::Error;
use crate::histogram::centroid::Centroid;
use crate::histogram::centroid::merge_closest_pair;
use crate::histogram::centroid::merge_sorted;

/// Fixed-capacity histogram sketch built from value-ordered centroids.
///
/// See the [module documentation](super) for more details.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoSketch {
    capacity: usize,
    centroids: Vec<Centroid>,
    total_count: u64,
}

impl HistoSketch {
    /// Creates an empty sketch holding at most `capacity` centroids.
    ///
    /// # Panics
    ///
    /// If `capacity` is less than 1.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "capacity must be at least 1");
        HistoSketch {
            capacity,
            centroids: Vec::new(),
            total_count: 0,
        }
    }

    /// Rebuilds a sketch from an exported `(value, count)` sequence.
    ///
    /// This is the inverse of [`HistoSketch::iter`] and lets an external codec
    /// restore a sketch without access to its internals.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument)
    /// if `capacity` is zero, if more than `capacity` centroids are given, if
    /// the counts add up to more than `u64::MAX`, or if a centroid has a zero
    /// count, a non-finite value, or is out of order.
    pub fn from_centroids<I>(capacity: usize, centroids: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (f64, u64)>,
    {
        if capacity < 1 {
            return Err(Error::invalid_argument("capacity must be at least 1"));
        }

        let mut imported: Vec<Centroid> = Vec::new();
        let mut total_count = 0u64;
        for (index, (value, count)) in centroids.into_iter().enumerate() {
            if !value.is_finite() {
                return Err(Error::invalid_argument("centroid value must be finite")
                    .with_context("index", index)
                    .with_context("value", value));
            }
            if count == 0 {
                return Err(Error::invalid_argument("centroid count must be at least 1")
                    .with_context("index", index));
            }
            if let Some(prev) = imported.last() {
                if prev.value() > value {
                    return Err(Error::invalid_argument(
                        "centroids must be sorted by value",
                    )
                    .with_context("index", index)
                    .with_context("previous", prev.value())
                    .with_context("value", value));
                }
            }
            if imported.len() == capacity {
                return Err(Error::invalid_argument("too many centroids for capacity")
                    .with_context("capacity", capacity));
            }
            total_count = total_count.checked_add(count).ok_or_else(|| {
                Error::invalid_argument("total count overflows u64").with_context("index", index)
            })?;
            imported.push(Centroid::new(value, count));
        }

        Ok(HistoSketch {
            capacity,
            centroids: imported,
            total_count,
        })
    }

    /// Assembles a sketch from centroids already known to satisfy the invariants.
    pub(super) fn from_parts(capacity: usize, centroids: Vec<Centroid>) -> Self {
        debug_assert!(centroids.len() <= capacity);
        let total_count = centroids.iter().map(Centroid::count).sum();
        HistoSketch {
            capacity,
            centroids,
            total_count,
        }
    }

    /// Returns the maximum number of centroids this sketch retains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of centroids currently retained.
    pub fn num_centroids(&self) -> usize {
        self.centroids.len()
    }

    /// Returns true if the sketch has not seen any data.
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Returns the number of observations summarized by this sketch.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns the value of the lowest centroid.
    pub fn min_value(&self) -> Option<f64> {
        self.centroids.first().map(Centroid::value)
    }

    /// Returns the value of the highest centroid.
    pub fn max_value(&self) -> Option<f64> {
        self.centroids.last().map(Centroid::value)
    }

    /// Returns the retained centroids in ascending value order.
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    pub(super) fn into_centroids(self) -> Vec<Centroid> {
        self.centroids
    }

    /// Adds one observation (`NaN` and infinite values are ignored).
    pub fn add(&mut self, value: f64) {
        self.add_many(value, 1);
    }

    /// Adds `count` observations of the same value.
    ///
    /// Equivalent to calling [`HistoSketch::add`] `count` times, at the cost of a
    /// single insertion. `NaN` and infinite values and a zero `count` are
    /// ignored. Counts saturate at `u64::MAX`.
    pub fn add_many(&mut self, value: f64, count: u64) {
        if !value.is_finite() || count == 0 {
            return;
        }
        self.insert(Centroid::new(value, count));
        if self.centroids.len() > self.capacity {
            merge_closest_pair(&mut self.centroids);
        }
    }

    /// Merges another sketch into this one.
    ///
    /// `other` is left untouched; the capacity of `self` bounds the result.
    pub fn merge(&mut self, other: &HistoSketch) {
        if other.is_empty() {
            return;
        }
        self.centroids = merge_sorted(&self.centroids, &other.centroids);
        self.total_count = self.total_count.saturating_add(other.total_count);
        while self.centroids.len() > self.capacity {
            merge_closest_pair(&mut self.centroids);
        }
    }

    fn insert(&mut self, centroid: Centroid) {
        self.total_count = self.total_count.saturating_add(centroid.count());
        let index = self
            .centroids
            .partition_point(|c| c.value() < centroid.value());
        if index < self.centroids.len() && self.centroids[index].value() == centroid.value() {
            self.centroids[index].add(centroid);
        } else {
            self.centroids.insert(index, centroid);
        }
    }
}

impl fmt::Display for HistoSketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HistoSketch(capacity={}, total={}, centroids=[",
            self.capacity, self.total_count
        )?;
        for (i, c) in self.centroids.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", c.value(), c.count())?;
        }
        write!(f, "])")
    }
}
