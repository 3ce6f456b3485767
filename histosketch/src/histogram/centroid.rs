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

use std::cmp::Ordering;

/// A single `(value, count)` pair summarizing a cluster of observations by its
/// mean and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    value: f64,
    count: u64,
}

impl Centroid {
    /// Creates a centroid.
    ///
    /// # Panics
    ///
    /// If `count` is zero.
    pub fn new(value: f64, count: u64) -> Self {
        assert!(count >= 1, "centroid count must be at least 1");
        Centroid { value, count }
    }

    /// Returns the representative (average) value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the number of observations folded into this centroid.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Folds `other` into this centroid, keeping the count-weighted mean.
    ///
    /// The count saturates at `u64::MAX`.
    pub(super) fn add(&mut self, other: Centroid) {
        let total_count = self.count.saturating_add(other.count);
        self.value += (other.count as f64) * (other.value - self.value) / (total_count as f64);
        self.count = total_count;
    }
}

pub(super) fn centroid_cmp(a: &Centroid, b: &Centroid) -> Ordering {
    match a.value.partial_cmp(&b.value) {
        Some(order) => order,
        None => unreachable!("NaN values should never be present in centroids"),
    }
}

/// Collapses the closest adjacent pair of `centroids` into one.
///
/// Gaps are compared as `|v[i+1] - v[i]|`; on equal gaps the leftmost pair wins.
/// Does nothing when fewer than two centroids are present.
pub(super) fn merge_closest_pair(centroids: &mut Vec<Centroid>) {
    if centroids.len() < 2 {
        return;
    }

    let mut best = 0;
    let mut best_gap = f64::INFINITY;
    for (i, pair) in centroids.windows(2).enumerate() {
        let gap = (pair[1].value - pair[0].value).abs();
        if gap < best_gap {
            best = i;
            best_gap = gap;
        }
    }

    let right = centroids.remove(best + 1);
    centroids[best].add(right);
}

/// Merges two value-sorted centroid runs into one sorted run.
///
/// On equal values the centroid from `left` comes first.
pub(super) fn merge_sorted(left: &[Centroid], right: &[Centroid]) -> Vec<Centroid> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if centroid_cmp(&right[j], &left[i]) == Ordering::Less {
            merged.push(right[j]);
            j += 1;
        } else {
            merged.push(left[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}
