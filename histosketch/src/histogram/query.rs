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

//! Trapezoidal sum and quantile queries.
//!
//! Between two neighbouring centroids the density is modelled as varying
//! linearly from one count to the other. Half of each centroid's count is
//! attributed to either side of its value, so the estimated count of
//! observations up to centroid `i` is the sum of the preceding counts plus
//! `c[i] / 2`.

use crate::histogram::HistoSketch;

impl HistoSketch {
    /// Returns the estimated number of observations less than or equal to `value`.
    ///
    /// Returns 0 for an empty sketch or when `value` is below the lowest
    /// centroid, and the total count when `value` is at or above the highest.
    ///
    /// When several neighbouring centroids share `value` (as
    /// [`HistoSketch::from_sample`] can produce), all but the last of them are
    /// counted in full and the last one contributes half of its count.
    ///
    /// # Panics
    ///
    /// If `value` is NaN.
    pub fn sum(&self, value: f64) -> f64 {
        assert!(!value.is_nan(), "value must not be NaN");
        let centroids = self.centroids();
        let (Some(first), Some(last)) = (centroids.first(), centroids.last()) else {
            return 0.0;
        };
        if value < first.value() {
            return 0.0;
        }
        if value >= last.value() {
            return self.total_count() as f64;
        }

        // first <= value < last, so a right neighbour always exists
        let i = centroids.partition_point(|c| c.value() <= value) - 1;
        let (left, right) = (centroids[i], centroids[i + 1]);
        let before: f64 = centroids[..i].iter().map(|c| c.count() as f64).sum();
        let left_count = left.count() as f64;

        let width = right.value() - left.value();
        if width <= 0.0 {
            return before + left_count / 2.0;
        }
        let t = (value - left.value()) / width;
        let mb = left_count + (right.count() as f64 - left_count) * t;
        before + left_count / 2.0 + (left_count + mb) / 2.0 * t
    }

    /// Returns the normalized rank of `value`, i.e. `sum(value) / total_count()`.
    ///
    /// Returns `None` if the sketch is empty.
    ///
    /// # Panics
    ///
    /// If `value` is NaN.
    pub fn rank(&self, value: f64) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.sum(value) / self.total_count() as f64)
    }

    /// Returns the approximate value below which a fraction `rank` of the
    /// observations fall. This is the inverse of [`HistoSketch::sum`].
    ///
    /// Returns `None` if the sketch is empty. `quantile(0.0)` is the lowest
    /// centroid value and `quantile(1.0)` the highest.
    ///
    /// # Panics
    ///
    /// If `rank` is not in `[0.0, 1.0]`.
    pub fn quantile(&self, rank: f64) -> Option<f64> {
        assert!((0.0..=1.0).contains(&rank), "rank must be in [0.0, 1.0]");
        let centroids = self.centroids();
        let first = centroids.first()?;
        let last = centroids.last()?;
        if rank == 0.0 {
            return Some(first.value());
        }
        if rank == 1.0 {
            return Some(last.value());
        }

        let target = rank * self.total_count() as f64;
        let mut cumulative = first.count() as f64 / 2.0;
        if target <= cumulative {
            return Some(first.value());
        }

        for pair in centroids.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let left_count = left.count() as f64;
            let right_count = right.count() as f64;
            let area = (left_count + right_count) / 2.0;
            if target < cumulative + area {
                let width = right.value() - left.value();
                if width <= 0.0 {
                    return Some(left.value());
                }
                let delta = solve_trapezoid(left_count, right_count, width, target - cumulative);
                return Some(left.value() + delta);
            }
            cumulative += area;
        }

        Some(last.value())
    }
}

/// Finds `delta` in `[0, width]` such that the trapezoid spanning `delta`,
/// whose height starts at `left_count` and moves linearly towards
/// `right_count` over `width`, has the given `area`.
///
/// The area is `left_count * delta / width + (right_count - left_count) * delta^2 / (2 * width^2)`,
/// so after scaling by `width` this solves `a * delta^2 + b * delta + c = 0`.
fn solve_trapezoid(left_count: f64, right_count: f64, width: f64, area: f64) -> f64 {
    let a = (right_count - left_count) / (2.0 * width);
    let b = left_count;
    let c = -area * width;

    let delta = if (a * width).abs() <= f64::EPSILON * b {
        -c / b
    } else {
        let discriminant = (b * b - 4.0 * a * c).max(0.0);
        // b > 0, so q < 0 and neither root suffers cancellation
        let q = -0.5 * (b + discriminant.sqrt());
        let near = c / q;
        let far = q / a;
        if (0.0..=width).contains(&near) || !(0.0..=width).contains(&far) {
            near
        } else {
            far
        }
    };
    delta.clamp(0.0, width)
}
