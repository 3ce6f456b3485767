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

//! Optimal decomposition of a known sample into at most `k` centroids.
//!
//! The sorted sample is split into contiguous groups so that the total squared
//! distance from every point to the mean of its group is minimal. The split is
//! found by dynamic programming over `(points used, groups used)` in
//! `O(n^2 * k)` time and `O(n * k)` space, so this is meant for bootstrapping a
//! sketch from a bounded sample rather than for hot paths.

use crate::histogram::HistoSketch;
use crate::histogram::centroid::Centroid;

impl HistoSketch {
    /// Creates a sketch with capacity `k` holding the optimal `k`-centroid
    /// decomposition of `sample`.
    ///
    /// The sample does not need to be sorted. `NaN` and infinite values are
    /// ignored. When the sample has fewer than `k` points every point becomes
    /// its own centroid.
    ///
    /// # Panics
    ///
    /// If `k` is less than 1.
    ///
    /// # Examples
    ///
    /// ```
    /// # use histosketch::histogram::HistoSketch;
    /// let sketch = HistoSketch::from_sample(&[101.0, 1.0, 3.0, 100.0, 2.0, 102.0], 2);
    /// let centroids: Vec<_> = sketch.iter().collect();
    /// assert_eq!(centroids, vec![(2.0, 3), (101.0, 3)]);
    /// ```
    pub fn from_sample(sample: &[f64], k: usize) -> Self {
        assert!(k >= 1, "capacity must be at least 1");
        let mut sorted: Vec<f64> = sample.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);
        HistoSketch::from_parts(k, optimal_centroids(&sorted, k))
    }
}

/// Computes the optimal decomposition of an ascending `sorted` sample into
/// `min(k, sorted.len())` centroids.
pub(super) fn optimal_centroids(sorted: &[f64], k: usize) -> Vec<Centroid> {
    let n = sorted.len();
    let groups = k.min(n);
    if groups == 0 {
        return Vec::new();
    }

    let costs = IntervalCosts::new(sorted);
    let mut table = DecompositionTable::new(n, groups);
    table.set(0, 0, 0.0, 0);
    for j in 1..=groups {
        for i in j..=n {
            // the j-th group holds points a..i (zero-based, exclusive end)
            let mut best_cost = f64::INFINITY;
            let mut best_split = j - 1;
            for a in (j - 1)..i {
                let prefix = table.cost(a, j - 1);
                if !prefix.is_finite() {
                    continue;
                }
                let candidate = prefix + costs.cost(a, i);
                if candidate < best_cost {
                    best_cost = candidate;
                    best_split = a;
                }
            }
            table.set(i, j, best_cost, best_split);
        }
    }

    let mut bounds = Vec::with_capacity(groups);
    let mut end = n;
    for j in (1..=groups).rev() {
        let start = table.choice(end, j);
        bounds.push((start, end));
        end = start;
    }
    debug_assert_eq!(end, 0);

    bounds
        .into_iter()
        .rev()
        .map(|(start, end)| group_centroid(&sorted[start..end]))
        .collect()
}

fn group_centroid(group: &[f64]) -> Centroid {
    let (lo, hi) = (group[0], group[group.len() - 1]);
    let mean = group.iter().sum::<f64>() / group.len() as f64;
    // keep neighbouring groups ordered despite rounding
    Centroid::new(mean.clamp(lo, hi), group.len() as u64)
}

/// Prefix sums answering "sum of squared deviations from the mean" for any
/// contiguous run of the sample in O(1).
struct IntervalCosts {
    sums: Vec<f64>,
    squares: Vec<f64>,
}

impl IntervalCosts {
    fn new(sorted: &[f64]) -> Self {
        // costs are shift invariant; centring limits cancellation
        let origin = sorted[sorted.len() / 2];
        let mut sums = Vec::with_capacity(sorted.len() + 1);
        let mut squares = Vec::with_capacity(sorted.len() + 1);
        let (mut sum, mut square) = (0.0, 0.0);
        sums.push(sum);
        squares.push(square);
        for &v in sorted {
            let x = v - origin;
            sum += x;
            square += x * x;
            sums.push(sum);
            squares.push(square);
        }
        IntervalCosts { sums, squares }
    }

    /// Cost of the points `start..end`.
    fn cost(&self, start: usize, end: usize) -> f64 {
        let count = (end - start) as f64;
        let sum = self.sums[end] - self.sums[start];
        let square = self.squares[end] - self.squares[start];
        (square - sum * sum / count).max(0.0)
    }
}

/// Row-major `(points + 1) x (groups + 1)` table of best costs and the split
/// point that achieved them.
struct DecompositionTable {
    groups: usize,
    costs: Vec<f64>,
    choices: Vec<usize>,
}

impl DecompositionTable {
    fn new(points: usize, groups: usize) -> Self {
        let len = (points + 1) * (groups + 1);
        DecompositionTable {
            groups,
            costs: vec![f64::INFINITY; len],
            choices: vec![0; len],
        }
    }

    fn index(&self, points: usize, groups: usize) -> usize {
        points * (self.groups + 1) + groups
    }

    fn cost(&self, points: usize, groups: usize) -> f64 {
        self.costs[self.index(points, groups)]
    }

    fn choice(&self, points: usize, groups: usize) -> usize {
        self.choices[self.index(points, groups)]
    }

    fn set(&mut self, points: usize, groups: usize, cost: f64, choice: usize) {
        let index = self.index(points, groups);
        self.costs[index] = cost;
        self.choices[index] = choice;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_cost(sorted: &[f64], centroids: &[Centroid]) -> f64 {
        let mut start = 0;
        let mut cost = 0.0;
        for c in centroids {
            let end = start + c.count() as usize;
            let group = &sorted[start..end];
            let mean = group.iter().sum::<f64>() / group.len() as f64;
            cost += group.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
            start = end;
        }
        assert_eq!(start, sorted.len());
        cost
    }

    /// Tries every placement of `groups - 1` cut points.
    fn brute_force_cost(sorted: &[f64], groups: usize) -> f64 {
        fn search(sorted: &[f64], start: usize, groups: usize) -> f64 {
            let n = sorted.len();
            if groups == 1 {
                let group = &sorted[start..];
                let mean = group.iter().sum::<f64>() / group.len() as f64;
                return group.iter().map(|v| (v - mean) * (v - mean)).sum();
            }
            let mut best = f64::INFINITY;
            for end in (start + 1)..=(n - groups + 1) {
                let group = &sorted[start..end];
                let mean = group.iter().sum::<f64>() / group.len() as f64;
                let head: f64 = group.iter().map(|v| (v - mean) * (v - mean)).sum();
                best = best.min(head + search(sorted, end, groups - 1));
            }
            best
        }
        search(sorted, 0, groups)
    }

    #[test]
    fn test_two_obvious_clusters() {
        let centroids = optimal_centroids(&[1.0, 2.0, 3.0, 100.0, 101.0, 102.0], 2);
        assert_eq!(
            centroids,
            vec![Centroid::new(2.0, 3), Centroid::new(101.0, 3)]
        );
    }

    #[test]
    fn test_fewer_points_than_groups() {
        let centroids = optimal_centroids(&[-1.0, 4.0], 5);
        assert_eq!(
            centroids,
            vec![Centroid::new(-1.0, 1), Centroid::new(4.0, 1)]
        );
    }

    #[test]
    fn test_empty_sample() {
        assert!(optimal_centroids(&[], 3).is_empty());
    }

    #[test]
    fn test_single_group_is_mean() {
        let centroids = optimal_centroids(&[1.0, 2.0, 6.0], 1);
        assert_eq!(centroids, vec![Centroid::new(3.0, 3)]);
    }

    #[test]
    fn test_duplicates_keep_group_count() {
        let centroids = optimal_centroids(&[5.0, 5.0, 5.0], 2);
        assert_eq!(
            centroids,
            vec![Centroid::new(5.0, 1), Centroid::new(5.0, 2)]
        );
    }

    #[test]
    fn test_interval_costs() {
        let costs = IntervalCosts::new(&[1.0, 2.0, 3.0, 10.0]);
        assert_eq!(costs.cost(0, 1), 0.0);
        assert!((costs.cost(0, 3) - 2.0).abs() < 1e-12);
        assert!((costs.cost(2, 4) - 24.5).abs() < 1e-12);
    }

    #[test]
    fn test_matches_brute_force() {
        let samples: [&[f64]; 5] = [
            &[0.5, 0.7, 1.9, 2.0, 2.2, 7.5, 7.6, 9.0],
            &[1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0],
            &[-3.0, -2.5, -2.4, 0.0, 0.1, 0.2, 5.0, 5.0, 5.5],
            &[10.0, 10.0, 10.0, 10.0, 11.0, 30.0],
            &[0.13, 0.29, 0.31, 0.47, 0.52, 0.66, 0.78, 0.81, 0.97],
        ];
        for sample in samples {
            for k in 1..=sample.len() {
                let centroids = optimal_centroids(sample, k);
                assert_eq!(centroids.len(), k);
                let expected = brute_force_cost(sample, k);
                let actual = total_cost(sample, &centroids);
                assert!(
                    (actual - expected).abs() <= 1e-9 * expected.max(1.0),
                    "sample={sample:?} k={k}: expected cost {expected}, got {actual}"
                );
                assert!(centroids.windows(2).all(|w| w[0].value() <= w[1].value()));
            }
        }
    }
}
