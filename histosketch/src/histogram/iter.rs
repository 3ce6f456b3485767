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

use std::slice;
use std::vec;

use crate::histogram::Centroid;
use crate::histogram::HistoSketch;

impl HistoSketch {
    /// Returns an iterator over the retained `(value, count)` pairs in ascending
    /// value order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            centroids: self.centroids().iter(),
        }
    }
}

/// Borrowing iterator over the `(value, count)` pairs of a [`HistoSketch`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    centroids: slice::Iter<'a, Centroid>,
}

impl Iterator for Iter<'_> {
    type Item = (f64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.centroids.next().map(|c| (c.value(), c.count()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.centroids.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a HistoSketch {
    type Item = (f64, u64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over the `(value, count)` pairs of a [`HistoSketch`].
#[derive(Debug)]
pub struct IntoIter {
    centroids: vec::IntoIter<Centroid>,
}

impl Iterator for IntoIter {
    type Item = (f64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.centroids.next().map(|c| (c.value(), c.count()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.centroids.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for HistoSketch {
    type Item = (f64, u64);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            centroids: self.into_centroids().into_iter(),
        }
    }
}
