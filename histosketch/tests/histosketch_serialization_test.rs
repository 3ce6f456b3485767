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

use std::error::Error as _;

use googletest::assert_that;
use googletest::prelude::contains_substring;
use histosketch::error::ErrorKind;
use histosketch::histogram::HistoSketch;

#[test]
fn test_empty() {
    let sketch = HistoSketch::new(10);
    let bytes = sketch.serialize();
    assert_eq!(bytes.len(), 16);

    let deserialized = HistoSketch::deserialize(&bytes).unwrap();
    assert!(deserialized.is_empty());
    assert_eq!(deserialized.capacity(), 10);
    assert_eq!(deserialized.total_count(), 0);
}

#[test]
fn test_single_value() {
    let mut sketch = HistoSketch::new(8);
    sketch.add(123.0);

    let bytes = sketch.serialize();
    assert_eq!(bytes.len(), 40);

    let deserialized = HistoSketch::deserialize(&bytes).unwrap();
    assert_eq!(deserialized.capacity(), 8);
    assert_eq!(deserialized.total_count(), 1);
    assert_eq!(deserialized.min_value(), Some(123.0));
    assert_eq!(deserialized.max_value(), Some(123.0));
}

#[test]
fn test_many_values() {
    let mut sketch = HistoSketch::new(50);
    for i in 0..1000 {
        sketch.add(((i * 7919) % 1000) as f64);
    }

    let bytes = sketch.serialize();
    assert_eq!(bytes.len(), 24 + 50 * 16);

    let deserialized = HistoSketch::deserialize(&bytes).unwrap();
    assert_eq!(deserialized, sketch);
    assert_eq!(deserialized.sum(500.0), sketch.sum(500.0));
    assert_eq!(deserialized.quantile(0.5), sketch.quantile(0.5));
    assert_eq!(deserialized.serialize(), bytes);
}

#[test]
fn test_truncated_bytes() {
    let mut sketch = HistoSketch::new(4);
    sketch.add(1.0);
    sketch.add(2.0);
    let bytes = sketch.serialize();

    for len in [0, 3, 8, 20, bytes.len() - 1] {
        let err = HistoSketch::deserialize(&bytes[..len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_that!(err.message(), contains_substring("insufficient data"));
    }
}

#[test]
fn test_wrong_family() {
    let mut bytes = HistoSketch::new(4).serialize();
    bytes[2] = 15;
    let err = HistoSketch::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("invalid family"));
}

#[test]
fn test_wrong_serial_version() {
    let mut bytes = HistoSketch::new(4).serialize();
    bytes[1] = 9;
    let err = HistoSketch::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("unsupported serial version"));
}

#[test]
fn test_wrong_preamble_longs() {
    let mut bytes = HistoSketch::new(4).serialize();
    bytes[0] = 3;
    let err = HistoSketch::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("invalid preamble longs"));
}

#[test]
fn test_out_of_order_centroids() {
    let mut sketch = HistoSketch::new(4);
    sketch.add(1.0);
    sketch.add(2.0);
    let mut bytes = sketch.serialize();
    bytes[24..32].copy_from_slice(&5.0f64.to_le_bytes());

    let err = HistoSketch::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert_that!(err.message(), contains_substring("malformed centroid data"));
    assert!(err.source().is_some());
}

#[test]
fn test_more_centroids_than_capacity() {
    let mut sketch = HistoSketch::new(4);
    sketch.add(1.0);
    sketch.add(2.0);
    let mut bytes = sketch.serialize();
    bytes[8..16].copy_from_slice(&1u64.to_le_bytes());

    let err = HistoSketch::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("malformed centroid data"));
}

#[test]
fn test_zero_capacity() {
    let mut bytes = HistoSketch::new(4).serialize();
    bytes[8..16].copy_from_slice(&0u64.to_le_bytes());
    let err = HistoSketch::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn test_total_count_overflow() {
    let mut sketch = HistoSketch::new(4);
    sketch.add(1.0);
    sketch.add(2.0);
    let mut bytes = sketch.serialize();
    bytes[32..40].copy_from_slice(&u64::MAX.to_le_bytes());
    bytes[48..56].copy_from_slice(&u64::MAX.to_le_bytes());

    let err = HistoSketch::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert_that!(err.message(), contains_substring("malformed centroid data"));
    let source = err.source().unwrap().to_string();
    assert_that!(source, contains_substring("total count overflows u64"));
}

#[test]
fn test_infinite_centroid_value() {
    let mut sketch = HistoSketch::new(4);
    sketch.add(1.0);
    sketch.add(2.0);
    let mut bytes = sketch.serialize();
    bytes[40..48].copy_from_slice(&f64::INFINITY.to_le_bytes());

    let err = HistoSketch::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert_that!(err.message(), contains_substring("malformed centroid data"));
}

#[test]
fn test_trailing_bytes() {
    for sketch in [HistoSketch::new(4), HistoSketch::from_sample(&[1.0, 2.0], 4)] {
        let mut bytes = sketch.serialize();
        bytes.push(0);
        let err = HistoSketch::deserialize(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_that!(err.message(), contains_substring("trailing bytes"));
    }
}
