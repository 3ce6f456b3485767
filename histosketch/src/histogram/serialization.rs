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

use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::codec::assert::ensure_preamble_longs_in;
use crate::codec::assert::ensure_serial_version_is;
use crate::codec::family::Family;
use crate::error::Error;
use crate::histogram::HistoSketch;

const PREAMBLE_LONGS_EMPTY: u8 = 2;
const PREAMBLE_LONGS_NON_EMPTY: u8 = 3;
const SERIAL_VERSION: u8 = 1;
const FLAGS_IS_EMPTY: u8 = 1 << 2;
const CENTROID_SIZE_BYTES: usize = 16;

impl HistoSketch {
    /// Serializes this sketch to bytes.
    ///
    /// The layout only depends on the capacity and the exported `(value, count)`
    /// pairs, see [`HistoSketch::iter`].
    pub fn serialize(&self) -> Vec<u8> {
        let preamble_longs = if self.is_empty() {
            PREAMBLE_LONGS_EMPTY
        } else {
            PREAMBLE_LONGS_NON_EMPTY
        };
        let size_bytes =
            preamble_longs as usize * 8 + self.num_centroids() * CENTROID_SIZE_BYTES;

        let mut bytes = SketchBytes::with_capacity(size_bytes);
        bytes.write_u8(preamble_longs);
        bytes.write_u8(SERIAL_VERSION);
        bytes.write_u8(Family::HISTOSKETCH.id);
        bytes.write_u8(if self.is_empty() { FLAGS_IS_EMPTY } else { 0 });
        bytes.write_u32_le(0); // unused
        bytes.write_u64_le(self.capacity() as u64);
        if self.is_empty() {
            return bytes.into_bytes();
        }

        bytes.write_u64_le(self.num_centroids() as u64);
        for (value, count) in self.iter() {
            bytes.write_f64_le(value);
            bytes.write_u64_le(count);
        }
        bytes.into_bytes()
    }

    /// Deserializes a sketch from bytes produced by [`HistoSketch::serialize`].
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidData`](crate::error::ErrorKind::InvalidData) if
    /// the bytes are truncated or followed by trailing bytes, belong to another
    /// sketch family or serial version, or describe centroids that violate the
    /// sketch invariants.
    pub fn deserialize(bytes: &[u8]) -> Result<HistoSketch, Error> {
        fn make_error(tag: &'static str) -> impl FnOnce(std::io::Error) -> Error {
            move |_| Error::insufficient_data(tag)
        }

        let mut cursor = SketchSlice::new(bytes);
        let preamble_longs = cursor.read_u8().map_err(make_error("preamble_longs"))?;
        let serial_version = cursor.read_u8().map_err(make_error("serial_version"))?;
        let family_id = cursor.read_u8().map_err(make_error("family_id"))?;
        let flags = cursor.read_u8().map_err(make_error("flags"))?;
        cursor.read_u32_le().map_err(make_error("unused"))?;

        Family::HISTOSKETCH.validate_id(family_id)?;
        ensure_serial_version_is(SERIAL_VERSION, serial_version)?;
        let is_empty = (flags & FLAGS_IS_EMPTY) != 0;
        let expected_preamble = if is_empty {
            PREAMBLE_LONGS_EMPTY
        } else {
            PREAMBLE_LONGS_NON_EMPTY
        };
        ensure_preamble_longs_in(&[expected_preamble], preamble_longs)?;

        let capacity = cursor.read_u64_le().map_err(make_error("capacity"))?;
        let capacity = usize::try_from(capacity).map_err(|_| {
            Error::deserial("capacity does not fit in memory").with_context("capacity", capacity)
        })?;

        let mut centroids = Vec::new();
        if !is_empty {
            let num_centroids = cursor.read_u64_le().map_err(make_error("num_centroids"))?;
            if num_centroids == 0 {
                return Err(Error::deserial("non-empty sketch without centroids"));
            }
            let available = (cursor.remaining() / CENTROID_SIZE_BYTES) as u64;
            if num_centroids > available {
                return Err(Error::insufficient_data("centroids")
                    .with_context("num_centroids", num_centroids));
            }
            centroids.reserve(num_centroids as usize);
            for _ in 0..num_centroids {
                let value = cursor.read_f64_le().map_err(make_error("value"))?;
                let count = cursor.read_u64_le().map_err(make_error("count"))?;
                centroids.push((value, count));
            }
        }

        if cursor.remaining() != 0 {
            return Err(Error::deserial("trailing bytes after sketch data")
                .with_context("remaining", cursor.remaining()));
        }

        HistoSketch::from_centroids(capacity, centroids)
            .map_err(|err| Error::deserial("malformed centroid data").set_source(err))
    }
}
