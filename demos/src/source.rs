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

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use rand::Rng;
use rand::SeedableRng;
use rand::distr::StandardUniform;
use rand::rngs::StdRng;
use rand_distr::Exp1;
use rand_distr::StandardNormal;

use crate::config::Distribution;

/// Lazily produced observations.
pub type Values = Box<dyn Iterator<Item = anyhow::Result<f64>>>;

/// Where observations come from. Every call to [`ValueSource::values`] starts
/// over from the first value.
#[derive(Debug, Clone)]
pub enum ValueSource {
    /// `samples` draws from `distribution` using a generator seeded with `seed`.
    Distribution {
        distribution: Distribution,
        samples: usize,
        seed: u64,
    },
    /// One value per line; blank lines are skipped.
    File(PathBuf),
}

impl ValueSource {
    /// Returns the number of values [`ValueSource::values`] yields.
    pub fn count(&self) -> anyhow::Result<usize> {
        match self {
            ValueSource::Distribution { samples, .. } => Ok(*samples),
            ValueSource::File(path) => {
                let mut count = 0;
                for line in open(path)?.lines() {
                    let line = line.with_context(|| format!("failed to read {}", path.display()))?;
                    if !line.trim().is_empty() {
                        count += 1;
                    }
                }
                Ok(count)
            }
        }
    }

    /// Returns a fresh iterator over the values.
    pub fn values(&self) -> anyhow::Result<Values> {
        match self {
            ValueSource::Distribution {
                distribution,
                samples,
                seed,
            } => Ok(Box::new(
                draws(*distribution, StdRng::seed_from_u64(*seed))
                    .take(*samples)
                    .map(Ok),
            )),
            ValueSource::File(path) => {
                let display = path.display().to_string();
                let values = open(path)?
                    .lines()
                    .enumerate()
                    .filter_map(move |(index, line)| {
                        let line_no = index + 1;
                        match line {
                            Err(err) => Some(Err(anyhow::Error::new(err)
                                .context(format!("failed to read {display}")))),
                            Ok(line) if line.trim().is_empty() => None,
                            Ok(line) => Some(parse_value(&line).with_context(|| {
                                format!("invalid value on line {line_no} of {display}")
                            })),
                        }
                    });
                Ok(Box::new(values))
            }
        }
    }
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn parse_value(line: &str) -> anyhow::Result<f64> {
    let trimmed = line.trim();
    trimmed
        .parse::<f64>()
        .with_context(|| format!("'{trimmed}' is not a floating point number"))
}

/// Endless draws from `distribution`.
fn draws<R: Rng>(distribution: Distribution, mut rng: R) -> impl Iterator<Item = f64> {
    std::iter::repeat_with(move || match distribution {
        Distribution::Uniform => rng.sample::<f64, _>(StandardUniform),
        Distribution::Normal => rng.sample::<f64, _>(StandardNormal),
        Distribution::Exponential => rng.sample::<f64, _>(Exp1),
    })
}
