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

use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

use crate::source::ValueSource;

/// Compares a histogram sketch against the exact distribution of its input and
/// prints a gnuplot script rendering both.
///
/// Pipe the output to gnuplot to produce the image, e.g.
/// `graphs --dist normal --centroids 8 | gnuplot`.
#[derive(Parser, Debug)]
#[command(name = "graphs")]
pub struct Cli {
    /// Enable verbose output. (Specify twice for more verbosity.)
    #[arg(short = 'v', long, action = ArgAction::Count, default_value_t = 0)]
    verbose: u8,

    /// Distribution the samples are drawn from.
    #[arg(long, value_enum, default_value_t = Distribution::Uniform)]
    pub dist: Distribution,

    /// Statistic to plot.
    #[arg(long, value_enum, default_value_t = PlotKind::Quantile)]
    pub plot: PlotKind,

    /// Number of samples to add to the sketch. Also the size of the exact histogram.
    #[arg(long, default_value_t = 10_000)]
    pub samples: usize,

    /// Number of centroids in the sketch.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub centroids: u32,

    /// Step size of the resulting plot.
    #[arg(long, default_value_t = 0.01)]
    pub step: f64,

    /// Seed for the random number generator (0 derives one from the clock).
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// File containing one floating point value per line (overrides `--dist`).
    #[arg(long)]
    pub datafile: Option<PathBuf>,

    /// Bootstrap the sketch with an optimal centroid decomposition of this many
    /// leading samples.
    #[arg(long, default_value_t = 0)]
    pub bootstrap: usize,

    /// Where the plotted data points are written.
    #[arg(long, default_value = "/tmp/plot.dat")]
    pub data_path: PathBuf,

    /// Image file gnuplot should render to.
    #[arg(long, default_value = "/tmp/plot.png")]
    pub output: PathBuf,
}

impl Cli {
    /// Gets the configured log level based on the user-supplied verbosity level.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Returns the seed to use, deriving one from the clock when none was given.
    pub fn resolved_seed(&self) -> u64 {
        if self.seed != 0 {
            return self.seed;
        }
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        (nanos as u64) ^ (std::process::id() as u64)
    }

    /// Builds the value source described by the flags.
    pub fn value_source(&self, seed: u64) -> ValueSource {
        match &self.datafile {
            Some(path) => ValueSource::File(path.clone()),
            None => ValueSource::Distribution {
                distribution: self.dist,
                samples: self.samples,
                seed,
            },
        }
    }
}

/// Distributions available for synthetic samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Distribution {
    Uniform,
    Normal,
    Exponential,
}

impl Distribution {
    pub fn name(self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::Normal => "normal",
            Distribution::Exponential => "exponential",
        }
    }
}

/// Statistic drawn by the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlotKind {
    Quantile,
    Sum,
}

impl PlotKind {
    pub fn name(self) -> &'static str {
        match self {
            PlotKind::Quantile => "quantile",
            PlotKind::Sum => "sum",
        }
    }
}
