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

//! Plots how closely a histogram sketch tracks the exact distribution of its
//! input.
//!
//! The approximate sketch and an exact one (capacity equal to the sample
//! count) are fed the same values; the sampled statistic of both is written
//! to a data file and a gnuplot script drawing the gap between them is
//! printed on stdout:
//!
//! ```text
//! graphs --dist normal --centroids 8 | gnuplot
//! graphs --datafile /tmp/my_data.txt --centroids 8 | gnuplot
//! graphs --dist exponential --centroids 8 --samples 50000 --bootstrap 1000 | gnuplot
//! ```

mod config;
mod plot;
mod source;

use std::io::Write;

use anyhow::Context;
use anyhow::bail;
use clap::Parser as _;
use histosketch::histogram::HistoSketch;
use tracing::debug;
use tracing::error;
use tracing::info;

use self::config::Cli;
use self::config::PlotKind;
use self::plot::Script;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("{:?}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if !(cli.step.is_finite() && cli.step > 0.0) {
        bail!("step must be a positive number, got {}", cli.step);
    }

    let seed = cli.resolved_seed();
    if cli.datafile.is_none() {
        info!(seed, "sampling {} values", cli.dist.name());
    }
    let source = cli.value_source(seed);
    let samples = source.count()?;
    if samples == 0 {
        bail!("no values to plot");
    }

    let centroids = cli.centroids as usize;
    let bootstrap = cli.bootstrap.min(samples);
    let mut exact = HistoSketch::new(samples);
    let mut values = source.values()?;

    let mut sketch = if bootstrap > 0 {
        let mut sample = Vec::with_capacity(bootstrap);
        for value in values.by_ref().take(bootstrap) {
            let value = value?;
            sample.push(value);
            exact.add(value);
        }
        let sketch = HistoSketch::from_sample(&sample, centroids);
        info!(bootstrap, "bootstrapped sketch: {sketch}");
        sketch
    } else {
        HistoSketch::new(centroids)
    };

    for value in values {
        let value = value?;
        sketch.add(value);
        exact.add(value);
    }
    debug!(
        total = sketch.total_count(),
        centroids = sketch.num_centroids(),
        "sketch populated"
    );

    let (begin, end) = match cli.plot {
        PlotKind::Quantile => (0.0, 1.0),
        PlotKind::Sum => match (sketch.min_value(), sketch.max_value()) {
            (Some(min), Some(max)) => (min, max),
            _ => bail!("no finite values to plot"),
        },
    };
    let stat = |s: &HistoSketch, x: f64| match cli.plot {
        PlotKind::Quantile => s.quantile(x).unwrap_or(f64::NAN),
        PlotKind::Sum => s.sum(x),
    };

    let points = plot::sample_points(begin, end, cli.step);
    plot::write_data(
        &cli.data_path,
        &points,
        |x| stat(&sketch, x),
        |x| stat(&exact, x),
    )?;
    info!(
        points = points.len(),
        "wrote plot data to {}",
        cli.data_path.display()
    );

    let title = match &cli.datafile {
        Some(path) => path.display().to_string(),
        None => format!("{} distribution, {} samples", cli.dist.name(), samples),
    };
    let script = Script {
        title,
        centroids,
        sketch_bytes: sketch.serialize().len(),
        stat: cli.plot.name(),
        key_top_left: cli.plot == PlotKind::Quantile,
        data_path: &cli.data_path,
        output: &cli.output,
    };
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    script
        .write(&mut stdout)
        .and_then(|()| stdout.flush())
        .context("failed to write gnuplot script")
}
