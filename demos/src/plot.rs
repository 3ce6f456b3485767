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
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

/// Returns `begin, begin + step, ...` up to but excluding `end`, followed by `end`.
pub fn sample_points(begin: f64, end: f64, step: f64) -> Vec<f64> {
    assert!(step > 0.0, "step must be positive");
    let mut points = Vec::new();
    let mut i = 0u64;
    loop {
        let x = begin + step * i as f64;
        if x >= end {
            break;
        }
        points.push(x);
        i += 1;
    }
    points.push(end);
    points
}

/// Writes one `x approx exact` row per point to `path`.
pub fn write_data<A, E>(path: &Path, points: &[f64], approx: A, exact: E) -> anyhow::Result<()>
where
    A: Fn(f64) -> f64,
    E: Fn(f64) -> f64,
{
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for &x in points {
        writeln!(writer, "{} {} {}", x, approx(x), exact(x))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Renders a byte count as KB below one megabyte and MB above.
pub fn format_size(bytes: usize) -> String {
    let bytes = bytes as f64;
    if bytes > 1024.0 * 1024.0 {
        format!("{:.1} MB", bytes / 1024.0 / 1024.0)
    } else {
        format!("{:.1} KB", bytes / 1024.0)
    }
}

/// Everything the gnuplot script needs to know about a run.
pub struct Script<'a> {
    /// First title line.
    pub title: String,
    pub centroids: usize,
    pub sketch_bytes: usize,
    /// Statistic name, used for the y label.
    pub stat: &'a str,
    /// Quantile plots put the legend top left, sum plots bottom right.
    pub key_top_left: bool,
    pub data_path: &'a Path,
    pub output: &'a Path,
}

impl Script<'_> {
    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let data = self.data_path.display();
        writeln!(w, "set term png")?;
        writeln!(w, "set output '{}'", self.output.display())?;
        writeln!(
            w,
            "set title \"{}\\nsketch with {} centroids (~{})\"",
            self.title,
            self.centroids,
            format_size(self.sketch_bytes)
        )?;
        writeln!(w, "set xlabel \"x\"")?;
        writeln!(w, "set ylabel \"{}(x)\"", self.stat)?;

        // axes and grid styling
        writeln!(w, "set style line 101 lc rgb '#808080' lt 1 lw 1")?;
        writeln!(w, "set border 3 front ls 101")?;
        writeln!(w, "set tics nomirror out scale 0.75")?;
        writeln!(w, "set format '%g'")?;
        writeln!(w, "set style line 102 lc rgb '#d6d7d9' lt 0 lw 1")?;
        writeln!(w, "set grid back ls 102")?;

        if self.key_top_left {
            writeln!(w, "set key top left")?;
        } else {
            writeln!(w, "set key bottom right")?;
        }
        writeln!(
            w,
            "plot '{data}' using 1:2:3 title \"Sketch error\" with filledcurves lc rgb \"#E7298A\", \
             '{data}' using 1:3 title \"Actual\" with lines lc rgb \"blue\""
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_points_includes_end() {
        assert_eq!(sample_points(0.0, 1.0, 0.25), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(sample_points(0.0, 1.0, 0.3).last(), Some(&1.0));
        assert_eq!(sample_points(0.0, 1.0, 0.3).len(), 5);
        assert_eq!(sample_points(2.0, 2.0, 0.1), vec![2.0]);
    }

    #[test]
    fn test_sample_points_stay_in_range() {
        let points = sample_points(0.0, 1.0, 0.01);
        assert_eq!(points.len(), 101);
        assert!(points.iter().all(|x| (0.0..=1.0).contains(x)));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(2752), "2.7 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_script() {
        let script = Script {
            title: "normal distribution, 100 samples".to_string(),
            centroids: 8,
            sketch_bytes: 152,
            stat: "quantile",
            key_top_left: true,
            data_path: Path::new("/tmp/plot.dat"),
            output: Path::new("/tmp/plot.png"),
        };
        let mut out = Vec::new();
        script.write(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("set term png\nset output '/tmp/plot.png'\n"));
        assert!(out.contains(
            "set title \"normal distribution, 100 samples\\nsketch with 8 centroids (~0.1 KB)\""
        ));
        assert!(out.contains("set ylabel \"quantile(x)\""));
        assert!(out.contains("set key top left"));
        assert!(out.ends_with("with lines lc rgb \"blue\"\n"));
    }

    #[test]
    fn test_write_data() {
        let path = std::env::temp_dir().join(format!("graphs-plot-{}.dat", std::process::id()));
        write_data(&path, &[0.0, 0.5], |x| x * 2.0, |x| x + 1.0).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "0 0 1\n0.5 1 1.5\n");
        std::fs::remove_file(&path).unwrap();
    }
}
