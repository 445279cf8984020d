//! Writes a synthetic data folder in the layout the dashboard reads:
//! `geoMap <year>.csv` per year plus `multiTimeline.csv`.
//!
//! Usage: `generate_sample [DIR]` (defaults to `./data`).

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Parser;

const TITLE: &str = "Category: All categories";
const TERM: &str = "travel insurance";

const REGIONS: [(&str, f64); 8] = [
    ("Sao Paulo", 1.0),
    ("Rio de Janeiro", 0.85),
    ("Distrito Federal", 0.7),
    ("Santa Catarina", 0.55),
    ("Parana", 0.5),
    ("Minas Gerais", 0.45),
    ("Bahia", 0.2),
    ("Acre", 0.01),
];

#[derive(Parser)]
#[command(name = "generate_sample")]
#[command(about = "Write a synthetic trends data folder")]
struct Args {
    /// Output directory, created if missing.
    #[arg(default_value = "data")]
    dir: PathBuf,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Scale so the largest value is 100, the way Trends normalises exports.
/// Values that round below one are written as `<1`.
fn normalise(values: &[f64]) -> Vec<String> {
    let max = values.iter().cloned().fold(f64::MIN, f64::max).max(f64::EPSILON);
    values
        .iter()
        .map(|v| {
            let scaled = (v / max * 100.0).round();
            if scaled < 1.0 {
                "<1".to_string()
            } else {
                format!("{scaled}")
            }
        })
        .collect()
}

/// Title line, blank line, then a two-column CSV body.
fn write_export(path: &Path, header: [&str; 2], rows: &[(String, String)]) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "{TITLE}")?;
    writeln!(file)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(header)?;
    for (first, second) in rows {
        writer.write_record([first, second])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_region_files(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut written = 0;
    for (i, year) in (2019..=2023).enumerate() {
        let growth = 1.0 + 0.15 * i as f64;
        let raw: Vec<f64> = REGIONS
            .iter()
            .map(|&(_, share)| (share * growth + rng.gauss(0.0, 0.03)).max(0.0))
            .collect();
        let rows: Vec<(String, String)> = REGIONS
            .iter()
            .zip(normalise(&raw))
            .map(|(&(region, _), volume)| (region.to_string(), volume))
            .collect();

        let header = format!("{TERM}: ({year})");
        write_export(
            &dir.join(format!("geoMap {year}.csv")),
            ["Region", header.as_str()],
            &rows,
        )?;
        written += 1;
    }
    Ok(written)
}

fn write_timeline(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let first_week = NaiveDate::from_ymd_opt(2019, 1, 6).context("invalid start date")?;
    let n_weeks = 260;

    let weeks: Vec<NaiveDate> = (0..n_weeks)
        .map(|i| first_week + Duration::weeks(i))
        .collect();
    let raw: Vec<f64> = (0..n_weeks)
        .map(|i| {
            let t = i as f64;
            let season = (2.0 * std::f64::consts::PI * (t - 20.0) / 52.0).cos();
            let trend = 40.0 + 0.12 * t;
            (trend + 15.0 * season + rng.gauss(0.0, 3.0)).max(0.0)
        })
        .collect();

    let rows: Vec<(String, String)> = weeks
        .iter()
        .zip(normalise(&raw))
        .map(|(week, volume)| (week.format("%Y-%m-%d").to_string(), volume))
        .collect();

    let header = format!("{TERM}: (Brazil)");
    write_export(
        &dir.join("multiTimeline.csv"),
        ["Week", header.as_str()],
        &rows,
    )?;
    Ok(rows.len())
}

fn main() -> Result<()> {
    let Args { dir } = Args::parse();
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let files = write_region_files(&dir, &mut rng)?;
    let weeks = write_timeline(&dir, &mut rng)?;

    println!(
        "Wrote {files} regional files and {weeks} weeks to {}",
        dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_data_dir() {
        let Args { dir } = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(dir, PathBuf::from("data"));

        let Args { dir } = Args::try_parse_from(["generate_sample", "/tmp/trends"]).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/trends"));

        assert!(Args::try_parse_from(["generate_sample", "a", "b"]).is_err());
    }

    #[test]
    fn normalise_scales_to_hundred() {
        assert_eq!(normalise(&[2.0, 1.0, 0.001]), vec!["100", "50", "<1"]);
    }
}
