use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic S&P 500 style dataset for trying out the explorer.
#[derive(Debug, Parser)]
struct Args {
    /// Output CSV path.
    #[arg(default_value = "sp500_clean.csv")]
    output: PathBuf,

    /// Companies per sector.
    #[arg(long, default_value_t = 40)]
    per_sector: usize,

    /// RNG seed; the same seed always produces the same file.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One output row. Field order is the CSV column order.
#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Sector")]
    sector: &'static str,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "Price/Earnings")]
    price_earnings: f64,
    #[serde(rename = "Earnings/Share")]
    earnings_per_share: f64,
}

/// Sector name with the typical (mean P/E, mean EPS) of its members.
const SECTORS: [(&str, f64, f64); 11] = [
    ("Communication Services", 22.0, 4.5),
    ("Consumer Discretionary", 26.0, 4.0),
    ("Consumer Staples", 21.0, 3.5),
    ("Energy", 14.0, 5.0),
    ("Financials", 15.0, 6.0),
    ("Health Care", 24.0, 5.5),
    ("Industrials", 20.0, 5.0),
    ("Information Technology", 30.0, 4.0),
    ("Materials", 18.0, 4.5),
    ("Real Estate", 35.0, 2.0),
    ("Utilities", 19.0, 3.0),
];

const NAME_STEMS: [&str; 12] = [
    "Apex", "Beacon", "Cedar", "Delta", "Ember", "Falcon", "Granite", "Harbor", "Iron",
    "Juniper", "Keystone", "Lumen",
];

const NAME_SUFFIXES: [&str; 5] = ["Corp", "Inc", "Holdings", "Group", "Co"];

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut row_id = 0usize;
    for &(sector, mean_pe, mean_eps) in &SECTORS {
        for _ in 0..args.per_sector {
            // A few loss-making companies give negative EPS and P/E.
            let eps = round2(rng.gauss(mean_eps, mean_eps * 0.6));
            let pe = if eps > 0.0 {
                round2(rng.gauss(mean_pe, mean_pe * 0.35).max(1.0))
            } else {
                round2(-rng.gauss(mean_pe, mean_pe * 0.5).abs())
            };
            let price = round2((eps * pe).abs().max(1.0));

            let name = format!(
                "{} {} {}",
                rng.pick(&NAME_STEMS),
                sector.split_whitespace().next().unwrap_or(sector),
                rng.pick(&NAME_SUFFIXES)
            );

            writer.serialize(Row {
                symbol: format!("S{row_id:03}"),
                name,
                sector,
                price,
                price_earnings: pe,
                earnings_per_share: eps,
            })?;
            row_id += 1;
        }
    }
    writer.flush()?;

    println!(
        "Wrote {row_id} companies across {} sectors to {}",
        SECTORS.len(),
        args.output.display()
    );
    Ok(())
}
