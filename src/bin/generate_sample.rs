//! Writes two demo inputs into the current directory:
//!
//! * `sample_signal.csv` – header + one column of a noisy 50 Hz / 120 Hz
//!   mixture sampled at 1 kHz, for `fft-process --fs 1000`.
//! * `sample_labview.csv` – headerless `time,value` rows with the kind of
//!   broken cells acquisition software leaves behind, for `csv-cleaner --datetime`.

use std::f64::consts::PI;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

const SAMPLE_RATE: f64 = 1000.0;
const SAMPLES: usize = 2000;

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
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

fn sample(i: usize, rng: &mut SimpleRng) -> f64 {
    let t = i as f64 / SAMPLE_RATE;
    (2.0 * PI * 50.0 * t).sin() + 0.5 * (2.0 * PI * 120.0 * t).sin() + rng.gauss(0.0, 0.1)
}

fn write_signal(rng: &mut SimpleRng) -> Result<()> {
    let path = "sample_signal.csv";
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["signal"])?;
    for i in 0..SAMPLES {
        writer.write_record([format!("{:.6}", sample(i, rng))])?;
    }
    writer.flush()?;
    println!("Wrote {SAMPLES} samples at {SAMPLE_RATE} Hz to {path}");
    Ok(())
}

fn write_labview(rng: &mut SimpleRng) -> Result<()> {
    let path = "sample_labview.csv";
    let start = NaiveDate::from_ymd_opt(2025, 7, 18)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .context("building start time")?;

    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;

    let mut broken = 0usize;
    for i in 0..SAMPLES {
        let ts = start + Duration::milliseconds(i as i64);
        let mut time = ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        let mut value = format!("{:.6}", sample(i, rng));

        // Roughly one row in twenty gets damaged.
        let damage = rng.next_u64() % 100;
        match damage {
            0 => value.clear(),
            1 => value = "NaN".into(),
            2 => value = format!("{value}{value}"),
            3 => time = time.replace(':', ""),
            4 => time.truncate(7),
            _ => {}
        }
        if damage < 5 {
            broken += 1;
        }
        writer.write_record([time, value])?;
    }
    writer.flush()?;
    println!("Wrote {SAMPLES} rows ({broken} damaged) to {path}");
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    write_signal(&mut rng)?;
    write_labview(&mut rng)?;
    Ok(())
}
