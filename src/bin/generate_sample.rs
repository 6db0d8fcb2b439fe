//! Writes a deterministic `WDRR_seq_CSV.csv` so the dashboard can be tried
//! without the private source sheet.

use anyhow::{Context, Result};
use serde::Serialize;

const OUTPUT_PATH: &str = "WDRR_seq_CSV.csv";
const ROWS: usize = 400;

const CONFIRMATIONS: &[&str] = &["Yes", "No"];
const MODELS: &[&str] = &["RC", "RX", "UX", "DX", "UG", "DG"];
const WEEKDAYS: &[&str] = &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
const SESSIONS: &[&str] = &["ODR", "RDR", "ADR"];
const HIGH_LOW: &[&str] = &["High", "Low"];
const SEQUENCES: &[&str] = &["High-Low", "Low-High", "High", "Low"];
const DAYS: &[&str] = &["Day 1", "Day 2", "Day 3", "Day 4", "Day 5"];

/// One row of the sample sheet.  The source sheet repeats the
/// `Start High/Low` header; here the second copy carries a trailing space,
/// which the loader trims before deduplicating it to `Start High/Low.1`.
#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "Confirmation")]
    confirmation: &'static str,
    #[serde(rename = "Conf True/False")]
    conf_true_false: &'static str,
    #[serde(rename = "Model")]
    model: &'static str,
    #[serde(rename = "Start Day")]
    start_day: &'static str,
    #[serde(rename = "Start High/Low")]
    week_high_low: &'static str,
    #[serde(rename = "Start High/Low ")]
    start_high_low: &'static str,
    #[serde(rename = "Start point seq")]
    start_point_seq: &'static str,
    #[serde(rename = "Start session")]
    start_session: &'static str,
    #[serde(rename = "End Day")]
    end_day: Option<&'static str>,
    #[serde(rename = "End point seq")]
    end_point_seq: &'static str,
    #[serde(rename = "End High/Low")]
    end_high_low: &'static str,
    #[serde(rename = "High Day")]
    high_day: &'static str,
    #[serde(rename = "Low Day")]
    low_day: &'static str,
    #[serde(rename = "Day 2 Model")]
    day2_model: &'static str,
    #[serde(rename = "Day 3 Model")]
    day3_model: &'static str,
    #[serde(rename = "Day 4 Model")]
    day4_model: &'static str,
    #[serde(rename = "Day 5 Model")]
    day5_model: &'static str,
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

    fn pick(&mut self, choices: &[&'static str]) -> &'static str {
        choices[(self.next_u64() % choices.len() as u64) as usize]
    }
}

fn sample_row(rng: &mut SimpleRng) -> SampleRow {
    let start = rng.next_u64() as usize % 3;
    // End day never precedes the start day.
    let end = start + 1 + rng.next_u64() as usize % (DAYS.len() - start - 1);
    let high = rng.next_u64() as usize % (end + 1);
    let low = rng.next_u64() as usize % (end + 1);

    SampleRow {
        confirmation: rng.pick(CONFIRMATIONS),
        conf_true_false: if rng.next_f64() < 0.6 { "True" } else { "False" },
        model: rng.pick(MODELS),
        start_day: WEEKDAYS[start],
        week_high_low: rng.pick(HIGH_LOW),
        start_high_low: rng.pick(HIGH_LOW),
        start_point_seq: rng.pick(SEQUENCES),
        start_session: rng.pick(SESSIONS),
        // A few rows without an end day exercise the "Unknown" group.
        end_day: (rng.next_f64() > 0.02).then_some(DAYS[end]),
        end_point_seq: rng.pick(SEQUENCES),
        end_high_low: rng.pick(HIGH_LOW),
        high_day: DAYS[high],
        low_day: DAYS[low],
        day2_model: rng.pick(MODELS),
        day3_model: rng.pick(MODELS),
        day4_model: rng.pick(MODELS),
        day5_model: rng.pick(MODELS),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    for _ in 0..ROWS {
        writer
            .serialize(sample_row(&mut rng))
            .context("writing sample row")?;
    }
    writer.flush().context("flushing sample file")?;

    println!("Wrote {ROWS} sequences to {OUTPUT_PATH}");
    Ok(())
}
