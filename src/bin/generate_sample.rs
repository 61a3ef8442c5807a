//! Write synthetic TCAD oxidation exports for trying out `oxide-growth`.
//!
//! Each file holds one X/Y column pair per run. The oxide layer (Y > 1)
//! spans a known extent around x = 0 with roughly 44 % of it on the
//! silicon side, plus a few deliberate outliers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "generate-sample")]
struct Args {
    /// Output directory (created if missing)
    #[arg(default_value = "Data")]
    output: PathBuf,

    /// Number of files to write
    #[arg(short, long, default_value = "4")]
    files: usize,

    /// Points per profile
    #[arg(short, long, default_value = "200")]
    points: usize,

    /// PRNG seed
    #[arg(short, long, default_value = "42")]
    seed: u64,
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

/// Deal-Grove-like thickness (µm) for a dry/wet mix.
fn oxide_thickness(temp: f64, time: f64, o2: f64) -> f64 {
    let rate = 1e-3 * ((temp - 800.0) / 100.0).exp() * (0.3 + o2);
    (rate * time).sqrt().min(2.0)
}

/// One profile: X from -3 to 3 µm, Y above 1 inside the oxide.
fn profile(
    points: usize,
    outside: f64,
    inside: f64,
    rng: &mut SimpleRng,
) -> (Vec<String>, Vec<String>) {
    let mut xs = Vec::with_capacity(points);
    let mut ys = Vec::with_capacity(points);
    for i in 0..points {
        let x = -3.0 + 6.0 * i as f64 / (points.max(2) - 1) as f64;
        let y = if x >= -outside && x <= inside {
            rng.gauss(2.0, 0.05)
        } else {
            rng.gauss(0.3, 0.05)
        };
        xs.push(format!("{x:.6}"));
        ys.push(format!("{y:.6}"));
    }
    (xs, ys)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let temps = [900.0, 1000.0, 1100.0];
    let times = [10.0, 30.0, 60.0];
    let o2_fractions = [0.2, 0.5, 1.0];

    let mut n_runs = 0;
    for f in 0..args.files {
        let pres = 1.0 + f as f64 * 0.5;
        let mut headers = Vec::new();
        let mut columns: Vec<Vec<String>> = Vec::new();

        for &temp in &temps {
            for &time in &times {
                for &o2 in &o2_fractions {
                    let total = oxide_thickness(temp, time, o2);
                    // Every seventh run strays from the 44 % split.
                    let share = if n_runs % 7 == 3 {
                        0.25 + 0.5 * rng.next_f64()
                    } else {
                        rng.gauss(0.44, 0.01)
                    };
                    let (xs, ys) = profile(args.points, total * (1.0 - share), total * share, &mut rng);

                    let name = format!(
                        "Pres_{pres}_O2_{o2}_N2_{:.1}_Temp_{temp}_time_{time}",
                        1.0 - o2
                    );
                    headers.push(format!("{name} X"));
                    headers.push(format!("{name} Y"));
                    columns.push(xs);
                    columns.push(ys);
                    n_runs += 1;
                }
            }
        }

        // A pair without parameters in its header and a few missing cells.
        let (mut xs, ys) = profile(args.points / 2, 0.1, 0.08, &mut rng);
        if let Some(first) = xs.first_mut() {
            *first = "--".to_string();
        }
        headers.push("reference X".to_string());
        headers.push("reference Y".to_string());
        columns.push(xs);
        columns.push(ys);

        let path = args.output.join(format!("oxidation_{f:03}.csv"));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(&headers)?;
        let n_rows = columns.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..n_rows {
            writer.write_record(
                columns
                    .iter()
                    .map(|c| c.get(row).map(String::as_str).unwrap_or("")),
            )?;
        }
        writer.flush()?;
    }

    println!(
        "Wrote {n_runs} runs ({} points each) in {} files to {}",
        args.points,
        args.files,
        args.output.display()
    );
    Ok(())
}
