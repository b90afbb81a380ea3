use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use rating_tree::{write_csv, write_json, write_rating_table, Datapoint, Dataset};

const FEATURES: [&str; 6] = ["easy", "ai", "systems", "theory", "morning", "likedOther"];

/// How much each feature pushes the latent rating up or down.
const WEIGHTS: [f64; 6] = [0.9, 0.6, -0.4, -0.7, -0.5, 1.1];

const RATINGS: [&str; 5] = ["-2", "-1", "0", "+1", "+2"];

/// Deterministic splitmix64 stream.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn coin(&mut self, p_true: f64) -> bool {
        self.unit() < p_true
    }
}

/// One student's features and the rating they gave.
fn generate_datapoint(rng: &mut SampleRng) -> Datapoint {
    let features: Vec<bool> = FEATURES.iter().map(|_| rng.coin(0.5)).collect();

    let latent: f64 = features
        .iter()
        .zip(WEIGHTS)
        .filter(|(on, _)| **on)
        .map(|(_, w)| w)
        .sum::<f64>()
        + (rng.unit() - 0.5) * 1.5;

    let bucket = (latent.round() as i64).clamp(-2, 2) + 2;
    Datapoint::new(features, RATINGS[bucket as usize])
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_ratings.txt"));

    let mut rng = SampleRng(42);
    let datapoints: Vec<Datapoint> = (0..20).map(|_| generate_datapoint(&mut rng)).collect();
    let dataset = Dataset::new(FEATURES.iter().map(|s| s.to_string()).collect(), datapoints)
        .context("building sample dataset")?;

    let file = File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    let writer = BufWriter::new(file);

    let ext = output_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    // Same extension dispatch as `load_file`, so the output loads back.
    let written = match ext.as_str() {
        "csv" => write_csv(&dataset, writer),
        "json" => write_json(&dataset, writer),
        _ => write_rating_table(&dataset, writer),
    };
    written.with_context(|| format!("writing {}", output_path.display()))?;

    info!("label distribution: {:?}", dataset.label_counts());
    println!(
        "Wrote {} ratings ({} features each) to {}",
        dataset.size(),
        dataset.feature_count(),
        output_path.display()
    );
    Ok(())
}
