//! Writes a synthetic stats table to `data/pokemon_sample.csv`.
//!
//! Each type has its own stat profile plus noise, so the scatter plot shows
//! clusters. A few cells are deliberately blank or garbled to exercise the
//! loader's NaN handling.

use anyhow::{Context, Result};

/// Seeded splitmix64 stream; enough randomness for a fixture file.
struct SampleRng(u64);

impl SampleRng {
    fn unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        (z ^ (z >> 31)) as f64 / u64::MAX as f64
    }

    /// Normal draw around `mean` (Box-Muller).
    fn stat(&mut self, mean: f64, spread: f64) -> f64 {
        let r = (-2.0 * self.unit().max(1e-12).ln()).sqrt();
        mean + spread * r * (std::f64::consts::TAU * self.unit()).cos()
    }

    fn pick(&mut self, n: usize) -> usize {
        ((self.unit() * n as f64) as usize).min(n.saturating_sub(1))
    }
}

/// Mean HP, Attack, Defense, Sp_Atk, Sp_Def, Speed per type.
const PROFILES: &[(&str, [f64; 6])] = &[
    ("Water", [70.0, 72.0, 73.0, 75.0, 70.0, 65.0]),
    ("Normal", [77.0, 73.0, 59.0, 55.0, 63.0, 69.0]),
    ("Grass", [67.0, 73.0, 70.0, 77.0, 70.0, 61.0]),
    ("Bug", [56.0, 70.0, 70.0, 53.0, 64.0, 61.0]),
    ("Psychic", [70.0, 71.0, 68.0, 98.0, 86.0, 83.0]),
    ("Fire", [69.0, 84.0, 67.0, 88.0, 72.0, 74.0]),
    ("Rock", [65.0, 92.0, 100.0, 63.0, 75.0, 55.0]),
    ("Electric", [59.0, 69.0, 66.0, 90.0, 73.0, 84.0]),
    ("Ghost", [64.0, 73.0, 81.0, 79.0, 76.0, 64.0]),
    ("Dragon", [83.0, 112.0, 86.0, 96.0, 88.0, 83.0]),
    ("Steel", [65.0, 92.0, 126.0, 67.0, 80.0, 55.0]),
    ("Fighting", [69.0, 96.0, 65.0, 53.0, 64.0, 66.0]),
];

const SYLLABLES: &[&str] = &["pi", "ka", "bul", "sa", "char", "mon", "squi", "zu", "gar", "do", "lee", "tor"];

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let output_path = "data/pokemon_sample.csv";
    std::fs::create_dir_all("data").context("creating data directory")?;
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "Number", "Name", "Type_1", "HP", "Attack", "Defense", "Sp_Atk", "Sp_Def", "Speed",
    ])?;

    let rows = 400;
    for number in 1..=rows {
        let (type_1, means) = PROFILES[rng.pick(PROFILES.len())];
        let name: String = (0..2 + rng.pick(2))
            .map(|_| SYLLABLES[rng.pick(SYLLABLES.len())])
            .collect();

        let mut cells = vec![number.to_string(), capitalize(&name), type_1.to_string()];
        for mean in means {
            let value = rng.stat(mean, mean * 0.25).round().clamp(5.0, 255.0);
            cells.push(format!("{value}"));
        }

        // Roughly one row in fifty gets a broken stat cell.
        if rng.pick(50) == 0 {
            let col = 3 + rng.pick(6);
            cells[col] = if rng.pick(2) == 0 { String::new() } else { "??".to_string() };
        }
        writer.write_record(&cells)?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} records to {output_path}");
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
