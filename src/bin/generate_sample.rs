use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// ASTM sieve series with the share of a well-graded sand retained on each.
const SIEVES: [(&str, f64, f64); 9] = [
    ("3/8\"", 9.5, 0.00),
    ("4", 4.75, 0.04),
    ("10", 2.00, 0.12),
    ("20", 0.85, 0.21),
    ("40", 0.425, 0.24),
    ("60", 0.25, 0.17),
    ("100", 0.15, 0.11),
    ("200", 0.075, 0.07),
    ("Pan", 0.0, 0.04),
];

/// Minimal deterministic PRNG (xorshift64*)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.wrapping_mul(6364136223846793005) | 1,
        }
    }

    fn next_f64(&mut self) -> f64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        let x = self.state.wrapping_mul(0x2545_F491_4F6C_DD1D);
        (x >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Retained masses (g) for a sample of `total_g`, with ±10 % weighing scatter.
fn retained_masses(total_g: f64, rng: &mut SimpleRng) -> Vec<f64> {
    SIEVES
        .iter()
        .map(|&(_, _, share)| {
            let scatter = 1.0 + (rng.next_f64() - 0.5) * 0.2;
            (total_g * share * scatter * 100.0).round() / 100.0
        })
        .collect()
}

fn decimal_comma(v: f64) -> String {
    v.to_string().replace('.', ",")
}

fn write_csv(path: &str, masses: &[f64]) {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .expect("Failed to create CSV file");
    writer
        .write_record(["Peneira", "Abertura (mm)", "Massa Retida (g)"])
        .expect("Failed to write header");
    for (&(sieve, opening, _), &mass) in SIEVES.iter().zip(masses) {
        writer
            .write_record([sieve.to_string(), decimal_comma(opening), decimal_comma(mass)])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_json(path: &str, masses: &[f64]) {
    let rows: Vec<serde_json::Value> = SIEVES
        .iter()
        .zip(masses)
        .map(|(&(sieve, opening, _), &mass)| serde_json::json!([sieve, opening, mass]))
        .collect();
    let doc = serde_json::json!({
        "columns": ["Sieve", "Opening (mm)", "Retained mass (g)"],
        "rows": rows,
    });
    let text = serde_json::to_string_pretty(&doc).expect("Failed to serialise JSON");
    std::fs::write(path, text).expect("Failed to write JSON file");
}

fn write_parquet(path: &str, masses: &[f64]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("sieve", DataType::Utf8, false),
        Field::new("opening_mm", DataType::Float64, false),
        Field::new("retained_mass_g", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                SIEVES.iter().map(|s| s.0).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                SIEVES.iter().map(|s| s.1).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(masses.to_vec())),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let outputs: [(&str, fn(&str, &[f64])); 3] = [
        ("sample_sieve.csv", write_csv),
        ("sample_sieve.json", write_json),
        ("sample_sieve.parquet", write_parquet),
    ];

    for (path, write) in outputs {
        let masses = retained_masses(1000.0, &mut rng);
        write(path, &masses);
        println!(
            "Wrote {} sieves ({:.2} g total) to {path}",
            masses.len(),
            masses.iter().sum::<f64>()
        );
    }
}
