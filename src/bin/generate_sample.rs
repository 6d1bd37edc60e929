use serde_json::json;

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

    /// Uniform value in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

fn main() {
    // ---- Demo model artifact: a small house-price ensemble ----
    //
    // Three features in trained order: living area, bedroom count, building
    // age. Four trees over a base score, the same node layout the app's
    // loader expects.
    let model = json!({
        "version": 1,
        "num_features": 3,
        "feature_names": ["area_m2", "bedrooms", "age_years"],
        "base_score": 120.0,
        "trees": [
            {
                "feature":   [0, -1, -1],
                "threshold": [100.0, 0.0, 0.0],
                "left":      [1, 0, 0],
                "right":     [2, 0, 0],
                "value":     [0.0, -35.0, 45.0]
            },
            {
                "feature":   [1, -1, -1],
                "threshold": [3.0, 0.0, 0.0],
                "left":      [1, 0, 0],
                "right":     [2, 0, 0],
                "value":     [0.0, -12.5, 15.0]
            },
            {
                "feature":   [2, -1, -1],
                "threshold": [25.0, 0.0, 0.0],
                "left":      [1, 0, 0],
                "right":     [2, 0, 0],
                "value":     [0.0, 8.0, -18.0]
            },
            {
                "feature":   [0, 2, -1, -1, -1],
                "threshold": [140.0, 40.0, 0.0, 0.0, 0.0],
                "left":      [1, 2, 0, 0, 0],
                "right":     [4, 3, 0, 0, 0],
                "value":     [0.0, 0.0, 2.0, -6.0, 20.0]
            }
        ]
    });

    let model_path = "model.json";
    let text = serde_json::to_string_pretty(&model).expect("Failed to encode model");
    std::fs::write(model_path, text).expect("Failed to write model artifact");

    // ---- Matching sample CSV for the batch tab ----
    let mut rng = SimpleRng::new(42);
    let csv_path = "sample.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create sample CSV");
    writer
        .write_record(["area_m2", "bedrooms", "age_years"])
        .expect("Failed to write CSV header");

    let num_rows = 15;
    for _ in 0..num_rows {
        let area = rng.range(40.0, 200.0);
        let bedrooms = rng.range(1.0, 6.0).floor();
        let age = rng.range(0.0, 80.0);
        writer
            .write_record([
                format!("{:.1}", area),
                format!("{}", bedrooms),
                format!("{:.1}", age),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush sample CSV");

    println!("Wrote demo model to {model_path} and {num_rows} sample rows to {csv_path}");
}
