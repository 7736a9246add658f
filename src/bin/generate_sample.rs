//! Writes a demo CSV for the viewer.
//!
//! ```text
//! generate_sample [OUTPUT] [--semicolon] [--latin1]
//! ```
//!
//! The file has a date column (rows shuffled, so charts exercise date
//! sorting), text columns with accents, numeric columns with gaps and a
//! column mixing numbers and text.

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};
use encoding_rs::WINDOWS_1252;

const ROWS: usize = 120;
const REGIONS: &[&str] = &["Norte", "Sul", "São Paulo", "Brasília"];
const PRODUCTS: &[&str] = &["Café", "Açúcar", "Pão", "Leite"];

/// splitmix64: small deterministic generator so repeated runs give the same file.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

struct Args {
    output: String,
    separator: u8,
    latin1: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        output: "sample_data.csv".into(),
        separator: b',',
        latin1: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--semicolon" => args.separator = b';',
            "--latin1" => args.latin1 = true,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => args.output = path.to_string(),
        }
    }
    Ok(args)
}

fn build_csv(separator: u8) -> Result<String> {
    let mut rng = Rng(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;

    let mut days: Vec<usize> = (0..ROWS).collect();
    for i in (1..days.len()).rev() {
        let j = rng.below(i + 1);
        days.swap(i, j);
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(separator)
        .from_writer(Vec::new());
    writer.write_record(["date", "region", "product", "units", "price", "revenue", "code"])?;

    for day in days {
        let date = start + Duration::days(day as i64);
        let units = 5 + rng.below(60);
        let price = 2.0 + rng.unit() * 8.0;

        // ~10% missing units, ~5% missing prices.
        let units_cell = if rng.below(10) == 0 {
            String::new()
        } else {
            units.to_string()
        };
        let price_cell = if rng.below(20) == 0 {
            "NA".to_string()
        } else {
            format!("{price:.2}")
        };
        let revenue = format!("{:.2}", units as f64 * price);
        let code = if rng.below(4) == 0 {
            format!("X{}", rng.below(100))
        } else {
            rng.below(1000).to_string()
        };

        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            REGIONS[rng.below(REGIONS.len())].to_string(),
            PRODUCTS[rng.below(PRODUCTS.len())].to_string(),
            units_cell,
            price_cell,
            revenue,
            code,
        ])?;
    }

    let bytes = writer.into_inner().context("flushing CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let text = build_csv(args.separator)?;

    let bytes = if args.latin1 {
        let (encoded, _, unmappable) = WINDOWS_1252.encode(&text);
        if unmappable {
            bail!("sample text cannot be written as Latin-1");
        }
        encoded.into_owned()
    } else {
        text.into_bytes()
    };

    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("writing {}", args.output))?;
    println!(
        "Wrote {ROWS} rows to {} (separator {:?}, {})",
        args.output,
        args.separator as char,
        if args.latin1 { "Latin-1" } else { "UTF-8" }
    );
    Ok(())
}
