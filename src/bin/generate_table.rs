use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

/// IEC 60751 coefficients for platinum RTDs.
const A: f64 = 3.9083e-3;
const B: f64 = -5.775e-7;
const C: f64 = -4.183e-12;

/// Nominal PT100 resistance at 0 °C (Ω).
const R0: f64 = 100.0;

const KELVIN_OFFSET: f64 = 273.15;

/// Write a PT100 calibration table (`R` in Ω, `T` in K).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output file
    #[arg(default_value = "pt100_table.tsv")]
    output: PathBuf,

    /// First temperature (°C)
    #[arg(long, default_value_t = -200.0, allow_negative_numbers = true)]
    from: f64,

    /// Last temperature (°C), included when it falls on a step
    #[arg(long, default_value_t = 600.0, allow_negative_numbers = true)]
    to: f64,

    /// Temperature step (K)
    #[arg(long, default_value_t = 10.0)]
    step: f64,
}

/// Callendar–Van Dusen equation; the `C` term only applies below 0 °C.
fn pt100_resistance(celsius: f64) -> f64 {
    let c = if celsius < 0.0 { C } else { 0.0 };
    R0 * (1.0 + A * celsius + B * celsius.powi(2) + c * (celsius - 100.0) * celsius.powi(3))
}

/// `(resistance, kelvin)` rows from `from` to `to` °C.
fn table_rows(from: f64, to: f64, step: f64) -> Vec<(f64, f64)> {
    let count = ((to - from) / step + 1e-9).floor() as usize + 1;
    (0..count)
        .map(|i| {
            let celsius = from + i as f64 * step;
            (pt100_resistance(celsius), celsius + KELVIN_OFFSET)
        })
        .collect()
}

fn write_table<W: Write>(writer: &mut W, rows: &[(f64, f64)]) -> std::io::Result<()> {
    writeln!(writer, "R\tT")?;
    for (resistance, kelvin) in rows {
        writeln!(writer, "{resistance:.4}\t{kelvin:.2}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    if args.step.is_nan() || args.step <= 0.0 || args.to < args.from {
        bail!("need --step > 0 and --to >= --from");
    }

    let rows = table_rows(args.from, args.to, args.step);

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    write_table(&mut writer, &rows)?;
    writer.flush()?;

    log::info!("Wrote {} rows to {}", rows.len(), args.output.display());
    println!(
        "Wrote {} calibration rows to {}",
        rows.len(),
        args.output.display()
    );
    Ok(())
}
