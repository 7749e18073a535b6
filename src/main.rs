use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use rtd_converter::{CalibrationTable, Conversion, Quantity, RtdConverter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Tab-delimited calibration table with `R` and `T` columns
    #[arg(short, long, value_name = "FILE", env = "RTD_TABLE")]
    table: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert resistances to temperatures
    Temperature {
        #[arg(required = true, allow_negative_numbers = true)]
        resistances: Vec<f64>,
    },
    /// Convert temperatures to resistances
    Resistance {
        #[arg(required = true, allow_negative_numbers = true)]
        temperatures: Vec<f64>,
    },
    /// Print the parsed calibration table
    Table,
}

#[derive(Serialize)]
struct Row {
    input: f64,
    #[serde(flatten)]
    conversion: Conversion,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut converter = RtdConverter::new();
    converter
        .load_table(&cli.table)
        .with_context(|| format!("loading {}", cli.table.display()))?;

    match cli.command {
        Command::Temperature { resistances } => {
            convert_all(&converter, Quantity::Resistance, &resistances, cli.json)
        }
        Command::Resistance { temperatures } => {
            convert_all(&converter, Quantity::Temperature, &temperatures, cli.json)
        }
        Command::Table => print_table(&converter, cli.json),
    }
}

fn convert_all(converter: &RtdConverter, from: Quantity, inputs: &[f64], json: bool) -> Result<()> {
    let table = converter.table()?;

    let mut rows = Vec::with_capacity(inputs.len());
    for &input in inputs {
        let conversion = converter
            .convert(from, input)
            .with_context(|| format!("converting {from} {input}"))?;
        warn_if_clamped(&table, from, input, &conversion);
        rows.push(Row { input, conversion });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        let to = from.other();
        for row in &rows {
            println!(
                "{} = {:.6} -> {} = {:.6} ({})",
                from.label(),
                row.input,
                to.label(),
                row.conversion.value,
                row.conversion.status
            );
        }
    }
    Ok(())
}

fn warn_if_clamped(table: &CalibrationTable, from: Quantity, input: f64, conversion: &Conversion) {
    if !conversion.status.is_clamped() {
        return;
    }
    if let Some((min, max)) = table.range(from) {
        log::warn!(
            "{from} {input} is outside the calibrated range [{min}, {max}] ({}); returning {} {}",
            conversion.status,
            from.other(),
            conversion.value
        );
    }
}

fn print_table(converter: &RtdConverter, json: bool) -> Result<()> {
    let table = converter.table()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&*table)?);
    } else {
        println!(
            "{}\t{}",
            Quantity::Resistance.label(),
            Quantity::Temperature.label()
        );
        for (r, t) in table.rows() {
            println!("{r}\t{t}");
        }
    }
    Ok(())
}
