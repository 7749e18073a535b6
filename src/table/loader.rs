use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use super::model::{CalibrationTable, Quantity};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a calibration table could not be loaded.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("calibration table is empty")]
    EmptyInput,

    #[error("line {line}: expected {expected} fields, found {found}")]
    ColumnMismatch {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column '{column}': '{field}' is not a number")]
    InvalidNumber {
        line: u64,
        column: String,
        field: String,
    },

    #[error("header has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("header repeats column '{0}'")]
    DuplicateColumn(String),

    #[error("reading calibration table")]
    Io(#[from] std::io::Error),

    #[error("reading calibration table")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a calibration table from a tab-delimited text file.
pub fn load_file(path: &Path) -> Result<CalibrationTable, ParseError> {
    let file = File::open(path)?;
    from_reader(file)
}

/// Parse a calibration table held in memory.
pub fn parse(source: &str) -> Result<CalibrationTable, ParseError> {
    parse_bytes(source.as_bytes())
}

/// Parse a calibration table from any byte stream.
///
/// Layout: a header line naming each column, then one row of numbers per
/// line, all fields separated by a single tab:
///
/// ```text
/// R	T
/// 90.0	280.0
/// 100.0	290.0
/// ```
///
/// Columns other than `R` and `T` are checked for shape and numeric content
/// but otherwise dropped. Empty lines are skipped. Every field must be a
/// finite number.
pub fn from_reader<R: Read>(mut reader: R) -> Result<CalibrationTable, ParseError> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source)?;
    parse_bytes(&source)
}

fn parse_bytes(source: &[u8]) -> Result<CalibrationTable, ParseError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(source);

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(ParseError::EmptyInput),
    };
    let labels: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();
    let (r_idx, t_idx) = column_indices(&labels)?;

    let mut resistances = Vec::new();
    let mut temperatures = Vec::new();

    for result in records {
        let record = result?;

        if record.len() != labels.len() {
            return Err(ParseError::ColumnMismatch {
                line: physical_line(source, &record),
                expected: labels.len(),
                found: record.len(),
            });
        }

        let mut r = f64::NAN;
        let mut t = f64::NAN;
        for (col_idx, field) in record.iter().enumerate() {
            let value = parse_field(field).ok_or_else(|| ParseError::InvalidNumber {
                line: physical_line(source, &record),
                column: labels[col_idx].clone(),
                field: field.to_string(),
            })?;
            if col_idx == r_idx {
                r = value;
            } else if col_idx == t_idx {
                t = value;
            }
        }
        resistances.push(r);
        temperatures.push(t);
    }

    let table = CalibrationTable::from_parallel(resistances, temperatures);

    for quantity in [Quantity::Resistance, Quantity::Temperature] {
        if !table.is_ascending(quantity) {
            log::warn!("{quantity} column of calibration table is not in ascending order");
        }
    }
    log::debug!("Parsed calibration table with {} rows", table.len());

    Ok(table)
}

// -- helpers --

/// Positions of the `R` and `T` columns in the header.
fn column_indices(labels: &[String]) -> Result<(usize, usize), ParseError> {
    let mut r_idx = None;
    let mut t_idx = None;

    for (idx, label) in labels.iter().enumerate() {
        let slot = match Quantity::from_label(label) {
            Some(Quantity::Resistance) => &mut r_idx,
            Some(Quantity::Temperature) => &mut t_idx,
            None => continue,
        };
        if slot.replace(idx).is_some() {
            return Err(ParseError::DuplicateColumn(label.clone()));
        }
    }

    let r_idx = r_idx.ok_or(ParseError::MissingColumn(Quantity::Resistance.label()))?;
    let t_idx = t_idx.ok_or(ParseError::MissingColumn(Quantity::Temperature.label()))?;
    Ok((r_idx, t_idx))
}

/// 1-based line of `record` in `source`, counting the blank lines the
/// reader skipped.
fn physical_line(source: &[u8], record: &StringRecord) -> u64 {
    let Some(position) = record.position() else {
        return 0;
    };
    let mut start = usize::try_from(position.byte())
        .unwrap_or(usize::MAX)
        .min(source.len());
    // The recorded offset may sit before the skipped empty lines.
    while matches!(source.get(start), Some(b'\n' | b'\r')) {
        start += 1;
    }
    1 + source[..start].iter().filter(|&&b| b == b'\n').count() as u64
}

fn parse_field(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
