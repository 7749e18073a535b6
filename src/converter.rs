use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::table::interpolate::{interpolate, Conversion};
use crate::table::loader::{self, ParseError};
use crate::table::model::{CalibrationTable, Quantity};

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Why a conversion could not be attempted at all.
///
/// Out-of-range inputs are not errors; see
/// [`ClampStatus`](crate::table::interpolate::ClampStatus).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("no calibration table has been loaded")]
    Unpopulated,

    #[error("calibration table has {rows} row(s), at least 2 are needed")]
    TooFewRows { rows: usize },

    #[error("cannot convert NaN")]
    NotANumber,
}

// ---------------------------------------------------------------------------
// Converter
// ---------------------------------------------------------------------------

/// Resistance/temperature converter backed by a calibration table.
///
/// A load replaces the table only once parsing has fully succeeded, so a
/// failed load keeps answering queries from the previous table.
#[derive(Debug, Default, Clone)]
pub struct RtdConverter {
    /// Loaded table (None until a load succeeds).
    table: Option<Arc<CalibrationTable>>,
}

impl RtdConverter {
    /// A converter with no table; queries fail until a load succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: CalibrationTable) -> Self {
        Self {
            table: Some(Arc::new(table)),
        }
    }

    /// Load the calibration table at `path`, replacing the current one.
    pub fn load_table(&mut self, path: impl AsRef<Path>) -> Result<(), ParseError> {
        let path = path.as_ref();
        let table = loader::load_file(path)?;
        log::info!(
            "Loaded calibration table {} with {} rows",
            path.display(),
            table.len()
        );
        self.set_table(table);
        Ok(())
    }

    /// Parse `content` as a calibration table, replacing the current one.
    pub fn load_str(&mut self, content: &str) -> Result<(), ParseError> {
        let table = loader::parse(content)?;
        log::info!("Loaded calibration table with {} rows", table.len());
        self.set_table(table);
        Ok(())
    }

    pub fn set_table(&mut self, table: CalibrationTable) {
        self.table = Some(Arc::new(table));
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Shared handle to the current table; it stays valid across reloads.
    pub fn table(&self) -> Result<Arc<CalibrationTable>, QueryError> {
        self.table.clone().ok_or(QueryError::Unpopulated)
    }

    /// Temperature corresponding to `resistance`.
    pub fn temperature_for(&self, resistance: f64) -> Result<Conversion, QueryError> {
        self.convert(Quantity::Resistance, resistance)
    }

    /// Resistance corresponding to `temperature`.
    pub fn resistance_for(&self, temperature: f64) -> Result<Conversion, QueryError> {
        self.convert(Quantity::Temperature, temperature)
    }

    /// Convert `x`, a value of quantity `from`, into the other quantity.
    pub fn convert(&self, from: Quantity, x: f64) -> Result<Conversion, QueryError> {
        let table = self.table.as_deref().ok_or(QueryError::Unpopulated)?;
        if table.len() < 2 {
            return Err(QueryError::TooFewRows { rows: table.len() });
        }
        if x.is_nan() {
            return Err(QueryError::NotANumber);
        }
        Ok(interpolate(
            table.column(from),
            table.column(from.other()),
            x,
        ))
    }
}
