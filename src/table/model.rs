use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Quantity – which column of the table a value belongs to
// ---------------------------------------------------------------------------

/// One of the two measured quantities held by a [`CalibrationTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Sensor resistance, header label `R`.
    Resistance,
    /// Sensor temperature, header label `T`.
    Temperature,
}

impl Quantity {
    /// Header label naming this column in a calibration file.
    pub const fn label(self) -> &'static str {
        match self {
            Quantity::Resistance => "R",
            Quantity::Temperature => "T",
        }
    }

    /// The quantity on the other side of a conversion.
    pub const fn other(self) -> Self {
        match self {
            Quantity::Resistance => Quantity::Temperature,
            Quantity::Temperature => Quantity::Resistance,
        }
    }

    /// The quantity a header label names, if it is `R` or `T`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "R" => Some(Quantity::Resistance),
            "T" => Some(Quantity::Temperature),
            _ => None,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Resistance => write!(f, "resistance"),
            Quantity::Temperature => write!(f, "temperature"),
        }
    }
}

// ---------------------------------------------------------------------------
// CalibrationTable – the parsed R/T reference pairs
// ---------------------------------------------------------------------------

/// Parsed calibration data: row `i` pairs `resistances[i]` with
/// `temperatures[i]`.
///
/// Both columns always have the same length. Rows are kept in file order;
/// the table is never sorted, callers are expected to supply ascending data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationTable {
    resistances: Vec<f64>,
    temperatures: Vec<f64>,
}

impl CalibrationTable {
    /// Build a table from two parallel columns.
    ///
    /// Returns `None` when the columns differ in length.
    pub fn new(resistances: Vec<f64>, temperatures: Vec<f64>) -> Option<Self> {
        if resistances.len() != temperatures.len() {
            return None;
        }
        Some(Self {
            resistances,
            temperatures,
        })
    }

    /// Columns known to be the same length, as the loader builds them.
    pub(crate) fn from_parallel(resistances: Vec<f64>, temperatures: Vec<f64>) -> Self {
        debug_assert_eq!(resistances.len(), temperatures.len());
        Self {
            resistances,
            temperatures,
        }
    }

    pub fn resistances(&self) -> &[f64] {
        &self.resistances
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// The column holding values of `quantity`.
    pub fn column(&self, quantity: Quantity) -> &[f64] {
        match quantity {
            Quantity::Resistance => &self.resistances,
            Quantity::Temperature => &self.temperatures,
        }
    }

    /// Iterate over `(resistance, temperature)` rows.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.resistances
            .iter()
            .copied()
            .zip(self.temperatures.iter().copied())
    }

    /// Number of calibration rows.
    pub fn len(&self) -> usize {
        self.resistances.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.resistances.is_empty()
    }

    /// `(min, max)` of a column, or `None` for an empty table.
    pub fn range(&self, quantity: Quantity) -> Option<(f64, f64)> {
        let column = self.column(quantity);
        if column.is_empty() {
            return None;
        }
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    pub fn resistance_range(&self) -> Option<(f64, f64)> {
        self.range(Quantity::Resistance)
    }

    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        self.range(Quantity::Temperature)
    }

    /// Whether a column is in non-decreasing order.
    pub fn is_ascending(&self, quantity: Quantity) -> bool {
        self.column(quantity).windows(2).all(|w| w[0] <= w[1])
    }
}
