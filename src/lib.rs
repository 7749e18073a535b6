//! Resistance/temperature conversion for RTD sensors.
//!
//! A calibration table of `(R, T)` pairs is read from tab-delimited text and
//! queried in either direction with piecewise-linear interpolation. Inputs
//! outside the table are clamped to the nearest boundary value and reported
//! through [`ClampStatus`] instead of failing.
//!
//! ```
//! use rtd_converter::{ClampStatus, RtdConverter};
//!
//! let mut converter = RtdConverter::new();
//! converter.load_str("R\tT\n90\t280\n100\t290\n110\t300\n")?;
//!
//! let t = converter.temperature_for(95.0)?;
//! assert_eq!(t.status, ClampStatus::Interpolated);
//! assert!((t.value - 285.0).abs() < 1e-9);
//!
//! let low = converter.temperature_for(0.001)?;
//! assert_eq!(low.status, ClampStatus::ClampedLow);
//! assert_eq!(low.value, 280.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod converter;
pub mod table;

pub use converter::{QueryError, RtdConverter};
pub use table::interpolate::{ClampStatus, Conversion};
pub use table::loader::ParseError;
pub use table::model::{CalibrationTable, Quantity};
