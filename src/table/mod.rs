//! Table layer: parsing, storage, and lookup.
//!
//! Architecture:
//! ```text
//!   R<TAB>T text
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse lines → CalibrationTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────┐
//!   │ CalibrationTable  │  resistances[], temperatures[]
//!   └──────────────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ interpolate  │  key column + value column + x → Conversion
//!   └─────────────┘
//! ```

pub mod interpolate;
pub mod loader;
pub mod model;
