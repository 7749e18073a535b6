use std::fmt;

use serde::Serialize;

/// Which part of the table produced a [`Conversion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampStatus {
    /// The input fell inside the table and was linearly interpolated.
    Interpolated,
    /// The input was above the largest key; the largest value was returned.
    ClampedHigh,
    /// No key was strictly below the input; the smallest value was returned.
    ClampedLow,
}

impl ClampStatus {
    pub fn is_clamped(self) -> bool {
        self != ClampStatus::Interpolated
    }
}

impl fmt::Display for ClampStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClampStatus::Interpolated => write!(f, "interpolated"),
            ClampStatus::ClampedHigh => write!(f, "clamped high"),
            ClampStatus::ClampedLow => write!(f, "clamped low"),
        }
    }
}

/// A converted value together with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conversion {
    pub value: f64,
    pub status: ClampStatus,
}

impl Conversion {
    fn clamped(value: f64, status: ClampStatus) -> Self {
        Self { value, status }
    }
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Look up `x` among ascending `keys` and map it onto `values`.
///
/// The segment used is `[i, i + 1]` where `i` is the largest index with
/// `keys[i] < x`, so an exact hit on `keys[k]` interpolates over
/// `[k - 1, k]`. Inputs above `max(keys)` return `max(values)`; inputs with
/// no strictly smaller key return `min(values)`.
///
/// `keys` and `values` must have the same length, at least 2.
pub fn interpolate(keys: &[f64], values: &[f64], x: f64) -> Conversion {
    debug_assert_eq!(keys.len(), values.len());
    debug_assert!(keys.len() >= 2);

    if x > max(keys) {
        return Conversion::clamped(max(values), ClampStatus::ClampedHigh);
    }

    let Some(i) = keys.iter().rposition(|&k| k < x) else {
        return Conversion::clamped(min(values), ClampStatus::ClampedLow);
    };

    // Only reachable with unsorted keys: the last key is below x yet not the max.
    let (Some(&k1), Some(&v1)) = (keys.get(i + 1), values.get(i + 1)) else {
        return Conversion::clamped(max(values), ClampStatus::ClampedHigh);
    };

    let (k0, v0) = (keys[i], values[i]);
    let slope = (v1 - v0) / (k1 - k0);

    Conversion {
        value: slope * (x - k0) + v0,
        status: ClampStatus::Interpolated,
    }
}
