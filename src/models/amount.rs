//! Fixed-point quantities and money rounding
//!
//! hledger reports every amount as a `(mantissa, decimal places)` pair. This
//! module turns those into `f64` values and owns the single rounding rule used
//! when report values are emitted.

use serde::{Deserialize, Serialize};

/// A fixed-point quantity: `value = mantissa / 10^places`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quantity {
    pub mantissa: i64,
    pub places: u32,
}

impl Quantity {
    pub const fn new(mantissa: i64, places: u32) -> Self {
        Self { mantissa, places }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Decimal value of the quantity. No rounding happens here.
    pub fn to_f64(self) -> f64 {
        normalize(self.mantissa, self.places)
    }
}

/// Convert a `(mantissa, scale)` pair into its decimal value.
///
/// Negative scales are not representable; callers reject them while parsing.
pub fn normalize(mantissa: i64, scale: u32) -> f64 {
    if scale == 0 {
        return mantissa as f64;
    }
    mantissa as f64 / 10f64.powi(scale as i32)
}

/// Round a monetary value to 2 decimal places.
///
/// Applied once, when a report field is emitted. Aggregation always works on
/// unrounded values.
pub fn round_money(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid emitting -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `amount / average * 100`, or 0 when the average is zero
pub fn percent_of(amount: f64, average: f64) -> f64 {
    if average == 0.0 {
        0.0
    } else {
        amount / average * 100.0
    }
}
