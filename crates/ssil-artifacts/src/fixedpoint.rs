//! Fixed-point decimal rendering (q6)
//!
//! # Rule
//!
//! Every real-valued output field is rendered with exactly 6 fractional
//! digits. Rounding is half-away-from-zero and is applied to the *decimal*
//! value nearest the binary float, i.e. its shortest round-trip
//! representation, not to the exact binary expansion. `0.0000005` (stored as
//! `4.99999999999999977e-7`) therefore renders as `0.000001`.
//!
//! # Sign
//!
//! The sign of the rendered value is the sign bit of the input: negative
//! values that round to zero keep their `-` (`-0.000000`). Signed fields add
//! an explicit `+` for non-negative values.
//!
//! # Range
//!
//! Quantised values must fit 28 significant decimal digits (22 integer
//! digits + 6 fractional). Magnitudes at or above 1e22 are rejected rather
//! than silently rendered in a different shape.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use ssil_core::SsilError;

/// Fractional digits in every rendered real.
pub const FRAC_DIGITS: u32 = 6;

/// Smallest magnitude that cannot be quantised.
pub const MAX_MAGNITUDE: f64 = 1e22;

/// Anything below this rounds to zero at 6 digits; skip decimal parsing of
/// long subnormal-ish expansions.
const ZERO_BAND: f64 = 1e-7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignStyle {
    /// `+0.125000` / `-0.125000`
    Explicit,
    /// `0.125000` / `-0.125000`
    NegativeOnly,
}

/// Render `x` per the q6 rule.
pub fn format_q6(x: f64, style: SignStyle) -> Result<String, SsilError> {
    if !x.is_finite() {
        return Err(SsilError::invalid_input(format!(
            "cannot render non-finite value {x}"
        )));
    }
    let mag = x.abs();
    if mag >= MAX_MAGNITUDE {
        return Err(SsilError::invalid_input(format!(
            "value {x} exceeds 28-digit decimal quantisation range"
        )));
    }

    let body = quantize_magnitude(mag)?;
    let sign = if x.is_sign_negative() {
        "-"
    } else if style == SignStyle::Explicit {
        "+"
    } else {
        ""
    };
    Ok(format!("{sign}{body}"))
}

fn quantize_magnitude(mag: f64) -> Result<String, SsilError> {
    if mag < ZERO_BAND {
        return Ok("0.000000".to_string());
    }

    // f64 Display is the shortest round-trip representation, always positional.
    let repr = mag.to_string();
    let d = Decimal::from_str(&repr)
        .map_err(|e| SsilError::invalid_input(format!("decimal parse of '{repr}': {e}")))?;

    let mut q = d.round_dp_with_strategy(FRAC_DIGITS, RoundingStrategy::MidpointAwayFromZero);
    q.rescale(FRAC_DIGITS);
    Ok(q.to_string())
}
