//! Decimal rounding for values leaving the aggregator.
//!
//! Values are scaled by `10^decimals`, rounded half away from zero with
//! [`f64::round`], and scaled back. Ties are judged on the scaled binary
//! value, so `1.005` (stored as `1.00499…`) rounds to `1.0` while `0.125`
//! rounds to `0.13`. Non-finite inputs are returned unchanged.

/// Round `value` to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    // Scaling overflowed; the value has no fractional digits worth keeping.
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // Keep -0.0 out of the output.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round to cents, used for every revenue figure.
pub fn round_currency(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to tenths, used for average delivery days.
pub fn round_tenths(value: f64) -> f64 {
    round_to(value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_float_artifacts_are_removed() {
        assert_eq!(round_currency(10.0 * 0.1), 1.0);
        assert_eq!(round_currency(3.0 * 0.1), 0.3);
        assert_eq!(round_currency(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_half_away_from_zero() {
        assert_eq!(round_currency(0.125), 0.13);
        assert_eq!(round_currency(-0.125), -0.13);
        assert_eq!(round_tenths(2.25), 2.3);
        assert_eq!(round_tenths(4.0), 4.0);
    }

    #[test]
    fn test_binary_ties_round_down() {
        // 1.005 is stored slightly below the tie
        assert_eq!(round_currency(1.005), 1.0);
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        let rounded = round_currency(-0.001);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_currency(f64::NAN).is_nan());
        assert_eq!(round_currency(f64::INFINITY), f64::INFINITY);
        assert_eq!(round_currency(f64::MAX), f64::MAX);
    }
}
