//! Sweep generator: expand a closed `[min, max]` range into discrete values

/// Smallest value a sweep parameter may take.
pub const PARAMETER_MIN: f64 = 0.1;

/// Largest value a sweep parameter may take.
pub const PARAMETER_MAX: f64 = 1.0;

/// Default sweep increment.
pub const DEFAULT_STEP: f64 = 0.1;

/// Relative slack when comparing a stepped value against `max`.
const DRIFT_TOLERANCE: f64 = 1e-9;

/// Round to one decimal place, half away from zero.
#[inline]
#[must_use]
pub fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Expand `[min, max]` into `min, min + step, min + 2*step, ...`.
///
/// Generation continues while the stepped value is `<= max`; every emitted
/// value is rounded with [`round_to_tenth`]. Values are computed as
/// `min + k * step` rather than by repeated addition, and the `<= max`
/// comparison tolerates floating-point drift of a fraction of a step, so
/// `generate_range(0.3, 0.6, 0.1)` ends at `0.6`.
///
/// # Preconditions
///
/// `min < max`, both in `[0.1, 1.0]`, and `step > 0`. These are checked by
/// callers ([`crate::sweep::SweepBounds::validate`]), not here. When
/// `max - min < step` the result is `[min]`. A non-positive `step`, or any
/// non-finite argument, yields `[round_to_tenth(min)]` (NaN for a NaN `min`)
/// instead of looping forever.
///
/// # Examples
///
/// ```rust
/// use sweeplab::sweep::generate_range;
///
/// assert_eq!(generate_range(0.1, 0.5, 0.1), vec![0.1, 0.2, 0.3, 0.4, 0.5]);
/// assert_eq!(generate_range(0.1, 0.30000001, 0.1), vec![0.1, 0.2, 0.3]);
/// ```
#[must_use]
pub fn generate_range(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite() && min.is_finite() && max.is_finite()) {
        return vec![round_to_tenth(min)];
    }

    let limit = step.mul_add(DRIFT_TOLERANCE, max);
    let mut values = Vec::new();
    let mut k: u32 = 0;
    loop {
        let current = f64::from(k).mul_add(step, min);
        if current > limit {
            break;
        }
        values.push(round_to_tenth(current));
        k += 1;
    }
    values
}

/// The legacy "will generate N value(s)" estimate: `ceil((max - min) / step + 1)`.
///
/// This can disagree with `generate_range(min, max, step).len()` by one at
/// range boundaries. Display counts should come from the generated
/// sequences; this is kept to compare against.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimated_value_count(min: f64, max: f64, step: f64) -> usize {
    let estimate = ((max - min) / step + 1.0).ceil();
    if estimate.is_finite() && estimate > 0.0 {
        estimate as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_domain_has_ten_values() {
        let values = generate_range(0.1, 1.0, 0.1);
        assert_eq!(
            values,
            vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
        );
    }

    #[test]
    fn test_drift_past_max_is_rounded_away() {
        assert_eq!(generate_range(0.1, 0.300_000_01, 0.1), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_inclusive_upper_bound_despite_drift() {
        // 0.3 + 3 * 0.1 == 0.6000000000000001
        assert_eq!(generate_range(0.3, 0.6, 0.1), vec![0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn test_narrow_range_yields_min() {
        assert_eq!(generate_range(0.1, 0.15, 0.1), vec![0.1]);
    }

    #[test]
    fn test_non_finite_arguments_terminate() {
        assert_eq!(generate_range(0.1, f64::INFINITY, 0.1), vec![0.1]);
        assert_eq!(generate_range(0.1, 1.0, f64::NAN), vec![0.1]);
        assert_eq!(generate_range(0.1, f64::NAN, 0.1), vec![0.1]);
        let nan_min = generate_range(f64::NAN, 1.0, 0.1);
        assert_eq!(nan_min.len(), 1);
        assert!(nan_min[0].is_nan());
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert!((round_to_tenth(0.25) - 0.3).abs() < f64::EPSILON);
        assert!((round_to_tenth(-0.25) + 0.3).abs() < f64::EPSILON);
        assert!((round_to_tenth(0.349_999) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_disagrees_on_inexact_span() {
        // (0.35 - 0.1) / 0.1 + 1 = 3.5 -> ceil 4, but only 0.1, 0.2, 0.3 fit
        assert_eq!(estimated_value_count(0.1, 0.35, 0.1), 4);
        assert_eq!(generate_range(0.1, 0.35, 0.1).len(), 3);
    }
}
