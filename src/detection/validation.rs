//! Detection validation helpers — reusable guards for rates, durations, and arrays.
//!
//! Purpose
//! -------
//! Centralize the small validation routines used across the detection stack.
//! These helpers enforce sanity checks for sampling rates, duration
//! parameters, detector thresholds, timestamps, and parallel-array lengths,
//! so constructors and entry points can fail fast with structured errors.
//!
//! Key behaviors
//! -------------
//! - Validate scalar parameters (sampling rate, durations in ms, positive
//!   thresholds) for finiteness and sign.
//! - Validate timestamp series for finiteness, non-negativity, and strict
//!   monotonicity.
//! - Validate that parallel arrays share the trial length.
//!
//! Conventions
//! -----------
//! - Helpers return [`DetectResult`] and never panic on invalid inputs.
//! - Successful scalar validations return the value so call sites can
//!   validate-and-bind in one expression.
//! - This module contains no I/O and no logging.
//!
//! Downstream usage
//! ----------------
//! - `TrialSamples` and `EyeSamples` constructors call the array guards;
//!   detector constructors call the scalar guards before any data is
//!   touched.
//!
//! Testing notes
//! -------------
//! - Unit tests exercise each guard on representative valid and invalid
//!   inputs, including boundary cases (zeros, infinities, NaNs, equal
//!   consecutive timestamps, off-by-one lengths).
use crate::detection::errors::{DetectError, DetectResult};

/// Validate a sampling rate: finite and strictly positive Hz.
#[inline]
pub fn validate_sampling_rate(sampling_rate: f64) -> DetectResult<f64> {
    if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
        return Err(DetectError::InvalidSamplingRate(sampling_rate));
    }
    Ok(sampling_rate)
}

/// Validate a minimum-duration parameter: finite and strictly positive ms.
#[inline]
pub fn validate_min_duration(name: &'static str, value_ms: f64) -> DetectResult<f64> {
    if !value_ms.is_finite() || value_ms <= 0.0 {
        return Err(DetectError::InvalidDuration { name, value_ms });
    }
    Ok(value_ms)
}

/// Validate an inter-event-time parameter: finite and non-negative ms.
#[inline]
pub fn validate_inter_event_time(name: &'static str, value_ms: f64) -> DetectResult<f64> {
    if !value_ms.is_finite() || value_ms < 0.0 {
        return Err(DetectError::InvalidDuration { name, value_ms });
    }
    Ok(value_ms)
}

/// Validate a detector-specific numeric parameter: finite and strictly positive.
#[inline]
pub fn validate_positive_parameter(name: &'static str, value: f64) -> DetectResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DetectError::InvalidParameter { name, value });
    }
    Ok(value)
}

/// Validate that a parallel array matches the trial length.
#[inline]
pub fn validate_same_length(
    name: &'static str, expected: usize, actual: usize,
) -> DetectResult<()> {
    if expected != actual {
        return Err(DetectError::LengthMismatch { name, expected, actual });
    }
    Ok(())
}

/// Validate a timestamp series: finite, non-negative, strictly increasing.
///
/// Parameters
/// ----------
/// - `timestamps`: `&[f64]`
///   Raw timestamps in the trial's time unit.
///
/// Returns
/// -------
/// `DetectResult<()>`
///   - `Ok(())` when every entry is finite and non-negative and each delta
///     is strictly positive.
///   - `Err(DetectError::InvalidTimestamp)` at the first non-finite or
///     negative entry.
///   - `Err(DetectError::NonIncreasingTimestamps)` at the first index whose
///     value does not exceed its predecessor.
pub fn validate_timestamps(timestamps: &[f64]) -> DetectResult<()> {
    for (index, &value) in timestamps.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(DetectError::InvalidTimestamp { index, value });
        }
        if index > 0 && value <= timestamps[index - 1] {
            return Err(DetectError::NonIncreasingTimestamps { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accept/reject behavior of each scalar guard at its boundaries.
    // - Timestamp validation for NaN, negative, and non-increasing entries.
    // - Length matching for parallel arrays.
    //
    // They intentionally DO NOT cover:
    // - Higher-level constructors that call these guards; those carry their
    //   own tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify sampling-rate validation at and around zero.
    //
    // Given
    // -----
    // - Rates 500.0, 0.0, -1.0, and NaN.
    //
    // Expect
    // ------
    // - Only 500.0 is accepted (and returned unchanged).
    fn validate_sampling_rate_rejects_non_positive_and_non_finite() {
        // Act & Assert
        assert_eq!(validate_sampling_rate(500.0), Ok(500.0));
        assert!(validate_sampling_rate(0.0).is_err());
        assert!(validate_sampling_rate(-1.0).is_err());
        assert!(validate_sampling_rate(f64::NAN).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Verify the asymmetry between min-duration (strictly positive) and
    // inter-event-time (non-negative) validation.
    //
    // Given
    // -----
    // - The boundary value 0.0 for both guards.
    //
    // Expect
    // ------
    // - `validate_min_duration` rejects 0.0; `validate_inter_event_time`
    //   accepts it.
    fn duration_guards_treat_zero_differently() {
        // Act & Assert
        assert!(validate_min_duration("min_duration", 0.0).is_err());
        assert_eq!(validate_inter_event_time("inter_event_time", 0.0), Ok(0.0));
        assert!(validate_inter_event_time("inter_event_time", -5.0).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Verify timestamp validation for the three failure classes.
    //
    // Given
    // -----
    // - A valid series, one with a NaN, one with a negative entry, and one
    //   with a repeated value.
    //
    // Expect
    // ------
    // - Only the valid series passes; each failure reports the offending
    //   index.
    fn validate_timestamps_flags_nan_negative_and_repeats() {
        // Act & Assert
        assert!(validate_timestamps(&[0.0, 10.0, 20.0]).is_ok());
        assert!(matches!(
            validate_timestamps(&[0.0, f64::NAN, 20.0]),
            Err(DetectError::InvalidTimestamp { index: 1, .. })
        ));
        assert!(matches!(
            validate_timestamps(&[-1.0, 10.0]),
            Err(DetectError::InvalidTimestamp { index: 0, .. })
        ));
        assert!(matches!(
            validate_timestamps(&[0.0, 10.0, 10.0]),
            Err(DetectError::NonIncreasingTimestamps { index: 2 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify parallel-array length matching.
    //
    // Given
    // -----
    // - Matching and mismatching (expected, actual) pairs.
    //
    // Expect
    // ------
    // - A match passes; a mismatch names the offending array.
    fn validate_same_length_reports_offending_array() {
        // Act & Assert
        assert!(validate_same_length("x", 10, 10).is_ok());
        assert_eq!(
            validate_same_length("pupil", 10, 9),
            Err(DetectError::LengthMismatch { name: "pupil", expected: 10, actual: 9 })
        );
    }
}
