//! Blink detectors — missing-data and pupil-size variants.
//!
//! Purpose
//! -------
//! Detect blinks, the periods where gaze data is unavailable because the
//! eyelid occludes the pupil. Two candidate definitions are provided: the
//! missing-data variant flags samples whose coordinates are absent, and
//! the pupil-size variant flags samples whose pupil measurement collapses.
//!
//! Key behaviors
//! -------------
//! - [`MissingDataBlinkDetector`] flags a sample when x or y equals the
//!   configured sentinel, or is NaN. NaN counts as missing whether or not
//!   a literal sentinel is configured, so trackers that mix the two
//!   conventions are handled uniformly.
//! - [`PupilSizeBlinkDetector`] flags a sample when the pupil value is
//!   non-finite or at/below the configured floor (default 0 mm); it
//!   requires the trial to carry a pupil series.
//!
//! Conventions
//! -----------
//! - Defaults: 50 ms minimum blink duration, 20 ms inter-event time (two
//!   blink runs closer than that merge into one blink).
//!
//! Downstream usage
//! ----------------
//! - Constructed by the engine from a `BlinkDetectorSpec` plus the trial's
//!   derived sampling rate; run through `detect_monocular` /
//!   `detect_binocular`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover sentinel and NaN candidates, run merging across
//!   short gaps, the pupil floor, and the missing-pupil error.
use crate::detection::{
    config::{DetectorParams, MissingDataBlinkConfig, PupilSizeBlinkConfig},
    detector::CandidateFinder,
    errors::{DetectError, DetectResult},
    samples::EyeSamples,
};

/// Blink detector flagging samples with missing coordinate data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissingDataBlinkDetector {
    params: DetectorParams,
    missing_value: Option<f64>,
}

impl MissingDataBlinkDetector {
    /// Construct from a config and the trial's sampling rate.
    ///
    /// Errors
    /// ------
    /// - `DetectError::InvalidSamplingRate` / `InvalidDuration` for
    ///   malformed scalars; a non-finite literal sentinel is rejected as
    ///   `InvalidParameter` (use `None` for the NaN convention).
    pub fn new(config: &MissingDataBlinkConfig, sampling_rate: f64) -> DetectResult<Self> {
        if let Some(sentinel) = config.missing_value {
            if !sentinel.is_finite() {
                return Err(DetectError::InvalidParameter {
                    name: "missing_value",
                    value: sentinel,
                });
            }
        }
        Ok(MissingDataBlinkDetector {
            params: DetectorParams::new(
                sampling_rate,
                config.min_duration_ms,
                config.inter_event_time_ms,
            )?,
            missing_value: config.missing_value,
        })
    }

    #[inline]
    fn is_missing(&self, value: f64) -> bool {
        if value.is_nan() {
            return true;
        }
        match self.missing_value {
            Some(sentinel) => value == sentinel,
            None => false,
        }
    }
}

impl CandidateFinder for MissingDataBlinkDetector {
    fn params(&self) -> &DetectorParams {
        &self.params
    }

    fn find_candidates(&self, eye: &EyeSamples<'_>) -> DetectResult<Vec<bool>> {
        Ok(eye
            .x
            .iter()
            .zip(eye.y)
            .map(|(&x, &y)| self.is_missing(x) || self.is_missing(y))
            .collect())
    }
}

/// Blink detector flagging samples whose pupil measurement collapses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PupilSizeBlinkDetector {
    params: DetectorParams,
    min_pupil_size_mm: f64,
}

impl PupilSizeBlinkDetector {
    /// Construct from a config and the trial's sampling rate.
    ///
    /// Errors
    /// ------
    /// - `DetectError::InvalidParameter` when the pupil floor is NaN or
    ///   ±∞ (zero and negative floors are valid: "at or below zero" is the
    ///   default candidate test).
    pub fn new(config: &PupilSizeBlinkConfig, sampling_rate: f64) -> DetectResult<Self> {
        if !config.min_pupil_size_mm.is_finite() {
            return Err(DetectError::InvalidParameter {
                name: "min_pupil_size",
                value: config.min_pupil_size_mm,
            });
        }
        Ok(PupilSizeBlinkDetector {
            params: DetectorParams::new(
                sampling_rate,
                config.min_duration_ms,
                config.inter_event_time_ms,
            )?,
            min_pupil_size_mm: config.min_pupil_size_mm,
        })
    }
}

impl CandidateFinder for PupilSizeBlinkDetector {
    fn params(&self) -> &DetectorParams {
        &self.params
    }

    fn find_candidates(&self, eye: &EyeSamples<'_>) -> DetectResult<Vec<bool>> {
        let pupil = eye.pupil.ok_or(DetectError::MissingPupilData)?;
        Ok(pupil
            .iter()
            .map(|&value| !value.is_finite() || value <= self.min_pupil_size_mm)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::detector::detect_monocular;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - NaN and literal-sentinel candidate membership.
    // - End-to-end monocular blink masks, including run merging across a
    //   sub-threshold gap.
    // - Pupil-floor candidates and the missing-pupil error.
    //
    // They intentionally DO NOT cover:
    // - Binocular combination; detector.rs tests that generically.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify candidate membership for the NaN convention and for a
    // literal sentinel.
    //
    // Given
    // -----
    // - x = [1, NaN, -1000, 2] with sentinel None, then sentinel -1000.
    //
    // Expect
    // ------
    // - With None only the NaN sample is a candidate; with -1000 both the
    //   NaN and the sentinel samples are.
    fn missing_data_candidates_respect_sentinel_convention() {
        // Arrange
        let x = [1.0, f64::NAN, -1_000.0, 2.0];
        let y = [1.0, 1.0, 1.0, 1.0];
        let eye = EyeSamples::new(&x, &y, None).unwrap();

        let nan_only = MissingDataBlinkDetector::new(
            &MissingDataBlinkConfig::default(),
            100.0,
        )
        .unwrap();
        let with_sentinel = MissingDataBlinkDetector::new(
            &MissingDataBlinkConfig {
                missing_value: Some(-1_000.0),
                ..MissingDataBlinkConfig::default()
            },
            100.0,
        )
        .unwrap();

        // Act & Assert
        assert_eq!(
            nan_only.find_candidates(&eye).unwrap(),
            vec![false, true, false, false]
        );
        assert_eq!(
            with_sentinel.find_candidates(&eye).unwrap(),
            vec![false, true, true, false]
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the end-to-end monocular blink mask: two NaN runs separated
    // by a gap under the inter-event threshold merge into one blink.
    //
    // Given
    // -----
    // - 100 Hz, defaults (50 ms minimum = 5 samples, 20 ms gap = 2
    //   samples). NaN at indices 10..=14 and 16..=20, one valid sample at
    //   15.
    //
    // Expect
    // ------
    // - One merged blink spanning 10..=20; everything else false.
    fn missing_data_blink_merges_runs_across_short_gap() {
        // Arrange
        let n = 40;
        let mut x: Vec<f64> = vec![1.0; n];
        let y: Vec<f64> = vec![1.0; n];
        for i in 10..=14 {
            x[i] = f64::NAN;
        }
        for i in 16..=20 {
            x[i] = f64::NAN;
        }
        let eye = EyeSamples::new(&x, &y, None).unwrap();
        let detector = MissingDataBlinkDetector::new(
            &MissingDataBlinkConfig::default(),
            100.0,
        )
        .unwrap();

        // Act
        let mask = detect_monocular(&detector, &eye).unwrap();

        // Assert
        for (i, &flag) in mask.iter().enumerate() {
            let expected = (10..=20).contains(&i);
            assert_eq!(flag, expected, "mask[{i}]");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify pupil-floor candidates and the missing-pupil error.
    //
    // Given
    // -----
    // - A pupil series [3.0, 0.0, NaN, 2.5] with the default 0 mm floor;
    //   and an eye view without a pupil series.
    //
    // Expect
    // ------
    // - Candidates [F,T,T,F]; the pupil-less view errors with
    //   `MissingPupilData`.
    fn pupil_size_candidates_flag_collapsed_measurements() {
        // Arrange
        let x = [1.0; 4];
        let y = [1.0; 4];
        let pupil = [3.0, 0.0, f64::NAN, 2.5];
        let with_pupil = EyeSamples::new(&x, &y, Some(&pupil)).unwrap();
        let without_pupil = EyeSamples::new(&x, &y, None).unwrap();
        let detector =
            PupilSizeBlinkDetector::new(&PupilSizeBlinkConfig::default(), 100.0).unwrap();

        // Act & Assert
        assert_eq!(
            detector.find_candidates(&with_pupil).unwrap(),
            vec![false, true, true, false]
        );
        assert_eq!(
            detector.find_candidates(&without_pupil),
            Err(DetectError::MissingPupilData)
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify constructor validation of the sentinel and the pupil floor.
    //
    // Given
    // -----
    // - A NaN literal sentinel and a NaN pupil floor.
    //
    // Expect
    // ------
    // - Both constructors return `InvalidParameter`.
    fn blink_constructors_reject_non_finite_parameters() {
        // Act & Assert
        assert!(matches!(
            MissingDataBlinkDetector::new(
                &MissingDataBlinkConfig {
                    missing_value: Some(f64::NAN),
                    ..MissingDataBlinkConfig::default()
                },
                100.0,
            ),
            Err(DetectError::InvalidParameter { name: "missing_value", .. })
        ));
        assert!(matches!(
            PupilSizeBlinkDetector::new(
                &PupilSizeBlinkConfig {
                    min_pupil_size_mm: f64::NAN,
                    ..PupilSizeBlinkConfig::default()
                },
                100.0,
            ),
            Err(DetectError::InvalidParameter { name: "min_pupil_size", .. })
        ));
    }
}
