//! Fixation detectors — velocity-threshold and dispersion-threshold
//! variants.
//!
//! Purpose
//! -------
//! Detect fixations, the periods where gaze rests on a target. Two
//! candidate definitions are provided: the velocity-threshold (I-VT)
//! variant flags samples whose angular velocity stays at or below a
//! degrees-per-second threshold, and the dispersion-threshold variant
//! flags samples whose local spatial spread stays within a pixel
//! threshold.
//!
//! Key behaviors
//! -------------
//! - [`VelocityFixationDetector`] converts pixel displacements to visual
//!   angles with the configured viewer distance and screen geometry, then
//!   flags samples with `velocity <= threshold` (default 20 °/s). The
//!   first sample and NaN velocities are never candidates.
//! - [`DispersionFixationDetector`] slides a centred window of
//!   `max(2, floor(min_duration_ms · rate / 1000))` samples over the
//!   trace and flags the centre when
//!   `(max x − min x) + (max y − min y) <= threshold` pixels. NaN samples
//!   are ignored inside the window; an all-NaN window is not a candidate.
//!
//! Conventions
//! -----------
//! - Default minimum fixation duration is 55 ms with the 5 ms shared
//!   inter-event time.
//! - The dispersion window is clamped at the trace edges so every sample
//!   gets a full-width window.
//!
//! Testing notes
//! -------------
//! - Unit tests use a hold-jump-hold trace so the quiet plateaus are
//!   flagged and the jump is not, for both variants.
use crate::detection::{
    config::{DetectorParams, DispersionFixationConfig, VelocityFixationConfig},
    detector::CandidateFinder,
    errors::{DetectError, DetectResult},
    samples::EyeSamples,
    validation::validate_positive_parameter,
};
use crate::signal::geometry::{ScreenGeometry, angular_velocity};

/// Velocity-threshold (I-VT) fixation detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityFixationDetector {
    params: DetectorParams,
    velocity_threshold_deg_s: f64,
    viewer_distance_cm: f64,
    screen: ScreenGeometry,
}

impl VelocityFixationDetector {
    /// Construct from a config and the trial's sampling rate.
    ///
    /// Errors
    /// ------
    /// - `DetectError::InvalidParameter` for a non-finite or non-positive
    ///   velocity threshold or viewer distance.
    /// - `DetectError::InvalidSamplingRate` / `InvalidDuration` for
    ///   malformed shared scalars.
    pub fn new(config: &VelocityFixationConfig, sampling_rate: f64) -> DetectResult<Self> {
        validate_positive_parameter(
            "velocity_threshold",
            config.velocity_threshold_deg_s,
        )?;
        validate_positive_parameter("viewer_distance", config.viewer_distance_cm)?;
        Ok(VelocityFixationDetector {
            params: DetectorParams::new(
                sampling_rate,
                config.min_duration_ms,
                config.inter_event_time_ms,
            )?,
            velocity_threshold_deg_s: config.velocity_threshold_deg_s,
            viewer_distance_cm: config.viewer_distance_cm,
            screen: config.screen,
        })
    }
}

impl CandidateFinder for VelocityFixationDetector {
    fn params(&self) -> &DetectorParams {
        &self.params
    }

    fn find_candidates(&self, eye: &EyeSamples<'_>) -> DetectResult<Vec<bool>> {
        let velocities = angular_velocity(
            eye.x,
            eye.y,
            self.params.sampling_rate,
            self.viewer_distance_cm,
            &self.screen,
        )?;
        // NaN velocities (first sample, missing data) compare false.
        Ok(velocities
            .iter()
            .map(|&vel| vel <= self.velocity_threshold_deg_s)
            .collect())
    }
}

/// Dispersion-threshold fixation detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionFixationDetector {
    params: DetectorParams,
    dispersion_threshold_px: f64,
}

impl DispersionFixationDetector {
    /// Construct from a config and the trial's sampling rate.
    ///
    /// Errors
    /// ------
    /// - `DetectError::InvalidParameter` for a non-finite or non-positive
    ///   dispersion threshold.
    /// - `DetectError::InvalidSamplingRate` / `InvalidDuration` for
    ///   malformed shared scalars.
    pub fn new(config: &DispersionFixationConfig, sampling_rate: f64) -> DetectResult<Self> {
        validate_positive_parameter(
            "dispersion_threshold",
            config.dispersion_threshold_px,
        )?;
        Ok(DispersionFixationDetector {
            params: DetectorParams::new(
                sampling_rate,
                config.min_duration_ms,
                config.inter_event_time_ms,
            )?,
            dispersion_threshold_px: config.dispersion_threshold_px,
        })
    }

    /// Window width in samples: the minimum fixation duration expressed in
    /// samples, never below 2.
    #[inline]
    fn window_samples(&self) -> usize {
        self.params.min_samples_within_event().max(2)
    }
}

/// Peak-to-peak spread of the finite values in a window, or `None` when
/// the window holds no finite value.
#[inline]
fn finite_range(values: &[f64]) -> Option<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in values {
        if value.is_finite() {
            min = min.min(value);
            max = max.max(value);
        }
    }
    if min <= max { Some(max - min) } else { None }
}

impl CandidateFinder for DispersionFixationDetector {
    fn params(&self) -> &DetectorParams {
        &self.params
    }

    fn find_candidates(&self, eye: &EyeSamples<'_>) -> DetectResult<Vec<bool>> {
        let n = eye.len();
        let window = self.window_samples();
        if n < window {
            return Err(DetectError::SignalTooShort { required: window, actual: n });
        }

        let half = window / 2;
        let mut candidates = Vec::with_capacity(n);
        for i in 0..n {
            // Full-width window centred on i, clamped at the edges.
            let end = (i.saturating_sub(half) + window).min(n);
            let start = end - window;
            let spread_x = finite_range(&eye.x[start..end]);
            let spread_y = finite_range(&eye.y[start..end]);
            let candidate = match (spread_x, spread_y) {
                (Some(dx), Some(dy)) => dx + dy <= self.dispersion_threshold_px,
                _ => false,
            };
            candidates.push(candidate);
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::detector::detect_monocular;

    fn unit_screen() -> ScreenGeometry {
        // 10 cm / 10 px per axis, so one pixel subtends a whole
        // centimeter.
        ScreenGeometry::new(10.0, 10.0, (10, 10)).unwrap()
    }

    /// Hold at (2, 2), jump to (7, 7) at index 30, hold again.
    fn hold_jump_hold(n: usize) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|i| if i < 30 { 2.0 } else { 7.0 }).collect();
        let y = x.clone();
        (x, y)
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - I-VT candidates over a hold-jump-hold trace, including the NaN
    //   first sample.
    // - Dispersion candidates over the same trace, NaN handling inside the
    //   window, and the short-signal error.
    // - Constructor validation for both variants.
    //
    // They intentionally DO NOT cover:
    // - The angular-velocity conversion itself; signal::geometry pins it.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the I-VT candidate test: still samples are candidates, the
    // jump sample and the NaN first velocity are not.
    //
    // Given
    // -----
    // - A hold-jump-hold trace at 100 Hz, 1 cm viewing distance on the
    //   10 cm / 10 px screen (so the 5-px jump subtends far more than the
    //   20 °/s threshold allows).
    //
    // Expect
    // ------
    // - candidates[0] is false, candidates[30] is false, every other
    //   sample is true.
    fn velocity_candidates_flag_still_samples_only() {
        // Arrange
        let (x, y) = hold_jump_hold(60);
        let eye = EyeSamples::new(&x, &y, None).unwrap();
        let config = VelocityFixationConfig::new(1.0, unit_screen());
        let detector = VelocityFixationDetector::new(&config, 100.0).unwrap();

        // Act
        let candidates = detector.find_candidates(&eye).unwrap();

        // Assert
        for (i, &flag) in candidates.iter().enumerate() {
            let expected = i != 0 && i != 30;
            assert_eq!(flag, expected, "candidates[{i}]");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the full monocular I-VT pipeline: the single fast jump
    // sample is a one-sample interior gap, within the inter-event
    // threshold, so the two plateaus merge into one fixation.
    //
    // Given
    // -----
    // - The hold-jump-hold trace at 100 Hz (55 ms = 5 samples within,
    //   5 ms = 1 sample between).
    //
    // Expect
    // ------
    // - Samples 1..=59 are fixation (the gap at 30 is absorbed); sample 0
    //   is not.
    fn velocity_detect_monocular_absorbs_single_sample_jump() {
        // Arrange
        let (x, y) = hold_jump_hold(60);
        let eye = EyeSamples::new(&x, &y, None).unwrap();
        let config = VelocityFixationConfig::new(1.0, unit_screen());
        let detector = VelocityFixationDetector::new(&config, 100.0).unwrap();

        // Act
        let mask = detect_monocular(&detector, &eye).unwrap();

        // Assert
        for (i, &flag) in mask.iter().enumerate() {
            let expected = i != 0;
            assert_eq!(flag, expected, "mask[{i}]");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the dispersion candidate test: plateau centres are
    // candidates, windows straddling the jump are not, and NaN samples
    // inside a window are ignored.
    //
    // Given
    // -----
    // - The hold-jump-hold trace at 100 Hz (window = 5 samples) with a NaN
    //   injected at index 10, and an 8 px threshold: windows straddling
    //   the jump spread (5 + 5) = 10 px, above it; plateau windows spread
    //   0 px.
    //
    // Expect
    // ------
    // - Samples whose window stays on one plateau are candidates,
    //   including the neighbourhood of the NaN; samples whose window
    //   straddles index 30 are not.
    fn dispersion_candidates_ignore_nan_and_respect_jump() {
        // Arrange
        let (mut x, y) = hold_jump_hold(60);
        x[10] = f64::NAN;
        let eye = EyeSamples::new(&x, &y, None).unwrap();
        let config = DispersionFixationConfig {
            dispersion_threshold_px: 8.0,
            ..DispersionFixationConfig::default()
        };
        let detector = DispersionFixationDetector::new(&config, 100.0).unwrap();

        // Act
        let candidates = detector.find_candidates(&eye).unwrap();

        // Assert
        // Window is 5 samples with half-width 2: indices 28..=31 see both
        // plateaus.
        for (i, &flag) in candidates.iter().enumerate() {
            let expected = !(28..=31).contains(&i);
            assert_eq!(flag, expected, "candidates[{i}]");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the all-NaN-window edge case and the short-signal error.
    //
    // Given
    // -----
    // - A 6-sample trace whose first five x values are NaN (the leading
    //   windows hold no finite x), and a 3-sample trace with a 5-sample
    //   window.
    //
    // Expect
    // ------
    // - The leading centres are not candidates; the short trace errors
    //   with `SignalTooShort`.
    fn dispersion_all_nan_window_and_short_signal() {
        // Arrange
        let detector =
            DispersionFixationDetector::new(&DispersionFixationConfig::default(), 100.0)
                .unwrap();
        let x = [f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN, 1.0];
        let y = [1.0; 6];
        let eye = EyeSamples::new(&x, &y, None).unwrap();
        let xs = [1.0; 3];
        let ys = [1.0; 3];
        let short = EyeSamples::new(&xs, &ys, None).unwrap();

        // Act
        let candidates = detector.find_candidates(&eye).unwrap();
        let error = detector.find_candidates(&short);

        // Assert
        // Index 0's window covers 0..=4, all NaN in x.
        assert!(!candidates[0]);
        assert!(candidates[5], "the trailing window holds a finite x value");
        assert_eq!(error, Err(DetectError::SignalTooShort { required: 5, actual: 3 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify constructor validation for both variants.
    //
    // Given
    // -----
    // - A zero velocity threshold, a zero viewer distance, and a zero
    //   dispersion threshold.
    //
    // Expect
    // ------
    // - Each constructor returns `InvalidParameter` naming the offending
    //   scalar.
    fn fixation_constructors_reject_non_positive_parameters() {
        // Arrange
        let mut velocity_config = VelocityFixationConfig::new(60.0, unit_screen());
        velocity_config.velocity_threshold_deg_s = 0.0;

        // Act & Assert
        assert!(matches!(
            VelocityFixationDetector::new(&velocity_config, 100.0),
            Err(DetectError::InvalidParameter { name: "velocity_threshold", .. })
        ));
        assert!(matches!(
            VelocityFixationDetector::new(
                &VelocityFixationConfig::new(0.0, unit_screen()),
                100.0,
            ),
            Err(DetectError::InvalidParameter { name: "viewer_distance", .. })
        ));
        assert!(matches!(
            DispersionFixationDetector::new(
                &DispersionFixationConfig {
                    dispersion_threshold_px: 0.0,
                    ..Default::default()
                },
                100.0,
            ),
            Err(DetectError::InvalidParameter { name: "dispersion_threshold", .. })
        ));
    }
}
