//! Saccade detector — Engbert adaptive velocity threshold.
//!
//! Purpose
//! -------
//! Detect saccades — rapid ballistic eye movements — with the
//! Engbert–Kliegl adaptive noise-threshold test: per-axis velocities from
//! the centred derivative, normalized by median-based robust standard
//! deviations, flagged where they leave an ellipse scaled by the noise
//! multiplier λ.
//!
//! Key behaviors
//! -------------
//! - Velocities: `vel_x = centered_derivative(x, window)` and likewise for
//!   y (window default 3 samples).
//! - Robust per-axis scales: `sd = median_standard_deviation(vel)`, never
//!   ≤ 0 thanks to its floor.
//! - Candidate test: `(vel_x / (sd_x·λ))² + (vel_y / (sd_y·λ))² > 1`.
//!   NaN velocities (window edges, missing samples) compare false and are
//!   never candidates.
//!
//! Invariants & assumptions
//! ------------------------
//! - The signal must contain at least `2 × window` samples; shorter
//!   signals error before any computation.
//! - The threshold adapts per trial and per eye: noisier recordings get a
//!   proportionally wider ellipse.
//!
//! Conventions
//! -----------
//! - Default minimum saccade duration is 5 ms with the 5 ms shared
//!   inter-event time.
//!
//! Testing notes
//! -------------
//! - Unit tests inject a step displacement into an otherwise jittery
//!   signal and verify that only the step region is flagged, plus the
//!   short-signal error.
use crate::detection::{
    config::{DetectorParams, EngbertSaccadeConfig},
    detector::CandidateFinder,
    errors::{DetectError, DetectResult},
    samples::EyeSamples,
    validation::validate_positive_parameter,
};
use crate::signal::primitives::{centered_derivative, median_standard_deviation};

/// Engbert-style adaptive velocity-threshold saccade detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngbertSaccadeDetector {
    params: DetectorParams,
    window: usize,
    noise_multiplier: f64,
}

impl EngbertSaccadeDetector {
    /// Construct from a config and the trial's sampling rate.
    ///
    /// Errors
    /// ------
    /// - `DetectError::InvalidParameter` for a zero window or a
    ///   non-finite / non-positive noise multiplier.
    /// - `DetectError::InvalidSamplingRate` / `InvalidDuration` for
    ///   malformed shared scalars.
    pub fn new(config: &EngbertSaccadeConfig, sampling_rate: f64) -> DetectResult<Self> {
        if config.derivation_window == 0 {
            return Err(DetectError::InvalidParameter {
                name: "derivation_window",
                value: 0.0,
            });
        }
        validate_positive_parameter("noise_multiplier", config.noise_multiplier)?;
        Ok(EngbertSaccadeDetector {
            params: DetectorParams::new(
                sampling_rate,
                config.min_duration_ms,
                config.inter_event_time_ms,
            )?,
            window: config.derivation_window,
            noise_multiplier: config.noise_multiplier,
        })
    }
}

impl CandidateFinder for EngbertSaccadeDetector {
    fn params(&self) -> &DetectorParams {
        &self.params
    }

    fn find_candidates(&self, eye: &EyeSamples<'_>) -> DetectResult<Vec<bool>> {
        let n = eye.len();
        if n < 2 * self.window {
            return Err(DetectError::SignalTooShort { required: 2 * self.window, actual: n });
        }

        let vel_x = centered_derivative(eye.x, self.window)?;
        let vel_y = centered_derivative(eye.y, self.window)?;
        let sd_x = median_standard_deviation(&vel_x, None)?;
        let sd_y = median_standard_deviation(&vel_y, None)?;

        let scale_x = sd_x * self.noise_multiplier;
        let scale_y = sd_y * self.noise_multiplier;
        Ok(vel_x
            .iter()
            .zip(&vel_y)
            .map(|(&vx, &vy)| {
                let ex = vx / scale_x;
                let ey = vy / scale_y;
                // NaN velocities compare false here, so edges and missing
                // samples are never candidates.
                ex * ex + ey * ey > 1.0
            })
            .collect())
    }
}
