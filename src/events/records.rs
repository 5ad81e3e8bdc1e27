//! Event records — typed blink, saccade, and fixation results.
//!
//! Purpose
//! -------
//! Define the typed records the mask-to-event builder produces, one struct
//! per event category, plus the duration-based outlier bounds used to flag
//! implausible events.
//!
//! Key behaviors
//! -------------
//! - Every record carries the closed sample-index interval it spans, the
//!   corresponding start/end timestamps (in the trial's recorded unit),
//!   and the duration in milliseconds.
//! - Saccades add displacement geometry: start and end points, the
//!   azimuth in degrees (counter-clockwise from the positive x-axis, with
//!   screen y flipped so "up" is positive), and, when viewing geometry is
//!   available, the amplitude as a visual angle.
//! - Fixations add positional and physiological statistics: NaN-ignoring
//!   centre of mass, maximum pairwise pixel dispersion, and optional
//!   angular-velocity and pupil-size summaries.
//! - `is_outlier` compares the duration against an [`OutlierBounds`]
//!   window; each category has layered defaults on top of the 1–10 000 ms
//!   base.
//!
//! Conventions
//! -----------
//! - Optional statistics are `None` when their inputs are unavailable (no
//!   viewing geometry, no pupil series, no finite samples) — never NaN.
//!
//! Downstream usage
//! ----------------
//! - Produced by `events::builder::events_from_masks`; consumed by
//!   analysis code and the Python bindings.

/// Base outlier minimum duration (ms).
pub const DEFAULT_MIN_EVENT_DURATION_MS: f64 = 1.0;
/// Base outlier maximum duration (ms).
pub const DEFAULT_MAX_EVENT_DURATION_MS: f64 = 10_000.0;

/// `OutlierBounds` — plausible duration window for one event category.
///
/// The base window is 1–10 000 ms; the per-category constructors layer the
/// physiological defaults on top (blink 50–1000 ms, saccade 5–250 ms,
/// fixation 55–2500 ms).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBounds {
    /// Durations below this (ms) are outliers.
    pub min_duration_ms: f64,
    /// Durations above this (ms) are outliers.
    pub max_duration_ms: f64,
}

impl Default for OutlierBounds {
    fn default() -> Self {
        OutlierBounds {
            min_duration_ms: DEFAULT_MIN_EVENT_DURATION_MS,
            max_duration_ms: DEFAULT_MAX_EVENT_DURATION_MS,
        }
    }
}

impl OutlierBounds {
    /// Blink defaults: 50–1000 ms.
    pub fn blink() -> Self {
        OutlierBounds { min_duration_ms: 50.0, max_duration_ms: 1_000.0 }
    }

    /// Saccade defaults: 5–250 ms.
    pub fn saccade() -> Self {
        OutlierBounds { min_duration_ms: 5.0, max_duration_ms: 250.0 }
    }

    /// Fixation defaults: 55–2500 ms.
    pub fn fixation() -> Self {
        OutlierBounds { min_duration_ms: 55.0, max_duration_ms: 2_500.0 }
    }

    /// Whether a duration falls outside this window.
    #[inline]
    pub fn is_outlier(&self, duration_ms: f64) -> bool {
        duration_ms < self.min_duration_ms || duration_ms > self.max_duration_ms
    }
}

/// One detected blink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkEvent {
    /// First sample index of the event (closed interval).
    pub start_index: usize,
    /// Last sample index of the event (closed interval).
    pub end_index: usize,
    /// Timestamp of the first sample, in the trial's unit.
    pub start_time: f64,
    /// Timestamp of the last sample, in the trial's unit.
    pub end_time: f64,
    /// `end_time − start_time`, converted to milliseconds.
    pub duration_ms: f64,
}

impl BlinkEvent {
    /// Whether the blink's duration falls outside `bounds`.
    #[inline]
    pub fn is_outlier(&self, bounds: &OutlierBounds) -> bool {
        bounds.is_outlier(self.duration_ms)
    }
}

/// One detected saccade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaccadeEvent {
    /// First sample index of the event (closed interval).
    pub start_index: usize,
    /// Last sample index of the event (closed interval).
    pub end_index: usize,
    /// Timestamp of the first sample, in the trial's unit.
    pub start_time: f64,
    /// Timestamp of the last sample, in the trial's unit.
    pub end_time: f64,
    /// `end_time − start_time`, converted to milliseconds.
    pub duration_ms: f64,
    /// Gaze position (px) at the first sample.
    pub start_point: (f64, f64),
    /// Gaze position (px) at the last sample.
    pub end_point: (f64, f64),
    /// Direction of the start→end displacement, degrees counter-clockwise
    /// from the positive x-axis with screen y flipped. NaN when either
    /// endpoint is missing.
    pub azimuth_deg: f64,
    /// Visual angle (degrees) of the start→end displacement; `None`
    /// without viewing geometry.
    pub amplitude_deg: Option<f64>,
}

impl SaccadeEvent {
    /// Whether the saccade's duration falls outside `bounds`.
    #[inline]
    pub fn is_outlier(&self, bounds: &OutlierBounds) -> bool {
        bounds.is_outlier(self.duration_ms)
    }
}

/// One detected fixation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixationEvent {
    /// First sample index of the event (closed interval).
    pub start_index: usize,
    /// Last sample index of the event (closed interval).
    pub end_index: usize,
    /// Timestamp of the first sample, in the trial's unit.
    pub start_time: f64,
    /// Timestamp of the last sample, in the trial's unit.
    pub end_time: f64,
    /// `end_time − start_time`, converted to milliseconds.
    pub duration_ms: f64,
    /// NaN-ignoring mean gaze position (px); NaN components when the event
    /// holds no finite sample on that axis.
    pub center_of_mass: (f64, f64),
    /// Maximum pairwise pixel distance between the event's finite samples.
    pub dispersion_px: f64,
    /// Mean angular velocity (°/s) over the event, excluding the
    /// transition into its first sample; `None` without viewing geometry
    /// or finite velocities.
    pub mean_velocity_deg_s: Option<f64>,
    /// Maximum angular velocity (°/s) over the event, excluding the
    /// transition into its first sample; `None` without viewing geometry
    /// or finite velocities.
    pub max_velocity_deg_s: Option<f64>,
    /// NaN-ignoring mean pupil size (mm); `None` without a pupil series.
    pub mean_pupil_size_mm: Option<f64>,
    /// NaN-ignoring sample standard deviation of pupil size (mm); `None`
    /// without a pupil series or with fewer than two finite samples.
    pub std_pupil_size_mm: Option<f64>,
}

impl FixationEvent {
    /// Whether the fixation's duration falls outside `bounds`.
    #[inline]
    pub fn is_outlier(&self, bounds: &OutlierBounds) -> bool {
        bounds.is_outlier(self.duration_ms)
    }
}

/// `GazeEvents` — all events detected in one trial, each list sorted by
/// start time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GazeEvents {
    pub blinks: Vec<BlinkEvent>,
    pub saccades: Vec<SaccadeEvent>,
    pub fixations: Vec<FixationEvent>,
}

impl GazeEvents {
    /// Total number of events across the three categories.
    #[inline]
    pub fn len(&self) -> usize {
        self.blinks.len() + self.saccades.len() + self.fixations.len()
    }

    /// Whether no events were detected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The layered per-category outlier defaults.
    // - The outlier window semantics at and beyond its edges.
    //
    // They intentionally DO NOT cover:
    // - Statistic derivation; events::builder tests that against real
    //   trials.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the base and per-category outlier windows.
    //
    // Given
    // -----
    // - The default, blink, saccade, and fixation bounds.
    //
    // Expect
    // ------
    // - Base 1–10 000 ms; blink 50–1000; saccade 5–250; fixation 55–2500.
    fn outlier_bounds_expose_layered_defaults() {
        // Act & Assert
        assert_eq!(OutlierBounds::default().min_duration_ms, 1.0);
        assert_eq!(OutlierBounds::default().max_duration_ms, 10_000.0);
        assert_eq!(OutlierBounds::blink().min_duration_ms, 50.0);
        assert_eq!(OutlierBounds::blink().max_duration_ms, 1_000.0);
        assert_eq!(OutlierBounds::saccade().min_duration_ms, 5.0);
        assert_eq!(OutlierBounds::saccade().max_duration_ms, 250.0);
        assert_eq!(OutlierBounds::fixation().min_duration_ms, 55.0);
        assert_eq!(OutlierBounds::fixation().max_duration_ms, 2_500.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the outlier window is closed: boundary durations are not
    // outliers, durations beyond either edge are.
    //
    // Given
    // -----
    // - The saccade bounds (5–250 ms) and a saccade event template.
    //
    // Expect
    // ------
    // - 5 and 250 ms are inliers; 4.9 and 250.1 ms are outliers.
    fn is_outlier_treats_bounds_as_inclusive() {
        // Arrange
        let bounds = OutlierBounds::saccade();
        let saccade = |duration_ms: f64| SaccadeEvent {
            start_index: 0,
            end_index: 1,
            start_time: 0.0,
            end_time: duration_ms,
            duration_ms,
            start_point: (0.0, 0.0),
            end_point: (1.0, 1.0),
            azimuth_deg: 0.0,
            amplitude_deg: None,
        };

        // Act & Assert
        assert!(!saccade(5.0).is_outlier(&bounds));
        assert!(!saccade(250.0).is_outlier(&bounds));
        assert!(saccade(4.9).is_outlier(&bounds));
        assert!(saccade(250.1).is_outlier(&bounds));
    }
}
