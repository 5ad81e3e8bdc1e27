//! Detector configuration — validated parameter bundles and detector specs.
//!
//! Purpose
//! -------
//! Define the immutable configuration types the engine is driven by: the
//! shared per-detector parameter bundle ([`DetectorParams`]), one
//! parameter struct per concrete detector, the tagged-union detector specs
//! selecting which detector runs per event category, and the top-level
//! [`EngineConfig`].
//!
//! Key behaviors
//! -------------
//! - [`DetectorParams::new`] validates the shared trio (sampling rate,
//!   minimum duration, inter-event time) once, so every detector
//!   constructor starts from a clean bundle.
//! - Per-detector config structs carry plain public fields with `Default`
//!   impls wherever a parameter has a domain default; validation happens at
//!   detector construction, before any data is touched.
//! - The detector specs replace stringly-typed detector-name dispatch with
//!   enums; the `python-bindings` layer parses names into these variants.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configurations are immutable once detection begins for a batch; the
//!   engine only ever reads them.
//! - Durations are milliseconds regardless of the trial's timestamp unit.
//!
//! Conventions
//! -----------
//! - Defaults follow the active experimental configuration: blink 50 ms /
//!   20 ms, saccade 5 ms, fixation 55 ms, derivative window 3, noise
//!   multiplier 5, velocity threshold 20 °/s. The 45 °/s literature value
//!   is exposed as a named constant but not used by default.
//! - The blink inter-event default is the blink-specific 20 ms value, not
//!   the 5 ms shared base default; two blink runs closer than that are
//!   physiologically one blink.
//!
//! Downstream usage
//! ----------------
//! - Build an [`EngineConfig`] (or start from `EngineConfig::default()`)
//!   and pass it to `detection::engine::detect_events`; detectors are
//!   constructed per call from the specs plus the trial's derived sampling
//!   rate.
//!
//! Testing notes
//! -------------
//! - Unit tests cover `DetectorParams` validation and the threshold
//!   derivation pass-through; spec-level behavior is tested in the engine
//!   module.
use crate::detection::{
    detector::EyeSelection,
    errors::DetectResult,
    segmentation::{min_samples_between_events, min_samples_within_event},
    validation::{validate_inter_event_time, validate_min_duration, validate_sampling_rate},
};
use crate::signal::geometry::ScreenGeometry;

/// Shared inter-event-time default (ms) for non-blink detectors.
pub const DEFAULT_INTER_EVENT_TIME_MS: f64 = 5.0;
/// Blink minimum duration default (ms).
pub const DEFAULT_BLINK_MIN_DURATION_MS: f64 = 50.0;
/// Blink inter-event-time default (ms).
pub const DEFAULT_BLINK_INTER_EVENT_TIME_MS: f64 = 20.0;
/// Saccade minimum duration default (ms).
pub const DEFAULT_SACCADE_MIN_DURATION_MS: f64 = 5.0;
/// Fixation minimum duration default (ms).
pub const DEFAULT_FIXATION_MIN_DURATION_MS: f64 = 55.0;
/// Engbert derivative window default (samples).
pub const DEFAULT_DERIVATION_WINDOW: usize = 3;
/// Engbert noise-multiplier default (λ).
pub const DEFAULT_NOISE_MULTIPLIER: f64 = 5.0;
/// Active fixation velocity threshold default (°/s).
pub const DEFAULT_VELOCITY_THRESHOLD_DEG_S: f64 = 20.0;
/// Literature fixation velocity threshold (°/s); available, not default.
pub const LITERATURE_VELOCITY_THRESHOLD_DEG_S: f64 = 45.0;
/// Dispersion threshold default (px) for the I-DT fixation variant.
pub const DEFAULT_DISPERSION_THRESHOLD_PX: f64 = 25.0;
/// Pupil floor default (mm) for the pupil-size blink detector.
pub const DEFAULT_MIN_PUPIL_SIZE_MM: f64 = 0.0;

/// `DetectorParams` — validated shared per-detector parameters.
///
/// Purpose
/// -------
/// Bundle the three parameters every detector shares: the trial's sampling
/// rate, the minimum event duration, and the minimum inter-event time. The
/// bundle also derives the two segmentation thresholds so all detectors use
/// identical sample arithmetic.
///
/// Fields
/// ------
/// - `sampling_rate`: `f64` — Hz, finite and > 0.
/// - `min_duration_ms`: `f64` — finite and > 0.
/// - `inter_event_time_ms`: `f64` — finite and ≥ 0.
///
/// Invariants
/// ----------
/// - All three scalars are validated at construction; the derived sample
///   thresholds therefore never fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorParams {
    /// Trial sampling rate in Hz.
    pub sampling_rate: f64,
    /// Minimum event duration in milliseconds.
    pub min_duration_ms: f64,
    /// Minimum gap (ms) that keeps two same-type runs separate.
    pub inter_event_time_ms: f64,
}

impl DetectorParams {
    /// Construct a validated parameter bundle.
    ///
    /// Errors
    /// ------
    /// - `DetectError::InvalidSamplingRate` / `InvalidDuration` for
    ///   malformed scalars.
    pub fn new(
        sampling_rate: f64, min_duration_ms: f64, inter_event_time_ms: f64,
    ) -> DetectResult<Self> {
        Ok(DetectorParams {
            sampling_rate: validate_sampling_rate(sampling_rate)?,
            min_duration_ms: validate_min_duration("min_duration", min_duration_ms)?,
            inter_event_time_ms: validate_inter_event_time(
                "inter_event_time",
                inter_event_time_ms,
            )?,
        })
    }

    /// Minimum samples an event must span. See
    /// [`min_samples_within_event`].
    #[inline]
    pub fn min_samples_within_event(&self) -> usize {
        min_samples_within_event(self.min_duration_ms, self.sampling_rate)
            .expect("validated at construction")
    }

    /// Maximum sample gap that merges two candidate runs. See
    /// [`min_samples_between_events`].
    #[inline]
    pub fn min_samples_between_events(&self) -> usize {
        min_samples_between_events(self.inter_event_time_ms, self.sampling_rate)
            .expect("validated at construction")
    }
}

/// Parameters for the missing-data blink detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissingDataBlinkConfig {
    /// Sentinel marking a missing coordinate; `None` means NaN. NaN counts
    /// as missing in either case.
    pub missing_value: Option<f64>,
    /// Minimum blink duration in milliseconds.
    pub min_duration_ms: f64,
    /// Minimum gap (ms) between separate blinks.
    pub inter_event_time_ms: f64,
}

impl Default for MissingDataBlinkConfig {
    fn default() -> Self {
        MissingDataBlinkConfig {
            missing_value: None,
            min_duration_ms: DEFAULT_BLINK_MIN_DURATION_MS,
            inter_event_time_ms: DEFAULT_BLINK_INTER_EVENT_TIME_MS,
        }
    }
}

/// Parameters for the pupil-size blink detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PupilSizeBlinkConfig {
    /// Pupil sizes at or below this floor (mm) are blink candidates.
    pub min_pupil_size_mm: f64,
    /// Minimum blink duration in milliseconds.
    pub min_duration_ms: f64,
    /// Minimum gap (ms) between separate blinks.
    pub inter_event_time_ms: f64,
}

impl Default for PupilSizeBlinkConfig {
    fn default() -> Self {
        PupilSizeBlinkConfig {
            min_pupil_size_mm: DEFAULT_MIN_PUPIL_SIZE_MM,
            min_duration_ms: DEFAULT_BLINK_MIN_DURATION_MS,
            inter_event_time_ms: DEFAULT_BLINK_INTER_EVENT_TIME_MS,
        }
    }
}

/// Parameters for the Engbert adaptive-threshold saccade detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngbertSaccadeConfig {
    /// Centred-derivative half-window in samples.
    pub derivation_window: usize,
    /// Noise multiplier λ scaling the robust per-axis velocity SDs.
    pub noise_multiplier: f64,
    /// Minimum saccade duration in milliseconds.
    pub min_duration_ms: f64,
    /// Minimum gap (ms) between separate saccades.
    pub inter_event_time_ms: f64,
}

impl Default for EngbertSaccadeConfig {
    fn default() -> Self {
        EngbertSaccadeConfig {
            derivation_window: DEFAULT_DERIVATION_WINDOW,
            noise_multiplier: DEFAULT_NOISE_MULTIPLIER,
            min_duration_ms: DEFAULT_SACCADE_MIN_DURATION_MS,
            inter_event_time_ms: DEFAULT_INTER_EVENT_TIME_MS,
        }
    }
}

/// Parameters for the velocity-threshold (I-VT) fixation detector.
///
/// No `Default` impl: the viewer distance and screen geometry have no
/// sensible defaults. Use [`VelocityFixationConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityFixationConfig {
    /// Angular velocities at or below this threshold (°/s) are fixation
    /// candidates.
    pub velocity_threshold_deg_s: f64,
    /// Viewer distance in centimeters.
    pub viewer_distance_cm: f64,
    /// Physical screen description.
    pub screen: ScreenGeometry,
    /// Minimum fixation duration in milliseconds.
    pub min_duration_ms: f64,
    /// Minimum gap (ms) between separate fixations.
    pub inter_event_time_ms: f64,
}

impl VelocityFixationConfig {
    /// Config with domain defaults for everything but the geometry.
    pub fn new(viewer_distance_cm: f64, screen: ScreenGeometry) -> Self {
        VelocityFixationConfig {
            velocity_threshold_deg_s: DEFAULT_VELOCITY_THRESHOLD_DEG_S,
            viewer_distance_cm,
            screen,
            min_duration_ms: DEFAULT_FIXATION_MIN_DURATION_MS,
            inter_event_time_ms: DEFAULT_INTER_EVENT_TIME_MS,
        }
    }
}

/// Parameters for the dispersion-threshold (I-DT variant) fixation
/// detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionFixationConfig {
    /// Windowed dispersions (px) at or below this threshold are fixation
    /// candidates.
    pub dispersion_threshold_px: f64,
    /// Minimum fixation duration in milliseconds; also sizes the
    /// dispersion window.
    pub min_duration_ms: f64,
    /// Minimum gap (ms) between separate fixations.
    pub inter_event_time_ms: f64,
}

impl Default for DispersionFixationConfig {
    fn default() -> Self {
        DispersionFixationConfig {
            dispersion_threshold_px: DEFAULT_DISPERSION_THRESHOLD_PX,
            min_duration_ms: DEFAULT_FIXATION_MIN_DURATION_MS,
            inter_event_time_ms: DEFAULT_INTER_EVENT_TIME_MS,
        }
    }
}

/// Which blink detector to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlinkDetectorSpec {
    MissingData(MissingDataBlinkConfig),
    PupilSize(PupilSizeBlinkConfig),
}

/// Which saccade detector to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SaccadeDetectorSpec {
    Engbert(EngbertSaccadeConfig),
}

/// Which fixation detector to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixationDetectorSpec {
    VelocityThreshold(VelocityFixationConfig),
    DispersionThreshold(DispersionFixationConfig),
}

/// Category that receives residual unclassified samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillCategory {
    Saccade,
    Fixation,
}

/// `EngineConfig` — full configuration for one detection pass.
///
/// Purpose
/// -------
/// Name which detector (if any) runs per event category, the backfill
/// policy for residual samples, and the binocular combination mode. A
/// `None` spec skips that category entirely (its mask stays all-false
/// unless backfilled).
///
/// Notes
/// -----
/// - The default configuration detects blinks from missing data, saccades
///   with the Engbert detector, and backfills fixations — the common
///   pipeline when no screen geometry is available.
/// - The config is read-only during detection and safe to share across
///   parallel trial workers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Blink detector selection, or `None` to skip blinks.
    pub blink: Option<BlinkDetectorSpec>,
    /// Saccade detector selection, or `None` to skip saccades.
    pub saccade: Option<SaccadeDetectorSpec>,
    /// Fixation detector selection, or `None` to skip fixations.
    pub fixation: Option<FixationDetectorSpec>,
    /// Backfill category for residual unclassified samples.
    pub backfill: Option<BackfillCategory>,
    /// Binocular combination mode; ignored for monocular trials.
    pub eye_selection: EyeSelection,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            blink: Some(BlinkDetectorSpec::MissingData(MissingDataBlinkConfig::default())),
            saccade: Some(SaccadeDetectorSpec::Engbert(EngbertSaccadeConfig::default())),
            fixation: None,
            backfill: Some(BackfillCategory::Fixation),
            eye_selection: EyeSelection::Either,
        }
    }
}
