//! detection — trial containers, detectors, and the detection engine.
//!
//! Purpose
//! -------
//! Classify the samples of an eye-tracking trial into blinks, saccades, and
//! fixations. The subtree is layered: validated sample containers at the
//! bottom, a shared detector contract and segmentation utilities in the
//! middle, concrete per-category detectors above them, and the
//! orchestrating engine on top.
//!
//! Key behaviors
//! -------------
//! - [`samples`] validates trials and derives sampling rates;
//!   [`segmentation`] turns candidate masks into duration-filtered event
//!   intervals.
//! - [`detector`] defines [`CandidateFinder`], the monocular/binocular
//!   detection drivers, and the [`EyeSelection`] combination policy.
//! - [`blink`], [`saccade`], and [`fixation`] implement the concrete
//!   candidate tests; [`config`] carries their validated parameter
//!   bundles.
//! - [`engine`] runs the configured detectors over one trial and resolves
//!   overlaps into three disjoint masks.
//!
//! Conventions
//! -----------
//! - All detection is pure: identical trials and configurations produce
//!   identical masks.
//! - Durations are configured in milliseconds and converted to sample
//!   counts via the trial's derived sampling rate.
//!
//! Downstream usage
//! ----------------
//! - `events` consumes [`engine::EventMasks`] to build typed event
//!   records; `batch` fans the engine out over trial collections.

pub mod blink;
pub mod config;
pub mod detector;
pub mod engine;
pub mod errors;
pub mod fixation;
pub mod saccade;
pub mod samples;
pub mod segmentation;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::blink::{MissingDataBlinkDetector, PupilSizeBlinkDetector};
pub use self::config::{
    BackfillCategory, BlinkDetectorSpec, DispersionFixationConfig, EngbertSaccadeConfig,
    EngineConfig, FixationDetectorSpec, MissingDataBlinkConfig, PupilSizeBlinkConfig,
    SaccadeDetectorSpec, VelocityFixationConfig,
};
pub use self::detector::{CandidateFinder, EyeSelection, detect_binocular, detect_monocular};
pub use self::engine::{EventMasks, detect_events};
pub use self::errors::{DetectError, DetectResult};
pub use self::fixation::{DispersionFixationDetector, VelocityFixationDetector};
pub use self::saccade::EngbertSaccadeDetector;
pub use self::samples::{
    EyeBuffers, EyeSamples, TimeUnit, TrialSamples, sampling_rate_from_timestamps,
};
