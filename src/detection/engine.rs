//! Detection engine — per-trial orchestration of the category detectors.
//!
//! Purpose
//! -------
//! Run the configured blink, saccade, and fixation detectors over one
//! validated trial and combine their outputs into three mutually exclusive
//! per-sample masks.
//!
//! Key behaviors
//! -------------
//! - Detectors are constructed per call from the [`EngineConfig`] specs
//!   plus the trial's derived sampling rate, so one configuration serves
//!   trials recorded at different rates.
//! - Binocular trials run each detector per eye and combine the masks with
//!   the configured [`EyeSelection`]; monocular trials skip combination.
//! - Backfill: when the configured backfill category has no detector of
//!   its own, its mask becomes the complement of the union of the other
//!   two. A backfill request for a category that *does* have a detector is
//!   logged and ignored.
//! - Exclusivity: blink wins over saccade wins over fixation. Saccade
//!   samples inside a blink are cleared, fixation samples inside either
//!   are cleared.
//!
//! Invariants & assumptions
//! ------------------------
//! - The three returned masks have the trial's length and are pairwise
//!   disjoint.
//! - Detection is a pure function of (trial, configuration); reapplying
//!   the exclusivity pass is a no-op.
//!
//! Conventions
//! -----------
//! - A `None` detector spec leaves that category's mask all-false unless
//!   the backfill policy fills it.
//!
//! Downstream usage
//! ----------------
//! - `events::builder::events_from_masks` turns the masks into typed event
//!   records; `batch::detect_batch` fans `detect_events` out over many
//!   trials.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the end-to-end blink scenario with fixation
//!   backfill, mask exclusivity, the ignored-backfill warning path, and
//!   binocular combination through the engine.
use crate::detection::{
    blink::{MissingDataBlinkDetector, PupilSizeBlinkDetector},
    config::{
        BackfillCategory, BlinkDetectorSpec, EngineConfig, FixationDetectorSpec,
        SaccadeDetectorSpec,
    },
    detector::{CandidateFinder, EyeSelection, detect_binocular, detect_monocular},
    errors::DetectResult,
    fixation::{DispersionFixationDetector, VelocityFixationDetector},
    saccade::EngbertSaccadeDetector,
    samples::TrialSamples,
};

/// `EventMasks` — per-sample classification of one trial.
///
/// Purpose
/// -------
/// Hold the engine's output: three boolean masks over the trial's samples,
/// one per event category. The masks are pairwise disjoint after the
/// engine's exclusivity pass; a sample where all three are false is
/// unclassified.
///
/// Fields
/// ------
/// - `is_blink`, `is_saccade`, `is_fixation`: `Vec<bool>`
///   One entry per trial sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMasks {
    pub is_blink: Vec<bool>,
    pub is_saccade: Vec<bool>,
    pub is_fixation: Vec<bool>,
}

impl EventMasks {
    /// Number of samples the masks cover.
    #[inline]
    pub fn len(&self) -> usize {
        self.is_blink.len()
    }

    /// Whether the masks cover no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_blink.is_empty()
    }
}

/// Run one detector over the trial, combining eyes when binocular.
fn run_detector<D: CandidateFinder>(
    detector: &D, trial: &TrialSamples, selection: EyeSelection,
) -> DetectResult<Vec<bool>> {
    let left = trial.left();
    match trial.right() {
        Some(right) => detect_binocular(detector, &left, &right, selection),
        None => detect_monocular(detector, &left),
    }
}

/// Detect blink, saccade, and fixation events over one trial.
///
/// Parameters
/// ----------
/// - `trial`: `&TrialSamples`
///   A validated trial; the sampling rate is derived from its timestamps.
/// - `config`: `&EngineConfig`
///   Detector selections, backfill policy, and binocular combination mode.
///
/// Returns
/// -------
/// `DetectResult<EventMasks>`
///   Three pairwise-disjoint masks of the trial's length. Categories with
///   no detector stay all-false unless the backfill policy fills them.
///
/// Errors
/// ------
/// - Any construction or detection error from the selected detectors
///   (invalid parameters, too-short signals, missing pupil data).
/// - `DetectError::InvalidSamplingRate` when the rate cannot be derived.
///
/// Notes
/// -----
/// - The exclusivity pass runs last: blink > saccade > fixation. Backfill
///   therefore never overwrites a detected event.
pub fn detect_events(trial: &TrialSamples, config: &EngineConfig) -> DetectResult<EventMasks> {
    let n = trial.len();
    let rate = trial.sampling_rate()?;
    let selection = config.eye_selection;

    let mut is_blink = match &config.blink {
        Some(BlinkDetectorSpec::MissingData(cfg)) => {
            run_detector(&MissingDataBlinkDetector::new(cfg, rate)?, trial, selection)?
        }
        Some(BlinkDetectorSpec::PupilSize(cfg)) => {
            run_detector(&PupilSizeBlinkDetector::new(cfg, rate)?, trial, selection)?
        }
        None => vec![false; n],
    };
    let mut is_saccade = match &config.saccade {
        Some(SaccadeDetectorSpec::Engbert(cfg)) => {
            run_detector(&EngbertSaccadeDetector::new(cfg, rate)?, trial, selection)?
        }
        None => vec![false; n],
    };
    let mut is_fixation = match &config.fixation {
        Some(FixationDetectorSpec::VelocityThreshold(cfg)) => {
            run_detector(&VelocityFixationDetector::new(cfg, rate)?, trial, selection)?
        }
        Some(FixationDetectorSpec::DispersionThreshold(cfg)) => {
            run_detector(&DispersionFixationDetector::new(cfg, rate)?, trial, selection)?
        }
        None => vec![false; n],
    };

    match config.backfill {
        Some(BackfillCategory::Saccade) if config.saccade.is_none() => {
            for i in 0..n {
                is_saccade[i] = !(is_blink[i] || is_fixation[i]);
            }
        }
        Some(BackfillCategory::Fixation) if config.fixation.is_none() => {
            for i in 0..n {
                is_fixation[i] = !(is_blink[i] || is_saccade[i]);
            }
        }
        Some(category) => {
            log::warn!(
                "backfill category {category:?} already has a detector configured; \
                 skipping backfill"
            );
        }
        None => {}
    }

    // Exclusivity: blink > saccade > fixation.
    for i in 0..n {
        is_saccade[i] = is_saccade[i] && !is_blink[i];
        is_fixation[i] = is_fixation[i] && !is_blink[i] && !is_saccade[i];
    }

    Ok(EventMasks { is_blink, is_saccade, is_fixation })
}
