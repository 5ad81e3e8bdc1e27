//! Detector contract — candidate finders and the shared detection logic.
//!
//! Purpose
//! -------
//! Define the common contract all detectors implement — a type-specific
//! candidate membership test over one eye's signals — and the shared logic
//! layered on top of it: monocular detection (candidates → segmentation →
//! mask) and binocular detection (per-eye masks combined by an
//! [`EyeSelection`] policy).
//!
//! Key behaviors
//! -------------
//! - [`CandidateFinder`] exposes the detector's validated
//!   [`DetectorParams`] and its `find_candidates` membership test.
//! - [`detect_monocular`] and [`detect_binocular`] are free functions over
//!   any `CandidateFinder`, so concrete detectors share the segmentation
//!   and combination code without inheritance.
//! - [`combine_masks`] implements the binocular combination modes,
//!   including the `Most` majority rule with its documented tie-break.
//!
//! Invariants & assumptions
//! ------------------------
//! - Eye views are length-checked at construction ([`EyeSamples::new`]);
//!   binocular detection additionally checks the two eyes agree in length.
//! - Detection is pure: identical inputs and configuration yield
//!   byte-identical masks.
//!
//! Conventions
//! -----------
//! - `Most` picks the eye whose mask flags strictly more samples; on a tie
//!   the right eye's mask is used (deterministic, matching the historical
//!   fall-through of the reference pipeline).
//! - [`EyeSelection::from_str`] accepts the names "and"/"both",
//!   "or"/"either", "left", "right", and "most"; anything else errors.
//!
//! Downstream usage
//! ----------------
//! - The engine constructs a concrete detector per category and calls
//!   [`detect_monocular`] or [`detect_binocular`] depending on whether the
//!   trial is binocular.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the combination truth table for `[T,F,T]` / `[F,F,T]`,
//!   the `Most` tie-break, name parsing, and the candidate-to-mask
//!   pipeline over a stub detector.
use crate::detection::{
    config::DetectorParams,
    errors::{DetectError, DetectResult},
    samples::EyeSamples,
    segmentation::{intervals_to_mask, merge_candidate_runs},
    validation::validate_same_length,
};

/// Common contract for gaze-event detectors.
///
/// A detector is a stateless parameterization of a candidate membership
/// test: given one eye's signals, which samples could belong to this event
/// type? Everything else — run merging, duration filtering, binocular
/// combination — is shared logic in this module.
pub trait CandidateFinder {
    /// The detector's validated shared parameters.
    fn params(&self) -> &DetectorParams;

    /// Type-specific candidate membership test over one eye's signals.
    ///
    /// Returns a mask of the same length as the eye view. Implementations
    /// may fail for structurally unsuitable inputs (e.g. a signal shorter
    /// than the derivative window, or a missing pupil series).
    fn find_candidates(&self, eye: &EyeSamples<'_>) -> DetectResult<Vec<bool>>;
}

/// Binocular combination policy for per-eye event masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeSelection {
    /// Elementwise AND of both eyes' masks.
    Both,
    /// Elementwise OR of both eyes' masks.
    Either,
    /// Use only the left eye's mask.
    Left,
    /// Use only the right eye's mask.
    Right,
    /// Use the eye whose mask flags more samples; ties go to the right
    /// eye.
    Most,
}

impl std::str::FromStr for EyeSelection {
    type Err = DetectError;

    fn from_str(name: &str) -> DetectResult<Self> {
        match name.to_lowercase().as_str() {
            "and" | "both" => Ok(EyeSelection::Both),
            "or" | "either" => Ok(EyeSelection::Either),
            "left" => Ok(EyeSelection::Left),
            "right" => Ok(EyeSelection::Right),
            "most" => Ok(EyeSelection::Most),
            other => Err(DetectError::UnknownName {
                kind: "eye selection",
                name: other.to_string(),
            }),
        }
    }
}

/// Combine two per-eye masks according to an [`EyeSelection`].
///
/// Parameters
/// ----------
/// - `left`, `right`: `&[bool]`
///   Per-eye event masks of equal length.
/// - `selection`: [`EyeSelection`]
///   Combination policy.
///
/// Returns
/// -------
/// `DetectResult<Vec<bool>>`
///   The combined mask, or `DetectError::LengthMismatch` when the masks
///   disagree in length.
pub fn combine_masks(
    left: &[bool], right: &[bool], selection: EyeSelection,
) -> DetectResult<Vec<bool>> {
    validate_same_length("right eye mask", left.len(), right.len())?;
    let combined = match selection {
        EyeSelection::Both => left.iter().zip(right).map(|(&l, &r)| l && r).collect(),
        EyeSelection::Either => left.iter().zip(right).map(|(&l, &r)| l || r).collect(),
        EyeSelection::Left => left.to_vec(),
        EyeSelection::Right => right.to_vec(),
        EyeSelection::Most => {
            let left_count = left.iter().filter(|&&flag| flag).count();
            let right_count = right.iter().filter(|&&flag| flag).count();
            // Ties go to the right eye.
            if left_count > right_count { left.to_vec() } else { right.to_vec() }
        }
    };
    Ok(combined)
}

/// Detect events over one eye: candidates → segmentation → mask.
///
/// Parameters
/// ----------
/// - `detector`: `&D`
///   Any [`CandidateFinder`].
/// - `eye`: `&EyeSamples`
///   One eye's length-checked signals.
///
/// Returns
/// -------
/// `DetectResult<Vec<bool>>`
///   The per-sample event mask after run merging and minimum-duration
///   filtering, with the detector's derived sample thresholds.
pub fn detect_monocular<D: CandidateFinder + ?Sized>(
    detector: &D, eye: &EyeSamples<'_>,
) -> DetectResult<Vec<bool>> {
    let candidates = detector.find_candidates(eye)?;
    let params = detector.params();
    let intervals = merge_candidate_runs(
        &candidates,
        params.min_samples_between_events(),
        params.min_samples_within_event(),
    );
    Ok(intervals_to_mask(&intervals, eye.len()))
}

/// Detect events over both eyes and combine per [`EyeSelection`].
///
/// Runs [`detect_monocular`] independently per eye, then [`combine_masks`].
/// The two eyes must agree in length.
pub fn detect_binocular<D: CandidateFinder + ?Sized>(
    detector: &D, left: &EyeSamples<'_>, right: &EyeSamples<'_>, selection: EyeSelection,
) -> DetectResult<Vec<bool>> {
    validate_same_length("right eye", left.len(), right.len())?;
    let left_mask = detect_monocular(detector, left)?;
    let right_mask = detect_monocular(detector, right)?;
    combine_masks(&left_mask, &right_mask, selection)
}
