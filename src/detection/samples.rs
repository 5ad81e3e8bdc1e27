//! Trial sample containers and sampling-rate derivation.
//!
//! Purpose
//! -------
//! Provide validated containers for the raw per-trial sample stream used by
//! the gaze-event detectors: parallel timestamp and per-eye coordinate
//! arrays (with optional pupil size), monocular or binocular. This module
//! centralizes input validation so downstream detectors can assume clean,
//! length-consistent data.
//!
//! Key behaviors
//! -------------
//! - [`TrialSamples`] enforces the trial invariants at construction time:
//!   at least two samples, finite non-negative strictly increasing
//!   timestamps, and all parallel arrays of equal length.
//! - [`EyeSamples`] is a borrowed, length-checked view of one eye's signals
//!   that detectors consume.
//! - [`sampling_rate_from_timestamps`] derives the sampling rate (Hz) as
//!   the reciprocal of the modal inter-sample delta, scaled by the trial's
//!   [`TimeUnit`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Timestamps contain no NaN/Inf/negative values and are strictly
//!   increasing; coordinate and pupil arrays may contain NaN (missing).
//! - `sampling_rate > 0` and finite whenever derivation succeeds.
//! - The modal delta is computed by exact equality over the recorded
//!   deltas; when several deltas tie for the highest count, the smallest
//!   one wins (deterministic).
//!
//! Conventions
//! -----------
//! - [`TimeUnit`] is metadata only; it does not rescale stored values
//!   (mirroring how units are treated throughout the crate).
//! - Indexing is 0-based; events later refer to closed sample-index
//!   intervals into these arrays.
//!
//! Downstream usage
//! ----------------
//! - Construct [`TrialSamples`] at the boundary where raw recordings enter
//!   the engine, then pass it to `detection::engine::detect_events`.
//! - Detectors receive [`EyeSamples`] views and never own the buffers.
//!
//! Testing notes
//! -------------
//! - Unit tests cover constructor validation (happy path, short trials,
//!   bad timestamps, length mismatches) and modal-delta derivation
//!   including the tie-break and jittered series.
use crate::detection::{
    errors::{DetectError, DetectResult},
    validation::{validate_same_length, validate_timestamps},
};
use ndarray::Array1;

/// Units of measurement for trial timestamps.
///
/// This sets the assumed time scale for the recorded timestamps and for any
/// millisecond-denominated thresholds downstream. It does **not** rescale
/// values automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Milliseconds (1e-3 s).
    Milliseconds,
    /// Microseconds (1e-6 s).
    Microseconds,
}

impl TimeUnit {
    /// Number of timestamp units per second.
    #[inline]
    pub fn per_second(&self) -> f64 {
        match self {
            TimeUnit::Milliseconds => 1_000.0,
            TimeUnit::Microseconds => 1_000_000.0,
        }
    }

    /// Convert a duration in this unit to milliseconds.
    #[inline]
    pub fn to_ms(&self, value: f64) -> f64 {
        match self {
            TimeUnit::Milliseconds => value,
            TimeUnit::Microseconds => value / 1_000.0,
        }
    }
}

/// `EyeSamples` — borrowed, length-checked view of one eye's signals.
///
/// Purpose
/// -------
/// Present a single eye's coordinate (and optional pupil) signals to the
/// detectors without copying. Construction checks that all arrays share one
/// length, so detector code can index freely.
///
/// Fields
/// ------
/// - `x`, `y`: `&[f64]`
///   Pixel coordinates; NaN marks a missing sample.
/// - `pupil`: `Option<&[f64]>`
///   Pupil size (mm) when recorded; NaN marks a missing sample.
///
/// Invariants
/// ----------
/// - `x.len() == y.len()`, and `pupil.len() == x.len()` when present.
///   Enforced by [`EyeSamples::new`].
#[derive(Debug, Clone, Copy)]
pub struct EyeSamples<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub pupil: Option<&'a [f64]>,
}

impl<'a> EyeSamples<'a> {
    /// Construct a length-checked view of one eye's signals.
    ///
    /// Errors
    /// ------
    /// - `DetectError::LengthMismatch` when `y` (or `pupil`, if present)
    ///   does not match `x` in length.
    pub fn new(x: &'a [f64], y: &'a [f64], pupil: Option<&'a [f64]>) -> DetectResult<Self> {
        validate_same_length("y", x.len(), y.len())?;
        if let Some(p) = pupil {
            validate_same_length("pupil", x.len(), p.len())?;
        }
        Ok(EyeSamples { x, y, pupil })
    }

    /// Number of samples in this view.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the view contains no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// `EyeBuffers` — owned per-eye signal storage.
///
/// Coordinate arrays (and an optional pupil array) for one eye, stored as
/// `ndarray::Array1<f64>`. Length consistency against the trial's timestamp
/// array is enforced by the [`TrialSamples`] constructors, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct EyeBuffers {
    /// Horizontal pixel coordinate; NaN marks a missing sample.
    pub x: Array1<f64>,
    /// Vertical pixel coordinate; NaN marks a missing sample.
    pub y: Array1<f64>,
    /// Pupil size in millimeters, when recorded.
    pub pupil: Option<Array1<f64>>,
}

impl EyeBuffers {
    /// Construct per-eye buffers from owned arrays.
    pub fn new(x: Array1<f64>, y: Array1<f64>, pupil: Option<Array1<f64>>) -> Self {
        EyeBuffers { x, y, pupil }
    }

    fn view(&self) -> EyeSamples<'_> {
        EyeSamples {
            x: self.x.as_slice().expect("contiguous 1-D array"),
            y: self.y.as_slice().expect("contiguous 1-D array"),
            pupil: self.pupil.as_ref().map(|p| p.as_slice().expect("contiguous 1-D array")),
        }
    }
}

/// `TrialSamples` — validated sample stream for one recorded trial.
///
/// Purpose
/// -------
/// Own the complete, in-memory sample stream of a single trial: timestamps
/// plus one or two eyes' signals. Construction validates every invariant
/// the detectors rely on, so a `TrialSamples` value is always clean.
///
/// Fields
/// ------
/// - `timestamps`: `Array1<f64>`
///   Finite, non-negative, strictly increasing; length ≥ 2.
/// - `left`, `right`
///   Per-eye buffers; `right` is `None` for monocular trials.
/// - `unit`: [`TimeUnit`]
///   Time scale of the timestamps.
///
/// Invariants
/// ----------
/// - `timestamps.len() >= 2`.
/// - Every parallel array has exactly `timestamps.len()` entries.
/// - Timestamp validity per [`validate_timestamps`].
///
/// Notes
/// -----
/// - Detection never mutates a trial; the engine is a pure function of
///   (trial, configuration).
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSamples {
    timestamps: Array1<f64>,
    left: EyeBuffers,
    right: Option<EyeBuffers>,
    unit: TimeUnit,
}

impl TrialSamples {
    /// Construct a validated monocular trial.
    ///
    /// Parameters
    /// ----------
    /// - `timestamps`: `Array1<f64>`
    ///   Trial timestamps in `unit`; finite, non-negative, strictly
    ///   increasing, length ≥ 2.
    /// - `eye`: [`EyeBuffers`]
    ///   The recorded eye's signals; all arrays must match the timestamp
    ///   length.
    /// - `unit`: [`TimeUnit`]
    ///   Time scale of the timestamps.
    ///
    /// Errors
    /// ------
    /// - `DetectError::EmptyTrial` for zero samples.
    /// - `DetectError::SignalTooShort` for a single sample.
    /// - `DetectError::InvalidTimestamp` / `NonIncreasingTimestamps` for
    ///   malformed timestamps.
    /// - `DetectError::LengthMismatch` for inconsistent array lengths.
    pub fn monocular(
        timestamps: Array1<f64>, eye: EyeBuffers, unit: TimeUnit,
    ) -> DetectResult<Self> {
        Self::validate_common(&timestamps, &eye)?;
        Ok(TrialSamples { timestamps, left: eye, right: None, unit })
    }

    /// Construct a validated binocular trial.
    ///
    /// Same validation as [`TrialSamples::monocular`], applied to both
    /// eyes against the shared timestamp array.
    pub fn binocular(
        timestamps: Array1<f64>, left: EyeBuffers, right: EyeBuffers, unit: TimeUnit,
    ) -> DetectResult<Self> {
        Self::validate_common(&timestamps, &left)?;
        Self::validate_eye(timestamps.len(), &right)?;
        Ok(TrialSamples { timestamps, left, right: Some(right), unit })
    }

    fn validate_common(timestamps: &Array1<f64>, eye: &EyeBuffers) -> DetectResult<()> {
        let n = timestamps.len();
        if n == 0 {
            return Err(DetectError::EmptyTrial);
        }
        if n < 2 {
            return Err(DetectError::SignalTooShort { required: 2, actual: n });
        }
        validate_timestamps(timestamps.as_slice().expect("contiguous 1-D array"))?;
        Self::validate_eye(n, eye)
    }

    fn validate_eye(n: usize, eye: &EyeBuffers) -> DetectResult<()> {
        validate_same_length("x", n, eye.x.len())?;
        validate_same_length("y", n, eye.y.len())?;
        if let Some(p) = &eye.pupil {
            validate_same_length("pupil", n, p.len())?;
        }
        Ok(())
    }

    /// Number of samples in the trial.
    #[inline]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the trial is empty. Always `false` for a constructed value;
    /// present for API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// The trial's timestamps, in [`TimeUnit`] units.
    #[inline]
    pub fn timestamps(&self) -> &[f64] {
        self.timestamps.as_slice().expect("contiguous 1-D array")
    }

    /// Time scale of the timestamps.
    #[inline]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Borrowed view of the left (or only) eye's signals.
    #[inline]
    pub fn left(&self) -> EyeSamples<'_> {
        self.left.view()
    }

    /// Borrowed view of the right eye's signals, when binocular.
    #[inline]
    pub fn right(&self) -> Option<EyeSamples<'_>> {
        self.right.as_ref().map(EyeBuffers::view)
    }

    /// Derived sampling rate in Hz. See [`sampling_rate_from_timestamps`].
    pub fn sampling_rate(&self) -> DetectResult<f64> {
        sampling_rate_from_timestamps(self.timestamps(), self.unit)
    }
}

/// Derive the sampling rate (Hz) from a timestamp series.
///
/// Parameters
/// ----------
/// - `timestamps`: `&[f64]`
///   Validated timestamps (finite, non-negative, strictly increasing) with
///   at least two entries.
/// - `unit`: [`TimeUnit`]
///   Time scale of the timestamps.
///
/// Returns
/// -------
/// `DetectResult<f64>`
///   - `Ok(rate)` where `rate = unit.per_second() / modal_delta` and
///     `modal_delta` is the most frequent inter-sample difference (exact
///     equality; ties resolved towards the smallest delta).
///   - `Err(DetectError::SignalTooShort)` for fewer than two timestamps.
///   - `Err(DetectError::InvalidSamplingRate)` when the derived rate is not
///     finite and positive.
///
/// Notes
/// -----
/// - The mode, not the mean, is used so occasional dropped samples do not
///   bias the rate.
pub fn sampling_rate_from_timestamps(timestamps: &[f64], unit: TimeUnit) -> DetectResult<f64> {
    if timestamps.len() < 2 {
        return Err(DetectError::SignalTooShort { required: 2, actual: timestamps.len() });
    }

    let mut deltas: Vec<f64> =
        timestamps.windows(2).map(|pair| pair[1] - pair[0]).collect();
    deltas.sort_by(f64::total_cmp);

    // Longest run of exactly-equal deltas; the ascending scan keeps the
    // smallest delta on ties.
    let mut modal_delta = deltas[0];
    let mut best_count = 0usize;
    let mut run_start = 0usize;
    for i in 0..=deltas.len() {
        if i == deltas.len() || deltas[i] != deltas[run_start] {
            let count = i - run_start;
            if count > best_count {
                best_count = count;
                modal_delta = deltas[run_start];
            }
            run_start = i;
        }
    }

    let rate = unit.per_second() / modal_delta;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(DetectError::InvalidSamplingRate(rate));
    }
    Ok(rate)
}
