//! detection::errors — shared error types for the detection layer.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by trial containers,
//! detector constructors, the segmentation utility, and the orchestrator,
//! together with a conversion layer to Python exceptions for PyO3-based
//! bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`DetectResult`] and [`DetectError`] as the canonical result and
//!   error types for the `detection` and `events` subtrees.
//! - Wrap [`SignalError`] values so `?` composes across the numeric
//!   primitives and the detectors that call them.
//! - Implement `From<DetectError> for PyErr` (feature `python-bindings`) so
//!   Python callers see `ValueError` with the Rust message preserved.
//!
//! Invariants & assumptions
//! ------------------------
//! - All user-facing invalid inputs surface as `DetectError` values before
//!   any partial result is produced; panics indicate programming errors.
//! - Variants are small and cloneable so they can be collected per trial by
//!   batch drivers without lifetime concerns.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g.
//!   "timestamps must be strictly increasing") rather than implementation
//!   details.
//! - Configuration errors (invalid durations, thresholds, windows) are
//!   raised at detector construction, before any sample data is touched.
//!
//! Testing notes
//! -------------
//! - Unit tests verify payload embedding in `Display` messages and the
//!   `From<SignalError>` wrapping; the conditions that produce each variant
//!   are tested alongside the code that returns them.
use crate::signal::errors::SignalError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type DetectResult<T> = Result<T, DetectError>;

/// DetectError — failure conditions for trial validation and detection.
///
/// Variants
/// --------
/// - `EmptyTrial`
///   A trial container was constructed with no samples.
/// - `SignalTooShort { required, actual }`
///   The sample stream is shorter than an operation requires (e.g. fewer
///   than two samples, or fewer than `2 × window` for the Engbert
///   detector).
/// - `LengthMismatch { name, expected, actual }`
///   A parallel array (`x`, `y`, `pupil`, or an eye mask) does not match
///   the trial length.
/// - `InvalidTimestamp { index, value }`
///   A timestamp is NaN, ±∞, or negative.
/// - `NonIncreasingTimestamps { index }`
///   `timestamps[index] <= timestamps[index - 1]`.
/// - `InvalidSamplingRate(value)`
///   A sampling rate (given or derived) is non-finite or non-positive.
/// - `InvalidDuration { name, value_ms }`
///   A duration parameter is non-finite, or violates its positivity
///   constraint (`min_duration > 0`, `inter_event_time >= 0`).
/// - `InvalidParameter { name, value }`
///   A detector-specific numeric parameter (threshold, noise multiplier,
///   window) is out of range.
/// - `UnknownName { kind, name }`
///   A stringly-typed selector (detector name, eye-selection mode,
///   backfill category, time unit) did not match any known variant.
/// - `MissingPupilData`
///   A pupil-based detector was selected but the trial carries no pupil
///   series.
/// - `Signal(SignalError)`
///   A wrapped failure from the numeric primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectError {
    //------ Input validation errors ------
    EmptyTrial,
    SignalTooShort { required: usize, actual: usize },
    LengthMismatch { name: &'static str, expected: usize, actual: usize },
    InvalidTimestamp { index: usize, value: f64 },
    NonIncreasingTimestamps { index: usize },
    InvalidSamplingRate(f64),
    //------ Configuration errors ------
    InvalidDuration { name: &'static str, value_ms: f64 },
    InvalidParameter { name: &'static str, value: f64 },
    UnknownName { kind: &'static str, name: String },
    MissingPupilData,
    //------ Wrapped primitive errors ------
    Signal(SignalError),
}

impl std::error::Error for DetectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DetectError::Signal(inner) => Some(inner),
            _ => None,
        }
    }
}

impl std::fmt::Display for DetectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectError::EmptyTrial => {
                write!(f, "Trial must contain at least one sample.")
            }
            DetectError::SignalTooShort { required, actual } => {
                write!(f, "Signal too short: need at least {required} samples, got {actual}.")
            }
            DetectError::LengthMismatch { name, expected, actual } => {
                write!(f, "Array '{name}' has length {actual}; expected {expected}.")
            }
            DetectError::InvalidTimestamp { index, value } => {
                write!(
                    f,
                    "Invalid timestamp {value} at index {index}. \
                     Timestamps must be finite and non-negative."
                )
            }
            DetectError::NonIncreasingTimestamps { index } => {
                write!(f, "Timestamps must be strictly increasing; violated at index {index}.")
            }
            DetectError::InvalidSamplingRate(value) => {
                write!(f, "Invalid sampling rate: {value} Hz. Must be finite and positive.")
            }
            DetectError::InvalidDuration { name, value_ms } => {
                write!(f, "Invalid duration '{name}': {value_ms} ms.")
            }
            DetectError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{name}': {value}.")
            }
            DetectError::UnknownName { kind, name } => {
                write!(f, "Unknown {kind}: {name:?}.")
            }
            DetectError::MissingPupilData => {
                write!(f, "Pupil-based detection requested but the trial has no pupil series.")
            }
            DetectError::Signal(inner) => write!(f, "{inner}"),
        }
    }
}

impl From<SignalError> for DetectError {
    fn from(err: SignalError) -> Self {
        DetectError::Signal(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<DetectError> for PyErr {
    fn from(err: DetectError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
