//! gaze_events — gaze-event detection for eye-tracking data, with Python
//! bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the detection engine to Python via the `_gaze_events` extension
//! module. The crate classifies the samples of binocular or monocular
//! eye-tracking trials into blinks, saccades, and fixations, and derives
//! typed event records from the resulting masks.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`signal`, `detection`, `events`,
//!   `batch`) as the public crate surface.
//! - Define the `GazeEventEngine` `#[pyclass]` wrapper and the
//!   `#[pymodule]` initializer for the `_gaze_events` Python extension
//!   when the `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input conversion, and error mapping.
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are propagated as `DetectError` values
//!   internally and converted to `ValueError` at the PyO3 boundary.
//! - Detector selection from Python is by name string; the conversion
//!   helpers live in [`utils`].
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature:
//!
//!   ```rust
//!   use gaze_events::detection::{EngineConfig, detect_events};
//!   ```
//!
//! - The Python packaging layer imports the `_gaze_events` module defined
//!   here and wraps its classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   the integration test over the full pipeline; binding smoke tests
//!   live on the Python side.

pub mod batch;
pub mod detection;
pub mod events;
pub mod signal;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    detection::{config::EngineConfig, engine::detect_events},
    utils::{build_engine_config, extract_trial},
};

/// GazeEventEngine — Python-facing wrapper for the detection engine.
///
/// Purpose
/// -------
/// Hold a validated [`EngineConfig`] built from Python-friendly arguments
/// and run the per-trial detection pipeline on demand.
///
/// Key behaviors
/// -------------
/// - Select detectors by name string (`blink_detector='missing_data'`,
///   `saccade_detector='engbert'`, `fixation_detector='velocity'`, ...)
///   with `'none'` disabling a category.
/// - Convert numpy arrays, pandas Series, or float sequences into a
///   validated trial and return the three per-sample boolean masks.
///
/// Parameters
/// ----------
/// Constructed from Python via `GazeEventEngine(...)`; every argument is
/// optional and defaults to the documented engine defaults (missing-data
/// blinks, Engbert saccades, fixation backfill, `'either'` eye
/// selection).
///
/// Fields
/// ------
/// - `config`: [`EngineConfig`]
///   The validated configuration applied to every `detect` call.
///
/// Notes
/// -----
/// - This type is part of the Python FFI surface; native Rust code should
///   use [`detect_events`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "gaze_events")]
pub struct GazeEventEngine {
    /// The validated detection configuration.
    config: EngineConfig,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl GazeEventEngine {
    #[new]
    #[pyo3(
        signature = (
            blink_detector = None,
            saccade_detector = None,
            fixation_detector = None,
            backfill = None,
            eye_selection = None,
            missing_value = None,
            min_pupil_size = None,
            derivation_window = None,
            noise_multiplier = None,
            velocity_threshold = None,
            dispersion_threshold = None,
            viewer_distance = None,
            screen_size_cm = None,
            screen_resolution = None,
        ),
        text_signature = "(blink_detector='missing_data', saccade_detector='engbert', \
                          fixation_detector='none', backfill='fixation', \
                          eye_selection='either', missing_value=None, min_pupil_size=None, \
                          derivation_window=None, noise_multiplier=None, \
                          velocity_threshold=None, dispersion_threshold=None, \
                          viewer_distance=None, screen_size_cm=None, screen_resolution=None)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        blink_detector: Option<&str>, saccade_detector: Option<&str>,
        fixation_detector: Option<&str>, backfill: Option<&str>,
        eye_selection: Option<&str>, missing_value: Option<f64>,
        min_pupil_size: Option<f64>, derivation_window: Option<usize>,
        noise_multiplier: Option<f64>, velocity_threshold: Option<f64>,
        dispersion_threshold: Option<f64>, viewer_distance: Option<f64>,
        screen_size_cm: Option<(f64, f64)>, screen_resolution: Option<(usize, usize)>,
    ) -> PyResult<Self> {
        let config = build_engine_config(
            blink_detector,
            saccade_detector,
            fixation_detector,
            backfill,
            eye_selection,
            missing_value,
            min_pupil_size,
            derivation_window,
            noise_multiplier,
            velocity_threshold,
            dispersion_threshold,
            viewer_distance,
            screen_size_cm,
            screen_resolution,
        )?;
        Ok(GazeEventEngine { config })
    }

    /// Run detection over one trial and return the per-sample masks.
    ///
    /// Returns `(is_blink, is_saccade, is_fixation)`, three boolean lists
    /// of the trial's length. All input arrays must share that length;
    /// `x_right` and `y_right` make the trial binocular and must be given
    /// together.
    #[pyo3(
        signature = (
            timestamps,
            x_left,
            y_left,
            x_right = None,
            y_right = None,
            pupil_left = None,
            time_unit = None,
        ),
        text_signature = "(self, timestamps, x_left, y_left, /, x_right=None, \
                          y_right=None, pupil_left=None, time_unit='milliseconds')"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn detect<'py>(
        &self, py: Python<'py>, timestamps: &Bound<'py, PyAny>, x_left: &Bound<'py, PyAny>,
        y_left: &Bound<'py, PyAny>, x_right: Option<&Bound<'py, PyAny>>,
        y_right: Option<&Bound<'py, PyAny>>, pupil_left: Option<&Bound<'py, PyAny>>,
        time_unit: Option<&str>,
    ) -> PyResult<(Vec<bool>, Vec<bool>, Vec<bool>)> {
        let trial =
            extract_trial(py, timestamps, x_left, y_left, x_right, y_right, pupil_left, time_unit)?;
        let masks = detect_events(&trial, &self.config)?;
        Ok((masks.is_blink, masks.is_saccade, masks.is_fixation))
    }
}

/// _gaze_events — PyO3 module initializer for the Python extension.
///
/// Registers the [`GazeEventEngine`] class; invoked automatically by
/// Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _gaze_events<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<GazeEventEngine>()?;
    Ok(())
}
