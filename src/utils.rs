#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    detection::{
        config::{
            BackfillCategory, BlinkDetectorSpec, DispersionFixationConfig,
            EngbertSaccadeConfig, EngineConfig, FixationDetectorSpec,
            MissingDataBlinkConfig, PupilSizeBlinkConfig, SaccadeDetectorSpec,
            VelocityFixationConfig,
        },
        detector::EyeSelection,
        errors::DetectError,
        samples::{EyeBuffers, TimeUnit, TrialSamples},
    },
    signal::geometry::ScreenGeometry,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
fn extract_owned_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!(
            "{name} must be a 1-D contiguous float64 array or sequence"
        ))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

#[cfg(feature = "python-bindings")]
pub fn extract_time_unit(unit: Option<&str>) -> PyResult<TimeUnit> {
    let unit_str = unit.unwrap_or("milliseconds").to_lowercase();
    match unit_str.as_str() {
        "milliseconds" | "ms" => Ok(TimeUnit::Milliseconds),
        "microseconds" | "us" => Ok(TimeUnit::Microseconds),
        other => Err(PyValueError::new_err(format!(
            "invalid time unit {:?} (expected 'milliseconds' or 'microseconds')",
            other
        ))),
    }
}

/// Assemble a validated [`TrialSamples`] from Python array-likes.
///
/// Monocular when no right-eye arrays are given; `x_right` and `y_right`
/// must be given together.
#[cfg(feature = "python-bindings")]
pub fn extract_trial<'py>(
    py: Python<'py>, timestamps: &Bound<'py, PyAny>, x_left: &Bound<'py, PyAny>,
    y_left: &Bound<'py, PyAny>, x_right: Option<&Bound<'py, PyAny>>,
    y_right: Option<&Bound<'py, PyAny>>, pupil_left: Option<&Bound<'py, PyAny>>,
    time_unit: Option<&str>,
) -> PyResult<TrialSamples> {
    let unit = extract_time_unit(time_unit)?;
    let ts = extract_owned_array(py, timestamps, "timestamps")?;
    let left = EyeBuffers::new(
        extract_owned_array(py, x_left, "x_left")?,
        extract_owned_array(py, y_left, "y_left")?,
        pupil_left
            .map(|p| extract_owned_array(py, p, "pupil_left"))
            .transpose()?,
    );

    let trial = match (x_right, y_right) {
        (Some(xr), Some(yr)) => {
            let right = EyeBuffers::new(
                extract_owned_array(py, xr, "x_right")?,
                extract_owned_array(py, yr, "y_right")?,
                None,
            );
            TrialSamples::binocular(ts, left, right, unit)?
        }
        (None, None) => TrialSamples::monocular(ts, left, unit)?,
        _ => {
            return Err(PyValueError::new_err(
                "x_right and y_right must be provided together",
            ));
        }
    };
    Ok(trial)
}

#[cfg(feature = "python-bindings")]
fn extract_blink_spec(
    blink_detector: Option<&str>, missing_value: Option<f64>, min_pupil_size: Option<f64>,
) -> PyResult<Option<BlinkDetectorSpec>> {
    let name = blink_detector.unwrap_or("missing_data").to_lowercase();
    let spec = match name.as_str() {
        "none" => None,
        "missing_data" => Some(BlinkDetectorSpec::MissingData(MissingDataBlinkConfig {
            missing_value,
            ..MissingDataBlinkConfig::default()
        })),
        "pupil_size" => {
            let mut config = PupilSizeBlinkConfig::default();
            if let Some(floor) = min_pupil_size {
                config.min_pupil_size_mm = floor;
            }
            Some(BlinkDetectorSpec::PupilSize(config))
        }
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid blink detector {:?} (expected 'missing_data', 'pupil_size', or 'none')",
                other
            )));
        }
    };
    Ok(spec)
}

#[cfg(feature = "python-bindings")]
fn extract_saccade_spec(
    saccade_detector: Option<&str>, derivation_window: Option<usize>,
    noise_multiplier: Option<f64>,
) -> PyResult<Option<SaccadeDetectorSpec>> {
    let name = saccade_detector.unwrap_or("engbert").to_lowercase();
    let spec = match name.as_str() {
        "none" => None,
        "engbert" => {
            let mut config = EngbertSaccadeConfig::default();
            if let Some(window) = derivation_window {
                config.derivation_window = window;
            }
            if let Some(lambda) = noise_multiplier {
                config.noise_multiplier = lambda;
            }
            Some(SaccadeDetectorSpec::Engbert(config))
        }
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid saccade detector {:?} (expected 'engbert' or 'none')",
                other
            )));
        }
    };
    Ok(spec)
}

#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
fn extract_fixation_spec(
    fixation_detector: Option<&str>, velocity_threshold: Option<f64>,
    dispersion_threshold: Option<f64>, viewer_distance: Option<f64>,
    screen_size_cm: Option<(f64, f64)>, screen_resolution: Option<(usize, usize)>,
) -> PyResult<Option<FixationDetectorSpec>> {
    let name = fixation_detector.unwrap_or("none").to_lowercase();
    let spec = match name.as_str() {
        "none" => None,
        "velocity" | "velocity_threshold" => {
            let distance = viewer_distance.ok_or_else(|| {
                PyValueError::new_err(
                    "viewer_distance must be provided for the velocity fixation detector",
                )
            })?;
            let screen = extract_screen(screen_size_cm, screen_resolution)?.ok_or_else(
                || {
                    PyValueError::new_err(
                        "screen_size_cm and screen_resolution must be provided \
                         for the velocity fixation detector",
                    )
                },
            )?;
            let mut config = VelocityFixationConfig::new(distance, screen);
            if let Some(threshold) = velocity_threshold {
                config.velocity_threshold_deg_s = threshold;
            }
            Some(FixationDetectorSpec::VelocityThreshold(config))
        }
        "dispersion" | "dispersion_threshold" => {
            let mut config = DispersionFixationConfig::default();
            if let Some(threshold) = dispersion_threshold {
                config.dispersion_threshold_px = threshold;
            }
            Some(FixationDetectorSpec::DispersionThreshold(config))
        }
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid fixation detector {:?} (expected 'velocity', 'dispersion', or 'none')",
                other
            )));
        }
    };
    Ok(spec)
}

#[cfg(feature = "python-bindings")]
pub fn extract_screen(
    screen_size_cm: Option<(f64, f64)>, screen_resolution: Option<(usize, usize)>,
) -> PyResult<Option<ScreenGeometry>> {
    match (screen_size_cm, screen_resolution) {
        (Some((width_cm, height_cm)), Some(resolution_px)) => {
            let screen = ScreenGeometry::new(width_cm, height_cm, resolution_px)
                .map_err(DetectError::from)?;
            Ok(Some(screen))
        }
        (None, None) => Ok(None),
        _ => Err(PyValueError::new_err(
            "screen_size_cm and screen_resolution must be provided together",
        )),
    }
}

#[cfg(feature = "python-bindings")]
fn extract_backfill(backfill: Option<&str>) -> PyResult<Option<BackfillCategory>> {
    let name = backfill.unwrap_or("fixation").to_lowercase();
    match name.as_str() {
        "none" => Ok(None),
        "saccade" => Ok(Some(BackfillCategory::Saccade)),
        "fixation" => Ok(Some(BackfillCategory::Fixation)),
        other => Err(PyValueError::new_err(format!(
            "invalid backfill category {:?} (expected 'saccade', 'fixation', or 'none')",
            other
        ))),
    }
}

/// Assemble a validated [`EngineConfig`] from Python-friendly arguments.
///
/// Detector names select the specs; the numeric parameters override the
/// corresponding defaults where given and are otherwise left at their
/// documented values. Detector-level validation (positivity, finiteness)
/// happens later, at detector construction.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn build_engine_config(
    blink_detector: Option<&str>, saccade_detector: Option<&str>,
    fixation_detector: Option<&str>, backfill: Option<&str>, eye_selection: Option<&str>,
    missing_value: Option<f64>, min_pupil_size: Option<f64>,
    derivation_window: Option<usize>, noise_multiplier: Option<f64>,
    velocity_threshold: Option<f64>, dispersion_threshold: Option<f64>,
    viewer_distance: Option<f64>, screen_size_cm: Option<(f64, f64)>,
    screen_resolution: Option<(usize, usize)>,
) -> PyResult<EngineConfig> {
    use std::str::FromStr;

    let selection = match eye_selection {
        Some(name) => EyeSelection::from_str(name)?,
        None => EyeSelection::Either,
    };

    Ok(EngineConfig {
        blink: extract_blink_spec(blink_detector, missing_value, min_pupil_size)?,
        saccade: extract_saccade_spec(saccade_detector, derivation_window, noise_multiplier)?,
        fixation: extract_fixation_spec(
            fixation_detector,
            velocity_threshold,
            dispersion_threshold,
            viewer_distance,
            screen_size_cm,
            screen_resolution,
        )?,
        backfill: extract_backfill(backfill)?,
        eye_selection: selection,
    })
}
