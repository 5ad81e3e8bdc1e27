//! signal::geometry — pixel-to-visual-angle conversion.
//!
//! Purpose
//! -------
//! Convert pixel-space gaze displacements into visual angles (degrees) given
//! the viewer distance and the physical screen geometry, and derive
//! per-sample angular velocity series from coordinate signals.
//!
//! Key behaviors
//! -------------
//! - [`ScreenGeometry`] is a validated container for the physical screen
//!   dimensions (cm) and pixel resolution; it exposes per-axis
//!   centimeters-per-pixel factors.
//! - [`visual_angle`] maps two pixel points to the angle (degrees) their
//!   separation subtends at the viewer's eye, via
//!   `atan2(distance_cm, viewer_distance_cm)`.
//! - [`angular_velocity`] turns adjacent-sample visual angles into a
//!   degrees-per-second series whose first entry is NaN.
//!
//! Invariants & assumptions
//! ------------------------
//! - Screen dimensions and viewer distance are finite, strictly positive
//!   centimeters; resolutions are non-zero pixel counts.
//! - Missing coordinates are NaN; any NaN coordinate makes the resulting
//!   angle NaN rather than an error.
//! - The horizontal axis is scaled by `width_cm / resolution_px.0` and the
//!   vertical axis by `height_cm / resolution_px.1`; a square screen with
//!   square pixels therefore treats the two axes symmetrically.
//!
//! Downstream usage
//! ----------------
//! - The I-VT fixation detector thresholds the [`angular_velocity`] series.
//! - Saccade and fixation event records compute amplitudes and velocity
//!   statistics through [`visual_angle`] and [`angular_velocity`].
//!
//! Testing notes
//! -------------
//! - Unit tests pin the 45° one-pixel case (10 cm / 10 px screen at 1 cm)
//!   on both axes, NaN propagation for missing coordinates, and constructor
//!   validation.
use crate::signal::errors::{SignalError, SignalResult};

/// `ScreenGeometry` — validated physical screen description.
///
/// Purpose
/// -------
/// Carry the physical width/height of the display (cm) and its pixel
/// resolution so pixel displacements can be converted to centimeters and
/// then to visual angles. The type is plain data; all validation happens in
/// [`ScreenGeometry::new`].
///
/// Fields
/// ------
/// - `width_cm`: `f64`
///   Physical screen width in centimeters; finite and > 0.
/// - `height_cm`: `f64`
///   Physical screen height in centimeters; finite and > 0.
/// - `resolution_px`: `(usize, usize)`
///   Pixel resolution as (horizontal, vertical); both > 0.
///
/// Invariants
/// ----------
/// - Both dimensions are finite and strictly positive; both resolution axes
///   are non-zero. Enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    /// Physical screen width in centimeters.
    pub width_cm: f64,
    /// Physical screen height in centimeters.
    pub height_cm: f64,
    /// Pixel resolution as (horizontal, vertical).
    pub resolution_px: (usize, usize),
}

impl ScreenGeometry {
    /// Construct a validated [`ScreenGeometry`].
    ///
    /// Parameters
    /// ----------
    /// - `width_cm`, `height_cm`: `f64`
    ///   Physical dimensions in centimeters; must be finite and > 0.
    /// - `resolution_px`: `(usize, usize)`
    ///   Pixel resolution as (horizontal, vertical); both must be > 0.
    ///
    /// Returns
    /// -------
    /// `SignalResult<ScreenGeometry>`
    ///   - `Ok` when all fields satisfy the invariants.
    ///   - `Err(SignalError::InvalidScreenDimension)` or
    ///     `Err(SignalError::InvalidScreenResolution)` otherwise.
    pub fn new(
        width_cm: f64, height_cm: f64, resolution_px: (usize, usize),
    ) -> SignalResult<Self> {
        if !width_cm.is_finite() || width_cm <= 0.0 {
            return Err(SignalError::InvalidScreenDimension {
                dimension: "width",
                value: width_cm,
            });
        }
        if !height_cm.is_finite() || height_cm <= 0.0 {
            return Err(SignalError::InvalidScreenDimension {
                dimension: "height",
                value: height_cm,
            });
        }
        if resolution_px.0 == 0 {
            return Err(SignalError::InvalidScreenResolution {
                axis: "horizontal",
                value: resolution_px.0,
            });
        }
        if resolution_px.1 == 0 {
            return Err(SignalError::InvalidScreenResolution {
                axis: "vertical",
                value: resolution_px.1,
            });
        }
        Ok(ScreenGeometry { width_cm, height_cm, resolution_px })
    }

    /// Per-axis pixel size in centimeters, as (horizontal, vertical).
    #[inline]
    pub fn pixel_size_cm(&self) -> (f64, f64) {
        (
            self.width_cm / self.resolution_px.0 as f64,
            self.height_cm / self.resolution_px.1 as f64,
        )
    }
}

/// Visual angle (degrees) subtended by the displacement between two pixels.
///
/// Parameters
/// ----------
/// - `p1`, `p2`: `(f64, f64)`
///   Pixel coordinates as (x, y). A NaN in either point yields NaN.
/// - `viewer_distance_cm`: `f64`
///   Distance from the viewer's eye to the screen, in centimeters. Assumed
///   validated by the caller (detector construction validates it).
/// - `screen`: `&ScreenGeometry`
///   Physical screen description used for per-axis cm-per-pixel scaling.
///
/// Returns
/// -------
/// `f64`
///   `atan2(displacement_cm, viewer_distance_cm)` in degrees, where the
///   displacement is the Euclidean norm of the per-axis centimeter deltas.
///   NaN when either point has a missing coordinate.
#[inline]
pub fn visual_angle(
    p1: (f64, f64), p2: (f64, f64), viewer_distance_cm: f64, screen: &ScreenGeometry,
) -> f64 {
    if p1.0.is_nan() || p1.1.is_nan() || p2.0.is_nan() || p2.1.is_nan() {
        return f64::NAN;
    }
    let (px_w, px_h) = screen.pixel_size_cm();
    let dx_cm = (p2.0 - p1.0) * px_w;
    let dy_cm = (p2.1 - p1.1) * px_h;
    let distance_cm = (dx_cm * dx_cm + dy_cm * dy_cm).sqrt();
    distance_cm.atan2(viewer_distance_cm).to_degrees()
}

/// Per-sample angular velocity series in degrees per second.
///
/// Parameters
/// ----------
/// - `x`, `y`: `&[f64]`
///   Parallel pixel-coordinate signals of equal, non-zero length.
/// - `sampling_rate`: `f64`
///   Sampling rate in Hz; must be finite and > 0.
/// - `viewer_distance_cm`: `f64`
///   Viewer distance in centimeters; must be finite and > 0.
/// - `screen`: `&ScreenGeometry`
///   Physical screen description.
///
/// Returns
/// -------
/// `SignalResult<Vec<f64>>`
///   - `Ok(vel)` where `vel[0]` is NaN and
///     `vel[i] = visual_angle(sample i-1, sample i) * sampling_rate` for
///     i ≥ 1. Samples with missing coordinates produce NaN velocities.
///
/// Errors
/// ------
/// - `SignalError::EmptySignal` when `x` is empty.
/// - `SignalError::LengthMismatch` when `x.len() != y.len()`.
/// - `SignalError::InvalidSamplingRate` / `InvalidViewerDistance` for
///   non-finite or non-positive scalars.
pub fn angular_velocity(
    x: &[f64], y: &[f64], sampling_rate: f64, viewer_distance_cm: f64, screen: &ScreenGeometry,
) -> SignalResult<Vec<f64>> {
    if x.is_empty() {
        return Err(SignalError::EmptySignal);
    }
    if x.len() != y.len() {
        return Err(SignalError::LengthMismatch { left: x.len(), right: y.len() });
    }
    if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
        return Err(SignalError::InvalidSamplingRate(sampling_rate));
    }
    if !viewer_distance_cm.is_finite() || viewer_distance_cm <= 0.0 {
        return Err(SignalError::InvalidViewerDistance(viewer_distance_cm));
    }

    let mut out = vec![f64::NAN; x.len()];
    for i in 1..x.len() {
        let angle =
            visual_angle((x[i - 1], y[i - 1]), (x[i], y[i]), viewer_distance_cm, screen);
        out[i] = angle * sampling_rate;
    }
    Ok(out)
}
