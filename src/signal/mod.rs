//! signal — numeric primitives for gaze-event detection.
//!
//! Purpose
//! -------
//! Collect the low-level numeric routines the detection engine is built on:
//! NaN-filling signal shifts, the Engbert–Kliegl centred derivative, a
//! median-based robust standard deviation, and pixel-to-visual-angle
//! geometry. These are pure functions over `&[f64]` slices with NaN marking
//! missing samples.
//!
//! Key behaviors
//! -------------
//! - [`primitives`] provides [`shift`], [`centered_derivative`], and
//!   [`median_standard_deviation`].
//! - [`geometry`] provides [`ScreenGeometry`], [`visual_angle`], and
//!   [`angular_velocity`].
//! - [`errors`] defines [`SignalError`] and [`SignalResult`], the subtree's
//!   failure surface.
//!
//! Conventions
//! -----------
//! - Validation failures are reported as [`SignalResult`] values, never
//!   panics; NaN is data (a missing sample), not an error.
//! - No I/O and no logging anywhere in this subtree.
//!
//! Downstream usage
//! ----------------
//! - The detection layer wraps these errors as `DetectError::Signal` and
//!   composes the primitives into candidate tests; typical imports are:
//!
//!   ```rust
//!   use gaze_events::signal::{centered_derivative, median_standard_deviation};
//!   ```
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests pinning the exact values required by
//!   the detection layer (boundary NaNs, the 0.5 robust SD on 0..10, the
//!   45° one-pixel visual angle).

pub mod errors;
pub mod geometry;
pub mod primitives;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SignalError, SignalResult};
pub use self::geometry::{ScreenGeometry, angular_velocity, visual_angle};
pub use self::primitives::{
    DEFAULT_MIN_SD, centered_derivative, median_standard_deviation, shift,
};
