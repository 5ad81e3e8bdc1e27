//! signal::primitives — shifting, differencing, and robust scale estimation.
//!
//! Purpose
//! -------
//! Implement the low-level numeric building blocks of the gaze-event
//! detection engine: NaN-filling signal shifts, the Engbert–Kliegl centred
//! derivative estimator, and a median-based robust standard deviation used
//! to normalize velocity noise.
//!
//! Key behaviors
//! -------------
//! - [`shift`] moves samples along the index axis and fills vacated
//!   positions with NaN rather than reusing stale values.
//! - [`centered_derivative`] computes the window-averaged centred difference
//!   dX/dt = [Σ v[i+1 ..= i+n-1] − Σ v[i-n+1 ..= i-1]] / (2n), leaving the
//!   first and last n−1 entries NaN.
//! - [`median_standard_deviation`] computes
//!   sqrt(median(v²) − median(v)²), floored at a configurable positive
//!   minimum so it can safely be used as a division denominator.
//!
//! Invariants & assumptions
//! ------------------------
//! - Signals are finite-length `&[f64]` slices; NaN marks missing samples
//!   and propagates through arithmetic as usual.
//! - Negative input values entering [`centered_derivative`] are sensor
//!   artifacts (pixel coordinates are non-negative) and are replaced with
//!   NaN before differencing. Negative *derivative* values are legitimate
//!   direction information and are preserved.
//! - [`median_standard_deviation`] ignores NaN entries when computing the
//!   medians and never returns a value ≤ 0.
//!
//! Conventions
//! -----------
//! - Validation failures are reported via [`SignalResult`]; panics indicate
//!   programming errors (e.g. out-of-range indexing not caught upstream).
//! - This module contains no I/O and no logging.
//!
//! Downstream usage
//! ----------------
//! - The Engbert saccade detector differentiates x and y with
//!   [`centered_derivative`] and normalizes each axis by
//!   [`median_standard_deviation`].
//! - [`shift`] underlies adjacent-sample comparisons wherever a signal must
//!   be aligned against a lagged copy of itself.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the boundary behavior of the derivative (NaN count at
//!   the edges, exact slope on arithmetic sequences), the exact robust-SD
//!   value on 0..10, and NaN filling for shifts in both directions.
use crate::signal::errors::{SignalError, SignalResult};
use statrs::statistics::{Data, Median};

/// Default floor for [`median_standard_deviation`], guarding divisions by a
/// near-zero noise estimate.
pub const DEFAULT_MIN_SD: f64 = 1e-6;

/// Shift a signal by `k` positions, filling vacated entries with NaN.
///
/// Parameters
/// ----------
/// - `v`: `&[f64]`
///   Input signal of length n.
/// - `k`: `isize`
///   Shift amount. Positive k moves the value at index i to index i + k;
///   negative k moves it to i + k (towards the front). `k == 0` is the
///   identity.
///
/// Returns
/// -------
/// `Vec<f64>`
///   A signal of the same length where positions with no source sample are
///   NaN. `|k| >= n` yields an all-NaN signal.
///
/// Notes
/// -----
/// - Values shifted past either end are dropped, not wrapped; the output is
///   a shift, not a rotation.
#[inline]
pub fn shift(v: &[f64], k: isize) -> Vec<f64> {
    let n = v.len();
    let mut out = vec![f64::NAN; n];
    for (i, &value) in v.iter().enumerate() {
        let target = i as isize + k;
        if target >= 0 && (target as usize) < n {
            out[target as usize] = value;
        }
    }
    out
}

/// Compute the Engbert–Kliegl centred derivative of a signal.
///
/// Parameters
/// ----------
/// - `v`: `&[f64]`
///   Input signal of length n. Negative entries are treated as sensor
///   artifacts and replaced with NaN before differencing.
/// - `window`: `usize`
///   Averaging half-window n in the estimator; must satisfy
///   `0 < window < v.len() / 2`.
///
/// Returns
/// -------
/// `SignalResult<Vec<f64>>`
///   - `Ok(d)` where
///     `d[i] = (Σ v[i+1 ..= i+window-1] − Σ v[i-window+1 ..= i-1]) / (2 · window)`
///     for `window-1 <= i <= n - window`, and NaN for the first and last
///     `window - 1` positions.
///   - `Err(SignalError::EmptySignal)` when `v` is empty.
///   - `Err(SignalError::InvalidWindow)` when the window precondition is
///     violated.
///
/// Errors
/// ------
/// - `SignalError::EmptySignal`
///   Returned when `v.len() == 0`.
/// - `SignalError::InvalidWindow { window, len }`
///   Returned when `window == 0` or `2 * window >= v.len()`.
///
/// Panics
/// ------
/// - Never panics; all invalid inputs are surfaced as `SignalError`.
///
/// Notes
/// -----
/// - NaN inputs (missing samples) propagate into every derivative value
///   whose averaging window touches them.
/// - With `window == 2` this reduces to the classical centred difference
///   `(v[i+1] − v[i−1]) / 4`.
pub fn centered_derivative(v: &[f64], window: usize) -> SignalResult<Vec<f64>> {
    let n = v.len();
    if n == 0 {
        return Err(SignalError::EmptySignal);
    }
    if window == 0 || 2 * window >= n {
        return Err(SignalError::InvalidWindow { window, len: n });
    }

    // Negative pixel values are recording artifacts; mask them out before
    // they contaminate the window sums.
    let cleaned: Vec<f64> =
        v.iter().map(|&value| if value < 0.0 { f64::NAN } else { value }).collect();

    let mut out = vec![f64::NAN; n];
    let denom = (2 * window) as f64;
    // Half-open bounds; `i + 1 - window` cannot underflow because the loop
    // starts at `window - 1`.
    for i in (window - 1)..=(n - window) {
        let after: f64 = cleaned[i + 1..i + window].iter().sum();
        let before: f64 = cleaned[i + 1 - window..i].iter().sum();
        out[i] = (after - before) / denom;
    }
    Ok(out)
}

/// Robust standard deviation via medians, floored at a positive minimum.
///
/// Parameters
/// ----------
/// - `v`: `&[f64]`
///   Input signal. NaN entries are ignored; the remaining values feed the
///   two medians.
/// - `min_sd`: `Option<f64>`
///   Lower bound on the returned scale; defaults to [`DEFAULT_MIN_SD`].
///   Must be finite and strictly positive.
///
/// Returns
/// -------
/// `SignalResult<f64>`
///   - `Ok(sd)` where `sd = max(min_sd, sqrt(median(v²) − median(v)²))`.
///     When every entry is NaN (or the difference of medians is negative
///     due to rounding), the floor is returned.
///   - `Err(SignalError::EmptySignal)` when `v` is empty.
///   - `Err(SignalError::InvalidMinSd)` when the floor is invalid.
///
/// Errors
/// ------
/// - `SignalError::EmptySignal`
///   Returned when `v.len() == 0`.
/// - `SignalError::InvalidMinSd(value)`
///   Returned when `min_sd` is NaN, ±∞, or ≤ 0.
///
/// Notes
/// -----
/// - Deterministic: `median_standard_deviation(0..10) == 0.5` exactly.
/// - The floor makes the result safe to use as a division denominator in
///   the Engbert noise-normalization step.
pub fn median_standard_deviation(v: &[f64], min_sd: Option<f64>) -> SignalResult<f64> {
    if v.is_empty() {
        return Err(SignalError::EmptySignal);
    }
    let floor = min_sd.unwrap_or(DEFAULT_MIN_SD);
    if !floor.is_finite() || floor <= 0.0 {
        return Err(SignalError::InvalidMinSd(floor));
    }

    let finite: Vec<f64> = v.iter().copied().filter(|value| !value.is_nan()).collect();
    if finite.is_empty() {
        return Ok(floor);
    }

    let squared: Vec<f64> = finite.iter().map(|value| value * value).collect();
    let median = Data::new(finite).median();
    let median_of_squares = Data::new(squared).median();

    let variance = median_of_squares - median * median;
    if variance <= floor * floor { Ok(floor) } else { Ok(variance.sqrt()) }
}
