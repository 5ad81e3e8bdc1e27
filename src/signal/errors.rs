//! signal::errors — error types for the numeric signal primitives.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the low-level signal
//! routines (shifting, differencing, robust scale estimation, and screen
//! geometry). Keeping these failures in their own type lets the detection
//! layer wrap them without caring which primitive produced them.
//!
//! Key behaviors
//! -------------
//! - Define [`SignalResult`] and [`SignalError`] as the canonical result and
//!   error types for the `signal` subtree.
//! - Attach human-readable `Display` messages to each variant so diagnostics
//!   are meaningful without additional context.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g.
//!   "0 < window < len / 2") rather than low-level details.
//! - Variants carry just enough payload (offending value, window, length) to
//!   allow logging and debugging without dragging large buffers along.
//!
//! Downstream usage
//! ----------------
//! - Signal primitives return [`SignalResult<T>`] and never panic on
//!   user-facing invalid inputs.
//! - The detection layer converts these into `DetectError::Signal` via a
//!   `From` impl so `?` composes across the two subtrees.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages embed their payloads; the
//!   individual error conditions are exercised by the primitives' own tests.

pub type SignalResult<T> = Result<T, SignalError>;

/// SignalError — failure conditions for the numeric signal primitives.
///
/// Variants
/// --------
/// - `EmptySignal`
///   An operation that needs at least one sample received an empty slice.
/// - `LengthMismatch { left, right }`
///   Two parallel signals (e.g. x and y coordinates) differ in length.
/// - `InvalidWindow { window, len }`
///   A derivative window violates `0 < window < len / 2`.
/// - `InvalidMinSd(value)`
///   The robust-SD floor is non-finite or non-positive.
/// - `InvalidSamplingRate(value)`
///   A sampling rate is non-finite or non-positive.
/// - `InvalidViewerDistance(value)`
///   A viewer distance (cm) is non-finite or non-positive.
/// - `InvalidScreenDimension { dimension, value }`
///   A physical screen dimension (cm) is non-finite or non-positive.
/// - `InvalidScreenResolution { axis, value }`
///   A screen resolution axis is zero pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalError {
    EmptySignal,
    LengthMismatch { left: usize, right: usize },
    InvalidWindow { window: usize, len: usize },
    InvalidMinSd(f64),
    InvalidSamplingRate(f64),
    InvalidViewerDistance(f64),
    InvalidScreenDimension { dimension: &'static str, value: f64 },
    InvalidScreenResolution { axis: &'static str, value: usize },
}

impl std::error::Error for SignalError {}

impl std::fmt::Display for SignalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalError::EmptySignal => {
                write!(f, "Signal must contain at least one sample.")
            }
            SignalError::LengthMismatch { left, right } => {
                write!(f, "Parallel signals differ in length: {left} vs {right}.")
            }
            SignalError::InvalidWindow { window, len } => {
                write!(
                    f,
                    "Invalid derivative window {window} for signal of length {len}. \
                     Must satisfy 0 < window < len / 2."
                )
            }
            SignalError::InvalidMinSd(value) => {
                write!(f, "Invalid robust-SD floor: {value}. Must be finite and positive.")
            }
            SignalError::InvalidSamplingRate(value) => {
                write!(f, "Invalid sampling rate: {value} Hz. Must be finite and positive.")
            }
            SignalError::InvalidViewerDistance(value) => {
                write!(f, "Invalid viewer distance: {value} cm. Must be finite and positive.")
            }
            SignalError::InvalidScreenDimension { dimension, value } => {
                write!(f, "Invalid screen {dimension}: {value} cm. Must be finite and positive.")
            }
            SignalError::InvalidScreenResolution { axis, value } => {
                write!(f, "Invalid screen resolution on the {axis} axis: {value} px. Must be > 0.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic `Display` formatting for SignalError variants.
    // - Embedding of payload values into error messages.
    //
    // They intentionally DO NOT cover:
    // - The conditions under which each error is produced; those are tested
    //   alongside the primitives that return them.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `SignalError::InvalidWindow` embeds both the window and
    // the signal length in its `Display` message.
    //
    // Given
    // -----
    // - An `InvalidWindow` error with window = 7 and len = 10.
    //
    // Expect
    // ------
    // - The formatted message contains "7" and "10".
    fn signal_error_invalid_window_includes_payload_in_display() {
        // Arrange
        let err = SignalError::InvalidWindow { window: 7, len: 10 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('7'), "message should include the window.\nGot: {msg}");
        assert!(msg.contains("10"), "message should include the length.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `SignalError::LengthMismatch` embeds both lengths in its
    // `Display` message.
    //
    // Given
    // -----
    // - A `LengthMismatch` error with left = 4 and right = 5.
    //
    // Expect
    // ------
    // - The formatted message contains "4" and "5".
    fn signal_error_length_mismatch_includes_payload_in_display() {
        // Arrange
        let err = SignalError::LengthMismatch { left: 4, right: 5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('4') && msg.contains('5'), "Got: {msg}");
    }
}
