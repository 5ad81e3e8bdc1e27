//! batch — parallel detection over independent trials.
//!
//! Purpose
//! -------
//! Fan the per-trial detection pipeline out over a collection of trials.
//! Trials are independent and the configuration is read-only, so each
//! trial runs on its own scoped worker thread.
//!
//! Key behaviors
//! -------------
//! - [`detect_batch`] returns one `DetectResult<EventMasks>` per input
//!   trial, in input order. A failing trial fills its own slot with `Err`
//!   without affecting the others; there are no retries.
//! - Failures are logged per trial (index and error) before the results
//!   are returned.
//!
//! Invariants & assumptions
//! ------------------------
//! - `detect_events` is pure, so the parallel results are identical to a
//!   sequential run.
//!
//! Testing notes
//! -------------
//! - Unit tests mix valid and failing trials in one batch and compare
//!   against per-trial sequential results.
use crate::detection::{
    config::EngineConfig,
    engine::{EventMasks, detect_events},
    errors::DetectResult,
    samples::TrialSamples,
};

/// Detect events over every trial, one scoped worker thread per trial.
///
/// Parameters
/// ----------
/// - `trials`: `&[TrialSamples]`
///   The trials to process; order is preserved in the output.
/// - `config`: `&EngineConfig`
///   Shared read-only configuration applied to every trial.
///
/// Returns
/// -------
/// `Vec<DetectResult<EventMasks>>`
///   One result per trial. Trial-level failures are reported in their own
///   slot, never as a batch-level failure.
pub fn detect_batch(
    trials: &[TrialSamples], config: &EngineConfig,
) -> Vec<DetectResult<EventMasks>> {
    let results = std::thread::scope(|scope| {
        let handles: Vec<_> = trials
            .iter()
            .map(|trial| scope.spawn(move || detect_events(trial, config)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("detection worker panicked"))
            .collect::<Vec<_>>()
    });

    for (index, result) in results.iter().enumerate() {
        if let Err(err) = result {
            log::warn!("trial {index} failed: {err}");
        }
    }
    results
}
