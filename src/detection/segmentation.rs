//! Candidate segmentation — boolean masks to closed index intervals.
//!
//! Purpose
//! -------
//! Convert a per-sample boolean candidate mask into a list of closed index
//! intervals, applying a minimum-gap merge rule and a minimum-duration
//! exclusion rule. This single utility underlies blink, saccade, and
//! fixation candidate-to-event conversion.
//!
//! Key behaviors
//! -------------
//! - [`merge_candidate_runs`] splits the sorted candidate indices into
//!   maximal runs wherever the number of non-candidate samples between
//!   consecutive candidates exceeds the merge threshold, closes each run
//!   into its `(min, max)` interval (absorbing interior non-candidate
//!   gaps), and discards intervals with fewer samples than the minimum.
//!   A threshold of zero merges only strictly contiguous candidates.
//! - [`intervals_to_mask`] expands closed intervals back into a boolean
//!   mask.
//! - [`min_samples_within_event`] and [`min_samples_between_events`]
//!   derive the two thresholds from millisecond durations and a sampling
//!   rate, the same way for every detector.
//!
//! Conventions
//! -----------
//! - Intervals are closed `(start, end)` index pairs, disjoint, and ordered
//!   by start index; an empty mask yields an empty list.
//! - An interval's sample count is `end - start + 1` (inclusive).
//!
//! Downstream usage
//! ----------------
//! - `detect_monocular` runs a detector's candidates through
//!   [`merge_candidate_runs`] and back through [`intervals_to_mask`];
//!   the event builder reuses [`merge_candidate_runs`] to materialize
//!   event records from final masks.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the reference case from the engine's contract:
//!   mask `[0,1,1,1,0,0,1,1,0]` with merge gap 1 and minimum 2 yields
//!   `[(1,3), (6,7)]`.
use crate::detection::errors::DetectResult;
use crate::detection::validation::{validate_min_duration, validate_sampling_rate};

/// Minimum samples an event must span, from a millisecond duration.
///
/// `max(1, floor(min_duration_ms * sampling_rate / 1000))`; the floor at 1
/// keeps very low rates from producing a zero minimum.
///
/// Errors
/// ------
/// - `DetectError::InvalidDuration` / `InvalidSamplingRate` for malformed
///   scalars.
#[inline]
pub fn min_samples_within_event(
    min_duration_ms: f64, sampling_rate: f64,
) -> DetectResult<usize> {
    let duration = validate_min_duration("min_duration", min_duration_ms)?;
    let rate = validate_sampling_rate(sampling_rate)?;
    Ok(((duration * rate / 1_000.0).floor() as usize).max(1))
}

/// Maximum sample gap that still merges two candidate runs, from a
/// millisecond inter-event time.
///
/// `ceil(inter_event_time_ms * sampling_rate / 1000)`.
///
/// Errors
/// ------
/// - `DetectError::InvalidDuration` / `InvalidSamplingRate` for malformed
///   scalars. A zero inter-event time is valid; only strictly contiguous
///   candidates then share a run.
#[inline]
pub fn min_samples_between_events(
    inter_event_time_ms: f64, sampling_rate: f64,
) -> DetectResult<usize> {
    let gap = crate::detection::validation::validate_inter_event_time(
        "inter_event_time",
        inter_event_time_ms,
    )?;
    let rate = validate_sampling_rate(sampling_rate)?;
    Ok((gap * rate / 1_000.0).ceil() as usize)
}

/// Merge a candidate mask into closed index intervals.
///
/// Parameters
/// ----------
/// - `mask`: `&[bool]`
///   Per-sample candidate mask.
/// - `min_samples_between_events`: `usize`
///   Maximum number of non-candidate samples between consecutive
///   candidates that one run may absorb; a larger interior gap splits the
///   run. Zero merges only strictly contiguous candidates.
/// - `min_samples_within_event`: `usize`
///   Minimum inclusive sample count an interval must reach to survive.
///   Values below 1 are treated as 1.
///
/// Returns
/// -------
/// `Vec<(usize, usize)>`
///   Disjoint closed intervals ordered by start index. A run spanning
///   non-contiguous candidate indices becomes one interval; the absorbed
///   interior gaps count towards its length.
pub fn merge_candidate_runs(
    mask: &[bool], min_samples_between_events: usize, min_samples_within_event: usize,
) -> Vec<(usize, usize)> {
    let min_within = min_samples_within_event.max(1);
    let candidates: Vec<usize> =
        mask.iter().enumerate().filter(|(_, &flag)| flag).map(|(i, _)| i).collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut intervals = Vec::new();
    let mut run_start = candidates[0];
    let mut run_end = candidates[0];
    for &index in &candidates[1..] {
        // Interior gap: non-candidate samples strictly between the runs.
        if index - run_end - 1 > min_samples_between_events {
            intervals.push((run_start, run_end));
            run_start = index;
        }
        run_end = index;
    }
    intervals.push((run_start, run_end));

    intervals.retain(|&(start, end)| end - start + 1 >= min_within);
    intervals
}

/// Expand closed intervals back into a boolean mask of length `len`.
///
/// Interval bounds past `len - 1` are clipped; callers producing intervals
/// from a mask of the same length never trigger the clip.
pub fn intervals_to_mask(intervals: &[(usize, usize)], len: usize) -> Vec<bool> {
    let mut mask = vec![false; len];
    for &(start, end) in intervals {
        for flag in mask.iter_mut().take((end + 1).min(len)).skip(start) {
            *flag = true;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The reference segmentation case (two separate runs surviving).
    // - Gap absorption inside a run and the merge threshold boundary.
    // - Minimum-length exclusion and the empty-mask edge case.
    // - Threshold derivation from millisecond durations.
    // - Round-tripping intervals back to a mask.
    //
    // They intentionally DO NOT cover:
    // - Detector-specific candidate definitions; detector modules test
    //   those.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the reference case: runs separated by a gap larger than the merge
    // threshold stay separate, and both survive the minimum length.
    //
    // Given
    // -----
    // - Mask [0,1,1,1,0,0,1,1,0], merge gap 1, minimum 2.
    //
    // Expect
    // ------
    // - Intervals [(1,3), (6,7)].
    fn merge_candidate_runs_reference_case() {
        // Arrange
        let mask = [false, true, true, true, false, false, true, true, false];

        // Act
        let intervals = merge_candidate_runs(&mask, 1, 2);

        // Assert
        assert_eq!(intervals, vec![(1, 3), (6, 7)]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a gap at the merge threshold is absorbed into one
    // interval whose absorbed samples count towards its length.
    //
    // Given
    // -----
    // - The same mask, whose two runs are separated by two non-candidate
    //   samples (indices 4 and 5); merge gap 1 (2 > 1, still split) and
    //   merge gap 2 (absorbed).
    //
    // Expect
    // ------
    // - Gap 1 keeps two intervals; gap 2 yields the single interval (1,7).
    fn merge_candidate_runs_absorbs_gaps_at_threshold() {
        // Arrange
        let mask = [false, true, true, true, false, false, true, true, false];

        // Act & Assert
        assert_eq!(merge_candidate_runs(&mask, 1, 2), vec![(1, 3), (6, 7)]);
        assert_eq!(merge_candidate_runs(&mask, 2, 2), vec![(1, 7)]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a zero merge gap keeps a contiguous run whole and splits
    // only at actual holes in the mask.
    //
    // Given
    // -----
    // - A contiguous 5-sample run, and the same run with a one-sample hole,
    //   both under merge gap 0 and minimum 2.
    //
    // Expect
    // ------
    // - The contiguous run survives as one interval; the holed run splits
    //   into two.
    fn merge_candidate_runs_zero_gap_preserves_contiguous_runs() {
        // Arrange
        let contiguous = [false, true, true, true, true, true, false];
        let holed = [false, true, true, false, true, true, false];

        // Act & Assert
        assert_eq!(merge_candidate_runs(&contiguous, 0, 2), vec![(1, 5)]);
        assert_eq!(merge_candidate_runs(&holed, 0, 2), vec![(1, 2), (4, 5)]);
    }

    #[test]
    // Purpose
    // -------
    // Verify minimum-length exclusion and the empty-mask edge case.
    //
    // Given
    // -----
    // - A mask with a single isolated candidate and minimum 2; an all-false
    //   mask.
    //
    // Expect
    // ------
    // - Both yield an empty interval list.
    fn merge_candidate_runs_discards_short_runs_and_handles_empty_mask() {
        // Act & Assert
        assert!(merge_candidate_runs(&[false, true, false], 0, 2).is_empty());
        assert!(merge_candidate_runs(&[false; 6], 1, 1).is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Verify the millisecond-to-sample threshold derivations at 100 Hz.
    //
    // Given
    // -----
    // - 50 ms minimum duration and 5 ms inter-event time at 100 Hz; a
    //   1 ms minimum at 100 Hz to exercise the floor at 1.
    //
    // Expect
    // ------
    // - within = 5 (floor of 5.0), between = 1 (ceil of 0.5), and the
    //   sub-sample minimum clamps to 1.
    fn sample_thresholds_derive_from_durations() {
        // Act & Assert
        assert_eq!(min_samples_within_event(50.0, 100.0).unwrap(), 5);
        assert_eq!(min_samples_between_events(5.0, 100.0).unwrap(), 1);
        assert_eq!(min_samples_within_event(1.0, 100.0).unwrap(), 1);
        assert!(min_samples_within_event(0.0, 100.0).is_err());
        assert!(min_samples_between_events(5.0, 0.0).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Verify that intervals expand back into the mask they came from when
    // no samples were discarded.
    //
    // Given
    // -----
    // - The reference mask and its intervals under merge gap 0.
    //
    // Expect
    // ------
    // - `intervals_to_mask` reproduces the original mask.
    fn intervals_round_trip_to_mask() {
        // Arrange
        let mask = vec![false, true, true, true, false, false, true, true, false];

        // Act
        let intervals = merge_candidate_runs(&mask, 0, 1);
        let rebuilt = intervals_to_mask(&intervals, mask.len());

        // Assert
        assert_eq!(rebuilt, mask);
    }
}
