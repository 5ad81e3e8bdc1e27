//! Mask-to-event builder — typed records from per-sample masks.
//!
//! Purpose
//! -------
//! Convert the engine's per-sample masks into typed, per-event records with
//! derived statistics: timing for every category, displacement geometry for
//! saccades, positional and physiological summaries for fixations.
//!
//! Key behaviors
//! -------------
//! - Each mask is segmented into runs with the shared segmentation utility
//!   (merge gap 0, so masks are taken literally) and a per-event minimum
//!   sample floor (default 2 — a one-sample event has no extent).
//! - Records are built from the left (or only) eye's signals; binocular
//!   combination happened upstream in the engine.
//! - Angular statistics (saccade amplitude, fixation velocities) require
//!   viewing geometry; without it they are `None` and everything else is
//!   still produced.
//! - Pupil statistics are produced only when the trial carries a pupil
//!   series.
//!
//! Invariants & assumptions
//! ------------------------
//! - Mask lengths must equal the trial length; each event list comes out
//!   sorted by start time.
//! - NaN samples inside an event are ignored by the statistics, never
//!   propagated into them.
//!
//! Downstream usage
//! ----------------
//! - Typically called right after `detection::engine::detect_events` on
//!   the same trial.
//!
//! Testing notes
//! -------------
//! - Unit tests run the full masks-to-events path on synthetic trials and
//!   pin the derived statistics (azimuth quadrant, amplitude, centre of
//!   mass, dispersion, pupil summaries).
use crate::detection::{
    engine::EventMasks,
    errors::DetectResult,
    samples::{EyeSamples, TrialSamples},
    segmentation::merge_candidate_runs,
    validation::validate_same_length,
};
use crate::events::records::{BlinkEvent, FixationEvent, GazeEvents, SaccadeEvent};
use crate::signal::geometry::{ScreenGeometry, angular_velocity, visual_angle};
use statrs::statistics::Statistics;

/// Default minimum samples per event.
pub const DEFAULT_MIN_EVENT_SAMPLES: usize = 2;

/// `EventConfig` — options for the mask-to-event conversion.
///
/// Fields
/// ------
/// - `viewer_distance_cm`, `screen`
///   Viewing geometry for angular statistics; both must be present for
///   those statistics to be computed.
/// - `min_event_samples`: `usize`
///   Runs spanning fewer samples are dropped (default 2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventConfig {
    pub viewer_distance_cm: Option<f64>,
    pub screen: Option<ScreenGeometry>,
    pub min_event_samples: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        EventConfig {
            viewer_distance_cm: None,
            screen: None,
            min_event_samples: DEFAULT_MIN_EVENT_SAMPLES,
        }
    }
}

/// NaN-ignoring mean; NaN when no finite value is present.
#[inline]
fn finite_mean(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() { f64::NAN } else { finite.mean() }
}

/// Maximum pairwise Euclidean distance over the finite points of a run.
/// Zero when fewer than two finite points exist.
fn max_pairwise_distance(x: &[f64], y: &[f64]) -> f64 {
    let points: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(&px, &py)| px.is_finite() && py.is_finite())
        .map(|(&px, &py)| (px, py))
        .collect();
    let mut max_sq = 0.0_f64;
    for (i, &(xi, yi)) in points.iter().enumerate() {
        for &(xj, yj) in &points[i + 1..] {
            let dx = xi - xj;
            let dy = yi - yj;
            max_sq = max_sq.max(dx * dx + dy * dy);
        }
    }
    max_sq.sqrt()
}

/// Direction of a displacement, degrees counter-clockwise from the
/// positive x-axis with screen y flipped (up is positive).
#[inline]
fn azimuth_deg(start: (f64, f64), end: (f64, f64)) -> f64 {
    (-(end.1 - start.1)).atan2(end.0 - start.0).to_degrees()
}

struct EventContext<'a> {
    eye: EyeSamples<'a>,
    timestamps: &'a [f64],
    /// Full-trial angular velocities; present only with viewing geometry.
    velocities: Option<Vec<f64>>,
    geometry: Option<(f64, ScreenGeometry)>,
}

impl EventContext<'_> {
    fn timing(&self, trial: &TrialSamples, start: usize, end: usize) -> (f64, f64, f64) {
        let start_time = self.timestamps[start];
        let end_time = self.timestamps[end];
        (start_time, end_time, trial.unit().to_ms(end_time - start_time))
    }
}

/// Convert per-sample masks into typed event records.
///
/// Parameters
/// ----------
/// - `masks`: `&EventMasks`
///   The engine's output for `trial`.
/// - `trial`: `&TrialSamples`
///   The trial the masks were detected on.
/// - `config`: `&EventConfig`
///   Viewing geometry and the per-event sample floor.
///
/// Returns
/// -------
/// `DetectResult<GazeEvents>`
///   One record per surviving run, each list sorted by start time.
///
/// Errors
/// ------
/// - `DetectError::LengthMismatch` when a mask does not match the trial
///   length.
/// - `DetectError::InvalidParameter` / `Signal(..)` when the configured
///   viewing geometry is rejected by the angular-velocity conversion.
pub fn events_from_masks(
    masks: &EventMasks, trial: &TrialSamples, config: &EventConfig,
) -> DetectResult<GazeEvents> {
    let n = trial.len();
    validate_same_length("is_blink", n, masks.is_blink.len())?;
    validate_same_length("is_saccade", n, masks.is_saccade.len())?;
    validate_same_length("is_fixation", n, masks.is_fixation.len())?;

    let eye = trial.left();
    let geometry = match (config.viewer_distance_cm, config.screen) {
        (Some(distance), Some(screen)) => Some((distance, screen)),
        _ => None,
    };
    let velocities = match geometry {
        Some((distance, ref screen)) => Some(angular_velocity(
            eye.x,
            eye.y,
            trial.sampling_rate()?,
            distance,
            screen,
        )?),
        None => None,
    };
    let ctx =
        EventContext { eye, timestamps: trial.timestamps(), velocities, geometry };

    let mut events = GazeEvents::default();
    for &(start, end) in &merge_candidate_runs(&masks.is_blink, 0, config.min_event_samples)
    {
        let (start_time, end_time, duration_ms) = ctx.timing(trial, start, end);
        events.blinks.push(BlinkEvent {
            start_index: start,
            end_index: end,
            start_time,
            end_time,
            duration_ms,
        });
    }
    for &(start, end) in
        &merge_candidate_runs(&masks.is_saccade, 0, config.min_event_samples)
    {
        events.saccades.push(build_saccade(&ctx, trial, start, end));
    }
    for &(start, end) in
        &merge_candidate_runs(&masks.is_fixation, 0, config.min_event_samples)
    {
        events.fixations.push(build_fixation(&ctx, trial, start, end));
    }
    Ok(events)
}

fn build_saccade(
    ctx: &EventContext<'_>, trial: &TrialSamples, start: usize, end: usize,
) -> SaccadeEvent {
    let (start_time, end_time, duration_ms) = ctx.timing(trial, start, end);
    let start_point = (ctx.eye.x[start], ctx.eye.y[start]);
    let end_point = (ctx.eye.x[end], ctx.eye.y[end]);
    let amplitude_deg = ctx
        .geometry
        .map(|(distance, screen)| visual_angle(start_point, end_point, distance, &screen));
    SaccadeEvent {
        start_index: start,
        end_index: end,
        start_time,
        end_time,
        duration_ms,
        start_point,
        end_point,
        azimuth_deg: azimuth_deg(start_point, end_point),
        amplitude_deg,
    }
}

fn build_fixation(
    ctx: &EventContext<'_>, trial: &TrialSamples, start: usize, end: usize,
) -> FixationEvent {
    let (start_time, end_time, duration_ms) = ctx.timing(trial, start, end);
    let x = &ctx.eye.x[start..=end];
    let y = &ctx.eye.y[start..=end];

    let (mean_velocity_deg_s, max_velocity_deg_s) = match &ctx.velocities {
        Some(velocities) => {
            // `velocities[start]` describes the transition into the event
            // from the sample before it; it belongs to the preceding
            // movement and is excluded.
            let finite: Vec<f64> = velocities[start + 1..=end]
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .collect();
            if finite.is_empty() {
                (None, None)
            } else {
                let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (Some(finite.mean()), Some(max))
            }
        }
        None => (None, None),
    };

    let (mean_pupil_size_mm, std_pupil_size_mm) = match ctx.eye.pupil {
        Some(pupil) => {
            let finite: Vec<f64> =
                pupil[start..=end].iter().copied().filter(|v| v.is_finite()).collect();
            let mean = if finite.is_empty() { None } else { Some((&finite).mean()) };
            let std =
                if finite.len() < 2 { None } else { Some((&finite).std_dev()) };
            (mean, std)
        }
        None => (None, None),
    };

    FixationEvent {
        start_index: start,
        end_index: end,
        start_time,
        end_time,
        duration_ms,
        center_of_mass: (finite_mean(x), finite_mean(y)),
        dispersion_px: max_pairwise_distance(x, y),
        mean_velocity_deg_s,
        max_velocity_deg_s,
        mean_pupil_size_mm,
        std_pupil_size_mm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::config::EngineConfig;
    use crate::detection::engine::detect_events;
    use crate::detection::errors::DetectError;
    use crate::detection::samples::{EyeBuffers, TimeUnit};
    use ndarray::Array1;

    fn timestamps_100hz(n: usize) -> Array1<f64> {
        Array1::from_iter((0..n).map(|i| i as f64 * 10.0))
    }

    fn trial(x: Vec<f64>, y: Vec<f64>, pupil: Option<Vec<f64>>) -> TrialSamples {
        let n = x.len();
        TrialSamples::monocular(
            timestamps_100hz(n),
            EyeBuffers::new(
                Array1::from_vec(x),
                Array1::from_vec(y),
                pupil.map(Array1::from_vec),
            ),
            TimeUnit::Milliseconds,
        )
        .unwrap()
    }

    fn empty_masks(n: usize) -> EventMasks {
        EventMasks {
            is_blink: vec![false; n],
            is_saccade: vec![false; n],
            is_fixation: vec![false; n],
        }
    }

    fn unit_screen() -> ScreenGeometry {
        ScreenGeometry::new(10.0, 10.0, (10, 10)).unwrap()
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The detect-then-build path over the synthetic blink trial.
    // - Saccade geometry: endpoints, azimuth quadrant, and amplitude with
    //   and without viewing geometry.
    // - Fixation statistics: NaN-ignoring centre of mass, dispersion, and
    //   pupil summaries.
    // - The per-event sample floor and mask-length validation.
    //
    // They intentionally DO NOT cover:
    // - Mask production; detection::engine tests that.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the full detect-then-build path: one blink with exact timing
    // and the two backfilled fixations around it.
    //
    // Given
    // -----
    // - 100 samples at 100 Hz, steady gaze at (100, 100), NaN at 30..=49;
    //   default engine and event configs.
    //
    // Expect
    // ------
    // - Exactly one blink spanning samples [30, 49], 190 ms; two
    //   fixations ([0, 29] and [50, 99]) sorted by start time; no
    //   saccades.
    fn events_from_masks_builds_blink_and_surrounding_fixations() {
        // Arrange
        let n = 100;
        let mut x = vec![100.0; n];
        for value in x.iter_mut().take(50).skip(30) {
            *value = f64::NAN;
        }
        let trial = trial(x, vec![100.0; n], None);
        let masks = detect_events(&trial, &EngineConfig::default()).unwrap();

        // Act
        let events = events_from_masks(&masks, &trial, &EventConfig::default()).unwrap();

        // Assert
        assert_eq!(events.blinks.len(), 1);
        let blink = &events.blinks[0];
        assert_eq!((blink.start_index, blink.end_index), (30, 49));
        assert_eq!(blink.start_time, 300.0);
        assert_eq!(blink.end_time, 490.0);
        assert!((blink.duration_ms - 190.0).abs() < 1e-9);

        assert!(events.saccades.is_empty());
        assert_eq!(events.fixations.len(), 2);
        assert_eq!(
            (events.fixations[0].start_index, events.fixations[0].end_index),
            (0, 29)
        );
        assert_eq!(
            (events.fixations[1].start_index, events.fixations[1].end_index),
            (50, 99)
        );
        assert!(events.fixations[0].start_time < events.fixations[1].start_time);
    }

    #[test]
    // Purpose
    // -------
    // Verify saccade geometry: endpoints, the y-flipped azimuth, and the
    // amplitude's dependence on viewing geometry.
    //
    // Given
    // -----
    // - A saccade run over samples 2..=5 moving from (2, 5) to (5, 2)
    //   (up-right on screen); events built without geometry, then with the
    //   10 cm / 10 px screen at 1 cm.
    //
    // Expect
    // ------
    // - Endpoints as recorded; azimuth 45°; amplitude `None` without
    //   geometry and positive with it.
    fn saccade_events_derive_azimuth_and_amplitude() {
        // Arrange
        let x = vec![2.0, 2.0, 2.0, 3.0, 4.0, 5.0, 5.0, 5.0];
        let y = vec![5.0, 5.0, 5.0, 4.0, 3.0, 2.0, 2.0, 2.0];
        let trial = trial(x, y, None);
        let mut masks = empty_masks(8);
        for i in 2..=5 {
            masks.is_saccade[i] = true;
        }
        let with_geometry = EventConfig {
            viewer_distance_cm: Some(1.0),
            screen: Some(unit_screen()),
            ..EventConfig::default()
        };

        // Act
        let bare = events_from_masks(&masks, &trial, &EventConfig::default()).unwrap();
        let angular = events_from_masks(&masks, &trial, &with_geometry).unwrap();

        // Assert
        assert_eq!(bare.saccades.len(), 1);
        let saccade = &bare.saccades[0];
        assert_eq!(saccade.start_point, (2.0, 5.0));
        assert_eq!(saccade.end_point, (5.0, 2.0));
        assert!((saccade.azimuth_deg - 45.0).abs() < 1e-9, "got {}", saccade.azimuth_deg);
        assert_eq!(saccade.amplitude_deg, None);
        let amplitude = angular.saccades[0].amplitude_deg.expect("geometry present");
        assert!(amplitude > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify fixation statistics: NaN-ignoring centre of mass, maximum
    // pairwise dispersion, and pupil mean/standard deviation.
    //
    // Given
    // -----
    // - One fixation run over samples 0..=3 with x = [1, 3, NaN, 2],
    //   y = [0, 4, 0, 0], pupil = [2, 4, NaN, 3].
    //
    // Expect
    // ------
    // - Centre of mass (2, 1); dispersion = distance (1,0)–(3,4) = √20;
    //   pupil mean 3 and standard deviation 1; velocities `None` without
    //   geometry.
    fn fixation_events_derive_position_and_pupil_statistics() {
        // Arrange
        let x = vec![1.0, 3.0, f64::NAN, 2.0];
        let y = vec![0.0, 4.0, 0.0, 0.0];
        let pupil = vec![2.0, 4.0, f64::NAN, 3.0];
        let trial = trial(x, y, Some(pupil));
        let mut masks = empty_masks(4);
        for i in 0..=3 {
            masks.is_fixation[i] = true;
        }

        // Act
        let events = events_from_masks(&masks, &trial, &EventConfig::default()).unwrap();

        // Assert
        assert_eq!(events.fixations.len(), 1);
        let fixation = &events.fixations[0];
        assert!((fixation.center_of_mass.0 - 2.0).abs() < 1e-9);
        assert!((fixation.center_of_mass.1 - 1.0).abs() < 1e-9);
        assert!((fixation.dispersion_px - 20.0_f64.sqrt()).abs() < 1e-9);
        assert!((fixation.mean_pupil_size_mm.unwrap() - 3.0).abs() < 1e-9);
        assert!((fixation.std_pupil_size_mm.unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(fixation.mean_velocity_deg_s, None);
        assert_eq!(fixation.max_velocity_deg_s, None);
    }

    #[test]
    // Purpose
    // -------
    // Verify that fixation velocity statistics exclude the transition into
    // the event's first sample, which belongs to the preceding movement.
    //
    // Given
    // -----
    // - Gaze jumping from (0, 0) to (5, 0) at sample 1, then perfectly
    //   still; a fixation run over samples 1..=5, built with the
    //   10 cm / 10 px screen at 1 cm.
    //
    // Expect
    // ------
    // - Mean and maximum velocity are exactly 0 °/s: the fast inbound
    //   transition at the run's first sample is not counted.
    fn fixation_velocity_statistics_skip_inbound_transition() {
        // Arrange
        let x = vec![0.0, 5.0, 5.0, 5.0, 5.0, 5.0];
        let y = vec![0.0; 6];
        let trial = trial(x, y, None);
        let mut masks = empty_masks(6);
        for i in 1..=5 {
            masks.is_fixation[i] = true;
        }
        let config = EventConfig {
            viewer_distance_cm: Some(1.0),
            screen: Some(unit_screen()),
            ..EventConfig::default()
        };

        // Act
        let events = events_from_masks(&masks, &trial, &config).unwrap();

        // Assert
        assert_eq!(events.fixations.len(), 1);
        let fixation = &events.fixations[0];
        assert_eq!(fixation.mean_velocity_deg_s, Some(0.0));
        assert_eq!(fixation.max_velocity_deg_s, Some(0.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify the per-event sample floor and mask-length validation.
    //
    // Given
    // -----
    // - A single-sample blink run under the default 2-sample floor, and a
    //   blink mask one entry short.
    //
    // Expect
    // ------
    // - The one-sample run produces no event; the short mask errors with
    //   `LengthMismatch`.
    fn events_from_masks_enforces_floor_and_lengths() {
        // Arrange
        let trial = trial(vec![1.0; 6], vec![1.0; 6], None);
        let mut single = empty_masks(6);
        single.is_blink[3] = true;
        let mut short = empty_masks(6);
        short.is_blink.pop();

        // Act
        let no_events = events_from_masks(&single, &trial, &EventConfig::default()).unwrap();
        let error = events_from_masks(&short, &trial, &EventConfig::default());

        // Assert
        assert!(no_events.is_empty());
        assert!(matches!(
            error,
            Err(DetectError::LengthMismatch { name: "is_blink", .. })
        ));
    }
}
