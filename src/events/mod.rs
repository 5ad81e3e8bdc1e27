//! events — typed event records built from detection masks.
//!
//! Purpose
//! -------
//! Turn the engine's per-sample masks into per-event records with derived
//! statistics, plus the duration-based outlier bounds used to screen
//! implausible events.
//!
//! Key behaviors
//! -------------
//! - [`records`] defines [`BlinkEvent`], [`SaccadeEvent`],
//!   [`FixationEvent`], the [`GazeEvents`] aggregate, and
//!   [`OutlierBounds`].
//! - [`builder`] converts masks to records via
//!   [`events_from_masks`], reusing the detection layer's segmentation.
//!
//! Downstream usage
//! ----------------
//! - Run `detection::engine::detect_events`, then
//!   [`events_from_masks`] on the same trial.

pub mod builder;
pub mod records;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::builder::{DEFAULT_MIN_EVENT_SAMPLES, EventConfig, events_from_masks};
pub use self::records::{
    BlinkEvent, FixationEvent, GazeEvents, OutlierBounds, SaccadeEvent,
};
