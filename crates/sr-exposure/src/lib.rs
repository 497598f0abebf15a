//! `sr-exposure` — the billboard visibility model.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`billboard`] | `Billboard` — placement plus viewer accumulators      |
//! | [`engine`]    | `ExposureEngine` — per-tick evaluation, window flush  |
//!
//! # Three-tier unique-viewer accounting
//!
//! Each billboard tracks who saw it at three nesting horizons:
//!
//! | Set           | Cleared                                   |
//! |---------------|-------------------------------------------|
//! | `seen_tick`   | every tick, after the view-rate update    |
//! | `seen_window` | every accumulated 1.0 s of simulated time |
//! | `seen_ever`   | only on population respawn                |
//!
//! The clearing cadence is the semantic core of "unique viewers" — it is
//! what distinguishes a viewer-per-second series from raw sighting counts —
//! so the engine owns it rather than leaving it to callers.

pub mod billboard;
pub mod engine;

#[cfg(test)]
mod tests;

pub use billboard::{Billboard, HISTORY_CAPACITY};
pub use engine::ExposureEngine;
