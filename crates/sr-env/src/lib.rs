//! `sr-env` — environmental state and the penalty model derived from it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`params`]  | `Weather`, `SimParams` (UI-mutable configuration) |
//! | [`penalty`] | `Penalties`, derivation from weather/time-of-day  |
//!
//! The penalty set is recomputed fresh every tick from the current
//! parameters (it is cheap) and passed by reference into agent updates and
//! the sighting model — never read from ambient global state.

pub mod params;
pub mod penalty;


pub use params::{SimParams, Weather, WeatherParseError};
pub use penalty::Penalties;
