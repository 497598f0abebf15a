//! `sr-sim` — the `World` composition root.
//!
//! # Crate layout
//!
//! | Module    | Contents                                |
//! |-----------|-----------------------------------------|
//! | [`world`] | `World` — owns all simulation state     |
//! | [`error`] | `SimError`, `SimResult<T>`              |
//!
//! # Control flow
//!
//! The world is frame-driven and single-threaded: an external host loop
//! calls `tick()` for the wall-clock delta, then `step(dt)`, once per
//! animation frame.  Within one `step`, all agents update before any
//! visibility is evaluated, and the 1-second aggregation flush runs after
//! the per-tick visibility updates.  Pausing simply makes `step` a no-op;
//! there is no mid-tick cancellation.

pub mod error;
pub mod world;


pub use error::{SimError, SimResult};
pub use world::World;
