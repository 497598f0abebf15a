//! `sr-core` — foundational types for the `streetreach` exposure simulator.
//!
//! This crate is a dependency of every other `sr-*` crate.  It intentionally
//! has no `sr-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                                |
//! |----------|---------------------------------------------------------|
//! | [`ids`]  | `AgentId`, `NodeId`, `EdgeId`, `BillboardId`            |
//! | [`geo`]  | `GeoPoint`, haversine distance, bearing, projection     |
//! | [`rng`]  | `AgentRng` (per-agent), `SimRng` (global)               |
//! | [`time`] | `StepClock` (wall-clock frame deltas)                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{AgentId, BillboardId, EdgeId, NodeId};
pub use rng::{AgentRng, SimRng};
pub use time::StepClock;
