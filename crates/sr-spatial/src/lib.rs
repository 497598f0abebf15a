//! `sr-spatial` — street graphs, spatial queries, and routing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`region`]   | `RegionData` — the loader-facing region description      |
//! | [`graph`]    | `StreetGraph` (per travel mode), stratified sampling     |
//! | [`router`]   | `Router` trait, `AStarRouter`                            |
//! | [`snapshot`] | JSON snapshot loading (feature = `"json"` only)          |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `json`  | Enables `snapshot::load_from_reader` via `serde_json`.     |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.         |

pub mod error;
pub mod graph;
pub mod region;
pub mod router;

#[cfg(feature = "json")]
pub mod snapshot;


pub use error::{SpatialError, SpatialResult};
pub use graph::{StreetGraph, TravelMode};
pub use region::{RegionData, RegionWay, WayKind};
pub use router::{AStarRouter, Router};
