//! The region description consumed from the data-loading collaborator.
//!
//! Acquisition and parsing of geographic source data is out of scope: an
//! external loader (live query or cached offline snapshot — the core cannot
//! tell which) hands the simulator a fully-resolved `RegionData`.  Every
//! field uses the source's own node identifiers; graph construction
//! re-indexes into dense `NodeId`s.

use std::collections::HashMap;

use sr_core::GeoPoint;

/// Tag carried by every way.  Only road-tagged ways participate in graph
/// construction; the enum leaves room for source data that includes others.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum WayKind {
    #[default]
    Road,
}

/// One tagged, ordered run of geographic points: a road or footpath segment
/// chain in the source data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionWay {
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: WayKind,

    /// Traversable by vehicles.
    pub car: bool,

    /// Traversable on foot.
    pub foot: bool,

    /// For car travel, only the stored direction is allowed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub oneway: bool,

    /// Ordered source node ids along the way.
    pub nodes: Vec<i64>,
}

/// A fully-resolved region description.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionData {
    /// Source node id → coordinate.
    pub nodes: HashMap<i64, GeoPoint>,

    /// All ways in the region.
    pub ways: Vec<RegionWay>,

    /// Building footprint polygons.  Carried for rendering collaborators;
    /// the simulation core does not consume them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub buildings: Vec<Vec<GeoPoint>>,

    /// Source node ids of traffic signals.
    #[cfg_attr(feature = "serde", serde(default, rename = "signals"))]
    pub signal_nodes: Vec<i64>,
}

impl RegionData {
    /// Resolve signal node ids to coordinates, skipping ids with no
    /// matching node in the description.
    pub fn signal_points(&self) -> Vec<GeoPoint> {
        self.signal_nodes
            .iter()
            .filter_map(|id| self.nodes.get(id).copied())
            .collect()
    }

    /// Resolve a way's node ids to coordinates, skipping unresolvable ids.
    pub fn way_points(&self, way: &RegionWay) -> Vec<GeoPoint> {
        way.nodes
            .iter()
            .filter_map(|id| self.nodes.get(id).copied())
            .collect()
    }
}
