//! Street graph representation and construction.
//!
//! # Two graphs per region
//!
//! A region yields one graph per [`TravelMode`]: the road graph (vehicle
//! travel, one-way aware) and the foot graph (always bidirectional).  Both
//! are built once when a region loads and are immutable afterwards.
//!
//! # Node deduplication
//!
//! Ways in the source data repeat coordinates where they meet.  Endpoints
//! are merged into shared graph nodes through a fixed-precision coordinate
//! key — lat/lng rounded to 6 decimal degrees (~0.11 m), stored as an
//! integer microdegree pair in an `FxHashMap`.  Ways sharing an endpoint
//! coordinate therefore share a node, which is what makes routing across
//! way boundaries possible.
//!
//! # Weighted sampling
//!
//! A prefix-sum table of geodesic edge lengths (`cum_length`, one entry per
//! edge plus the leading zero) supports O(log E) length-weighted sampling,
//! used to spread spawned agents evenly by distance rather than edge count.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) answers nearest-node queries, used when an agent
//! plans a route from its current off-node position.

use rand::Rng;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::{FxHashMap, FxHashSet};

use sr_core::{EdgeId, GeoPoint, NodeId};

use crate::region::{RegionData, WayKind};

// ── TravelMode ────────────────────────────────────────────────────────────────

/// Which capability of a way qualifies it for a graph.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelMode {
    /// Vehicle travel: car-capable ways, one-way restrictions respected.
    Car,
    /// Foot travel: foot-capable ways, always traversable both directions.
    Foot,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Car  => "car",
            TravelMode::Foot => "foot",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a `[lat, lng]` point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lng space.  Sufficient for
    /// nearest-node queries within a city (error < 0.1 % at ≤ 60° lat).
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlng = self.point[1] - point[1];
        dlat * dlat + dlng * dlng
    }
}

// ── StreetGraph ───────────────────────────────────────────────────────────────

/// An immutable street graph for one travel mode.
///
/// Node index is identity: `nodes[id.index()]` is the node's coordinate.
/// `adjacency` holds directed neighbor lists; `edges` is the canonical
/// undirected edge list (smaller index first, deduplicated) that `cum_length`
/// is indexed against.
pub struct StreetGraph {
    nodes: Vec<GeoPoint>,
    adjacency: Vec<Vec<NodeId>>,
    edges: Vec<(NodeId, NodeId)>,
    cum_length: Vec<f64>,
    spatial_idx: RTree<NodeEntry>,
}

impl StreetGraph {
    /// Build the graph for `mode` from a region description.
    ///
    /// Way segments with fewer than 2 resolvable coordinates contribute
    /// nothing.  A region with no qualifying ways yields an empty graph —
    /// valid, but no agents can be placed for that mode.
    pub fn build(region: &RegionData, mode: TravelMode) -> StreetGraph {
        let mut builder = GraphBuilder::default();

        for way in &region.ways {
            if way.kind != WayKind::Road {
                continue;
            }
            let qualifies = match mode {
                TravelMode::Car  => way.car,
                TravelMode::Foot => way.foot,
            };
            if !qualifies {
                continue;
            }

            let points = region.way_points(way);
            for pair in points.windows(2) {
                let a = builder.intern(pair[0]);
                let b = builder.intern(pair[1]);
                match mode {
                    TravelMode::Car => {
                        builder.connect(a, b);
                        if !way.oneway {
                            builder.connect(b, a);
                        }
                    }
                    TravelMode::Foot => {
                        builder.connect(a, b);
                        builder.connect(b, a);
                    }
                }
            }
        }

        builder.finish()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Coordinate of a node.
    #[inline]
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    /// Directed neighbors of `id`.
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id.index()]
    }

    /// Canonical undirected edge list (smaller index first), indexed by
    /// [`EdgeId`].
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Endpoints of one edge of the canonical list.
    #[inline]
    pub fn edge_endpoints(&self, id: EdgeId) -> (NodeId, NodeId) {
        self.edges[id.index()]
    }

    /// Prefix sums of geodesic edge lengths in metres.
    /// `cum_length()[0] == 0.0`; the last entry is the total graph length.
    pub fn cum_length(&self) -> &[f64] {
        &self.cum_length
    }

    /// Total geodesic length of all edges, in metres.
    pub fn total_length_m(&self) -> f64 {
        *self.cum_length.last().unwrap_or(&0.0)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest graph node to `pos`.  `None` only when the graph has no nodes.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lng])
            .map(|e| e.id)
    }

    /// Uniformly random node.  `None` when the graph has no nodes.
    pub fn random_node<R: Rng>(&self, rng: &mut R) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(NodeId(rng.gen_range(0..self.nodes.len() as u32)))
    }

    /// Length-weighted stratified sample of a point on the graph.
    ///
    /// Strata spread ranks deterministically across the requested count: the
    /// target length is `total × (rank + u) / max(1, total_count)` with `u`
    /// uniform, so short edges no longer attract a disproportionate share of
    /// placements.  The point itself is uniform along the chosen edge.
    ///
    /// Returns `None` when the graph has no edges.
    pub fn sample_stratified<R: Rng>(
        &self,
        rank: usize,
        total_count: usize,
        rng: &mut R,
    ) -> Option<GeoPoint> {
        if self.edges.is_empty() {
            return None;
        }

        let total_len = self.total_length_m();
        let u: f64 = rng.r#gen();
        let target = total_len * ((rank as f64 + u) / total_count.max(1) as f64);

        // First prefix-sum entry >= target; entry 0 is the leading zero.
        let lo = self.cum_length.partition_point(|&c| c < target);
        let edge = EdgeId((lo.max(1) - 1).min(self.edges.len() - 1) as u32);

        let (a, b) = self.edge_endpoints(edge);
        let t: f64 = rng.r#gen();
        Some(self.node_pos(a).lerp(self.node_pos(b), t))
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Accumulates interned nodes and directed adjacency, then derives the
/// canonical edge list, prefix-sum table, and R-tree in `finish()`.
#[derive(Default)]
struct GraphBuilder {
    keys: FxHashMap<(i64, i64), NodeId>,
    nodes: Vec<GeoPoint>,
    adjacency: Vec<Vec<NodeId>>,
}

/// Microdegree resolution of the dedup key: 6 decimal degrees ≈ 0.11 m.
const KEY_SCALE: f64 = 1e6;

impl GraphBuilder {
    /// Return the node index for `pos`, creating it on first sight.
    fn intern(&mut self, pos: GeoPoint) -> NodeId {
        let key = (
            (pos.lat * KEY_SCALE).round() as i64,
            (pos.lng * KEY_SCALE).round() as i64,
        );
        if let Some(&id) = self.keys.get(&key) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.adjacency.push(Vec::new());
        self.keys.insert(key, id);
        id
    }

    /// Add the directed edge `from → to`.
    fn connect(&mut self, from: NodeId, to: NodeId) {
        self.adjacency[from.index()].push(to);
    }

    fn finish(self) -> StreetGraph {
        // Canonical undirected edge list: one entry per unordered pair,
        // smaller index first, in ascending order for determinism.
        let mut seen: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();
        let mut edges: Vec<(NodeId, NodeId)> = Vec::new();
        for (a, neighbors) in self.adjacency.iter().enumerate() {
            let a = NodeId(a as u32);
            for &b in neighbors {
                if a == b {
                    continue; // zero-length segment collapsed by dedup
                }
                let pair = if a < b { (a, b) } else { (b, a) };
                if seen.insert(pair) {
                    edges.push(pair);
                }
            }
        }
        edges.sort_unstable();

        let mut cum_length = Vec::with_capacity(edges.len() + 1);
        let mut total = 0.0;
        cum_length.push(total);
        for &(a, b) in &edges {
            total += self.nodes[a.index()].distance_m(self.nodes[b.index()]);
            cum_length.push(total);
        }

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lng],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        StreetGraph {
            nodes: self.nodes,
            adjacency: self.adjacency,
            edges,
            cum_length,
            spatial_idx,
        }
    }
}
