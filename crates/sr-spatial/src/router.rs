//! Routing trait and the default A* implementation.
//!
//! # Pluggability
//!
//! Agents route through the [`Router`] trait, so applications can swap in a
//! different algorithm (bidirectional search, contraction hierarchies)
//! without touching agent code.  The default [`AStarRouter`] is sufficient
//! at city scale.
//!
//! # Cost units
//!
//! Geodesic edge lengths are f64 metres, but the open set orders on integer
//! **millimetres** (u64).  Integer costs make heap ordering exact and the
//! `(cost, NodeId)` tuple gives a deterministic tie-break for a fixed node
//! ordering; rounding error is below any physical significance.
//!
//! # Unreachable goals
//!
//! A goal in a disconnected component is not an error: the route degenerates
//! to `[start]`.  Callers treat any path of length ≤ 1 as "arrived, needs a
//! new plan".

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use sr_core::{GeoPoint, NodeId};

use crate::graph::StreetGraph;

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine over a [`StreetGraph`].
pub trait Router {
    /// Shortest path from `start` (inclusive) to `goal` (inclusive) as an
    /// ordered waypoint sequence.
    ///
    /// Never fails: an unreachable `goal` yields the single-element path
    /// `[start]`, and an empty graph yields an empty path.
    fn route(&self, graph: &StreetGraph, start: NodeId, goal: NodeId) -> Vec<GeoPoint>;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// A* over the directed adjacency lists, heuristic = geodesic distance to
/// the goal node (admissible: every edge is at least as long as the
/// straight-line distance it spans).
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(&self, graph: &StreetGraph, start: NodeId, goal: NodeId) -> Vec<GeoPoint> {
        astar(graph, start, goal)
    }
}

/// Quantize metres to the integer millimetre cost domain.
#[inline]
fn cost_mm(meters: f64) -> u64 {
    (meters * 1000.0).round() as u64
}

fn astar(graph: &StreetGraph, start: NodeId, goal: NodeId) -> Vec<GeoPoint> {
    let n = graph.node_count();
    if n == 0 || start.index() >= n || goal.index() >= n {
        return Vec::new();
    }

    let goal_pos = graph.node_pos(goal);
    let h = |id: NodeId| cost_mm(graph.node_pos(id).distance_m(goal_pos));

    // g_score[v] = best known cost (mm) from start to v.
    let mut g_score = vec![u64::MAX; n];
    // prev[v] = predecessor on the best known path; INVALID while unreached.
    let mut prev = vec![NodeId::INVALID; n];

    g_score[start.index()] = 0;

    // Min-heap on (f, g, node).  Reverse flips BinaryHeap's max ordering;
    // the trailing NodeId makes equal-cost pops deterministic.
    let mut open: BinaryHeap<Reverse<(u64, u64, NodeId)>> = BinaryHeap::new();
    open.push(Reverse((h(start), 0, start)));

    while let Some(Reverse((_f, g, node))) = open.pop() {
        if node == goal {
            break;
        }
        // Skip stale heap entries.
        if g > g_score[node.index()] {
            continue;
        }

        for &nb in graph.neighbors(node) {
            let step = cost_mm(graph.node_pos(node).distance_m(graph.node_pos(nb)));
            let tentative = g.saturating_add(step);
            if tentative < g_score[nb.index()] {
                g_score[nb.index()] = tentative;
                prev[nb.index()] = node;
                open.push(Reverse((tentative.saturating_add(h(nb)), tentative, nb)));
            }
        }
    }

    reconstruct(graph, &prev, start, goal)
}

/// Walk the predecessor chain from `goal` back to `start`.
///
/// Falls back to `[start]` when `goal` was never reached.
fn reconstruct(
    graph: &StreetGraph,
    prev: &[NodeId],
    start: NodeId,
    goal: NodeId,
) -> Vec<GeoPoint> {
    if goal != start && prev[goal.index()] == NodeId::INVALID {
        return vec![graph.node_pos(start)];
    }

    let mut indices = Vec::new();
    let mut cur = goal;
    loop {
        indices.push(cur);
        if cur == start {
            break;
        }
        cur = prev[cur.index()];
    }
    indices.reverse();
    indices.into_iter().map(|id| graph.node_pos(id)).collect()
}
