//! Agent state and the per-tick kinematic update.
//!
//! # State machine
//!
//! ```text
//! {no path} ── replan ──▶ {following}
//! {following} ── waypoint reached ──▶ advance index
//!             ── path end reached ──▶ replan
//! ```
//!
//! A replanned route starts at the graph node nearest the agent's current
//! position and ends at a uniformly random node of the same graph.  Routes
//! into disconnected components degenerate to a single waypoint, which the
//! update loop treats as "arrived, plan again" on the next tick.
//!
//! # Drift correction
//!
//! After every movement step the position is re-projected onto the segment
//! between the last-passed and next waypoints.  The position therefore
//! always lies on the path (within floating tolerance) no matter how many
//! ticks of flat-earth stepping have accumulated.

use sr_core::{AgentId, AgentRng, GeoPoint};
use sr_env::Penalties;
use sr_spatial::{Router, StreetGraph};

use crate::AgentKind;

/// Vehicles treat a signal as governing a waypoint within this radius.
const SIGNAL_SNAP_RADIUS_M: f64 = 6.0;

/// Signal slowdown bands: distance from the vehicle to the governed
/// waypoint, factor applied to desired speed.
const SIGNAL_NEAR_M: f64 = 10.0;
const SIGNAL_FAR_M: f64 = 30.0;
const SIGNAL_NEAR_FACTOR: f64 = 0.5;
const SIGNAL_FAR_FACTOR: f64 = 0.8;

/// Vehicles never drop below this speed (m/s), so queues keep creeping.
const VEHICLE_SPEED_FLOOR_MPS: f64 = 2.0;

/// One simulated pedestrian or vehicle.
///
/// Owned exclusively by the world; destroyed and recreated wholesale on
/// every respawn.
pub struct Agent {
    id: AgentId,
    label: String,
    kind: AgentKind,
    pos: GeoPoint,
    heading_deg: f64,
    base_speed_mps: f64,
    path: Vec<GeoPoint>,
    /// Index of the last-passed waypoint in `path`.
    waypoint: usize,
}

impl Agent {
    /// Create an agent at `pos` with no path.  `ordinal` is the 1-based
    /// per-kind spawn counter used for the display label ("P-001", "C-042").
    pub fn new(id: AgentId, kind: AgentKind, ordinal: usize, pos: GeoPoint, iq: f64) -> Agent {
        Agent {
            id,
            label: format!("{}-{:03}", kind.label_prefix(), ordinal),
            kind,
            pos,
            heading_deg: 0.0,
            base_speed_mps: kind.base_speed_mps(iq),
            path: Vec::new(),
            waypoint: 0,
        }
    }

    // ── Identity & capability accessors ───────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Stable display id for the lifetime of this population.
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    #[inline]
    pub fn pos(&self) -> GeoPoint {
        self.pos
    }

    /// Facing direction, if this agent models one.  Consumed by the sighting
    /// test's field-of-view check; an agent without a heading always passes.
    #[inline]
    pub fn heading_deg(&self) -> Option<f64> {
        Some(self.heading_deg)
    }

    /// Base speed rating in m/s, if this agent models one.  Faster agents
    /// are less likely to register a sighting in any single tick.
    #[inline]
    pub fn speed_mps(&self) -> Option<f64> {
        Some(self.base_speed_mps)
    }

    /// The waypoint path currently being followed (may be empty).
    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    /// The path segment the agent currently occupies: last-passed waypoint
    /// to next waypoint.  `None` while no usable path is assigned.
    pub fn current_segment(&self) -> Option<(GeoPoint, GeoPoint)> {
        if self.path.len() < 2 {
            return None;
        }
        let from = self.path[self.waypoint.min(self.path.len() - 1)];
        let to = self.path[(self.waypoint + 1).min(self.path.len() - 1)];
        Some((from, to))
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Assign a fresh route: nearest graph node to the current position →
    /// uniformly random goal node.  On an empty graph the path is cleared
    /// and the agent stays put.
    pub fn replan<R: Router>(&mut self, graph: &StreetGraph, router: &R, rng: &mut AgentRng) {
        self.path.clear();
        self.waypoint = 0;

        let (Some(start), Some(goal)) =
            (graph.nearest_node(self.pos), graph.random_node(rng.inner()))
        else {
            return;
        };
        self.path = router.route(graph, start, goal);
    }

    // ── Per-tick update ───────────────────────────────────────────────────

    /// Advance the agent by `dt` simulated seconds.
    ///
    /// `dt` must already carry the global simulation-speed multiplier.
    /// Ordering per tick: waypoint bookkeeping, then the kinematic step,
    /// then re-projection onto the current segment.
    pub fn update<R: Router>(
        &mut self,
        dt: f64,
        pen: &Penalties,
        graph: &StreetGraph,
        router: &R,
        signals: &[GeoPoint],
        rng: &mut AgentRng,
    ) {
        // A missing or degenerate path (e.g. an unreachable goal collapsed
        // to one waypoint) means: plan now, move next tick.
        if self.path.len() <= 1 {
            self.replan(graph, router, rng);
            return;
        }

        let target = self.path[(self.waypoint + 1).min(self.path.len() - 1)];
        let dist = self.pos.distance_m(target);

        if dist < self.kind.reach_threshold_m() {
            self.waypoint += 1;
            if self.waypoint >= self.path.len() - 1 {
                self.replan(graph, router, rng);
            }
            return;
        }

        self.heading_deg = self.pos.bearing_deg(target);

        let speed = match self.kind {
            AgentKind::Pedestrian => self.base_speed_mps * pen.speed,
            AgentKind::Vehicle => vehicle_speed_mps(
                self.base_speed_mps,
                pen,
                signal_factor(self.pos, target, signals),
            ),
        };

        let step = dist.min(speed * dt);
        self.pos = self.pos.offset_m(step, self.heading_deg);

        // Re-projection: the position invariant (§ drift correction above).
        let from = self.path[self.waypoint];
        let to = self.path[(self.waypoint + 1).min(self.path.len() - 1)];
        self.pos = self.pos.project_to_segment(from, to);
    }
}

/// Effective vehicle speed: penalties and signal factor applied, then a 10 %
/// caution margin, floored so congested vehicles keep creeping instead of
/// stopping dead.
#[inline]
pub(crate) fn vehicle_speed_mps(base: f64, pen: &Penalties, signal_factor: f64) -> f64 {
    (base * pen.speed * signal_factor * 0.9).max(VEHICLE_SPEED_FLOOR_MPS)
}

/// Proximity slowdown for a vehicle approaching `target`.
///
/// Applies only when a traffic signal governs the target waypoint (lies
/// within [`SIGNAL_SNAP_RADIUS_M`] of it); the factor is banded by the
/// vehicle's distance to that waypoint.
pub(crate) fn signal_factor(pos: GeoPoint, target: GeoPoint, signals: &[GeoPoint]) -> f64 {
    let governed = signals
        .iter()
        .any(|s| s.distance_m(target) < SIGNAL_SNAP_RADIUS_M);
    if !governed {
        return 1.0;
    }
    let d = pos.distance_m(target);
    if d < SIGNAL_NEAR_M {
        SIGNAL_NEAR_FACTOR
    } else if d < SIGNAL_FAR_M {
        SIGNAL_FAR_FACTOR
    } else {
        1.0
    }
}
