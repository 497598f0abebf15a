//! Billboard placement and viewer accumulators.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use sr_core::{AgentId, BillboardId, GeoPoint};

/// Bounded length of the per-second unique-viewer history.
pub const HISTORY_CAPACITY: usize = 60;

/// Decay constant of the tick-level view-rate estimate: each tick keeps 85 %
/// of the previous estimate and blends in 15 % of the fresh count.
const VIEW_RATE_DECAY: f64 = 0.85;

/// A user-placed billboard with its exposure statistics.
///
/// Created by explicit placement; there is no individual removal, only a
/// bulk clear at the world level.
pub struct Billboard {
    id: BillboardId,
    label: String,
    pos: GeoPoint,
    radius_m: f64,
    fov_deg: f64,

    /// Agents sighted this tick.  Cleared by [`end_tick`](Self::end_tick).
    seen_tick: FxHashSet<AgentId>,
    /// Agents sighted in the current 1-second window.  Cleared by
    /// [`flush_window`](Self::flush_window).
    seen_window: FxHashSet<AgentId>,
    /// Agents sighted at any point in this population's lifetime.  Cleared
    /// only by [`reset`](Self::reset).
    seen_ever: FxHashSet<AgentId>,

    /// Unique viewers per completed second, newest last, oldest evicted
    /// beyond [`HISTORY_CAPACITY`].
    history: VecDeque<usize>,
    /// Exponentially decayed sightings-per-tick estimate.
    view_rate: f64,
    /// `seen_ever` size as of the last window flush.
    reported_unique: usize,
}

impl Billboard {
    /// Place a billboard.  Radius and field of view are accepted as given;
    /// validation belongs to the UI boundary.
    pub fn new(id: BillboardId, pos: GeoPoint, radius_m: f64, fov_deg: f64) -> Billboard {
        Billboard {
            id,
            label: format!("BB-{:02}", id.0 + 1),
            pos,
            radius_m,
            fov_deg,
            seen_tick: FxHashSet::default(),
            seen_window: FxHashSet::default(),
            seen_ever: FxHashSet::default(),
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
            view_rate: 0.0,
            reported_unique: 0,
        }
    }

    // ── Placement accessors ───────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> BillboardId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn pos(&self) -> GeoPoint {
        self.pos
    }

    #[inline]
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    #[inline]
    pub fn fov_deg(&self) -> f64 {
        self.fov_deg
    }

    // ── Accumulation (called by the engine) ───────────────────────────────

    /// Record a sighting of `agent` in all three tiers.
    pub(crate) fn record(&mut self, agent: AgentId) {
        self.seen_tick.insert(agent);
        self.seen_window.insert(agent);
        self.seen_ever.insert(agent);
    }

    /// Close out one tick: fold `count` sightings into the decayed view
    /// rate and clear the tick set.
    pub(crate) fn end_tick(&mut self, count: usize) {
        self.view_rate = self.view_rate * VIEW_RATE_DECAY + count as f64 * (1.0 - VIEW_RATE_DECAY);
        self.seen_tick.clear();
    }

    /// Close out one 1-second window: push the window's unique-viewer count
    /// onto the bounded history, refresh the reported lifetime total, and
    /// clear the window set.
    pub(crate) fn flush_window(&mut self) {
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(self.seen_window.len());
        self.reported_unique = self.seen_ever.len();
        self.seen_window.clear();
    }

    /// Forget all viewer state.  Called when the agent population is
    /// respawned, so ids from a dead population cannot linger in
    /// `seen_ever`.
    pub fn reset(&mut self) {
        self.seen_tick.clear();
        self.seen_window.clear();
        self.seen_ever.clear();
        self.history.clear();
        self.view_rate = 0.0;
        self.reported_unique = 0;
    }

    // ── Read-only reporting ───────────────────────────────────────────────

    /// Exponentially decayed sightings-per-tick estimate.
    #[inline]
    pub fn view_rate(&self) -> f64 {
        self.view_rate
    }

    /// Unique viewers per completed second, oldest first (≤ 60 samples).
    pub fn window_history(&self) -> impl Iterator<Item = usize> + '_ {
        self.history.iter().copied()
    }

    /// Number of completed-second samples currently held.
    pub fn window_history_len(&self) -> usize {
        self.history.len()
    }

    /// Lifetime unique-viewer count as of the last completed window.
    #[inline]
    pub fn reported_unique(&self) -> usize {
        self.reported_unique
    }

    /// Live lifetime unique-viewer count (includes the current window).
    /// Monotonically non-decreasing between resets.
    #[inline]
    pub fn lifetime_unique(&self) -> usize {
        self.seen_ever.len()
    }

    /// Unique viewers accumulated so far in the current window.
    pub fn window_unique(&self) -> usize {
        self.seen_window.len()
    }
}
