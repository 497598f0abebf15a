//! Per-tick sighting evaluation and the 1-second aggregation window.

use sr_agent::Agent;
use sr_core::geo::bearing_diff_deg;
use sr_core::{GeoPoint, SimRng};

use crate::Billboard;

/// Effective sighting radius = radius × (0.7 + 0.6 × visibility).
/// Full visibility extends reach 30 % past the nominal radius; the worst
/// visibility still leaves 70 % of it.
const RADIUS_BASE: f64 = 0.7;
const RADIUS_VIS_GAIN: f64 = 0.6;

/// Base sighting probability = 0.3 + 0.6 × visibility.
const PROB_BASE: f64 = 0.3;
const PROB_VIS_GAIN: f64 = 0.6;

/// Speed at which the motion discount saturates (m/s): at or above this,
/// the per-tick sighting probability is halved.
const SPEED_SATURATION_MPS: f64 = 18.0;

/// Evaluates sightings for every (billboard, agent) pair each tick and
/// drives the three-tier clearing cadence.
///
/// Owns the 1-second accumulator: window flushes are tied to accumulated
/// simulated seconds, not to tick boundaries, so the viewer-per-second
/// series stays correct under any frame rate.
pub struct ExposureEngine {
    sec_accum: f64,
}

impl ExposureEngine {
    pub fn new() -> ExposureEngine {
        ExposureEngine { sec_accum: 0.0 }
    }

    /// Evaluate one tick.
    ///
    /// `dt` is the raw (un-scaled) frame delta in seconds — the aggregation
    /// window runs on real simulated time regardless of the speed
    /// multiplier applied to agent motion.  `visibility` is the current
    /// visibility penalty.
    ///
    /// Ordering per tick: every agent is tested against every billboard and
    /// the per-tick bookkeeping completes for all billboards before any
    /// window flush happens.
    pub fn tick(
        &mut self,
        billboards: &mut [Billboard],
        agents: &[Agent],
        dt: f64,
        visibility: f64,
        rng: &mut SimRng,
    ) {
        for bb in billboards.iter_mut() {
            let mut count = 0usize;
            for agent in agents {
                if sees(agent, bb.pos(), bb.radius_m(), bb.fov_deg(), visibility, rng) {
                    bb.record(agent.id());
                    count += 1;
                }
            }
            bb.end_tick(count);
        }

        self.sec_accum += dt;
        if self.sec_accum >= 1.0 {
            self.sec_accum = 0.0;
            for bb in billboards.iter_mut() {
                bb.flush_window();
            }
        }
    }

    /// Restart the 1-second accumulator (population respawn).
    pub fn reset(&mut self) {
        self.sec_accum = 0.0;
    }

    /// Seconds accumulated toward the next window flush.
    pub fn window_accum_secs(&self) -> f64 {
        self.sec_accum
    }
}

impl Default for ExposureEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The range → field-of-view → probability sighting test.
///
/// Kept free of billboard bookkeeping so it can be exercised directly in
/// tests with a controlled RNG.
pub(crate) fn sees(
    agent: &Agent,
    bb_pos: GeoPoint,
    radius_m: f64,
    fov_deg: f64,
    visibility: f64,
    rng: &mut SimRng,
) -> bool {
    // 1. Range, scaled by visibility.
    let dist = agent.pos().distance_m(bb_pos);
    let effective_radius = radius_m * (RADIUS_BASE + RADIUS_VIS_GAIN * visibility);
    if dist > effective_radius {
        return false;
    }

    // 2. Field of view, when the agent has a facing direction.
    if let Some(heading) = agent.heading_deg() {
        let bearing = agent.pos().bearing_deg(bb_pos);
        if bearing_diff_deg(bearing, heading) > fov_deg * 0.5 {
            return false;
        }
    }

    // 3. Probability, discounted for fast movers.
    let mut p = PROB_VIS_GAIN * visibility + PROB_BASE;
    if let Some(speed) = agent.speed_mps() {
        p *= 1.0 - 0.5 * (speed / SPEED_SATURATION_MPS).min(1.0);
    }
    rng.gen_bool(p)
}
