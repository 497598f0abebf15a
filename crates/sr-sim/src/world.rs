//! The `World`: spawn, update ordering, and parameter state.

use sr_agent::{Agent, AgentKind};
use sr_core::{AgentId, AgentRng, BillboardId, GeoPoint, SimRng, StepClock};
use sr_env::{Penalties, SimParams};
use sr_exposure::{Billboard, ExposureEngine};
use sr_spatial::{AStarRouter, RegionData, StreetGraph, TravelMode};

/// Spawn positions get a uniform nudge of up to half this value per axis
/// (degrees), purely so co-sampled agents don't render on top of each other.
const SPAWN_JITTER_DEG: f64 = 1e-5;

/// Owns every piece of simulation state: both street graphs, the signal
/// set, all agents and billboards, and the UI-mutable parameters.
///
/// # Update ordering (per `step`)
///
/// 1. Derive [`Penalties`] from the current parameters.
/// 2. Update every agent (pedestrians first, then vehicles, in spawn
///    order) with the speed-scaled delta.
/// 3. Run the exposure engine: per-tick sighting evaluation for every
///    billboard, then — on crossing an accumulated second — the window
///    flush.  The accumulator runs on the raw frame delta; the speed
///    multiplier scales motion, not the aggregation window.
pub struct World {
    params: SimParams,
    running: bool,
    seed: u64,

    clock: StepClock,
    road: StreetGraph,
    foot: StreetGraph,
    signals: Vec<GeoPoint>,

    agents: Vec<Agent>,
    /// Per-agent RNGs, parallel to `agents`.
    agent_rngs: Vec<AgentRng>,

    billboards: Vec<Billboard>,
    engine: ExposureEngine,

    router: AStarRouter,
    rng: SimRng,
}

impl World {
    /// Create a world with empty graphs and default parameters.
    ///
    /// `seed` drives every stochastic draw (spawn sampling, plan goals,
    /// sighting tests); equal seeds replay equal runs.
    pub fn new(seed: u64) -> World {
        let empty = RegionData::default();
        World {
            params: SimParams::default(),
            running: false,
            seed,
            clock: StepClock::new(),
            road: StreetGraph::build(&empty, TravelMode::Car),
            foot: StreetGraph::build(&empty, TravelMode::Foot),
            signals: Vec::new(),
            agents: Vec::new(),
            agent_rngs: Vec::new(),
            billboards: Vec::new(),
            engine: ExposureEngine::new(),
            router: AStarRouter,
            rng: SimRng::new(seed),
        }
    }

    // ── Parameters ────────────────────────────────────────────────────────

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// The sole mutation point for simulation parameters.  Changes take
    /// effect on the next tick (counts and capability scalars on the next
    /// respawn).
    pub fn params_mut(&mut self) -> &mut SimParams {
        &mut self.params
    }

    // ── Region loading ────────────────────────────────────────────────────

    /// (Re)build both street graphs from a region description, reset the
    /// signal set, and respawn the agent population.
    pub fn load_region(&mut self, region: &RegionData) {
        self.road = StreetGraph::build(region, TravelMode::Car);
        self.foot = StreetGraph::build(region, TravelMode::Foot);
        self.signals = region.signal_points();
        self.spawn();
    }

    /// Parse a JSON region snapshot and load it.
    #[cfg(feature = "json")]
    pub fn load_region_snapshot<R: std::io::Read>(&mut self, reader: R) -> crate::SimResult<()> {
        let region = sr_spatial::snapshot::load_from_reader(reader)?;
        self.load_region(&region);
        Ok(())
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Discard the current population and repopulate from the current
    /// parameters.
    ///
    /// Pedestrians spread over the foot graph and vehicles over the road
    /// graph by length-weighted stratified sampling, with a small positional
    /// jitter.  Both agent collections are replaced atomically and every
    /// billboard's accumulators reset, so no id from the previous
    /// population can linger in a `seen_ever` set.  A mode whose graph has
    /// no edges spawns no agents of that kind.
    pub fn spawn(&mut self) {
        self.agents.clear();
        self.agent_rngs.clear();

        let people = self.params.people_count;
        let cars = self.params.cars_count;
        let human_iq = self.params.human_iq;
        let car_iq = self.params.car_iq;

        for i in 0..people {
            let Some(pos) = self.foot.sample_stratified(i, people, self.rng.inner()) else {
                break;
            };
            self.push_agent(AgentKind::Pedestrian, i + 1, pos, human_iq);
        }
        for i in 0..cars {
            let Some(pos) = self.road.sample_stratified(i, cars, self.rng.inner()) else {
                break;
            };
            self.push_agent(AgentKind::Vehicle, i + 1, pos, car_iq);
        }

        for bb in &mut self.billboards {
            bb.reset();
        }
        self.engine.reset();
    }

    /// Create one agent at a jittered position, give it a deterministic
    /// RNG, and let it plan its first route.
    fn push_agent(&mut self, kind: AgentKind, ordinal: usize, pos: GeoPoint, iq: f64) {
        let id = AgentId(self.agents.len() as u32);
        let jittered = GeoPoint::new(
            pos.lat + (self.rng.random::<f64>() - 0.5) * SPAWN_JITTER_DEG,
            pos.lng + (self.rng.random::<f64>() - 0.5) * SPAWN_JITTER_DEG,
        );

        let mut agent = Agent::new(id, kind, ordinal, jittered, iq);
        let mut agent_rng = AgentRng::new(self.seed, id);
        agent.replan(self.graph_for(kind), &self.router, &mut agent_rng);

        self.agents.push(agent);
        self.agent_rngs.push(agent_rng);
    }

    #[inline]
    fn graph_for(&self, kind: AgentKind) -> &StreetGraph {
        match kind {
            AgentKind::Pedestrian => &self.foot,
            AgentKind::Vehicle    => &self.road,
        }
    }

    // ── Frame driving ─────────────────────────────────────────────────────

    /// Pause or resume.  Resuming restarts the frame clock so the paused
    /// interval is not replayed as one giant step.
    pub fn set_running(&mut self, running: bool) {
        if running && !self.running {
            self.clock.reset();
        }
        self.running = running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Wall-clock seconds elapsed since the previous `tick()`.
    pub fn tick(&mut self) -> f64 {
        self.clock.tick()
    }

    /// Advance the simulation by one frame of `dt` wall-clock seconds.
    /// No-op while paused.
    pub fn step(&mut self, dt: f64) {
        if !self.running {
            return;
        }

        let scaled = dt * self.params.sim_speed;
        let pen = Penalties::derive(&self.params);

        for (agent, agent_rng) in self.agents.iter_mut().zip(self.agent_rngs.iter_mut()) {
            let graph = match agent.kind() {
                AgentKind::Pedestrian => &self.foot,
                AgentKind::Vehicle    => &self.road,
            };
            agent.update(scaled, &pen, graph, &self.router, &self.signals, agent_rng);
        }

        self.engine.tick(
            &mut self.billboards,
            &self.agents,
            dt,
            pen.visibility,
            &mut self.rng,
        );
    }

    // ── Billboards ────────────────────────────────────────────────────────

    /// Place a billboard.  Radius/fov bounds are the UI's responsibility.
    pub fn add_billboard(&mut self, pos: GeoPoint, radius_m: f64, fov_deg: f64) -> BillboardId {
        let id = BillboardId(self.billboards.len() as u16);
        self.billboards.push(Billboard::new(id, pos, radius_m, fov_deg));
        id
    }

    /// Remove all billboards.  Individual removal is intentionally not
    /// supported.
    pub fn clear_billboards(&mut self) {
        self.billboards.clear();
    }

    // ── Read-only state ───────────────────────────────────────────────────

    pub fn billboards(&self) -> &[Billboard] {
        &self.billboards
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn signals(&self) -> &[GeoPoint] {
        &self.signals
    }

    pub fn road_graph(&self) -> &StreetGraph {
        &self.road
    }

    pub fn foot_graph(&self) -> &StreetGraph {
        &self.foot
    }
}
