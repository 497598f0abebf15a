//! Agent kind: per-kind movement constants.

/// Discriminates the two agent populations.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AgentKind {
    Pedestrian,
    Vehicle,
}

impl AgentKind {
    /// Distance (metres) at which the next waypoint counts as reached.
    ///
    /// Vehicles get a larger tolerance: at their speeds a 2 m window can be
    /// stepped over in a single tick.
    #[inline]
    pub fn reach_threshold_m(self) -> f64 {
        match self {
            AgentKind::Pedestrian => 2.0,
            AgentKind::Vehicle    => 4.0,
        }
    }

    /// Base movement speed in m/s for a capability scalar `iq` in [0, 1].
    #[inline]
    pub fn base_speed_mps(self, iq: f64) -> f64 {
        match self {
            AgentKind::Pedestrian => 1.1 + iq * 0.6,
            AgentKind::Vehicle    => 7.0 + iq * 5.0,
        }
    }

    /// Label prefix for display ids ("P-001", "C-001").
    pub fn label_prefix(self) -> &'static str {
        match self {
            AgentKind::Pedestrian => "P",
            AgentKind::Vehicle    => "C",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Pedestrian => "pedestrian",
            AgentKind::Vehicle    => "vehicle",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
