//! UI-mutable simulation parameters.

use std::str::FromStr;

use thiserror::Error;

// ── Weather ───────────────────────────────────────────────────────────────────

/// Current weather condition.  Each variant maps to a fixed multiplier set in
/// [`Penalties::derive`](crate::Penalties::derive).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Snow,
    Fog,
    Cloudy,
}

impl Weather {
    /// Human-readable label, matching the wire spelling used by region
    /// snapshots and UI controls.
    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Clear  => "clear",
            Weather::Rain   => "rain",
            Weather::Snow   => "snow",
            Weather::Fog    => "fog",
            Weather::Cloudy => "cloudy",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by `Weather::from_str` for unrecognized labels.
#[derive(Debug, Error)]
#[error("unknown weather {0:?}")]
pub struct WeatherParseError(pub String);

impl FromStr for Weather {
    type Err = WeatherParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clear"  => Ok(Weather::Clear),
            "rain"   => Ok(Weather::Rain),
            "snow"   => Ok(Weather::Snow),
            "fog"    => Ok(Weather::Fog),
            "cloudy" => Ok(Weather::Cloudy),
            other    => Err(WeatherParseError(other.to_owned())),
        }
    }
}

// ── SimParams ─────────────────────────────────────────────────────────────────

/// Process-wide simulation parameters.
///
/// Owned by the `World`; the UI collaborator mutates it only through
/// `World::params_mut`, and every tick reads the then-current values.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    /// Current weather condition.
    pub weather: Weather,

    /// Time of day in continuous hours.  Values outside [0, 24) wrap.
    pub time_of_day: f64,

    /// Multiplier applied to wall-clock frame deltas before agent updates.
    pub sim_speed: f64,

    /// Pedestrians to place on the foot graph at the next respawn.
    pub people_count: usize,

    /// Vehicles to place on the road graph at the next respawn.
    pub cars_count: usize,

    /// Pedestrian capability scalar in [0, 1]; scales base walking speed.
    pub human_iq: f64,

    /// Vehicle capability scalar in [0, 1]; scales base driving speed.
    pub car_iq: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            weather:      Weather::Clear,
            time_of_day:  12.0,
            sim_speed:    1.0,
            people_count: 120,
            cars_count:   80,
            human_iq:     0.75,
            car_iq:       0.85,
        }
    }
}

impl SimParams {
    /// Time of day folded into [0, 24).
    #[inline]
    pub fn hour(&self) -> f64 {
        self.time_of_day.rem_euclid(24.0)
    }
}
