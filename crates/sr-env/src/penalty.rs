//! Multiplicative environmental penalties.
//!
//! Derived fresh each tick from [`SimParams`]: a night factor first dims
//! visibility, then the weather condition multiplies all three channels.
//! Every factor is in (0, 1]; 1.0 means "no penalty".

use crate::{SimParams, Weather};

/// The per-tick penalty set consumed by agent updates and the sighting model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Penalties {
    /// Multiplier on agent movement speed.
    pub speed: f64,
    /// Multiplier on sighting range and probability.
    pub visibility: f64,
    /// Surface grip multiplier (reserved for braking/handling models).
    pub friction: f64,
}

impl Penalties {
    /// No penalty on any channel.
    pub const NONE: Penalties = Penalties { speed: 1.0, visibility: 1.0, friction: 1.0 };

    /// Derive the penalty set for the current parameters.
    pub fn derive(params: &SimParams) -> Penalties {
        let hour = params.hour();

        let night = if !(6.0..=21.0).contains(&hour) {
            0.7
        } else if hour < 8.0 || hour > 19.0 {
            0.85
        } else {
            1.0
        };

        let mut p = Penalties { speed: 1.0, visibility: night, friction: 1.0 };

        match params.weather {
            Weather::Clear => {}
            Weather::Rain => {
                p.speed = 0.88;
                p.visibility *= 0.85;
                p.friction = 0.85;
            }
            Weather::Snow => {
                p.speed = 0.78;
                p.visibility *= 0.70;
                p.friction = 0.70;
            }
            Weather::Fog => {
                p.speed = 0.90;
                p.visibility *= 0.55;
                p.friction = 0.95;
            }
            Weather::Cloudy => {
                p.visibility *= 0.95;
            }
        }

        p
    }
}
