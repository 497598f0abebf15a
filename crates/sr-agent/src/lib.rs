//! `sr-agent` — pedestrian and vehicle agents.
//!
//! # Crate layout
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`kind`]  | `AgentKind` — per-kind thresholds and base speeds |
//! | [`agent`] | `Agent` — state, planning, kinematic update       |
//!
//! An agent follows an assigned waypoint path over its mode's street graph,
//! replanning a fresh random route whenever the current one is exhausted.
//! Every tick's movement ends with a re-projection onto the current path
//! segment, so accumulated floating-point drift can never carry an agent
//! off the network.

pub mod agent;
pub mod kind;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use kind::AgentKind;
