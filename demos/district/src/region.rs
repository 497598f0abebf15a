//! Hand-built district used by the demo.
//!
//! A small synthetic street grid around a central crossing: two arterial
//! car+foot streets, a one-way service loop, a riverside footpath, and one
//! traffic signal on the central junction.  Coordinates sit near 44.85° N,
//! 65.50° E — a mid-latitude city block of roughly 400 × 500 m.

use std::collections::HashMap;

use sr_core::GeoPoint;
use sr_spatial::{RegionData, RegionWay, WayKind};

fn street(car: bool, foot: bool, oneway: bool, nodes: &[i64]) -> RegionWay {
    RegionWay {
        kind: WayKind::Road,
        car,
        foot,
        oneway,
        nodes: nodes.to_vec(),
    }
}

/// Build the demo district.
pub fn build_region() -> RegionData {
    let mut nodes = HashMap::new();
    // North-south arterial.
    nodes.insert(1, GeoPoint::new(44.8470, 65.5059));
    nodes.insert(2, GeoPoint::new(44.8488, 65.5059)); // central crossing
    nodes.insert(3, GeoPoint::new(44.8506, 65.5059));
    // East-west arterial.
    nodes.insert(4, GeoPoint::new(44.8488, 65.5030));
    nodes.insert(5, GeoPoint::new(44.8488, 65.5088));
    // One-way service loop, north-east quarter.
    nodes.insert(6, GeoPoint::new(44.8500, 65.5075));
    nodes.insert(7, GeoPoint::new(44.8506, 65.5088));
    // Riverside footpath along the south edge.
    nodes.insert(8, GeoPoint::new(44.8470, 65.5030));
    nodes.insert(9, GeoPoint::new(44.8470, 65.5088));

    RegionData {
        nodes,
        ways: vec![
            street(true, true, false, &[1, 2, 3]),
            street(true, true, false, &[4, 2, 5]),
            // Service loop: cars circulate one way; walkers go both.
            street(true, true, true, &[3, 6, 5]),
            street(true, true, true, &[5, 7, 3]),
            // Foot-only riverside path.
            street(false, true, false, &[8, 1, 9]),
            street(false, true, false, &[9, 5]),
        ],
        buildings: vec![],
        signal_nodes: vec![2],
    }
}
