//! Unit tests for sr-exposure.

#[cfg(test)]
mod helpers {
    use sr_agent::{Agent, AgentKind};
    use sr_core::{AgentId, GeoPoint};

    /// Capability scalar that zeroes a pedestrian's base speed
    /// (1.1 + iq × 0.6 = 0), removing the motion discount from the
    /// sighting probability.  Used to realize the "stationary viewer"
    /// scenarios exactly.
    pub const STANDING_IQ: f64 = -11.0 / 6.0;

    pub fn viewer(id: u32, pos: GeoPoint, iq: f64) -> Agent {
        Agent::new(AgentId(id), AgentKind::Pedestrian, id as usize + 1, pos, iq)
    }
}

// ── Sighting test ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod sighting {
    use sr_core::{GeoPoint, SimRng};

    use crate::engine::sees;

    use super::helpers::{viewer, STANDING_IQ};

    const BB: GeoPoint = GeoPoint { lat: 44.8488, lng: 65.5059 };

    #[test]
    fn rate_matches_base_probability() {
        // Radius 50, fov 360, standing viewer 10 m away, visibility 1.0:
        // p = 0.6 × 1.0 + 0.3 = 0.9 exactly (no motion discount).
        let agent = viewer(0, BB.offset_m(10.0, 0.0), STANDING_IQ);
        let mut rng = SimRng::new(2024);

        let mut hits = 0usize;
        for _ in 0..1000 {
            if sees(&agent, BB, 50.0, 360.0, 1.0, &mut rng) {
                hits += 1;
            }
        }
        let rate = hits as f64 / 1000.0;
        assert!((rate - 0.9).abs() < 0.05, "observed rate {rate}, expected ≈0.9");
    }

    #[test]
    fn opposite_of_cone_is_never_seen() {
        // Heading 0° (north), billboard due south → bearing difference 180°,
        // far outside a 30° cone.  Distance is irrelevant.
        let agent = viewer(0, BB.offset_m(5.0, 0.0), STANDING_IQ);
        let mut rng = SimRng::new(7);
        for _ in 0..500 {
            assert!(!sees(&agent, BB, 1_000.0, 30.0, 1.0, &mut rng));
        }
    }

    #[test]
    fn wide_cone_sees_behind() {
        // Same geometry, fov 360 → the fold lands exactly on the half-angle.
        let agent = viewer(0, BB.offset_m(5.0, 0.0), STANDING_IQ);
        let mut rng = SimRng::new(7);
        let any = (0..100).any(|_| sees(&agent, BB, 1_000.0, 360.0, 1.0, &mut rng));
        assert!(any);
    }

    #[test]
    fn out_of_effective_range_is_never_seen() {
        // Visibility 1.0 → effective radius 50 × 1.3 = 65 m.
        let agent = viewer(0, BB.offset_m(70.0, 0.0), STANDING_IQ);
        let mut rng = SimRng::new(1);
        for _ in 0..500 {
            assert!(!sees(&agent, BB, 50.0, 360.0, 1.0, &mut rng));
        }
    }

    #[test]
    fn low_visibility_shrinks_the_radius() {
        // 40 m out: inside the clear-day radius (65 m), outside the
        // zero-visibility radius (35 m).
        let agent = viewer(0, BB.offset_m(40.0, 0.0), STANDING_IQ);
        let mut rng = SimRng::new(5);

        for _ in 0..500 {
            assert!(!sees(&agent, BB, 50.0, 360.0, 0.0, &mut rng));
        }
        let any = (0..500).any(|_| sees(&agent, BB, 50.0, 360.0, 1.0, &mut rng));
        assert!(any, "clear-day sighting at 40 m should occur within 500 ticks");
    }

    #[test]
    fn fast_movers_register_less_often() {
        // Vehicle-grade speed rating (11.25 m/s) → discount 1 − 0.5×(11.25/18)
        // ≈ 0.6875, so p ≈ 0.62 vs 0.9 for a standing viewer.
        let standing = viewer(0, BB.offset_m(10.0, 0.0), STANDING_IQ);
        let moving = sr_agent::Agent::new(
            sr_core::AgentId(1),
            sr_agent::AgentKind::Vehicle,
            1,
            BB.offset_m(10.0, 0.0),
            0.85,
        );

        let mut rng = SimRng::new(99);
        let mut hits_standing = 0;
        let mut hits_moving = 0;
        for _ in 0..2000 {
            if sees(&standing, BB, 50.0, 360.0, 1.0, &mut rng) {
                hits_standing += 1;
            }
            if sees(&moving, BB, 50.0, 360.0, 1.0, &mut rng) {
                hits_moving += 1;
            }
        }
        assert!(
            hits_moving < hits_standing,
            "moving {hits_moving} vs standing {hits_standing}"
        );
    }
}

// ── Billboard accumulators ────────────────────────────────────────────────────

#[cfg(test)]
mod billboard {
    use sr_core::{AgentId, BillboardId, GeoPoint};

    use crate::{Billboard, HISTORY_CAPACITY};

    fn bb() -> Billboard {
        Billboard::new(BillboardId(0), GeoPoint::new(44.8488, 65.5059), 50.0, 360.0)
    }

    #[test]
    fn label_is_one_based() {
        assert_eq!(bb().label(), "BB-01");
        let other = Billboard::new(BillboardId(11), GeoPoint::new(0.0, 0.0), 10.0, 90.0);
        assert_eq!(other.label(), "BB-12");
    }

    #[test]
    fn view_rate_decays() {
        let mut b = bb();
        b.end_tick(3);
        assert!((b.view_rate() - 0.45).abs() < 1e-12); // 0 × 0.85 + 3 × 0.15
        b.end_tick(0);
        assert!((b.view_rate() - 0.3825).abs() < 1e-12); // 0.45 × 0.85
    }

    #[test]
    fn record_feeds_all_three_tiers() {
        let mut b = bb();
        b.record(AgentId(1));
        b.record(AgentId(2));
        b.record(AgentId(1)); // duplicate within the tick
        assert_eq!(b.window_unique(), 2);
        assert_eq!(b.lifetime_unique(), 2);

        b.end_tick(3);
        // Tick set cleared; the longer horizons keep their members.
        assert_eq!(b.window_unique(), 2);
        assert_eq!(b.lifetime_unique(), 2);
    }

    #[test]
    fn flush_reports_and_clears_the_window() {
        let mut b = bb();
        b.record(AgentId(1));
        b.record(AgentId(2));
        b.flush_window();

        assert_eq!(b.window_history_len(), 1);
        assert_eq!(b.window_history().last(), Some(2));
        assert_eq!(b.window_unique(), 0, "window set must be empty after flush");
        assert_eq!(b.reported_unique(), 2);
        assert_eq!(b.lifetime_unique(), 2, "lifetime set survives the flush");
    }

    #[test]
    fn history_is_bounded_and_evicts_oldest() {
        let mut b = bb();
        for round in 0..(HISTORY_CAPACITY + 10) {
            // `round` distinct viewers this window, all ids fresh.
            for j in 0..round {
                b.record(AgentId((round * 1000 + j) as u32));
            }
            b.flush_window();
        }
        assert_eq!(b.window_history_len(), HISTORY_CAPACITY);
        // The first ten rounds (counts 0..9) have been evicted.
        assert_eq!(b.window_history().next(), Some(10));
        assert_eq!(b.window_history().last(), Some(HISTORY_CAPACITY + 9));
    }

    #[test]
    fn reset_forgets_everything() {
        let mut b = bb();
        b.record(AgentId(1));
        b.end_tick(1);
        b.flush_window();
        b.reset();

        assert_eq!(b.lifetime_unique(), 0);
        assert_eq!(b.window_unique(), 0);
        assert_eq!(b.window_history_len(), 0);
        assert_eq!(b.reported_unique(), 0);
        assert_eq!(b.view_rate(), 0.0);
    }
}

// ── Engine cadence ────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use sr_core::{BillboardId, GeoPoint, SimRng};

    use crate::{Billboard, ExposureEngine};

    use super::helpers::{viewer, STANDING_IQ};

    const BB_POS: GeoPoint = GeoPoint { lat: 44.8488, lng: 65.5059 };

    #[test]
    fn lifetime_unique_is_monotone_across_ticks() {
        let mut engine = ExposureEngine::new();
        let mut billboards = vec![Billboard::new(BillboardId(0), BB_POS, 50.0, 360.0)];
        let agents = vec![
            viewer(0, BB_POS.offset_m(10.0, 0.0), STANDING_IQ),
            viewer(1, BB_POS.offset_m(20.0, 90.0), STANDING_IQ),
            viewer(2, BB_POS.offset_m(200.0, 180.0), STANDING_IQ), // out of range
        ];
        let mut rng = SimRng::new(31);

        let mut prev = 0usize;
        for _ in 0..200 {
            engine.tick(&mut billboards, &agents, 0.016, 1.0, &mut rng);
            let now = billboards[0].lifetime_unique();
            assert!(now >= prev, "lifetime unique shrank: {now} < {prev}");
            prev = now;
        }
        assert_eq!(prev, 2, "only the two in-range agents can ever be seen");
    }

    #[test]
    fn window_flush_happens_on_accumulated_second() {
        let mut engine = ExposureEngine::new();
        let mut billboards = vec![Billboard::new(BillboardId(0), BB_POS, 50.0, 360.0)];
        let agents = vec![viewer(0, BB_POS.offset_m(10.0, 0.0), STANDING_IQ)];
        let mut rng = SimRng::new(8);

        // 0.4 s + 0.4 s: under one second, no flush yet.
        engine.tick(&mut billboards, &agents, 0.4, 1.0, &mut rng);
        engine.tick(&mut billboards, &agents, 0.4, 1.0, &mut rng);
        assert_eq!(billboards[0].window_history_len(), 0);

        // Third tick crosses 1.0 s: exactly one history sample appears and
        // the window set is emptied.
        engine.tick(&mut billboards, &agents, 0.4, 1.0, &mut rng);
        assert_eq!(billboards[0].window_history_len(), 1);
        assert_eq!(billboards[0].window_unique(), 0);
        assert_eq!(engine.window_accum_secs(), 0.0);
    }

    #[test]
    fn flush_applies_to_every_billboard() {
        let mut engine = ExposureEngine::new();
        let mut billboards = vec![
            Billboard::new(BillboardId(0), BB_POS, 50.0, 360.0),
            Billboard::new(BillboardId(1), BB_POS.offset_m(500.0, 0.0), 50.0, 360.0),
        ];
        let agents = vec![viewer(0, BB_POS.offset_m(10.0, 0.0), STANDING_IQ)];
        let mut rng = SimRng::new(8);

        engine.tick(&mut billboards, &agents, 1.0, 1.0, &mut rng);
        for bb in &billboards {
            assert_eq!(bb.window_history_len(), 1);
        }
        // The far billboard saw nobody.
        assert_eq!(billboards[1].window_history().last(), Some(0));
    }

    #[test]
    fn reset_restarts_the_accumulator() {
        let mut engine = ExposureEngine::new();
        let mut billboards: Vec<Billboard> = vec![];
        let mut rng = SimRng::new(8);

        engine.tick(&mut billboards, &[], 0.9, 1.0, &mut rng);
        assert!(engine.window_accum_secs() > 0.0);
        engine.reset();
        assert_eq!(engine.window_accum_secs(), 0.0);
    }
}
