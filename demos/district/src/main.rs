//! district — end-to-end demo of the streetreach exposure simulator.
//!
//! Loads a hand-built street grid, places two billboards near the central
//! crossing, runs a fixed-step simulation for two simulated minutes, and
//! prints (and CSV-exports) the exposure statistics.  Fixed steps keep the
//! run reproducible; a real host would feed `world.tick()` deltas instead.

mod region;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use sr_core::GeoPoint;
use sr_env::Weather;
use sr_report::ExposureCsvWriter;
use sr_sim::World;

use region::build_region;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const PEOPLE: usize = 120;
const CARS: usize = 60;
const STEP_SECS: f64 = 0.1;
const TOTAL_STEPS: usize = 1_200; // 2 simulated minutes
const REPORT_EVERY: usize = 100;  // snapshot every 10 simulated seconds

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== district — streetreach exposure demo ===");
    println!("People: {PEOPLE}  |  Cars: {CARS}  |  Seed: {SEED}");
    println!();

    // 1. Load the region.
    let mut world = World::new(SEED);
    world.params_mut().people_count = PEOPLE;
    world.params_mut().cars_count = CARS;
    world.params_mut().weather = Weather::Cloudy;
    world.params_mut().time_of_day = 18.5;
    world.load_region(&build_region());

    println!(
        "Road graph: {} nodes, {} edges ({:.0} m)",
        world.road_graph().node_count(),
        world.road_graph().edge_count(),
        world.road_graph().total_length_m(),
    );
    println!(
        "Foot graph: {} nodes, {} edges ({:.0} m)",
        world.foot_graph().node_count(),
        world.foot_graph().edge_count(),
        world.foot_graph().total_length_m(),
    );
    println!("Agents spawned: {}", world.agents().len());

    // 2. Place billboards: one on the central crossing, one on the
    //    riverside path, facing anywhere (360°) and east-only (120°).
    world.add_billboard(GeoPoint::new(44.8488, 65.5059), 60.0, 360.0);
    world.add_billboard(GeoPoint::new(44.8470, 65.5060), 45.0, 120.0);
    println!("Billboards placed: {}", world.billboards().len());
    println!();

    // 3. Set up the CSV report.
    std::fs::create_dir_all("output/district")?;
    let mut report = ExposureCsvWriter::new(Path::new("output/district"))?;

    // 4. Run.
    let t0 = Instant::now();
    world.set_running(true);
    for step in 1..=TOTAL_STEPS {
        world.step(STEP_SECS);
        if step % REPORT_EVERY == 0 {
            report.write_snapshot(step as f64 * STEP_SECS, world.billboards())?;
        }
    }
    report.finish()?;
    let elapsed = t0.elapsed();

    // 5. Summary table.
    println!(
        "Simulated {:.0} s in {:.3} s wall time",
        TOTAL_STEPS as f64 * STEP_SECS,
        elapsed.as_secs_f64()
    );
    println!();
    println!(
        "{:<8} {:>10} {:>12} {:>14}",
        "Board", "view/tick", "mean uniq/s", "unique total"
    );
    println!("{}", "-".repeat(48));
    for bb in world.billboards() {
        let mean = if bb.window_history_len() == 0 {
            0.0
        } else {
            bb.window_history().sum::<usize>() as f64 / bb.window_history_len() as f64
        };
        println!(
            "{:<8} {:>10.2} {:>12.2} {:>14}",
            bb.label(),
            bb.view_rate(),
            mean,
            bb.lifetime_unique(),
        );
    }
    println!();
    println!("CSV written to output/district/billboard_exposure.csv");

    Ok(())
}
