//! The Sun and eight planets under both force strategies
//!
//! Runs the same preset with direct summation and with Barnes-Hut and prints
//! where each planet ended up, plus the difference between the two runs.
//!
//! Run with: cargo run --release --package gravsim --example solar_system

use std::time::Instant;

use gravsim::forces::Algorithm;
use gravsim::params::{ConfigPatch, steps_for_days};
use gravsim::presets::{SOLAR_SYSTEM_EXTENT, solar_system};
use gravsim::simulator::Simulator;

fn run(algorithm: Algorithm, days: f64) -> Result<Simulator, gravsim::SimulationError> {
    let mut sim = Simulator::new(algorithm);
    sim.configure(&ConfigPatch {
        time_step: Some(3_600.0),
        universe_size: Some(SOLAR_SYSTEM_EXTENT),
        ..Default::default()
    })?;
    sim.add_bodies(solar_system())?;

    let start = Instant::now();
    sim.advance(steps_for_days(days, sim.parameters().time_step));
    println!(
        "{algorithm:>10}: {} steps in {:.2?}",
        sim.step_index(),
        start.elapsed()
    );

    Ok(sim)
}

fn main() -> Result<(), gravsim::SimulationError> {
    env_logger::init();

    println!("gravsim: solar system, 1 year\n");
    println!("{}", "=".repeat(60));

    let direct = run(Algorithm::Newtonian, 365.0)?;
    let tree = run(Algorithm::BarnesHut, 365.0)?;

    println!("\n{:>8} {:>14} {:>14} {:>12}", "body", "x (m)", "y (m)", "Δ (m)");
    for (d, t) in direct.bodies().iter().zip(tree.bodies()) {
        println!(
            "{:>8} {:>14.4e} {:>14.4e} {:>12.3e}",
            d.name,
            d.position.x,
            d.position.y,
            (d.position - t.position).magnitude()
        );
    }

    println!(
        "\nEnergy: direct {:.6e} J, Barnes-Hut {:.6e} J",
        direct.total_energy(),
        tree.total_energy()
    );

    Ok(())
}
