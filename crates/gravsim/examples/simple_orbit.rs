//! Earth around the Sun
//!
//! Runs one year with a one-hour step and reports energy, angular momentum
//! and radius drift once per simulated month.
//!
//! Run with: cargo run --package gravsim --example simple_orbit

use gravsim::body::BodySpec;
use gravsim::forces::Algorithm;
use gravsim::params::{ConfigPatch, G_SI, steps_for_days};
use gravsim::simulator::Simulator;

fn main() -> Result<(), gravsim::SimulationError> {
    env_logger::init();

    println!("gravsim: Sun and Earth\n");
    println!("{}", "=".repeat(60));

    let sun_mass = 1.989e30;
    let r = 1.496e11;
    let v_circular = (G_SI * sun_mass / r).sqrt();

    let mut sim = Simulator::new(Algorithm::Newtonian);
    sim.configure(&ConfigPatch {
        time_step: Some(3_600.0),
        ..Default::default()
    })?;
    sim.add_body(BodySpec::new("Sun", sun_mass, 6.9634e8, [0.0; 3], [0.0; 3]))?;
    sim.add_body(BodySpec::new(
        "Earth",
        5.972e24,
        6.371e6,
        [r, 0.0, 0.0],
        [0.0, v_circular, 0.0],
    ))?;

    println!("\nInitial conditions:");
    println!("  Orbital radius: {r:.4e} m");
    println!("  Circular velocity: {v_circular:.1} m/s");

    let initial_energy = sim.total_energy();
    let initial_l = sim.total_angular_momentum().magnitude();
    println!("  Total energy: {initial_energy:.6e} J");
    println!("  Angular momentum: {initial_l:.6e} kg m² s⁻¹");

    let time_step = sim.parameters().time_step;
    let steps_per_month = steps_for_days(30.0, time_step);

    println!("\nIntegrating 12 months at {time_step} s per step...");
    for month in 1..=12 {
        sim.advance(steps_per_month);

        let r_current = match (sim.body("Sun"), sim.body("Earth")) {
            (Some(sun), Some(earth)) => (earth.position - sun.position).magnitude(),
            _ => break,
        };

        let energy_error = ((sim.total_energy() - initial_energy) / initial_energy).abs();
        let l_error = ((sim.total_angular_momentum().magnitude() - initial_l) / initial_l).abs();

        println!(
            "Month {month:2}: r={r_current:.6e} m, ΔE={energy_error:.2e}, ΔL={l_error:.2e}, Δr={:.2e}",
            ((r_current - r) / r).abs()
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("Steps taken: {}", sim.step_index());
    println!("Collisions: {}", sim.events().len());

    Ok(())
}
