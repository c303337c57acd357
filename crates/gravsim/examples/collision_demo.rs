//! Head-on approach of two bodies
//!
//! Two Moon-sized bodies fall toward each other. Once their spheres overlap
//! the pairwise force switches off, they coast through each other, and a
//! collision event is logged on every step they remain in contact.
//!
//! Run with: RUST_LOG=info cargo run --package gravsim --example collision_demo

use gravsim::body::BodySpec;
use gravsim::forces::Algorithm;
use gravsim::params::ConfigPatch;
use gravsim::simulator::Simulator;

fn main() -> Result<(), gravsim::SimulationError> {
    env_logger::init();

    println!("gravsim: collision detection\n");
    println!("{}", "=".repeat(60));

    let mut sim = Simulator::new(Algorithm::BarnesHut);
    sim.configure(&ConfigPatch {
        time_step: Some(60.0),
        universe_size: Some(1e9),
        ..Default::default()
    })?;

    sim.add_bodies([
        BodySpec::new("west", 7.342e22, 1.7374e6, [-2e7, 0.0, 0.0], [500.0, 0.0, 0.0]),
        BodySpec::new("east", 7.342e22, 1.7374e6, [2e7, 0.0, 0.0], [-500.0, 0.0, 0.0]),
    ])?;

    let mut first_contact = None;
    for _ in 0..2_000 {
        let new_events = sim.step().len();
        if new_events > 0 && first_contact.is_none() {
            first_contact = Some(sim.step_index());
        }
    }

    match first_contact {
        Some(step) => println!("First contact at step {step}"),
        None => println!("No contact"),
    }
    println!("Collision events logged: {}", sim.events().len());

    if let Some(event) = sim.events().iter().next() {
        println!("\nFirst event as JSON:");
        match serde_json::to_string_pretty(event) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("could not serialise event: {err}"),
        }
    }

    println!("\nFinal state:");
    for body in sim.state() {
        println!(
            "  {:>5}: x={:+.4e} m, vx={:+.2} m/s",
            body.name, body.position[0], body.velocity[0]
        );
    }

    Ok(())
}
