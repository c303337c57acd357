//! Command-line front end: load bodies, run steps, print a JSON report

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use clap::Parser;
use gravsim::body::{BodySnapshot, BodySpec};
use gravsim::collisions::EventLog;
use gravsim::field::FieldSample;
use gravsim::params::steps_for_days;
use gravsim::presets::{SOLAR_SYSTEM_EXTENT, solar_system};
use gravsim::{Algorithm, ConfigPatch, SimulationParameters, Simulator};
use log::info;
use nalgebra::Point3;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "gravsim", version, about = "Run an N-body gravity simulation")]
struct Args {
    /// Force strategy: newtonian or barnes-hut
    #[arg(short, long, default_value = "newtonian")]
    algorithm: Algorithm,

    /// Number of steps to run
    #[arg(short, long, conflicts_with = "days")]
    steps: Option<u64>,

    /// Simulated days to run (rounded down to whole steps)
    #[arg(short, long)]
    days: Option<f64>,

    /// Step size in seconds
    #[arg(long)]
    time_step: Option<f64>,

    /// Barnes-Hut opening threshold
    #[arg(long)]
    theta: Option<f64>,

    /// Gravitational constant
    #[arg(long)]
    gravity_constant: Option<f64>,

    /// Half-extent of the Barnes-Hut root cube in metres
    #[arg(long)]
    universe_size: Option<f64>,

    /// Integrate backward in time
    #[arg(long)]
    backward: bool,

    /// Read a JSON array of bodies from stdin instead of the solar system preset
    #[arg(long)]
    stdin: bool,

    /// Also sample the field on a resolution³ grid
    #[arg(long)]
    field_resolution: Option<usize>,

    /// Edge length of the field grid in metres
    #[arg(long, default_value_t = 2e12)]
    field_size: f64,

    /// Grid centre as x,y,z
    #[arg(long, value_delimiter = ',', default_values_t = [0.0, 0.0, 0.0])]
    field_center: Vec<f64>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn config_patch(&self) -> ConfigPatch {
        ConfigPatch {
            time_step: self.time_step,
            gravity_constant: self.gravity_constant,
            barnes_hut_theta: self.theta,
            universe_size: self
                .universe_size
                .or((!self.stdin).then_some(SOLAR_SYSTEM_EXTENT)),
            time_direction_forward: self.backward.then_some(false),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Energy {
    kinetic: f64,
    potential: f64,
    total: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    algorithm: Algorithm,
    steps: u64,
    parameters: SimulationParameters,
    bodies: Vec<BodySnapshot>,
    events: &'a EventLog,
    energy: Energy,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<Vec<FieldSample>>,
}

fn load_bodies(from_stdin: bool) -> Result<Vec<BodySpec>> {
    if !from_stdin {
        return Ok(solar_system());
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    serde_json::from_str(&input).context("stdin is not a JSON array of bodies")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut sim = Simulator::new(args.algorithm);
    let patch = args.config_patch();
    if !patch.is_empty() {
        sim.configure(&patch).context("invalid configuration")?;
    }

    let bodies = load_bodies(args.stdin)?;
    if bodies.is_empty() {
        bail!("no bodies to simulate");
    }
    sim.add_bodies(bodies).context("invalid body list")?;

    let steps = match (args.steps, args.days) {
        (Some(steps), _) => steps,
        (None, Some(days)) => steps_for_days(days, sim.parameters().time_step),
        (None, None) => 1,
    };

    info!(
        "running {} bodies for {steps} steps with {}",
        sim.bodies().len(),
        sim.algorithm()
    );
    let collisions = sim.advance(steps);
    info!("done: {collisions} collision events");

    let field = match args.field_resolution {
        Some(resolution) => {
            let &[x, y, z] = args.field_center.as_slice() else {
                bail!("--field-center takes exactly three comma-separated values");
            };
            let samples = sim
                .sample_field_grid(Point3::new(x, y, z), args.field_size, resolution)
                .context("sampling the gravitational field")?;
            Some(samples)
        }
        None => None,
    };

    let report = Report {
        algorithm: sim.algorithm(),
        steps: sim.step_index(),
        parameters: sim.parameters(),
        bodies: sim.state(),
        events: sim.events(),
        energy: Energy {
            kinetic: sim.kinetic_energy(),
            potential: sim.potential_energy(),
            total: sim.total_energy(),
        },
        field,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}
