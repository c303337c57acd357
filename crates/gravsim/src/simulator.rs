//! The simulation orchestrator
//!
//! A `Simulator` owns its bodies and runs each step as three passes:
//!
//! 1. Force: the active strategy computes every body's acceleration from the
//!    positions at the start of the step. The collected `Vec` is the barrier;
//!    nothing moves until every acceleration is known.
//! 2. Integration: every body is advanced by the signed time step.
//! 3. Collisions: overlapping pairs are appended to the event log.
//!
//! Parameters are read once per step from the shared handle, so a
//! `configure` call between steps takes effect on the next one.

use log::{debug, info, warn};
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::body::{Body, BodySnapshot, BodySpec};
use crate::collisions::{CollisionDetector, CollisionEvent, DirectDetector, EventLog};
use crate::error::{Result, SimulationError};
use crate::field::{self, FieldSample};
use crate::forces::{Algorithm, ForceStrategy};
use crate::integrator::{Integrator, KickDriftKick};
use crate::params::{ConfigPatch, SharedParameters, SimulationParameters};

/// An N-body simulation with one force strategy
///
/// # Examples
///
/// ```
/// use gravsim::body::BodySpec;
/// use gravsim::forces::Algorithm;
/// use gravsim::simulator::Simulator;
///
/// let mut sim = Simulator::new(Algorithm::Newtonian);
/// sim.add_body(BodySpec::new("Sun", 1.989e30, 6.9634e8, [0.0; 3], [0.0; 3]))?;
/// sim.add_body(BodySpec::new(
///     "Earth",
///     5.972e24,
///     6.371e6,
///     [1.496e11, 0.0, 0.0],
///     [0.0, 2.978e4, 0.0],
/// ))?;
///
/// sim.step();
///
/// let earth = sim.body("Earth").unwrap();
/// assert!(earth.position.x < 1.496e11);
/// assert!(sim.events().is_empty());
/// # Ok::<(), gravsim::error::SimulationError>(())
/// ```
#[derive(Debug)]
pub struct Simulator {
    bodies: Vec<Body>,
    strategy: ForceStrategy,
    integrator: KickDriftKick,
    detector: DirectDetector,
    parameters: SharedParameters,
    events: EventLog,
    step_index: u64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

impl Simulator {
    /// Creates an empty simulator with its own default parameters
    pub fn new(algorithm: Algorithm) -> Self {
        Self::with_parameters(algorithm, SharedParameters::default())
    }

    /// Creates an empty simulator reading from an existing parameter handle
    ///
    /// Simulators built from clones of one handle see each other's
    /// `configure` calls.
    pub fn with_parameters(algorithm: Algorithm, parameters: SharedParameters) -> Self {
        Self {
            bodies: Vec::new(),
            strategy: ForceStrategy::from(algorithm),
            integrator: KickDriftKick,
            detector: DirectDetector,
            parameters,
            events: EventLog::new(),
            step_index: 0,
        }
    }

    /// Adds a body built from `spec`
    ///
    /// Fails if the name is taken or any number is not finite. Acceleration
    /// starts at zero whatever the caller had in mind.
    pub fn add_body(&mut self, spec: BodySpec) -> Result<()> {
        if self.body(&spec.name).is_some() {
            return Err(SimulationError::DuplicateBody(spec.name));
        }

        let body = spec.into_body()?;
        debug!("added body `{}` (mass {:e} kg)", body.name, body.mass);
        self.bodies.push(body);
        Ok(())
    }

    /// Adds several bodies, all or none
    pub fn add_bodies(&mut self, specs: impl IntoIterator<Item = BodySpec>) -> Result<()> {
        let mut staged: Vec<Body> = Vec::new();
        for spec in specs {
            if self.body(&spec.name).is_some() || staged.iter().any(|b| b.name == spec.name) {
                return Err(SimulationError::DuplicateBody(spec.name));
            }
            staged.push(spec.into_body()?);
        }

        debug!("added {} bodies", staged.len());
        self.bodies.extend(staged);
        Ok(())
    }

    /// Removes the body with this name; absent names are a no-op
    pub fn remove_body(&mut self, name: &str) -> Option<Body> {
        let removed = self
            .bodies
            .iter()
            .position(|b| b.name == name)
            .map(|idx| self.bodies.remove(idx));

        if removed.is_some() {
            debug!("removed body `{name}`");
        }
        removed
    }

    /// Drops every body, the event log and the step counter
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.events.clear();
        self.step_index = 0;
        debug!("simulator cleared");
    }

    /// Advances the system by one time step
    ///
    /// Returns the collisions detected during this step (also appended to
    /// `events()`).
    pub fn step(&mut self) -> &[CollisionEvent] {
        let params = self.parameters.snapshot();
        let dt = params.signed_time_step();

        let accelerations = self
            .strategy
            .as_force_model()
            .accelerations(&self.bodies, &params);
        self.bodies
            .par_iter_mut()
            .zip(accelerations)
            .for_each(|(body, acceleration)| body.acceleration = acceleration);

        self.integrator.advance_all(&mut self.bodies, dt);

        self.step_index += 1;
        let collisions = self.detector.detect(&self.bodies, self.step_index);
        for event in &collisions {
            info!("step {}: {}", self.step_index, event.message);
        }

        let first_new = self.events.len();
        self.events.extend(collisions);

        debug!(
            "step {} ({}, dt {:e} s): {} bodies, {} collisions",
            self.step_index,
            self.strategy.algorithm(),
            dt,
            self.bodies.len(),
            self.events.len() - first_new
        );

        &self.events.as_slice()[first_new..]
    }

    /// Runs `steps` whole steps and returns how many collisions they logged
    pub fn advance(&mut self, steps: u64) -> usize {
        (0..steps).map(|_| self.step().len()).sum()
    }

    /// Zeroes every velocity and acceleration; positions and names stay
    ///
    /// The event log and step counter are left alone.
    pub fn reset(&mut self) {
        for body in &mut self.bodies {
            body.velocity = Vector3::zeros();
            body.acceleration = Vector3::zeros();
        }
        debug!("reset {} bodies to rest", self.bodies.len());
    }

    /// Ordered snapshot of every body, in insertion order
    pub fn state(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(BodySnapshot::from).collect()
    }

    /// Validates and applies a parameter patch to the shared handle
    ///
    /// On error nothing changes.
    pub fn configure(&self, patch: &ConfigPatch) -> Result<SimulationParameters> {
        match self.parameters.apply(patch) {
            Ok(params) => {
                info!("configuration updated: {patch:?}");
                Ok(params)
            }
            Err(err) => {
                warn!("configuration rejected: {err}");
                Err(err)
            }
        }
    }

    /// Current parameter values
    pub fn parameters(&self) -> SimulationParameters {
        self.parameters.snapshot()
    }

    /// The handle this simulator reads from, for sharing with another one
    pub fn parameters_handle(&self) -> &SharedParameters {
        &self.parameters
    }

    /// Gravitational field at `point` using the active strategy
    pub fn field_at(&self, point: Point3<f64>) -> Vector3<f64> {
        let params = self.parameters.snapshot();
        self.strategy
            .as_force_model()
            .field_at(point, &self.bodies, &params)
    }

    /// Samples the field on a regular grid with the active strategy
    ///
    /// # Arguments
    ///
    /// * `center` - Grid centre in metres
    /// * `size` - Edge length covered by the grid in metres
    /// * `resolution` - Points per axis; see [`field::grid_points`] for the layout
    ///
    /// # Returns
    ///
    /// Samples stronger than [`field::MIN_FIELD_MAGNITUDE`], in grid order.
    /// Fails with `GridTooLarge` if `resolution`³ points cannot be allocated.
    pub fn sample_field_grid(
        &self,
        center: Point3<f64>,
        size: f64,
        resolution: usize,
    ) -> Result<Vec<FieldSample>> {
        let params = self.parameters.snapshot();
        field::sample_grid(
            self.strategy.as_force_model(),
            &self.bodies,
            &params,
            center,
            size,
            resolution,
        )
    }

    /// Every collision logged so far, oldest first
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Looks a body up by name
    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Bodies in insertion order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Number of steps taken since creation or the last `clear`
    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    /// The active force strategy
    pub fn algorithm(&self) -> Algorithm {
        self.strategy.algorithm()
    }

    /// Sum of ½·m·v² over every body
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Pairwise potential energy, always computed exactly
    pub fn potential_energy(&self) -> f64 {
        let params = self.parameters.snapshot();
        self.strategy
            .as_force_model()
            .potential_energy(&self.bodies, &params)
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Sum of m·v; constant for an isolated system up to rounding
    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .map(Body::momentum)
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    /// Sum of r × m·v about the origin
    pub fn total_angular_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .map(|b| b.position.coords.cross(&b.momentum()))
            .fold(Vector3::zeros(), |acc, l| acc + l)
    }
}
