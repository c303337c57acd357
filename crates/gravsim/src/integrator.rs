//! Time integration for N-body systems
//!
//! Integrators update one body's kinematics from the acceleration the force
//! pass stored on it. The simulator calls them only after accelerations have
//! been computed for every body, so an integrator never sees a partially
//! updated system.

use rayon::prelude::*;

use crate::body::Body;

/// A per-body time integrator
pub trait Integrator: Send + Sync {
    /// Advance a single body by a signed timestep (seconds)
    ///
    /// `body.acceleration` must already hold the net acceleration for this
    /// step; it is read but not modified.
    fn advance(&self, body: &mut Body, dt: f64);

    /// Advance every body by the same timestep, in parallel
    fn advance_all(&self, bodies: &mut [Body], dt: f64) {
        bodies.par_iter_mut().for_each(|body| self.advance(body, dt));
    }
}

/// Kick-drift-kick update with a single acceleration per step
///
/// 1. Kick: v(t + dt/2) = v(t) + a(t) * dt/2
/// 2. Drift: x(t + dt) = x(t) + v(t + dt/2) * dt
/// 3. Kick: v(t + dt) = v(t + dt/2) + a(t) * dt/2
///
/// The acceleration is not re-evaluated between the two kicks, so within a
/// step this is semi-implicit Euler with a second-order position update. A
/// negative `dt` runs the same update backwards in time.
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::integrator::{Integrator, KickDriftKick};
/// use nalgebra::{Point3, Vector3};
///
/// let mut body = Body::new("probe", 1.0, 0.0, Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
/// body.acceleration = Vector3::new(0.0, 2.0, 0.0);
///
/// KickDriftKick.advance(&mut body, 1.0);
///
/// assert_eq!(body.position, Point3::new(1.0, 1.0, 0.0));
/// assert_eq!(body.velocity, Vector3::new(1.0, 2.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KickDriftKick;

impl Integrator for KickDriftKick {
    fn advance(&self, body: &mut Body, dt: f64) {
        let dt_half = dt / 2.0;

        let half_velocity = body.velocity + body.acceleration * dt_half;
        body.position += half_velocity * dt;
        body.velocity = half_velocity + body.acceleration * dt_half;
    }
}
