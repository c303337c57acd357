//! Direct N-body gravity (O(N²) implementation)

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::body::Body;
use crate::forces::{ForceModel, point_mass_acceleration};
use crate::params::SimulationParameters;
use crate::vector::VectorExt;

/// Exact pairwise gravitational force computation
///
/// Sums the force from every other body. Pairs whose spheres interpenetrate
/// (centre distance below the sum of radii) contribute nothing, which keeps
/// the force finite during and just after a collision.
///
/// Best for:
/// - Small systems (N < 100)
/// - Reference results for the tree approximation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectSummation;

/// Force exerted on `a` by `b`
///
/// Antisymmetric: `pairwise_force(a, b, g) == -pairwise_force(b, a, g)`, and
/// the radius cutoff applies to both orderings alike.
///
/// # Arguments
///
/// * `a` - Body the force acts on
/// * `b` - Body exerting the force
/// * `gravity_constant` - G in m³ kg⁻¹ s⁻²
///
/// # Returns
///
/// Force on `a` in newtons, zero when the bodies overlap or coincide
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::forces::pairwise_force;
/// use nalgebra::{Point3, Vector3};
///
/// let a = Body::new("a", 2.0, 0.0, Point3::origin(), Vector3::zeros());
/// let b = Body::new("b", 3.0, 0.0, Point3::new(2.0, 0.0, 0.0), Vector3::zeros());
///
/// let f = pairwise_force(&a, &b, 1.0);
/// assert_eq!(f, Vector3::new(1.5, 0.0, 0.0));
/// assert_eq!(pairwise_force(&b, &a, 1.0), -f);
/// ```
pub fn pairwise_force(a: &Body, b: &Body, gravity_constant: f64) -> Vector3<f64> {
    let r = b.position - a.position;
    let distance = r.magnitude();

    if distance == 0.0 || distance < a.radius + b.radius {
        return Vector3::zeros();
    }

    let magnitude = gravity_constant * (a.mass * b.mass) / (distance * distance);
    r.normalize_or_self() * magnitude
}

impl DirectSummation {
    /// Net force on `bodies[idx]` from all the others
    pub fn net_force(&self, idx: usize, bodies: &[Body], gravity_constant: f64) -> Vector3<f64> {
        let body = &bodies[idx];
        bodies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != idx)
            .map(|(_, other)| pairwise_force(body, other, gravity_constant))
            .fold(Vector3::zeros(), |acc, f| acc + f)
    }
}

impl ForceModel for DirectSummation {
    fn accelerations(&self, bodies: &[Body], params: &SimulationParameters) -> Vec<Vector3<f64>> {
        (0..bodies.len())
            .into_par_iter()
            .map(|i| self.net_force(i, bodies, params.gravity_constant) / bodies[i].mass)
            .collect()
    }

    fn field_at(
        &self,
        point: Point3<f64>,
        bodies: &[Body],
        params: &SimulationParameters,
    ) -> Vector3<f64> {
        // A probe inside a body's radius gets no contribution from it,
        // matching the pairwise cutoff for a zero-radius probe.
        bodies
            .iter()
            .filter(|body| (body.position - point).magnitude() >= body.radius)
            .map(|body| {
                point_mass_acceleration(&point, &body.position, body.mass, params.gravity_constant)
            })
            .fold(Vector3::zeros(), |acc, a| acc + a)
    }
}
