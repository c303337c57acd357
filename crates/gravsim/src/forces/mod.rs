//! Force models for N-body simulations
//!
//! This module provides the `ForceModel` trait and its two implementations:
//! exact pairwise summation and the Barnes-Hut tree approximation. The
//! simulator holds one of them through the `ForceStrategy` tagged variant.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::params::SimulationParameters;

pub mod barnes_hut;
pub mod direct;

#[cfg(test)]
mod barnes_hut_test;

pub use barnes_hut::BarnesHutApproximation;
pub use direct::{DirectSummation, pairwise_force};

/// A source of acceleration on bodies in an N-body system
///
/// Implementations read the body slice as it was at the start of the step and
/// never mutate it; the simulator applies the returned accelerations only
/// after the whole pass has finished.
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::forces::{DirectSummation, ForceModel};
/// use gravsim::params::SimulationParameters;
/// use nalgebra::{Point3, Vector3};
///
/// let bodies = vec![
///     Body::new("a", 1e24, 1.0, Point3::origin(), Vector3::zeros()),
///     Body::new("b", 1e24, 1.0, Point3::new(1e7, 0.0, 0.0), Vector3::zeros()),
/// ];
///
/// let accelerations = DirectSummation.accelerations(&bodies, &SimulationParameters::default());
/// assert!(accelerations[0].x > 0.0);
/// assert!(accelerations[1].x < 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Net acceleration on every body, in slice order
    fn accelerations(&self, bodies: &[Body], params: &SimulationParameters) -> Vec<Vector3<f64>>;

    /// Gravitational field (acceleration of a massless probe) at `point`
    fn field_at(
        &self,
        point: Point3<f64>,
        bodies: &[Body],
        params: &SimulationParameters,
    ) -> Vector3<f64>;

    /// Field at many probe points
    ///
    /// Override when the model can share work across probes.
    fn field_at_points(
        &self,
        points: &[Point3<f64>],
        bodies: &[Body],
        params: &SimulationParameters,
    ) -> Vec<Vector3<f64>> {
        points
            .par_iter()
            .map(|point| self.field_at(*point, bodies, params))
            .collect()
    }

    /// Total gravitational potential energy, each pair counted once
    ///
    /// Always computed directly; tree approximations would blur energy
    /// diagnostics.
    fn potential_energy(&self, bodies: &[Body], params: &SimulationParameters) -> f64 {
        let g = params.gravity_constant;
        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                bodies[i + 1..].iter().filter_map(move |b| {
                    let r = a.distance_to(b);
                    (r > 0.0).then(|| -g * a.mass * b.mass / r)
                })
            })
            .sum()
    }
}

/// Acceleration at `from` caused by a point mass at `toward`
///
/// a = G·M·r / |r|³. Coincident points yield zero rather than ∞/NaN.
#[inline]
pub fn point_mass_acceleration(
    from: &Point3<f64>,
    toward: &Point3<f64>,
    mass: f64,
    gravity_constant: f64,
) -> Vector3<f64> {
    let diff = toward - from;
    let dist_sq = diff.magnitude_squared();
    if dist_sq == 0.0 {
        return Vector3::zeros();
    }
    let dist = dist_sq.sqrt();
    diff * (gravity_constant * mass / (dist_sq * dist))
}

/// Names of the available force strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Exact O(N²) pairwise summation
    #[default]
    #[serde(alias = "direct")]
    Newtonian,
    /// Octree approximation, O(N log N)
    BarnesHut,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Newtonian => "newtonian",
            Algorithm::BarnesHut => "barnes-hut",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newtonian" | "direct" => Ok(Algorithm::Newtonian),
            "barnes-hut" | "barneshut" | "tree" => Ok(Algorithm::BarnesHut),
            other => Err(format!("unknown algorithm `{other}`")),
        }
    }
}

/// The force model a simulator runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceStrategy {
    Direct(DirectSummation),
    BarnesHut(BarnesHutApproximation),
}

impl ForceStrategy {
    pub fn as_force_model(&self) -> &dyn ForceModel {
        match self {
            ForceStrategy::Direct(model) => model,
            ForceStrategy::BarnesHut(model) => model,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            ForceStrategy::Direct(_) => Algorithm::Newtonian,
            ForceStrategy::BarnesHut(_) => Algorithm::BarnesHut,
        }
    }
}

impl From<Algorithm> for ForceStrategy {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Newtonian => ForceStrategy::Direct(DirectSummation),
            Algorithm::BarnesHut => ForceStrategy::BarnesHut(BarnesHutApproximation),
        }
    }
}
