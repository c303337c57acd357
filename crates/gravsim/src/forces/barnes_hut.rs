//! Tree-based gravity using the Barnes-Hut algorithm (O(N log N))

use log::{trace, warn};
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::body::Body;
use crate::forces::ForceModel;
use crate::octree::Octree;
use crate::params::SimulationParameters;

/// Barnes-Hut octree gravitational force computation
///
/// Every call builds a fresh octree rooted at the origin with half-size
/// `universe_size`, queries it once per body in parallel and drops it.
///
/// # Opening threshold (θ)
///
/// `barnes_hut_theta` controls the accuracy/speed tradeoff:
/// - θ = 0.0: every cell is opened, exact (same as direct summation
///   apart from the radius cutoff)
/// - θ = 0.5: high accuracy, moderately fast (default)
/// - θ = 1.0: lower accuracy, faster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BarnesHutApproximation;

impl BarnesHutApproximation {
    fn build_tree<'a>(&self, bodies: &'a [Body], params: &SimulationParameters) -> Octree<'a> {
        let tree = Octree::build(bodies, Point3::origin(), params.universe_size);

        let outside = tree.out_of_bounds();
        if outside > 0 {
            warn!(
                "{outside} bodies lie outside the Barnes-Hut root cube (half-size {:e} m)",
                params.universe_size
            );
        }
        trace!(
            "octree built: {} bodies, {} nodes, depth {}",
            bodies.len(),
            tree.node_count(),
            tree.depth()
        );

        tree
    }
}

impl ForceModel for BarnesHutApproximation {
    fn accelerations(&self, bodies: &[Body], params: &SimulationParameters) -> Vec<Vector3<f64>> {
        if bodies.is_empty() {
            return Vec::new();
        }

        let tree = self.build_tree(bodies, params);
        let (theta, g) = (params.barnes_hut_theta, params.gravity_constant);

        bodies
            .par_iter()
            .map(|body| tree.force_on(body, theta, g) / body.mass)
            .collect()
    }

    fn field_at(
        &self,
        point: Point3<f64>,
        bodies: &[Body],
        params: &SimulationParameters,
    ) -> Vector3<f64> {
        if bodies.is_empty() {
            return Vector3::zeros();
        }

        let tree = self.build_tree(bodies, params);
        tree.acceleration_at(point, None, params.barnes_hut_theta, params.gravity_constant)
    }

    fn field_at_points(
        &self,
        points: &[Point3<f64>],
        bodies: &[Body],
        params: &SimulationParameters,
    ) -> Vec<Vector3<f64>> {
        if bodies.is_empty() {
            return vec![Vector3::zeros(); points.len()];
        }

        let tree = self.build_tree(bodies, params);
        let (theta, g) = (params.barnes_hut_theta, params.gravity_constant);

        points
            .par_iter()
            .map(|point| tree.acceleration_at(*point, None, theta, g))
            .collect()
    }
}
