use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::body::Body;
use crate::forces::{BarnesHutApproximation, DirectSummation, ForceModel};
use crate::params::SimulationParameters;

fn params_with_theta(theta: f64) -> SimulationParameters {
    SimulationParameters {
        barnes_hut_theta: theta,
        universe_size: 1e11,
        ..Default::default()
    }
}

/// A few clumps of point bodies, so that distant cells are worth approximating
fn clustered_bodies(seed: u64) -> Vec<Body> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut bodies = Vec::new();

    for cluster in 0..4 {
        let centre = Vector3::new(
            rng.random_range(-5e10..5e10),
            rng.random_range(-5e10..5e10),
            rng.random_range(-5e10..5e10),
        );
        for i in 0..25 {
            let offset = Vector3::new(
                rng.random_range(-5e9..5e9),
                rng.random_range(-5e9..5e9),
                rng.random_range(-5e9..5e9),
            );
            bodies.push(Body::new(
                format!("c{cluster}-{i}"),
                rng.random_range(1e22..1e26),
                0.0,
                Point3::from(centre + offset),
                Vector3::zeros(),
            ));
        }
    }

    bodies
}

fn mean_relative_error(seed: u64, theta: f64) -> f64 {
    let bodies = clustered_bodies(seed);
    let params = params_with_theta(theta);

    let exact = DirectSummation.accelerations(&bodies, &params);
    let approximate = BarnesHutApproximation.accelerations(&bodies, &params);

    exact
        .iter()
        .zip(&approximate)
        .map(|(e, a)| (a - e).magnitude() / e.magnitude())
        .sum::<f64>()
        / bodies.len() as f64
}

#[test]
fn test_empty_system() {
    let params = SimulationParameters::default();

    assert!(BarnesHutApproximation.accelerations(&[], &params).is_empty());
    assert_eq!(
        BarnesHutApproximation.field_at(Point3::origin(), &[], &params),
        Vector3::zeros()
    );
}

#[test]
fn test_single_body_feels_nothing() {
    let bodies = vec![Body::new("lonely", 1e24, 1.0, Point3::new(1e9, 0.0, 0.0), Vector3::zeros())];
    let accelerations =
        BarnesHutApproximation.accelerations(&bodies, &SimulationParameters::default());

    assert_eq!(accelerations, vec![Vector3::zeros()]);
}

#[test]
fn test_sun_earth_matches_direct() {
    let bodies = vec![
        Body::new("Sun", 1.989e30, 6.9634e8, Point3::origin(), Vector3::zeros()),
        Body::new("Earth", 5.972e24, 6.371e6, Point3::new(1.496e11, 0.0, 0.0), Vector3::zeros()),
    ];
    let params = SimulationParameters::default();

    let tree = BarnesHutApproximation.accelerations(&bodies, &params);
    let direct = DirectSummation.accelerations(&bodies, &params);

    assert!(tree[1].x < 0.0);
    assert_relative_eq!(tree[1], direct[1], max_relative = 1e-12);
    assert_relative_eq!(tree[0], direct[0], max_relative = 1e-12);
}

#[test]
fn test_converges_to_direct_as_theta_shrinks() {
    for seed in 0..3 {
        assert!(mean_relative_error(seed, 0.0) < 1e-10);
        assert!(mean_relative_error(seed, 0.1) < 1e-2);
    }
}

#[test]
fn test_error_grows_with_theta() {
    let thetas = [0.0, 0.2, 1.0];
    let seeds = [0u64, 1, 2, 3, 4];

    let mean_errors: Vec<f64> = thetas
        .iter()
        .map(|&theta| {
            seeds.iter().map(|&seed| mean_relative_error(seed, theta)).sum::<f64>()
                / seeds.len() as f64
        })
        .collect();

    for pair in mean_errors.windows(2) {
        assert!(pair[0] <= pair[1], "errors not monotone: {mean_errors:?}");
    }
}

#[test]
fn test_field_points_match_single_queries() {
    let bodies = clustered_bodies(9);
    let params = params_with_theta(0.5);
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(3e10, -2e10, 1e10),
        Point3::new(-8e10, 8e10, 0.0),
    ];

    let batch = BarnesHutApproximation.field_at_points(&points, &bodies, &params);
    for (point, field) in points.iter().zip(&batch) {
        let single = BarnesHutApproximation.field_at(*point, &bodies, &params);
        assert_eq!(*field, single);
    }
}

#[test]
fn test_field_close_to_direct_far_away() {
    let bodies = clustered_bodies(4);
    let params = params_with_theta(0.3);
    let probe = Point3::new(9e10, 9e10, 9e10);

    let tree = BarnesHutApproximation.field_at(probe, &bodies, &params);
    let direct = DirectSummation.field_at(probe, &bodies, &params);

    assert!((tree - direct).magnitude() / direct.magnitude() < 1e-2);
}
