use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::body::Body;
use crate::forces::{DirectSummation, point_mass_acceleration};
use crate::octree::{NodeId, Octree};

fn body_at(name: &str, mass: f64, x: f64, y: f64, z: f64) -> Body {
    Body::new(name, mass, 0.0, Point3::new(x, y, z), Vector3::zeros())
}

fn random_bodies(count: usize, seed: u64, extent: f64) -> Vec<Body> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            body_at(
                &format!("body-{i}"),
                rng.random_range(1.0..100.0),
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
            )
        })
        .collect()
}

#[test]
fn test_empty_tree() {
    let bodies: Vec<Body> = vec![];
    let tree = Octree::build(&bodies, Point3::origin(), 10.0);

    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.total_mass(), 0.0);
    assert!(tree.root().is_leaf());

    let accel = tree.acceleration_at(Point3::new(1.0, 0.0, 0.0), None, 0.5, 1.0);
    assert_eq!(accel, Vector3::zeros());
}

#[test]
fn test_single_body_stays_in_root() {
    let bodies = vec![body_at("a", 2.0, 1.0, 2.0, 3.0)];
    let tree = Octree::build(&bodies, Point3::origin(), 10.0);

    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.root().residents(), &[0]);
    assert_eq!(tree.center_of_mass(), Point3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_second_body_subdivides() {
    let bodies = vec![
        body_at("a", 1.0, -1.0, -1.0, -1.0),
        body_at("b", 3.0, 1.0, 1.0, 1.0),
    ];
    let tree = Octree::build(&bodies, Point3::origin(), 10.0);

    assert_eq!(tree.node_count(), 9);
    let root = tree.root();
    assert!(!root.is_leaf());
    assert!(root.residents().is_empty());

    let children = root.children().unwrap();
    assert_eq!(tree.node(children[0]).residents(), &[0]);
    assert_eq!(tree.node(children[7]).residents(), &[1]);
    assert_eq!(tree.node(children[7]).center, Point3::new(5.0, 5.0, 5.0));
    assert_eq!(tree.node(children[7]).size, 5.0);

    // COM = (-1 * 1 + 1 * 3) / 4 = 0.5 on each axis
    assert_relative_eq!(tree.center_of_mass(), Point3::new(0.5, 0.5, 0.5));
}

#[test]
fn test_octant_bits() {
    let bodies: Vec<Body> = vec![];
    let tree = Octree::build(&bodies, Point3::origin(), 1.0);
    let root = tree.root();

    assert_eq!(root.octant(&Point3::new(-0.5, -0.5, -0.5)), 0);
    assert_eq!(root.octant(&Point3::new(0.5, -0.5, -0.5)), 1);
    assert_eq!(root.octant(&Point3::new(-0.5, 0.5, -0.5)), 2);
    assert_eq!(root.octant(&Point3::new(-0.5, -0.5, 0.5)), 4);
    assert_eq!(root.octant(&Point3::new(0.5, 0.5, 0.5)), 7);
    // On the plane counts as the negative side
    assert_eq!(root.octant(&Point3::new(0.0, 0.0, 0.0)), 0);
}

#[test]
fn test_root_mass_is_sum_of_masses() {
    for (seed, count) in [(1, 2), (2, 17), (3, 250)] {
        let bodies = random_bodies(count, seed, 1_000.0);
        let tree = Octree::build(&bodies, Point3::origin(), 1_000.0);

        let expected: f64 = bodies.iter().map(|b| b.mass).sum();
        assert_relative_eq!(tree.total_mass(), expected, max_relative = 1e-12);

        let weighted = bodies
            .iter()
            .fold(Vector3::zeros(), |acc, b| acc + b.position.coords * b.mass);
        assert_relative_eq!(
            tree.center_of_mass().coords,
            weighted / expected,
            epsilon = 1e-6,
            max_relative = 1e-9
        );
    }
}

#[test]
fn test_coincident_bodies_terminate() {
    let bodies = vec![body_at("a", 1.0, 1.0, 1.0, 1.0), body_at("b", 1.0, 1.0, 1.0, 1.0)];
    let tree = Octree::build(&bodies, Point3::origin(), 10.0);

    assert_eq!(tree.total_mass(), 2.0);
    assert!(tree.depth() > 0);

    // Each feels nothing from the other at zero distance
    let force = tree.force_on(&bodies[0], 0.5, 1.0);
    assert_eq!(force, Vector3::zeros());
}

#[test]
fn test_self_force_excluded() {
    let bodies = vec![body_at("only", 5.0, 3.0, 0.0, 0.0)];
    let tree = Octree::build(&bodies, Point3::origin(), 10.0);

    assert_eq!(tree.force_on(&bodies[0], 0.5, 1.0), Vector3::zeros());
}

#[test]
fn test_two_body_force_is_exact() {
    let bodies = vec![body_at("a", 4.0, 0.0, 0.0, 0.0), body_at("b", 1.0, 2.0, 0.0, 0.0)];
    let tree = Octree::build(&bodies, Point3::new(0.5, 0.5, 0.5), 10.0);

    // F = G m_a m_b / d² = 4 / 4 = 1
    let force = tree.force_on(&bodies[1], 0.5, 1.0);
    assert_relative_eq!(force, Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn test_far_cluster_approximated_as_point_mass() {
    // Tight cluster far from the probe: with a large θ the whole tree
    // collapses into its center of mass
    let bodies = vec![
        body_at("a", 1.0, 1.0, 1.0, 1.0),
        body_at("b", 1.0, 2.0, 2.0, 2.0),
    ];
    let tree = Octree::build(&bodies, Point3::origin(), 4.0);
    let probe = Point3::new(1_000.0, 0.0, 0.0);

    let approximate = tree.acceleration_at(probe, None, 1.0, 1.0);
    let expected = point_mass_acceleration(&probe, &tree.center_of_mass(), 2.0, 1.0);
    assert_eq!(approximate, expected);
}

#[test]
fn test_zero_theta_matches_direct_sum() {
    let bodies = random_bodies(40, 7, 100.0);
    let tree = Octree::build(&bodies, Point3::origin(), 100.0);

    for (i, body) in bodies.iter().enumerate() {
        let exact = DirectSummation.net_force(i, &bodies, 1.0);
        let approximate = tree.force_on(body, 0.0, 1.0);
        assert_relative_eq!(approximate, exact, epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
fn test_probe_at_body_position_is_finite() {
    let bodies = vec![body_at("a", 1.0, 1.0, 0.0, 0.0), body_at("b", 1.0, -1.0, 0.0, 0.0)];
    let tree = Octree::build(&bodies, Point3::origin(), 10.0);

    let accel = tree.acceleration_at(Point3::new(1.0, 0.0, 0.0), None, 0.5, 1.0);
    assert!(accel.iter().all(|c| c.is_finite()));
    // Only b contributes: 1 / 2² toward -x
    assert_relative_eq!(accel, Vector3::new(-0.25, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn test_out_of_bounds_still_counted() {
    let bodies = vec![body_at("in", 1.0, 1.0, 0.0, 0.0), body_at("out", 2.0, 50.0, 0.0, 0.0)];
    let tree = Octree::build(&bodies, Point3::origin(), 10.0);

    assert_eq!(tree.out_of_bounds(), 1);
    assert_eq!(tree.total_mass(), 3.0);
    assert_eq!(tree.node(NodeId::ROOT).total_mass, 3.0);
}

#[test]
fn test_body_outside_root_ignores_own_mass() {
    // Root half-size 1: the far body sits well outside and the root passes θ
    let bodies = vec![
        body_at("near", 1.0, 0.0, 0.0, 0.0),
        body_at("far", 1.0, 10.0, 0.0, 0.0),
    ];
    let tree = Octree::build(&bodies, Point3::origin(), 1.0);
    assert_eq!(tree.out_of_bounds(), 1);

    let far = tree.acceleration_at(bodies[1].position, Some("far"), 0.5, 1.0);
    assert_relative_eq!(far.x, -0.01, max_relative = 1e-12);
    assert_eq!(far.y, 0.0);

    let near = tree.acceleration_at(bodies[0].position, Some("near"), 0.5, 1.0);
    assert_relative_eq!(near.x, 0.01, max_relative = 1e-12);

    // Without a resident to exclude the root is still a valid aggregate
    let probe = tree.acceleration_at(Point3::new(20.0, 0.0, 0.0), None, 0.5, 1.0);
    assert_relative_eq!(probe.x, -2.0 / 225.0, max_relative = 1e-12);
}
