use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::Body;
use crate::integrator::{Integrator, KickDriftKick};

fn moving_body() -> Body {
    let mut body = Body::new(
        "probe",
        10.0,
        1.0,
        Point3::new(1.0, 2.0, 3.0),
        Vector3::new(4.0, -1.0, 0.5),
    );
    body.acceleration = Vector3::new(0.5, 0.0, -2.0);
    body
}

#[test]
fn test_kick_drift_kick_update() {
    let mut body = moving_body();
    let dt = 2.0;

    KickDriftKick.advance(&mut body, dt);

    // half_v = v + a dt/2 = (4.5, -1, -1.5)
    // p' = p + half_v dt = (10, 0, 0)
    // v' = half_v + a dt/2 = (5, -1, -3.5)
    assert_relative_eq!(body.position, Point3::new(10.0, 0.0, 0.0));
    assert_relative_eq!(body.velocity, Vector3::new(5.0, -1.0, -3.5));
}

#[test]
fn test_acceleration_untouched() {
    let mut body = moving_body();
    let before = body.acceleration;

    KickDriftKick.advance(&mut body, 0.1);

    assert_eq!(body.acceleration, before);
}

#[test]
fn test_zero_acceleration_is_straight_line() {
    let mut body = Body::new(
        "drifter",
        1.0,
        0.0,
        Point3::origin(),
        Vector3::new(3.0, 0.0, 0.0),
    );

    for _ in 0..10 {
        KickDriftKick.advance(&mut body, 0.5);
    }

    assert_relative_eq!(body.position, Point3::new(15.0, 0.0, 0.0));
    assert_eq!(body.velocity, Vector3::new(3.0, 0.0, 0.0));
}

#[test]
fn test_negative_timestep_reverses_drift() {
    let mut forward = Body::new("f", 1.0, 0.0, Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
    let mut backward = forward.clone();

    KickDriftKick.advance(&mut forward, 10.0);
    KickDriftKick.advance(&mut backward, -10.0);

    assert_eq!(forward.position.x, 10.0);
    assert_eq!(backward.position.x, -10.0);
}

#[test]
fn test_advance_all_matches_individual_updates() {
    let bodies: Vec<Body> = (0..16)
        .map(|i| {
            let mut body = Body::new(
                format!("b{i}"),
                1.0,
                0.0,
                Point3::new(i as f64, 0.0, 0.0),
                Vector3::new(0.0, i as f64, 0.0),
            );
            body.acceleration = Vector3::new(0.0, 0.0, -(i as f64));
            body
        })
        .collect();

    let mut parallel = bodies.clone();
    KickDriftKick.advance_all(&mut parallel, 0.25);

    for (mut expected, actual) in bodies.into_iter().zip(&parallel) {
        KickDriftKick.advance(&mut expected, 0.25);
        assert_eq!(&expected, actual);
    }
}
