//! Pairwise overlap detection
//!
//! A pair collides when the distance between centres is below the sum of
//! radii. Detection only: nothing here changes a body.

use rayon::prelude::*;

use crate::body::Body;
use crate::collisions::CollisionEvent;

/// Check if a pair of bodies overlaps
fn check_pair(a: &Body, b: &Body, step: u64) -> Option<CollisionEvent> {
    let distance = a.distance_to(b);

    if distance < a.radius + b.radius {
        Some(CollisionEvent::new(step, &a.name, &b.name, distance))
    } else {
        None
    }
}

/// Collision detector trait
pub trait CollisionDetector: Send + Sync {
    /// Detect every overlapping pair among `bodies`
    ///
    /// Each unordered pair is reported at most once, with `body_a` the one
    /// that comes first in the slice. `step` is stamped on the events.
    fn detect(&self, bodies: &[Body], step: u64) -> Vec<CollisionEvent>;
}

/// Direct O(N²) collision detector
///
/// Checks every pair `(i, j)` with `i < j`. Rows are scanned in parallel and
/// collected in order, so the output is the same as a sequential scan.
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::collisions::{CollisionDetector, DirectDetector};
/// use nalgebra::{Point3, Vector3};
///
/// let bodies = vec![
///     Body::new("a", 1.0, 2.0, Point3::origin(), Vector3::zeros()),
///     Body::new("b", 1.0, 2.0, Point3::new(3.0, 0.0, 0.0), Vector3::zeros()),
///     Body::new("c", 1.0, 2.0, Point3::new(100.0, 0.0, 0.0), Vector3::zeros()),
/// ];
///
/// let events = DirectDetector.detect(&bodies, 7);
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].body_a, "a");
/// assert_eq!(events[0].body_b, "b");
/// assert_eq!(events[0].step, 7);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectDetector;

impl CollisionDetector for DirectDetector {
    fn detect(&self, bodies: &[Body], step: u64) -> Vec<CollisionEvent> {
        let n = bodies.len();

        (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                ((i + 1)..n).filter_map(move |j| check_pair(&bodies[i], &bodies[j], step))
            })
            .collect()
    }
}
