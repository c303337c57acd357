use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::vector::{
    is_finite, point_from_array, point_to_array, vector_from_array, vector_to_array,
};

/// A gravitating sphere tracked by the simulator
///
/// Identity is the `name`, which is unique within one simulator. All
/// quantities are SI: kilograms, metres, metres per second.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub mass: f64,                  // kg
    pub radius: f64,                // m (collision and near-field cutoff)
    pub position: Point3<f64>,      // m
    pub velocity: Vector3<f64>,     // m/s
    pub acceleration: Vector3<f64>, // m/s², most recent force pass only
}

impl Body {
    /// Creates a body at rest acceleration-wise
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::body::Body;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let earth = Body::new(
    ///     "Earth",
    ///     5.972e24,
    ///     6.371e6,
    ///     Point3::new(1.496e11, 0.0, 0.0),
    ///     Vector3::new(0.0, 2.978e4, 0.0),
    /// );
    /// assert_eq!(earth.acceleration, Vector3::zeros());
    /// ```
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> Self {
        Body {
            name: name.into(),
            mass,
            radius,
            position,
            velocity,
            acceleration: Vector3::zeros(),
        }
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// True when the two spheres interpenetrate (centre distance below the sum of radii)
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot::from(self)
    }
}

/// The data required to construct a body
///
/// Exactly `{name, mass, radius, position, velocity}`; acceleration is never
/// part of the input and always starts at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodySpec {
    pub name: String,
    pub mass: f64,
    pub radius: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl BodySpec {
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: [f64; 3],
        velocity: [f64; 3],
    ) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
            position,
            velocity,
        }
    }

    /// Builds the body, rejecting non-finite numbers and a zero mass
    ///
    /// Finite but physically odd values (a negative mass, say) pass through
    /// untouched; the engine propagates whatever they produce.
    pub fn into_body(self) -> Result<Body> {
        let position = point_from_array(self.position);
        let velocity = vector_from_array(self.velocity);

        let reason = if !self.mass.is_finite() {
            Some("mass is not finite")
        } else if self.mass == 0.0 {
            Some("mass is zero")
        } else if !self.radius.is_finite() {
            Some("radius is not finite")
        } else if !is_finite(&position.coords) {
            Some("position is not finite")
        } else if !is_finite(&velocity) {
            Some("velocity is not finite")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(SimulationError::InvalidBody {
                name: self.name,
                reason: reason.to_string(),
            });
        }

        Ok(Body::new(self.name, self.mass, self.radius, position, velocity))
    }
}

/// Serialisable read view of a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub name: String,
    pub mass: f64,
    pub radius: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub acceleration: [f64; 3],
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            name: body.name.clone(),
            mass: body.mass,
            radius: body.radius,
            position: point_to_array(&body.position),
            velocity: vector_to_array(&body.velocity),
            acceleration: vector_to_array(&body.acceleration),
        }
    }
}
