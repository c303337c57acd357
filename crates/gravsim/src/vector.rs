//! Vector helpers on top of nalgebra.
//!
//! Positions are `Point3<f64>` and every other kinematic quantity (velocity,
//! acceleration, force, field) is a `Vector3<f64>`. nalgebra already provides
//! addition, subtraction, scaling and the Euclidean norm; this module adds the
//! zero-safe normalisation the force laws rely on and the `[x, y, z]` array
//! conversions used by the serialisable types.

use nalgebra::{Point3, Vector3};

/// Zero-safe vector operations
pub trait VectorExt {
    /// Returns the unit vector, or `self` unchanged when the magnitude is zero
    ///
    /// nalgebra's `normalize` divides by the norm and yields NaN for the zero
    /// vector; the force laws need the zero vector back instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::vector::VectorExt;
    /// use nalgebra::Vector3;
    ///
    /// let v = Vector3::new(3.0, 0.0, 4.0).normalize_or_self();
    /// assert!((v.magnitude() - 1.0).abs() < 1e-12);
    ///
    /// let zero = Vector3::<f64>::zeros().normalize_or_self();
    /// assert_eq!(zero, Vector3::zeros());
    /// ```
    fn normalize_or_self(&self) -> Self;
}

impl VectorExt for Vector3<f64> {
    fn normalize_or_self(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude > 0.0 { self / magnitude } else { *self }
    }
}

/// Converts a `[x, y, z]` array into a point
pub fn point_from_array(xyz: [f64; 3]) -> Point3<f64> {
    Point3::new(xyz[0], xyz[1], xyz[2])
}

/// Converts a `[x, y, z]` array into a vector
pub fn vector_from_array(xyz: [f64; 3]) -> Vector3<f64> {
    Vector3::new(xyz[0], xyz[1], xyz[2])
}

pub fn point_to_array(p: &Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

pub fn vector_to_array(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

/// Returns true when every component is finite
pub fn is_finite(v: &Vector3<f64>) -> bool {
    v.iter().all(|c| c.is_finite())
}
