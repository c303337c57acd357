//! Ready-made initial conditions

use crate::body::BodySpec;

/// (name, mass kg, radius m, orbital radius m, circular speed m/s)
const SOLAR_SYSTEM: [(&str, f64, f64, f64, f64); 9] = [
    ("Sun", 1.989e30, 696_340_000.0, 0.0, 0.0),
    ("Mercury", 3.285e23, 2_439_700.0, 57.9e9, 47.87e3),
    ("Venus", 4.867e24, 6_051_800.0, 108.2e9, 35.02e3),
    ("Earth", 5.972e24, 6_371_000.0, 149.6e9, 29.78e3),
    ("Mars", 6.39e23, 3_389_500.0, 227.9e9, 24.077e3),
    ("Jupiter", 1.898e27, 69_911_000.0, 778.5e9, 13.07e3),
    ("Saturn", 5.683e26, 58_232_000.0, 1.434e12, 9.68e3),
    ("Uranus", 8.681e25, 25_362_000.0, 2.871e12, 6.80e3),
    ("Neptune", 1.024e26, 24_622_000.0, 4.495e12, 5.43e3),
];

/// The Sun and the eight planets
///
/// Planets start on the +x axis at their mean orbital radius, moving in +y
/// at their mean orbital speed, all in the z = 0 plane. The outer three lie
/// beyond the default Barnes-Hut root cube (half-size 1e12 m); raise
/// `universeSize` to about 5e12 when running this preset under Barnes-Hut.
///
/// # Examples
///
/// ```
/// use gravsim::presets::solar_system;
///
/// let bodies = solar_system();
/// assert_eq!(bodies.len(), 9);
/// assert_eq!(bodies[0].name, "Sun");
/// assert_eq!(bodies[3].name, "Earth");
/// ```
pub fn solar_system() -> Vec<BodySpec> {
    SOLAR_SYSTEM
        .iter()
        .map(|&(name, mass, radius, distance, speed)| {
            BodySpec::new(name, mass, radius, [distance, 0.0, 0.0], [0.0, speed, 0.0])
        })
        .collect()
}

/// Universe half-size that comfortably contains `solar_system()`
pub const SOLAR_SYSTEM_EXTENT: f64 = 5e12;
