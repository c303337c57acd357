//! Gravitational field sampling on a regular 3D grid
//!
//! The grid has `resolution` points per axis spaced `size / resolution` apart.
//! Index `i` maps to `center + (i - resolution / 2) * step` with integer
//! halving, so for even resolutions the grid is shifted half a cell toward
//! the negative corner.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::{Result, SimulationError};
use crate::forces::ForceModel;
use crate::params::SimulationParameters;
use crate::vector::{point_to_array, vector_to_array};

/// Samples weaker than this are dropped from grid output
pub const MIN_FIELD_MAGNITUDE: f64 = 1e-10;

/// The field at one probe point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    pub position: [f64; 3],
    pub field: [f64; 3],
    pub magnitude: f64,
}

/// Grid probe positions, x-major then y then z
///
/// # Arguments
///
/// * `center` - Grid centre in metres
/// * `size` - Edge length covered by the grid in metres
/// * `resolution` - Points per axis; 0 gives an empty grid
///
/// # Returns
///
/// `resolution`³ points, or `GridTooLarge` when that count cannot be allocated
///
/// # Examples
///
/// ```
/// use gravsim::field::grid_points;
/// use nalgebra::Point3;
///
/// let points = grid_points(Point3::origin(), 4.0, 2).unwrap();
/// assert_eq!(points.len(), 8);
/// assert_eq!(points[0], Point3::new(-2.0, -2.0, -2.0));
/// assert_eq!(points[1], Point3::new(-2.0, -2.0, 0.0));
/// assert_eq!(points[7], Point3::new(0.0, 0.0, 0.0));
/// ```
pub fn grid_points(center: Point3<f64>, size: f64, resolution: usize) -> Result<Vec<Point3<f64>>> {
    if resolution == 0 {
        return Ok(Vec::new());
    }

    let too_large = || SimulationError::GridTooLarge { resolution };
    let count = resolution.checked_pow(3).ok_or_else(too_large)?;
    let mut points = Vec::new();
    points.try_reserve_exact(count).map_err(|_| too_large())?;

    let step = size / resolution as f64;
    let half = (resolution / 2) as f64;
    let offset = |i: usize| (i as f64 - half) * step;

    for ix in 0..resolution {
        for iy in 0..resolution {
            for iz in 0..resolution {
                points.push(Point3::new(
                    center.x + offset(ix),
                    center.y + offset(iy),
                    center.z + offset(iz),
                ));
            }
        }
    }
    Ok(points)
}

/// Evaluates `model` over the grid, keeping samples above `MIN_FIELD_MAGNITUDE`
///
/// Fails only when the grid itself is too large; see [`grid_points`].
pub fn sample_grid(
    model: &dyn ForceModel,
    bodies: &[Body],
    params: &SimulationParameters,
    center: Point3<f64>,
    size: f64,
    resolution: usize,
) -> Result<Vec<FieldSample>> {
    let points = grid_points(center, size, resolution)?;
    let fields = model.field_at_points(&points, bodies, params);

    let samples = points
        .iter()
        .zip(fields)
        .filter_map(|(point, field)| {
            let magnitude = field.magnitude();
            (magnitude > MIN_FIELD_MAGNITUDE).then(|| FieldSample {
                position: point_to_array(point),
                field: vector_to_array(&field),
                magnitude,
            })
        })
        .collect();
    Ok(samples)
}
