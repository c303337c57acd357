//! Gravitational N-body engine
//!
//! Bodies are advanced in discrete steps under one of two interchangeable
//! force strategies: exact pairwise summation or a Barnes-Hut octree
//! approximation. Each step computes every acceleration, integrates every
//! body with a kick-drift-kick update, then records overlapping pairs as
//! collision events. All quantities are SI.

pub mod body;
pub mod collisions;
pub mod error;
pub mod field;
pub mod forces;
pub mod integrator;
pub mod octree;
pub mod params;
pub mod presets;
pub mod simulator;
pub mod vector;

#[cfg(test)]
mod integrator_test;
#[cfg(test)]
mod octree_test;

pub use body::{Body, BodySnapshot, BodySpec};
pub use error::SimulationError;
pub use forces::Algorithm;
pub use params::{ConfigPatch, SharedParameters, SimulationParameters};
pub use simulator::Simulator;
