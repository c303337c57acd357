//! Collision detection for N-body systems
//!
//! Overlapping pairs are detected after each integration pass and recorded as
//! events. There is no physical response: bodies pass through each other.

pub mod detection;
pub mod events;

#[cfg(test)]
mod events_test;

pub use detection::{CollisionDetector, DirectDetector};
pub use events::{CollisionEvent, EventKind, EventLog};
