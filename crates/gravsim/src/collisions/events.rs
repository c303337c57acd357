//! Collision events and the append-only log that holds them

use serde::{Deserialize, Serialize};

/// Discriminator for logged events; serialised under the `type` key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Collision,
}

/// A detected overlap between two bodies
///
/// Serialises as
/// `{"type":"collision","step":3,"bodyA":"a","bodyB":"b","distance":1.5,"message":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Step index during which the overlap was observed (1-based)
    pub step: u64,
    pub body_a: String,
    pub body_b: String,
    /// Centre distance at detection time (m)
    pub distance: f64,
    pub message: String,
}

impl CollisionEvent {
    pub fn new(step: u64, body_a: &str, body_b: &str, distance: f64) -> Self {
        CollisionEvent {
            kind: EventKind::Collision,
            step,
            body_a: body_a.to_owned(),
            body_b: body_b.to_owned(),
            distance,
            message: format!("collision between {body_a} and {body_b} at {distance:.3e} m"),
        }
    }

    /// Whether `name` is one of the two participants
    pub fn involves(&self, name: &str) -> bool {
        self.body_a == name || self.body_b == name
    }
}

/// Unbounded, append-only record of events in detection order
///
/// Appends are serialised by `&mut` access; there is no deduplication, so a
/// pair that stays overlapped is logged once per step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<CollisionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CollisionEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = CollisionEvent>) {
        self.events.extend(events);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollisionEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[CollisionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events recorded during a given step
    pub fn for_step(&self, step: u64) -> impl Iterator<Item = &CollisionEvent> {
        self.events.iter().filter(move |e| e.step == step)
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a CollisionEvent;
    type IntoIter = std::slice::Iter<'a, CollisionEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
