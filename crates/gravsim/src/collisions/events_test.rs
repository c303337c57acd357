use serde_json::json;

use crate::collisions::{CollisionEvent, EventLog};

#[test]
fn test_event_json_shape() {
    let event = CollisionEvent::new(3, "Earth", "Moon", 1.5e6);
    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(value["type"], json!("collision"));
    assert_eq!(value["step"], json!(3));
    assert_eq!(value["bodyA"], json!("Earth"));
    assert_eq!(value["bodyB"], json!("Moon"));
    assert_eq!(value["distance"], json!(1.5e6));
    assert!(value["message"].as_str().unwrap().contains("Earth"));

    let back: CollisionEvent = serde_json::from_value(value).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_involves() {
    let event = CollisionEvent::new(1, "a", "b", 0.0);

    assert!(event.involves("a"));
    assert!(event.involves("b"));
    assert!(!event.involves("c"));
}

#[test]
fn test_log_appends_without_deduplication() {
    let mut log = EventLog::new();
    assert!(log.is_empty());

    log.push(CollisionEvent::new(1, "a", "b", 0.5));
    log.extend([
        CollisionEvent::new(2, "a", "b", 0.5),
        CollisionEvent::new(2, "c", "d", 0.1),
    ]);

    assert_eq!(log.len(), 3);
    assert_eq!(log.for_step(2).count(), 2);
    assert_eq!(log.as_slice()[0].step, 1);
    assert_eq!((&log).into_iter().filter(|e| e.involves("a")).count(), 2);

    log.clear();
    assert!(log.is_empty());
}

#[test]
fn test_log_serializes_as_array() {
    let mut log = EventLog::new();
    log.push(CollisionEvent::new(1, "a", "b", 0.5));

    let value = serde_json::to_value(&log).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["bodyA"], json!("a"));
}
