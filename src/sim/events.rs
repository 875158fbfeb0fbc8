//! Gameplay events and the bus that pushes them to outside observers
//!
//! Inside the simulation, components react to each other through direct
//! dispatch in `GameState`. Every signal is also appended to the frame's
//! event log in the order it was raised, and the log is what external sinks
//! (HUD text, material tint, audio) get to see.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::trash::{TrashId, TrashVariant};

/// Scene changes the simulation can ask the host for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneRequest {
    /// Pollution saturated, show the loss scene
    Loss,
    /// Reload the current scene (round restart)
    Reload,
}

impl SceneRequest {
    /// Scene name understood by the host's scene loader
    pub fn scene_name(&self) -> &'static str {
        match self {
            SceneRequest::Loss => "LossScene",
            SceneRequest::Reload => "GameScene",
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Round (re)started
    RoundStarted { seed: u64 },
    /// Spawner created a trash item
    TrashSpawned {
        trash: TrashId,
        variant: TrashVariant,
        pos: Vec2,
    },
    /// Squid attached a trash item
    TrashPickedUp { trash: TrashId },
    /// Squid let go of a trash item
    TrashDropped { trash: TrashId, impulse: Vec2 },
    /// Trash landed in the boat
    TrashDelivered { trash: TrashId },
    /// Squid thrust impulse applied (world space)
    ThrustFired { impulse: Vec2 },
    /// Pollution level written (sent on every write, even if unchanged)
    PollutionSet { level: i32 },
    /// Host should change scene
    SceneRequested(SceneRequest),
}

/// Observer of gameplay events
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Handle returned by `EventBus::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u32);

/// Ordered list of subscribers. Delivery order is registration order.
#[derive(Default)]
pub struct EventBus {
    sinks: Vec<(SinkId, Box<dyn EventSink>)>,
    next_id: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, sink: impl EventSink + 'static) -> SinkId {
        let id = SinkId(self.next_id);
        self.next_id += 1;
        self.sinks.push((id, Box::new(sink)));
        id
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SinkId) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(sink_id, _)| *sink_id != id);
        self.sinks.len() != before
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver one event to every subscriber, synchronously
    pub fn publish(&mut self, event: &GameEvent) {
        for (_, sink) in self.sinks.iter_mut() {
            sink.on_event(event);
        }
    }

    /// Deliver a batch in order
    pub fn publish_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.publish(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_delivery_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut bus = EventBus::new();
        let first = Rc::clone(&log);
        bus.subscribe(move |_: &GameEvent| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        bus.subscribe(move |_: &GameEvent| second.borrow_mut().push("second"));

        bus.publish(&GameEvent::PollutionSet { level: 1 });
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));

        let mut bus = EventBus::new();
        let counter = Rc::clone(&count);
        let id = bus.subscribe(move |_: &GameEvent| *counter.borrow_mut() += 1);

        bus.publish(&GameEvent::PollutionSet { level: 1 });
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&GameEvent::PollutionSet { level: 2 });

        assert_eq!(*count.borrow(), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_scene_names() {
        assert_eq!(SceneRequest::Loss.scene_name(), "LossScene");
    }
}
