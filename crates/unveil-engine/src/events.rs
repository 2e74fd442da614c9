//! Reveal lifecycle events.
//!
//! Engines queue an event for each observable state change; callers drain
//! the queue after each update cycle. Events are the test suite's window
//! into "did anything mutate" — a detached attachment must produce nothing.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Event emitted when an attachment changes reveal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealEvent {
    /// The element satisfied the threshold test and a reveal was scheduled.
    Entered {
        /// The element whose observation fired.
        element_id: String,
    },
    /// The reveal delay elapsed and the element became visible.
    Revealed {
        /// The element that became visible.
        element_id: String,
    },
    /// A visible element left the viewport and was hidden again
    /// (only possible when `trigger_once` is off).
    Exited {
        /// The element that was hidden.
        element_id: String,
    },
    /// A scheduled reveal was cancelled before it fired, by an exit,
    /// a reconfiguration, or a detach.
    Cancelled {
        /// The element whose pending reveal was dropped.
        element_id: String,
    },
}

impl RevealEvent {
    /// Get the element ID for this event.
    pub fn element_id(&self) -> &str {
        match self {
            Self::Entered { element_id }
            | Self::Revealed { element_id }
            | Self::Exited { element_id }
            | Self::Cancelled { element_id } => element_id,
        }
    }

    /// Check if this is a `Revealed` event.
    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Revealed { .. })
    }

    /// Check if this is a `Cancelled` event.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Queue of reveal events collected during update cycles.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<RevealEvent>,
}

impl EventQueue {
    /// Create a new empty event queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event onto the queue.
    pub fn push(&mut self, event: RevealEvent) {
        self.events.push_back(event);
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get the number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Pop the next event from the queue.
    pub fn pop(&mut self) -> Option<RevealEvent> {
        self.events.pop_front()
    }

    /// Drain all events from the queue, returning an iterator.
    pub fn drain(&mut self) -> impl Iterator<Item = RevealEvent> + '_ {
        self.events.drain(..)
    }

    /// Peek at the next event without removing it.
    pub fn peek(&self) -> Option<&RevealEvent> {
        self.events.front()
    }

    /// Clear all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Get pending events for a specific element.
    pub fn events_for(&self, element_id: &str) -> Vec<&RevealEvent> {
        self.events
            .iter()
            .filter(|e| e.element_id() == element_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let event = RevealEvent::Revealed {
            element_id: "card_1".to_string(),
        };
        assert_eq!(event.element_id(), "card_1");
        assert!(event.is_revealed());
        assert!(!event.is_cancelled());

        let cancelled = RevealEvent::Cancelled {
            element_id: "card_2".to_string(),
        };
        assert!(cancelled.is_cancelled());
        assert!(!cancelled.is_revealed());
    }

    #[test]
    fn test_queue_order_and_drain() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());

        queue.push(RevealEvent::Entered {
            element_id: "a".to_string(),
        });
        queue.push(RevealEvent::Revealed {
            element_id: "a".to_string(),
        });
        assert_eq!(queue.len(), 2);
        assert!(matches!(queue.peek(), Some(RevealEvent::Entered { .. })));

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], RevealEvent::Entered { .. }));
        assert!(matches!(drained[1], RevealEvent::Revealed { .. }));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_for_element() {
        let mut queue = EventQueue::new();
        queue.push(RevealEvent::Entered {
            element_id: "a".to_string(),
        });
        queue.push(RevealEvent::Entered {
            element_id: "b".to_string(),
        });
        queue.push(RevealEvent::Revealed {
            element_id: "a".to_string(),
        });

        assert_eq!(queue.events_for("a").len(), 2);
        assert_eq!(queue.events_for("b").len(), 1);
        assert_eq!(queue.events_for("c").len(), 0);
    }

    #[test]
    fn test_event_serialization() {
        let event = RevealEvent::Entered {
            element_id: "hero".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("entered"));
        assert!(json.contains("hero"));

        let parsed: RevealEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
