//! Coordinator for many reveal attachments.
//!
//! The [`RevealManager`] owns one [`RevealEngine`] per element, routes
//! intersection entries to the engine bound to them, advances every pending
//! countdown in one call per frame, and funnels the engines' lifecycle
//! events into a single queue. Per-attachment state stays exclusively owned
//! by its engine; the manager only dispatches.

use std::collections::HashMap;

use static_assertions::assert_impl_all;
use tracing::trace;

use crate::config::RevealConfig;
use crate::engine::RevealEngine;
use crate::error::{Result, RevealError};
use crate::events::{EventQueue, RevealEvent};
use crate::observer::{IntersectionEntry, ViewportObserver};
use crate::style::RevealStyle;

/// Central coordinator for all reveal attachments in a view.
#[derive(Debug, Default)]
pub struct RevealManager {
    engines: HashMap<String, RevealEngine>,
    events: EventQueue,
}

assert_impl_all!(RevealManager: Send);

impl RevealManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of current attachments.
    pub fn attached_count(&self) -> usize {
        self.engines.len()
    }

    /// Number of attachments with a reveal countdown in flight.
    pub fn pending_count(&self) -> usize {
        self.engines
            .values()
            .filter(|engine| engine.state().is_pending())
            .count()
    }

    /// Attach an element. An existing attachment under the same ID is torn
    /// down first, mirroring observer re-registration semantics.
    pub fn attach(
        &mut self,
        element_id: &str,
        config: RevealConfig,
        observer: &mut dyn ViewportObserver,
    ) {
        if let Some(mut previous) = self.engines.remove(element_id) {
            trace!("replacing existing attachment for {element_id}");
            previous.detach(observer);
            self.collect_events(&mut previous);
        }

        let mut engine = RevealEngine::new(element_id, config);
        engine.attach(observer);
        self.engines.insert(element_id.to_string(), engine);
    }

    /// Reconfigure an existing attachment.
    pub fn reconfigure(
        &mut self,
        element_id: &str,
        config: RevealConfig,
        observer: &mut dyn ViewportObserver,
    ) -> Result<()> {
        let engine = self
            .engines
            .get_mut(element_id)
            .ok_or_else(|| RevealError::UnknownTarget(element_id.to_string()))?;
        engine.reconfigure(config, observer);
        Ok(())
    }

    /// Detach an element, cancelling any pending reveal.
    pub fn detach(&mut self, element_id: &str, observer: &mut dyn ViewportObserver) -> Result<()> {
        let mut engine = self
            .engines
            .remove(element_id)
            .ok_or_else(|| RevealError::UnknownTarget(element_id.to_string()))?;
        engine.detach(observer);
        self.collect_events(&mut engine);
        Ok(())
    }

    /// Detach every attachment, leaving the manager reusable.
    pub fn detach_all(&mut self, observer: &mut dyn ViewportObserver) {
        for (_, mut engine) in self.engines.drain() {
            engine.detach(observer);
            Self::drain_into(&mut engine, &mut self.events);
        }
    }

    /// Route one intersection entry to the engine bound to its element.
    /// Returns false when no attachment matches.
    pub fn dispatch(&mut self, entry: &IntersectionEntry) -> bool {
        let Some(engine) = self.engines.get_mut(&entry.element_id) else {
            trace!("no attachment for entry target {}", entry.element_id);
            return false;
        };
        engine.handle_intersection(entry);
        Self::drain_into(engine, &mut self.events);
        true
    }

    /// Advance every pending countdown by `delta_ms` of host time.
    pub fn advance(&mut self, delta_ms: f32) {
        for engine in self.engines.values_mut() {
            engine.advance(delta_ms);
            Self::drain_into(engine, &mut self.events);
        }
    }

    /// True when the element is attached and currently visible.
    pub fn is_visible(&self, element_id: &str) -> bool {
        self.engines
            .get(element_id)
            .is_some_and(|engine| engine.is_visible())
    }

    /// The style for an attached element, if any.
    pub fn style_for(&self, element_id: &str) -> Option<RevealStyle> {
        self.engines.get(element_id).map(|engine| engine.style())
    }

    /// Direct access to one attachment's engine.
    pub fn engine(&self, element_id: &str) -> Option<&RevealEngine> {
        self.engines.get(element_id)
    }

    /// Drain all lifecycle events collected since the last drain.
    pub fn drain_events(&mut self) -> impl Iterator<Item = RevealEvent> + '_ {
        self.events.drain()
    }

    fn collect_events(&mut self, engine: &mut RevealEngine) {
        Self::drain_into(engine, &mut self.events);
    }

    fn drain_into(engine: &mut RevealEngine, queue: &mut EventQueue) {
        for event in engine.drain_events() {
            queue.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Direction;
    use crate::observer::FakeViewport;

    fn entered(viewport: &FakeViewport, element_id: &str) -> IntersectionEntry {
        viewport.intersect(element_id, 0.5).unwrap()
    }

    #[test]
    fn test_attach_and_dispatch() {
        let mut viewport = FakeViewport::new();
        let mut manager = RevealManager::new();

        manager.attach("a", RevealConfig::default(), &mut viewport);
        manager.attach("b", RevealConfig::new().with_delay(100.0), &mut viewport);
        assert_eq!(manager.attached_count(), 2);
        assert_eq!(viewport.active_count(), 2);

        assert!(manager.dispatch(&entered(&viewport, "a")));
        assert!(manager.dispatch(&entered(&viewport, "b")));
        assert_eq!(manager.pending_count(), 2);

        manager.advance(0.0);
        assert!(manager.is_visible("a"));
        assert!(!manager.is_visible("b")); // still counting down

        manager.advance(100.0);
        assert!(manager.is_visible("b"));
    }

    #[test]
    fn test_dispatch_unknown_target() {
        let mut manager = RevealManager::new();
        assert!(!manager.dispatch(&IntersectionEntry::entered("ghost", 0.9)));
        assert_eq!(manager.drain_events().count(), 0);
    }

    #[test]
    fn test_per_attachment_state_is_independent() {
        let mut viewport = FakeViewport::new();
        let mut manager = RevealManager::new();

        manager.attach(
            "once",
            RevealConfig::new().with_trigger_once(true),
            &mut viewport,
        );
        manager.attach(
            "toggling",
            RevealConfig::new().with_trigger_once(false),
            &mut viewport,
        );

        manager.dispatch(&entered(&viewport, "once"));
        manager.dispatch(&entered(&viewport, "toggling"));
        manager.advance(0.0);
        assert!(manager.is_visible("once"));
        assert!(manager.is_visible("toggling"));

        // Both leave the viewport; only the toggling one re-hides.
        manager.dispatch(&viewport.leave("once").unwrap());
        manager.dispatch(&viewport.leave("toggling").unwrap());
        assert!(manager.is_visible("once"));
        assert!(!manager.is_visible("toggling"));
    }

    #[test]
    fn test_detach_removes_and_cancels() {
        let mut viewport = FakeViewport::new();
        let mut manager = RevealManager::new();

        manager.attach("a", RevealConfig::new().with_delay(500.0), &mut viewport);
        manager.dispatch(&entered(&viewport, "a"));
        manager.drain_events().count();

        manager.detach("a", &mut viewport).unwrap();
        assert_eq!(manager.attached_count(), 0);
        assert_eq!(viewport.active_count(), 0);

        let events: Vec<_> = manager.drain_events().collect();
        assert!(matches!(events.last(), Some(RevealEvent::Cancelled { .. })));

        // Advancing past the old deadline mutates nothing.
        manager.advance(500.0);
        assert!(!manager.is_visible("a"));
        assert_eq!(manager.drain_events().count(), 0);

        assert!(matches!(
            manager.detach("a", &mut viewport),
            Err(RevealError::UnknownTarget(_))
        ));
    }

    #[test]
    fn test_reattach_replaces() {
        let mut viewport = FakeViewport::new();
        let mut manager = RevealManager::new();

        manager.attach("a", RevealConfig::default(), &mut viewport);
        manager.dispatch(&entered(&viewport, "a"));
        manager.advance(0.0);
        assert!(manager.is_visible("a"));

        // Re-attaching starts a fresh attachment: hidden again, one live
        // observation.
        manager.attach("a", RevealConfig::default(), &mut viewport);
        assert!(!manager.is_visible("a"));
        assert_eq!(viewport.active_count(), 1);
    }

    #[test]
    fn test_reconfigure_through_manager() {
        let mut viewport = FakeViewport::new();
        let mut manager = RevealManager::new();

        manager.attach("a", RevealConfig::default(), &mut viewport);
        manager
            .reconfigure(
                "a",
                RevealConfig::new().with_direction(Direction::Scale),
                &mut viewport,
            )
            .unwrap();
        assert_eq!(
            manager.style_for("a").unwrap().transform,
            "scale(0.8)"
        );

        assert!(matches!(
            manager.reconfigure("ghost", RevealConfig::default(), &mut viewport),
            Err(RevealError::UnknownTarget(_))
        ));
    }

    #[test]
    fn test_detach_all_leaves_manager_reusable() {
        let mut viewport = FakeViewport::new();
        let mut manager = RevealManager::new();

        manager.attach("a", RevealConfig::default(), &mut viewport);
        manager.attach("b", RevealConfig::default(), &mut viewport);
        manager.detach_all(&mut viewport);

        assert_eq!(manager.attached_count(), 0);
        assert_eq!(viewport.active_count(), 0);

        manager.attach("c", RevealConfig::default(), &mut viewport);
        assert_eq!(manager.attached_count(), 1);
    }

    #[test]
    fn test_style_for_unknown_is_none() {
        let manager = RevealManager::new();
        assert!(manager.style_for("ghost").is_none());
        assert!(!manager.is_visible("ghost"));
    }
}
