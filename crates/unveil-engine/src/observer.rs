//! Injected viewport-observation capability.
//!
//! The engine never talks to a real viewport. Hosts implement
//! [`ViewportObserver`] over whatever intersection facility they have and
//! deliver [`IntersectionEntry`] values back into the engine (or the
//! manager) as they arrive. Two implementations ship with the crate:
//! [`FakeViewport`], a deterministic synthetic-event source for tests and
//! headless hosts, and [`UnsupportedViewport`], a host with no observation
//! capability at all, which engines degrade against instead of failing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::config::RootMargin;
use crate::error::{Result, RevealError};

/// Unique identifier for one active observation registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservationId(pub u64);

impl ObservationId {
    /// Generate a new unique observation ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ObservationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for one observation registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Fraction of the element's area required inside the viewport.
    pub threshold: f32,
    /// Adjustment to the effective viewport.
    pub root_margin: RootMargin,
}

/// One intersection-change notification from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    /// The observed element this entry reports on.
    pub element_id: String,
    /// Whether the element currently satisfies the threshold test within
    /// the root-margin-adjusted viewport.
    pub is_intersecting: bool,
    /// The fraction of the element's area inside the adjusted viewport.
    pub intersection_ratio: f32,
}

impl IntersectionEntry {
    /// An entry reporting that the element satisfies the threshold test.
    pub fn entered(element_id: impl Into<String>, ratio: f32) -> Self {
        Self {
            element_id: element_id.into(),
            is_intersecting: true,
            intersection_ratio: ratio,
        }
    }

    /// An entry reporting that the element no longer satisfies the test.
    pub fn exited(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            is_intersecting: false,
            intersection_ratio: 0.0,
        }
    }
}

/// Host capability for observing element/viewport intersection.
///
/// `observe` registers interest in one element and returns a handle;
/// `unobserve` releases it. Implementations deliver entries out of band —
/// the engine consumes them via
/// [`RevealEngine::handle_intersection`](crate::engine::RevealEngine::handle_intersection)
/// or [`RevealManager::dispatch`](crate::manager::RevealManager::dispatch).
pub trait ViewportObserver {
    /// Register an observation for one element.
    fn observe(&mut self, element_id: &str, options: &ObserverOptions) -> Result<ObservationId>;

    /// Release a previous registration. Unknown IDs are ignored.
    fn unobserve(&mut self, observation: ObservationId);
}

/// A host with no intersection-observation facility.
///
/// Every `observe` fails with [`RevealError::Unsupported`]; engines attached
/// against it settle into the hidden default style without erroring.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedViewport;

impl ViewportObserver for UnsupportedViewport {
    fn observe(&mut self, _element_id: &str, _options: &ObserverOptions) -> Result<ObservationId> {
        Err(RevealError::Unsupported)
    }

    fn unobserve(&mut self, _observation: ObservationId) {}
}

/// Deterministic observation source for tests and headless hosts.
///
/// Registrations are recorded, and synthetic entries are produced on demand:
/// [`FakeViewport::intersect`] applies the registered threshold to a given
/// visible-area ratio, exactly the membership test a real viewport would
/// perform.
#[derive(Debug, Default)]
pub struct FakeViewport {
    observations: HashMap<ObservationId, (String, ObserverOptions)>,
}

impl FakeViewport {
    /// Create an empty fake viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently registered observations.
    pub fn active_count(&self) -> usize {
        self.observations.len()
    }

    /// True if the element has a live registration.
    pub fn is_observed(&self, element_id: &str) -> bool {
        self.observations.values().any(|(id, _)| id == element_id)
    }

    /// The options the element was registered with, if observed.
    pub fn options_for(&self, element_id: &str) -> Option<&ObserverOptions> {
        self.observations
            .values()
            .find(|(id, _)| id == element_id)
            .map(|(_, options)| options)
    }

    /// Synthesize an entry for an observed element showing `ratio` of its
    /// area inside the adjusted viewport. The registered threshold decides
    /// membership. Returns `None` for elements with no registration, as a
    /// real facility would never report on an unobserved element.
    pub fn intersect(&self, element_id: &str, ratio: f32) -> Option<IntersectionEntry> {
        self.options_for(element_id).map(|options| IntersectionEntry {
            element_id: element_id.to_string(),
            is_intersecting: ratio >= options.threshold,
            intersection_ratio: ratio,
        })
    }

    /// Synthesize an entry reporting the element fully out of view.
    pub fn leave(&self, element_id: &str) -> Option<IntersectionEntry> {
        if self.is_observed(element_id) {
            Some(IntersectionEntry::exited(element_id))
        } else {
            None
        }
    }
}

impl ViewportObserver for FakeViewport {
    fn observe(&mut self, element_id: &str, options: &ObserverOptions) -> Result<ObservationId> {
        let id = ObservationId::new();
        self.observations
            .insert(id, (element_id.to_string(), options.clone()));
        Ok(id)
    }

    fn unobserve(&mut self, observation: ObservationId) {
        self.observations.remove(&observation);
    }
}
