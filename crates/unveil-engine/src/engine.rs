//! The reveal engine: one attachment's observation lifecycle and state machine.
//!
//! An engine owns the [`RevealState`] for exactly one element. Its lifecycle
//! is explicit — [`attach`](RevealEngine::attach),
//! [`reconfigure`](RevealEngine::reconfigure),
//! [`detach`](RevealEngine::detach) — and its inputs are the host's
//! [`IntersectionEntry`] notifications plus [`advance`](RevealEngine::advance)
//! ticks from the frame loop. The reveal delay is deferred state, not an OS
//! timer: `Pending { remaining_ms }` counts down under `advance`, which makes
//! every timing property deterministic and makes cancellation a plain state
//! reset. Even a zero delay only resolves on the next tick, never inside the
//! observation callback that scheduled it.

use tracing::{debug, trace, warn};

use crate::config::RevealConfig;
use crate::events::{EventQueue, RevealEvent};
use crate::observer::{IntersectionEntry, ObservationId, ObserverOptions, ViewportObserver};
use crate::state::{RevealPhase, RevealState};
use crate::style::RevealStyle;

/// Visibility state machine for one observed element.
#[derive(Debug)]
pub struct RevealEngine {
    element_id: String,
    config: RevealConfig,
    state: RevealState,
    observation: Option<ObservationId>,
    /// Set when the host has no observation capability; the engine then
    /// rests in the hidden style and ignores all input.
    degraded: bool,
    events: EventQueue,
}

impl RevealEngine {
    /// Create an engine for one element. The configuration is clamped to
    /// valid ranges here; see [`RevealConfig::clamped`] for the policy.
    pub fn new(element_id: impl Into<String>, config: RevealConfig) -> Self {
        Self {
            element_id: element_id.into(),
            config: config.clamped(),
            state: RevealState::new(),
            observation: None,
            degraded: false,
            events: EventQueue::new(),
        }
    }

    /// The element this engine is bound to.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// The active (clamped) configuration.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> RevealPhase {
        self.state.phase()
    }

    /// A copy of the current attachment state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// True while the resting (revealed) style applies.
    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// True while an observation registration is live.
    pub fn is_attached(&self) -> bool {
        self.observation.is_some()
    }

    /// True when the host had no observation capability at attach time.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The style the rendering layer should apply right now.
    pub fn style(&self) -> RevealStyle {
        if self.state.is_visible() {
            RevealStyle::visible(&self.config)
        } else {
            RevealStyle::hidden(&self.config)
        }
    }

    /// Drain the lifecycle events queued since the last drain.
    pub fn drain_events(&mut self) -> impl Iterator<Item = RevealEvent> + '_ {
        self.events.drain()
    }

    fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.config.threshold,
            root_margin: self.config.root_margin,
        }
    }

    /// Register the observation and start a fresh attachment.
    ///
    /// Re-attaching an already-attached engine tears the old attachment
    /// down first. If the host has no observation capability the engine
    /// degrades: it keeps the hidden default style, ignores later input,
    /// and never errors.
    pub fn attach(&mut self, observer: &mut dyn ViewportObserver) {
        self.teardown(observer);
        self.state = RevealState::new();
        self.degraded = false;

        match observer.observe(&self.element_id, &self.observer_options()) {
            Ok(id) => {
                self.observation = Some(id);
                debug!("attached reveal observation for {}", self.element_id);
            }
            Err(err) => {
                self.degraded = true;
                warn!(
                    "viewport observation unavailable for {}, resting hidden: {}",
                    self.element_id, err
                );
            }
        }
    }

    /// Swap in a new configuration.
    ///
    /// Changes to the observation parameters (threshold, root margin) or
    /// the edge-handling parameters (trigger_once, delay) tear down and
    /// recreate the registration, cancelling any pending reveal. Purely
    /// presentational changes (duration, easing, direction, distance) keep
    /// the observation and any countdown alive. `has_triggered` persists
    /// either way, so a one-shot reveal stays revealed across
    /// reconfiguration.
    pub fn reconfigure(&mut self, config: RevealConfig, observer: &mut dyn ViewportObserver) {
        let config = config.clamped();
        let reobserve = self.config.requires_reobserve(&config);
        self.config = config;

        if !reobserve {
            return;
        }

        self.cancel_pending();

        if let Some(id) = self.observation.take() {
            observer.unobserve(id);
            match observer.observe(&self.element_id, &self.observer_options()) {
                Ok(new_id) => {
                    self.observation = Some(new_id);
                    debug!("reobserving {} with new parameters", self.element_id);
                }
                Err(err) => {
                    self.degraded = true;
                    warn!(
                        "viewport observation lost for {} during reconfigure: {}",
                        self.element_id, err
                    );
                }
            }
        }
    }

    /// Tear the attachment down: unregister the observation and cancel any
    /// pending reveal, synchronously. After this no `advance` or entry can
    /// mutate the engine until it is attached again.
    pub fn detach(&mut self, observer: &mut dyn ViewportObserver) {
        self.teardown(observer);
        self.state = RevealState::new();
        self.degraded = false;
        debug!("detached reveal observation for {}", self.element_id);
    }

    fn teardown(&mut self, observer: &mut dyn ViewportObserver) {
        self.cancel_pending();
        if let Some(id) = self.observation.take() {
            observer.unobserve(id);
        }
    }

    fn cancel_pending(&mut self) {
        if self.state.is_pending() {
            self.state.phase = RevealPhase::Hidden;
            self.events.push(RevealEvent::Cancelled {
                element_id: self.element_id.clone(),
            });
        }
    }

    /// Feed one intersection notification from the host.
    ///
    /// Entries for other elements, or arriving while detached or degraded,
    /// are ignored. An entering edge schedules the reveal delay; a second
    /// entering edge while the delay is counting restarts it, so rapid
    /// enter/exit cycles can never stack timers. The falling edge is
    /// immediate: without `trigger_once` an exit hides the element at once,
    /// and with `trigger_once` it is a no-op.
    pub fn handle_intersection(&mut self, entry: &IntersectionEntry) {
        if self.degraded || self.observation.is_none() {
            trace!("dropping entry for {}: not observing", entry.element_id);
            return;
        }
        if entry.element_id != self.element_id {
            trace!(
                "dropping entry for {}: engine is bound to {}",
                entry.element_id, self.element_id
            );
            return;
        }

        if entry.is_intersecting {
            self.state.has_entered_viewport = true;

            if self.config.trigger_once && self.state.has_triggered {
                return;
            }
            match self.state.phase {
                RevealPhase::Visible => {}
                RevealPhase::Pending { .. } => {
                    // Fresh entering edge replaces the outstanding countdown.
                    self.state.phase = RevealPhase::Pending {
                        remaining_ms: self.config.delay_ms,
                    };
                }
                RevealPhase::Hidden => {
                    self.state.phase = RevealPhase::Pending {
                        remaining_ms: self.config.delay_ms,
                    };
                    self.events.push(RevealEvent::Entered {
                        element_id: self.element_id.clone(),
                    });
                }
            }
        } else {
            if self.config.trigger_once {
                return;
            }
            match self.state.phase {
                RevealPhase::Pending { .. } => self.cancel_pending(),
                RevealPhase::Visible => {
                    self.state.phase = RevealPhase::Hidden;
                    self.events.push(RevealEvent::Exited {
                        element_id: self.element_id.clone(),
                    });
                }
                RevealPhase::Hidden => {}
            }
        }
    }

    /// Advance the reveal countdown by `delta_ms` of host time.
    ///
    /// Call once per frame. When a pending delay reaches zero the engine
    /// becomes visible and records the trigger. Negative deltas are
    /// treated as zero.
    pub fn advance(&mut self, delta_ms: f32) {
        let delta = delta_ms.max(0.0);
        if let RevealPhase::Pending { remaining_ms } = self.state.phase {
            let remaining = remaining_ms - delta;
            if remaining <= 0.0 {
                self.state.phase = RevealPhase::Visible;
                self.state.has_triggered = true;
                self.events.push(RevealEvent::Revealed {
                    element_id: self.element_id.clone(),
                });
                debug!("revealed {}", self.element_id);
            } else {
                self.state.phase = RevealPhase::Pending {
                    remaining_ms: remaining,
                };
            }
        }
    }
}
