//! Per-attachment reveal state.

use serde::{Deserialize, Serialize};

/// Where an attachment is in its reveal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RevealPhase {
    /// Not revealed; the pre-reveal style applies.
    Hidden,
    /// The entering edge fired and the reveal delay is counting down.
    /// The pre-reveal style still applies until the delay expires.
    Pending { remaining_ms: f32 },
    /// Revealed; the resting style applies.
    Visible,
}

/// Mutable state owned exclusively by one engine instance.
///
/// Created at attach, destroyed at detach. `has_triggered` is the flag that
/// makes visibility monotonic under `trigger_once`; it survives
/// reconfiguration but not detachment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealState {
    pub(crate) phase: RevealPhase,
    /// True once the threshold/root-margin test has passed at least once.
    pub(crate) has_entered_viewport: bool,
    /// True once the attachment has been visible at least once.
    pub(crate) has_triggered: bool,
}

impl RevealState {
    /// Fresh state for a new attachment.
    pub fn new() -> Self {
        Self {
            phase: RevealPhase::Hidden,
            has_entered_viewport: false,
            has_triggered: false,
        }
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// True while the resting (revealed) style applies.
    pub fn is_visible(&self) -> bool {
        self.phase == RevealPhase::Visible
    }

    /// True while a reveal delay is counting down.
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, RevealPhase::Pending { .. })
    }

    /// True once the threshold test has passed at least once.
    pub fn has_entered_viewport(&self) -> bool {
        self.has_entered_viewport
    }

    /// True once the attachment has been visible at least once.
    pub fn has_triggered(&self) -> bool {
        self.has_triggered
    }
}

impl Default for RevealState {
    fn default() -> Self {
        Self::new()
    }
}
