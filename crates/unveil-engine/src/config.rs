//! Reveal configuration: thresholds, margins, timing, and direction.
//!
//! A [`RevealConfig`] is supplied once per attachment and is immutable for
//! its lifetime; changing parameters goes through
//! [`RevealEngine::reconfigure`](crate::engine::RevealEngine::reconfigure).
//! Out-of-range values are clamped deterministically at attach time (see
//! [`RevealConfig::clamped`]); callers that prefer rejection over clamping
//! can run [`RevealConfig::validate`] first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{Result, RevealError};
use crate::style::format_number;

/// Which offset/transform family applies before the reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Element starts below its resting position and slides up.
    Up,
    /// Element starts above its resting position and slides down.
    Down,
    /// Element starts to the right and slides left.
    Left,
    /// Element starts to the left and slides right.
    Right,
    /// Opacity only, no spatial offset.
    Fade,
    /// Element starts at 80% scale.
    Scale,
    /// Element starts rotated by -5 degrees.
    Rotate,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Up
    }
}

/// Signed pixel offsets that grow or shrink the effective viewport used for
/// intersection testing, in CSS margin order (top, right, bottom, left).
///
/// Parses from and renders to the CSS string form. One value applies to all
/// four sides, two values to vertical/horizontal, four to each side:
///
/// ```
/// use unveil_engine::config::RootMargin;
///
/// let margin: RootMargin = "0px 0px -50px 0px".parse().unwrap();
/// assert_eq!(margin.bottom, -50.0);
/// assert_eq!(margin.to_string(), "0px 0px -50px 0px");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl RootMargin {
    /// A zero margin: the intersection viewport is the real viewport.
    pub fn zero() -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }

    /// The same offset on all four sides.
    pub fn uniform(px: f32) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    /// Explicit offsets in CSS order.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// True when every offset is a finite number.
    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.left.is_finite()
    }
}

impl Default for RootMargin {
    /// The engine default shrinks the viewport bottom by 50px so elements
    /// reveal slightly before they would fully scroll into view.
    fn default() -> Self {
        Self::new(0.0, 0.0, -50.0, 0.0)
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            format_number(self.top),
            format_number(self.right),
            format_number(self.bottom),
            format_number(self.left)
        )
    }
}

fn parse_margin_offset(token: &str) -> Option<f32> {
    let number = token.strip_suffix("px").unwrap_or(token);
    match number.parse::<f32>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

impl FromStr for RootMargin {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self> {
        let offsets: Option<Vec<f32>> = s.split_whitespace().map(parse_margin_offset).collect();
        let offsets = offsets.ok_or_else(|| RevealError::InvalidRootMargin(s.to_string()))?;

        match offsets.as_slice() {
            [all] => Ok(Self::uniform(*all)),
            [vertical, horizontal] => Ok(Self::new(*vertical, *horizontal, *vertical, *horizontal)),
            [top, right, bottom, left] => Ok(Self::new(*top, *right, *bottom, *left)),
            _ => Err(RevealError::InvalidRootMargin(s.to_string())),
        }
    }
}

impl TryFrom<String> for RootMargin {
    type Error = RevealError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

/// Configuration for one reveal attachment.
///
/// All fields have the documented defaults, so `RevealConfig::default()` is
/// the canonical "fade up on first entry" behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element's area that must be inside the (margin
    /// adjusted) viewport for the element to count as entered. In [0, 1].
    pub threshold: f32,
    /// Adjustment to the effective viewport used for intersection testing.
    pub root_margin: RootMargin,
    /// Once revealed, never re-hide.
    pub trigger_once: bool,
    /// Milliseconds between the entering edge and becoming visible.
    pub delay_ms: f32,
    /// Transition duration for the opacity and transform channels.
    pub duration_ms: f32,
    /// Magnitude of the pre-reveal directional offset.
    pub distance_px: f32,
    /// Offset/transform family applied before the reveal.
    pub direction: Direction,
    /// Timing curve for both transition channels.
    pub easing: Easing,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin::default(),
            trigger_once: true,
            delay_ms: 0.0,
            duration_ms: 1000.0,
            distance_px: 30.0,
            direction: Direction::Up,
            easing: Easing::EaseOut,
        }
    }
}

impl RevealConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the intersection threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the root margin.
    pub fn with_root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    /// Set whether the reveal is one-way.
    pub fn with_trigger_once(mut self, trigger_once: bool) -> Self {
        self.trigger_once = trigger_once;
        self
    }

    /// Set the entry delay in milliseconds.
    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the transition duration in milliseconds.
    pub fn with_duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the pre-reveal offset magnitude.
    pub fn with_distance(mut self, distance_px: f32) -> Self {
        self.distance_px = distance_px;
        self
    }

    /// Set the reveal direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the timing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Strict validation: reports the first out-of-range field.
    ///
    /// The engine itself never calls this; it clamps instead. The method is
    /// for callers that want malformed input rejected up front.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(RevealError::InvalidConfig {
                field: "threshold",
                reason: format!("{} is outside [0, 1]", self.threshold),
            });
        }
        if !self.delay_ms.is_finite() || self.delay_ms < 0.0 {
            return Err(RevealError::InvalidConfig {
                field: "delay_ms",
                reason: format!("{} is not a non-negative duration", self.delay_ms),
            });
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(RevealError::InvalidConfig {
                field: "duration_ms",
                reason: format!("{} is not a non-negative duration", self.duration_ms),
            });
        }
        if !self.distance_px.is_finite() {
            return Err(RevealError::InvalidConfig {
                field: "distance_px",
                reason: format!("{} is not finite", self.distance_px),
            });
        }
        if !self.root_margin.is_finite() {
            return Err(RevealError::InvalidConfig {
                field: "root_margin",
                reason: "offsets must be finite".to_string(),
            });
        }
        if !self.easing.is_well_formed() {
            return Err(RevealError::InvalidConfig {
                field: "easing",
                reason: "cubic bezier x control values must be in [0, 1]".to_string(),
            });
        }
        Ok(())
    }

    /// Deterministic clamping, applied by the engine at attach and
    /// reconfigure time: threshold to [0, 1], negative durations to zero,
    /// non-finite values to the field default, bezier x controls to [0, 1].
    pub fn clamped(mut self) -> Self {
        let defaults = Self::default();
        self.threshold = if self.threshold.is_finite() {
            self.threshold.clamp(0.0, 1.0)
        } else {
            defaults.threshold
        };
        self.delay_ms = if self.delay_ms.is_finite() {
            self.delay_ms.max(0.0)
        } else {
            defaults.delay_ms
        };
        self.duration_ms = if self.duration_ms.is_finite() {
            self.duration_ms.max(0.0)
        } else {
            defaults.duration_ms
        };
        if !self.distance_px.is_finite() {
            self.distance_px = defaults.distance_px;
        }
        if !self.root_margin.is_finite() {
            self.root_margin = defaults.root_margin;
        }
        self.easing = self.easing.clamped();
        self
    }

    /// True when switching from `self` to `other` requires tearing down and
    /// re-registering the viewport observation. The observation parameters
    /// proper (threshold, root margin) and the edge-handling parameters
    /// (trigger_once, delay) all force a re-registration.
    pub fn requires_reobserve(&self, other: &Self) -> bool {
        self.threshold != other.threshold
            || self.root_margin != other.root_margin
            || self.trigger_once != other.trigger_once
            || self.delay_ms != other.delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_table() {
        let config = RevealConfig::default();
        assert_eq!(config.threshold, 0.1);
        assert_eq!(config.root_margin, RootMargin::new(0.0, 0.0, -50.0, 0.0));
        assert!(config.trigger_once);
        assert_eq!(config.delay_ms, 0.0);
        assert_eq!(config.duration_ms, 1000.0);
        assert_eq!(config.distance_px, 30.0);
        assert_eq!(config.direction, Direction::Up);
        assert_eq!(config.easing, Easing::EaseOut);
    }

    #[test]
    fn test_builders() {
        let config = RevealConfig::new()
            .with_threshold(0.5)
            .with_delay(200.0)
            .with_duration(600.0)
            .with_distance(40.0)
            .with_direction(Direction::Left)
            .with_easing(Easing::EaseInOut)
            .with_trigger_once(false);

        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.delay_ms, 200.0);
        assert_eq!(config.duration_ms, 600.0);
        assert_eq!(config.distance_px, 40.0);
        assert_eq!(config.direction, Direction::Left);
        assert_eq!(config.easing, Easing::EaseInOut);
        assert!(!config.trigger_once);
    }

    #[test]
    fn test_root_margin_parse_forms() {
        let four: RootMargin = "0px 0px -50px 0px".parse().unwrap();
        assert_eq!(four, RootMargin::new(0.0, 0.0, -50.0, 0.0));

        let one: RootMargin = "10px".parse().unwrap();
        assert_eq!(one, RootMargin::uniform(10.0));

        let two: RootMargin = "-20px 5px".parse().unwrap();
        assert_eq!(two, RootMargin::new(-20.0, 5.0, -20.0, 5.0));

        // Bare numbers are accepted; the px unit is implied.
        let bare: RootMargin = "0 0 -50 0".parse().unwrap();
        assert_eq!(bare, RootMargin::new(0.0, 0.0, -50.0, 0.0));
    }

    #[test]
    fn test_root_margin_rejects_malformed() {
        assert!("".parse::<RootMargin>().is_err());
        assert!("1px 2px 3px".parse::<RootMargin>().is_err());
        assert!("abc".parse::<RootMargin>().is_err());
        assert!("1px 2px 3px 4px 5px".parse::<RootMargin>().is_err());
    }

    #[test]
    fn test_root_margin_display_round_trip() {
        let margin = RootMargin::new(0.0, 0.0, -50.0, 0.0);
        let rendered = margin.to_string();
        assert_eq!(rendered, "0px 0px -50px 0px");
        assert_eq!(rendered.parse::<RootMargin>().unwrap(), margin);
    }

    #[test]
    fn test_root_margin_serde_as_string() {
        let margin = RootMargin::new(0.0, 0.0, -50.0, 0.0);
        let json = serde_json::to_string(&margin).unwrap();
        assert_eq!(json, "\"0px 0px -50px 0px\"");
        let parsed: RootMargin = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, margin);
    }

    #[test]
    fn test_clamped_is_deterministic() {
        let config = RevealConfig::new()
            .with_threshold(1.7)
            .with_delay(-100.0)
            .with_duration(f32::NAN)
            .with_easing(Easing::CubicBezier {
                x1: -1.0,
                y1: 0.0,
                x2: 2.0,
                y2: 1.0,
            })
            .clamped();

        assert_eq!(config.threshold, 1.0);
        assert_eq!(config.delay_ms, 0.0);
        assert_eq!(config.duration_ms, 1000.0);
        assert!(config.easing.is_well_formed());
        // Clamping an already-clamped config is a no-op.
        assert_eq!(config.clone().clamped(), config);
    }

    #[test]
    fn test_validate_reports_offending_field() {
        let bad_threshold = RevealConfig::new().with_threshold(-0.5);
        match bad_threshold.validate() {
            Err(RevealError::InvalidConfig { field, .. }) => assert_eq!(field, "threshold"),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }

        let bad_delay = RevealConfig::new().with_delay(-1.0);
        match bad_delay.validate() {
            Err(RevealError::InvalidConfig { field, .. }) => assert_eq!(field, "delay_ms"),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }

        assert!(RevealConfig::default().validate().is_ok());
    }

    #[test]
    fn test_requires_reobserve() {
        let base = RevealConfig::default();

        assert!(base.requires_reobserve(&base.clone().with_threshold(0.4)));
        assert!(base.requires_reobserve(&base.clone().with_root_margin(RootMargin::zero())));
        assert!(base.requires_reobserve(&base.clone().with_trigger_once(false)));
        assert!(base.requires_reobserve(&base.clone().with_delay(250.0)));

        // Purely presentational changes keep the observation alive.
        assert!(!base.requires_reobserve(&base.clone().with_duration(500.0)));
        assert!(!base.requires_reobserve(&base.clone().with_direction(Direction::Rotate)));
        assert!(!base.requires_reobserve(&base.clone().with_easing(Easing::Ease)));
        assert!(!base.requires_reobserve(&base.clone().with_distance(60.0)));
    }
}
