//! Style projection: turning reveal state into presentation properties.
//!
//! The engine never touches a real element; it derives a [`RevealStyle`]
//! (opacity, transform, transition) that the rendering layer applies as
//! inline presentation properties. Hidden and visible styles share the same
//! transition declaration so the reveal animates in both channels at the
//! same duration and curve.

use serde::{Deserialize, Serialize};

use crate::config::{Direction, RevealConfig};

/// Scale factor applied before a `Scale` reveal.
const PRE_REVEAL_SCALE: f32 = 0.8;
/// Rotation in degrees applied before a `Rotate` reveal.
const PRE_REVEAL_ROTATE_DEG: f32 = -5.0;

/// Render a number without a trailing `.0`, matching CSS conventions
/// (`30` not `30.0`, but `0.8` stays `0.8`).
pub(crate) fn format_number(value: f32) -> String {
    if value == value.trunc() && value.abs() < 1e9 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// The transform applied before the reveal, derived from the direction.
///
/// Directional offsets push the element *away* from its resting position so
/// the transition carries it back: `Up` starts below (positive Y) and
/// travels up, `Left` starts to the right (positive X) and travels left.
pub fn pre_reveal_transform(direction: Direction, distance_px: f32) -> String {
    match direction {
        Direction::Up => format!("translateY({}px)", format_number(distance_px)),
        Direction::Down => format!("translateY({}px)", format_number(-distance_px)),
        Direction::Left => format!("translateX({}px)", format_number(distance_px)),
        Direction::Right => format!("translateX({}px)", format_number(-distance_px)),
        Direction::Scale => format!("scale({})", format_number(PRE_REVEAL_SCALE)),
        Direction::Rotate => format!("rotate({}deg)", format_number(PRE_REVEAL_ROTATE_DEG)),
        Direction::Fade => "none".to_string(),
    }
}

/// The resting transform after the reveal: a fully spelled-out identity so
/// every channel animates back to neutral regardless of direction.
pub fn identity_transform() -> String {
    "translateY(0px) translateX(0px) scale(1) rotate(0deg)".to_string()
}

/// The transition declaration shared by the hidden and visible styles.
pub fn transition_declaration(config: &RevealConfig) -> String {
    let duration = format_number(config.duration_ms);
    let easing = config.easing.css_name();
    format!("opacity {duration}ms {easing}, transform {duration}ms {easing}")
}

/// Inline presentation properties for one reveal attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealStyle {
    /// 0.0 while hidden or pending, 1.0 once visible.
    pub opacity: f32,
    /// Pre-reveal offset transform, or the identity once visible.
    pub transform: String,
    /// Combined opacity/transform transition declaration.
    pub transition: String,
}

impl RevealStyle {
    /// The style before the reveal (also the degraded-mode resting style).
    pub fn hidden(config: &RevealConfig) -> Self {
        Self {
            opacity: 0.0,
            transform: pre_reveal_transform(config.direction, config.distance_px),
            transition: transition_declaration(config),
        }
    }

    /// The style once the reveal has fired.
    pub fn visible(config: &RevealConfig) -> Self {
        Self {
            opacity: 1.0,
            transform: identity_transform(),
            transition: transition_declaration(config),
        }
    }
}
