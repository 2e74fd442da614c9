//! Timing curves for reveal transitions.
//!
//! The engine does not sample curves itself; it hands the presentation layer
//! a CSS `transition` declaration and lets the host animate. An [`Easing`]
//! therefore carries exactly what that declaration needs: a curve name, or
//! the four control points of a custom cubic bezier.

use serde::{Deserialize, Serialize};

/// Timing curve applied to both the opacity and transform channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// CSS `ease` - slow start, fast middle, slow end.
    Ease,

    /// CSS `ease-in` - slow start, accelerating.
    EaseIn,

    /// CSS `ease-out` - fast start, decelerating.
    EaseOut,

    /// CSS `ease-in-out` - slow start and end, fast middle.
    EaseInOut,

    /// Custom cubic bezier curve.
    /// x values must be in [0, 1]; y values may overshoot.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Default for Easing {
    fn default() -> Self {
        Self::EaseOut
    }
}

impl Easing {
    /// Create a custom cubic bezier curve.
    ///
    /// The x control values are clamped to [0, 1] so the curve stays a
    /// function of time; y values pass through unchanged.
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::CubicBezier {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Render the curve as it appears in a CSS `transition` declaration.
    pub fn css_name(&self) -> String {
        match self {
            Self::Ease => "ease".to_string(),
            Self::EaseIn => "ease-in".to_string(),
            Self::EaseOut => "ease-out".to_string(),
            Self::EaseInOut => "ease-in-out".to_string(),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                format!(
                    "cubic-bezier({}, {}, {}, {})",
                    crate::style::format_number(*x1),
                    crate::style::format_number(*y1),
                    crate::style::format_number(*x2),
                    crate::style::format_number(*y2)
                )
            }
        }
    }

    /// True when the x control values of a custom curve are in range.
    /// Named curves are always well formed.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::CubicBezier { x1, x2, .. } => {
                (0.0..=1.0).contains(x1) && (0.0..=1.0).contains(x2)
            }
            _ => true,
        }
    }

    /// Return a well-formed copy, clamping custom x control values.
    pub fn clamped(self) -> Self {
        match self {
            Self::CubicBezier { x1, y1, x2, y2 } => Self::cubic_bezier(x1, y1, x2, y2),
            named => named,
        }
    }
}
