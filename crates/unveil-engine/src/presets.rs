//! Named configuration bundles.
//!
//! A [`Preset`] is pure data: a fixed [`RevealConfig`] that callers refine
//! with [`RevealOverrides`]. The merge is field-level — a caller-supplied
//! field wins over the preset's — with no deep merging, since no field is a
//! nested structure. A [`PresetRegistry`] resolves names to configs and can
//! load additional named presets from a TOML file:
//!
//! ```toml
//! [presets.hero]
//! base = "fade_up"
//! delay_ms = 200.0
//! distance_px = 60.0
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{Direction, RevealConfig, RootMargin};
use crate::easing::Easing;
use crate::error::{Result, RevealError};

/// Built-in reveal presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    Scale,
    Rotate,
    SlowFadeUp,
    SlowFadeDown,
    Staggered,
}

impl Preset {
    /// Every built-in preset, in declaration order.
    pub const ALL: [Preset; 9] = [
        Preset::FadeUp,
        Preset::FadeDown,
        Preset::FadeLeft,
        Preset::FadeRight,
        Preset::Scale,
        Preset::Rotate,
        Preset::SlowFadeUp,
        Preset::SlowFadeDown,
        Preset::Staggered,
    ];

    /// The preset's canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FadeUp => "fade_up",
            Self::FadeDown => "fade_down",
            Self::FadeLeft => "fade_left",
            Self::FadeRight => "fade_right",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::SlowFadeUp => "slow_fade_up",
            Self::SlowFadeDown => "slow_fade_down",
            Self::Staggered => "staggered",
        }
    }

    /// Look a preset up by name. Kebab-case spellings are accepted
    /// alongside the canonical snake_case form.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized = name.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == normalized)
            .ok_or_else(|| RevealError::UnknownPreset(name.to_string()))
    }

    /// The fixed configuration this preset names.
    pub fn config(self) -> RevealConfig {
        match self {
            Self::FadeUp => RevealConfig::default(),
            Self::FadeDown => RevealConfig::new().with_direction(Direction::Down),
            Self::FadeLeft => RevealConfig::new().with_direction(Direction::Left),
            Self::FadeRight => RevealConfig::new().with_direction(Direction::Right),
            Self::Scale => RevealConfig::new().with_direction(Direction::Scale),
            Self::Rotate => RevealConfig::new().with_direction(Direction::Rotate),
            Self::SlowFadeUp => RevealConfig::new().with_duration(1500.0),
            Self::SlowFadeDown => RevealConfig::new()
                .with_direction(Direction::Down)
                .with_duration(1500.0),
            // The stagger step: callers multiply it per item.
            Self::Staggered => RevealConfig::new().with_delay(150.0),
        }
    }

    /// The preset configuration with caller overrides merged on top.
    pub fn config_with(self, overrides: &RevealOverrides) -> RevealConfig {
        overrides.apply_to(self.config())
    }
}

/// Caller-supplied overrides, merged field-by-field over a preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealOverrides {
    pub threshold: Option<f32>,
    pub root_margin: Option<RootMargin>,
    pub trigger_once: Option<bool>,
    pub delay_ms: Option<f32>,
    pub duration_ms: Option<f32>,
    pub distance_px: Option<f32>,
    pub direction: Option<Direction>,
    pub easing: Option<Easing>,
}

impl RevealOverrides {
    /// No overrides.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Override the entry delay.
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Override the transition duration.
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Override the reveal direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Override the offset distance.
    pub fn distance(mut self, distance_px: f32) -> Self {
        self.distance_px = Some(distance_px);
        self
    }

    /// Override the one-shot flag.
    pub fn trigger_once(mut self, trigger_once: bool) -> Self {
        self.trigger_once = Some(trigger_once);
        self
    }

    /// Override the intersection threshold.
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Override the timing curve.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Override the root margin.
    pub fn root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = Some(margin);
        self
    }

    /// Merge these overrides over `config`, field by field.
    pub fn apply_to(&self, mut config: RevealConfig) -> RevealConfig {
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(root_margin) = self.root_margin {
            config.root_margin = root_margin;
        }
        if let Some(trigger_once) = self.trigger_once {
            config.trigger_once = trigger_once;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(duration_ms) = self.duration_ms {
            config.duration_ms = duration_ms;
        }
        if let Some(distance_px) = self.distance_px {
            config.distance_px = distance_px;
        }
        if let Some(direction) = self.direction {
            config.direction = direction;
        }
        if let Some(easing) = self.easing {
            config.easing = easing;
        }
        config
    }
}

/// One named preset in a TOML preset file: an optional built-in base plus
/// field overrides.
#[derive(Debug, Clone, Default, Deserialize)]
struct PresetFileEntry {
    base: Option<String>,
    #[serde(flatten)]
    overrides: RevealOverrides,
}

/// On-disk preset file shape: a `[presets.<name>]` table per preset.
#[derive(Debug, Default, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: HashMap<String, PresetFileEntry>,
}

/// Resolves preset names to configurations.
///
/// Custom presets shadow built-ins of the same name; anything not
/// registered falls through to [`Preset::from_name`]. Loaded configs are
/// clamped on the way in, so a registry never hands out an out-of-range
/// configuration.
#[derive(Debug, Default)]
pub struct PresetRegistry {
    custom: HashMap<String, RevealConfig>,
}

impl PresetRegistry {
    /// A registry with only the built-in presets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a custom preset.
    pub fn insert(&mut self, name: impl Into<String>, config: RevealConfig) {
        self.custom.insert(name.into(), config.clamped());
    }

    /// Number of custom presets (built-ins are always available).
    pub fn custom_count(&self) -> usize {
        self.custom.len()
    }

    /// Resolve a name to a configuration: custom presets first, then the
    /// built-in table.
    pub fn resolve(&self, name: &str) -> Result<RevealConfig> {
        if let Some(config) = self.custom.get(name) {
            return Ok(config.clone());
        }
        Preset::from_name(name).map(Preset::config)
    }

    /// Parse a preset file from TOML text.
    ///
    /// Each `[presets.<name>]` table may set `base` to a *built-in* preset
    /// name plus any config fields as overrides; without `base` the
    /// defaults are the starting point.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: PresetFile = toml::from_str(text)?;
        let mut registry = Self::new();
        for (name, entry) in file.presets {
            let base = match entry.base.as_deref() {
                Some(base_name) => Preset::from_name(base_name)?.config(),
                None => RevealConfig::default(),
            };
            registry.insert(name, entry.overrides.apply_to(base));
        }
        Ok(registry)
    }

    /// Load a preset file from disk.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Load a preset file, falling back to the built-ins only when the file
    /// is missing or malformed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path).unwrap_or_default()
    }
}
