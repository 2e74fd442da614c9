//! Scroll-reveal visibility engine.
//!
//! This crate provides:
//! - **Reveal engine**: per-element visibility state machine driven by
//!   viewport-intersection events and frame ticks
//! - **Style projection**: opacity/transform/transition descriptors for the
//!   rendering layer to apply inline
//! - **Presets**: named configuration bundles with field-level override
//!   merging and TOML-backed registries
//! - **Injected capabilities**: the viewport-observation facility is a
//!   trait, so hosts and tests supply their own
//!
//! # Architecture
//!
//! ```text
//! RevealManager
//!   ├── RevealEngine per element (exclusively owned RevealState)
//!   │     ├── handle_intersection()  ← host entries via ViewportObserver
//!   │     └── advance(delta_ms)      ← frame loop drives reveal delays
//!   └── EventQueue (Entered / Revealed / Exited / Cancelled)
//!
//! RevealStyle
//!   └── projected from engine state + RevealConfig during rendering
//! ```
//!
//! Timing is deterministic by construction: the reveal delay is deferred
//! state counted down by `advance`, never an OS timer, so tests advance
//! virtual time with plain method calls.

pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod events;
pub mod manager;
pub mod observer;
pub mod presets;
pub mod state;
pub mod style;

pub use config::{Direction, RevealConfig, RootMargin};
pub use easing::Easing;
pub use engine::RevealEngine;
pub use error::{Result, RevealError};
pub use events::{EventQueue, RevealEvent};
pub use manager::RevealManager;
pub use observer::{
    FakeViewport, IntersectionEntry, ObservationId, ObserverOptions, UnsupportedViewport,
    ViewportObserver,
};
pub use presets::{Preset, PresetRegistry, RevealOverrides};
pub use state::{RevealPhase, RevealState};
pub use style::{RevealStyle, identity_transform, pre_reveal_transform, transition_declaration};
