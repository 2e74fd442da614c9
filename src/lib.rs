//! Unveil: a scroll-reveal visibility engine.
//!
//! This facade re-exports the engine crate; see [`unveil_engine`] for the
//! full API. The short version:
//!
//! ```
//! use unveil::{FakeViewport, RevealConfig, RevealManager};
//!
//! let mut viewport = FakeViewport::new();
//! let mut manager = RevealManager::new();
//! manager.attach("hero", RevealConfig::default(), &mut viewport);
//!
//! let entry = viewport.intersect("hero", 0.5).unwrap();
//! manager.dispatch(&entry);
//! manager.advance(16.7);
//!
//! assert!(manager.is_visible("hero"));
//! ```

pub use unveil_engine::*;
