//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard, pointer, touch)
//! - Frame timing (fixed-step accumulator)
//! - HUD text
//!
//! Storage lives in [`crate::persistence`], sound in [`crate::audio`].

pub mod hud;
pub mod input;
pub mod time;

pub use hud::HudText;
pub use input::{Action, Binding, RawInput, translate};
pub use time::FixedStep;
