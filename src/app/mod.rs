//! Application orchestration layer
//!
//! This module coordinates between the domain, UI and platform layers.
//! It holds the UI state machine and the controller that applies its
//! effects.

pub mod controller;
pub mod state;
