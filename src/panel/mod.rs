//! Panel module
//!
//! Handles:
//! - Frame planning for the slide-out panel
//! - The show/hide state machine and auto-hide
//! - The platform surface seam

pub mod controller;
pub mod planner;
pub mod surface;

pub use controller::{PanelConfig, PanelController, PanelState};
pub use planner::{PanelLayout, PlannerConfig, Size};
pub use surface::{PanelEvent, PanelSurface, VirtualPanel};
