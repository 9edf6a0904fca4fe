//! Panel frame planning
//!
//! Pure geometry: given a target monitor, a visibility intent and the
//! persisted per-monitor layout, compute where the panel goes. The caller
//! supplies the persisted layout; no I/O happens here.

use serde::{Deserialize, Serialize};

use crate::screen::geometry::{MonitorDescriptor, Rect};

/// A width/height pair in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Persisted per-monitor panel layout preference.
///
/// `y_ratio` is the normalized position of the panel's vertical midpoint
/// within the monitor's usable height, 0.0 at the bottom, 1.0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub width: f64,
    pub height: f64,
    pub y_ratio: f64,
}

/// Static sizing parameters for the planner
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Size used when nothing is persisted and no in-memory size exists
    pub default_size: Size,
    /// Hard lower bound on the panel size
    pub min_size: Size,
    /// How far the panel protrudes when hidden; 0 means fully off-screen
    pub peek_offset: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_size: Size::new(800.0, 900.0),
            min_size: Size::new(320.0, 360.0),
            peek_offset: 0.0,
        }
    }
}

/// Compute the panel frame on `monitor` for the given visibility intent.
///
/// Size preference order: persisted layout, then `fallback_size` (the
/// panel's last in-memory size), then the configured default. Width is
/// floored at the minimum; height is clamped between the minimum and the
/// monitor's usable height. When visible the panel sits flush against the
/// usable frame's right edge; when hidden it sits just past it, offset
/// only by the peek distance.
pub fn compute_frame(
    monitor: &MonitorDescriptor,
    visible: bool,
    saved: Option<&PanelLayout>,
    fallback_size: Option<Size>,
    config: &PlannerConfig,
) -> Rect {
    let usable = monitor.visible_frame;

    let requested = saved
        .map(|l| Size::new(l.width, l.height))
        .or(fallback_size)
        .unwrap_or(config.default_size);
    let width = requested.width.max(config.min_size.width);
    let height = requested
        .height
        .max(config.min_size.height)
        .min(usable.height);

    let x = if visible {
        usable.max_x() - width
    } else {
        usable.max_x() - config.peek_offset
    };

    let y = match saved {
        Some(layout) => {
            let ratio = layout.y_ratio.clamp(0.0, 1.0);
            let mid_y = usable.min_y() + usable.height * ratio;
            mid_y - height / 2.0
        }
        None => usable.min_y() + (usable.height - height) / 2.0,
    };

    Rect::new(x, y, width, height)
}

/// Derive the persistable layout from a panel frame on `monitor`.
///
/// Inverse of the vertical placement in [`compute_frame`]; used by the
/// move/resize hook to record where the user put the panel.
pub fn layout_for_frame(frame: Rect, monitor: &MonitorDescriptor) -> PanelLayout {
    let usable = monitor.visible_frame;
    PanelLayout {
        width: frame.width,
        height: frame.height,
        y_ratio: (frame.mid_y() - usable.min_y()) / usable.height.max(1.0),
    }
}
