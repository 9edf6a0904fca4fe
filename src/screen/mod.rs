//! Screen management module
//!
//! Handles:
//! - Monitor geometry and edge adjacency
//! - Edge gesture detection
//! - Live monitor/cursor snapshots from the OS

pub mod edge_monitor;
pub mod geometry;

pub use edge_monitor::{EdgeMonitor, EdgeSample, EdgeTriggerConfig};
pub use geometry::{
    has_adjacent_monitor, locate_monitor, MonitorDescriptor, Point, Rect, ScreenEdge,
};

/// Source of live display-list and cursor-position snapshots.
///
/// The detectors never cache monitor geometry; they ask for a fresh
/// snapshot on every sample so display reconfiguration is picked up
/// immediately.
pub trait ScreenSource {
    fn monitors(&self) -> Vec<MonitorDescriptor>;
    fn cursor_position(&self) -> Point;
}

/// Monitor snapshots backed by the platform display list
#[derive(Debug, Default)]
pub struct SystemScreens;

impl SystemScreens {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "macos")]
impl ScreenSource for SystemScreens {
    fn monitors(&self) -> Vec<MonitorDescriptor> {
        use core_graphics::display::CGDisplay;

        // CG bounds use a top-left origin with y growing downward; flip
        // against the main display height into our y-up space.
        let main_height = CGDisplay::main().bounds().size.height;

        let ids = match CGDisplay::active_displays() {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!("failed to enumerate displays: CGError {:?}", err);
                return Vec::new();
            }
        };

        ids.into_iter()
            .map(|id| {
                let bounds = CGDisplay::new(id).bounds();
                let frame = Rect::new(
                    bounds.origin.x,
                    main_height - (bounds.origin.y + bounds.size.height),
                    bounds.size.width,
                    bounds.size.height,
                );
                // The menu bar / dock insets are only visible through
                // AppKit (NSScreen.visibleFrame); at the CG level the full
                // frame is the best available usable area.
                MonitorDescriptor::new(id.to_string(), frame, frame)
            })
            .collect()
    }

    fn cursor_position(&self) -> Point {
        use core_graphics::display::CGDisplay;
        use core_graphics::event::CGEvent;
        use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

        let location = CGEventSource::new(CGEventSourceStateID::CombinedSessionState)
            .and_then(CGEvent::new)
            .map(|event| event.location());

        match location {
            Ok(loc) => {
                let main_height = CGDisplay::main().bounds().size.height;
                Point::new(loc.x, main_height - loc.y)
            }
            Err(()) => {
                tracing::warn!("failed to read cursor location");
                Point::default()
            }
        }
    }
}

#[cfg(not(target_os = "macos"))]
impl ScreenSource for SystemScreens {
    fn monitors(&self) -> Vec<MonitorDescriptor> {
        // No display server integration on this platform; present a single
        // default monitor so the engine stays exercisable.
        let frame = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        vec![MonitorDescriptor::new("main", frame, frame)]
    }

    fn cursor_position(&self) -> Point {
        Point::default()
    }
}
