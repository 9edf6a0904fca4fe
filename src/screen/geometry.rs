//! Monitor geometry primitives
//!
//! All coordinates live in a single global space shared by every monitor,
//! with y increasing upward (AppKit convention). Monitor rectangles are
//! vertically uniform within that space.

use serde::{Deserialize, Serialize};

/// Nearest-monitor fallback tolerance in logical points.
///
/// The cursor can momentarily sit exactly between two monitors where no
/// rectangle contains it; within this distance the nearest monitor still
/// claims it.
pub const LOCATE_TOLERANCE: f64 = 2.0;

/// Tolerance for two facing monitor edges to count as touching.
pub const ADJACENCY_TOLERANCE: f64 = 1.0;

/// A point in global screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in global screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x < self.max_x() && p.y >= self.min_y() && p.y < self.max_y()
    }

    /// Distance from a point to the nearest point inside this rectangle
    /// (zero when the point is contained).
    pub fn distance_to(&self, p: Point) -> f64 {
        let cx = p.x.clamp(self.min_x(), self.max_x());
        let cy = p.y.clamp(self.min_y(), self.max_y());
        (p.x - cx).hypot(p.y - cy)
    }

    /// Area of the overlap between two rectangles.
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = self.max_x().min(other.max_x()) - self.min_x().max(other.min_x());
        let h = self.max_y().min(other.max_y()) - self.min_y().max(other.min_y());
        if w > 0.0 && h > 0.0 {
            w * h
        } else {
            0.0
        }
    }
}

/// One of the four screen edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Snapshot of one connected display.
///
/// Rebuilt from the live OS display list on every sample; only the `id`
/// and geometry derived from it are ever persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorDescriptor {
    /// Stable identifier (platform display number or name)
    pub id: String,
    /// Full rectangle of the display
    pub frame: Rect,
    /// Rectangle excluding system-reserved chrome (menu bar, dock)
    pub visible_frame: Rect,
}

impl MonitorDescriptor {
    pub fn new(id: impl Into<String>, frame: Rect, visible_frame: Rect) -> Self {
        Self {
            id: id.into(),
            frame,
            visible_frame,
        }
    }
}

/// Find the monitor under a cursor point.
///
/// Exact containment wins; otherwise the monitor nearest by clamped
/// Euclidean distance, but only within [`LOCATE_TOLERANCE`]. Returns `None`
/// when the cursor is momentarily between or outside all monitors.
pub fn locate_monitor<'a>(
    point: Point,
    monitors: &'a [MonitorDescriptor],
) -> Option<&'a MonitorDescriptor> {
    if let Some(exact) = monitors.iter().find(|m| m.frame.contains(point)) {
        return Some(exact);
    }

    let mut best: Option<&MonitorDescriptor> = None;
    let mut best_dist = f64::MAX;
    for monitor in monitors {
        let dist = monitor.frame.distance_to(point);
        if dist < best_dist {
            best_dist = dist;
            best = Some(monitor);
        }
    }

    if best_dist <= LOCATE_TOLERANCE {
        best
    } else {
        None
    }
}

/// Whether another monitor touches `monitor` on the given side.
///
/// True when some other monitor's facing edge is within
/// [`ADJACENCY_TOLERANCE`] and the spans on the perpendicular axis overlap
/// strictly; touching only at a corner does not count. A side with no
/// adjacent monitor is a true outer edge for gesture purposes.
pub fn has_adjacent_monitor(
    side: ScreenEdge,
    monitor: &MonitorDescriptor,
    monitors: &[MonitorDescriptor],
) -> bool {
    let f = monitor.frame;
    monitors
        .iter()
        .filter(|other| other.id != monitor.id)
        .any(|other| {
            let o = other.frame;
            match side {
                ScreenEdge::Right => {
                    (o.min_x() - f.max_x()).abs() <= ADJACENCY_TOLERANCE
                        && o.min_y() < f.max_y()
                        && o.max_y() > f.min_y()
                }
                ScreenEdge::Left => {
                    (f.min_x() - o.max_x()).abs() <= ADJACENCY_TOLERANCE
                        && o.min_y() < f.max_y()
                        && o.max_y() > f.min_y()
                }
                ScreenEdge::Top => {
                    (o.min_y() - f.max_y()).abs() <= ADJACENCY_TOLERANCE
                        && o.min_x() < f.max_x()
                        && o.max_x() > f.min_x()
                }
                ScreenEdge::Bottom => {
                    (f.min_y() - o.max_y()).abs() <= ADJACENCY_TOLERANCE
                        && o.min_x() < f.max_x()
                        && o.max_x() > f.min_x()
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(id: &str, x: f64, y: f64, w: f64, h: f64) -> MonitorDescriptor {
        let frame = Rect::new(x, y, w, h);
        MonitorDescriptor::new(id, frame, frame)
    }

    #[test]
    fn test_locate_exact_containment() {
        let monitors = vec![
            monitor("a", 0.0, 0.0, 1920.0, 1080.0),
            monitor("b", 1920.0, 0.0, 1920.0, 1080.0),
        ];

        let found = locate_monitor(Point::new(100.0, 100.0), &monitors).unwrap();
        assert_eq!(found.id, "a");

        let found = locate_monitor(Point::new(2000.0, 100.0), &monitors).unwrap();
        assert_eq!(found.id, "b");
    }

    #[test]
    fn test_locate_nearest_within_tolerance() {
        // Gap boundary: x == 1920 is not contained by "a" (exclusive max)
        // and "b" starts at 1925.
        let monitors = vec![
            monitor("a", 0.0, 0.0, 1920.0, 1080.0),
            monitor("b", 1925.0, 0.0, 1920.0, 1080.0),
        ];

        let found = locate_monitor(Point::new(1921.5, 500.0), &monitors).unwrap();
        assert_eq!(found.id, "a");
    }

    #[test]
    fn test_locate_none_beyond_tolerance() {
        let monitors = vec![monitor("a", 0.0, 0.0, 1920.0, 1080.0)];
        assert!(locate_monitor(Point::new(1925.0, 500.0), &monitors).is_none());
        assert!(locate_monitor(Point::new(-3.0, 500.0), &monitors).is_none());
    }

    #[test]
    fn test_locate_empty_list() {
        assert!(locate_monitor(Point::new(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn test_adjacency_symmetry() {
        let a = monitor("a", 0.0, 0.0, 1920.0, 1080.0);
        let b = monitor("b", 1920.0, 0.0, 1920.0, 1080.0);
        let monitors = vec![a.clone(), b.clone()];

        assert!(has_adjacent_monitor(ScreenEdge::Right, &a, &monitors));
        assert!(has_adjacent_monitor(ScreenEdge::Left, &b, &monitors));
        // The outer sides stay true outer edges.
        assert!(!has_adjacent_monitor(ScreenEdge::Left, &a, &monitors));
        assert!(!has_adjacent_monitor(ScreenEdge::Right, &b, &monitors));
    }

    #[test]
    fn test_adjacency_vertical_stack() {
        let a = monitor("a", 0.0, 0.0, 1920.0, 1080.0);
        let b = monitor("b", 0.0, 1080.0, 1920.0, 1080.0);
        let monitors = vec![a.clone(), b.clone()];

        assert!(has_adjacent_monitor(ScreenEdge::Top, &a, &monitors));
        assert!(has_adjacent_monitor(ScreenEdge::Bottom, &b, &monitors));
    }

    #[test]
    fn test_adjacency_within_pixel_tolerance() {
        let a = monitor("a", 0.0, 0.0, 1920.0, 1080.0);
        // Half-pixel gap from rounding still counts as touching.
        let b = monitor("b", 1920.5, 0.0, 1920.0, 1080.0);
        let monitors = vec![a.clone(), b.clone()];

        assert!(has_adjacent_monitor(ScreenEdge::Right, &a, &monitors));
    }

    #[test]
    fn test_corner_touch_is_not_adjacent() {
        let a = monitor("a", 0.0, 0.0, 1920.0, 1080.0);
        // Touches only at the corner (1920, 1080): spans do not overlap.
        let b = monitor("b", 1920.0, 1080.0, 1920.0, 1080.0);
        let monitors = vec![a.clone(), b.clone()];

        assert!(!has_adjacent_monitor(ScreenEdge::Right, &a, &monitors));
        assert!(!has_adjacent_monitor(ScreenEdge::Top, &a, &monitors));
        assert!(!has_adjacent_monitor(ScreenEdge::Left, &b, &monitors));
    }

    #[test]
    fn test_intersection_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 10.0, 10.0);

        assert_eq!(a.intersection_area(&b), 25.0);
        assert_eq!(a.intersection_area(&c), 0.0);
    }
}
