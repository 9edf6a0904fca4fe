//! Screen edge gesture detection
//!
//! Detects when the cursor dwells at a true outer screen edge and should
//! trigger the panel. Both the OS mouse-movement event stream and the
//! fallback poll timer feed the same [`EdgeMonitor::sample`] entry point;
//! there is no separate code path for either source.

use std::time::{Duration, Instant};

use super::geometry::{has_adjacent_monitor, locate_monitor, MonitorDescriptor, Point, ScreenEdge};

/// Configuration for edge gesture detection
#[derive(Debug, Clone)]
pub struct EdgeTriggerConfig {
    /// Edge that triggers the gesture
    pub edge: ScreenEdge,
    /// Distance in points from the edge that counts as a hit
    pub threshold: f64,
    /// Minimum continuous time in the hit zone before firing
    pub dwell: Duration,
    /// Minimum spacing between consecutive fires
    pub cooldown: Duration,
}

impl EdgeTriggerConfig {
    /// Threshold is floored at 1 point and cooldown at 100ms so a
    /// misconfigured zero can never produce a hair-trigger edge.
    pub fn new(edge: ScreenEdge, threshold: f64, dwell: Duration, cooldown: Duration) -> Self {
        Self {
            edge,
            threshold: threshold.max(1.0),
            dwell,
            cooldown: cooldown.max(Duration::from_millis(100)),
        }
    }
}

impl Default for EdgeTriggerConfig {
    fn default() -> Self {
        Self::new(
            ScreenEdge::Right,
            2.0,
            Duration::from_millis(150),
            Duration::from_millis(600),
        )
    }
}

/// Result of one cursor sample
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeSample {
    /// Cursor is not in the hit zone (or not on any monitor)
    Idle,
    /// Cursor is in the hit zone, waiting out the dwell time
    Dwelling { remaining: Duration },
    /// Dwell and cooldown are satisfied; the gesture fires once
    Triggered,
}

/// Dwell-gated detector for edge gestures.
///
/// Pure state over cursor samples: the caller owns the event subscriptions
/// and timers that produce them and tears those down explicitly.
pub struct EdgeMonitor {
    config: EdgeTriggerConfig,
    /// When the cursor entered the hit zone, `None` while outside
    entered_at: Option<Instant>,
    /// Last successful trigger, `None` if never fired
    last_trigger: Option<Instant>,
    /// Monitor that resolved the previous sample
    last_monitor: Option<String>,
}

impl EdgeMonitor {
    pub fn new(config: EdgeTriggerConfig) -> Self {
        Self {
            config,
            entered_at: None,
            last_trigger: None,
            last_monitor: None,
        }
    }

    pub fn config(&self) -> &EdgeTriggerConfig {
        &self.config
    }

    /// Process one cursor position sample.
    ///
    /// With no resolvable monitor the detector is inert. A jump to a
    /// different monitor resets the dwell clock before the hit test, so
    /// dwell accumulated on one display never carries to another.
    pub fn sample(
        &mut self,
        now: Instant,
        cursor: Point,
        monitors: &[MonitorDescriptor],
    ) -> EdgeSample {
        let Some(monitor) = locate_monitor(cursor, monitors) else {
            self.entered_at = None;
            return EdgeSample::Idle;
        };

        if self.last_monitor.as_deref() != Some(monitor.id.as_str()) {
            self.entered_at = None;
            self.last_monitor = Some(monitor.id.clone());
        }

        if !self.is_edge_hit(cursor, monitor, monitors) {
            self.entered_at = None;
            return EdgeSample::Idle;
        }

        let entered = *self.entered_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(entered);

        if elapsed < self.config.dwell {
            return EdgeSample::Dwelling {
                remaining: self.config.dwell - elapsed,
            };
        }

        if !self.cooldown_satisfied(now) {
            // Dwell complete but still inside the cooldown window; keep
            // dwelling rather than re-arming from scratch.
            return EdgeSample::Dwelling {
                remaining: Duration::ZERO,
            };
        }

        self.last_trigger = Some(now);
        self.entered_at = None;
        EdgeSample::Triggered
    }

    /// Forget any accumulated dwell and monitor tracking.
    pub fn reset(&mut self) {
        self.entered_at = None;
        self.last_monitor = None;
    }

    /// Hit test against the usable-frame boundary of the configured edge.
    ///
    /// Seams between adjacent monitors never count: the gesture only fires
    /// on a true outer edge.
    fn is_edge_hit(
        &self,
        cursor: Point,
        monitor: &MonitorDescriptor,
        monitors: &[MonitorDescriptor],
    ) -> bool {
        if has_adjacent_monitor(self.config.edge, monitor, monitors) {
            return false;
        }
        let frame = monitor.visible_frame;
        let threshold = self.config.threshold;
        match self.config.edge {
            ScreenEdge::Left => cursor.x <= frame.min_x() + threshold,
            ScreenEdge::Right => cursor.x >= frame.max_x() - threshold,
            ScreenEdge::Top => cursor.y >= frame.max_y() - threshold,
            ScreenEdge::Bottom => cursor.y <= frame.min_y() + threshold,
        }
    }

    fn cooldown_satisfied(&self, now: Instant) -> bool {
        match self.last_trigger {
            Some(last) => now.saturating_duration_since(last) >= self.config.cooldown,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::geometry::Rect;

    fn monitor(id: &str, x: f64, y: f64, w: f64, h: f64) -> MonitorDescriptor {
        let frame = Rect::new(x, y, w, h);
        MonitorDescriptor::new(id, frame, frame)
    }

    fn right_edge_config() -> EdgeTriggerConfig {
        EdgeTriggerConfig::new(
            ScreenEdge::Right,
            2.0,
            Duration::from_millis(150),
            Duration::from_millis(600),
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_dwell_gating() {
        let monitors = vec![monitor("a", 0.0, 0.0, 1920.0, 1080.0)];
        let mut detector = EdgeMonitor::new(right_edge_config());
        let t0 = Instant::now();
        let at_edge = Point::new(1919.0, 500.0);

        assert!(matches!(
            detector.sample(t0, at_edge, &monitors),
            EdgeSample::Dwelling { .. }
        ));
        // Just short of the dwell time: still waiting.
        assert!(matches!(
            detector.sample(t0 + ms(149), at_edge, &monitors),
            EdgeSample::Dwelling { .. }
        ));
        // Past the dwell time: fires exactly once.
        assert_eq!(
            detector.sample(t0 + ms(151), at_edge, &monitors),
            EdgeSample::Triggered
        );
    }

    #[test]
    fn test_leaving_zone_resets_dwell() {
        let monitors = vec![monitor("a", 0.0, 0.0, 1920.0, 1080.0)];
        let mut detector = EdgeMonitor::new(right_edge_config());
        let t0 = Instant::now();

        detector.sample(t0, Point::new(1919.0, 500.0), &monitors);
        // Step away from the edge mid-dwell.
        assert_eq!(
            detector.sample(t0 + ms(100), Point::new(900.0, 500.0), &monitors),
            EdgeSample::Idle
        );
        // Re-entry starts a fresh dwell period.
        assert!(matches!(
            detector.sample(t0 + ms(120), Point::new(1919.0, 500.0), &monitors),
            EdgeSample::Dwelling { .. }
        ));
        assert!(matches!(
            detector.sample(t0 + ms(200), Point::new(1919.0, 500.0), &monitors),
            EdgeSample::Dwelling { .. }
        ));
        assert_eq!(
            detector.sample(t0 + ms(280), Point::new(1919.0, 500.0), &monitors),
            EdgeSample::Triggered
        );
    }

    #[test]
    fn test_cooldown_gating() {
        let monitors = vec![monitor("a", 0.0, 0.0, 1920.0, 1080.0)];
        let mut detector = EdgeMonitor::new(right_edge_config());
        let t0 = Instant::now();
        let at_edge = Point::new(1919.0, 500.0);

        detector.sample(t0, at_edge, &monitors);
        assert_eq!(
            detector.sample(t0 + ms(200), at_edge, &monitors),
            EdgeSample::Triggered
        );

        // Second qualifying dwell inside the cooldown window: suppressed.
        detector.sample(t0 + ms(300), at_edge, &monitors);
        assert!(matches!(
            detector.sample(t0 + ms(500), at_edge, &monitors),
            EdgeSample::Dwelling { .. }
        ));

        // Past the cooldown it fires again.
        assert_eq!(
            detector.sample(t0 + ms(900), at_edge, &monitors),
            EdgeSample::Triggered
        );
    }

    #[test]
    fn test_no_trigger_on_seam() {
        // Two side-by-side monitors: the shared boundary is a seam, not an
        // outer edge, and dwelling there must never fire.
        let monitors = vec![
            monitor("a", 0.0, 0.0, 1920.0, 1080.0),
            monitor("b", 1920.0, 0.0, 1920.0, 1080.0),
        ];
        let mut detector = EdgeMonitor::new(right_edge_config());
        let t0 = Instant::now();
        let at_seam = Point::new(1919.0, 500.0);

        for i in 0..20 {
            assert_eq!(
                detector.sample(t0 + ms(i * 100), at_seam, &monitors),
                EdgeSample::Idle
            );
        }

        // The rightmost monitor's outer edge still works.
        let outer = Point::new(3839.0, 500.0);
        detector.sample(t0 + ms(2100), outer, &monitors);
        assert_eq!(
            detector.sample(t0 + ms(2300), outer, &monitors),
            EdgeSample::Triggered
        );
    }

    #[test]
    fn test_monitor_switch_resets_dwell() {
        // Stacked monitors so both right edges are true outer edges.
        let monitors = vec![
            monitor("a", 0.0, 0.0, 1920.0, 1080.0),
            monitor("b", 0.0, 1080.0, 1920.0, 1080.0),
        ];
        let mut detector = EdgeMonitor::new(right_edge_config());
        let t0 = Instant::now();

        // 80% of the dwell accumulated on monitor "a".
        detector.sample(t0, Point::new(1919.0, 500.0), &monitors);
        assert!(matches!(
            detector.sample(t0 + ms(120), Point::new(1919.0, 500.0), &monitors),
            EdgeSample::Dwelling { .. }
        ));

        // Jump straight to monitor "b"'s hit zone: inherited dwell would
        // fire at t0+150, but the switch resets the clock.
        assert!(matches!(
            detector.sample(t0 + ms(130), Point::new(1919.0, 1500.0), &monitors),
            EdgeSample::Dwelling { .. }
        ));
        assert!(matches!(
            detector.sample(t0 + ms(200), Point::new(1919.0, 1500.0), &monitors),
            EdgeSample::Dwelling { .. }
        ));
        // A full fresh dwell period on "b" fires.
        assert_eq!(
            detector.sample(t0 + ms(290), Point::new(1919.0, 1500.0), &monitors),
            EdgeSample::Triggered
        );
    }

    #[test]
    fn test_inert_without_monitors() {
        let mut detector = EdgeMonitor::new(right_edge_config());
        let t0 = Instant::now();

        assert_eq!(
            detector.sample(t0, Point::new(1919.0, 500.0), &[]),
            EdgeSample::Idle
        );
        assert_eq!(
            detector.sample(t0 + ms(500), Point::new(1919.0, 500.0), &[]),
            EdgeSample::Idle
        );
    }

    #[test]
    fn test_reset_clears_dwell() {
        let monitors = vec![monitor("a", 0.0, 0.0, 1920.0, 1080.0)];
        let mut detector = EdgeMonitor::new(right_edge_config());
        let t0 = Instant::now();
        let at_edge = Point::new(1919.0, 500.0);

        detector.sample(t0, at_edge, &monitors);
        detector.reset();

        // Dwell restarts from the reset, not from the original entry.
        assert!(matches!(
            detector.sample(t0 + ms(140), at_edge, &monitors),
            EdgeSample::Dwelling { .. }
        ));
        assert_eq!(detector.config().edge, ScreenEdge::Right);
    }

    #[test]
    fn test_config_floors() {
        let config =
            EdgeTriggerConfig::new(ScreenEdge::Left, 0.0, Duration::ZERO, Duration::ZERO);
        assert_eq!(config.threshold, 1.0);
        assert_eq!(config.cooldown, Duration::from_millis(100));
    }

    #[test]
    fn test_bottom_edge_hit() {
        let monitors = vec![monitor("a", 0.0, 0.0, 1920.0, 1080.0)];
        let config = EdgeTriggerConfig::new(
            ScreenEdge::Bottom,
            2.0,
            Duration::from_millis(150),
            Duration::from_millis(600),
        );
        let mut detector = EdgeMonitor::new(config);
        let t0 = Instant::now();

        detector.sample(t0, Point::new(900.0, 1.0), &monitors);
        assert_eq!(
            detector.sample(t0 + ms(200), Point::new(900.0, 1.0), &monitors),
            EdgeSample::Triggered
        );
    }
}
