//! Panel show/hide orchestration
//!
//! Drives the panel through Hidden -> Showing -> Visible -> Hiding,
//! planning frames through the planner and applying them through the
//! [`PanelSurface`] seam. All calls happen on the single engine task;
//! there is no locking and no shared mutable state.

use std::time::{Duration, Instant};

use super::planner::{self, PlannerConfig, Size};
use super::surface::PanelSurface;
use crate::screen::geometry::{MonitorDescriptor, Point, Rect};
use crate::store::LayoutStore;

/// Timing and sizing parameters for the state machine
#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub planner: PlannerConfig,
    /// How long the cursor must stay outside the panel before auto-hide
    pub auto_hide_delay: Duration,
    /// Duration of the slide animation
    pub animation: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            planner: PlannerConfig::default(),
            auto_hide_delay: Duration::from_millis(500),
            animation: Duration::from_millis(350),
        }
    }
}

/// Visibility state of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    Showing,
    Visible,
    Hiding,
}

impl PanelState {
    /// Showing counts as visible so repeated triggers mid-animation do
    /// not restart the transition.
    pub fn is_visible(self) -> bool {
        matches!(self, PanelState::Showing | PanelState::Visible)
    }
}

/// Panel show/hide state machine
pub struct PanelController<S: PanelSurface, P: LayoutStore> {
    surface: S,
    store: P,
    config: PanelConfig,
    state: PanelState,
    /// Last in-memory panel size, fed to the planner when nothing is
    /// persisted for the target monitor
    last_size: Option<Size>,
    /// When the cursor left the panel bounds, `None` while inside
    outside_since: Option<Instant>,
    interactive: bool,
}

impl<S: PanelSurface, P: LayoutStore> PanelController<S, P> {
    pub fn new(surface: S, store: P, config: PanelConfig) -> Self {
        Self {
            surface,
            store,
            config,
            state: PanelState::Hidden,
            last_size: None,
            outside_since: None,
            interactive: false,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Park the panel at the off-screen frame of the resolved monitor
    /// without showing it.
    pub fn prepare(&mut self, cursor: Point, monitors: &[MonitorDescriptor]) {
        if let Some(target) = self.resolve_show_monitor(cursor, monitors) {
            let hidden = self.plan(&target, false);
            self.surface.set_frame(hidden);
        }
    }

    pub fn toggle(&mut self, cursor: Point, monitors: &[MonitorDescriptor]) {
        if self.state.is_visible() {
            self.hide(cursor, monitors);
        } else {
            self.show(cursor, monitors);
        }
    }

    /// Show unless already visible. Used by the edge gesture so repeated
    /// triggers cannot fight a user-initiated hide or restart an
    /// animation in flight.
    pub fn show_if_hidden(&mut self, cursor: Point, monitors: &[MonitorDescriptor]) {
        if self.state.is_visible() {
            return;
        }
        self.show(cursor, monitors);
    }

    /// Slide the panel in on the monitor under the cursor, falling back
    /// to the last-used monitor, then the system default.
    pub fn show(&mut self, cursor: Point, monitors: &[MonitorDescriptor]) {
        let Some(target) = self.resolve_show_monitor(cursor, monitors) else {
            tracing::debug!("show ignored: no resolvable monitor");
            return;
        };

        // Snap to the target monitor's off-screen frame before animating
        // so the slide never flashes in from a stale monitor's position.
        let hidden = self.plan(&target, false);
        self.surface.set_frame(hidden);
        self.surface.order_front();

        let shown = self.plan(&target, true);
        self.surface.animate_to(shown, self.config.animation);
        self.state = PanelState::Showing;
        self.outside_since = None;
        tracing::debug!(monitor = %target.id, "panel showing");
    }

    /// Slide the panel out on the monitor currently hosting it.
    pub fn hide(&mut self, cursor: Point, monitors: &[MonitorDescriptor]) {
        let Some(target) = self.resolve_hide_monitor(cursor, monitors) else {
            tracing::debug!("hide ignored: no resolvable monitor");
            return;
        };

        if self.interactive {
            self.set_interactive(false);
        }

        let hidden = self.plan(&target, false);
        self.surface.animate_to(hidden, self.config.animation);
        self.state = PanelState::Hiding;
        self.outside_since = None;
        tracing::debug!(monitor = %target.id, "panel hiding");
    }

    /// Completion continuation for the in-flight animation.
    ///
    /// Only the current direction is honored; a completion left over from
    /// a transition that was re-targeted in the opposite direction is
    /// ignored, so the newest intent always wins.
    pub fn animation_finished(&mut self) {
        match self.state {
            PanelState::Showing => {
                self.state = PanelState::Visible;
                tracing::debug!("panel visible");
            }
            PanelState::Hiding => {
                // Fully remove the panel so it stops intercepting input.
                self.surface.order_out();
                self.state = PanelState::Hidden;
                tracing::debug!("panel hidden");
            }
            PanelState::Hidden | PanelState::Visible => {
                tracing::trace!(state = ?self.state, "stale animation completion ignored");
            }
        }
    }

    /// Auto-hide evaluation, fed by the mouse event stream and the
    /// fallback poll while the panel is visible. Hides after the cursor
    /// has been continuously outside the panel frame for the idle delay;
    /// re-entry at any point resets the timer.
    pub fn sample_cursor(&mut self, now: Instant, cursor: Point, monitors: &[MonitorDescriptor]) {
        if !self.state.is_visible() {
            return;
        }

        if self.surface.frame().contains(cursor) {
            self.outside_since = None;
            return;
        }

        let outside = *self.outside_since.get_or_insert(now);
        if now.saturating_duration_since(outside) >= self.config.auto_hide_delay {
            tracing::debug!("auto-hide after idle");
            self.hide(cursor, monitors);
        }
    }

    /// Move/resize hook: persist the layout and last-used monitor for the
    /// monitor hosting the new frame.
    pub fn record_layout(&mut self, frame: Rect, monitors: &[MonitorDescriptor]) {
        let Some(monitor) = Self::hosting_monitor(frame, monitors) else {
            return;
        };

        self.last_size = Some(Size::new(frame.width, frame.height));
        let layout = planner::layout_for_frame(frame, &monitor);
        self.store.set_layout(&monitor.id, layout);
        self.store.set_last_monitor(&monitor.id);
        tracing::debug!(monitor = %monitor.id, ?layout, "panel layout recorded");
    }

    /// Enable or disable interactive/focus mode on the surface.
    pub fn set_interactive(&mut self, enabled: bool) {
        self.surface.set_interactive(enabled);
        self.interactive = enabled;
    }

    fn plan(&self, monitor: &MonitorDescriptor, visible: bool) -> Rect {
        let saved = self.store.layout(&monitor.id);
        planner::compute_frame(
            monitor,
            visible,
            saved.as_ref(),
            self.last_size,
            &self.config.planner,
        )
    }

    /// Target chain for show: monitor under the cursor, then the
    /// persisted last-used monitor, then the system default.
    fn resolve_show_monitor(
        &self,
        cursor: Point,
        monitors: &[MonitorDescriptor],
    ) -> Option<MonitorDescriptor> {
        monitors
            .iter()
            .find(|m| m.frame.contains(cursor))
            .or_else(|| {
                let last = self.store.last_monitor()?;
                monitors.iter().find(|m| m.id == last)
            })
            .or_else(|| monitors.first())
            .cloned()
    }

    /// Target chain for hide: the monitor hosting the panel, then the
    /// monitor under the cursor, then the system default.
    fn resolve_hide_monitor(
        &self,
        cursor: Point,
        monitors: &[MonitorDescriptor],
    ) -> Option<MonitorDescriptor> {
        Self::hosting_monitor(self.surface.frame(), monitors)
            .or_else(|| monitors.iter().find(|m| m.frame.contains(cursor)).cloned())
            .or_else(|| monitors.first().cloned())
    }

    /// The monitor with the largest overlap with `frame`.
    fn hosting_monitor(frame: Rect, monitors: &[MonitorDescriptor]) -> Option<MonitorDescriptor> {
        monitors
            .iter()
            .map(|m| (m, m.frame.intersection_area(&frame)))
            .filter(|(_, area)| *area > 0.0)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(m, _)| m.clone())
    }
}
