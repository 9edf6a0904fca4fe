//! Platform panel surface
//!
//! The state machine drives a rectangle-positionable container and never
//! looks inside it; content rendering belongs to whoever supplies the
//! surface. On macOS the real surface is an NSPanel with
//! `NSAnimationContext` transitions; [`VirtualPanel`] is the in-process
//! stand-in that models the same contract.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::screen::geometry::Rect;

/// Events delivered back from the surface to the engine loop
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A previously started animated transition finished
    AnimationDone,
    /// The user moved or resized the panel; carries the new frame
    FrameChanged(Rect),
}

/// Contract between the panel state machine and the platform window.
///
/// `animate_to` must not block; completion arrives later as a
/// [`PanelEvent::AnimationDone`] message on the engine loop. Starting a new
/// animation while one is in flight re-targets it (the platform layer
/// coalesces), so at most one completion is observed per settled frame.
pub trait PanelSurface {
    /// Current frame of the panel
    fn frame(&self) -> Rect;

    /// Snap to a frame immediately, with no animation
    fn set_frame(&mut self, frame: Rect);

    /// Begin an animated transition to `frame` with an ease-in-ease-out
    /// curve over `duration`.
    fn animate_to(&mut self, frame: Rect, duration: Duration);

    /// Put the panel above other windows without stealing key focus
    fn order_front(&mut self);

    /// Remove the panel from the window server's visible list so it can
    /// no longer intercept input.
    fn order_out(&mut self);

    /// Toggle interactive/focus mode. Enabled promotes the app to a
    /// regular foreground activation policy; disabled returns it to an
    /// accessory.
    fn set_interactive(&mut self, enabled: bool);
}

/// In-process panel surface.
///
/// Keeps the target frame in memory and schedules the animation
/// completion on the runtime after the requested duration, the same way
/// the AppKit animation layer would invoke its completion handler.
/// In a full deployment this is replaced by a surface backed by a real
/// NSPanel:
/// - `setFrame(_:display:)` for snaps
/// - `NSAnimationContext.runAnimationGroup` + `animator().setFrame` with
///   a `CAMediaTimingFunction(name: .easeInEaseOut)` curve
/// - `orderFrontRegardless()` / `orderOut(nil)`
/// - `NSApplication.setActivationPolicy` for interactive mode
pub struct VirtualPanel {
    frame: Rect,
    on_screen: bool,
    interactive: bool,
    events: mpsc::Sender<PanelEvent>,
}

impl VirtualPanel {
    pub fn new(events: mpsc::Sender<PanelEvent>) -> Self {
        Self {
            frame: Rect::default(),
            on_screen: false,
            interactive: false,
            events,
        }
    }

    pub fn is_on_screen(&self) -> bool {
        self.on_screen
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl PanelSurface for VirtualPanel {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        tracing::trace!(?frame, "panel snap");
        self.frame = frame;
    }

    fn animate_to(&mut self, frame: Rect, duration: Duration) {
        tracing::debug!(?frame, ?duration, "panel animation started");
        // The animation layer coalesces: the latest target wins and the
        // frame settles there.
        self.frame = frame;

        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = events.send(PanelEvent::AnimationDone).await;
        });
    }

    fn order_front(&mut self) {
        tracing::debug!("panel ordered front");
        self.on_screen = true;
    }

    fn order_out(&mut self) {
        tracing::debug!("panel ordered out");
        self.on_screen = false;
    }

    fn set_interactive(&mut self, enabled: bool) {
        tracing::debug!(enabled, "panel interactive mode");
        self.interactive = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_virtual_panel_reports_completion() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut panel = VirtualPanel::new(tx);

        panel.order_front();
        assert!(panel.is_on_screen());

        let target = Rect::new(1100.0, 73.6, 820.0, 760.0);
        panel.animate_to(target, Duration::from_millis(1));
        assert_eq!(panel.frame(), target);

        let event = rx.recv().await.unwrap();
        assert_eq!(event, PanelEvent::AnimationDone);

        panel.set_interactive(true);
        assert!(panel.is_interactive());
        panel.order_out();
        assert!(!panel.is_on_screen());
    }
}
