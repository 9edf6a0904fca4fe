//! Global hotkey trigger source
//!
//! The hotkey subsystem is an external collaborator: all the engine sees
//! is a no-argument "something happened" contract delivered as commands
//! over a channel. The hotkey always toggles; the edge gesture only
//! shows-if-hidden, so a gesture can never fight a user-initiated hide.

use tokio::sync::mpsc;

use super::traits::{InputError, InputResult};

/// Commands a trigger source can request of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    Toggle,
    ShowIfHidden,
}

/// Global shortcut listener.
///
/// On macOS the registration is Carbon `RegisterEventHotKey` (default
/// combo cmd+shift+space) with an `InstallEventHandler` callback posting
/// into this channel; `invalidate` mirrors `UnregisterEventHotKey` +
/// `RemoveEventHandler`.
pub struct HotkeyListener {
    // Held so the command channel stays open for the engine loop even
    // before any registration fires.
    tx: Option<mpsc::Sender<PanelCommand>>,
}

impl HotkeyListener {
    pub fn new() -> Self {
        Self { tx: None }
    }

    /// Register the shortcut and return the command stream.
    pub fn start(&mut self) -> InputResult<mpsc::Receiver<PanelCommand>> {
        if self.tx.is_some() {
            return Err(InputError::AlreadyStarted);
        }
        let (tx, rx) = mpsc::channel(16);
        self.tx = Some(tx);
        Ok(rx)
    }

    /// Sender half for the platform callback (and tests) to post
    /// commands through.
    pub fn sender(&self) -> Option<mpsc::Sender<PanelCommand>> {
        self.tx.clone()
    }

    /// Unregister the shortcut and close the command stream.
    pub fn invalidate(&mut self) {
        self.tx = None;
    }
}

impl Default for HotkeyListener {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commands_flow_through() {
        let mut listener = HotkeyListener::new();
        let mut rx = listener.start().unwrap();

        listener
            .sender()
            .unwrap()
            .send(PanelCommand::Toggle)
            .await
            .unwrap();
        assert_eq!(rx.recv().await, Some(PanelCommand::Toggle));

        // Invalidation closes the stream.
        listener.invalidate();
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_double_start_rejected() {
        let mut listener = HotkeyListener::new();
        let _rx = listener.start().unwrap();
        assert!(matches!(listener.start(), Err(InputError::AlreadyStarted)));
    }
}
