//! Input module - cursor movement and trigger sources
//!
//! This module provides abstractions for:
//! - Streaming global cursor movement (the gesture detectors' feed)
//! - The global hotkey trigger source

mod cursor;
mod hotkey;
mod traits;

pub use cursor::SystemCursorCapture;
pub use hotkey::{HotkeyListener, PanelCommand};
pub use traits::{CursorCapture, CursorSample, InputError, InputResult};

/// Get the current platform name
pub fn platform_name() -> &'static str {
    #[cfg(target_os = "macos")]
    return "macOS";

    #[cfg(target_os = "linux")]
    return "Linux";

    #[cfg(target_os = "windows")]
    return "Windows";

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    return "Unknown";
}
