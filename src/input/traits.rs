//! Input trait definitions
//!
//! Common interface for the cursor-movement event sources that feed the
//! gesture detectors.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::screen::geometry::Point;

/// Errors that can occur while setting up input monitoring
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Cursor monitoring already started")]
    AlreadyStarted,

    #[error("Cursor monitoring not started")]
    NotStarted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InputResult<T> = Result<T, InputError>;

/// One cursor-position observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSample {
    pub position: Point,
}

/// Trait for streaming cursor movement from the local system.
///
/// The subscription is a scoped resource: `start` acquires it, `stop`
/// releases it exactly once, and the owner's lifecycle (not drop order)
/// decides when that happens.
#[async_trait]
pub trait CursorCapture: Send {
    /// Start monitoring; returns a receiver emitting a sample per
    /// observed movement.
    async fn start(&mut self) -> InputResult<mpsc::Receiver<CursorSample>>;

    /// Stop monitoring and release the OS subscription.
    async fn stop(&mut self) -> InputResult<()>;

    /// Check whether monitoring is currently active
    fn is_capturing(&self) -> bool;
}
