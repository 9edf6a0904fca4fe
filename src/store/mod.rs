//! Layout persistence
//!
//! Keyed store for per-monitor panel layouts and the last-used monitor.
//! Values survive process restarts; a missing entry always means "use
//! defaults" and is never an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::panel::planner::PanelLayout;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence gateway for panel layout state.
///
/// Only ever written from the single engine task, so a reader always sees
/// a fully written previous value.
pub trait LayoutStore {
    fn layout(&self, monitor_id: &str) -> Option<PanelLayout>;
    fn set_layout(&mut self, monitor_id: &str, layout: PanelLayout);
    fn last_monitor(&self) -> Option<String>;
    fn set_last_monitor(&mut self, monitor_id: &str);
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    layouts: HashMap<String, PanelLayout>,
    #[serde(default)]
    last_monitor: Option<String>,
}

/// In-memory store, used in tests and as a fallback when the on-disk
/// store cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryLayoutStore {
    data: StoreData,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn layout(&self, monitor_id: &str) -> Option<PanelLayout> {
        self.data.layouts.get(monitor_id).copied()
    }

    fn set_layout(&mut self, monitor_id: &str, layout: PanelLayout) {
        self.data.layouts.insert(monitor_id.to_string(), layout);
    }

    fn last_monitor(&self) -> Option<String> {
        self.data.last_monitor.clone()
    }

    fn set_last_monitor(&mut self, monitor_id: &str) {
        self.data.last_monitor = Some(monitor_id.to_string());
    }
}

/// JSON-file-backed store with write-through persistence.
///
/// Writes are best-effort: a failed flush is logged and the in-memory
/// state stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct FileLayoutStore {
    path: PathBuf,
    data: StoreData,
}

impl FileLayoutStore {
    /// Open the store at `path`, treating a missing file as empty.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let data = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            StoreData::default()
        };
        Ok(Self { path, data })
    }

    /// Open the store, starting empty when the file is unreadable.
    ///
    /// A corrupt store degrades to defaults rather than blocking startup;
    /// the next write replaces it.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    "unreadable layout store, starting empty: {err}"
                );
                Self {
                    path,
                    data: StoreData::default(),
                }
            }
        }
    }

    /// Default store location under the platform config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("macslide/layouts.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        if let Err(err) = self.try_flush() {
            tracing::warn!(path = %self.path.display(), "failed to persist layouts: {err}");
        }
    }

    fn try_flush(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl LayoutStore for FileLayoutStore {
    fn layout(&self, monitor_id: &str) -> Option<PanelLayout> {
        self.data.layouts.get(monitor_id).copied()
    }

    fn set_layout(&mut self, monitor_id: &str, layout: PanelLayout) {
        self.data.layouts.insert(monitor_id.to_string(), layout);
        self.flush();
    }

    fn last_monitor(&self) -> Option<String> {
        self.data.last_monitor.clone()
    }

    fn set_last_monitor(&mut self, monitor_id: &str) {
        self.data.last_monitor = Some(monitor_id.to_string());
        self.flush();
    }
}
