//! In-memory location with history

use crate::gate::Navigator;
use crate::utils::error::{GateError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

/// Current path plus the history of committed paths
#[derive(Debug)]
pub struct Location {
    state: Mutex<LocationState>,
}

#[derive(Debug)]
struct LocationState {
    history: Vec<String>,
}

impl Location {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(LocationState {
                history: vec![initial.into()],
            }),
        }
    }

    /// Get the current path
    pub fn path(&self) -> String {
        self.state.lock().history.last().cloned().unwrap_or_default()
    }

    /// Get every visited path, oldest first
    pub fn history(&self) -> Vec<String> {
        self.state.lock().history.clone()
    }

    /// Move to `path`. Navigating to the current path is a no-op.
    pub fn go(&self, path: &str) -> Result<()> {
        if !path.starts_with('/') {
            return Err(GateError::navigation(format!(
                "destination must be an absolute path, got '{}'",
                path
            )));
        }

        let mut state = self.state.lock();
        if state.history.last().map(String::as_str) != Some(path) {
            state.history.push(path.to_string());
        }
        Ok(())
    }

    /// Step back one entry; returns the new current path
    pub fn back(&self) -> Option<String> {
        let mut state = self.state.lock();
        if state.history.len() < 2 {
            return None;
        }
        state.history.pop();
        state.history.last().cloned()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

#[async_trait]
impl Navigator for Location {
    async fn redirect_to(&self, destination: &str) -> Result<()> {
        debug!(destination, "Location redirect");
        self.go(destination)
    }
}
