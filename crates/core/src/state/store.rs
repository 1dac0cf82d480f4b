//! # Session Store
//!
//! Holds the live session for rendering plus a capped, deduplicated
//! history of completed sessions for reload.
//!
//! Only fully-completed sessions are admitted to history; failed runs stay
//! inspectable through `current` but are never persisted.

use anyhow::{Context, Result};
use std::sync::Mutex;

use super::db::StudioDb;
use crate::pipeline::session::StudioSession;

/// Maximum number of completed sessions retained
pub const HISTORY_LIMIT: usize = 10;

/// Live session snapshot plus persisted history
pub struct SessionStore {
    current: Mutex<Option<StudioSession>>,
    db: StudioDb,
}

impl SessionStore {
    /// Create a store over an opened database
    pub fn new(db: StudioDb) -> Self {
        Self {
            current: Mutex::new(None),
            db,
        }
    }

    /// The in-progress or last-run session, if any
    pub fn current(&self) -> Option<StudioSession> {
        self.current.lock().ok().and_then(|guard| guard.clone())
    }

    /// Publish a new snapshot of the live session
    pub fn set_current(&self, session: StudioSession) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = Some(session);
        }
    }

    /// Clear the live session (the user's reset action)
    pub fn clear_current(&self) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = None;
        }
    }

    /// Load persisted history, most recent first
    ///
    /// Unreadable or corrupt stored data is treated as no history; it is
    /// logged but never surfaced as a failure.
    pub fn load_history(&self) -> Vec<StudioSession> {
        let raw = match self.db.read_history_json() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read session history: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Discarding corrupt session history: {}", e);
                Vec::new()
            }
        }
    }

    /// Most recently completed session, if any (the reload action)
    pub fn load_latest(&self) -> Option<StudioSession> {
        self.load_history().into_iter().next()
    }

    /// Admit a session into history if every step completed
    ///
    /// Prepends, removes any prior entry with the same id, truncates to the
    /// [`HISTORY_LIMIT`] most recent, and persists. Returns whether the
    /// session was admitted.
    pub fn record_if_complete(&self, session: &StudioSession) -> Result<bool> {
        if !session.is_complete() {
            return Ok(false);
        }

        let mut history = self.load_history();
        history.retain(|s| s.id != session.id);
        history.insert(0, session.clone());
        history.truncate(HISTORY_LIMIT);

        self.persist(&history)?;
        Ok(true)
    }

    /// Durably store the full history, replacing prior content
    pub fn persist(&self, history: &[StudioSession]) -> Result<()> {
        let data = serde_json::to_string(history).context("Failed to serialize history")?;
        self.db.write_history_json(&data)
    }
}
