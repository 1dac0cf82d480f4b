//! # Pipeline Events
//!
//! Human-readable trace entries emitted as the run progresses.
//!
//! This is an observability stream for consoles and UIs, not part of the
//! session data model; dropping it never affects run correctness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of pipeline event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineEventKind {
    /// Run initialized
    PipelineStarted,
    /// Agent transitioned to active
    AgentActivated,
    /// Agent completed successfully
    AgentCompleted,
    /// Agent's service call failed
    AgentFailed,
    /// All four steps completed
    PipelineCompleted,
    /// Run aborted on the first failure
    PipelineFailed,
}

/// An entry in the run's trace log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// Unique event ID
    pub id: String,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Kind of event
    pub kind: PipelineEventKind,
    /// Agent (or "pipeline") that produced this event
    pub agent: String,
    /// Human-readable description
    pub message: String,
}

impl PipelineEvent {
    /// Create a new event
    pub fn new(kind: PipelineEventKind, agent: &str, message: impl Into<String>) -> Self {
        Self {
            id: super::session::session_id(),
            timestamp: Utc::now(),
            kind,
            agent: agent.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = PipelineEvent::new(
            PipelineEventKind::AgentActivated,
            "Spark",
            "Agent [Spark] activated. Thinking...",
        );
        assert_eq!(event.agent, "Spark");
        assert!(!event.id.is_empty());
    }

    #[test]
    fn test_event_kind_serialization() {
        let event = PipelineEvent::new(PipelineEventKind::PipelineFailed, "pipeline", "boom");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"pipeline_failed\""));
    }
}
