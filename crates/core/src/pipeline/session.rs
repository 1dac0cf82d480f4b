//! # Session State
//!
//! The per-run state machine: one [`StudioSession`] per user-initiated run,
//! with exactly four [`ProcessStep`]s mirroring the agent roster order.
//!
//! Steps are never mutated directly by concurrent completions. Stage
//! outcomes are described as [`StepUpdate`] messages and applied by a
//! single reducer ([`StudioSession::apply`]), so there is one writer no
//! matter how the stages settle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agents::{AgentRole, AGENTS};

/// Lifecycle of one process step
///
/// `pending -> active -> completed | error`; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
    Error,
}

impl StepStatus {
    /// Whether this status can never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Error)
    }
}

/// One agent's slot in a session, mirroring its roster position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessStep {
    /// Roster id of the agent owning this step
    pub agent_id: String,
    /// Pipeline role
    pub role: AgentRole,
    /// Current lifecycle state
    pub status: StepStatus,
    /// Generated text, empty until completed
    pub output: String,
    /// Last transition time
    pub timestamp: DateTime<Utc>,
}

/// A state transition for a single step, applied by the session reducer
#[derive(Debug, Clone)]
pub enum StepUpdate {
    /// Step begins waiting on the generation service
    Activated { step: usize },
    /// Step finished with generated output
    Completed { step: usize, output: String },
    /// Step's service call failed; the whole run is over
    Failed { step: usize, error: String },
}

/// One complete user-initiated run of the four-stage pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioSession {
    /// Opaque session id
    pub id: String,
    /// The user's original goal
    pub prompt: String,
    /// Selected domain tag
    pub domain: String,
    /// Exactly four steps, in roster order
    pub steps: Vec<ProcessStep>,
    /// True from creation until the run reaches a terminal outcome
    pub is_processing: bool,
}

impl StudioSession {
    /// Create a fresh session with all four steps pending
    pub fn new(prompt: impl Into<String>, domain: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: session_id(),
            prompt: prompt.into(),
            domain: domain.into(),
            steps: AGENTS
                .iter()
                .map(|agent| ProcessStep {
                    agent_id: agent.id.to_string(),
                    role: agent.role,
                    status: StepStatus::Pending,
                    output: String::new(),
                    timestamp: now,
                })
                .collect(),
            is_processing: true,
        }
    }

    /// Apply one step transition
    ///
    /// Invalid transitions are ignored: a terminal step stays terminal, and
    /// activation only applies to a pending step. A `Failed` update also
    /// ends the run (`is_processing = false`).
    pub fn apply(&mut self, update: StepUpdate) {
        match update {
            StepUpdate::Activated { step } => {
                if let Some(s) = self.steps.get_mut(step) {
                    if s.status == StepStatus::Pending {
                        s.status = StepStatus::Active;
                        s.timestamp = Utc::now();
                    }
                }
            }
            StepUpdate::Completed { step, output } => {
                if let Some(s) = self.steps.get_mut(step) {
                    if s.status == StepStatus::Active {
                        s.status = StepStatus::Completed;
                        s.output = output;
                        s.timestamp = Utc::now();
                    }
                }
            }
            StepUpdate::Failed { step, error } => {
                if let Some(s) = self.steps.get_mut(step) {
                    if s.status == StepStatus::Active {
                        s.status = StepStatus::Error;
                        s.timestamp = Utc::now();
                        tracing::warn!(step, %error, "agent step failed");
                    }
                }
                self.is_processing = false;
            }
        }
    }

    /// Mark the run finished after all steps completed
    pub fn finish(&mut self) {
        self.is_processing = false;
    }

    /// Whether every step reached `completed`
    pub fn is_complete(&self) -> bool {
        self.steps
            .iter()
            .all(|step| step.status == StepStatus::Completed)
    }

    /// The step for a given role
    pub fn step(&self, role: AgentRole) -> &ProcessStep {
        &self.steps[role.index()]
    }

    /// The PRESENTER output, once that step has completed
    pub fn final_output(&self) -> Option<&str> {
        let presenter = self.step(AgentRole::Presenter);
        (presenter.status == StepStatus::Completed).then_some(presenter.output.as_str())
    }
}

/// Generate a short opaque session id
pub fn session_id() -> String {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos();
    format!("{:x}-{:x}", nanos, rand_u32())
}

/// Simple random number (not cryptographic)
fn rand_u32() -> u32 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};
    RandomState::new().build_hasher().finish() as u32
}
