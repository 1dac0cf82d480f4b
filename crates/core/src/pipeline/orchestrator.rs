//! # Pipeline Orchestrator
//!
//! Drives the four-stage agent workflow for one session:
//!
//! ```text
//! User Goal ──┬── IDEA ───┐
//!             └── CRITIC ─┴──▶ REFINER ──▶ PRESENTER
//! ```
//!
//! Stage A runs IDEA and CRITIC concurrently; both must settle successfully
//! before REFINER starts, and REFINER before PRESENTER. Later stages see
//! earlier results only through a labeled plain-text context blob. A single
//! failed service call ends the run; there are no retries and no resume.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::events::{PipelineEvent, PipelineEventKind};
use super::session::{StepUpdate, StudioSession};
use crate::agents::{AgentRole, AGENTS};
use crate::service::{ServiceError, StepExecutor};
use crate::state::SessionStore;

/// The pipeline orchestrator
///
/// Holds the injected generation-service executor and the shared session
/// store; every step transition is applied to the session by this single
/// writer and snapshotted to the store before the run continues.
pub struct Orchestrator {
    executor: Arc<dyn StepExecutor>,
    store: Arc<SessionStore>,
    events: Vec<PipelineEvent>,
    event_tx: Option<mpsc::Sender<PipelineEvent>>,
}

impl Orchestrator {
    /// Create an orchestrator over an executor and a session store
    pub fn new(executor: Arc<dyn StepExecutor>, store: Arc<SessionStore>) -> Self {
        Self {
            executor,
            store,
            events: Vec::new(),
            event_tx: None,
        }
    }

    /// Set event channel for streaming trace entries
    pub fn with_event_channel(mut self, tx: mpsc::Sender<PipelineEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Trace entries collected during the last run
    pub fn events(&self) -> &[PipelineEvent] {
        &self.events
    }

    /// Run the four-stage workflow on a user goal
    ///
    /// Returns the completed session on success. On a stage failure the
    /// error is returned and the failed session snapshot stays readable
    /// through the store's `current`; it is never admitted to history.
    #[tracing::instrument(skip(self, prompt), fields(goal_preview = %prompt.chars().take(50).collect::<String>()))]
    pub async fn run(&mut self, prompt: &str, domain: &str) -> Result<StudioSession> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            anyhow::bail!("Prompt must not be empty");
        }
        if self
            .store
            .current()
            .map(|s| s.is_processing)
            .unwrap_or(false)
        {
            anyhow::bail!("A run is already in progress");
        }

        self.events.clear();
        let mut session = StudioSession::new(prompt, domain);
        self.store.set_current(session.clone());

        self.emit(PipelineEvent::new(
            PipelineEventKind::PipelineStarted,
            "pipeline",
            format!("Initializing multi-agent workflow for: \"{domain}\""),
        ))
        .await;
        let preview: String = prompt.chars().take(50).collect();
        self.emit(PipelineEvent::new(
            PipelineEventKind::PipelineStarted,
            "pipeline",
            format!("Goal: {preview}..."),
        ))
        .await;

        // Stage A: IDEA and CRITIC concurrently, no context
        self.activate(&mut session, 0).await;
        self.activate(&mut session, 1).await;

        let (tx, mut rx) = mpsc::channel::<(usize, Result<String, ServiceError>)>(2);
        for step in [0usize, 1] {
            let executor = Arc::clone(&self.executor);
            let tx = tx.clone();
            let role = AGENTS[step].role;
            let goal = session.prompt.clone();
            let tag = session.domain.clone();
            tokio::spawn(async move {
                let result = executor.execute(role, &goal, "", &tag).await;
                // Send fails once the run has aborted and dropped the
                // receiver; the late sibling result is simply discarded.
                let _ = tx.send((step, result)).await;
            });
        }
        drop(tx);

        let mut outputs: [Option<String>; 2] = [None, None];
        for _ in 0..2 {
            let Some((step, result)) = rx.recv().await else {
                session.finish();
                self.store.set_current(session.clone());
                anyhow::bail!("Stage A worker exited without reporting");
            };
            match result {
                Ok(output) => {
                    self.complete(&mut session, step, output.clone()).await;
                    outputs[step] = Some(output);
                }
                Err(error) => {
                    self.fail_run(&mut session, step, &error).await;
                    return Err(anyhow::Error::new(error)
                        .context(format!("{} step failed", AGENTS[step].role.as_str())));
                }
            }
        }

        let (Some(idea), Some(critic)) = (outputs[0].take(), outputs[1].take()) else {
            anyhow::bail!("Stage A settled without both outputs");
        };

        // The context blob is the only channel later stages see earlier
        // results through.
        let mut context =
            format!("--- Output from IDEA ---\n{idea}\n\n--- Output from CRITIC ---\n{critic}");

        // Stage B: REFINER over idea + critique
        self.activate(&mut session, 2).await;
        let refined = self
            .executor
            .execute(AgentRole::Refiner, &session.prompt, &context, &session.domain)
            .await;
        match refined {
            Ok(output) => {
                context.push_str(&format!("\n\n--- Output from REFINER ---\n{output}"));
                self.complete(&mut session, 2, output).await;
            }
            Err(error) => {
                self.fail_run(&mut session, 2, &error).await;
                return Err(anyhow::Error::new(error).context("REFINER step failed"));
            }
        }

        // Stage C: PRESENTER over the full accumulated context
        self.activate(&mut session, 3).await;
        let presented = self
            .executor
            .execute(AgentRole::Presenter, &session.prompt, &context, &session.domain)
            .await;
        match presented {
            Ok(output) => {
                self.complete(&mut session, 3, output).await;
            }
            Err(error) => {
                self.fail_run(&mut session, 3, &error).await;
                return Err(anyhow::Error::new(error).context("PRESENTER step failed"));
            }
        }

        session.finish();
        self.store.set_current(session.clone());
        self.emit(PipelineEvent::new(
            PipelineEventKind::PipelineCompleted,
            "pipeline",
            "Pipeline complete. Final presentation ready.",
        ))
        .await;

        if let Err(e) = self.store.record_if_complete(&session) {
            tracing::warn!("Failed to record completed session: {}", e);
        }

        Ok(session)
    }

    /// Apply a step transition and snapshot the session to the store
    fn apply(&self, session: &mut StudioSession, update: StepUpdate) {
        session.apply(update);
        self.store.set_current(session.clone());
    }

    async fn activate(&mut self, session: &mut StudioSession, step: usize) {
        let agent = AGENTS[step].name;
        self.apply(session, StepUpdate::Activated { step });
        self.emit(PipelineEvent::new(
            PipelineEventKind::AgentActivated,
            agent,
            format!("Agent [{agent}] activated. Thinking..."),
        ))
        .await;
    }

    async fn complete(&mut self, session: &mut StudioSession, step: usize, output: String) {
        let agent = AGENTS[step].name;
        self.apply(session, StepUpdate::Completed { step, output });
        self.emit(PipelineEvent::new(
            PipelineEventKind::AgentCompleted,
            agent,
            format!("Agent [{agent}] completed task. Output synthesized."),
        ))
        .await;
    }

    /// Mark the failing step and end the run
    async fn fail_run(&mut self, session: &mut StudioSession, step: usize, error: &ServiceError) {
        let agent = AGENTS[step].name;
        self.apply(
            session,
            StepUpdate::Failed {
                step,
                error: error.to_string(),
            },
        );
        self.emit(PipelineEvent::new(
            PipelineEventKind::AgentFailed,
            agent,
            format!("Agent [{agent}] encountered an error. Stopping pipeline."),
        ))
        .await;
        self.emit(PipelineEvent::new(
            PipelineEventKind::PipelineFailed,
            "pipeline",
            format!("Process failed: {error}"),
        ))
        .await;
    }

    /// Emit a trace entry
    async fn emit(&mut self, event: PipelineEvent) {
        tracing::info!(kind = ?event.kind, agent = %event.agent, "{}", event.message);
        self.events.push(event.clone());
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }
}
