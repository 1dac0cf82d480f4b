//! # Generation Service
//!
//! The contract between the pipeline and the external text-generation
//! service, plus the Gemini REST implementation.
//!
//! The orchestrator only ever sees the [`StepExecutor`] trait object, so
//! tests substitute a mock and production wires in [`GeminiService`].

pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::agents::AgentRole;

pub use gemini::{GeminiService, NO_OUTPUT_SENTINEL};

/// Errors surfaced by the generation service
///
/// Every variant is terminal for the current stage: there is no retry or
/// backoff anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Required API credential absent at startup
    #[error("GEMINI_API_KEY environment variable is not set")]
    MissingCredential,
    /// The service rejected the credential
    #[error("generation service rejected credentials: {0}")]
    Auth(String),
    /// Quota or rate limit exhausted
    #[error("generation service rate limit exceeded: {0}")]
    RateLimited(String),
    /// Connection, DNS, or timeout failure
    #[error("transport failure reaching generation service: {0}")]
    Transport(String),
    /// Any other non-success HTTP response
    #[error("generation service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    /// Response body did not match the expected shape
    #[error("failed to parse generation service response: {0}")]
    MalformedResponse(String),
}

/// One agent step against the external generation service
///
/// Implementations translate (role, prompt, context, domain) into a single
/// service call and return the generated text. A single call per step, no
/// retries; failures propagate to the orchestrator and end the run.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    /// Run one agent step and return its generated text.
    ///
    /// `context` is the accumulated plain-text output of earlier stages
    /// (empty for Stage A). `domain` is the session's domain tag.
    async fn execute(
        &self,
        role: AgentRole,
        prompt: &str,
        context: &str,
        domain: &str,
    ) -> Result<String, ServiceError>;
}
