//! # Gemini Service
//!
//! Direct REST implementation of [`StepExecutor`] against the Gemini
//! `generateContent` endpoint.
//!
//! Requests carry the role's bundled instruction template as the system
//! instruction and a fixed deterministic generation config, so pipeline
//! behavior is reproducible given identical service responses.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ServiceError, StepExecutor};
use crate::agents::{prompts, AgentRole};
use crate::models::ModelConfig;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Returned when the service produces an empty response body
pub const NO_OUTPUT_SENTINEL: &str = "No output generated.";

/// Request timeout; a hung call surfaces as a transport stage failure
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// [`StepExecutor`] backed by the Gemini HTTP API
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: String,
    config: ModelConfig,
}

impl GeminiService {
    /// Create a service with an explicit API key and model config
    pub fn new(api_key: impl Into<String>, config: ModelConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create a service from `GEMINI_API_KEY`, with the default model
    ///
    /// Fails before any run can start when the credential is absent.
    pub fn from_env() -> Result<Self, ServiceError> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| ServiceError::MissingCredential)?;
        if api_key.trim().is_empty() {
            return Err(ServiceError::MissingCredential);
        }
        Self::new(api_key, ModelConfig::default())
    }

    /// Override the model config after construction
    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    fn endpoint(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(BASE_URL);
        format!(
            "{base}/{model}:generateContent?key={api_key}",
            model = self.config.model,
            api_key = self.api_key
        )
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, ServiceError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(body)
            .send()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ServiceError::MalformedResponse(err.to_string()))?;

        Ok(extract_text(parsed))
    }
}

#[async_trait]
impl StepExecutor for GeminiService {
    async fn execute(
        &self,
        role: AgentRole,
        prompt: &str,
        context: &str,
        domain: &str,
    ) -> Result<String, ServiceError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: build_user_content(prompt, context, domain),
                }],
            }],
            system_instruction: Some(Content {
                role: "system".to_string(),
                parts: vec![Part {
                    text: prompts::for_role(role).trim().to_string(),
                }],
            }),
            generation_config: WireGenerationConfig {
                temperature: self.config.generation.temperature,
                top_p: self.config.generation.top_p,
                max_output_tokens: self.config.generation.max_output_tokens,
            },
        };

        tracing::debug!(role = role.as_str(), model = %self.config.model, "dispatching agent step");
        self.send_request(&request).await
    }
}

/// Assemble the user-content block for one step
///
/// The accumulated context rides under its own heading only when non-empty,
/// so Stage-A requests stay context-free.
fn build_user_content(prompt: &str, context: &str, domain: &str) -> String {
    let domain = if domain.trim().is_empty() {
        "General"
    } else {
        domain
    };

    let mut body = format!("Domain: {domain}\n\nUser Goal: {prompt}\n\n");
    if !context.is_empty() {
        body.push_str(&format!("Previous Process Context:\n{context}\n\n"));
    }
    body.push_str("Task: Execute your specific role for this context.");
    body
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Empty content is not a failure: the caller gets a fixed sentinel instead
fn extract_text(response: GenerateContentResponse) -> String {
    let text = response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text));

    match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => NO_OUTPUT_SENTINEL.to_string(),
    }
}

fn map_http_error(status: StatusCode, body: String) -> ServiceError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => ServiceError::RateLimited(message),
        _ => ServiceError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
