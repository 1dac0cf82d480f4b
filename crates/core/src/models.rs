//! # Studio Models
//!
//! Centralized LLM configuration types for the studio pipeline.
//! Every agent step runs against the same model with the same fixed
//! sampling parameters so that runs are reproducible given identical
//! service responses.

use serde::{Deserialize, Serialize};

/// Default Gemini model used for all agent steps
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for LLM model selection
///
/// ## Example
/// ```rust,ignore
/// use studio_core::models::ModelConfig;
///
/// // Default model
/// let config = ModelConfig::default();
///
/// // Specific model
/// let config = ModelConfig::new("gemini-1.5-pro");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name (e.g., "gemini-1.5-flash")
    pub model: String,
    /// Optional base URL override (for proxies / test servers)
    pub base_url: Option<String>,
    /// Sampling parameters sent with every request
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            generation: GenerationConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Create a config for a specific model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set base URL (for proxies / test servers)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

/// Sampling parameters for a generation request
///
/// Fixed at the most deterministic settings the service offers: greedy
/// temperature, narrow nucleus, and a hard output cap matching the short
/// per-role response formats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature (0.0 = greedy)
    pub temperature: f32,
    /// Nucleus sampling probability mass
    pub top_p: f32,
    /// Hard cap on generated tokens
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            top_p: 0.8,
            max_output_tokens: 200,
        }
    }
}
