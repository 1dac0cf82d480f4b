//! # Studio Core
//!
//! Orchestration core for the Multi-Agent Creative Studio - sequences four
//! specialized LLM agents (IDEA, CRITIC, REFINER, PRESENTER) over a user goal
//! and tracks the resulting session state.
//!
//! ## Architecture
//!
//! - `agents/` - Fixed agent roster, domains, and per-role instruction templates
//! - `models` - LLM model and generation configuration
//! - `service/` - `StepExecutor` contract and the Gemini REST implementation
//! - `pipeline/` - Session state machine, trace events, and the orchestrator
//! - `state/` - SQLite-backed session store with bounded history
//! - `export` - Text / JSON / Markdown renderings of a completed session
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use studio_core::pipeline::Orchestrator;
//! use studio_core::service::GeminiService;
//! use studio_core::state::{SessionStore, StudioDb};
//!
//! let executor = Arc::new(GeminiService::from_env()?);
//! let store = Arc::new(SessionStore::new(StudioDb::open()?));
//! let mut orchestrator = Orchestrator::new(executor, store);
//! let session = orchestrator.run("Design a solar microgrid", "tech").await?;
//! ```

pub mod agents;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod service;
pub mod state;
