//! # Pipeline
//!
//! Session state machine, trace events, and the four-stage orchestrator.
//!
//! ## Pipeline Flow
//!
//! ```text
//! User Goal → (IDEA ∥ CRITIC) → REFINER → PRESENTER
//! ```

pub mod events;
pub mod orchestrator;
pub mod session;

pub use events::{PipelineEvent, PipelineEventKind};
pub use orchestrator::Orchestrator;
pub use session::{ProcessStep, StepStatus, StepUpdate, StudioSession};
