//! Pipeline module.
//!
//! This module provides the validation pipeline orchestrator and its
//! state machine.

mod runner;
mod stage;

pub use runner::ValidationPipeline;
pub use stage::PipelineStage;
