//! Domain layer - Pure scanning abstractions
//!
//! This layer contains NO platform dependencies (no HTTP client, no clipboard).
//! Only collaborator traits and domain error types.

pub mod errors;
pub mod ports;

pub use errors::PipelineError;
pub use ports::*;
