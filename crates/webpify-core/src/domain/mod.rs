//! Core domain types for image optimization.

mod error;
mod result;
mod task;

pub use error::OptimizeError;
pub use result::ProcessingResult;
pub use task::{AnimationPolicy, ImageTask, OptimizeOptions, OUTPUT_EXTENSION};
