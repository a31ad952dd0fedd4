//! Webpify Core - Domain types and the optimization pipeline
//!
//! This crate contains the core domain types, the per-image pipeline
//! (mode normalization, downscaling, lossy WebP encoding), and the port
//! traits that connect the pipeline to the outside world.

pub mod domain;
pub mod pipeline;
pub mod ports;

pub use domain::{
    AnimationPolicy, ImageTask, OptimizeError, OptimizeOptions, ProcessingResult, OUTPUT_EXTENSION,
};
pub use pipeline::{EncodedImage, Optimizer};
pub use ports::{ProgressEvent, ProgressSink, ResultOutput, TaskSource};
