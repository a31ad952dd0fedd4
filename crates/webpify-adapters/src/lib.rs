//! Webpify Adapters - Filesystem side of the pipeline.
//!
//! This crate provides:
//! - Input discovery (single file or non-recursive directory scan)
//! - Source decoding, including the animated-input policy
//! - Output writing with lazy directory creation

pub mod fs;

pub use fs::{ensure_dir, load_source, write_output, FsTaskSource};
