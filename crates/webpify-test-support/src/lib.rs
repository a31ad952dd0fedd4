//! Test support utilities for webpify.
//!
//! Provides synthetic image builders and port mocks for testing the
//! optimization pipeline without binary fixtures.
//!
//! # Example
//!
//! ```
//! use webpify_test_support::{MockProgressSink, SyntheticImage};
//!
//! // Create synthetic test images
//! let photo = SyntheticImage::textured(640, 480);
//! let transparent = SyntheticImage::transparent_rgba(200, 200);
//!
//! // Capture progress events
//! let sink = MockProgressSink::new();
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticImage;
pub use mocks::{MockProgressSink, MockResultOutput, MockTaskSource};
