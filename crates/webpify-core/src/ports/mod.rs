//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the pipeline core and
//! external adapters (filesystem, terminal, report writers).

mod progress;
mod result_output;
mod task_source;

pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
pub use task_source::TaskSource;
