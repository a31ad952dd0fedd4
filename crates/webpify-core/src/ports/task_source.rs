//! Task source port for discovering work.

use crate::domain::ImageTask;

/// Port for producing the batch's task list.
pub trait TaskSource: Send + Sync {
    /// Returns the discovered tasks in enumeration order.
    ///
    /// Discovery problems (unreadable directories, unsupported files) are
    /// handled inside the adapter; the returned iterator only yields tasks
    /// worth processing.
    fn tasks(&self) -> Box<dyn Iterator<Item = ImageTask> + Send + '_>;

    /// Returns the total number of tasks, if known.
    fn count_hint(&self) -> Option<usize>;
}
