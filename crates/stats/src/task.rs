use std::fmt;
use std::path::PathBuf;

use crate::stat::TransferStat;

/// Stable identifier of one managed transfer task.
///
/// Status output renders the identifier as the bare number after a `#`
/// marker, so [`TaskId`] implements [`Display`](fmt::Display) accordingly.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates an identifier from its raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Read-only view of one managed transfer.
///
/// The reporter only observes tasks; it never drives their lifecycle.
pub trait Task {
    /// Returns the task's stable identifier.
    fn id(&self) -> TaskId;

    /// Returns the number of bytes completed so far.
    fn completed_length(&self) -> u64;

    /// Returns the expected total length in bytes, or `0` when unknown.
    fn total_length(&self) -> u64;

    /// Returns the number of connections currently serving the task.
    fn connection_count(&self) -> u32;

    /// Reports whether the transfer has finished.
    fn is_finished(&self) -> bool;

    /// Reports whether the task keeps uploading after completion and can
    /// state an upload ratio (a seeding task).
    fn reports_upload_ratio(&self) -> bool;

    /// Returns the path of the file backing the transfer.
    fn file_path(&self) -> PathBuf;

    /// Computes the task's current transfer statistic.
    fn transfer_stat(&self) -> TransferStat;
}

/// Ordered collection of transfer tasks.
///
/// Order is display order: the task at index 0 is the "primary" one shown
/// by the compact one-line mode.
pub trait TaskRegistry {
    /// Returns the number of managed tasks.
    fn task_count(&self) -> usize;

    /// Returns the task at `index` in display order.
    fn task(&self, index: usize) -> Option<&dyn Task>;

    /// Computes the aggregate statistic across every task.
    fn aggregate_stat(&self) -> TransferStat;

    /// Reports whether every managed task has finished.
    fn all_finished(&self) -> bool;
}
