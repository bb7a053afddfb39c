use crate::task::TaskId;

/// Progress of one background queue item.
///
/// Shared by the allocation and integrity-verification interfaces; both
/// expose at most their in-progress head plus a queue depth.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueueEntry {
    task: TaskId,
    current_length: u64,
    total_length: u64,
}

impl QueueEntry {
    /// Creates an entry for the given owning task and byte counters.
    #[must_use]
    pub const fn new(task: TaskId, current_length: u64, total_length: u64) -> Self {
        Self {
            task,
            current_length,
            total_length,
        }
    }

    /// Returns the task that owns the queued work.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the bytes processed so far.
    #[must_use]
    pub const fn current_length(&self) -> u64 {
        self.current_length
    }

    /// Returns the total bytes to process, or `0` when unknown.
    #[must_use]
    pub const fn total_length(&self) -> u64 {
        self.total_length
    }
}

/// View of the file-allocation subsystem.
pub trait AllocationQueue {
    /// Returns the entry currently being allocated, if any.
    fn current(&self) -> Option<QueueEntry>;

    /// Returns how many entries wait behind the current one.
    fn waiting(&self) -> usize;
}

/// View of the integrity-verification subsystem.
///
/// The subsystem itself is optional: hosts without one pass `None` wherever
/// an `Option<&dyn IntegrityQueue>` is accepted, and no checksum segment is
/// rendered.
pub trait IntegrityQueue {
    /// Returns the entry at the head of the verification queue, if any.
    fn head(&self) -> Option<QueueEntry>;

    /// Returns the total queue length, including the head entry.
    fn queued(&self) -> usize;
}
