use std::path::{Path, PathBuf};

use crate::queue::{AllocationQueue, IntegrityQueue, QueueEntry};
use crate::stat::TransferStat;
use crate::task::{Task, TaskId, TaskRegistry};

/// Flattened, owned copy of one task's reportable state.
#[derive(Clone, Debug)]
pub struct TaskEntry {
    id: TaskId,
    completed_length: u64,
    total_length: u64,
    connection_count: u32,
    finished: bool,
    reports_upload_ratio: bool,
    file_path: PathBuf,
    stat: TransferStat,
}

impl TaskEntry {
    /// Creates an entry with the given progress counters and no transfer
    /// activity; refine it with the `with_*` builders.
    #[must_use]
    pub fn new(id: TaskId, completed_length: u64, total_length: u64) -> Self {
        Self {
            id,
            completed_length,
            total_length,
            connection_count: 0,
            finished: false,
            reports_upload_ratio: false,
            file_path: PathBuf::new(),
            stat: TransferStat::default(),
        }
    }

    /// Captures the current state of a live task.
    #[must_use]
    pub fn capture(task: &dyn Task) -> Self {
        Self {
            id: task.id(),
            completed_length: task.completed_length(),
            total_length: task.total_length(),
            connection_count: task.connection_count(),
            finished: task.is_finished(),
            reports_upload_ratio: task.reports_upload_ratio(),
            file_path: task.file_path(),
            stat: task.transfer_stat(),
        }
    }

    /// Sets the connection count.
    #[must_use]
    pub fn with_connections(mut self, connections: u32) -> Self {
        self.connection_count = connections;
        self
    }

    /// Sets the finished flag.
    #[must_use]
    pub fn with_finished(mut self, finished: bool) -> Self {
        self.finished = finished;
        self
    }

    /// Sets the upload-ratio capability flag.
    #[must_use]
    pub fn with_upload_ratio(mut self, reports_upload_ratio: bool) -> Self {
        self.reports_upload_ratio = reports_upload_ratio;
        self
    }

    /// Sets the backing file path.
    #[must_use]
    pub fn with_file_path(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file_path = file_path.into();
        self
    }

    /// Sets the transfer statistic.
    #[must_use]
    pub fn with_stat(mut self, stat: TransferStat) -> Self {
        self.stat = stat;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the bytes completed so far.
    #[must_use]
    pub const fn completed_length(&self) -> u64 {
        self.completed_length
    }

    /// Returns the expected total length, or `0` when unknown.
    #[must_use]
    pub const fn total_length(&self) -> u64 {
        self.total_length
    }

    /// Returns the connection count.
    #[must_use]
    pub const fn connection_count(&self) -> u32 {
        self.connection_count
    }

    /// Reports whether the task has finished.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Reports whether the task can state an upload ratio.
    #[must_use]
    pub const fn reports_upload_ratio(&self) -> bool {
        self.reports_upload_ratio
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the captured transfer statistic.
    #[must_use]
    pub const fn stat(&self) -> TransferStat {
        self.stat
    }
}

/// One atomic read of everything the reporter displays.
///
/// Captured once per reporting tick; the renderer only ever sees this
/// value, so a status line or summary block never mixes state sampled at
/// two different instants.
#[derive(Clone, Debug, Default)]
pub struct StatusSnapshot {
    tasks: Vec<TaskEntry>,
    aggregate: TransferStat,
    all_finished: bool,
    allocation: Option<QueueEntry>,
    allocation_waiting: usize,
    integrity: Option<QueueEntry>,
    integrity_queued: usize,
}

impl StatusSnapshot {
    /// Reads the registry and both background queues in one pass.
    #[must_use]
    pub fn collect(
        registry: &dyn TaskRegistry,
        allocation: &dyn AllocationQueue,
        integrity: Option<&dyn IntegrityQueue>,
    ) -> Self {
        let tasks = (0..registry.task_count())
            .filter_map(|index| registry.task(index))
            .map(TaskEntry::capture)
            .collect();

        Self {
            tasks,
            aggregate: registry.aggregate_stat(),
            all_finished: registry.all_finished(),
            allocation: allocation.current(),
            allocation_waiting: allocation.waiting(),
            integrity: integrity.and_then(|queue| queue.head()),
            integrity_queued: integrity.map_or(0, |queue| queue.queued()),
        }
    }

    /// Starts a snapshot from pre-collected task rows.
    ///
    /// The aggregate statistic and the finished flag derive from the
    /// rows. Hosts that already hold their numbers feed entries in
    /// directly; [`collect`](Self::collect) is the usual path.
    #[must_use]
    pub fn from_tasks(tasks: Vec<TaskEntry>) -> Self {
        let aggregate = tasks
            .iter()
            .fold(TransferStat::default(), |acc, task| acc.merged(task.stat()));
        let all_finished = tasks.iter().all(TaskEntry::is_finished);
        Self {
            tasks,
            aggregate,
            all_finished,
            ..Self::default()
        }
    }

    /// Attaches the in-progress allocation entry and its queue depth.
    #[must_use]
    pub fn with_allocation(mut self, entry: QueueEntry, waiting: usize) -> Self {
        self.allocation = Some(entry);
        self.allocation_waiting = waiting;
        self
    }

    /// Attaches the head of the verification queue and its length.
    #[must_use]
    pub fn with_integrity(mut self, entry: QueueEntry, queued: usize) -> Self {
        self.integrity = Some(entry);
        self.integrity_queued = queued;
        self
    }

    /// Returns the captured task rows in display order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskEntry] {
        &self.tasks
    }

    /// Returns the first task row, the one the one-line mode shows.
    #[must_use]
    pub fn primary(&self) -> Option<&TaskEntry> {
        self.tasks.first()
    }

    /// Returns the number of captured tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the aggregate statistic across every task.
    #[must_use]
    pub const fn aggregate(&self) -> TransferStat {
        self.aggregate
    }

    /// Reports whether every task has finished.
    #[must_use]
    pub const fn all_finished(&self) -> bool {
        self.all_finished
    }

    /// Returns the allocation entry currently in progress, if any.
    #[must_use]
    pub const fn allocation(&self) -> Option<QueueEntry> {
        self.allocation
    }

    /// Returns how many allocations wait behind the current one.
    #[must_use]
    pub const fn allocation_waiting(&self) -> usize {
        self.allocation_waiting
    }

    /// Returns the head of the verification queue, if any.
    #[must_use]
    pub const fn integrity(&self) -> Option<QueueEntry> {
        self.integrity
    }

    /// Returns the verification queue length, including its head.
    #[must_use]
    pub const fn integrity_queued(&self) -> usize {
        self.integrity_queued
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{StatusSnapshot, TaskEntry};
    use crate::queue::{AllocationQueue, IntegrityQueue, QueueEntry};
    use crate::stat::TransferStat;
    use crate::task::{Task, TaskId, TaskRegistry};

    struct FakeTask {
        id: u64,
        completed: u64,
        total: u64,
        finished: bool,
    }

    impl Task for FakeTask {
        fn id(&self) -> TaskId {
            TaskId::new(self.id)
        }

        fn completed_length(&self) -> u64 {
            self.completed
        }

        fn total_length(&self) -> u64 {
            self.total
        }

        fn connection_count(&self) -> u32 {
            1
        }

        fn is_finished(&self) -> bool {
            self.finished
        }

        fn reports_upload_ratio(&self) -> bool {
            false
        }

        fn file_path(&self) -> PathBuf {
            PathBuf::from(format!("/downloads/file-{}", self.id))
        }

        fn transfer_stat(&self) -> TransferStat {
            TransferStat::new(1000 * self.id, 0, 0, 0)
        }
    }

    struct FakeRegistry {
        tasks: Vec<FakeTask>,
    }

    impl TaskRegistry for FakeRegistry {
        fn task_count(&self) -> usize {
            self.tasks.len()
        }

        fn task(&self, index: usize) -> Option<&dyn Task> {
            self.tasks.get(index).map(|task| task as &dyn Task)
        }

        fn aggregate_stat(&self) -> TransferStat {
            self.tasks
                .iter()
                .map(Task::transfer_stat)
                .fold(TransferStat::default(), TransferStat::merged)
        }

        fn all_finished(&self) -> bool {
            self.tasks.iter().all(|task| task.finished)
        }
    }

    struct IdleQueues;

    impl AllocationQueue for IdleQueues {
        fn current(&self) -> Option<QueueEntry> {
            None
        }

        fn waiting(&self) -> usize {
            0
        }
    }

    struct BusyIntegrity;

    impl IntegrityQueue for BusyIntegrity {
        fn head(&self) -> Option<QueueEntry> {
            Some(QueueEntry::new(TaskId::new(3), 100, 400))
        }

        fn queued(&self) -> usize {
            2
        }
    }

    fn registry() -> FakeRegistry {
        FakeRegistry {
            tasks: vec![
                FakeTask {
                    id: 1,
                    completed: 250,
                    total: 1000,
                    finished: false,
                },
                FakeTask {
                    id: 2,
                    completed: 500,
                    total: 500,
                    finished: true,
                },
            ],
        }
    }

    #[test]
    fn collect_flattens_every_task_in_order() {
        let snapshot = StatusSnapshot::collect(&registry(), &IdleQueues, None);

        assert_eq!(snapshot.task_count(), 2);
        let ids: Vec<u64> = snapshot.tasks().iter().map(|t| t.id().value()).collect();
        assert_eq!(ids, [1, 2]);
        assert_eq!(snapshot.primary().map(|t| t.completed_length()), Some(250));
    }

    #[test]
    fn collect_copies_aggregate_and_finished_flag() {
        let snapshot = StatusSnapshot::collect(&registry(), &IdleQueues, None);

        assert_eq!(snapshot.aggregate().download_speed(), 3000);
        assert!(!snapshot.all_finished());
    }

    #[test]
    fn collect_without_integrity_subsystem_reports_empty_queue() {
        let snapshot = StatusSnapshot::collect(&registry(), &IdleQueues, None);

        assert!(snapshot.integrity().is_none());
        assert_eq!(snapshot.integrity_queued(), 0);
    }

    #[test]
    fn collect_reads_integrity_head_and_depth() {
        let snapshot = StatusSnapshot::collect(&registry(), &IdleQueues, Some(&BusyIntegrity));

        let head = snapshot.integrity().expect("head entry");
        assert_eq!(head.task(), TaskId::new(3));
        assert_eq!(head.current_length(), 100);
        assert_eq!(snapshot.integrity_queued(), 2);
    }

    #[test]
    fn empty_registry_yields_empty_snapshot() {
        let empty = FakeRegistry { tasks: Vec::new() };
        let snapshot = StatusSnapshot::collect(&empty, &IdleQueues, None);

        assert_eq!(snapshot.task_count(), 0);
        assert!(snapshot.primary().is_none());
        assert!(snapshot.all_finished());
    }

    #[test]
    fn entry_builders_set_each_field() {
        let entry = TaskEntry::new(TaskId::new(9), 10, 20)
            .with_connections(5)
            .with_finished(true)
            .with_upload_ratio(true)
            .with_file_path("/tmp/data.bin")
            .with_stat(TransferStat::new(1, 2, 3, 4));

        assert_eq!(entry.connection_count(), 5);
        assert!(entry.is_finished());
        assert!(entry.reports_upload_ratio());
        assert_eq!(entry.file_path(), std::path::Path::new("/tmp/data.bin"));
        assert_eq!(entry.stat().all_time_upload_length(), 4);
    }

    #[test]
    fn from_tasks_derives_aggregate_and_finished_flag() {
        let snapshot = StatusSnapshot::from_tasks(vec![
            TaskEntry::new(TaskId::new(1), 0, 100).with_stat(TransferStat::new(700, 0, 0, 0)),
            TaskEntry::new(TaskId::new(2), 100, 100)
                .with_finished(true)
                .with_stat(TransferStat::new(300, 0, 0, 0)),
        ]);

        assert_eq!(snapshot.aggregate().download_speed(), 1000);
        assert!(!snapshot.all_finished());
        assert!(snapshot.allocation().is_none());
    }

    #[test]
    fn queue_builders_attach_entries() {
        let snapshot = StatusSnapshot::from_tasks(Vec::new())
            .with_allocation(QueueEntry::new(TaskId::new(4), 0, 800), 3)
            .with_integrity(QueueEntry::new(TaskId::new(5), 200, 400), 2);

        assert_eq!(snapshot.allocation().map(|e| e.task()), Some(TaskId::new(4)));
        assert_eq!(snapshot.allocation_waiting(), 3);
        assert_eq!(snapshot.integrity().map(|e| e.total_length()), Some(400));
        assert_eq!(snapshot.integrity_queued(), 2);
    }
}
