//! Scripted transfer scenarios for exercising the reporter end to end.
//!
//! Nothing here touches the network or the disk. Tasks advance by a
//! fixed step per tick, the step doubles as the reported speed, and the
//! optional allocation and verification queues drain on their own
//! schedules, so a run's output depends only on its flags.

use std::path::PathBuf;

use stats::{
    AllocationQueue, IntegrityQueue, QueueEntry, Task, TaskId, TaskRegistry, TransferStat,
};

/// Knobs selected on the command line.
#[derive(Clone, Copy, Debug)]
pub struct ScenarioConfig {
    pub tasks: u64,
    pub total: u64,
    pub step: u64,
    pub connections: u32,
    pub seeding: bool,
    pub allocate: bool,
    pub verify: bool,
}

struct SimulatedTask {
    id: TaskId,
    completed: u64,
    total: u64,
    step: u64,
    connections: u32,
    seeding: bool,
    uploaded: u64,
}

impl SimulatedTask {
    fn done(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }

    fn advance(&mut self) {
        if !self.done() {
            self.completed = if self.total == 0 {
                self.completed.saturating_add(self.step)
            } else {
                self.completed.saturating_add(self.step).min(self.total)
            };
        }
        if self.seeding {
            self.uploaded = self.uploaded.saturating_add(self.step / 2);
        }
    }
}

impl Task for SimulatedTask {
    fn id(&self) -> TaskId {
        self.id
    }

    fn completed_length(&self) -> u64 {
        self.completed
    }

    fn total_length(&self) -> u64 {
        self.total
    }

    fn connection_count(&self) -> u32 {
        self.connections
    }

    fn is_finished(&self) -> bool {
        self.done()
    }

    fn reports_upload_ratio(&self) -> bool {
        self.seeding
    }

    fn file_path(&self) -> PathBuf {
        PathBuf::from(format!("downloads/task-{}.bin", self.id))
    }

    fn transfer_stat(&self) -> TransferStat {
        let download = if self.done() { 0 } else { self.step };
        let upload = if self.seeding { self.step / 2 } else { 0 };
        TransferStat::new(download, upload, self.uploaded, self.uploaded)
    }
}

struct SimulatedQueue {
    task: TaskId,
    current: u64,
    total: u64,
    step: u64,
    backlog: usize,
}

impl SimulatedQueue {
    fn drained(&self) -> bool {
        self.total > 0 && self.current >= self.total
    }

    fn entry(&self) -> Option<QueueEntry> {
        if self.drained() {
            None
        } else {
            Some(QueueEntry::new(self.task, self.current, self.total))
        }
    }

    fn advance(&mut self) {
        self.current = self.current.saturating_add(self.step);
        if self.total > 0 {
            self.current = self.current.min(self.total);
        }
    }
}

/// A deterministic multi-task transfer driven one tick at a time.
///
/// The scenario is its own registry and both of its queues; callers
/// take shared references for a tick, then [`advance`](Self::advance)
/// between ticks.
pub struct Scenario {
    tasks: Vec<SimulatedTask>,
    allocation: Option<SimulatedQueue>,
    verification: Option<SimulatedQueue>,
}

impl Scenario {
    /// Builds the scripted tasks and queues the config asks for.
    ///
    /// The allocation entry provisions the task after the last live
    /// one at double speed; the verification entry re-reads the first
    /// task at quadruple speed.
    pub fn new(config: &ScenarioConfig) -> Self {
        let step = config.step.max(1);
        let tasks = (1..=config.tasks)
            .map(|id| SimulatedTask {
                id: TaskId::new(id),
                completed: 0,
                total: config.total,
                step,
                connections: config.connections,
                seeding: config.seeding,
                uploaded: 0,
            })
            .collect();
        let allocation = config.allocate.then(|| SimulatedQueue {
            task: TaskId::new(config.tasks + 1),
            current: 0,
            total: config.total,
            step: step.saturating_mul(2),
            backlog: 2,
        });
        let verification = config.verify.then(|| SimulatedQueue {
            task: TaskId::new(1),
            current: 0,
            total: config.total,
            step: step.saturating_mul(4),
            backlog: 1,
        });
        Self {
            tasks,
            allocation,
            verification,
        }
    }

    /// Moves every task and queue forward one tick.
    pub fn advance(&mut self) {
        for task in &mut self.tasks {
            task.advance();
        }
        if let Some(queue) = &mut self.allocation {
            queue.advance();
        }
        if let Some(queue) = &mut self.verification {
            queue.advance();
        }
    }

    /// The verification seam, present only when the scenario has one.
    pub fn verification(&self) -> Option<&dyn IntegrityQueue> {
        self.verification
            .as_ref()
            .map(|_| self as &dyn IntegrityQueue)
    }
}

impl TaskRegistry for Scenario {
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
        self.tasks.iter().all(SimulatedTask::done)
    }
}

impl AllocationQueue for Scenario {
    fn current(&self) -> Option<QueueEntry> {
        self.allocation.as_ref().and_then(SimulatedQueue::entry)
    }

    fn waiting(&self) -> usize {
        self.allocation
            .as_ref()
            .filter(|queue| !queue.drained())
            .map_or(0, |queue| queue.backlog)
    }
}

impl IntegrityQueue for Scenario {
    fn head(&self) -> Option<QueueEntry> {
        self.verification.as_ref().and_then(SimulatedQueue::entry)
    }

    fn queued(&self) -> usize {
        self.verification
            .as_ref()
            .filter(|queue| !queue.drained())
            .map_or(0, |queue| queue.backlog + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScenarioConfig {
        ScenarioConfig {
            tasks: 1,
            total: 2048,
            step: 1024,
            connections: 1,
            seeding: false,
            allocate: false,
            verify: false,
        }
    }

    #[test]
    fn tasks_step_toward_their_total() {
        let mut scenario = Scenario::new(&config());
        assert_eq!(scenario.task(0).map(|t| t.completed_length()), Some(0));

        scenario.advance();
        assert_eq!(scenario.task(0).map(|t| t.completed_length()), Some(1024));

        scenario.advance();
        scenario.advance();
        let task = scenario.task(0).expect("task exists");
        assert_eq!(task.completed_length(), 2048);
        assert!(task.is_finished());
        assert_eq!(task.transfer_stat().download_speed(), 0);
    }

    #[test]
    fn unknown_total_grows_without_finishing() {
        let mut scenario = Scenario::new(&ScenarioConfig {
            total: 0,
            ..config()
        });
        for _ in 0..5 {
            scenario.advance();
        }

        let task = scenario.task(0).expect("task exists");
        assert_eq!(task.completed_length(), 5 * 1024);
        assert!(!task.is_finished());
    }

    #[test]
    fn seeding_tasks_accumulate_upload() {
        let mut scenario = Scenario::new(&ScenarioConfig {
            seeding: true,
            ..config()
        });
        scenario.advance();
        scenario.advance();

        let task = scenario.task(0).expect("task exists");
        assert!(task.reports_upload_ratio());
        assert_eq!(task.transfer_stat().upload_speed(), 512);
        assert_eq!(task.transfer_stat().session_upload_length(), 1024);
    }

    #[test]
    fn allocation_queue_drains_and_disappears() {
        let mut scenario = Scenario::new(&ScenarioConfig {
            allocate: true,
            ..config()
        });
        let entry = scenario.current().expect("entry present at start");
        assert_eq!(entry.task(), TaskId::new(2));
        assert_eq!(scenario.waiting(), 2);

        scenario.advance();
        assert!(scenario.current().is_none());
        assert_eq!(scenario.waiting(), 0);
    }

    #[test]
    fn verification_queue_counts_its_head() {
        let scenario = Scenario::new(&ScenarioConfig {
            verify: true,
            ..config()
        });

        assert!(scenario.verification().is_some());
        assert_eq!(scenario.queued(), 2);
        assert_eq!(scenario.head().map(|e| e.task()), Some(TaskId::new(1)));
    }

    #[test]
    fn registry_aggregates_across_tasks() {
        let scenario = Scenario::new(&ScenarioConfig {
            tasks: 3,
            ..config()
        });

        assert_eq!(scenario.task_count(), 3);
        assert_eq!(scenario.aggregate_stat().download_speed(), 3 * 1024);
        assert!(!scenario.all_finished());
    }
}
