#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `stats` holds the data model shared between a transfer manager and its
//! status reporter: the [`TransferStat`] counter record, the read-only
//! interfaces the reporter consumes ([`TaskRegistry`], [`AllocationQueue`],
//! [`IntegrityQueue`]), and the [`StatusSnapshot`] captured once per
//! reporting tick.
//!
//! # Design
//!
//! The reporter never talks to the transfer manager directly. Everything it
//! displays comes out of one [`StatusSnapshot::collect`] call, which flattens
//! the registry into plain [`TaskEntry`] rows and copies the head of each
//! background queue. Rendering from the snapshot keeps a status line from
//! mixing state sampled at two different instants.
//!
//! The integrity-verification subsystem is optional at the host's choice:
//! callers pass `Option<&dyn IntegrityQueue>` and absent simply means no
//! checksum segment is shown. A task's seeding behaviour is likewise an
//! explicit capability flag ([`Task::reports_upload_ratio`]) instead of a
//! concrete-type check.
//!
//! # Invariants
//!
//! - A `total_length` of zero means "unknown"; consumers must not divide by
//!   it.
//! - Registry order is display order; the task at index 0 is the one shown
//!   by the compact one-line mode.
//! - `StatusSnapshot` owns its rows; it stays valid after the registry moves
//!   on.
//!
//! # Examples
//!
//! ```
//! use stats::{TaskEntry, TaskId, TransferStat};
//!
//! let stat = TransferStat::new(64 * 1024, 0, 0, 0);
//! let entry = TaskEntry::new(TaskId::new(1), 512, 2048)
//!     .with_connections(4)
//!     .with_stat(stat);
//!
//! assert_eq!(entry.completed_length(), 512);
//! assert_eq!(entry.stat().download_speed(), 64 * 1024);
//! ```

mod queue;
mod snapshot;
mod stat;
mod task;

pub use crate::queue::{AllocationQueue, IntegrityQueue, QueueEntry};
pub use crate::snapshot::{StatusSnapshot, TaskEntry};
pub use crate::stat::TransferStat;
pub use crate::task::{Task, TaskId, TaskRegistry};
