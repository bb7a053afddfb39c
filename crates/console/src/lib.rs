#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `console` turns [`stats::StatusSnapshot`] values into terminal output:
//! a compact status line that redraws in place on an interactive terminal
//! (or appends plain lines when output goes to a file or pipe), plus a
//! periodic multi-line summary block covering every task.
//!
//! # Design
//!
//! [`Reporter`] is the only stateful piece. It gates sampling to at most
//! one emission per refresh interval, counts successful ticks for the
//! summary cadence, probes the terminal through a [`Console`]
//! implementation and writes through any [`Write`](std::io::Write) sink.
//! Everything underneath is pure: [`render`] composes strings from a
//! snapshot, [`format`] renders individual fields, and [`output`] holds
//! the two write disciplines.
//!
//! Keeping the probe and the sink as type parameters lets tests drive a
//! reporter with a [`FixedConsole`] and a `Vec<u8>` and assert on exact
//! byte sequences; no real terminal is involved.
//!
//! # Invariants
//!
//! - At most one emission per refresh interval; a skipped tick changes no
//!   state.
//! - Overwrite mode never writes a line terminator and never exceeds the
//!   probed column count; append mode never truncates.
//! - The summary block always writes full terminated lines, whichever
//!   output mode is active.
//!
//! # Errors
//!
//! Only failures of the underlying writer surface, as
//! [`std::io::Error`]. Terminal probes and timestamp formatting recover
//! silently.
//!
//! # Examples
//!
//! Capture the overwrite discipline against an in-memory sink:
//!
//! ```
//! use console::output::{LineMode, write_status_line};
//!
//! let mut captured = Vec::new();
//! write_status_line(
//!     &mut captured,
//!     "[#1 SIZE:0B/1.0KiB(0%) CN:1]",
//!     LineMode::Overwrite { columns: 10 },
//! )?;
//!
//! // Erase sequence, then the line cut to ten characters, no newline.
//! assert_eq!(captured, b"\r          \r[#1 SIZE:0");
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod format;
pub mod output;
mod parse;
pub mod render;
mod reporter;
mod terminal;

pub use crate::parse::{SummaryIntervalError, parse_summary_interval};
pub use crate::reporter::{Reporter, ReporterOptions};
pub use crate::terminal::{Console, DEFAULT_COLUMNS, FixedConsole, StdoutConsole};
