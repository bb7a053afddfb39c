//! Composes status readouts from a snapshot.
//!
//! Two products come out of this module: the one-line readout that the
//! reporter repaints every tick, and the multi-line summary block that
//! appears on the configured cadence. Both are plain strings or writes;
//! terminal handling lives in [`crate::output`].

use std::io::{self, Write};

use stats::{QueueEntry, StatusSnapshot, TaskEntry};

use crate::format;

/// Renders one task as its bracketed block.
///
/// A finished task that still reports an upload ratio shows `SEEDING`
/// with the ratio; everything else shows completed/total sizes with a
/// percentage once the total is known. Connection count is always
/// present, download speed only while unfinished, upload figures only
/// after bytes have actually gone out, and the ETA only while a known
/// total and a nonzero speed make it computable.
#[must_use]
pub fn task_block(task: &TaskEntry) -> String {
    let stat = task.stat();
    let mut block = format!("[#{} ", task.id());
    if task.is_finished() && task.reports_upload_ratio() {
        block.push_str("SEEDING");
        if let Some(ratio) =
            format::upload_ratio(stat.all_time_upload_length(), task.completed_length())
        {
            block.push_str(&format!("(ratio:{ratio})"));
        }
    } else {
        block.push_str(&format!(
            "SIZE:{}B/{}B",
            format::abbrev_size(task.completed_length()),
            format::abbrev_size(task.total_length()),
        ));
        if let Some(pct) = format::percent(task.completed_length(), task.total_length()) {
            block.push_str(&format!("({pct}%)"));
        }
    }
    block.push_str(&format!(" CN:{}", task.connection_count()));
    if !task.is_finished() {
        block.push_str(&format!(" SPD:{}", format::speed_kib(stat.download_speed())));
    }
    if stat.session_upload_length() > 0 {
        block.push_str(&format!(
            " UP:{}({}B)",
            format::speed_kib(stat.upload_speed()),
            format::abbrev_size(stat.all_time_upload_length()),
        ));
    }
    if task.total_length() > 0 && stat.download_speed() > 0 {
        let eta = task.total_length().saturating_sub(task.completed_length())
            / stat.download_speed();
        block.push_str(&format!(" ETA:{}", format::duration_hms(eta)));
    }
    block.push(']');
    block
}

/// Builds the one-line readout for a whole snapshot.
///
/// The first task's block leads, annotated with `(Nmore...)` when others
/// wait behind it. The aggregate speed bracket appears while several
/// tasks are still moving, then the allocation and verification brackets
/// with their own queue notes. An idle snapshot yields an empty string.
#[must_use]
pub fn status_line(snapshot: &StatusSnapshot) -> String {
    let mut line = String::new();
    if let Some(first) = snapshot.primary() {
        line.push_str(&task_block(first));
        if snapshot.task_count() > 1 {
            line.push_str(&format!("({}more...)", snapshot.task_count() - 1));
        }
    }
    if snapshot.task_count() > 1 && !snapshot.all_finished() {
        let total = format::speed_kib(snapshot.aggregate().download_speed());
        push_segment(&mut line, &format!("[TOTAL SPD:{total}]"));
    }
    if let Some(entry) = snapshot.allocation() {
        push_segment(&mut line, &queue_block("FileAlloc", entry));
        if snapshot.allocation_waiting() > 0 {
            line.push_str(&format!("({}waiting...)", snapshot.allocation_waiting()));
        }
    }
    if let Some(entry) = snapshot.integrity() {
        push_segment(&mut line, &queue_block("Checksum", entry));
        if snapshot.integrity_queued() > 1 {
            line.push_str(&format!("({}more...)", snapshot.integrity_queued() - 1));
        }
    }
    line
}

/// Writes the periodic multi-line summary covering every task.
///
/// A timestamped header opens the block, a `=` rule spans the full
/// width, and each task contributes its block, its destination path and
/// a `-` rule. A blank line closes the block so the status line that
/// follows stands apart.
pub fn summary_block<W: Write>(
    out: &mut W,
    snapshot: &StatusSnapshot,
    columns: usize,
    timestamp: &str,
) -> io::Result<()> {
    writeln!(out, " *** Download Progress Summary as of {timestamp} *** ")?;
    writeln!(out, "{}", "=".repeat(columns))?;
    for task in snapshot.tasks() {
        writeln!(out, "{}", task_block(task))?;
        writeln!(out, "FILE: {}", task.file_path().display())?;
        writeln!(out, "{}", "-".repeat(columns))?;
    }
    writeln!(out)
}

/// Appends a bracketed segment, separated from earlier content by a
/// single space.
fn push_segment(line: &mut String, segment: &str) {
    if !line.is_empty() {
        line.push(' ');
    }
    line.push_str(segment);
}

fn queue_block(label: &str, entry: QueueEntry) -> String {
    let percent = format::percent(entry.current_length(), entry.total_length())
        .map_or_else(|| "--".to_string(), |pct| pct.to_string());
    format!(
        "[{label}:#{} {}B/{}B({percent}%)]",
        entry.task(),
        format::abbrev_size(entry.current_length()),
        format::abbrev_size(entry.total_length()),
    )
}
