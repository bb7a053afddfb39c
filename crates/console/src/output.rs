//! Write disciplines for the status line.
//!
//! An interactive terminal gets overwrite mode: blank the current line
//! with a carriage-return pad, then write the new readout truncated to
//! the terminal width with no line terminator, so the next tick repaints
//! in place. Redirected output gets append mode, one full line per tick.

use std::io::{self, Write};

/// How a status readout reaches the sink.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineMode {
    /// Repaint in place, truncating to the given column count.
    Overwrite {
        /// Terminal width in character cells.
        columns: usize,
    },
    /// Append the full readout followed by a newline.
    Append,
}

/// Blanks the current terminal line.
///
/// Writes a carriage return, `columns` spaces, then a second carriage
/// return, leaving the cursor at column zero on an empty line.
pub fn erase_line<W: Write>(out: &mut W, columns: usize) -> io::Result<()> {
    write!(out, "\r{}\r", " ".repeat(columns))
}

/// Cuts a line down to at most `columns` characters.
///
/// Counts characters rather than bytes, so a multi-byte file name never
/// splits mid-sequence.
#[must_use]
pub fn truncate_columns(line: &str, columns: usize) -> &str {
    match line.char_indices().nth(columns) {
        Some((index, _)) => &line[..index],
        None => line,
    }
}

/// Writes one status readout according to `mode` and flushes the sink.
///
/// Overwrite mode erases first and leaves the cursor mid-line; append
/// mode terminates the line. Both flush, so a reader on the far end of a
/// pipe sees every tick as it happens.
pub fn write_status_line<W: Write>(out: &mut W, line: &str, mode: LineMode) -> io::Result<()> {
    match mode {
        LineMode::Overwrite { columns } => {
            erase_line(out, columns)?;
            out.write_all(truncate_columns(line, columns).as_bytes())?;
        }
        LineMode::Append => {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erase_pads_to_width() {
        let mut out = Vec::new();
        erase_line(&mut out, 4).expect("writing to a Vec succeeds");
        assert_eq!(out, b"\r    \r");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_columns("hello", 10), "hello");
        assert_eq!(truncate_columns("hello", 3), "hel");
        assert_eq!(truncate_columns("hello", 0), "");
        assert_eq!(truncate_columns("писатель", 4), "писа");
    }

    #[test]
    fn overwrite_erases_then_cuts_to_width() {
        let mut out = Vec::new();
        write_status_line(&mut out, "0123456789ABC", LineMode::Overwrite { columns: 10 })
            .expect("writing to a Vec succeeds");
        assert_eq!(out, b"\r          \r0123456789");
    }

    #[test]
    fn overwrite_keeps_short_lines_whole() {
        let mut out = Vec::new();
        write_status_line(&mut out, "[#1]", LineMode::Overwrite { columns: 10 })
            .expect("writing to a Vec succeeds");
        assert_eq!(out, b"\r          \r[#1]");
    }

    #[test]
    fn append_terminates_the_line() {
        let mut out = Vec::new();
        write_status_line(&mut out, "[#1 SIZE:0B/0B CN:1]", LineMode::Append)
            .expect("writing to a Vec succeeds");
        assert_eq!(out, b"[#1 SIZE:0B/0B CN:1]\n");
    }

    #[test]
    fn append_never_truncates() {
        let long = "x".repeat(300);
        let mut out = Vec::new();
        write_status_line(&mut out, &long, LineMode::Append).expect("writing to a Vec succeeds");
        assert_eq!(out.len(), 301);
        assert_eq!(out.last(), Some(&b'\n'));
    }
}
