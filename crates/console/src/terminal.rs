//! Terminal probes behind the [`Console`] trait.

use std::io::{self, IsTerminal};

/// Column count assumed whenever the real width cannot be determined.
pub const DEFAULT_COLUMNS: usize = 80;

/// Answers the two questions the reporter asks about its destination:
/// is it an interactive terminal, and how wide is it right now.
///
/// The width is probed on every call rather than cached, so a resize
/// between ticks takes effect on the next repaint.
pub trait Console {
    /// Returns `true` when the destination is an interactive terminal.
    fn is_interactive(&self) -> bool;

    /// Returns the current width in character cells.
    fn columns(&self) -> usize;
}

/// Probes the process's standard output.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutConsole;

impl StdoutConsole {
    /// Creates a probe for standard output.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Console for StdoutConsole {
    fn is_interactive(&self) -> bool {
        io::stdout().is_terminal()
    }

    fn columns(&self) -> usize {
        // A zero-column answer is a failed query as far as layout goes.
        match crossterm::terminal::size() {
            Ok((columns, _)) if columns > 0 => usize::from(columns),
            _ => DEFAULT_COLUMNS,
        }
    }
}

/// A console with predetermined answers, for tests and for hosts that
/// pin the layout regardless of the real terminal.
#[derive(Clone, Copy, Debug)]
pub struct FixedConsole {
    interactive: bool,
    columns: usize,
}

impl FixedConsole {
    /// Creates a console that reports the given interactivity and width.
    #[must_use]
    pub const fn new(interactive: bool, columns: usize) -> Self {
        Self {
            interactive,
            columns,
        }
    }

    /// An interactive console of the given width.
    #[must_use]
    pub const fn interactive(columns: usize) -> Self {
        Self::new(true, columns)
    }

    /// A non-interactive console, as seen through a pipe or a file.
    #[must_use]
    pub const fn detached() -> Self {
        Self::new(false, DEFAULT_COLUMNS)
    }
}

impl Console for FixedConsole {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn columns(&self) -> usize {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_console_reports_what_it_was_given() {
        let console = FixedConsole::interactive(120);
        assert!(console.is_interactive());
        assert_eq!(console.columns(), 120);
    }

    #[test]
    fn detached_console_is_never_interactive() {
        let console = FixedConsole::detached();
        assert!(!console.is_interactive());
        assert_eq!(console.columns(), DEFAULT_COLUMNS);
    }
}
