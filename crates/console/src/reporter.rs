//! The rate-limited reporter that ties sampling to rendering.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use stats::{AllocationQueue, IntegrityQueue, StatusSnapshot, TaskRegistry};
use tracing::{debug, trace};

use crate::format;
use crate::output::{self, LineMode};
use crate::render;
use crate::terminal::{Console, DEFAULT_COLUMNS, StdoutConsole};

/// Tuning knobs for a [`Reporter`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReporterOptions {
    summary_interval: u64,
    refresh: Duration,
}

impl ReporterOptions {
    /// Creates options with the given summary cadence and the default
    /// one-second refresh.
    ///
    /// The cadence counts emissions, not wall-clock time; `0` disables
    /// summary blocks entirely.
    #[must_use]
    pub const fn new(summary_interval: u64) -> Self {
        Self {
            summary_interval,
            refresh: Duration::from_secs(1),
        }
    }

    /// Replaces the minimum delay between emissions.
    #[must_use]
    pub const fn with_refresh(mut self, refresh: Duration) -> Self {
        self.refresh = refresh;
        self
    }

    /// Returns the summary cadence in emissions; `0` means disabled.
    #[must_use]
    pub const fn summary_interval(&self) -> u64 {
        self.summary_interval
    }

    /// Returns the minimum delay between emissions.
    #[must_use]
    pub const fn refresh(&self) -> Duration {
        self.refresh
    }
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Periodic console reporter for a transfer manager.
///
/// Call [`tick`](Self::tick) as often as convenient, every pass of an
/// event loop included; emissions are throttled to the configured
/// refresh interval and everything else is a cheap early return. On an
/// interactive terminal the status line repaints in place at the probed
/// width; redirected output gets one full line per emission. Every
/// `summary_interval` emissions a multi-line summary of all tasks goes
/// out first.
#[derive(Debug)]
pub struct Reporter<W, C> {
    sink: W,
    console: C,
    summary_interval: u64,
    refresh: Duration,
    last_emit: Option<Instant>,
    tick_count: u64,
}

impl Reporter<Stdout, StdoutConsole> {
    /// A reporter writing to standard output with a live terminal probe.
    #[must_use]
    pub fn stdout(options: ReporterOptions) -> Self {
        Self::new(io::stdout(), StdoutConsole::new(), options)
    }
}

impl<W: Write, C: Console> Reporter<W, C> {
    /// Creates a reporter over an arbitrary sink and console probe.
    pub fn new(sink: W, console: C, options: ReporterOptions) -> Self {
        Self {
            sink,
            console,
            summary_interval: options.summary_interval(),
            refresh: options.refresh(),
            last_emit: None,
            tick_count: 0,
        }
    }

    /// Number of emissions since the last summary.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Consumes the reporter and returns its sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Samples the manager and repaints the console if an emission is
    /// due.
    ///
    /// Returns without touching the sink while less than the refresh
    /// interval has passed since the previous emission; the first call
    /// always emits. A due emission takes one snapshot, prints the
    /// summary block first when its cadence comes up and the registry
    /// holds at least one task, then writes the status line in the mode
    /// the console probe calls for.
    pub fn tick(
        &mut self,
        registry: &dyn TaskRegistry,
        allocation: &dyn AllocationQueue,
        integrity: Option<&dyn IntegrityQueue>,
    ) -> io::Result<()> {
        let now = Instant::now();
        if let Some(last) = self.last_emit {
            if now.duration_since(last) < self.refresh {
                trace!("refresh interval not yet elapsed, skipping emission");
                return Ok(());
            }
        }
        self.last_emit = Some(now);
        self.tick_count = self.tick_count.saturating_add(1);

        let snapshot = StatusSnapshot::collect(registry, allocation, integrity);
        let interactive = self.console.is_interactive();
        let columns = if interactive {
            self.console.columns()
        } else {
            DEFAULT_COLUMNS
        };
        trace!(interactive, columns, "probed output width");

        if self.summary_due(&snapshot) {
            if interactive {
                output::erase_line(&mut self.sink, columns)?;
            }
            let timestamp = format::local_timestamp();
            render::summary_block(&mut self.sink, &snapshot, columns, &timestamp)?;
            self.tick_count = 0;
            debug!(tasks = snapshot.task_count(), "wrote progress summary");
        }

        let line = render::status_line(&snapshot);
        let mode = if interactive {
            LineMode::Overwrite { columns }
        } else {
            LineMode::Append
        };
        output::write_status_line(&mut self.sink, &line, mode)
    }

    fn summary_due(&self, snapshot: &StatusSnapshot) -> bool {
        self.summary_interval > 0
            && self.tick_count % self.summary_interval == 0
            && snapshot.task_count() > 0
    }
}
