//! Command-line front end for the scripted reporter demo.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::{
    Console, FixedConsole, Reporter, ReporterOptions, StdoutConsole, parse_summary_interval,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::scenario::{Scenario, ScenarioConfig};

/// Installs the stderr tracing subscriber, honoring `RUST_LOG`.
///
/// Status output owns stdout, so diagnostics go to stderr. Installation
/// is best-effort; a second call leaves the first subscriber in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Parses arguments and replays the scripted transfer against `stdout`.
///
/// Usage errors and I/O failures go to `stderr`; help and version
/// requests print to `stdout` and count as success.
#[must_use]
pub fn run_with<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match clap_command().try_get_matches_from(args) {
        Ok(matches) => match execute(&matches, stdout) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                let _ = writeln!(stderr, "statline: {error}");
                ExitCode::FAILURE
            }
        },
        Err(error)
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = write!(stdout, "{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = write!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn clap_command() -> Command {
    Command::new("statline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Replays a scripted multi-task transfer through the console status reporter")
        .arg(
            Arg::new("tasks")
                .long("tasks")
                .value_name("COUNT")
                .help("Number of simulated tasks.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(u64).range(0..=64))
                .default_value("1"),
        )
        .arg(
            Arg::new("total")
                .long("total")
                .value_name("BYTES")
                .help("Total length of each task; 0 leaves the total unknown.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(u64))
                .default_value("10240"),
        )
        .arg(
            Arg::new("step")
                .long("step")
                .value_name("BYTES")
                .help("Bytes each task advances per tick; doubles as its speed.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("1024"),
        )
        .arg(
            Arg::new("connections")
                .long("connections")
                .value_name("COUNT")
                .help("Connection count reported by every task.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(u32))
                .default_value("1"),
        )
        .arg(
            Arg::new("summary-interval")
                .long("summary-interval")
                .value_name("TICKS")
                .help("Write a full progress summary every TICKS emissions; 0 disables.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(parse_summary_interval)
                .default_value("0"),
        )
        .arg(
            Arg::new("ticks")
                .long("ticks")
                .value_name("COUNT")
                .help("How many reporter ticks to drive before exiting.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(u64).range(1..=100_000))
                .default_value("10"),
        )
        .arg(
            Arg::new("interval-ms")
                .long("interval-ms")
                .value_name("MILLIS")
                .help("Real delay between ticks, for watching the repaint live.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(u64).range(0..=60_000))
                .default_value("0"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("COLUMNS")
                .help("Force interactive repainting at a fixed width instead of probing stdout.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(u16).range(1..=1000)),
        )
        .arg(
            Arg::new("seeding")
                .long("seeding")
                .help("Tasks upload while they run and seed once finished.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("allocate")
                .long("allocate")
                .help("Show a file-allocation entry working through its queue.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Show an integrity-check entry working through its queue.")
                .action(ArgAction::SetTrue),
        )
}

fn execute<Out: Write>(matches: &ArgMatches, stdout: &mut Out) -> io::Result<()> {
    let config = ScenarioConfig {
        tasks: matches.get_one::<u64>("tasks").copied().unwrap_or(1),
        total: matches.get_one::<u64>("total").copied().unwrap_or(10_240),
        step: matches.get_one::<u64>("step").copied().unwrap_or(1024),
        connections: matches.get_one::<u32>("connections").copied().unwrap_or(1),
        seeding: matches.get_flag("seeding"),
        allocate: matches.get_flag("allocate"),
        verify: matches.get_flag("check"),
    };
    let summary_interval = matches
        .get_one::<u64>("summary-interval")
        .copied()
        .unwrap_or(0);
    let ticks = matches.get_one::<u64>("ticks").copied().unwrap_or(10);
    let pause = Duration::from_millis(matches.get_one::<u64>("interval-ms").copied().unwrap_or(0));

    // Every driven tick is an emission; pacing comes from the pause.
    let options = ReporterOptions::new(summary_interval).with_refresh(Duration::ZERO);
    let mut scenario = Scenario::new(&config);
    debug!(tasks = config.tasks, ticks, summary_interval, "starting scripted run");

    match matches.get_one::<u16>("width") {
        Some(&columns) => drive(
            Reporter::new(stdout, FixedConsole::interactive(usize::from(columns)), options),
            &mut scenario,
            ticks,
            pause,
        ),
        None => drive(
            Reporter::new(stdout, StdoutConsole::new(), options),
            &mut scenario,
            ticks,
            pause,
        ),
    }
}

fn drive<W: Write, C: Console>(
    mut reporter: Reporter<W, C>,
    scenario: &mut Scenario,
    ticks: u64,
    pause: Duration,
) -> io::Result<()> {
    for _ in 0..ticks {
        let shared: &Scenario = scenario;
        reporter.tick(shared, shared, shared.verification())?;
        scenario.advance();
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }
    Ok(())
}
