//! # StockDesk Terminal Library
//!
//! Line-oriented front end for the StockDesk inventory and point-of-sale
//! core.
//!
//! ## Module Organization
//! ```text
//! stockdesk_terminal_lib/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── Session (PosState + config)
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch & Reply
//! │   ├── parser.rs   ◄─── Input line parsing
//! │   ├── product.rs  ◄─── Stock commands
//! │   ├── cart.rs     ◄─── Cart commands
//! │   ├── sale.rs     ◄─── Sale & invoice commands
//! │   └── config.rs   ◄─── Config & export
//! ├── render.rs       ◄─── Text output
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::io::{self, BufRead, Write};

use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use tracing::{debug, info, warn, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::{execute, parse_command, Reply};
use error::{ApiError, TerminalError};
use state::{ConfigState, Session};

const USAGE: &str = "\
StockDesk - inventory & point of sale

Usage: stockdesk [OPTIONS]

Options:
  --no-seed    Start with an empty inventory
  --json       Print one JSON object per command instead of text
  -h, --help   Show this help message

Commands are read from standard input, one per line. Type `help` once running.";

/// Command-line options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub no_seed: bool,
    pub json: bool,
    pub help: bool,
}

impl Options {
    /// Parses the arguments after the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, TerminalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Options::default();
        for arg in args {
            match arg.as_ref() {
                "--no-seed" => options.no_seed = true,
                "--json" => options.json = true,
                "--help" | "-h" => options.help = true,
                other => return Err(TerminalError::Usage(other.to_string())),
            }
        }
        Ok(options)
    }
}

/// Runs the terminal application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • --no-seed, --json, --help                                         │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,stockdesk=debug, can be overridden with RUST_LOG    │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • STOCKDESK_* environment variables over defaults                   │
/// │                                                                         │
/// │  4. Create Session ───────────────────────────────────────────────────► │
/// │     • Seeded inventory unless disabled                                  │
/// │                                                                         │
/// │  5. Command Loop ─────────────────────────────────────────────────────► │
/// │     • One command per stdin line until `quit` or end of input           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), TerminalError> {
    let options = Options::parse(std::env::args().skip(1))?;
    if options.help {
        println!("{}", USAGE);
        return Ok(());
    }

    init_tracing();
    info!("Starting StockDesk terminal");

    let mut config = ConfigState::from_env()?;
    if options.no_seed {
        config.seed = false;
    }
    info!(
        store = %config.store_name,
        invoice_dir = %config.invoice_dir.display(),
        seed = config.seed,
        "Configuration loaded"
    );

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(
        &mut session,
        stdin.lock(),
        stdout.lock(),
        options.json,
        || Local::now().fixed_offset(),
    )?;

    info!("StockDesk terminal stopped");
    Ok(())
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Command failures are reported on `output` and the loop carries on. Only
/// I/O failures end the session.
pub fn run_session<R, W, C>(
    session: &mut Session,
    input: R,
    mut output: W,
    json: bool,
    clock: C,
) -> Result<(), TerminalError>
where
    R: BufRead,
    W: Write,
    C: Fn() -> DateTime<FixedOffset>,
{
    if !json {
        writeln!(output, "StockDesk ({}). Type `help` for commands.", session.config().store_name)?;
        write!(output, "> ")?;
        output.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        debug!(line = %line, "Command received");

        let result = parse_command(&line)
            .and_then(|parsed| parsed.map(|command| execute(session, command, clock())).transpose());

        let quit = matches!(result, Ok(Some(Reply::Quit)));
        match result {
            Ok(Some(reply)) => write_reply(&mut output, &reply, session.config(), json)?,
            Ok(None) => {}
            Err(e) => {
                warn!(code = ?e.code, message = %e.message, "Command failed");
                write_error(&mut output, &e, json)?;
            }
        }

        if quit {
            break;
        }
        if !json {
            write!(output, "> ")?;
        }
        output.flush()?;
    }

    Ok(())
}

/// One line of `--json` output.
#[derive(Serialize)]
struct JsonLine<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<&'a Reply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ApiError>,
}

fn write_reply<W: Write>(
    output: &mut W,
    reply: &Reply,
    config: &ConfigState,
    json: bool,
) -> Result<(), TerminalError> {
    if json {
        let line = JsonLine {
            ok: true,
            reply: Some(reply),
            error: None,
        };
        writeln!(output, "{}", serde_json::to_string(&line)?)?;
    } else {
        writeln!(output, "{}", render::render(reply, config))?;
    }
    Ok(())
}

fn write_error<W: Write>(output: &mut W, error: &ApiError, json: bool) -> Result<(), TerminalError> {
    if json {
        let line = JsonLine {
            ok: false,
            reply: None,
            error: Some(error),
        };
        writeln!(output, "{}", serde_json::to_string(&line)?)?;
    } else {
        writeln!(output, "error: {}", error.message)?;
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockdesk_core=trace` - Show trace for the core only
/// - Default: INFO, DEBUG for the stockdesk crates
///
/// Logs go to stderr so stdout carries only command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter, io::stderr).init();
}

const DEFAULT_LOG_FILTER: &str = "info,stockdesk_core=debug,stockdesk_terminal_lib=debug";

/// Formatting subscriber gated only by `filter`.
fn log_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tracing::Level;

    fn clock() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
            .unwrap()
    }

    fn run_script(script: &str, json: bool) -> (Session, String) {
        let mut session = Session::new(ConfigState::default());
        let mut output = Vec::new();
        run_session(&mut session, script.as_bytes(), &mut output, json, clock).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_options() {
        assert_eq!(Options::parse(Vec::<String>::new()).unwrap(), Options::default());

        let options = Options::parse(["--json", "--no-seed"]).unwrap();
        assert!(options.json && options.no_seed && !options.help);

        assert!(matches!(
            Options::parse(["--verbose"]),
            Err(TerminalError::Usage(arg)) if arg == "--verbose"
        ));
    }

    #[test]
    fn test_session_keeps_going_after_errors() {
        let (session, output) = run_script(
            "cart add STK003 99\n\
             sell\n\
             cart add STK003 2\n\
             sell bill\n",
            false,
        );

        assert!(output.contains("error: Insufficient stock!"));
        assert!(output.contains("error: Cart is empty!"));
        assert!(output.contains("Sale completed! Bill generated."));
        assert!(session.pos().cart().is_empty());
        assert_eq!(session.pos().inventory().get("STK003").unwrap().quantity, 13);
    }

    #[test]
    fn test_quit_stops_reading() {
        let (session, output) = run_script("quit\ncart add STK001\n", false);
        assert!(output.contains("Bye."));
        assert!(session.pos().cart().is_empty());
    }

    #[test]
    fn test_json_output() {
        let (_, output) = run_script("cart add STK002 2\ncart add STK404\n\n", true);
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["ok"], true);
        assert_eq!(lines[0]["reply"]["kind"], "cart");
        assert_eq!(lines[1]["ok"], false);
        assert_eq!(lines[1]["error"]["code"], "NOT_FOUND");
    }

    #[test]
    fn test_default_log_filter_levels() {
        let subscriber = log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER), io::sink);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "some_dependency", Level::INFO));
            assert!(!tracing::enabled!(target: "some_dependency", Level::DEBUG));
            assert!(!tracing::enabled!(target: "some_dependency", Level::TRACE));
            assert!(tracing::enabled!(target: "stockdesk_core::state", Level::DEBUG));
            assert!(!tracing::enabled!(target: "stockdesk_core::state", Level::TRACE));
        });
    }

    #[test]
    fn test_log_filter_follows_directives() {
        let subscriber = log_subscriber(EnvFilter::new("warn"), io::sink);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "stockdesk_terminal_lib", Level::WARN));
            assert!(!tracing::enabled!(target: "stockdesk_terminal_lib", Level::INFO));
        });
    }
}
