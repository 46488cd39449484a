//! Subscriber wiring: a coloured stderr layer and a plain-text file layer.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::Level;

use super::utils::{HEADER_TIME_FORMAT, LINE_TIME_FORMAT, log_file_path, strip_ansi, utc_now};

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "pyphot::stage";

/// Environment variable holding an optional console filter directive.
const LOG_ENV_VAR: &str = "PYPHOT_LOG";

#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

fn message_of(event: &tracing::Event<'_>) -> String {
    let mut extractor = MessageExtractor::default();
    event.record(&mut extractor);
    extractor.message
}

/// One line of the log file. Debug lines keep their target so library
/// events (`pyphot_file::parse::raw`, ...) can be told apart.
fn file_line(level: Level, target: &str, msg: &str, ts: &str) -> String {
    match (level, target) {
        (Level::INFO, STAGE_TARGET) => format!("[{ts}] ==> {msg}"),
        (Level::ERROR, _) => format!("[{ts}]     [error] {msg}"),
        (Level::WARN, _) => format!("[{ts}]     [warn] {msg}"),
        (Level::DEBUG | Level::TRACE, _) => format!("[{ts}]     [debug] {target}: {msg}"),
        _ => format!("[{ts}]     {msg}"),
    }
}

/// Appends every event to `<cache>/pyphot/<command>.log`.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Start a fresh log for `command`, headed by the version and start time.
    ///
    /// `None` when the cache directory cannot be written; the run then goes
    /// on with console output only.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let version =
            option_env!("PYPHOT_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let rule = "=".repeat(42);
        let header = format!(
            "{rule}\npyphot-file {version} {command} {}\n{rule}\n",
            utc_now(HEADER_TIME_FORMAT),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let line = file_line(
            *metadata.level(),
            metadata.target(),
            &strip_ansi(&message_of(event)),
            &utc_now(LINE_TIME_FORMAT),
        );
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Console format: coloured level tags, `==>` for stages, dimmed debug.
struct PyphotFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for PyphotFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let msg = message_of(event);
        match *metadata.level() {
            Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            Level::INFO if metadata.target() == STAGE_TARGET => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Install the global subscriber for a `pyphot-file` run.
///
/// The console gets `INFO` (`DEBUG` with `verbose`) on stderr, keeping
/// stdout free for `--json` output. `PYPHOT_LOG` takes an `EnvFilter`
/// directive such as `pyphot_file::parse=trace` and overrides that level.
/// The log file always receives `DEBUG` and above.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(console_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let console_layer = fmt::layer()
        .event_format(PyphotFormatter)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
