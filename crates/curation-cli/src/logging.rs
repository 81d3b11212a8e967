use std::path::Path;
use std::str::FromStr;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A requested log file: `<name>.log`, receiving events at `level` and above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLevel {
    name: String,
    level: Level,
}

impl LogLevel {
    pub fn level(&self) -> Level {
        self.level
    }

    /// File name derived from the level name as given, lowercased.
    pub fn file_name(&self) -> String {
        format!("{}.log", self.name)
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let level = match name.as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" | "warning" => Level::WARN,
            "error" => Level::ERROR,
            _ => anyhow::bail!("unknown logging level: {s}"),
        };
        Ok(Self { name, level })
    }
}

/// Install one log file per level in `dir`, plus a stderr layer governed by
/// `RUST_LOG` (default `info`).
///
/// The returned guards flush the file writers when dropped and must be held
/// for the whole run.
pub fn init(dir: &Path, levels: &[LogLevel]) -> anyhow::Result<Vec<WorkerGuard>> {
    let mut guards = Vec::with_capacity(levels.len());
    let mut file_layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    for level in levels {
        let appender = tracing_appender::rolling::never(dir, level.file_name());
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);
        file_layers.push(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_filter(LevelFilter::from_level(level.level))
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(file_layers)
        .with(stderr_layer())
        .try_init()?;
    Ok(guards)
}

/// Stderr logging only, for commands that write no log files.
pub fn init_stderr() -> anyhow::Result<()> {
    tracing_subscriber::registry().with(stderr_layer()).try_init()?;
    Ok(())
}

fn stderr_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter)
}
