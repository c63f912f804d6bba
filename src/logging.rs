use clap::{Args, ValueEnum};
use tracing::level_filters::LevelFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Verbosity. `trace` shows every frame written to the port.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Args, Debug)]
pub struct LoggingArgs {
    /// Log output format (stderr).
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text", global = true)]
    pub format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    pub level: LogLevel,
}

impl LoggingArgs {
    /// Installs the stderr subscriber. stdout stays reserved for the frame
    /// printout.
    pub fn init(&self) {
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(LevelFilter::from(self.level))
            .with_target(false);

        let _ = match self.format {
            LogFormat::Text => builder.without_time().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
    }
}
