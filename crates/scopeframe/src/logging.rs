//! Logging setup for the scopeframe CLI.
//!
//! Diagnostics go to stderr so stdout stays machine-readable for piped
//! `--format json` output. The codec crates emit `trace!` events for every
//! scope open and close, so event targets are kept in the output to tell
//! `scopeframe_codec` chatter apart from CLI messages.

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

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

pub fn init_logging(format: LogFormat, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::from(level))
        .with_ansi(false)
        .with_target(true);

    // A second call (tests, embedding) leaves the existing subscriber in
    // place.
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels_map_to_ascending_filters() {
        let levels = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let filters: Vec<LevelFilter> = levels.into_iter().map(LevelFilter::from).collect();
        assert!(filters.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
    }
}
