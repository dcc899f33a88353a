use std::sync::Arc;

use spdlog::sink::{FileSink, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, LogLevel};

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

fn add_console_sinks(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    let stdout = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stdout)
        .level_filter(LevelFilter::MoreVerbose(Level::Warn))
        .build()?);

    let stderr = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .level_filter(LevelFilter::MoreSevereEqual(Level::Warn))
        .build()?);

    builder.sink(stdout).sink(stderr);

    Ok(())
}

/// Sets up the default logger from the optional `[log]` section. A one-shot
/// run does not need rotation, so the file sink is a plain append.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    if let Some(ref log) = config.log {
        let mut builder = Logger::builder();

        if let Some(ref location) = log.location {
            let file_sink = Arc::new(FileSink::builder()
                .path(location)
                .truncate(false)
                .build()?);
            builder.sink(file_sink);
        }

        if log.log_to_console || log.location.is_none() {
            add_console_sinks(&mut builder)?;
        }

        let logger = Arc::new(builder.build()?);
        logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
        logger.set_level_filter(LevelFilter::MoreSevereEqual(log.level.into()));

        spdlog::set_default_logger(logger);
    }

    Ok(())
}
