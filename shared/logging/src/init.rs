use std::error::Error;
use std::fmt::{Display, Formatter};

use slog::{Drain, Level};
use slog_scope::GlobalLoggerGuard;
use slog_term::ThreadSafeTimestampFn;

/// Env var holding the log level, e.g. `STEER_LOG=debug`
pub const LOG_LEVEL_VAR: &str = "STEER_LOG";

pub struct LoggerBuilder {
    level: Level,
    chan_size: usize,
}

/// Keeps the global logger alive. Dropping it flushes pending records
pub struct Logger(Level, GlobalLoggerGuard, slog_async::AsyncGuard);

#[derive(Debug)]
pub enum LogError {
    BadLevel(String),
}

impl LoggerBuilder {
    pub fn with_env() -> Result<Self, LogError> {
        let mut builder = Self::default();

        if let Ok(env) = std::env::var(LOG_LEVEL_VAR) {
            let level = env.parse().map_err(|_| LogError::BadLevel(env.clone()))?;
            builder = builder.level(level)
        }

        Ok(builder)
    }

    pub fn level(mut self, s: Level) -> Self {
        self.level = s;
        self
    }

    /// Number of records buffered before the async drain starts dropping them
    pub fn chan_size(mut self, size: usize) -> Self {
        self.chan_size = size;
        self
    }

    pub fn init(self, timestamp_fn: impl ThreadSafeTimestampFn) -> Result<Logger, LogError> {
        let decorator = slog_term::TermDecorator::new().stderr().build();
        let drain = slog_term::CompactFormat::new(decorator)
            .use_custom_timestamp(timestamp_fn)
            .build()
            .fuse();
        let drain = drain.filter_level(self.level).fuse();
        let (drain, guard) = slog_async::Async::new(drain)
            .thread_name("logging".to_owned())
            .chan_size(self.chan_size)
            .build_with_guard();
        let logger = slog::Logger::root(drain.fuse(), slog::o!());

        let global = slog_scope::set_global_logger(logger);
        Ok(Logger(self.level, global, guard))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            level: Level::Info,
            chan_size: 1024,
        }
    }
}

impl Logger {
    pub fn level(&self) -> Level {
        self.0
    }
}

impl Display for LogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::BadLevel(s) => write!(f, "Invalid level {:?}", s),
        }
    }
}

impl Error for LogError {}
