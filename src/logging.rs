//! Logging configuration for datasense.
//!
//! Analysis code emits structured events through the `tracing` crate; this
//! module configures how those events are filtered and formatted. Library
//! users embedding datasense in an application with its own subscriber can
//! ignore this module entirely.

use tracing::Level;

/// Configuration for datasense's logging setup.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application
    pub level: Level,
    /// Log level for datasense components specifically
    pub analysis_level: Level,
    /// Whether to use JSON output format
    pub json_format: bool,
    /// Environment filter override
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            analysis_level: Level::DEBUG,
            json_format: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Creates a configuration for production use.
    pub fn production() -> Self {
        Self {
            level: Level::WARN,
            analysis_level: Level::INFO,
            json_format: true,
            env_filter: None,
        }
    }

    /// Creates a configuration for development use.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            analysis_level: Level::DEBUG,
            json_format: false,
            env_filter: None,
        }
    }

    /// Sets the log level for the application.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the log level for datasense components.
    pub fn with_analysis_level(mut self, level: Level) -> Self {
        self.analysis_level = level;
        self
    }

    /// Sets whether to use JSON output format.
    pub fn with_json_format(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    /// Sets a custom environment filter.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Builds the environment filter string.
    pub fn env_filter(&self) -> String {
        if let Some(ref filter) = self.env_filter {
            filter.clone()
        } else {
            format!(
                "{},datasense={}",
                self.level.as_str().to_lowercase(),
                self.analysis_level.as_str().to_lowercase()
            )
        }
    }
}

/// Initializes a global `tracing` subscriber.
///
/// The `RUST_LOG` environment variable takes precedence over the
/// configured filter when set.
///
/// # Examples
///
/// ```rust,no_run
/// use datasense::logging::{init_logging, LoggingConfig};
///
/// // Initialize with default configuration
/// init_logging(LoggingConfig::default()).unwrap();
///
/// // Initialize with custom configuration
/// let config = LoggingConfig::development().with_json_format(true);
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

    let fmt_layer = if config.json_format {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    subscriber.init();

    Ok(())
}
