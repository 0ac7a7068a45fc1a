use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

const VITALS_TARGETS: [&str; 2] = ["vitals_core", "vitals_cli"];

#[derive(Debug)]
pub enum TelemetryError {
    InvalidLevel { level: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidLevel { level, source } => {
                write!(f, "VITALS_LOG_LEVEL '{}' is not a valid filter: {}", level, source)
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "log subscriber already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidLevel { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Send evaluation logs to stderr so reports on stdout stay pipeable.
///
/// `RUST_LOG` is used verbatim when set. Otherwise `VITALS_LOG_LEVEL`
/// applies: a bare level like `debug` covers only the vitals crates, while
/// a full directive list is passed through unchanged.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config)?)
        .with_target(false)
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = directives_for(&config.log_level);
    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::InvalidLevel {
        level: config.log_level.clone(),
        source,
    })
}

/// Expand a bare level into per-crate directives; anything else is a
/// directive list already.
fn directives_for(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() || level.contains(['=', ',']) {
        return level.to_string();
    }
    VITALS_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
