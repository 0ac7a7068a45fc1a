use std::env;
use std::fmt;
use std::path::PathBuf;

/// Process configuration for the CLI.
///
/// Table paths left unset fall back to the builtin presets.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tables: TableConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let tables = TableConfig {
            reference: path_var("VITALS_REFERENCE")?,
            questionnaire: path_var("VITALS_QUESTIONNAIRE")?,
            referral: path_var("VITALS_REFERRAL")?,
        };

        let log_level = env::var("VITALS_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            tables,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Override files for the configuration tables.
#[derive(Debug, Clone, Default)]
pub struct TableConfig {
    pub reference: Option<PathBuf>,
    pub questionnaire: Option<PathBuf>,
    pub referral: Option<PathBuf>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn path_var(var: &'static str) -> Result<Option<PathBuf>, ConfigError> {
    let Ok(value) = env::var(var) else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::EmptyPath { var });
    }
    let path = PathBuf::from(value);
    if !path.is_file() {
        return Err(ConfigError::MissingFile { var, path });
    }
    Ok(Some(path))
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyPath { var: &'static str },
    MissingFile { var: &'static str, path: PathBuf },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPath { var } => write!(f, "{var} is set but empty"),
            ConfigError::MissingFile { var, path } => {
                write!(f, "{var} points to '{}', which is not a file", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("VITALS_REFERENCE");
        env::remove_var("VITALS_QUESTIONNAIRE");
        env::remove_var("VITALS_REFERRAL");
        env::remove_var("VITALS_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert!(config.tables.reference.is_none());
        assert!(config.tables.questionnaire.is_none());
        assert!(config.tables.referral.is_none());
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn reads_table_path_and_log_level() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let file = tempfile::NamedTempFile::new().expect("temp file");
        env::set_var("VITALS_REFERENCE", file.path());
        env::set_var("VITALS_LOG_LEVEL", "debug");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.tables.reference.as_deref(), Some(file.path()));
        assert_eq!(config.telemetry.log_level, "debug");
        reset_env();
    }

    #[test]
    fn rejects_empty_path() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("VITALS_QUESTIONNAIRE", "  ");
        let err = AppConfig::load().expect_err("empty path rejected");
        assert!(matches!(
            err,
            ConfigError::EmptyPath {
                var: "VITALS_QUESTIONNAIRE"
            }
        ));
        reset_env();
    }

    #[test]
    fn rejects_missing_file() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("VITALS_REFERRAL", "/nonexistent/referral.json");
        let err = AppConfig::load().expect_err("missing file rejected");
        match &err {
            ConfigError::MissingFile { var, path } => {
                assert_eq!(*var, "VITALS_REFERRAL");
                assert_eq!(path, &PathBuf::from("/nonexistent/referral.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("not a file"));
        reset_env();
    }
}
