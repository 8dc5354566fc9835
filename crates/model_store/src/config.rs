use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lpforge_model_core::{ModelError, ModelResult};

const DEFAULT_CONFIG_NAME: &str = "lpforge.json";
const DEFAULT_SQLITE_NAME: &str = "lpforge.sqlite";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum DatabaseConfig {
    Sqlite { path: Option<String> },
    Postgres { url: String },
}

impl DatabaseConfig {
    /// Accepts `postgres://` / `postgresql://` URLs and `sqlite://<path>`.
    pub fn from_url(url: &str) -> ModelResult<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            return Ok(DatabaseConfig::Postgres {
                url: url.to_string(),
            });
        }
        if let Some(rest) = url.strip_prefix("sqlite:") {
            let path = rest.trim_start_matches("//");
            let path = path.split('?').next().unwrap_or_default();
            if path.is_empty() {
                return Err(ModelError::validation("sqlite url has no path"));
            }
            return Ok(DatabaseConfig::Sqlite {
                path: Some(path.to_string()),
            });
        }
        Err(ModelError::validation(format!(
            "unsupported database url '{url}'"
        )))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolConfig {
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub connect_timeout_ms: Option<u64>,
    pub acquire_timeout_ms: Option<u64>,
    pub idle_timeout_ms: Option<u64>,
}

impl PoolConfig {
    pub fn with_defaults() -> Self {
        Self {
            max_connections: Some(10),
            min_connections: Some(1),
            connect_timeout_ms: Some(5_000),
            acquire_timeout_ms: Some(5_000),
            idle_timeout_ms: Some(600_000),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    Off,
    Warn,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntegrityConfig {
    pub reference_checks: Option<ValidationMode>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    pub database: DatabaseConfig,
    pub pool: Option<PoolConfig>,
    pub integrity: Option<IntegrityConfig>,
    pub failpoints: Option<Vec<String>>,
}

impl StoreConfig {
    pub fn default_sqlite(path: impl Into<String>) -> Self {
        Self {
            database: DatabaseConfig::Sqlite {
                path: Some(path.into()),
            },
            pool: Some(PoolConfig::with_defaults()),
            integrity: Some(IntegrityConfig {
                reference_checks: Some(ValidationMode::Off),
            }),
            failpoints: None,
        }
    }

    pub fn with_reference_checks(mut self, mode: ValidationMode) -> Self {
        self.integrity = Some(IntegrityConfig {
            reference_checks: Some(mode),
        });
        self
    }

    pub fn with_failpoints<I, S>(mut self, failpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failpoints = Some(failpoints.into_iter().map(Into::into).collect());
        self
    }

    pub fn reference_checks(&self) -> ValidationMode {
        self.integrity
            .as_ref()
            .and_then(|cfg| cfg.reference_checks)
            .unwrap_or(ValidationMode::Off)
    }

    /// Reads `lpforge.json` from `base_dir`, writing a SQLite default on first use.
    pub fn load_or_init(base_dir: &Path) -> ModelResult<Self> {
        fs::create_dir_all(base_dir)
            .map_err(|err| ModelError::storage(format!("create config dir: {err}")))?;
        let config_path = base_dir.join(DEFAULT_CONFIG_NAME);
        if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .map_err(|err| ModelError::storage(format!("read config: {err}")))?;
            let config: StoreConfig = serde_json::from_str(&raw)
                .map_err(|err| ModelError::validation(format!("parse config: {err}")))?;
            return Ok(config);
        }
        let default = StoreConfig::default_sqlite(DEFAULT_SQLITE_NAME);
        let payload = serde_json::to_string_pretty(&default)
            .map_err(|err| ModelError::storage(format!("serialize config: {err}")))?;
        fs::write(&config_path, payload)
            .map_err(|err| ModelError::storage(format!("write config: {err}")))?;
        Ok(default)
    }

    pub fn sqlite_path(&self, base_dir: &Path) -> ModelResult<PathBuf> {
        match &self.database {
            DatabaseConfig::Sqlite { path } => {
                let path = path
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SQLITE_NAME.to_string());
                let candidate = PathBuf::from(path);
                if candidate.is_absolute() {
                    Ok(candidate)
                } else {
                    Ok(base_dir.join(candidate))
                }
            }
            DatabaseConfig::Postgres { .. } => {
                Err(ModelError::validation("config is not sqlite backend"))
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.database {
            DatabaseConfig::Sqlite { .. } => "sqlite",
            DatabaseConfig::Postgres { .. } => "postgres",
        }
    }

    pub fn connection_url(&self, base_dir: &Path) -> ModelResult<String> {
        match &self.database {
            DatabaseConfig::Sqlite { .. } => {
                let path = self.sqlite_path(base_dir)?;
                Ok(format!("sqlite://{}?mode=rwc", path.display()))
            }
            DatabaseConfig::Postgres { url } => Ok(url.clone()),
        }
    }
}
