//! Configuration for query rendering and join limits.
//!
//! [`QueryMakerConfig`] is read from `config/config.toml` or environment
//! variables using [`QueryMakerConfig::load()`]. Every key is optional.
//! Environment variables override the file: `QUERYMAKER_BACKEND=sqlite` sets
//! `querymaker.backend`.
//!
//! ```toml
//! [querymaker]
//! backend = "postgres"
//! max_join_depth = 8
//! log_sql = false
//! ```

use crate::error::Result;
use crate::query::Backend;
use config::{Config, ConfigError, Environment, File, Source};
use once_cell::sync::Lazy;
use serde::Deserialize;

const CONFIG_FILE: &str = "config/config.toml";
const ENV_PREFIX: &str = "QUERYMAKER";
const SECTION: &str = "querymaker";

static GLOBAL: Lazy<QueryMakerConfig> = Lazy::new(|| match QueryMakerConfig::load() {
    Ok(cfg) => cfg,
    Err(err) => {
        log::warn!("failed to load querymaker configuration, using defaults: {err}");
        QueryMakerConfig::default()
    }
});

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryMakerConfig {
    /// SQL dialect used by `to_sql`
    #[serde(default)]
    pub backend: Backend,
    /// Maximum number of relationship joins in one expression
    #[serde(default = "default_max_join_depth")]
    pub max_join_depth: usize,
    /// Log every rendered statement at debug level
    #[serde(default)]
    pub log_sql: bool,
}

fn default_max_join_depth() -> usize {
    8
}

impl Default for QueryMakerConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            max_join_depth: default_max_join_depth(),
            log_sql: false,
        }
    }
}

impl QueryMakerConfig {
    /// Load from `config/config.toml`, overridden by `QUERYMAKER_*` env vars.
    pub fn load() -> Result<Self> {
        Self::load_layered(File::with_name(CONFIG_FILE).required(false), environment())
    }

    /// Load from a specific file; env vars are not consulted.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let builder = Config::builder().add_source(File::from(path.as_ref()).required(true));
        Self::from_builder(builder)
    }

    /// Process-wide configuration, loaded on first use.
    ///
    /// Falls back to [`QueryMakerConfig::default`] if loading fails.
    pub fn global() -> &'static QueryMakerConfig {
        &GLOBAL
    }

    fn load_layered<S>(file: S, env: Environment) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let mut builder = Config::builder().add_source(file);
        // env keys are top-level; they belong to the section
        for (key, value) in env.collect()? {
            builder = builder.set_override(format!("{SECTION}.{key}"), value)?;
        }
        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let settings = builder.build()?;
        match settings.get::<QueryMakerConfig>(SECTION) {
            Ok(cfg) => Ok(cfg),
            // A missing section means "all defaults"
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
