use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalysisSettings, Config, LoggingSettings};

/// File read when no explicit path is given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `MERIDIAN__ANALYSIS__SEED=7`.
pub const ENV_PREFIX: &str = "MERIDIAN";

/// Loads the application configuration.
///
/// Sources, lowest priority first: built-in defaults, the TOML file at `path`
/// (or an optional `config.toml` in the working directory), then
/// `MERIDIAN__SECTION__KEY` environment variables. The merged result is
/// validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    build(
        path,
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    )
}

fn build(path: Option<&Path>, environment: config::Environment) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };
    let builder = config::Config::builder()
        .add_source(config::Config::try_from(&Config::default())?)
        .add_source(file)
        .add_source(environment)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.analysis.validate()?;
    tracing::debug!(?config, "configuration loaded");

    Ok(config)
}
