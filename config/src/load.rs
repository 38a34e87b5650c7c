use std::{
    borrow::Cow,
    fmt, io,
    path::{Path, PathBuf},
};

use rust_cli_config::builder::{ConfigBuilder, DefaultState};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::environment::Environment;
use crate::shared::ValidationError;

/// Directory containing configuration files relative to the working directory.
const CONFIGURATION_DIR: &str = "configuration";

/// Supported extensions for base and environment configuration files.
const CONFIG_FILE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Prefix for environment variable configuration overrides.
const ENV_PREFIX: &str = "APP";

/// Separator between environment variable prefix and key segments.
const ENV_PREFIX_SEPARATOR: &str = "_";

/// Separator for nested configuration keys in environment variables.
const ENV_SEPARATOR: &str = "__";

/// Implemented by configuration structures that can be loaded with [`load_config`].
pub trait Config {
    /// Checks invariants that deserialization alone cannot express.
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Debug, Clone, Copy)]
enum ConfigFileKind {
    /// Base configuration, required whenever the configuration directory exists.
    Base,
    /// Optional environment-specific overrides.
    Environment(Environment),
}

impl ConfigFileKind {
    fn stem(&self) -> Cow<'static, str> {
        match self {
            ConfigFileKind::Base => Cow::Borrowed("base"),
            ConfigFileKind::Environment(env) => Cow::Borrowed(env.as_str()),
        }
    }
}

impl fmt::Display for ConfigFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFileKind::Base => f.write_str("base configuration"),
            ConfigFileKind::Environment(env) => write!(f, "{env} environment configuration"),
        }
    }
}

/// Errors that can occur while loading configuration files and overrides.
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("failed to determine the current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("could not locate {kind_description} in `{directory}`; attempted: {attempted}")]
    ConfigurationFileMissing {
        kind_description: String,
        directory: PathBuf,
        attempted: String,
    },

    #[error("failed to load {kind_description} from `{path}`: {source}")]
    ConfigurationFileLoad {
        kind_description: String,
        path: PathBuf,
        source: rust_cli_config::ConfigError,
    },

    #[error("failed to deserialize configuration: {0}")]
    Deserialization(#[source] rust_cli_config::ConfigError),

    #[error("failed to determine runtime environment: {0}")]
    Environment(#[from] io::Error),

    #[error("failed to initialize configuration builder: {0}")]
    Builder(#[source] rust_cli_config::ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

/// Loads layered configuration from the `configuration` directory of the working directory.
///
/// See [`load_config_from`] for the layering rules.
pub fn load_config<T>() -> Result<T, LoadConfigError>
where
    T: Config + DeserializeOwned,
{
    let base_path = std::env::current_dir().map_err(LoadConfigError::CurrentDir)?;
    load_config_from(&base_path.join(CONFIGURATION_DIR))
}

/// Loads layered configuration rooted at `configuration_directory`.
///
/// Sources are applied in order: `base.(yaml|yml|json)`, then `{environment}.(yaml|yml|json)`
/// when present, then `APP_`-prefixed environment variables with `__` separating nested keys
/// (`APP_PACING__MAX_CONSUME_DELAY_MS`). A missing directory is not an error: the structure's
/// serde defaults and the environment variables are used alone.
pub fn load_config_from<T>(configuration_directory: &Path) -> Result<T, LoadConfigError>
where
    T: Config + DeserializeOwned,
{
    let environment = Environment::load()?;

    let mut builder = rust_cli_config::Config::builder();

    if configuration_directory.is_dir() {
        let base_file = find_configuration_file(configuration_directory, ConfigFileKind::Base)?
            .ok_or_else(|| missing_file_error(configuration_directory, ConfigFileKind::Base))?;
        builder = builder.add_source(rust_cli_config::File::from(base_file.clone()));
        validate_configuration_source(&builder, ConfigFileKind::Base, &base_file)?;

        let environment_kind = ConfigFileKind::Environment(environment);
        if let Some(environment_file) =
            find_configuration_file(configuration_directory, environment_kind)?
        {
            builder = builder.add_source(rust_cli_config::File::from(environment_file.clone()));
            validate_configuration_source(&builder, environment_kind, &environment_file)?;
        }
    }

    let environment_source = rust_cli_config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_PREFIX_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true);
    builder = builder.add_source(environment_source);

    let settings = builder.build().map_err(LoadConfigError::Builder)?;
    let config = settings
        .try_deserialize::<T>()
        .map_err(LoadConfigError::Deserialization)?;
    config.validate()?;

    Ok(config)
}

fn find_configuration_file(
    directory: &Path,
    kind: ConfigFileKind,
) -> Result<Option<PathBuf>, LoadConfigError> {
    let stem = kind.stem();

    for extension in CONFIG_FILE_EXTENSIONS {
        let path = directory.join(format!("{stem}.{extension}"));
        if path.is_file() {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

fn missing_file_error(directory: &Path, kind: ConfigFileKind) -> LoadConfigError {
    let stem = kind.stem();
    let attempted = CONFIG_FILE_EXTENSIONS
        .iter()
        .map(|extension| format!("`{}`", directory.join(format!("{stem}.{extension}")).display()))
        .collect::<Vec<_>>()
        .join(", ");

    LoadConfigError::ConfigurationFileMissing {
        kind_description: kind.to_string(),
        directory: directory.to_path_buf(),
        attempted,
    }
}

fn validate_configuration_source(
    builder: &ConfigBuilder<DefaultState>,
    kind: ConfigFileKind,
    path: &Path,
) -> Result<(), LoadConfigError> {
    builder
        .clone()
        .build()
        .map_err(|source| LoadConfigError::ConfigurationFileLoad {
            kind_description: kind.to_string(),
            path: path.to_path_buf(),
            source,
        })
        .map(|_| ())
}
