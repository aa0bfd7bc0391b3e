use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides, e.g. `MBRIDGE__AUTO_FETCH=false`.
pub const ENV_PREFIX: &str = "MBRIDGE";
const DEFAULT_CONFIG_FILE: &str = "mbridge";

/// Custom error type for config loading.
#[mbridge_derive::mbridge_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration tree from an optional file overlaid with environment variables.
///
/// Layers, lowest priority first:
/// 1. **Base File**: `path`, or `mbridge.{toml,json,yaml,...}` in the working
///    directory. The default file is optional; an explicit path must exist.
/// 2. **Environment Overrides**: variables prefixed with `MBRIDGE__`, nested with
///    double underscores (`MBRIDGE__LOG__LEVEL` maps to `log.level`).
///
/// # Errors
/// Returns [`ConfigError::Config`] when a source cannot be read (including a
/// missing explicit file) or the merged tree does not deserialize into `T`.
///
/// # Example
/// ```rust
/// use mbridge_domain::config::LoaderConfig;
/// use mbridge_kernel::config::load_config;
///
/// // Without an `mbridge.*` file only defaults and `MBRIDGE__*` variables apply.
/// let cfg: LoaderConfig = load_config(None::<&str>).unwrap_or_default();
/// assert!(!cfg.log.level.is_empty());
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading loader configuration");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
