use crate::platform::Platform;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level loader configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfigInner {
    /// Lets the loader fetch and link `recommended` dependencies.
    pub auto_fetch: bool,
    /// Root under which each linked dependency gets its own `<id>` directory.
    pub dependencies_dir: PathBuf,
    /// Target platform used to pick dependency binaries.
    pub platform: Platform,
    pub log: LogConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    #[serde(flatten, default)]
    inner: Arc<LoaderConfigInner>,
}

impl Deref for LoaderConfig {
    type Target = LoaderConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for LoaderConfig {
    fn deref_mut(&mut self) -> &mut LoaderConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logging configuration consumed by the host when installing the subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level: `trace`, `debug`, `info`, `warn` or `error`.
    pub level: String,
    /// Extra filter directives, e.g. `mbridge_dispatch=trace`.
    pub filter: Option<String>,
    pub console: bool,
    /// Directory for rolling log files; no file output when absent.
    pub path: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for LoaderConfigInner {
    fn default() -> Self {
        Self {
            auto_fetch: true,
            dependencies_dir: PathBuf::from(".mbridge/deps"),
            platform: Platform::current(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, console: true, path: None, json: false }
    }
}
