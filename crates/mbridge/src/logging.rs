use crate::error::LoaderError;
use mbridge_domain::config::LogConfig;
use mbridge_logger::{LevelFilter, Logger};

/// Installs the global subscriber described by `config`.
///
/// Keep the returned [`Logger`] alive for as long as file output should be
/// flushed.
pub fn init_logging(name: &str, config: &LogConfig) -> Result<Logger, LoaderError> {
    let level: LevelFilter = config.level.parse().map_err(|_| LoaderError::InvalidLogLevel {
        level: config.level.clone(),
        context: None,
    })?;

    let mut builder = Logger::builder().name(name).level(level).console(config.console);
    if let Some(directives) = &config.filter {
        builder = builder.env_filter(directives.as_str());
    }

    let logger = match &config.path {
        Some(dir) => {
            let file = builder.path(dir);
            if config.json { file.json().init()? } else { file.init()? }
        },
        None => builder.init()?,
    };

    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_is_rejected_before_install() {
        let config = LogConfig { level: "loud".to_owned(), ..LogConfig::default() };
        let err = init_logging("loader", &config).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidLogLevel { ref level, .. } if level == "loud"));
    }
}
