use log::LevelFilter;
use log4rs::Config;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::str::FromStr;
use thiserror::Error;

const APPENDER_NAME: &str = "stderr";
const LOG_PATTERN: &str = "{d(%H:%M:%S)} {h({l:5})} {t} - {m}{n}";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected off|error|warn|info|debug|trace")]
    InvalidLevel(String),
    #[error("invalid logging configuration: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    LevelFilter::from_str(level.trim()).map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

/// Sends this crate's log records to stderr at `level`; other crates only
/// get through at `warn` and above. Stdout stays reserved for command output.
pub fn init_logging(level: LevelFilter) -> Result<log4rs::Handle, LoggingError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build(APPENDER_NAME, Box::new(stderr)))
        .logger(Logger::builder().build(env!("CARGO_CRATE_NAME"), level))
        .build(
            Root::builder()
                .appender(APPENDER_NAME)
                .build(LevelFilter::Warn),
        )?;
    Ok(log4rs::init_config(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_accepts_known_values() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level(" debug ").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
    }

    #[test]
    fn test_parse_level_rejects_unknown_value() {
        let error = parse_level("loud").unwrap_err();

        assert!(error.to_string().contains("loud"));
    }
}
