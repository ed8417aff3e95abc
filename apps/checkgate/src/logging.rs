//! Diagnostic logging bootstrap.
//!
//! Logs go to stderr as `key=value` event lines so they never mix with the
//! report on stdout. Initialisation happens once per process; a second call
//! with the same level is a no-op and a different level is rejected.

use flexi_logger::{Logger, LoggerHandle, WriteMode};
use log::debug;
use once_cell::sync::OnceCell;

/// Environment variable consulted when no level is given explicitly.
pub const LOG_ENV: &str = "CHECKGATE_LOG";

static LOGGER: OnceCell<(&'static str, LoggerHandle)> = OnceCell::new();

/// Default level when neither CLI, env nor config sets one.
pub fn default_log_level() -> &'static str {
    "warn"
}

/// Initialise logging at `level` (trace|debug|info|warn|error).
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;
    if let Some((active, _)) = LOGGER.get() {
        if *active != level {
            return Err(format!(
                "logging already initialized with level `{active}`; refusing to switch to `{level}`"
            ));
        }
        return Ok(());
    }

    let (active, _) = LOGGER.get_or_try_init(|| -> Result<_, String> {
        let handle = Logger::try_with_str(level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_stderr()
            .write_mode(WriteMode::Direct)
            .format_for_stderr(flexi_logger::default_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;
        debug!(
            "event=logging_init level={} version={}",
            level,
            env!("CARGO_PKG_VERSION")
        );
        Ok((level, handle))
    })?;

    if *active != level {
        return Err(format!(
            "logging already initialized with level `{active}`; refusing to switch to `{level}`"
        ));
    }
    Ok(())
}

/// Map user input to a canonical level name.
pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" | "none" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert_eq!(normalize_level("none").unwrap(), "off");
    }

    #[test]
    fn normalize_level_rejects_unknown() {
        let err = normalize_level("loud").unwrap_err();
        assert!(err.contains("unsupported log level"));
    }

    #[test]
    fn init_is_idempotent_and_rejects_level_switch() {
        init_logging("error").expect("first init should succeed");
        init_logging("ERROR").expect("same level should be a no-op");
        let err = init_logging("debug").expect_err("level switch must fail");
        assert!(err.contains("refusing to switch"));
    }
}
