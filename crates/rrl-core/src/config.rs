//! Runtime configuration.
//!
//! Log verbosity comes from the `RRL_SDK_LOG` environment variable:
//! `off` (default), `error`, `warn`, `info`, `debug`, `trace`. The variable
//! is read once, on the first query, and cached. [`set_log_level`] overrides
//! the cached value at any time.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::structured_log::LogLevel;

/// Environment variable holding the log threshold.
pub const LOG_ENV: &str = "RRL_SDK_LOG";

// 0 = unresolved, 255 = resolving, otherwise LEVEL_* below.
// A non-blocking state machine instead of OnceLock: a backend hook that logs
// from inside env resolution must not wait on itself.
static CACHED_LEVEL: AtomicU8 = AtomicU8::new(LEVEL_UNRESOLVED);

const LEVEL_UNRESOLVED: u8 = 0;
const LEVEL_OFF: u8 = 1;
const LEVEL_ERROR: u8 = 2;
const LEVEL_WARN: u8 = 3;
const LEVEL_INFO: u8 = 4;
const LEVEL_DEBUG: u8 = 5;
const LEVEL_TRACE: u8 = 6;
const LEVEL_RESOLVING: u8 = 255;

/// Parse a threshold name (case-insensitive). `None` means logging off;
/// unknown names also mean off.
#[must_use]
pub fn parse_log_level(raw: &str) -> Option<LogLevel> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "error" => Some(LogLevel::Error),
        "warn" | "warning" => Some(LogLevel::Warn),
        "info" => Some(LogLevel::Info),
        "debug" => Some(LogLevel::Debug),
        "trace" | "all" => Some(LogLevel::Trace),
        _ => None,
    }
}

fn encode(level: Option<LogLevel>) -> u8 {
    match level {
        None => LEVEL_OFF,
        Some(LogLevel::Error) => LEVEL_ERROR,
        Some(LogLevel::Warn) => LEVEL_WARN,
        Some(LogLevel::Info) => LEVEL_INFO,
        Some(LogLevel::Debug) => LEVEL_DEBUG,
        Some(LogLevel::Trace) => LEVEL_TRACE,
    }
}

fn decode(v: u8) -> Option<LogLevel> {
    match v {
        LEVEL_ERROR => Some(LogLevel::Error),
        LEVEL_WARN => Some(LogLevel::Warn),
        LEVEL_INFO => Some(LogLevel::Info),
        LEVEL_DEBUG => Some(LogLevel::Debug),
        LEVEL_TRACE => Some(LogLevel::Trace),
        _ => None,
    }
}

/// Current log threshold; `None` when logging is off.
#[must_use]
pub fn log_level() -> Option<LogLevel> {
    let cached = CACHED_LEVEL.load(Ordering::Acquire);
    if cached != LEVEL_UNRESOLVED && cached != LEVEL_RESOLVING {
        return decode(cached);
    }
    // Someone else is resolving: stay quiet until they finish.
    if cached == LEVEL_RESOLVING {
        return None;
    }
    if CACHED_LEVEL
        .compare_exchange(
            LEVEL_UNRESOLVED,
            LEVEL_RESOLVING,
            Ordering::AcqRel,
            Ordering::Acquire,
        )
        .is_err()
    {
        return decode(CACHED_LEVEL.load(Ordering::Acquire));
    }

    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| parse_log_level(&v));
    // A concurrent set_log_level wins over the environment.
    let _ = CACHED_LEVEL.compare_exchange(
        LEVEL_RESOLVING,
        encode(level),
        Ordering::AcqRel,
        Ordering::Acquire,
    );
    decode(CACHED_LEVEL.load(Ordering::Acquire))
}

/// Override the threshold for the rest of the process (`None` = off).
pub fn set_log_level(level: Option<LogLevel>) {
    CACHED_LEVEL.store(encode(level), Ordering::Release);
}

/// Whether a record at `level` passes the current threshold.
#[must_use]
pub fn log_enabled(level: LogLevel) -> bool {
    log_level().is_some_and(|threshold| level <= threshold)
}

/// Serializes unit tests that change the process-wide threshold.
#[cfg(test)]
pub(crate) static TEST_LEVEL_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_levels() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("WARN"), Some(LogLevel::Warn));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warn));
        assert_eq!(parse_log_level(" info "), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("trace"), Some(LogLevel::Trace));
    }

    #[test]
    fn off_and_unknown_disable_logging() {
        assert_eq!(parse_log_level("off"), None);
        assert_eq!(parse_log_level(""), None);
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn encode_decode_roundtrip() {
        for level in [
            None,
            Some(LogLevel::Error),
            Some(LogLevel::Warn),
            Some(LogLevel::Info),
            Some(LogLevel::Debug),
            Some(LogLevel::Trace),
        ] {
            assert_eq!(decode(encode(level)), level);
        }
    }

    #[test]
    fn threshold_and_override() {
        let _guard = TEST_LEVEL_LOCK.lock();
        let previous = CACHED_LEVEL.load(Ordering::SeqCst);

        set_log_level(Some(LogLevel::Warn));
        assert!(log_enabled(LogLevel::Error));
        assert!(log_enabled(LogLevel::Warn));
        assert!(!log_enabled(LogLevel::Debug));

        set_log_level(None);
        assert!(!log_enabled(LogLevel::Error));

        CACHED_LEVEL.store(previous, Ordering::SeqCst);
    }

    #[test]
    fn resolving_state_is_quiet() {
        let _guard = TEST_LEVEL_LOCK.lock();
        let previous = CACHED_LEVEL.swap(LEVEL_RESOLVING, Ordering::SeqCst);
        assert_eq!(log_level(), None);
        CACHED_LEVEL.store(previous, Ordering::SeqCst);
    }
}
