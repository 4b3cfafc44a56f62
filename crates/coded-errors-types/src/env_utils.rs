//! Environment-driven configuration.
//!
//! Knobs such as `CODED_ERRORS_STACK` are read once when a factory is built.
//! An unset variable silently yields the default; a variable that is set but
//! does not parse also yields the default, and is reported with
//! `tracing::warn!` so a typo in deployment config is visible.
//!
//! # Example
//!
//! ```
//! use coded_errors_types::env_utils::{env_var, env_var_or};
//!
//! let depth: usize = env_var_or("CODED_ERRORS_EXAMPLE_DEPTH", 16);
//! let custom: Option<u64> = env_var("CODED_ERRORS_EXAMPLE_CUSTOM");
//! assert_eq!(depth, 16);
//! assert_eq!(custom, None);
//! ```

use std::str::FromStr;
use tracing::warn;

/// Outcome of reading one configuration variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvSetting<T> {
    /// Variable not present (or not valid unicode).
    Unset,
    /// Present but rejected by `FromStr`; holds the raw text.
    Invalid(String),
    /// Present and parsed.
    Value(T),
}

impl<T> EnvSetting<T> {
    /// Parsed value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            EnvSetting::Value(v) => Some(v),
            EnvSetting::Unset | EnvSetting::Invalid(_) => None,
        }
    }
}

/// Read `key` and classify it as unset, invalid or a parsed value.
pub fn read_env<T: FromStr>(key: &str) -> EnvSetting<T> {
    match std::env::var(key) {
        Err(_) => EnvSetting::Unset,
        Ok(raw) => match raw.parse() {
            Ok(v) => EnvSetting::Value(v),
            Err(_) => EnvSetting::Invalid(raw),
        },
    }
}

/// Parsed value of `key`; `None` when unset or invalid. Invalid values are
/// logged.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    match read_env(key) {
        EnvSetting::Invalid(raw) => {
            warn!(key, value = %raw, "ignoring unparsable environment setting");
            None
        }
        setting => setting.value(),
    }
}

/// Parsed value of `key`, or `default` when unset or invalid.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_env_classifies() {
        const KEY: &str = "CODED_ERRORS_TEST_READ_ENV";
        std::env::remove_var(KEY);
        assert_eq!(read_env::<u32>(KEY), EnvSetting::Unset);

        std::env::set_var(KEY, "7");
        assert_eq!(read_env::<u32>(KEY), EnvSetting::Value(7));

        std::env::set_var(KEY, "seven");
        assert_eq!(
            read_env::<u32>(KEY),
            EnvSetting::Invalid("seven".to_string())
        );
        std::env::remove_var(KEY);
    }

    #[test]
    fn test_env_var_invalid_is_none() {
        const KEY: &str = "CODED_ERRORS_TEST_GARBAGE";
        std::env::set_var(KEY, "not-a-number");
        assert_eq!(env_var::<u32>(KEY), None);
        std::env::remove_var(KEY);
    }

    #[test]
    fn test_env_var_or() {
        const KEY: &str = "CODED_ERRORS_TEST_WITH_DEFAULT";
        std::env::set_var(KEY, "100");
        assert_eq!(env_var_or::<u64>(KEY, 50), 100);
        std::env::set_var(KEY, "lots");
        assert_eq!(env_var_or::<u64>(KEY, 50), 50);
        std::env::remove_var(KEY);
        assert_eq!(env_var_or::<u64>(KEY, 50), 50);
    }

    #[test]
    fn test_setting_value() {
        assert_eq!(EnvSetting::Value(3u8).value(), Some(3));
        assert_eq!(EnvSetting::<u8>::Invalid("x".into()).value(), None);
        assert_eq!(EnvSetting::<u8>::Unset.value(), None);
    }
}
