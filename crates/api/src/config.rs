//! Application configuration loaded from environment variables.

use std::str::FromStr;

use domain::EmailUniqueness;

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Which error-kind to status-code table the HTTP layer uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorStatusMode {
    /// Only request-shape errors get 4xx codes; domain errors are 500.
    #[default]
    Legacy,
    /// Each domain error kind gets its own 4xx code.
    Strict,
}

impl FromStr for ErrorStatusMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown error status mode: {other}")),
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default `0.0.0.0`)
/// - `PORT`: listen port (default `3000`)
/// - `RUST_LOG`: tracing filter directive (default `info`)
/// - `LOG_FORMAT`: `pretty` or `json` (default `pretty`)
/// - `ERROR_STATUS_MODE`: `legacy` or `strict` (default `legacy`)
/// - `EMAIL_UNIQUENESS`: `unguarded` or `serialized` (default `unguarded`)
///
/// Unparseable values fall back to the default.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub error_status_mode: ErrorStatusMode,
    pub email_uniqueness: EmailUniqueness,
}

/// A setting that was present but could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSetting {
    pub key: &'static str,
    pub value: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// Settings that fail to parse are returned alongside so they can be
    /// logged once tracing is up.
    pub fn from_env() -> (Self, Vec<InvalidSetting>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<InvalidSetting>) {
        let defaults = Self::default();
        let mut invalid = Vec::new();
        let config = Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT", &mut invalid).unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: parsed(&lookup, "LOG_FORMAT", &mut invalid).unwrap_or(defaults.log_format),
            error_status_mode: parsed(&lookup, "ERROR_STATUS_MODE", &mut invalid)
                .unwrap_or(defaults.error_status_mode),
            email_uniqueness: parsed(&lookup, "EMAIL_UNIQUENESS", &mut invalid)
                .unwrap_or(defaults.email_uniqueness),
        };
        (config, invalid)
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    invalid: &mut Vec<InvalidSetting>,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            invalid.push(InvalidSetting { key, value: raw });
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            error_status_mode: ErrorStatusMode::default(),
            email_uniqueness: EmailUniqueness::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> (Config, Vec<InvalidSetting>) {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.error_status_mode, ErrorStatusMode::Legacy);
        assert_eq!(config.email_uniqueness, EmailUniqueness::Unguarded);
    }

    #[test]
    fn test_reads_every_key() {
        let (config, invalid) = from_pairs(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("RUST_LOG", "debug"),
            ("LOG_FORMAT", "json"),
            ("ERROR_STATUS_MODE", "Strict"),
            ("EMAIL_UNIQUENESS", "serialized"),
        ]);

        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.error_status_mode, ErrorStatusMode::Strict);
        assert_eq!(config.email_uniqueness, EmailUniqueness::Serialized);
        assert!(invalid.is_empty());
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let (config, invalid) = from_pairs(&[
            ("PORT", "not-a-port"),
            ("LOG_FORMAT", "xml"),
            ("ERROR_STATUS_MODE", "lenient"),
            ("EMAIL_UNIQUENESS", "locked"),
        ]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.error_status_mode, ErrorStatusMode::Legacy);
        assert_eq!(config.email_uniqueness, EmailUniqueness::Unguarded);

        let keys: Vec<&str> = invalid.iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec!["PORT", "LOG_FORMAT", "ERROR_STATUS_MODE", "EMAIL_UNIQUENESS"]
        );
        assert_eq!(invalid[0].value, "not-a-port");
    }

    #[test]
    fn test_missing_keys_are_not_reported() {
        let (config, invalid) = from_pairs(&[]);
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert!(invalid.is_empty());
    }

    #[test]
    fn test_addr_default() {
        assert_eq!(Config::default().addr(), "0.0.0.0:3000");
    }
}
