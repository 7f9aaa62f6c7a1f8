//! Server configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default: `0.0.0.0`)
//! - `PORT`: bind port (default: `9090`)
//! - `DEFAULT_PAGE_SIZE`: page size when a request omits `size` (default: `10`)
//! - `WORKER_THREADS`: tokio worker threads (default: logical CPU count)
//!
//! Empty or whitespace-only values are treated as absent.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 9090;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Errors raised while reading [`ServerConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid HOST: '{0}'. Expected an IP address")]
    InvalidHost(String),

    #[error("Invalid PORT: '{0}'. Expected an integer between 0 and 65535")]
    InvalidPort(String),

    #[error("Invalid DEFAULT_PAGE_SIZE: '{0}'. Expected a positive integer")]
    InvalidPageSize(String),

    #[error("Invalid WORKER_THREADS: '{0}'. Expected a positive integer")]
    InvalidWorkerThreads(String),

    #[error("{0} environment variable is not valid UTF-8")]
    NotUnicode(&'static str),
}

/// Process-level settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub default_page_size: NonZeroUsize,
    /// `None` lets tokio pick the logical CPU count.
    pub worker_threads: Option<NonZeroUsize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            default_page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            worker_threads: None,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if any variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigurationError::NotUnicode(key)),
        })
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if any variable holds an invalid value,
    /// or if `lookup` itself fails.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&'static str) -> Result<Option<String>, ConfigurationError>,
    {
        let defaults = Self::default();
        let read = |key| lookup(key).map(non_blank);

        let host = parse_or(read("HOST")?, defaults.host, ConfigurationError::InvalidHost)?;
        let port = parse_or(read("PORT")?, defaults.port, ConfigurationError::InvalidPort)?;
        let default_page_size = parse_or(
            read("DEFAULT_PAGE_SIZE")?,
            defaults.default_page_size,
            ConfigurationError::InvalidPageSize,
        )?;
        let worker_threads = read("WORKER_THREADS")?
            .map(|value| parse(&value, ConfigurationError::InvalidWorkerThreads))
            .transpose()?;

        Ok(Self {
            host,
            port,
            default_page_size,
            worker_threads,
        })
    }

    #[must_use]
    pub const fn socket_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse<T, E>(value: &str, error: E) -> Result<T, ConfigurationError>
where
    T: FromStr,
    E: FnOnce(String) -> ConfigurationError,
{
    value.parse().map_err(|_| error(value.to_string()))
}

fn parse_or<T, E>(value: Option<String>, default: T, error: E) -> Result<T, ConfigurationError>
where
    T: FromStr,
    E: FnOnce(String) -> ConfigurationError,
{
    value.map_or(Ok(default), |value| parse(&value, error))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&'static str, &str)]) -> Result<ServerConfig, ConfigurationError> {
        let variables: HashMap<&str, String> = pairs
            .iter()
            .map(|(key, value)| (*key, (*value).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| Ok(variables.get(key).cloned()))
    }

    #[rstest]
    fn test_defaults_when_nothing_is_set() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_address().to_string(), "0.0.0.0:9090");
        assert_eq!(config.default_page_size.get(), 10);
        assert!(config.worker_threads.is_none());
    }

    #[rstest]
    fn test_reads_all_variables() {
        let config = from_pairs(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("DEFAULT_PAGE_SIZE", "25"),
            ("WORKER_THREADS", " 4 "),
        ])
        .unwrap();

        assert_eq!(config.socket_address().to_string(), "127.0.0.1:3000");
        assert_eq!(config.default_page_size.get(), 25);
        assert_eq!(config.worker_threads.map(NonZeroUsize::get), Some(4));
    }

    #[rstest]
    #[case("HOST", "")]
    #[case("PORT", "   ")]
    #[case("WORKER_THREADS", "")]
    fn test_blank_values_are_absent(#[case] key: &'static str, #[case] value: &str) {
        assert_eq!(from_pairs(&[(key, value)]).unwrap(), ServerConfig::default());
    }

    #[rstest]
    #[case("HOST", "localhost", ConfigurationError::InvalidHost("localhost".to_string()))]
    #[case("PORT", "70000", ConfigurationError::InvalidPort("70000".to_string()))]
    #[case("DEFAULT_PAGE_SIZE", "0", ConfigurationError::InvalidPageSize("0".to_string()))]
    #[case("DEFAULT_PAGE_SIZE", "-3", ConfigurationError::InvalidPageSize("-3".to_string()))]
    #[case("WORKER_THREADS", "0", ConfigurationError::InvalidWorkerThreads("0".to_string()))]
    #[case("WORKER_THREADS", "many", ConfigurationError::InvalidWorkerThreads("many".to_string()))]
    fn test_invalid_values_are_rejected(
        #[case] key: &'static str,
        #[case] value: &str,
        #[case] expected: ConfigurationError,
    ) {
        assert_eq!(from_pairs(&[(key, value)]).unwrap_err(), expected);
    }

    #[rstest]
    fn test_lookup_failure_propagates() {
        let result = ServerConfig::from_lookup(|key| Err(ConfigurationError::NotUnicode(key)));
        assert_eq!(result.unwrap_err(), ConfigurationError::NotUnicode("HOST"));
    }

    #[rstest]
    fn test_error_display() {
        let error = ConfigurationError::InvalidPort("x".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid PORT: 'x'. Expected an integer between 0 and 65535"
        );
    }
}
