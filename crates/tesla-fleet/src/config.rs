//! Backend configuration, resolved from the environment
//!
//! The façade never looks at these values itself: they only describe how to
//! reach the vehicle-command backend and which token to present to it.

use std::fmt;
use std::path::PathBuf;

use crate::error::{FleetClientError, Result};

/// Default base URL of a locally running `tesla-http-proxy`
pub const DEFAULT_COMMAND_URL: &str = "https://localhost:4443";

/// Environment variable names
pub const ENV_COMMAND_URL: &str = "TESLA_COMMAND_URL";
pub const ENV_ACCESS_TOKEN: &str = "TESLA_ACCESS_TOKEN";
pub const ENV_TOKEN_FILE: &str = "TESLA_TOKEN_FILE";

/// Connection settings for the vehicle-command backend
#[derive(Clone)]
pub struct FleetConfig {
    /// Base URL of the backend
    pub base_url: String,
    /// Access token given inline
    pub access_token: Option<String>,
    /// File holding the access token, read when `access_token` is unset
    pub token_file: Option<PathBuf>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COMMAND_URL.to_string(),
            access_token: None,
            token_file: None,
        }
    }
}

impl fmt::Debug for FleetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FleetConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("token_file", &self.token_file)
            .finish()
    }
}

impl FleetConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            base_url: get(ENV_COMMAND_URL).unwrap_or_else(|| DEFAULT_COMMAND_URL.to_string()),
            access_token: get(ENV_ACCESS_TOKEN),
            token_file: get(ENV_TOKEN_FILE).map(PathBuf::from),
        }
    }

    /// Resolve the access token: inline value first, then the token file.
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(token) = self.access_token.as_deref().map(str::trim) {
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }

        let Some(path) = &self.token_file else {
            return Err(FleetClientError::MissingCredentials(format!(
                "set {} or {}",
                ENV_ACCESS_TOKEN, ENV_TOKEN_FILE
            )));
        };

        let token = std::fs::read_to_string(path)?.trim().to_string();
        if token.is_empty() {
            return Err(FleetClientError::MissingCredentials(format!(
                "token file '{}' is empty",
                path.display()
            )));
        }

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = FleetConfig::from_lookup(lookup(&[]));
        assert_eq!(config.base_url, DEFAULT_COMMAND_URL);
        assert!(config.access_token.is_none());
        assert!(config.token_file.is_none());
    }

    #[test]
    fn empty_values_are_unset() {
        let config = FleetConfig::from_lookup(lookup(&[
            (ENV_COMMAND_URL, ""),
            (ENV_ACCESS_TOKEN, "  "),
        ]));
        assert_eq!(config.base_url, DEFAULT_COMMAND_URL);
        assert!(config.access_token.is_none());
    }

    #[test]
    fn inline_token_wins_over_file() {
        let config = FleetConfig::from_lookup(lookup(&[
            (ENV_ACCESS_TOKEN, "inline-token"),
            (ENV_TOKEN_FILE, "/does/not/exist"),
        ]));
        assert_eq!(config.resolve_token().unwrap(), "inline-token");
    }

    #[test]
    fn token_is_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "file-token").unwrap();

        let config = FleetConfig {
            token_file: Some(file.path().to_path_buf()),
            ..FleetConfig::default()
        };
        assert_eq!(config.resolve_token().unwrap(), "file-token");
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = FleetConfig::default().resolve_token().unwrap_err();
        assert!(matches!(err, FleetClientError::MissingCredentials(_)));
    }

    #[test]
    fn empty_token_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = FleetConfig {
            token_file: Some(file.path().to_path_buf()),
            ..FleetConfig::default()
        };
        assert!(matches!(
            config.resolve_token().unwrap_err(),
            FleetClientError::MissingCredentials(_)
        ));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = FleetConfig {
            access_token: Some("super-secret".to_string()),
            ..FleetConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
