//! Runtime configuration read from the environment.
//!
//! | Variable                           | Default | Meaning                                   |
//! |------------------------------------|---------|-------------------------------------------|
//! | `POST_EDITOR_ENDPOINT`             | unset   | GraphQL URL; unset runs the in-memory store |
//! | `POST_EDITOR_TIMEOUT_SECS`         | `30`    | HTTP request timeout                      |
//! | `POST_EDITOR_BUFFER`               | `32`    | Editor command channel capacity           |
//! | `POST_EDITOR_RESET_FORM_ON_DELETE` | `true`  | Clear the create form after a delete      |

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const ENDPOINT_ENV: &str = "POST_EDITOR_ENDPOINT";
pub const TIMEOUT_ENV: &str = "POST_EDITOR_TIMEOUT_SECS";
pub const BUFFER_ENV: &str = "POST_EDITOR_BUFFER";
pub const RESET_FORM_ON_DELETE_ENV: &str = "POST_EDITOR_RESET_FORM_ON_DELETE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// GraphQL endpoint. `None` selects the in-memory backend.
    pub endpoint: Option<String>,
    pub request_timeout: Duration,
    pub command_buffer: usize,
    pub reset_form_on_delete: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            request_timeout: Duration::from_secs(30),
            command_buffer: 32,
            reset_form_on_delete: true,
        }
    }
}

impl EditorConfig {
    /// Reads the configuration, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let endpoint = env::var(ENDPOINT_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if let Some(ref url) = endpoint {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid(ENDPOINT_ENV, url, "expected an http(s) URL"));
            }
        }

        let request_timeout = match env::var(TIMEOUT_ENV) {
            Ok(v) => Duration::from_secs(parse_positive(TIMEOUT_ENV, &v)? as u64),
            Err(_) => defaults.request_timeout,
        };

        let command_buffer = match env::var(BUFFER_ENV) {
            Ok(v) => parse_positive(BUFFER_ENV, &v)?,
            Err(_) => defaults.command_buffer,
        };

        let reset_form_on_delete = match env::var(RESET_FORM_ON_DELETE_ENV) {
            Ok(v) => parse_bool(RESET_FORM_ON_DELETE_ENV, &v)?,
            Err(_) => defaults.reset_form_on_delete,
        };

        Ok(Self {
            endpoint,
            request_timeout,
            command_buffer,
            reset_form_on_delete,
        })
    }
}

fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(invalid(name, value, "must be greater than zero")),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(name, value, e.to_string())),
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(invalid(name, value, "expected true or false")),
    }
}
