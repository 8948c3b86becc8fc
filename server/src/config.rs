//! Runtime configuration read from the process environment.
//!
//! | Variable       | Default     | Meaning                                  |
//! |----------------|-------------|------------------------------------------|
//! | `HOST`         | `127.0.0.1` | interface to bind                        |
//! | `PORT`         | `4000`      | port to bind                             |
//! | `GRAPHQL_PATH` | `/graphql`  | route serving the GraphQL endpoint       |
//! | `TODO_MODE`    | `multi`     | `single` or `multi` (todos need a user)  |
//! | `LOG_FORMAT`   | `text`      | `text` or `json` log lines               |

use crate::error::ConfigError;

pub const DEFAULT_GRAPHQL_PATH: &str = "/graphql";

/// Whether todos must belong to a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Todos may be created without an owner.
    Single,
    /// Every todo must reference an existing user.
    #[default]
    Multi,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub graphql_path: String,
    pub mode: Mode,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            graphql_path: DEFAULT_GRAPHQL_PATH.to_string(),
            mode: Mode::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: port.clone(),
                reason: "expected a port number",
            })?;
        }
        if let Some(path) = lookup("GRAPHQL_PATH") {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid {
                    key: "GRAPHQL_PATH",
                    value: path,
                    reason: "must start with '/'",
                });
            }
            config.graphql_path = path;
        }
        if let Some(mode) = lookup("TODO_MODE") {
            config.mode = match mode.trim().to_ascii_lowercase().as_str() {
                "single" => Mode::Single,
                "multi" => Mode::Multi,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "TODO_MODE",
                        value: mode,
                        reason: "expected 'single' or 'multi'",
                    })
                }
            };
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            config.log_format = match format.trim().to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "LOG_FORMAT",
                        value: format,
                        reason: "expected 'text' or 'json'",
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
