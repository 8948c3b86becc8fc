//! Error types for the todo service.
//!
//! Clients only ever see the message text, so the variants stay coarse:
//! a required argument was blank, or a referenced entity does not exist.

use std::fmt;

use thiserror::Error;

/// Kind of entity an operation referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Todo,
    User,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Todo => f.write_str("Todo"),
            Entity::User => f.write_str("User"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// A required argument was absent or blank.
    #[error("{0} is required")]
    Missing(&'static str),

    /// The referenced todo or user does not exist.
    #[error("{0} not found")]
    NotFound(Entity),
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages() {
        assert_eq!(ServiceError::NotFound(Entity::Todo).to_string(), "Todo not found");
        assert_eq!(ServiceError::NotFound(Entity::User).to_string(), "User not found");
    }

    #[test]
    fn missing_message_names_the_field() {
        assert_eq!(ServiceError::Missing("task").to_string(), "task is required");
    }
}
