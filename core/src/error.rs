//! Error types for the todo API client.
//!
//! # Design
//! The server reports every failure as a GraphQL error with a message and no
//! code. Messages ending in "not found" become `NotFound` so callers can tell
//! a missing todo or user apart from other failures; the rest land in
//! `GraphQl`.

use thiserror::Error;

/// Errors returned by `TodoClient` parse and build methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The referenced todo or user does not exist. Holds the server message.
    #[error("{0}")]
    NotFound(String),

    /// The server answered with GraphQL errors other than not-found.
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The server returned a non-200 status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// Classify the messages of a GraphQL `errors` array.
    pub(crate) fn from_messages(messages: Vec<String>) -> Self {
        match messages.iter().find(|m| m.ends_with("not found")) {
            Some(message) => ApiError::NotFound(message.clone()),
            None => ApiError::GraphQl(messages),
        }
    }
}
