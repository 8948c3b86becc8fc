//! Domain DTOs for the todo GraphQL API.
//!
//! # Design
//! These mirror the server's GraphQL object types but are defined
//! independently; the integration test catches schema drift between the two
//! crates. Field names follow the GraphQL schema (`userId`).

use serde::{Deserialize, Serialize};

/// A todo item as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub task: String,
    pub completed: bool,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// Variables for `addTodo`. `user_id` is omitted from the request when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTodo {
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Variables for `addUser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddUser {
    pub name: String,
}
