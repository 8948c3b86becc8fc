//! Synchronous GraphQL client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, keeping the core deterministic and testable.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only the endpoint URL.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `Operation` owns the GraphQL documents and knows which operations force
//!   a todo list refetch.
//! - DTOs are defined independently from the server crate; the integration
//!   test catches schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod operations;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use operations::Operation;
pub use types::{AddTodo, AddUser, Todo, User};
