//! In-memory GraphQL todo service.
//!
//! # Overview
//! `store` holds users and todos for the lifetime of the process, `service`
//! implements the query and mutation rules on top of it, and `schema` exposes
//! those operations through async-graphql. This module wires the schema into
//! an axum router.
//!
//! # Routes
//! - `POST {graphql_path}`: execute a GraphQL request
//! - `GET {graphql_path}`: GraphiQL explorer
//! - `GET /health`: liveness probe

pub mod config;
pub mod error;
pub mod schema;
pub mod service;
pub mod store;
pub mod telemetry;

use async_graphql::http::GraphiQLSource;
use axum::{
    extract::State,
    response::Html,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

pub use config::{Config, Mode};
pub use error::ServiceError;
pub use schema::{build_schema, TodoSchema};
pub use service::TodoService;
pub use store::{Store, Todo, User};

/// Router over a fresh store with default settings.
pub fn app() -> Router {
    let config = Config::default();
    router(TodoService::new(config.mode), &config.graphql_path)
}

/// Router serving `service` at `graphql_path`.
pub fn router(service: TodoService, graphql_path: &str) -> Router {
    let schema = build_schema(service);
    let explorer = GraphiQLSource::build().endpoint(graphql_path).finish();

    Router::new()
        .route(
            graphql_path,
            get(move || {
                let page = explorer.clone();
                async move { Html(page) }
            })
            .post(graphql),
        )
        .route("/health", get(health))
        .with_state(schema)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, config: &Config) -> Result<(), std::io::Error> {
    let service = TodoService::new(config.mode);
    axum::serve(listener, router(service, &config.graphql_path)).await
}

async fn graphql(
    State(schema): State<TodoSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let request_id = Uuid::new_v4();
    let operation = request.operation_name.clone().unwrap_or_default();
    let span = info_span!("graphql", %request_id, operation = %operation);

    let response = schema.execute(request).instrument(span.clone()).await;
    if response.is_err() {
        span.in_scope(|| {
            for error in &response.errors {
                warn!(message = %error.message, "graphql error");
            }
        });
    }
    Json(response)
}

async fn health() -> &'static str {
    "ok"
}
