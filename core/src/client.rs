//! Stateless GraphQL request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the endpoint URL. Each operation is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`. The caller executes the HTTP round-trip.
//!
//! Every GraphQL call is a `POST` with a JSON body of `query`,
//! `operationName` and `variables`. A response is checked for HTTP status
//! first, then for a GraphQL `errors` array, and only then is the operation's
//! root field read out of `data`.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::operations::Operation;
use crate::types::{AddTodo, AddUser, Todo, User};

pub const DEFAULT_GRAPHQL_PATH: &str = "/graphql";

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
    endpoint: String,
}

impl TodoClient {
    /// Client for the GraphQL endpoint at `{base_url}/graphql`.
    pub fn new(base_url: &str) -> Self {
        Self::with_path(base_url, DEFAULT_GRAPHQL_PATH)
    }

    pub fn with_path(base_url: &str, path: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let endpoint = format!("{base_url}/{}", path.trim_start_matches('/'));
        Self { base_url, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_health(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/health", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_todos(&self, user_id: Option<&str>) -> Result<HttpRequest, ApiError> {
        self.build(Operation::GetTodos, json!({ "userId": user_id }))
    }

    /// `position` is an index into the server's current list, not a todo id.
    pub fn build_get_todo_by_index(&self, position: &str) -> Result<HttpRequest, ApiError> {
        self.build(Operation::GetTodoByIndex, json!({ "id": position }))
    }

    pub fn build_list_users(&self) -> Result<HttpRequest, ApiError> {
        self.build(Operation::GetUsers, json!({}))
    }

    pub fn build_add_todo(&self, input: &AddTodo) -> Result<HttpRequest, ApiError> {
        let variables =
            serde_json::to_value(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        self.build(Operation::AddTodo, variables)
    }

    pub fn build_mark_task_completed(&self, id: &str) -> Result<HttpRequest, ApiError> {
        self.build(Operation::MarkTaskCompleted, json!({ "id": id }))
    }

    pub fn build_delete_todo_by_id(&self, id: &str) -> Result<HttpRequest, ApiError> {
        self.build(Operation::DeleteTodo, json!({ "id": id }))
    }

    pub fn build_add_user(&self, input: &AddUser) -> Result<HttpRequest, ApiError> {
        let variables =
            serde_json::to_value(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        self.build(Operation::AddUser, variables)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_field(response, Operation::GetTodos)
    }

    pub fn parse_get_todo_by_index(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_field(response, Operation::GetTodoByIndex)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        parse_field(response, Operation::GetUsers)
    }

    pub fn parse_add_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_field(response, Operation::AddTodo)
    }

    pub fn parse_mark_task_completed(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_field(response, Operation::MarkTaskCompleted)
    }

    pub fn parse_delete_todo_by_id(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_field(response, Operation::DeleteTodo)
    }

    pub fn parse_add_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_field(response, Operation::AddUser)
    }

    fn build(&self, operation: Operation, variables: Value) -> Result<HttpRequest, ApiError> {
        let body = json!({
            "query": operation.document(),
            "operationName": operation.name(),
            "variables": variables,
        });
        let body =
            serde_json::to_string(&body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.endpoint.clone(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Pull `data.<root field>` out of a GraphQL response, surfacing `errors`
/// first.
fn parse_field<T: DeserializeOwned>(
    response: HttpResponse,
    operation: Operation,
) -> Result<T, ApiError> {
    check_status(&response)?;
    let mut envelope: Value = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;

    if let Some(errors) = envelope.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages = errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                        .to_string()
                })
                .collect();
            return Err(ApiError::from_messages(messages));
        }
    }

    let field = envelope
        .get_mut("data")
        .and_then(|data| data.get_mut(operation.root_field()))
        .map(Value::take)
        .ok_or_else(|| {
            ApiError::DeserializationError(format!("missing data.{}", operation.root_field()))
        })?;
    serde_json::from_value(field).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:4000")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn body_of(req: &HttpRequest) -> Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        assert_eq!(client().endpoint(), "http://localhost:4000/graphql");
        assert_eq!(
            TodoClient::with_path("http://localhost:4000/", "/api").endpoint(),
            "http://localhost:4000/api"
        );
    }

    #[test]
    fn build_list_todos_produces_graphql_post() {
        let req = client().build_list_todos(None).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:4000/graphql");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body = body_of(&req);
        assert_eq!(body["operationName"], "GetTodos");
        assert_eq!(body["variables"]["userId"], Value::Null);
        assert!(body["query"].as_str().unwrap().contains("todos(userId: $userId)"));
    }

    #[test]
    fn build_list_todos_scoped_to_user() {
        let req = client().build_list_todos(Some("3")).unwrap();
        assert_eq!(body_of(&req)["variables"]["userId"], "3");
    }

    #[test]
    fn build_add_todo_omits_missing_user() {
        let input = AddTodo {
            task: "Buy milk".to_string(),
            user_id: None,
        };
        let body = body_of(&client().build_add_todo(&input).unwrap());
        assert_eq!(body["operationName"], "AddTodo");
        assert_eq!(body["variables"], json!({ "task": "Buy milk" }));
    }

    #[test]
    fn build_add_todo_with_user() {
        let input = AddTodo {
            task: "Buy milk".to_string(),
            user_id: Some("1".to_string()),
        };
        let body = body_of(&client().build_add_todo(&input).unwrap());
        assert_eq!(body["variables"], json!({ "task": "Buy milk", "userId": "1" }));
    }

    #[test]
    fn build_id_operations() {
        let c = client();
        let cases = [
            (c.build_mark_task_completed("7").unwrap(), "MarkTaskCompleted"),
            (c.build_delete_todo_by_id("7").unwrap(), "DeleteTodo"),
            (c.build_get_todo_by_index("7").unwrap(), "GetTodoByIndex"),
        ];
        for (req, name) in cases {
            let body = body_of(&req);
            assert_eq!(body["operationName"], name);
            assert_eq!(body["variables"], json!({ "id": "7" }));
        }
    }

    #[test]
    fn build_health_is_a_plain_get() {
        let req = client().build_health();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:4000/health");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_todos_success() {
        let response = ok(r#"{"data":{"todos":[{"id":"1","task":"Test","completed":false,"userId":null}]}}"#);
        let todos = client().parse_list_todos(response).unwrap();
        assert_eq!(
            todos,
            vec![Todo {
                id: "1".to_string(),
                task: "Test".to_string(),
                completed: false,
                user_id: None,
            }]
        );
    }

    #[test]
    fn parse_add_user_success() {
        let response = ok(r#"{"data":{"addUser":{"id":"1","name":"Alice"}}}"#);
        let user = client().parse_add_user(response).unwrap();
        assert_eq!(user.name, "Alice");
    }

    #[test]
    fn parse_not_found_error() {
        let response = ok(r#"{"data":null,"errors":[{"message":"Todo not found"}]}"#);
        let err = client().parse_delete_todo_by_id(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Todo not found"));
    }

    #[test]
    fn parse_other_graphql_errors() {
        let response = ok(r#"{"data":null,"errors":[{"message":"task is required"}]}"#);
        let err = client().parse_add_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::GraphQl(ref m) if m == &["task is required"]));
    }

    #[test]
    fn parse_wrong_status() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_list_users(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_missing_field() {
        let err = client().parse_list_todos(ok(r#"{"data":{}}"#)).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(ref m) if m == "missing data.todos"));
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_list_todos(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
