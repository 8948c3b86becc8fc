//! Query and mutation operations over the entity store.
//!
//! Every mutating operation does its lookups and validation before it touches
//! the store, under a single write lock, so a failed call leaves the store
//! exactly as it was.

use tracing::{debug, info, warn};

use crate::config::Mode;
use crate::error::{Entity, ServiceError};
use crate::store::{SharedStore, Store, Todo, User};

/// Restricts `list_todos` to one owner when `user_id` is set.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddTodo {
    pub task: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddUser {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct TodoService {
    store: SharedStore,
    mode: Mode,
}

impl TodoService {
    /// Service over a fresh, empty store.
    pub fn new(mode: Mode) -> Self {
        Self::with_store(Store::new().shared(), mode)
    }

    pub fn with_store(store: SharedStore, mode: Mode) -> Self {
        Self { store, mode }
    }

    pub async fn list_todos(&self, filter: TodoFilter) -> Vec<Todo> {
        let store = self.store.read().await;
        match present(filter.user_id) {
            Some(user_id) => store
                .todos()
                .iter()
                .filter(|todo| todo.user_id.as_deref() == Some(user_id.as_str()))
                .cloned()
                .collect(),
            None => store.todos().to_vec(),
        }
    }

    /// Todo at the given index of the live sequence.
    ///
    /// This is positional: once a todo has been deleted, position `n` no
    /// longer holds the todo whose id is `n + 1`.
    pub async fn todo_by_position(&self, position: &str) -> Result<Todo, ServiceError> {
        let index = leading_index(position).ok_or_else(|| {
            debug!(position, "position is not an index");
            ServiceError::NotFound(Entity::Todo)
        })?;
        let store = self.store.read().await;
        store.todo_at(index).cloned().ok_or_else(|| {
            debug!(index, len = store.todos().len(), "position out of range");
            ServiceError::NotFound(Entity::Todo)
        })
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.store.read().await.users().to_vec()
    }

    pub async fn add_todo(&self, input: AddTodo) -> Result<Todo, ServiceError> {
        if input.task.trim().is_empty() {
            return Err(ServiceError::Missing("task"));
        }
        let user_id = present(input.user_id);
        if user_id.is_none() && self.mode == Mode::Multi {
            return Err(ServiceError::Missing("userId"));
        }

        let mut store = self.store.write().await;
        if let Some(user_id) = user_id.as_deref() {
            if store.user(user_id).is_none() {
                warn!(user_id, "add_todo for unknown user");
                return Err(ServiceError::NotFound(Entity::User));
            }
        }
        let todo = store.insert_todo(input.task, user_id);
        info!(id = %todo.id, user_id = ?todo.user_id, "todo added");
        Ok(todo)
    }

    pub async fn mark_task_completed(&self, id: &str) -> Result<Todo, ServiceError> {
        let mut store = self.store.write().await;
        let todo = store.todo_mut(id).ok_or_else(|| {
            warn!(id, "mark_task_completed for unknown todo");
            ServiceError::NotFound(Entity::Todo)
        })?;
        todo.completed = true;
        info!(id, "todo completed");
        Ok(todo.clone())
    }

    pub async fn delete_todo_by_id(&self, id: &str) -> Result<Todo, ServiceError> {
        let mut store = self.store.write().await;
        let todo = store.remove_todo(id).ok_or_else(|| {
            warn!(id, "delete_todo_by_id for unknown todo");
            ServiceError::NotFound(Entity::Todo)
        })?;
        info!(id, "todo deleted");
        Ok(todo)
    }

    /// Returns the existing user when `name` is already taken.
    pub async fn add_user(&self, input: AddUser) -> Result<User, ServiceError> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::Missing("name"));
        }

        let mut store = self.store.write().await;
        if let Some(existing) = store.user_by_name(&input.name) {
            debug!(id = %existing.id, "user already exists");
            return Ok(existing.clone());
        }
        let user = store.insert_user(input.name);
        info!(id = %user.id, "user added");
        Ok(user)
    }

    /// Owner of `todo`, if it has one and that user still exists.
    pub async fn owner_of(&self, todo: &Todo) -> Option<User> {
        let user_id = todo.user_id.as_deref()?;
        self.store.read().await.user(user_id).cloned()
    }
}

/// A blank id counts as no id at all.
fn present(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.trim().is_empty())
}

/// Reads a position the way JavaScript's `parseInt` reads an array index:
/// leading whitespace is skipped, an optional sign and `0x` prefix are
/// accepted, and only the leading run of digits counts (`"1.5"` is 1,
/// `"0abc"` is 0). Negative positions other than zero have no element.
fn leading_index(position: &str) -> Option<usize> {
    let rest = position.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = rest
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    // Overflow can only mean an index past the end of the list.
    let value = usize::from_str_radix(digits, radix).ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}
