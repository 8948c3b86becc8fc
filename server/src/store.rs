//! In-memory entity store for users and todos.
//!
//! # Design
//! `Store` owns two insertion-ordered collections and one id counter per
//! collection. It only offers primitives (append, lookup, remove); the
//! validation rules live in `service`. Ids are taken from the counters, never
//! from the current collection length, so a deleted todo's id is never
//! handed out again.

use std::sync::Arc;

use tokio::sync::RwLock;

/// A single todo item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub task: String,
    pub completed: bool,
    pub user_id: Option<String>,
}

/// A named owner of todos.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// Store handle shared between request handlers. Every mutation goes through
/// the write lock, which keeps id assignment sequential.
pub type SharedStore = Arc<RwLock<Store>>;

#[derive(Debug, Default)]
pub struct Store {
    users: Vec<User>,
    todos: Vec<Todo>,
    users_created: u64,
    todos_created: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Todo at `index` in the live sequence, regardless of its id.
    pub fn todo_at(&self, index: usize) -> Option<&Todo> {
        self.todos.get(index)
    }

    pub fn todo_mut(&mut self, id: &str) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn user_by_name(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|user| user.name == name)
    }

    /// Append a new pending todo under the next todo id.
    pub fn insert_todo(&mut self, task: String, user_id: Option<String>) -> Todo {
        self.todos_created += 1;
        let todo = Todo {
            id: self.todos_created.to_string(),
            task,
            completed: false,
            user_id,
        };
        self.todos.push(todo.clone());
        todo
    }

    /// Append a new user under the next user id.
    pub fn insert_user(&mut self, name: String) -> User {
        self.users_created += 1;
        let user = User {
            id: self.users_created.to_string(),
            name,
        };
        self.users.push(user.clone());
        user
    }

    /// Remove every todo whose id is `id` and return the first one removed.
    pub fn remove_todo(&mut self, id: &str) -> Option<Todo> {
        let removed = self.todos.iter().find(|todo| todo.id == id).cloned()?;
        self.todos.retain(|todo| todo.id != id);
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_ids_keep_counting_after_removal() {
        let mut store = Store::new();
        let first = store.insert_todo("a".to_string(), None);
        let second = store.insert_todo("b".to_string(), None);
        store.remove_todo(&second.id).unwrap();
        let third = store.insert_todo("c".to_string(), None);

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
        assert_eq!(third.id, "3");
        assert_eq!(store.todos().len(), 2);
    }

    #[test]
    fn new_todo_is_pending() {
        let mut store = Store::new();
        let todo = store.insert_todo("walk dog".to_string(), Some("1".to_string()));
        assert!(!todo.completed);
        assert_eq!(todo.user_id.as_deref(), Some("1"));
    }

    #[test]
    fn user_ids_are_sequential() {
        let mut store = Store::new();
        assert_eq!(store.insert_user("alice".to_string()).id, "1");
        assert_eq!(store.insert_user("bob".to_string()).id, "2");
        assert_eq!(store.user_by_name("bob").map(|u| u.id.as_str()), Some("2"));
        assert!(store.user("3").is_none());
    }

    #[test]
    fn todo_at_is_positional() {
        let mut store = Store::new();
        store.insert_todo("a".to_string(), None);
        store.insert_todo("b".to_string(), None);
        store.remove_todo("1");

        assert_eq!(store.todo_at(0).map(|t| t.id.as_str()), Some("2"));
        assert!(store.todo_at(1).is_none());
    }

    #[test]
    fn remove_missing_todo_leaves_store_untouched() {
        let mut store = Store::new();
        store.insert_todo("a".to_string(), None);
        assert!(store.remove_todo("9").is_none());
        assert_eq!(store.todos().len(), 1);
    }

    #[test]
    fn todo_mut_updates_in_place() {
        let mut store = Store::new();
        store.insert_todo("a".to_string(), None);
        store.todo_mut("1").unwrap().completed = true;
        assert!(store.todos()[0].completed);
    }
}
