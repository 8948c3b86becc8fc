//! GraphQL schema exposing `TodoService`.
//!
//! Field and argument names are derived by async-graphql (`get_todo_by_index`
//! becomes `getTodoByIndex`, `user_id` becomes `userId`). Service errors reach
//! the client as plain GraphQL errors carrying the error's message.

use async_graphql::{Context, EmptySubscription, Object, Result, Schema, ID};

use crate::service::{AddTodo, AddUser, TodoFilter, TodoService};
use crate::store;

pub type TodoSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: TodoService) -> TodoSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

pub struct Todo(store::Todo);

#[Object]
impl Todo {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn task(&self) -> &str {
        &self.0.task
    }

    async fn completed(&self) -> bool {
        self.0.completed
    }

    async fn user_id(&self) -> Option<ID> {
        self.0.user_id.clone().map(ID)
    }

    /// Owner of this todo; null when it has none.
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let service = ctx.data::<TodoService>()?;
        Ok(service.owner_of(&self.0).await.map(User))
    }
}

pub struct User(store::User);

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All todos in insertion order, or only those owned by `user_id`.
    async fn todos(&self, ctx: &Context<'_>, user_id: Option<ID>) -> Result<Vec<Todo>> {
        let service = ctx.data::<TodoService>()?;
        let filter = TodoFilter {
            user_id: user_id.map(|id| id.0),
        };
        Ok(service.list_todos(filter).await.into_iter().map(Todo).collect())
    }

    /// Todo at position `id` of the current list (not the todo whose id is `id`).
    async fn get_todo_by_index(&self, ctx: &Context<'_>, id: ID) -> Result<Todo> {
        let service = ctx.data::<TodoService>()?;
        Ok(Todo(service.todo_by_position(&id).await?))
    }

    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let service = ctx.data::<TodoService>()?;
        Ok(service.list_users().await.into_iter().map(User).collect())
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_todo(&self, ctx: &Context<'_>, task: String, user_id: Option<ID>) -> Result<Todo> {
        let service = ctx.data::<TodoService>()?;
        let input = AddTodo {
            task,
            user_id: user_id.map(|id| id.0),
        };
        Ok(Todo(service.add_todo(input).await?))
    }

    async fn mark_task_completed(&self, ctx: &Context<'_>, id: ID) -> Result<Todo> {
        let service = ctx.data::<TodoService>()?;
        Ok(Todo(service.mark_task_completed(&id).await?))
    }

    async fn delete_todo_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Todo> {
        let service = ctx.data::<TodoService>()?;
        Ok(Todo(service.delete_todo_by_id(&id).await?))
    }

    /// Creates a user, or returns the existing one with the same name.
    async fn add_user(&self, ctx: &Context<'_>, name: String) -> Result<User> {
        let service = ctx.data::<TodoService>()?;
        Ok(User(service.add_user(AddUser { name }).await?))
    }
}
