//! GraphQL documents issued by the client, one per operation.
//!
//! `Operation::refetches_todos` tells a view whether the todo list has to be
//! fetched again after the operation succeeds. Adding or deleting changes list
//! membership and does; completing a task only flips a flag on an entry the
//! view already holds and does not.

const TODO_FIELDS: &str = "id task completed userId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetTodos,
    GetTodoByIndex,
    GetUsers,
    AddTodo,
    MarkTaskCompleted,
    DeleteTodo,
    AddUser,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::GetTodos,
        Operation::GetTodoByIndex,
        Operation::GetUsers,
        Operation::AddTodo,
        Operation::MarkTaskCompleted,
        Operation::DeleteTodo,
        Operation::AddUser,
    ];

    /// Operation name sent as `operationName`.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetTodos => "GetTodos",
            Operation::GetTodoByIndex => "GetTodoByIndex",
            Operation::GetUsers => "GetUsers",
            Operation::AddTodo => "AddTodo",
            Operation::MarkTaskCompleted => "MarkTaskCompleted",
            Operation::DeleteTodo => "DeleteTodo",
            Operation::AddUser => "AddUser",
        }
    }

    /// Root field whose value the response carries under `data`.
    pub fn root_field(&self) -> &'static str {
        match self {
            Operation::GetTodos => "todos",
            Operation::GetTodoByIndex => "getTodoByIndex",
            Operation::GetUsers => "users",
            Operation::AddTodo => "addTodo",
            Operation::MarkTaskCompleted => "markTaskCompleted",
            Operation::DeleteTodo => "deleteTodoById",
            Operation::AddUser => "addUser",
        }
    }

    pub fn document(&self) -> String {
        match self {
            Operation::GetTodos => {
                format!("query GetTodos($userId: ID) {{ todos(userId: $userId) {{ {TODO_FIELDS} }} }}")
            }
            Operation::GetTodoByIndex => {
                format!("query GetTodoByIndex($id: ID!) {{ getTodoByIndex(id: $id) {{ {TODO_FIELDS} }} }}")
            }
            Operation::GetUsers => "query GetUsers { users { id name } }".to_string(),
            Operation::AddTodo => format!(
                "mutation AddTodo($task: String!, $userId: ID) {{ addTodo(task: $task, userId: $userId) {{ {TODO_FIELDS} }} }}"
            ),
            Operation::MarkTaskCompleted => format!(
                "mutation MarkTaskCompleted($id: ID!) {{ markTaskCompleted(id: $id) {{ {TODO_FIELDS} }} }}"
            ),
            Operation::DeleteTodo => format!(
                "mutation DeleteTodo($id: ID!) {{ deleteTodoById(id: $id) {{ {TODO_FIELDS} }} }}"
            ),
            Operation::AddUser => {
                "mutation AddUser($name: String!) { addUser(name: $name) { id name } }".to_string()
            }
        }
    }

    pub fn refetches_todos(&self) -> bool {
        matches!(self, Operation::AddTodo | Operation::DeleteTodo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_membership_changes_refetch() {
        let refetching: Vec<Operation> = Operation::ALL
            .into_iter()
            .filter(Operation::refetches_todos)
            .collect();
        assert_eq!(refetching, [Operation::AddTodo, Operation::DeleteTodo]);
    }

    #[test]
    fn documents_are_named_after_the_operation() {
        for op in Operation::ALL {
            let document = op.document();
            assert!(document.contains(op.name()), "{document}");
            assert!(document.contains(op.root_field()), "{document}");
        }
    }

    #[test]
    fn braces_are_balanced() {
        for op in Operation::ALL {
            let document = op.document();
            let open = document.matches('{').count();
            let close = document.matches('}').count();
            assert_eq!(open, close, "{document}");
        }
    }
}
