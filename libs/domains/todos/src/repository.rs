use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TodoResult;
use crate::models::{SortOrder, Todo, TodoFilter, TodoPriority, TodoQuery, TodoStats};

/// Repository trait for Todo persistence
///
/// Operations are single-document atomic; concurrent writers to the same
/// todo are last-write-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Store a new todo
    async fn insert(&self, todo: Todo) -> TodoResult<Todo>;

    async fn get_by_id(&self, id: Uuid) -> TodoResult<Option<Todo>>;

    /// Filtered, sorted page of todos
    async fn list(&self, query: TodoQuery) -> TodoResult<Vec<Todo>>;

    /// Count todos matching a filter
    async fn count(&self, filter: TodoFilter) -> TodoResult<u64>;

    /// Replace the stored todo with the same id. Returns false if none matched.
    async fn replace(&self, todo: Todo) -> TodoResult<bool>;

    /// Delete by id, returning the removed todo
    async fn delete(&self, id: Uuid) -> TodoResult<Option<Todo>>;

    /// Delete every todo matching a filter, returning the count
    async fn delete_many(&self, filter: TodoFilter) -> TodoResult<u64>;

    /// Counts by completion state and priority in one pass
    async fn stats(&self) -> TodoResult<TodoStats>;
}

/// In-memory implementation of TodoRepository for tests and local runs
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<HashMap<Uuid, Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn insert(&self, todo: Todo) -> TodoResult<Todo> {
        let mut todos = self.todos.write().await;
        todos.insert(todo.id, todo.clone());

        tracing::info!(todo_id = %todo.id, "Created todo");
        Ok(todo)
    }

    async fn get_by_id(&self, id: Uuid) -> TodoResult<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.get(&id).cloned())
    }

    async fn list(&self, query: TodoQuery) -> TodoResult<Vec<Todo>> {
        let todos = self.todos.read().await;

        let mut result: Vec<Todo> = todos
            .values()
            .filter(|t| query.filter.matches(t))
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            let ordering = query
                .sort
                .field
                .compare(a, b)
                .then_with(|| a.id.cmp(&b.id));
            match query.sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(result
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn count(&self, filter: TodoFilter) -> TodoResult<u64> {
        let todos = self.todos.read().await;
        Ok(todos.values().filter(|t| filter.matches(t)).count() as u64)
    }

    async fn replace(&self, todo: Todo) -> TodoResult<bool> {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&todo.id) {
            Some(existing) => {
                tracing::info!(todo_id = %todo.id, "Updated todo");
                *existing = todo;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> TodoResult<Option<Todo>> {
        let mut todos = self.todos.write().await;
        let removed = todos.remove(&id);
        if removed.is_some() {
            tracing::info!(todo_id = %id, "Deleted todo");
        }
        Ok(removed)
    }

    async fn delete_many(&self, filter: TodoFilter) -> TodoResult<u64> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|_, t| !filter.matches(t));
        Ok((before - todos.len()) as u64)
    }

    async fn stats(&self) -> TodoResult<TodoStats> {
        let todos = self.todos.read().await;

        let mut stats = TodoStats::default();
        for todo in todos.values() {
            stats.total += 1;
            if todo.completed {
                stats.completed += 1;
            }
            match todo.priority {
                TodoPriority::High => stats.high_priority += 1,
                TodoPriority::Medium => stats.medium_priority += 1,
                TodoPriority::Low => stats.low_priority += 1,
            }
        }
        stats.pending = stats.total - stats.completed;

        Ok(stats)
    }
}
