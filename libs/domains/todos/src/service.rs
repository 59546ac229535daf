//! Todo Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TodoError, TodoResult};
use crate::models::{
    CreateTodo, ListTodosParams, Todo, TodoFilter, TodoPage, TodoStats, UpdateTodo,
};
use crate::repository::TodoRepository;

/// Todo service providing business logic operations
///
/// Every operation validates its input before the repository is touched.
pub struct TodoService<R: TodoRepository> {
    repository: Arc<R>,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List todos matching the query string, with the total for pagination
    #[instrument(skip(self))]
    pub async fn list_todos(&self, params: ListTodosParams) -> TodoResult<TodoPage> {
        let query = params.parse()?;
        let (limit, skip) = (query.limit, query.skip);

        let filter = query.filter.clone();
        let items = self.repository.list(query).await?;
        let total = self.repository.count(filter).await?;

        Ok(TodoPage {
            items,
            total,
            limit,
            skip,
        })
    }

    #[instrument(skip(self))]
    pub async fn summary(&self) -> TodoResult<TodoStats> {
        self.repository.stats().await
    }

    #[instrument(skip(self))]
    pub async fn get_todo(&self, id: Uuid) -> TodoResult<Todo> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(title = tracing::field::Empty))]
    pub async fn create_todo(&self, input: CreateTodo) -> TodoResult<Todo> {
        let fields = input.into_fields()?;
        tracing::Span::current().record("title", fields.title.as_str());
        self.repository.insert(Todo::new(fields)).await
    }

    /// Full update; see [`Todo::apply_update`] for omitted fields
    #[instrument(skip(self, input))]
    pub async fn update_todo(&self, id: Uuid, input: UpdateTodo) -> TodoResult<Todo> {
        let (fields, completed) = input.into_fields()?;

        let mut todo = self.get_todo(id).await?;
        todo.apply_update(fields, completed);
        self.save(todo).await
    }

    #[instrument(skip(self))]
    pub async fn toggle_todo(&self, id: Uuid) -> TodoResult<Todo> {
        let mut todo = self.get_todo(id).await?;
        todo.toggle();
        self.save(todo).await
    }

    /// Delete a todo, returning what was removed
    #[instrument(skip(self))]
    pub async fn delete_todo(&self, id: Uuid) -> TodoResult<Todo> {
        self.repository
            .delete(id)
            .await?
            .ok_or(TodoError::NotFound(id))
    }

    /// Remove every completed todo. Zero is a valid result.
    #[instrument(skip(self))]
    pub async fn delete_completed(&self) -> TodoResult<u64> {
        let deleted = self.repository.delete_many(TodoFilter::completed()).await?;
        tracing::info!(deleted_count = deleted, "Deleted completed todos");
        Ok(deleted)
    }

    /// Writes back a modified todo; it may have been deleted since it was read.
    async fn save(&self, todo: Todo) -> TodoResult<Todo> {
        if self.repository.replace(todo.clone()).await? {
            Ok(todo)
        } else {
            Err(TodoError::NotFound(todo.id))
        }
    }
}

impl<R: TodoRepository> Clone for TodoService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
