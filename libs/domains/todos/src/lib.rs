//! Todos Domain
//!
//! Task tracking backed by MongoDB: filtered and paginated listing, summary
//! statistics, CRUD, completion toggling and bulk removal of completed todos.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, update rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, query parsing
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_todos::{handlers, mongodb::MongoTodoRepository, service::TodoService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("stickytasks");
//!
//! let repository = MongoTodoRepository::new(db);
//! repository.init_indexes().await?;
//!
//! let service = TodoService::new(repository);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{TodoError, TodoResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateTodo, DeletedCount, JsonField, ListTodosParams, SortField, SortOrder, Todo, TodoFilter,
    TodoPage, TodoPriority, TodoQuery, TodoResponse, TodoSort, TodoStats, UpdateTodo,
};
pub use mongodb::MongoTodoRepository;
pub use repository::{InMemoryTodoRepository, TodoRepository};
pub use service::TodoService;
