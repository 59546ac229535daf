//! Todos API routes
//!
//! This module wires up the todos domain to HTTP routes.

use axum::Router;
use domain_todos::{MongoTodoRepository, TodoService, handlers};

use crate::state::AppState;

/// Create todos router
pub fn router(state: &AppState) -> Router {
    let repository = MongoTodoRepository::new(state.db.clone());
    let service = TodoService::new(repository);

    handlers::router(service)
}

/// Ensure the collection's list indexes exist before serving traffic.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoTodoRepository::new(state.db.clone())
        .init_indexes()
        .await?;
    Ok(())
}
