use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    ApiResponse, ErrorResponse, FieldError, JsonBody, Pagination, QueryParams, UuidPath,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use chrono::Utc;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TodoResult;
use crate::models::{
    CreateTodo, DeletedCount, ListTodosParams, TodoPriority, TodoResponse, TodoStats, UpdateTodo,
};
use crate::repository::TodoRepository;
use crate::service::TodoService;

/// OpenAPI documentation for the Todos API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_todos,
        todo_summary,
        get_todo,
        create_todo,
        update_todo,
        toggle_todo,
        delete_todo,
        delete_completed,
    ),
    components(
        schemas(
            TodoResponse,
            TodoPriority,
            CreateTodo,
            UpdateTodo,
            TodoStats,
            DeletedCount,
            Pagination,
            FieldError,
            ErrorResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Todos", description = "Todo management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the todos router with all HTTP endpoints
pub fn router<R: TodoRepository + 'static>(service: TodoService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_todos::<R>)
                .post(create_todo::<R>)
                .delete(delete_completed::<R>),
        )
        .route("/stats/summary", get(todo_summary::<R>))
        .route(
            "/{id}",
            get(get_todo::<R>)
                .put(update_todo::<R>)
                .delete(delete_todo::<R>),
        )
        .route("/{id}/toggle", patch(toggle_todo::<R>))
        .with_state(shared_service)
}

/// List todos with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Todos",
    params(ListTodosParams),
    responses(
        (status = 200, description = "Page of todos", body = ApiResponse<Vec<TodoResponse>>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_todos<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    QueryParams(params): QueryParams<ListTodosParams>,
) -> TodoResult<Json<ApiResponse<Vec<TodoResponse>>>> {
    let page = service.list_todos(params).await?;

    let now = Utc::now();
    let pagination = Pagination::new(page.total, page.limit, page.skip);
    let todos = page
        .items
        .into_iter()
        .map(|todo| TodoResponse::at(todo, now))
        .collect();

    Ok(Json(ApiResponse::paginated(todos, pagination)))
}

/// Counts by completion state and priority
#[utoipa::path(
    get,
    path = "/stats/summary",
    tag = "Todos",
    responses(
        (status = 200, description = "Summary statistics", body = ApiResponse<TodoStats>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn todo_summary<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
) -> TodoResult<Json<ApiResponse<TodoStats>>> {
    let stats = service.summary().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// Get a todo by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Todos",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo found", body = ApiResponse<TodoResponse>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    UuidPath(id): UuidPath,
) -> TodoResult<Json<ApiResponse<TodoResponse>>> {
    let todo = service.get_todo(id).await?;
    Ok(Json(ApiResponse::ok(todo.into())))
}

/// Create a new todo
#[utoipa::path(
    post,
    path = "",
    tag = "Todos",
    request_body = CreateTodo,
    responses(
        (status = 201, description = "Todo created", body = ApiResponse<TodoResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    JsonBody(input): JsonBody<CreateTodo>,
) -> TodoResult<impl IntoResponse> {
    let todo = service.create_todo(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Todo created",
            TodoResponse::from(todo),
        )),
    ))
}

/// Replace a todo's editable fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Todos",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    request_body = UpdateTodo,
    responses(
        (status = 200, description = "Todo updated", body = ApiResponse<TodoResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    UuidPath(id): UuidPath,
    JsonBody(input): JsonBody<UpdateTodo>,
) -> TodoResult<Json<ApiResponse<TodoResponse>>> {
    let todo = service.update_todo(id, input).await?;
    Ok(Json(ApiResponse::with_message(
        "Todo updated",
        todo.into(),
    )))
}

/// Flip a todo between completed and active
#[utoipa::path(
    patch,
    path = "/{id}/toggle",
    tag = "Todos",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo toggled", body = ApiResponse<TodoResponse>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn toggle_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    UuidPath(id): UuidPath,
) -> TodoResult<Json<ApiResponse<TodoResponse>>> {
    let todo = service.toggle_todo(id).await?;
    let message = if todo.completed {
        "Todo completed"
    } else {
        "Todo active"
    };
    Ok(Json(ApiResponse::with_message(message, todo.into())))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Todos",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo deleted, returned as it was", body = ApiResponse<TodoResponse>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    UuidPath(id): UuidPath,
) -> TodoResult<Json<ApiResponse<TodoResponse>>> {
    let todo = service.delete_todo(id).await?;
    Ok(Json(ApiResponse::with_message(
        "Todo deleted",
        todo.into(),
    )))
}

/// Delete all completed todos
#[utoipa::path(
    delete,
    path = "",
    tag = "Todos",
    responses(
        (status = 200, description = "Completed todos deleted", body = ApiResponse<DeletedCount>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_completed<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
) -> TodoResult<Json<ApiResponse<DeletedCount>>> {
    let deleted_count = service.delete_completed().await?;
    Ok(Json(ApiResponse::with_message(
        format!("{} todos deleted", deleted_count),
        DeletedCount { deleted_count },
    )))
}
