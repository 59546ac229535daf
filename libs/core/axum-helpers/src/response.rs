//! Success envelope shared by every JSON endpoint.
//!
//! Successful responses are wrapped as
//! `{ "success": true, "message"?: ..., "data"?: ..., "pagination"?: ... }`.
//! Error responses use [`ErrorResponse`](crate::errors::ErrorResponse), which
//! carries the same `success` flag.

use serde::Serialize;
use utoipa::ToSchema;

/// Uniform success envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            pagination: None,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            pagination: Some(pagination),
        }
    }
}

/// Offset pagination metadata for list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Number of records matching the filter, ignoring limit and skip
    pub total: u64,
    pub limit: u64,
    pub skip: u64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: u64, limit: u64, skip: u64) -> Self {
        Self {
            total,
            limit,
            skip,
            has_more: skip.saturating_add(limit) < total,
        }
    }
}

/// A single field violation in a validation error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
