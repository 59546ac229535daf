//! JSON body extractor that rejects with the error envelope.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// `Json<T>` whose rejections render as the standard error envelope.
///
/// Field validation is left to the service that consumes the payload.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::JsonBody;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct CreateNote {
///     title: String,
/// }
///
/// async fn create_note(JsonBody(payload): JsonBody<CreateNote>) -> String {
///     format!("Creating note: {}", payload.title)
/// }
///
/// let app = Router::new().route("/notes", post(create_note));
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;
        Ok(JsonBody(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Note {
        title: String,
    }

    async fn create(JsonBody(note): JsonBody<Note>) -> String {
        note.title
    }

    async fn send(content_type: Option<&'static str>, body: &'static str) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let response = Router::new()
            .route("/", post(create))
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn json(bytes: &[u8]) -> serde_json::Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_body_is_passed_through_unvalidated() {
        let (status, body) = send(Some("application/json"), r#"{"title":""}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_renders_envelope() {
        let (status, body) = send(Some("application/json"), r#"{"title":"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json = json(&body);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "JSON_EXTRACTION");
        assert!(json.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_unsupported_media_type() {
        let (status, body) = send(None, r#"{"title":"ok"}"#).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(json(&body)["error"], "JSON_EXTRACTION");
    }
}
