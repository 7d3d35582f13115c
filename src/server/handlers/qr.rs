//! QR generation handlers.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::QrStampError;
use crate::payload::ContentSpec;
use crate::persist;
use crate::style::StyleSpec;

use super::super::state::AppState;

/// Request body for the generation endpoints.
#[derive(Debug, Deserialize)]
pub struct QrRequest {
    pub content: ContentSpec,
    #[serde(default)]
    pub style: StyleSpec,
}

/// GET /api/qr/types - list accepted content types.
pub async fn types() -> impl IntoResponse {
    Json(json!({ "types": ContentSpec::KINDS }))
}

/// POST /api/qr/preview - render a bounded-size preview PNG.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QrRequest>,
) -> Response {
    render(state, request, true).await
}

/// POST /api/qr/image - render the full-resolution PNG.
pub async fn image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QrRequest>,
) -> Response {
    render(state, request, false).await
}

async fn render(state: Arc<AppState>, request: QrRequest, preview: bool) -> Response {
    let result = tokio::task::spawn_blocking(move || {
        let generated = state.generator.generate(&request.content, &request.style)?;
        let img = if preview {
            state.generator.preview(&generated)
        } else {
            generated.image
        };
        Ok::<_, QrStampError>(persist::encode_png(&img)?)
    })
    .await;

    match result {
        Ok(Ok(png_bytes)) => ([(header::CONTENT_TYPE, "image/png")], png_bytes).into_response(),
        Ok(Err(e)) => {
            tracing::warn!("generation failed: {}", e);
            error_response(status_for(&e), e.to_string())
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Task error: {}", e),
        ),
    }
}

fn status_for(err: &QrStampError) -> StatusCode {
    match err {
        QrStampError::Validation(_) => StatusCode::BAD_REQUEST,
        QrStampError::Encoding(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EncodingError, PersistenceError, ValidationError};

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&ValidationError::MissingField("value").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&EncodingError::PayloadTooLarge.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&PersistenceError::WriteFailed("x".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_request_style_is_optional() {
        let request: QrRequest =
            serde_json::from_str(r#"{"content": {"type": "phone", "value": "123"}}"#).unwrap();
        assert_eq!(request.style, StyleSpec::default());
    }
}
