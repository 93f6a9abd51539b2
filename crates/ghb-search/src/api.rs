//! HTTP surface: one endpoint reshaping resolver output into JSON.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::resolver::{AudioResolver, ResolveError, SearchHit};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn AudioResolver>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<HitDto>,
}

#[derive(Debug, Serialize)]
pub struct HitDto {
    pub title: String,
    pub url: String,
    pub duration: Option<u64>,
    pub thumbnail: Option<String>,
}

impl From<SearchHit> for HitDto {
    fn from(hit: SearchHit) -> Self {
        Self {
            title: hit.title,
            url: hit.url,
            duration: hit.duration,
            thumbnail: hit.thumbnail,
        }
    }
}

/// Error surface of the search endpoint. Every failure maps to a structured
/// JSON response rather than an opaque server fault.
#[derive(Debug)]
pub enum AppError {
    MissingTitle,
    NotFound,
    Extraction(String),
    Internal(String),
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotFound => AppError::NotFound,
            ResolveError::Extraction(msg) => AppError::Extraction(msg),
            ResolveError::Timeout(d) => {
                AppError::Extraction(format!("extractor timed out after {d:?}"))
            }
            ResolveError::Io(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::MissingTitle => (
                StatusCode::BAD_REQUEST,
                "MISSING_TITLE",
                "query parameter 'title' is required".to_string(),
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "no results for query".to_string(),
            ),
            AppError::Extraction(msg) => {
                (StatusCode::BAD_GATEWAY, "EXTRACTION_FAILED", msg.clone())
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });
        (status, Json(body)).into_response()
    }
}

/// GET /search?title=<string>
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let title = params
        .title
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingTitle)?;

    tracing::info!(title, "resolving search query");
    let hit = state.resolver.resolve(title).await?;

    Ok(Json(SearchResponse {
        results: vec![hit.into()],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_errors_map_to_statuses() {
        let cases = [
            (ResolveError::NotFound, StatusCode::NOT_FOUND),
            (
                ResolveError::Extraction("boom".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ResolveError::Timeout(std::time::Duration::from_secs(1)),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ResolveError::Io(std::io::Error::other("fs")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let (got, _, _) = AppError::from(err).parts();
            assert_eq!(got, status);
        }
    }

    #[test]
    fn missing_title_is_bad_request() {
        let (status, code, _) = AppError::MissingTitle.parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "MISSING_TITLE");
    }
}
