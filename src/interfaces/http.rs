//! HTTP surface: `GET /api/github-progress` as JSON or an SVG badge.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    application::progress::QueryOptions,
    domain::{
        error::ProgressError,
        model::{Progress, ProgressSource, RawQuery},
    },
    presentation::{badge, theme::Theme},
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ProgressParams {
    pub username: Option<String>,
    pub year: Option<String>,
    pub target: Option<String>,
    /// `json` (default) or `svg`
    pub format: Option<String>,
    pub theme: Option<String>,
}

/// JSON success body
#[derive(Debug, Serialize)]
pub struct ProgressBody {
    pub count: u64,
    pub percentage: i64,
    pub source: ProgressSource,
}

impl From<&Progress> for ProgressBody {
    fn from(progress: &Progress) -> Self {
        Self {
            count: progress.count,
            percentage: progress.percentage,
            source: progress.source,
        }
    }
}

/// Create the application router.
pub fn create_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .route("/api/github-progress", get(github_progress))
        .route("/livez", get(livez))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}

/// GET /livez
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /api/github-progress?username=&year=&target=
pub async fn github_progress(
    State(state): State<AppState>,
    Query(params): Query<ProgressParams>,
) -> Response {
    let raw = RawQuery {
        username: params.username,
        year: params.year,
        target: params.target,
    };
    let result = state
        .service
        .query_progress(&raw, QueryOptions::default())
        .await;

    if let Err(e) = &result {
        if e.is_client_error() {
            tracing::debug!(error = %e, "rejected query");
        } else {
            tracing::warn!(error = %e, "progress query failed");
        }
    }

    if params.format.as_deref() == Some("svg") {
        let theme_name = params.theme.as_deref().unwrap_or(state.config.theme.as_str());
        let theme = Theme::from_name(theme_name);
        let svg = match &result {
            Ok(progress) => badge::render_progress(progress.percentage, &theme),
            Err(e) => badge::render_failure(e, &theme),
        };
        // always 200 so image embeds show the failure badge
        return (
            [
                (header::CONTENT_TYPE, "image/svg+xml; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            svg,
        )
            .into_response();
    }

    match result {
        Ok(progress) => (StatusCode::OK, Json(ProgressBody::from(&progress))).into_response(),
        Err(e) => {
            let message = match &e {
                ProgressError::SubjectNotFound(_) => badge::NOT_FOUND_TEXT.to_string(),
                other => other.to_string(),
            };
            (
                status_for(&e),
                Json(serde_json::json!({ "error": message })),
            )
                .into_response()
        }
    }
}

fn status_for(err: &ProgressError) -> StatusCode {
    match err {
        ProgressError::Validation(_) => StatusCode::BAD_REQUEST,
        ProgressError::SubjectNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
