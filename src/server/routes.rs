use crate::pipelines::presentation::{render_page, BackgroundImage, RenderModel, ViewState};
use crate::server::runner::SentimentRunner;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

/// Application state shared across handlers
pub struct AppState {
    pub runner: SentimentRunner,
    pub background: Option<BackgroundImage>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub review: String,
}

/// Create the application router
///
/// # Routes
///
/// - `GET /` - page without result
/// - `POST /` - analyze the `review` form field and render the page with its result
/// - `GET /health` - liveness check
///
/// Reviews have no length limit, the request body limit is disabled.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index).post(analyze_review))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&ViewState::Idle, "", state.background.as_ref()))
}

async fn analyze_review(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ReviewForm>,
) -> Response {
    let request_id = Uuid::new_v4();
    let result = state
        .runner
        .analyze(form.review.clone())
        .instrument(info_span!("analyze", %request_id))
        .await;
    match result {
        Ok(render_model) => Html(render_page(
            &ViewState::analyzed(render_model),
            &form.review,
            state.background.as_ref(),
        ))
        .into_response(),
        Err(e) => {
            error!(%request_id, error = %e, "analysis failed");
            let view = ViewState::analyzed(RenderModel::Warning(format!(
                "Analysis failed ({})",
                request_id
            )));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_page(&view, &form.review, state.background.as_ref())),
            )
                .into_response()
        }
    }
}

async fn health_check() -> &'static str {
    "ok"
}
