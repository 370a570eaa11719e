use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::Json;

use crate::application::ChatUseCase;
use crate::domain::{ChatRequest, ChatResponse};

use super::error::ApiError;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatUseCase>,
}

/// `GET /` — the chat page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `POST /chat` — one chat exchange.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.chat.execute(&request).await?;
    Ok(Json(response))
}
