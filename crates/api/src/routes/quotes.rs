//! Quote request endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use validator::Validate;

use domain::models::{GeneratedId, NewQuote, QuotePatch, QuoteSubmission};
use shared::pagination::PageWindow;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::contacts::{DeleteResponse, ListQuery};

const NOT_FOUND: &str = "Quote submission not found";

/// Response for the collection listing.
#[derive(Debug, Serialize)]
pub struct QuoteListResponse {
    pub quotes: Vec<QuoteSubmission>,
    pub total: i64,
}

/// Response wrapping a freshly created submission.
#[derive(Debug, Serialize)]
pub struct CreateQuoteResponse {
    pub success: bool,
    pub data: QuoteSubmission,
}

/// Store a new quote request from the public form.
///
/// POST /quote
pub async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<NewQuote>,
) -> Result<(StatusCode, Json<CreateQuoteResponse>), ApiError> {
    request.validate()?;

    let submission = state.quotes.create(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateQuoteResponse {
            success: true,
            data: submission,
        }),
    ))
}

/// List or search quote requests, newest first.
///
/// GET /quote?page=&limit=&query=
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<QuoteListResponse>, ApiError> {
    let window = PageWindow::from_params(params.page, params.limit);
    let query = params.query.as_deref().map(str::trim).unwrap_or("");

    let (quotes, total) = if query.is_empty() {
        let rows = state.quotes.list(window).await?;
        let total = state.quotes.count().await?;
        (rows, total)
    } else {
        let rows = state.quotes.search(query, window).await?;
        let total = state.quotes.count_search(query).await?;
        (rows, total)
    };

    Ok(Json(QuoteListResponse { quotes, total }))
}

/// Fetch one quote request.
///
/// GET /quote/{id}
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuoteSubmission>, ApiError> {
    let id: GeneratedId = id.parse()?;
    let submission = state
        .quotes
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;
    Ok(Json(submission))
}

/// Apply a partial update to a quote request.
///
/// PUT /quote/{id}
pub async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<QuotePatch>,
) -> Result<Json<QuoteSubmission>, ApiError> {
    let id: GeneratedId = id.parse()?;
    // Same no-op semantics as the contact handler.
    let submission = if patch.is_empty() {
        state.quotes.find_by_id(id).await?
    } else {
        state.quotes.update(id, &patch).await?
    }
    .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;
    Ok(Json(submission))
}

/// Delete a quote request.
///
/// DELETE /quote/{id}
pub async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id: GeneratedId = id.parse()?;
    if state.quotes.delete(id).await? {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(ApiError::NotFound(NOT_FOUND.to_string()))
    }
}
