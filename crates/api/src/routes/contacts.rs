//! Contact submission endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain::models::{ContactPatch, ContactSubmission, GeneratedId, NewContact};
use shared::pagination::PageWindow;

use crate::app::AppState;
use crate::error::ApiError;

const NOT_FOUND: &str = "Contact submission not found";

/// Query parameters for the collection listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub query: Option<String>,
}

/// Response for the collection listing.
#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<ContactSubmission>,
    pub total: i64,
}

/// Response wrapping a freshly created submission.
#[derive(Debug, Serialize)]
pub struct CreateContactResponse {
    pub success: bool,
    pub data: ContactSubmission,
}

/// Acknowledgement for a delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Store a new contact submission from the public form.
///
/// POST /contact
pub async fn create_contact(
    State(state): State<AppState>,
    Json(request): Json<NewContact>,
) -> Result<(StatusCode, Json<CreateContactResponse>), ApiError> {
    request.validate()?;

    let submission = state.contacts.create(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateContactResponse {
            success: true,
            data: submission,
        }),
    ))
}

/// List or search contact submissions, newest first.
///
/// GET /contact?page=&limit=&query=
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ContactListResponse>, ApiError> {
    let window = PageWindow::from_params(params.page, params.limit);
    let query = params.query.as_deref().map(str::trim).unwrap_or("");

    let (contacts, total) = if query.is_empty() {
        let rows = state.contacts.list(window).await?;
        let total = state.contacts.count().await?;
        (rows, total)
    } else {
        let rows = state.contacts.search(query, window).await?;
        let total = state.contacts.count_search(query).await?;
        (rows, total)
    };

    Ok(Json(ContactListResponse { contacts, total }))
}

/// Fetch one contact submission.
///
/// GET /contact/{id}
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContactSubmission>, ApiError> {
    let id: GeneratedId = id.parse()?;
    let submission = state
        .contacts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;
    Ok(Json(submission))
}

/// Apply a partial update to a contact submission.
///
/// PUT /contact/{id}
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ContactPatch>,
) -> Result<Json<ContactSubmission>, ApiError> {
    let id: GeneratedId = id.parse()?;
    // A patch with no fields is a no-op; answer with the stored row
    // rather than stamping updated_at for nothing.
    let submission = if patch.is_empty() {
        state.contacts.find_by_id(id).await?
    } else {
        state.contacts.update(id, &patch).await?
    }
    .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;
    Ok(Json(submission))
}

/// Delete a contact submission.
///
/// DELETE /contact/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id: GeneratedId = id.parse()?;
    if state.contacts.delete(id).await? {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(ApiError::NotFound(NOT_FOUND.to_string()))
    }
}
