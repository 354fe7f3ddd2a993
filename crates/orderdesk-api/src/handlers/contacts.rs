//! Placeholder contact seeding (superuser only).
//!
//! Deliberately not part of the import flow: the upstream source for real
//! contact data is still undecided, so seeding stays a manually triggered
//! stub.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use orderdesk_core::models::{CustomerContact, SeedContactsRequest, SeedContactsResponse};
use uuid::Uuid;

use crate::auth::models::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v0/contacts/seed",
    tag = "contacts",
    request_body = SeedContactsRequest,
    responses(
        (status = 200, description = "Placeholder contacts created", body = SeedContactsResponse),
        (status = 403, description = "Not a superuser", body = ErrorResponse),
        (status = 500, description = "Unknown order id; nothing created", body = ErrorResponse)
    )
)]
pub async fn seed_contacts(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    ValidatedJson(req): ValidatedJson<SeedContactsRequest>,
) -> Result<Json<SeedContactsResponse>, HttpAppError> {
    current_user.require_superuser()?;

    let created = state.db.contacts.seed_placeholders(&req.order_ids).await?;

    tracing::info!(created, seeded_by = %current_user.username, "Seeded placeholder contacts");
    Ok(Json(SeedContactsResponse { created }))
}

#[utoipa::path(
    get,
    path = "/api/v0/orders/{id}/contacts",
    tag = "contacts",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Contacts linked to the order", body = Vec<CustomerContact>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_order_contacts(
    State(state): State<Arc<AppState>>,
    _current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CustomerContact>>, HttpAppError> {
    let contacts = state.db.contacts.list_for_order(id).await?;
    Ok(Json(contacts))
}
