//! CSV import: upload/classify/stage, then selective confirmation.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use orderdesk_core::{
    models::{ConfirmImportRequest, ConfirmImportResponse, ImportReceipt, OrderRecord, PendingOrder},
    AppError,
};
use orderdesk_ingest::{ingest_upload, normalize_order_number};
use uuid::Uuid;

use crate::auth::models::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Multipart field name the upload form uses for the file.
const FILE_FIELD: &str = "file";

#[utoipa::path(
    post,
    path = "/api/v0/imports",
    tag = "imports",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File processed; auto rows committed, flagged rows staged", body = ImportReceipt),
        (status = 400, description = "No file attached or the file could not be parsed", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    )
)]
pub async fn upload_import(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<ImportReceipt>, HttpAppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some(FILE_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read uploaded file: {}", e)))?;
            file_bytes = Some(data.to_vec());
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::InvalidInput("No file attached".to_string()))?;
    if bytes.len() > state.import.max_upload_size_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds max {} bytes",
            bytes.len(),
            state.import.max_upload_size_bytes
        ))
        .into());
    }

    let classification = ingest_upload(&bytes, state.import.csv_delimiter, &state.import.policy)?;

    // Rows the policy did not flag go straight to the store, batch-atomically.
    let committed = state.db.orders.insert_batch(&classification.auto).await?;

    // Flagged rows replace whatever batch the user still had staged.
    let batch_id = Uuid::new_v4();
    state
        .db
        .pending
        .replace_batch(current_user.user_id, batch_id, &classification.needs_confirmation)
        .await?;

    tracing::info!(
        batch_id = %batch_id,
        user = %current_user.username,
        committed,
        staged = classification.needs_confirmation.len(),
        dropped = classification.errors.len(),
        "Processed order import"
    );

    Ok(Json(ImportReceipt {
        batch_id,
        committed,
        pending: classification.needs_confirmation,
        row_errors: classification.errors,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v0/imports/{batch_id}/confirm",
    tag = "imports",
    params(("batch_id" = Uuid, Path, description = "Handle returned by the upload")),
    request_body = ConfirmImportRequest,
    responses(
        (status = 200, description = "Selected rows committed; the batch is consumed either way", body = ConfirmImportResponse),
        (status = 500, description = "Commit failed and was rolled back; the batch is still consumed", body = ErrorResponse)
    )
)]
pub async fn confirm_import(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Path(batch_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ConfirmImportRequest>,
) -> Result<Json<ConfirmImportResponse>, HttpAppError> {
    // The round trip through a rendered form can reintroduce the quoting
    // artifacts the classifier already stripped; normalize again so the two
    // sides agree.
    let selected: HashSet<String> = req
        .order_numbers
        .iter()
        .map(|raw| normalize_order_number(raw))
        .collect();

    // An unknown or foreign batch is empty: nothing persists, no error.
    let staged = state.db.pending.get_batch(current_user.user_id, batch_id).await?;

    // The staged batch is consumed by this submission no matter how the
    // commit below ends; a failed commit requires a fresh upload.
    state.db.pending.clear_batch(current_user.user_id, batch_id).await?;

    let records: Vec<OrderRecord> = staged
        .into_iter()
        .filter(|pending| selected.contains(&pending.order_number))
        .map(PendingOrder::into_record)
        .collect();

    let committed = state.db.orders.insert_batch(&records).await?;

    tracing::info!(
        batch_id = %batch_id,
        user = %current_user.username,
        committed,
        "Confirmed order import"
    );

    Ok(Json(ConfirmImportResponse { committed }))
}
