use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::OrderRecord;

/// One dropped input row: the line it came from and why it was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RowError {
    /// 1-based line number in the uploaded file; the header is line 1.
    pub line: usize,
    pub reason: String,
}

/// A staged row awaiting confirmation, scoped to the uploading user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PendingOrder {
    pub batch_id: Uuid,
    pub user_id: Uuid,
    pub order_number: String,
    pub client: String,
    pub customer_name: String,
    pub city: String,
    pub created: Option<NaiveDate>,
    pub delivery: Option<NaiveDate>,
    pub note: String,
    pub staged_at: DateTime<Utc>,
}

impl PendingOrder {
    pub fn into_record(self) -> OrderRecord {
        OrderRecord {
            client: self.client,
            order_number: self.order_number,
            customer_name: self.customer_name,
            city: self.city,
            created: self.created,
            delivery: self.delivery,
            note: self.note,
        }
    }
}

/// Outcome of an upload: what was committed directly, what awaits
/// confirmation under `batch_id`, and which rows were dropped.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImportReceipt {
    pub batch_id: Uuid,
    pub committed: u64,
    pub pending: Vec<OrderRecord>,
    pub row_errors: Vec<RowError>,
}

/// Confirmation form: the order numbers the reviewer approved.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmImportRequest {
    pub order_numbers: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConfirmImportResponse {
    pub committed: u64,
}
