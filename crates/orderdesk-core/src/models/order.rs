use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A normalized order row produced by the import pipeline.
///
/// `order_number` is never empty and has spreadsheet quoting artifacts
/// stripped. `note` travels with the record so a reviewer can see it during
/// confirmation, but it is not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderRecord {
    pub client: String,
    pub order_number: String,
    pub customer_name: String,
    pub city: String,
    pub created: Option<NaiveDate>,
    pub delivery: Option<NaiveDate>,
    #[serde(default)]
    pub note: String,
}

/// A persisted order.
///
/// The assembly workflow columns stay `None` at import time; back-office
/// tooling fills them in later.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub client: String,
    pub order_number: String,
    pub customer_name: String,
    pub city: String,
    pub created: NaiveDate,
    pub delivery: Option<NaiveDate>,
    pub first_contact: Option<NaiveDate>,
    pub type_of_completion: Option<String>,
    pub term_of_assembly: Option<NaiveDate>,
    pub time_of_assembly: Option<String>,
    pub status_of_assembly: Option<String>,
    pub imported_at: DateTime<Utc>,
}

/// Paginated order listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub total: i64,
    pub orders: Vec<Order>,
}
