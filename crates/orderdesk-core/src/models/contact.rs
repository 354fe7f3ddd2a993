use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Customer contact linked to an order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct CustomerContact {
    pub id: Uuid,
    pub order_id: Uuid,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Request to seed placeholder contacts for a batch of orders.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SeedContactsRequest {
    pub order_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeedContactsResponse {
    pub created: u64,
}
