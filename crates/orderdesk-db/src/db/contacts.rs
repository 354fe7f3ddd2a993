use orderdesk_core::{models::CustomerContact, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

// Filler values until the upstream source for real contact data is decided.
const PLACEHOLDER_ADDRESS: &str = "unknown";
const PLACEHOLDER_PHONE: &str = "000000000";
const PLACEHOLDER_EMAIL: &str = "unknown@example.invalid";

/// Placeholder contact seeding. Deliberately not wired into the ingestion
/// flow.
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create one placeholder contact per order id, all in a single
    /// transaction. An unknown order id fails the whole batch via the
    /// foreign-key constraint.
    #[tracing::instrument(skip(self, order_ids), fields(db.table = "contacts", db.operation = "insert", batch_len = order_ids.len()))]
    pub async fn seed_placeholders(&self, order_ids: &[Uuid]) -> Result<u64, AppError> {
        if order_ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for order_id in order_ids {
            sqlx::query(
                "INSERT INTO contacts (order_id, address, phone_number, email) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(order_id)
            .bind(PLACEHOLDER_ADDRESS)
            .bind(PLACEHOLDER_PHONE)
            .bind(PLACEHOLDER_EMAIL)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(order_ids.len() as u64)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contacts", db.operation = "select", db.record_id = %order_id))]
    pub async fn list_for_order(&self, order_id: Uuid) -> Result<Vec<CustomerContact>, AppError> {
        let contacts = sqlx::query_as::<Postgres, CustomerContact>(
            "SELECT id, order_id, address, phone_number, email, created_at \
             FROM contacts WHERE order_id = $1 ORDER BY created_at ASC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }
}
