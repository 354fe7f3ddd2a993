use orderdesk_core::{
    models::{OrderRecord, PendingOrder},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const PENDING_COLUMNS: &str = "batch_id, user_id, order_number, client, customer_name, city, \
     created, delivery, note, staged_at";

/// Staged needs-confirmation rows, keyed by an explicit batch handle and
/// scoped to the uploading user.
#[derive(Clone)]
pub struct PendingOrderRepository {
    pool: PgPool,
}

impl PendingOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replace the user's staged batch with a new one. A second upload
    /// before confirmation discards the prior set — last write wins, which
    /// also resolves concurrent uploads from the same user. Duplicate order
    /// numbers within one upload collapse to the last occurrence, matching
    /// the set's keyed-by-order-number contract.
    #[tracing::instrument(skip(self, records), fields(db.table = "pending_orders", db.operation = "insert", batch_id = %batch_id, batch_len = records.len()))]
    pub async fn replace_batch(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
        records: &[OrderRecord],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM pending_orders WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for record in records {
            sqlx::query(
                "INSERT INTO pending_orders \
                   (batch_id, user_id, order_number, client, customer_name, city, created, delivery, note) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
                 ON CONFLICT (batch_id, order_number) DO UPDATE SET \
                   client = EXCLUDED.client, \
                   customer_name = EXCLUDED.customer_name, \
                   city = EXCLUDED.city, \
                   created = EXCLUDED.created, \
                   delivery = EXCLUDED.delivery, \
                   note = EXCLUDED.note",
            )
            .bind(batch_id)
            .bind(user_id)
            .bind(&record.order_number)
            .bind(&record.client)
            .bind(&record.customer_name)
            .bind(&record.city)
            .bind(record.created)
            .bind(record.delivery)
            .bind(&record.note)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Load a staged batch if it exists and belongs to the user. An unknown
    /// or foreign batch is simply empty.
    #[tracing::instrument(skip(self), fields(db.table = "pending_orders", db.operation = "select", batch_id = %batch_id))]
    pub async fn get_batch(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Vec<PendingOrder>, AppError> {
        let rows = sqlx::query_as::<Postgres, PendingOrder>(&format!(
            "SELECT {} FROM pending_orders WHERE user_id = $1 AND batch_id = $2 ORDER BY order_number ASC",
            PENDING_COLUMNS
        ))
        .bind(user_id)
        .bind(batch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Drop a staged batch unconditionally. Returns the number of rows
    /// removed; clearing an already-empty batch is not an error.
    #[tracing::instrument(skip(self), fields(db.table = "pending_orders", db.operation = "delete", batch_id = %batch_id))]
    pub async fn clear_batch(&self, user_id: Uuid, batch_id: Uuid) -> Result<u64, AppError> {
        let rows_affected =
            sqlx::query("DELETE FROM pending_orders WHERE user_id = $1 AND batch_id = $2")
                .bind(user_id)
                .bind(batch_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(rows_affected)
    }
}
