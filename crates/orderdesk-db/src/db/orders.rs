use orderdesk_core::{
    models::{Order, OrderRecord},
    AppError,
};
use sqlx::{PgPool, Postgres};

const ORDER_COLUMNS: &str = "id, client, order_number, customer_name, city, created, delivery, \
     first_contact, type_of_completion, term_of_assembly, time_of_assembly, status_of_assembly, \
     imported_at";

/// Repository for persisted orders
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a batch of imported records in one transaction: either every
    /// record commits or none do. A record without a `created` date
    /// violates the NOT NULL constraint and rolls the whole batch back, as
    /// does any length overflow. Returns the number of rows persisted.
    #[tracing::instrument(skip(self, records), fields(db.table = "orders", db.operation = "insert", batch_len = records.len()))]
    pub async fn insert_batch(&self, records: &[OrderRecord]) -> Result<u64, AppError> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for record in records {
            // `?` drops the transaction, which rolls the batch back.
            sqlx::query(
                "INSERT INTO orders (client, order_number, customer_name, city, created, delivery) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&record.client)
            .bind(&record.order_number)
            .bind(&record.customer_name)
            .bind(&record.city)
            .bind(record.created)
            .bind(record.delivery)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(records.len() as u64)
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select"))]
    pub async fn list_orders(&self, limit: i64, offset: i64) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<Postgres, Order>(&format!(
            "SELECT {} FROM orders ORDER BY imported_at DESC, order_number ASC LIMIT $1 OFFSET $2",
            ORDER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select"))]
    pub async fn count_orders(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
