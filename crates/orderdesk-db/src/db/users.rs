use orderdesk_core::{models::User, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, password_hash, is_superuser, created_at, updated_at";

/// Repository for managing accounts
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new account. A taken username is a conflict, reported
    /// inline rather than surfacing the unique-index violation.
    #[tracing::instrument(skip(self, password_hash), fields(db.table = "users", db.operation = "insert"))]
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        is_superuser: bool,
    ) -> Result<User, AppError> {
        let duplicate_exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        if duplicate_exists {
            return Err(AppError::Conflict(format!(
                "User '{}' already exists",
                username
            )));
        }

        let user = sqlx::query_as::<Postgres, User>(&format!(
            "INSERT INTO users (username, password_hash, is_superuser) \
             VALUES ($1, $2, $3) \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(username)
        .bind(password_hash)
        .bind(is_superuser)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<Postgres, User>(&format!(
            "SELECT {} FROM users ORDER BY username ASC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    #[tracing::instrument(skip(self, password_hash), fields(db.table = "users", db.operation = "update", db.record_id = %id))]
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let rows_affected =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await?
                .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}
