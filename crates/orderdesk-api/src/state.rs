//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only
//! what they need via Axum's `FromRef`.

use std::sync::Arc;

use orderdesk_core::Config;
use orderdesk_db::{ContactRepository, OrderRepository, PendingOrderRepository, UserRepository};
use orderdesk_ingest::ConfirmationPolicy;
use sqlx::PgPool;

use crate::auth::middleware::AuthFailureLimiter;

// ----- Sub-state types -----

/// All repositories, each owning a handle to the shared pool.
#[derive(Clone)]
pub struct DbState {
    pub users: UserRepository,
    pub orders: OrderRepository,
    pub pending: PendingOrderRepository,
    pub contacts: ContactRepository,
}

/// Import pipeline settings, resolved once from config.
#[derive(Clone, Copy)]
pub struct ImportConfig {
    pub policy: ConfirmationPolicy,
    pub csv_delimiter: u8,
    pub max_upload_size_bytes: usize,
}

/// Token issuing settings plus the login failure limiter.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub failure_limiter: Arc<AuthFailureLimiter>,
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub import: ImportConfig,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let db = DbState {
            users: UserRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            pending: PendingOrderRepository::new(pool.clone()),
            contacts: ContactRepository::new(pool),
        };
        let import = ImportConfig {
            policy: ConfirmationPolicy::new(config.confirmation_suffix),
            csv_delimiter: config.csv_delimiter,
            max_upload_size_bytes: config.max_upload_size_bytes,
        };
        let auth = AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            jwt_expiry_hours: config.jwt_expiry_hours,
            failure_limiter: Arc::new(AuthFailureLimiter::new(
                config.auth_max_failures,
                config.auth_failure_window_seconds,
            )),
        };

        Self { db, import, auth }
    }
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for ImportConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.import
    }
}

impl axum::extract::FromRef<Arc<AppState>> for AuthConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.auth.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
