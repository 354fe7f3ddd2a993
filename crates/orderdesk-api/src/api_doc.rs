//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use orderdesk_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orderdesk API",
        version = "0.1.0",
        description = "Order management with CSV import from the logistics export: \
                       authenticated upload, review of flagged orders, selective commit. \
                       All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Auth
        handlers::auth::login,
        handlers::auth::me,
        // Accounts
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::delete_user,
        handlers::users::change_password,
        // Imports
        handlers::imports::upload_import,
        handlers::imports::confirm_import,
        // Orders
        handlers::orders::list_orders,
        // Contacts
        handlers::contacts::seed_contacts,
        handlers::contacts::list_order_contacts,
    ),
    components(schemas(
        models::LoginRequest,
        models::LoginResponse,
        models::UserResponse,
        models::CreateUserRequest,
        models::ChangePasswordRequest,
        models::OrderRecord,
        models::Order,
        models::OrderListResponse,
        models::RowError,
        models::ImportReceipt,
        models::ConfirmImportRequest,
        models::ConfirmImportResponse,
        models::CustomerContact,
        models::SeedContactsRequest,
        models::SeedContactsResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Login and session introspection"),
        (name = "users", description = "Account administration (superuser)"),
        (name = "imports", description = "CSV order ingestion and confirmation"),
        (name = "orders", description = "Persisted orders"),
        (name = "contacts", description = "Customer contacts"),
    )
)]
pub struct ApiDoc;
