use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use orderdesk_core::models::OrderListResponse;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::models::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListOrdersQuery {
    /// Maximum number of orders to return (capped at 200).
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Offset for pagination.
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[utoipa::path(
    get,
    path = "/api/v0/orders",
    tag = "orders",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Persisted orders, newest imports first", body = OrderListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    _current_user: CurrentUser,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<OrderListResponse>, HttpAppError> {
    let limit = query.limit.clamp(1, MAX_LIMIT);
    let offset = query.offset.max(0);

    let orders = state.db.orders.list_orders(limit, offset).await?;
    let total = state.db.orders.count_orders().await?;

    Ok(Json(OrderListResponse { total, orders }))
}
