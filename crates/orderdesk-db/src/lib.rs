//! Orderdesk database layer
//!
//! Repository types over a Postgres pool. All durable writes happen here;
//! imported orders are committed batch-atomically, in contrast to the
//! row-level tolerance of the parsing layer.

pub mod db;

pub use db::contacts::ContactRepository;
pub use db::orders::OrderRepository;
pub use db::pending::PendingOrderRepository;
pub use db::users::UserRepository;
