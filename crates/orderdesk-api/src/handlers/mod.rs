//! HTTP request handlers.

pub mod auth;
pub mod contacts;
pub mod imports;
pub mod orders;
pub mod users;
