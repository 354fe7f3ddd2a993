//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain.

mod contact;
mod import;
mod order;
mod user;

// Re-export all models for convenient imports
pub use contact::*;
pub use import::*;
pub use order::*;
pub use user::*;
