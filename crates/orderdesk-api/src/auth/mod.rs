//! Authentication: password login issuing JWTs, bearer-token validation
//! middleware, and the per-IP login failure limiter.

pub mod middleware;
pub mod models;
pub mod token;
