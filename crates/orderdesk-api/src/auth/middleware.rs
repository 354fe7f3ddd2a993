//! Bearer-token middleware and the login failure limiter.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use orderdesk_core::AppError;
use tokio::sync::Mutex;

use crate::auth::models::CurrentUser;
use crate::auth::token;
use crate::error::HttpAppError;

/// Per-IP counter of failed login attempts within a sliding window. Blocks
/// password guessing without tracking successful traffic.
#[derive(Clone)]
pub struct AuthFailureLimiter {
    inner: Arc<Mutex<HashMap<String, (u32, Instant)>>>,
    max_failures: u32,
    window: Duration,
}

impl AuthFailureLimiter {
    pub fn new(max_failures: u32, window_seconds: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_failures,
            window: Duration::from_secs(window_seconds),
        }
    }

    /// Record a failure; returns true once the IP has crossed the limit.
    pub async fn record_failure(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        let now = Instant::now();
        let (count, reset_at) = guard.entry(ip.to_string()).or_insert((0, now + self.window));
        if now >= *reset_at {
            *count = 0;
            *reset_at = now + self.window;
        }
        *count += 1;
        *count >= self.max_failures
    }

    pub async fn is_blocked(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        if let Some((count, reset_at)) = guard.get(ip) {
            if Instant::now() >= *reset_at {
                guard.remove(ip);
                return false;
            }
            return *count >= self.max_failures;
        }
        false
    }
}

/// Best-effort client address for failure accounting: first X-Forwarded-For
/// hop when present, otherwise unknown. Good enough for throttling; not an
/// identity.
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Token verification settings for the middleware.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

/// Validates the bearer token and attaches [`CurrentUser`] to the request.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    };

    match token::verify_token(token, &auth_state.jwt_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(CurrentUser {
                user_id: claims.sub,
                username: claims.username,
                is_superuser: claims.superuser,
            });
            next.run(request).await
        }
        Err(err) => HttpAppError(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limiter_blocks_after_max_failures() {
        let limiter = AuthFailureLimiter::new(3, 900);
        assert!(!limiter.is_blocked("10.0.0.1").await);

        assert!(!limiter.record_failure("10.0.0.1").await);
        assert!(!limiter.record_failure("10.0.0.1").await);
        assert!(limiter.record_failure("10.0.0.1").await);
        assert!(limiter.is_blocked("10.0.0.1").await);

        // Other addresses are unaffected.
        assert!(!limiter.is_blocked("10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_limiter_window_expires() {
        let limiter = AuthFailureLimiter::new(1, 0);
        limiter.record_failure("10.0.0.1").await;
        // Zero-length window: the block expires immediately.
        assert!(!limiter.is_blocked("10.0.0.1").await);
    }

    #[test]
    fn test_client_ip_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_defaults_to_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }
}
