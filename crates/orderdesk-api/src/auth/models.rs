//! Authenticated-request context types.

use axum::{extract::FromRequestParts, http::request::Parts};
use orderdesk_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;

/// The authenticated user attached to a request by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
    pub is_superuser: bool,
}

impl CurrentUser {
    /// Guard for superuser-only operations.
    pub fn require_superuser(&self) -> Result<(), AppError> {
        if self.is_superuser {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Superuser privileges required".to_string(),
            ))
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            HttpAppError(AppError::Unauthorized(
                "Missing authentication context".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_superuser() {
        let admin = CurrentUser {
            user_id: Uuid::new_v4(),
            username: "admin".to_string(),
            is_superuser: true,
        };
        assert!(admin.require_superuser().is_ok());

        let user = CurrentUser {
            is_superuser: false,
            ..admin
        };
        match user.require_superuser() {
            Err(AppError::Forbidden(_)) => {}
            other => panic!("Expected Forbidden, got {:?}", other.err()),
        }
    }
}
