//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use mentorly_core::error::AppError;
use mentorly_domain::user::UserRole;

pub const X_MENTORLY_USER_ID: &str = "x-mentorly-user-id";
pub const X_MENTORLY_USER_ROLE: &str = "x-mentorly-user-role";

/// Caller identity injected by the gateway via `x-mentorly-user-id` and
/// `x-mentorly-user-role` headers.
///
/// Rejects with 401 if either header is absent or unparsable. Per-resource
/// authorization (mentor of record, participant) is done by use cases.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // Values are read synchronously so the returned future is 'static and Send.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(X_MENTORLY_USER_ID)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let user_role = parts
            .headers
            .get(X_MENTORLY_USER_ROLE)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(UserRole::from_u8);

        async move {
            let (Some(user_id), Some(user_role)) = (user_id, user_role) else {
                tracing::debug!("rejecting request without valid identity headers");
                return Err(AppError::Unauthorized);
            };
            Ok(Self { user_id, user_role })
        }
    }
}
