use std::fmt::Display;

use axum::http::StatusCode;

/// `GET /healthz`: the process is up and serving.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map the result of a dependency check to a `/readyz` status.
/// A failed check is logged at `warn` and answers 503.
pub fn readiness<E: Display>(dependency: &str, check: Result<(), E>) -> StatusCode {
    match check {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(dependency, error = %e, "not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
