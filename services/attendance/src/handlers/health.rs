use axum::{extract::State, http::StatusCode};

use mentorly_core::health::readiness;

use crate::state::AppState;

/// `GET /readyz`: ready once PostgreSQL answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness("postgres", state.db.ping().await)
}
