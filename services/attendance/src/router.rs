use axum::{
    Router,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use mentorly_core::error::not_found;
use mentorly_core::health::healthz;
use mentorly_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    attendance::{list_attendance, mark_attendance},
    check_in::{check_in, check_out},
    health::readyz,
    meeting::{cancel_meeting, complete_meeting, start_meeting},
    token::{current_credentials, issue_manual_code, issue_token},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Credentials
        .route(
            "/meetings/{meeting_id}/token",
            post(issue_token).get(current_credentials),
        )
        .route("/meetings/{meeting_id}/manual-code", post(issue_manual_code))
        // Check-in
        .route("/check-in", post(check_in))
        .route("/meetings/{meeting_id}/check-out", post(check_out))
        // Lifecycle
        .route("/meetings/{meeting_id}/start", post(start_meeting))
        .route("/meetings/{meeting_id}/complete", post(complete_meeting))
        .route("/meetings/{meeting_id}/cancel", post(cancel_meeting))
        // Roster
        .route("/meetings/{meeting_id}/attendance", get(list_attendance))
        .route(
            "/meetings/{meeting_id}/attendance/{user_id}",
            put(mark_attendance),
        )
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
