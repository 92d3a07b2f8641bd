use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mentorly_auth_types::identity::IdentityHeaders;
use mentorly_core::serde::to_rfc3339_ms;
use mentorly_domain::meeting::MeetingStatus;

use crate::domain::types::Caller;
use crate::error::AttendanceServiceError;
use crate::state::AppState;
use crate::usecase::manual_code::IssueManualCodeUseCase;
use crate::usecase::token::{CurrentCredentialsUseCase, IssueTokenInput, IssueTokenUseCase};

// ── POST /meetings/{meeting_id}/token ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct IssueTokenRequest {
    pub ttl_seconds: Option<u32>,
}

#[derive(Serialize)]
pub struct IssueTokenResponse {
    pub meeting_id: Uuid,
    pub token: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    pub ttl_seconds: u32,
    pub payload_url: String,
    pub manual_code: Option<String>,
}

pub async fn issue_token(
    State(state): State<AppState>,
    identity: IdentityHeaders,
    Path(meeting_id): Path<Uuid>,
    body: Option<Json<IssueTokenRequest>>,
) -> Result<(StatusCode, Json<IssueTokenResponse>), AttendanceServiceError> {
    let usecase = IssueTokenUseCase {
        meetings: state.meeting_repo(),
        mentorships: state.mentorship_repo(),
        clock: state.clock(),
        policy: state.token_policy,
        check_in_base_url: state.check_in_base_url.clone(),
    };
    let caller = Caller::new(identity.user_id, identity.user_role);
    let issued = usecase
        .execute(
            &caller,
            IssueTokenInput {
                meeting_id,
                ttl_seconds: body.and_then(|Json(body)| body.ttl_seconds),
            },
        )
        .await?;
    let body = IssueTokenResponse {
        meeting_id: issued.meeting_id,
        token: issued.token,
        expires_at: issued.expires_at,
        ttl_seconds: issued.ttl_seconds,
        payload_url: issued.payload_url,
        manual_code: issued.manual_code,
    };
    Ok((StatusCode::CREATED, Json(body)))
}

// ── GET /meetings/{meeting_id}/token ──────────────────────────────────────────

#[derive(Serialize)]
pub struct LiveTokenResponse {
    pub token: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    pub seconds_remaining: i64,
    pub payload_url: String,
}

#[derive(Serialize)]
pub struct CurrentCredentialsResponse {
    pub meeting_id: Uuid,
    pub status: MeetingStatus,
    pub token: Option<LiveTokenResponse>,
    pub manual_code: Option<String>,
}

pub async fn current_credentials(
    State(state): State<AppState>,
    identity: IdentityHeaders,
    Path(meeting_id): Path<Uuid>,
) -> Result<Json<CurrentCredentialsResponse>, AttendanceServiceError> {
    let usecase = CurrentCredentialsUseCase {
        meetings: state.meeting_repo(),
        mentorships: state.mentorship_repo(),
        clock: state.clock(),
        check_in_base_url: state.check_in_base_url.clone(),
    };
    let caller = Caller::new(identity.user_id, identity.user_role);
    let current = usecase.execute(&caller, meeting_id).await?;
    Ok(Json(CurrentCredentialsResponse {
        meeting_id: current.meeting_id,
        status: current.status,
        token: current.token.map(|live| LiveTokenResponse {
            token: live.token,
            expires_at: live.expires_at,
            seconds_remaining: live.seconds_remaining,
            payload_url: live.payload_url,
        }),
        manual_code: current.manual_code,
    }))
}

// ── POST /meetings/{meeting_id}/manual-code ───────────────────────────────────

#[derive(Serialize)]
pub struct ManualCodeResponse {
    pub meeting_id: Uuid,
    pub manual_code: String,
}

pub async fn issue_manual_code(
    State(state): State<AppState>,
    identity: IdentityHeaders,
    Path(meeting_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ManualCodeResponse>), AttendanceServiceError> {
    let usecase = IssueManualCodeUseCase {
        meetings: state.meeting_repo(),
        mentorships: state.mentorship_repo(),
        clock: state.clock(),
    };
    let caller = Caller::new(identity.user_id, identity.user_role);
    let issued = usecase.execute(&caller, meeting_id).await?;
    let body = ManualCodeResponse {
        meeting_id: issued.meeting_id,
        manual_code: issued.manual_code,
    };
    Ok((StatusCode::CREATED, Json(body)))
}
