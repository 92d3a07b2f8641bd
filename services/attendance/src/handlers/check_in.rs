use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use mentorly_auth_types::identity::IdentityHeaders;

use crate::domain::credential::Credential;
use crate::domain::payload::CheckInPayload;
use crate::domain::types::Caller;
use crate::error::AttendanceServiceError;
use crate::handlers::attendance::AttendanceResponse;
use crate::state::AppState;
use crate::usecase::check_in::{CheckInInput, CheckInUseCase, CheckOutUseCase};

// ── POST /check-in ────────────────────────────────────────────────────────────

/// Either a raw QR payload, or a meeting id with exactly one of token or manual code.
#[derive(Debug, Default, Deserialize)]
pub struct CheckInRequest {
    pub payload: Option<String>,
    pub meeting_id: Option<Uuid>,
    pub token: Option<String>,
    pub manual_code: Option<String>,
}

impl CheckInRequest {
    pub fn into_input(self) -> Result<CheckInInput, AttendanceServiceError> {
        let token = self.token.filter(|t| !t.is_empty());
        let manual_code = self.manual_code.filter(|c| !c.is_empty());

        if let Some(raw) = self.payload {
            if self.meeting_id.is_some() || token.is_some() || manual_code.is_some() {
                return Err(AttendanceServiceError::MissingCredential);
            }
            let payload = CheckInPayload::parse(&raw)?;
            return Ok(CheckInInput {
                meeting_id: payload.meeting_id,
                credential: Credential::Token(payload.token),
            });
        }

        let credential = match (token, manual_code) {
            (Some(token), None) => Credential::Token(token),
            (None, Some(code)) => Credential::ManualCode(code),
            _ => return Err(AttendanceServiceError::MissingCredential),
        };
        let meeting_id = self
            .meeting_id
            .ok_or(AttendanceServiceError::MissingCredential)?;
        Ok(CheckInInput {
            meeting_id,
            credential,
        })
    }
}

pub async fn check_in(
    State(state): State<AppState>,
    identity: IdentityHeaders,
    Json(body): Json<CheckInRequest>,
) -> Result<Json<AttendanceResponse>, AttendanceServiceError> {
    let input = body.into_input()?;
    let usecase = CheckInUseCase {
        meetings: state.meeting_repo(),
        mentorships: state.mentorship_repo(),
        attendance: state.attendance_repo(),
        clock: state.clock(),
    };
    let caller = Caller::new(identity.user_id, identity.user_role);
    let record = usecase.execute(&caller, input).await?;
    Ok(Json(record.into()))
}

// ── POST /meetings/{meeting_id}/check-out ─────────────────────────────────────

pub async fn check_out(
    State(state): State<AppState>,
    identity: IdentityHeaders,
    Path(meeting_id): Path<Uuid>,
) -> Result<Response, AttendanceServiceError> {
    let usecase = CheckOutUseCase {
        attendance: state.attendance_repo(),
        clock: state.clock(),
    };
    let caller = Caller::new(identity.user_id, identity.user_role);
    let response = match usecase.execute(&caller, meeting_id).await? {
        Some(record) => Json(AttendanceResponse::from(record)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}
