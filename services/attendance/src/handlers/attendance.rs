use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mentorly_auth_types::identity::IdentityHeaders;
use mentorly_core::serde::{opt_to_rfc3339_ms, to_rfc3339_ms};
use mentorly_domain::attendance::AttendanceStatus;

use crate::domain::types::{AttendanceRecord, Caller};
use crate::error::AttendanceServiceError;
use crate::state::AppState;
use crate::usecase::roster::{ListAttendanceUseCase, MarkAttendanceInput, MarkAttendanceUseCase};

#[derive(Serialize)]
pub struct AttendanceResponse {
    pub meeting_id: Uuid,
    pub user_id: Uuid,
    pub status: AttendanceStatus,
    #[serde(serialize_with = "opt_to_rfc3339_ms")]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "opt_to_rfc3339_ms")]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            meeting_id: record.meeting_id,
            user_id: record.user_id,
            status: record.status,
            check_in_time: record.check_in_time,
            check_out_time: record.check_out_time,
            updated_at: record.updated_at,
        }
    }
}

// ── GET /meetings/{meeting_id}/attendance ─────────────────────────────────────

pub async fn list_attendance(
    State(state): State<AppState>,
    identity: IdentityHeaders,
    Path(meeting_id): Path<Uuid>,
) -> Result<Json<Vec<AttendanceResponse>>, AttendanceServiceError> {
    let usecase = ListAttendanceUseCase {
        meetings: state.meeting_repo(),
        mentorships: state.mentorship_repo(),
        attendance: state.attendance_repo(),
    };
    let caller = Caller::new(identity.user_id, identity.user_role);
    let records = usecase.execute(&caller, meeting_id).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

// ── PUT /meetings/{meeting_id}/attendance/{user_id} ───────────────────────────

#[derive(Deserialize)]
pub struct MarkAttendanceRequest {
    pub status: String,
}

pub async fn mark_attendance(
    State(state): State<AppState>,
    identity: IdentityHeaders,
    Path((meeting_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<MarkAttendanceRequest>,
) -> Result<Json<AttendanceResponse>, AttendanceServiceError> {
    let status = body
        .status
        .parse::<AttendanceStatus>()
        .map_err(|_| AttendanceServiceError::InvalidStatus)?;
    let usecase = MarkAttendanceUseCase {
        meetings: state.meeting_repo(),
        mentorships: state.mentorship_repo(),
        attendance: state.attendance_repo(),
        clock: state.clock(),
    };
    let caller = Caller::new(identity.user_id, identity.user_role);
    let record = usecase
        .execute(
            &caller,
            MarkAttendanceInput {
                meeting_id,
                user_id,
                status,
            },
        )
        .await?;
    Ok(Json(record.into()))
}
