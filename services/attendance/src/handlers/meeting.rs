use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use mentorly_auth_types::identity::IdentityHeaders;
use mentorly_core::serde::to_rfc3339_ms;
use mentorly_domain::meeting::MeetingStatus;

use crate::domain::types::{Caller, TransitionOutcome};
use crate::error::AttendanceServiceError;
use crate::state::AppState;
use crate::usecase::lifecycle::{MeetingTransition, TransitionMeetingUseCase};

#[derive(Serialize)]
pub struct MeetingTransitionResponse {
    pub id: Uuid,
    pub mentorship_id: Uuid,
    pub title: String,
    pub status: MeetingStatus,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    /// Open attendance sessions closed by this transition.
    pub forced_checkouts: u64,
}

impl From<TransitionOutcome> for MeetingTransitionResponse {
    fn from(outcome: TransitionOutcome) -> Self {
        let meeting = outcome.meeting;
        Self {
            id: meeting.id,
            mentorship_id: meeting.mentorship_id,
            title: meeting.title,
            status: meeting.status,
            scheduled_at: meeting.scheduled_at,
            updated_at: meeting.updated_at,
            forced_checkouts: outcome.forced_checkouts,
        }
    }
}

async fn transition(
    state: AppState,
    identity: IdentityHeaders,
    meeting_id: Uuid,
    transition: MeetingTransition,
) -> Result<Json<MeetingTransitionResponse>, AttendanceServiceError> {
    let usecase = TransitionMeetingUseCase {
        meetings: state.meeting_repo(),
        mentorships: state.mentorship_repo(),
        clock: state.clock(),
        cancelled_policy: state.cancelled_policy,
    };
    let caller = Caller::new(identity.user_id, identity.user_role);
    let outcome = usecase.execute(&caller, meeting_id, transition).await?;
    Ok(Json(outcome.into()))
}

// ── POST /meetings/{meeting_id}/start ─────────────────────────────────────────

pub async fn start_meeting(
    State(state): State<AppState>,
    identity: IdentityHeaders,
    Path(meeting_id): Path<Uuid>,
) -> Result<Json<MeetingTransitionResponse>, AttendanceServiceError> {
    transition(state, identity, meeting_id, MeetingTransition::Start).await
}

// ── POST /meetings/{meeting_id}/complete ──────────────────────────────────────

pub async fn complete_meeting(
    State(state): State<AppState>,
    identity: IdentityHeaders,
    Path(meeting_id): Path<Uuid>,
) -> Result<Json<MeetingTransitionResponse>, AttendanceServiceError> {
    transition(state, identity, meeting_id, MeetingTransition::Complete).await
}

// ── POST /meetings/{meeting_id}/cancel ────────────────────────────────────────

pub async fn cancel_meeting(
    State(state): State<AppState>,
    identity: IdentityHeaders,
    Path(meeting_id): Path<Uuid>,
) -> Result<Json<MeetingTransitionResponse>, AttendanceServiceError> {
    transition(state, identity, meeting_id, MeetingTransition::Cancel).await
}
