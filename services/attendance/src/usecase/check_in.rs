use uuid::Uuid;

use crate::domain::clock::Clock;
use crate::domain::credential::Credential;
use crate::domain::repository::{AttendanceRepository, MeetingRepository, MentorshipRepository};
use crate::domain::types::{AttendanceRecord, Caller};
use crate::error::AttendanceServiceError;
use crate::usecase::access::load_meeting;

// ── CheckIn ───────────────────────────────────────────────────────────────────

pub struct CheckInInput {
    pub meeting_id: Uuid,
    pub credential: Credential,
}

/// Validate a scanned token or typed manual code and record presence.
pub struct CheckInUseCase<M, S, A, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    A: AttendanceRepository,
    K: Clock,
{
    pub meetings: M,
    pub mentorships: S,
    pub attendance: A,
    pub clock: K,
}

impl<M, S, A, K> CheckInUseCase<M, S, A, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    A: AttendanceRepository,
    K: Clock,
{
    pub async fn execute(
        &self,
        caller: &Caller,
        input: CheckInInput,
    ) -> Result<AttendanceRecord, AttendanceServiceError> {
        // 1. Meeting exists and still accepts check-ins → 404 / 409
        let meeting = load_meeting(&self.meetings, input.meeting_id).await?;
        if !meeting.status.is_open() {
            return Err(AttendanceServiceError::MeetingClosed);
        }

        // 2. Credential matches the stored one → 401
        let now = self.clock.now();
        match &input.credential {
            Credential::Token(token) => {
                if !meeting.token_matches(token) {
                    tracing::warn!(
                        meeting_id = %meeting.id,
                        user_id = %caller.user_id,
                        "check-in with invalid token"
                    );
                    return Err(AttendanceServiceError::InvalidToken);
                }
                if meeting.token_expired(now) {
                    return Err(AttendanceServiceError::TokenExpired);
                }
            }
            Credential::ManualCode(code) => {
                if !meeting.manual_code_matches(code) {
                    tracing::warn!(
                        meeting_id = %meeting.id,
                        user_id = %caller.user_id,
                        "check-in with invalid manual code"
                    );
                    return Err(AttendanceServiceError::InvalidCode);
                }
            }
        }

        // 3. Caller belongs to the mentorship → 403
        let mentorship = self.mentorships.find_by_id(meeting.mentorship_id).await?;
        if !caller.is_participant(mentorship.as_ref()) {
            return Err(AttendanceServiceError::NotAParticipant);
        }

        // 4. Single atomic upsert keyed by (meeting, user)
        let record = self
            .attendance
            .check_in(meeting.id, caller.user_id, now)
            .await?;

        tracing::info!(
            meeting_id = %meeting.id,
            user_id = %caller.user_id,
            status = %record.status,
            "checked in"
        );
        Ok(record)
    }
}

// ── CheckOut ──────────────────────────────────────────────────────────────────

/// Close the caller's open session. Returns `None` when there was nothing to close.
pub struct CheckOutUseCase<A, K>
where
    A: AttendanceRepository,
    K: Clock,
{
    pub attendance: A,
    pub clock: K,
}

impl<A, K> CheckOutUseCase<A, K>
where
    A: AttendanceRepository,
    K: Clock,
{
    pub async fn execute(
        &self,
        caller: &Caller,
        meeting_id: Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceServiceError> {
        let now = self.clock.now();
        let closed = self
            .attendance
            .check_out(meeting_id, caller.user_id, now)
            .await?;

        if closed.is_some() {
            tracing::info!(meeting_id = %meeting_id, user_id = %caller.user_id, "checked out");
        } else {
            tracing::debug!(
                meeting_id = %meeting_id,
                user_id = %caller.user_id,
                "check-out with no open session"
            );
        }
        Ok(closed)
    }
}
