use uuid::Uuid;

use mentorly_domain::attendance::AttendanceStatus;

use crate::domain::clock::Clock;
use crate::domain::repository::{AttendanceRepository, MeetingRepository, MentorshipRepository};
use crate::domain::types::{AttendanceRecord, Caller};
use crate::error::AttendanceServiceError;
use crate::usecase::access::load_organized_meeting;

// ── ListAttendance ────────────────────────────────────────────────────────────

pub struct ListAttendanceUseCase<M, S, A>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    A: AttendanceRepository,
{
    pub meetings: M,
    pub mentorships: S,
    pub attendance: A,
}

impl<M, S, A> ListAttendanceUseCase<M, S, A>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    A: AttendanceRepository,
{
    pub async fn execute(
        &self,
        caller: &Caller,
        meeting_id: Uuid,
    ) -> Result<Vec<AttendanceRecord>, AttendanceServiceError> {
        load_organized_meeting(&self.meetings, &self.mentorships, caller, meeting_id).await?;
        self.attendance.list_by_meeting(meeting_id).await
    }
}

// ── MarkAttendance ────────────────────────────────────────────────────────────

pub struct MarkAttendanceInput {
    pub meeting_id: Uuid,
    pub user_id: Uuid,
    pub status: AttendanceStatus,
}

/// Organizer override of a participant's status, in any meeting state.
pub struct MarkAttendanceUseCase<M, S, A, K>
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

impl<M, S, A, K> MarkAttendanceUseCase<M, S, A, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    A: AttendanceRepository,
    K: Clock,
{
    pub async fn execute(
        &self,
        caller: &Caller,
        input: MarkAttendanceInput,
    ) -> Result<AttendanceRecord, AttendanceServiceError> {
        // 1. Meeting exists and caller organizes it → 404 / 403
        let (_, mentorship) =
            load_organized_meeting(&self.meetings, &self.mentorships, caller, input.meeting_id)
                .await?;

        // 2. Target is the mentor or one of the mentees → 403
        if !mentorship.is_some_and(|m| m.is_member(input.user_id)) {
            return Err(AttendanceServiceError::NotAParticipant);
        }

        // 3. Upsert status, timestamps untouched
        let record = self
            .attendance
            .set_status(input.meeting_id, input.user_id, input.status, self.clock.now())
            .await?;

        tracing::info!(
            meeting_id = %input.meeting_id,
            user_id = %input.user_id,
            status = %input.status,
            marked_by = %caller.user_id,
            "attendance marked"
        );
        Ok(record)
    }
}
