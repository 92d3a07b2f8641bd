use uuid::Uuid;

use crate::domain::clock::Clock;
use crate::domain::credential::generate_manual_code;
use crate::domain::repository::{MeetingRepository, MentorshipRepository};
use crate::domain::types::Caller;
use crate::error::AttendanceServiceError;
use crate::usecase::access::load_organized_meeting;

#[derive(Debug)]
pub struct IssueManualCodeOutput {
    pub meeting_id: Uuid,
    pub manual_code: String,
}

/// Assign the meeting's manual code once; later calls return the stored code.
pub struct IssueManualCodeUseCase<M, S, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    K: Clock,
{
    pub meetings: M,
    pub mentorships: S,
    pub clock: K,
}

impl<M, S, K> IssueManualCodeUseCase<M, S, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    K: Clock,
{
    pub async fn execute(
        &self,
        caller: &Caller,
        meeting_id: Uuid,
    ) -> Result<IssueManualCodeOutput, AttendanceServiceError> {
        // 1. Meeting exists and caller organizes it → 404 / 403
        let (meeting, _) =
            load_organized_meeting(&self.meetings, &self.mentorships, caller, meeting_id).await?;

        // 2. Only open meetings → 409
        if !meeting.status.is_open() {
            return Err(AttendanceServiceError::InvalidMeetingState);
        }

        // 3. Already assigned: hand back the same code
        if let Some(manual_code) = meeting.manual_code {
            return Ok(IssueManualCodeOutput {
                meeting_id,
                manual_code,
            });
        }

        // 4. Conditional write; a concurrent caller may win, in which case
        //    the stored code is theirs and both callers see it.
        let candidate = generate_manual_code();
        let stored = self
            .meetings
            .set_manual_code_if_absent(meeting_id, &candidate, self.clock.now())
            .await?
            .ok_or(AttendanceServiceError::MeetingNotFound)?;

        let manual_code = match stored.manual_code {
            Some(code) if stored.status.is_open() => code,
            _ => return Err(AttendanceServiceError::InvalidMeetingState),
        };

        tracing::info!(meeting_id = %meeting_id, "manual code issued");
        Ok(IssueManualCodeOutput {
            meeting_id,
            manual_code,
        })
    }
}
