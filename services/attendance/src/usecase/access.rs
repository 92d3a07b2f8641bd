use uuid::Uuid;

use crate::domain::repository::{MeetingRepository, MentorshipRepository};
use crate::domain::types::{Caller, Meeting, Mentorship};
use crate::error::AttendanceServiceError;

pub(crate) async fn load_meeting<M: MeetingRepository>(
    meetings: &M,
    meeting_id: Uuid,
) -> Result<Meeting, AttendanceServiceError> {
    meetings
        .find_by_id(meeting_id)
        .await?
        .ok_or(AttendanceServiceError::MeetingNotFound)
}

/// Load a meeting the caller organizes: 404 if missing, 403 if not mentor of record or admin.
pub(crate) async fn load_organized_meeting<M, S>(
    meetings: &M,
    mentorships: &S,
    caller: &Caller,
    meeting_id: Uuid,
) -> Result<(Meeting, Option<Mentorship>), AttendanceServiceError>
where
    M: MeetingRepository,
    S: MentorshipRepository,
{
    let meeting = load_meeting(meetings, meeting_id).await?;
    let mentorship = mentorships.find_by_id(meeting.mentorship_id).await?;
    if !caller.can_organize(mentorship.as_ref()) {
        tracing::warn!(
            meeting_id = %meeting_id,
            user_id = %caller.user_id,
            "organizer action refused"
        );
        return Err(AttendanceServiceError::NotAuthorized);
    }
    Ok((meeting, mentorship))
}
