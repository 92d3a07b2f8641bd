use uuid::Uuid;

use mentorly_domain::meeting::MeetingStatus;

use crate::domain::clock::Clock;
use crate::domain::repository::{MeetingRepository, MentorshipRepository};
use crate::domain::types::{CancelledAttendancePolicy, Caller, TransitionOutcome};
use crate::error::AttendanceServiceError;
use crate::usecase::access::load_organized_meeting;

/// Organizer-driven meeting state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingTransition {
    Start,
    Complete,
    Cancel,
}

impl MeetingTransition {
    pub fn target(self) -> MeetingStatus {
        match self {
            Self::Start => MeetingStatus::InProgress,
            Self::Complete => MeetingStatus::Completed,
            Self::Cancel => MeetingStatus::Cancelled,
        }
    }
}

pub struct TransitionMeetingUseCase<M, S, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    K: Clock,
{
    pub meetings: M,
    pub mentorships: S,
    pub clock: K,
    pub cancelled_policy: CancelledAttendancePolicy,
}

impl<M, S, K> TransitionMeetingUseCase<M, S, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    K: Clock,
{
    pub async fn execute(
        &self,
        caller: &Caller,
        meeting_id: Uuid,
        transition: MeetingTransition,
    ) -> Result<TransitionOutcome, AttendanceServiceError> {
        // 1. Meeting exists and caller organizes it → 404 / 403
        let (meeting, _) =
            load_organized_meeting(&self.meetings, &self.mentorships, caller, meeting_id).await?;

        // 2. Transition allowed from the current status → 409
        let target = transition.target();
        if !meeting.status.can_transition_to(target) {
            return Err(AttendanceServiceError::InvalidMeetingState);
        }

        // 3. Status change, credential invalidation and forced checkout commit together
        let close_open_sessions = match transition {
            MeetingTransition::Start => false,
            MeetingTransition::Complete => true,
            MeetingTransition::Cancel => {
                self.cancelled_policy == CancelledAttendancePolicy::Checkout
            }
        };
        let outcome = self
            .meetings
            .transition(meeting_id, target, self.clock.now(), close_open_sessions)
            .await?
            .ok_or(AttendanceServiceError::InvalidMeetingState)?;

        tracing::info!(
            meeting_id = %meeting_id,
            from = %meeting.status,
            to = %target,
            forced_checkouts = outcome.forced_checkouts,
            "meeting transitioned"
        );
        Ok(outcome)
    }
}
