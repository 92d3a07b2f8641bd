use chrono::{DateTime, Duration, Utc};
use url::Url;
use uuid::Uuid;

use mentorly_domain::meeting::MeetingStatus;

use crate::domain::clock::Clock;
use crate::domain::credential::generate_token;
use crate::domain::payload::CheckInPayload;
use crate::domain::repository::{MeetingRepository, MentorshipRepository};
use crate::domain::types::{Caller, TokenPolicy};
use crate::error::AttendanceServiceError;
use crate::usecase::access::load_organized_meeting;

// ── IssueToken ────────────────────────────────────────────────────────────────

pub struct IssueTokenInput {
    pub meeting_id: Uuid,
    pub ttl_seconds: Option<u32>,
}

#[derive(Debug)]
pub struct IssueTokenOutput {
    pub meeting_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub ttl_seconds: u32,
    /// Link encoded into the QR code.
    pub payload_url: String,
    pub manual_code: Option<String>,
}

pub struct IssueTokenUseCase<M, S, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    K: Clock,
{
    pub meetings: M,
    pub mentorships: S,
    pub clock: K,
    pub policy: TokenPolicy,
    pub check_in_base_url: Url,
}

impl<M, S, K> IssueTokenUseCase<M, S, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    K: Clock,
{
    pub async fn execute(
        &self,
        caller: &Caller,
        input: IssueTokenInput,
    ) -> Result<IssueTokenOutput, AttendanceServiceError> {
        // 1. Meeting exists and caller organizes it → 404 / 403
        let (meeting, _) =
            load_organized_meeting(&self.meetings, &self.mentorships, caller, input.meeting_id)
                .await?;

        // 2. Only open meetings take new tokens → 409
        if !meeting.status.is_open() {
            return Err(AttendanceServiceError::InvalidMeetingState);
        }

        // 3. Requested lifetime within bounds → 400
        let ttl_seconds = self.policy.resolve_ttl(input.ttl_seconds)?;

        // 4. Replace the previous token; the write re-checks the status so a
        //    meeting completed in the meantime is not handed a fresh token.
        let token = generate_token();
        let now = self.clock.now();
        let expires_at = now + Duration::seconds(i64::from(ttl_seconds));
        if !self
            .meetings
            .rotate_token(meeting.id, &token, expires_at, now)
            .await?
        {
            return Err(AttendanceServiceError::InvalidMeetingState);
        }

        tracing::info!(meeting_id = %meeting.id, ttl_seconds, "check-in token issued");

        let payload_url =
            CheckInPayload::new(meeting.id, token.clone()).to_link(&self.check_in_base_url);
        Ok(IssueTokenOutput {
            meeting_id: meeting.id,
            token,
            expires_at,
            ttl_seconds,
            payload_url,
            manual_code: meeting.manual_code,
        })
    }
}

// ── CurrentCredentials ────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LiveToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub seconds_remaining: i64,
    pub payload_url: String,
}

#[derive(Debug)]
pub struct CurrentCredentialsOutput {
    pub meeting_id: Uuid,
    pub status: MeetingStatus,
    /// `None` when no token was issued or the last one has expired.
    pub token: Option<LiveToken>,
    pub manual_code: Option<String>,
}

/// Read back the credentials an organizer is currently displaying.
pub struct CurrentCredentialsUseCase<M, S, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    K: Clock,
{
    pub meetings: M,
    pub mentorships: S,
    pub clock: K,
    pub check_in_base_url: Url,
}

impl<M, S, K> CurrentCredentialsUseCase<M, S, K>
where
    M: MeetingRepository,
    S: MentorshipRepository,
    K: Clock,
{
    pub async fn execute(
        &self,
        caller: &Caller,
        meeting_id: Uuid,
    ) -> Result<CurrentCredentialsOutput, AttendanceServiceError> {
        let (meeting, _) =
            load_organized_meeting(&self.meetings, &self.mentorships, caller, meeting_id).await?;

        let now = self.clock.now();
        let token = meeting.live_token(now).map(|(token, expires_at)| LiveToken {
            token: token.to_owned(),
            expires_at,
            seconds_remaining: (expires_at - now).num_seconds(),
            payload_url: CheckInPayload::new(meeting.id, token).to_link(&self.check_in_base_url),
        });

        Ok(CurrentCredentialsOutput {
            meeting_id: meeting.id,
            status: meeting.status,
            token,
            manual_code: meeting.manual_code,
        })
    }
}
