#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use mentorly_domain::attendance::AttendanceStatus;
use mentorly_domain::meeting::MeetingStatus;

use crate::domain::types::{AttendanceRecord, Meeting, Mentorship, TransitionOutcome};
use crate::error::AttendanceServiceError;

/// Port for resolving a meeting's mentor and mentees.
pub trait MentorshipRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mentorship>, AttendanceServiceError>;
}

/// Repository for meetings and their check-in credentials.
pub trait MeetingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Meeting>, AttendanceServiceError>;

    /// Replace the current token and expiry while the meeting is still open.
    /// Returns `false` when no open meeting matched.
    async fn rotate_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<bool, AttendanceServiceError>;

    /// Store `code` only if the meeting is open and has no manual code yet.
    /// Returns the meeting as it stands after the write.
    async fn set_manual_code_if_absent(
        &self,
        id: Uuid,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Meeting>, AttendanceServiceError>;

    /// Move the meeting to `to` if its current status is an allowed predecessor.
    /// Entering a terminal status clears every credential. With `close_open_sessions`,
    /// open attendance sessions are checked out at `now` in the same transaction.
    /// Returns `None` when the meeting was not in a permitted status.
    async fn transition(
        &self,
        id: Uuid,
        to: MeetingStatus,
        now: DateTime<Utc>,
        close_open_sessions: bool,
    ) -> Result<Option<TransitionOutcome>, AttendanceServiceError>;
}

/// Repository for attendance records, keyed by (meeting, user).
pub trait AttendanceRepository: Send + Sync {
    async fn find(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<AttendanceRecord>, AttendanceServiceError>;

    /// Records for a meeting ordered by check-in time, never-checked-in last.
    async fn list_by_meeting(
        &self,
        meeting_id: Uuid,
    ) -> Result<Vec<AttendanceRecord>, AttendanceServiceError>;

    /// Atomic upsert. A new row is `present` with `check_in_time = now`. An existing
    /// row gets `check_out_time` cleared and keeps its first `check_in_time`; a row
    /// that was never checked in becomes `present` at `now`.
    async fn check_in(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, AttendanceServiceError>;

    /// Close the open session, if any. Returns the closed record, or `None`
    /// when no row was checked in and still open.
    async fn check_out(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<AttendanceRecord>, AttendanceServiceError>;

    /// Set the status, creating the record if needed. Timestamps are left untouched.
    async fn set_status(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
        status: AttendanceStatus,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, AttendanceServiceError>;
}
