use chrono::{DateTime, Utc};
use uuid::Uuid;

use mentorly_domain::attendance::AttendanceStatus;
use mentorly_domain::meeting::MeetingStatus;
use mentorly_domain::user::UserRole;

use crate::domain::credential::constant_time_eq;
use crate::error::AttendanceServiceError;

/// Check-in token length in characters.
pub const TOKEN_LEN: usize = 32;

/// Manual code length in digits.
pub const MANUAL_CODE_LEN: usize = 6;

/// Token time-to-live used when the organizer does not ask for one.
pub const DEFAULT_TOKEN_TTL_SECS: u32 = 300;

/// Upper bound on a requested token time-to-live.
pub const MAX_TOKEN_TTL_SECS: u32 = 3600;

/// A mentorship meeting with its check-in credentials.
#[derive(Debug, Clone)]
pub struct Meeting {
    pub id: Uuid,
    pub mentorship_id: Uuid,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: MeetingStatus,
    pub current_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
    pub manual_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    /// Constant-time comparison against the current token. False when none is set.
    pub fn token_matches(&self, candidate: &str) -> bool {
        self.current_token
            .as_deref()
            .is_some_and(|token| constant_time_eq(token.as_bytes(), candidate.as_bytes()))
    }

    /// A token stops being valid at the instant it reaches its expiry.
    pub fn token_expired(&self, now: DateTime<Utc>) -> bool {
        self.token_expires_at.is_none_or(|expires_at| now >= expires_at)
    }

    pub fn manual_code_matches(&self, candidate: &str) -> bool {
        self.manual_code
            .as_deref()
            .is_some_and(|code| constant_time_eq(code.as_bytes(), candidate.as_bytes()))
    }

    /// Current token and its expiry, if one is set and still valid at `now`.
    pub fn live_token(&self, now: DateTime<Utc>) -> Option<(&str, DateTime<Utc>)> {
        match (self.current_token.as_deref(), self.token_expires_at) {
            (Some(token), Some(expires_at)) if now < expires_at => Some((token, expires_at)),
            _ => None,
        }
    }
}

/// Mentorship pairing the mentor with the mentees who may attend its meetings.
#[derive(Debug, Clone)]
pub struct Mentorship {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_ids: Vec<Uuid>,
}

impl Mentorship {
    pub fn is_mentor(&self, user_id: Uuid) -> bool {
        self.mentor_id == user_id
    }

    pub fn is_mentee(&self, user_id: Uuid) -> bool {
        self.mentee_ids.contains(&user_id)
    }

    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.is_mentor(user_id) || self.is_mentee(user_id)
    }
}

/// Authenticated user acting on a meeting.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Caller {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Mentor of record or an administrator.
    pub fn can_organize(&self, mentorship: Option<&Mentorship>) -> bool {
        self.role.is_admin() || mentorship.is_some_and(|m| m.is_mentor(self.user_id))
    }

    /// Mentor, mentee, or an administrator.
    pub fn is_participant(&self, mentorship: Option<&Mentorship>) -> bool {
        self.role.is_admin() || mentorship.is_some_and(|m| m.is_member(self.user_id))
    }
}

/// One attendance row per (meeting, user).
#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    pub meeting_id: Uuid,
    pub user_id: Uuid,
    pub status: AttendanceStatus,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Checked in and not yet checked out.
    pub fn is_open(&self) -> bool {
        self.check_in_time.is_some() && self.check_out_time.is_none()
    }
}

/// Meeting after a lifecycle transition, with the number of sessions it closed.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub meeting: Meeting,
    pub forced_checkouts: u64,
}

/// What happens to open attendance sessions when a meeting is cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CancelledAttendancePolicy {
    /// Leave records untouched.
    #[default]
    Retain,
    /// Close open sessions the same way completion does.
    Checkout,
}

impl std::str::FromStr for CancelledAttendancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "checkout" => Ok(Self::Checkout),
            other => Err(format!("unknown cancelled attendance policy: {other:?}")),
        }
    }
}

/// Token lifetime bounds.
#[derive(Debug, Clone, Copy)]
pub struct TokenPolicy {
    pub default_ttl_secs: u32,
    pub max_ttl_secs: u32,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            default_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            max_ttl_secs: MAX_TOKEN_TTL_SECS,
        }
    }
}

impl TokenPolicy {
    /// Requested TTL must fall in `1..=max_ttl_secs`; absent means the default.
    pub fn resolve_ttl(&self, requested: Option<u32>) -> Result<u32, AttendanceServiceError> {
        match requested {
            None => Ok(self.default_ttl_secs),
            Some(ttl) if ttl >= 1 && ttl <= self.max_ttl_secs => Ok(ttl),
            Some(_) => Err(AttendanceServiceError::InvalidTtl),
        }
    }
}
