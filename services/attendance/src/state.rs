use url::Url;

use sea_orm::DatabaseConnection;

use crate::domain::clock::SystemClock;
use crate::domain::types::{CancelledAttendancePolicy, TokenPolicy};
use crate::infra::db::{DbAttendanceRepository, DbMeetingRepository, DbMentorshipRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub check_in_base_url: Url,
    pub token_policy: TokenPolicy,
    pub cancelled_policy: CancelledAttendancePolicy,
}

impl AppState {
    pub fn meeting_repo(&self) -> DbMeetingRepository {
        DbMeetingRepository {
            db: self.db.clone(),
        }
    }

    pub fn mentorship_repo(&self) -> DbMentorshipRepository {
        DbMentorshipRepository {
            db: self.db.clone(),
        }
    }

    pub fn attendance_repo(&self) -> DbAttendanceRepository {
        DbAttendanceRepository {
            db: self.db.clone(),
        }
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock
    }
}
