use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Attendance service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceServiceError {
    #[error("meeting not found")]
    MeetingNotFound,
    #[error("not authorized")]
    NotAuthorized,
    #[error("not a participant of this meeting")]
    NotAParticipant,
    #[error("meeting state does not permit this action")]
    InvalidMeetingState,
    #[error("meeting is closed")]
    MeetingClosed,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    TokenExpired,
    #[error("invalid code")]
    InvalidCode,
    #[error("invalid token ttl")]
    InvalidTtl,
    #[error("invalid check-in payload")]
    InvalidPayload,
    #[error("exactly one of token or manual code is required")]
    MissingCredential,
    #[error("invalid attendance status")]
    InvalidStatus,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AttendanceServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MeetingNotFound => "MEETING_NOT_FOUND",
            Self::NotAuthorized => "NOT_AUTHORIZED",
            Self::NotAParticipant => "NOT_A_PARTICIPANT",
            Self::InvalidMeetingState => "INVALID_MEETING_STATE",
            Self::MeetingClosed => "MEETING_CLOSED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCode => "INVALID_CODE",
            Self::InvalidTtl => "INVALID_TTL",
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::MissingCredential => "MISSING_CREDENTIAL",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AttendanceServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MeetingNotFound => StatusCode::NOT_FOUND,
            Self::NotAuthorized | Self::NotAParticipant => StatusCode::FORBIDDEN,
            Self::InvalidMeetingState | Self::MeetingClosed => StatusCode::CONFLICT,
            Self::InvalidToken | Self::TokenExpired | Self::InvalidCode => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidTtl
            | Self::InvalidPayload
            | Self::MissingCredential
            | Self::InvalidStatus => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only; TraceLayer already records method/uri/status for every request.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
