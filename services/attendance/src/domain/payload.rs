use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::error::AttendanceServiceError;

/// Path the check-in link points at.
pub const CHECK_IN_PATH: &str = "/check-in";

/// Meeting and token carried by a QR code, in any of the accepted encodings:
///
/// - link: `<base>/check-in?m=<meeting_id>&t=<token>` (absolute or path-only)
/// - JSON: `{"meetingId": "...", "token": "..."}` (`meeting_id` also accepted)
/// - base64 of the JSON form, standard or URL-safe alphabet, padding optional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInPayload {
    pub meeting_id: Uuid,
    pub token: String,
}

#[derive(Deserialize)]
struct LinkQuery {
    m: String,
    t: String,
}

#[derive(Deserialize)]
struct JsonPayload {
    #[serde(rename = "meetingId", alias = "meeting_id")]
    meeting_id: String,
    token: String,
}

impl CheckInPayload {
    pub fn new(meeting_id: Uuid, token: impl Into<String>) -> Self {
        Self {
            meeting_id,
            token: token.into(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, AttendanceServiceError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AttendanceServiceError::InvalidPayload);
        }
        if raw.starts_with('{') {
            return Self::from_json(raw.as_bytes());
        }
        if raw.starts_with('/') || raw.contains("://") {
            return Self::from_link(raw);
        }
        Self::from_base64(raw)
    }

    /// Render the link form against the configured check-in URL.
    pub fn to_link(&self, base: &Url) -> String {
        let mut url = base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("m", &self.meeting_id.to_string())
            .append_pair("t", &self.token);
        url.to_string()
    }

    fn from_link(raw: &str) -> Result<Self, AttendanceServiceError> {
        let parsed = if raw.starts_with('/') {
            Url::parse("http://localhost").and_then(|base| base.join(raw))
        } else {
            Url::parse(raw)
        };
        let url = parsed.map_err(|_| AttendanceServiceError::InvalidPayload)?;

        if !url.path().trim_end_matches('/').ends_with(CHECK_IN_PATH) {
            return Err(AttendanceServiceError::InvalidPayload);
        }
        let query: LinkQuery = serde_qs::from_str(url.query().unwrap_or_default())
            .map_err(|_| AttendanceServiceError::InvalidPayload)?;
        Self::build(&query.m, query.t)
    }

    fn from_json(bytes: &[u8]) -> Result<Self, AttendanceServiceError> {
        let payload: JsonPayload =
            serde_json::from_slice(bytes).map_err(|_| AttendanceServiceError::InvalidPayload)?;
        Self::build(&payload.meeting_id, payload.token)
    }

    fn from_base64(raw: &str) -> Result<Self, AttendanceServiceError> {
        let decoded = [STANDARD, URL_SAFE, STANDARD_NO_PAD, URL_SAFE_NO_PAD]
            .iter()
            .find_map(|engine| engine.decode(raw).ok())
            .ok_or(AttendanceServiceError::InvalidPayload)?;
        Self::from_json(&decoded)
    }

    fn build(meeting_id: &str, token: String) -> Result<Self, AttendanceServiceError> {
        let meeting_id =
            Uuid::parse_str(meeting_id.trim()).map_err(|_| AttendanceServiceError::InvalidPayload)?;
        if token.is_empty() {
            return Err(AttendanceServiceError::InvalidPayload);
        }
        Ok(Self { meeting_id, token })
    }
}
