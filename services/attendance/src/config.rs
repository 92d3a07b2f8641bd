use crate::domain::types::{
    CancelledAttendancePolicy, DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS,
};

/// Attendance service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AttendanceConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3114). Env var: `ATTENDANCE_PORT`.
    pub attendance_port: u16,
    /// Link target rendered into QR codes. Env var: `CHECK_IN_BASE_URL`.
    pub check_in_base_url: String,
    /// Token TTL when the organizer does not request one. Env var: `DEFAULT_TOKEN_TTL_SECS`.
    pub default_token_ttl_secs: u32,
    /// Largest TTL an organizer may request. Env var: `MAX_TOKEN_TTL_SECS`.
    pub max_token_ttl_secs: u32,
    /// `retain` (default) or `checkout`. Env var: `CANCELLED_ATTENDANCE_POLICY`.
    pub cancelled_attendance_policy: CancelledAttendancePolicy,
}

impl AttendanceConfig {
    pub fn from_env() -> Self {
        let attendance_port = env_or("ATTENDANCE_PORT", 3114);
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            attendance_port,
            check_in_base_url: std::env::var("CHECK_IN_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{attendance_port}/check-in")),
            default_token_ttl_secs: env_or("DEFAULT_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS),
            max_token_ttl_secs: env_or("MAX_TOKEN_TTL_SECS", MAX_TOKEN_TTL_SECS),
            cancelled_attendance_policy: std::env::var("CANCELLED_ATTENDANCE_POLICY")
                .ok()
                .map(|v| v.parse().expect("invalid CANCELLED_ATTENDANCE_POLICY"))
                .unwrap_or_default(),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
