use sea_orm::Database;
use tracing::info;
use url::Url;

use mentorly_attendance::config::AttendanceConfig;
use mentorly_attendance::domain::types::TokenPolicy;
use mentorly_attendance::router::build_router;
use mentorly_attendance::state::AppState;
use mentorly_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing("mentorly_attendance=info,tower_http=info,sea_orm=warn");

    let config = AttendanceConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let check_in_base_url =
        Url::parse(&config.check_in_base_url).expect("invalid CHECK_IN_BASE_URL");

    let state = AppState {
        db,
        check_in_base_url,
        token_policy: TokenPolicy {
            default_ttl_secs: config.default_token_ttl_secs,
            max_ttl_secs: config.max_token_ttl_secs,
        },
        cancelled_policy: config.cancelled_attendance_policy,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.attendance_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("attendance service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
