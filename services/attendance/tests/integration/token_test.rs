use chrono::Duration;

use mentorly_attendance::domain::clock::Clock;
use mentorly_attendance::domain::payload::CheckInPayload;
use mentorly_attendance::domain::types::TOKEN_LEN;
use mentorly_attendance::error::AttendanceServiceError;
use mentorly_attendance::usecase::token::IssueTokenInput;
use mentorly_domain::meeting::MeetingStatus;

use crate::helpers::Fixture;

fn input(f: &Fixture, ttl_seconds: Option<u32>) -> IssueTokenInput {
    IssueTokenInput {
        meeting_id: f.meeting_id,
        ttl_seconds,
    }
}

#[tokio::test]
async fn should_issue_token_with_default_ttl() {
    let f = Fixture::new();

    let issued = f
        .issue_token_uc()
        .execute(&f.mentor, input(&f, None))
        .await
        .unwrap();

    assert_eq!(issued.token.len(), TOKEN_LEN);
    assert_eq!(issued.ttl_seconds, 300);
    assert_eq!(issued.expires_at, f.clock.now() + Duration::seconds(300));

    let meeting = f.store.meeting(f.meeting_id);
    assert_eq!(meeting.current_token.as_deref(), Some(issued.token.as_str()));
    assert_eq!(meeting.token_expires_at, Some(issued.expires_at));
}

#[tokio::test]
async fn should_render_payload_link_for_issued_token() {
    let f = Fixture::new();

    let issued = f
        .issue_token_uc()
        .execute(&f.mentor, input(&f, Some(60)))
        .await
        .unwrap();

    assert!(issued.payload_url.starts_with("https://app.example.com/check-in?m="));
    let parsed = CheckInPayload::parse(&issued.payload_url).unwrap();
    assert_eq!(parsed.meeting_id, f.meeting_id);
    assert_eq!(parsed.token, issued.token);
}

#[tokio::test]
async fn should_allow_admin_to_issue_token() {
    let f = Fixture::new();
    let result = f.issue_token_uc().execute(&f.admin, input(&f, None)).await;
    assert!(result.is_ok(), "expected Ok, got {result:?}");
}

#[tokio::test]
async fn should_reject_non_organizer() {
    let f = Fixture::new();
    for caller in [f.mentee, f.outsider] {
        let result = f.issue_token_uc().execute(&caller, input(&f, None)).await;
        assert!(
            matches!(result, Err(AttendanceServiceError::NotAuthorized)),
            "expected NotAuthorized, got {result:?}"
        );
    }
    assert!(f.store.meeting(f.meeting_id).current_token.is_none());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_meeting() {
    let f = Fixture::new();
    let result = f
        .issue_token_uc()
        .execute(
            &f.mentor,
            IssueTokenInput {
                meeting_id: uuid::Uuid::new_v4(),
                ttl_seconds: None,
            },
        )
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::MeetingNotFound)),
        "expected MeetingNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_ttl_out_of_bounds() {
    let f = Fixture::new();
    for ttl in [0, 3601] {
        let result = f
            .issue_token_uc()
            .execute(&f.mentor, input(&f, Some(ttl)))
            .await;
        assert!(
            matches!(result, Err(AttendanceServiceError::InvalidTtl)),
            "expected InvalidTtl for {ttl}, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_reject_issue_on_closed_meeting() {
    let f = Fixture::new();
    for status in [MeetingStatus::Completed, MeetingStatus::Cancelled] {
        f.store.update_meeting(f.meeting_id, |m| m.status = status);
        let result = f.issue_token_uc().execute(&f.mentor, input(&f, None)).await;
        assert!(
            matches!(result, Err(AttendanceServiceError::InvalidMeetingState)),
            "expected InvalidMeetingState for {status}, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_overwrite_previous_token_on_reissue() {
    let f = Fixture::new();
    let uc = f.issue_token_uc();

    let first = uc.execute(&f.mentor, input(&f, None)).await.unwrap();
    f.clock.advance(Duration::seconds(30));
    let second = uc.execute(&f.mentor, input(&f, None)).await.unwrap();

    assert_ne!(first.token, second.token);
    let meeting = f.store.meeting(f.meeting_id);
    assert_eq!(meeting.current_token.as_deref(), Some(second.token.as_str()));
    assert_eq!(meeting.token_expires_at, Some(second.expires_at));
}

#[tokio::test]
async fn should_report_live_credentials_with_countdown() {
    let f = Fixture::new();
    let issued = f
        .issue_token_uc()
        .execute(&f.mentor, input(&f, Some(120)))
        .await
        .unwrap();
    f.clock.advance(Duration::seconds(20));

    let current = f
        .current_credentials_uc()
        .execute(&f.mentor, f.meeting_id)
        .await
        .unwrap();

    let live = current.token.expect("token should still be live");
    assert_eq!(live.token, issued.token);
    assert_eq!(live.seconds_remaining, 100);
    assert_eq!(live.payload_url, issued.payload_url);
    assert_eq!(current.status, MeetingStatus::Scheduled);
}

#[tokio::test]
async fn should_hide_expired_token_from_credentials() {
    let f = Fixture::new();
    f.issue_token_uc()
        .execute(&f.mentor, input(&f, Some(60)))
        .await
        .unwrap();
    f.clock.advance(Duration::seconds(60));

    let current = f
        .current_credentials_uc()
        .execute(&f.mentor, f.meeting_id)
        .await
        .unwrap();
    assert!(current.token.is_none());
}

#[tokio::test]
async fn should_reject_credentials_read_by_mentee() {
    let f = Fixture::new();
    let result = f
        .current_credentials_uc()
        .execute(&f.mentee, f.meeting_id)
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::NotAuthorized)),
        "expected NotAuthorized, got {result:?}"
    );
}

#[tokio::test]
async fn should_issue_manual_code_once() {
    let f = Fixture::new();
    let uc = f.manual_code_uc();

    let first = uc.execute(&f.mentor, f.meeting_id).await.unwrap();
    assert_eq!(first.manual_code.len(), 6);
    assert!(first.manual_code.chars().all(|c| c.is_ascii_digit()));

    let second = uc.execute(&f.admin, f.meeting_id).await.unwrap();
    assert_eq!(first.manual_code, second.manual_code);

    // Token rotation leaves the manual code alone.
    let issued = f
        .issue_token_uc()
        .execute(&f.mentor, input(&f, None))
        .await
        .unwrap();
    assert_eq!(issued.manual_code.as_deref(), Some(first.manual_code.as_str()));
}

#[tokio::test]
async fn should_reject_manual_code_on_closed_meeting() {
    let f = Fixture::new();
    f.store
        .update_meeting(f.meeting_id, |m| m.status = MeetingStatus::Cancelled);
    let result = f.manual_code_uc().execute(&f.mentor, f.meeting_id).await;
    assert!(
        matches!(result, Err(AttendanceServiceError::InvalidMeetingState)),
        "expected InvalidMeetingState, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_manual_code_for_non_organizer() {
    let f = Fixture::new();
    let result = f.manual_code_uc().execute(&f.mentee, f.meeting_id).await;
    assert!(
        matches!(result, Err(AttendanceServiceError::NotAuthorized)),
        "expected NotAuthorized, got {result:?}"
    );
}
