use chrono::Duration;

use mentorly_attendance::domain::clock::Clock;
use mentorly_attendance::domain::credential::Credential;
use mentorly_attendance::domain::types::CancelledAttendancePolicy;
use mentorly_attendance::error::AttendanceServiceError;
use mentorly_attendance::usecase::check_in::CheckInInput;
use mentorly_attendance::usecase::lifecycle::MeetingTransition;
use mentorly_attendance::usecase::roster::MarkAttendanceInput;
use mentorly_attendance::usecase::token::IssueTokenInput;
use mentorly_domain::attendance::AttendanceStatus;
use mentorly_domain::meeting::MeetingStatus;

use crate::helpers::{Fixture, t0};

fn with_token(f: &Fixture, token: &str) -> CheckInInput {
    CheckInInput {
        meeting_id: f.meeting_id,
        credential: Credential::Token(token.to_owned()),
    }
}

fn with_code(f: &Fixture, code: &str) -> CheckInInput {
    CheckInInput {
        meeting_id: f.meeting_id,
        credential: Credential::ManualCode(code.to_owned()),
    }
}

#[tokio::test]
async fn should_check_in_with_fresh_token() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    f.clock.advance(Duration::seconds(60));

    let record = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await
        .unwrap();

    assert_eq!(record.status, AttendanceStatus::Present);
    assert_eq!(record.check_in_time, Some(t0() + Duration::seconds(60)));
    assert!(record.check_out_time.is_none());
    assert_eq!(f.store.record_count(), 1);
}

#[tokio::test]
async fn should_check_in_with_token_from_issuer() {
    let f = Fixture::new();
    let issued = f
        .issue_token_uc()
        .execute(
            &f.mentor,
            IssueTokenInput {
                meeting_id: f.meeting_id,
                ttl_seconds: Some(300),
            },
        )
        .await
        .unwrap();

    let result = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, &issued.token))
        .await;
    assert!(result.is_ok(), "expected Ok, got {result:?}");
}

#[tokio::test]
async fn should_reject_expired_token() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    f.clock.advance(Duration::seconds(301));

    let result = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::TokenExpired)),
        "expected TokenExpired, got {result:?}"
    );
    assert_eq!(f.store.record_count(), 0);
}

#[tokio::test]
async fn should_reject_token_at_exact_expiry() {
    let f = Fixture::new();
    f.open_with_token("abc123");

    f.clock.advance(Duration::seconds(300) - Duration::milliseconds(1));
    let before = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await;
    assert!(before.is_ok(), "expected Ok, got {before:?}");

    f.clock.set(t0() + Duration::seconds(300));
    let at = f
        .check_in_uc()
        .execute(&f.other_mentee, with_token(&f, "abc123"))
        .await;
    assert!(
        matches!(at, Err(AttendanceServiceError::TokenExpired)),
        "expected TokenExpired, got {at:?}"
    );
}

#[tokio::test]
async fn should_be_idempotent_for_repeated_scans() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    let uc = f.check_in_uc();

    let first = uc
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await
        .unwrap();
    f.clock.advance(Duration::seconds(30));
    let second = uc
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await
        .unwrap();

    assert_eq!(f.store.record_count(), 1);
    assert_eq!(second.check_in_time, first.check_in_time);
    assert!(second.check_out_time.is_none());
}

#[tokio::test]
async fn should_reopen_after_check_out_keeping_first_check_in() {
    let f = Fixture::new();
    f.open_with_token("abc123");

    let first = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await
        .unwrap();
    f.clock.advance(Duration::seconds(60));
    let out = f
        .check_out_uc()
        .execute(&f.mentee, f.meeting_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(out.check_out_time, Some(f.clock.now()));

    f.clock.advance(Duration::seconds(60));
    let back = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await
        .unwrap();

    assert_eq!(back.check_in_time, first.check_in_time);
    assert!(back.check_out_time.is_none());
    assert_eq!(f.store.record_count(), 1);
}

#[tokio::test]
async fn should_reject_old_token_after_rotation() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    f.issue_token_uc()
        .execute(
            &f.mentor,
            IssueTokenInput {
                meeting_id: f.meeting_id,
                ttl_seconds: None,
            },
        )
        .await
        .unwrap();

    let result = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_token() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    let result = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc124"))
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_token_when_none_issued() {
    let f = Fixture::new();
    let result = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, ""))
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_non_participant_with_valid_token() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    let result = f
        .check_in_uc()
        .execute(&f.outsider, with_token(&f, "abc123"))
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::NotAParticipant)),
        "expected NotAParticipant, got {result:?}"
    );
    assert_eq!(f.store.record_count(), 0);
}

#[tokio::test]
async fn should_reject_removed_mentee() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    f.store.remove_mentee(f.mentorship_id, f.other_mentee.user_id);
    let result = f
        .check_in_uc()
        .execute(&f.other_mentee, with_token(&f, "abc123"))
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::NotAParticipant)),
        "expected NotAParticipant, got {result:?}"
    );
}

#[tokio::test]
async fn should_allow_mentor_self_check_in() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    let record = f
        .check_in_uc()
        .execute(&f.mentor, with_token(&f, "abc123"))
        .await
        .unwrap();
    assert_eq!(record.user_id, f.mentor.user_id);
}

#[tokio::test]
async fn should_check_in_with_manual_code_regardless_of_token_expiry() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    let code = f
        .manual_code_uc()
        .execute(&f.mentor, f.meeting_id)
        .await
        .unwrap()
        .manual_code;
    f.clock.advance(Duration::hours(2));

    let record = f
        .check_in_uc()
        .execute(&f.mentee, with_code(&f, &code))
        .await
        .unwrap();
    assert_eq!(record.status, AttendanceStatus::Present);
}

#[tokio::test]
async fn should_reject_wrong_manual_code() {
    let f = Fixture::new();
    f.store
        .update_meeting(f.meeting_id, |m| m.manual_code = Some("123456".to_owned()));
    let result = f
        .check_in_uc()
        .execute(&f.mentee, with_code(&f, "654321"))
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::InvalidCode)),
        "expected InvalidCode, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_check_in_on_closed_meeting() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    f.store
        .update_meeting(f.meeting_id, |m| m.status = MeetingStatus::Completed);
    let result = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::MeetingClosed)),
        "expected MeetingClosed, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_meeting() {
    let f = Fixture::new();
    let result = f
        .check_in_uc()
        .execute(
            &f.mentee,
            CheckInInput {
                meeting_id: uuid::Uuid::new_v4(),
                credential: Credential::Token("abc123".to_owned()),
            },
        )
        .await;
    assert!(
        matches!(result, Err(AttendanceServiceError::MeetingNotFound)),
        "expected MeetingNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_fill_check_in_on_record_marked_by_organizer() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    f.mark_uc()
        .execute(
            &f.mentor,
            MarkAttendanceInput {
                meeting_id: f.meeting_id,
                user_id: f.mentee.user_id,
                status: AttendanceStatus::Absent,
            },
        )
        .await
        .unwrap();
    f.clock.advance(Duration::seconds(10));

    let record = f
        .check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await
        .unwrap();
    assert_eq!(record.status, AttendanceStatus::Present);
    assert_eq!(record.check_in_time, Some(f.clock.now()));
}

#[tokio::test]
async fn should_ignore_redundant_check_out() {
    let f = Fixture::new();
    let uc = f.check_out_uc();

    let none = uc.execute(&f.mentee, f.meeting_id).await.unwrap();
    assert!(none.is_none());

    f.open_with_token("abc123");
    f.check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await
        .unwrap();
    f.clock.advance(Duration::seconds(60));
    let first = uc.execute(&f.mentee, f.meeting_id).await.unwrap().unwrap();
    f.clock.advance(Duration::seconds(60));
    let second = uc.execute(&f.mentee, f.meeting_id).await.unwrap();

    assert!(second.is_none());
    let stored = f.store.record(f.meeting_id, f.mentee.user_id).unwrap();
    assert_eq!(stored.check_out_time, first.check_out_time);
}

#[tokio::test]
async fn should_report_close_when_clock_has_sub_microsecond_precision() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    f.check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await
        .unwrap();

    // Wall-clock reads carry nanoseconds; stored timestamps do not.
    f.clock
        .set(t0() + Duration::seconds(90) + Duration::nanoseconds(123_456_789));
    let closed = f
        .check_out_uc()
        .execute(&f.mentee, f.meeting_id)
        .await
        .unwrap();

    let closed = closed.expect("open session should be reported as closed");
    let check_out_time = closed.check_out_time.unwrap();
    assert!(check_out_time <= f.clock.now());
    assert!(f.clock.now() - check_out_time < Duration::microseconds(1));
}

#[tokio::test]
async fn should_converge_concurrent_check_ins_to_one_record() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    let first_uc = f.check_in_uc();
    let second_uc = f.check_in_uc();

    let (first, second) = tokio::join!(
        first_uc.execute(&f.mentee, with_token(&f, "abc123")),
        second_uc.execute(&f.mentee, with_token(&f, "abc123")),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(f.store.record_count(), 1);
    assert_eq!(first.check_in_time, second.check_in_time);
}

#[tokio::test]
async fn should_not_duplicate_record_when_completion_races_check_in() {
    let f = Fixture::new();
    f.open_with_token("abc123");
    f.check_in_uc()
        .execute(&f.mentee, with_token(&f, "abc123"))
        .await
        .unwrap();
    f.clock.advance(Duration::seconds(30));

    let complete_uc = f.transition_uc(CancelledAttendancePolicy::Retain);
    let check_in_uc = f.check_in_uc();
    let (completed, rescanned) = tokio::join!(
        complete_uc.execute(&f.mentor, f.meeting_id, MeetingTransition::Complete),
        check_in_uc.execute(&f.mentee, with_token(&f, "abc123")),
    );

    let completed = completed.unwrap();
    assert_eq!(completed.meeting.status, MeetingStatus::Completed);
    assert!(
        matches!(rescanned, Ok(_) | Err(AttendanceServiceError::MeetingClosed)),
        "expected Ok or MeetingClosed, got {rescanned:?}"
    );
    assert_eq!(f.store.record_count(), 1);
    let record = f.store.record(f.meeting_id, f.mentee.user_id).unwrap();
    assert_eq!(record.check_in_time, Some(t0()));
}
